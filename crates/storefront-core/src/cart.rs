//! # Cart Aggregation
//!
//! Turns a sequence of line items into base and display totals.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Totals                                     │
//! │                                                                         │
//! │  CartLineItem ──► resolve_base_unit_price ──► × quantity ──┐           │
//! │  CartLineItem ──► resolve_base_unit_price ──► × quantity ──┤           │
//! │                                                            ▼           │
//! │                                                  base_total_price      │
//! │                                                            │           │
//! │                                   CurrencyContext::convert │           │
//! │                                                            ▼           │
//! │                                                       total_price      │
//! │                                                                         │
//! │  Nothing is cached: every accessor recomputes from the current items.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::currency::{convert_price_value, Currency};
use crate::error::{CoreError, CoreResult};
use crate::format::format_amount;
use crate::resolver::resolve_base_unit_price;
use crate::types::CartLineItem;
use crate::validation::{validate_cart_size, validate_id, validate_quantity};
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Currency Context
// =============================================================================

/// The active display currency: how to convert a base amount and how to
/// render it.
pub trait CurrencyContext {
    /// Currency that `convert` produces.
    fn currency(&self) -> Currency;

    /// Converts a base-currency amount into the display currency.
    fn convert(&self, base_value: f64) -> f64;

    /// Renders a base-currency amount in the display currency.
    fn format(&self, base_value: f64) -> String {
        format_amount(self.convert(base_value), self.currency())
    }
}

/// A display currency with a fixed rate from the base currency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRateContext {
    currency: Currency,
    rate: f64,
}

impl ExchangeRateContext {
    pub fn new(currency: Currency, rate: f64) -> Self {
        ExchangeRateContext { currency, rate }
    }

    /// Base currency shown as-is (EUR at 1.0).
    pub fn identity() -> Self {
        ExchangeRateContext::new(Currency::Eur, 1.0)
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl CurrencyContext for ExchangeRateContext {
    fn currency(&self) -> Currency {
        self.currency
    }

    fn convert(&self, base_value: f64) -> f64 {
        convert_price_value(base_value, self.rate)
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Derived prices over a borrowed line-item sequence.
///
/// ## Example
/// ```rust
/// use storefront_core::cart::{CartTotals, ExchangeRateContext};
/// use storefront_core::{CartLineItem, Currency};
///
/// let mut item = CartLineItem::new("p-1", 2);
/// item.price = Some(10.0.into());
/// let items = vec![item];
///
/// let context = ExchangeRateContext::new(Currency::Pln, 4.5);
/// let totals = CartTotals::new(&items, &context);
/// assert_eq!(totals.base_total_price(), 20.0);
/// assert_eq!(totals.total_price(), 90.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CartTotals<'a, C: CurrencyContext> {
    items: &'a [CartLineItem],
    context: &'a C,
}

impl<'a, C: CurrencyContext> CartTotals<'a, C> {
    pub fn new(items: &'a [CartLineItem], context: &'a C) -> Self {
        CartTotals { items, context }
    }

    /// Sum of resolved unit price × quantity, in the base currency.
    pub fn base_total_price(&self) -> f64 {
        self.items.iter().map(|item| self.item_base_total(item)).sum()
    }

    /// `base_total_price` in the display currency.
    pub fn total_price(&self) -> f64 {
        self.context.convert(self.base_total_price())
    }

    /// Line total in the base currency.
    pub fn item_base_total(&self, item: &CartLineItem) -> f64 {
        resolve_base_unit_price(item) * f64::from(item.quantity)
    }

    /// Line total in the display currency.
    pub fn item_total(&self, item: &CartLineItem) -> f64 {
        self.context.convert(self.item_base_total(item))
    }

    /// Renders a base-currency amount in the display currency.
    pub fn format_price(&self, base_value: f64) -> String {
        self.context.format(base_value)
    }

    /// Snapshot of every derived value, for handing to the UI.
    pub fn summary(&self) -> CartSummary {
        let lines = self
            .items
            .iter()
            .map(|item| {
                let base_total = self.item_base_total(item);
                LineSummary {
                    product_id: item.product_id.clone(),
                    warehouse_id: item.warehouse_id.clone(),
                    quantity: item.quantity,
                    base_unit_price: resolve_base_unit_price(item),
                    base_total,
                    total: self.context.convert(base_total),
                    formatted_total: self.format_price(base_total),
                }
            })
            .collect();

        let base_total_price = self.base_total_price();
        CartSummary {
            currency: self.context.currency(),
            lines,
            base_total_price,
            total_price: self.context.convert(base_total_price),
            formatted_total: self.format_price(base_total_price),
        }
    }
}

/// One line of a [`CartSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineSummary {
    pub product_id: String,
    pub warehouse_id: Option<String>,
    pub quantity: u32,
    pub base_unit_price: f64,
    pub base_total: f64,
    pub total: f64,
    pub formatted_total: String,
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSummary {
    pub currency: Currency,
    pub lines: Vec<LineSummary>,
    pub base_total_price: f64,
    pub total_price: f64,
    pub formatted_total: String,
}

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart: ordered lines plus the selected display currency.
///
/// ## Invariants
/// - Lines are unique by (product_id, warehouse_id); adding again increases quantity
/// - Quantity is always in 1..=MAX_ITEM_QUANTITY; setting 0 removes the line
/// - At most MAX_CART_ITEMS lines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    pub items: Vec<CartLineItem>,
    #[serde(default)]
    pub currency: Currency,
}

impl Cart {
    pub fn new(currency: Currency) -> Self {
        Cart {
            items: Vec::new(),
            currency,
        }
    }

    /// Adds a line or increases the quantity of the matching one.
    ///
    /// A merged line keeps the price data it was first added with.
    pub fn add_item(&mut self, item: CartLineItem) -> CoreResult<()> {
        validate_id("product_id", &item.product_id)?;
        validate_quantity(item.quantity)?;

        let warehouse_id = item.warehouse_id.as_deref();
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|line| line.same_line(&item.product_id, warehouse_id))
        {
            let new_qty = existing.quantity.saturating_add(item.quantity);
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            debug!(product_id = %item.product_id, quantity = new_qty, "Merged cart line");
            existing.quantity = new_qty;
            return Ok(());
        }

        if validate_cart_size(self.items.len()).is_err() {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        debug!(product_id = %item.product_id, warehouse_id = ?item.warehouse_id, "Added cart line");
        self.items.push(item);
        Ok(())
    }

    /// Sets a line's quantity; 0 removes it.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        warehouse_id: Option<&str>,
        quantity: u32,
    ) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id, warehouse_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let line = self
            .items
            .iter_mut()
            .find(|line| line.same_line(product_id, warehouse_id))
            .ok_or_else(|| line_not_found(product_id, warehouse_id))?;

        debug!(product_id, quantity, "Updated cart line quantity");
        line.quantity = quantity;
        Ok(())
    }

    /// Removes the line for a product/warehouse pair.
    pub fn remove_item(&mut self, product_id: &str, warehouse_id: Option<&str>) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items
            .retain(|line| !line.same_line(product_id, warehouse_id));

        if self.items.len() == initial_len {
            return Err(line_not_found(product_id, warehouse_id));
        }

        debug!(product_id, "Removed cart line");
        Ok(())
    }

    /// Clears all lines; the selected currency stays.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Switches the display currency.
    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals for this cart under a currency context.
    pub fn totals<'a, C: CurrencyContext>(&'a self, context: &'a C) -> CartTotals<'a, C> {
        CartTotals::new(&self.items, context)
    }
}

fn line_not_found(product_id: &str, warehouse_id: Option<&str>) -> CoreError {
    CoreError::LineNotFound {
        product_id: product_id.to_string(),
        warehouse: warehouse_id.unwrap_or("none").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WarehousePrice;

    fn priced(product_id: &str, price: f64, quantity: u32) -> CartLineItem {
        let mut item = CartLineItem::new(product_id, quantity);
        item.price = Some(price.into());
        item
    }

    /// Context that doubles amounts and tags the output, to check delegation.
    struct Doubling;

    impl CurrencyContext for Doubling {
        fn currency(&self) -> Currency {
            Currency::Uah
        }

        fn convert(&self, base_value: f64) -> f64 {
            base_value * 2.0
        }

        fn format(&self, base_value: f64) -> String {
            format!("x2:{}", base_value)
        }
    }

    #[test]
    fn test_totals_of_empty_cart() {
        let context = ExchangeRateContext::new(Currency::Pln, 4.5);
        let totals = CartTotals::new(&[], &context);
        assert_eq!(totals.base_total_price(), 0.0);
        assert_eq!(totals.total_price(), 0.0);
    }

    #[test]
    fn test_item_totals() {
        let items = vec![priced("a", 19.99, 2)];
        let context = ExchangeRateContext::new(Currency::Pln, 4.5);
        let totals = CartTotals::new(&items, &context);

        assert!((totals.item_base_total(&items[0]) - 39.98).abs() < 1e-9);
        assert_eq!(totals.item_total(&items[0]), 179.91);
    }

    #[test]
    fn test_context_receives_base_values() {
        let items = vec![priced("a", 5.0, 3)];
        let totals = CartTotals::new(&items, &Doubling);

        assert_eq!(totals.total_price(), 30.0);
        assert_eq!(totals.format_price(15.0), "x2:15");
    }

    #[test]
    fn test_default_format_uses_display_currency() {
        let context = ExchangeRateContext::new(Currency::Pln, 4.5);
        let items: Vec<CartLineItem> = Vec::new();
        let totals = CartTotals::new(&items, &context);
        assert_eq!(totals.format_price(100.0), "450,00\u{a0}zł");
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        let items = vec![priced("a", 19.99, 2), priced("b", 0.1, 7)];
        let context = ExchangeRateContext::new(Currency::Uah, 45.25);
        let totals = CartTotals::new(&items, &context);

        let first = totals.total_price();
        for _ in 0..10 {
            assert_eq!(totals.total_price(), first);
        }
        assert_eq!(totals.summary(), totals.summary());
    }

    #[test]
    fn test_summary_lines() {
        let mut warehoused = CartLineItem::new("b", 1);
        warehoused.warehouse_id = Some("W1".to_string());
        warehoused.available_warehouses = Some(vec![WarehousePrice::with_base_price("W1", 30.0)]);
        let items = vec![priced("a", 10.0, 2), warehoused];

        let context = ExchangeRateContext::identity();
        let summary = CartTotals::new(&items, &context).summary();

        assert_eq!(summary.currency, Currency::Eur);
        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].base_unit_price, 10.0);
        assert_eq!(summary.lines[0].base_total, 20.0);
        assert_eq!(summary.lines[1].warehouse_id.as_deref(), Some("W1"));
        assert_eq!(summary.lines[1].formatted_total, "€30.00");
        assert_eq!(summary.base_total_price, 50.0);
        assert_eq!(summary.formatted_total, "€50.00");
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new(Currency::Eur);
        cart.add_item(priced("1", 9.99, 2)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_cart_add_same_line_increases_quantity() {
        let mut cart = Cart::new(Currency::Eur);
        cart.add_item(priced("1", 9.99, 2)).unwrap();
        cart.add_item(priced("1", 9.99, 3)).unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.total_quantity(), 5);
    }

    #[test]
    fn test_cart_different_warehouses_are_separate_lines() {
        let mut cart = Cart::new(Currency::Eur);
        let mut a = priced("1", 9.99, 1);
        a.warehouse_id = Some("W1".to_string());
        let mut b = priced("1", 9.99, 1);
        b.warehouse_id = Some("W2".to_string());

        cart.add_item(a).unwrap();
        cart.add_item(b).unwrap();
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_cart_rejects_bad_quantities() {
        let mut cart = Cart::new(Currency::Eur);
        assert!(matches!(
            cart.add_item(priced("1", 1.0, 0)),
            Err(CoreError::Validation(_))
        ));

        cart.add_item(priced("1", 1.0, 990)).unwrap();
        assert!(matches!(
            cart.add_item(priced("1", 1.0, 10)),
            Err(CoreError::QuantityTooLarge { requested: 1000, max: 999 })
        ));
    }

    #[test]
    fn test_cart_rejects_too_many_lines() {
        let mut cart = Cart::new(Currency::Eur);
        for i in 0..MAX_CART_ITEMS {
            cart.add_item(priced(&i.to_string(), 1.0, 1)).unwrap();
        }
        assert!(matches!(
            cart.add_item(priced("one-more", 1.0, 1)),
            Err(CoreError::CartTooLarge { .. })
        ));
    }

    #[test]
    fn test_cart_update_and_remove() {
        let mut cart = Cart::new(Currency::Eur);
        cart.add_item(priced("1", 9.99, 2)).unwrap();

        cart.update_quantity("1", None, 4).unwrap();
        assert_eq!(cart.total_quantity(), 4);

        cart.update_quantity("1", None, 0).unwrap();
        assert!(cart.is_empty());

        assert!(matches!(
            cart.remove_item("1", None),
            Err(CoreError::LineNotFound { .. })
        ));
        assert!(cart.update_quantity("1", None, 1).is_err());
    }

    #[test]
    fn test_cart_clear_keeps_currency() {
        let mut cart = Cart::new(Currency::Pln);
        cart.add_item(priced("1", 9.99, 2)).unwrap();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.currency, Currency::Pln);
    }
}
