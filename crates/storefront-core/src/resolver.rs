//! # Per-Warehouse Price Resolver
//!
//! Decides which of a line item's many price fields is the unit price.
//!
//! ## Fallback Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. item.base_special_price           pre-converted promo               │
//! │  2. item.base_price                   pre-converted regular             │
//! │  3. available_warehouses[selected]    only with a selected warehouse    │
//! │       a. base_special_price                                             │
//! │       b. base_price                                                     │
//! │       c. special_price  (parsed)                                        │
//! │       d. price          (parsed)                                        │
//! │  4. item.special_price  (parsed)                                        │
//! │  5. item.price          (parsed, missing → 0)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A pre-converted field counts when it is a finite, non-negative number.
//! A parsed field counts when it parses to a positive number; a blank or
//! zero promo price means "no promotion". Step 5 is terminal. The result
//! is never negative or non-finite.

use serde::{Deserialize, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::price::{calculate_discount_percentage, parse_price_string};
use crate::types::{CartLineItem, PriceValue, WarehousePrice};

// =============================================================================
// Price Source
// =============================================================================

/// Which field a resolved price came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PriceSource {
    ItemBaseSpecialPrice,
    ItemBasePrice,
    WarehouseBaseSpecialPrice,
    WarehouseBasePrice,
    WarehouseSpecialPrice,
    WarehousePrice,
    ItemSpecialPrice,
    ItemPrice,
}

/// A unit price together with where it came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedPrice {
    pub amount: f64,
    pub source: PriceSource,
}

// =============================================================================
// Resolution
// =============================================================================

/// Resolves the base unit price of a line item.
///
/// ## Example
/// ```rust
/// use storefront_core::resolver::resolve_base_unit_price;
/// use storefront_core::{CartLineItem, WarehousePrice};
///
/// let mut item = CartLineItem::new("p-1", 1);
/// item.price = Some(25.0.into());
/// item.warehouse_id = Some("W1".to_string());
/// item.available_warehouses = Some(vec![WarehousePrice::with_base_price("W1", 30.0)]);
///
/// assert_eq!(resolve_base_unit_price(&item), 30.0);
/// ```
pub fn resolve_base_unit_price(item: &CartLineItem) -> f64 {
    resolve(item).amount
}

/// Resolves the base unit price and reports which field won.
pub fn resolve(item: &CartLineItem) -> ResolvedPrice {
    let resolved = resolve_unclamped(item);
    let amount = if resolved.amount.is_finite() && resolved.amount > 0.0 {
        resolved.amount
    } else {
        0.0
    };

    trace!(
        product_id = %item.product_id,
        source = ?resolved.source,
        amount,
        "Resolved unit price"
    );

    ResolvedPrice { amount, ..resolved }
}

fn resolve_unclamped(item: &CartLineItem) -> ResolvedPrice {
    if let Some(amount) = pre_converted(item.base_special_price) {
        return found(amount, PriceSource::ItemBaseSpecialPrice);
    }
    if let Some(amount) = pre_converted(item.base_price) {
        return found(amount, PriceSource::ItemBasePrice);
    }

    if let Some(entry) = item.selected_warehouse_price() {
        if let Some(resolved) = resolve_warehouse_entry(entry) {
            return resolved;
        }
        trace!(
            product_id = %item.product_id,
            warehouse_id = %entry.warehouse_id,
            "Warehouse entry has no usable price, falling back to item"
        );
    }

    if let Some(amount) = parsed(item.special_price.as_ref()) {
        return found(amount, PriceSource::ItemSpecialPrice);
    }

    found(parse_price_string(item.price.as_ref()), PriceSource::ItemPrice)
}

fn resolve_warehouse_entry(entry: &WarehousePrice) -> Option<ResolvedPrice> {
    if let Some(amount) = pre_converted(entry.base_special_price) {
        return Some(found(amount, PriceSource::WarehouseBaseSpecialPrice));
    }
    if let Some(amount) = pre_converted(entry.base_price) {
        return Some(found(amount, PriceSource::WarehouseBasePrice));
    }
    if let Some(amount) = parsed(entry.special_price.as_ref()) {
        return Some(found(amount, PriceSource::WarehouseSpecialPrice));
    }
    parsed(entry.price.as_ref()).map(|amount| found(amount, PriceSource::WarehousePrice))
}

/// Regular (non-promotional) unit price from the same record as `resolved`.
///
/// Item-level sources pair with the item's own regular fields, warehouse
/// sources with the selected entry's. When that record has no regular
/// price the current price stands, so nothing is shown as discounted.
fn resolve_regular(item: &CartLineItem, resolved: &ResolvedPrice) -> f64 {
    let regular = match resolved.source {
        PriceSource::ItemBaseSpecialPrice | PriceSource::ItemSpecialPrice => {
            pre_converted(item.base_price).or_else(|| parsed(item.price.as_ref()))
        }
        PriceSource::WarehouseBaseSpecialPrice | PriceSource::WarehouseSpecialPrice => item
            .selected_warehouse_price()
            .and_then(|entry| pre_converted(entry.base_price).or_else(|| parsed(entry.price.as_ref()))),
        PriceSource::ItemBasePrice
        | PriceSource::WarehouseBasePrice
        | PriceSource::WarehousePrice
        | PriceSource::ItemPrice => None,
    };
    regular.unwrap_or(resolved.amount)
}

fn pre_converted(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v >= 0.0)
}

fn parsed(value: Option<&PriceValue>) -> Option<f64> {
    value.map(|v| v.amount()).filter(|v| *v > 0.0)
}

fn found(amount: f64, source: PriceSource) -> ResolvedPrice {
    ResolvedPrice { amount, source }
}

// =============================================================================
// Price Tag
// =============================================================================

/// What a product card shows: the current price, the struck-through
/// original (only while on sale) and the discount badge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceTag {
    pub base_price: f64,
    pub base_original_price: Option<f64>,
    pub discount_percentage: u32,
    pub on_sale: bool,
}

/// Builds the price tag for an item in its selected warehouse.
///
/// ## Example
/// ```rust
/// use storefront_core::resolver::resolve_price_tag;
/// use storefront_core::CartLineItem;
///
/// let mut item = CartLineItem::new("p-1", 1);
/// item.price = Some("100,00 zł".into());
/// item.special_price = Some("80,00 zł".into());
///
/// let tag = resolve_price_tag(&item);
/// assert_eq!(tag.base_price, 80.0);
/// assert_eq!(tag.base_original_price, Some(100.0));
/// assert_eq!(tag.discount_percentage, 20);
/// ```
pub fn resolve_price_tag(item: &CartLineItem) -> PriceTag {
    let resolved = resolve(item);
    let current = resolved.amount;
    let original = resolve_regular(item, &resolved);
    let discount_percentage = calculate_discount_percentage(original, current);
    let on_sale = discount_percentage > 0;

    PriceTag {
        base_price: current,
        base_original_price: on_sale.then_some(original),
        discount_percentage,
        on_sale,
    }
}
