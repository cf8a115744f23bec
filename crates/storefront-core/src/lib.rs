//! # storefront-core: Pure Pricing Logic for the Storefront
//!
//! This crate resolves what a shopper pays: which price field of a cart
//! line applies, how much the cart costs in the base currency, and what
//! that is in the shopper's display currency.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Storefront Pricing Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Storefront UI (hooks, product cards, cart)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON / generated TS types              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌───────┐ │   │
//! │  │  │ currency │ │  price   │ │ resolver │ │   cart   │ │format │ │   │
//! │  │  │ EUR/PLN/ │ │ parser & │ │warehouse │ │ totals & │ │locale │ │   │
//! │  │  │ UAH      │ │ discount │ │ fallback │ │ Cart     │ │output │ │   │
//! │  │  └──────────┘ └──────────┘ └──────────┘ └──────────┘ └───────┘ │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                ▲                                        │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │       storefront-config (display currency, exchange rates)      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`currency`] - Supported currencies, locale detection, conversion
//! - [`price`] - Price string parsing and discount percentages
//! - [`resolver`] - Per-warehouse unit price resolution and price tags
//! - [`cart`] - Cart aggregation and cart mutations
//! - [`format`] - Locale-style rendering of amounts
//! - [`types`] - Line items and warehouse price records
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks for cart mutations and rate tables
//!
//! ## Fail-Safe to Zero
//!
//! Pricing never returns an error. Missing, unparseable or non-finite price
//! data resolves to `0.0` (and "no discount"), so a broken catalog row shows
//! a zero price rather than breaking the cart.
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::cart::{CartTotals, ExchangeRateContext};
//! use storefront_core::{CartLineItem, Currency, WarehousePrice};
//!
//! let mut a = CartLineItem::new("A", 2);
//! a.price = Some(19.99.into());
//!
//! let mut b = CartLineItem::new("B", 1);
//! b.warehouse_id = Some("W1".to_string());
//! b.available_warehouses = Some(vec![WarehousePrice::with_base_price("W1", 30.0)]);
//!
//! let items = vec![a, b];
//! let pln = ExchangeRateContext::new(Currency::Pln, 4.5);
//! let totals = CartTotals::new(&items, &pln);
//!
//! assert!((totals.base_total_price() - 69.98).abs() < 1e-9);
//! assert_eq!(totals.total_price(), 314.91);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod currency;
pub mod error;
pub mod format;
pub mod price;
pub mod resolver;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartSummary, CartTotals, CurrencyContext, ExchangeRateContext, LineSummary};
pub use currency::{
    convert_price_value, detect_currency_from_locale, get_currency_symbol,
    get_locale_for_currency, Currency,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use price::{calculate_discount_percentage, parse_price_string};
pub use resolver::{resolve_base_unit_price, resolve_price_tag, PriceSource, PriceTag};
pub use types::{CartLineItem, PriceValue, WarehousePrice};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
pub const MAX_ITEM_QUANTITY: u32 = 999;
