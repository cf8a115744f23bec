//! # Domain Types
//!
//! Price-carrying records handed to us by the catalog layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐        ┌─────────────────────┐                │
//! │  │    CartLineItem     │ 0..n   │   WarehousePrice    │                │
//! │  │  ─────────────────  │───────►│  ─────────────────  │                │
//! │  │  product_id         │        │  warehouse_id       │                │
//! │  │  warehouse_id?      │        │  price?             │                │
//! │  │  quantity           │        │  special_price?     │                │
//! │  │  price?             │        │  base_price?        │                │
//! │  │  special_price?     │        │  base_special_price?│                │
//! │  │  base_price?        │        └─────────────────────┘                │
//! │  │  base_special_price?│                                               │
//! │  └─────────────────────┘        ┌─────────────────────┐                │
//! │                                 │     PriceValue      │                │
//! │                                 │  Number(f64)        │                │
//! │                                 │  Text("1 234,56")   │                │
//! │                                 └─────────────────────┘                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `price` / `special_price` are whatever the catalog stored (numbers or
//! localized strings). `base_*` fields are already converted to the base
//! currency and are always plain numbers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Price Value
// =============================================================================

/// A raw catalog price: either a number or a localized string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum PriceValue {
    Number(f64),
    Text(String),
}

impl From<f64> for PriceValue {
    fn from(value: f64) -> Self {
        PriceValue::Number(value)
    }
}

impl From<&str> for PriceValue {
    fn from(value: &str) -> Self {
        PriceValue::Text(value.to_string())
    }
}

impl From<String> for PriceValue {
    fn from(value: String) -> Self {
        PriceValue::Text(value)
    }
}

// =============================================================================
// Warehouse Price
// =============================================================================

/// Price of one catalog item in one warehouse.
///
/// Unique per (item, warehouse). If the catalog sends duplicates the
/// resolver uses the first matching entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct WarehousePrice {
    pub warehouse_id: String,

    #[serde(default)]
    pub price: Option<PriceValue>,

    #[serde(default)]
    pub special_price: Option<PriceValue>,

    /// Regular price already converted to the base currency.
    #[serde(default)]
    pub base_price: Option<f64>,

    /// Promotional price already converted to the base currency.
    #[serde(default)]
    pub base_special_price: Option<f64>,
}

impl WarehousePrice {
    /// Creates an entry with only a pre-converted regular price.
    pub fn with_base_price(warehouse_id: impl Into<String>, base_price: f64) -> Self {
        WarehousePrice {
            warehouse_id: warehouse_id.into(),
            base_price: Some(base_price),
            ..Default::default()
        }
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One entry in a shopping cart.
///
/// The item-level price fields are a denormalized copy from the catalog.
/// `available_warehouses` is the authoritative per-warehouse table, when the
/// catalog layer includes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLineItem {
    pub product_id: String,

    /// Warehouse selected by the shopper, if any.
    #[serde(default)]
    pub warehouse_id: Option<String>,

    /// Always positive; enforced by `Cart` mutations.
    pub quantity: u32,

    #[serde(default)]
    pub price: Option<PriceValue>,

    #[serde(default)]
    pub special_price: Option<PriceValue>,

    #[serde(default)]
    pub base_price: Option<f64>,

    #[serde(default)]
    pub base_special_price: Option<f64>,

    #[serde(default)]
    pub available_warehouses: Option<Vec<WarehousePrice>>,
}

impl CartLineItem {
    /// Creates a line with no price data yet.
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        CartLineItem {
            product_id: product_id.into(),
            quantity,
            ..Default::default()
        }
    }

    /// Returns true if this line refers to the same product in the same warehouse.
    pub fn same_line(&self, product_id: &str, warehouse_id: Option<&str>) -> bool {
        self.product_id == product_id && self.warehouse_id.as_deref() == warehouse_id
    }

    /// Looks up the per-warehouse entry for the selected warehouse.
    pub fn selected_warehouse_price(&self) -> Option<&WarehousePrice> {
        let selected = self.warehouse_id.as_deref()?;
        self.available_warehouses
            .as_ref()?
            .iter()
            .find(|entry| entry.warehouse_id == selected)
    }
}
