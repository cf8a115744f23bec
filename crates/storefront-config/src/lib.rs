//! # storefront-config: Pricing Configuration
//!
//! Loads the display currency and exchange-rate table that
//! `storefront-core` needs to build a currency context.
//!
//! ## Usage
//! ```rust,no_run
//! use storefront_config::PricingConfig;
//!
//! let config = PricingConfig::load_or_default(None);
//! let context = config.display_context();
//! ```

pub mod config;
pub mod error;

pub use config::{DisplaySettings, ExchangeRates, PricingConfig};
pub use error::{ConfigError, ConfigResult};
