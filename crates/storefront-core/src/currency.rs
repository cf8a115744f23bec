//! # Currency Module
//!
//! The display currencies the storefront supports and the conversion from
//! base-currency amounts into them.
//!
//! ## Currency Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Currency   Locale    Symbol   Detected from locale containing         │
//! │  ────────   ──────    ──────   ───────────────────────────────         │
//! │  EUR        en-US     €        (anything else, or no locale)           │
//! │  PLN        pl-PL     zł       "pl"                                     │
//! │  UAH        uk-UA     ₴        "ua" or "uk"                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why f64 here?
//! Exchange rates are fractional and prices arrive from the catalog as
//! floats or localized strings. Amounts stay unrounded through sums;
//! only [`convert_price_value`] rounds, to 2 decimals, on the way out.
//!
//! ## Usage
//! ```rust
//! use storefront_core::currency::{convert_price_value, detect_currency_from_locale, Currency};
//!
//! assert_eq!(detect_currency_from_locale(Some("pl-PL")), Currency::Pln);
//! assert_eq!(convert_price_value(100.0, 4.5), 450.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::trace;
use ts_rs::TS;

use crate::error::ValidationError;

/// Locale used when a currency code is not recognized.
pub const FALLBACK_LOCALE: &str = "en-US";

/// Symbol used when a currency code is not recognized.
pub const FALLBACK_SYMBOL: &str = "€";

// =============================================================================
// Currency
// =============================================================================

/// A supported display currency.
///
/// Serializes as the uppercase code; parsing and deserializing accept any
/// case and surrounding whitespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, TS)]
#[serde(rename_all = "UPPERCASE")]
#[ts(export)]
pub enum Currency {
    #[default]
    Eur,
    Pln,
    Uah,
}

impl Currency {
    /// All supported currencies, in declaration order.
    pub const ALL: [Currency; 3] = [Currency::Eur, Currency::Pln, Currency::Uah];

    /// ISO 4217 code.
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Pln => "PLN",
            Currency::Uah => "UAH",
        }
    }

    /// Locale tag used to format amounts in this currency.
    pub const fn locale(self) -> &'static str {
        match self {
            Currency::Eur => "en-US",
            Currency::Pln => "pl-PL",
            Currency::Uah => "uk-UA",
        }
    }

    /// Display symbol.
    pub const fn symbol(self) -> &'static str {
        match self {
            Currency::Eur => "€",
            Currency::Pln => "zł",
            Currency::Uah => "₴",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EUR" => Ok(Currency::Eur),
            "PLN" => Ok(Currency::Pln),
            "UAH" => Ok(Currency::Uah),
            _ => Err(ValidationError::NotAllowed {
                field: "currency".to_string(),
                allowed: Currency::ALL.iter().map(|c| c.code().to_string()).collect(),
            }),
        }
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Locale Detection
// =============================================================================

/// Picks the display currency for a locale tag.
///
/// Case-insensitive substring match: "pl" wins first, then "ua"/"uk",
/// everything else (and `None`) is EUR.
///
/// ## Example
/// ```rust
/// use storefront_core::currency::{detect_currency_from_locale, Currency};
///
/// assert_eq!(detect_currency_from_locale(Some("PL")), Currency::Pln);
/// assert_eq!(detect_currency_from_locale(Some("uk-UA")), Currency::Uah);
/// assert_eq!(detect_currency_from_locale(Some("de-DE")), Currency::Eur);
/// assert_eq!(detect_currency_from_locale(None), Currency::Eur);
/// ```
pub fn detect_currency_from_locale(locale: Option<&str>) -> Currency {
    let Some(locale) = locale else {
        return Currency::Eur;
    };

    let normalized = locale.to_lowercase();
    if normalized.contains("pl") {
        Currency::Pln
    } else if normalized.contains("ua") || normalized.contains("uk") {
        Currency::Uah
    } else {
        Currency::Eur
    }
}

/// Like [`detect_currency_from_locale`], but reads the process locale
/// (`LC_ALL`, then `LC_MONETARY`, then `LANG`) when no tag is given.
pub fn detect_currency_from_env() -> Currency {
    detect_currency_with(|key| std::env::var(key).ok())
}

/// [`detect_currency_from_env`] over an arbitrary variable lookup.
///
/// The first non-empty of `LC_ALL`, `LC_MONETARY`, `LANG` decides.
pub fn detect_currency_with<F>(lookup: F) -> Currency
where
    F: Fn(&str) -> Option<String>,
{
    let ambient = ["LC_ALL", "LC_MONETARY", "LANG"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.is_empty());

    trace!(locale = ?ambient, "Detecting currency from ambient locale");
    detect_currency_from_locale(ambient.as_deref())
}

// =============================================================================
// Table Lookups
// =============================================================================

/// Locale tag for a currency.
pub fn get_locale_for_currency(currency: Currency) -> &'static str {
    currency.locale()
}

/// Symbol for a currency.
pub fn get_currency_symbol(currency: Currency) -> &'static str {
    currency.symbol()
}

/// Locale tag for a raw currency code; unknown codes get the EUR locale.
pub fn locale_for_code(code: &str) -> &'static str {
    code.parse::<Currency>()
        .map(Currency::locale)
        .unwrap_or(FALLBACK_LOCALE)
}

/// Symbol for a raw currency code; unknown codes get "€".
pub fn symbol_for_code(code: &str) -> &'static str {
    code.parse::<Currency>()
        .map(Currency::symbol)
        .unwrap_or(FALLBACK_SYMBOL)
}

// =============================================================================
// Conversion
// =============================================================================

/// Converts a base-currency amount with an exchange rate, rounded to cents.
///
/// Rounds half up after nudging by `f64::EPSILON`, so values like
/// `1.005 * 1` land on `1.01`. Any NaN or infinity (from the value,
/// the rate, or the product) collapses to `0.0`.
///
/// ## Example
/// ```rust
/// use storefront_core::currency::convert_price_value;
///
/// assert_eq!(convert_price_value(99.99, 4.5), 449.96);
/// assert_eq!(convert_price_value(f64::INFINITY, 2.0), 0.0);
/// assert_eq!(convert_price_value(100.0, f64::NAN), 0.0);
/// ```
pub fn convert_price_value(value: f64, exchange_rate: f64) -> f64 {
    let converted = value * exchange_rate;
    if !converted.is_finite() {
        trace!(value, exchange_rate, "Non-finite conversion collapsed to zero");
        return 0.0;
    }

    let rounded = round_half_up((converted + f64::EPSILON) * 100.0) / 100.0;
    if rounded.is_finite() {
        rounded
    } else {
        0.0
    }
}

/// Rounds .5 towards positive infinity.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}
