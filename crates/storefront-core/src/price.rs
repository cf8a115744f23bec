//! # Price Parsing and Discounts
//!
//! Normalizes catalog prices into plain numbers and derives the
//! discount badge shown next to a promotional price.
//!
//! ## Parsing Pipeline
//! ```text
//! "1 234,56 zł"
//!      │  keep digits , . -
//!      ▼
//! "1234,56"
//!      │  first ',' → '.'
//!      ▼
//! "1234.56"
//!      │  parse leading number
//!      ▼
//! 1234.56          (anything unusable → 0.0)
//! ```

use tracing::trace;

use crate::types::PriceValue;

// =============================================================================
// Price Parser
// =============================================================================

/// Parses an optional catalog price into a number.
///
/// Never panics. Missing, unparseable and non-finite inputs all give `0.0`.
///
/// ## Example
/// ```rust
/// use storefront_core::price::parse_price_string;
/// use storefront_core::PriceValue;
///
/// let text = PriceValue::from("1 234,56 zł");
/// assert_eq!(parse_price_string(Some(&text)), 1234.56);
/// assert_eq!(parse_price_string(None), 0.0);
/// ```
pub fn parse_price_string(input: Option<&PriceValue>) -> f64 {
    match input {
        None => 0.0,
        Some(PriceValue::Number(value)) => finite_or_zero(*value),
        Some(PriceValue::Text(text)) => parse_price_str(text),
    }
}

/// Parses a localized price string.
///
/// Only digits, commas, periods and minus signs survive; the first comma
/// becomes the decimal point. The longest leading number is then read, so
/// `"1.234,56"` (which normalizes to `"1.234.56"`) reads as `1.234`.
pub fn parse_price_str(input: &str) -> f64 {
    let stripped: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    let normalized = stripped.replacen(',', ".", 1);

    match leading_number(&normalized) {
        Some(value) => finite_or_zero(value),
        None => {
            trace!(input, "Unparseable price collapsed to zero");
            0.0
        }
    }
}

impl PriceValue {
    /// Numeric value of this price, see [`parse_price_string`].
    pub fn amount(&self) -> f64 {
        parse_price_string(Some(self))
    }
}

/// Reads `-?digits*(.digits*)?` from the start of `s`, requiring one digit.
fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if bytes.first() == Some(&b'-') {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    s[..end].parse::<f64>().ok()
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// =============================================================================
// Discount Calculator
// =============================================================================

/// Percentage saved by the promotional price, rounded to a whole number.
///
/// Returns 0 when either price is not positive or when the "discount"
/// is not actually lower than the original.
///
/// ## Example
/// ```rust
/// use storefront_core::price::calculate_discount_percentage;
///
/// assert_eq!(calculate_discount_percentage(100.0, 80.0), 20);
/// assert_eq!(calculate_discount_percentage("199,99 zł", "149,99 zł"), 25);
/// assert_eq!(calculate_discount_percentage(100.0, 150.0), 0);
/// ```
pub fn calculate_discount_percentage(
    original_price: impl Into<PriceValue>,
    discount_price: impl Into<PriceValue>,
) -> u32 {
    let original = original_price.into().amount();
    let discount = discount_price.into().amount();

    if original <= 0.0 || discount <= 0.0 || discount >= original {
        return 0;
    }

    (((original - discount) / original) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> PriceValue {
        PriceValue::from(s)
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_price_string(Some(&PriceValue::Number(19.99))), 19.99);
        assert_eq!(parse_price_string(Some(&PriceValue::Number(-3.0))), -3.0);
        assert_eq!(parse_price_string(Some(&PriceValue::Number(f64::NAN))), 0.0);
        assert_eq!(parse_price_string(Some(&PriceValue::Number(f64::INFINITY))), 0.0);
    }

    #[test]
    fn test_parse_missing_is_zero() {
        assert_eq!(parse_price_string(None), 0.0);
    }

    #[test]
    fn test_parse_localized_strings() {
        assert_eq!(parse_price_string(Some(&text("1 234,56 zł"))), 1234.56);
        assert_eq!(parse_price_string(Some(&text("€19.99"))), 19.99);
        assert_eq!(parse_price_string(Some(&text("  42 "))), 42.0);
        assert_eq!(parse_price_string(Some(&text("249,00 ₴"))), 249.0);
        assert_eq!(parse_price_string(Some(&text("-5,5"))), -5.5);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(parse_price_string(Some(&text("abc"))), 0.0);
        assert_eq!(parse_price_string(Some(&text(""))), 0.0);
        assert_eq!(parse_price_string(Some(&text("-"))), 0.0);
        assert_eq!(parse_price_string(Some(&text(",."))), 0.0);
    }

    #[test]
    fn test_parse_reads_leading_number_only() {
        // "1.234,56" → "1.234.56" → leading number 1.234
        assert_eq!(parse_price_str("1.234,56"), 1.234);
        assert_eq!(parse_price_str("12-3"), 12.0);
        assert_eq!(parse_price_str(".5"), 0.5);
        assert_eq!(parse_price_str("7."), 7.0);
    }

    #[test]
    fn test_discount_percentage() {
        assert_eq!(calculate_discount_percentage(100.0, 80.0), 20);
        assert_eq!(calculate_discount_percentage(100.0, 66.5), 34);
        assert_eq!(calculate_discount_percentage(text("100"), text("80,00")), 20);
    }

    #[test]
    fn test_discount_guards() {
        assert_eq!(calculate_discount_percentage(100.0, 150.0), 0);
        assert_eq!(calculate_discount_percentage(100.0, 100.0), 0);
        assert_eq!(calculate_discount_percentage(0.0, 10.0), 0);
        assert_eq!(calculate_discount_percentage(-10.0, 5.0), 0);
        assert_eq!(calculate_discount_percentage(100.0, 0.0), 0);
        assert_eq!(calculate_discount_percentage("abc", "10"), 0);
        assert_eq!(calculate_discount_percentage(f64::NAN, 10.0), 0);
    }
}
