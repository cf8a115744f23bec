//! # Price Formatting
//!
//! Renders converted amounts the way each display currency's locale does.
//!
//! ```text
//! EUR  en-US   €1,234.56
//! PLN  pl-PL   1234,56 zł      12 345,67 zł   (grouping from 5 digits)
//! UAH  uk-UA   1 234,56 ₴
//! ```
//!
//! Group separators and the space before the symbol are U+00A0, matching
//! what browsers produce for these locales.

use crate::currency::Currency;

const NBSP: char = '\u{a0}';

struct LocaleStyle {
    group: char,
    decimal: char,
    /// Smallest integer-part length that gets grouped.
    min_grouping_digits: usize,
    symbol_first: bool,
}

fn style_for(currency: Currency) -> LocaleStyle {
    match currency {
        Currency::Eur => LocaleStyle {
            group: ',',
            decimal: '.',
            min_grouping_digits: 4,
            symbol_first: true,
        },
        Currency::Pln => LocaleStyle {
            group: NBSP,
            decimal: ',',
            min_grouping_digits: 5,
            symbol_first: false,
        },
        Currency::Uah => LocaleStyle {
            group: NBSP,
            decimal: ',',
            min_grouping_digits: 4,
            symbol_first: false,
        },
    }
}

/// Formats an amount already expressed in `currency`.
///
/// Always two fraction digits. Non-finite amounts render as zero.
///
/// ## Example
/// ```rust
/// use storefront_core::format::format_amount;
/// use storefront_core::Currency;
///
/// assert_eq!(format_amount(1234.5, Currency::Eur), "€1,234.50");
/// assert_eq!(format_amount(314.91, Currency::Pln), "314,91\u{a0}zł");
/// ```
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let style = style_for(currency);

    let cents = (amount.abs() * 100.0).round() as u64;
    let negative = amount < 0.0 && cents > 0;
    let integer = group_digits(&(cents / 100).to_string(), &style);
    let number = format!("{}{}{:02}", integer, style.decimal, cents % 100);

    let sign = if negative { "-" } else { "" };
    if style.symbol_first {
        format!("{}{}{}", sign, currency.symbol(), number)
    } else {
        format!("{}{}{}{}", sign, number, NBSP, currency.symbol())
    }
}

fn group_digits(digits: &str, style: &LocaleStyle) -> String {
    if digits.len() < style.min_grouping_digits {
        return digits.to_string();
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(style.group);
        }
        grouped.push(ch);
    }
    grouped
}
