//! Conversion of rendered price text into a numeric value.
//!
//! Product pages render prices as separate text nodes for the whole and
//! fractional parts, so element text often arrives as `"£12\n99"` rather than
//! `"£12.99"`. Thousands separators (`,`) may also be present.

use crate::error::ScraperError;

/// Thousands separator as rendered by the target site.
const THOUSANDS_SEPARATOR: char = ',';

/// Parses a raw price string such as `"£1,234\n56"` into `1234.56`.
///
/// Steps, each optional except the first and last:
/// 1. take the text after the first `currency_symbol` (up to any later one),
/// 2. rejoin a newline-split whole/fraction pair as `whole.fraction`,
/// 3. drop every thousands separator,
/// 4. parse what remains as a non-negative decimal number.
///
/// A comma is always read as a thousands separator, never as a decimal
/// point: `"€12,99"` parses as `1299.0`.
///
/// # Errors
///
/// Returns [`ScraperError::Parse`] when the symbol is absent, the cleaned
/// amount is not a plain decimal number, or the value overflows `f64`.
pub fn parse_price(raw: &str, currency_symbol: &str) -> Result<f64, ScraperError> {
    let fail = |reason: &str| ScraperError::Parse {
        raw: raw.to_owned(),
        reason: reason.to_owned(),
    };

    if currency_symbol.is_empty() {
        return Err(fail("currency symbol is empty"));
    }

    let Some((_, after_symbol)) = raw.split_once(currency_symbol) else {
        return Err(fail("currency symbol not present"));
    };
    let amount = after_symbol
        .find(currency_symbol)
        .map_or(after_symbol, |end| &after_symbol[..end]);

    let joined = match amount.split_once('\n') {
        Some((whole, rest)) => {
            let fraction = rest.split('\n').next().unwrap_or_default();
            format!("{}.{}", whole.trim(), fraction.trim())
        }
        None => amount.trim().to_owned(),
    };

    let cleaned: String = joined
        .chars()
        .filter(|&c| c != THOUSANDS_SEPARATOR)
        .collect();

    if !is_plain_decimal(&cleaned) {
        return Err(fail("amount is not numeric"));
    }

    let value: f64 = cleaned.parse().map_err(|_| fail("amount is not numeric"))?;
    if !value.is_finite() {
        return Err(fail("amount overflows"));
    }
    Ok(value)
}

/// `true` for strings like `"12"`, `"12.99"`, `"12."` and `".5"`: ASCII
/// digits with at most one dot and at least one digit.
fn is_plain_decimal(s: &str) -> bool {
    let mut seen_dot = false;
    let mut seen_digit = false;
    for b in s.bytes() {
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

#[cfg(test)]
#[path = "price_test.rs"]
mod tests;
