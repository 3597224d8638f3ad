//! Numeric coercion of scraped cells.
//!
//! Cells come with currency symbols, thousands separators and the odd
//! mis-decoded rupee sign. Anything that still isn't a plain decimal after
//! cleanup is handed back untouched.

use ipo_core::PriceValue;
use ordered_float::OrderedFloat;

/// Currency signs stripped wherever they appear. Longest first.
const CURRENCY_SIGNS: &[&str] = &["â\u{82}¹", "â¹", "₹", "$"];

/// Currency words, stripped only at either end of the cell. Longest first.
const CURRENCY_WORDS: &[&str] = &["Rs.", "INR", "Rs"];

/// Remove currency markers, thousands separators and surrounding whitespace.
pub fn strip_currency(text: &str) -> String {
    let mut out = text.to_string();
    for sign in CURRENCY_SIGNS {
        if out.contains(sign) {
            out = out.replace(sign, "");
        }
    }

    let mut cleaned = out.trim();
    if let Some(rest) = CURRENCY_WORDS.iter().find_map(|w| cleaned.strip_prefix(*w)) {
        cleaned = rest.trim_start();
    }
    if let Some(rest) = CURRENCY_WORDS.iter().find_map(|w| cleaned.strip_suffix(*w)) {
        cleaned = rest.trim_end();
    }
    cleaned.replace(',', "")
}

/// Parse a plain decimal (`"1234"`, `"-12.5"`, `"1,234.00"`, `"₹35"`).
///
/// Returns `None` for anything else, including `"inf"` and `"NaN"`, which
/// `f64::from_str` would otherwise accept.
pub fn parse_decimal(text: &str) -> Option<f64> {
    let cleaned = strip_currency(text);
    let digits = cleaned
        .strip_prefix(|c: char| c == '-' || c == '+')
        .unwrap_or(&cleaned);
    if digits.is_empty()
        || !digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        || !digits.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Coerce an issue price cell. Falls back to the original text.
pub fn normalize_price(text: &str) -> PriceValue {
    match parse_decimal(text) {
        Some(v) => PriceValue::Number(OrderedFloat(v)),
        None => PriceValue::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_strip_currency() {
        assert_eq!(strip_currency(" ₹1,234.50 "), "1234.50");
        assert_eq!(strip_currency("Rs. 95"), "95");
        assert_eq!(strip_currency("â¹35"), "35");
        assert_eq!(strip_currency("INR 99.9"), "99.9");
        assert_eq!(strip_currency("95 Rs."), "95");
    }

    #[test]
    fn test_currency_words_only_at_the_ends() {
        assert_eq!(strip_currency("Rs 1,200"), "1200");
        assert_eq!(strip_currency("Cars 95"), "Cars 95");
        assert_eq!(strip_currency("12 Rs 5"), "12 Rs 5");
        assert_eq!(parse_decimal("12Rs5"), None);
    }

    #[test]
    fn test_parse_decimal_accepts_plain_numbers() {
        assert_relative_eq!(parse_decimal("1234").unwrap(), 1234.0);
        assert_relative_eq!(parse_decimal("-12.5").unwrap(), -12.5);
        assert_relative_eq!(parse_decimal("₹1,234.00").unwrap(), 1234.0);
        assert_relative_eq!(parse_decimal("INR 99.9").unwrap(), 99.9);
    }

    #[test]
    fn test_parse_decimal_rejects_text() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("TBA"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("95 to 100"), None);
        assert_eq!(parse_decimal("."), None);
        assert_eq!(parse_decimal("1.2.3"), None);
    }

    #[test]
    fn test_normalize_price_falls_back_to_original() {
        assert_eq!(
            normalize_price("₹ 1,250"),
            PriceValue::Number(OrderedFloat(1250.0))
        );
        assert_eq!(
            normalize_price("₹95 - ₹100"),
            PriceValue::Text("₹95 - ₹100".to_string())
        );
        assert_eq!(normalize_price(""), PriceValue::Text(String::new()));
    }
}
