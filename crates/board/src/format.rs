//! Display formatting for dashboard values.

use ipo_core::{GmpPercentage, GmpValue, PriceValue, NOT_AVAILABLE};

/// Rupee sign prefixed to displayed amounts.
pub const RUPEE: &str = "₹";

/// `"₹1,234.50"` for numeric prices; text prices are shown as scraped.
pub fn format_price(price: &PriceValue) -> String {
    match price {
        PriceValue::Number(n) => format!("{RUPEE}{}", group_thousands(n.into_inner(), 2)),
        PriceValue::Text(s) => s.clone(),
    }
}

/// `"₹35 (7.2%)"`. An absent amount shows as `"N/A"`.
pub fn format_gmp(value: &GmpValue, percentage: &GmpPercentage) -> String {
    match value {
        GmpValue::Amount { .. } => format!("{RUPEE}{value} ({percentage})"),
        GmpValue::NotAvailable => NOT_AVAILABLE.to_string(),
    }
}

/// Fixed-point with comma thousands separators, e.g. `1234567.5` -> `"1,234,567.50"`.
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    if value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        grouped.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0, 2), "0.00");
        assert_eq!(group_thousands(999.0, 2), "999.00");
        assert_eq!(group_thousands(1234.5, 2), "1,234.50");
        assert_eq!(group_thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(group_thousands(-1000.0, 0), "-1,000");
        assert_eq!(group_thousands(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(&PriceValue::Number(OrderedFloat(1234.5))), "₹1,234.50");
        assert_eq!(format_price(&PriceValue::Number(OrderedFloat(95.0))), "₹95.00");
        assert_eq!(format_price(&PriceValue::Text("₹95 - ₹100".into())), "₹95 - ₹100");
    }

    #[test]
    fn test_format_gmp() {
        let amount = GmpValue::parse("35").unwrap();
        let line = format_gmp(&amount, &GmpPercentage::Percent("7.2%".into()));
        assert_eq!(line, "₹35 (7.2%)");

        let partial = format_gmp(&amount, &GmpPercentage::NotAvailable);
        assert_eq!(partial, "₹35 (N/A)");

        let decimals = format_gmp(&GmpValue::parse("35.50").unwrap(), &GmpPercentage::NotAvailable);
        assert_eq!(decimals, "₹35.50 (N/A)");

        assert_eq!(format_gmp(&GmpValue::NotAvailable, &GmpPercentage::NotAvailable), "N/A");
    }
}
