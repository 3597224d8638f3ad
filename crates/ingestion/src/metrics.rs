//! Subscription multiple and grey market premium extraction.
//!
//! Both annotations ride along inside packed labels:
//! `"Acme IPO Open Sub:2.5x"`, `"Acme SME IPO GMP:₹35(7.2%)"`.

use std::sync::LazyLock;

use ipo_core::{Error, Gmp, GmpPercentage, GmpValue, Result, SubscriptionMultiple};
use regex::Regex;

use crate::label::{Keyword, Label};

/// `<number>x` at the start of a `Sub:` segment.
static SUBSCRIPTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+\.?\d*x)").expect("Invalid regex"));

/// `:<currency><number>` at the start of a `GMP` segment. The currency is
/// whatever non-digit run precedes the number.
static GMP_VALUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:\s*[^\d\s(\-]*\s*(-?\d+(?:\.\d+)?)").expect("Invalid regex")
});

/// `:<currency><number>(<percentage>)`. The number may be a placeholder
/// such as `--`, but the parenthesis must follow it directly.
static GMP_PERCENTAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:\s*[^\d\s()]*\s*[\d.,]*\s*\(([^)]+)\)").expect("Invalid regex")
});

static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("Invalid regex"));

/// First capture of `regex` across the label segments that follow `keyword`.
fn capture_after<'t>(text: &'t str, keyword: Keyword, regex: &Regex) -> Option<&'t str> {
    Label::parse(text)
        .segments(keyword)
        .find_map(|segment| regex.captures(segment).and_then(|cap| cap.get(1)))
        .map(|m| m.as_str())
}

/// Overall subscription multiple, or `NotAvailable` ("N.A.").
pub fn extract_subscription(text: &str) -> SubscriptionMultiple {
    capture_after(text, Keyword::Sub, &SUBSCRIPTION_REGEX)
        .map(|m| SubscriptionMultiple::Times(m.to_string()))
        .unwrap_or(SubscriptionMultiple::NotAvailable)
}

/// Grey market premium amount and percentage.
///
/// The two halves are matched independently; either may be present without
/// the other. The amount keeps its scraped text.
pub fn extract_gmp(text: &str) -> Gmp {
    let value = capture_after(text, Keyword::Gmp, &GMP_VALUE_REGEX)
        .and_then(GmpValue::parse)
        .unwrap_or(GmpValue::NotAvailable);

    let percentage = capture_after(text, Keyword::Gmp, &GMP_PERCENTAGE_REGEX)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| GmpPercentage::Percent(s.to_string()))
        .unwrap_or(GmpPercentage::NotAvailable);

    Gmp { value, percentage }
}

/// Reformat a bare numeric status such as `"115 43.73"` as `"115(43.73%)"`.
///
/// One report revision writes the GMP as two loose numbers instead of the
/// `GMP:` annotation. The first two numeric substrings are used; fewer than
/// two is an [`Error::InsufficientMatch`], never a guess.
pub fn format_numeric_pair(text: &str) -> Result<String> {
    let numbers: Vec<&str> = NUMBER_REGEX.find_iter(text).map(|m| m.as_str()).collect();
    match numbers.as_slice() {
        [first, second, ..] => Ok(format!("{first}({second}%)")),
        _ => Err(Error::insufficient_match(2, numbers.len(), text)),
    }
}
