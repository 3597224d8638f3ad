//! Display-name extraction from packed IPO labels.

use ipo_core::config::NameDelimiter;

use crate::label::{Keyword, Label};

/// Exchange boilerplate that never belongs in a name.
const BOILERPLATE: &[&str] = &["BSE SME", "NSE SME"];

/// Standalone trailing tokens dropped from a name.
const TRAILING_TOKENS: &[&str] = &["SME", "IPO"];

/// Extract a clean display name from a packed label.
///
/// Truncates at the first delimiter keyword, drops exchange boilerplate and
/// trailing `SME`/`IPO` tokens, and collapses whitespace. Cleanup repeats
/// until nothing changes, so the result is a fixed point and re-extracting
/// it returns it unchanged. A label that cleans down to nothing yields the
/// trimmed label instead, so only blank input gives a blank name.
pub fn extract_name(label: &str, delimiter: NameDelimiter) -> String {
    let original = collapse_ws(label);
    let mut current = original.clone();
    loop {
        let next = clean_once(&current, delimiter);
        if next == current {
            break;
        }
        current = next;
    }
    if current.is_empty() {
        original
    } else {
        current
    }
}

fn clean_once(text: &str, delimiter: NameDelimiter) -> String {
    let keyword = match delimiter {
        NameDelimiter::Ipo => Keyword::Ipo,
        NameDelimiter::Gmp => Keyword::Gmp,
    };
    let mut name = Label::parse(text).head(keyword).to_string();
    for boilerplate in BOILERPLATE {
        name = name.replace(boilerplate, " ");
    }
    let mut tokens: Vec<&str> = name.split_whitespace().collect();
    if let Some(last) = tokens.last() {
        if TRAILING_TOKENS.contains(last) {
            tokens.pop();
        }
    }
    tokens.join(" ")
}

/// Collapse runs of whitespace to one space and trim.
pub fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
