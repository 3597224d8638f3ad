//! Close-date filter for the subscription report.
//!
//! The subscription table lists issues whose bidding window has already
//! closed. Rows closing before "today" at the exchange's local time are
//! dropped. Dates look like `"16th Dec 2024"`.

use std::sync::LazyLock;

use chrono::{FixedOffset, NaiveDate, Utc};
use ipo_core::config::CloseDateConfig;
use ipo_core::RawRow;
use regex::Regex;
use tracing::{debug, warn};

static ORDINAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)(?:st|nd|rd|th)\b").expect("Invalid regex"));

/// Parse a close date, removing ordinal suffixes first.
pub fn parse_close_date(text: &str, format: &str) -> Option<NaiveDate> {
    let cleaned = ORDINAL_REGEX.replace_all(text.trim(), "$1");
    NaiveDate::parse_from_str(&cleaned, format).ok()
}

/// Today's date at a fixed UTC offset. An out-of-range offset falls back to UTC.
pub fn today_at_offset(utc_offset_minutes: i32) -> NaiveDate {
    match FixedOffset::east_opt(utc_offset_minutes * 60) {
        Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
        None => Utc::now().date_naive(),
    }
}

/// Drops rows that closed before a reference date.
#[derive(Debug, Clone)]
pub struct CloseDateFilter {
    format: String,
    columns: Vec<String>,
    today: NaiveDate,
}

impl CloseDateFilter {
    /// Create a filter with an explicit reference date.
    pub fn new(config: &CloseDateConfig, columns: Vec<String>, today: NaiveDate) -> Self {
        Self {
            format: config.format.clone(),
            columns,
            today,
        }
    }

    /// Create a filter for the current date at the configured offset.
    pub fn for_today(config: &CloseDateConfig, columns: Vec<String>) -> Self {
        Self::new(config, columns, today_at_offset(config.utc_offset_minutes))
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Whether the row closes today or later. Missing or unreadable dates do not.
    pub fn keeps(&self, row: &RawRow) -> bool {
        let Some(cell) = row.get_any(&self.columns) else {
            warn!("row has no close date column");
            return false;
        };
        match parse_close_date(cell, &self.format) {
            Some(date) => date >= self.today,
            None => {
                warn!(cell, "unparseable close date");
                false
            }
        }
    }

    /// Keep rows closing today or later, in input order.
    pub fn apply(&self, rows: Vec<RawRow>) -> Vec<RawRow> {
        let before = rows.len();
        let kept: Vec<RawRow> = rows.into_iter().filter(|row| self.keeps(row)).collect();
        debug!(before, kept = kept.len(), today = %self.today, "close-date filter applied");
        kept
    }
}
