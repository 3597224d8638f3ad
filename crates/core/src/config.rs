//! Configuration structures for the IPO tracker.
//!
//! The upstream site has two report layouts (the GMP report and the live
//! subscription report). They differ in column labels, in how the status is
//! written and in which keyword ends the IPO name, so each gets a preset.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Main configuration for one fetch source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Column layout and label parsing.
    pub source: SourceConfig,
    /// Status pre-filter applied before record construction.
    pub filter: FilterConfig,
    /// Close-date filter.
    pub close_date: CloseDateConfig,
}

impl Config {
    /// Preset for the live GMP report.
    pub fn gmp_report() -> Self {
        Self::default()
    }

    /// Preset for the live subscription report.
    pub fn subscription_report() -> Self {
        Self {
            source: SourceConfig {
                name_delimiter: NameDelimiter::Gmp,
                status_shape: StatusShape::Auto,
                status_columns: vec!["Status".to_string(), "IPO".to_string()],
                ..SourceConfig::default()
            },
            filter: FilterConfig {
                enabled: true,
                keywords: vec!["Open".to_string(), "Closing Today".to_string()],
                codes: vec!["O".to_string(), "CT".to_string()],
            },
            close_date: CloseDateConfig {
                enabled: true,
                ..CloseDateConfig::default()
            },
        }
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that would make every row unreadable.
    pub fn validate(&self) -> Result<()> {
        if self.source.name_column.trim().is_empty() {
            return Err(Error::config("source.name_column must not be empty"));
        }
        if self.source.status_columns.is_empty() {
            return Err(Error::config("source.status_columns must list at least one column"));
        }
        // Real offsets stay within +/-14h.
        if self.close_date.utc_offset_minutes.abs() > 14 * 60 {
            return Err(Error::config(format!(
                "close_date.utc_offset_minutes out of range: {}",
                self.close_date.utc_offset_minutes
            )));
        }
        Ok(())
    }
}

/// Keyword that ends the IPO name inside a composite label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameDelimiter {
    /// "Acme Ltd IPO ..." (GMP report).
    #[default]
    Ipo,
    /// "Acme Ltd SME IPO GMP:..." (subscription report).
    Gmp,
}

impl NameDelimiter {
    pub fn token(self) -> &'static str {
        match self {
            NameDelimiter::Ipo => "IPO",
            NameDelimiter::Gmp => "GMP",
        }
    }
}

/// How the status cell is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusShape {
    /// Decide per cell from its structure.
    #[default]
    Auto,
    /// Full sentence such as "Open | Sub:2.5x".
    Text,
    /// Short code such as "CT".
    Code,
}

/// Column layout of a fetch source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Keyword that ends the name.
    pub name_delimiter: NameDelimiter,
    /// Status representation.
    pub status_shape: StatusShape,
    /// Column holding the composite name label.
    pub name_column: String,
    /// Columns holding the status, first present wins.
    pub status_columns: Vec<String>,
    /// Issue price columns.
    pub price_columns: Vec<String>,
    /// Issue size columns.
    pub issue_size_columns: Vec<String>,
    /// Estimated listing date columns.
    pub listing_date_columns: Vec<String>,
    /// Subscription close date columns.
    pub close_date_columns: Vec<String>,
    /// Price/earnings columns.
    pub pe_columns: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            name_delimiter: NameDelimiter::Ipo,
            status_shape: StatusShape::Text,
            name_column: "IPO".to_string(),
            status_columns: vec!["IPO".to_string()],
            price_columns: vec!["Price".to_string(), "IPO Price".to_string()],
            issue_size_columns: vec!["IPO Size".to_string(), "Size".to_string()],
            listing_date_columns: vec!["Est Listing".to_string(), "Listing".to_string()],
            close_date_columns: vec!["Close Date".to_string(), "Close".to_string()],
            pe_columns: vec!["P/E".to_string()],
        }
    }
}

/// Status pre-filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Whether rows are filtered at all.
    pub enabled: bool,
    /// Case-insensitive substrings.
    pub keywords: Vec<String>,
    /// Exact, case-sensitive status codes.
    pub codes: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            keywords: vec![
                "Open".to_string(),
                "Upcoming".to_string(),
                "Closing Today".to_string(),
            ],
            codes: Vec::new(),
        }
    }
}

/// Close-date filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloseDateConfig {
    /// Whether rows closing before today are dropped.
    pub enabled: bool,
    /// Offset of the exchange's local time from UTC, in minutes (IST = 330).
    pub utc_offset_minutes: i32,
    /// `chrono` format of the date once ordinal suffixes are removed.
    pub format: String,
}

impl Default for CloseDateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            utc_offset_minutes: 330,
            format: "%d %b %Y".to_string(),
        }
    }
}
