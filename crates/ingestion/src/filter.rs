//! Status pre-filter over raw rows.
//!
//! Runs before record construction so rows for listed or withdrawn issues
//! never reach the extractors.

use ipo_core::config::FilterConfig;
use ipo_core::RawRow;
use tracing::debug;

/// Keeps rows whose status cell mentions a configured keyword or code.
#[derive(Debug, Clone)]
pub struct RowFilter {
    enabled: bool,
    /// Lowercased keywords, matched as substrings.
    keywords: Vec<String>,
    /// Codes, matched as whole tokens.
    codes: Vec<String>,
}

impl RowFilter {
    /// Create a new row filter.
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            enabled: config.enabled,
            keywords: config
                .keywords
                .iter()
                .filter(|k| !k.is_empty())
                .map(|k| k.to_lowercase())
                .collect(),
            codes: config.codes.iter().filter(|c| !c.is_empty()).cloned().collect(),
        }
    }

    /// Filter that keeps every row.
    pub fn pass_all() -> Self {
        Self {
            enabled: false,
            keywords: Vec::new(),
            codes: Vec::new(),
        }
    }

    /// Whether a status cell is relevant.
    ///
    /// Keywords match case-insensitively anywhere in the cell. Codes must
    /// appear as a token of their own, so "O" matches `"O"` or `"GMP:₹5 O"`
    /// but not `"Open"` or `"Closed"`.
    pub fn matches(&self, status_cell: &str) -> bool {
        if !self.enabled {
            return true;
        }
        let lower = status_cell.to_lowercase();
        if self.keywords.iter().any(|k| lower.contains(k.as_str())) {
            return true;
        }
        status_cell
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| self.codes.iter().any(|code| code == token))
    }

    /// Keep the rows whose status cell (looked up with `status_cell`) matches.
    ///
    /// Rows without a status cell are dropped while the filter is enabled.
    pub fn apply<F>(&self, rows: Vec<RawRow>, status_cell: F) -> Vec<RawRow>
    where
        F: Fn(&RawRow) -> Option<&str>,
    {
        if !self.enabled {
            return rows;
        }
        let before = rows.len();
        let kept: Vec<RawRow> = rows
            .into_iter()
            .filter(|row| status_cell(row).is_some_and(|cell| self.matches(cell)))
            .collect();
        debug!(before, kept = kept.len(), "status pre-filter applied");
        kept
    }
}
