//! Core data types for the IPO tracker.

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Sentinel shown when no subscription multiple was found.
pub const SUBSCRIPTION_NOT_AVAILABLE: &str = "N.A.";

/// Sentinel shown when a GMP half (or P/E) was not found.
pub const NOT_AVAILABLE: &str = "N/A";

/// Default per-category multiple when the column is absent.
pub const DEFAULT_MULTIPLE: &str = "0.00x";

/// One row of the externally fetched table, before any interpretation.
///
/// Column order is kept as fetched. Labels are not guaranteed stable across
/// fetch sources, so lookups go through [`RawRow::get_any`] with fallbacks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from `(label, cell)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Append a cell. A repeated label shadows nothing; the first one wins on lookup.
    pub fn push(&mut self, label: impl Into<String>, cell: impl Into<String>) {
        self.cells.push((label.into(), cell.into()));
    }

    /// Cell content for an exact column label.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == label)
            .map(|(_, v)| v.as_str())
    }

    /// Cell content for the first label present.
    pub fn get_any(&self, labels: &[String]) -> Option<&str> {
        labels.iter().find_map(|label| self.get(label))
    }

    /// Iterate `(label, cell)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Column labels in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Small and medium enterprise platform.
    #[serde(rename = "SME")]
    Sme,
    /// Main board listing.
    Mainboard,
}

impl Category {
    /// `Sme` iff the label contains "SME".
    #[inline]
    pub fn from_label(label: &str) -> Self {
        if label.contains("SME") {
            Category::Sme
        } else {
            Category::Mainboard
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Sme => "SME",
            Category::Mainboard => "Mainboard",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of an issue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Upcoming,
    Open,
    ClosingToday,
    Closed,
    #[default]
    Unknown,
}

impl Status {
    /// Statuses that have a dashboard section.
    pub const BUCKETED: [Status; 3] = [Status::Upcoming, Status::Open, Status::ClosingToday];

    /// Human-readable label.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Upcoming => "Upcoming",
            Status::Open => "Open",
            Status::ClosingToday => "Closing Today",
            Status::Closed => "Closed",
            Status::Unknown => "Unknown",
        }
    }

    /// Whether records in this state are shown in a bucket.
    #[inline]
    pub fn is_bucketed(self) -> bool {
        Self::BUCKETED.contains(&self)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue price: a number when the cell parses as one, else the raw text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceValue {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl PriceValue {
    /// Numeric value, if any.
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PriceValue::Number(n) => Some(n.into_inner()),
            PriceValue::Text(_) => None,
        }
    }
}

impl Default for PriceValue {
    fn default() -> Self {
        PriceValue::Text(String::new())
    }
}

impl fmt::Display for PriceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriceValue::Number(n) => write!(f, "{}", n.into_inner()),
            PriceValue::Text(s) => f.write_str(s),
        }
    }
}

/// Overall subscription ratio such as "2.5x".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SubscriptionMultiple {
    Times(String),
    #[default]
    NotAvailable,
}

impl SubscriptionMultiple {
    pub fn as_str(&self) -> &str {
        match self {
            SubscriptionMultiple::Times(s) => s,
            SubscriptionMultiple::NotAvailable => SUBSCRIPTION_NOT_AVAILABLE,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, SubscriptionMultiple::Times(_))
    }
}

impl fmt::Display for SubscriptionMultiple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<SubscriptionMultiple> for String {
    fn from(v: SubscriptionMultiple) -> Self {
        v.as_str().to_string()
    }
}

impl From<String> for SubscriptionMultiple {
    fn from(s: String) -> Self {
        if s == SUBSCRIPTION_NOT_AVAILABLE {
            SubscriptionMultiple::NotAvailable
        } else {
            SubscriptionMultiple::Times(s)
        }
    }
}

/// Grey market premium amount, in rupees.
///
/// The scraped text is kept next to the parsed number so `"35.50"` displays
/// as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum GmpValue {
    Amount { value: OrderedFloat<f64>, text: String },
    #[default]
    NotAvailable,
}

impl GmpValue {
    /// Parse a scraped amount. `None` unless the trimmed text is a finite number.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(GmpValue::Amount {
            value: OrderedFloat(value),
            text: text.to_string(),
        })
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            GmpValue::Amount { value, .. } => Some(value.into_inner()),
            GmpValue::NotAvailable => None,
        }
    }
}

impl fmt::Display for GmpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GmpValue::Amount { text, .. } => f.write_str(text),
            GmpValue::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

impl From<GmpValue> for String {
    fn from(v: GmpValue) -> Self {
        v.to_string()
    }
}

impl From<String> for GmpValue {
    fn from(s: String) -> Self {
        GmpValue::parse(&s).unwrap_or(GmpValue::NotAvailable)
    }
}

/// Grey market premium as a percentage of issue price, e.g. "7.2%".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum GmpPercentage {
    Percent(String),
    #[default]
    NotAvailable,
}

impl GmpPercentage {
    pub fn as_str(&self) -> &str {
        match self {
            GmpPercentage::Percent(s) => s,
            GmpPercentage::NotAvailable => NOT_AVAILABLE,
        }
    }
}

impl fmt::Display for GmpPercentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<GmpPercentage> for String {
    fn from(v: GmpPercentage) -> Self {
        v.as_str().to_string()
    }
}

impl From<String> for GmpPercentage {
    fn from(s: String) -> Self {
        if s == NOT_AVAILABLE {
            GmpPercentage::NotAvailable
        } else {
            GmpPercentage::Percent(s)
        }
    }
}

/// Both halves of a grey market premium annotation. Each half is independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gmp {
    pub value: GmpValue,
    pub percentage: GmpPercentage,
}

/// Investor category in the subscription table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InvestorCategory {
    /// Qualified institutional buyers.
    Qib,
    /// Small non-institutional investors.
    Shni,
    /// Big non-institutional investors.
    Bhni,
    /// Non-institutional investors.
    Nii,
    /// Retail individual investors.
    Rii,
    /// Overall.
    Total,
}

impl InvestorCategory {
    /// Display order of the subscription metrics.
    pub const ALL: [InvestorCategory; 6] = [
        InvestorCategory::Qib,
        InvestorCategory::Shni,
        InvestorCategory::Bhni,
        InvestorCategory::Nii,
        InvestorCategory::Rii,
        InvestorCategory::Total,
    ];

    /// Column label used by the subscription table.
    pub fn code(self) -> &'static str {
        match self {
            InvestorCategory::Qib => "QIB",
            InvestorCategory::Shni => "SHNI",
            InvestorCategory::Bhni => "BHNI",
            InvestorCategory::Nii => "NII",
            InvestorCategory::Rii => "RII",
            InvestorCategory::Total => "Total",
        }
    }

}

/// Subscription multiple for every investor category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionBreakdown {
    pub qib: String,
    pub shni: String,
    pub bhni: String,
    pub nii: String,
    pub rii: String,
    pub total: String,
}

impl Default for SubscriptionBreakdown {
    fn default() -> Self {
        Self {
            qib: DEFAULT_MULTIPLE.to_string(),
            shni: DEFAULT_MULTIPLE.to_string(),
            bhni: DEFAULT_MULTIPLE.to_string(),
            nii: DEFAULT_MULTIPLE.to_string(),
            rii: DEFAULT_MULTIPLE.to_string(),
            total: DEFAULT_MULTIPLE.to_string(),
        }
    }
}

impl SubscriptionBreakdown {
    pub fn get(&self, category: InvestorCategory) -> &str {
        match category {
            InvestorCategory::Qib => &self.qib,
            InvestorCategory::Shni => &self.shni,
            InvestorCategory::Bhni => &self.bhni,
            InvestorCategory::Nii => &self.nii,
            InvestorCategory::Rii => &self.rii,
            InvestorCategory::Total => &self.total,
        }
    }

    pub fn set(&mut self, category: InvestorCategory, multiple: impl Into<String>) {
        let slot = match category {
            InvestorCategory::Qib => &mut self.qib,
            InvestorCategory::Shni => &mut self.shni,
            InvestorCategory::Bhni => &mut self.bhni,
            InvestorCategory::Nii => &mut self.nii,
            InvestorCategory::Rii => &mut self.rii,
            InvestorCategory::Total => &mut self.total,
        };
        *slot = multiple.into();
    }

    /// `(category, multiple)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (InvestorCategory, &str)> {
        InvestorCategory::ALL.into_iter().map(move |c| (c, self.get(c)))
    }
}

/// A fully-typed IPO record, rebuilt from scratch on every refresh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpoRecord {
    /// Display name with type/status/subscription annotations removed.
    pub name: String,
    pub category: Category,
    pub status: Status,
    /// Label the status was resolved from; the literal code for unrecognized codes.
    pub raw_status: String,
    pub price: PriceValue,
    pub issue_size: String,
    pub estimated_listing_date: String,
    pub close_date: String,
    pub pe_ratio: String,
    pub subscription_multiple: SubscriptionMultiple,
    pub gmp_value: GmpValue,
    pub gmp_percentage: GmpPercentage,
    pub subscription_by_category: SubscriptionBreakdown,
}
