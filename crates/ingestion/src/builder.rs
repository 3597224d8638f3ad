//! Record construction from raw rows.
//!
//! Combines the normalizer, status classifier, name extractor and metric
//! extractors into one typed [`IpoRecord`] per row. Pure: no I/O, no state
//! carried between calls.

use ipo_core::config::SourceConfig;
use ipo_core::{
    Category, GmpPercentage, GmpValue, InvestorCategory, IpoRecord, RawRow,
    SubscriptionBreakdown, SubscriptionMultiple, NOT_AVAILABLE,
};
use tracing::debug;

use crate::classifier::{ClassificationStats, StatusClassifier};
use crate::metrics::{extract_gmp, extract_subscription};
use crate::name::extract_name;
use crate::normalizer::normalize_price;

/// Builds [`IpoRecord`]s for one fetch-source layout.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    source: SourceConfig,
    classifier: StatusClassifier,
}

impl RecordBuilder {
    /// Create a new record builder.
    pub fn new(source: SourceConfig) -> Self {
        let classifier = StatusClassifier::new(source.status_shape);
        Self { source, classifier }
    }

    pub fn source(&self) -> &SourceConfig {
        &self.source
    }

    /// Status cell of a row: the first configured status column present.
    pub fn status_cell<'r>(&self, row: &'r RawRow) -> Option<&'r str> {
        row.get_any(&self.source.status_columns)
    }

    /// Build a record from its name cell, status cell and companion columns.
    ///
    /// Missing companion columns fall back to defaults; this never fails.
    pub fn build(&self, name_cell: &str, status_cell: &str, row: &RawRow) -> IpoRecord {
        let classification = self.classifier.classify(status_cell);

        let subscription_multiple = match extract_subscription(status_cell) {
            SubscriptionMultiple::NotAvailable => extract_subscription(name_cell),
            found => found,
        };

        let mut gmp = extract_gmp(name_cell);
        if gmp.value == GmpValue::NotAvailable || gmp.percentage == GmpPercentage::NotAvailable {
            let fallback = extract_gmp(status_cell);
            if gmp.value == GmpValue::NotAvailable {
                gmp.value = fallback.value;
            }
            if gmp.percentage == GmpPercentage::NotAvailable {
                gmp.percentage = fallback.percentage;
            }
        }

        let column = |labels: &[String]| row.get_any(labels).unwrap_or_default().trim().to_string();

        IpoRecord {
            name: extract_name(name_cell, self.source.name_delimiter),
            category: Category::from_label(name_cell),
            status: classification.status(),
            raw_status: classification.label().to_string(),
            price: normalize_price(row.get_any(&self.source.price_columns).unwrap_or_default()),
            issue_size: column(&self.source.issue_size_columns),
            estimated_listing_date: column(&self.source.listing_date_columns),
            close_date: column(&self.source.close_date_columns),
            pe_ratio: row
                .get_any(&self.source.pe_columns)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(NOT_AVAILABLE)
                .to_string(),
            subscription_multiple,
            gmp_value: gmp.value,
            gmp_percentage: gmp.percentage,
            subscription_by_category: breakdown(row),
        }
    }

    /// Build a record from a whole row. `None` when the name column is absent.
    pub fn build_row(&self, row: &RawRow) -> Option<IpoRecord> {
        let name_cell = row.get(&self.source.name_column)?;
        let status_cell = self.status_cell(row).unwrap_or_default();
        Some(self.build(name_cell, status_cell, row))
    }

    /// Build records for every row, in input order.
    pub fn build_all(&self, rows: &[RawRow]) -> Vec<IpoRecord> {
        let records: Vec<IpoRecord> = rows.iter().filter_map(|row| self.build_row(row)).collect();
        if records.len() < rows.len() {
            debug!(
                skipped = rows.len() - records.len(),
                column = %self.source.name_column,
                "rows without a name column skipped"
            );
        }
        records
    }

    /// Classification statistics for the status cells of a batch.
    pub fn classification_stats(&self, rows: &[RawRow]) -> ClassificationStats {
        let mut stats = ClassificationStats::default();
        for cell in rows.iter().filter_map(|row| self.status_cell(row)) {
            let raw = self.classifier.resolve(cell);
            let result = raw.classify();
            stats.record(&raw, &result);
        }
        stats
    }
}

/// Per-category multiples; absent or blank columns keep `"0.00x"`.
fn breakdown(row: &RawRow) -> SubscriptionBreakdown {
    let mut breakdown = SubscriptionBreakdown::default();
    for category in InvestorCategory::ALL {
        if let Some(value) = row.get(category.code()).map(str::trim).filter(|s| !s.is_empty()) {
            breakdown.set(category, value);
        }
    }
    breakdown
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipo_core::config::{Config, StatusShape};
    use ipo_core::{PriceValue, Status};
    use ordered_float::OrderedFloat;

    fn gmp_row(label: &str) -> RawRow {
        RawRow::from_pairs([
            ("IPO", label),
            ("Price", "₹1,250"),
            ("Est Listing", "20-Dec"),
            ("IPO Size", "₹450.00 Cr"),
            ("Open", "12-Dec"),
            ("Close", "16-Dec"),
        ])
    }

    #[test]
    fn test_gmp_report_row() {
        let builder = RecordBuilder::new(Config::gmp_report().source);
        let record = builder
            .build_row(&gmp_row("Acme Ltd BSE SME IPO Open Sub:2.5x"))
            .unwrap();

        assert_eq!(record.name, "Acme Ltd");
        assert_eq!(record.category, Category::Sme);
        assert_eq!(record.status, Status::Open);
        assert_eq!(record.raw_status, "Open");
        assert_eq!(record.price, PriceValue::Number(OrderedFloat(1250.0)));
        assert_eq!(record.issue_size, "₹450.00 Cr");
        assert_eq!(record.estimated_listing_date, "20-Dec");
        assert_eq!(record.close_date, "16-Dec");
        assert_eq!(record.subscription_multiple.to_string(), "2.5x");
        assert_eq!(record.gmp_value, GmpValue::NotAvailable);
        assert_eq!(record.pe_ratio, "N/A");
        assert_eq!(record.subscription_by_category, SubscriptionBreakdown::default());
    }

    #[test]
    fn test_missing_optional_columns_use_defaults() {
        let builder = RecordBuilder::new(Config::gmp_report().source);
        let row = RawRow::from_pairs([("IPO", "Mega Corp IPO Upcoming")]);
        let record = builder.build_row(&row).unwrap();

        assert_eq!(record.name, "Mega Corp");
        assert_eq!(record.category, Category::Mainboard);
        assert_eq!(record.status, Status::Upcoming);
        assert_eq!(record.price, PriceValue::Text(String::new()));
        assert_eq!(record.issue_size, "");
        assert_eq!(record.subscription_multiple, SubscriptionMultiple::NotAvailable);
        assert_eq!(record.gmp_percentage, GmpPercentage::NotAvailable);
    }

    #[test]
    fn test_subscription_report_row() {
        let builder = RecordBuilder::new(Config::subscription_report().source);
        let row = RawRow::from_pairs([
            ("IPO", "Acme Ltd SME IPO GMP:₹35(7.2%)"),
            ("Status", "CT"),
            ("IPO Price", "485"),
            ("IPO Size", "₹52.10 Cr"),
            ("Close Date", "16th Dec 2024"),
            ("QIB", "45.10x"),
            ("NII", "120.33x"),
            ("RII", ""),
            ("Total", "60.02x"),
            ("P/E", "21.4"),
        ]);
        let record = builder.build_row(&row).unwrap();

        assert_eq!(record.name, "Acme Ltd");
        assert_eq!(record.category, Category::Sme);
        assert_eq!(record.status, Status::ClosingToday);
        assert_eq!(record.gmp_value.to_string(), "35");
        assert_eq!(record.gmp_percentage.to_string(), "7.2%");
        assert_eq!(record.price, PriceValue::Number(OrderedFloat(485.0)));
        assert_eq!(record.close_date, "16th Dec 2024");
        assert_eq!(record.pe_ratio, "21.4");

        let b = &record.subscription_by_category;
        assert_eq!(b.get(InvestorCategory::Qib), "45.10x");
        assert_eq!(b.get(InvestorCategory::Shni), "0.00x");
        assert_eq!(b.get(InvestorCategory::Nii), "120.33x");
        assert_eq!(b.get(InvestorCategory::Rii), "0.00x");
        assert_eq!(b.get(InvestorCategory::Total), "60.02x");
    }

    #[test]
    fn test_unrecognized_code_keeps_literal() {
        let mut source = Config::subscription_report().source;
        source.status_shape = StatusShape::Code;
        let builder = RecordBuilder::new(source);
        let row = RawRow::from_pairs([("IPO", "Acme IPO GMP:₹1(1%)"), ("Status", "ZZ")]);
        let record = builder.build_row(&row).unwrap();

        assert_eq!(record.status, Status::Unknown);
        assert_eq!(record.raw_status, "ZZ");
    }

    #[test]
    fn test_explicit_cell_pair() {
        let builder = RecordBuilder::new(Config::gmp_report().source);
        let row = RawRow::from_pairs([("Price", "TBA")]);
        let record = builder.build("Acme IPO", "Closing Today | Sub:3.1x GMP:₹12", &row);

        assert_eq!(record.name, "Acme");
        assert_eq!(record.status, Status::ClosingToday);
        assert_eq!(record.subscription_multiple.to_string(), "3.1x");
        assert_eq!(record.gmp_value.to_string(), "12");
        assert_eq!(record.gmp_percentage.to_string(), "N/A");
        assert_eq!(record.price, PriceValue::Text("TBA".to_string()));
    }

    #[test]
    fn test_build_all_skips_rows_without_name() {
        let builder = RecordBuilder::new(Config::gmp_report().source);
        let rows = vec![
            gmp_row("First IPO Open"),
            RawRow::from_pairs([("Price", "100")]),
            gmp_row("Second IPO Upcoming"),
        ];
        let records = builder.build_all(&rows);
        let names: Vec<_> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);

        assert!(builder.build_all(&[]).is_empty());
    }

    #[test]
    fn test_classification_stats() {
        let builder = RecordBuilder::new(Config::subscription_report().source);
        let rows = vec![
            RawRow::from_pairs([("IPO", "A IPO"), ("Status", "O")]),
            RawRow::from_pairs([("IPO", "B IPO"), ("Status", "CT")]),
            RawRow::from_pairs([("IPO", "C IPO"), ("Status", "XX")]),
        ];
        let stats = builder.classification_stats(&rows);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.code_shaped, 3);
        assert_eq!(stats.passed_through, 1);
    }
}
