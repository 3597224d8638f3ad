//! Per-refresh pipeline.
//!
//! Combines the row filters, record builder and bucketing into one call
//! made once per refresh. Nothing is carried between refreshes.

use chrono::NaiveDate;
use ipo_core::{Config, IpoRecord, RawRow};
use ipo_ingestion::{CloseDateFilter, RecordBuilder, RowFilter};
use tracing::{debug, info};

use crate::buckets::Board;
use crate::cards::{subscription_cards, SubscriptionCard};

/// Row-to-board pipeline for one fetch source.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Status pre-filter.
    filter: RowFilter,
    /// Close-date filter, when enabled.
    close_dates: Option<CloseDateFilter>,
    /// Record builder.
    builder: RecordBuilder,
}

impl Pipeline {
    /// Create a pipeline from configuration, dated at the configured offset.
    pub fn new(config: &Config) -> Self {
        let close_dates = config.close_date.enabled.then(|| {
            CloseDateFilter::for_today(&config.close_date, config.source.close_date_columns.clone())
        });
        Self::assemble(config, close_dates)
    }

    /// Create a pipeline with an explicit reference date for the close-date filter.
    pub fn with_today(config: &Config, today: NaiveDate) -> Self {
        let close_dates = config.close_date.enabled.then(|| {
            CloseDateFilter::new(
                &config.close_date,
                config.source.close_date_columns.clone(),
                today,
            )
        });
        Self::assemble(config, close_dates)
    }

    fn assemble(config: &Config, close_dates: Option<CloseDateFilter>) -> Self {
        Self {
            filter: RowFilter::new(&config.filter),
            close_dates,
            builder: RecordBuilder::new(config.source.clone()),
        }
    }

    pub fn builder(&self) -> &RecordBuilder {
        &self.builder
    }

    /// Filter rows and build records, in input order.
    pub fn records(&self, rows: Vec<RawRow>) -> Vec<IpoRecord> {
        let fetched = rows.len();
        let rows = self.filter.apply(rows, |row| self.builder.status_cell(row));
        let rows = match &self.close_dates {
            Some(close_dates) => close_dates.apply(rows),
            None => rows,
        };

        let stats = self.builder.classification_stats(&rows);
        debug!(
            fetched,
            relevant = rows.len(),
            code_shaped = stats.code_shaped,
            passed_through = stats.passed_through,
            unresolved_frac = stats.unresolved_frac(),
            "rows classified"
        );

        self.builder.build_all(&rows)
    }

    /// Build the dashboard board for one refresh.
    pub fn refresh(&self, rows: Vec<RawRow>) -> Board {
        let fetched = rows.len();
        let records = self.records(rows);
        let built = records.len();
        let board = Board::partition(records);
        info!(
            fetched,
            built,
            upcoming = board.upcoming.len(),
            open = board.open.len(),
            closing_today = board.closing_today.len(),
            "refresh complete"
        );
        board
    }

    /// Subscription cards for the live issues of one refresh.
    pub fn subscription_cards(&self, rows: Vec<RawRow>) -> Vec<SubscriptionCard> {
        subscription_cards(&self.records(rows))
    }
}

/// One-shot refresh: build a pipeline from `config` and run it over `rows`.
pub fn refresh(config: &Config, rows: Vec<RawRow>) -> Board {
    Pipeline::new(config).refresh(rows)
}
