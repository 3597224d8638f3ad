//! Data ingestion and normalization for the IPO tracker.
//!
//! This crate handles:
//! - Table and JSON adapters (fetched table -> raw rows)
//! - Status pre-filtering and close-date filtering
//! - Field normalization (prices)
//! - Status classification (free text or short code)
//! - Name, subscription and GMP extraction from packed labels
//! - Record building

pub mod builder;
pub mod classifier;
pub mod close_date;
pub mod filter;
pub mod label;
pub mod metrics;
pub mod name;
pub mod normalizer;
pub mod table;

pub use builder::RecordBuilder;
pub use classifier::{classify, Classification, ClassificationStats, RawStatus, StatusClassifier};
pub use close_date::CloseDateFilter;
pub use filter::RowFilter;
pub use metrics::{extract_gmp, extract_subscription, format_numeric_pair};
pub use name::extract_name;
pub use normalizer::normalize_price;
