//! Dashboard assembly for the IPO tracker.
//!
//! This crate handles:
//! - Bucketing records into upcoming / open / closing-today sections
//! - Display formatting of prices and GMP
//! - Subscription metric cards
//! - The stateless per-refresh pipeline

pub mod buckets;
pub mod cards;
pub mod format;
pub mod pipeline;

pub use buckets::Board;
pub use cards::{subscription_cards, Metric, SubscriptionCard};
pub use format::{format_gmp, format_price};
pub use pipeline::{refresh, Pipeline};
