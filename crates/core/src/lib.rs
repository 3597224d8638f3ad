//! Core types and configuration for the IPO tracker.
//!
//! This crate provides shared types used across all other crates:
//! - Raw scraped rows and typed IPO records
//! - Configuration structures for the two fetch-source layouts
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
