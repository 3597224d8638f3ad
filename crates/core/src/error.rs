//! Error types for the IPO tracker.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the IPO tracker.
///
/// Almost everything in the ingestion path degrades to a sentinel instead of
/// failing. The variants here cover the few places that cannot.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error (invalid or missing data).
    #[error("Data error: {0}")]
    Data(String),

    /// A pattern that must match a fixed number of times matched fewer.
    #[error("Insufficient match: needed {needed} numeric values, found {found} in {text:?}")]
    InsufficientMatch {
        /// Number of matches the caller indexes.
        needed: usize,
        /// Number of matches actually present.
        found: usize,
        /// The text that was searched.
        text: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create a data error.
    pub fn data(msg: impl Into<String>) -> Self {
        Error::Data(msg.into())
    }

    /// Create an insufficient match error.
    pub fn insufficient_match(needed: usize, found: usize, text: impl Into<String>) -> Self {
        Error::InsufficientMatch {
            needed,
            found,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_match_message() {
        let err = Error::insufficient_match(2, 1, "43.73");
        assert!(matches!(err, Error::InsufficientMatch { needed: 2, found: 1, .. }));
        assert_eq!(
            err.to_string(),
            "Insufficient match: needed 2 numeric values, found 1 in \"43.73\""
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parse.unwrap_err().into();
        assert!(matches!(err, Error::Json(_)));
    }
}
