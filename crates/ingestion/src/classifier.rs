//! Status inference for scraped rows.
//!
//! The upstream report has written the status two ways over time: as a
//! sentence inside the IPO label ("Closing Today | Sub:3.1x") and as a short
//! code in its own cell ("CT"). Some layouts have no status column at all and
//! append the code to the label instead ("Acme IPO GMP:₹35(7.2%) CT"). The cell
//! is resolved into a [`RawStatus`] once at ingestion, and only then classified.

use ipo_core::config::StatusShape;
use ipo_core::Status;

/// Status code table used by the newer report layout.
const STATUS_CODES: &[(&str, Status)] = &[
    ("O", Status::Open),
    ("C", Status::Closed),
    ("CT", Status::ClosingToday),
    ("U", Status::Upcoming),
];

/// Free-text phrases in priority order. "Closing Today" must outrank "Open"
/// since a closing issue is still open for bids.
const STATUS_PHRASES: &[(&str, Status)] = &[
    ("Upcoming", Status::Upcoming),
    ("Closing Today", Status::ClosingToday),
    ("Open", Status::Open),
];

/// A status cell with its representation resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawStatus {
    /// Sentence or composite label.
    Text(String),
    /// Short status code.
    Code(String),
}

impl RawStatus {
    /// Decide the shape from the cell itself: one or two ASCII letters is a code.
    pub fn detect(cell: &str) -> Self {
        let trimmed = cell.trim();
        if looks_like_code(trimmed) {
            RawStatus::Code(trimmed.to_string())
        } else {
            RawStatus::Text(cell.to_string())
        }
    }

    /// Resolve with a caller-supplied shape. `Auto` defers to [`RawStatus::detect`].
    pub fn with_shape(cell: &str, shape: StatusShape) -> Self {
        match shape {
            StatusShape::Auto => Self::detect(cell),
            StatusShape::Text => RawStatus::Text(cell.to_string()),
            StatusShape::Code => RawStatus::Code(cell.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RawStatus::Text(s) | RawStatus::Code(s) => s,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, RawStatus::Code(_))
    }

    /// Classify the resolved cell.
    pub fn classify(&self) -> Classification {
        match self {
            RawStatus::Text(text) => {
                let status = match classify_text(text) {
                    Status::Unknown => trailing_code(text).unwrap_or(Status::Unknown),
                    status => status,
                };
                Classification::Known(status)
            }
            RawStatus::Code(code) => classify_code(code),
        }
    }
}

fn looks_like_code(s: &str) -> bool {
    (1..=2).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphabetic())
}

/// Outcome of status classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Mapped onto a lifecycle state.
    Known(Status),
    /// Unrecognized code, kept as written.
    PassThrough(String),
}

impl Classification {
    /// Lifecycle state; pass-through codes count as `Unknown`.
    pub fn status(&self) -> Status {
        match self {
            Classification::Known(s) => *s,
            Classification::PassThrough(_) => Status::Unknown,
        }
    }

    /// Label for display: the status name, or the literal code.
    pub fn label(&self) -> &str {
        match self {
            Classification::Known(s) => s.as_str(),
            Classification::PassThrough(code) => code,
        }
    }
}

impl PartialEq<Status> for Classification {
    fn eq(&self, other: &Status) -> bool {
        matches!(self, Classification::Known(s) if s == other)
    }
}

impl PartialEq<&str> for Classification {
    fn eq(&self, other: &&str) -> bool {
        matches!(self, Classification::PassThrough(code) if code == other)
    }
}

/// Classify a free-text label.
pub fn classify_text(text: &str) -> Status {
    STATUS_PHRASES
        .iter()
        .find(|(phrase, _)| text.contains(phrase))
        .map(|(_, status)| *status)
        .unwrap_or(Status::Unknown)
}

/// Status of a known code written as the last token of a label.
///
/// Only consulted once the phrase search has failed.
fn trailing_code(text: &str) -> Option<Status> {
    let last = text
        .split(|c: char| !c.is_alphanumeric())
        .rfind(|token| !token.is_empty())?;
    STATUS_CODES
        .iter()
        .find(|(code, _)| *code == last)
        .map(|(_, status)| *status)
}

/// Classify a status code. Unknown codes pass through unchanged.
pub fn classify_code(code: &str) -> Classification {
    let code = code.trim();
    STATUS_CODES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, status)| Classification::Known(*status))
        .unwrap_or_else(|| Classification::PassThrough(code.to_string()))
}

/// Classify a cell without knowing its shape.
pub fn classify(cell: &str) -> Classification {
    RawStatus::detect(cell).classify()
}

/// Status classifier bound to a configured cell shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusClassifier {
    shape: StatusShape,
}

impl StatusClassifier {
    /// Create a new status classifier.
    pub fn new(shape: StatusShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> StatusShape {
        self.shape
    }

    /// Resolve a cell into its tagged shape.
    pub fn resolve(&self, cell: &str) -> RawStatus {
        RawStatus::with_shape(cell, self.shape)
    }

    /// Classify a single cell.
    pub fn classify(&self, cell: &str) -> Classification {
        self.resolve(cell).classify()
    }
}

/// Statistics about a batch of classifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationStats {
    /// Total cells classified.
    pub total: u64,
    /// Cells read as codes.
    pub code_shaped: u64,
    pub upcoming: u64,
    pub open: u64,
    pub closing_today: u64,
    pub closed: u64,
    pub unknown: u64,
    /// Unrecognized codes.
    pub passed_through: u64,
}

impl ClassificationStats {
    /// Count one classification.
    pub fn record(&mut self, raw: &RawStatus, result: &Classification) {
        self.total += 1;
        if raw.is_code() {
            self.code_shaped += 1;
        }
        match result {
            Classification::PassThrough(_) => self.passed_through += 1,
            Classification::Known(Status::Upcoming) => self.upcoming += 1,
            Classification::Known(Status::Open) => self.open += 1,
            Classification::Known(Status::ClosingToday) => self.closing_today += 1,
            Classification::Known(Status::Closed) => self.closed += 1,
            Classification::Known(Status::Unknown) => self.unknown += 1,
        }
    }

    /// Fraction of cells that did not map to a usable state.
    pub fn unresolved_frac(&self) -> f64 {
        if self.total > 0 {
            (self.unknown + self.passed_through) as f64 / self.total as f64
        } else {
            0.0
        }
    }

    /// Reset statistics.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
