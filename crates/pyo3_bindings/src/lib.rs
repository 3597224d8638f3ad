//! PyO3 bindings for the IPO tracker Rust components.
//!
//! Exposes the parsing core to the Python dashboard:
//! - Label parsing (status, name, subscription, GMP)
//! - Price normalization and display
//! - The per-refresh pipelines for the GMP and subscription reports

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use tracing_subscriber::EnvFilter;

use ipo_board::{
    format_price as rust_format_price, Board as RustBoard, Pipeline,
    SubscriptionCard as RustSubscriptionCard,
};
use ipo_core::{
    config::NameDelimiter, Config as RustConfig, Error as RustError, IpoRecord as RustIpoRecord,
    PriceValue, RawRow,
};
use ipo_ingestion::{classify, normalize_price as rust_normalize_price};

fn to_py_err(err: RustError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// A parsed IPO record. Absent values carry their display sentinels.
#[pyclass]
#[derive(Clone)]
pub struct IpoRecord {
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub category: String,
    #[pyo3(get)]
    pub status: String,
    #[pyo3(get)]
    pub raw_status: String,
    /// Price as scraped, or the parsed number.
    #[pyo3(get)]
    pub price: String,
    #[pyo3(get)]
    pub price_value: Option<f64>,
    #[pyo3(get)]
    pub price_display: String,
    #[pyo3(get)]
    pub issue_size: String,
    #[pyo3(get)]
    pub estimated_listing_date: String,
    #[pyo3(get)]
    pub close_date: String,
    #[pyo3(get)]
    pub pe_ratio: String,
    #[pyo3(get)]
    pub subscription_multiple: String,
    #[pyo3(get)]
    pub gmp_value: String,
    #[pyo3(get)]
    pub gmp_percentage: String,
    /// `(category code, multiple)` pairs in display order.
    #[pyo3(get)]
    pub subscription_by_category: Vec<(String, String)>,
}

#[pymethods]
impl IpoRecord {
    fn __repr__(&self) -> String {
        format!(
            "IpoRecord(name={:?}, category={}, status={:?}, price={:?}, subscription={}, gmp={} ({}))",
            self.name,
            self.category,
            self.status,
            self.price,
            self.subscription_multiple,
            self.gmp_value,
            self.gmp_percentage
        )
    }
}

impl From<&RustIpoRecord> for IpoRecord {
    fn from(r: &RustIpoRecord) -> Self {
        IpoRecord {
            name: r.name.clone(),
            category: r.category.to_string(),
            status: r.status.to_string(),
            raw_status: r.raw_status.clone(),
            price: r.price.to_string(),
            price_value: r.price.as_f64(),
            price_display: rust_format_price(&r.price),
            issue_size: r.issue_size.clone(),
            estimated_listing_date: r.estimated_listing_date.clone(),
            close_date: r.close_date.clone(),
            pe_ratio: r.pe_ratio.clone(),
            subscription_multiple: r.subscription_multiple.to_string(),
            gmp_value: r.gmp_value.to_string(),
            gmp_percentage: r.gmp_percentage.to_string(),
            subscription_by_category: r
                .subscription_by_category
                .iter()
                .map(|(c, v)| (c.code().to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// Records grouped into the dashboard sections.
#[pyclass]
pub struct Board {
    inner: RustBoard,
}

#[pymethods]
impl Board {
    #[getter]
    fn upcoming(&self) -> Vec<IpoRecord> {
        self.inner.upcoming.iter().map(IpoRecord::from).collect()
    }

    #[getter]
    fn open(&self) -> Vec<IpoRecord> {
        self.inner.open.iter().map(IpoRecord::from).collect()
    }

    #[getter]
    fn closing_today(&self) -> Vec<IpoRecord> {
        self.inner.closing_today.iter().map(IpoRecord::from).collect()
    }

    /// Serialize the board for a JSON-speaking renderer.
    fn to_json(&self) -> PyResult<String> {
        self.inner.to_json().map_err(to_py_err)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Board(upcoming={}, open={}, closing_today={})",
            self.inner.upcoming.len(),
            self.inner.open.len(),
            self.inner.closing_today.len()
        )
    }
}

/// One live issue in the subscription view.
#[pyclass]
#[derive(Clone)]
pub struct SubscriptionCard {
    #[pyo3(get)]
    pub title: String,
    #[pyo3(get)]
    pub name: String,
    #[pyo3(get)]
    pub category: String,
    #[pyo3(get)]
    pub status: String,
    #[pyo3(get)]
    pub price: String,
    #[pyo3(get)]
    pub size: String,
    #[pyo3(get)]
    pub gmp: String,
    #[pyo3(get)]
    pub pe_ratio: String,
    #[pyo3(get)]
    pub close_date: String,
    /// `(label, multiple)` pairs: QIB, SHNI, BHNI, NII, RII, Total.
    #[pyo3(get)]
    pub metrics: Vec<(String, String)>,
}

#[pymethods]
impl SubscriptionCard {
    fn __repr__(&self) -> String {
        format!("SubscriptionCard(title={:?}, status={:?})", self.title, self.status)
    }
}

impl From<RustSubscriptionCard> for SubscriptionCard {
    fn from(c: RustSubscriptionCard) -> Self {
        SubscriptionCard {
            title: c.title,
            name: c.name,
            category: c.category.to_string(),
            status: c.status.to_string(),
            price: c.price,
            size: c.size,
            gmp: c.gmp,
            pe_ratio: c.pe_ratio,
            close_date: c.close_date,
            metrics: c.metrics.into_iter().map(|m| (m.label, m.value)).collect(),
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Convert a list of dicts into rows. Dict order is column order; `None`
/// becomes an empty cell and other values are stringified.
fn rows_from_py(rows: &Bound<'_, PyList>) -> PyResult<Vec<RawRow>> {
    let mut out = Vec::with_capacity(rows.len());
    for item in rows.iter() {
        let dict = item.downcast::<PyDict>()?;
        let mut row = RawRow::new();
        for (key, value) in dict.iter() {
            let label: String = key.extract()?;
            let cell = if value.is_none() {
                String::new()
            } else {
                value.str()?.to_string_lossy().into_owned()
            };
            row.push(label, cell);
        }
        out.push(row);
    }
    Ok(out)
}

fn load_config(preset: RustConfig, config_json: Option<&str>) -> PyResult<RustConfig> {
    match config_json {
        Some(json) => RustConfig::from_json_str(json).map_err(to_py_err),
        None => Ok(preset),
    }
}

fn parse_delimiter(delimiter: &str) -> PyResult<NameDelimiter> {
    [NameDelimiter::Ipo, NameDelimiter::Gmp]
        .into_iter()
        .find(|d| d.token() == delimiter)
        .ok_or_else(|| {
            PyValueError::new_err(format!(
                "unknown name delimiter {delimiter:?}, expected \"IPO\" or \"GMP\""
            ))
        })
}

// ============================================================================
// Functions
// ============================================================================

/// Classify a status cell (sentence or short code). Unknown codes come back as written.
#[pyfunction]
fn classify_status(cell: &str) -> String {
    classify(cell).label().to_string()
}

/// Clean display name from a packed label.
#[pyfunction]
#[pyo3(signature = (label, delimiter = "IPO"))]
fn extract_name(label: &str, delimiter: &str) -> PyResult<String> {
    Ok(ipo_ingestion::extract_name(label, parse_delimiter(delimiter)?))
}

/// Subscription multiple such as "2.5x", or "N.A.".
#[pyfunction]
fn extract_subscription(text: &str) -> String {
    ipo_ingestion::extract_subscription(text).to_string()
}

/// `(value, percentage)` of the GMP annotation; each half is "N/A" when absent.
#[pyfunction]
fn extract_gmp(text: &str) -> (String, String) {
    let gmp = ipo_ingestion::extract_gmp(text);
    (gmp.value.to_string(), gmp.percentage.to_string())
}

/// `"115 43.73"` -> `"115(43.73%)"`. Raises `ValueError` with fewer than two numbers.
#[pyfunction]
fn format_numeric_pair(text: &str) -> PyResult<String> {
    ipo_ingestion::format_numeric_pair(text).map_err(to_py_err)
}

/// A float when the cell is a plain number after currency cleanup, else the original string.
#[pyfunction]
fn normalize_price(py: Python<'_>, text: &str) -> PyObject {
    match rust_normalize_price(text) {
        PriceValue::Number(n) => n.into_inner().into_py(py),
        PriceValue::Text(s) => s.into_py(py),
    }
}

/// `"₹1,234.50"` for numeric cells; anything else unchanged.
#[pyfunction]
fn format_price(text: &str) -> String {
    rust_format_price(&rust_normalize_price(text))
}

/// Run the GMP report pipeline over a list of row dicts.
#[pyfunction]
#[pyo3(signature = (rows, config_json = None))]
fn refresh_gmp_report(rows: &Bound<'_, PyList>, config_json: Option<&str>) -> PyResult<Board> {
    let config = load_config(RustConfig::gmp_report(), config_json)?;
    let rows = rows_from_py(rows)?;
    Ok(Board {
        inner: Pipeline::new(&config).refresh(rows),
    })
}

/// Run the subscription report pipeline over a list of row dicts.
#[pyfunction]
#[pyo3(signature = (rows, config_json = None))]
fn refresh_subscription_report(
    rows: &Bound<'_, PyList>,
    config_json: Option<&str>,
) -> PyResult<Vec<SubscriptionCard>> {
    let config = load_config(RustConfig::subscription_report(), config_json)?;
    let rows = rows_from_py(rows)?;
    Ok(Pipeline::new(&config)
        .subscription_cards(rows)
        .into_iter()
        .map(SubscriptionCard::from)
        .collect())
}

/// Install a `tracing` subscriber writing to stderr. Filter uses `RUST_LOG` syntax.
#[pyfunction]
#[pyo3(signature = (filter = "info"))]
fn init_logging(filter: &str) -> PyResult<()> {
    let env_filter =
        EnvFilter::try_new(filter).map_err(|e| PyValueError::new_err(e.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|e| PyRuntimeError::new_err(e.to_string()))?;
    tracing::debug!(filter, "logging initialised");
    Ok(())
}

// ============================================================================
// Module Definition
// ============================================================================

/// IPO Tracker Core - Rust parsing core for the Python dashboard.
#[pymodule]
fn ipo_tracker_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Types
    m.add_class::<IpoRecord>()?;
    m.add_class::<Board>()?;
    m.add_class::<SubscriptionCard>()?;

    // Label parsing
    m.add_function(wrap_pyfunction!(classify_status, m)?)?;
    m.add_function(wrap_pyfunction!(extract_name, m)?)?;
    m.add_function(wrap_pyfunction!(extract_subscription, m)?)?;
    m.add_function(wrap_pyfunction!(extract_gmp, m)?)?;
    m.add_function(wrap_pyfunction!(format_numeric_pair, m)?)?;
    m.add_function(wrap_pyfunction!(normalize_price, m)?)?;
    m.add_function(wrap_pyfunction!(format_price, m)?)?;

    // Pipelines
    m.add_function(wrap_pyfunction!(refresh_gmp_report, m)?)?;
    m.add_function(wrap_pyfunction!(refresh_subscription_report, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;

    Ok(())
}
