//! Adapters from fetched tables to [`RawRow`]s.
//!
//! The fetcher hands over either a header row plus cell rows (HTML report)
//! or a JSON array of objects (newer report API). Both land here as plain
//! label → text rows; no semantic parsing happens yet.

use ipo_core::{Error, RawRow, Result};
use serde_json::Value;

/// Sort-widget text the report appends to sortable headers.
const SORT_SUFFIX: &str = "asc";

/// Clean a header label: drop the sort-widget text, trim.
pub fn clean_header(header: &str) -> String {
    header.replace(SORT_SUFFIX, "").trim().to_string()
}

/// Zip a header row with cell rows.
///
/// Short rows are padded with empty cells; surplus cells are dropped. Empty
/// rows are skipped.
pub fn rows_from_table<S, R, C>(headers: &[S], rows: R) -> Vec<RawRow>
where
    S: AsRef<str>,
    R: IntoIterator<Item = Vec<C>>,
    C: Into<String>,
{
    let headers: Vec<String> = headers.iter().map(|h| clean_header(h.as_ref())).collect();
    rows.into_iter()
        .filter(|cells| !cells.is_empty())
        .map(|cells| {
            let mut cells = cells.into_iter().map(Into::into);
            let mut row = RawRow::new();
            for header in &headers {
                row.push(header.clone(), cells.next().unwrap_or_default());
            }
            row
        })
        .collect()
}

/// Parse a JSON array of objects into rows.
///
/// Strings are kept, numbers and booleans are stringified, `null` becomes
/// an empty cell. Nested values are kept as their JSON text.
pub fn rows_from_json(json: &str) -> Result<Vec<RawRow>> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(Error::data("expected a JSON array of row objects"));
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(map) => Ok(RawRow::from_pairs(
                map.iter().map(|(k, v)| (k.as_str(), cell_text(v))),
            )),
            _ => Err(Error::data(format!("row {i} is not a JSON object"))),
        })
        .collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_header() {
        assert_eq!(clean_header(" Priceasc "), "Price");
        assert_eq!(clean_header("IPO Size"), "IPO Size");
        assert_eq!(clean_header("Est Listingasc"), "Est Listing");
    }

    #[test]
    fn test_rows_from_table_pads_and_truncates() {
        let headers = ["IPOasc", "Priceasc", "IPO Size"];
        let rows = rows_from_table(
            &headers,
            vec![
                vec!["Acme IPO Open", "100", "10 Cr", "extra"],
                vec!["Mega IPO Upcoming"],
                vec![],
            ],
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("IPO"), Some("Acme IPO Open"));
        assert_eq!(rows[0].len(), 3);
        assert_eq!(rows[1].get("Price"), Some(""));
        assert_eq!(rows[1].get("IPO Size"), Some(""));
    }

    #[test]
    fn test_rows_from_table_empty() {
        let rows = rows_from_table::<&str, Vec<Vec<String>>, String>(&["IPO"], Vec::new());
        assert!(rows.is_empty());
    }

    #[test]
    fn test_rows_from_json() {
        let rows = rows_from_json(
            r#"[
                {"IPO": "Acme SME IPO GMP:₹35(7.2%)", "Status": "O", "IPO Price": 485, "P/E": null},
                {"IPO": "Mega IPO", "Status": "CT", "Listed": false}
            ]"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("IPO Price"), Some("485"));
        assert_eq!(rows[0].get("P/E"), Some(""));
        assert_eq!(rows[1].get("Listed"), Some("false"));
    }

    #[test]
    fn test_rows_from_json_errors() {
        assert!(matches!(rows_from_json("{}"), Err(Error::Data(_))));
        assert!(matches!(rows_from_json("[1]"), Err(Error::Data(_))));
        assert!(matches!(rows_from_json("[{"), Err(Error::Json(_))));
        assert!(rows_from_json("[]").unwrap().is_empty());
    }
}
