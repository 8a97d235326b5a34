//! Dataset loading.
//!
//! Datasets arrive either as a plain JSON array of row objects or as the
//! generated script form the catalog page loads:
//!
//! ```text
//! // Auto-generated
//! window.ALL_DATA = [ {...}, {...} ];
//! ```

use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{DatasetError, Result};

/// Global the generated script assigns the rows to.
pub const SCRIPT_GLOBAL: &str = "window.ALL_DATA";

lazy_static! {
    static ref COMMENT_LINE: Regex = Regex::new(r"(?m)^\s*//.*$").unwrap();
    static ref ASSIGNMENT: Regex =
        Regex::new(r"^\s*(?:(?:var|let|const)\s+)?[A-Za-z_$][\w$.]*\s*=\s*").unwrap();
}

/// Strip the script wrapper, if any, leaving the JSON payload.
pub fn strip_script_wrapper(text: &str) -> String {
    let without_comments = COMMENT_LINE.replace_all(text, "");
    let body = ASSIGNMENT.replace(without_comments.trim(), "");
    body.trim().trim_end_matches(';').trim_end().to_string()
}

/// Parse rows from JSON or script text.
///
/// Rows that do not deserialize into `T` are skipped with a warning; a
/// payload that is not an array is an error.
pub fn load_records<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let payload = strip_script_wrapper(text);
    let value: Value = serde_json::from_str(&payload).map_err(DatasetError::from)?;

    let rows = match value {
        Value::Array(rows) => rows,
        other => return Err(DatasetError::NotAnArray(value_kind(&other).to_string()).into()),
    };

    let total = rows.len();
    let records: Vec<T> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping dataset row {}: {}", index, e);
                None
            }
        })
        .collect();

    debug!("Loaded {} of {} dataset rows", records.len(), total);
    Ok(records)
}

/// Read a dataset file and parse it with [`load_records`].
pub fn load_records_from_path<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<Vec<T>> {
    let path = path.as_ref();
    debug!("Reading dataset {}", path.display());
    let text = std::fs::read_to_string(path)?;
    load_records(&text)
}

/// Render rows as the generated script form.
pub fn to_script<T: Serialize>(rows: &[T]) -> Result<String> {
    let json = serde_json::to_string(rows).map_err(DatasetError::from)?;
    Ok(format!("// Auto-generated\n{} = {};\n", SCRIPT_GLOBAL, json))
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CatalogRecord;
    use crate::error::CatalogError;

    #[test]
    fn loads_plain_array() {
        let rows: Vec<CatalogRecord> =
            load_records(r#"[{"BLOCK": "B1", "MOD. NO": "M1", "FILENAME": "F1"}]"#).unwrap();
        assert_eq!(rows, vec![CatalogRecord::new("B1", "M1", "F1")]);
    }

    #[test]
    fn loads_script_wrapper() {
        let text = "// Auto-generated from bom.py\nwindow.ALL_DATA = [{\"BLOCK\": \"B1\"}];\n";
        let rows: Vec<CatalogRecord> = load_records(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].block, "B1");
    }

    #[test]
    fn skips_rows_that_do_not_fit() {
        let rows: Vec<CatalogRecord> = load_records(r#"[{"BLOCK": "B1"}, 42, "x"]"#).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn rejects_non_array_payload() {
        let err = load_records::<CatalogRecord>(r#"{"BLOCK": "B1"}"#).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Dataset(DatasetError::NotAnArray(ref kind)) if kind == "an object"
        ));
    }

    #[test]
    fn rejects_malformed_payload() {
        let err = load_records::<CatalogRecord>("window.ALL_DATA = [;").unwrap_err();
        assert!(matches!(err, CatalogError::Dataset(DatasetError::Malformed(_))));
    }

    #[test]
    fn script_output_loads_back() {
        let rows = vec![CatalogRecord::new("B1", "M1", "F1")];
        let script = to_script(&rows).unwrap();
        assert!(script.contains("window.ALL_DATA = "));
        let loaded: Vec<CatalogRecord> = load_records(&script).unwrap();
        assert_eq!(loaded, rows);
    }
}
