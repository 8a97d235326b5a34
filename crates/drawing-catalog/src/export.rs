//! Tabular export of the active row set.
//!
//! Builds headers and string cells from filtered rows; spreadsheet writing
//! is left to the caller.

use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::bom::columns::{order_columns, PREFERRED_COLUMNS};
use crate::domain::record::scalar_to_string;

/// Headers plus rows of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExportTable {
    /// Build a table from any serializable rows.
    ///
    /// Columns follow the preferred BOM order; columns outside it are appended
    /// in first-seen order. Rows that do not serialize to an object are
    /// skipped.
    pub fn from_rows<T: Serialize>(rows: &[T]) -> Self {
        let objects: Vec<Map<String, Value>> = rows
            .iter()
            .filter_map(|row| match serde_json::to_value(row) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            })
            .collect();

        let mut seen: Vec<String> = Vec::new();
        for object in &objects {
            for key in object.keys() {
                if !seen.iter().any(|k| k == key) {
                    seen.push(key.clone());
                }
            }
        }
        let headers = order_columns(&seen, PREFERRED_COLUMNS, &[]);

        let rows = objects
            .iter()
            .map(|object| {
                headers
                    .iter()
                    .map(|h| object.get(h).map(scalar_to_string).unwrap_or_default())
                    .collect()
            })
            .collect();

        Self { headers, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render as CSV (RFC 4180 quoting).
    pub fn to_csv_string(&self) -> String {
        let mut out = String::new();
        push_csv_line(&mut out, &self.headers);
        for row in &self.rows {
            push_csv_line(&mut out, row);
        }
        out
    }
}

fn push_csv_line(out: &mut String, cells: &[String]) {
    let line: Vec<String> = cells.iter().map(|c| quote_csv(c)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

fn quote_csv(cell: &str) -> String {
    if cell.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// File name for an export taken at `at`.
pub fn export_file_name(at: DateTime<Local>) -> String {
    format!("catalog_export_{}.csv", at.format("%Y%m%d_%H%M%S"))
}
