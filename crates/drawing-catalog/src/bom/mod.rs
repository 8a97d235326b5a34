//! BOM dataset preparation.
//!
//! The BOM rows the matcher links against are produced from two spreadsheet
//! exports: a weld table whose rows reference up to six materials through
//! numbered `MATNO<n>` columns, and a detail table keyed by `MATNO`. This
//! module joins them, cleans cell values, orders columns and builds the
//! per-column grouped views.

pub mod clean;
pub mod columns;
pub mod group;
pub mod join;

pub use clean::*;
pub use columns::*;
pub use group::*;
pub use join::*;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::BomRecord;

/// One spreadsheet row keyed by header.
pub type Row = Map<String, Value>;

/// A sheet: headers in column order plus rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(headers: Vec<String>, rows: Vec<Row>) -> Self {
        Self { headers, rows }
    }

    /// Build a table from rows, taking headers in first-seen order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        let mut headers: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
        Self { headers, rows }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Headers reordered for output, helper columns dropped.
    pub fn reordered(mut self) -> Self {
        self.headers = reorder_columns(&self.headers);
        for row in &mut self.rows {
            row.retain(|key, _| !EXCLUDED_COLUMNS.contains(&key.as_str()));
        }
        self
    }

    /// Typed BOM rows. Rows that do not fit [`BomRecord`] are skipped.
    pub fn to_bom_records(&self) -> Vec<BomRecord> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(
                |(index, row)| match serde_json::from_value(Value::Object(row.clone())) {
                    Ok(record) => Some(record),
                    Err(e) => {
                        warn!("Skipping BOM row {}: {}", index, e);
                        None
                    }
                },
            )
            .collect()
    }
}

/// Which export a sheet came from, judged by its headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Weld,
    Detail,
    Unknown,
}

/// Classify a sheet by its headers.
///
/// A weld sheet has a weld unique id column and at least two numbered
/// `MATNO` columns; a detail sheet has a plain `MATNO` column.
pub fn detect_table_kind(headers: &[String]) -> TableKind {
    let has_weld_id = headers.iter().any(|h| is_weld_id(h));
    let numbered = headers.iter().filter(|h| is_numbered_matno(h)).count();
    if has_weld_id && numbered >= 2 {
        return TableKind::Weld;
    }
    if headers.iter().any(|h| h.to_uppercase() == MATNO_COLUMN) {
        return TableKind::Detail;
    }
    TableKind::Unknown
}
