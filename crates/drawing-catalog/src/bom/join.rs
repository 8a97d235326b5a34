//! Weld / detail join.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::{is_numbered_matno, Row, Table, MATCHED_COLUMN, MATNO_COLUMN};
use crate::domain::record::scalar_to_string;
use crate::error::DatasetError;

/// Result of joining a weld sheet with a detail sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinOutcome {
    pub table: Table,
    /// Material references found in the detail sheet
    pub matched: usize,
    /// Material references without a detail row
    pub missing: usize,
}

/// Expand every weld row into one row per referenced material.
///
/// For each numbered `MATNO` column (in header order) holding a non-blank
/// value, the first detail row with that `MATNO` is laid over the weld row.
/// References without a detail row keep the weld columns and carry the
/// reference in `MATNO`. Each output row records the outcome in `_matched`.
pub fn join_weld_details(weld: &Table, detail: &Table) -> Result<JoinOutcome, DatasetError> {
    let detail_key = detail
        .headers
        .iter()
        .find(|h| h.to_uppercase() == MATNO_COLUMN)
        .ok_or_else(|| DatasetError::MissingColumn(MATNO_COLUMN.to_string()))?;

    let matno_columns: Vec<&String> = weld.headers.iter().filter(|h| is_numbered_matno(h)).collect();
    if matno_columns.is_empty() {
        warn!("Weld sheet has no numbered {} columns", MATNO_COLUMN);
    }

    let mut first_detail: HashMap<String, &Row> = HashMap::new();
    for row in &detail.rows {
        if let Some(key) = row.get(detail_key.as_str()) {
            first_detail.entry(scalar_to_string(key).trim().to_string()).or_insert(row);
        }
    }

    let mut outcome = JoinOutcome::default();
    for weld_row in &weld.rows {
        for column in &matno_columns {
            let reference = weld_row
                .get(column.as_str())
                .map(scalar_to_string)
                .unwrap_or_default();
            let reference = reference.trim();
            if reference.is_empty() {
                continue;
            }

            let mut joined = weld_row.clone();
            match first_detail.get(reference) {
                Some(detail_row) => {
                    for (key, value) in detail_row.iter() {
                        joined.insert(key.clone(), value.clone());
                    }
                    joined.insert(MATCHED_COLUMN.to_string(), Value::Bool(true));
                    outcome.matched += 1;
                }
                None => {
                    joined.insert(detail_key.clone(), Value::String(reference.to_string()));
                    joined.insert(MATCHED_COLUMN.to_string(), Value::Bool(false));
                    outcome.missing += 1;
                }
            }
            outcome.table.rows.push(joined);
        }
    }

    let matched_column = MATCHED_COLUMN.to_string();
    let mut headers = weld.headers.clone();
    for header in detail.headers.iter().chain(std::iter::once(&matched_column)) {
        if !headers.contains(header) {
            headers.push(header.clone());
        }
    }
    outcome.table.headers = headers;

    debug!(
        "Joined {} weld rows: {} matched, {} missing",
        weld.rows.len(),
        outcome.matched,
        outcome.missing
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table(rows: Vec<Value>) -> Table {
        Table::from_rows(
            rows.into_iter()
                .filter_map(|v| v.as_object().cloned())
                .collect(),
        )
    }

    #[test]
    fn expands_one_row_per_material() {
        let weld = table(vec![json!({
            "WELD UNIQUE ID": "W1", "MATNO1": "M-1", "MATNO2": "M-9", "MATNO3": ""
        })]);
        let detail = table(vec![
            json!({"MATNO": "M-1", "Grade": "AH36"}),
            json!({"MATNO": "M-1", "Grade": "dup"}),
        ]);
        let outcome = join_weld_details(&weld, &detail).unwrap();
        assert_eq!(outcome.matched, 1);
        assert_eq!(outcome.missing, 1);
        assert_eq!(outcome.table.rows.len(), 2);

        let first = &outcome.table.rows[0];
        assert_eq!(first["Grade"], json!("AH36"));
        assert_eq!(first["_matched"], json!(true));

        let second = &outcome.table.rows[1];
        assert_eq!(second["MATNO"], json!("M-9"));
        assert_eq!(second["_matched"], json!(false));
        assert!(second.get("Grade").is_none());

        assert!(outcome.table.has_column("Grade"));
        assert!(outcome.table.has_column("_matched"));
    }

    #[test]
    fn numeric_references_match_string_keys() {
        let weld = table(vec![json!({"WELD UNIQUE ID": "W1", "MATNO1": 1001, "MATNO2": null})]);
        let detail = table(vec![json!({"MATNO": "1001", "T": 12})]);
        let outcome = join_weld_details(&weld, &detail).unwrap();
        assert_eq!(outcome.matched, 1);
        assert_eq!(outcome.table.rows[0]["T"], json!(12));
    }

    #[test]
    fn detail_without_matno_is_an_error() {
        let weld = table(vec![json!({"MATNO1": "M-1"})]);
        let detail = table(vec![json!({"Grade": "AH36"})]);
        assert!(matches!(
            join_weld_details(&weld, &detail),
            Err(DatasetError::MissingColumn(_))
        ));
    }
}
