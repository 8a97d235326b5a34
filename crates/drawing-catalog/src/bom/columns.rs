//! BOM column names and ordering.

use lazy_static::lazy_static;
use regex::Regex;

/// Preferred column order of the BOM dataset.
pub const PREFERRED_COLUMNS: &[&str] = &[
    "WELD UNIQUE ID",
    "BLOCK",
    "FILENAME",
    "DWG. Title",
    "MOD. NO",
    "DETAIL VIEW",
    "MATNO",
    "STEEL NO",
    "NESTING DWG",
    "Grade",
    "OFF",
    "WLEG",
    "WELD. LENG.",
    "SIDE",
    "WNO",
    "P. NO",
    "ea",
    "total",
    "T",
    "B",
    "L(OD)",
    "WEIGHT",
    "MIX",
    "no",
    "TPYE",
    "WORKSCOPE",
    "REV1",
];

/// Helper columns used while joining that never reach the output.
pub const EXCLUDED_COLUMNS: &[&str] = &[
    "MATNO1", "MATNO2", "MATNO3", "MATNO4", "MATNO5", "MATNO6", "MOD", MATCHED_COLUMN,
];

/// Columns that get their own grouped view.
pub const GROUP_COLUMNS: &[&str] = &["MATNO", "STEEL NO", "NESTING DWG", "Grade", "T"];

/// Join bookkeeping column.
pub const MATCHED_COLUMN: &str = "_matched";

/// Detail table key column.
pub const MATNO_COLUMN: &str = "MATNO";

lazy_static! {
    static ref DIGIT: Regex = Regex::new(r"[0-9]").unwrap();
}

/// `MATNO1`, `MATNO 2`, ... : a numbered material column of the weld table.
pub fn is_numbered_matno(header: &str) -> bool {
    header.to_uppercase().contains(MATNO_COLUMN) && DIGIT.is_match(header)
}

/// The weld table's unique id column (`WELD UNIQUE ID` and variants).
pub fn is_weld_id(header: &str) -> bool {
    let upper = header.to_uppercase();
    upper.contains("WELD") && upper.contains("UNIQUE")
}

/// Order `existing` columns: preferred ones first in preferred order, then
/// the rest in their original order. `excluded` columns are dropped.
pub fn order_columns(existing: &[String], preferred: &[&str], excluded: &[&str]) -> Vec<String> {
    let kept: Vec<&String> = existing
        .iter()
        .filter(|c| !excluded.contains(&c.as_str()))
        .collect();

    let mut ordered: Vec<String> = preferred
        .iter()
        .filter(|p| kept.iter().any(|c| c.as_str() == **p))
        .map(|p| p.to_string())
        .collect();

    for column in kept {
        if !ordered.contains(column) {
            ordered.push(column.clone());
        }
    }
    ordered
}

/// Output column order of the BOM dataset.
pub fn reorder_columns(existing: &[String]) -> Vec<String> {
    order_columns(existing, PREFERRED_COLUMNS, EXCLUDED_COLUMNS)
}
