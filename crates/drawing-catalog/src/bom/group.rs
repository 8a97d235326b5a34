//! Per-column grouped views of a BOM table.

use std::cmp::Ordering;

use serde::Serialize;
use serde_json::Value;

use super::Table;
use crate::collate::locale_cmp;
use crate::domain::record::scalar_to_string;

/// Rows of a table ordered by one grouping column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub column: String,
    /// Indices into the table's rows
    pub rows: Vec<usize>,
}

/// Build one view per grouping column present in `table`.
///
/// Each view keeps the rows whose grouping cell is non-blank, stably sorted
/// by that column and then by the remaining present grouping columns.
pub fn group_views(table: &Table, group_columns: &[&str]) -> Vec<GroupView> {
    let present: Vec<&str> = group_columns
        .iter()
        .copied()
        .filter(|c| table.has_column(c))
        .collect();

    present
        .iter()
        .map(|column| {
            let mut rows: Vec<usize> = table
                .rows
                .iter()
                .enumerate()
                .filter(|(_, row)| {
                    row.get(*column)
                        .map(|v| !scalar_to_string(v).trim().is_empty())
                        .unwrap_or(false)
                })
                .map(|(i, _)| i)
                .collect();

            let keys: Vec<&str> = std::iter::once(*column)
                .chain(present.iter().copied().filter(|c| c != column))
                .collect();

            rows.sort_by(|a, b| {
                keys.iter()
                    .map(|key| {
                        compare_cells(table.rows[*a].get(*key), table.rows[*b].get(*key))
                    })
                    .find(|o| *o != Ordering::Equal)
                    .unwrap_or(Ordering::Equal)
            });

            GroupView {
                column: column.to_string(),
                rows,
            }
        })
        .collect()
}

/// Numbers compare numerically and sort before text; text uses locale order.
fn compare_cells(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.map(scalar_to_string).unwrap_or_default();
    let b = b.map(scalar_to_string).unwrap_or_default();
    let (a, b) = (a.trim(), b.trim());
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => locale_cmp(a, b),
    }
}
