//! Cell value cleanup.

use serde_json::{Number, Value};

use super::{Row, Table};

/// Weld number column, rendered as three digits.
pub const WNO_COLUMN: &str = "WNO";

/// Clean one row in place.
///
/// - strings are trimmed
/// - null becomes an empty string
/// - integral floats become integers (`12.0` -> `12`)
/// - a numeric `WNO` becomes a three-digit string (`5` -> `"005"`)
pub fn clean_row(row: &mut Row) {
    for value in row.values_mut() {
        *value = clean_value(std::mem::take(value));
    }
    if let Some(wno) = row.get_mut(WNO_COLUMN) {
        if let Some(padded) = pad_weld_number(wno) {
            *wno = Value::String(padded);
        }
    }
}

/// Clean every row and drop rows that are entirely blank and columns that
/// are blank in every row.
pub fn clean_table(table: Table) -> Table {
    let mut rows: Vec<Row> = table
        .rows
        .into_iter()
        .map(|mut row| {
            clean_row(&mut row);
            row
        })
        .filter(|row| !row.values().all(is_blank))
        .collect();

    let headers: Vec<String> = table
        .headers
        .into_iter()
        .filter(|h| rows.iter().any(|row| row.get(h).is_some_and(|v| !is_blank(v))))
        .collect();

    for row in &mut rows {
        row.retain(|key, _| headers.contains(key));
    }

    Table { headers, rows }
}

fn clean_value(value: Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.len() == s.len() {
                Value::String(s)
            } else {
                Value::String(trimmed.to_string())
            }
        }
        Value::Number(n) => Value::Number(integral(&n).unwrap_or(n)),
        other => other,
    }
}

fn integral(n: &Number) -> Option<Number> {
    if n.is_i64() || n.is_u64() {
        return None;
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(Number::from(f as i64))
    } else {
        None
    }
}

fn pad_weld_number(value: &Value) -> Option<String> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    if text.is_empty() {
        return None;
    }
    let digits_only = text
        .chars()
        .filter(|c| *c != '.' && *c != '-')
        .all(|c| c.is_ascii_digit());
    if !digits_only {
        return None;
    }
    let parsed: f64 = text.parse().ok()?;
    Some(format!("{:03}", parsed.trunc() as i64))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}
