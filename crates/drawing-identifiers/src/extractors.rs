//! Identifier extraction from drawing filenames

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Sheet token returned when a filename carries no hyphen-delimited 3-digit run.
pub const FALLBACK_SHEET: &str = "000";

/// Block prefix, drawing number and sheet parsed out of a conforming filename.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructuredIdentifier {
    pub block_prefix: String,
    pub block_number: String,
    pub sheet: String,
}

lazy_static! {
    // First 3-digit run flanked by hyphens: `-002-`
    static ref SHEET_REGEX: Regex = Regex::new(r"-(?P<sheet>[0-9]{3})-").unwrap();

    // PREFIX-SEG-SEG-SEG-NUMBER(3-6)-SHEET(3)-LANG(2)
    // Expects an upper-cased, normalized filename.
    static ref STRUCTURED_REGEX: Regex = Regex::new(
        r"(?P<prefix>[A-Z0-9]+)-[A-Z0-9]+-[A-Z0-9]+-[A-Z0-9]+-(?P<number>[0-9]{3,6})-(?P<sheet>[0-9]{3})-[A-Z]{2}"
    ).unwrap();

    // Leading alphanumeric run of a nesting reference, e.g. `N12345 (2EA)` -> `N12345`
    static ref LEADING_TOKEN_REGEX: Regex = Regex::new(r"^[A-Za-z0-9]+").unwrap();
}

/// Extract the sheet token from a filename.
///
/// Returns the first 3-digit group found between two hyphens, or
/// [`FALLBACK_SHEET`] when there is none. Never fails.
///
/// # Examples
/// ```
/// use drawing_identifiers::extract_sheet;
/// assert_eq!(extract_sheet("BA21-OS-TOPS-ST-706406-002-EN_01"), "002");
/// assert_eq!(extract_sheet("legacy_drawing.pdf"), "000");
/// ```
pub fn extract_sheet(filename: &str) -> String {
    SHEET_REGEX
        .captures(filename)
        .and_then(|cap| cap.name("sheet"))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| FALLBACK_SHEET.to_string())
}

/// Extract the structured identifier from a normalized filename.
///
/// The input should already be upper-cased with revision suffix and
/// extension removed (see [`crate::normalize_filename`]). Filenames that do
/// not follow the grammar yield `None`.
pub fn extract_structured(normalized: &str) -> Option<StructuredIdentifier> {
    let cap = STRUCTURED_REGEX.captures(normalized)?;
    Some(StructuredIdentifier {
        block_prefix: cap.name("prefix")?.as_str().to_string(),
        block_number: cap.name("number")?.as_str().to_string(),
        sheet: cap.name("sheet")?.as_str().to_string(),
    })
}

/// Extract the leading alphanumeric token of a reference field.
///
/// Leading whitespace is ignored. Returns `None` when the field starts with
/// anything other than an ASCII letter or digit.
pub fn leading_token(reference: &str) -> Option<&str> {
    LEADING_TOKEN_REGEX
        .find(reference.trim_start())
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_sheet() {
        assert_eq!(extract_sheet("BA21-OS-TOPS-ST-706406-002-EN_01"), "002");
        assert_eq!(extract_sheet("B1-X-001-002-EN"), "001");
    }

    #[test]
    fn test_extract_sheet_fallback() {
        assert_eq!(extract_sheet(""), FALLBACK_SHEET);
        assert_eq!(extract_sheet("A1-1234-B"), FALLBACK_SHEET);
        assert_eq!(extract_sheet("002-EN"), FALLBACK_SHEET);
    }

    #[test]
    fn test_extract_sheet_skips_longer_runs() {
        assert_eq!(extract_sheet("X-706406-015-EN"), "015");
    }

    #[test]
    fn test_extract_structured() {
        let id = extract_structured("BA21-OS-TOPS-ST-706406-002-EN").unwrap();
        assert_eq!(id.block_prefix, "BA21");
        assert_eq!(id.block_number, "706406");
        assert_eq!(id.sheet, "002");
    }

    #[test]
    fn test_extract_structured_no_match() {
        assert_eq!(extract_structured(""), None);
        assert_eq!(extract_structured("BA21-706406-002"), None);
        // grammar expects upper case
        assert_eq!(extract_structured("ba21-os-tops-st-706406-002-en"), None);
    }

    #[test]
    fn test_extract_structured_with_leading_noise() {
        let id = extract_structured("X-BA21-OS-TOPS-ST-706406-002-EN").unwrap();
        assert_eq!(id.block_prefix, "BA21");
    }

    #[test]
    fn test_leading_token() {
        assert_eq!(leading_token("N12345 (2EA)"), Some("N12345"));
        assert_eq!(leading_token("  ab12-x"), Some("ab12"));
        assert_eq!(leading_token("-N123"), None);
        assert_eq!(leading_token(""), None);
    }
}
