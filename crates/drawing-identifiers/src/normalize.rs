//! Filename normalization for comparison

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Optional `_NN` revision suffix followed by an optional drawing extension.
    static ref TRAILER_REGEX: Regex = Regex::new(r"(?:_[0-9]{2})?(?:\.(?:PDF|DWG))?$").unwrap();
}

/// Normalize a filename for cross-referencing.
///
/// - Trims whitespace
/// - Upper-cases
/// - Removes a trailing `.pdf` / `.dwg` extension
/// - Removes a trailing `_NN` revision suffix
///
/// # Examples
/// ```
/// use drawing_identifiers::normalize_filename;
/// assert_eq!(normalize_filename("ba21-os-tops-st-706406-002-en_01.pdf"), "BA21-OS-TOPS-ST-706406-002-EN");
/// assert_eq!(normalize_filename("N12345.dwg"), "N12345");
/// ```
pub fn normalize_filename(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    TRAILER_REGEX.replace(&upper, "").into_owned()
}

/// Rewrite a trailing revision suffix, e.g. `_01` to `_02`.
///
/// Filenames that do not end with `from` are returned unchanged.
pub fn revise_suffix(filename: &str, from: &str, to: &str) -> String {
    match filename.strip_suffix(from) {
        Some(stem) if !from.is_empty() => format!("{}{}", stem, to),
        _ => filename.to_string(),
    }
}

/// Final path component of a `/` or `\` separated path.
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
