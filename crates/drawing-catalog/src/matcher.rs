//! Cross-referencing drawings against BOM rows.
//!
//! There is no foreign key between the drawing catalog and the BOM, so a
//! drawing is linked to BOM rows through identifiers derived from filenames.
//!
//! Matching order:
//! 1. Both sides carry a structured identifier: block prefix, drawing number
//!    and sheet must all be equal.
//! 2. Otherwise the normalized strings are compared. In the default
//!    [`MatchStrictness::Substring`] mode equality or containment in either
//!    direction links the row. This favors recall over precision and can
//!    over-link short or prefix-sharing names.
//!
//! A name that is blank after normalization never links, in every mode.
//! Literal containment would otherwise link a blank name to every row.

use drawing_identifiers::{extract_structured, normalize_filename, StructuredIdentifier};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::BomRecord;

/// How far the matcher falls back when a filename is outside the grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrictness {
    /// Structured match, then equality or containment in either direction
    #[default]
    Substring,
    /// Structured match, then normalized equality only
    Exact,
    /// Structured match only
    StructuredOnly,
}

/// A normalized filename with its identifier, computed once per comparison side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkKey {
    pub normalized: String,
    pub structured: Option<StructuredIdentifier>,
}

impl LinkKey {
    pub fn new(raw: &str) -> Self {
        let normalized = normalize_filename(raw);
        let structured = extract_structured(&normalized);
        Self {
            normalized,
            structured,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Whether two keys refer to the same drawing under `strictness`.
    pub fn links_to(&self, other: &LinkKey, strictness: MatchStrictness) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        if let (Some(a), Some(b)) = (&self.structured, &other.structured) {
            return a == b;
        }

        match strictness {
            MatchStrictness::Substring => {
                self.normalized == other.normalized
                    || self.normalized.contains(&other.normalized)
                    || other.normalized.contains(&self.normalized)
            }
            MatchStrictness::Exact => self.normalized == other.normalized,
            MatchStrictness::StructuredOnly => false,
        }
    }
}

/// BOM rows linked to a drawing, in input order.
pub fn find_linked<'a>(drawing_filename: &str, bom_rows: &'a [BomRecord]) -> Vec<&'a BomRecord> {
    find_linked_with(drawing_filename, bom_rows, MatchStrictness::default())
}

/// BOM rows linked to a drawing under an explicit strictness, in input order.
///
/// Rows whose link source is blank are never linked.
pub fn find_linked_with<'a>(
    drawing_filename: &str,
    bom_rows: &'a [BomRecord],
    strictness: MatchStrictness,
) -> Vec<&'a BomRecord> {
    let target = LinkKey::new(drawing_filename);
    if target.is_empty() {
        return Vec::new();
    }

    let linked: Vec<&BomRecord> = bom_rows
        .iter()
        .filter(|row| target.links_to(&LinkKey::new(row.link_source()), strictness))
        .collect();

    debug!(
        "Linked {} of {} BOM rows to {} (structured: {}, {:?})",
        linked.len(),
        bom_rows.len(),
        target.normalized,
        target.structured.is_some(),
        strictness
    );

    linked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bom(filename: &str) -> BomRecord {
        BomRecord {
            filename: filename.to_string(),
            ..BomRecord::default()
        }
    }

    #[test]
    fn structured_match_ignores_revision_and_case() {
        let rows = vec![
            bom("ba21-os-tops-st-706406-002-en_02.pdf"),
            bom("BA21-OS-TOPS-ST-706406-003-EN_01"),
        ];
        let linked = find_linked("BA21-OS-TOPS-ST-706406-002-EN_01", &rows);
        assert_eq!(linked.len(), 1);
        assert!(std::ptr::eq(linked[0], &rows[0]));
    }

    #[test]
    fn structured_match_compares_only_identifier_parts() {
        // subsystem segments differ, identifier triple is equal
        let rows = vec![bom("BA21-XX-YYYY-ZZ-706406-002-KR")];
        assert_eq!(find_linked("BA21-OS-TOPS-ST-706406-002-EN", &rows).len(), 1);
    }

    #[test]
    fn structured_mismatch_does_not_fall_back() {
        // the target is a substring of the row, but the block prefixes differ
        let rows = vec![bom("XBA21-OS-TOPS-ST-706406-002-EN")];
        assert!(find_linked("BA21-OS-TOPS-ST-706406-002-EN", &rows).is_empty());

        let rows = vec![
            bom("BA21-OS-TOPS-ST-706406-002-EN"),
            bom("BA21-OS-TOPS-ST-706407-002-EN"),
        ];
        assert_eq!(find_linked("BA21-OS-TOPS-ST-706406-002-EN", &rows).len(), 1);
    }

    #[test]
    fn fallback_substring_both_directions() {
        let rows = vec![bom("LEGACY-PLATE"), bom("PLATE"), bom("OTHER")];
        let linked = find_linked("legacy-plate_01.pdf", &rows);
        assert_eq!(linked.len(), 2);

        let linked = find_linked("PLATE", &rows);
        assert_eq!(linked.len(), 2);
    }

    #[test]
    fn fallback_when_only_one_side_is_structured() {
        let rows = vec![bom("BA21-OS-TOPS-ST-706406-002-EN")];
        assert_eq!(find_linked("706406-002", &rows).len(), 1);
    }

    #[test]
    fn strictness_limits_fallback() {
        let rows = vec![bom("LEGACY-PLATE"), bom("PLATE")];
        assert_eq!(find_linked_with("plate", &rows, MatchStrictness::Exact).len(), 1);
        assert!(find_linked_with("plate", &rows, MatchStrictness::StructuredOnly).is_empty());
    }

    #[test]
    fn blank_sources_never_link() {
        let rows = vec![bom(""), bom("   ")];
        assert!(find_linked("ANY", &rows).is_empty());
        assert!(find_linked("", &[bom("ANY")]).is_empty());
    }

    #[test]
    fn nesting_reference_is_used_without_filename() {
        let row = BomRecord {
            nesting_dwg: "N-4411".to_string(),
            ..BomRecord::default()
        };
        assert_eq!(find_linked("N-4411.pdf", std::slice::from_ref(&row)).len(), 1);
    }
}
