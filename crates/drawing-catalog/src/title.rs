//! Display titles for catalog entries.

use drawing_identifiers::extract_sheet;

use crate::domain::CatalogRecord;

/// Revision tag of the current catalog edition.
pub const DEFAULT_REVISION_TAG: &str = "_R2";

/// Format `BLOCK-MODULE_NO-SHEET_R2` for a record.
///
/// The sheet comes from the filename (`000` when absent). The result is a
/// display label only and is never parsed back.
pub fn format_title(record: &CatalogRecord) -> String {
    format_title_with_tag(record, DEFAULT_REVISION_TAG)
}

/// Same as [`format_title`] with an explicit revision tag.
pub fn format_title_with_tag(record: &CatalogRecord, revision_tag: &str) -> String {
    format!(
        "{}-{}-{}{}",
        record.block,
        record.module_no,
        extract_sheet(&record.filename),
        revision_tag
    )
}
