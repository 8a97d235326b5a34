//! Drawing Catalog - Views, cross-referencing and faceted filtering for
//! engineering drawing datasets
//!
//! This crate turns flat drawing and bill-of-materials datasets into the
//! data behind a drawing catalog:
//!
//! - **View**: per-category drawing lists (assembly PDF, fabrication PDF,
//!   assembly CAD), deduplicated, filtered, block-sorted and grouped
//! - **Title**: compact display titles (`BLOCK-MODULE-SHEET_R2`)
//! - **Location**: local paths per category, CAD block subfolders, remote
//!   viewer URLs and `file:///` URLs
//! - **Matcher**: drawing-to-BOM cross-referencing on the structured
//!   filename identity with a substring fallback
//! - **Facets**: table filters with cross-dimension option availability
//! - **BOM**: weld/detail join, cell cleanup, column order, grouped views
//! - **Dataset**: JSON and generated-script dataset loading
//! - **Export**: CSV rendering of the active row set
//!
//! Filename grammar lives in the `drawing-identifiers` crate.
//!
//! # Data Flow
//!
//! ```text
//! dataset ─► CatalogRecord ─► build_view ─► ViewItem (header | entry)
//!                 │
//!                 └──► FacetSession ─► FacetSnapshot (rows + availability)
//!
//! BomRecord ◄── find_linked(drawing filename)
//! ```

pub mod bom;
pub mod collate;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod error;
pub mod export;
pub mod facets;
pub mod filter;
pub mod location;
pub mod matcher;
pub mod title;
pub mod view;

pub use bom::{
    clean_row, clean_table, detect_table_kind, group_views, join_weld_details, reorder_columns,
    GroupView, JoinOutcome, Table, TableKind,
};
pub use collate::locale_cmp;
pub use config::{CatalogConfig, MatchConfig, PathConfig, RemoteConfig, RevisionRewrite};
pub use dataset::{load_records, load_records_from_path};
pub use domain::{
    with_category, BomRecord, CatalogRecord, Category, CategoryProfile, LocationStrategy,
    SearchField, SourceKind,
};
pub use error::{CatalogError, ConfigError, DatasetError, Result};
pub use export::{export_file_name, ExportTable};
pub use facets::{
    compute_facet_availability, FacetAvailability, FacetOption, FacetSession, FacetSnapshot,
};
pub use filter::{
    FilterState, FilterTarget, PanelField, PanelFilters, TableField, TableFilters, TextFilter,
};
pub use location::{cad_folder, remote_url, resolve_location, to_file_url};
pub use matcher::{find_linked, find_linked_with, LinkKey, MatchStrictness};
pub use title::{format_title, format_title_with_tag};
pub use view::{build_view, entry_count, CatalogSources, ViewEntry, ViewItem};

pub use drawing_identifiers::{extract_sheet, extract_structured, StructuredIdentifier};
