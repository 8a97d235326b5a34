//! Test fixture loading utilities

use std::path::PathBuf;

use drawing_catalog::{load_records_from_path, BomRecord, CatalogRecord};

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Shared drawing dataset (script form, includes a duplicate filename)
#[allow(dead_code)]
pub fn load_catalog() -> Vec<CatalogRecord> {
    load_records_from_path(fixture_path("catalog.js")).expect("catalog fixture")
}

/// Fabrication dataset
#[allow(dead_code)]
pub fn load_fabrication() -> Vec<CatalogRecord> {
    load_records_from_path(fixture_path("fabrication.json")).expect("fabrication fixture")
}

/// BOM dataset
#[allow(dead_code)]
pub fn load_bom() -> Vec<BomRecord> {
    load_records_from_path(fixture_path("bom.json")).expect("bom fixture")
}

/// Build a record from block, module and filename
#[allow(dead_code)]
pub fn record(block: &str, module: &str, filename: &str) -> CatalogRecord {
    CatalogRecord::new(block, module, filename)
}
