//! Per-category catalog views.
//!
//! A view is the render-ready list for one category panel: rows selected for
//! the category, filtered by the panel filters, sorted by block, resolved to
//! file locations and grouped under one header per block.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crate::collate::locale_cmp;
use crate::config::CatalogConfig;
use crate::domain::{CatalogRecord, Category, LocationStrategy, SourceKind};
use crate::filter::PanelFilters;
use crate::location::resolve_location;
use crate::title::format_title_with_tag;
use drawing_identifiers::extract_sheet;

/// Source datasets a view is built from.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogSources<'a> {
    /// Shared drawing dataset used by both assembly categories
    pub drawings: &'a [CatalogRecord],
    /// Dedicated fabrication dataset
    pub fabrication: &'a [CatalogRecord],
}

impl<'a> CatalogSources<'a> {
    pub fn new(drawings: &'a [CatalogRecord], fabrication: &'a [CatalogRecord]) -> Self {
        Self {
            drawings,
            fabrication,
        }
    }

    /// Rows for a category with their index in the source dataset.
    ///
    /// Shared rows are deduplicated by filename, first occurrence wins.
    /// Rows with an empty filename are not deduplicated.
    pub fn rows_for(&self, category: Category) -> Vec<(usize, &'a CatalogRecord)> {
        match category.profile().source {
            SourceKind::Fabrication => self.fabrication.iter().enumerate().collect(),
            SourceKind::SharedDeduplicated => {
                let mut seen: HashSet<&str> = HashSet::new();
                self.drawings
                    .iter()
                    .enumerate()
                    .filter(|(_, r)| r.filename.is_empty() || seen.insert(r.filename.as_str()))
                    .collect()
            }
        }
    }

    /// Base rows of the consolidated table: every category's rows, tagged
    /// with that category, in category order.
    ///
    /// A shared drawing appears once under each assembly category.
    pub fn consolidated(&self) -> Vec<CatalogRecord> {
        Category::ALL
            .iter()
            .flat_map(|&category| {
                self.rows_for(category)
                    .into_iter()
                    .map(move |(_, record)| record.clone().with_category(category))
            })
            .collect()
    }
}

/// One drawing in a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewEntry {
    pub category: Category,
    /// Index of the row in its source dataset
    pub source_index: usize,
    pub block: String,
    pub module_no: String,
    pub filename: String,
    pub sheet: String,
    pub title: String,
    /// Resolved local path; `None` for rows without a filename
    pub location: Option<String>,
    pub label: &'static str,
    pub icon: &'static str,
}

/// An item of a rendered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewItem {
    /// Start of a block group
    GroupHeader { block: String, count: usize },
    Entry(ViewEntry),
}

impl ViewItem {
    pub fn as_entry(&self) -> Option<&ViewEntry> {
        match self {
            ViewItem::Entry(entry) => Some(entry),
            ViewItem::GroupHeader { .. } => None,
        }
    }
}

/// Build the view for one category.
///
/// Pure in its inputs: calling it twice with the same arguments yields the
/// same list. An empty source or a filter that excludes everything yields
/// an empty list.
pub fn build_view(
    category: Category,
    sources: &CatalogSources<'_>,
    filters: &PanelFilters,
    config: &CatalogConfig,
) -> Vec<ViewItem> {
    let profile = category.profile();
    let candidates = sources.rows_for(category);
    let candidate_count = candidates.len();

    let mut rows: Vec<(usize, &CatalogRecord)> = candidates
        .into_iter()
        .filter(|(_, record)| filters.matches(category, record))
        .collect();

    // stable: equal blocks keep source order
    rows.sort_by(|(_, a), (_, b)| locale_cmp(&a.block, &b.block));

    let mut excluded = 0usize;
    let entries: Vec<ViewEntry> = rows
        .into_iter()
        .filter_map(|(source_index, record)| {
            let location = resolve_location(category, record, config);
            if location.is_none() && profile.location == LocationStrategy::NestingToken {
                excluded += 1;
                return None;
            }
            Some(ViewEntry {
                category,
                source_index,
                block: record.block.clone(),
                module_no: record.module_no.clone(),
                filename: record.filename.clone(),
                sheet: extract_sheet(&record.filename),
                title: format_title_with_tag(record, &config.revision_tag),
                location,
                label: profile.label,
                icon: profile.icon,
            })
        })
        .collect();

    if excluded > 0 {
        warn!(
            "{}: {} rows without a nesting reference left out of the view",
            category, excluded
        );
    }

    let items = group_by_block(entries);
    debug!(
        "{} view: {} candidate rows, {} items",
        category,
        candidate_count,
        items.len()
    );
    items
}

/// Number of drawing entries (headers excluded) in a view.
pub fn entry_count(items: &[ViewItem]) -> usize {
    items.iter().filter(|item| item.as_entry().is_some()).count()
}

/// Insert a header before each run of equal blocks.
fn group_by_block(entries: Vec<ViewEntry>) -> Vec<ViewItem> {
    let mut items = Vec::with_capacity(entries.len() + 8);
    let mut current: Option<(String, usize)> = None;

    for entry in entries {
        let same_block = matches!(&current, Some((block, _)) if *block == entry.block);
        if !same_block {
            current = Some((entry.block.clone(), items.len()));
            items.push(ViewItem::GroupHeader {
                block: entry.block.clone(),
                count: 0,
            });
        }

        if let Some((_, at)) = current {
            if let ViewItem::GroupHeader { count, .. } = &mut items[at] {
                *count += 1;
            }
        }
        items.push(ViewItem::Entry(entry));
    }

    items
}
