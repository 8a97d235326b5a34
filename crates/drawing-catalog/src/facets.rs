//! Facet availability for the consolidated table.
//!
//! A block option stays selectable when some row with that block passes the
//! category and module filters; a module option when some row with that
//! module passes the category and block filters. Each facet ignores its own
//! selection, so picking a module never leaves only dead block options and
//! vice versa.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::collate::locale_cmp;
use crate::domain::CatalogRecord;
use crate::filter::{FilterState, FilterTarget, TableFilters};

/// A selectable facet value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub available: bool,
}

/// Candidate and available values of both facets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FacetAvailability {
    /// Every non-empty block in the base dataset
    pub candidate_blocks: BTreeSet<String>,
    /// Every non-empty module in the base dataset
    pub candidate_modules: BTreeSet<String>,
    pub available_blocks: BTreeSet<String>,
    pub available_modules: BTreeSet<String>,
}

impl FacetAvailability {
    pub fn is_block_available(&self, block: &str) -> bool {
        self.available_blocks.contains(block)
    }

    pub fn is_module_available(&self, module: &str) -> bool {
        self.available_modules.contains(module)
    }

    /// Block options in display order.
    pub fn block_options(&self) -> Vec<FacetOption> {
        options(&self.candidate_blocks, &self.available_blocks)
    }

    /// Module options in display order.
    pub fn module_options(&self) -> Vec<FacetOption> {
        options(&self.candidate_modules, &self.available_modules)
    }
}

fn options(candidates: &BTreeSet<String>, available: &BTreeSet<String>) -> Vec<FacetOption> {
    let mut options: Vec<FacetOption> = candidates
        .iter()
        .map(|value| FacetOption {
            value: value.clone(),
            available: available.contains(value),
        })
        .collect();
    options.sort_by(|a, b| locale_cmp(&a.value, &b.value));
    options
}

/// Compute which block and module values remain selectable.
pub fn compute_facet_availability(
    base: &[CatalogRecord],
    filters: &TableFilters,
) -> FacetAvailability {
    let mut availability = FacetAvailability::default();

    for record in base {
        let has_block = !record.block.is_empty();
        let has_module = !record.module_no.is_empty();

        if has_block {
            availability.candidate_blocks.insert(record.block.clone());
        }
        if has_module {
            availability.candidate_modules.insert(record.module_no.clone());
        }

        if !filters.matches_category(record) {
            continue;
        }
        if has_block && filters.module.matches(&record.module_no) {
            availability.available_blocks.insert(record.block.clone());
        }
        if has_module && filters.block.matches(&record.block) {
            availability.available_modules.insert(record.module_no.clone());
        }
    }

    availability
}

/// Result of a filter change on the consolidated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetSnapshot {
    /// Indices into the base dataset of the rows passing every filter
    pub rows: Vec<usize>,
    pub total: usize,
    pub availability: FacetAvailability,
}

impl FacetSnapshot {
    pub fn count(&self) -> usize {
        self.rows.len()
    }
}

/// Filter session over a read-only base dataset.
///
/// Holds the session's [`FilterState`]; every change recomputes the
/// consolidated table's rows and facet availability.
#[derive(Debug, Clone)]
pub struct FacetSession<'a> {
    base: &'a [CatalogRecord],
    state: FilterState,
}

impl<'a> FacetSession<'a> {
    pub fn new(base: &'a [CatalogRecord]) -> Self {
        Self::with_state(base, FilterState::default())
    }

    pub fn with_state(base: &'a [CatalogRecord], state: FilterState) -> Self {
        Self { base, state }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn into_state(self) -> FilterState {
        self.state
    }

    /// Apply a filter value and recompute.
    pub fn set_filter(&mut self, target: FilterTarget, value: &str) -> FacetSnapshot {
        self.state = std::mem::take(&mut self.state).with_filter(target, value);
        self.snapshot()
    }

    /// Clear one filter and recompute.
    pub fn clear_filter(&mut self, target: FilterTarget) -> FacetSnapshot {
        self.state = std::mem::take(&mut self.state).cleared(target);
        self.snapshot()
    }

    /// Clear every filter and recompute.
    pub fn clear_all(&mut self) -> FacetSnapshot {
        self.state = FilterState::default();
        self.snapshot()
    }

    /// Current rows and availability.
    pub fn snapshot(&self) -> FacetSnapshot {
        let filters = &self.state.table;
        let rows: Vec<usize> = self
            .base
            .iter()
            .enumerate()
            .filter(|(_, record)| filters.matches(record))
            .map(|(i, _)| i)
            .collect();
        let availability = compute_facet_availability(self.base, filters);

        debug!(
            "Table filter: {} of {} rows, {} blocks and {} modules available",
            rows.len(),
            self.base.len(),
            availability.available_blocks.len(),
            availability.available_modules.len()
        );

        FacetSnapshot {
            rows,
            total: self.base.len(),
            availability,
        }
    }

    /// Rows passing the table filters, for export.
    pub fn active_rows(&self) -> Vec<&'a CatalogRecord> {
        let filters = &self.state.table;
        self.base.iter().filter(|r| filters.matches(r)).collect()
    }
}
