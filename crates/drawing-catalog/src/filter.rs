//! Filter state for catalog panels and the consolidated table.
//!
//! Every filter value is a case-insensitive substring; an empty value leaves
//! its field unconstrained. `FilterState` is a plain value: operations take
//! it by value and hand back the updated state.

use serde::{Deserialize, Serialize};

use crate::domain::{CatalogRecord, Category, SearchField};

/// A case-insensitive substring filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextFilter(String);

impl TextFilter {
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The normalized needle
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, haystack: &str) -> bool {
        self.0.is_empty() || haystack.to_lowercase().contains(&self.0)
    }
}

/// Fields of a per-category panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelField {
    Block,
    Module,
    Search,
}

/// Fields of the consolidated table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableField {
    Category,
    Block,
    Module,
}

/// Which filter an update applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterTarget {
    Panel(Category, PanelField),
    Table(TableField),
}

/// Free-text filters of one category panel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelFilters {
    pub block: TextFilter,
    pub module: TextFilter,
    /// Sheet / free-text search over the category's search field
    pub search: TextFilter,
}

impl PanelFilters {
    pub fn new(block: &str, module: &str, search: &str) -> Self {
        Self {
            block: TextFilter::new(block),
            module: TextFilter::new(module),
            search: TextFilter::new(search),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.block.is_empty() && self.module.is_empty() && self.search.is_empty()
    }

    /// All three filters hold for `record` (AND).
    pub fn matches(&self, category: Category, record: &CatalogRecord) -> bool {
        let searched = match category.profile().search_field {
            SearchField::Filename => &record.filename,
            SearchField::NestingDwg => &record.nesting_dwg,
        };
        self.block.matches(&record.block)
            && self.module.matches(&record.module_no)
            && self.search.matches(searched)
    }

    fn field_mut(&mut self, field: PanelField) -> &mut TextFilter {
        match field {
            PanelField::Block => &mut self.block,
            PanelField::Module => &mut self.module,
            PanelField::Search => &mut self.search,
        }
    }
}

/// Filters of the consolidated table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableFilters {
    /// `None` shows every category
    pub category: Option<Category>,
    pub block: TextFilter,
    pub module: TextFilter,
}

impl TableFilters {
    pub fn is_empty(&self) -> bool {
        self.category.is_none() && self.block.is_empty() && self.module.is_empty()
    }

    pub fn matches_category(&self, record: &CatalogRecord) -> bool {
        match self.category {
            None => true,
            Some(category) => record.category == Some(category),
        }
    }

    pub fn matches(&self, record: &CatalogRecord) -> bool {
        self.matches_category(record)
            && self.block.matches(&record.block)
            && self.module.matches(&record.module_no)
    }
}

/// Session filter state: one panel per category plus the consolidated table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    panels: [PanelFilters; 3],
    pub table: TableFilters,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self, category: Category) -> &PanelFilters {
        &self.panels[category.index()]
    }

    /// Apply a filter value.
    ///
    /// For [`TableField::Category`] the value is a category key; an empty or
    /// unknown key shows every category.
    pub fn with_filter(mut self, target: FilterTarget, value: &str) -> Self {
        match target {
            FilterTarget::Panel(category, field) => {
                *self.panels[category.index()].field_mut(field) = TextFilter::new(value);
            }
            FilterTarget::Table(TableField::Category) => {
                self.table.category = Category::from_key(value);
            }
            FilterTarget::Table(TableField::Block) => {
                self.table.block = TextFilter::new(value);
            }
            FilterTarget::Table(TableField::Module) => {
                self.table.module = TextFilter::new(value);
            }
        }
        self
    }

    /// Replace a whole panel.
    pub fn with_panel(mut self, category: Category, filters: PanelFilters) -> Self {
        self.panels[category.index()] = filters;
        self
    }

    /// Reset one filter to unconstrained.
    pub fn cleared(self, target: FilterTarget) -> Self {
        self.with_filter(target, "")
    }

    /// Reset one panel.
    pub fn cleared_panel(self, category: Category) -> Self {
        self.with_panel(category, PanelFilters::default())
    }

    /// Reset everything.
    pub fn cleared_all(self) -> Self {
        Self::default()
    }
}
