//! Drawing categories and their per-category behavior.

use serde::{Deserialize, Serialize};

/// The closed set of drawing categories in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    AssemblyPdf,
    FabricationPdf,
    AssemblyCad,
}

/// Where a category's rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The shared drawing dataset, deduplicated by filename.
    SharedDeduplicated,
    /// The dedicated, pre-filtered fabrication dataset.
    Fabrication,
}

/// Record field matched by a panel's free-text search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Filename,
    NestingDwg,
}

/// How a record is turned into a file location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationStrategy {
    /// Revised filename under the category base, optionally inside a
    /// per-block subfolder.
    RevisedFilename { block_folders: bool },
    /// Leading token of the nesting reference under the category base.
    /// Rows without a token are dropped from the view.
    NestingToken,
}

/// Static description of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryProfile {
    /// Stable key used in datasets and URLs
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
    /// Icon name for presentation
    pub icon: &'static str,
    /// File extension, without the dot
    pub extension: &'static str,
    /// Folder name that marks this category's files on disk
    pub folder_marker: &'static str,
    pub source: SourceKind,
    pub search_field: SearchField,
    pub location: LocationStrategy,
}

const PROFILES: [CategoryProfile; 3] = [
    CategoryProfile {
        key: "assembly-pdf",
        label: "조립도 PDF",
        icon: "file-pdf",
        extension: "pdf",
        folder_marker: "1. 조립도",
        source: SourceKind::SharedDeduplicated,
        search_field: SearchField::Filename,
        location: LocationStrategy::RevisedFilename { block_folders: false },
    },
    CategoryProfile {
        key: "fabrication-pdf",
        label: "가공도 PDF",
        icon: "file-pdf",
        extension: "pdf",
        folder_marker: "2. 가공도",
        source: SourceKind::Fabrication,
        search_field: SearchField::NestingDwg,
        location: LocationStrategy::NestingToken,
    },
    CategoryProfile {
        key: "assembly-cad",
        label: "조립도 CAD",
        icon: "file-cad",
        extension: "dwg",
        folder_marker: "1. 조립도",
        source: SourceKind::SharedDeduplicated,
        search_field: SearchField::Filename,
        location: LocationStrategy::RevisedFilename { block_folders: true },
    },
];

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 3] = [
        Category::AssemblyPdf,
        Category::FabricationPdf,
        Category::AssemblyCad,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::AssemblyPdf => 0,
            Self::FabricationPdf => 1,
            Self::AssemblyCad => 2,
        }
    }

    /// Static behavior for this category.
    pub fn profile(self) -> &'static CategoryProfile {
        &PROFILES[self.index()]
    }

    pub fn key(self) -> &'static str {
        self.profile().key
    }

    /// Parse a category from its key (`assembly-pdf`, ...), case-insensitively.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(key))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
