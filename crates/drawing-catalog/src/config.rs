//! Configuration for drawing-catalog
//!
//! Base locations, the CAD block folder table, the remote mirror used when a
//! local file is missing, and cross-reference strictness.
//!
//! ```toml
//! revision_tag = "_R2"
//!
//! [paths]
//! assembly_pdf = "D:/balwin2/1. 조립도/REV.2/PDF"
//! assembly_cad = "D:/balwin2/1. 조립도/REV.2/CAD"
//! fabrication_pdf = "D:/balwin2/2. 가공도/최종"
//!
//! [cad_folders]
//! A1 = "A1-28ea"
//!
//! [matching]
//! strictness = "substring"
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::Category;
use crate::error::ConfigError;
use crate::matcher::MatchStrictness;

/// Catalog configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Suffix appended to formatted titles for the current catalog edition
    pub revision_tag: String,
    /// Filename revision rewrite applied to assembly drawings
    pub assembly_revision: RevisionRewrite,
    /// Local base locations per category
    pub paths: PathConfig,
    /// Block -> CAD subfolder lookup
    pub cad_folders: BTreeMap<String, String>,
    /// Remote mirror for files missing locally
    pub remote: RemoteConfig,
    /// Cross-reference matching
    pub matching: MatchConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            revision_tag: "_R2".to_string(),
            assembly_revision: RevisionRewrite::default(),
            paths: PathConfig::default(),
            cad_folders: default_cad_folders(),
            remote: RemoteConfig::default(),
            matching: MatchConfig::default(),
        }
    }
}

fn default_cad_folders() -> BTreeMap<String, String> {
    let mut folders = BTreeMap::new();
    folders.insert("A1".to_string(), "A1-28ea".to_string());
    folders
}

/// Rewrite of a trailing filename revision, e.g. `_01` -> `_02`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRewrite {
    pub from: String,
    pub to: String,
}

impl Default for RevisionRewrite {
    fn default() -> Self {
        Self {
            from: "_01".to_string(),
            to: "_02".to_string(),
        }
    }
}

/// Local base locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub assembly_pdf: String,
    pub assembly_cad: String,
    pub fabrication_pdf: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            assembly_pdf: "D:/balwin2/1. 조립도/REV.2/PDF".to_string(),
            assembly_cad: "D:/balwin2/1. 조립도/REV.2/CAD".to_string(),
            fabrication_pdf: "D:/balwin2/2. 가공도/최종".to_string(),
        }
    }
}

impl PathConfig {
    /// Base location for a category
    pub fn base(&self, category: Category) -> &str {
        match category {
            Category::AssemblyPdf => &self.assembly_pdf,
            Category::AssemblyCad => &self.assembly_cad,
            Category::FabricationPdf => &self.fabrication_pdf,
        }
    }
}

/// Remote mirror configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Public base URL; empty disables the remote fallback
    pub base_url: String,
    pub assembly_pdf: String,
    pub assembly_cad: String,
    pub fabrication_pdf: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            assembly_pdf: "balwin2/조립도/REV.2".to_string(),
            assembly_cad: "balwin2/조립도/REV.2".to_string(),
            fabrication_pdf: "balwin2/가공도/최종".to_string(),
        }
    }
}

impl RemoteConfig {
    pub fn is_enabled(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Remote prefix for a category
    pub fn prefix(&self, category: Category) -> &str {
        match category {
            Category::AssemblyPdf => &self.assembly_pdf,
            Category::AssemblyCad => &self.assembly_cad,
            Category::FabricationPdf => &self.fabrication_pdf,
        }
    }
}

/// Cross-reference matching configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub strictness: MatchStrictness,
}

impl CatalogConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.revision_tag.trim().is_empty() {
            return Err(ConfigError::MissingValue("revision_tag".to_string()));
        }

        for category in Category::ALL {
            if self.paths.base(category).trim().is_empty() {
                return Err(ConfigError::MissingValue(format!("paths.{}", category)));
            }
        }

        if self.assembly_revision.from.is_empty() {
            return Err(ConfigError::MissingValue("assembly_revision.from".to_string()));
        }
        if self.assembly_revision.from == self.assembly_revision.to {
            return Err(ConfigError::InvalidValue {
                field: "assembly_revision".to_string(),
                reason: "from and to must differ".to_string(),
            });
        }

        if let Some((block, _)) = self.cad_folders.iter().find(|(_, f)| f.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: format!("cad_folders.{}", block),
                reason: "folder name is empty".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CatalogConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.revision_tag, "_R2");
        assert_eq!(config.cad_folders.get("A1").map(String::as_str), Some("A1-28ea"));
        assert!(!config.remote.is_enabled());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = CatalogConfig::from_toml(
            r#"
            [paths]
            assembly_pdf = "/srv/asm"

            [cad_folders]
            B2 = "B2-10ea"

            [matching]
            strictness = "structured-only"
            "#,
        )
        .unwrap();
        assert_eq!(config.paths.assembly_pdf, "/srv/asm");
        assert_eq!(config.paths.fabrication_pdf, PathConfig::default().fabrication_pdf);
        assert_eq!(config.cad_folders.len(), 1);
        assert_eq!(config.matching.strictness, MatchStrictness::StructuredOnly);
        assert_eq!(config.revision_tag, "_R2");
    }

    #[test]
    fn toml_roundtrip() {
        let config = CatalogConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(CatalogConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn json_roundtrip() {
        let config = CatalogConfig::default();
        let text = config.to_json().unwrap();
        assert_eq!(CatalogConfig::from_json(&text).unwrap(), config);
    }

    #[test]
    fn validate_rejects_empty_base() {
        let mut config = CatalogConfig::default();
        config.paths.assembly_cad = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingValue(field)) if field == "paths.assembly-cad"
        ));
    }

    #[test]
    fn validate_rejects_identity_rewrite() {
        let mut config = CatalogConfig::default();
        config.assembly_revision.to = "_01".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(matches!(
            CatalogConfig::from_toml("revision_tag = "),
            Err(ConfigError::Toml(_))
        ));
    }
}
