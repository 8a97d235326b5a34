//! Error types for drawing-catalog
//!
//! The cross-reference and filter operations never fail; errors only arise
//! at the edges where configuration and datasets are read.

use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Main error type for catalog operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Dataset loading errors
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(String),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(String),

    /// A required value is empty
    #[error("Missing value: {0}")]
    MissingValue(String),

    /// A value is present but unusable
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Dataset-specific errors
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Payload is not valid JSON
    #[error("Malformed JSON: {0}")]
    Malformed(String),

    /// Payload parsed but is not an array of rows
    #[error("Expected an array of rows, found {0}")]
    NotAnArray(String),

    /// A table lacks a column the operation needs
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Toml(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err.to_string())
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(err: serde_json::Error) -> Self {
        DatasetError::Malformed(err.to_string())
    }
}
