//! Error handling for the population generator.

use std::io;

use arrow_schema::ArrowError;
use parquet::errors::ParquetError;

/// Specialized error type for population generation
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Invalid generator configuration, raised before any sampling begins
    #[error("Configuration error: {0}")]
    Config(String),

    /// A sampling distribution could not be constructed
    #[error("Distribution error: {0}")]
    Distribution(String),

    /// Error building or reading Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error writing Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error opening or writing a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing a JSON configuration or report
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error converting a record batch into typed rows
    #[error("Serialization error: {0}")]
    Serde(String),

    /// A generated population violates one of its invariants
    #[error("Validation error: {0}")]
    Validation(String),

    /// A column expected by a stage is missing from its input batch
    #[error("Column not found: {column}")]
    ColumnNotFound { column: String },

    /// A column exists but has an unexpected Arrow type
    #[error("Invalid data type for column {column}: expected {expected}")]
    InvalidDataType { column: String, expected: String },
}

impl GeneratorError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a distribution error from any displayable source
    pub fn distribution<E: std::fmt::Display>(context: &str, error: E) -> Self {
        Self::Distribution(format!("{context}: {error}"))
    }
}

impl From<serde_arrow::Error> for GeneratorError {
    fn from(error: serde_arrow::Error) -> Self {
        Self::Serde(error.to_string())
    }
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;
