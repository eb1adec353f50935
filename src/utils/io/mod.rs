//! IO utilities for population tables
//!
//! The output format follows the file extension unless chosen explicitly.

pub mod csv;
pub mod parquet;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};

/// File stem of the output when no path is given
pub const DEFAULT_OUTPUT_STEM: &str = "cardiovascular_dataset_senegal";

// Re-export commonly used functions for convenience
pub use self::csv::write_csv;
pub use self::parquet::{read_parquet, write_parquet};

/// File format of a written population
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    /// Infer the format from a path extension, `None` for unknown extensions
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "parquet" | "pq" => Some(Self::Parquet),
            _ => None,
        }
    }

    /// File extension written for this format
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// Write a batch to `path` in this format
    pub fn write(self, batch: &RecordBatch, path: &Path) -> Result<()> {
        match self {
            Self::Csv => write_csv(batch, path),
            Self::Parquet => write_parquet(batch, path),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Parquet => write!(f, "parquet"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = GeneratorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "parquet" => Ok(Self::Parquet),
            other => Err(GeneratorError::config(format!(
                "unknown output format '{other}', expected csv or parquet"
            ))),
        }
    }
}

/// Write a batch, inferring the format from the extension and falling back to CSV
pub fn write_population(batch: &RecordBatch, path: &Path) -> Result<OutputFormat> {
    let format = OutputFormat::from_path(path).unwrap_or_default();
    format.write(batch, path)?;
    Ok(format)
}

/// Pick the output path and format from optional user choices
///
/// Without a path, the default file name takes the extension of the chosen
/// format. Without a format, it is inferred from the path and falls back to CSV.
/// A path whose extension names another format is kept, with a warning.
///
/// # Arguments
/// * `output` - Output path given by the user, if any
/// * `format` - Output format given by the user, if any
///
/// # Returns
/// The path to write and the format to write it in
#[must_use]
pub fn resolve_output(output: Option<&Path>, format: Option<OutputFormat>) -> (PathBuf, OutputFormat) {
    match (output, format) {
        (None, format) => {
            let format = format.unwrap_or_default();
            let path = PathBuf::from(DEFAULT_OUTPUT_STEM).with_extension(format.extension());
            (path, format)
        }
        (Some(path), None) => (
            path.to_path_buf(),
            OutputFormat::from_path(path).unwrap_or_default(),
        ),
        (Some(path), Some(format)) => {
            if let Some(inferred) = OutputFormat::from_path(path) {
                if inferred != format {
                    log::warn!(
                        "Writing {format} to {} although its extension suggests {inferred}",
                        path.display()
                    );
                }
            }
            (path.to_path_buf(), format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("out.csv")), Some(OutputFormat::Csv));
        assert_eq!(
            OutputFormat::from_path(Path::new("out.PARQUET")),
            Some(OutputFormat::Parquet)
        );
        assert_eq!(OutputFormat::from_path(Path::new("out.txt")), None);
        assert_eq!(OutputFormat::from_path(Path::new("out")), None);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("Parquet".parse::<OutputFormat>().unwrap(), OutputFormat::Parquet);
        assert!("xlsx".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_default_output_follows_format() {
        let (path, format) = resolve_output(None, Some(OutputFormat::Parquet));
        assert_eq!(path, PathBuf::from("cardiovascular_dataset_senegal.parquet"));
        assert_eq!(format, OutputFormat::Parquet);

        let (path, format) = resolve_output(None, None);
        assert_eq!(path, PathBuf::from("cardiovascular_dataset_senegal.csv"));
        assert_eq!(format, OutputFormat::Csv);
    }

    #[test]
    fn test_explicit_output_is_kept() {
        let (path, format) = resolve_output(Some(Path::new("out.pq")), None);
        assert_eq!(path, PathBuf::from("out.pq"));
        assert_eq!(format, OutputFormat::Parquet);

        let (path, format) = resolve_output(Some(Path::new("out.csv")), Some(OutputFormat::Parquet));
        assert_eq!(path, PathBuf::from("out.csv"));
        assert_eq!(format, OutputFormat::Parquet);
    }
}
