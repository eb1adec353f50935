//! Synthetic cardiovascular population generator
//!
//! Produces a reproducible table of fictitious Senegalese adults with
//! demographic, clinical, lifestyle and medical-history attributes whose
//! marginal prevalences follow national survey figures. The same seed and
//! configuration always yield the same table.
//!
//! ```no_run
//! use cardio_synth::{GeneratorConfig, PopulationGenerator};
//!
//! let config = GeneratorConfig::builder().n_individuals(1_000).seed(42).build();
//! let population = PopulationGenerator::new(config)?.generate()?;
//! assert_eq!(population.len(), 1_000);
//! # Ok::<(), cardio_synth::GeneratorError>(())
//! ```

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod sampling;
pub mod schema;
pub mod utils;

// Re-export the most common types for easier use
pub use algorithm::population::{
    Population, PopulationGenerator, PopulationStatistics, PopulationStats, PrevalenceTargets,
    ValidationReport, generate_population, validate_population,
};
pub use config::{GeneratorConfig, PopulationParameters};
pub use error::{GeneratorError, Result};
pub use models::CardioRecord;
pub use utils::{OutputFormat, write_csv, write_parquet};

// Arrow types
pub use arrow::record_batch::RecordBatch;
