//! Synthetic population generation
//!
//! The population is produced by five stages run in a fixed order over one
//! seeded random generator: demographics, clinical measurements, lifestyle,
//! medical history and consultation date. Every stage reads covariates from
//! the columns of earlier stages and appends its own block of columns.

pub mod builder;
pub mod clinical;
pub mod demographics;
pub mod lifestyle;
pub mod medical_history;
pub mod stage;
pub mod statistics;
pub mod temporal;
pub mod validation;

// Re-export commonly used items
pub use builder::{Population, PopulationGenerator, generate_population};
pub use clinical::ClinicalGenerator;
pub use demographics::DemographicsGenerator;
pub use lifestyle::LifestyleGenerator;
pub use medical_history::MedicalHistoryGenerator;
pub use stage::GenerationStage;
pub use statistics::{PopulationStatistics, PopulationStats, PrevalenceComparison, PrevalenceTargets};
pub use temporal::TemporalAnnotator;
pub use validation::{PopulationValidator, ValidationReport, Violation, validate_population};
