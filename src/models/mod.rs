//! Domain models of the synthetic population
//!
//! Categorical attributes are strongly typed enums carrying their survey
//! labels; [`CardioRecord`] is the typed view of one generated row.

pub mod record;
pub mod types;

pub use record::{CardioRecord, records_from_batch, records_to_batch};
pub use types::{
    ChestPainType, EducationLevel, Profession, Region, RiskCategory, Season, Sex, Urbanicity,
};
