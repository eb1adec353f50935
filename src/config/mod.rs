//! Configuration for the population generator.

pub mod parameters;

use std::fmt;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GeneratorError, Result};

pub use parameters::{AgeBands, LifestyleRates, PopulationParameters, TreatmentRates};

/// Default number of synthetic individuals
pub const DEFAULT_POPULATION_SIZE: usize = 1_000_000;

/// Default seed of the shared random generator
pub const DEFAULT_SEED: u64 = 42;

/// First day of the consultation window
#[must_use]
pub fn default_consultation_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or(NaiveDate::MIN)
}

/// Last day of the consultation window (inclusive)
#[must_use]
pub fn default_consultation_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN)
}

/// Configuration for the population generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of synthetic individuals to generate
    pub n_individuals: usize,
    /// Seed of the random generator threaded through every stage
    pub seed: u64,
    /// First possible consultation date
    pub consultation_start: NaiveDate,
    /// Last possible consultation date (inclusive)
    pub consultation_end: NaiveDate,
    /// Whether to draw a progress bar over the stages
    pub show_progress: bool,
    /// Sampling probabilities
    pub parameters: PopulationParameters,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            n_individuals: DEFAULT_POPULATION_SIZE,
            seed: DEFAULT_SEED,
            consultation_start: default_consultation_start(),
            consultation_end: default_consultation_end(),
            show_progress: false,
            parameters: PopulationParameters::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a generator configuration
    #[must_use]
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::new()
    }

    /// Load a configuration from a JSON file; absent fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        log::debug!("Loaded generator configuration from {}", path.display());
        Ok(config)
    }

    /// Check the configuration before any sampling takes place
    pub fn validate(&self) -> Result<()> {
        if self.n_individuals == 0 {
            return Err(GeneratorError::config(
                "population size must be greater than zero",
            ));
        }
        if i32::try_from(self.n_individuals).is_err() {
            return Err(GeneratorError::config(format!(
                "population size {} exceeds the supported maximum of {}",
                self.n_individuals,
                i32::MAX
            )));
        }
        if self.consultation_end < self.consultation_start {
            return Err(GeneratorError::config(format!(
                "consultation window is inverted: {} > {}",
                self.consultation_start, self.consultation_end
            )));
        }
        self.parameters.validate()
    }
}

impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generator Configuration:")?;
        writeln!(f, "  Individuals: {}", self.n_individuals)?;
        writeln!(f, "  Seed: {}", self.seed)?;
        writeln!(
            f,
            "  Consultation Window: {} to {}",
            self.consultation_start, self.consultation_end
        )?;
        writeln!(f, "  Show Progress: {}", self.show_progress)?;
        Ok(())
    }
}

/// Builder for constructing a generator configuration
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfigBuilder {
    config: GeneratorConfig,
}

impl GeneratorConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GeneratorConfig::default(),
        }
    }

    /// Set the number of individuals
    #[must_use]
    pub fn n_individuals(mut self, n: usize) -> Self {
        self.config.n_individuals = n;
        self
    }

    /// Set the random seed
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the inclusive consultation window
    #[must_use]
    pub fn consultation_window(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.config.consultation_start = start;
        self.config.consultation_end = end;
        self
    }

    /// Set whether to draw a progress bar
    #[must_use]
    pub fn show_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Set the sampling parameters
    #[must_use]
    pub fn parameters(mut self, parameters: PopulationParameters) -> Self {
        self.config.parameters = parameters;
        self
    }

    /// Build the generator configuration
    #[must_use]
    pub fn build(self) -> GeneratorConfig {
        self.config
    }
}
