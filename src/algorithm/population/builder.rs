//! Population generation pipeline
//!
//! Runs the five generation stages in order over a single seeded random
//! generator. Each stage receives the previous stage's batch and returns a
//! new, wider batch.

use std::time::Instant;

use arrow::record_batch::RecordBatch;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::GeneratorConfig;
use crate::error::Result;
use crate::models::record::{CardioRecord, records_from_batch};
use crate::utils::arrow::empty_batch;
use crate::utils::logging::{create_stage_progress_bar, finish_progress_bar};

use super::clinical::ClinicalGenerator;
use super::demographics::DemographicsGenerator;
use super::lifestyle::LifestyleGenerator;
use super::medical_history::MedicalHistoryGenerator;
use super::stage::GenerationStage;
use super::statistics::{PopulationStatistics, PopulationStats};
use super::temporal::TemporalAnnotator;
use super::validation::{PopulationValidator, ValidationReport};

/// A generated synthetic population
#[derive(Debug, Clone)]
pub struct Population {
    /// Configuration used to generate this population
    pub config: GeneratorConfig,
    /// The complete population table
    pub batch: RecordBatch,
}

impl Population {
    /// Number of individuals
    #[must_use]
    pub fn len(&self) -> usize {
        self.batch.num_rows()
    }

    /// Whether the population has no individuals
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    /// Aggregate statistics of the population
    pub fn statistics(&self) -> Result<PopulationStats> {
        PopulationStatistics::calculate(&self.batch)
    }

    /// Check every row against the population invariants
    pub fn validate(&self) -> Result<ValidationReport> {
        PopulationValidator::new(self.config.consultation_start, self.config.consultation_end)
            .validate(&self.batch)
    }

    /// Typed row view of the population
    pub fn records(&self) -> Result<Vec<CardioRecord>> {
        records_from_batch(&self.batch)
    }
}

/// Generator running the demographics, clinical, lifestyle, medical history
/// and temporal stages in order
pub struct PopulationGenerator {
    config: GeneratorConfig,
    stages: Vec<Box<dyn GenerationStage>>,
}

impl std::fmt::Debug for PopulationGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PopulationGenerator")
            .field("config", &self.config)
            .field("stages", &self.stage_names())
            .finish()
    }
}

impl PopulationGenerator {
    /// Validate the configuration and build every stage
    ///
    /// Fails with a configuration error before any sampling when the
    /// population size is zero or a probability parameter is invalid.
    ///
    /// # Arguments
    /// * `config` - Population size, seed, consultation window and sampling parameters
    ///
    /// # Returns
    /// A generator holding the five stages in execution order
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;

        let params = &config.parameters;
        let stages: Vec<Box<dyn GenerationStage>> = vec![
            Box::new(DemographicsGenerator::new(params)?),
            Box::new(ClinicalGenerator::new()),
            Box::new(LifestyleGenerator::new(params.lifestyle.clone())),
            Box::new(MedicalHistoryGenerator::new(
                params.family_history_rate,
                params.treatment.clone(),
            )?),
            Box::new(TemporalAnnotator::new(
                config.consultation_start,
                config.consultation_end,
            )?),
        ];

        Ok(Self { config, stages })
    }

    /// Configuration of this generator
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Names of the stages in execution order
    #[must_use]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|stage| stage.name()).collect()
    }

    /// Generate the population from the configured seed
    ///
    /// The same configuration always yields the same table.
    ///
    /// # Returns
    /// The generated population together with the configuration that produced it
    pub fn generate(&self) -> Result<Population> {
        log::info!("Starting synthetic population generation");
        log::info!("{}", self.config);

        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let batch = self.generate_with_rng(&mut rng)?;

        Ok(Population {
            config: self.config.clone(),
            batch,
        })
    }

    /// Run every stage with an explicitly provided generator
    pub fn generate_with_rng(&self, rng: &mut StdRng) -> Result<RecordBatch> {
        let start = Instant::now();
        let total_steps = self.stages.len();
        let pb = create_stage_progress_bar(
            total_steps as u64,
            Some("Generating population"),
            self.config.show_progress,
        );

        let mut batch = empty_batch(self.config.n_individuals)?;
        for (step, stage) in self.stages.iter().enumerate() {
            log::info!(
                "[Step {}/{}] Generating {} data",
                step + 1,
                total_steps,
                stage.name()
            );
            pb.set_message(stage.name());

            let stage_start = Instant::now();
            batch = stage.generate(&batch, rng)?;
            log::debug!(
                "{} stage produced {} columns in {:?}",
                stage.name(),
                batch.num_columns(),
                stage_start.elapsed()
            );
            pb.inc(1);
        }
        finish_progress_bar(&pb, Some("Population generated"));

        log::info!(
            "Generated {} individuals with {} variables in {:?}",
            batch.num_rows(),
            batch.num_columns(),
            start.elapsed()
        );
        Ok(batch)
    }
}

/// Generate a population of `n_individuals` with default parameters
pub fn generate_population(n_individuals: usize, seed: u64) -> Result<RecordBatch> {
    let config = GeneratorConfig::builder()
        .n_individuals(n_individuals)
        .seed(seed)
        .build();
    Ok(PopulationGenerator::new(config)?.generate()?.batch)
}
