//! Generation stage abstraction
//!
//! A stage reads covariates from the batch produced by its predecessor and
//! returns a new batch extended with its own columns. Stages never modify or
//! drop columns they did not create.

use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;

use crate::error::Result;

/// One step of the population generation pipeline
pub trait GenerationStage {
    /// Human readable name used in logs and progress output
    fn name(&self) -> &'static str;

    /// Extend `input` with the columns owned by this stage
    ///
    /// All randomness is drawn from `rng`, column by column in schema order.
    fn generate(&self, input: &RecordBatch, rng: &mut StdRng) -> Result<RecordBatch>;
}
