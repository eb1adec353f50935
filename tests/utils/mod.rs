use arrow::array::{Array, StringArray, UInt8Array};
use arrow::record_batch::RecordBatch;
use cardio_synth::{CardioRecord, GeneratorConfig, PopulationGenerator, Result};

/// Generate a population with default parameters
pub fn population(n_individuals: usize, seed: u64) -> Result<RecordBatch> {
    let config = GeneratorConfig::builder()
        .n_individuals(n_individuals)
        .seed(seed)
        .build();
    Ok(PopulationGenerator::new(config)?.generate()?.batch)
}

/// Generate a population and convert it into typed rows
pub fn records(n_individuals: usize, seed: u64) -> Result<Vec<CardioRecord>> {
    let config = GeneratorConfig::builder()
        .n_individuals(n_individuals)
        .seed(seed)
        .build();
    PopulationGenerator::new(config)?.generate()?.records()
}

/// Share of rows where a 0/1 column is set
#[must_use]
pub fn flag_share(batch: &RecordBatch, column: &str) -> f64 {
    let flags = batch
        .column_by_name(column)
        .and_then(|c| c.as_any().downcast_ref::<UInt8Array>())
        .unwrap_or_else(|| panic!("missing flag column {column}"));
    let set = flags.values().iter().filter(|v| **v == 1).count();
    set as f64 / flags.len() as f64
}

/// Share of rows where a text column equals `label`
#[must_use]
pub fn label_share(batch: &RecordBatch, column: &str, label: &str) -> f64 {
    let values = batch
        .column_by_name(column)
        .and_then(|c| c.as_any().downcast_ref::<StringArray>())
        .unwrap_or_else(|| panic!("missing text column {column}"));
    let matching = values.iter().filter(|v| *v == Some(label)).count();
    matching as f64 / values.len() as f64
}

/// Assert an observed proportion within two percentage points of its target
pub fn assert_within_2pp(name: &str, observed: f64, target: f64) {
    assert!(
        (observed - target).abs() <= 0.02,
        "{name}: observed {observed:.4}, expected {target:.4} ± 0.02"
    );
}
