use arrow::array::{Array, Int32Array};
use arrow::record_batch::RecordBatch;
use cardio_synth::schema;
use cardio_synth::{GeneratorConfig, PopulationGenerator, Result, generate_population};

use crate::utils::population;

fn systolic(batch: &RecordBatch) -> Int32Array {
    batch
        .column_by_name(schema::SYSTOLIC_BP)
        .and_then(|c| c.as_any().downcast_ref::<Int32Array>().cloned())
        .expect("systolic column")
}

#[test]
fn test_same_seed_same_table() -> Result<()> {
    let first = population(2_000, 7)?;
    let second = population(2_000, 7)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_different_seed_changes_measurements() -> Result<()> {
    let first = population(2_000, 7)?;
    let second = population(2_000, 8)?;
    assert_ne!(systolic(&first), systolic(&second));
    Ok(())
}

#[test]
fn test_repeated_generate_restarts_from_seed() -> Result<()> {
    let config = GeneratorConfig::builder().n_individuals(500).seed(99).build();
    let generator = PopulationGenerator::new(config)?;
    let first = generator.generate()?;
    let second = generator.generate()?;
    assert_eq!(first.batch, second.batch);
    Ok(())
}

#[test]
fn test_convenience_function_matches_generator() -> Result<()> {
    assert_eq!(generate_population(300, 42)?, population(300, 42)?);
    Ok(())
}

#[test]
fn test_stage_order() -> Result<()> {
    let generator = PopulationGenerator::new(GeneratorConfig::builder().n_individuals(1).build())?;
    assert_eq!(
        generator.stage_names(),
        vec!["demographics", "clinical", "lifestyle", "medical history", "temporal"]
    );
    Ok(())
}
