use std::io::Write;

use chrono::NaiveDate;
use cardio_synth::algorithm::population::PopulationValidator;
use cardio_synth::config::LifestyleRates;
use cardio_synth::models::{Region, Sex};
use cardio_synth::{GeneratorConfig, GeneratorError, PopulationGenerator, PopulationParameters, Result};

fn expect_config_error(config: GeneratorConfig) {
    match PopulationGenerator::new(config) {
        Err(GeneratorError::Config(_)) => {}
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn test_zero_individuals_is_rejected() {
    expect_config_error(GeneratorConfig::builder().n_individuals(0).build());
}

#[test]
fn test_probability_above_one_is_rejected() {
    let params = PopulationParameters {
        lifestyle: LifestyleRates {
            alcohol: 1.5,
            ..Default::default()
        },
        ..Default::default()
    };
    expect_config_error(GeneratorConfig::builder().n_individuals(10).parameters(params).build());
}

#[test]
fn test_negative_probability_is_rejected() {
    let params = PopulationParameters {
        family_history_rate: -0.1,
        ..Default::default()
    };
    expect_config_error(GeneratorConfig::builder().n_individuals(10).parameters(params).build());
}

#[test]
fn test_unnormalized_sex_weights_are_rejected() {
    let params = PopulationParameters {
        sex_weights: vec![(Sex::Female, 0.7), (Sex::Male, 0.7)],
        ..Default::default()
    };
    expect_config_error(GeneratorConfig::builder().n_individuals(10).parameters(params).build());
}

#[test]
fn test_inverted_window_is_rejected() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    expect_config_error(
        GeneratorConfig::builder()
            .n_individuals(10)
            .consultation_window(start, end)
            .build(),
    );
}

#[test]
fn test_json_file_overrides_only_given_fields() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{ "n_individuals": 250, "seed": 7, "parameters": {{ "family_history_rate": 0.4 }} }}"#
    )?;

    let config = GeneratorConfig::from_json_file(file.path())?;
    assert_eq!(config.n_individuals, 250);
    assert_eq!(config.seed, 7);
    assert_eq!(config.parameters.family_history_rate, 0.4);
    assert_eq!(config.parameters.lifestyle, LifestyleRates::default());
    assert_eq!(
        config.consultation_end,
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
    );
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_json_weights_use_dataset_labels() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{ "parameters": {{
            "sex_weights": [["F", 0.69], ["M", 0.31]],
            "region_weights": [["Dakar", 0.5], ["Thiès", 0.25], ["Kédougou", 0.25]]
        }} }}"#
    )?;

    let config = GeneratorConfig::from_json_file(file.path())?;
    assert_eq!(
        config.parameters.sex_weights,
        vec![(Sex::Female, 0.69), (Sex::Male, 0.31)]
    );
    assert_eq!(
        config.parameters.region_weights,
        vec![(Region::Dakar, 0.5), (Region::Thies, 0.25), (Region::Kedougou, 0.25)]
    );
    assert!(config.validate().is_ok());
    Ok(())
}

#[test]
fn test_json_rejects_variant_names() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(
        file,
        r#"{{ "parameters": {{ "sex_weights": [["Female", 0.69], ["Male", 0.31]] }} }}"#
    )?;
    assert!(matches!(
        GeneratorConfig::from_json_file(file.path()),
        Err(GeneratorError::Json(_))
    ));
    Ok(())
}

#[test]
fn test_malformed_json_is_an_error() -> Result<()> {
    let mut file = tempfile::NamedTempFile::new()?;
    write!(file, "{{ not json")?;
    assert!(matches!(
        GeneratorConfig::from_json_file(file.path()),
        Err(GeneratorError::Json(_))
    ));
    Ok(())
}

#[test]
fn test_custom_window_is_respected() -> Result<()> {
    let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
    let config = GeneratorConfig::builder()
        .n_individuals(1_000)
        .consultation_window(start, end)
        .build();
    let population = PopulationGenerator::new(config)?.generate()?;

    assert!(population.validate()?.is_valid());
    for row in population.records()? {
        assert!(row.consultation_date >= start && row.consultation_date <= end);
        assert_eq!(row.season, "Saison sèche chaude");
    }
    // June 2023 also lies inside the default window
    assert!(PopulationValidator::default().validate(&population.batch)?.is_valid());
    Ok(())
}
