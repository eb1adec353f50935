use cardio_synth::schema;
use cardio_synth::{PopulationStatistics, Result};

use crate::utils::{assert_within_2pp, flag_share, label_share, population};

const N: usize = 100_000;
const SEED: u64 = 42;

#[test]
fn test_configured_prevalences_at_100k() -> Result<()> {
    let batch = population(N, SEED)?;

    assert_within_2pp("women", label_share(&batch, schema::SEX, "F"), 0.69);
    assert_within_2pp("Dakar", label_share(&batch, schema::REGION, "Dakar"), 0.25);
    // Sex-specific smoking rates mixed over the sex ratio
    assert_within_2pp(
        "smoking",
        flag_share(&batch, schema::SMOKING),
        0.31 * 0.15 + 0.69 * 0.01,
    );
    assert_within_2pp("alcohol", flag_share(&batch, schema::ALCOHOL_USE), 0.034);
    assert_within_2pp(
        "sufficient activity",
        flag_share(&batch, schema::SUFFICIENT_ACTIVITY),
        0.139,
    );
    assert_within_2pp("excess salt", flag_share(&batch, schema::EXCESS_SALT), 0.758);
    assert_within_2pp(
        "family history",
        flag_share(&batch, schema::FAMILY_CARDIO_HISTORY),
        0.25,
    );
    Ok(())
}

#[test]
fn test_age_bands_at_100k() -> Result<()> {
    let rows = crate::utils::records(N, SEED)?;
    let share = |low: i32, high: i32| {
        rows.iter().filter(|r| (low..=high).contains(&r.age)).count() as f64 / N as f64
    };
    assert_within_2pp("ages 18-35", share(18, 35), 0.30);
    assert_within_2pp("ages 36-55", share(36, 55), 0.35);
    assert_within_2pp("ages 56-80", share(56, 80), 0.35);
    Ok(())
}

#[test]
fn test_treatment_rate_among_hypertensives() -> Result<()> {
    let rows = crate::utils::records(N, SEED)?;
    let hypertensive: Vec<_> = rows.iter().filter(|r| r.hypertension == 1).collect();
    assert!(!hypertensive.is_empty());
    let treated = hypertensive
        .iter()
        .filter(|r| r.antihypertensive_treatment == 1)
        .count() as f64
        / hypertensive.len() as f64;
    assert_within_2pp("antihypertensive treatment", treated, 0.65);
    Ok(())
}

#[test]
fn test_statistics_agree_with_columns() -> Result<()> {
    let batch = population(N, SEED)?;
    let stats = PopulationStatistics::calculate(&batch)?;
    assert_eq!(stats.individual_count, N);
    assert_eq!(stats.female_count + stats.male_count, N);
    assert!((stats.smoking - flag_share(&batch, schema::SMOKING)).abs() < 1e-12);
    assert!(
        (stats.insufficient_activity + flag_share(&batch, schema::SUFFICIENT_ACTIVITY) - 1.0).abs()
            < 1e-12
    );
    let categorized: usize = stats.risk_categories.iter().map(|(_, c)| c).sum();
    assert_eq!(categorized, N);
    Ok(())
}
