use chrono::{Datelike, NaiveDate};
use cardio_synth::models::{ChestPainType, Region, RiskCategory, Season, Urbanicity};
use cardio_synth::{Result, validate_population};

use crate::utils::{population, records};

const N: usize = 20_000;
const SEED: u64 = 2024;

#[test]
fn test_validator_accepts_generated_population() -> Result<()> {
    let batch = population(N, SEED)?;
    let report = validate_population(&batch)?;
    assert_eq!(report.rows_checked, N);
    assert!(report.is_valid(), "unexpected violations: {:?}", &report.violations[..report.violations.len().min(5)]);
    Ok(())
}

#[test]
fn test_demographic_invariants() -> Result<()> {
    for row in records(N, SEED)? {
        assert!((18..=80).contains(&row.age), "age {}", row.age);
        let region = Region::from_label(&row.region).expect("known region");
        let urbanicity = Urbanicity::from_label(&row.urbanicity).expect("known urbanicity");
        if region.is_urban() {
            assert_eq!(urbanicity, Urbanicity::Urban);
        } else {
            assert_ne!(urbanicity, Urbanicity::Urban);
        }
    }
    Ok(())
}

#[test]
fn test_clinical_flags_follow_stored_values() -> Result<()> {
    for row in records(N, SEED)? {
        assert!((90..=200).contains(&row.systolic_bp));
        assert!((60..=130).contains(&row.diastolic_bp));
        assert!((15.0..=45.0).contains(&row.bmi));
        assert!((60..=140).contains(&row.waist_circumference_cm));
        assert!((60..=250).contains(&row.fasting_glucose_mg_dl));
        assert!((120..=320).contains(&row.total_cholesterol_mg_dl));
        assert!((25..=80).contains(&row.hdl_mg_dl));
        assert!((50..=200).contains(&row.ldl_mg_dl));
        assert!((50..=400).contains(&row.triglycerides_mg_dl));
        assert!((50..=110).contains(&row.resting_heart_rate));

        let hypertensive = row.systolic_bp >= 140 || row.diastolic_bp >= 90;
        assert_eq!(row.hypertension, u8::from(hypertensive));
        assert_eq!(row.obesity, u8::from(row.bmi >= 30.0));
        assert_eq!(row.diabetes, u8::from(row.fasting_glucose_mg_dl >= 126));
        assert_eq!(row.high_cholesterol, u8::from(row.total_cholesterol_mg_dl >= 200));
    }
    Ok(())
}

#[test]
fn test_lifestyle_branches_are_consistent() -> Result<()> {
    for row in records(N, SEED)? {
        if row.smoking == 1 {
            assert!((1..=19).contains(&row.cigarettes_per_day));
        } else {
            assert_eq!(row.cigarettes_per_day, 0);
        }
        if row.sufficient_physical_activity == 1 {
            assert!((150..=399).contains(&row.weekly_activity_minutes));
        } else {
            assert!((0..=99).contains(&row.weekly_activity_minutes));
        }
        assert!((1.0..=16.0).contains(&row.sedentary_hours_per_day));
        assert!(row.fruit_vegetable_portions_per_day >= 0.0);
        assert!((0..=6).contains(&row.morning_sugar_lumps));
    }
    Ok(())
}

#[test]
fn test_medical_history_rules() -> Result<()> {
    for row in records(N, SEED)? {
        assert!(row.antihypertensive_treatment <= row.hypertension);
        assert!(row.diabetes_treatment <= row.diabetes);
        assert!(row.cholesterol_treatment <= row.high_cholesterol);
        if row.heart_failure == 1 {
            assert!(row.age > 50);
        }

        let pain_type = ChestPainType::from_label(&row.chest_pain_type).expect("known type");
        if row.chest_pain == 0 {
            assert_eq!(pain_type, ChestPainType::NoPain);
        } else {
            assert_ne!(pain_type, ChestPainType::NoPain);
        }

        let score = row.cardiovascular_risk_score;
        assert!((0.0..=10.0).contains(&score));
        assert_eq!(
            RiskCategory::from_label(&row.risk_category),
            Some(RiskCategory::from_score(score))
        );
    }
    Ok(())
}

#[test]
fn test_consultation_dates_and_seasons() -> Result<()> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
    for row in records(N, SEED)? {
        let date = row.consultation_date;
        assert!(date >= start && date <= end, "date {date}");
        assert_eq!(row.consultation_year, date.year());
        assert_eq!(row.consultation_month as u32, date.month());
        let expected = match date.month() {
            1..=3 => Season::CoolDry,
            4..=6 => Season::HotDry,
            7..=9 => Season::Rainy,
            _ => Season::PostRainy,
        };
        assert_eq!(row.season, expected.label());
    }
    Ok(())
}
