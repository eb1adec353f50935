//! Validation of generated populations
//!
//! Re-derives every deterministic column of each row and checks the sampled
//! columns against their ranges. Rows are checked in parallel.

use std::fmt;

use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::{default_consultation_end, default_consultation_start};
use crate::error::{GeneratorError, Result};
use crate::models::record::{CardioRecord, records_from_batch};
use crate::models::types::{
    ChestPainType, EducationLevel, Profession, Region, RiskCategory, Season, Sex, Urbanicity,
};
use crate::schema::population_schema;

use super::clinical::{
    self, BMI, DIASTOLIC_BP, FASTING_GLUCOSE, HDL, RESTING_HEART_RATE, SYSTOLIC_BP,
    TOTAL_CHOLESTEROL, TRIGLYCERIDES, WAIST_CIRCUMFERENCE,
};
use super::demographics::{SENIOR_AGES, YOUNG_AGES, patient_id};
use super::lifestyle::{
    ACTIVE_MINUTES_RANGE, CIGARETTES_RANGE, HIGH_SUGAR_RANGE, INACTIVE_MINUTES_RANGE,
    LOW_SUGAR_RANGE, SEDENTARY_CLAMP,
};
use super::medical_history::{HEART_FAILURE_MIN_AGE, MAX_DISPLAY_SCORE, RiskFactors, display_score};

/// Number of violations quoted in the error of [`ValidationReport::into_result`]
const QUOTED_VIOLATIONS: usize = 5;

/// One failed check on one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub row: usize,
    pub patient_id: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} ({}): {}", self.row, self.patient_id, self.message)
    }
}

/// Outcome of validating a population
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub rows_checked: usize,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Turn a report with violations into a validation error
    pub fn into_result(self) -> Result<Self> {
        if self.is_valid() {
            return Ok(self);
        }
        let quoted: Vec<String> = self
            .violations
            .iter()
            .take(QUOTED_VIOLATIONS)
            .map(ToString::to_string)
            .collect();
        Err(GeneratorError::Validation(format!(
            "{} violation(s) in {} rows: {}",
            self.violations.len(),
            self.rows_checked,
            quoted.join("; ")
        )))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows checked, {} violation(s)",
            self.rows_checked,
            self.violations.len()
        )
    }
}

/// Row-level checker for population tables
#[derive(Debug, Clone)]
pub struct PopulationValidator {
    window_start: NaiveDate,
    window_end: NaiveDate,
}

impl Default for PopulationValidator {
    fn default() -> Self {
        Self::new(default_consultation_start(), default_consultation_end())
    }
}

impl PopulationValidator {
    /// Validator accepting consultation dates in `[start, end]`
    #[must_use]
    pub const fn new(window_start: NaiveDate, window_end: NaiveDate) -> Self {
        Self {
            window_start,
            window_end,
        }
    }

    /// Check the column layout and every row of a population table
    pub fn validate(&self, batch: &RecordBatch) -> Result<ValidationReport> {
        check_layout(batch)?;
        let records = records_from_batch(batch)?;

        let mut violations: Vec<Violation> = records
            .par_iter()
            .enumerate()
            .flat_map_iter(|(row, record)| {
                self.check_record(row, record)
                    .into_iter()
                    .map(move |message| Violation {
                        row,
                        patient_id: record.patient_id.clone(),
                        message,
                    })
            })
            .collect();
        violations.sort_by_key(|v| v.row);

        log::debug!(
            "Validated {} rows, {} violation(s)",
            records.len(),
            violations.len()
        );
        Ok(ValidationReport {
            rows_checked: records.len(),
            violations,
        })
    }

    /// All failed checks of one row
    fn check_record(&self, row: usize, r: &CardioRecord) -> Vec<String> {
        let mut failures = Vec::new();
        let mut check = |ok: bool, message: &dyn Fn() -> String| {
            if !ok {
                failures.push(message());
            }
        };

        // Demographics
        check(r.patient_id == patient_id(row), &|| {
            format!("patient id {} does not match row position", r.patient_id)
        });
        check(Sex::from_label(&r.sex).is_some(), &|| format!("unknown sex {}", r.sex));
        check((YOUNG_AGES.0..=SENIOR_AGES.1).contains(&r.age), &|| {
            format!("age {} out of range", r.age)
        });
        match (
            Region::from_label(&r.region),
            Urbanicity::from_label(&r.urbanicity),
        ) {
            (Some(region), Some(urbanicity)) => {
                check(region.is_urban() == (urbanicity == Urbanicity::Urban), &|| {
                    format!("urbanicity {} inconsistent with region {}", r.urbanicity, r.region)
                });
            }
            _ => check(false, &|| {
                format!("unknown region {} or urbanicity {}", r.region, r.urbanicity)
            }),
        }
        check(Profession::from_label(&r.profession).is_some(), &|| {
            format!("unknown profession {}", r.profession)
        });
        check(EducationLevel::from_label(&r.education_level).is_some(), &|| {
            format!("unknown education level {}", r.education_level)
        });

        // Clinical ranges
        let measured = [
            ("systolic_bp", SYSTOLIC_BP, f64::from(r.systolic_bp)),
            ("diastolic_bp", DIASTOLIC_BP, f64::from(r.diastolic_bp)),
            ("bmi", BMI, r.bmi),
            ("waist", WAIST_CIRCUMFERENCE, f64::from(r.waist_circumference_cm)),
            ("glucose", FASTING_GLUCOSE, f64::from(r.fasting_glucose_mg_dl)),
            ("total cholesterol", TOTAL_CHOLESTEROL, f64::from(r.total_cholesterol_mg_dl)),
            ("hdl", HDL, f64::from(r.hdl_mg_dl)),
            ("triglycerides", TRIGLYCERIDES, f64::from(r.triglycerides_mg_dl)),
            ("heart rate", RESTING_HEART_RATE, f64::from(r.resting_heart_rate)),
        ];
        for (name, model, value) in measured {
            check(model.contains(value), &|| format!("{name} {value} out of range"));
        }
        check(is_one_decimal(r.bmi), &|| format!("bmi {} not rounded", r.bmi));

        // Derived clinical flags
        check(
            r.hypertension == u8::from(clinical::is_hypertensive(r.systolic_bp, r.diastolic_bp)),
            &|| "hypertension flag inconsistent with blood pressure".to_string(),
        );
        check(r.obesity == u8::from(clinical::is_obese(r.bmi)), &|| {
            "obesity flag inconsistent with bmi".to_string()
        });
        check(r.diabetes == u8::from(clinical::is_diabetic(r.fasting_glucose_mg_dl)), &|| {
            "diabetes flag inconsistent with glucose".to_string()
        });
        check(
            r.high_cholesterol
                == u8::from(clinical::has_high_cholesterol(r.total_cholesterol_mg_dl)),
            &|| "high cholesterol flag inconsistent with total cholesterol".to_string(),
        );
        check(
            r.ldl_mg_dl == clinical::ldl_from(r.total_cholesterol_mg_dl, r.hdl_mg_dl),
            &|| format!("ldl {} does not follow total and hdl", r.ldl_mg_dl),
        );

        // Lifestyle
        let cigarettes_ok = if r.smoking == 1 {
            (CIGARETTES_RANGE.0..CIGARETTES_RANGE.1).contains(&r.cigarettes_per_day)
        } else {
            r.cigarettes_per_day == 0
        };
        check(cigarettes_ok, &|| {
            format!("{} cigarettes with smoking {}", r.cigarettes_per_day, r.smoking)
        });
        let minutes = if r.sufficient_physical_activity == 1 {
            ACTIVE_MINUTES_RANGE
        } else {
            INACTIVE_MINUTES_RANGE
        };
        check((minutes.0..minutes.1).contains(&r.weekly_activity_minutes), &|| {
            format!("{} weekly minutes inconsistent with activity", r.weekly_activity_minutes)
        });
        check(
            (SEDENTARY_CLAMP.0..=SEDENTARY_CLAMP.1).contains(&r.sedentary_hours_per_day),
            &|| format!("sedentary hours {} out of range", r.sedentary_hours_per_day),
        );
        check(r.fruit_vegetable_portions_per_day >= 0.0, &|| {
            "negative fruit and vegetable portions".to_string()
        });
        check(
            (LOW_SUGAR_RANGE.0..HIGH_SUGAR_RANGE.1).contains(&r.morning_sugar_lumps),
            &|| format!("{} sugar lumps out of range", r.morning_sugar_lumps),
        );

        // Medical history
        check(r.heart_failure == 0 || r.age > HEART_FAILURE_MIN_AGE, &|| {
            format!("heart failure at age {}", r.age)
        });
        check(r.antihypertensive_treatment <= r.hypertension, &|| {
            "antihypertensive treatment without hypertension".to_string()
        });
        check(r.diabetes_treatment <= r.diabetes, &|| {
            "diabetes treatment without diabetes".to_string()
        });
        check(r.cholesterol_treatment <= r.high_cholesterol, &|| {
            "cholesterol treatment without high cholesterol".to_string()
        });
        let pain_ok = match ChestPainType::from_label(&r.chest_pain_type) {
            Some(ChestPainType::NoPain) => r.chest_pain == 0,
            Some(_) => r.chest_pain == 1,
            None => false,
        };
        check(pain_ok, &|| {
            format!("chest pain type {} with chest pain {}", r.chest_pain_type, r.chest_pain)
        });

        let expected_score = display_score(
            RiskFactors {
                hypertension: r.hypertension == 1,
                diabetes: r.diabetes == 1,
                high_cholesterol: r.high_cholesterol == 1,
                smoking: r.smoking == 1,
                obesity: r.obesity == 1,
                sufficient_activity: r.sufficient_physical_activity == 1,
                age: r.age,
            }
            .risk_score(),
        );
        let score = r.cardiovascular_risk_score;
        check(
            (0.0..=MAX_DISPLAY_SCORE).contains(&score) && (score - expected_score).abs() < 1e-9,
            &|| format!("risk score {score} differs from {expected_score}"),
        );
        check(
            RiskCategory::from_label(&r.risk_category) == Some(RiskCategory::from_score(score)),
            &|| format!("risk category {} does not match score {score}", r.risk_category),
        );

        // Flags are 0/1
        let flags = [
            r.hypertension,
            r.obesity,
            r.diabetes,
            r.high_cholesterol,
            r.smoking,
            r.alcohol_use,
            r.sufficient_physical_activity,
            r.excess_salt_bouillon,
            r.stroke_history,
            r.heart_attack_history,
            r.heart_failure,
            r.chronic_kidney_disease,
            r.family_cardio_history,
            r.chest_pain,
            r.dyspnea,
            r.antihypertensive_treatment,
            r.diabetes_treatment,
            r.cholesterol_treatment,
            r.cardiovascular_event,
        ];
        check(flags.iter().all(|f| *f <= 1), &|| "flag outside 0/1".to_string());

        // Temporal
        let date = r.consultation_date;
        check((self.window_start..=self.window_end).contains(&date), &|| {
            format!("consultation date {date} outside window")
        });
        check(r.consultation_year == date.year(), &|| {
            format!("year {} does not match {date}", r.consultation_year)
        });
        check(
            i64::from(r.consultation_month) == i64::from(date.month()),
            &|| format!("month {} does not match {date}", r.consultation_month),
        );
        check(
            Season::from_label(&r.season) == Season::from_month(date.month()),
            &|| format!("season {} does not match {date}", r.season),
        );

        failures
    }
}

fn is_one_decimal(value: f64) -> bool {
    ((value * 10.0).round() / 10.0 - value).abs() < 1e-9
}

/// The batch must carry exactly the population columns, in order
fn check_layout(batch: &RecordBatch) -> Result<()> {
    let expected = population_schema();
    let schema = batch.schema();
    let actual: Vec<&String> = schema.fields().iter().map(|f| f.name()).collect();
    let wanted: Vec<&String> = expected.fields().iter().map(|f| f.name()).collect();
    if actual != wanted {
        return Err(GeneratorError::Validation(format!(
            "unexpected column layout: expected {} columns {wanted:?}, found {actual:?}",
            wanted.len()
        )));
    }
    Ok(())
}

/// Validate a population generated over the default consultation window
///
/// # Arguments
/// * `batch` - Population table with the full column layout
///
/// # Returns
/// A report listing every violated row check, or an error when the column
/// layout itself does not match
pub fn validate_population(batch: &RecordBatch) -> Result<ValidationReport> {
    PopulationValidator::default().validate(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_decimal_detection() {
        assert!(is_one_decimal(22.4));
        assert!(is_one_decimal(30.0));
        assert!(!is_one_decimal(22.45));
    }

    #[test]
    fn test_report_into_result() {
        let clean = ValidationReport {
            rows_checked: 10,
            violations: Vec::new(),
        };
        assert!(clean.into_result().is_ok());

        let dirty = ValidationReport {
            rows_checked: 10,
            violations: vec![Violation {
                row: 3,
                patient_id: "SN000004".to_string(),
                message: "ldl 10 does not follow total and hdl".to_string(),
            }],
        };
        let err = dirty.into_result().unwrap_err();
        assert!(matches!(err, GeneratorError::Validation(_)));
        assert!(err.to_string().contains("row 3 (SN000004)"));
    }

    #[test]
    fn test_layout_rejects_partial_batch() {
        let batch = crate::utils::arrow::empty_batch(3).unwrap();
        assert!(check_layout(&batch).is_err());
    }
}
