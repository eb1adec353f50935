//! Clinical stage
//!
//! Draws correlated physiological measurements and derives the threshold
//! conditions from the stored values. Every measurement follows
//!
//! `intercept + slope * covariate + adjustment + N(0, sd)`
//!
//! and is clamped to its physiological range before it is stored or used as a
//! covariate of another measurement.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, UInt8Array};
use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;

use crate::error::Result;
use crate::models::types::Sex;
use crate::sampling::{normal_noise_n, round_half_even, round_one_decimal};
use crate::schema;
use crate::utils::arrow::{append_columns, int32_values, parse_string_values};

use super::stage::GenerationStage;

/// Linear Gaussian model of one clamped measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub intercept: f64,
    /// Change per unit of the covariate offset (age above 18, BMI above 22)
    pub slope: f64,
    /// Shift applied to women
    pub female_adjustment: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Measurement {
    /// Combine covariates with pre-drawn noise and clamp
    #[must_use]
    pub fn value(&self, covariate_offset: f64, sex: Sex, noise: f64) -> f64 {
        let adjustment = if sex == Sex::Female {
            self.female_adjustment
        } else {
            0.0
        };
        (self.intercept + self.slope * covariate_offset + adjustment + noise)
            .clamp(self.min, self.max)
    }

    /// Whether a stored value respects the clamp range
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

const fn measurement(intercept: f64, slope: f64, std_dev: f64, min: f64, max: f64) -> Measurement {
    Measurement {
        intercept,
        slope,
        female_adjustment: 0.0,
        std_dev,
        min,
        max,
    }
}

pub const SYSTOLIC_BP: Measurement = measurement(115.0, 0.5, 15.0, 90.0, 200.0);
pub const DIASTOLIC_BP: Measurement = measurement(75.0, 0.3, 10.0, 60.0, 130.0);
pub const BMI: Measurement = Measurement {
    female_adjustment: 1.5,
    ..measurement(22.0, 0.08, 4.0, 15.0, 45.0)
};
/// Slope applies to BMI above 22
pub const WAIST_CIRCUMFERENCE: Measurement = Measurement {
    female_adjustment: 5.0,
    ..measurement(75.0, 2.0, 8.0, 60.0, 140.0)
};
pub const FASTING_GLUCOSE: Measurement = measurement(85.0, 0.3, 15.0, 60.0, 250.0);
pub const TOTAL_CHOLESTEROL: Measurement = measurement(170.0, 0.4, 30.0, 120.0, 320.0);
pub const HDL: Measurement = measurement(50.0, 0.0, 12.0, 25.0, 80.0);
/// Slope applies to BMI above 22
pub const TRIGLYCERIDES: Measurement = measurement(120.0, 4.0, 40.0, 50.0, 400.0);
pub const RESTING_HEART_RATE: Measurement = measurement(70.0, 0.0, 10.0, 50.0, 110.0);

/// Age at which the age covariate starts
pub const AGE_REFERENCE: f64 = 18.0;
/// BMI at which the BMI covariate starts
pub const BMI_REFERENCE: f64 = 22.0;

/// LDL is derived as total - HDL - offset, then clamped
pub const LDL_OFFSET: i32 = 30;
pub const LDL_RANGE: (i32, i32) = (50, 200);

pub const HYPERTENSION_SYSTOLIC: i32 = 140;
pub const HYPERTENSION_DIASTOLIC: i32 = 90;
pub const OBESITY_BMI: f64 = 30.0;
pub const DIABETES_GLUCOSE: i32 = 126;
pub const HIGH_CHOLESTEROL_TOTAL: i32 = 200;

#[must_use]
pub const fn is_hypertensive(systolic: i32, diastolic: i32) -> bool {
    systolic >= HYPERTENSION_SYSTOLIC || diastolic >= HYPERTENSION_DIASTOLIC
}

#[must_use]
pub fn is_obese(bmi: f64) -> bool {
    bmi >= OBESITY_BMI
}

#[must_use]
pub const fn is_diabetic(glucose: i32) -> bool {
    glucose >= DIABETES_GLUCOSE
}

#[must_use]
pub const fn has_high_cholesterol(total: i32) -> bool {
    total >= HIGH_CHOLESTEROL_TOTAL
}

/// LDL estimated from the stored total and HDL cholesterol
#[must_use]
pub fn ldl_from(total: i32, hdl: i32) -> i32 {
    (total - hdl - LDL_OFFSET).clamp(LDL_RANGE.0, LDL_RANGE.1)
}

/// Draw one clamped measurement per row
fn sample_measurement(
    rng: &mut StdRng,
    model: &Measurement,
    offsets: &[f64],
    sexes: &[Sex],
) -> Result<Vec<f64>> {
    let noise = normal_noise_n(rng, offsets.len(), model.std_dev)?;
    Ok(offsets
        .iter()
        .zip(sexes)
        .zip(noise)
        .map(|((offset, sex), noise)| model.value(*offset, *sex, noise))
        .collect())
}

/// Round a clamped measurement to its stored integer value
fn to_stored_int(values: &[f64]) -> Vec<i32> {
    values.iter().map(|v| round_half_even(*v) as i32).collect()
}

fn flags<T: Copy>(values: &[T], predicate: impl Fn(T) -> bool) -> Vec<u8> {
    values.iter().map(|v| u8::from(predicate(*v))).collect()
}

/// Generator for blood pressure, anthropometry, glycaemia, lipids and heart rate
#[derive(Debug, Clone, Default)]
pub struct ClinicalGenerator;

impl ClinicalGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl GenerationStage for ClinicalGenerator {
    fn name(&self) -> &'static str {
        "clinical"
    }

    fn generate(&self, input: &RecordBatch, rng: &mut StdRng) -> Result<RecordBatch> {
        let ages = int32_values(input, schema::AGE)?;
        let sexes = parse_string_values(input, schema::SEX, Sex::from_label)?;
        let n = ages.len();

        let age_offsets: Vec<f64> = ages.iter().map(|a| f64::from(*a) - AGE_REFERENCE).collect();
        let no_offsets = vec![0.0; n];

        let systolic = to_stored_int(&sample_measurement(rng, &SYSTOLIC_BP, &age_offsets, &sexes)?);
        let diastolic =
            to_stored_int(&sample_measurement(rng, &DIASTOLIC_BP, &age_offsets, &sexes)?);
        let hypertension: Vec<u8> = systolic
            .iter()
            .zip(&diastolic)
            .map(|(s, d)| u8::from(is_hypertensive(*s, *d)))
            .collect();

        let bmi: Vec<f64> = sample_measurement(rng, &BMI, &age_offsets, &sexes)?
            .into_iter()
            .map(round_one_decimal)
            .collect();
        let obesity = flags(&bmi, is_obese);

        let bmi_offsets: Vec<f64> = bmi.iter().map(|b| b - BMI_REFERENCE).collect();
        let waist = to_stored_int(&sample_measurement(
            rng,
            &WAIST_CIRCUMFERENCE,
            &bmi_offsets,
            &sexes,
        )?);

        let glucose =
            to_stored_int(&sample_measurement(rng, &FASTING_GLUCOSE, &age_offsets, &sexes)?);
        let diabetes = flags(&glucose, is_diabetic);

        let total_cholesterol =
            to_stored_int(&sample_measurement(rng, &TOTAL_CHOLESTEROL, &age_offsets, &sexes)?);
        let high_cholesterol = flags(&total_cholesterol, has_high_cholesterol);

        let hdl = to_stored_int(&sample_measurement(rng, &HDL, &no_offsets, &sexes)?);
        let ldl: Vec<i32> = total_cholesterol
            .iter()
            .zip(&hdl)
            .map(|(total, hdl)| ldl_from(*total, *hdl))
            .collect();

        let triglycerides =
            to_stored_int(&sample_measurement(rng, &TRIGLYCERIDES, &bmi_offsets, &sexes)?);
        let heart_rate =
            to_stored_int(&sample_measurement(rng, &RESTING_HEART_RATE, &no_offsets, &sexes)?);

        let columns: Vec<ArrayRef> = vec![
            Arc::new(Int32Array::from(systolic)),
            Arc::new(Int32Array::from(diastolic)),
            Arc::new(UInt8Array::from(hypertension)),
            Arc::new(Float64Array::from(bmi)),
            Arc::new(UInt8Array::from(obesity)),
            Arc::new(Int32Array::from(waist)),
            Arc::new(Int32Array::from(glucose)),
            Arc::new(UInt8Array::from(diabetes)),
            Arc::new(Int32Array::from(total_cholesterol)),
            Arc::new(UInt8Array::from(high_cholesterol)),
            Arc::new(Int32Array::from(hdl)),
            Arc::new(Int32Array::from(ldl)),
            Arc::new(Int32Array::from(triglycerides)),
            Arc::new(Int32Array::from(heart_rate)),
        ];

        append_columns(input, schema::clinical_fields(), columns)
    }
}
