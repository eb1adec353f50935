//! Medical history stage
//!
//! Combines the clinical and lifestyle indicators into a composite risk score
//! and draws the history, symptom, treatment and outcome columns from it.
//!
//! The raw score is `(2·HTA + 2·DIAB + 1.5·CHOL + 1.5·SMOKE + 1·OBESE +
//! 1·INACTIVE + 2·[age > 55]) / 10`, which lies in [0, 1.1]. Each event
//! probability is a clamped linear function of the raw score; the displayed
//! score is the raw score on a 0-10 scale, clamped and rounded to one decimal.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt8Array};
use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;

use crate::config::TreatmentRates;
use crate::error::Result;
use crate::models::types::{ChestPainType, RiskCategory};
use crate::sampling::{Categorical, bernoulli_each, bernoulli_n, round_one_decimal};
use crate::schema;
use crate::utils::arrow::{append_columns, flag_values, int32_values};

use super::stage::GenerationStage;

pub const HYPERTENSION_WEIGHT: f64 = 2.0;
pub const DIABETES_WEIGHT: f64 = 2.0;
pub const HIGH_CHOLESTEROL_WEIGHT: f64 = 1.5;
pub const SMOKING_WEIGHT: f64 = 1.5;
pub const OBESITY_WEIGHT: f64 = 1.0;
pub const INACTIVITY_WEIGHT: f64 = 1.0;
pub const SENIOR_WEIGHT: f64 = 2.0;
pub const RISK_DIVISOR: f64 = 10.0;

/// Ages strictly above this count as a risk factor
pub const SENIOR_RISK_AGE: i32 = 55;
/// Heart failure is only possible strictly above this age
pub const HEART_FAILURE_MIN_AGE: i32 = 50;

/// Upper bound of the displayed risk score
pub const MAX_DISPLAY_SCORE: f64 = 10.0;

/// Event probability `clamp(risk * multiplier, 0, max)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskScaledRate {
    pub multiplier: f64,
    pub max: f64,
}

impl RiskScaledRate {
    #[must_use]
    pub fn probability(&self, risk: f64) -> f64 {
        (risk * self.multiplier).clamp(0.0, self.max)
    }
}

pub const STROKE_RATE: RiskScaledRate = RiskScaledRate { multiplier: 0.05, max: 0.25 };
pub const HEART_ATTACK_RATE: RiskScaledRate = RiskScaledRate { multiplier: 0.03, max: 0.15 };
pub const HEART_FAILURE_RATE: RiskScaledRate = RiskScaledRate { multiplier: 0.04, max: 0.20 };
pub const CHEST_PAIN_RATE: RiskScaledRate = RiskScaledRate { multiplier: 0.15, max: 0.40 };
pub const DYSPNEA_RATE: RiskScaledRate = RiskScaledRate { multiplier: 0.20, max: 0.50 };
pub const CARDIOVASCULAR_EVENT_RATE: RiskScaledRate =
    RiskScaledRate { multiplier: 0.25, max: 0.60 };

/// Baseline prevalence of chronic kidney disease
pub const KIDNEY_DISEASE_BASE: f64 = 0.043;
/// Relative increase of kidney disease per unit of risk
pub const KIDNEY_DISEASE_RISK_FACTOR: f64 = 0.5;
pub const KIDNEY_DISEASE_MAX: f64 = 0.15;

/// Indicators entering the composite risk score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RiskFactors {
    pub hypertension: bool,
    pub diabetes: bool,
    pub high_cholesterol: bool,
    pub smoking: bool,
    pub obesity: bool,
    pub sufficient_activity: bool,
    pub age: i32,
}

impl RiskFactors {
    /// Raw composite risk, between 0 and 1.1
    #[must_use]
    pub fn risk_score(&self) -> f64 {
        let indicator = |present: bool, weight: f64| if present { weight } else { 0.0 };
        (indicator(self.hypertension, HYPERTENSION_WEIGHT)
            + indicator(self.diabetes, DIABETES_WEIGHT)
            + indicator(self.high_cholesterol, HIGH_CHOLESTEROL_WEIGHT)
            + indicator(self.smoking, SMOKING_WEIGHT)
            + indicator(self.obesity, OBESITY_WEIGHT)
            + indicator(!self.sufficient_activity, INACTIVITY_WEIGHT)
            + indicator(self.age > SENIOR_RISK_AGE, SENIOR_WEIGHT))
            / RISK_DIVISOR
    }
}

/// Raw risk rescaled to 0-10, clamped and rounded to one decimal
#[must_use]
pub fn display_score(risk: f64) -> f64 {
    round_one_decimal((risk * 10.0).clamp(0.0, MAX_DISPLAY_SCORE))
}

/// Heart failure probability, zero up to the minimum age
#[must_use]
pub fn heart_failure_probability(risk: f64, age: i32) -> f64 {
    let eligible = if age > HEART_FAILURE_MIN_AGE { 1.0 } else { 0.0 };
    (risk * HEART_FAILURE_RATE.multiplier * eligible).clamp(0.0, HEART_FAILURE_RATE.max)
}

/// Kidney disease probability, scaled up from the baseline prevalence
#[must_use]
pub fn kidney_disease_probability(risk: f64) -> f64 {
    (KIDNEY_DISEASE_BASE * (1.0 + risk * KIDNEY_DISEASE_RISK_FACTOR))
        .clamp(0.0, KIDNEY_DISEASE_MAX)
}

/// Draw a treatment flag for every row, kept only where the condition is present
fn gated_treatment(rng: &mut StdRng, condition: &[u8], rate: f64) -> Vec<u8> {
    bernoulli_n(rng, condition.len(), rate)
        .into_iter()
        .zip(condition)
        .map(|(treated, present)| if *present == 1 { treated } else { 0 })
        .collect()
}

fn is_set(flag: u8) -> bool {
    flag == 1
}

/// Generator for history, symptoms, treatments, risk score and outcome
#[derive(Debug, Clone)]
pub struct MedicalHistoryGenerator {
    family_history_rate: f64,
    treatment: TreatmentRates,
    chest_pain_type: Categorical<ChestPainType>,
}

impl MedicalHistoryGenerator {
    pub fn new(family_history_rate: f64, treatment: TreatmentRates) -> Result<Self> {
        Ok(Self {
            family_history_rate,
            treatment,
            chest_pain_type: Categorical::uniform("chest pain type", &ChestPainType::SYMPTOMATIC)?,
        })
    }
}

impl GenerationStage for MedicalHistoryGenerator {
    fn name(&self) -> &'static str {
        "medical history"
    }

    fn generate(&self, input: &RecordBatch, rng: &mut StdRng) -> Result<RecordBatch> {
        let ages = int32_values(input, schema::AGE)?;
        let hypertension = flag_values(input, schema::HYPERTENSION)?;
        let diabetes = flag_values(input, schema::DIABETES)?;
        let high_cholesterol = flag_values(input, schema::HIGH_CHOLESTEROL)?;
        let smoking = flag_values(input, schema::SMOKING)?;
        let obesity = flag_values(input, schema::OBESITY)?;
        let sufficient_activity = flag_values(input, schema::SUFFICIENT_ACTIVITY)?;
        let n = ages.len();

        let risk: Vec<f64> = (0..n)
            .map(|i| {
                RiskFactors {
                    hypertension: is_set(hypertension[i]),
                    diabetes: is_set(diabetes[i]),
                    high_cholesterol: is_set(high_cholesterol[i]),
                    smoking: is_set(smoking[i]),
                    obesity: is_set(obesity[i]),
                    sufficient_activity: is_set(sufficient_activity[i]),
                    age: ages[i],
                }
                .risk_score()
            })
            .collect();

        let stroke = bernoulli_each(rng, risk.iter().map(|r| STROKE_RATE.probability(*r)));
        let heart_attack =
            bernoulli_each(rng, risk.iter().map(|r| HEART_ATTACK_RATE.probability(*r)));
        let heart_failure = bernoulli_each(
            rng,
            risk.iter()
                .zip(&ages)
                .map(|(r, age)| heart_failure_probability(*r, *age)),
        );
        let kidney_disease =
            bernoulli_each(rng, risk.iter().map(|r| kidney_disease_probability(*r)));
        let family_history = bernoulli_n(rng, n, self.family_history_rate);

        let chest_pain = bernoulli_each(rng, risk.iter().map(|r| CHEST_PAIN_RATE.probability(*r)));
        let chest_pain_type: Vec<ChestPainType> = self
            .chest_pain_type
            .sample_n(rng, n)
            .into_iter()
            .zip(&chest_pain)
            .map(|(subtype, pain)| if is_set(*pain) { subtype } else { ChestPainType::NoPain })
            .collect();

        let dyspnea = bernoulli_each(rng, risk.iter().map(|r| DYSPNEA_RATE.probability(*r)));

        let antihypertensive = gated_treatment(rng, &hypertension, self.treatment.hypertension);
        let diabetes_treatment = gated_treatment(rng, &diabetes, self.treatment.diabetes);
        let cholesterol_treatment =
            gated_treatment(rng, &high_cholesterol, self.treatment.cholesterol);

        let scores: Vec<f64> = risk.iter().map(|r| display_score(*r)).collect();
        let categories: Vec<RiskCategory> =
            scores.iter().map(|s| RiskCategory::from_score(*s)).collect();

        let event = bernoulli_each(
            rng,
            risk.iter().map(|r| CARDIOVASCULAR_EVENT_RATE.probability(*r)),
        );

        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt8Array::from(stroke)),
            Arc::new(UInt8Array::from(heart_attack)),
            Arc::new(UInt8Array::from(heart_failure)),
            Arc::new(UInt8Array::from(kidney_disease)),
            Arc::new(UInt8Array::from(family_history)),
            Arc::new(UInt8Array::from(chest_pain)),
            Arc::new(StringArray::from_iter_values(
                chest_pain_type.iter().map(|t| t.label()),
            )),
            Arc::new(UInt8Array::from(dyspnea)),
            Arc::new(UInt8Array::from(antihypertensive)),
            Arc::new(UInt8Array::from(diabetes_treatment)),
            Arc::new(UInt8Array::from(cholesterol_treatment)),
            Arc::new(Float64Array::from(scores)),
            Arc::new(StringArray::from_iter_values(
                categories.iter().map(|c| c.label()),
            )),
            Arc::new(UInt8Array::from(event)),
        ];

        append_columns(input, schema::medical_history_fields(), columns)
    }
}
