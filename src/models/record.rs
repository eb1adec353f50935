//! Typed row view of the population table
//!
//! Every column of the population schema maps onto one field of
//! [`CardioRecord`], so a batch converts into rows with `serde_arrow` and
//! back without a hand-written field mapping.

use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::population_schema;

/// One synthetic individual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardioRecord {
    // Demographics
    pub patient_id: String,
    pub sex: String,
    pub age: i32,
    pub region: String,
    pub urbanicity: String,
    pub profession: String,
    pub education_level: String,

    // Clinical
    pub systolic_bp: i32,
    pub diastolic_bp: i32,
    pub hypertension: u8,
    pub bmi: f64,
    pub obesity: u8,
    pub waist_circumference_cm: i32,
    pub fasting_glucose_mg_dl: i32,
    pub diabetes: u8,
    pub total_cholesterol_mg_dl: i32,
    pub high_cholesterol: u8,
    pub hdl_mg_dl: i32,
    pub ldl_mg_dl: i32,
    pub triglycerides_mg_dl: i32,
    pub resting_heart_rate: i32,

    // Lifestyle
    pub smoking: u8,
    pub cigarettes_per_day: i32,
    pub alcohol_use: u8,
    pub sufficient_physical_activity: u8,
    pub weekly_activity_minutes: i32,
    pub sedentary_hours_per_day: f64,
    pub excess_salt_bouillon: u8,
    pub fruit_vegetable_portions_per_day: f64,
    pub morning_sugar_lumps: i32,

    // Medical history
    pub stroke_history: u8,
    pub heart_attack_history: u8,
    pub heart_failure: u8,
    pub chronic_kidney_disease: u8,
    pub family_cardio_history: u8,
    pub chest_pain: u8,
    pub chest_pain_type: String,
    pub dyspnea: u8,
    pub antihypertensive_treatment: u8,
    pub diabetes_treatment: u8,
    pub cholesterol_treatment: u8,
    pub cardiovascular_risk_score: f64,
    pub risk_category: String,
    pub cardiovascular_event: u8,

    // Temporal
    pub consultation_date: NaiveDate,
    pub consultation_year: i32,
    pub consultation_month: i32,
    pub season: String,
}

/// Convert a population batch into typed rows
pub fn records_from_batch(batch: &RecordBatch) -> Result<Vec<CardioRecord>> {
    Ok(serde_arrow::from_record_batch(batch)?)
}

/// Convert typed rows back into a batch with the population schema
pub fn records_to_batch(records: &[CardioRecord]) -> Result<RecordBatch> {
    let fields: Vec<FieldRef> = population_schema().fields().iter().cloned().collect();
    Ok(serde_arrow::to_record_batch(&fields, &records)?)
}
