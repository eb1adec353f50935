//! Column layout of the synthetic population table
//!
//! Each generation stage owns a contiguous block of columns. The complete
//! table is the concatenation of the five blocks in stage order.

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

// Demographics
pub const PATIENT_ID: &str = "patient_id";
pub const SEX: &str = "sex";
pub const AGE: &str = "age";
pub const REGION: &str = "region";
pub const URBANICITY: &str = "urbanicity";
pub const PROFESSION: &str = "profession";
pub const EDUCATION_LEVEL: &str = "education_level";

// Clinical
pub const SYSTOLIC_BP: &str = "systolic_bp";
pub const DIASTOLIC_BP: &str = "diastolic_bp";
pub const HYPERTENSION: &str = "hypertension";
pub const BMI: &str = "bmi";
pub const OBESITY: &str = "obesity";
pub const WAIST_CIRCUMFERENCE: &str = "waist_circumference_cm";
pub const FASTING_GLUCOSE: &str = "fasting_glucose_mg_dl";
pub const DIABETES: &str = "diabetes";
pub const TOTAL_CHOLESTEROL: &str = "total_cholesterol_mg_dl";
pub const HIGH_CHOLESTEROL: &str = "high_cholesterol";
pub const HDL: &str = "hdl_mg_dl";
pub const LDL: &str = "ldl_mg_dl";
pub const TRIGLYCERIDES: &str = "triglycerides_mg_dl";
pub const RESTING_HEART_RATE: &str = "resting_heart_rate";

// Lifestyle
pub const SMOKING: &str = "smoking";
pub const CIGARETTES_PER_DAY: &str = "cigarettes_per_day";
pub const ALCOHOL_USE: &str = "alcohol_use";
pub const SUFFICIENT_ACTIVITY: &str = "sufficient_physical_activity";
pub const WEEKLY_ACTIVITY_MINUTES: &str = "weekly_activity_minutes";
pub const SEDENTARY_HOURS: &str = "sedentary_hours_per_day";
pub const EXCESS_SALT: &str = "excess_salt_bouillon";
pub const FRUIT_VEGETABLE_PORTIONS: &str = "fruit_vegetable_portions_per_day";
pub const MORNING_SUGAR_LUMPS: &str = "morning_sugar_lumps";

// Medical history
pub const STROKE_HISTORY: &str = "stroke_history";
pub const HEART_ATTACK_HISTORY: &str = "heart_attack_history";
pub const HEART_FAILURE: &str = "heart_failure";
pub const CHRONIC_KIDNEY_DISEASE: &str = "chronic_kidney_disease";
pub const FAMILY_CARDIO_HISTORY: &str = "family_cardio_history";
pub const CHEST_PAIN: &str = "chest_pain";
pub const CHEST_PAIN_TYPE: &str = "chest_pain_type";
pub const DYSPNEA: &str = "dyspnea";
pub const ANTIHYPERTENSIVE_TREATMENT: &str = "antihypertensive_treatment";
pub const DIABETES_TREATMENT: &str = "diabetes_treatment";
pub const CHOLESTEROL_TREATMENT: &str = "cholesterol_treatment";
pub const RISK_SCORE: &str = "cardiovascular_risk_score";
pub const RISK_CATEGORY: &str = "risk_category";
pub const CARDIOVASCULAR_EVENT: &str = "cardiovascular_event";

// Temporal
pub const CONSULTATION_DATE: &str = "consultation_date";
pub const CONSULTATION_YEAR: &str = "consultation_year";
pub const CONSULTATION_MONTH: &str = "consultation_month";
pub const SEASON: &str = "season";

fn text(name: &str) -> Field {
    Field::new(name, DataType::Utf8, false)
}

fn integer(name: &str) -> Field {
    Field::new(name, DataType::Int32, false)
}

fn decimal(name: &str) -> Field {
    Field::new(name, DataType::Float64, false)
}

/// 0/1 indicator column
fn flag(name: &str) -> Field {
    Field::new(name, DataType::UInt8, false)
}

/// Columns added by the demographics stage
#[must_use]
pub fn demographic_fields() -> Vec<Field> {
    vec![
        text(PATIENT_ID),
        text(SEX),
        integer(AGE),
        text(REGION),
        text(URBANICITY),
        text(PROFESSION),
        text(EDUCATION_LEVEL),
    ]
}

/// Columns added by the clinical stage
#[must_use]
pub fn clinical_fields() -> Vec<Field> {
    vec![
        integer(SYSTOLIC_BP),
        integer(DIASTOLIC_BP),
        flag(HYPERTENSION),
        decimal(BMI),
        flag(OBESITY),
        integer(WAIST_CIRCUMFERENCE),
        integer(FASTING_GLUCOSE),
        flag(DIABETES),
        integer(TOTAL_CHOLESTEROL),
        flag(HIGH_CHOLESTEROL),
        integer(HDL),
        integer(LDL),
        integer(TRIGLYCERIDES),
        integer(RESTING_HEART_RATE),
    ]
}

/// Columns added by the lifestyle stage
#[must_use]
pub fn lifestyle_fields() -> Vec<Field> {
    vec![
        flag(SMOKING),
        integer(CIGARETTES_PER_DAY),
        flag(ALCOHOL_USE),
        flag(SUFFICIENT_ACTIVITY),
        integer(WEEKLY_ACTIVITY_MINUTES),
        decimal(SEDENTARY_HOURS),
        flag(EXCESS_SALT),
        decimal(FRUIT_VEGETABLE_PORTIONS),
        integer(MORNING_SUGAR_LUMPS),
    ]
}

/// Columns added by the medical history stage
#[must_use]
pub fn medical_history_fields() -> Vec<Field> {
    vec![
        flag(STROKE_HISTORY),
        flag(HEART_ATTACK_HISTORY),
        flag(HEART_FAILURE),
        flag(CHRONIC_KIDNEY_DISEASE),
        flag(FAMILY_CARDIO_HISTORY),
        flag(CHEST_PAIN),
        text(CHEST_PAIN_TYPE),
        flag(DYSPNEA),
        flag(ANTIHYPERTENSIVE_TREATMENT),
        flag(DIABETES_TREATMENT),
        flag(CHOLESTEROL_TREATMENT),
        decimal(RISK_SCORE),
        text(RISK_CATEGORY),
        flag(CARDIOVASCULAR_EVENT),
    ]
}

/// Columns added by the temporal stage
#[must_use]
pub fn temporal_fields() -> Vec<Field> {
    vec![
        Field::new(CONSULTATION_DATE, DataType::Date32, false),
        integer(CONSULTATION_YEAR),
        integer(CONSULTATION_MONTH),
        text(SEASON),
    ]
}

/// Schema of the complete population table, in column order
#[must_use]
pub fn population_schema() -> Arc<Schema> {
    let fields: Vec<Field> = demographic_fields()
        .into_iter()
        .chain(clinical_fields())
        .chain(lifestyle_fields())
        .chain(medical_history_fields())
        .chain(temporal_fields())
        .collect();
    Arc::new(Schema::new(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_population_schema_has_unique_ordered_columns() {
        let schema = population_schema();
        assert_eq!(schema.fields().len(), 48);
        assert_eq!(schema.field(0).name(), PATIENT_ID);
        assert_eq!(schema.field(47).name(), SEASON);

        let names: HashSet<_> = schema.fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(names.len(), 48);
    }
}
