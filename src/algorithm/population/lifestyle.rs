//! Lifestyle stage
//!
//! Behavioural attributes: tobacco, alcohol, physical activity, sedentary time
//! and diet. Branching columns draw both alternatives for every row and then
//! select, so the number of draws never depends on earlier outcomes.

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, UInt8Array};
use arrow::record_batch::RecordBatch;
use rand::rngs::StdRng;

use crate::config::LifestyleRates;
use crate::error::Result;
use crate::models::types::{Sex, Urbanicity};
use crate::sampling::{
    bernoulli_each, bernoulli_n, gamma_n, round_one_decimal, uniform_int_n, uniform_n, unit_n,
};
use crate::schema;
use crate::utils::arrow::{append_columns, parse_string_values};

use super::stage::GenerationStage;

/// Cigarettes per day of a smoker, half-open
pub const CIGARETTES_RANGE: (i32, i32) = (1, 20);
/// Weekly active minutes with sufficient activity, half-open
pub const ACTIVE_MINUTES_RANGE: (i32, i32) = (150, 400);
/// Weekly active minutes with insufficient activity, half-open
pub const INACTIVE_MINUTES_RANGE: (i32, i32) = (0, 100);
/// Base daily sedentary hours, half-open
pub const SEDENTARY_HOURS_RANGE: (f64, f64) = (2.0, 12.0);
/// Extra sedentary hours of urban residents
pub const URBAN_SEDENTARY_BONUS: f64 = 2.0;
pub const SEDENTARY_CLAMP: (f64, f64) = (1.0, 16.0);
/// Gamma(shape, scale) of daily fruit and vegetable portions
pub const FRUIT_VEGETABLE_GAMMA: (f64, f64) = (2.0, 1.5);
/// Breakfast sugar lumps for heavy and light consumers, half-open
pub const HIGH_SUGAR_RANGE: (i32, i32) = (3, 7);
pub const LOW_SUGAR_RANGE: (i32, i32) = (0, 3);

/// Pick `when_true[i]` where `condition[i]` holds, else `when_false[i]`
fn select<T: Copy>(condition: &[bool], when_true: &[T], when_false: &[T]) -> Vec<T> {
    condition
        .iter()
        .zip(when_true.iter().zip(when_false))
        .map(|(c, (t, f))| if *c { *t } else { *f })
        .collect()
}

/// Generator for smoking, alcohol, activity, sedentarity, salt, produce and sugar
#[derive(Debug, Clone)]
pub struct LifestyleGenerator {
    rates: LifestyleRates,
}

impl LifestyleGenerator {
    #[must_use]
    pub fn new(rates: LifestyleRates) -> Self {
        Self { rates }
    }

    fn smoking_rate(&self, sex: Sex) -> f64 {
        match sex {
            Sex::Male => self.rates.male_smoking,
            Sex::Female => self.rates.female_smoking,
        }
    }
}

impl GenerationStage for LifestyleGenerator {
    fn name(&self) -> &'static str {
        "lifestyle"
    }

    fn generate(&self, input: &RecordBatch, rng: &mut StdRng) -> Result<RecordBatch> {
        let sexes = parse_string_values(input, schema::SEX, Sex::from_label)?;
        let urbanicity = parse_string_values(input, schema::URBANICITY, Urbanicity::from_label)?;
        let n = sexes.len();

        let smoking = bernoulli_each(rng, sexes.iter().map(|s| self.smoking_rate(*s)));
        let is_smoker: Vec<bool> = smoking.iter().map(|s| *s == 1).collect();
        let cigarettes = select(
            &is_smoker,
            &uniform_int_n(rng, n, CIGARETTES_RANGE.0, CIGARETTES_RANGE.1),
            &vec![0; n],
        );

        let alcohol = bernoulli_n(rng, n, self.rates.alcohol);

        let sufficient_activity = bernoulli_n(rng, n, self.rates.sufficient_activity);
        let is_active: Vec<bool> = sufficient_activity.iter().map(|a| *a == 1).collect();
        let active_minutes = uniform_int_n(rng, n, ACTIVE_MINUTES_RANGE.0, ACTIVE_MINUTES_RANGE.1);
        let inactive_minutes =
            uniform_int_n(rng, n, INACTIVE_MINUTES_RANGE.0, INACTIVE_MINUTES_RANGE.1);
        let weekly_minutes = select(&is_active, &active_minutes, &inactive_minutes);

        let sedentary_hours: Vec<f64> =
            uniform_n(rng, n, SEDENTARY_HOURS_RANGE.0, SEDENTARY_HOURS_RANGE.1)
                .into_iter()
                .zip(&urbanicity)
                .map(|(hours, place)| {
                    let bonus = if *place == Urbanicity::Urban {
                        URBAN_SEDENTARY_BONUS
                    } else {
                        0.0
                    };
                    round_one_decimal((hours + bonus).clamp(SEDENTARY_CLAMP.0, SEDENTARY_CLAMP.1))
                })
                .collect();

        let excess_salt = bernoulli_n(rng, n, self.rates.excess_salt);

        let portions: Vec<f64> = gamma_n(rng, n, FRUIT_VEGETABLE_GAMMA.0, FRUIT_VEGETABLE_GAMMA.1)?
            .into_iter()
            .map(round_one_decimal)
            .collect();

        let heavy_sugar: Vec<bool> = unit_n(rng, n)
            .into_iter()
            .map(|u| u < self.rates.high_sugar)
            .collect();
        let high_lumps = uniform_int_n(rng, n, HIGH_SUGAR_RANGE.0, HIGH_SUGAR_RANGE.1);
        let low_lumps = uniform_int_n(rng, n, LOW_SUGAR_RANGE.0, LOW_SUGAR_RANGE.1);
        let sugar_lumps = select(&heavy_sugar, &high_lumps, &low_lumps);

        let columns: Vec<ArrayRef> = vec![
            Arc::new(UInt8Array::from(smoking)),
            Arc::new(Int32Array::from(cigarettes)),
            Arc::new(UInt8Array::from(alcohol)),
            Arc::new(UInt8Array::from(sufficient_activity)),
            Arc::new(Int32Array::from(weekly_minutes)),
            Arc::new(Float64Array::from(sedentary_hours)),
            Arc::new(UInt8Array::from(excess_salt)),
            Arc::new(Float64Array::from(portions)),
            Arc::new(Int32Array::from(sugar_lumps)),
        ];

        append_columns(input, schema::lifestyle_fields(), columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_picks_per_row() {
        let picked = select(&[true, false, true], &[1, 2, 3], &[10, 20, 30]);
        assert_eq!(picked, vec![1, 20, 3]);
    }

    #[test]
    fn test_smoking_rate_by_sex() {
        let generator = LifestyleGenerator::new(LifestyleRates::default());
        assert_eq!(generator.smoking_rate(Sex::Male), 0.15);
        assert_eq!(generator.smoking_rate(Sex::Female), 0.01);
    }
}
