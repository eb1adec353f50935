//! Temporal stage
//!
//! Assigns every individual a consultation date drawn uniformly (by day) from
//! an inclusive window, plus the derived calendar year, month and season.

use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Int32Array, StringArray};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::rngs::StdRng;

use crate::error::{GeneratorError, Result};
use crate::models::types::Season;
use crate::schema;
use crate::utils::arrow::append_columns;
use crate::utils::date::{add_days, date_to_days};

use super::stage::GenerationStage;

/// Generator for the consultation date and its calendar annotations
#[derive(Debug, Clone)]
pub struct TemporalAnnotator {
    start: NaiveDate,
    end: NaiveDate,
}

impl TemporalAnnotator {
    /// Create an annotator over the inclusive window `[start, end]`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(GeneratorError::config(format!(
                "consultation window is inverted: {start} > {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Number of days after `start` that `end` falls on
    #[must_use]
    pub fn window_days(&self) -> u64 {
        self.end.signed_duration_since(self.start).num_days().unsigned_abs()
    }

    /// Whether a date lies inside the window
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        (self.start..=self.end).contains(&date)
    }

    fn sample_date<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<NaiveDate> {
        let offset = rng.random_range(0..=self.window_days());
        add_days(self.start, offset).ok_or_else(|| {
            GeneratorError::config(format!(
                "consultation date {offset} days after {} is out of range",
                self.start
            ))
        })
    }
}

impl GenerationStage for TemporalAnnotator {
    fn name(&self) -> &'static str {
        "temporal"
    }

    fn generate(&self, input: &RecordBatch, rng: &mut StdRng) -> Result<RecordBatch> {
        let dates = (0..input.num_rows())
            .map(|_| self.sample_date(rng))
            .collect::<Result<Vec<NaiveDate>>>()?;

        let mut seasons = Vec::with_capacity(dates.len());
        for date in &dates {
            let season = Season::from_month(date.month()).ok_or_else(|| {
                GeneratorError::Validation(format!("date {date} has no season"))
            })?;
            seasons.push(season);
        }

        let columns: Vec<ArrayRef> = vec![
            Arc::new(Date32Array::from(
                dates.iter().map(|d| date_to_days(*d)).collect::<Vec<i32>>(),
            )),
            Arc::new(Int32Array::from(
                dates.iter().map(Datelike::year).collect::<Vec<i32>>(),
            )),
            Arc::new(Int32Array::from(
                dates.iter().map(|d| d.month() as i32).collect::<Vec<i32>>(),
            )),
            Arc::new(StringArray::from_iter_values(seasons.iter().map(|s| s.label()))),
        ];

        append_columns(input, schema::temporal_fields(), columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_window_days_covers_five_years() {
        let annotator = TemporalAnnotator::new(ymd(2020, 1, 1), ymd(2024, 12, 31)).unwrap();
        // 2020 and 2024 are leap years
        assert_eq!(annotator.window_days(), 1_826);
    }

    #[test]
    fn test_inverted_window_is_rejected() {
        assert!(TemporalAnnotator::new(ymd(2024, 1, 1), ymd(2020, 1, 1)).is_err());
    }

    #[test]
    fn test_single_day_window() {
        let day = ymd(2022, 7, 14);
        let annotator = TemporalAnnotator::new(day, day).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            assert_eq!(annotator.sample_date(&mut rng).unwrap(), day);
        }
    }

    #[test]
    fn test_sampled_dates_stay_in_window() {
        let annotator = TemporalAnnotator::new(ymd(2020, 1, 1), ymd(2024, 12, 31)).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..5_000 {
            let date = annotator.sample_date(&mut rng).unwrap();
            assert!(annotator.contains(date));
        }
    }
}
