//! Population statistics and summary reporting
//!
//! Aggregates a generated population table into counts and prevalences and
//! compares them with the survey reference prevalences.

use std::fmt::Write as _;

use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::types::{Region, RiskCategory, Sex};
use crate::schema;
use crate::utils::arrow::{flag_values, float64_values, int32_values, parse_string_values};

/// Survey reference prevalences used to judge a generated population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrevalenceTargets {
    pub hypertension: f64,
    pub diabetes: f64,
    pub high_cholesterol: f64,
    pub smoking: f64,
    /// Share not meeting the physical activity recommendation
    pub sedentarity: f64,
    pub obesity: f64,
    pub excess_salt: f64,
    pub stroke: f64,
    pub heart_attack: f64,
}

impl Default for PrevalenceTargets {
    fn default() -> Self {
        Self {
            hypertension: 0.282,
            diabetes: 0.042,
            high_cholesterol: 0.266,
            smoking: 0.06,
            sedentarity: 0.861,
            obesity: 0.11,
            excess_salt: 0.758,
            stroke: 0.161,
            heart_attack: 0.036,
        }
    }
}

/// Observed prevalence of one indicator next to its reference value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrevalenceComparison {
    pub indicator: &'static str,
    pub observed: f64,
    pub target: f64,
}

impl PrevalenceComparison {
    /// Observed minus target, in percentage points
    #[must_use]
    pub fn difference_pp(&self) -> f64 {
        (self.observed - self.target) * 100.0
    }
}

/// Aggregate statistics of a generated population
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationStats {
    pub individual_count: usize,
    pub female_count: usize,
    pub male_count: usize,
    pub mean_age: f64,
    pub age_std_dev: f64,
    pub dakar_share: f64,
    pub hypertension: f64,
    pub diabetes: f64,
    pub high_cholesterol: f64,
    pub obesity: f64,
    pub stroke_history: f64,
    pub heart_attack_history: f64,
    pub smoking: f64,
    pub alcohol_use: f64,
    pub insufficient_activity: f64,
    pub excess_salt: f64,
    pub mean_risk_score: f64,
    /// Individuals per risk category, from lowest to highest
    pub risk_categories: Vec<(String, usize)>,
    pub cardiovascular_event_rate: f64,
}

impl PopulationStats {
    /// Share of women in the population
    #[must_use]
    pub fn female_share(&self) -> f64 {
        ratio(self.female_count, self.individual_count)
    }

    /// Share of men in the population
    #[must_use]
    pub fn male_share(&self) -> f64 {
        ratio(self.male_count, self.individual_count)
    }

    /// Compare observed prevalences with reference prevalences
    #[must_use]
    pub fn compare(&self, targets: &PrevalenceTargets) -> Vec<PrevalenceComparison> {
        [
            ("Hypertension", self.hypertension, targets.hypertension),
            ("Diabetes", self.diabetes, targets.diabetes),
            ("High cholesterol", self.high_cholesterol, targets.high_cholesterol),
            ("Smoking", self.smoking, targets.smoking),
            ("Sedentarity", self.insufficient_activity, targets.sedentarity),
            ("Obesity", self.obesity, targets.obesity),
            ("Excess salt", self.excess_salt, targets.excess_salt),
            ("Stroke history", self.stroke_history, targets.stroke),
            ("Heart attack history", self.heart_attack_history, targets.heart_attack),
        ]
        .into_iter()
        .map(|(indicator, observed, target)| PrevalenceComparison {
            indicator,
            observed,
            target,
        })
        .collect()
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn flag_rate(batch: &RecordBatch, column: &str) -> Result<f64> {
    let flags = flag_values(batch, column)?;
    let positives = flags.iter().filter(|f| **f == 1).count();
    Ok(ratio(positives, flags.len()))
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Sample standard deviation, zero below two values
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Functions for population statistics and summaries
pub struct PopulationStatistics;

impl PopulationStatistics {
    /// Calculate aggregate statistics of a population table
    pub fn calculate(batch: &RecordBatch) -> Result<PopulationStats> {
        let individual_count = batch.num_rows();

        let sexes = parse_string_values(batch, schema::SEX, Sex::from_label)?;
        let sex_counts = sexes.iter().copied().counts();
        let female_count = sex_counts.get(&Sex::Female).copied().unwrap_or(0);
        let male_count = sex_counts.get(&Sex::Male).copied().unwrap_or(0);

        let ages: Vec<f64> = int32_values(batch, schema::AGE)?
            .into_iter()
            .map(f64::from)
            .collect();

        let regions = parse_string_values(batch, schema::REGION, Region::from_label)?;
        let dakar_count = regions.iter().filter(|r| **r == Region::Dakar).count();

        let categories =
            parse_string_values(batch, schema::RISK_CATEGORY, RiskCategory::from_label)?;
        let mut category_counts: FxHashMap<RiskCategory, usize> = FxHashMap::default();
        for category in categories {
            *category_counts.entry(category).or_insert(0) += 1;
        }
        let risk_categories = RiskCategory::ALL
            .iter()
            .map(|c| (c.label().to_string(), category_counts.get(c).copied().unwrap_or(0)))
            .collect();

        let scores = float64_values(batch, schema::RISK_SCORE)?;

        Ok(PopulationStats {
            individual_count,
            female_count,
            male_count,
            mean_age: mean(&ages),
            age_std_dev: std_dev(&ages),
            dakar_share: ratio(dakar_count, individual_count),
            hypertension: flag_rate(batch, schema::HYPERTENSION)?,
            diabetes: flag_rate(batch, schema::DIABETES)?,
            high_cholesterol: flag_rate(batch, schema::HIGH_CHOLESTEROL)?,
            obesity: flag_rate(batch, schema::OBESITY)?,
            stroke_history: flag_rate(batch, schema::STROKE_HISTORY)?,
            heart_attack_history: flag_rate(batch, schema::HEART_ATTACK_HISTORY)?,
            smoking: flag_rate(batch, schema::SMOKING)?,
            alcohol_use: flag_rate(batch, schema::ALCOHOL_USE)?,
            insufficient_activity: 1.0 - flag_rate(batch, schema::SUFFICIENT_ACTIVITY)?,
            excess_salt: flag_rate(batch, schema::EXCESS_SALT)?,
            mean_risk_score: mean(&scores),
            risk_categories,
            cardiovascular_event_rate: flag_rate(batch, schema::CARDIOVASCULAR_EVENT)?,
        })
    }

    /// Generate a human-readable population summary
    #[must_use]
    pub fn generate_summary(stats: &PopulationStats, targets: &PrevalenceTargets) -> String {
        let mut summary = String::new();
        let n = stats.individual_count;

        let _ = writeln!(summary, "Synthetic Population Summary:");
        let _ = writeln!(summary, "  Total Individuals: {n}");
        let _ = writeln!(
            summary,
            "  Women: {} ({:.1}%)",
            stats.female_count,
            stats.female_share() * 100.0
        );
        let _ = writeln!(
            summary,
            "  Men: {} ({:.1}%)",
            stats.male_count,
            stats.male_share() * 100.0
        );
        let _ = writeln!(
            summary,
            "  Age: {:.1} ± {:.1} years",
            stats.mean_age, stats.age_std_dev
        );
        let _ = writeln!(summary, "  Dakar residents: {:.1}%", stats.dakar_share * 100.0);
        let _ = writeln!(summary, "  Alcohol use: {:.1}%", stats.alcohol_use * 100.0);

        let _ = writeln!(summary, "\nPrevalence (observed vs reference):");
        for comparison in stats.compare(targets) {
            let _ = writeln!(
                summary,
                "  {:<22} {:>5.1}%  (reference {:>5.1}%, {:+.1} pp)",
                comparison.indicator,
                comparison.observed * 100.0,
                comparison.target * 100.0,
                comparison.difference_pp()
            );
        }

        let _ = writeln!(summary, "\nCardiovascular Risk:");
        let _ = writeln!(summary, "  Mean score: {:.2}", stats.mean_risk_score);
        for (category, count) in &stats.risk_categories {
            let _ = writeln!(
                summary,
                "  {category}: {count} ({:.1}%)",
                ratio(*count, n) * 100.0
            );
        }
        let _ = writeln!(
            summary,
            "  Cardiovascular events: {:.1}%",
            stats.cardiovascular_event_rate * 100.0
        );

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(hypertension: f64) -> PopulationStats {
        PopulationStats {
            individual_count: 4,
            female_count: 3,
            male_count: 1,
            mean_age: 40.0,
            age_std_dev: 5.0,
            dakar_share: 0.25,
            hypertension,
            diabetes: 0.0,
            high_cholesterol: 0.0,
            obesity: 0.0,
            stroke_history: 0.0,
            heart_attack_history: 0.0,
            smoking: 0.0,
            alcohol_use: 0.0,
            insufficient_activity: 0.75,
            excess_salt: 1.0,
            mean_risk_score: 3.5,
            risk_categories: vec![("Faible".to_string(), 4)],
            cardiovascular_event_rate: 0.0,
        }
    }

    #[test]
    fn test_std_dev_is_sample_deviation() {
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(std_dev(&[3.0]), 0.0);
        assert!((std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]) - 2.138_089_935).abs() < 1e-6);
    }

    #[test]
    fn test_ratio_of_empty_population() {
        assert_eq!(ratio(0, 0), 0.0);
        assert_eq!(ratio(1, 4), 0.25);
    }

    #[test]
    fn test_compare_uses_reference_values() {
        let stats = stats_with(0.5);
        let comparisons = stats.compare(&PrevalenceTargets::default());
        assert_eq!(comparisons.len(), 9);
        assert_eq!(comparisons[0].indicator, "Hypertension");
        assert!((comparisons[0].difference_pp() - 21.8).abs() < 1e-9);
    }

    #[test]
    fn test_summary_mentions_key_figures() {
        let summary =
            PopulationStatistics::generate_summary(&stats_with(0.25), &PrevalenceTargets::default());
        assert!(summary.contains("Total Individuals: 4"));
        assert!(summary.contains("Women: 3 (75.0%)"));
        assert!(summary.contains("Hypertension"));
        assert!(summary.contains("Faible: 4 (100.0%)"));
    }

    #[test]
    fn test_stats_serialize_to_json() {
        let json = stats_with(0.25).to_json().unwrap();
        assert!(json.contains("\"individual_count\": 4"));
        assert!(json.contains("\"hypertension\": 0.25"));
    }
}
