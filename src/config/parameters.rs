//! Sampling parameters of the synthetic population
//!
//! Defaults reproduce the prevalences of the Senegalese STEPS 2020-2024 survey
//! and related epidemiological studies.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::types::{EducationLevel, Profession, Region, Sex};
use crate::sampling::{validate_rate, validate_weights};

/// Share of the population outside Dakar, spread evenly over the other 13 regions
const NON_DAKAR_SHARE: f64 = 0.75;

/// Nested age-band mixture
///
/// A first coin with probability `young_share` selects ages 18-35. Otherwise a
/// second, independent coin with probability `middle_share_of_rest` selects
/// ages 36-55, and the remaining individuals are 56-80.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeBands {
    pub young_share: f64,
    pub middle_share_of_rest: f64,
}

impl Default for AgeBands {
    fn default() -> Self {
        Self {
            young_share: 0.30,
            middle_share_of_rest: 0.50,
        }
    }
}

/// Bernoulli rates of the lifestyle stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LifestyleRates {
    pub male_smoking: f64,
    pub female_smoking: f64,
    pub alcohol: f64,
    pub sufficient_activity: f64,
    pub excess_salt: f64,
    /// Share eating three or more sugar lumps at breakfast
    pub high_sugar: f64,
}

impl Default for LifestyleRates {
    fn default() -> Self {
        Self {
            male_smoking: 0.15,
            female_smoking: 0.01,
            alcohol: 0.034,
            sufficient_activity: 0.139,
            excess_salt: 0.758,
            high_sugar: 0.291,
        }
    }
}

/// Probability of being treated given the condition is present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreatmentRates {
    pub hypertension: f64,
    pub diabetes: f64,
    pub cholesterol: f64,
}

impl Default for TreatmentRates {
    fn default() -> Self {
        Self {
            hypertension: 0.65,
            diabetes: 0.70,
            cholesterol: 0.45,
        }
    }
}

/// All configurable probabilities of the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationParameters {
    pub sex_weights: Vec<(Sex, f64)>,
    pub age_bands: AgeBands,
    pub region_weights: Vec<(Region, f64)>,
    /// Share of non-urban-region residents living in semi-urban areas
    pub semi_urban_share: f64,
    pub profession_weights: Vec<(Profession, f64)>,
    pub education_weights: Vec<(EducationLevel, f64)>,
    pub lifestyle: LifestyleRates,
    pub family_history_rate: f64,
    pub treatment: TreatmentRates,
}

impl Default for PopulationParameters {
    fn default() -> Self {
        let other_regions = (Region::ALL.len() - 1) as f64;
        let region_weights = Region::ALL
            .iter()
            .map(|&region| {
                let weight = if region == Region::Dakar {
                    1.0 - NON_DAKAR_SHARE
                } else {
                    NON_DAKAR_SHARE / other_regions
                };
                (region, weight)
            })
            .collect();

        Self {
            sex_weights: vec![(Sex::Female, 0.69), (Sex::Male, 0.31)],
            age_bands: AgeBands::default(),
            region_weights,
            semi_urban_share: 0.30,
            profession_weights: vec![
                (Profession::InformalSector, 0.60),
                (Profession::CivilServant, 0.10),
                (Profession::Commerce, 0.15),
                (Profession::Agriculture, 0.08),
                (Profession::Fishing, 0.04),
                (Profession::Unemployed, 0.03),
            ],
            education_weights: vec![
                (EducationLevel::NoSchooling, 0.35),
                (EducationLevel::Primary, 0.30),
                (EducationLevel::Secondary, 0.25),
                (EducationLevel::Higher, 0.10),
            ],
            lifestyle: LifestyleRates::default(),
            family_history_rate: 0.25,
            treatment: TreatmentRates::default(),
        }
    }
}

impl PopulationParameters {
    /// Check every probability and categorical weight vector
    pub fn validate(&self) -> Result<()> {
        validate_weights("sex", &weights_of(&self.sex_weights))?;
        validate_weights("region", &weights_of(&self.region_weights))?;
        validate_weights("profession", &weights_of(&self.profession_weights))?;
        validate_weights("education", &weights_of(&self.education_weights))?;

        let rates = [
            ("age_bands.young_share", self.age_bands.young_share),
            (
                "age_bands.middle_share_of_rest",
                self.age_bands.middle_share_of_rest,
            ),
            ("semi_urban_share", self.semi_urban_share),
            ("lifestyle.male_smoking", self.lifestyle.male_smoking),
            ("lifestyle.female_smoking", self.lifestyle.female_smoking),
            ("lifestyle.alcohol", self.lifestyle.alcohol),
            (
                "lifestyle.sufficient_activity",
                self.lifestyle.sufficient_activity,
            ),
            ("lifestyle.excess_salt", self.lifestyle.excess_salt),
            ("lifestyle.high_sugar", self.lifestyle.high_sugar),
            ("family_history_rate", self.family_history_rate),
            ("treatment.hypertension", self.treatment.hypertension),
            ("treatment.diabetes", self.treatment.diabetes),
            ("treatment.cholesterol", self.treatment.cholesterol),
        ];
        for (name, rate) in rates {
            validate_rate(name, rate)?;
        }

        Ok(())
    }
}

fn weights_of<T>(pairs: &[(T, f64)]) -> Vec<f64> {
    pairs.iter().map(|(_, weight)| *weight).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        let params = PopulationParameters::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.region_weights.len(), 14);
        assert_eq!(params.region_weights[0], (Region::Dakar, 0.25));
    }

    #[test]
    fn test_unbalanced_weights_are_rejected() {
        let params = PopulationParameters {
            education_weights: vec![
                (EducationLevel::NoSchooling, 0.5),
                (EducationLevel::Primary, 0.3),
            ],
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_out_of_range_rate_is_rejected() {
        let mut params = PopulationParameters::default();
        params.lifestyle.alcohol = 1.2;
        assert!(params.validate().is_err());

        let mut params = PopulationParameters::default();
        params.treatment.diabetes = -0.1;
        assert!(params.validate().is_err());
    }
}
