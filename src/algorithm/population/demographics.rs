//! Demographics stage
//!
//! Creates the identity and demographic columns of every individual. This is
//! the only stage that does not read covariates from earlier columns.

use std::sync::Arc;

use arrow::array::{ArrayRef, Int32Array, StringArray};
use arrow::record_batch::RecordBatch;
use rand::Rng;
use rand::rngs::StdRng;

use crate::config::{AgeBands, PopulationParameters};
use crate::error::Result;
use crate::models::types::{EducationLevel, Profession, Region, Sex, Urbanicity};
use crate::sampling::Categorical;
use crate::schema;
use crate::utils::arrow::append_columns;

use super::stage::GenerationStage;

/// Prefix of the sequential patient identifier
pub const PATIENT_ID_PREFIX: &str = "SN";

/// Inclusive bounds of each age band
pub const YOUNG_AGES: (i32, i32) = (18, 35);
pub const MIDDLE_AGES: (i32, i32) = (36, 55);
pub const SENIOR_AGES: (i32, i32) = (56, 80);

/// Format the identifier of the individual at zero-based `index`
#[must_use]
pub fn patient_id(index: usize) -> String {
    format!("{PATIENT_ID_PREFIX}{:06}", index + 1)
}

/// Draw one age from the nested age-band mixture
pub fn sample_age<R: Rng + ?Sized>(rng: &mut R, bands: &AgeBands) -> i32 {
    let (low, high) = if rng.random::<f64>() < bands.young_share {
        YOUNG_AGES
    } else if rng.random::<f64>() < bands.middle_share_of_rest {
        MIDDLE_AGES
    } else {
        SENIOR_AGES
    };
    rng.random_range(low..=high)
}

/// Derive urbanicity from the region; non-urban regions split semi-urban/rural
pub fn sample_urbanicity<R: Rng + ?Sized>(
    rng: &mut R,
    region: Region,
    semi_urban_share: f64,
) -> Urbanicity {
    if region.is_urban() {
        Urbanicity::Urban
    } else if rng.random::<f64>() < semi_urban_share {
        Urbanicity::SemiUrban
    } else {
        Urbanicity::Rural
    }
}

/// Generator for identity, sex, age, region, urbanicity, profession and education
#[derive(Debug, Clone)]
pub struct DemographicsGenerator {
    sex: Categorical<Sex>,
    age_bands: AgeBands,
    region: Categorical<Region>,
    semi_urban_share: f64,
    profession: Categorical<Profession>,
    education: Categorical<EducationLevel>,
}

impl DemographicsGenerator {
    /// Build the categorical distributions, failing on invalid weights
    pub fn new(params: &PopulationParameters) -> Result<Self> {
        Ok(Self {
            sex: Categorical::new("sex", &params.sex_weights)?,
            age_bands: params.age_bands.clone(),
            region: Categorical::new("region", &params.region_weights)?,
            semi_urban_share: params.semi_urban_share,
            profession: Categorical::new("profession", &params.profession_weights)?,
            education: Categorical::new("education", &params.education_weights)?,
        })
    }
}

impl GenerationStage for DemographicsGenerator {
    fn name(&self) -> &'static str {
        "demographics"
    }

    fn generate(&self, input: &RecordBatch, rng: &mut StdRng) -> Result<RecordBatch> {
        let n = input.num_rows();

        let ids = StringArray::from_iter_values((0..n).map(patient_id));
        let sexes = self.sex.sample_n(rng, n);
        let ages: Vec<i32> = (0..n).map(|_| sample_age(rng, &self.age_bands)).collect();
        let regions = self.region.sample_n(rng, n);
        let urbanicity: Vec<Urbanicity> = regions
            .iter()
            .map(|region| sample_urbanicity(rng, *region, self.semi_urban_share))
            .collect();
        let professions = self.profession.sample_n(rng, n);
        let education = self.education.sample_n(rng, n);

        let columns: Vec<ArrayRef> = vec![
            Arc::new(ids),
            Arc::new(StringArray::from_iter_values(sexes.iter().map(|s| s.label()))),
            Arc::new(Int32Array::from(ages)),
            Arc::new(StringArray::from_iter_values(regions.iter().map(|r| r.label()))),
            Arc::new(StringArray::from_iter_values(urbanicity.iter().map(|u| u.label()))),
            Arc::new(StringArray::from_iter_values(professions.iter().map(|p| p.label()))),
            Arc::new(StringArray::from_iter_values(education.iter().map(|e| e.label()))),
        ];

        append_columns(input, schema::demographic_fields(), columns)
    }
}
