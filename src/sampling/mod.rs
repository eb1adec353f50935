//! Column-wise sampling primitives
//!
//! Every helper draws exactly one value per row, in row order, from the
//! generator it is handed. Stages compose these helpers column by column so
//! the sequence of draws is fixed by the column order alone.

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_distr::{Gamma, Normal};

use crate::error::{GeneratorError, Result};

/// Tolerance when checking that categorical weights sum to one
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Check that a probability lies in [0, 1]
pub fn validate_rate(name: &str, rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(GeneratorError::config(format!(
            "probability '{name}' must lie in [0, 1], got {rate}"
        )));
    }
    Ok(())
}

/// Check that a categorical weight vector is non-empty, non-negative and sums to one
pub fn validate_weights(name: &str, weights: &[f64]) -> Result<()> {
    if weights.is_empty() {
        return Err(GeneratorError::config(format!(
            "distribution '{name}' has no categories"
        )));
    }
    if let Some(weight) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(GeneratorError::config(format!(
            "distribution '{name}' has an invalid weight {weight}"
        )));
    }
    let total: f64 = weights.iter().sum();
    if (total - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(GeneratorError::config(format!(
            "weights of distribution '{name}' sum to {total}, expected 1"
        )));
    }
    Ok(())
}

/// Weighted draw over a closed set of categories
#[derive(Debug, Clone)]
pub struct Categorical<T> {
    categories: Vec<T>,
    index: WeightedIndex<f64>,
}

impl<T: Copy> Categorical<T> {
    /// Build the distribution, rejecting weight vectors that do not sum to one
    pub fn new(name: &str, weighted: &[(T, f64)]) -> Result<Self> {
        let weights: Vec<f64> = weighted.iter().map(|(_, w)| *w).collect();
        validate_weights(name, &weights)?;

        let index = WeightedIndex::new(&weights)
            .map_err(|e| GeneratorError::distribution(name, e))?;
        let categories = weighted.iter().map(|(category, _)| *category).collect();

        Ok(Self { categories, index })
    }

    /// Uniform distribution over the given categories
    pub fn uniform(name: &str, categories: &[T]) -> Result<Self> {
        let weight = 1.0 / categories.len().max(1) as f64;
        let weighted: Vec<(T, f64)> = categories.iter().map(|c| (*c, weight)).collect();
        Self::new(name, &weighted)
    }

    /// Draw a single category
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        self.categories[self.index.sample(rng)]
    }

    /// Draw one category per row
    pub fn sample_n<R: Rng + ?Sized>(&self, rng: &mut R, n: usize) -> Vec<T> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}

/// Draw one 0/1 flag per row with a fixed probability
pub fn bernoulli_n<R: Rng + ?Sized>(rng: &mut R, n: usize, p: f64) -> Vec<u8> {
    (0..n).map(|_| u8::from(rng.random_bool(p))).collect()
}

/// Draw one 0/1 flag per row with a row-specific probability
///
/// Probabilities are clamped to [0, 1] before drawing.
pub fn bernoulli_each<R, I>(rng: &mut R, probabilities: I) -> Vec<u8>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .map(|p| u8::from(rng.random_bool(p.clamp(0.0, 1.0))))
        .collect()
}

/// Draw one integer per row uniformly from the half-open range `[low, high)`
pub fn uniform_int_n<R: Rng + ?Sized>(rng: &mut R, n: usize, low: i32, high: i32) -> Vec<i32> {
    (0..n).map(|_| rng.random_range(low..high)).collect()
}

/// Draw one float per row uniformly from the half-open range `[low, high)`
pub fn uniform_n<R: Rng + ?Sized>(rng: &mut R, n: usize, low: f64, high: f64) -> Vec<f64> {
    (0..n).map(|_| rng.random_range(low..high)).collect()
}

/// Draw one unit-interval float per row
pub fn unit_n<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<f64> {
    (0..n).map(|_| rng.random::<f64>()).collect()
}

/// Draw one zero-mean Gaussian noise term per row
pub fn normal_noise_n<R: Rng + ?Sized>(rng: &mut R, n: usize, std_dev: f64) -> Result<Vec<f64>> {
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| GeneratorError::distribution("gaussian noise", e))?;
    Ok((0..n).map(|_| normal.sample(rng)).collect())
}

/// Draw one Gamma variate per row
pub fn gamma_n<R: Rng + ?Sized>(rng: &mut R, n: usize, shape: f64, scale: f64) -> Result<Vec<f64>> {
    let gamma = Gamma::new(shape, scale).map_err(|e| GeneratorError::distribution("gamma", e))?;
    Ok((0..n).map(|_| gamma.sample(rng)).collect())
}

/// Round half to even, as tabular tooling does when storing measurements
#[must_use]
pub fn round_half_even(value: f64) -> f64 {
    value.round_ties_even()
}

/// Round half to even at one decimal place
#[must_use]
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
