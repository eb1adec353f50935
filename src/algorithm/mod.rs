//! Generation algorithms
//!
//! Contains the staged generator of the synthetic cardiovascular population
//! together with its statistics and validation.

pub mod population;
