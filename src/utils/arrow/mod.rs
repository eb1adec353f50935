//! Arrow data handling utilities
//!
//! Helpers for extracting typed covariates from record batches and for
//! extending batches stage by stage.

pub mod array_utils;

// Re-export commonly used functions for convenience
pub use array_utils::{
    append_columns, downcast_array, empty_batch, flag_values, float64_values,
    get_column_by_name, get_column_index, int32_values, parse_string_values,
};
