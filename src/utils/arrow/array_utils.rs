//! Utilities for working with Arrow arrays.
//!
//! Stages read their covariates from the batch produced by the previous stage
//! and append their own columns to a fresh batch. The helpers below do the
//! name lookups, downcasts and schema extension with clear errors.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, Float64Array, Int32Array, RecordBatch, RecordBatchOptions,
    StringArray, UInt8Array,
};
use arrow_schema::{Field, Schema};

use crate::error::{GeneratorError, Result};

/// Get the column index by name from a record batch
///
/// # Errors
/// Returns an error if the column does not exist
pub fn get_column_index(batch: &RecordBatch, column_name: &str) -> Result<usize> {
    batch
        .schema()
        .index_of(column_name)
        .map_err(|_| GeneratorError::ColumnNotFound {
            column: column_name.to_string(),
        })
}

/// Get a column from a record batch by name
pub fn get_column_by_name(batch: &RecordBatch, column_name: &str) -> Result<ArrayRef> {
    let idx = get_column_index(batch, column_name)?;
    Ok(batch.column(idx).clone())
}

/// Downcast a column to a specific array type with clear error messages
pub fn downcast_array<'a, A: Array + 'static>(
    array: &'a ArrayRef,
    column_name: &str,
    expected_type_name: &str,
) -> Result<&'a A> {
    array
        .as_any()
        .downcast_ref::<A>()
        .ok_or_else(|| GeneratorError::InvalidDataType {
            column: column_name.to_string(),
            expected: expected_type_name.to_string(),
        })
}

/// Values of an `Int32` column
pub fn int32_values(batch: &RecordBatch, column_name: &str) -> Result<Vec<i32>> {
    let column = get_column_by_name(batch, column_name)?;
    let array = downcast_array::<Int32Array>(&column, column_name, "Int32")?;
    Ok(array.values().to_vec())
}

/// Values of a `Float64` column
pub fn float64_values(batch: &RecordBatch, column_name: &str) -> Result<Vec<f64>> {
    let column = get_column_by_name(batch, column_name)?;
    let array = downcast_array::<Float64Array>(&column, column_name, "Float64")?;
    Ok(array.values().to_vec())
}

/// Values of a 0/1 `UInt8` flag column
pub fn flag_values(batch: &RecordBatch, column_name: &str) -> Result<Vec<u8>> {
    let column = get_column_by_name(batch, column_name)?;
    let array = downcast_array::<UInt8Array>(&column, column_name, "UInt8")?;
    Ok(array.values().to_vec())
}

/// Values of a `Utf8` column parsed through `parse`
///
/// Fails with `InvalidDataType` when a label is not recognised.
pub fn parse_string_values<T, F>(batch: &RecordBatch, column_name: &str, parse: F) -> Result<Vec<T>>
where
    F: Fn(&str) -> Option<T>,
{
    let column = get_column_by_name(batch, column_name)?;
    let array = downcast_array::<StringArray>(&column, column_name, "Utf8")?;
    array
        .iter()
        .map(|value| {
            value
                .and_then(&parse)
                .ok_or_else(|| GeneratorError::InvalidDataType {
                    column: column_name.to_string(),
                    expected: format!("a known label, got {value:?}"),
                })
        })
        .collect()
}

/// A batch with no columns that only carries a row count
pub fn empty_batch(num_rows: usize) -> Result<RecordBatch> {
    let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::empty()),
        Vec::new(),
        &options,
    )?)
}

/// Build a new batch holding every column of `batch` followed by `columns`
///
/// The input batch is left untouched; the new batch shares its column buffers.
pub fn append_columns(
    batch: &RecordBatch,
    fields: Vec<Field>,
    columns: Vec<ArrayRef>,
) -> Result<RecordBatch> {
    if fields.len() != columns.len() {
        return Err(GeneratorError::InvalidDataType {
            column: fields
                .iter()
                .map(|f| f.name().as_str())
                .collect::<Vec<_>>()
                .join(","),
            expected: format!("{} arrays, got {}", fields.len(), columns.len()),
        });
    }

    let schema = batch.schema();
    let all_fields: Vec<Field> = schema
        .fields()
        .iter()
        .map(|f| f.as_ref().clone())
        .chain(fields)
        .collect();
    let all_columns: Vec<ArrayRef> = batch.columns().iter().cloned().chain(columns).collect();

    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    Ok(RecordBatch::try_new_with_options(
        Arc::new(Schema::new(all_fields)),
        all_columns,
        &options,
    )?)
}
