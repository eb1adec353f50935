//! Console output utilities

use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::error::Result;

/// Print the name and type of every column
pub fn print_schema_info(batch: &RecordBatch) {
    println!("Columns ({}):", batch.num_columns());
    for field in batch.schema().fields() {
        println!("  - {} ({})", field.name(), field.data_type());
    }
}

/// Print the first `num_rows` rows as a table
pub fn print_sample_rows(batch: &RecordBatch, num_rows: usize) -> Result<()> {
    let preview = batch.slice(0, num_rows.min(batch.num_rows()));
    println!("First {} rows:", preview.num_rows());
    println!("{}", pretty_format_batches(&[preview])?);
    Ok(())
}
