//! Parquet file operations
//!
//! Writes population tables as Snappy-compressed Parquet and reads them back
//! into Arrow record batches.

use std::fs::File;
use std::path::Path;
use std::time::Instant;

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::error::Result;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Rows per record batch when reading Parquet
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Write a record batch to a Parquet file with Snappy compression
///
/// # Arguments
/// * `batch` - Population table to write
/// * `path` - Destination file, created or truncated
///
/// # Returns
/// `Ok(())` once the file footer is written, or an IO/Parquet error
pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing parquet file", path);

    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    log_operation_complete("wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}

/// Read a Parquet file into Arrow record batches
///
/// # Arguments
/// * `path` - Parquet file to read
///
/// # Returns
/// The file contents as batches of at most [`DEFAULT_BATCH_SIZE`] rows
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>> {
    let start = Instant::now();
    log_operation_start("Reading parquet file", path);

    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;
    let rows = batches.iter().map(RecordBatch::num_rows).sum();

    log_operation_complete("read", path, rows, Some(start.elapsed()));
    Ok(batches)
}
