//! Delimited text output

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// UTF-8 byte order mark, so spreadsheet tools detect the accented labels
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Date format of the consultation date column
pub const CSV_DATE_FORMAT: &str = "%Y-%m-%d";

/// Write a record batch as comma-separated text with a header row
///
/// The file starts with a UTF-8 byte order mark and dates use
/// [`CSV_DATE_FORMAT`].
///
/// # Arguments
/// * `batch` - Population table to write
/// * `path` - Destination file, created or truncated
///
/// # Returns
/// `Ok(())` once every row is flushed, or an IO/Arrow error
pub fn write_csv(batch: &RecordBatch, path: &Path) -> Result<()> {
    let start = Instant::now();
    log_operation_start("Writing CSV file", path);

    let mut out = BufWriter::new(File::create(path)?);
    out.write_all(UTF8_BOM)?;

    let mut writer = WriterBuilder::new()
        .with_header(true)
        .with_date_format(CSV_DATE_FORMAT.to_string())
        .build(out);
    writer.write(batch)?;
    writer.into_inner().flush()?;

    log_operation_complete("wrote", path, batch.num_rows(), Some(start.elapsed()));
    Ok(())
}
