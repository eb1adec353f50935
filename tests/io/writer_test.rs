use std::fs;

use cardio_synth::models::records_from_batch;
use cardio_synth::schema::population_schema;
use cardio_synth::utils::io::parquet::DEFAULT_BATCH_SIZE;
use cardio_synth::utils::read_parquet;
use cardio_synth::{OutputFormat, Result, write_csv, write_parquet};

use crate::utils::population;

#[test]
fn test_csv_has_bom_header_and_rows() -> Result<()> {
    let batch = population(25, 42)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("population.csv");
    write_csv(&batch, &path)?;

    let bytes = fs::read(&path)?;
    assert!(bytes.starts_with(b"\xEF\xBB\xBF"));

    let text = String::from_utf8(bytes[3..].to_vec()).expect("utf-8 output");
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 26);

    let header: Vec<&str> = lines[0].split(',').collect();
    let schema = population_schema();
    let expected: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(header, expected);
    assert!(lines[1].starts_with("SN000001,"));
    Ok(())
}

#[test]
fn test_parquet_round_trip() -> Result<()> {
    let batch = population(500, 42)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("population.parquet");
    write_parquet(&batch, &path)?;

    let batches = read_parquet(&path)?;
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    assert_eq!(rows, 500);

    let mut read_back = Vec::new();
    for b in &batches {
        read_back.extend(records_from_batch(b)?);
    }
    assert_eq!(read_back, records_from_batch(&batch)?);
    Ok(())
}

#[test]
fn test_output_format_follows_extension() -> Result<()> {
    let batch = population(5, 1)?;
    let dir = tempfile::tempdir()?;

    let parquet_path = dir.path().join("out.parquet");
    let format = OutputFormat::from_path(&parquet_path).unwrap_or_default();
    assert_eq!(format, OutputFormat::Parquet);
    format.write(&batch, &parquet_path)?;
    assert_eq!(&fs::read(&parquet_path)?[..4], b"PAR1");

    let fallback = cardio_synth::utils::write_population(&batch, &dir.path().join("out.dat"))?;
    assert_eq!(fallback, OutputFormat::Csv);
    Ok(())
}

#[test]
fn test_parquet_reads_back_in_fixed_size_batches() -> Result<()> {
    let batch = population(DEFAULT_BATCH_SIZE + 10, 3)?;
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("population.parquet");
    write_parquet(&batch, &path)?;

    let batches = read_parquet(&path)?;
    let sizes: Vec<usize> = batches.iter().map(|b| b.num_rows()).collect();
    assert_eq!(sizes, vec![DEFAULT_BATCH_SIZE, 10]);
    Ok(())
}
