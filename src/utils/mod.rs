//! Utility modules for Arrow data, dates, file output and logging

pub mod arrow;
pub mod date;
pub mod io;
pub mod logging;

// Re-export commonly used items for convenience
pub use io::{OutputFormat, read_parquet, resolve_output, write_csv, write_parquet, write_population};
