//! Logging utilities for output and progress tracking

pub mod console;
pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use console::{print_sample_rows, print_schema_info};
pub use self::log::{log_operation_complete, log_operation_start};
pub use progress::{create_stage_progress_bar, finish_progress_bar};
