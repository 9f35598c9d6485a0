//! Output module for writing batch results
//!
//! This module handles:
//! - Formatting one report line per result
//! - Writing the report to a file or to stdout
//! - Summarizing a batch into statistics

mod report;
pub mod stats;

pub use report::{format_result, open_output, write_report};
pub use stats::{log_statistics, BatchStatistics};
