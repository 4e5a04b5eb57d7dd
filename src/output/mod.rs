//! Output module for writing and summarizing harvested records
//!
//! This module handles:
//! - Writing records to CSV in the fixed column order
//! - Reading a previous CSV back for reporting
//! - Aggregate statistics by company and country

mod csv_output;
pub mod stats;
mod traits;

pub use csv_output::{load_records, read_csv, write_csv, CsvOutputHandler};
pub use stats::{log_statistics, print_statistics, RecordStatistics};
pub use traits::{OutputError, OutputResult, RecordSink, RunSummary};
