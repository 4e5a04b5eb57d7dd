//! Output handler traits and types
//!
//! This module defines the trait interface for record sinks and the
//! summary reported at the end of a run.

use crate::model::SpeakerRecord;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected CSV header: {0}")]
    Header(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for the records of a finished run
pub trait RecordSink {
    /// Writes all records in order
    ///
    /// # Returns
    ///
    /// The number of records written. Implementations write nothing at all
    /// for an empty slice.
    fn write_records(&mut self, records: &[SpeakerRecord]) -> OutputResult<usize>;
}

/// What happened during one run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Listing pages requested
    pub pages_visited: u32,

    /// Unique speakers found on the listing
    pub speakers_found: usize,

    /// Records extracted from detail pages
    pub records_extracted: usize,

    /// Where the CSV went, if anything was written
    pub output_path: Option<PathBuf>,
}

impl RunSummary {
    pub fn duration_seconds(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }

    /// Speakers whose detail page could not be fetched
    pub fn skipped(&self) -> usize {
        self.speakers_found.saturating_sub(self.records_extracted)
    }

    /// Returns the detail-stage success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.speakers_found == 0 {
            return 0.0;
        }
        (self.records_extracted as f64 / self.speakers_found as f64) * 100.0
    }
}
