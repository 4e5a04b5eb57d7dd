//! CSV output handler implementation
//!
//! Rows follow [`COLUMNS`]; every row has every column. No file is created
//! when there are no records.

use crate::model::{SpeakerRecord, COLUMNS};
use crate::output::traits::{OutputError, OutputResult, RecordSink};
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Writes records to a CSV file
pub struct CsvOutputHandler {
    path: PathBuf,
}

impl CsvOutputHandler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvOutputHandler {
    fn write_records(&mut self, records: &[SpeakerRecord]) -> OutputResult<usize> {
        if records.is_empty() {
            tracing::warn!("No records to write; {} left untouched", self.path.display());
            return Ok(0);
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = fs::File::create(&self.path)?;
        let written = write_csv(file, records)?;
        tracing::info!("Wrote {} records to {}", written, self.path.display());
        Ok(written)
    }
}

/// Writes the header and one row per record to any writer
///
/// Writes nothing, not even the header, for an empty slice.
pub fn write_csv<W: Write>(writer: W, records: &[SpeakerRecord]) -> OutputResult<usize> {
    if records.is_empty() {
        return Ok(0);
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(COLUMNS)?;
    for record in records {
        csv_writer.write_record(record.to_row())?;
    }
    csv_writer.flush()?;

    Ok(records.len())
}

/// Reads records back from CSV produced by [`write_csv`]
///
/// The header must match [`COLUMNS`] exactly.
pub fn read_csv<R: Read>(reader: R) -> OutputResult<Vec<SpeakerRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if !headers.iter().eq(COLUMNS.iter().copied()) {
        return Err(OutputError::Header(
            headers.iter().collect::<Vec<_>>().join(","),
        ));
    }

    let mut records = Vec::new();
    for row in csv_reader.records() {
        let row = row?;
        records.push(SpeakerRecord::from_row(row.iter()));
    }
    Ok(records)
}

/// Loads records from a CSV file on disk
pub fn load_records(path: &Path) -> OutputResult<Vec<SpeakerRecord>> {
    let file = fs::File::open(path)?;
    read_csv(file)
}
