//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over loan scenarios from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader to read and deserialize CSV records sequentially,
//! delegating parsing and conversion to the csv_format module. It maintains streaming
//! behavior by processing CSV records one at a time without loading the entire file
//! into memory.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding `Result<Scenario, MortgageError>`
//! for each CSV row:
//!
//! ```no_run
//! use mortgage_calculator::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("scenarios.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(scenario) => println!("Scenario {}: {:?}", scenario.id, scenario.input),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are attached to every record error

use crate::io::csv_format::{convert_scenario_record, ScenarioRecord};
use crate::types::{MortgageError, Result, Scenario, ScenarioId};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

/// Synchronous CSV reader
///
/// Provides an iterator interface over loan scenarios. Each data row gets a
/// scenario id equal to its 1-based position after the header, whether or
/// not it parses.
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    headers: StringRecord,
    record: StringRecord,
    rows_read: ScenarioId,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (trailing optional columns may be absent)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Errors
    ///
    /// * `MortgageError::FileNotFound` if the path does not exist
    /// * `MortgageError::IoError` if the file could not be opened otherwise
    /// * `MortgageError::ParseError` if the header row cannot be read
    pub fn new(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);
        let headers = reader.headers()?.clone();

        Ok(Self {
            reader,
            headers,
            record: StringRecord::new(),
            rows_read: 0,
        })
    }
}

/// Map a failed open to the matching error variant
pub(crate) fn open_error(path: &Path, error: std::io::Error) -> MortgageError {
    if error.kind() == ErrorKind::NotFound {
        MortgageError::FileNotFound {
            path: path.display().to_string(),
        }
    } else {
        MortgageError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        }
    }
}

impl Iterator for SyncReader {
    type Item = Result<Scenario>;

    /// Get the next scenario from the CSV file
    ///
    /// Errors are tagged with the file line the record starts on, taken from
    /// the reader's position so blank lines and quoted line breaks are
    /// accounted for.
    fn next(&mut self) -> Option<Self::Item> {
        let read = self.reader.read_record(&mut self.record);

        let line = match read {
            Ok(false) => return None,
            Ok(true) => self.record.position().map(|p| p.line()),
            Err(e) => {
                self.rows_read += 1;
                return Some(Err(MortgageError::ParseError {
                    line: e.position().map(|p| p.line()),
                    message: e.to_string(),
                }));
            }
        };

        self.rows_read += 1;
        let id = self.rows_read;

        Some(
            self.record
                .deserialize::<ScenarioRecord>(Some(&self.headers))
                .map_err(MortgageError::from)
                .and_then(convert_scenario_record)
                .map(|input| Scenario { id, input })
                .map_err(|e| with_line(e, line)),
        )
    }
}

/// Attach a line number to a parse error that has none
pub(crate) fn with_line(error: MortgageError, line: Option<u64>) -> MortgageError {
    match error {
        MortgageError::ParseError { line: None, message } => MortgageError::ParseError { line, message },
        other => other,
    }
}
