//! Asynchronous CSV reader with batch interface
//!
//! Provides batch reading of loan scenarios from a CSV stream for the async
//! processing strategy.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - futures' AsyncRead so any async byte source works (tokio files via compat)
//! - Batch reading so scenarios can be evaluated concurrently
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Scenarios
//!                  ↓
//!           csv_format module
//!           (ScenarioRecord, convert_scenario_record)
//! ```

use crate::io::csv_format::{convert_scenario_record, ScenarioRecord};
use crate::io::sync_reader::with_line;
use crate::types::{MortgageError, Result, Scenario, ScenarioId};
use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::io::AsyncRead;

/// Asynchronous CSV reader
///
/// Scenario ids follow the same numbering as [`SyncReader`](super::SyncReader):
/// the 1-based data row, counted across batches.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncReader<R>,
    headers: Option<StringRecord>,
    record: StringRecord,
    rows_read: ScenarioId,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_reader(reader);

        Self {
            csv_reader,
            headers: None,
            record: StringRecord::new(),
            rows_read: 0,
        }
    }

    /// Read a batch of scenarios
    ///
    /// Reads rows until `batch_size` scenarios were converted. Rows that fail
    /// to parse are logged and skipped; they still consume a scenario id.
    ///
    /// # Returns
    ///
    /// The successfully converted scenarios. An empty vector means the end
    /// of the input was reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<Scenario> {
        let mut batch = Vec::with_capacity(batch_size);

        let headers = match self.load_headers().await {
            Ok(headers) => headers,
            Err(e) => {
                tracing::warn!("{}", e);
                return batch;
            }
        };

        while batch.len() < batch_size {
            let line = match self.csv_reader.read_record(&mut self.record).await {
                Ok(false) => break,
                Ok(true) => self.record.position().map(|p| p.line()),
                Err(e) => {
                    self.rows_read += 1;
                    tracing::warn!(scenario = self.rows_read, "{}", csv_error(e));
                    continue;
                }
            };
            self.rows_read += 1;
            let id = self.rows_read;

            let converted = self
                .record
                .deserialize::<ScenarioRecord>(Some(&headers))
                .map_err(csv_error)
                .and_then(convert_scenario_record)
                .map_err(|e| with_line(e, line));

            match converted {
                Ok(input) => batch.push(Scenario { id, input }),
                Err(e) => tracing::warn!(scenario = id, "{}", e),
            }
        }

        batch
    }

    async fn load_headers(&mut self) -> Result<StringRecord> {
        if let Some(headers) = &self.headers {
            return Ok(headers.clone());
        }
        let headers = self.csv_reader.headers().await.map_err(csv_error)?.clone();
        self.headers = Some(headers.clone());
        Ok(headers)
    }
}

fn csv_error(error: csv_async::Error) -> MortgageError {
    MortgageError::ParseError {
        line: error.position().map(|p| p.line()),
        message: error.to_string(),
    }
}
