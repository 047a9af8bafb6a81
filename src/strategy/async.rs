//! Asynchronous batch processing strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ProcessingStrategy trait. It reads scenarios in batches and evaluates each
//! batch in parallel on a tokio multi-threaded runtime.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (chunking + task spawning)
//!         └── MortgageEngine (stateless, shared through Arc)
//! ```
//!
//! # Ordering
//!
//! Scenarios share no state, so tasks may finish in any order. Every outcome
//! carries its scenario id and the summary writer sorts by id, which keeps the
//! output identical to the synchronous strategy.

use crate::core::{BatchProcessor, MortgageEngine};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_summaries_csv;
use crate::io::sync_reader::open_error;
use crate::strategy::ProcessingStrategy;
use crate::types::MortgageError;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how many scenarios are read per batch and how many worker threads
/// evaluate a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of scenarios per batch
    pub batch_size: usize,
    /// Number of worker threads, and of chunks per batch
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    ///
    /// Zero values are replaced by their defaults with a warning.
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch processing strategy
///
/// Implements the ProcessingStrategy trait using multi-threaded, asynchronous
/// batch processing. Batches are read one after another; the scenarios of a
/// batch are evaluated in parallel.
///
/// # Configuration
///
/// The strategy accepts a BatchConfig with:
/// - `batch_size`: Number of scenarios per batch (default: 100)
/// - `max_concurrent_batches`: Number of worker threads (default: CPU cores)
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    /// Create a new AsyncProcessingStrategy with the specified configuration
    ///
    /// # Arguments
    ///
    /// * `config` - BatchConfig with batch_size and max_concurrent_batches
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Process scenarios from input file and write summaries to output
    ///
    /// This method implements the complete asynchronous batch pipeline:
    /// 1. Creates a tokio multi-threaded runtime
    /// 2. Reads scenarios in batches from CSV using AsyncReader
    /// 3. Evaluates each batch in parallel through the BatchProcessor
    /// 4. Writes all summaries, ordered by scenario id
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are returned
    /// immediately. Rows that cannot be parsed are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), MortgageError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| MortgageError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let outcomes = runtime.block_on(async {
            let processor = BatchProcessor::new(
                Arc::new(MortgageEngine::new()),
                self.config.max_concurrent_batches,
            );

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| open_error(input_path, e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);
            let mut reader = AsyncReader::new(compat_file);

            let mut outcomes = Vec::new();
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                tracing::debug!(size = batch.len(), "Evaluating batch");
                outcomes.extend(processor.process_batch(batch).await);
            }

            Ok::<_, MortgageError>(outcomes)
        })?;

        tracing::info!(scenarios = outcomes.len(), "Batch evaluated");

        write_summaries_csv(&outcomes, output)
    }
}
