//! Processing strategy module for scenario batches
//!
//! This module defines the Strategy pattern for complete batch pipelines,
//! covering both CSV parsing and scenario evaluation. This allows different
//! processing implementations (synchronous, asynchronous batch) to be selected
//! at runtime. Both implementations produce byte-identical output for the same
//! input.

use crate::cli::StrategyType;
use crate::types::MortgageError;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for scenario batch pipelines
///
/// Each strategy must be able to read scenarios from a CSV file, evaluate
/// them with the mortgage engine, and write one summary row per scenario.
pub trait ProcessingStrategy: Send + Sync {
    /// Process scenarios from input file and write summaries to output
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the input CSV file containing scenario rows
    /// * `output` - Mutable reference to a writer for the summary CSV
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the batch completed (individual scenarios may have failed)
    /// * `Err(MortgageError)` if a fatal error occurred
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - The async runtime cannot be created
    /// - Output cannot be written
    ///
    /// Rows that fail to parse are logged and skipped. Scenarios that fail
    /// validation or calculation are reported in their output row and do not
    /// stop the batch.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), MortgageError>;
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create (Sync or Async)
/// * `config` - Optional configuration for async batch processing (ignored for sync)
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncProcessingStrategy::new(config))
        }
    }
}
