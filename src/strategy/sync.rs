//! Synchronous processing strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates scenario evaluation by coordinating
//! between the SyncReader (for CSV input) and the MortgageEngine.
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Validation and calculation to `evaluate_scenario`
//! - CSV output to `csv_format::write_summaries_csv` (format handling)
//!
//! # Memory Efficiency
//!
//! Scenarios are read one at a time and each is reduced to a summary as soon
//! as it is evaluated, so memory usage is O(scenarios), never O(total months).

use crate::core::{evaluate_scenario, MortgageEngine};
use crate::io::csv_format::write_summaries_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::MortgageError;
use std::io::Write;
use std::path::Path;

/// Synchronous processing strategy
///
/// # Examples
///
/// ```no_run
/// use mortgage_calculator::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("scenarios.csv"), &mut output)
///     .expect("Processing failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Process scenarios from input file and write summaries to output
    ///
    /// This method orchestrates the complete synchronous pipeline:
    /// 1. Creates a SyncReader to stream scenario rows from the CSV file
    /// 2. Evaluates each scenario in file order
    /// 3. Writes one summary row per evaluated scenario
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Rows that cannot be parsed are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), MortgageError> {
        let engine = MortgageEngine::new();
        let reader = SyncReader::new(input_path)?;

        let mut outcomes = Vec::new();
        for result in reader {
            match result {
                Ok(scenario) => {
                    let outcome = evaluate_scenario(&engine, scenario);
                    if let Err(e) = &outcome.summary {
                        tracing::debug!(scenario = outcome.scenario.id, "Scenario failed: {}", e);
                    }
                    outcomes.push(outcome);
                }
                Err(e) => {
                    tracing::warn!("CSV parsing error: {}", e);
                }
            }
        }

        tracing::info!(scenarios = outcomes.len(), "Batch evaluated");

        write_summaries_csv(&outcomes, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "mode,principal,rate_year1,rate_year2,monthly_payment,term_months\n";
    const OUTPUT_HEADER: &str = "scenario,mode,principal,rate_year1,rate_year2,payment,payment2,total_months,total_paid,total_interest,status";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn run(content: &str) -> Vec<String> {
        let file = create_temp_csv(content);
        let mut output = Vec::new();
        SyncProcessingStrategy
            .process(file.path(), &mut output)
            .expect("Processing failed");
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_sync_strategy_processes_term_scenario() {
        let lines = run(&format!("{}1,300,0,0,100,\n", HEADER));

        assert_eq!(lines[0], OUTPUT_HEADER);
        assert_eq!(lines[1], "1,1,300,0,0,100.000,,3,300.000,0.000,ok");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_sync_strategy_processes_every_mode() {
        let lines = run(&format!(
            "{}term,250,0,0,100,\npayment,1200,0,0,,12\nbank,1200,0,0,,24\n",
            HEADER
        ));

        assert_eq!(lines[1], "1,1,250,0,0,100.000,,3,250.000,0.000,ok");
        assert_eq!(lines[2], "2,2,1200,0,0,100.000,,12,1200.000,0.000,ok");
        assert_eq!(lines[3], "3,3,1200,0,0,50.000,50.000,24,1200.000,0.000,ok");
    }

    #[test]
    fn test_sync_strategy_reports_failed_scenarios() {
        let lines = run(&format!("{}1,0,5,5,100,\n1,1000,0,0,,\n", HEADER));

        assert_eq!(lines[1], "1,1,0,5,5,,,,,,Empty schedule: nothing to repay");
        assert!(lines[2].starts_with("2,1,1000,0,0,,,,,,Invalid input for monthly_payment"));
    }

    #[test]
    fn test_sync_strategy_handles_missing_file() {
        let strategy = SyncProcessingStrategy;
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);
        assert_eq!(
            result.unwrap_err(),
            MortgageError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
    }

    #[test]
    fn test_sync_strategy_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }

    #[test]
    fn test_sync_strategy_continues_on_malformed_record() {
        // Second row has an invalid principal, the third is still evaluated
        let lines = run(&format!(
            "{}1,300,0,0,100,\n1,abc,0,0,100,\n1,500,0,0,100,\n",
            HEADER
        ));

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("1,"));
        assert!(lines[2].starts_with("3,1,500,"));
    }

    #[test]
    fn test_sync_strategy_header_only() {
        let lines = run(HEADER);
        assert_eq!(lines, vec![OUTPUT_HEADER.to_string()]);
    }
}
