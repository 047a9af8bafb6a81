//! Mortgage Calculator CLI
//!
//! Command-line interface for two-tier-rate mortgage schedules.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- term --principal 100000 --rate-year1 10 --rate-year2 8 --payment 2000
//! cargo run -- payment --principal 100000 --rate-year1 10 --rate-year2 8 --term 60 -o schedule.csv
//! cargo run -- bank --principal 100000 --rate-year1 10 --rate-year2 8 --term 60
//! cargo run -- batch --strategy async --batch-size 200 scenarios.csv > summaries.csv
//! ```
//!
//! Single-loan subcommands export the schedule as CSV to `--output` or stdout.
//! `batch` reads scenario rows and writes one summary row per scenario.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid input, insufficient payment, file not found, etc.)

use mortgage_calculator::cli::{self, Command};
use mortgage_calculator::core::MortgageEngine;
use mortgage_calculator::io::write_schedule_csv;
use mortgage_calculator::strategy;
use mortgage_calculator::telemetry;
use mortgage_calculator::types::{LoanInput, MortgageError};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process;
use std::time::Instant;

fn main() {
    let args = cli::parse_args();

    if let Err(e) = telemetry::init(&args.to_telemetry_config()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let started = Instant::now();
    tracing::info!("Mortgage calculator started");

    let result = run(&args.command);

    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "Finished");

    if let Err(e) = result {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        if let Some(partial) = e.partial_schedule().filter(|s| !s.is_empty()) {
            eprintln!(
                "{} months were scheduled before the payment stopped covering interest",
                partial.len()
            );
        }
        process::exit(1);
    }
}

fn run(command: &Command) -> Result<(), MortgageError> {
    match command {
        Command::Batch(batch) => {
            let config = if matches!(batch.strategy, cli::StrategyType::Async) {
                Some(batch.to_batch_config())
            } else {
                None
            };
            tracing::info!(
                input = %batch.input_file.display(),
                strategy = ?batch.strategy,
                "Running scenario batch"
            );

            let strategy = strategy::create_strategy(batch.strategy, config);
            let mut output = std::io::stdout();
            strategy.process(&batch.input_file, &mut output)
        }
        single => match single.to_loan_input() {
            Some(input) => export_schedule(&input, single.output()),
            None => Ok(()),
        },
    }
}

fn export_schedule(input: &LoanInput, output: Option<&Path>) -> Result<(), MortgageError> {
    let terms = input.validate()?;
    tracing::info!(
        mode = terms.mode.code(),
        principal = %terms.principal,
        rate_year1 = %terms.rate_year1,
        rate_year2 = %terms.rate_year2,
        "Calculating {}",
        terms.mode.description()
    );

    let result = MortgageEngine::new().calculate(&terms)?;
    tracing::info!(
        total_months = result.total_months,
        payment = %result.payment,
        "Schedule computed"
    );

    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| MortgageError::IoError {
                message: format!("Failed to create file '{}': {}", path.display(), e),
            })?;
            let mut writer = BufWriter::new(file);
            write_schedule_csv(&terms, &result, &mut writer)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), "Schedule written");
            Ok(())
        }
        None => write_schedule_csv(&terms, &result, &mut std::io::stdout()),
    }
}
