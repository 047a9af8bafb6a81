use crate::strategy::BatchConfig;
use crate::telemetry::TelemetryConfig;
use crate::types::LoanInput;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};

/// Two-tier-rate mortgage amortization calculator
#[derive(Parser, Debug)]
#[command(name = "mortgage-calculator")]
#[command(
    about = "Compute mortgage schedules with a first-year and a later interest rate",
    long_about = None
)]
pub struct CliArgs {
    /// Log level or filter directive (RUST_LOG takes precedence)
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        global = true
    )]
    pub log_level: String,

    /// Write logs to this file instead of stderr
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Calculation to run
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Number of months needed to repay the loan at a fixed monthly payment
    Term {
        #[command(flatten)]
        loan: LoanArgs,

        /// Monthly payment
        #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
        payment: Decimal,
    },

    /// Level monthly payment that repays the loan over a fixed term
    Payment {
        #[command(flatten)]
        loan: LoanArgs,

        /// Term in months
        #[arg(long, value_name = "MONTHS", allow_hyphen_values = true)]
        term: i64,
    },

    /// Bank-style schedule: first-year payment, recomputed from month 13
    Bank {
        #[command(flatten)]
        loan: LoanArgs,

        /// Term in months
        #[arg(long, value_name = "MONTHS", allow_hyphen_values = true)]
        term: i64,
    },

    /// Compare many scenarios from a CSV file
    Batch(BatchArgs),
}

/// Loan parameters shared by the single-loan subcommands
#[derive(Args, Debug, Clone)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    pub principal: Decimal,

    /// Annual interest rate in percent for months 1-12
    #[arg(long = "rate-year1", value_name = "PERCENT", allow_hyphen_values = true)]
    pub rate_year1: Decimal,

    /// Annual interest rate in percent from month 13
    #[arg(long = "rate-year2", value_name = "PERCENT", allow_hyphen_values = true)]
    pub rate_year2: Decimal,

    /// Write the schedule to this file instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

/// Arguments of the `batch` subcommand
#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Input CSV file path containing scenario rows
    #[arg(value_name = "INPUT", help = "Path to the scenario CSV file")]
    pub input_file: PathBuf,

    /// Processing strategy to use for the batch
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Processing strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Number of scenarios per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of scenarios per batch (default: 100)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Number of worker threads evaluating a batch (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

/// Available processing strategies for scenario batches
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Logging configuration from the global flags
    pub fn to_telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
        }
    }
}

impl Command {
    /// Build the unvalidated loan input of a single-loan subcommand
    ///
    /// Returns `None` for `batch`.
    pub fn to_loan_input(&self) -> Option<LoanInput> {
        let (loan, mode, monthly_payment, term_months) = match self {
            Command::Term { loan, payment } => (loan, 1, Some(*payment), None),
            Command::Payment { loan, term } => (loan, 2, None, Some(*term)),
            Command::Bank { loan, term } => (loan, 3, None, Some(*term)),
            Command::Batch(_) => return None,
        };

        Some(LoanInput {
            mode,
            principal: loan.principal,
            rate_year1: loan.rate_year1,
            rate_year2: loan.rate_year2,
            monthly_payment,
            term_months,
        })
    }

    /// Export destination of a single-loan subcommand, `None` meaning stdout
    pub fn output(&self) -> Option<&Path> {
        match self {
            Command::Term { loan, .. } | Command::Payment { loan, .. } | Command::Bank { loan, .. } => {
                loan.output.as_deref()
            }
            Command::Batch(_) => None,
        }
    }
}

impl BatchArgs {
    /// Create a BatchConfig from CLI arguments
    ///
    /// Uses the provided values or falls back to defaults. Zero values are
    /// replaced by defaults with a warning.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
