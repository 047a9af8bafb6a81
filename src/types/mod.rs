//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `loan`: Loan input, validation, and calculation modes
//! - `schedule`: Month records and finished schedules
//! - `scenario`: Numbered inputs and summaries for batch comparison
//! - `error`: Error types for the mortgage calculator

pub mod error;
pub mod loan;
pub mod scenario;
pub mod schedule;

/// Month index or month count
///
/// Month 1 is the first payment month.
pub type Month = u32;

pub use error::{MortgageError, Result};
pub use loan::{CalculationMode, LoanInput, LoanTerms};
pub use scenario::{Scenario, ScenarioId, ScenarioOutcome, ScheduleSummary};
pub use schedule::{MonthRecord, ScheduleResult};
