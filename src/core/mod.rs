//! Core calculation module
//!
//! This module contains the pure amortization engine:
//! - `rate` - Rate tier lookup (month 1-12 vs. month 13 onward)
//! - `step` - One month of interest accrual, clamping and repayment
//! - `term` - Term from a fixed payment, and the shared schedule loop
//! - `annuity` - Level payment over a fixed term
//! - `bank` - Bank-style schedule with a payment switch at month 13
//! - `engine` - Mode dispatch
//! - `traits` - Calculator abstraction used by the processing strategies
//! - `batch` - Scenario evaluation and concurrent batches for the async strategy
//!
//! Nothing in here performs I/O. Only the batch processor logs, when a task fails.

pub mod annuity;
pub mod bank;
pub mod batch;
pub mod engine;
pub mod rate;
pub mod step;
pub mod term;
pub mod traits;

pub use annuity::compute_level_payment;
pub use bank::compute_bank_schedule;
pub use batch::{evaluate_scenario, BatchProcessor};
pub use engine::MortgageEngine;
pub use rate::{rate_for, RATE_TIER_BOUNDARY};
pub use step::{amortization_step, Step};
pub use term::{compute_term, DEBT_EPSILON, MAX_SCHEDULE_MONTHS};
pub use traits::ScheduleCalculator;

use crate::types::{MortgageError, Result};
use rust_decimal::Decimal;

/// Turn a checked decimal operation into a crate result
fn checked(value: Option<Decimal>, operation: &str) -> Result<Decimal> {
    value.ok_or_else(|| MortgageError::arithmetic_overflow(operation))
}
