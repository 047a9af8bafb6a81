//! Mortgage Calculator Library
//! # Overview
//!
//! This library computes amortization schedules for loans whose annual
//! interest rate changes once: one rate for months 1-12, another from
//! month 13. All amounts are exact decimals.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (LoanInput, MonthRecord, ScheduleResult, etc.)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Calculation components:
//!   - [`core::step`] - One month of interest and repayment
//!   - [`core::term`] - Term from a fixed payment
//!   - [`core::annuity`] - Level payment over a fixed term
//!   - [`core::bank`] - Bank-style schedule with a payment switch at month 13
//!   - [`core::engine`] - Mode dispatch
//!   - [`core::batch`] - Concurrent scenario evaluation
//! - [`io`] - CSV input for scenarios, schedule export, batch summaries
//! - [`strategy`] - Sync and async batch pipelines
//! - [`telemetry`] - Logging setup
//!
//! # Calculation Modes
//!
//! - **Term from payment** (1): Iterate a fixed payment until the debt is repaid
//! - **Payment from term** (2): Derive the level payment that repays the loan
//!   in a fixed number of months
//! - **Bank-style** (3): Level payment at the first-year rate, recomputed at
//!   month 13 over the remaining term at the second rate
//!
//! # Example
//!
//! ```
//! use mortgage_calculator::{LoanInput, MortgageEngine};
//! use rust_decimal_macros::dec;
//!
//! let input = LoanInput {
//!     mode: 2,
//!     principal: dec!(1200),
//!     rate_year1: dec!(0),
//!     rate_year2: dec!(0),
//!     monthly_payment: None,
//!     term_months: Some(12),
//! };
//! let terms = input.validate().unwrap();
//! let schedule = MortgageEngine::new().calculate(&terms).unwrap();
//!
//! assert_eq!(schedule.payment, dec!(100));
//! assert_eq!(schedule.total_months, 12);
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod telemetry;
pub mod types;

pub use core::{
    amortization_step, compute_bank_schedule, compute_level_payment, compute_term,
    MortgageEngine, ScheduleCalculator,
};
pub use io::{write_schedule_csv, write_summaries_csv};
pub use types::{
    CalculationMode, LoanInput, LoanTerms, Month, MonthRecord, MortgageError, ScheduleResult,
};
