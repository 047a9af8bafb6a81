//! Error types for the mortgage calculator
//!
//! This module defines all error types that can occur while validating loan
//! terms, computing schedules, and reading or writing CSV files.
//!
//! # Error Categories
//!
//! - **Input Errors**: A loan field is missing, negative, or the mode is unknown
//! - **Calculation Errors**: Divergent payment, empty schedule, zero divisor, overflow
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.

use super::schedule::MonthRecord;
use super::Month;
use thiserror::Error;

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, MortgageError>;

/// Main error type for the mortgage calculator
///
/// Every variant is recoverable: the calculation functions return it instead
/// of panicking, and the CLI layer decides how to present it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MortgageError {
    /// A loan input violated a validation rule
    ///
    /// Raised before any calculation starts, so no partial schedule exists.
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field
        field: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The payment does not cover the accruing interest
    ///
    /// The debt stopped shrinking at `month`. The months computed before that
    /// point are kept in `schedule`; the diverging month is not part of it.
    #[error("Payment insufficient: debt stops decreasing at month {month}")]
    PaymentInsufficient {
        /// Month at which the balance failed to decrease
        month: Month,
        /// Records accumulated before the divergence
        schedule: Vec<MonthRecord>,
    },

    /// The calculation produced no months at all
    ///
    /// Happens when the principal is already zero. An empty schedule cannot be
    /// exported.
    #[error("Empty schedule: nothing to repay")]
    EmptySchedule,

    /// The annuity denominator evaluated to zero
    #[error("Division by zero computing the level payment over {term_months} months")]
    DivisionByZero {
        /// Term the payment was requested for
        term_months: Month,
    },

    /// A checked decimal operation overflowed
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
    },

    /// The debt was not closed within the supported horizon
    #[error("Schedule exceeds {limit} months without repaying the debt")]
    HorizonExceeded {
        /// Maximum number of months simulated
        limit: Month,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },
}

// Conversion from io::Error to MortgageError
impl From<std::io::Error> for MortgageError {
    fn from(error: std::io::Error) -> Self {
        MortgageError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to MortgageError
impl From<csv::Error> for MortgageError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        MortgageError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl MortgageError {
    /// Create an InvalidInput error
    pub fn invalid_input(field: &str, reason: &str) -> Self {
        MortgageError::InvalidInput {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create a PaymentInsufficient error carrying the partial schedule
    pub fn payment_insufficient(month: Month, schedule: Vec<MonthRecord>) -> Self {
        MortgageError::PaymentInsufficient { month, schedule }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(term_months: Month) -> Self {
        MortgageError::DivisionByZero { term_months }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str) -> Self {
        MortgageError::ArithmeticOverflow {
            operation: operation.to_string(),
        }
    }

    /// Create a HorizonExceeded error
    pub fn horizon_exceeded(limit: Month) -> Self {
        MortgageError::HorizonExceeded { limit }
    }

    /// Partial schedule attached to a divergence, if any
    pub fn partial_schedule(&self) -> Option<&[MonthRecord]> {
        match self {
            MortgageError::PaymentInsufficient { schedule, .. } => Some(schedule),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::invalid_input(
        MortgageError::InvalidInput { field: "principal".to_string(), reason: "must be non-negative".to_string() },
        "Invalid input for principal: must be non-negative"
    )]
    #[case::payment_insufficient(
        MortgageError::PaymentInsufficient { month: 1, schedule: vec![] },
        "Payment insufficient: debt stops decreasing at month 1"
    )]
    #[case::empty_schedule(MortgageError::EmptySchedule, "Empty schedule: nothing to repay")]
    #[case::division_by_zero(
        MortgageError::DivisionByZero { term_months: 0 },
        "Division by zero computing the level payment over 0 months"
    )]
    #[case::arithmetic_overflow(
        MortgageError::ArithmeticOverflow { operation: "interest".to_string() },
        "Arithmetic overflow in interest"
    )]
    #[case::horizon_exceeded(
        MortgageError::HorizonExceeded { limit: 120000 },
        "Schedule exceeds 120000 months without repaying the debt"
    )]
    #[case::file_not_found(
        MortgageError::FileNotFound { path: "loans.csv".to_string() },
        "File not found: loans.csv"
    )]
    #[case::parse_error_with_line(
        MortgageError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        MortgageError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    fn test_error_display(#[case] error: MortgageError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::invalid_input(
        MortgageError::invalid_input("term_months", "must be non-negative"),
        MortgageError::InvalidInput { field: "term_months".to_string(), reason: "must be non-negative".to_string() }
    )]
    #[case::division_by_zero(
        MortgageError::division_by_zero(0),
        MortgageError::DivisionByZero { term_months: 0 }
    )]
    #[case::arithmetic_overflow(
        MortgageError::arithmetic_overflow("power"),
        MortgageError::ArithmeticOverflow { operation: "power".to_string() }
    )]
    fn test_helper_functions(#[case] result: MortgageError, #[case] expected: MortgageError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_partial_schedule_only_for_divergence() {
        let diverged = MortgageError::payment_insufficient(3, vec![]);
        assert_eq!(diverged.partial_schedule(), Some(&[][..]));
        assert_eq!(MortgageError::EmptySchedule.partial_schedule(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: MortgageError = io_error.into();
        assert!(matches!(error, MortgageError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }
}
