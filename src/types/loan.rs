//! Loan input types for the mortgage calculator
//!
//! This module defines the calculation modes, the raw input as collected from
//! the command line or a CSV row, and the validated, immutable loan terms the
//! engine works on.

use super::error::{MortgageError, Result};
use super::Month;
use rust_decimal::Decimal;

/// Which value the caller knows and which one the engine derives
///
/// Each variant carries the mode-specific field, so a term-from-payment
/// calculation can never be built without a payment (and vice versa).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationMode {
    /// Payment is known; derive the term and the schedule
    TermFromPayment {
        /// Fixed monthly payment
        monthly_payment: Decimal,
    },

    /// Term is known; derive a level payment and the schedule
    PaymentFromTerm {
        /// Loan term in months
        term_months: Month,
    },

    /// Term is known; derive the payment the way a bank quotes it, with a
    /// recomputed payment once the second rate tier starts
    BankStyle {
        /// Loan term in months
        term_months: Month,
    },
}

impl CalculationMode {
    /// Numeric code used by the input collector and the exporter (1, 2 or 3)
    pub fn code(&self) -> u8 {
        match self {
            CalculationMode::TermFromPayment { .. } => 1,
            CalculationMode::PaymentFromTerm { .. } => 2,
            CalculationMode::BankStyle { .. } => 3,
        }
    }

    /// Human-readable description of the mode
    pub fn description(&self) -> &'static str {
        match self {
            CalculationMode::TermFromPayment { .. } => "term from monthly payment",
            CalculationMode::PaymentFromTerm { .. } => "monthly payment from term",
            CalculationMode::BankStyle { .. } => "bank-style calculation",
        }
    }
}

/// Validated loan terms
///
/// Only constructed through [`LoanInput::validate`], so every numeric field is
/// known to be non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanTerms {
    /// Amount borrowed
    pub principal: Decimal,

    /// Annual rate in percent for months 1 to 12
    pub rate_year1: Decimal,

    /// Annual rate in percent from month 13 onward
    pub rate_year2: Decimal,

    /// Calculation mode with its mode-specific field
    pub mode: CalculationMode,
}

/// Raw loan input before validation
///
/// This is what the input collector hands over: the CLI fills it from flags,
/// the CSV readers fill it from a scenario row. Values may still be negative
/// or missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoanInput {
    /// Mode code: 1 (term from payment), 2 (payment from term), 3 (bank-style)
    pub mode: u8,
    pub principal: Decimal,
    pub rate_year1: Decimal,
    pub rate_year2: Decimal,

    /// Required for mode 1, ignored otherwise
    pub monthly_payment: Option<Decimal>,

    /// Required for modes 2 and 3, ignored otherwise
    pub term_months: Option<i64>,
}

impl LoanInput {
    /// Check every validation rule and build the immutable loan terms
    ///
    /// Rules are checked in a fixed order (mode, principal, rates, then the
    /// mode-specific field) and the first violation is reported.
    ///
    /// # Errors
    ///
    /// Returns `MortgageError::InvalidInput` if:
    /// - The mode is not 1, 2 or 3
    /// - The principal or either rate is negative
    /// - The mode-specific field is missing or negative
    /// - The term does not fit in a month counter
    pub fn validate(&self) -> Result<LoanTerms> {
        if !(1..=3).contains(&self.mode) {
            return Err(MortgageError::invalid_input(
                "mode",
                &format!("unknown mode {}, expected 1, 2 or 3", self.mode),
            ));
        }

        non_negative("principal", self.principal)?;
        non_negative("rate_year1", self.rate_year1)?;
        non_negative("rate_year2", self.rate_year2)?;

        let mode = match self.mode {
            1 => {
                let monthly_payment = self.monthly_payment.ok_or_else(|| {
                    MortgageError::invalid_input("monthly_payment", "required for mode 1")
                })?;
                non_negative("monthly_payment", monthly_payment)?;
                CalculationMode::TermFromPayment { monthly_payment }
            }
            code => {
                let term_months = self.validated_term(code)?;
                if code == 2 {
                    CalculationMode::PaymentFromTerm { term_months }
                } else {
                    CalculationMode::BankStyle { term_months }
                }
            }
        };

        Ok(LoanTerms {
            principal: self.principal,
            rate_year1: self.rate_year1,
            rate_year2: self.rate_year2,
            mode,
        })
    }

    fn validated_term(&self, code: u8) -> Result<Month> {
        let term = self.term_months.ok_or_else(|| {
            MortgageError::invalid_input("term_months", &format!("required for mode {}", code))
        })?;

        if term < 0 {
            return Err(MortgageError::invalid_input(
                "term_months",
                &format!("must be non-negative, got {}", term),
            ));
        }

        Month::try_from(term)
            .map_err(|_| MortgageError::invalid_input("term_months", "value is too large"))
    }
}

fn non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(MortgageError::invalid_input(
            field,
            &format!("must be non-negative, got {}", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn input(mode: u8) -> LoanInput {
        LoanInput {
            mode,
            principal: dec!(100000),
            rate_year1: dec!(10),
            rate_year2: dec!(8),
            monthly_payment: Some(dec!(2000)),
            term_months: Some(120),
        }
    }

    #[rstest]
    #[case::term_from_payment(1, CalculationMode::TermFromPayment { monthly_payment: dec!(2000) })]
    #[case::payment_from_term(2, CalculationMode::PaymentFromTerm { term_months: 120 })]
    #[case::bank_style(3, CalculationMode::BankStyle { term_months: 120 })]
    fn test_validate_builds_mode(#[case] mode: u8, #[case] expected: CalculationMode) {
        let terms = input(mode).validate().unwrap();
        assert_eq!(terms.mode, expected);
        assert_eq!(terms.mode.code(), mode);
        assert_eq!(terms.principal, dec!(100000));
    }

    #[rstest]
    #[case::unknown_mode(LoanInput { mode: 4, ..input(1) }, "mode")]
    #[case::zero_mode(LoanInput { mode: 0, ..input(1) }, "mode")]
    #[case::negative_principal(LoanInput { principal: dec!(-1), ..input(1) }, "principal")]
    #[case::negative_rate1(LoanInput { rate_year1: dec!(-0.5), ..input(2) }, "rate_year1")]
    #[case::negative_rate2(LoanInput { rate_year2: dec!(-3), ..input(3) }, "rate_year2")]
    #[case::negative_payment(LoanInput { monthly_payment: Some(dec!(-10)), ..input(1) }, "monthly_payment")]
    #[case::missing_payment(LoanInput { monthly_payment: None, ..input(1) }, "monthly_payment")]
    #[case::negative_term(LoanInput { term_months: Some(-12), ..input(2) }, "term_months")]
    #[case::missing_term(LoanInput { term_months: None, ..input(3) }, "term_months")]
    #[case::huge_term(LoanInput { term_months: Some(i64::MAX), ..input(2) }, "term_months")]
    fn test_validate_rejects(#[case] input: LoanInput, #[case] expected_field: &str) {
        match input.validate() {
            Err(MortgageError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("Expected InvalidInput for {}, got {:?}", expected_field, other),
        }
    }

    #[test]
    fn test_validate_ignores_field_of_other_mode() {
        // A negative term is irrelevant when the payment is the known value
        let raw = LoanInput {
            term_months: Some(-5),
            ..input(1)
        };
        assert!(raw.validate().is_ok());
    }

    #[test]
    fn test_validate_accepts_zero_values() {
        let raw = LoanInput {
            mode: 2,
            principal: Decimal::ZERO,
            rate_year1: Decimal::ZERO,
            rate_year2: Decimal::ZERO,
            monthly_payment: None,
            term_months: Some(0),
        };
        let terms = raw.validate().unwrap();
        assert_eq!(terms.mode, CalculationMode::PaymentFromTerm { term_months: 0 });
    }
}
