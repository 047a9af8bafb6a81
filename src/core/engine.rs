//! Mortgage calculation engine
//!
//! This module provides the MortgageEngine that routes validated loan terms to
//! one of the three calculations:
//! - term from payment: the payment is known, iterate until the debt is repaid
//! - payment from term: derive the level payment, then materialize its schedule
//! - bank-style: first-year payment with a recomputed payment from month 13
//!
//! The engine is stateless. Every call builds a fresh result and performs no
//! I/O, so independent calls can run on any thread.

use crate::core::annuity::compute_level_payment;
use crate::core::bank::compute_bank_schedule;
use crate::core::term::compute_term;
use crate::core::traits::ScheduleCalculator;
use crate::types::{CalculationMode, LoanTerms, Result, ScheduleResult};

/// Mortgage calculation engine
#[derive(Debug, Clone, Copy, Default)]
pub struct MortgageEngine;

impl MortgageEngine {
    /// Create a new MortgageEngine
    pub fn new() -> Self {
        MortgageEngine
    }

    /// Compute the schedule for the given loan terms
    ///
    /// Routes the terms to the calculation matching their mode. For
    /// payment-from-term the realized `total_months` comes from the schedule
    /// itself and may differ from the requested term by one month.
    ///
    /// # Arguments
    ///
    /// * `terms` - Validated loan terms
    ///
    /// # Returns
    ///
    /// * `Ok(ScheduleResult)` with at least one month
    /// * `Err(MortgageError)` if the calculation failed
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The payment does not cover the interest (`PaymentInsufficient`)
    /// - The principal is zero (`EmptySchedule`)
    /// - The term is zero months (`DivisionByZero`)
    /// - A decimal operation overflows (`ArithmeticOverflow`)
    /// - The debt is not repaid within the horizon (`HorizonExceeded`)
    pub fn calculate(&self, terms: &LoanTerms) -> Result<ScheduleResult> {
        match terms.mode {
            CalculationMode::TermFromPayment { monthly_payment } => compute_term(
                terms.principal,
                terms.rate_year1,
                terms.rate_year2,
                monthly_payment,
            ),
            CalculationMode::PaymentFromTerm { term_months } => {
                let payment = compute_level_payment(
                    terms.principal,
                    terms.rate_year1,
                    terms.rate_year2,
                    term_months,
                )?;
                compute_term(terms.principal, terms.rate_year1, terms.rate_year2, payment)
            }
            CalculationMode::BankStyle { term_months } => compute_bank_schedule(
                terms.principal,
                terms.rate_year1,
                terms.rate_year2,
                term_months,
            ),
        }
    }
}

impl ScheduleCalculator for MortgageEngine {
    fn calculate(&self, terms: &LoanTerms) -> Result<ScheduleResult> {
        MortgageEngine::calculate(self, terms)
    }
}
