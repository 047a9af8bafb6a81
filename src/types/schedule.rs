//! Schedule output types for the mortgage calculator
//!
//! This module defines the per-month record produced by every amortization
//! step and the finished schedule handed to the exporter.

use super::error::{MortgageError, Result};
use super::Month;
use rust_decimal::Decimal;

/// One month of an amortization schedule
///
/// Records are produced in strictly increasing `month` order and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthRecord {
    /// 1-based month index
    pub month: Month,

    /// Debt before this month's interest accrued
    pub opening_debt: Decimal,

    /// Interest accrued during this month
    pub interest_amount: Decimal,

    /// Annual rate in percent that was in effect this month
    pub interest_rate_percent: Decimal,

    /// Portion of the payment that reduced the debt
    ///
    /// Negative when the payment does not cover the interest.
    pub principal_paid: Decimal,

    /// Payment actually applied, clamped on the final month
    pub payment_applied: Decimal,
}

impl MonthRecord {
    /// Debt left after this month's payment
    pub fn closing_debt(&self) -> Decimal {
        self.opening_debt + self.interest_amount - self.payment_applied
    }
}

/// A finished amortization schedule
///
/// Carries the month records, the realized term, and the payment value(s) the
/// schedule was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleResult {
    /// Month records in order, `1..=total_months`
    pub records: Vec<MonthRecord>,

    /// Number of months needed to repay the debt
    pub total_months: Month,

    /// Payment the schedule starts with
    ///
    /// For bank-style schedules this is the first-year payment.
    pub payment: Decimal,

    /// Bank-style payment effective from month 13
    ///
    /// `None` for the other modes and for bank-style terms of 12 months or
    /// less, where the second tier is never reached.
    pub payment2: Option<Decimal>,
}

impl ScheduleResult {
    /// Sum of all payments applied
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the total does not fit in a Decimal.
    pub fn total_paid(&self) -> Result<Decimal> {
        checked_sum(self.records.iter().map(|r| r.payment_applied), "total paid")
    }

    /// Sum of all interest accrued
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the total does not fit in a Decimal.
    pub fn total_interest(&self) -> Result<Decimal> {
        checked_sum(self.records.iter().map(|r| r.interest_amount), "total interest")
    }

    /// Final month of the schedule
    pub fn last(&self) -> Option<&MonthRecord> {
        self.records.last()
    }
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>, operation: &str) -> Result<Decimal> {
    values.try_fold(Decimal::ZERO, |total, value| {
        total
            .checked_add(value)
            .ok_or_else(|| MortgageError::arithmetic_overflow(operation))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(month: Month, opening: Decimal, interest: Decimal, payment: Decimal) -> MonthRecord {
        MonthRecord {
            month,
            opening_debt: opening,
            interest_amount: interest,
            interest_rate_percent: dec!(12),
            principal_paid: payment - interest,
            payment_applied: payment,
        }
    }

    #[test]
    fn test_closing_debt() {
        let r = record(1, dec!(1000), dec!(10), dec!(510));
        assert_eq!(r.closing_debt(), dec!(500));
    }

    #[test]
    fn test_totals() {
        let result = ScheduleResult {
            records: vec![
                record(1, dec!(1000), dec!(10), dec!(510)),
                record(2, dec!(500), dec!(5), dec!(505)),
            ],
            total_months: 2,
            payment: dec!(510),
            payment2: None,
        };

        assert_eq!(result.total_paid(), Ok(dec!(1015)));
        assert_eq!(result.total_interest(), Ok(dec!(15)));
        assert_eq!(result.last().map(|r| r.month), Some(2));
    }

    #[test]
    fn test_empty_totals_are_zero() {
        let result = ScheduleResult {
            records: vec![],
            total_months: 0,
            payment: Decimal::ZERO,
            payment2: None,
        };

        assert_eq!(result.total_paid(), Ok(Decimal::ZERO));
        assert!(result.last().is_none());
    }

    #[test]
    fn test_totals_report_overflow() {
        let result = ScheduleResult {
            records: vec![
                record(1, Decimal::MAX, dec!(0), Decimal::MAX),
                record(2, Decimal::MAX, dec!(1), Decimal::MAX),
            ],
            total_months: 2,
            payment: Decimal::MAX,
            payment2: None,
        };

        assert_eq!(
            result.total_paid(),
            Err(MortgageError::arithmetic_overflow("total paid"))
        );
        assert_eq!(result.total_interest(), Ok(dec!(1)));
    }
}
