//! Term from a fixed payment
//!
//! Repeats the amortization step with a constant payment until the debt is
//! repaid, and hosts the shared schedule loop the bank-style calculation
//! reuses with a payment that changes over time.

use super::step::amortization_step;
use crate::types::{Month, MonthRecord, MortgageError, Result, ScheduleResult};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Remaining debt at or below this amount counts as repaid
pub const DEBT_EPSILON: Decimal = dec!(0.000001);

/// Longest schedule the loop will simulate (10,000 years)
pub const MAX_SCHEDULE_MONTHS: Month = 120_000;

/// Run amortization steps until the debt is repaid
///
/// `payment_for` is asked for the target payment at the start of every month
/// and receives the month index and the debt at that point.
///
/// # Errors
///
/// - `PaymentInsufficient` when a month fails to reduce the debt; the records
///   computed so far travel with the error
/// - `EmptySchedule` when the principal is already repaid
/// - `HorizonExceeded` when the debt survives `MAX_SCHEDULE_MONTHS`
/// - `ArithmeticOverflow` from the step or from `payment_for`
pub(crate) fn run_schedule<F>(
    principal: Decimal,
    rate_year1: Decimal,
    rate_year2: Decimal,
    mut payment_for: F,
) -> Result<Vec<MonthRecord>>
where
    F: FnMut(Month, Decimal) -> Result<Decimal>,
{
    let mut records = Vec::new();
    let mut debt = principal;
    let mut month: Month = 0;

    while debt > DEBT_EPSILON {
        if month == MAX_SCHEDULE_MONTHS {
            return Err(MortgageError::horizon_exceeded(MAX_SCHEDULE_MONTHS));
        }
        month += 1;

        let target_payment = payment_for(month, debt)?;
        let step = amortization_step(debt, month, rate_year1, rate_year2, target_payment)?;

        // The diverging month is dropped, not recorded
        if step.is_divergent() {
            return Err(MortgageError::payment_insufficient(month, records));
        }

        debt = step.new_debt;
        records.push(step.record);
    }

    if records.is_empty() {
        return Err(MortgageError::EmptySchedule);
    }

    Ok(records)
}

/// Compute how long a fixed monthly payment takes to repay the loan
///
/// # Arguments
///
/// * `principal` - Amount borrowed
/// * `rate_year1` - Annual percent for months 1 to 12
/// * `rate_year2` - Annual percent from month 13
/// * `monthly_payment` - Payment applied every month (clamped on the last one)
///
/// # Returns
///
/// The full schedule with `total_months` equal to the number of records and
/// `payment` equal to `monthly_payment`.
///
/// # Errors
///
/// See [`run_schedule`]: divergence, empty schedule, horizon and overflow.
pub fn compute_term(
    principal: Decimal,
    rate_year1: Decimal,
    rate_year2: Decimal,
    monthly_payment: Decimal,
) -> Result<ScheduleResult> {
    let records = run_schedule(principal, rate_year1, rate_year2, |_, _| {
        Ok(monthly_payment)
    })?;

    Ok(ScheduleResult {
        total_months: records.len() as Month,
        records,
        payment: monthly_payment,
        payment2: None,
    })
}
