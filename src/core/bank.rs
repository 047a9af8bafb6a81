//! Bank-style amortization
//!
//! Banks usually quote the first-year rate as if it held for the whole term,
//! then re-price the loan once the second tier starts: at month 13 the payment
//! is recomputed as the level payment of the remaining debt over the remaining
//! term at the second-year rate.

use super::annuity::compute_level_payment;
use super::rate::RATE_TIER_BOUNDARY;
use super::term::run_schedule;
use crate::types::{Month, Result, ScheduleResult};
use rust_decimal::Decimal;

/// Compute a bank-style schedule with a payment switch at month 13
///
/// # Returns
///
/// The schedule with `payment` set to the first-year payment and `payment2`
/// set to the recomputed payment. `payment2` stays `None` for terms of 12
/// months or less, where the second tier is never reached.
///
/// # Errors
///
/// - `DivisionByZero` for a zero-month term
/// - `EmptySchedule` when the principal is zero
/// - `PaymentInsufficient`, `HorizonExceeded` and `ArithmeticOverflow` as in
///   [`compute_term`](super::term::compute_term)
pub fn compute_bank_schedule(
    principal: Decimal,
    rate_year1: Decimal,
    rate_year2: Decimal,
    term_months: Month,
) -> Result<ScheduleResult> {
    let payment1 = compute_level_payment(principal, rate_year1, rate_year1, term_months)?;

    let mut payment2 = None;
    let mut active_payment = payment1;
    let switch_month = RATE_TIER_BOUNDARY + 1;

    let records = run_schedule(principal, rate_year1, rate_year2, |month, debt| {
        if month == switch_month && term_months > RATE_TIER_BOUNDARY {
            let recomputed = compute_level_payment(
                debt,
                rate_year2,
                rate_year2,
                term_months - RATE_TIER_BOUNDARY,
            )?;
            payment2 = Some(recomputed);
            active_payment = recomputed;
        }
        Ok(active_payment)
    })?;

    Ok(ScheduleResult {
        total_months: records.len() as Month,
        records,
        payment: payment1,
        payment2,
    })
}
