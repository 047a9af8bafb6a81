//! Single-month amortization step
//!
//! Every schedule in the crate is built by repeating this step. It accrues one
//! month of interest, clamps the payment on the final month, and reports the
//! new debt. Deciding what to do with a divergent month is left to the caller.

use super::checked;
use super::rate::rate_for;
use crate::types::{Month, MonthRecord, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Outcome of one amortization step
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    /// Record for the month, with the pre-interest debt as `opening_debt`
    pub record: MonthRecord,

    /// Debt carried into the next month
    pub new_debt: Decimal,
}

impl Step {
    /// Whether the balance failed to shrink this month
    ///
    /// A divergent month must not be appended to a schedule.
    pub fn is_divergent(&self) -> bool {
        self.new_debt >= self.record.opening_debt
    }
}

/// Compute one month of the schedule
///
/// 1. Selects the annual rate for `month` (tier 1 through month 12)
/// 2. Accrues `debt * (rate / 100) / 12` of interest
/// 3. Clamps the payment to the grown debt when it would overpay
/// 4. Subtracts the applied payment
///
/// The principal portion may be negative when the payment is below the
/// interest; no extra guard is applied here.
///
/// # Errors
///
/// Returns `MortgageError::ArithmeticOverflow` if any decimal operation
/// overflows.
pub fn amortization_step(
    current_debt: Decimal,
    month: Month,
    rate_year1: Decimal,
    rate_year2: Decimal,
    target_payment: Decimal,
) -> Result<Step> {
    let rate = rate_for(month, rate_year1, rate_year2);

    let interest = checked(
        current_debt
            .checked_mul(rate / dec!(100))
            .and_then(|v| v.checked_div(dec!(12))),
        "interest",
    )?;
    let grown_debt = checked(current_debt.checked_add(interest), "debt accrual")?;

    // Final partial payment closes the loan exactly
    let payment = if grown_debt < target_payment {
        grown_debt
    } else {
        target_payment
    };

    let principal_paid = checked(payment.checked_sub(interest), "principal portion")?;
    let new_debt = checked(grown_debt.checked_sub(payment), "debt repayment")?;

    Ok(Step {
        record: MonthRecord {
            month,
            opening_debt: current_debt,
            interest_amount: interest,
            interest_rate_percent: rate,
            principal_paid,
            payment_applied: payment,
        },
        new_debt,
    })
}
