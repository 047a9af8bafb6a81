//! Level (annuity) payment over a fixed term
//!
//! Closed-form payment that amortizes a principal over `term_months` under
//! the two-tier rate. The future value of the principal at the end of the
//! term is divided by the sum of the growth factors of every payment.

use super::checked;
use super::rate::{monthly_rate, rate_for, RATE_TIER_BOUNDARY};
use super::term::MAX_SCHEDULE_MONTHS;
use crate::types::{Month, MortgageError, Result};
use rust_decimal::{Decimal, MathematicalOps};

/// Compute the level monthly payment for a fixed term
///
/// With monthly rates `r1 = rate_year1 / 1200` and `r2 = rate_year2 / 1200`:
///
/// ```text
/// FV          = P * (1+r1)^n                        if n <= 12
///             = P * (1+r1)^12 * (1+r2)^(n-12)       otherwise
/// denominator = sum over m in 1..=n of (1+r)^(n-m)  with r = r1 for m <= 12, else r2
/// payment     = FV / denominator
/// ```
///
/// # Errors
///
/// - `DivisionByZero` when the denominator is zero (a zero-month term)
/// - `HorizonExceeded` when the term is longer than the schedule loop supports
/// - `ArithmeticOverflow` when a growth factor no longer fits a decimal
pub fn compute_level_payment(
    principal: Decimal,
    rate_year1: Decimal,
    rate_year2: Decimal,
    term_months: Month,
) -> Result<Decimal> {
    if term_months > MAX_SCHEDULE_MONTHS {
        return Err(MortgageError::horizon_exceeded(MAX_SCHEDULE_MONTHS));
    }

    let growth1 = checked(Decimal::ONE.checked_add(monthly_rate(rate_year1)?), "growth factor")?;
    let growth2 = checked(Decimal::ONE.checked_add(monthly_rate(rate_year2)?), "growth factor")?;

    let compounded = if term_months <= RATE_TIER_BOUNDARY {
        power(growth1, term_months)?
    } else {
        let first_year = power(growth1, RATE_TIER_BOUNDARY)?;
        let remainder = power(growth2, term_months - RATE_TIER_BOUNDARY)?;
        checked(first_year.checked_mul(remainder), "future value")?
    };
    let future_value = checked(principal.checked_mul(compounded), "future value")?;

    let mut denominator = Decimal::ZERO;
    for month in 1..=term_months {
        let growth = rate_for(month, growth1, growth2);
        let factor = power(growth, term_months - month)?;
        denominator = checked(denominator.checked_add(factor), "annuity denominator")?;
    }

    if denominator.is_zero() {
        return Err(MortgageError::division_by_zero(term_months));
    }

    checked(future_value.checked_div(denominator), "level payment")
}

fn power(base: Decimal, exponent: Month) -> Result<Decimal> {
    checked(base.checked_powu(u64::from(exponent)), "power")
}
