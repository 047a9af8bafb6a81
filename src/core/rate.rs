//! Rate tier lookup
//!
//! The loan carries two annual rates: one for the first year and one from
//! month 13 onward. The boundary is a hard calendar cut, not a blend, and it
//! lives here so a different tiering scheme only changes this module.

use super::checked;
use crate::types::{Month, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Last month billed at the first-year rate
pub const RATE_TIER_BOUNDARY: Month = 12;

/// Pick the tier value in effect for `month`
///
/// Works for any per-tier value: annual percentages, monthly rates, or growth
/// factors.
pub fn rate_for(month: Month, rate_year1: Decimal, rate_year2: Decimal) -> Decimal {
    if month <= RATE_TIER_BOUNDARY {
        rate_year1
    } else {
        rate_year2
    }
}

/// Convert an annual percentage into a monthly fraction (`percent / 1200`)
pub fn monthly_rate(annual_percent: Decimal) -> Result<Decimal> {
    checked(annual_percent.checked_div(dec!(1200)), "monthly rate")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::first_month(1, dec!(10))]
    #[case::last_first_year_month(12, dec!(10))]
    #[case::first_second_tier_month(13, dec!(5))]
    #[case::far_month(360, dec!(5))]
    fn test_rate_for(#[case] month: Month, #[case] expected: Decimal) {
        assert_eq!(rate_for(month, dec!(10), dec!(5)), expected);
    }

    #[rstest]
    #[case(dec!(12), dec!(0.01))]
    #[case(dec!(0), dec!(0))]
    #[case(dec!(6), dec!(0.005))]
    fn test_monthly_rate(#[case] annual: Decimal, #[case] expected: Decimal) {
        assert_eq!(monthly_rate(annual).unwrap(), expected);
    }
}
