//! Scenario types for batch comparison
//!
//! A scenario is one numbered loan input from a scenario file. Evaluating it
//! yields a compact summary (or the error) instead of the full schedule, so a
//! batch never holds every month of every loan in memory.

use super::error::{MortgageError, Result};
use super::loan::LoanInput;
use super::schedule::ScheduleResult;
use super::Month;
use rust_decimal::Decimal;

/// Scenario identifier: the 1-based data row in the scenario file
pub type ScenarioId = u64;

/// A numbered, not yet validated loan input
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub id: ScenarioId,
    pub input: LoanInput,
}

/// Headline figures of a finished schedule
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleSummary {
    pub payment: Decimal,
    pub payment2: Option<Decimal>,
    pub total_months: Month,
    pub total_paid: Decimal,
    pub total_interest: Decimal,
}

impl TryFrom<&ScheduleResult> for ScheduleSummary {
    type Error = MortgageError;

    /// Fails with `ArithmeticOverflow` when a total does not fit in a Decimal
    fn try_from(result: &ScheduleResult) -> Result<Self> {
        Ok(ScheduleSummary {
            payment: result.payment,
            payment2: result.payment2,
            total_months: result.total_months,
            total_paid: result.total_paid()?,
            total_interest: result.total_interest()?,
        })
    }
}

/// Result of evaluating one scenario
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    /// The scenario as read from the input
    pub scenario: Scenario,

    /// Summary on success, or the validation/calculation error
    pub summary: Result<ScheduleSummary>,
}
