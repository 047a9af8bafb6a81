//! Core trait for schedule calculation
//!
//! Strategies evaluate scenarios through this trait rather than a concrete
//! engine type, so alternative calculators can be plugged in.

use crate::types::{LoanTerms, Result, ScheduleResult};

/// Trait for turning validated loan terms into a schedule
pub trait ScheduleCalculator {
    /// Compute the schedule for one set of loan terms
    fn calculate(&self, terms: &LoanTerms) -> Result<ScheduleResult>;
}
