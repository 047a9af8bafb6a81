//! Concurrent scenario evaluation
//!
//! This module provides the BatchProcessor, which evaluates a batch of loan
//! scenarios in parallel on the tokio runtime.
//!
//! # Design
//!
//! Scenarios are independent of each other: no state is shared between two
//! loans, so a batch can be split into arbitrary chunks. The processor cuts
//! every batch into at most `workers` contiguous chunks and spawns one task per
//! chunk. Within a chunk scenarios are evaluated in input order.
//!
//! ```text
//! Batch: [S1, S2, S3, S4, S5]   workers = 2
//!   ↓
//! Chunks:
//!   Task 1: [S1, S2, S3]
//!   Task 2: [S4, S5]
//! ```
//!
//! Outcomes carry their scenario id, so callers restore input order by sorting.

use std::sync::Arc;

use crate::core::traits::ScheduleCalculator;
use crate::core::MortgageEngine;
use crate::types::{Scenario, ScenarioOutcome, ScheduleSummary};

/// Validate and calculate a single scenario
///
/// Validation errors and calculation errors both end up in the outcome's
/// `summary`; nothing is returned early.
pub fn evaluate_scenario<C: ScheduleCalculator + ?Sized>(
    calculator: &C,
    scenario: Scenario,
) -> ScenarioOutcome {
    let summary = scenario
        .input
        .validate()
        .and_then(|terms| calculator.calculate(&terms))
        .and_then(|result| ScheduleSummary::try_from(&result));

    ScenarioOutcome { scenario, summary }
}

/// Batch processor for concurrent scenario evaluation
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Shared engine used by every task
    engine: Arc<MortgageEngine>,

    /// Upper bound on tasks spawned per batch
    workers: usize,
}

impl BatchProcessor {
    /// Create a new BatchProcessor
    ///
    /// # Arguments
    ///
    /// * `engine` - Engine shared by all spawned tasks
    /// * `workers` - Maximum number of chunks per batch (zero is treated as one)
    pub fn new(engine: Arc<MortgageEngine>, workers: usize) -> Self {
        Self {
            engine,
            workers: workers.max(1),
        }
    }

    /// Split a batch into at most `workers` contiguous chunks
    ///
    /// Every chunk but the last holds `ceil(len / workers)` scenarios. An
    /// empty batch yields no chunks.
    pub fn partition(&self, batch: Vec<Scenario>) -> Vec<Vec<Scenario>> {
        if batch.is_empty() {
            return Vec::new();
        }

        let chunk_size = batch.len().div_ceil(self.workers);
        let mut chunks = Vec::with_capacity(self.workers);
        let mut iter = batch.into_iter().peekable();

        while iter.peek().is_some() {
            chunks.push(iter.by_ref().take(chunk_size).collect());
        }

        chunks
    }

    /// Evaluate one chunk in order
    pub async fn process_chunk(&self, chunk: Vec<Scenario>) -> Vec<ScenarioOutcome> {
        chunk
            .into_iter()
            .map(|scenario| evaluate_scenario(self.engine.as_ref(), scenario))
            .collect()
    }

    /// Evaluate a batch concurrently
    ///
    /// This method:
    /// 1. Partitions the batch into chunks
    /// 2. Spawns a tokio task per chunk
    /// 3. Waits for every task to complete
    /// 4. Returns all outcomes, grouped by chunk
    ///
    /// A task that panics loses its chunk's outcomes; the failure is logged and
    /// the remaining chunks are still returned.
    pub async fn process_batch(&self, batch: Vec<Scenario>) -> Vec<ScenarioOutcome> {
        let chunks = self.partition(batch);

        let mut tasks = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let processor = self.clone();
            tasks.push(tokio::spawn(
                async move { processor.process_chunk(chunk).await },
            ));
        }

        let mut outcomes = Vec::new();
        for task in tasks {
            match task.await {
                Ok(chunk_outcomes) => outcomes.extend(chunk_outcomes),
                Err(e) => tracing::error!("Scenario task failed: {}", e),
            }
        }

        outcomes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LoanInput, MortgageError};
    use rust_decimal_macros::dec;

    fn scenario(id: u64, principal: rust_decimal::Decimal) -> Scenario {
        Scenario {
            id,
            input: LoanInput {
                mode: 1,
                principal,
                rate_year1: dec!(0),
                rate_year2: dec!(0),
                monthly_payment: Some(dec!(100)),
                term_months: None,
            },
        }
    }

    #[test]
    fn test_evaluate_scenario_success() {
        let outcome = evaluate_scenario(&MortgageEngine::new(), scenario(7, dec!(250)));

        assert_eq!(outcome.scenario.id, 7);
        let summary = outcome.summary.unwrap();
        assert_eq!(summary.total_months, 3);
        assert_eq!(summary.payment, dec!(100));
        assert_eq!(summary.total_paid, dec!(250));
        assert_eq!(summary.total_interest, dec!(0));
    }

    #[test]
    fn test_evaluate_scenario_keeps_validation_error() {
        let mut bad = scenario(1, dec!(250));
        bad.input.mode = 9;

        let outcome = evaluate_scenario(&MortgageEngine::new(), bad);
        assert!(matches!(
            outcome.summary,
            Err(MortgageError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_evaluate_scenario_keeps_calculation_error() {
        let outcome = evaluate_scenario(&MortgageEngine::new(), scenario(1, dec!(0)));
        assert_eq!(outcome.summary, Err(MortgageError::EmptySchedule));
    }

    fn huge_scenario(id: u64) -> Scenario {
        Scenario {
            id,
            input: LoanInput {
                mode: 1,
                principal: dec!(79000000000000000000000000000),
                rate_year1: dec!(1),
                rate_year2: dec!(1),
                monthly_payment: Some(dec!(10000000000000000000000000000)),
                term_months: None,
            },
        }
    }

    #[test]
    fn test_evaluate_scenario_keeps_summary_overflow() {
        let outcome = evaluate_scenario(&MortgageEngine::new(), huge_scenario(1));
        assert_eq!(
            outcome.summary,
            Err(MortgageError::arithmetic_overflow("total paid"))
        );
    }

    #[test]
    fn test_partition_contiguous_chunks() {
        let processor = BatchProcessor::new(Arc::new(MortgageEngine::new()), 2);
        let batch: Vec<_> = (1..=5).map(|id| scenario(id, dec!(100))).collect();

        let chunks = processor.partition(batch);

        assert_eq!(chunks.len(), 2);
        let ids: Vec<Vec<u64>> = chunks
            .iter()
            .map(|c| c.iter().map(|s| s.id).collect())
            .collect();
        assert_eq!(ids, vec![vec![1, 2, 3], vec![4, 5]]);
    }

    #[test]
    fn test_partition_fewer_scenarios_than_workers() {
        let processor = BatchProcessor::new(Arc::new(MortgageEngine::new()), 8);
        let chunks = processor.partition(vec![scenario(1, dec!(100)), scenario(2, dec!(100))]);
        assert_eq!(chunks.len(), 2);
        assert!(processor.partition(Vec::new()).is_empty());
    }

    #[test]
    fn test_zero_workers_treated_as_one() {
        let processor = BatchProcessor::new(Arc::new(MortgageEngine::new()), 0);
        let batch: Vec<_> = (1..=3).map(|id| scenario(id, dec!(100))).collect();
        assert_eq!(processor.partition(batch).len(), 1);
    }

    #[tokio::test]
    async fn test_process_batch_returns_every_outcome() {
        let processor = BatchProcessor::new(Arc::new(MortgageEngine::new()), 3);
        let batch: Vec<_> = (1..=10)
            .map(|id| scenario(id, rust_decimal::Decimal::from(id * 100)))
            .collect();

        let mut outcomes = processor.process_batch(batch).await;
        outcomes.sort_by_key(|o| o.scenario.id);

        assert_eq!(outcomes.len(), 10);
        for (index, outcome) in outcomes.iter().enumerate() {
            let id = index as u64 + 1;
            assert_eq!(outcome.scenario.id, id);
            assert_eq!(outcome.summary.as_ref().unwrap().total_months, id as u32);
        }
    }

    #[tokio::test]
    async fn test_process_batch_overflow_does_not_drop_chunk() {
        let processor = BatchProcessor::new(Arc::new(MortgageEngine::new()), 1);
        let batch = vec![huge_scenario(1), scenario(2, dec!(300))];

        let mut outcomes = processor.process_batch(batch).await;
        outcomes.sort_by_key(|o| o.scenario.id);

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(
            outcomes[0].summary,
            Err(MortgageError::ArithmeticOverflow { .. })
        ));
        assert_eq!(outcomes[1].summary.as_ref().unwrap().total_months, 3);
    }
}
