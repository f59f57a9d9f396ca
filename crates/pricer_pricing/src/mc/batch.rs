//! Work batches and the dispatcher that produces them.
//!
//! The dispatcher is the sole producer of the engine's [`WorkQueue`]. It
//! splits the requested simulation total into batches of at most
//! `batch_size` draws, enqueues them in order, then signals stop exactly
//! once so that workers exit after draining.

use tracing::debug;

use super::queue::WorkQueue;

/// A unit of work: "simulate this many independent draws".
///
/// Created by the dispatcher and consumed by exactly one worker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkBatch {
    /// Number of simulations in this batch (positive).
    pub n_simulations: usize,
}

/// Iterator over the batch sizes covering a simulation total.
///
/// Yields `min(batch_size, remaining)` until nothing remains, so every batch
/// is full except possibly the last.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::BatchPlan;
///
/// let sizes: Vec<usize> = BatchPlan::new(250, 100).map(|b| b.n_simulations).collect();
/// assert_eq!(sizes, vec![100, 100, 50]);
/// ```
#[derive(Clone, Debug)]
pub struct BatchPlan {
    remaining: u64,
    batch_size: u64,
}

impl BatchPlan {
    /// Plans `total` simulations in batches of at most `batch_size`.
    ///
    /// A zero `batch_size` is treated as 1.
    pub fn new(total: u64, batch_size: usize) -> Self {
        Self {
            remaining: total,
            batch_size: (batch_size as u64).max(1),
        }
    }
}

impl Iterator for BatchPlan {
    type Item = WorkBatch;

    fn next(&mut self) -> Option<WorkBatch> {
        if self.remaining == 0 {
            return None;
        }
        let size = self.batch_size.min(self.remaining);
        self.remaining -= size;
        // size <= batch_size, which came from a usize
        Some(WorkBatch {
            n_simulations: size as usize,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.div_ceil(self.batch_size);
        match usize::try_from(n) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// What the dispatcher enqueued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Number of batches pushed.
    pub n_batches: u64,
    /// Sum of the batch sizes pushed.
    pub n_simulations: u64,
}

/// Enqueues the batches covering `total` simulations, then requests stop.
///
/// A `total` of 0 pushes nothing but still signals stop, so waiting workers
/// exit immediately.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{dispatch, WorkQueue};
///
/// let queue = WorkQueue::new();
/// let summary = dispatch(&queue, 1_050, 100);
///
/// assert_eq!(summary.n_batches, 11);
/// assert_eq!(summary.n_simulations, 1_050);
/// assert!(queue.is_stopping());
/// ```
pub fn dispatch(queue: &WorkQueue<WorkBatch>, total: u64, batch_size: usize) -> DispatchSummary {
    let mut summary = DispatchSummary::default();
    for batch in BatchPlan::new(total, batch_size) {
        summary.n_batches += 1;
        summary.n_simulations += batch.n_simulations as u64;
        queue.push(batch);
    }
    queue.request_stop();

    debug!(
        n_batches = summary.n_batches,
        n_simulations = summary.n_simulations,
        "dispatch complete"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sizes(total: u64, batch_size: usize) -> Vec<usize> {
        BatchPlan::new(total, batch_size)
            .map(|b| b.n_simulations)
            .collect()
    }

    #[test]
    fn test_plan_exact_multiple() {
        assert_eq!(sizes(300, 100), vec![100, 100, 100]);
    }

    #[test]
    fn test_plan_ragged_tail() {
        assert_eq!(sizes(1_050, 100).last(), Some(&50));
        assert_eq!(sizes(1_050, 100).len(), 11);
    }

    #[test]
    fn test_plan_total_below_batch_size() {
        assert_eq!(sizes(7, 100_000), vec![7]);
    }

    #[test]
    fn test_plan_zero_total() {
        assert!(sizes(0, 100).is_empty());
    }

    #[test]
    fn test_plan_zero_batch_size_treated_as_one() {
        assert_eq!(sizes(3, 0), vec![1, 1, 1]);
    }

    #[test]
    fn test_plan_size_hint() {
        let plan = BatchPlan::new(1_001, 100);
        assert_eq!(plan.size_hint(), (11, Some(11)));
        assert_eq!(plan.count(), 11);
    }

    #[test]
    fn test_dispatch_signals_stop_and_preserves_order() {
        let queue = WorkQueue::new();
        let summary = dispatch(&queue, 250, 100);

        assert_eq!(
            summary,
            DispatchSummary {
                n_batches: 3,
                n_simulations: 250
            }
        );
        assert!(queue.is_stopping());

        let drained: Vec<usize> = std::iter::from_fn(|| queue.pop())
            .map(|b| b.n_simulations)
            .collect();
        assert_eq!(drained, vec![100, 100, 50]);
    }

    #[test]
    fn test_dispatch_zero_total_still_stops() {
        let queue = WorkQueue::new();
        let summary = dispatch(&queue, 0, 100);

        assert_eq!(summary, DispatchSummary::default());
        assert!(queue.is_stopping());
        assert_eq!(queue.pop(), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn plan_conserves_total(total in 0u64..200_000, batch_size in 1usize..10_000) {
                let plan: Vec<usize> = sizes(total, batch_size);
                let sum: u64 = plan.iter().map(|&n| n as u64).sum();
                prop_assert_eq!(sum, total);
                prop_assert_eq!(plan.len() as u64, total.div_ceil(batch_size as u64));
            }

            #[test]
            fn plan_batches_are_bounded(total in 1u64..200_000, batch_size in 1usize..10_000) {
                let plan = sizes(total, batch_size);
                prop_assert!(plan.iter().all(|&n| n >= 1 && n <= batch_size));
                // only the last batch may be short
                prop_assert!(plan[..plan.len() - 1].iter().all(|&n| n == batch_size));
            }
        }
    }
}
