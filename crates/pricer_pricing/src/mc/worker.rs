//! Engine worker loop.
//!
//! A worker repeatedly pops a [`WorkBatch`], simulates it into local
//! scalars, and folds the batch totals into the shared
//! [`ResultAccumulator`] with a single call. It terminates when the queue
//! reports drained (empty and stopping).

use pricer_core::types::OptionParams;
use tracing::debug;

use super::accumulator::ResultAccumulator;
use super::batch::WorkBatch;
use super::queue::WorkQueue;
use crate::rng::NormalSource;

/// Per-worker counters returned when a worker drains.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorkerStats {
    /// Index of the worker within its run.
    pub worker_id: usize,
    /// Batches processed.
    pub batches: u64,
    /// Simulations performed.
    pub simulations: u64,
    /// Compare-and-swap retries spent folding.
    pub cas_retries: u64,
}

/// Simulates one batch, returning `(payoff_sum, payoff_sum_sq)`.
///
/// `drift` and `diffusion` are the option's precomputed log-space terms.
#[inline]
pub(crate) fn simulate_batch<S: NormalSource + ?Sized>(
    option: &OptionParams,
    drift: f64,
    diffusion: f64,
    n_simulations: usize,
    source: &mut S,
) -> (f64, f64) {
    let spot = option.spot();
    let mut payoff_sum = 0.0;
    let mut payoff_sum_sq = 0.0;
    for _ in 0..n_simulations {
        let z = source.next_normal();
        let terminal = spot * (drift + diffusion * z).exp();
        let payoff = option.call_payoff(terminal);
        payoff_sum += payoff;
        payoff_sum_sq += payoff * payoff;
    }
    (payoff_sum, payoff_sum_sq)
}

/// Runs one worker until the queue is drained.
///
/// # Arguments
///
/// * `worker_id` - Index of this worker, reported in the stats and logs
/// * `queue` - Shared work queue; this worker is one of its consumers
/// * `accumulator` - Shared run totals
/// * `option` - Read-only option descriptor
/// * `source` - This worker's own draw source
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionParams;
/// use pricer_pricing::mc::{dispatch, run_worker, ResultAccumulator, WorkQueue};
/// use pricer_pricing::rng::PricerRng;
///
/// let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
/// let queue = WorkQueue::new();
/// let accumulator = ResultAccumulator::new();
///
/// dispatch(&queue, 1_000, 100);
/// let stats = run_worker(0, &queue, &accumulator, &option, PricerRng::from_seed(1));
///
/// assert_eq!(stats.batches, 10);
/// assert_eq!(accumulator.snapshot().n_simulations, 1_000);
/// ```
pub fn run_worker<S: NormalSource>(
    worker_id: usize,
    queue: &WorkQueue<WorkBatch>,
    accumulator: &ResultAccumulator,
    option: &OptionParams,
    mut source: S,
) -> WorkerStats {
    let drift = option.drift();
    let diffusion = option.diffusion();
    let mut stats = WorkerStats {
        worker_id,
        ..WorkerStats::default()
    };

    while let Some(batch) = queue.pop() {
        let (payoff_sum, payoff_sum_sq) =
            simulate_batch(option, drift, diffusion, batch.n_simulations, &mut source);
        let n = batch.n_simulations as u64;
        stats.cas_retries += accumulator.fold(payoff_sum, payoff_sum_sq, n);
        stats.batches += 1;
        stats.simulations += n;
    }

    debug!(
        worker_id,
        batches = stats.batches,
        simulations = stats.simulations,
        cas_retries = stats.cas_retries,
        "worker drained"
    );
    stats
}
