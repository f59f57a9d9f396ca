//! Engine orchestrator.
//!
//! [`ConcurrentEngine`] owns one run's queue and accumulator, starts a fixed
//! pool of named worker threads, dispatches the simulation budget from the
//! calling thread, joins every worker and derives the discounted price.
//!
//! ```text
//! Orchestrator ──creates──▶ WorkQueue + ResultAccumulator
//!      │
//!      ├── spawn N workers ──▶ pop ─▶ simulate ─▶ fold ─▶ pop ... ─▶ drained
//!      ├── dispatch batches, then request_stop
//!      └── join all ─▶ snapshot ─▶ EngineResult
//! ```

use std::thread;
use std::time::{Duration, Instant};

use pricer_core::types::OptionParams;
use tracing::{info, info_span, warn};

use super::accumulator::{AccumulatorSnapshot, ResultAccumulator};
use super::batch::dispatch;
use super::config::EngineConfig;
use super::queue::WorkQueue;
use super::worker::{run_worker, WorkerStats};
use crate::error::PricingError;
use crate::rng::{fresh_entropy, NormalSource, PricerRng};

/// Two-sided 95% normal quantile.
const Z_95: f64 = 1.96;

/// Outcome of one engine run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct EngineResult {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of `price`.
    pub std_error: f64,
    /// Simulations folded into the result.
    pub n_simulations: u64,
    /// Batches dispatched.
    pub n_batches: u64,
    /// Worker threads used.
    pub n_workers: usize,
    /// Total compare-and-swap retries across workers.
    pub cas_retries: u64,
    /// Wall-clock time from worker start to last join.
    pub elapsed: Duration,
}

impl EngineResult {
    /// Half-width of the 95% confidence interval around `price`.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        Z_95 * self.std_error
    }
}

/// Derives `(price, std_error)` from accumulated totals.
///
/// # Errors
///
/// Returns [`PricingError::NoSimulations`] if the snapshot holds no
/// simulations, instead of dividing by zero.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionParams;
/// use pricer_pricing::mc::{price_from_snapshot, AccumulatorSnapshot};
///
/// let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.0).unwrap();
/// let snapshot = AccumulatorSnapshot { payoff_sum: 30.0, payoff_sum_sq: 90.0, n_simulations: 10 };
///
/// let (price, _) = price_from_snapshot(&option, &snapshot).unwrap();
/// assert_eq!(price, 3.0);
/// ```
pub fn price_from_snapshot(
    option: &OptionParams,
    snapshot: &AccumulatorSnapshot,
) -> Result<(f64, f64), PricingError> {
    let mean = snapshot.mean_payoff().ok_or(PricingError::NoSimulations)?;
    let discount = option.discount_factor();
    Ok((discount * mean, discount * snapshot.std_error()))
}

/// Concurrent Monte Carlo pricer for a European call.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionParams;
/// use pricer_pricing::mc::{ConcurrentEngine, EngineConfig};
///
/// let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
/// let config = EngineConfig::builder()
///     .n_simulations(200_000)
///     .batch_size(10_000)
///     .n_workers(4)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// let result = ConcurrentEngine::new(option, config).run().unwrap();
/// assert_eq!(result.n_simulations, 200_000);
/// assert!((result.price - 10.45).abs() < 0.2);
/// ```
#[derive(Clone, Debug)]
pub struct ConcurrentEngine {
    option: OptionParams,
    config: EngineConfig,
}

impl ConcurrentEngine {
    /// Creates an engine for `option` under `config`.
    ///
    /// Both arguments are already validated by their constructors.
    pub fn new(option: OptionParams, config: EngineConfig) -> Self {
        Self { option, config }
    }

    /// Returns the option being priced.
    #[inline]
    pub fn option(&self) -> &OptionParams {
        &self.option
    }

    /// Returns the run configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs the engine with one [`PricerRng`] per worker.
    ///
    /// The per-run entropy is the configured seed, or fresh OS entropy.
    ///
    /// # Errors
    ///
    /// See [`run_with_sources`](Self::run_with_sources).
    pub fn run(&self) -> Result<EngineResult, PricingError> {
        let entropy = self.config.seed().unwrap_or_else(fresh_entropy);
        self.run_with_sources(|worker_id| PricerRng::for_worker(entropy, worker_id))
    }

    /// Runs the engine with draw sources built by `factory`.
    ///
    /// `factory` is called once per worker, on the calling thread, with the
    /// worker's index, before any worker starts; each returned source is moved
    /// into its worker. A panic in `factory` propagates to the caller.
    ///
    /// # Errors
    ///
    /// - [`PricingError::Spawn`] if a worker thread cannot be started; workers
    ///   already running are stopped and joined first
    /// - [`PricingError::WorkerPanicked`] if a worker panics
    /// - [`PricingError::NoSimulations`] if nothing was simulated
    pub fn run_with_sources<S, F>(&self, factory: F) -> Result<EngineResult, PricingError>
    where
        S: NormalSource,
        F: Fn(usize) -> S,
    {
        let n_workers = self.config.n_workers();
        let span = info_span!(
            "engine_run",
            n_simulations = self.config.n_simulations(),
            batch_size = self.config.batch_size(),
            n_workers
        );
        let _entered = span.enter();

        let queue = WorkQueue::new();
        let accumulator = ResultAccumulator::new();
        let option = &self.option;
        // No worker may block on the queue while caller code can still unwind
        let sources: Vec<S> = (0..n_workers).map(&factory).collect();
        let start = Instant::now();

        let (summary, stats) = thread::scope(|scope| {
            let mut handles = Vec::with_capacity(n_workers);
            for (worker_id, source) in sources.into_iter().enumerate() {
                let (queue, accumulator, span) = (&queue, &accumulator, span.clone());
                let spawned = thread::Builder::new()
                    .name(format!("mc-worker-{worker_id}"))
                    .spawn_scoped(scope, move || {
                        span.in_scope(|| run_worker(worker_id, queue, accumulator, option, source))
                    });

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(source) => {
                        warn!(worker_id, error = %source, "failed to spawn worker");
                        abandon_workers(queue, handles);
                        return Err(PricingError::Spawn { worker_id, source });
                    }
                }
            }

            let summary = dispatch(&queue, self.config.n_simulations(), self.config.batch_size());
            join_workers(handles).map(|stats| (summary, stats))
        })?;

        let elapsed = start.elapsed();
        let snapshot = accumulator.snapshot();
        debug_assert_eq!(snapshot.n_simulations, summary.n_simulations);

        let (price, std_error) = price_from_snapshot(option, &snapshot)?;
        let result = EngineResult {
            price,
            std_error,
            n_simulations: snapshot.n_simulations,
            n_batches: summary.n_batches,
            n_workers,
            cas_retries: stats.iter().map(|s| s.cas_retries).sum(),
            elapsed,
        };

        info!(
            price = result.price,
            std_error = result.std_error,
            n_simulations = result.n_simulations,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "engine run complete"
        );
        Ok(result)
    }
}

/// Stops the queue and joins the workers already started, discarding their
/// outcome. Joined handles do not re-panic when the scope ends.
fn abandon_workers<T>(
    queue: &WorkQueue<T>,
    handles: Vec<thread::ScopedJoinHandle<'_, WorkerStats>>,
) {
    queue.request_stop();
    let _ = join_workers(handles);
}

/// Joins every worker, reporting the first panicked one.
fn join_workers(
    handles: Vec<thread::ScopedJoinHandle<'_, WorkerStats>>,
) -> Result<Vec<WorkerStats>, PricingError> {
    let mut stats = Vec::with_capacity(handles.len());
    let mut panicked = None;
    for (worker_id, handle) in handles.into_iter().enumerate() {
        match handle.join() {
            Ok(worker_stats) => stats.push(worker_stats),
            Err(_) => {
                warn!(worker_id, "worker panicked");
                panicked.get_or_insert(worker_id);
            }
        }
    }
    match panicked {
        Some(worker_id) => Err(PricingError::WorkerPanicked { worker_id }),
        None => Ok(stats),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::{EngineConfig, WorkBatch};
    use crate::rng::CyclicSource;
    use approx::assert_relative_eq;

    fn config(total: u64, batch_size: usize, n_workers: usize) -> EngineConfig {
        EngineConfig::builder()
            .n_simulations(total)
            .batch_size(batch_size)
            .n_workers(n_workers)
            .seed(7)
            .build()
            .unwrap()
    }

    #[test]
    fn test_price_from_snapshot_empty() {
        let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        let result = price_from_snapshot(&option, &AccumulatorSnapshot::default());
        assert!(matches!(result, Err(PricingError::NoSimulations)));
    }

    #[test]
    fn test_price_from_snapshot_discounts() {
        let option = OptionParams::new(2.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        let snapshot = AccumulatorSnapshot {
            payoff_sum: 50.0,
            payoff_sum_sq: 500.0,
            n_simulations: 5,
        };
        let (price, std_error) = price_from_snapshot(&option, &snapshot).unwrap();

        assert_relative_eq!(price, 10.0 * (-0.1_f64).exp(), epsilon = 1e-12);
        assert_eq!(std_error, 0.0);
    }

    #[test]
    fn test_run_counts() {
        let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        let result = ConcurrentEngine::new(option, config(10_050, 1_000, 3))
            .run()
            .unwrap();

        assert_eq!(result.n_simulations, 10_050);
        assert_eq!(result.n_batches, 11);
        assert_eq!(result.n_workers, 3);
        assert!(result.price.is_finite());
        assert!(result.std_error > 0.0);
        assert_relative_eq!(result.confidence_95(), 1.96 * result.std_error);
    }

    #[test]
    fn test_run_deterministic_option() {
        // sigma = 0: every payoff is exactly 3
        let option = OptionParams::new(1.0, 100.0, 103.0, 0.0, 0.0).unwrap();
        let result = ConcurrentEngine::new(option, config(5_000, 64, 4))
            .run()
            .unwrap();

        assert_eq!(result.price, 3.0);
        assert_eq!(result.std_error, 0.0);
    }

    #[test]
    fn test_run_with_sources_receives_worker_ids() {
        let option = OptionParams::new(1.0, 100.0, 103.0, 0.0, 0.0).unwrap();
        let seen = std::sync::Mutex::new(Vec::new());
        let engine = ConcurrentEngine::new(option, config(100, 10, 5));

        engine
            .run_with_sources(|worker_id| {
                seen.lock().unwrap().push(worker_id);
                CyclicSource::constant(0.0)
            })
            .unwrap();

        assert_eq!(seen.into_inner().unwrap(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_total_below_batch_size_is_one_batch() {
        let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        let result = ConcurrentEngine::new(option, config(7, 100_000, 4))
            .run()
            .unwrap();

        assert_eq!(result.n_batches, 1);
        assert_eq!(result.n_simulations, 7);
    }

    #[test]
    fn test_worker_panic_is_reported() {
        struct Exploding;
        impl NormalSource for Exploding {
            fn next_normal(&mut self) -> f64 {
                panic!("draw source failure");
            }
        }

        let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        let result = ConcurrentEngine::new(option, config(100, 10, 1))
            .run_with_sources(|_| Exploding);

        assert!(matches!(
            result,
            Err(PricingError::WorkerPanicked { worker_id: 0 })
        ));
    }

    #[test]
    fn test_factory_panic_returns_to_caller() {
        use std::sync::mpsc;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
            let engine = ConcurrentEngine::new(option, config(1_000, 10, 4));
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                engine.run_with_sources(|worker_id| {
                    if worker_id == 2 {
                        panic!("factory failure");
                    }
                    CyclicSource::constant(0.0)
                })
            }));
            let _ = tx.send(outcome.is_err());
        });

        let panicked = rx
            .recv_timeout(Duration::from_secs(10))
            .expect("run did not return after a factory panic");
        assert!(panicked);
    }

    #[test]
    fn test_abandon_workers_absorbs_worker_panic() {
        let queue: WorkQueue<WorkBatch> = WorkQueue::new();

        let outcome = thread::scope(|scope| {
            let blocked = scope.spawn(|| {
                while queue.pop().is_some() {}
                WorkerStats::default()
            });
            let failed = scope.spawn(|| -> WorkerStats { panic!("worker failure") });
            abandon_workers(&queue, vec![blocked, failed]);
            "scope returned"
        });

        assert_eq!(outcome, "scope returned");
        assert!(queue.is_stopping());
    }
}
