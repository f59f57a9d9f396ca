//! Lock-free result accumulator shared by engine workers.
//!
//! [`ResultAccumulator`] aggregates the payoff sum, the payoff sum of squares
//! and the simulation count of a run. Workers fold one partial result per
//! batch; the orchestrator reads a [`AccumulatorSnapshot`] once every worker
//! has joined.
//!
//! # Floating-point folding
//!
//! There is no atomic `f64` addition, so each float total is stored as its
//! IEEE-754 bit pattern in an `AtomicU64` and updated with a
//! read-compute-attempt-retry loop:
//!
//! ```text
//! current = load()
//! loop {
//!     candidate = current + delta
//!     match compare_exchange_weak(current, candidate) {
//!         Ok  => break,
//!         Err(observed) => current = observed   // another worker won; retry
//!     }
//! }
//! ```
//!
//! A failed exchange is the normal outcome under contention, not an error.
//! Folding once per batch rather than once per draw keeps these retries rare.

use std::sync::atomic::{AtomicU64, Ordering};

/// Totals read from a [`ResultAccumulator`].
///
/// Fields are loaded independently, so a snapshot taken while workers are
/// still folding may pair totals from different moments.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AccumulatorSnapshot {
    /// Sum of undiscounted payoffs.
    pub payoff_sum: f64,
    /// Sum of squared undiscounted payoffs.
    pub payoff_sum_sq: f64,
    /// Number of simulations folded in.
    pub n_simulations: u64,
}

impl AccumulatorSnapshot {
    /// Mean undiscounted payoff, or `None` when nothing was simulated.
    #[inline]
    pub fn mean_payoff(&self) -> Option<f64> {
        (self.n_simulations > 0).then(|| self.payoff_sum / self.n_simulations as f64)
    }

    /// Standard error of the mean undiscounted payoff.
    ///
    /// Uses the unbiased sample variance; returns 0 for fewer than two
    /// simulations and clamps tiny negative variances from rounding to 0.
    pub fn std_error(&self) -> f64 {
        if self.n_simulations < 2 {
            return 0.0;
        }
        let n = self.n_simulations as f64;
        let mean = self.payoff_sum / n;
        let variance = ((self.payoff_sum_sq / n - mean * mean) * n / (n - 1.0)).max(0.0);
        (variance / n).sqrt()
    }
}

/// Aggregate of all workers' partial results for one run.
///
/// Owned by one engine run and borrowed by its workers; never global state.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::ResultAccumulator;
///
/// let accumulator = ResultAccumulator::new();
/// accumulator.fold(12.5, 100.0, 3);
/// accumulator.fold(7.5, 50.0, 2);
///
/// let snapshot = accumulator.snapshot();
/// assert_eq!(snapshot.payoff_sum, 20.0);
/// assert_eq!(snapshot.n_simulations, 5);
/// ```
#[derive(Debug, Default)]
pub struct ResultAccumulator {
    payoff_sum: AtomicU64,
    payoff_sum_sq: AtomicU64,
    n_simulations: AtomicU64,
}

impl ResultAccumulator {
    /// Creates a zeroed accumulator.
    pub fn new() -> Self {
        // 0u64 is the bit pattern of +0.0
        Self {
            payoff_sum: AtomicU64::new(0),
            payoff_sum_sq: AtomicU64::new(0),
            n_simulations: AtomicU64::new(0),
        }
    }

    /// Folds one batch's partial result into the totals.
    ///
    /// Safe under any interleaving of concurrent callers; no update is lost.
    ///
    /// # Returns
    ///
    /// The number of compare-and-swap retries needed (0 without contention).
    pub fn fold(&self, payoff_sum: f64, payoff_sum_sq: f64, n_simulations: u64) -> u64 {
        let retries = add_f64(&self.payoff_sum, payoff_sum) + add_f64(&self.payoff_sum_sq, payoff_sum_sq);
        self.n_simulations.fetch_add(n_simulations, Ordering::AcqRel);
        retries
    }

    /// Reads the current totals.
    pub fn snapshot(&self) -> AccumulatorSnapshot {
        AccumulatorSnapshot {
            payoff_sum: f64::from_bits(self.payoff_sum.load(Ordering::Acquire)),
            payoff_sum_sq: f64::from_bits(self.payoff_sum_sq.load(Ordering::Acquire)),
            n_simulations: self.n_simulations.load(Ordering::Acquire),
        }
    }
}

/// Adds `delta` to the `f64` stored in `cell`, returning the retry count.
#[inline]
fn add_f64(cell: &AtomicU64, delta: f64) -> u64 {
    let mut retries = 0;
    let mut current = cell.load(Ordering::Relaxed);
    loop {
        let candidate = (f64::from_bits(current) + delta).to_bits();
        match cell.compare_exchange_weak(current, candidate, Ordering::AcqRel, Ordering::Relaxed) {
            Ok(_) => return retries,
            Err(observed) => {
                current = observed;
                retries += 1;
            }
        }
    }
}
