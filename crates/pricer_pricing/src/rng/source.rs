//! Standard normal draw sources.
//!
//! The simulation loops are generic over [`NormalSource`] so that production
//! runs draw from [`PricerRng`] while tests substitute a deterministic
//! [`CyclicSource`] and compare engine output against a sequential fold of
//! the very same draws.

use super::prng::PricerRng;

/// A per-thread stream of standard normal variates.
///
/// Implementors must be `Send` so that one instance can be moved into each
/// worker thread. Instances are never shared.
pub trait NormalSource: Send {
    /// Returns the next standard normal draw.
    fn next_normal(&mut self) -> f64;
}

impl NormalSource for PricerRng {
    #[inline]
    fn next_normal(&mut self) -> f64 {
        self.gen_normal()
    }
}

/// Deterministic source that repeats a fixed sequence of draws.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::rng::{CyclicSource, NormalSource};
///
/// let mut source = CyclicSource::new(vec![-1.0, 0.0, 1.0]);
/// let draws: Vec<f64> = (0..4).map(|_| source.next_normal()).collect();
/// assert_eq!(draws, vec![-1.0, 0.0, 1.0, -1.0]);
/// ```
#[derive(Clone, Debug)]
pub struct CyclicSource {
    values: Vec<f64>,
    position: usize,
}

impl CyclicSource {
    /// Creates a source cycling through `values`.
    ///
    /// An empty sequence behaves as a constant zero draw.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Creates a source that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl NormalSource for CyclicSource {
    #[inline]
    fn next_normal(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.position];
        self.position = (self.position + 1) % self.values.len();
        value
    }
}
