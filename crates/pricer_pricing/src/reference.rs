//! Sequential reference pricer.
//!
//! A single-threaded loop over the same payoff formula the concurrent engine
//! uses. Fed the same draws, it must agree with the engine; fed independent
//! draws, it must agree within Monte Carlo error.

use pricer_core::types::OptionParams;

use crate::error::PricingError;
use crate::mc::{price_from_snapshot, simulate_batch, AccumulatorSnapshot};
use crate::rng::NormalSource;

/// Outcome of a sequential pricing run.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReferenceResult {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of `price`.
    pub std_error: f64,
    /// Number of simulations.
    pub n_simulations: u64,
}

/// Prices a European call with `n_simulations` sequential draws.
///
/// # Errors
///
/// Returns [`PricingError::NoSimulations`] if `n_simulations` is 0.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionParams;
/// use pricer_pricing::reference::price_european_call;
/// use pricer_pricing::rng::PricerRng;
///
/// let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
/// let mut rng = PricerRng::from_seed(1);
///
/// let result = price_european_call(&option, 100_000, &mut rng).unwrap();
/// assert!((result.price - 10.4506).abs() < 4.0 * result.std_error);
/// ```
pub fn price_european_call<S: NormalSource + ?Sized>(
    option: &OptionParams,
    n_simulations: u64,
    source: &mut S,
) -> Result<ReferenceResult, PricingError> {
    let drift = option.drift();
    let diffusion = option.diffusion();

    let mut snapshot = AccumulatorSnapshot::default();
    // chunked so that the loop bound stays a usize on every target
    let mut remaining = n_simulations;
    while remaining > 0 {
        let chunk = remaining.min(u32::MAX as u64);
        let (sum, sum_sq) = simulate_batch(option, drift, diffusion, chunk as usize, source);
        snapshot.payoff_sum += sum;
        snapshot.payoff_sum_sq += sum_sq;
        snapshot.n_simulations += chunk;
        remaining -= chunk;
    }

    let (price, std_error) = price_from_snapshot(option, &snapshot)?;
    Ok(ReferenceResult {
        price,
        std_error,
        n_simulations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{CyclicSource, PricerRng};
    use approx::assert_relative_eq;
    use pricer_core::analytical::black_scholes_call;

    #[test]
    fn test_zero_simulations_rejected() {
        let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        let mut rng = PricerRng::from_seed(1);
        assert!(matches!(
            price_european_call(&option, 0, &mut rng),
            Err(PricingError::NoSimulations)
        ));
    }

    #[test]
    fn test_deterministic_payoff() {
        let option = OptionParams::new(1.0, 100.0, 103.0, 0.0, 0.0).unwrap();
        let mut source = CyclicSource::constant(1.0);
        let result = price_european_call(&option, 1_000, &mut source).unwrap();

        assert_eq!(result.price, 3.0);
        assert_eq!(result.std_error, 0.0);
        assert_eq!(result.n_simulations, 1_000);
    }

    #[test]
    fn test_single_draw_matches_formula() {
        let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        let mut source = CyclicSource::constant(0.5);
        let result = price_european_call(&option, 1, &mut source).unwrap();

        let expected = option.discount_factor() * option.call_payoff(option.terminal_price(0.5));
        assert_relative_eq!(result.price, expected, epsilon = 1e-12);
        assert_eq!(result.std_error, 0.0);
    }

    #[test]
    fn test_converges_to_black_scholes() {
        let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        let mut rng = PricerRng::from_seed(2024);
        let result = price_european_call(&option, 1_000_000, &mut rng).unwrap();

        let analytical = black_scholes_call(&option);
        assert!(
            (result.price - analytical).abs() < 4.0 * result.std_error,
            "MC {} vs BS {} (se {})",
            result.price,
            analytical,
            result.std_error
        );
    }

    #[test]
    fn test_same_seed_same_price() {
        let option = OptionParams::new(0.5, 95.0, 100.0, 0.3, 0.02).unwrap();
        let a = price_european_call(&option, 10_000, &mut PricerRng::from_seed(5)).unwrap();
        let b = price_european_call(&option, 10_000, &mut PricerRng::from_seed(5)).unwrap();
        assert_eq!(a, b);
    }
}
