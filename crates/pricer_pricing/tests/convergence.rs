//! Convergence tests for the concurrent engine.
//!
//! These tests verify that engine prices converge to the Black-Scholes
//! closed form and that the estimate does not depend on how the budget is
//! spread across workers.
//!
//! # Test Categories
//!
//! 1. **Analytical Agreement**: engine vs Black-Scholes at 10M simulations
//! 2. **Worker-Count Independence**: runs agree within Monte Carlo error
//! 3. **Reference Agreement**: engine vs sequential reference pricer

use pricer_core::analytical::black_scholes_call;
use pricer_core::types::OptionParams;
use pricer_pricing::mc::{ConcurrentEngine, EngineConfig, EngineResult};
use pricer_pricing::reference::price_european_call;
use pricer_pricing::rng::PricerRng;

/// T=1, K=100, S0=100, σ=0.2, r=0.05.
fn standard_option() -> OptionParams {
    OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap()
}

fn run(n_simulations: u64, n_workers: usize, seed: u64) -> EngineResult {
    let config = EngineConfig::builder()
        .n_simulations(n_simulations)
        .n_workers(n_workers)
        .seed(seed)
        .build()
        .unwrap();
    ConcurrentEngine::new(standard_option(), config)
        .run()
        .unwrap()
}

// ============================================================================
// Analytical Agreement
// ============================================================================

#[test]
fn test_ten_million_simulations_match_black_scholes() {
    let analytical = black_scholes_call(&standard_option());

    for n_workers in [1, 2, 8] {
        let result = run(10_000_000, n_workers, 20_240_601 + n_workers as u64);

        assert_eq!(result.n_simulations, 10_000_000);
        assert_eq!(result.n_batches, 100);
        assert!(
            (result.price - analytical).abs() < 0.05,
            "{} workers: MC {:.5} vs BS {:.5}",
            n_workers,
            result.price,
            analytical
        );
    }
}

#[test]
fn test_confidence_interval_covers_black_scholes() {
    let analytical = black_scholes_call(&standard_option());
    let result = run(1_000_000, 4, 99);

    // 4 standard errors keeps the false-failure rate negligible
    assert!((result.price - analytical).abs() < 4.0 * result.std_error);
    // σ_payoff ≈ 14.7 for this option
    assert!(result.std_error > 0.005 && result.std_error < 0.03);
}

#[test]
fn test_in_and_out_of_the_money() {
    for strike in [80.0, 120.0] {
        let option = OptionParams::new(1.0, strike, 100.0, 0.2, 0.05).unwrap();
        let config = EngineConfig::builder()
            .n_simulations(1_000_000)
            .n_workers(4)
            .seed(7)
            .build()
            .unwrap();
        let result = ConcurrentEngine::new(option, config).run().unwrap();
        let analytical = black_scholes_call(&option);

        assert!(
            (result.price - analytical).abs() < 4.0 * result.std_error,
            "K={}: MC {:.5} vs BS {:.5} (se {:.5})",
            strike,
            result.price,
            analytical,
            result.std_error
        );
    }
}

#[test]
fn test_zero_volatility_is_discounted_forward_intrinsic() {
    let option = OptionParams::new(1.0, 100.0, 100.0, 0.0, 0.05).unwrap();
    let config = EngineConfig::builder()
        .n_simulations(10_000)
        .batch_size(1_000)
        .n_workers(3)
        .build()
        .unwrap();
    let result = ConcurrentEngine::new(option, config).run().unwrap();

    let expected = 100.0 - 100.0 * (-0.05_f64).exp();
    assert!((result.price - expected).abs() < 1e-9);
    assert!((black_scholes_call(&option) - expected).abs() < 1e-9);
    assert!(result.std_error < 1e-6);
}

// ============================================================================
// Worker-Count Independence
// ============================================================================

#[test]
fn test_worker_counts_agree_within_standard_error() {
    let results: Vec<EngineResult> = [1, 3, 8]
        .iter()
        .map(|&n_workers| run(2_000_000, n_workers, 1_000 + n_workers as u64))
        .collect();

    for a in &results {
        for b in &results {
            let combined = (a.std_error.powi(2) + b.std_error.powi(2)).sqrt();
            assert!(
                (a.price - b.price).abs() < 4.0 * combined,
                "{} vs {} workers: {:.5} vs {:.5}",
                a.n_workers,
                b.n_workers,
                a.price,
                b.price
            );
        }
    }
}

// ============================================================================
// Reference Agreement
// ============================================================================

#[test]
fn test_engine_agrees_with_reference_pricer() {
    let engine = run(1_000_000, 4, 31);
    let mut rng = PricerRng::from_seed(31);
    let reference = price_european_call(&standard_option(), 1_000_000, &mut rng).unwrap();

    let combined = (engine.std_error.powi(2) + reference.std_error.powi(2)).sqrt();
    assert!((engine.price - reference.price).abs() < 4.0 * combined);
}
