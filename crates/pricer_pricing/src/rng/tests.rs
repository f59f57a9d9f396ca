//! Unit tests for the RNG module.
//!
//! - Seed reproducibility
//! - Distribution properties (uniform range, normal moments)
//! - Independence of per-worker streams

use super::*;

#[test]
fn test_seed_reproducibility() {
    let mut rng1 = PricerRng::from_seed(12345);
    let mut rng2 = PricerRng::from_seed(12345);

    for _ in 0..100 {
        assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
    }

    let mut rng3 = PricerRng::from_seed(12345);
    let mut rng4 = PricerRng::from_seed(12345);

    for _ in 0..100 {
        assert_eq!(rng3.gen_normal(), rng4.gen_normal());
    }
}

#[test]
fn test_uniform_range() {
    let mut rng = PricerRng::from_seed(42);

    for _ in 0..10_000 {
        let value = rng.gen_uniform();
        assert!(value >= 0.0, "Uniform value {} is below 0", value);
        assert!(value < 1.0, "Uniform value {} is >= 1", value);
    }
}

#[test]
fn test_normal_moments() {
    let mut rng = PricerRng::from_seed(7);
    let mut buffer = vec![0.0; 200_000];
    rng.fill_normal(&mut buffer);

    let n = buffer.len() as f64;
    let mean = buffer.iter().sum::<f64>() / n;
    let variance = buffer.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);

    // Standard error of the mean is ~0.0022 at this sample size
    assert!(mean.abs() < 0.01, "mean = {}", mean);
    assert!((variance - 1.0).abs() < 0.02, "variance = {}", variance);
}

#[test]
fn test_fill_empty_buffer() {
    let mut rng = PricerRng::from_seed(1);
    let mut empty: Vec<f64> = Vec::new();
    rng.fill_normal(&mut empty);
    assert!(empty.is_empty());
}

#[test]
fn test_worker_streams_differ() {
    let entropy = 0xdead_beef;
    let mut a = PricerRng::for_worker(entropy, 0);
    let mut b = PricerRng::for_worker(entropy, 1);

    let draws_a: Vec<f64> = (0..16).map(|_| a.gen_normal()).collect();
    let draws_b: Vec<f64> = (0..16).map(|_| b.gen_normal()).collect();
    assert_ne!(draws_a, draws_b);
}

#[test]
fn test_worker_streams_uncorrelated() {
    let entropy = fresh_entropy();
    let mut a = PricerRng::for_worker(entropy, 0);
    let mut b = PricerRng::for_worker(entropy, 1);

    let n = 100_000;
    let pairs: Vec<(f64, f64)> = (0..n).map(|_| (a.gen_normal(), b.gen_normal())).collect();
    let covariance = pairs.iter().map(|(x, y)| x * y).sum::<f64>() / n as f64;

    // Sample correlation of independent normals has std dev 1/sqrt(n) ≈ 0.003
    assert!(covariance.abs() < 0.02, "covariance = {}", covariance);
}

#[test]
fn test_for_worker_records_derived_seed() {
    let rng = PricerRng::for_worker(99, 5);
    assert_eq!(rng.seed(), worker_seed(99, 5));
}
