//! Simulate command implementation
//!
//! Prints one path of a demonstration process.

use pricer_pricing::processes::{ar1_path, linspace, lognormal_price_path, simple_random_walk};
use pricer_pricing::rng::{fresh_entropy, PricerRng};
use tracing::info;

use crate::Result;

/// A process and its parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Process {
    /// Simple ±1 random walk from 0
    Walk {
        /// Up-step probability
        p: f64,
    },
    /// Lognormal price path
    Lognormal {
        /// Drift per unit time
        mu: f64,
        /// Volatility
        sigma: f64,
        /// Time step
        dt: f64,
        /// Initial price
        p0: f64,
    },
    /// AR(1) process
    Ar1 {
        /// Autoregressive coefficient
        lambda: f64,
        /// Long-run drift per unit time
        mu: f64,
        /// Noise volatility
        sigma: f64,
        /// Time step
        dt: f64,
        /// Initial value
        r0: f64,
    },
}

impl Process {
    fn name(&self) -> &'static str {
        match self {
            Process::Walk { .. } => "random walk",
            Process::Lognormal { .. } => "lognormal price path",
            Process::Ar1 { .. } => "AR(1) process",
        }
    }

    fn dt(&self) -> f64 {
        match self {
            Process::Walk { .. } => 1.0,
            Process::Lognormal { dt, .. } | Process::Ar1 { dt, .. } => *dt,
        }
    }
}

/// Simulates `steps` steps, returning `(time, value)` points.
pub fn compute(process: Process, steps: usize, seed: Option<u64>) -> Result<Vec<(f64, f64)>> {
    let mut rng = PricerRng::from_seed(seed.unwrap_or_else(fresh_entropy));

    let values = match process {
        Process::Walk { p } => simple_random_walk(steps, p, &mut rng)?,
        Process::Lognormal { mu, sigma, dt, p0 } => {
            lognormal_price_path(steps, mu, sigma, dt, p0, &mut rng)?
        }
        Process::Ar1 {
            lambda,
            mu,
            sigma,
            dt,
            r0,
        } => ar1_path(steps, lambda, mu, sigma, dt, r0, &mut rng)?,
    };

    let times = linspace(0.0, steps as f64 * process.dt(), steps + 1);
    Ok(times.into_iter().zip(values).collect())
}

/// Run the simulate command
pub fn run(process: Process, steps: usize, seed: Option<u64>) -> Result<()> {
    info!(process = process.name(), steps, "Simulating...");

    let points = compute(process, steps, seed)?;

    println!("--- {} ({} steps) ---", process.name(), steps);
    for (i, (t, value)) in points.iter().enumerate() {
        println!("t[{:>4}] = {:>10.6}   {:>12.6}", i, t, value);
    }
    Ok(())
}
