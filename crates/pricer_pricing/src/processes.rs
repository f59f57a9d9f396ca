//! Sequential demonstration simulators.
//!
//! Single-path generators for three classic discrete-time processes. They
//! share the engine's [`PricerRng`] but none of its concurrency, and exist
//! to illustrate the dynamics the option model builds on:
//!
//! | Process | Recursion | Start |
//! |---------|-----------|-------|
//! | [`simple_random_walk`] | `S[t+1] = S[t] ± 1`, up with probability `p` | 0 |
//! | [`lognormal_price_path`] | `log P[t+1] = log P[t] + r`, `r ~ N(μ·dt, σ·√dt)` | `p0` |
//! | [`ar1_path`] | `R[t] = (1+λ)·μ·dt − λ·R[t−1] + ε`, `ε ~ N(0, σ·√dt)` | `r0` |
//!
//! Every path has `n_steps + 1` points including the start.

use thiserror::Error;

use crate::rng::PricerRng;

/// Invalid input to a process simulator.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ProcessError {
    /// Step probability outside [0, 1].
    #[error("Invalid probability {p}: must be in [0, 1]")]
    InvalidProbability {
        /// The rejected probability.
        p: f64,
    },

    /// Negative or non-finite volatility.
    #[error("Invalid volatility {sigma}: must be non-negative and finite")]
    InvalidVolatility {
        /// The rejected volatility.
        sigma: f64,
    },

    /// Non-positive or non-finite time step.
    #[error("Invalid time step {dt}: must be positive and finite")]
    InvalidTimeStep {
        /// The rejected time step.
        dt: f64,
    },

    /// Non-positive or non-finite initial price.
    #[error("Invalid initial price {p0}: must be positive and finite")]
    InvalidInitialPrice {
        /// The rejected initial price.
        p0: f64,
    },

    /// A non-finite parameter.
    #[error("Parameter '{name}' must be finite, got {value}")]
    NonFinite {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ProcessError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProcessError::NonFinite { name, value })
    }
}

fn check_sigma_dt(sigma: f64, dt: f64) -> Result<(), ProcessError> {
    if !(sigma >= 0.0 && sigma.is_finite()) {
        return Err(ProcessError::InvalidVolatility { sigma });
    }
    if !(dt > 0.0 && dt.is_finite()) {
        return Err(ProcessError::InvalidTimeStep { dt });
    }
    Ok(())
}

/// Simulates a symmetric or biased simple random walk starting at 0.
///
/// # Errors
///
/// Returns [`ProcessError::InvalidProbability`] if `p` is outside [0, 1].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::processes::simple_random_walk;
/// use pricer_pricing::rng::PricerRng;
///
/// let mut rng = PricerRng::from_seed(3);
/// let path = simple_random_walk(20, 0.5, &mut rng).unwrap();
///
/// assert_eq!(path.len(), 21);
/// assert_eq!(path[0], 0.0);
/// assert!(path.windows(2).all(|w| (w[1] - w[0]).abs() == 1.0));
/// ```
pub fn simple_random_walk(
    n_steps: usize,
    p: f64,
    rng: &mut PricerRng,
) -> Result<Vec<f64>, ProcessError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ProcessError::InvalidProbability { p });
    }

    let mut path = Vec::with_capacity(n_steps + 1);
    let mut level = 0.0;
    path.push(level);
    for _ in 0..n_steps {
        level += if rng.gen_uniform() < p { 1.0 } else { -1.0 };
        path.push(level);
    }
    Ok(path)
}

/// Simulates a lognormal price path with i.i.d. normal log-returns.
///
/// # Arguments
///
/// * `n_steps` - Number of steps
/// * `mu` - Drift per unit time
/// * `sigma` - Volatility per square-root unit time
/// * `dt` - Time step
/// * `p0` - Initial price
///
/// # Errors
///
/// Returns `ProcessError` if `sigma < 0`, `dt <= 0`, `p0 <= 0`, or any
/// argument is non-finite.
pub fn lognormal_price_path(
    n_steps: usize,
    mu: f64,
    sigma: f64,
    dt: f64,
    p0: f64,
    rng: &mut PricerRng,
) -> Result<Vec<f64>, ProcessError> {
    check_finite("mu", mu)?;
    check_sigma_dt(sigma, dt)?;
    if !(p0 > 0.0 && p0.is_finite()) {
        return Err(ProcessError::InvalidInitialPrice { p0 });
    }

    let drift = mu * dt;
    let diffusion = sigma * dt.sqrt();

    let mut path = Vec::with_capacity(n_steps + 1);
    let mut log_price = p0.ln();
    path.push(p0);
    for _ in 0..n_steps {
        log_price += drift + diffusion * rng.gen_normal();
        path.push(log_price.exp());
    }
    Ok(path)
}

/// Simulates a mean-reverting AR(1) process.
///
/// # Arguments
///
/// * `n_steps` - Number of steps
/// * `lambda` - Autoregressive coefficient
/// * `mu` - Long-run drift per unit time
/// * `sigma` - Noise volatility per square-root unit time
/// * `dt` - Time step
/// * `r0` - Initial value
///
/// # Errors
///
/// Returns `ProcessError` if `sigma < 0`, `dt <= 0`, or any argument is
/// non-finite.
pub fn ar1_path(
    n_steps: usize,
    lambda: f64,
    mu: f64,
    sigma: f64,
    dt: f64,
    r0: f64,
    rng: &mut PricerRng,
) -> Result<Vec<f64>, ProcessError> {
    check_finite("lambda", lambda)?;
    check_finite("mu", mu)?;
    check_finite("r0", r0)?;
    check_sigma_dt(sigma, dt)?;

    let level = (1.0 + lambda) * mu * dt;
    let noise = sigma * dt.sqrt();

    let mut path = Vec::with_capacity(n_steps + 1);
    let mut current = r0;
    path.push(current);
    for _ in 0..n_steps {
        current = level - lambda * current + noise * rng.gen_normal();
        path.push(current);
    }
    Ok(path)
}

/// Returns `num` evenly spaced values from `start` to `end` inclusive.
///
/// `num == 0` gives an empty vector and `num == 1` gives `[start]`.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::processes::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace(start: f64, end: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let delta = (end - start) / (num - 1) as f64;
            (0..num).map(|i| start + delta * i as f64).collect()
        }
    }
}
