//! Reference command implementation
//!
//! Prices the configured option with the single-threaded reference pricer.

use pricer_core::analytical::black_scholes_call;
use pricer_pricing::reference::{price_european_call, ReferenceResult};
use pricer_pricing::rng::{fresh_entropy, PricerRng};
use std::time::Instant;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Runs the sequential pricer with the configured simulation count and seed.
pub fn compute(config: &CliConfig) -> Result<ReferenceResult> {
    let option = config.option_params()?;
    let seed = config.engine.seed.unwrap_or_else(fresh_entropy);
    let mut rng = PricerRng::from_seed(seed);

    Ok(price_european_call(
        &option,
        config.engine.simulations,
        &mut rng,
    )?)
}

/// Run the reference command
pub fn run(config: &CliConfig) -> Result<()> {
    info!(
        simulations = config.engine.simulations,
        "Running sequential reference pricer..."
    );

    let start = Instant::now();
    let result = compute(config)?;
    let elapsed = start.elapsed();
    let black_scholes = black_scholes_call(&config.option_params()?);

    println!("Reference price:  {:.6}", result.price);
    println!("Std error:        {:.6}", result.std_error);
    println!("Simulations:      {}", result.n_simulations);
    println!("Elapsed:          {:.3} s", elapsed.as_secs_f64());
    println!("Black-Scholes:    {:.6}", black_scholes);
    println!("Difference:       {:+.6}", result.price - black_scholes);
    Ok(())
}
