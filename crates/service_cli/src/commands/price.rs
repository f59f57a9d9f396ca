//! Price command implementation
//!
//! Prices a European call on the concurrent engine and compares the
//! estimate with the Black-Scholes closed form.

use pricer_core::analytical::black_scholes_call;
use pricer_core::types::OptionParams;
use pricer_pricing::{ConcurrentEngine, EngineResult};
use serde::Serialize;
use tracing::info;

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Engine estimate alongside its analytical reference.
#[derive(Debug, Serialize)]
pub struct PriceReport {
    /// Priced option
    pub option: OptionParams,
    /// Engine output
    #[serde(flatten)]
    pub result: EngineResult,
    /// Half-width of the 95% confidence interval
    pub confidence_95: f64,
    /// Black-Scholes price
    pub black_scholes: f64,
    /// Engine price minus Black-Scholes price
    pub difference: f64,
}

impl PriceReport {
    fn new(option: OptionParams, result: EngineResult) -> Self {
        let black_scholes = black_scholes_call(&option);
        Self {
            option,
            confidence_95: result.confidence_95(),
            black_scholes,
            difference: result.price - black_scholes,
            result,
        }
    }
}

/// Runs the engine for the resolved configuration.
pub fn compute(config: &CliConfig) -> Result<PriceReport> {
    let option = config.option_params()?;
    let engine_config = config.engine_config()?;

    info!(
        simulations = engine_config.n_simulations(),
        batch_size = engine_config.batch_size(),
        workers = engine_config.n_workers(),
        "Starting pricing..."
    );

    let result = ConcurrentEngine::new(option, engine_config).run()?;
    Ok(PriceReport::new(option, result))
}

/// Renders a report as `table` or `json`.
pub fn render(report: &PriceReport, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(report)?),
        "table" => Ok(render_table(report)),
        other => Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: json, table",
            other
        ))),
    }
}

fn render_table(report: &PriceReport) -> String {
    let o = &report.option;
    let r = &report.result;
    let rows = [
        ("Spot", format!("{:.4}", o.spot())),
        ("Strike", format!("{:.4}", o.strike())),
        ("Maturity", format!("{:.4}", o.maturity())),
        ("Volatility", format!("{:.4}", o.volatility())),
        ("Rate", format!("{:.4}", o.rate())),
        ("Price", format!("{:.6}", r.price)),
        ("Std error", format!("{:.6}", r.std_error)),
        ("95% CI", format!("± {:.6}", report.confidence_95)),
        ("Simulations", r.n_simulations.to_string()),
        ("Batches", r.n_batches.to_string()),
        ("Workers", r.n_workers.to_string()),
        ("CAS retries", r.cas_retries.to_string()),
        ("Elapsed", format!("{:.3} s", r.elapsed.as_secs_f64())),
        ("Black-Scholes", format!("{:.6}", report.black_scholes)),
        ("Difference", format!("{:+.6}", report.difference)),
    ];

    let mut out = String::new();
    out.push_str("┌───────────────┬──────────────────┐\n");
    for (label, value) in rows {
        out.push_str(&format!("│ {:<13} │ {:>16} │\n", label, value));
    }
    out.push_str("└───────────────┴──────────────────┘");
    out
}

/// Run the price command
pub fn run(config: &CliConfig, format: &str) -> Result<()> {
    // Reject a bad format before spending the simulation budget
    if !matches!(format, "json" | "table") {
        return Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: json, table",
            format
        )));
    }

    let report = compute(config)?;
    println!("{}", render(&report, format)?);

    info!("Pricing complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> CliConfig {
        let mut config = CliConfig::default();
        config.engine.simulations = 20_000;
        config.engine.batch_size = 1_000;
        config.engine.workers = Some(2);
        config.engine.seed = Some(42);
        config
    }

    #[test]
    fn test_compute_report() {
        let report = compute(&small_config()).unwrap();

        assert_eq!(report.result.n_simulations, 20_000);
        assert_eq!(report.result.n_batches, 20);
        assert_eq!(report.result.n_workers, 2);
        approx::assert_relative_eq!(report.black_scholes, 10.450583572185565, epsilon = 1e-4);
        approx::assert_relative_eq!(
            report.difference,
            report.result.price - report.black_scholes
        );
    }

    #[test]
    fn test_render_table_and_json() {
        let report = compute(&small_config()).unwrap();

        let table = render(&report, "table").unwrap();
        assert!(table.contains("Black-Scholes"));
        assert!(table.contains("20000"));

        let json = render(&report, "json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["n_simulations"], 20_000);
        assert!(value["price"].is_f64());
        assert_eq!(value["option"]["strike"], 100.0);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let mut config = small_config();
        config.engine.simulations = 1;
        let result = run(&config, "xml");
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_invalid_option_rejected() {
        let mut config = small_config();
        config.option.spot = -1.0;
        assert!(matches!(compute(&config), Err(CliError::Parameter(_))));
    }
}
