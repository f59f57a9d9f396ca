//! Check command implementation
//!
//! Prints the resolved configuration and validates it without pricing.

use pricer_pricing::mc::default_worker_count;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Validates `config` and renders a human-readable summary.
pub fn summary(config: &CliConfig) -> Result<String> {
    let option = config.option_params()?;
    let engine = config.engine_config()?;

    let resolved = toml::to_string_pretty(config)?;

    let mut out = String::new();
    out.push_str("Resolved configuration\n");
    out.push_str("----------------------\n");
    out.push_str(&resolved);
    out.push('\n');
    out.push_str(&format!("Host parallelism:  {}\n", default_worker_count()));
    out.push_str(&format!("Workers in use:    {}\n", engine.n_workers()));
    out.push_str(&format!("Batches per run:   {}\n", engine.n_batches()));
    out.push_str(&format!("Discount factor:   {:.6}\n", option.discount_factor()));
    out.push_str("Status:            OK");
    Ok(out)
}

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");
    println!("mcpricer v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", summary(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    #[test]
    fn test_summary_default_config() {
        let mut config = CliConfig::default();
        config.engine.workers = Some(4);

        let text = summary(&config).unwrap();
        assert!(text.contains("Workers in use:    4"));
        assert!(text.contains("Batches per run:   100"));
        assert!(text.ends_with("OK"));
    }

    #[test]
    fn test_summary_rejects_invalid_engine() {
        let mut config = CliConfig::default();
        config.engine.workers = Some(0);
        assert!(matches!(summary(&config), Err(CliError::Engine(_))));
    }
}
