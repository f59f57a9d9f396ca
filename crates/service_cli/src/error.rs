//! CLI error types

use pricer_core::types::ParameterError;
use pricer_pricing::mc::ConfigError as EngineConfigError;
use pricer_pricing::processes::ProcessError;
use pricer_pricing::PricingError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Option parameters rejected
    #[error("Invalid option: {0}")]
    Parameter(#[from] ParameterError),

    /// Engine configuration rejected
    #[error("Invalid engine configuration: {0}")]
    Engine(#[from] EngineConfigError),

    /// Pricing run failed
    #[error("Pricing failed: {0}")]
    Pricing(#[from] PricingError),

    /// Process simulation rejected its inputs
    #[error("Simulation failed: {0}")]
    Process(#[from] ProcessError),

    /// JSON output serialisation failed
    #[error("Output error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML output serialisation failed
    #[error("Output error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
