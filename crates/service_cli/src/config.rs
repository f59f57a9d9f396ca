//! CLI configuration management
//!
//! Resolves option and engine settings from, highest priority first:
//! 1. Command-line flags
//! 2. Environment variables (`MCPRICER_*`)
//! 3. TOML file (`--config`, or `mcpricer.toml` in the working directory)
//! 4. Built-in defaults
//!
//! ```toml
//! log_level = "info"
//!
//! [option]
//! maturity = 1.0
//! strike = 100.0
//! spot = 100.0
//! volatility = 0.2
//! rate = 0.05
//!
//! [engine]
//! simulations = 10000000
//! batch_size = 100000
//! workers = 8
//! seed = 42
//! ```

use pricer_core::types::{OptionParams, ParameterError};
use pricer_pricing::mc::{ConfigError as EngineConfigError, EngineConfig, DEFAULT_BATCH_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "mcpricer.toml";

/// Default total simulation count.
pub const DEFAULT_SIMULATIONS: u64 = 10_000_000;

const ENV_LOG_LEVEL: &str = "MCPRICER_LOG_LEVEL";
const ENV_MATURITY: &str = "MCPRICER_MATURITY";
const ENV_STRIKE: &str = "MCPRICER_STRIKE";
const ENV_SPOT: &str = "MCPRICER_SPOT";
const ENV_VOLATILITY: &str = "MCPRICER_VOLATILITY";
const ENV_RATE: &str = "MCPRICER_RATE";
const ENV_SIMULATIONS: &str = "MCPRICER_SIMULATIONS";
const ENV_BATCH_SIZE: &str = "MCPRICER_BATCH_SIZE";
const ENV_WORKERS: &str = "MCPRICER_WORKERS";
const ENV_SEED: &str = "MCPRICER_SEED";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Unknown log level name
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    /// Config file unreadable or malformed
    #[error("Configuration file error: {0}")]
    FileError(String),

    /// Environment variable holds an unparsable value
    #[error("Environment variable {var}={value:?} could not be parsed")]
    EnvError {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
    },
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Everything, including per-batch detail
    Trace,
    /// Dispatch and worker summaries
    Debug,
    /// Run summaries
    #[default]
    Info,
    /// Worker failures only
    Warn,
    /// Errors only
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// `[option]` section
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct OptionSection {
    /// Time to maturity in years
    pub maturity: f64,
    /// Strike price
    pub strike: f64,
    /// Initial spot price
    pub spot: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Risk-free rate
    pub rate: f64,
}

impl Default for OptionSection {
    fn default() -> Self {
        Self {
            maturity: 1.0,
            strike: 100.0,
            spot: 100.0,
            volatility: 0.2,
            rate: 0.05,
        }
    }
}

/// `[engine]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSection {
    /// Total simulation count
    pub simulations: u64,
    /// Simulations per batch
    pub batch_size: usize,
    /// Worker threads; host parallelism when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    /// Fixed seed; fresh entropy when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            simulations: DEFAULT_SIMULATIONS,
            batch_size: DEFAULT_BATCH_SIZE,
            workers: None,
            seed: None,
        }
    }
}

/// Resolved CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Option parameters
    pub option: OptionSection,
    /// Engine parameters
    pub engine: EngineSection,
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Maturity override
    pub maturity: Option<f64>,
    /// Strike override
    pub strike: Option<f64>,
    /// Spot override
    pub spot: Option<f64>,
    /// Volatility override
    pub volatility: Option<f64>,
    /// Rate override
    pub rate: Option<f64>,
    /// Simulation count override
    pub simulations: Option<u64>,
    /// Batch size override
    pub batch_size: Option<usize>,
    /// Worker count override
    pub workers: Option<usize>,
    /// Seed override
    pub seed: Option<u64>,
}

fn parse_env<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvError { var, value }),
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Overlay variables found by `lookup` (normally `std::env::var`)
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = parse_env(&lookup, ENV_LOG_LEVEL)? {
            self.log_level = level;
        }
        if let Some(v) = parse_env(&lookup, ENV_MATURITY)? {
            self.option.maturity = v;
        }
        if let Some(v) = parse_env(&lookup, ENV_STRIKE)? {
            self.option.strike = v;
        }
        if let Some(v) = parse_env(&lookup, ENV_SPOT)? {
            self.option.spot = v;
        }
        if let Some(v) = parse_env(&lookup, ENV_VOLATILITY)? {
            self.option.volatility = v;
        }
        if let Some(v) = parse_env(&lookup, ENV_RATE)? {
            self.option.rate = v;
        }
        if let Some(v) = parse_env(&lookup, ENV_SIMULATIONS)? {
            self.engine.simulations = v;
        }
        if let Some(v) = parse_env(&lookup, ENV_BATCH_SIZE)? {
            self.engine.batch_size = v;
        }
        if let Some(v) = parse_env(&lookup, ENV_WORKERS)? {
            self.engine.workers = Some(v);
        }
        if let Some(v) = parse_env(&lookup, ENV_SEED)? {
            self.engine.seed = Some(v);
        }
        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self.option.maturity = cli.maturity.unwrap_or(self.option.maturity);
        self.option.strike = cli.strike.unwrap_or(self.option.strike);
        self.option.spot = cli.spot.unwrap_or(self.option.spot);
        self.option.volatility = cli.volatility.unwrap_or(self.option.volatility);
        self.option.rate = cli.rate.unwrap_or(self.option.rate);
        self.engine.simulations = cli.simulations.unwrap_or(self.engine.simulations);
        self.engine.batch_size = cli.batch_size.unwrap_or(self.engine.batch_size);
        self.engine.workers = cli.workers.or(self.engine.workers);
        self.engine.seed = cli.seed.or(self.engine.seed);
    }

    /// Validated option descriptor
    pub fn option_params(&self) -> Result<OptionParams, ParameterError> {
        let o = &self.option;
        OptionParams::new(o.maturity, o.strike, o.spot, o.volatility, o.rate)
    }

    /// Validated engine configuration
    pub fn engine_config(&self) -> Result<EngineConfig, EngineConfigError> {
        let mut builder = EngineConfig::builder()
            .n_simulations(self.engine.simulations)
            .batch_size(self.engine.batch_size)
            .maybe_seed(self.engine.seed);
        if let Some(workers) = self.engine.workers {
            builder = builder.n_workers(workers);
        }
        builder.build()
    }
}

/// Build configuration from all sources
///
/// `lookup` resolves environment variables; the binary passes
/// `|key| std::env::var(key).ok()`.
pub fn build_config<F>(cli: &CliOverrides, lookup: F) -> Result<CliConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                CliConfig::from_file(default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    config.apply_env(lookup)?;
    config.merge_with_cli(cli);
    Ok(config)
}
