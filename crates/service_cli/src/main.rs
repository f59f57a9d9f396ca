//! mcpricer - Command Line Front End for the Concurrent Monte Carlo Pricer
//!
//! # Commands
//!
//! - `mcpricer price` - Price a European call on the concurrent engine
//! - `mcpricer reference` - Price with the single-threaded reference pricer
//! - `mcpricer simulate walk|lognormal|ar1` - Print a demonstration path
//! - `mcpricer check` - Show the resolved configuration
//!
//! # Configuration
//!
//! Flags override `MCPRICER_*` environment variables, which override the
//! TOML config file, which overrides built-in defaults. `RUST_LOG`, when
//! set, replaces the configured log level.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::simulate::Process;
use config::{build_config, CliOverrides, LogLevel};
pub use error::{CliError, Result};

/// Concurrent Monte Carlo European option pricer
#[derive(Parser)]
#[command(name = "mcpricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug log level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

/// Option parameter overrides
#[derive(Args, Debug, Default)]
struct OptionArgs {
    /// Time to maturity in years
    #[arg(long)]
    maturity: Option<f64>,

    /// Strike price
    #[arg(long)]
    strike: Option<f64>,

    /// Initial spot price
    #[arg(long)]
    spot: Option<f64>,

    /// Annualised volatility
    #[arg(long)]
    volatility: Option<f64>,

    /// Risk-free rate
    #[arg(long)]
    rate: Option<f64>,
}

/// Engine parameter overrides
#[derive(Args, Debug, Default)]
struct EngineArgs {
    /// Total number of simulations
    #[arg(short = 'n', long)]
    simulations: Option<u64>,

    /// Simulations per batch
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Number of worker threads
    #[arg(short, long)]
    workers: Option<usize>,

    /// Fixed seed (fresh entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European call on the concurrent engine
    Price {
        #[command(flatten)]
        option: OptionArgs,

        #[command(flatten)]
        engine: EngineArgs,

        /// Output format (table, json)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Price a European call with the single-threaded reference pricer
    Reference {
        #[command(flatten)]
        option: OptionArgs,

        /// Number of simulations
        #[arg(short = 'n', long)]
        simulations: Option<u64>,

        /// Fixed seed (fresh entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print one path of a demonstration process
    Simulate {
        #[command(subcommand)]
        process: ProcessCommand,
    },

    /// Check the resolved configuration
    Check {
        #[command(flatten)]
        option: OptionArgs,

        #[command(flatten)]
        engine: EngineArgs,
    },
}

/// Common path arguments
#[derive(Args, Debug)]
struct PathArgs {
    /// Number of steps
    #[arg(short, long, default_value_t = 20)]
    steps: usize,

    /// Fixed seed (fresh entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum ProcessCommand {
    /// Simple ±1 random walk starting at 0
    Walk {
        #[command(flatten)]
        path: PathArgs,

        /// Up-step probability
        #[arg(short, default_value_t = 0.5)]
        p: f64,
    },

    /// Lognormal price path
    Lognormal {
        #[command(flatten)]
        path: PathArgs,

        /// Drift per unit time
        #[arg(long, default_value_t = 0.1)]
        mu: f64,

        /// Volatility
        #[arg(long, default_value_t = 0.3)]
        sigma: f64,

        /// Time step
        #[arg(long, default_value_t = 1.0 / 252.0)]
        dt: f64,

        /// Initial price
        #[arg(long, default_value_t = 1.0)]
        p0: f64,
    },

    /// Mean-reverting AR(1) process
    Ar1 {
        #[command(flatten)]
        path: PathArgs,

        /// Autoregressive coefficient
        #[arg(long, default_value_t = 0.4)]
        lambda: f64,

        /// Long-run drift per unit time
        #[arg(long, default_value_t = 0.1)]
        mu: f64,

        /// Noise volatility
        #[arg(long, default_value_t = 0.3)]
        sigma: f64,

        /// Time step
        #[arg(long, default_value_t = 1.0 / 252.0)]
        dt: f64,

        /// Initial value
        #[arg(long, default_value_t = 0.0)]
        r0: f64,
    },
}

impl ProcessCommand {
    fn into_parts(self) -> (Process, PathArgs) {
        match self {
            ProcessCommand::Walk { path, p } => (Process::Walk { p }, path),
            ProcessCommand::Lognormal {
                path,
                mu,
                sigma,
                dt,
                p0,
            } => (Process::Lognormal { mu, sigma, dt, p0 }, path),
            ProcessCommand::Ar1 {
                path,
                lambda,
                mu,
                sigma,
                dt,
                r0,
            } => (
                Process::Ar1 {
                    lambda,
                    mu,
                    sigma,
                    dt,
                    r0,
                },
                path,
            ),
        }
    }
}

impl Cli {
    /// Collects every flag that overrides file and environment settings.
    fn overrides(&self) -> CliOverrides {
        let mut overrides = CliOverrides {
            config_file: self.config.clone(),
            log_level: self
                .log_level
                .or_else(|| self.verbose.then_some(LogLevel::Debug)),
            ..CliOverrides::default()
        };

        let (option, engine) = match &self.command {
            Commands::Price { option, engine, .. } | Commands::Check { option, engine } => {
                (Some(option), Some(engine))
            }
            Commands::Reference {
                option,
                simulations,
                seed,
            } => {
                overrides.simulations = *simulations;
                overrides.seed = *seed;
                (Some(option), None)
            }
            Commands::Simulate { .. } => (None, None),
        };

        if let Some(option) = option {
            overrides.maturity = option.maturity;
            overrides.strike = option.strike;
            overrides.spot = option.spot;
            overrides.volatility = option.volatility;
            overrides.rate = option.rate;
        }
        if let Some(engine) = engine {
            overrides.simulations = engine.simulations;
            overrides.batch_size = engine.batch_size;
            overrides.workers = engine.workers;
            overrides.seed = engine.seed;
        }
        overrides
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let overrides = cli.overrides();
    let config = build_config(&overrides, |key| std::env::var(key).ok())
        .context("failed to resolve configuration")?;

    init_tracing(config.log_level.as_filter_str());

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Configuration resolved");

    match cli.command {
        Commands::Price { format, .. } => {
            commands::price::run(&config, &format).context("price command failed")
        }
        Commands::Reference { .. } => {
            commands::reference::run(&config).context("reference command failed")
        }
        Commands::Simulate { process } => {
            let (process, path) = process.into_parts();
            commands::simulate::run(process, path.steps, path.seed)
                .context("simulate command failed")
        }
        Commands::Check { .. } => commands::check::run(&config).context("check command failed"),
    }
}
