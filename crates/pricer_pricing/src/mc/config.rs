//! Concurrent engine configuration.
//!
//! This module provides the configuration type and builder for
//! [`ConcurrentEngine`](super::ConcurrentEngine) runs.

use super::error::ConfigError;

/// Default number of simulations per work batch.
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// Maximum number of worker threads allowed.
pub const MAX_WORKERS: usize = 1024;

/// Concurrent engine configuration.
///
/// Immutable configuration specifying the simulation budget and how it is
/// split across workers. Use [`EngineConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::EngineConfig;
///
/// let config = EngineConfig::builder()
///     .n_simulations(1_000_000)
///     .batch_size(10_000)
///     .n_workers(4)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_simulations(), 1_000_000);
/// assert_eq!(config.n_workers(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Total number of simulations to perform.
    n_simulations: u64,
    /// Maximum simulations per work batch.
    batch_size: usize,
    /// Number of worker threads.
    n_workers: usize,
    /// Optional seed replacing OS entropy.
    seed: Option<u64>,
}

impl EngineConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Returns the total number of simulations.
    #[inline]
    pub fn n_simulations(&self) -> u64 {
        self.n_simulations
    }

    /// Returns the maximum simulations per batch.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the number of worker threads.
    #[inline]
    pub fn n_workers(&self) -> usize {
        self.n_workers
    }

    /// Returns the optional seed for reproducibility.
    ///
    /// A seed fixes every worker's stream. Because batch-to-worker
    /// assignment depends on scheduling, a seeded multi-worker run is still
    /// only reproducible in aggregate.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of batches the dispatcher will enqueue.
    #[inline]
    pub fn n_batches(&self) -> u64 {
        self.n_simulations.div_ceil(self.batch_size as u64)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_simulations` is 0
    /// - `batch_size` is 0
    /// - `n_workers` is 0 or greater than [`MAX_WORKERS`]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_simulations == 0 {
            return Err(ConfigError::InvalidSimulationCount(self.n_simulations));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize(self.batch_size));
        }
        if self.n_workers == 0 || self.n_workers > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount(self.n_workers));
        }
        Ok(())
    }
}

/// Returns the host's available parallelism (at least 1).
#[inline]
pub fn default_worker_count() -> usize {
    num_cpus::get().clamp(1, MAX_WORKERS)
}

/// Builder for [`EngineConfig`].
///
/// `n_simulations` is required. `batch_size` defaults to
/// [`DEFAULT_BATCH_SIZE`], `n_workers` to the host parallelism.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{EngineConfig, DEFAULT_BATCH_SIZE};
///
/// let config = EngineConfig::builder()
///     .n_simulations(10_000_000)
///     .build()
///     .expect("valid config");
///
/// assert_eq!(config.batch_size(), DEFAULT_BATCH_SIZE);
/// assert!(config.n_workers() >= 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct EngineConfigBuilder {
    n_simulations: Option<u64>,
    batch_size: Option<usize>,
    n_workers: Option<usize>,
    seed: Option<u64>,
}

impl EngineConfigBuilder {
    /// Sets the total number of simulations.
    #[inline]
    pub fn n_simulations(mut self, n_simulations: u64) -> Self {
        self.n_simulations = Some(n_simulations);
        self
    }

    /// Sets the maximum simulations per batch.
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Sets the number of worker threads.
    #[inline]
    pub fn n_workers(mut self, n_workers: usize) -> Self {
        self.n_workers = Some(n_workers);
        self
    }

    /// Sets the seed replacing OS entropy.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_simulations` is not set, or if any
    /// value fails [`EngineConfig::validate`].
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let n_simulations = self.n_simulations.ok_or(ConfigError::InvalidParameter {
            name: "n_simulations",
            value: "must be specified".to_string(),
        })?;

        let config = EngineConfig {
            n_simulations,
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            n_workers: self.n_workers.unwrap_or_else(default_worker_count),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}
