//! Error types for engine configuration.
//!
//! This module defines structured error types for configuration validation.
//! They are raised by [`EngineConfigBuilder::build`](super::EngineConfigBuilder::build)
//! before any worker thread is started.

use thiserror::Error;

/// Configuration error for the concurrent engine.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Total simulation count must be positive.
    #[error("Invalid simulation count {0}: must be at least 1")]
    InvalidSimulationCount(u64),

    /// Batch size must be positive.
    #[error("Invalid batch size {0}: must be at least 1")]
    InvalidBatchSize(usize),

    /// Worker count outside valid range [1, 1024].
    #[error("Invalid worker count {0}: must be in range [1, 1024]")]
    InvalidWorkerCount(usize),

    /// Invalid parameter value with name and description.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
}
