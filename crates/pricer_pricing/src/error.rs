//! Top-level error type for pricing runs.

use pricer_core::types::ParameterError;
use thiserror::Error;

use crate::mc::ConfigError;

/// Errors surfaced by a pricing run.
///
/// Configuration and parameter errors are detected before any thread is
/// started. The remaining variants describe runs that cannot produce a price.
#[derive(Error, Debug)]
pub enum PricingError {
    /// Rejected option descriptor.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Rejected engine configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The run completed zero simulations, so no average exists.
    #[error("No simulations completed: price is undefined")]
    NoSimulations,

    /// The operating system refused to start a worker thread.
    #[error("Failed to spawn worker {worker_id}: {source}")]
    Spawn {
        /// Index of the worker that could not be started.
        worker_id: usize,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A worker thread panicked before draining the queue.
    #[error("Worker {worker_id} panicked")]
    WorkerPanicked {
        /// Index of the panicked worker.
        worker_id: usize,
    },
}
