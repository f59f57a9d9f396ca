//! Concurrent Monte Carlo engine for European calls.
//!
//! The engine splits a large simulation budget into fixed-size batches,
//! processes them on a fixed pool of worker threads, and aggregates the
//! partial results lock-free.
//!
//! # Architecture
//!
//! ```text
//! ConcurrentEngine
//! ├── EngineConfig        (budget, batch size, workers, seed)
//! ├── WorkQueue<WorkBatch>  (blocking FIFO, stop-after-drain)
//! ├── ResultAccumulator   (AtomicU64 totals, CAS retry folding)
//! ├── dispatch()          (sole producer, runs on the calling thread)
//! └── run_worker() × N    (consumers, one PricerRng each)
//! ```
//!
//! # Synchronisation
//!
//! | Shared state | Mechanism |
//! |--------------|-----------|
//! | pending batches, stop flag | `Mutex` + `Condvar` ([`WorkQueue`]) |
//! | payoff sum, sum of squares | `AtomicU64` bit patterns, `compare_exchange_weak` loop |
//! | simulation count | `AtomicU64::fetch_add` |
//! | option descriptor | immutable, shared by reference |
//!
//! # Example
//!
//! ```rust
//! use pricer_core::types::OptionParams;
//! use pricer_pricing::mc::{ConcurrentEngine, EngineConfig};
//!
//! let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
//! let config = EngineConfig::builder()
//!     .n_simulations(100_000)
//!     .batch_size(5_000)
//!     .n_workers(2)
//!     .build()
//!     .unwrap();
//!
//! let result = ConcurrentEngine::new(option, config).run().unwrap();
//! println!("price = {:.4} ± {:.4}", result.price, result.confidence_95());
//! ```

mod accumulator;
mod batch;
mod config;
mod engine;
mod error;
mod queue;
mod worker;

pub use accumulator::{AccumulatorSnapshot, ResultAccumulator};
pub use batch::{dispatch, BatchPlan, DispatchSummary, WorkBatch};
pub use config::{
    default_worker_count, EngineConfig, EngineConfigBuilder, DEFAULT_BATCH_SIZE, MAX_WORKERS,
};
pub use engine::{price_from_snapshot, ConcurrentEngine, EngineResult};
pub use error::ConfigError;
pub use queue::WorkQueue;
pub use worker::{run_worker, WorkerStats};

pub(crate) use worker::simulate_batch;
