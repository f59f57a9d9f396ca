//! # pricer_pricing: Concurrent Monte Carlo Engine
//!
//! ## Role
//!
//! pricer_pricing prices a European call by Monte Carlo on top of the
//! option descriptor from `pricer_core`:
//! - Concurrent batch engine with a blocking work queue and lock-free
//!   result aggregation (`mc`)
//! - Per-worker random number generation and seeding (`rng`)
//! - Sequential reference pricer used as a correctness oracle (`reference`)
//! - Sequential demonstration simulators for stochastic processes
//!   (`processes`)
//!
//! ## Concurrency Model
//!
//! One dispatcher (the calling thread) produces fixed-size batches; a fixed
//! pool of worker threads consumes them. The queue's mutex is the only lock
//! in the engine; partial results are folded with compare-and-swap loops on
//! atomics. All threads are scoped to a single run, so no state outlives it.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::OptionParams;
//! use pricer_pricing::mc::{ConcurrentEngine, EngineConfig};
//! use pricer_pricing::reference::price_european_call;
//! use pricer_pricing::rng::PricerRng;
//!
//! let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
//!
//! let config = EngineConfig::builder()
//!     .n_simulations(100_000)
//!     .n_workers(2)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let concurrent = ConcurrentEngine::new(option, config).run().unwrap();
//!
//! let mut rng = PricerRng::from_seed(42);
//! let sequential = price_european_call(&option, 100_000, &mut rng).unwrap();
//!
//! assert!((concurrent.price - sequential.price).abs() < 0.5);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize` for run results and the option descriptor

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod mc;
pub mod processes;
pub mod reference;
pub mod rng;

pub use error::PricingError;
pub use mc::{ConcurrentEngine, EngineConfig, EngineResult};
pub use reference::{price_european_call, ReferenceResult};
