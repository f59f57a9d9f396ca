//! # Random Number Generation Infrastructure
//!
//! Random number generation for the Monte Carlo engines.
//!
//! ## Design Rationale
//!
//! - **Independence**: one generator per worker thread, never shared
//! - **Decorrelation**: worker seeds mix a per-run entropy value with the
//!   worker index (see [`worker_seed`])
//! - **Reproducibility**: an explicit seed replaces OS entropy when a run
//!   must be repeatable
//! - **Substitutability**: simulation loops draw through [`NormalSource`], so
//!   tests can inject a deterministic sequence
//!
//! ## Module Structure
//!
//! - [`prng`]: `PricerRng`, a `StdRng` wrapper with Ziggurat normals
//! - [`seed`]: entropy and per-worker seed derivation
//! - [`source`]: the `NormalSource` trait and a deterministic source
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{fresh_entropy, NormalSource, PricerRng};
//!
//! let entropy = fresh_entropy();
//! let mut worker_rng = PricerRng::for_worker(entropy, 0);
//! let z = worker_rng.next_normal();
//! # assert!(z.is_finite());
//! ```

pub mod prng;
pub mod seed;
pub mod source;

pub use prng::PricerRng;
pub use seed::{fresh_entropy, splitmix64, worker_seed};
pub use source::{CyclicSource, NormalSource};

#[cfg(test)]
mod tests;
