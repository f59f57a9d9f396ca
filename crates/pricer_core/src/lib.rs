//! # pricer_core: Foundation Types for Monte Carlo Option Pricing
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - The validated European option descriptor (`types::OptionParams`)
//! - Parameter validation errors (`types::ParameterError`)
//! - Black-Scholes closed form and normal distribution functions (`analytical`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derives
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::analytical::black_scholes_call;
//! use pricer_core::types::OptionParams;
//!
//! let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
//! let price = black_scholes_call(&option);
//! # assert!((price - 10.4506).abs() < 1e-3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `OptionParams` and `ParameterError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod types;
