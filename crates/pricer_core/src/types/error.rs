//! Error types for option parameter validation.
//!
//! This module provides:
//! - `ParameterError`: rejection of an option descriptor at construction time

use thiserror::Error;

/// Option parameter validation errors.
///
/// Raised by [`OptionParams::new`](crate::types::OptionParams::new) before any
/// simulation work is started. Each variant carries the offending value.
///
/// # Variants
/// - `InvalidMaturity`: Non-positive or non-finite time to maturity
/// - `InvalidStrike`: Non-positive or non-finite strike
/// - `InvalidSpot`: Non-positive or non-finite spot price
/// - `InvalidVolatility`: Negative or non-finite volatility
/// - `InvalidRate`: Non-finite risk-free rate
///
/// # Examples
/// ```
/// use pricer_core::types::ParameterError;
///
/// let err = ParameterError::InvalidSpot { spot: -1.0 };
/// assert!(format!("{}", err).contains("spot"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterError {
    /// Time to maturity must be positive and finite.
    #[error("Invalid maturity: T = {maturity} (must be positive)")]
    InvalidMaturity {
        /// The rejected maturity in years
        maturity: f64,
    },

    /// Strike must be positive and finite.
    #[error("Invalid strike: K = {strike} (must be positive)")]
    InvalidStrike {
        /// The rejected strike
        strike: f64,
    },

    /// Spot must be positive and finite.
    #[error("Invalid spot price: S = {spot} (must be positive)")]
    InvalidSpot {
        /// The rejected spot price
        spot: f64,
    },

    /// Volatility must be non-negative and finite.
    #[error("Invalid volatility: σ = {volatility} (must be non-negative)")]
    InvalidVolatility {
        /// The rejected volatility
        volatility: f64,
    },

    /// Rate may take any sign but must be finite.
    #[error("Invalid rate: r = {rate} (must be finite)")]
    InvalidRate {
        /// The rejected rate
        rate: f64,
    },
}
