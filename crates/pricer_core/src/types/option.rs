//! European option descriptor.
//!
//! [`OptionParams`] holds the five market parameters needed to simulate one
//! terminal price and its payoff under Geometric Brownian Motion:
//!
//! ```text
//! S(T) = S₀ × exp((r - 0.5σ²)T + σ√T × Z),   Z ~ N(0, 1)
//! ```
//!
//! The descriptor is validated once at construction and is immutable
//! afterwards, so it can be shared by reference across threads without
//! synchronisation.

use super::error::ParameterError;

/// Market parameters of a European option.
///
/// Construct through [`OptionParams::new`], which rejects non-positive
/// maturity, strike or spot, negative volatility, and non-finite values.
/// Zero volatility is accepted and yields a deterministic terminal price.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::OptionParams;
///
/// let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
///
/// assert_eq!(option.strike(), 100.0);
/// assert!((option.discount_factor() - (-0.05_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct OptionParams {
    /// Time to maturity (T) in years.
    maturity: f64,
    /// Strike price (K).
    strike: f64,
    /// Initial spot price (S₀).
    spot: f64,
    /// Volatility (σ), annualised.
    volatility: f64,
    /// Risk-free rate (r), annualised, continuously compounded.
    rate: f64,
}

impl OptionParams {
    /// Creates a validated option descriptor.
    ///
    /// # Arguments
    ///
    /// * `maturity` - Time to maturity in years (must be positive)
    /// * `strike` - Strike price (must be positive)
    /// * `spot` - Initial spot price (must be positive)
    /// * `volatility` - Annualised volatility (must be non-negative)
    /// * `rate` - Risk-free rate (any finite value)
    ///
    /// # Errors
    ///
    /// Returns the first [`ParameterError`] found, checking fields in the
    /// argument order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pricer_core::types::{OptionParams, ParameterError};
    ///
    /// let err = OptionParams::new(1.0, 100.0, 100.0, -0.2, 0.05).unwrap_err();
    /// assert_eq!(err, ParameterError::InvalidVolatility { volatility: -0.2 });
    /// ```
    pub fn new(
        maturity: f64,
        strike: f64,
        spot: f64,
        volatility: f64,
        rate: f64,
    ) -> Result<Self, ParameterError> {
        if !(maturity > 0.0 && maturity.is_finite()) {
            return Err(ParameterError::InvalidMaturity { maturity });
        }
        if !(strike > 0.0 && strike.is_finite()) {
            return Err(ParameterError::InvalidStrike { strike });
        }
        if !(spot > 0.0 && spot.is_finite()) {
            return Err(ParameterError::InvalidSpot { spot });
        }
        if !(volatility >= 0.0 && volatility.is_finite()) {
            return Err(ParameterError::InvalidVolatility { volatility });
        }
        if !rate.is_finite() {
            return Err(ParameterError::InvalidRate { rate });
        }

        Ok(Self {
            maturity,
            strike,
            spot,
            volatility,
            rate,
        })
    }

    /// Returns the time to maturity in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Returns the strike price.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Returns the initial spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Log-space drift over the whole horizon: `(r - 0.5σ²)T`.
    #[inline]
    pub fn drift(&self) -> f64 {
        (self.rate - 0.5 * self.volatility * self.volatility) * self.maturity
    }

    /// Log-space diffusion scale over the whole horizon: `σ√T`.
    #[inline]
    pub fn diffusion(&self) -> f64 {
        self.volatility * self.maturity.sqrt()
    }

    /// Present value factor `e^(-rT)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Maps a standard normal draw to a terminal price.
    ///
    /// Hot loops should hoist [`drift`](Self::drift) and
    /// [`diffusion`](Self::diffusion) instead of calling this per draw.
    #[inline]
    pub fn terminal_price(&self, z: f64) -> f64 {
        self.spot * (self.drift() + self.diffusion() * z).exp()
    }

    /// Call payoff `max(S(T) - K, 0)`.
    #[inline]
    pub fn call_payoff(&self, terminal_price: f64) -> f64 {
        (terminal_price - self.strike).max(0.0)
    }
}
