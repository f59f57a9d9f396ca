//! Black-Scholes closed form for European options.
//!
//! **Call**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! with d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T) and d₂ = d₁ - σ√T.
//!
//! When σ√T vanishes the terminal price is the deterministic forward
//! S·e^(rT), and prices collapse to the discounted intrinsic value of that
//! forward. This matches what a Monte Carlo run with zero volatility produces.

use num_traits::Float;

use super::distributions::norm_cdf;
use crate::types::OptionParams;

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`)
///
/// # Examples
/// ```
/// use pricer_core::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2);
/// let call = bs.price_call(100.0, 1.0);
/// let put = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K·e^(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a model from spot, rate and volatility.
    ///
    /// Inputs are not validated here; build from a validated
    /// [`OptionParams`] via [`BlackScholes::from_option`] when the
    /// parameters come from outside.
    #[inline]
    pub fn new(spot: T, rate: T, volatility: T) -> Self {
        Self {
            spot,
            rate,
            volatility,
        }
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Total standard deviation σ√T; zero marks the deterministic limit.
    #[inline]
    fn total_vol(&self, expiry: T) -> T {
        self.volatility * expiry.max(T::zero()).sqrt()
    }

    /// d₁ term. Only meaningful when σ√T > 0.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::one() / (T::one() + T::one());
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;
        (log_moneyness + drift) / self.total_vol(expiry)
    }

    /// d₂ term. Only meaningful when σ√T > 0.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.total_vol(expiry)
    }

    /// European call price.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::analytical::BlackScholes;
    ///
    /// let price = BlackScholes::new(100.0_f64, 0.05, 0.2).price_call(100.0, 1.0);
    /// assert!((price - 10.4506).abs() < 1e-3);
    /// ```
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let discount = (-self.rate * expiry).exp();
        let epsilon = T::from(1e-12).unwrap_or(T::epsilon());

        if self.total_vol(expiry) <= epsilon {
            let forward = self.spot / discount;
            return discount * (forward - strike).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        self.spot * norm_cdf(d1) - strike * discount * norm_cdf(d2)
    }

    /// European put price.
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let discount = (-self.rate * expiry).exp();
        let epsilon = T::from(1e-12).unwrap_or(T::epsilon());

        if self.total_vol(expiry) <= epsilon {
            let forward = self.spot / discount;
            return discount * (strike - forward).max(T::zero());
        }

        let d1 = self.d1(strike, expiry);
        let d2 = self.d2(strike, expiry);
        strike * discount * norm_cdf(-d2) - self.spot * norm_cdf(-d1)
    }
}

impl BlackScholes<f64> {
    /// Builds the model for an option descriptor.
    #[inline]
    pub fn from_option(option: &OptionParams) -> Self {
        Self::new(option.spot(), option.rate(), option.volatility())
    }
}

/// Closed-form European call price for an option descriptor.
///
/// # Examples
/// ```
/// use pricer_core::analytical::black_scholes_call;
/// use pricer_core::types::OptionParams;
///
/// let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
/// assert!((black_scholes_call(&option) - 10.4506).abs() < 1e-3);
/// ```
pub fn black_scholes_call(option: &OptionParams) -> f64 {
    BlackScholes::from_option(option).price_call(option.strike(), option.maturity())
}

/// Closed-form European put price for an option descriptor.
pub fn black_scholes_put(option: &OptionParams) -> f64 {
    BlackScholes::from_option(option).price_put(option.strike(), option.maturity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn atm() -> BlackScholes<f64> {
        BlackScholes::new(100.0, 0.05, 0.2)
    }

    #[test]
    fn test_call_reference_value() {
        assert_relative_eq!(atm().price_call(100.0, 1.0), 10.450583572185565, epsilon = 1e-4);
    }

    #[test]
    fn test_put_reference_value() {
        assert_relative_eq!(atm().price_put(100.0, 1.0), 5.573526022256971, epsilon = 1e-4);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let bs = atm();
        assert_relative_eq!(bs.d1(100.0, 1.0) - bs.d2(100.0, 1.0), 0.2, epsilon = 1e-12);
        assert_relative_eq!(bs.d1(100.0, 1.0), 0.35, epsilon = 1e-12);
    }

    #[test]
    fn test_put_call_parity_various_strikes() {
        let bs = atm();
        for strike in [60.0, 80.0, 100.0, 120.0, 150.0] {
            let lhs = bs.price_call(strike, 1.0) - bs.price_put(strike, 1.0);
            let rhs = 100.0 - strike * (-0.05_f64).exp();
            assert_relative_eq!(lhs, rhs, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_zero_volatility_is_discounted_forward_intrinsic() {
        let bs = BlackScholes::new(100.0, 0.05, 0.0);
        let expected = (-0.05_f64).exp() * (100.0 * 0.05_f64.exp() - 100.0);
        assert_relative_eq!(bs.price_call(100.0, 1.0), expected, epsilon = 1e-12);
        assert_eq!(bs.price_put(100.0, 1.0), 0.0);
    }

    #[test]
    fn test_deep_itm_and_otm_call() {
        let bs = atm();
        let deep_itm = bs.price_call(20.0, 1.0);
        assert_relative_eq!(deep_itm, 100.0 - 20.0 * (-0.05_f64).exp(), epsilon = 1e-6);
        assert!(bs.price_call(400.0, 1.0) < 1e-6);
    }

    #[test]
    fn test_call_from_option() {
        let option = OptionParams::new(1.0, 100.0, 100.0, 0.2, 0.05).unwrap();
        assert_relative_eq!(
            black_scholes_call(&option),
            atm().price_call(100.0, 1.0),
            epsilon = 1e-15
        );
        assert_relative_eq!(
            black_scholes_put(&option),
            atm().price_put(100.0, 1.0),
            epsilon = 1e-15
        );
    }
}
