//! Closed-form European option prices.
//!
//! Used as the correctness oracle for the Monte Carlo engines:
//! - [`BlackScholes`]: lognormal dynamics, call and put
//! - [`norm_cdf`], [`norm_pdf`]: standard normal distribution functions

pub mod black_scholes;
pub mod distributions;

pub use black_scholes::{black_scholes_call, black_scholes_put, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
