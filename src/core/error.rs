//! Error types for the pricing engine

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "Implied volatility not found for market price {market_price} in [{min_vol}, {max_vol}]"
    )]
    ImpliedVolatilityNotFound {
        market_price: f64,
        min_vol: f64,
        max_vol: f64,
    },

    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type PricingResult<T> = Result<T, PricingError>;

impl PricingError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::NumericDegeneracy(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn iv_not_found(market_price: f64, min_vol: f64, max_vol: f64) -> Self {
        Self::ImpliedVolatilityNotFound {
            market_price,
            min_vol,
            max_vol,
        }
    }
}

/// Require a finite, strictly positive value.
pub(crate) fn ensure_positive(name: &str, value: f64) -> PricingResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PricingError::invalid_input(format!(
            "{} must be positive and finite, got {}",
            name, value
        )));
    }
    Ok(value)
}

/// Volatility of exactly zero is degenerate rather than invalid.
pub(crate) fn ensure_volatility(vol: f64) -> PricingResult<f64> {
    if vol == 0.0 {
        return Err(PricingError::degenerate("volatility is zero"));
    }
    ensure_positive("volatility", vol)
}

/// Time of exactly zero is degenerate rather than invalid.
pub(crate) fn ensure_time(time: f64) -> PricingResult<f64> {
    if time == 0.0 {
        return Err(PricingError::degenerate("time to expiration is zero"));
    }
    ensure_positive("time to expiration", time)
}

pub(crate) fn ensure_rate(rate: f64) -> PricingResult<f64> {
    if !rate.is_finite() {
        return Err(PricingError::invalid_input(format!(
            "risk-free rate must be finite, got {}",
            rate
        )));
    }
    Ok(rate)
}
