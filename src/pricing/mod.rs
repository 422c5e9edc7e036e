//! Pricing engine
//!
//! Validates an [`OptionSpec`](crate::core::OptionSpec), resolves the rate
//! and volatility, then evaluates price and Greeks from one set of
//! Black-Scholes intermediates.

pub mod config;
pub mod engine;

pub use config::*;
pub use engine::*;
