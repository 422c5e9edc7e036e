//! Core data types for the pricing engine
//!
//! Defines fundamental types:
//! - OptionSpec: side, spot, strike, days to expiration, price or volatility
//! - Greeks / OptionResult: evaluated sensitivities and result row
//! - PricingError: error taxonomy

pub mod option;
pub mod greeks;
pub mod error;

pub use option::*;
pub use greeks::*;
pub use error::*;
