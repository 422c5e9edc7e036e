//! # BSM Greeks - Black-Scholes-Merton European Option Pricing
//!
//! Theoretical prices, Greeks and implied volatility for European options
//! under the Black-Scholes-Merton model.
//!
//! ## Overview
//!
//! An option is described by its side, spot, strike, days to expiration and
//! exactly one of:
//! - **Volatility**: the price is computed in closed form
//! - **Market price**: the volatility is implied by a bounded root search
//!
//! Price and all Greeks are then read off one shared set of `d1`/`d2`
//! intermediates, so they are numerically consistent.
//!
//! ## Usage
//!
//! ```rust
//! use bsm_greeks::prelude::*;
//!
//! let spec = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 365, 0.20);
//! let result = evaluate(&spec).unwrap();
//! assert!((result.price - 9.925).abs() < 0.01);
//!
//! // Implied volatility from a market price, with a custom rate
//! let engine = PricingEngine::new(PricingConfig::default().with_risk_free_rate(0.05)).unwrap();
//! let quoted = OptionSpec::with_market_price(OptionType::Put, 100.0, 95.0, 30, 1.20);
//! let implied = engine.evaluate(&quoted).unwrap();
//! assert!(implied.implied_volatility > 0.0);
//! ```
//!
//! ## Conventions
//!
//! - Time to expiration is `days / 365`
//! - Vega and rho are per 1 percentage point move
//! - Theta is the annualized time derivative scaled by 0.01
//! - The risk-free rate defaults to 4% and can be set per engine or per option
//!
//! ## What This Library Does NOT Do
//!
//! - American exercise
//! - Dividends
//! - Exotic payoffs or stochastic volatility

pub mod core;
pub mod models;
pub mod pricing;

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::core::{
        Greeks, OptionResult, OptionSpec, OptionType, PricingError, PricingInput, PricingResult,
        DAYS_PER_YEAR,
    };

    pub use crate::models::{
        implied_volatility, norm_cdf, norm_pdf, price as bs_price, greeks as bs_greeks,
        Intermediates, SearchMethod, ToleranceMode, VolSearchConfig,
    };

    pub use crate::pricing::{evaluate, PricingConfig, PricingEngine, DEFAULT_RISK_FREE_RATE};
}

// Re-export main types at crate root
pub use crate::core::{OptionResult, OptionSpec, OptionType, PricingError, PricingResult};
pub use crate::pricing::{evaluate, PricingConfig, PricingEngine};
