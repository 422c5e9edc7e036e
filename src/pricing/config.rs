//! Configuration for the pricing engine

use serde::{Deserialize, Serialize};

use crate::core::error::ensure_rate;
use crate::core::{PricingError, PricingResult};
use crate::models::VolSearchConfig;

/// Risk-free rate used when neither the engine nor the option sets one
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.04;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Annualized continuously compounded rate, as a decimal
    /// Default: 0.04
    pub risk_free_rate: f64,

    /// Implied volatility search
    pub vol_search: VolSearchConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            vol_search: VolSearchConfig::default(),
        }
    }
}

impl PricingConfig {
    /// Grid scan implied vol search with the one-sided stopping rule
    pub fn legacy() -> Self {
        Self {
            vol_search: VolSearchConfig::legacy(),
            ..Default::default()
        }
    }

    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    pub fn with_vol_search(mut self, vol_search: VolSearchConfig) -> Self {
        self.vol_search = vol_search;
        self
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> PricingResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| PricingError::config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PricingResult<()> {
        ensure_rate(self.risk_free_rate).map_err(|e| PricingError::config(e.to_string()))?;
        self.vol_search.validate()
    }
}
