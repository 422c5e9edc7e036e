//! Option Greeks and evaluation results
//!
//! First order sensitivities plus the full result row returned by the engine.

use serde::{Deserialize, Serialize};

/// Option Greeks (sensitivities)
///
/// Theta, vega and rho carry the 0.01 scaling of the result row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// Delta: dV/dS (sensitivity to spot)
    pub delta: f64,
    /// Gamma: d²V/dS² (sensitivity of delta to spot)
    pub gamma: f64,
    /// Theta: dV/dt scaled by 0.01
    pub theta: f64,
    /// Vega: dV/dσ per 1% vol move
    pub vega: f64,
    /// Rho: dV/dr per 1% rate move
    pub rho: f64,
}

impl Greeks {
    pub fn new(delta: f64, gamma: f64, theta: f64, vega: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }
}

/// Fully evaluated option: price, implied volatility and Greeks.
///
/// Field names and order form a stable row contract for tables and reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionResult {
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "ImpliedVol")]
    pub implied_volatility: f64,
    #[serde(rename = "Delta")]
    pub delta: f64,
    #[serde(rename = "Gamma")]
    pub gamma: f64,
    #[serde(rename = "Theta")]
    pub theta: f64,
    #[serde(rename = "Vega")]
    pub vega: f64,
    #[serde(rename = "Rho")]
    pub rho: f64,
}

impl OptionResult {
    /// Column labels, in row order
    pub const COLUMNS: [&'static str; 7] = [
        "Price",
        "ImpliedVol",
        "Delta",
        "Gamma",
        "Theta",
        "Vega",
        "Rho",
    ];

    pub fn new(price: f64, implied_volatility: f64, greeks: Greeks) -> Self {
        Self {
            price,
            implied_volatility,
            delta: greeks.delta,
            gamma: greeks.gamma,
            theta: greeks.theta,
            vega: greeks.vega,
            rho: greeks.rho,
        }
    }

    pub fn greeks(&self) -> Greeks {
        Greeks::new(self.delta, self.gamma, self.theta, self.vega, self.rho)
    }

    /// Values in column order
    pub fn values(&self) -> [f64; 7] {
        [
            self.price,
            self.implied_volatility,
            self.delta,
            self.gamma,
            self.theta,
            self.vega,
            self.rho,
        ]
    }

    /// Labelled row, one (column, value) pair per field
    pub fn to_row(&self) -> [(&'static str, f64); 7] {
        let values = self.values();
        std::array::from_fn(|i| (Self::COLUMNS[i], values[i]))
    }
}
