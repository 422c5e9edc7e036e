//! Implied volatility search
//!
//! Inverts the Black-Scholes price over a bounded volatility interval.
//! The default solver is Newton-Raphson on vega kept inside a shrinking
//! bracket, with bisection steps whenever Newton leaves it. A monotone
//! grid scan is available as [`SearchMethod::LinearScan`].

use serde::{Deserialize, Serialize};

use super::black_scholes::Intermediates;
use crate::core::error::{ensure_positive, ensure_rate, ensure_time};
use crate::core::{OptionType, PricingError, PricingResult};

/// Root is considered exact below this price error
const ROOT_PRICE_EPS: f64 = 1e-10;
/// Bracket width at which the root is considered found
const ROOT_VOL_EPS: f64 = 1e-10;
/// Below this raw vega a Newton step is not attempted
const MIN_NEWTON_VEGA: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMethod {
    /// Newton-Raphson with bisection fallback
    NewtonBisection,
    /// Plain bracketed bisection
    Bisection,
    /// Step upward from `min_vol` by `step`, stopping at the first
    /// volatility that satisfies the one-sided rule
    LinearScan,
}

/// How a candidate volatility is accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToleranceMode {
    /// |model - market| < tolerance
    Symmetric,
    /// market - model < tolerance; accepts any model price above the
    /// market, so the result sits at or slightly below the true root
    OneSided,
}

/// Configuration for the implied volatility search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VolSearchConfig {
    /// Lower end of the search interval
    /// Default: 0.001
    pub min_vol: f64,

    /// Upper end of the search interval
    /// Default: 1.0
    pub max_vol: f64,

    /// Acceptance band on the price difference
    /// Default: 0.001
    pub tolerance: f64,

    /// Grid step for the linear scan
    /// Default: 0.001
    pub step: f64,

    /// Hard cap on solver iterations
    /// Default: 1000
    pub max_iterations: usize,

    pub method: SearchMethod,
    pub tolerance_mode: ToleranceMode,
}

impl Default for VolSearchConfig {
    fn default() -> Self {
        Self {
            min_vol: 0.001,
            max_vol: 1.0,
            tolerance: 0.001,
            step: 0.001,
            max_iterations: 1000,
            method: SearchMethod::NewtonBisection,
            tolerance_mode: ToleranceMode::Symmetric,
        }
    }
}

impl VolSearchConfig {
    /// Brute-force grid scan from `min_vol` with the one-sided stopping rule
    pub fn legacy() -> Self {
        Self {
            method: SearchMethod::LinearScan,
            tolerance_mode: ToleranceMode::OneSided,
            ..Default::default()
        }
    }

    pub fn bisection() -> Self {
        Self {
            method: SearchMethod::Bisection,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("min_vol", self.min_vol)
            .and_then(|_| ensure_positive("max_vol", self.max_vol))
            .and_then(|_| ensure_positive("tolerance", self.tolerance))
            .and_then(|_| ensure_positive("step", self.step))
            .map_err(|e| PricingError::config(e.to_string()))?;

        if self.max_vol <= self.min_vol {
            return Err(PricingError::config(format!(
                "max_vol {} must exceed min_vol {}",
                self.max_vol, self.min_vol
            )));
        }
        if self.max_iterations == 0 {
            return Err(PricingError::config("max_iterations must be at least 1"));
        }
        Ok(())
    }

    /// `slack` widens the band by the precision the root was resolved to
    fn accepts(&self, model: f64, market: f64, slack: f64) -> bool {
        let band = self.tolerance + slack;
        match self.tolerance_mode {
            ToleranceMode::Symmetric => (model - market).abs() < band,
            ToleranceMode::OneSided => market - model < band,
        }
    }

    fn not_found(&self, market_price: f64) -> PricingError {
        self.not_found_below(market_price, self.max_vol)
    }

    /// `searched_to` is the highest volatility actually tried
    fn not_found_below(&self, market_price: f64, searched_to: f64) -> PricingError {
        tracing::warn!(
            market_price,
            min_vol = self.min_vol,
            max_vol = searched_to,
            method = ?self.method,
            "implied volatility not found"
        );
        PricingError::iv_not_found(market_price, self.min_vol, searched_to)
    }
}

/// Model price as a function of volatility for one fixed contract
struct PriceCurve {
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
}

impl PriceCurve {
    fn at(&self, vol: f64) -> PricingResult<Intermediates> {
        Intermediates::new(self.spot, self.strike, self.rate, vol, self.time)
    }

    fn price(&self, vol: f64) -> PricingResult<f64> {
        Ok(self.at(vol)?.price(self.option_type))
    }
}

/// Volatility that reprices `market_price` within the configured tolerance.
///
/// Fails with `ImpliedVolatilityNotFound` when no volatility in
/// `[min_vol, max_vol]` is acceptable.
pub fn implied_volatility(
    option_type: OptionType,
    market_price: f64,
    spot: f64,
    strike: f64,
    rate: f64,
    time: f64,
    config: &VolSearchConfig,
) -> PricingResult<f64> {
    config.validate()?;
    ensure_positive("price", market_price)?;
    ensure_positive("spot", spot)?;
    ensure_positive("strike", strike)?;
    ensure_rate(rate)?;
    ensure_time(time)?;

    let curve = PriceCurve {
        option_type,
        spot,
        strike,
        rate,
        time,
    };

    let vol = match config.method {
        SearchMethod::LinearScan => linear_scan(&curve, market_price, config)?,
        SearchMethod::Bisection => bracketed(&curve, market_price, config, false)?,
        SearchMethod::NewtonBisection => bracketed(&curve, market_price, config, true)?,
    };

    tracing::debug!(%option_type, market_price, vol, "implied volatility found");
    Ok(vol)
}

fn linear_scan(curve: &PriceCurve, market: f64, config: &VolSearchConfig) -> PricingResult<f64> {
    // The iteration cap can stop the scan short of max_vol
    let mut searched_to = config.min_vol;
    for i in 0..config.max_iterations {
        let vol = config.min_vol + i as f64 * config.step;
        if vol >= config.max_vol {
            searched_to = config.max_vol;
            break;
        }

        let model = curve.price(vol)?;
        if market - model < config.tolerance {
            return Ok(vol);
        }
        searched_to = vol;
    }

    Err(config.not_found_below(market, searched_to))
}

fn bracketed(
    curve: &PriceCurve,
    market: f64,
    config: &VolSearchConfig,
    newton: bool,
) -> PricingResult<f64> {
    let target = match config.tolerance_mode {
        ToleranceMode::Symmetric => market,
        ToleranceMode::OneSided => market - config.tolerance,
    };

    // The price is increasing in vol, so the ends decide whether a root exists
    let low_price = curve.price(config.min_vol)?;
    if low_price >= target {
        return if config.accepts(low_price, market, 0.0) {
            Ok(config.min_vol)
        } else {
            Err(config.not_found(market))
        };
    }
    let high_price = curve.price(config.max_vol)?;
    if high_price <= target {
        return if config.accepts(high_price, market, 0.0) {
            Ok(config.max_vol)
        } else {
            Err(config.not_found(market))
        };
    }

    let mut low = config.min_vol;
    let mut high = config.max_vol;
    let mut vol = if newton {
        // Brenner-Subrahmanyam
        let guess = market / (0.4 * curve.spot * curve.time.sqrt());
        if guess > low && guess < high {
            guess
        } else {
            0.5 * (low + high)
        }
    } else {
        0.5 * (low + high)
    };

    for iteration in 0..config.max_iterations {
        let im = curve.at(vol)?;
        let model = im.price(curve.option_type);
        let diff = model - target;
        tracing::trace!(iteration, vol, diff, "vol search step");

        if diff.abs() < ROOT_PRICE_EPS || high - low < ROOT_VOL_EPS {
            break;
        }

        if diff > 0.0 {
            high = vol;
        } else {
            low = vol;
        }

        let step = if newton {
            let vega = im.raw_vega();
            if vega > MIN_NEWTON_VEGA {
                Some(vol - diff / vega)
            } else {
                None
            }
        } else {
            None
        };

        vol = match step {
            Some(next) if next > low && next < high => next,
            _ => 0.5 * (low + high),
        };
    }

    let model = curve.price(vol)?;
    if config.accepts(model, market, ROOT_PRICE_EPS) {
        Ok(vol)
    } else {
        Err(config.not_found(market))
    }
}
