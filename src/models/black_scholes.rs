//! Black-Scholes Model
//!
//! Provides:
//! - European option pricing (call closed form, put via put-call parity)
//! - Greeks computation, each independently callable
//!
//! All quantities for one evaluation come from a single [`Intermediates`],
//! so price and Greeks share the same `d1`/`d2`.

use std::f64::consts::{PI, SQRT_2};

use statrs::function::erf::erfc;

use crate::core::error::{ensure_positive, ensure_rate, ensure_time, ensure_volatility};
use crate::core::{Greeks, OptionType, PricingError, PricingResult};

/// Scale applied to theta, vega and rho in the result row
pub const GREEK_SCALE: f64 = 0.01;

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Standard normal PDF
pub fn norm_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Values shared by the price and every Greek of one option
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intermediates {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub vol: f64,
    pub time: f64,
    pub sqrt_t: f64,
    pub d1: f64,
    pub d2: f64,
    /// e^{-rT}
    pub discount: f64,
}

impl Intermediates {
    /// Validate inputs and compute d1/d2 once.
    pub fn new(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> PricingResult<Self> {
        ensure_positive("spot", spot)?;
        ensure_positive("strike", strike)?;
        ensure_rate(rate)?;
        ensure_volatility(vol)?;
        ensure_time(time)?;

        let sqrt_t = time.sqrt();
        let d1 = ((spot / strike).ln() + (rate + 0.5 * vol * vol) * time) / (vol * sqrt_t);
        let d2 = d1 - vol * sqrt_t;
        let discount = (-rate * time).exp();

        // Overflow in σ², σ√T or e^{-rT} leaves inf/NaN that the formulas
        // would turn into wrong prices
        if !d1.is_finite() || !d2.is_finite() {
            return Err(PricingError::degenerate(format!(
                "d1/d2 not finite (d1={}, d2={}) for vol={} time={}",
                d1, d2, vol, time
            )));
        }
        if !discount.is_finite() {
            return Err(PricingError::degenerate(format!(
                "discount factor overflows for rate={} time={}",
                rate, time
            )));
        }

        Ok(Self {
            spot,
            strike,
            rate,
            vol,
            time,
            sqrt_t,
            d1,
            d2,
            discount,
        })
    }

    pub fn call_price(&self) -> f64 {
        self.spot * norm_cdf(self.d1) - self.strike * self.discount * norm_cdf(self.d2)
    }

    /// Put via put-call parity
    pub fn put_price(&self) -> f64 {
        self.strike * self.discount - self.spot + self.call_price()
    }

    pub fn price(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => self.call_price(),
            OptionType::Put => self.put_price(),
        }
    }

    pub fn delta(&self, option_type: OptionType) -> f64 {
        match option_type {
            OptionType::Call => norm_cdf(self.d1),
            OptionType::Put => -norm_cdf(-self.d1),
        }
    }

    /// Same for call and put
    pub fn gamma(&self) -> f64 {
        norm_pdf(self.d1) / (self.spot * self.vol * self.sqrt_t)
    }

    /// Same for call and put, per 1% vol move
    pub fn vega(&self) -> f64 {
        GREEK_SCALE * self.raw_vega()
    }

    /// Unscaled dV/dσ, used as the Newton derivative
    pub fn raw_vega(&self) -> f64 {
        self.spot * norm_pdf(self.d1) * self.sqrt_t
    }

    pub fn theta(&self, option_type: OptionType) -> f64 {
        let decay = -(self.spot * norm_pdf(self.d1) * self.vol) / (2.0 * self.sqrt_t);
        let carry = self.rate * self.strike * self.discount;
        let theta = match option_type {
            OptionType::Call => decay - carry * norm_cdf(self.d2),
            OptionType::Put => decay + carry * norm_cdf(-self.d2),
        };
        GREEK_SCALE * theta
    }

    /// Per 1% rate move
    pub fn rho(&self, option_type: OptionType) -> f64 {
        let kt = self.strike * self.time * self.discount;
        let rho = match option_type {
            OptionType::Call => kt * norm_cdf(self.d2),
            OptionType::Put => -kt * norm_cdf(-self.d2),
        };
        GREEK_SCALE * rho
    }

    pub fn greeks(&self, option_type: OptionType) -> Greeks {
        Greeks::new(
            self.delta(option_type),
            self.gamma(),
            self.theta(option_type),
            self.vega(),
            self.rho(option_type),
        )
    }
}

/// Black-Scholes d1 parameter
pub fn d1(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> PricingResult<f64> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.d1)
}

/// Black-Scholes d2 parameter
pub fn d2(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> PricingResult<f64> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.d2)
}

pub fn call_price(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> PricingResult<f64> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.call_price())
}

pub fn put_price(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> PricingResult<f64> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.put_price())
}

/// Black-Scholes European option price
pub fn price(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> PricingResult<f64> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.price(option_type))
}

pub fn delta(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> PricingResult<f64> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.delta(option_type))
}

pub fn gamma(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> PricingResult<f64> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.gamma())
}

pub fn vega(spot: f64, strike: f64, rate: f64, vol: f64, time: f64) -> PricingResult<f64> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.vega())
}

pub fn theta(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> PricingResult<f64> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.theta(option_type))
}

pub fn rho(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> PricingResult<f64> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.rho(option_type))
}

/// Black-Scholes Greeks
pub fn greeks(
    spot: f64,
    strike: f64,
    rate: f64,
    vol: f64,
    time: f64,
    option_type: OptionType,
) -> PricingResult<Greeks> {
    Ok(Intermediates::new(spot, strike, rate, vol, time)?.greeks(option_type))
}
