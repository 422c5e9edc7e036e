//! Option evaluation
//!
//! One pass: validate, resolve volatility (given or implied), build the
//! Black-Scholes intermediates once, then read price and Greeks off them.

use crate::core::error::ensure_rate;
use crate::core::{OptionResult, OptionSpec, PricingInput, PricingResult};
use crate::models::{implied_volatility, Intermediates};

use super::config::PricingConfig;

/// Stateless Black-Scholes evaluator holding only its configuration
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> PricingResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Rate for this option: its own override, else the configured one
    pub fn rate_for(&self, spec: &OptionSpec) -> f64 {
        spec.risk_free_rate.unwrap_or(self.config.risk_free_rate)
    }

    /// Price, implied volatility and Greeks for one option.
    ///
    /// When the option carries a market price, the reported price is that
    /// market price and the volatility is implied from it.
    pub fn evaluate(&self, spec: &OptionSpec) -> PricingResult<OptionResult> {
        spec.validate()?;
        let rate = ensure_rate(self.rate_for(spec))?;
        let time = spec.time_to_expiration();

        let (price, vol, im) = match spec.input {
            PricingInput::MarketPrice(market_price) => {
                let vol = implied_volatility(
                    spec.option_type,
                    market_price,
                    spec.spot,
                    spec.strike,
                    rate,
                    time,
                    &self.config.vol_search,
                )?;
                let im = Intermediates::new(spec.spot, spec.strike, rate, vol, time)?;
                (market_price, vol, im)
            }
            PricingInput::Volatility(vol) => {
                let im = Intermediates::new(spec.spot, spec.strike, rate, vol, time)?;
                (im.price(spec.option_type), vol, im)
            }
        };

        let greeks = im.greeks(spec.option_type);

        tracing::debug!(
            option_type = %spec.option_type,
            spot = spec.spot,
            strike = spec.strike,
            days = spec.days_to_expiration,
            rate,
            price,
            vol,
            "evaluated option"
        );

        Ok(OptionResult::new(price, vol, greeks))
    }
}

/// Evaluate with the default configuration.
pub fn evaluate(spec: &OptionSpec) -> PricingResult<OptionResult> {
    PricingEngine::default().evaluate(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OptionType, PricingError};
    use crate::models::{black_scholes, VolSearchConfig};

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_atm_call_scenario() {
        let spec = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 365, 0.20);
        let result = evaluate(&spec).unwrap();

        assert!(close(result.price, 9.93, 0.05));
        assert_eq!(result.implied_volatility, 0.20);
        assert!(close(result.delta, 0.6179, 1e-4));
        assert!(close(result.gamma, 0.01907, 1e-4));
        assert!(close(result.vega, 0.3814, 1e-4));
        assert!(close(result.theta, -0.05889, 1e-4));
        assert!(close(result.rho, 0.5187, 1e-3));
    }

    #[test]
    fn test_market_price_round_trip() {
        let engine = PricingEngine::default();
        for option_type in [OptionType::Call, OptionType::Put] {
            let priced = engine
                .evaluate(&OptionSpec::with_volatility(option_type, 100.0, 95.0, 120, 0.33))
                .unwrap();
            let implied = engine
                .evaluate(&OptionSpec::with_market_price(
                    option_type,
                    100.0,
                    95.0,
                    120,
                    priced.price,
                ))
                .unwrap();

            assert_eq!(implied.price, priced.price);
            assert!(close(implied.implied_volatility, 0.33, 0.002));
            assert!(close(implied.delta, priced.delta, 1e-3));
            assert!(close(implied.vega, priced.vega, 1e-3));
        }
    }

    #[test]
    fn test_greeks_share_intermediates() {
        let spec = OptionSpec::with_volatility(OptionType::Put, 120.0, 100.0, 45, 0.5);
        let result = evaluate(&spec).unwrap();
        let time = spec.time_to_expiration();
        let g = black_scholes::greeks(120.0, 100.0, 0.04, 0.5, time, OptionType::Put).unwrap();

        assert_eq!(result.greeks(), g);
        assert_eq!(
            result.price,
            black_scholes::put_price(120.0, 100.0, 0.04, 0.5, time).unwrap()
        );
    }

    #[test]
    fn test_rate_override() {
        let engine = PricingEngine::new(PricingConfig::default().with_risk_free_rate(0.10)).unwrap();
        let spec = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 365, 0.2);

        let engine_rate = engine.evaluate(&spec).unwrap();
        let default_rate = evaluate(&spec).unwrap();
        let per_call = engine.evaluate(&spec.with_risk_free_rate(0.04)).unwrap();

        assert!(engine_rate.price > default_rate.price);
        assert_eq!(per_call, default_rate);
        assert_eq!(engine.rate_for(&spec), 0.10);
    }

    #[test]
    fn test_put_call_parity_through_engine() {
        let call = evaluate(&OptionSpec::with_volatility(OptionType::Call, 80.0, 90.0, 200, 0.4)).unwrap();
        let put = evaluate(&OptionSpec::with_volatility(OptionType::Put, 80.0, 90.0, 200, 0.4)).unwrap();
        let time = 200.0_f64 / 365.0;
        let rhs = 80.0 - 90.0 * (-0.04 * time).exp();
        assert!((call.price - put.price - rhs).abs() < 1e-6);
    }

    #[test]
    fn test_boundaries() {
        let zero_days = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 0, 0.2);
        assert!(matches!(
            evaluate(&zero_days),
            Err(PricingError::NumericDegeneracy(_))
        ));

        let zero_vol = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 30, 0.0);
        assert!(matches!(
            evaluate(&zero_vol),
            Err(PricingError::NumericDegeneracy(_))
        ));

        let neg_vol = OptionSpec::with_volatility(OptionType::Put, 100.0, 100.0, 30, -0.1);
        assert!(matches!(evaluate(&neg_vol), Err(PricingError::InvalidInput(_))));

        let neg_price = OptionSpec::with_market_price(OptionType::Put, 100.0, 100.0, 30, -1.0);
        assert!(matches!(evaluate(&neg_price), Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_overflow_is_an_error_not_nan() {
        let long_dated = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 365 * 80_000, 0.2)
            .with_risk_free_rate(-0.01);
        assert!(matches!(
            evaluate(&long_dated),
            Err(PricingError::NumericDegeneracy(_))
        ));

        let huge_vol = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 365, 1e160);
        assert!(matches!(
            evaluate(&huge_vol),
            Err(PricingError::NumericDegeneracy(_))
        ));
    }

    #[test]
    fn test_deep_otm_not_found() {
        let spec = OptionSpec::with_market_price(OptionType::Call, 100.0, 150.0, 30, 2.0);
        assert!(matches!(
            evaluate(&spec),
            Err(PricingError::ImpliedVolatilityNotFound { .. })
        ));

        let legacy = PricingEngine::new(PricingConfig::legacy()).unwrap();
        assert!(matches!(
            legacy.evaluate(&spec),
            Err(PricingError::ImpliedVolatilityNotFound { .. })
        ));
    }

    #[test]
    fn test_wider_search_range() {
        // 150% vol is outside the default range
        let market = black_scholes::call_price(100.0, 100.0, 0.04, 1.5, 0.5).unwrap();
        let spec = OptionSpec::with_market_price(OptionType::Call, 100.0, 100.0, 182, market);
        assert!(evaluate(&spec).is_err());

        let config = PricingConfig::default().with_vol_search(VolSearchConfig {
            max_vol: 3.0,
            ..Default::default()
        });
        let engine = PricingEngine::new(config).unwrap();
        let result = engine.evaluate(&spec).unwrap();
        // 182 days is slightly under half a year
        assert!(close(result.implied_volatility, 1.5, 0.02));
    }

    #[test]
    fn test_invalid_config() {
        let config = PricingConfig::default().with_risk_free_rate(f64::NAN);
        assert!(matches!(
            PricingEngine::new(config),
            Err(PricingError::Config(_))
        ));
    }

    #[test]
    fn test_results_serialize_as_row() {
        let specs: Vec<OptionSpec> = serde_json::from_str(
            r#"[
                {"put_call": "C", "spot": 100.0, "strike": 100.0, "days_to_expiration": 365, "volatility": 0.2},
                {"put_call": "P", "spot": 100.0, "strike": 90.0, "days_to_expiration": 90, "volatility": 0.3}
            ]"#,
        )
        .unwrap();

        let engine = PricingEngine::default();
        let rows: Vec<OptionResult> = specs
            .iter()
            .map(|s| engine.evaluate(s))
            .collect::<PricingResult<_>>()
            .unwrap();

        let json = serde_json::to_value(&rows).unwrap();
        assert!(close(json[0]["Price"].as_f64().unwrap(), 9.925, 1e-3));
        assert!(close(json[1]["Price"].as_f64().unwrap(), 1.768, 1e-3));
        assert_eq!(json[1]["ImpliedVol"].as_f64().unwrap(), 0.3);
    }
}
