//! Option contract inputs
//!
//! Represents a European option to be priced: side, spot, strike, days to
//! expiration and either an observed market price or a volatility.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ensure_positive, ensure_rate, ensure_volatility, PricingError, PricingResult};

/// Calendar days per year used to annualize time to expiration
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Option type (Call or Put)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    #[serde(alias = "C", alias = "call")]
    Call,
    #[serde(alias = "P", alias = "put")]
    Put,
}

impl OptionType {
    /// Intrinsic value at given spot
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "call" => Ok(OptionType::Call),
            "p" | "put" => Ok(OptionType::Put),
            other => Err(PricingError::invalid_input(format!(
                "unknown option type '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "C"),
            OptionType::Put => write!(f, "P"),
        }
    }
}

/// The one observed quantity; the other is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PricingInput {
    /// Observed market price, volatility is implied from it
    MarketPrice(f64),
    /// Annualized volatility as a decimal, price is computed from it
    Volatility(f64),
}

/// A European option to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OptionRecord", into = "OptionRecord")]
pub struct OptionSpec {
    pub option_type: OptionType,
    pub spot: f64,
    pub strike: f64,
    pub days_to_expiration: u32,
    pub input: PricingInput,
    /// Overrides the engine's configured rate when set
    pub risk_free_rate: Option<f64>,
}

impl OptionSpec {
    /// Option priced from a known volatility
    pub fn with_volatility(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        days_to_expiration: u32,
        volatility: f64,
    ) -> Self {
        Self {
            option_type,
            spot,
            strike,
            days_to_expiration,
            input: PricingInput::Volatility(volatility),
            risk_free_rate: None,
        }
    }

    /// Option whose volatility is implied from a market price
    pub fn with_market_price(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        days_to_expiration: u32,
        price: f64,
    ) -> Self {
        Self {
            option_type,
            spot,
            strike,
            days_to_expiration,
            input: PricingInput::MarketPrice(price),
            risk_free_rate: None,
        }
    }

    /// Build from loose fields where exactly one of price/volatility is set.
    pub fn from_parts(
        option_type: OptionType,
        spot: f64,
        strike: f64,
        days_to_expiration: u32,
        price: Option<f64>,
        volatility: Option<f64>,
    ) -> PricingResult<Self> {
        let input = match (price, volatility) {
            (Some(p), None) => PricingInput::MarketPrice(p),
            (None, Some(v)) => PricingInput::Volatility(v),
            (Some(_), Some(_)) => {
                return Err(PricingError::invalid_input(
                    "price and volatility are mutually exclusive",
                ))
            }
            (None, None) => {
                return Err(PricingError::invalid_input(
                    "one of price or volatility is required",
                ))
            }
        };

        Ok(Self {
            option_type,
            spot,
            strike,
            days_to_expiration,
            input,
            risk_free_rate: None,
        })
    }

    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = Some(rate);
        self
    }

    /// Time to expiration in years
    pub fn time_to_expiration(&self) -> f64 {
        self.days_to_expiration as f64 / DAYS_PER_YEAR
    }

    /// Check every field before any computation happens.
    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;

        if self.days_to_expiration == 0 {
            return Err(PricingError::degenerate(
                "days to expiration is zero, d1/d2 are undefined",
            ));
        }

        match self.input {
            PricingInput::MarketPrice(p) => {
                ensure_positive("price", p)?;
            }
            PricingInput::Volatility(v) => {
                ensure_volatility(v)?;
            }
        }

        if let Some(rate) = self.risk_free_rate {
            ensure_rate(rate)?;
        }

        Ok(())
    }
}

/// Flat record shape, as rows arrive from tables and JSON feeds
#[derive(Debug, Clone, Serialize, Deserialize)]
struct OptionRecord {
    put_call: OptionType,
    spot: f64,
    strike: f64,
    days_to_expiration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    volatility: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    risk_free_rate: Option<f64>,
}

impl TryFrom<OptionRecord> for OptionSpec {
    type Error = PricingError;

    fn try_from(record: OptionRecord) -> Result<Self, Self::Error> {
        let spec = OptionSpec::from_parts(
            record.put_call,
            record.spot,
            record.strike,
            record.days_to_expiration,
            record.price,
            record.volatility,
        )?;
        Ok(match record.risk_free_rate {
            Some(rate) => spec.with_risk_free_rate(rate),
            None => spec,
        })
    }
}

impl From<OptionSpec> for OptionRecord {
    fn from(spec: OptionSpec) -> Self {
        let (price, volatility) = match spec.input {
            PricingInput::MarketPrice(p) => (Some(p), None),
            PricingInput::Volatility(v) => (None, Some(v)),
        };
        Self {
            put_call: spec.option_type,
            spot: spec.spot,
            strike: spec.strike,
            days_to_expiration: spec.days_to_expiration,
            price,
            volatility,
            risk_free_rate: spec.risk_free_rate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_type() {
        assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
        assert_eq!(OptionType::Put.intrinsic(90.0, 100.0), 10.0);
        assert_eq!(OptionType::Call.intrinsic(90.0, 100.0), 0.0);
    }

    #[test]
    fn test_option_type_codes() {
        assert_eq!("C".parse::<OptionType>().unwrap(), OptionType::Call);
        assert_eq!("p".parse::<OptionType>().unwrap(), OptionType::Put);
        assert_eq!("Put".parse::<OptionType>().unwrap(), OptionType::Put);
        assert!("X".parse::<OptionType>().is_err());
        assert_eq!(OptionType::Call.to_string(), "C");
    }

    #[test]
    fn test_time_to_expiration() {
        let spec = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 365, 0.2);
        assert_eq!(spec.time_to_expiration(), 1.0);

        let spec = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 73, 0.2);
        assert!((spec.time_to_expiration() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_price_and_volatility_exclusive() {
        let both = OptionSpec::from_parts(OptionType::Call, 100.0, 100.0, 30, Some(2.0), Some(0.2));
        assert!(matches!(both, Err(PricingError::InvalidInput(_))));

        let neither = OptionSpec::from_parts(OptionType::Call, 100.0, 100.0, 30, None, None);
        assert!(matches!(neither, Err(PricingError::InvalidInput(_))));

        let one = OptionSpec::from_parts(OptionType::Put, 100.0, 100.0, 30, Some(2.0), None).unwrap();
        assert_eq!(one.input, PricingInput::MarketPrice(2.0));
    }

    #[test]
    fn test_validate() {
        let ok = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 30, 0.2);
        assert!(ok.validate().is_ok());

        let zero_days = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 0, 0.2);
        assert!(matches!(
            zero_days.validate(),
            Err(PricingError::NumericDegeneracy(_))
        ));

        let zero_vol = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 30, 0.0);
        assert!(matches!(
            zero_vol.validate(),
            Err(PricingError::NumericDegeneracy(_))
        ));

        let neg_vol = OptionSpec::with_volatility(OptionType::Call, 100.0, 100.0, 30, -0.2);
        assert!(matches!(neg_vol.validate(), Err(PricingError::InvalidInput(_))));

        let neg_spot = OptionSpec::with_volatility(OptionType::Call, -1.0, 100.0, 30, 0.2);
        assert!(matches!(neg_spot.validate(), Err(PricingError::InvalidInput(_))));

        let zero_price = OptionSpec::with_market_price(OptionType::Put, 100.0, 100.0, 30, 0.0);
        assert!(matches!(zero_price.validate(), Err(PricingError::InvalidInput(_))));

        let nan_rate = ok.with_risk_free_rate(f64::NAN);
        assert!(matches!(nan_rate.validate(), Err(PricingError::InvalidInput(_))));
    }

    #[test]
    fn test_deserialize_record() {
        let json = r#"{"put_call":"C","spot":100.0,"strike":105.0,"days_to_expiration":30,"price":2.5}"#;
        let spec: OptionSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.option_type, OptionType::Call);
        assert_eq!(spec.input, PricingInput::MarketPrice(2.5));
        assert_eq!(spec.risk_free_rate, None);

        let json = r#"{"put_call":"P","spot":100.0,"strike":95.0,"days_to_expiration":60,"volatility":0.3,"risk_free_rate":0.05}"#;
        let spec: OptionSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.option_type, OptionType::Put);
        assert_eq!(spec.risk_free_rate, Some(0.05));

        let json = r#"{"put_call":"P","spot":100.0,"strike":95.0,"days_to_expiration":60,"price":1.0,"volatility":0.3}"#;
        assert!(serde_json::from_str::<OptionSpec>(json).is_err());
    }

    #[test]
    fn test_serialize_record() {
        let spec = OptionSpec::with_volatility(OptionType::Put, 100.0, 95.0, 60, 0.3);
        let value = serde_json::to_value(spec).unwrap();
        assert_eq!(value["put_call"], "Put");
        assert_eq!(value["volatility"], 0.3);
        assert!(value.get("price").is_none());
    }
}
