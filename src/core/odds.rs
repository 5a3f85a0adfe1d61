//! American/decimal odds conversion and derived metrics
//!
//! Conversions:
//!     +A  ->  1 + A/100
//!     -A  ->  1 + 100/A
//!
//! Expected value per unit staked:
//!     EV% = (p*b - (1-p)) * 100
//!
//! Where:
//!     p = probability of winning
//!     b = decimal - 1 (net odds)

use serde::{Deserialize, Serialize};

use crate::error::OddsError;

/// Validated American odds (never 0, always finite)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct AmericanOdds(f64);

impl AmericanOdds {
    pub fn new(value: f64) -> Result<Self, OddsError> {
        if value == 0.0 || !value.is_finite() {
            return Err(OddsError::InvalidOdds(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Positive prices are underdogs
    pub fn is_underdog(self) -> bool {
        self.0 > 0.0
    }

    pub fn to_decimal(self) -> f64 {
        if self.0 > 0.0 {
            1.0 + self.0 / 100.0
        } else {
            1.0 + 100.0 / self.0.abs()
        }
    }
}

impl TryFrom<f64> for AmericanOdds {
    type Error = OddsError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AmericanOdds> for f64 {
    fn from(odds: AmericanOdds) -> Self {
        odds.0
    }
}

/// Reject probabilities outside [0, 1] (and NaN)
pub fn validate_probability(prob: f64) -> Result<f64, OddsError> {
    if !(0.0..=1.0).contains(&prob) {
        return Err(OddsError::ProbabilityOutOfRange(prob));
    }
    Ok(prob)
}

/// Convert American odds to decimal odds
///
/// # Examples
/// ```
/// use pickline::core::odds::american_to_decimal;
/// assert_eq!(american_to_decimal(150.0).unwrap(), 2.5);
/// assert!((american_to_decimal(-110.0).unwrap() - 1.9091).abs() < 1e-4);
/// assert!(american_to_decimal(0.0).is_err());
/// ```
pub fn american_to_decimal(american: f64) -> Result<f64, OddsError> {
    AmericanOdds::new(american).map(AmericanOdds::to_decimal)
}

/// Convert decimal odds back to American odds
///
/// Decimal 2.0 maps to +100.
pub fn decimal_to_american(decimal: f64) -> Result<f64, OddsError> {
    if decimal.is_nan() || decimal <= 1.0 || decimal.is_infinite() {
        return Err(OddsError::InvalidDecimalOdds(decimal));
    }

    if decimal >= 2.0 {
        Ok((decimal - 1.0) * 100.0)
    } else {
        Ok(-100.0 / (decimal - 1.0))
    }
}

/// Probability at which a price has zero edge (vig not removed)
pub fn break_even_prob(american: f64) -> Result<f64, OddsError> {
    american_to_decimal(american).map(|d| 1.0 / d)
}

/// Implied probability of a decimal price
pub fn implied_probability_from_decimal(decimal: f64) -> Result<f64, OddsError> {
    if decimal.is_nan() || decimal <= 1.0 || decimal.is_infinite() {
        return Err(OddsError::InvalidDecimalOdds(decimal));
    }
    Ok(1.0 / decimal)
}

/// Expected value per unit staked, in percent
///
/// # Examples
/// ```
/// use pickline::core::odds::ev_percent;
/// // 50% on a +120 price: 0.5*1.2 - 0.5 = 0.10
/// assert!((ev_percent(0.5, 120.0).unwrap() - 10.0).abs() < 1e-9);
/// ```
pub fn ev_percent(probability: f64, american: f64) -> Result<f64, OddsError> {
    let p = validate_probability(probability)?;
    let b = american_to_decimal(american)? - 1.0;

    Ok((p * b - (1.0 - p)) * 100.0)
}
