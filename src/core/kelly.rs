//! Kelly Criterion Stake Sizing
//!
//! Fractional Kelly sizing from a model probability and an American price.
//!
//! The Kelly criterion formula:
//!     f* = (b*p - q) / b
//!
//! Where:
//!     f* = fraction of bankroll to bet
//!     b = decimal - 1 (net odds)
//!     p = probability of winning
//!     q = 1 - p (probability of losing)
//!
//! The scaled fraction `f* * kelly_scale` is clamped to `[0, max_stake_pct]`
//! and the stake is rounded to cents, half away from zero.

use serde::{Deserialize, Serialize};

use super::odds::{american_to_decimal, ev_percent, validate_probability};
use crate::error::OddsError;

/// Bankroll and risk limits used for stake sizing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StakingConfig {
    /// Bankroll in currency units
    pub bankroll: f64,
    /// Multiplier applied to full Kelly (0.5 = half Kelly)
    pub kelly_scale: f64,
    /// Hard ceiling per bet as a fraction of bankroll
    pub max_stake_pct: f64,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            bankroll: 1000.0,
            kelly_scale: 0.5,
            max_stake_pct: 0.02,
        }
    }
}

impl StakingConfig {
    /// Apply named overrides; absent values keep the current setting
    pub fn with_overrides(
        &self,
        bankroll: Option<f64>,
        kelly_scale: Option<f64>,
        max_stake_pct: Option<f64>,
    ) -> Self {
        Self {
            bankroll: bankroll.unwrap_or(self.bankroll),
            kelly_scale: kelly_scale.unwrap_or(self.kelly_scale),
            max_stake_pct: max_stake_pct.unwrap_or(self.max_stake_pct),
        }
    }

    /// Reject a negative or non-finite bankroll or scale, and a ceiling outside [0, 1]
    pub fn validate(&self) -> Result<(), OddsError> {
        let invalid = |field, value| Err(OddsError::InvalidStakingConfig { field, value });

        if !self.bankroll.is_finite() || self.bankroll < 0.0 {
            return invalid("bankroll", self.bankroll);
        }
        if !self.kelly_scale.is_finite() || self.kelly_scale < 0.0 {
            return invalid("kelly_scale", self.kelly_scale);
        }
        if !(0.0..=1.0).contains(&self.max_stake_pct) {
            return invalid("max_stake_pct", self.max_stake_pct);
        }
        Ok(())
    }

    /// Largest stake any single bet may receive
    pub fn stake_ceiling(&self) -> f64 {
        self.bankroll * self.max_stake_pct
    }
}

/// Bet sizing recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BetSizing {
    pub probability: f64,
    pub american_odds: f64,
    pub decimal_odds: f64,
    pub break_even_prob: f64,
    pub ev_percent: f64,
    pub kelly_fraction: f64,       // Full Kelly, floored at 0
    pub recommended_fraction: f64, // After scale and ceiling
    pub stake: f64,
}

/// Calculate the full Kelly fraction for a single bet
///
/// # Arguments
/// * `probability` - Estimated probability of winning (0-1)
/// * `decimal_odds` - Decimal odds (e.g., 2.5 = +150)
///
/// # Returns
/// Kelly fraction in [0, 1]; 0 when there is no edge or `decimal_odds <= 1`
///
/// # Examples
/// ```
/// use pickline::core::kelly::kelly_fraction;
/// // b = 1.5, (1.5*0.5 - 0.5) / 1.5 = 0.1667
/// let kelly = kelly_fraction(0.5, 2.5).unwrap();
/// assert!((kelly - 0.16667).abs() < 0.0001);
/// ```
pub fn kelly_fraction(probability: f64, decimal_odds: f64) -> Result<f64, OddsError> {
    let p = validate_probability(probability)?;
    let b = decimal_odds - 1.0;

    if b.is_nan() || b <= 0.0 {
        return Ok(0.0);
    }

    Ok(((b * p - (1.0 - p)) / b).max(0.0))
}

/// Calculate the recommended stake for a single bet
///
/// Invalid American odds propagate `OddsError::InvalidOdds`; a config that
/// fails [`StakingConfig::validate`] propagates `OddsError::InvalidStakingConfig`.
///
/// # Examples
/// ```
/// use pickline::core::kelly::{sized_stake, StakingConfig};
/// let config = StakingConfig::default();
/// // Strong edge is capped at 2% of a 1000 bankroll
/// assert_eq!(sized_stake(0.9, 150.0, &config).unwrap(), 20.0);
/// // No edge, no stake
/// assert_eq!(sized_stake(0.3, -110.0, &config).unwrap(), 0.0);
/// ```
pub fn sized_stake(
    probability: f64,
    american: f64,
    config: &StakingConfig,
) -> Result<f64, OddsError> {
    config.validate()?;
    let decimal = american_to_decimal(american)?;
    let fraction = recommended_fraction(kelly_fraction(probability, decimal)?, config);

    Ok(stake_from_fraction(fraction, config))
}

fn recommended_fraction(full_kelly: f64, config: &StakingConfig) -> f64 {
    (full_kelly * config.kelly_scale)
        .max(0.0)
        .min(config.max_stake_pct)
}

fn stake_from_fraction(fraction: f64, config: &StakingConfig) -> f64 {
    let ceiling = config.stake_ceiling();
    let stake = round_cents(config.bankroll * fraction);

    // Rounding up may cross the ceiling by under a cent
    if stake > ceiling {
        floor_cents(ceiling)
    } else {
        stake
    }
}

/// Round to 2 decimal places, half away from zero
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn floor_cents(amount: f64) -> f64 {
    (amount * 100.0).floor() / 100.0
}

/// Kelly stake sizer for single and simultaneous bets
///
/// Supports:
/// - Fractional Kelly with a per-bet ceiling
/// - Total exposure limit across simultaneous bets
#[derive(Debug, Clone)]
pub struct StakeSizer {
    pub config: StakingConfig,
    pub max_total_exposure: f64,
}

impl StakeSizer {
    /// Create a new sizer
    ///
    /// # Arguments
    /// * `config` - Bankroll, Kelly scale and per-bet ceiling
    /// * `max_total_exposure` - Maximum combined stake as a fraction of bankroll
    pub fn new(config: StakingConfig, max_total_exposure: f64) -> Self {
        Self {
            config,
            max_total_exposure,
        }
    }

    /// Create with default limits (half Kelly, 2% per bet, 10% total)
    pub fn with_bankroll(bankroll: f64) -> Self {
        Self {
            config: StakingConfig {
                bankroll,
                ..StakingConfig::default()
            },
            max_total_exposure: 0.10,
        }
    }

    /// Calculate bet sizing for a single bet
    pub fn size(&self, probability: f64, american: f64) -> Result<BetSizing, OddsError> {
        self.config.validate()?;
        let decimal = american_to_decimal(american)?;
        let ev = ev_percent(probability, american)?;
        let kelly = kelly_fraction(probability, decimal)?;
        let recommended = recommended_fraction(kelly, &self.config);

        Ok(BetSizing {
            probability,
            american_odds: american,
            decimal_odds: decimal,
            break_even_prob: 1.0 / decimal,
            ev_percent: ev,
            kelly_fraction: kelly,
            recommended_fraction: recommended,
            stake: stake_from_fraction(recommended, &self.config),
        })
    }

    /// Calculate bet sizing for multiple simultaneous bets
    ///
    /// Stakes are scaled down proportionally when their sum would exceed
    /// the total exposure limit.
    pub fn size_many(&self, bets: &[(f64, f64)]) -> Result<Vec<BetSizing>, OddsError> {
        let mut sizings = bets
            .iter()
            .map(|(p, american)| self.size(*p, *american))
            .collect::<Result<Vec<_>, _>>()?;

        let total_stake: f64 = sizings.iter().map(|s| s.stake).sum();
        let max_exposure = self.config.bankroll * self.max_total_exposure;

        if total_stake > max_exposure && total_stake > 0.0 {
            let scale_factor = max_exposure / total_stake;
            tracing::debug!(
                total_stake,
                max_exposure,
                scale_factor,
                "Scaling simultaneous stakes to exposure limit"
            );

            for sizing in &mut sizings {
                sizing.stake = floor_cents(sizing.stake * scale_factor);
                sizing.recommended_fraction *= scale_factor;
            }
        }

        Ok(sizings)
    }
}

impl Default for StakeSizer {
    fn default() -> Self {
        Self::new(StakingConfig::default(), 0.10)
    }
}
