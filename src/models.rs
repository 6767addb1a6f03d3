use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{validate_funds, validate_price, validate_win_probability, InputError};

/// Fraction of full Kelly to commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KellyMultiplier {
    Quarter,
    Half,
    #[default]
    Full,
}

impl KellyMultiplier {
    pub const ALL: [KellyMultiplier; 3] = [
        KellyMultiplier::Full,
        KellyMultiplier::Half,
        KellyMultiplier::Quarter,
    ];

    pub fn value(self) -> f64 {
        match self {
            KellyMultiplier::Quarter => 0.25,
            KellyMultiplier::Half => 0.5,
            KellyMultiplier::Full => 1.0,
        }
    }
}

impl fmt::Display for KellyMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KellyMultiplier::Quarter => write!(f, "Quarter (0.25)"),
            KellyMultiplier::Half => write!(f, "Half (0.5)"),
            KellyMultiplier::Full => write!(f, "Full (1.0)"),
        }
    }
}

impl FromStr for KellyMultiplier {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "quarter" => return Ok(KellyMultiplier::Quarter),
            "half" => return Ok(KellyMultiplier::Half),
            "full" => return Ok(KellyMultiplier::Full),
            _ => {}
        }

        match trimmed.parse::<f64>() {
            Ok(v) if v == 0.25 => Ok(KellyMultiplier::Quarter),
            Ok(v) if v == 0.5 => Ok(KellyMultiplier::Half),
            Ok(v) if v == 1.0 => Ok(KellyMultiplier::Full),
            _ => Err(InputError::UnsupportedKellyFraction(trimmed.to_string())),
        }
    }
}

/// Inputs for a single sizing calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeParameters {
    pub funds: f64,
    pub entry_price: f64,
    pub target_price: f64,
    pub stop_price: f64,
    pub win_probability_percent: u8,
    pub kelly_multiplier: KellyMultiplier,
}

impl TradeParameters {
    /// Build parameters from raw form values, enforcing the input ranges
    pub fn new(
        funds: f64,
        entry_price: f64,
        target_price: f64,
        stop_price: f64,
        win_probability_percent: u32,
        kelly_multiplier: KellyMultiplier,
    ) -> Result<Self, InputError> {
        Ok(Self {
            funds: validate_funds(funds)?,
            entry_price: validate_price("Entry", entry_price)?,
            target_price: validate_price("Target", target_price)?,
            stop_price: validate_price("Stop-loss", stop_price)?,
            win_probability_percent: validate_win_probability(win_probability_percent)?,
            kelly_multiplier,
        })
    }

    /// Win probability as a fraction (0-1)
    pub fn win_probability(&self) -> f64 {
        f64::from(self.win_probability_percent) / 100.0
    }

    pub fn gain_per_share(&self) -> f64 {
        self.target_price - self.entry_price
    }

    pub fn loss_per_share(&self) -> f64 {
        self.entry_price - self.stop_price
    }
}

impl Default for TradeParameters {
    fn default() -> Self {
        Self {
            funds: 1_000_000.0,
            entry_price: 2.795,
            target_price: 3.119,
            stop_price: 2.498,
            win_probability_percent: 80,
            kelly_multiplier: KellyMultiplier::Full,
        }
    }
}

/// Position sizing recommendation
///
/// `investment_amount` is the dollar figure before share truncation. It is
/// not reconciled with `share_count * entry_price`, so the two can differ by
/// up to one share's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionResult {
    pub kelly_multiplier: KellyMultiplier,
    pub reward_risk_ratio: f64,
    pub raw_kelly_fraction: f64,
    pub adjusted_fraction: f64,
    pub investment_amount: f64,
    pub share_count: u64,
    pub gain_per_share: f64,
    pub loss_per_share: f64,
    pub projected_profit: f64,
    pub projected_loss: f64,
}

impl PositionResult {
    pub fn advice(&self) -> EdgeAdvice {
        if self.raw_kelly_fraction <= 0.0 {
            EdgeAdvice::NegativeEdge
        } else {
            EdgeAdvice::Positive {
                allocation: self.adjusted_fraction,
            }
        }
    }
}

/// Classification of a result for the recommendation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EdgeAdvice {
    /// The math suggests skipping the trade
    NegativeEdge,
    Positive { allocation: f64 },
}
