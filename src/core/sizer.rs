//! Position Sizing
//!
//! Turns a set of trade parameters into a share count using fractional Kelly.
//!
//! The investment amount is the pre-truncation dollar figure
//! (`funds * adjusted_fraction`). Shares are floored and the truncation is
//! not fed back, so `share_count * entry_price` may fall slightly short of
//! `investment_amount`.

use tracing::debug;

use super::kelly::{calculate_kelly_fraction, reward_risk_ratio};
use crate::error::SizingError;
use crate::models::{PositionResult, TradeParameters};

/// Kelly position sizer for a single trade
///
/// Stateless: every call to [`PositionSizer::compute`] depends only on its
/// input.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionSizer;

impl PositionSizer {
    pub fn new() -> Self {
        Self
    }

    /// Calculate the recommended position
    ///
    /// Expects `funds >= 0` and `entry_price > 0`, as enforced by
    /// [`TradeParameters::new`]. Struct literals outside that range are the
    /// caller's responsibility.
    ///
    /// # Errors
    /// [`SizingError::InvalidPriceConfiguration`] unless
    /// `target > entry > stop`.
    ///
    /// # Panics
    /// In debug builds, if `funds` is negative or `entry_price` is not positive.
    pub fn compute(&self, params: &TradeParameters) -> Result<PositionResult, SizingError> {
        debug_assert!(
            params.funds >= 0.0 && params.entry_price > 0.0,
            "funds must be >= 0 and entry price > 0, got funds={} entry={}",
            params.funds,
            params.entry_price
        );

        let gain_per_share = params.gain_per_share();
        let loss_per_share = params.loss_per_share();

        let b = reward_risk_ratio(gain_per_share, loss_per_share).ok_or(
            SizingError::InvalidPriceConfiguration {
                entry: params.entry_price,
                target: params.target_price,
                stop: params.stop_price,
            },
        )?;

        let raw_kelly = calculate_kelly_fraction(params.win_probability(), b);

        // Negative edge never turns into a short allocation
        let adjusted = raw_kelly.max(0.0) * params.kelly_multiplier.value();

        let investment = params.funds * adjusted;
        let shares = (investment / params.entry_price).floor() as u64;

        let result = PositionResult {
            kelly_multiplier: params.kelly_multiplier,
            reward_risk_ratio: b,
            raw_kelly_fraction: raw_kelly,
            adjusted_fraction: adjusted,
            investment_amount: investment,
            share_count: shares,
            gain_per_share,
            loss_per_share,
            projected_profit: shares as f64 * gain_per_share,
            projected_loss: shares as f64 * loss_per_share,
        };

        debug!(
            b = result.reward_risk_ratio,
            raw_kelly = result.raw_kelly_fraction,
            adjusted = result.adjusted_fraction,
            shares = result.share_count,
            "position sized"
        );

        Ok(result)
    }
}

/// Calculate the recommended position with a default [`PositionSizer`]
///
/// # Examples
/// ```
/// use kelly_planner::{compute, TradeParameters};
/// let result = compute(&TradeParameters::default()).unwrap();
/// assert!((result.adjusted_fraction - 0.6167).abs() < 0.0001);
/// ```
pub fn compute(params: &TradeParameters) -> Result<PositionResult, SizingError> {
    PositionSizer::new().compute(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EdgeAdvice, KellyMultiplier};

    fn params(entry: f64, target: f64, stop: f64) -> TradeParameters {
        TradeParameters {
            entry_price: entry,
            target_price: target,
            stop_price: stop,
            ..Default::default()
        }
    }

    #[test]
    fn test_scenario_full_kelly() {
        let result = compute(&TradeParameters::default()).unwrap();

        assert!((result.reward_risk_ratio - 0.324 / 0.297).abs() < 1e-9);
        assert!((result.reward_risk_ratio - 1.0909).abs() < 0.0001);
        assert!((result.raw_kelly_fraction - 0.616_666_7).abs() < 1e-6);
        assert!((result.adjusted_fraction - result.raw_kelly_fraction).abs() < 1e-15);
        assert!((result.investment_amount - 616_666.67).abs() < 0.01);
        assert_eq!(result.share_count, 220_632);
        assert!((result.projected_profit - 220_632.0 * 0.324).abs() < 0.01);
        assert!((result.projected_loss - 220_632.0 * 0.297).abs() < 0.01);
        assert!(matches!(result.advice(), EdgeAdvice::Positive { .. }));
    }

    #[test]
    fn test_scenario_quarter_kelly() {
        let full = compute(&TradeParameters::default()).unwrap();
        let quarter = compute(&TradeParameters {
            kelly_multiplier: KellyMultiplier::Quarter,
            ..Default::default()
        })
        .unwrap();

        assert!((quarter.adjusted_fraction - full.adjusted_fraction / 4.0).abs() < 1e-15);
        assert!((quarter.adjusted_fraction - 0.1542).abs() < 0.0001);
        assert!((quarter.investment_amount - 154_166.67).abs() < 0.01);
        assert_eq!(quarter.share_count, 55_158);
        // Multiplier scales the allocation, not the raw edge
        assert_eq!(
            quarter.raw_kelly_fraction.to_bits(),
            full.raw_kelly_fraction.to_bits()
        );
    }

    #[test]
    fn test_scenario_half_kelly() {
        let full = compute(&TradeParameters::default()).unwrap();
        let half = compute(&TradeParameters {
            kelly_multiplier: KellyMultiplier::Half,
            ..Default::default()
        })
        .unwrap();

        assert!((half.adjusted_fraction - full.adjusted_fraction / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_scenario_negative_edge() {
        let result = compute(&TradeParameters {
            win_probability_percent: 10,
            ..Default::default()
        })
        .unwrap();

        assert!(result.raw_kelly_fraction < 0.0);
        assert_eq!(result.adjusted_fraction, 0.0);
        assert_eq!(result.investment_amount, 0.0);
        assert_eq!(result.share_count, 0);
        assert_eq!(result.projected_profit, 0.0);
        assert_eq!(result.projected_loss, 0.0);
        assert_eq!(result.advice(), EdgeAdvice::NegativeEdge);
    }

    #[test]
    fn test_breakeven_edge_is_negative_advice() {
        // b = 3, p = 0.25 -> raw Kelly is exactly zero
        let result = compute(&TradeParameters {
            entry_price: 10.0,
            target_price: 13.0,
            stop_price: 9.0,
            win_probability_percent: 25,
            ..Default::default()
        })
        .unwrap();

        assert_eq!(result.raw_kelly_fraction, 0.0);
        assert_eq!(result.share_count, 0);
        assert_eq!(result.advice(), EdgeAdvice::NegativeEdge);
    }

    #[test]
    fn test_zero_funds() {
        for multiplier in KellyMultiplier::ALL {
            let result = compute(&TradeParameters {
                funds: 0.0,
                kelly_multiplier: multiplier,
                ..Default::default()
            })
            .unwrap();

            assert_eq!(result.investment_amount, 0.0);
            assert_eq!(result.share_count, 0);
            assert_eq!(result.projected_profit, 0.0);
        }
    }

    #[test]
    fn test_target_not_above_entry() {
        let err = compute(&params(10.0, 10.0, 5.0)).unwrap_err();
        assert_eq!(
            err,
            SizingError::InvalidPriceConfiguration {
                entry: 10.0,
                target: 10.0,
                stop: 5.0,
            }
        );
    }

    #[test]
    fn test_stop_not_below_entry() {
        assert!(compute(&params(10.0, 12.0, 10.0)).is_err());
        assert!(compute(&params(10.0, 5.0, 5.0)).is_err());
        assert!(compute(&params(10.0, 12.0, 11.0)).is_err());
    }

    #[test]
    fn test_win_probability_bounds() {
        let low = compute(&TradeParameters {
            win_probability_percent: 1,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(low.share_count, 0);

        let high = compute(&TradeParameters {
            win_probability_percent: 99,
            ..Default::default()
        })
        .unwrap();
        assert!(high.adjusted_fraction > 0.98);
        assert!(high.adjusted_fraction < 1.0);
    }

    #[test]
    fn test_investment_not_reconciled_with_shares() {
        let result = compute(&TradeParameters::default()).unwrap();
        let spent = result.share_count as f64 * 2.795;

        assert!(spent <= result.investment_amount);
        assert!(result.investment_amount - spent < 2.795);
        assert!(result.investment_amount != spent);
    }

    #[test]
    fn test_share_count_is_floor_of_investment() {
        let grid = [
            (250_000.0, 10.0, 14.0, 8.5, 55),
            (12_345.67, 0.5, 0.9, 0.1, 70),
            (1_000.0, 100.0, 101.0, 99.0, 99),
            (50.0, 3.0, 6.0, 1.0, 40),
        ];

        for (funds, entry, target, stop, win) in grid {
            for multiplier in KellyMultiplier::ALL {
                let p = TradeParameters {
                    funds,
                    entry_price: entry,
                    target_price: target,
                    stop_price: stop,
                    win_probability_percent: win,
                    kelly_multiplier: multiplier,
                };
                let result = compute(&p).unwrap();

                assert!(result.adjusted_fraction >= 0.0);
                assert_eq!(
                    result.share_count,
                    (funds * result.adjusted_fraction / entry).floor() as u64
                );
            }
        }
    }

    #[test]
    fn test_adjusted_fraction_never_negative() {
        for win in 1..=99u8 {
            let result = compute(&TradeParameters {
                win_probability_percent: win,
                ..Default::default()
            })
            .unwrap();
            assert!(result.adjusted_fraction >= 0.0, "win={}", win);
        }
    }

    #[test]
    fn test_compute_is_idempotent() {
        let params = TradeParameters {
            kelly_multiplier: KellyMultiplier::Half,
            ..Default::default()
        };
        let sizer = PositionSizer::new();

        let a = sizer.compute(&params).unwrap();
        let b = sizer.compute(&params).unwrap();

        assert_eq!(a, b);
        for (x, y) in [
            (a.reward_risk_ratio, b.reward_risk_ratio),
            (a.raw_kelly_fraction, b.raw_kelly_fraction),
            (a.adjusted_fraction, b.adjusted_fraction),
            (a.investment_amount, b.investment_amount),
            (a.gain_per_share, b.gain_per_share),
            (a.loss_per_share, b.loss_per_share),
            (a.projected_profit, b.projected_profit),
            (a.projected_loss, b.projected_loss),
        ] {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "funds must be >= 0")]
    fn test_negative_funds_rejected_in_debug() {
        let _ = compute(&TradeParameters {
            funds: -1.0,
            ..Default::default()
        });
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "entry price > 0")]
    fn test_zero_entry_rejected_in_debug() {
        let _ = compute(&params(0.0, 1.0, -1.0));
    }
}
