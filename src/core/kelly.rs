//! Kelly Criterion Primitives
//!
//! Fraction of bankroll to commit to a binary-outcome trade.
//!
//! The Kelly criterion formula:
//!     f* = (b*p - q) / b
//!
//! Where:
//!     f* = fraction of bankroll to commit
//!     b = reward/risk ratio (gain per share / loss per share)
//!     p = probability of reaching the target
//!     q = 1 - p (probability of hitting the stop)

/// Reward/risk ratio of a trade
///
/// Returns `None` unless both the gain and the loss per share are strictly
/// positive.
///
/// # Examples
/// ```
/// use kelly_planner::core::kelly::reward_risk_ratio;
/// let b = reward_risk_ratio(3.0, 1.0).unwrap();
/// assert!((b - 3.0).abs() < 1e-12);
/// assert!(reward_risk_ratio(0.0, 1.0).is_none());
/// ```
pub fn reward_risk_ratio(gain_per_share: f64, loss_per_share: f64) -> Option<f64> {
    if gain_per_share > 0.0 && loss_per_share > 0.0 {
        Some(gain_per_share / loss_per_share)
    } else {
        None
    }
}

/// Calculate the raw Kelly fraction for a single trade
///
/// # Arguments
/// * `probability` - Estimated probability of winning (0-1)
/// * `ratio` - Reward/risk ratio `b` (must be > 0)
///
/// # Returns
/// Kelly fraction (negative when the trade has no edge)
///
/// # Examples
/// ```
/// use kelly_planner::core::kelly::calculate_kelly_fraction;
/// let kelly = calculate_kelly_fraction(0.5, 2.0); // (1.0 - 0.5) / 2.0
/// assert!((kelly - 0.25).abs() < 0.0001);
/// ```
pub fn calculate_kelly_fraction(probability: f64, ratio: f64) -> f64 {
    if ratio <= 0.0 {
        return 0.0;
    }

    let q = 1.0 - probability;
    (probability * ratio - q) / ratio
}
