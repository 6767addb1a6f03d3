//! Text rendering of sizing results
//!
//! Currency and percentages use 2 decimals, share counts are
//! thousands-separated. Labels are bilingual (English / Chinese).

use std::fmt;

use crate::error::SizingError;
use crate::models::{EdgeAdvice, PositionResult, TradeParameters};

/// Practical cap on a single trade, as a range of allocation percentages
pub const PRACTICAL_CAP_PCT: (u32, u32) = (10, 20);

/// Insert `,` between groups of three digits
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format as `$1,234,567.89`
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// Format a fraction (0.6167) as a percentage (`61.67%`)
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

/// Format a share count as `220,632`
pub fn format_shares(shares: u64) -> String {
    group_thousands(&shares.to_string())
}

/// Footer notes attached to a result
#[derive(Debug, Clone, PartialEq)]
pub enum Note {
    /// Edge is non-positive; skip the trade
    NegativeEdge,
    /// Kelly suggests `allocation`, professionals cap single trades lower
    PracticalCap { allocation: f64 },
    /// Whole shares cost less than the suggested investment
    TruncatedShares { investment: f64, share_cost: f64 },
}

impl Note {
    pub fn is_warning(&self) -> bool {
        matches!(self, Note::NegativeEdge)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::NegativeEdge => write!(
                f,
                "Negative Edge: The math suggests skipping this trade. / 数学优势为负，建议放弃交易。"
            ),
            Note::PracticalCap { allocation } => {
                let (lo, hi) = PRACTICAL_CAP_PCT;
                let pct = format_percent(*allocation);
                writeln!(
                    f,
                    "Pro Tip: While the Kelly Criterion suggests {}, most professional portfolio \
                     managers cap single trades at {}-{}% to manage volatility.",
                    pct, lo, hi
                )?;
                write!(
                    f,
                    "专业提示：虽然凯利公式建议投入 {}，但大多数专业基金经理会将单笔交易限制在 {}-{}% 以控制波动。",
                    pct, lo, hi
                )
            }
            Note::TruncatedShares {
                investment,
                share_cost,
            } => write!(
                f,
                "Whole shares cost {}; the suggested investment of {} is the amount before rounding down to whole shares.",
                format_currency(*share_cost),
                format_currency(*investment)
            ),
        }
    }
}

/// Footer notes for a result, warnings first
pub fn notes(params: &TradeParameters, result: &PositionResult) -> Vec<Note> {
    let mut notes = Vec::new();

    match result.advice() {
        EdgeAdvice::NegativeEdge => notes.push(Note::NegativeEdge),
        EdgeAdvice::Positive { allocation } => notes.push(Note::PracticalCap { allocation }),
    }

    let share_cost = result.share_count as f64 * params.entry_price;
    if result.investment_amount - share_cost >= 0.005 {
        notes.push(Note::TruncatedShares {
            investment: result.investment_amount,
            share_cost,
        });
    }

    notes
}

/// Blocking message shown instead of a result
pub fn error_message(err: &SizingError) -> String {
    match err {
        SizingError::InvalidPriceConfiguration { .. } => format!(
            "Invalid Price Configuration: Target > Entry > Stop-Loss required. / 价格设置无效：需要 止盈价 > 入场价 > 止损价。\n{}",
            err
        ),
    }
}

/// Render the result body (header, investment, P&L projections)
pub fn render(result: &PositionResult) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Strategy: {:?} Kelly | Reward/Risk (b): {:.3}",
        result.kelly_multiplier.value(),
        result.reward_risk_ratio
    ));
    lines.push(String::new());
    lines.push("Suggested Investment / 建议投入金额".to_string());
    lines.push(format!("  {}", format_currency(result.investment_amount)));
    lines.push(format!(
        "  Allocation: {:>10}    Shares: {}",
        format_percent(result.adjusted_fraction),
        format_shares(result.share_count)
    ));
    lines.push(String::new());
    lines.push(format!(
        "Potential Profit / 潜在利润: {:>16}  (+{:.3} per share)",
        format_currency(result.projected_profit),
        result.gain_per_share
    ));
    lines.push(format!(
        "Potential Loss / 潜在亏损:   {:>16}  (-{:.3} per share)",
        format_currency(result.projected_loss),
        result.loss_per_share
    ));

    lines.join("\n")
}
