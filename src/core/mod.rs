//! Core sizing logic

pub mod kelly;
pub mod sizer;

// Re-export commonly used types
pub use kelly::{calculate_kelly_fraction, reward_risk_ratio};
pub use sizer::{compute, PositionSizer};
