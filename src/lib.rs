//! Kelly Planner - position sizing for a single trade
//!
//! This library provides:
//! - Kelly criterion primitives (reward/risk ratio, raw Kelly fraction)
//! - Fractional Kelly position sizing with whole-share truncation
//! - Input validation for the raw form values
//! - Text rendering of results and advisory notes
//!
//! # Example
//!
//! ```
//! use kelly_planner::{compute, KellyMultiplier, TradeParameters};
//!
//! let params = TradeParameters {
//!     kelly_multiplier: KellyMultiplier::Half,
//!     ..Default::default()
//! };
//! let result = compute(&params).unwrap();
//! println!("Recommended shares: {}", result.share_count);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod report;

// Re-export commonly used types
pub use crate::core::{compute, PositionSizer};
pub use config::PlannerConfig;
pub use error::{InputError, SizingError};
pub use models::{EdgeAdvice, KellyMultiplier, PositionResult, TradeParameters};
