//! Planner configuration
//!
//! Built-in form defaults, optionally overridden from the environment:
//!
//! - `KELLY_PLANNER_FUNDS`: default available funds
//! - `KELLY_PLANNER_MULTIPLIER`: default Kelly fraction (0.25, 0.5, 1.0, quarter, half, full)
//! - `KELLY_PLANNER_LOG`: tracing filter directive (e.g. `debug`, `kelly_planner=trace`)

use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::error::validate_funds;
use crate::models::{KellyMultiplier, TradeParameters};

pub const ENV_FUNDS: &str = "KELLY_PLANNER_FUNDS";
pub const ENV_MULTIPLIER: &str = "KELLY_PLANNER_MULTIPLIER";
pub const ENV_LOG: &str = "KELLY_PLANNER_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Planner configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Values the input form starts from
    pub defaults: TradeParameters,
    pub log_filter: String,
    /// Environment overrides that failed to parse, as (variable, value)
    pub rejected: Vec<(&'static str, String)>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            defaults: TradeParameters::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            rejected: Vec::new(),
        }
    }
}

impl PlannerConfig {
    /// Load from process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_FUNDS) {
            let parsed = raw.trim().parse::<f64>().ok().map(validate_funds);
            match parsed {
                Some(Ok(funds)) => config.defaults.funds = funds,
                _ => config.rejected.push((ENV_FUNDS, raw)),
            }
        }

        if let Some(raw) = lookup(ENV_MULTIPLIER) {
            let parsed = raw.parse::<KellyMultiplier>();
            match parsed {
                Ok(multiplier) => config.defaults.kelly_multiplier = multiplier,
                Err(_) => config.rejected.push((ENV_MULTIPLIER, raw)),
            }
        }

        if let Some(raw) = lookup(ENV_LOG) {
            let filter = raw.trim();
            if !filter.is_empty() {
                if EnvFilter::try_new(filter).is_ok() {
                    config.log_filter = filter.to_string();
                } else {
                    config.rejected.push((ENV_LOG, raw));
                }
            }
        }

        config
    }

    /// Log overrides that were ignored; call once logging is up
    pub fn report_rejected(&self) {
        for (key, value) in &self.rejected {
            warn!("Ignoring {}={:?}: not a valid value, using default", key, value);
        }
    }
}
