//! Engine configuration loaded from JSON or environment variables.

use crate::analytics::batch::DEFAULT_PARALLEL_THRESHOLD;
use crate::analytics::ewm::PaddingStrategy;
use crate::analytics::primitives::DEFAULT_EPS;
use crate::error::ConfigError;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const ENV_WINDOW: &str = "ROLLING_WINDOW";
pub const ENV_MIN_PERIODS: &str = "ROLLING_MIN_PERIODS";
pub const ENV_EPS: &str = "ROLLING_EPS";
pub const ENV_PADDING: &str = "ROLLING_PADDING";
pub const ENV_PARALLEL_THRESHOLD: &str = "ROLLING_PARALLEL_THRESHOLD";

/// Window and numeric settings shared by every operation of a `RollingEngine`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct RollingConfig {
    /// Nominal look-back length (also the EWM span)
    pub window_length: usize,
    /// Minimum valid length before any statistic is defined
    pub min_periods: usize,
    /// Tolerance for the max/min comparisons
    pub eps: OrderedFloat<f64>,
    /// Short-prefix policy for the from-scratch EWM
    pub padding: PaddingStrategy,
    /// Batch size at which prefixes are evaluated in parallel
    pub parallel_threshold: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        RollingConfig {
            window_length: 10,
            min_periods: 1,
            eps: OrderedFloat(DEFAULT_EPS),
            padding: PaddingStrategy::RepeatFirst,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl RollingConfig {
    pub fn new(window_length: usize, min_periods: usize) -> Self {
        RollingConfig {
            window_length,
            min_periods,
            ..RollingConfig::default()
        }
    }

    /// Parses a JSON document; absent fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: RollingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads the `ROLLING_*` environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from any name-to-value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RollingConfig::default();
        let config = RollingConfig {
            window_length: parse_var(&lookup, ENV_WINDOW)?.unwrap_or(defaults.window_length),
            min_periods: parse_var(&lookup, ENV_MIN_PERIODS)?.unwrap_or(defaults.min_periods),
            eps: parse_var::<f64, _>(&lookup, ENV_EPS)?
                .map(OrderedFloat)
                .unwrap_or(defaults.eps),
            padding: parse_var(&lookup, ENV_PADDING)?.unwrap_or(defaults.padding),
            parallel_threshold: parse_var(&lookup, ENV_PARALLEL_THRESHOLD)?
                .unwrap_or(defaults.parallel_threshold),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_length == 0 {
            return Err(ConfigError::Invalid(
                "window_length must be positive".to_string(),
            ));
        }
        let eps = self.eps.into_inner();
        if !eps.is_finite() || eps < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "eps must be a non-negative finite number, got {}",
                eps
            )));
        }
        if self.parallel_threshold == 0 {
            return Err(ConfigError::Invalid(
                "parallel_threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVariable {
                name: name.to_string(),
                value: raw,
            }),
    }
}
