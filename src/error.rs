//! Error types shared by the rolling statistics and EWM engines.

use std::fmt;

/// Reasons a rolling computation cannot produce a value.
///
/// Every variant except `EmptyWindow` is an "invalid input" condition caused by
/// the caller's window parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollingError {
    /// `valid_length` was zero
    ZeroValidLength,
    /// `window_length` (or span) was zero
    ZeroWindowLength,
    /// Fewer observations than the minimum-periods floor
    BelowMinPeriods {
        valid_length: usize,
        min_periods: usize,
    },
    /// `valid_length` points past the end of the observation buffer
    LengthExceedsBuffer { valid_length: usize, capacity: usize },
    /// The effective window held no elements
    EmptyWindow,
}

impl RollingError {
    /// True for the caller-side precondition failures.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, RollingError::EmptyWindow)
    }
}

impl fmt::Display for RollingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollingError::ZeroValidLength => {
                write!(f, "Invalid input: valid length must be positive")
            }
            RollingError::ZeroWindowLength => {
                write!(f, "Invalid input: window length must be positive")
            }
            RollingError::BelowMinPeriods {
                valid_length,
                min_periods,
            } => write!(
                f,
                "Invalid input: valid length {} is below min_periods {}",
                valid_length, min_periods
            ),
            RollingError::LengthExceedsBuffer {
                valid_length,
                capacity,
            } => write!(
                f,
                "Invalid input: valid length {} exceeds buffer of {} observations",
                valid_length, capacity
            ),
            RollingError::EmptyWindow => write!(f, "Effective window is empty"),
        }
    }
}

impl std::error::Error for RollingError {}

/// Errors raised while loading or validating a `RollingConfig`.
#[derive(Debug)]
pub enum ConfigError {
    /// Environment variable held a value that could not be parsed
    InvalidVariable { name: String, value: String },
    /// JSON document could not be decoded
    Json(serde_json::Error),
    /// Parsed configuration violates a constraint
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidVariable { name, value } => {
                write!(f, "Invalid value for {}: {:?}", name, value)
            }
            ConfigError::Json(err) => write!(f, "Invalid JSON config: {}", err),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}
