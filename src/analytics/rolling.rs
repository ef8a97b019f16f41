//! Single-value rolling statistics evaluated at one prefix length.

use crate::analytics::primitives::{
    max_with_tolerance, mean, min_with_tolerance, population_std_dev, DEFAULT_EPS,
};
use crate::analytics::windows::WindowParams;
use crate::error::RollingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Rolling statistics supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    Mean,
    Max,
    Min,
    Std,
}

impl Statistic {
    pub const ALL: [Statistic; 4] = [
        Statistic::Mean,
        Statistic::Max,
        Statistic::Min,
        Statistic::Std,
    ];

    /// Applies the statistic to an already selected, non-empty window.
    pub fn compute(&self, window: &[f64], eps: f64) -> f64 {
        match self {
            Statistic::Mean => mean(window),
            Statistic::Max => max_with_tolerance(window, eps),
            Statistic::Min => min_with_tolerance(window, eps),
            Statistic::Std => population_std_dev(window),
        }
    }

    /// Whether the batch form reports `data[0]` in its first slot.
    ///
    /// Location statistics do; the dispersion statistic is evaluated at
    /// prefix length one like every other slot.
    pub fn seeds_first(&self) -> bool {
        !matches!(self, Statistic::Std)
    }

    /// Evaluates the statistic over the trailing window selected by `params`.
    pub fn evaluate(
        &self,
        data: &[f64],
        params: &WindowParams,
        eps: f64,
    ) -> Result<f64, RollingError> {
        let window = params.window(data)?;
        let value = self.compute(window, eps);
        trace!(
            statistic = %self,
            valid_length = params.valid_length,
            window = window.len(),
            value,
            "rolling statistic"
        );
        Ok(value)
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Statistic::Mean => "mean",
            Statistic::Max => "max",
            Statistic::Min => "min",
            Statistic::Std => "std",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Statistic {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "mean" => Ok(Statistic::Mean),
            "max" => Ok(Statistic::Max),
            "min" => Ok(Statistic::Min),
            "std" | "stddev" | "std_dev" => Ok(Statistic::Std),
            other => Err(format!("unknown statistic '{}'", other)),
        }
    }
}

/// Mean of the trailing window at `valid_length`.
pub fn rolling_mean(
    data: &[f64],
    valid_length: usize,
    window_length: usize,
    min_periods: usize,
) -> Result<f64, RollingError> {
    let params = WindowParams::new(valid_length, window_length, min_periods);
    Statistic::Mean.evaluate(data, &params, DEFAULT_EPS)
}

/// Maximum of the trailing window at `valid_length`.
pub fn rolling_max(
    data: &[f64],
    valid_length: usize,
    window_length: usize,
    min_periods: usize,
) -> Result<f64, RollingError> {
    let params = WindowParams::new(valid_length, window_length, min_periods);
    Statistic::Max.evaluate(data, &params, DEFAULT_EPS)
}

/// Minimum of the trailing window at `valid_length`.
pub fn rolling_min(
    data: &[f64],
    valid_length: usize,
    window_length: usize,
    min_periods: usize,
) -> Result<f64, RollingError> {
    let params = WindowParams::new(valid_length, window_length, min_periods);
    Statistic::Min.evaluate(data, &params, DEFAULT_EPS)
}

/// Population standard deviation of the trailing window at `valid_length`.
pub fn rolling_std(
    data: &[f64],
    valid_length: usize,
    window_length: usize,
    min_periods: usize,
) -> Result<f64, RollingError> {
    let params = WindowParams::new(valid_length, window_length, min_periods);
    Statistic::Std.evaluate(data, &params, DEFAULT_EPS)
}
