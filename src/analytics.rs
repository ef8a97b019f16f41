//! Rolling Analytics
//!
//! Stateless rolling-window statistics and EWM over a caller-owned
//! observation buffer. The free functions in the submodules take the window
//! parameters explicitly; `RollingEngine` binds them to a `RollingConfig`.

pub mod batch;
pub mod ewm;
pub mod primitives;
pub mod rolling;
pub mod windows;

use crate::config::RollingConfig;
use crate::error::RollingError;
use batch::sz_rolling;
use ewm::{ewm_mean_incremental, ewm_mean_with};
use rolling::Statistic;
use tracing::debug;
use windows::WindowParams;

/// Applies every operation with the window, tolerance, padding and
/// parallelism taken from one configuration.
#[derive(Debug, Clone)]
pub struct RollingEngine {
    config: RollingConfig,
}

impl RollingEngine {
    pub fn new(config: RollingConfig) -> Self {
        debug!(
            window_length = config.window_length,
            min_periods = config.min_periods,
            eps = config.eps.into_inner(),
            padding = %config.padding,
            "rolling engine configured"
        );
        RollingEngine { config }
    }

    /// Window parameters for an evaluation at `valid_length`.
    pub fn params(&self, valid_length: usize) -> WindowParams {
        WindowParams::new(
            valid_length,
            self.config.window_length,
            self.config.min_periods,
        )
    }

    pub fn statistic(
        &self,
        statistic: Statistic,
        data: &[f64],
        valid_length: usize,
    ) -> Result<f64, RollingError> {
        statistic.evaluate(data, &self.params(valid_length), self.config.eps.into_inner())
    }

    pub fn mean(&self, data: &[f64], valid_length: usize) -> Result<f64, RollingError> {
        self.statistic(Statistic::Mean, data, valid_length)
    }

    pub fn max(&self, data: &[f64], valid_length: usize) -> Result<f64, RollingError> {
        self.statistic(Statistic::Max, data, valid_length)
    }

    pub fn min(&self, data: &[f64], valid_length: usize) -> Result<f64, RollingError> {
        self.statistic(Statistic::Min, data, valid_length)
    }

    pub fn std(&self, data: &[f64], valid_length: usize) -> Result<f64, RollingError> {
        self.statistic(Statistic::Std, data, valid_length)
    }

    /// Batch form of `statistic` over every prefix up to `valid_length`.
    pub fn batch(
        &self,
        statistic: Statistic,
        data: &[f64],
        valid_length: usize,
    ) -> Result<Vec<f64>, RollingError> {
        sz_rolling(
            statistic,
            data,
            valid_length,
            self.config.window_length,
            self.config.min_periods,
            self.config.eps.into_inner(),
            self.config.parallel_threshold,
        )
    }

    /// From-scratch EWM using the configured padding strategy.
    pub fn ewm(&self, data: &[f64], valid_length: usize) -> Result<f64, RollingError> {
        ewm_mean_with(
            data,
            valid_length,
            self.config.window_length,
            self.config.min_periods,
            self.config.padding,
        )
    }

    /// Incremental EWM from the value at `valid_length - 1`.
    pub fn ewm_next(
        &self,
        data: &[f64],
        valid_length: usize,
        previous: f64,
    ) -> Result<f64, RollingError> {
        ewm_mean_incremental(
            data,
            valid_length,
            self.config.window_length,
            self.config.min_periods,
            previous,
        )
    }

    /// EWM for every prefix up to `valid_length`, using the configured padding.
    pub fn ewm_batch(&self, data: &[f64], valid_length: usize) -> Result<Vec<f64>, RollingError> {
        batch::sz_ewm_mean_with(
            data,
            valid_length,
            self.config.window_length,
            self.config.min_periods,
            self.config.padding,
        )
    }
}

impl Default for RollingEngine {
    fn default() -> Self {
        Self::new(RollingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ewm::PaddingStrategy;
    use ordered_float::OrderedFloat;

    fn engine(window_length: usize, min_periods: usize) -> RollingEngine {
        RollingEngine::new(RollingConfig {
            window_length,
            min_periods,
            ..RollingConfig::default()
        })
    }

    #[test]
    fn engine_matches_free_functions() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let engine = engine(3, 1);
        assert_eq!(engine.mean(&data, 5).unwrap(), 4.0);
        assert_eq!(engine.max(&data, 5).unwrap(), 5.0);
        assert_eq!(engine.min(&data, 5).unwrap(), 3.0);
        assert_eq!(
            engine.std(&data, 5).unwrap(),
            rolling::rolling_std(&data, 5, 3, 1).unwrap()
        );
        assert_eq!(
            engine.ewm(&data, 5).unwrap(),
            ewm::ewm_mean(&data, 5, 3, 1).unwrap()
        );
    }

    #[test]
    fn configured_tolerance_controls_extremum_updates() {
        let data = [1.0, 1.05, 0.99];
        let coarse = RollingEngine::new(RollingConfig {
            window_length: 3,
            eps: OrderedFloat(0.1),
            ..RollingConfig::default()
        });
        assert_eq!(coarse.max(&data, 3).unwrap(), 1.0);
        assert_eq!(coarse.min(&data, 3).unwrap(), 1.0);
        assert_eq!(engine(3, 1).max(&data, 3).unwrap(), 1.05);
    }

    #[test]
    fn configured_padding_reaches_ewm() {
        let data = [1.0, 10.0];
        let shrink = RollingEngine::new(RollingConfig {
            window_length: 9,
            padding: PaddingStrategy::ShrinkAlpha,
            ..RollingConfig::default()
        });
        assert!((shrink.ewm(&data, 2).unwrap() - 7.0).abs() < 1e-12);
    }

    #[test]
    fn ewm_batch_agrees_with_incremental_chain() {
        let data = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0];
        let engine = engine(4, 1);
        let batch = engine.ewm_batch(&data, data.len()).unwrap();
        let mut previous = data[0];
        for n in 2..=data.len() {
            previous = engine.ewm_next(&data, n, previous).unwrap();
            assert!((batch[n - 1] - previous).abs() < 1e-12);
        }
    }
}
