//! Push-mode rolling statistics.
//!
//! `RollingSeries` accepts one observation at a time and reports every
//! statistic at the new length. It keeps only the trailing window and the
//! previous EWM value, so each update costs O(window) for the rolling
//! statistics and O(1) for the EWM once the span has been reached.

use crate::analytics::primitives::{ema_fold, ema_step, span_alpha};
use crate::analytics::rolling::Statistic;
use crate::config::RollingConfig;
use crate::error::{ConfigError, RollingError};
use std::collections::VecDeque;
use tracing::{trace, warn};

/// Fixed capacity FIFO buffer that drops the oldest value when full.
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T: Clone> CircularBuffer<T> {
    /// # Panics
    /// Panics if capacity is 0
    pub fn new(capacity: usize) -> Self {
        assert!(
            capacity > 0,
            "CircularBuffer capacity must be greater than 0"
        );
        CircularBuffer {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Adds a value, evicting the oldest one if the buffer is full.
    pub fn push(&mut self, value: T) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(value);
    }

    /// Contents ordered from oldest to newest.
    pub fn as_slice(&mut self) -> &[T] {
        self.data.make_contiguous()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

/// Every statistic at one valid length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSnapshot {
    pub valid_length: usize,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub std: f64,
    pub ewm: f64,
}

/// Observation stream that updates its statistics as values arrive.
#[derive(Debug, Clone)]
pub struct RollingSeries {
    config: RollingConfig,
    window: CircularBuffer<f64>,
    count: usize,
    chain: Option<f64>,
}

impl RollingSeries {
    pub fn new(config: RollingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let window = CircularBuffer::new(config.window_length);
        Ok(RollingSeries {
            config,
            window,
            count: 0,
            chain: None,
        })
    }

    /// Number of observations pushed so far (the current valid length).
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Appends an observation and returns the statistics at the new length.
    ///
    /// Fails with `BelowMinPeriods` until `min_periods` observations have
    /// arrived; the observation is still recorded and the EWM chain advances.
    pub fn push(&mut self, value: f64) -> Result<StatsSnapshot, RollingError> {
        if !value.is_finite() {
            warn!(value, index = self.count, "non-finite observation");
        }

        self.window.push(value);
        self.count += 1;

        let span = self.config.window_length;
        let chain = ema_step(self.chain, value, span_alpha(span));
        self.chain = Some(chain);

        if self.count < self.config.min_periods {
            return Err(RollingError::BelowMinPeriods {
                valid_length: self.count,
                min_periods: self.config.min_periods,
            });
        }

        let eps = self.config.eps.into_inner();
        let window = self.window.as_slice();
        // Below the span the buffer still holds every observation.
        let ewm = if self.count < span {
            let (buffer, alpha) = self.config.padding.prepare(window, span);
            ema_fold(&buffer, alpha)
        } else {
            chain
        };
        let snapshot = StatsSnapshot {
            valid_length: self.count,
            mean: Statistic::Mean.compute(window, eps),
            max: Statistic::Max.compute(window, eps),
            min: Statistic::Min.compute(window, eps),
            std: Statistic::Std.compute(window, eps),
            ewm,
        };
        trace!(?snapshot, "series updated");
        Ok(snapshot)
    }

    /// Discards all observations and the EWM state.
    pub fn reset(&mut self) {
        self.window.clear();
        self.count = 0;
        self.chain = None;
    }
}
