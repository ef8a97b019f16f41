//! Window sizing policy and the windowing strategies built on it.
//!
//! Every rolling statistic asks `WindowParams` for its trailing slice, so all
//! statistics computed with the same parameters see the same window.

use crate::analytics::ewm::PaddingStrategy;
use crate::analytics::primitives::{ema_fold, ema_step, span_alpha};
use crate::error::RollingError;
use rayon::prelude::*;

/// Maps the current length and nominal window onto the number of trailing
/// observations a statistic uses.
///
/// Returns `0` when `valid_length < min_periods`, otherwise
/// `min(valid_length, window_length)`.
pub fn effective_window_size(
    valid_length: usize,
    window_length: usize,
    min_periods: usize,
) -> usize {
    if valid_length < min_periods {
        0
    } else if valid_length >= window_length {
        window_length
    } else {
        valid_length
    }
}

/// The `(valid_length, window_length, min_periods)` triple for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowParams {
    pub valid_length: usize,
    pub window_length: usize,
    pub min_periods: usize,
}

impl WindowParams {
    pub fn new(valid_length: usize, window_length: usize, min_periods: usize) -> Self {
        WindowParams {
            valid_length,
            window_length,
            min_periods,
        }
    }

    pub fn effective_size(&self) -> usize {
        effective_window_size(self.valid_length, self.window_length, self.min_periods)
    }

    /// Checks the preconditions against a buffer holding `capacity`
    /// observations and returns the effective window size.
    pub fn validate(&self, capacity: usize) -> Result<usize, RollingError> {
        if self.valid_length == 0 {
            return Err(RollingError::ZeroValidLength);
        }
        if self.window_length == 0 {
            return Err(RollingError::ZeroWindowLength);
        }
        if self.valid_length < self.min_periods {
            return Err(RollingError::BelowMinPeriods {
                valid_length: self.valid_length,
                min_periods: self.min_periods,
            });
        }
        if self.valid_length > capacity {
            return Err(RollingError::LengthExceedsBuffer {
                valid_length: self.valid_length,
                capacity,
            });
        }
        Ok(self.effective_size())
    }

    /// Trailing `effective_size` observations ending at `valid_length - 1`.
    pub fn window<'a>(&self, data: &'a [f64]) -> Result<&'a [f64], RollingError> {
        let size = self.validate(data.len())?;
        if size == 0 {
            return Err(RollingError::EmptyWindow);
        }
        Ok(&data[self.valid_length - size..self.valid_length])
    }
}

/// Fixed-length trailing window with a minimum-periods floor.
#[derive(Debug, Clone, Copy)]
pub struct FixedWindow {
    window_length: usize,
    min_periods: usize,
}

impl FixedWindow {
    pub fn new(window_length: usize, min_periods: usize) -> Self {
        FixedWindow {
            window_length,
            min_periods,
        }
    }

    pub fn params(&self, valid_length: usize) -> WindowParams {
        WindowParams::new(valid_length, self.window_length, self.min_periods)
    }

    /// Applies the given primitive to the trailing window at every prefix
    /// length `1..=valid_length`.
    ///
    /// With `seed_first` the first slot is `data[0]` regardless of
    /// `min_periods`. Prefixes shorter than `min_periods` produce `f64::NAN`.
    /// Prefixes are evaluated on the rayon pool once `valid_length` reaches
    /// `parallel_threshold`.
    pub fn apply<F>(
        &self,
        data: &[f64],
        valid_length: usize,
        seed_first: bool,
        parallel_threshold: usize,
        primitive: F,
    ) -> Result<Vec<f64>, RollingError>
    where
        F: Fn(&[f64]) -> f64 + Sync,
    {
        self.params(valid_length).validate(data.len())?;

        let slot = |index: usize| -> f64 {
            if index == 0 && seed_first {
                return data[0];
            }
            match self.params(index + 1).window(data) {
                Ok(window) => primitive(window),
                Err(_) => f64::NAN,
            }
        };

        if valid_length >= parallel_threshold {
            Ok((0..valid_length).into_par_iter().map(slot).collect())
        } else {
            Ok((0..valid_length).map(slot).collect())
        }
    }
}

/// Exponential smoothing window that depends on the previous output.
///
/// Prefixes shorter than the span report the padded from-scratch value, so
/// every slot equals `ewm_mean_with` at that length under the same padding.
#[derive(Debug, Clone, Copy)]
pub struct ExponentialWindow {
    span: usize,
    min_periods: usize,
    padding: PaddingStrategy,
}

impl ExponentialWindow {
    pub fn new(span: usize, min_periods: usize, padding: PaddingStrategy) -> Self {
        ExponentialWindow {
            span,
            min_periods,
            padding,
        }
    }

    pub fn params(&self, valid_length: usize) -> WindowParams {
        WindowParams::new(valid_length, self.span, self.min_periods)
    }

    /// EWM for every prefix of `data[..valid_length]`.
    ///
    /// The unpadded chain always advances with `alpha = 2 / (span + 1)` and
    /// supplies every slot from the span onward. Shorter prefixes are folded
    /// through the padding strategy. Slots for prefixes shorter than
    /// `min_periods` (other than the first) are reported as `f64::NAN`.
    pub fn apply(&self, data: &[f64], valid_length: usize) -> Result<Vec<f64>, RollingError> {
        self.params(valid_length).validate(data.len())?;

        let alpha = span_alpha(self.span);
        let mut result = Vec::with_capacity(valid_length);
        let mut previous: Option<f64> = None;

        for (index, &value) in data[..valid_length].iter().enumerate() {
            let next = ema_step(previous, value, alpha);
            previous = Some(next);

            if index > 0 && index + 1 < self.min_periods {
                result.push(f64::NAN);
            } else if index + 1 < self.span {
                let (buffer, short_alpha) = self.padding.prepare(&data[..=index], self.span);
                result.push(ema_fold(&buffer, short_alpha));
            } else {
                result.push(next);
            }
        }

        Ok(result)
    }
}
