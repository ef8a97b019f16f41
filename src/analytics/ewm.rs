//! Exponentially weighted moving average with span-based smoothing.
//!
//! `alpha = 2 / (span + 1)` for every position. The from-scratch form folds the
//! recurrence `E[0] = x[0]`, `E[i] = (1 - alpha) E[i-1] + alpha x[i]` over the
//! valid prefix; the incremental form applies one step to a caller-held value.

use crate::analytics::primitives::{ema_fold, ema_step, span_alpha};
use crate::analytics::windows::WindowParams;
use crate::error::RollingError;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// How the from-scratch EWM treats a prefix shorter than the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaddingStrategy {
    /// Left-pad to `span` observations by repeating `data[0]`.
    #[default]
    RepeatFirst,
    /// Fold over the short prefix as is.
    NoPadding,
    /// Fold over the short prefix with `alpha = 2 / (valid_length + 1)`.
    ShrinkAlpha,
}

impl PaddingStrategy {
    /// Working buffer and smoothing factor for a prefix of `prefix.len()`
    /// observations under a nominal `span`.
    pub fn prepare<'a>(&self, prefix: &'a [f64], span: usize) -> (Cow<'a, [f64]>, f64) {
        let valid_length = prefix.len();
        if valid_length >= span {
            return (Cow::Borrowed(prefix), span_alpha(span));
        }

        match self {
            PaddingStrategy::RepeatFirst => {
                let mut padded = vec![prefix[0]; span - valid_length];
                padded.extend_from_slice(prefix);
                (Cow::Owned(padded), span_alpha(span))
            }
            PaddingStrategy::NoPadding => (Cow::Borrowed(prefix), span_alpha(span)),
            PaddingStrategy::ShrinkAlpha => (Cow::Borrowed(prefix), span_alpha(valid_length)),
        }
    }
}

impl fmt::Display for PaddingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            PaddingStrategy::RepeatFirst => "repeat_first",
            PaddingStrategy::NoPadding => "no_padding",
            PaddingStrategy::ShrinkAlpha => "shrink_alpha",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for PaddingStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "repeat_first" => Ok(PaddingStrategy::RepeatFirst),
            "no_padding" | "none" => Ok(PaddingStrategy::NoPadding),
            "shrink_alpha" => Ok(PaddingStrategy::ShrinkAlpha),
            other => Err(format!("unknown padding strategy '{}'", other)),
        }
    }
}

/// From-scratch EWM at `valid_length` using `RepeatFirst` padding.
pub fn ewm_mean(
    data: &[f64],
    valid_length: usize,
    span: usize,
    min_periods: usize,
) -> Result<f64, RollingError> {
    ewm_mean_with(
        data,
        valid_length,
        span,
        min_periods,
        PaddingStrategy::RepeatFirst,
    )
}

/// From-scratch EWM at `valid_length` with an explicit padding strategy.
pub fn ewm_mean_with(
    data: &[f64],
    valid_length: usize,
    span: usize,
    min_periods: usize,
    padding: PaddingStrategy,
) -> Result<f64, RollingError> {
    WindowParams::new(valid_length, span, min_periods).validate(data.len())?;

    let (buffer, alpha) = padding.prepare(&data[..valid_length], span);
    let value = ema_fold(&buffer, alpha);
    trace!(valid_length, span, %padding, alpha, value, "ewm from scratch");
    Ok(value)
}

/// One-step EWM update from the value the caller computed at `valid_length - 1`.
pub fn ewm_mean_incremental(
    data: &[f64],
    valid_length: usize,
    span: usize,
    min_periods: usize,
    previous: f64,
) -> Result<f64, RollingError> {
    WindowParams::new(valid_length, span, min_periods).validate(data.len())?;

    Ok(ema_step(
        Some(previous),
        data[valid_length - 1],
        span_alpha(span),
    ))
}
