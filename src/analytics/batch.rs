//! Batch rolling statistics: one output per prefix length `1..=valid_length`.
//!
//! Slot `0` holds `data[0]` for mean, max and min. Every later slot `i` is the
//! single-value statistic at prefix length `i + 1`, or `f64::NAN` when that
//! prefix is shorter than `min_periods`.

use crate::analytics::ewm::PaddingStrategy;
use crate::analytics::primitives::DEFAULT_EPS;
use crate::analytics::rolling::Statistic;
use crate::analytics::windows::{ExponentialWindow, FixedWindow};
use crate::error::RollingError;
use tracing::debug;

/// Prefix count at which batch evaluation moves onto the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Computes `statistic` for every prefix of `data[..valid_length]`.
pub fn sz_rolling(
    statistic: Statistic,
    data: &[f64],
    valid_length: usize,
    window_length: usize,
    min_periods: usize,
    eps: f64,
    parallel_threshold: usize,
) -> Result<Vec<f64>, RollingError> {
    let window = FixedWindow::new(window_length, min_periods);
    let result = window.apply(
        data,
        valid_length,
        statistic.seeds_first(),
        parallel_threshold,
        |slice| statistic.compute(slice, eps),
    )?;
    debug!(
        statistic = %statistic,
        valid_length,
        window_length,
        min_periods,
        parallel = valid_length >= parallel_threshold,
        "batch rolling statistic"
    );
    Ok(result)
}

pub fn sz_rolling_mean(
    data: &[f64],
    valid_length: usize,
    window_length: usize,
    min_periods: usize,
) -> Result<Vec<f64>, RollingError> {
    sz_rolling(
        Statistic::Mean,
        data,
        valid_length,
        window_length,
        min_periods,
        DEFAULT_EPS,
        DEFAULT_PARALLEL_THRESHOLD,
    )
}

pub fn sz_rolling_max(
    data: &[f64],
    valid_length: usize,
    window_length: usize,
    min_periods: usize,
) -> Result<Vec<f64>, RollingError> {
    sz_rolling(
        Statistic::Max,
        data,
        valid_length,
        window_length,
        min_periods,
        DEFAULT_EPS,
        DEFAULT_PARALLEL_THRESHOLD,
    )
}

pub fn sz_rolling_min(
    data: &[f64],
    valid_length: usize,
    window_length: usize,
    min_periods: usize,
) -> Result<Vec<f64>, RollingError> {
    sz_rolling(
        Statistic::Min,
        data,
        valid_length,
        window_length,
        min_periods,
        DEFAULT_EPS,
        DEFAULT_PARALLEL_THRESHOLD,
    )
}

pub fn sz_rolling_std(
    data: &[f64],
    valid_length: usize,
    window_length: usize,
    min_periods: usize,
) -> Result<Vec<f64>, RollingError> {
    sz_rolling(
        Statistic::Std,
        data,
        valid_length,
        window_length,
        min_periods,
        DEFAULT_EPS,
        DEFAULT_PARALLEL_THRESHOLD,
    )
}

/// EWM for every prefix of `data[..valid_length]` using `RepeatFirst` padding.
pub fn sz_ewm_mean(
    data: &[f64],
    valid_length: usize,
    span: usize,
    min_periods: usize,
) -> Result<Vec<f64>, RollingError> {
    sz_ewm_mean_with(
        data,
        valid_length,
        span,
        min_periods,
        PaddingStrategy::RepeatFirst,
    )
}

/// EWM for every prefix of `data[..valid_length]`.
///
/// Prefixes shorter than the span are padded with `padding`; from the span
/// onward the incremental chain supplies each slot in O(1).
pub fn sz_ewm_mean_with(
    data: &[f64],
    valid_length: usize,
    span: usize,
    min_periods: usize,
    padding: PaddingStrategy,
) -> Result<Vec<f64>, RollingError> {
    ExponentialWindow::new(span, min_periods, padding).apply(data, valid_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::ewm::ewm_mean_with;
    use crate::analytics::rolling::{rolling_mean, rolling_std};

    #[test]
    fn batch_mean_matches_single_value_at_each_prefix() {
        let data = [1.0, 2.0, 3.0];
        let batch = sz_rolling_mean(&data, 3, 2, 1).unwrap();
        assert_eq!(
            batch,
            vec![
                1.0,
                rolling_mean(&data, 2, 2, 1).unwrap(),
                rolling_mean(&data, 3, 2, 1).unwrap(),
            ]
        );
    }

    #[test]
    fn first_slot_is_first_observation_even_with_min_periods() {
        let data = [4.0, 8.0, 6.0, 2.0];
        let max = sz_rolling_max(&data, 4, 2, 3).unwrap();
        assert_eq!(max[0], 4.0);
        assert!(max[1].is_nan());
        assert_eq!(&max[2..], &[8.0, 6.0]);

        let min = sz_rolling_min(&data, 4, 2, 3).unwrap();
        assert_eq!(min[0], 4.0);
        assert_eq!(&min[2..], &[6.0, 2.0]);
    }

    #[test]
    fn std_first_slot_is_dispersion_of_one_point() {
        let data = [3.0, 5.0, 9.0];
        let std = sz_rolling_std(&data, 3, 2, 1).unwrap();
        assert_eq!(std[0], 0.0);
        assert_eq!(std[1], rolling_std(&data, 2, 2, 1).unwrap());
        assert_eq!(std[2], 2.0);
    }

    #[test]
    fn batch_length_matches_valid_length() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        assert_eq!(sz_rolling_std(&data, 4, 3, 1).unwrap().len(), 4);
    }

    #[test]
    fn batch_rejects_invalid_params() {
        let data = [1.0, 2.0];
        assert_eq!(sz_rolling_mean(&data, 0, 2, 0), Err(RollingError::ZeroValidLength));
        assert!(matches!(
            sz_rolling_min(&data, 1, 2, 2),
            Err(RollingError::BelowMinPeriods { .. })
        ));
        assert!(sz_ewm_mean(&data, 3, 2, 1).is_err());
    }

    #[test]
    fn ewm_batch_seeds_with_first_observation() {
        let data = [10.0, 20.0, 40.0];
        let result = sz_ewm_mean(&data, 3, 3, 1).unwrap();
        assert_eq!(result[0], 10.0);
        assert!((result[2] - 27.5).abs() < 1e-12);
    }

    #[test]
    fn ewm_batch_slots_below_min_periods_are_nan() {
        let data = [2.0, 4.0, 8.0, 16.0];
        let masked = sz_ewm_mean(&data, 4, 3, 3).unwrap();
        let unmasked = sz_ewm_mean(&data, 4, 3, 1).unwrap();
        assert_eq!(masked[0], data[0]);
        assert!(masked[1].is_nan());
        assert_eq!(masked[2], unmasked[2]);
        assert_eq!(masked[3], unmasked[3]);
    }

    #[test]
    fn ewm_batch_matches_from_scratch_for_every_padding() {
        let data = [1.0, 10.0, 4.0, 7.0, 2.0, 9.0, 3.0, 8.0, 6.0, 5.0, 11.0, 0.5];
        for padding in [
            PaddingStrategy::RepeatFirst,
            PaddingStrategy::NoPadding,
            PaddingStrategy::ShrinkAlpha,
        ] {
            let batch = sz_ewm_mean_with(&data, data.len(), 9, 1, padding).unwrap();
            for n in 1..=data.len() {
                let scratch = ewm_mean_with(&data, n, 9, 1, padding).unwrap();
                assert!(
                    (batch[n - 1] - scratch).abs() < 1e-12,
                    "{} at {}: {} vs {}",
                    padding,
                    n,
                    batch[n - 1],
                    scratch
                );
            }
        }
    }
}
