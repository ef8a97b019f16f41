//! Stateless analytic primitives used by the rolling and EWM engines.
//!
//! These are pure functions that only operate on slices of numeric data and
//! can be composed with windowing strategies. Callers guarantee the slices are
//! non-empty.

/// Tolerance used by the extremum scans unless a configured one is supplied.
pub const DEFAULT_EPS: f64 = 1e-6;

/// Arithmetic mean of the window.
pub fn mean(window: &[f64]) -> f64 {
    window.iter().sum::<f64>() / window.len() as f64
}

/// Largest value of the window, ignoring increases smaller than `eps`.
///
/// The scan is seeded with negative infinity, so any window reports one of
/// its own values, infinities included.
pub fn max_with_tolerance(window: &[f64], eps: f64) -> f64 {
    let mut running = f64::NEG_INFINITY;
    for &value in window {
        if value > running + eps {
            running = value;
        }
    }
    running
}

/// Smallest value of the window, ignoring decreases smaller than `eps`.
pub fn min_with_tolerance(window: &[f64], eps: f64) -> f64 {
    let mut running = f64::INFINITY;
    for &value in window {
        if value + eps < running {
            running = value;
        }
    }
    running
}

/// Calculates the population standard deviation of the window.
pub fn population_std_dev(window: &[f64]) -> f64 {
    let n = window.len() as f64;
    let mean = window.iter().sum::<f64>() / n;
    let sum_squared_diff: f64 = window.iter().map(|&value| (value - mean).powi(2)).sum();

    (sum_squared_diff / n).sqrt()
}

/// Smoothing factor for a span: `2 / (span + 1)`.
pub fn span_alpha(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

/// Computes the next value for an exponential smoothing primitive.
pub fn ema_step(previous: Option<f64>, value: f64, alpha: f64) -> f64 {
    match previous {
        Some(prev) => alpha * value + (1.0 - alpha) * prev,
        None => value,
    }
}

/// Folds the EWM recurrence over a buffer, seeding with its first element.
pub fn ema_fold(values: &[f64], alpha: f64) -> f64 {
    values
        .iter()
        .fold(None, |previous, &value| Some(ema_step(previous, value, alpha)))
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_window() {
        assert_eq!(mean(&[3.0, 4.0, 5.0]), 4.0);
    }

    #[test]
    fn max_handles_all_negative_window() {
        assert_eq!(max_with_tolerance(&[-3.0, -1.5, -7.0], DEFAULT_EPS), -1.5);
    }

    #[test]
    fn max_ignores_changes_within_tolerance() {
        let result = max_with_tolerance(&[1.0, 1.0 + 1e-9, 0.5], DEFAULT_EPS);
        assert_eq!(result, 1.0);
    }

    #[test]
    fn min_ignores_changes_within_tolerance() {
        let result = min_with_tolerance(&[2.0, 2.0 - 1e-9, 3.0], DEFAULT_EPS);
        assert_eq!(result, 2.0);
        assert_eq!(min_with_tolerance(&[4.0, -2.0, 1.0], DEFAULT_EPS), -2.0);
    }

    #[test]
    fn population_std_dev_divides_by_n() {
        let result = population_std_dev(&[1.0, 2.0, 3.0]);
        assert!((result - 0.816496580927726).abs() < 1e-12);
        assert_eq!(population_std_dev(&[10.0]), 0.0);
    }

    #[test]
    fn span_alpha_matches_span_formula() {
        assert!((span_alpha(9) - 0.2).abs() < 1e-15);
        assert_eq!(span_alpha(1), 1.0);
    }

    #[test]
    fn extremum_of_infinite_window_is_that_infinity() {
        assert_eq!(max_with_tolerance(&[f64::NEG_INFINITY], DEFAULT_EPS), f64::NEG_INFINITY);
        assert_eq!(min_with_tolerance(&[f64::INFINITY], DEFAULT_EPS), f64::INFINITY);
        assert_eq!(max_with_tolerance(&[f64::INFINITY, 3.0], DEFAULT_EPS), f64::INFINITY);
    }

    #[test]
    fn ema_step_seeds_chain_with_first_value() {
        assert_eq!(ema_step(None, -3.25, span_alpha(9)), -3.25);
    }

    #[test]
    fn ema_step_applies_span_alpha() {
        // span 9: alpha 0.2, so 0.2 * 20 + 0.8 * 10
        let seeded = ema_step(None, 10.0, span_alpha(9));
        assert!((ema_step(Some(seeded), 20.0, span_alpha(9)) - 12.0).abs() < 1e-12);
    }

    #[test]
    fn ema_fold_of_empty_buffer_is_nan() {
        assert!(ema_fold(&[], 0.5).is_nan());
        assert_eq!(ema_fold(&[7.0], 0.5), 7.0);
    }
}
