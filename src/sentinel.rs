//! Adapter for callers that still expect the out-of-band sentinel contract:
//! `-1.0` for an invalid scalar result, `None` for an invalid array, and
//! `-1.0` in every batch slot that is below `min_periods`.

use crate::error::RollingError;
use tracing::debug;

/// Scalar returned in place of a statistic when the input is invalid.
pub const SENTINEL: f64 = -1.0;

pub fn to_sentinel(result: Result<f64, RollingError>) -> f64 {
    result.unwrap_or_else(|err| {
        debug!(error = %err, "reporting sentinel");
        SENTINEL
    })
}

pub fn to_nullable(result: Result<Vec<f64>, RollingError>) -> Option<Vec<f64>> {
    match result {
        Ok(values) => Some(
            values
                .into_iter()
                .map(|value| if value.is_nan() { SENTINEL } else { value })
                .collect(),
        ),
        Err(err) => {
            debug!(error = %err, "reporting null array");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::batch::sz_rolling_mean;
    use crate::analytics::rolling::rolling_mean;

    #[test]
    fn invalid_scalar_becomes_minus_one() {
        assert_eq!(to_sentinel(rolling_mean(&[1.0, 2.0], 1, 2, 2)), SENTINEL);
        assert_eq!(to_sentinel(rolling_mean(&[1.0, 2.0], 2, 2, 2)), 1.5);
    }

    #[test]
    fn invalid_array_becomes_none() {
        assert_eq!(to_nullable(sz_rolling_mean(&[1.0], 0, 2, 0)), None);
        assert_eq!(to_nullable(sz_rolling_mean(&[1.0], 1, 2, 0)), Some(vec![1.0]));
    }

    #[test]
    fn masked_slots_become_minus_one() {
        let values = to_nullable(sz_rolling_mean(&[4.0, 6.0, 8.0, 10.0], 4, 2, 3)).unwrap();
        assert_eq!(values, vec![4.0, SENTINEL, 7.0, 9.0]);
    }
}
