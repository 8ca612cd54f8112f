//! Rolling sum, count, maximum and minimum.
//!
//! All four operators use the window `(t - tau, t]`: an observation exactly
//! `tau` older than the current one is no longer counted.
//!
//! The extrema use [`ExtremumTracker`], which rescans the window only when
//! the current extremum leaves it. Ties resolve to the most recent
//! observation.
//!
//! # Example
//!
//! ```
//! use irregular_ts::operators::aggregate::{rolling_count, rolling_max};
//!
//! let values = [3.0_f64, 1.0, 2.0, 5.0];
//! let times = [0.0_f64, 1.0, 1.5, 4.0];
//!
//! assert_eq!(rolling_count(&values, &times, 2.0).unwrap(), vec![1.0, 2.0, 3.0, 1.0]);
//! assert_eq!(rolling_max(&values, &times, 2.0).unwrap(), vec![3.0, 3.0, 3.0, 5.0]);
//! ```

use crate::error::Result;
use crate::kernels::extrema::{Extremum, ExtremumTracker};
use crate::kernels::window::{TrailingWindow, WindowBound};
use crate::traits::{validate_operator_input, SeriesElement};

/// Computes the sum of the values in the trailing window `(t - tau, t]`.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
pub fn rolling_sum<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    rolling_sum_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`rolling_sum`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`rolling_sum`], plus `Error::BufferTooSmall` if `output` is
/// shorter than `values`.
pub fn rolling_sum_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "rolling_sum")?;

    let mut window = TrailingWindow::new(tau, WindowBound::Open);
    let mut sum = T::zero();
    for i in 0..values.len() {
        sum = sum + values[i];
        window.advance(times, i, |j| sum = sum - values[j]);
        output[i] = sum;
    }

    Ok(values.len())
}

/// Counts the observations in the trailing window `(t - tau, t]`.
///
/// Only `times` determines the result; `values` must still pair with it.
/// Counts are returned in the element type so they can be combined with the
/// other operators' outputs directly.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
pub fn rolling_count<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    rolling_count_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`rolling_count`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`rolling_count`], plus `Error::BufferTooSmall` if `output` is
/// shorter than `values`.
pub fn rolling_count_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "rolling_count")?;

    let mut window = TrailingWindow::new(tau, WindowBound::Open);
    for i in 0..values.len() {
        window.advance(times, i, |_| {});
        output[i] = T::from_usize(window.len_at(i))?;
    }

    Ok(values.len())
}

fn rolling_extremum_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    kind: Extremum,
    output: &mut [T],
    operator: &'static str,
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), operator)?;

    let mut window = TrailingWindow::new(tau, WindowBound::Open);
    let mut tracker = ExtremumTracker::new(kind);
    for i in 0..values.len() {
        tracker.push(values, i);
        let left = window.advance(times, i, |_| {});
        tracker.revalidate(values, left, i);
        output[i] = tracker.value(values);
    }

    if tracker.rescans() > 0 {
        log::trace!(
            "{operator}: {} window rescans over {} observations",
            tracker.rescans(),
            values.len()
        );
    }
    Ok(values.len())
}

/// Computes the maximum of the values in the trailing window `(t - tau, t]`.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
///
/// # Performance
///
/// Amortized O(1) per observation on typical data, O(window) in the worst
/// case (a strictly decreasing series).
pub fn rolling_max<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    rolling_max_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`rolling_max`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`rolling_max`], plus `Error::BufferTooSmall` if `output` is
/// shorter than `values`.
pub fn rolling_max_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    rolling_extremum_into(values, times, tau, Extremum::Max, output, "rolling_max")
}

/// Computes the minimum of the values in the trailing window `(t - tau, t]`.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
pub fn rolling_min<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    rolling_min_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`rolling_min`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`rolling_min`], plus `Error::BufferTooSmall` if `output` is
/// shorter than `values`.
pub fn rolling_min_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    rolling_extremum_into(values, times, tau, Extremum::Min, output, "rolling_min")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn brute_force(values: &[f64], times: &[f64], tau: f64, pick: fn(f64, f64) -> f64) -> Vec<f64> {
        (0..values.len())
            .map(|i| {
                (0..=i)
                    .filter(|&j| times[i] - times[j] < tau)
                    .map(|j| values[j])
                    .reduce(pick)
                    .unwrap_or(f64::NAN)
            })
            .collect()
    }

    const VALUES: [f64; 8] = [4.0, 7.0, 1.0, 7.0, 3.0, 9.0, 2.0, 2.0];
    const TIMES: [f64; 8] = [0.0, 0.5, 1.0, 2.0, 2.5, 4.0, 4.1, 7.0];

    #[test]
    fn test_rolling_sum() {
        let result = rolling_sum(&VALUES, &TIMES, 1.5).unwrap();
        let expected = brute_force(&VALUES, &TIMES, 1.5, |a, b| a + b);
        for (a, e) in result.iter().zip(&expected) {
            assert!((a - e).abs() < 1e-10);
        }
    }

    #[test]
    fn test_rolling_count_open_bound() {
        let values = [1.0_f64; 4];
        let times = [0.0_f64, 1.0, 2.0, 2.5];
        let result = rolling_count(&values, &times, 1.0).unwrap();
        assert_eq!(result, vec![1.0, 1.0, 1.0, 2.0]);
    }

    #[test]
    fn test_rolling_max_min_match_brute_force() {
        for tau in [0.3, 1.0, 1.5, 2.0, 10.0] {
            assert_eq!(
                rolling_max(&VALUES, &TIMES, tau).unwrap(),
                brute_force(&VALUES, &TIMES, tau, f64::max),
                "max, tau = {tau}"
            );
            assert_eq!(
                rolling_min(&VALUES, &TIMES, tau).unwrap(),
                brute_force(&VALUES, &TIMES, tau, f64::min),
                "min, tau = {tau}"
            );
        }
    }

    #[test]
    fn test_rolling_max_decreasing_series_rescans() {
        let values = [5.0_f64, 4.0, 3.0, 2.0, 1.0];
        let times = [0.0_f64, 1.0, 2.0, 3.0, 4.0];
        let result = rolling_max(&values, &times, 1.5).unwrap();
        assert_eq!(result, vec![5.0, 5.0, 4.0, 3.0, 2.0]);
    }

    #[test]
    fn test_single_observation_window() {
        let values = [3.0_f64, -1.0];
        let times = [0.0_f64, 100.0];
        assert_eq!(rolling_max(&values, &times, 1.0).unwrap(), vec![3.0, -1.0]);
        assert_eq!(rolling_min(&values, &times, 1.0).unwrap(), vec![3.0, -1.0]);
        assert_eq!(rolling_sum(&values, &times, 1.0).unwrap(), vec![3.0, -1.0]);
    }

    #[test]
    fn test_rejects_mismatched_lengths() {
        assert!(matches!(
            rolling_count(&VALUES, &TIMES[..7], 1.0),
            Err(Error::LengthMismatch { values: 8, times: 7, .. })
        ));
    }
}
