//! Simple moving averages over a trailing time window.
//!
//! Three conventions are provided for weighting observations inside the
//! window `[t - tau, t]`:
//!
//! - **eq**: arithmetic mean of the observations in `(t - tau, t]`, each
//!   counted once regardless of spacing
//! - **last**: time-average of the step function that holds each value until
//!   the next observation
//! - **lin**: time-average of the piecewise-linear interpolant through the
//!   observations
//!
//! For `last` and `lin` the series is extended backwards with its first value,
//! so the first output equals the first value.
//!
//! # Algorithm
//!
//! All variants make a single pass with a [`TrailingWindow`]. The
//! time-weighted variants maintain the integral of the interpolant over the
//! window incrementally:
//! 1. Add the segment that ends at the new observation
//! 2. Remove the truncated piece added at the previous step
//! 3. Remove whole segments that start before the window's left edge
//! 4. Add back the piece of the interpolant between the left edge and the
//!    first observation inside the window
//!
//! # Example
//!
//! ```
//! use irregular_ts::operators::sma::{sma_eq, sma_last};
//!
//! let values = vec![1.0_f64, 2.0, 3.0, 4.0];
//! let times = vec![0.0_f64, 1.0, 2.0, 3.0];
//!
//! let eq = sma_eq(&values, &times, 2.0).unwrap();
//! assert!((eq[3] - 3.5).abs() < 1e-10); // (3 + 4) / 2
//!
//! let last = sma_last(&values, &times, 2.0).unwrap();
//! assert!((last[3] - 2.5).abs() < 1e-10); // (2 * 1 + 3 * 1) / 2
//! ```

use crate::error::{Error, Result};
use crate::kernels::window::{LeadingWindow, TrailingWindow, WindowBound};
use crate::operators::Weighting;
use crate::traits::{validate_operator_input, SeriesElement};
use crate::utils::stable_mean;

/// Computes the equally-weighted simple moving average.
///
/// `output[i]` is the mean of every `values[j]` with `times[i] - tau < times[j] <= times[i]`.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
///
/// # Performance
///
/// - Time complexity: O(n)
/// - Space complexity: O(n) for the output vector
///
/// # Example
///
/// ```
/// use irregular_ts::operators::sma::sma_eq;
///
/// let result = sma_eq(&[1.0_f64, 2.0, 3.0], &[0.0, 1.0, 2.0], 2.0).unwrap();
/// assert!((result[1] - 1.5).abs() < 1e-10);
/// assert!((result[2] - 2.5).abs() < 1e-10);
/// ```
pub fn sma_eq<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    sma_eq_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes the equally-weighted simple moving average into a pre-allocated
/// buffer.
///
/// Returns the number of values written, which is `values.len()`.
///
/// # Errors
///
/// Same as [`sma_eq`], plus `Error::BufferTooSmall` if `output` is shorter
/// than `values`.
pub fn sma_eq_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "sma_eq")?;

    let mut window = TrailingWindow::new(tau, WindowBound::Open);
    let mut sum = T::zero();
    for i in 0..values.len() {
        sum = sum + values[i];
        window.advance(times, i, |j| sum = sum - values[j]);
        output[i] = sum / T::from_usize(window.len_at(i))?;
    }

    Ok(values.len())
}

/// Computes the equally-weighted simple moving average, periodically
/// recomputing the window mean from scratch.
///
/// Identical to [`sma_eq`] except that at every index divisible by
/// `obs_refresh` the window mean is recomputed with
/// [`stable_mean`](crate::utils::stable_mean) and the running sum is reset to
/// `mean * count`. This bounds the drift of the running sum on long series
/// with large values.
///
/// # Errors
///
/// Same as [`sma_eq`], plus `Error::InvalidParameter` if `obs_refresh` is 0.
///
/// # Example
///
/// ```
/// use irregular_ts::operators::sma::{sma_eq, sma_eq_stable};
///
/// let values = vec![1e12_f64 + 0.1, 1e12 + 0.2, 1e12 + 0.3, 1e12 + 0.4];
/// let times = vec![0.0, 1.0, 2.0, 3.0];
/// let stable = sma_eq_stable(&values, &times, 2.0, 2).unwrap();
/// let plain = sma_eq(&values, &times, 2.0).unwrap();
/// assert!((stable[3] - plain[3]).abs() < 1e-3);
/// ```
pub fn sma_eq_stable<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    obs_refresh: usize,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    sma_eq_stable_into(values, times, tau, obs_refresh, &mut output)?;
    Ok(output)
}

/// Computes [`sma_eq_stable`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`sma_eq_stable`], plus `Error::BufferTooSmall` if `output` is
/// shorter than `values`.
pub fn sma_eq_stable_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    obs_refresh: usize,
    output: &mut [T],
) -> Result<usize> {
    if obs_refresh == 0 {
        return Err(Error::InvalidParameter {
            name: "obs_refresh",
            reason: "refresh interval must be at least 1",
        });
    }
    validate_operator_input(values, times, tau, output.len(), "sma_eq_stable")?;

    let mut window = TrailingWindow::new(tau, WindowBound::Open);
    let mut sum = T::zero();
    for i in 0..values.len() {
        sum = sum + values[i];
        let left = window.advance(times, i, |j| sum = sum - values[j]);
        let count = T::from_usize(window.len_at(i))?;

        if i % obs_refresh == 0 {
            let mean = stable_mean(&values[left..=i]);
            sum = mean * count;
            output[i] = mean;
        } else {
            output[i] = sum / count;
        }
    }

    Ok(values.len())
}

/// Computes the time-weighted moving average of the step interpolant.
///
/// Each value is held until the next observation, so `values[i - 1]` covers
/// `[times[i - 1], times[i])`. `output[i]` is the integral of that step
/// function over `[times[i] - tau, times[i]]` divided by `tau`. Before the
/// first observation the series is assumed to equal `values[0]`, so
/// `output[0] == values[0]`.
///
/// Note that the value observed at `times[i]` does not influence `output[i]`.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
///
/// # Example
///
/// ```
/// use irregular_ts::operators::sma::sma_last;
///
/// // 2.0 holds on [0, 2), so the window [1, 2] averages to 2.0
/// let result = sma_last(&[2.0_f64, 4.0], &[0.0, 2.0], 1.0).unwrap();
/// assert!((result[1] - 2.0).abs() < 1e-10);
/// ```
pub fn sma_last<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    sma_last_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`sma_last`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`sma_last`], plus `Error::BufferTooSmall` if `output` is shorter
/// than `values`.
pub fn sma_last_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "sma_last")?;
    if values.is_empty() {
        return Ok(0);
    }

    let mut window = TrailingWindow::new(tau, WindowBound::Closed);
    let mut left_area = values[0] * tau;
    let mut roll_area = left_area;
    output[0] = values[0];

    for i in 1..values.len() {
        roll_area = roll_area + values[i - 1] * (times[i] - times[i - 1]);
        roll_area = roll_area - left_area;

        let left = window.advance(times, i, |j| {
            roll_area = roll_area - values[j] * (times[j + 1] - times[j]);
        });

        // Value held across the window's left edge
        let held = values[left.saturating_sub(1)];
        left_area = held * (times[left] - window.cutoff(times, i));
        roll_area = roll_area + left_area;

        output[i] = roll_area / tau;
    }

    Ok(values.len())
}

/// Computes the time-weighted moving average of the linear interpolant.
///
/// `output[i]` is the integral of the piecewise-linear function through the
/// observations over `[times[i] - tau, times[i]]` divided by `tau`. Before the
/// first observation the series is assumed to equal `values[0]`.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
///
/// # Example
///
/// ```
/// use irregular_ts::operators::sma::sma_lin;
///
/// // The interpolant rises from 3 at t=1 to 4 at t=2
/// let result = sma_lin(&[2.0_f64, 4.0], &[0.0, 2.0], 1.0).unwrap();
/// assert!((result[1] - 3.5).abs() < 1e-10);
/// ```
pub fn sma_lin<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    sma_lin_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`sma_lin`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`sma_lin`], plus `Error::BufferTooSmall` if `output` is shorter
/// than `values`.
pub fn sma_lin_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "sma_lin")?;
    if values.is_empty() {
        return Ok(0);
    }

    let two = T::two();
    let mut window = TrailingWindow::new(tau, WindowBound::Closed);
    let mut left_area = values[0] * tau;
    let mut roll_area = left_area;
    output[0] = values[0];

    for i in 1..values.len() {
        roll_area = roll_area + (values[i] + values[i - 1]) / two * (times[i] - times[i - 1]);
        roll_area = roll_area - left_area;

        let left = window.advance(times, i, |j| {
            roll_area = roll_area - (values[j] + values[j + 1]) / two * (times[j + 1] - times[j]);
        });

        let width = times[left] - window.cutoff(times, i);
        left_area = if left == 0 || width == T::zero() {
            width * values[0]
        } else {
            // Interpolated value at the left edge
            let weight = width / (times[left] - times[left - 1]);
            let edge = values[left - 1] * weight + values[left] * (T::one() - weight);
            width * (edge + values[left]) / two
        };
        roll_area = roll_area + left_area;

        output[i] = roll_area / tau;
    }

    Ok(values.len())
}

/// Computes a simple moving average with the given weighting.
///
/// Dispatches to [`sma_eq`], [`sma_last`] or [`sma_lin`].
///
/// # Errors
///
/// Same as the selected variant.
///
/// # Example
///
/// ```
/// use irregular_ts::operators::{sma, Weighting};
///
/// let values = [1.0_f64, 2.0, 3.0];
/// let times = [0.0_f64, 1.0, 2.0];
/// let lin = sma(&values, &times, 2.0, Weighting::Lin).unwrap();
/// assert!((lin[2] - 2.0).abs() < 1e-10);
/// ```
pub fn sma<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    weighting: Weighting,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    sma_into(values, times, tau, weighting, &mut output)?;
    Ok(output)
}

/// Computes [`sma()`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as the selected variant's `_into` function.
pub fn sma_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    weighting: Weighting,
    output: &mut [T],
) -> Result<usize> {
    match weighting {
        Weighting::Eq => sma_eq_into(values, times, tau, output),
        Weighting::Last => sma_last_into(values, times, tau, output),
        Weighting::Lin => sma_lin_into(values, times, tau, output),
    }
}

/// Computes the equally-weighted mean over the forward window `[t, t + tau]`.
///
/// `output[i]` is the mean of every `values[j]` with
/// `times[i] <= times[j] <= times[i] + tau`. The last output always equals the
/// last value.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
///
/// # Example
///
/// ```
/// use irregular_ts::operators::sma::sma_forward;
///
/// let result = sma_forward(&[1.0_f64, 2.0, 3.0], &[0.0, 1.0, 2.0], 1.0).unwrap();
/// assert!((result[0] - 1.5).abs() < 1e-10);
/// assert!((result[2] - 3.0).abs() < 1e-10);
/// ```
pub fn sma_forward<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    sma_forward_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`sma_forward`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`sma_forward`], plus `Error::BufferTooSmall` if `output` is
/// shorter than `values`.
pub fn sma_forward_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "sma_forward")?;
    let Some(last) = values.len().checked_sub(1) else {
        return Ok(0);
    };

    let mut window = LeadingWindow::new(tau, last);
    let mut sum = T::zero();
    for i in (0..values.len()).rev() {
        sum = sum + values[i];
        let right = window.retreat(times, i, |j| sum = sum - values[j]);
        output[i] = sum / T::from_usize(right - i + 1)?;
    }

    Ok(values.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{approx_eq, EPSILON};

    const VALUES: [f64; 4] = [1.0, 2.0, 3.0, 4.0];
    const TIMES: [f64; 4] = [0.0, 1.0, 2.0, 3.0];

    fn assert_series_eq(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(approx_eq(*a, *e, EPSILON), "index {i}: {a} != {e}");
        }
    }

    #[test]
    fn test_sma_eq_regular_grid() {
        let result = sma_eq(&VALUES, &TIMES, 2.0).unwrap();
        assert_series_eq(&result, &[1.0, 1.5, 2.5, 3.5]);
    }

    #[test]
    fn test_sma_eq_irregular_gaps() {
        let values = [10.0_f64, 20.0, 30.0, 40.0];
        let times = [0.0_f64, 0.5, 4.0, 4.2];
        let result = sma_eq(&values, &times, 1.0).unwrap();
        assert_series_eq(&result, &[10.0, 15.0, 30.0, 35.0]);
    }

    #[test]
    fn test_sma_eq_excludes_observation_exactly_tau_old() {
        let result = sma_eq(&[1.0_f64, 3.0], &[0.0, 1.0], 1.0).unwrap();
        assert_series_eq(&result, &[1.0, 3.0]);
    }

    #[test]
    fn test_sma_eq_stable_matches_plain() {
        let values: Vec<f64> = (0..50).map(|i| f64::from(i).sin() * 10.0).collect();
        let times: Vec<f64> = (0..50).map(|i| f64::from(i) * 0.7 + f64::from(i % 3) * 0.1).collect();
        let plain = sma_eq(&values, &times, 3.0).unwrap();
        for refresh in [1, 3, 1000] {
            let stable = sma_eq_stable(&values, &times, 3.0, refresh).unwrap();
            for (a, b) in plain.iter().zip(&stable) {
                assert!(approx_eq(*a, *b, 1e-9));
            }
        }
    }

    #[test]
    fn test_sma_eq_stable_rejects_zero_refresh() {
        assert!(matches!(
            sma_eq_stable(&VALUES, &TIMES, 2.0, 0),
            Err(Error::InvalidParameter { name: "obs_refresh", .. })
        ));
    }

    #[test]
    fn test_sma_last_regular_grid() {
        let result = sma_last(&VALUES, &TIMES, 2.0).unwrap();
        assert_series_eq(&result, &[1.0, 1.0, 1.5, 2.5]);
    }

    #[test]
    fn test_sma_last_left_edge_inside_segment() {
        // Window [1.5, 3.5]: 1 on [1.5, 2), 2 on [2, 3), 3 on [3, 3.5]
        let result = sma_last(&[1.0_f64, 2.0, 3.0, 4.0], &[0.0, 2.0, 3.0, 3.5], 2.0).unwrap();
        assert!(approx_eq(result[3], (0.5 + 2.0 + 1.5) / 2.0, EPSILON));
    }

    #[test]
    fn test_sma_lin_regular_grid() {
        let result = sma_lin(&VALUES, &TIMES, 2.0).unwrap();
        assert_series_eq(&result, &[1.0, 1.25, 2.0, 3.0]);
    }

    #[test]
    fn test_sma_lin_interpolated_left_edge() {
        let result = sma_lin(&[0.0_f64, 4.0], &[0.0, 2.0], 1.0).unwrap();
        assert_series_eq(&result, &[0.0, 3.0]);
    }

    #[test]
    fn test_time_weighted_constant_series() {
        let values = [5.0_f64; 6];
        let times = [0.0_f64, 0.3, 1.9, 2.0, 7.5, 8.0];
        for result in [
            sma_last(&values, &times, 1.5).unwrap(),
            sma_lin(&values, &times, 1.5).unwrap(),
        ] {
            for v in result {
                assert!(approx_eq(v, 5.0, 1e-9));
            }
        }
    }

    #[test]
    fn test_sma_dispatch() {
        for (weighting, expected) in [
            (Weighting::Eq, sma_eq(&VALUES, &TIMES, 2.0).unwrap()),
            (Weighting::Last, sma_last(&VALUES, &TIMES, 2.0).unwrap()),
            (Weighting::Lin, sma_lin(&VALUES, &TIMES, 2.0).unwrap()),
        ] {
            assert_eq!(sma(&VALUES, &TIMES, 2.0, weighting).unwrap(), expected);
        }
    }

    #[test]
    fn test_sma_forward() {
        let result = sma_forward(&VALUES, &TIMES, 1.0).unwrap();
        assert_series_eq(&result, &[1.5, 2.5, 3.5, 4.0]);

        let wide = sma_forward(&VALUES, &TIMES, 10.0).unwrap();
        assert_series_eq(&wide, &[2.5, 3.0, 3.5, 4.0]);
    }

    #[test]
    fn test_empty_input() {
        let empty: [f64; 0] = [];
        assert!(sma_eq(&empty, &empty, 1.0).unwrap().is_empty());
        assert!(sma_last(&empty, &empty, 1.0).unwrap().is_empty());
        assert!(sma_lin(&empty, &empty, 1.0).unwrap().is_empty());
        assert!(sma_forward(&empty, &empty, 1.0).unwrap().is_empty());
    }

    #[test]
    fn test_into_buffer_checks() {
        let mut short = [0.0_f64; 3];
        assert!(matches!(
            sma_last_into(&VALUES, &TIMES, 2.0, &mut short),
            Err(Error::BufferTooSmall { required: 4, actual: 3, .. })
        ));

        let mut output = [0.0_f64; 6];
        assert_eq!(sma_lin_into(&VALUES, &TIMES, 2.0, &mut output).unwrap(), 4);
        assert!(approx_eq(output[3], 3.0, EPSILON));
    }

    #[test]
    fn test_sma_f32() {
        let values = [1.0_f32, 2.0, 3.0];
        let times = [0.0_f32, 1.0, 2.0];
        let result = sma_eq(&values, &times, 2.0).unwrap();
        assert!((result[2] - 2.5).abs() < 1e-6);
    }
}
