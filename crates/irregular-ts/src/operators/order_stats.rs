//! Rolling order statistics: median, quantile and rank.
//!
//! All operators here cost O(window) per observation. The median selects
//! from a copy of the window with [`median_in_place`]; quantiles and ranks
//! compare the current value against every earlier observation in the window.
//!
//! # Ties
//!
//! Earlier observations equal to the current value count half, so a value
//! equal to everything in its window sits in the middle of the distribution.
//!
//! # Boundaries
//!
//! | operator | window |
//! |---|---|
//! | [`rolling_median`], [`rolling_quantile_eq`] | `(t - tau, t]` |
//! | [`rolling_rank`], [`rolling_quantile_time_weighted`] | `[t - tau, t]` |

use crate::error::Result;
use crate::kernels::select::median_in_place;
use crate::kernels::window::{TrailingWindow, WindowBound};
use crate::traits::{validate_operator_input, SeriesElement};

/// Counts the elements of `window` strictly greater than and equal to `pivot`.
#[inline]
fn tally<T: SeriesElement>(window: &[T], pivot: T) -> (usize, usize) {
    window.iter().fold((0, 0), |(larger, equal), &v| {
        if v > pivot {
            (larger + 1, equal)
        } else if v == pivot {
            (larger, equal + 1)
        } else {
            (larger, equal)
        }
    })
}

/// Computes the median of the values in the trailing window `(t - tau, t]`.
///
/// For an even number of observations the median is the mean of the two
/// middle values.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
///
/// # Performance
///
/// - Time complexity: expected O(window) per observation
/// - Space complexity: one scratch buffer of the largest window size
///
/// # Example
///
/// ```
/// use irregular_ts::operators::order_stats::rolling_median;
///
/// let values = [5.0_f64, 3.0, 1.0, 4.0, 2.0];
/// let times = [0.0_f64, 1.0, 2.0, 3.0, 4.0];
/// let result = rolling_median(&values, &times, 2.5).unwrap();
/// assert_eq!(result[4], 2.0); // median of {1, 4, 2}
/// ```
pub fn rolling_median<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    rolling_median_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`rolling_median`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`rolling_median`], plus `Error::BufferTooSmall` if `output` is
/// shorter than `values`.
pub fn rolling_median_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "rolling_median")?;

    let mut window = TrailingWindow::new(tau, WindowBound::Open);
    let mut scratch = Vec::new();
    for i in 0..values.len() {
        let left = window.advance(times, i, |_| {});
        scratch.clear();
        scratch.extend_from_slice(&values[left..=i]);
        output[i] = median_in_place(&mut scratch);
    }

    Ok(values.len())
}

/// Computes the empirical quantile of each value within its trailing window.
///
/// Over the earlier observations in `(t - tau, t]`,
///
/// ```text
/// quantile = 1 - (larger + 0.5 * equal) / preceding
/// ```
///
/// where `larger` and `equal` count earlier values strictly greater than and
/// equal to the current one. The result is 1.0 when no earlier observation is
/// in the window, which always holds at index 0.
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
/// use irregular_ts::operators::order_stats::rolling_quantile_eq;
///
/// let result = rolling_quantile_eq(&[1.0_f64, 3.0, 2.0], &[0.0, 1.0, 2.0], 10.0).unwrap();
/// assert_eq!(result, vec![1.0, 1.0, 0.5]);
/// ```
pub fn rolling_quantile_eq<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    rolling_quantile_eq_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`rolling_quantile_eq`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`rolling_quantile_eq`], plus `Error::BufferTooSmall` if `output`
/// is shorter than `values`.
pub fn rolling_quantile_eq_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "rolling_quantile_eq")?;

    let mut window = TrailingWindow::new(tau, WindowBound::Open);
    for i in 0..values.len() {
        let left = window.advance(times, i, |_| {});
        let preceding = i - left;
        output[i] = if preceding == 0 {
            T::one()
        } else {
            let (larger, equal) = tally(&values[left..i], values[i]);
            let weight = T::from_usize(larger)? + T::from_usize(equal)? * T::half();
            T::one() - weight / T::from_usize(preceding)?
        };
    }

    Ok(values.len())
}

/// Computes the rank of each value within its trailing window `[t - tau, t]`.
///
/// ```text
/// rank = (preceding + 1) - (larger + 0.5 * equal)
/// ```
///
/// so the largest value of a window of `k` observations has rank `k` and the
/// smallest has rank 1. Earlier observations equal to the current value count
/// half.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
pub fn rolling_rank<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    rolling_rank_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`rolling_rank`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`rolling_rank`], plus `Error::BufferTooSmall` if `output` is
/// shorter than `values`.
pub fn rolling_rank_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "rolling_rank")?;

    let mut window = TrailingWindow::new(tau, WindowBound::Closed);
    for i in 0..values.len() {
        let left = window.advance(times, i, |_| {});
        let (larger, equal) = tally(&values[left..i], values[i]);
        let weight = T::from_usize(larger)? + T::from_usize(equal)? * T::half();
        output[i] = T::from_usize(window.len_at(i))? - weight;
    }

    Ok(values.len())
}

/// Computes the time-weighted quantile of each value within `[t - tau, t]`.
///
/// Each earlier observation's value is held until the next observation. The
/// result is one minus the fraction of the window during which the held value
/// was strictly greater than the current value, with time spent at an equal
/// value counting half. The window starts no earlier than the first
/// observation, and the value held across the left edge is included for the
/// part of its interval inside the window. Index 0 yields 1.0.
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
/// use irregular_ts::operators::order_stats::rolling_quantile_time_weighted;
///
/// // 1.0 holds on [0, 1), 3.0 on [1, 2): the current 2.0 is exceeded half the time
/// let result = rolling_quantile_time_weighted(&[1.0_f64, 3.0, 2.0], &[0.0, 1.0, 2.0], 10.0).unwrap();
/// assert!((result[2] - 0.5).abs() < 1e-12);
/// ```
pub fn rolling_quantile_time_weighted<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    rolling_quantile_time_weighted_into(values, times, tau, &mut output)?;
    Ok(output)
}

/// Computes [`rolling_quantile_time_weighted`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`rolling_quantile_time_weighted`], plus `Error::BufferTooSmall`
/// if `output` is shorter than `values`.
pub fn rolling_quantile_time_weighted_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(
        values,
        times,
        tau,
        output.len(),
        "rolling_quantile_time_weighted",
    )?;
    if values.is_empty() {
        return Ok(0);
    }

    let mut window = TrailingWindow::new(tau, WindowBound::Closed);
    output[0] = T::one();
    for i in 1..values.len() {
        let left = window.advance(times, i, |_| {});
        let cutoff = window.cutoff(times, i);
        let current = values[i];

        let mut weight = T::zero();
        for j in left.saturating_sub(1)..i {
            let held = times[j + 1] - times[j].max(cutoff);
            if values[j] > current {
                weight = weight + held;
            } else if values[j] == current {
                weight = weight + held * T::half();
            }
        }

        let span = times[i] - times[0].max(cutoff);
        output[i] = T::one() - weight / span;
    }

    Ok(values.len())
}
