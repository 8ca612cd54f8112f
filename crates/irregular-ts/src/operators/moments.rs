//! Rolling raw moments.
//!
//! The `m`-th rolling moment is the moving average of `values^m`. Values are
//! raised to the power into a call-local buffer which is then averaged with
//! [`sma_eq`](super::sma::sma_eq), [`sma_last`](super::sma::sma_last) or
//! [`sma_lin`](super::sma::sma_lin). Central moments follow from raw ones,
//! e.g. the rolling variance is `moment(2) - moment(1)^2`.
//!
//! # Example
//!
//! ```
//! use irregular_ts::operators::moments::rolling_moment_eq;
//!
//! let values = [1.0_f64, 2.0, 3.0];
//! let times = [0.0_f64, 1.0, 2.0];
//! let second = rolling_moment_eq(&values, &times, 2.0, 2.0).unwrap();
//! assert!((second[2] - 6.5).abs() < 1e-10); // (4 + 9) / 2
//! ```

use crate::error::{Error, Result};
use crate::operators::sma::{sma_eq_into, sma_last_into, sma_lin_into};
use crate::operators::Weighting;
use crate::traits::{validate_output, validate_series, SeriesElement};

fn powered<T: SeriesElement>(values: &[T], m: T) -> Result<Vec<T>> {
    if m.is_nan() || m < T::zero() {
        return Err(Error::InvalidParameter {
            name: "m",
            reason: "moment order must be non-negative",
        });
    }
    Ok(values.iter().map(|&v| v.powf(m)).collect())
}

/// Computes the `m`-th rolling moment with equal weighting.
///
/// # Errors
///
/// Returns an error if:
/// - `m` is negative or NaN (`Error::InvalidParameter`)
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
pub fn rolling_moment_eq<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    m: T,
) -> Result<Vec<T>> {
    rolling_moment(values, times, tau, m, Weighting::Eq)
}

/// Computes the `m`-th rolling moment of the step interpolant.
///
/// # Errors
///
/// Same as [`rolling_moment_eq`].
pub fn rolling_moment_last<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    m: T,
) -> Result<Vec<T>> {
    rolling_moment(values, times, tau, m, Weighting::Last)
}

/// Computes the `m`-th rolling moment of the linear interpolant.
///
/// Note that this averages the interpolant of `values^m`, not the `m`-th
/// power of the interpolant of `values`.
///
/// # Errors
///
/// Same as [`rolling_moment_eq`].
pub fn rolling_moment_lin<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    m: T,
) -> Result<Vec<T>> {
    rolling_moment(values, times, tau, m, Weighting::Lin)
}

/// Computes the `m`-th rolling moment with the given weighting.
///
/// # Errors
///
/// Same as [`rolling_moment_eq`].
///
/// # Example
///
/// ```
/// use irregular_ts::operators::{rolling_moment, Weighting};
///
/// let values = [2.0_f64, 2.0, 2.0];
/// let times = [0.0_f64, 0.4, 3.0];
/// let cubed = rolling_moment(&values, &times, 1.0, 3.0, Weighting::Last).unwrap();
/// assert!(cubed.iter().all(|v| (v - 8.0).abs() < 1e-10));
/// ```
pub fn rolling_moment<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    m: T,
    weighting: Weighting,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    rolling_moment_into(values, times, tau, m, weighting, &mut output)?;
    Ok(output)
}

/// Computes [`rolling_moment`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`rolling_moment_eq`], plus `Error::BufferTooSmall` if `output`
/// is shorter than `values`.
pub fn rolling_moment_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    m: T,
    weighting: Weighting,
    output: &mut [T],
) -> Result<usize> {
    validate_series(values, times, "rolling_moment")?;
    validate_output(values.len(), output.len(), "rolling_moment")?;
    let powered = powered(values, m)?;

    match weighting {
        Weighting::Eq => sma_eq_into(&powered, times, tau, output),
        Weighting::Last => sma_last_into(&powered, times, tau, output),
        Weighting::Lin => sma_lin_into(&powered, times, tau, output),
    }
}
