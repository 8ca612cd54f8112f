//! Exponential moving averages for unevenly-spaced series.
//!
//! The decay between two observations depends on the elapsed time rather than
//! on the number of observations: the previous average is weighted by
//!
//! ```text
//! w = exp(-(t[i] - t[i-1]) / tau)
//! ```
//!
//! # Variants
//!
//! ```text
//! eq:   out[i] = out[i-1] * w + v[i] * (1 - w)
//! last: out[i] = out[i-1] * w + v[i-1] * (1 - w)
//! lin:  out[i] = out[i-1] * w + v[i] * (1 - w2) + v[i-1] * (w2 - w)
//!       w2 = (1 - w) / x, x = (t[i] - t[i-1]) / tau
//! ```
//!
//! `eq` treats each observation as a point mass, `last` integrates the step
//! interpolant and `lin` integrates the linear interpolant exactly. For tiny
//! `x` the `lin` weight `(1 - w) / x` cancels catastrophically and is replaced
//! by its Taylor expansion.
//!
//! Every variant is seeded by a caller-supplied initial value at index 0.
//!
//! # Example
//!
//! ```
//! use irregular_ts::operators::ema::ema_eq;
//!
//! let values = [1.0_f64, 1.0, 1.0];
//! let times = [0.0_f64, 0.5, 3.0];
//! let result = ema_eq(&values, &times, 1.0, 0.0).unwrap();
//!
//! assert_eq!(result[0], 0.0); // seed
//! assert!(result[1] > 0.0 && result[1] < result[2]);
//! ```

use crate::error::Result;
use crate::operators::Weighting;
use crate::traits::{validate_operator_input, SeriesElement};

/// Below this `dt / tau` the linear-interpolation weight uses its Taylor
/// expansion.
const TAYLOR_THRESHOLD: f64 = 1e-6;

#[inline]
fn decay<T: SeriesElement>(dt: T, tau: T) -> T {
    (-dt / tau).exp()
}

/// `(1 - exp(-x)) / x`, switching to `1 - x/2 + x^2/6 - x^3/24` for small `x`.
#[inline]
fn lin_weight<T: SeriesElement>(x: T, w: T) -> Result<T> {
    if x > T::from_f64(TAYLOR_THRESHOLD)? {
        Ok((T::one() - w) / x)
    } else {
        let x2 = x * x;
        Ok(T::one() - x / T::two() + x2 / T::from_f64(6.0)? - x2 * x / T::from_f64(24.0)?)
    }
}

/// Computes the EMA treating each observation as a point mass.
///
/// # Arguments
///
/// * `values` - Observed values
/// * `times` - Strictly increasing observation times
/// * `tau` - Decay time constant
/// * `initial_value` - Value of the average at index 0
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
/// use irregular_ts::operators::ema::ema_eq;
///
/// let result = ema_eq(&[0.0_f64, 2.0], &[0.0, 1.0], 1.0, 0.0).unwrap();
/// let w = (-1.0_f64).exp();
/// assert!((result[1] - 2.0 * (1.0 - w)).abs() < 1e-12);
/// ```
pub fn ema_eq<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    initial_value: T,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    ema_eq_into(values, times, tau, initial_value, &mut output)?;
    Ok(output)
}

/// Computes [`ema_eq`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`ema_eq`], plus `Error::BufferTooSmall` if `output` is shorter
/// than `values`.
pub fn ema_eq_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    initial_value: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "ema_eq")?;
    if values.is_empty() {
        return Ok(0);
    }

    output[0] = initial_value;
    for i in 1..values.len() {
        let w = decay(times[i] - times[i - 1], tau);
        output[i] = output[i - 1] * w + values[i] * (T::one() - w);
    }

    Ok(values.len())
}

/// Computes the EMA of the step interpolant.
///
/// The value observed at `times[i - 1]` is held until `times[i]`, so the
/// newest observation only enters the average at the next step.
///
/// # Errors
///
/// Returns an error if:
/// - `tau` is not finite and positive (`Error::InvalidWindow`)
/// - `values` and `times` differ in length (`Error::LengthMismatch`)
pub fn ema_last<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    initial_value: T,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    ema_last_into(values, times, tau, initial_value, &mut output)?;
    Ok(output)
}

/// Computes [`ema_last`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`ema_last`], plus `Error::BufferTooSmall` if `output` is shorter
/// than `values`.
pub fn ema_last_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    initial_value: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "ema_last")?;
    if values.is_empty() {
        return Ok(0);
    }

    output[0] = initial_value;
    for i in 1..values.len() {
        let w = decay(times[i] - times[i - 1], tau);
        output[i] = output[i - 1] * w + values[i - 1] * (T::one() - w);
    }

    Ok(values.len())
}

/// Computes the EMA of the linear interpolant.
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
/// use irregular_ts::operators::ema::ema_lin;
///
/// // Weights sum to one, so a constant series stays constant
/// let result = ema_lin(&[3.0_f64; 4], &[0.0, 1e-9, 0.5, 4.0], 1.0, 3.0).unwrap();
/// assert!(result.iter().all(|v| (v - 3.0).abs() < 1e-12));
/// ```
pub fn ema_lin<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    initial_value: T,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    ema_lin_into(values, times, tau, initial_value, &mut output)?;
    Ok(output)
}

/// Computes [`ema_lin`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`ema_lin`], plus `Error::BufferTooSmall` if `output` is shorter
/// than `values`.
pub fn ema_lin_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    initial_value: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "ema_lin")?;
    if values.is_empty() {
        return Ok(0);
    }

    output[0] = initial_value;
    for i in 1..values.len() {
        let x = (times[i] - times[i - 1]) / tau;
        let w = (-x).exp();
        let w2 = lin_weight(x, w)?;
        output[i] = output[i - 1] * w + values[i] * (T::one() - w2) + values[i - 1] * (w2 - w);
    }

    Ok(values.len())
}

/// Computes an exponential moving average with the given weighting.
///
/// Dispatches to [`ema_eq`], [`ema_last`] or [`ema_lin`].
///
/// # Errors
///
/// Same as the selected variant.
pub fn ema<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    initial_value: T,
    weighting: Weighting,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    ema_into(values, times, tau, initial_value, weighting, &mut output)?;
    Ok(output)
}

/// Computes [`ema()`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as the selected variant's `_into` function.
pub fn ema_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    initial_value: T,
    weighting: Weighting,
    output: &mut [T],
) -> Result<usize> {
    match weighting {
        Weighting::Eq => ema_eq_into(values, times, tau, initial_value, output),
        Weighting::Last => ema_last_into(values, times, tau, initial_value, output),
        Weighting::Lin => ema_lin_into(values, times, tau, initial_value, output),
    }
}

/// Computes an equally-weighted EMA running backwards in time.
///
/// The recursion is seeded with `last_value` at the last index and runs
/// towards the front:
///
/// ```text
/// out[i] = out[i+1] * w + v[i] * (1 - w),  w = exp(-(t[i+1] - t[i]) / tau)
/// ```
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
/// use irregular_ts::operators::ema::ema_forward;
///
/// let result = ema_forward(&[5.0_f64, 1.0, 1.0], &[0.0, 1.0, 2.0], 1e-9, 0.0).unwrap();
/// assert_eq!(result[2], 0.0);
/// assert!((result[0] - 5.0).abs() < 1e-12);
/// ```
pub fn ema_forward<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    last_value: T,
) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); values.len()];
    ema_forward_into(values, times, tau, last_value, &mut output)?;
    Ok(output)
}

/// Computes [`ema_forward`] into a pre-allocated buffer.
///
/// # Errors
///
/// Same as [`ema_forward`], plus `Error::BufferTooSmall` if `output` is
/// shorter than `values`.
pub fn ema_forward_into<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    last_value: T,
    output: &mut [T],
) -> Result<usize> {
    validate_operator_input(values, times, tau, output.len(), "ema_forward")?;
    let Some(last) = values.len().checked_sub(1) else {
        return Ok(0);
    };

    output[last] = last_value;
    for i in (0..last).rev() {
        let w = decay(times[i + 1] - times[i], tau);
        output[i] = output[i + 1] * w + values[i] * (T::one() - w);
    }

    Ok(values.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::utils::{approx_eq, EPSILON};

    const VALUES: [f64; 5] = [2.0, 4.0, 3.0, 8.0, 1.0];
    const TIMES: [f64; 5] = [0.0, 0.5, 2.0, 2.1, 6.0];

    #[test]
    fn test_ema_eq_recursion() {
        let result = ema_eq(&VALUES, &TIMES, 1.5, 2.0).unwrap();
        let mut expected = 2.0;
        assert_eq!(result[0], expected);
        for i in 1..VALUES.len() {
            let w = (-(TIMES[i] - TIMES[i - 1]) / 1.5).exp();
            expected = expected * w + VALUES[i] * (1.0 - w);
            assert!(approx_eq(result[i], expected, EPSILON));
        }
    }

    #[test]
    fn test_ema_last_lags_one_observation() {
        let result = ema_last(&[0.0_f64, 10.0], &[0.0, 1.0], 1.0, 0.0).unwrap();
        assert_eq!(result[1], 0.0);

        let result = ema_last(&[10.0_f64, 0.0], &[0.0, 1.0], 1.0, 0.0).unwrap();
        assert!(approx_eq(result[1], 10.0 * (1.0 - (-1.0_f64).exp()), EPSILON));
    }

    #[test]
    fn test_ema_lin_between_eq_and_last() {
        // Rising series: eq overshoots towards the new value, last lags behind
        let values = [0.0_f64, 10.0];
        let times = [0.0_f64, 1.0];
        let eq = ema_eq(&values, &times, 1.0, 0.0).unwrap();
        let last = ema_last(&values, &times, 1.0, 0.0).unwrap();
        let lin = ema_lin(&values, &times, 1.0, 0.0).unwrap();
        assert!(last[1] < lin[1] && lin[1] < eq[1]);

        // Exact integral of exp(-(1 - s)) * 10 s over [0, 1] is 10 / e
        assert!(approx_eq(lin[1], 10.0 / std::f64::consts::E, 1e-12));
    }

    #[test]
    fn test_lin_weight_taylor_branch_is_continuous() {
        let exact = |x: f64| -(-x).exp_m1() / x;
        for x in [1e-9_f64, 1e-7, 9.9e-7, 1e-6, 1.1e-6, 1e-3] {
            let w2 = lin_weight(x, (-x).exp()).unwrap();
            assert!(approx_eq(w2, exact(x), 1e-9), "x = {x}");
        }
    }

    #[test]
    fn test_ema_small_tau_tracks_observations() {
        let result = ema_eq(&VALUES, &TIMES, 1e-9, -100.0).unwrap();
        assert_eq!(result[0], -100.0);
        for i in 1..VALUES.len() {
            assert!(approx_eq(result[i], VALUES[i], EPSILON));
        }
    }

    #[test]
    fn test_ema_large_tau_keeps_seed() {
        for weighting in [Weighting::Eq, Weighting::Last, Weighting::Lin] {
            let result = ema(&VALUES, &TIMES, 1e12, 7.0, weighting).unwrap();
            for v in result {
                assert!(approx_eq(v, 7.0, 1e-9));
            }
        }
    }

    #[test]
    fn test_ema_forward() {
        let result = ema_forward(&VALUES, &TIMES, 2.0, 0.5).unwrap();
        let n = VALUES.len();
        assert_eq!(result[n - 1], 0.5);
        let mut expected = 0.5;
        for i in (0..n - 1).rev() {
            let w = (-(TIMES[i + 1] - TIMES[i]) / 2.0).exp();
            expected = expected * w + VALUES[i] * (1.0 - w);
            assert!(approx_eq(result[i], expected, EPSILON));
        }
    }

    #[test]
    fn test_ema_empty_and_single() {
        let empty: [f64; 0] = [];
        assert!(ema_eq(&empty, &empty, 1.0, 0.0).unwrap().is_empty());
        assert!(ema_forward(&empty, &empty, 1.0, 0.0).unwrap().is_empty());
        assert_eq!(ema_lin(&[9.0_f64], &[3.0], 1.0, 4.0).unwrap(), vec![4.0]);
    }

    #[test]
    fn test_ema_rejects_bad_tau() {
        assert!(matches!(
            ema_eq(&VALUES, &TIMES, 0.0, 0.0),
            Err(Error::InvalidWindow { .. })
        ));
        assert!(matches!(
            ema_forward(&VALUES, &TIMES, f64::INFINITY, 0.0),
            Err(Error::InvalidWindow { .. })
        ));
    }
}
