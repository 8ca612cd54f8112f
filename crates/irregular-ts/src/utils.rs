//! Numeric helpers shared by the operators.
//!
//! Rolling integrals are updated incrementally, so their results can differ
//! from a from-scratch computation in the last few bits. [`approx_eq`] and
//! [`approx_eq_relative`] are the comparisons the test suites use for them.
//!
//! # Example
//!
//! ```
//! use irregular_ts::utils::{approx_eq, EPSILON};
//!
//! let third = 1.0_f64 / 3.0;
//! assert!(approx_eq(third * 3.0, 1.0, EPSILON));
//! ```

use crate::traits::SeriesElement;

/// Default absolute tolerance for comparing operator outputs.
pub const EPSILON: f64 = 1e-10;

/// Absolute comparison with a tolerance. Two NaNs compare equal, since NaN
/// is the operators' "no value" marker.
///
/// ```
/// use irregular_ts::utils::approx_eq;
///
/// assert!(approx_eq(2.5_f64, 2.5 + 1e-12, 1e-10));
/// assert!(approx_eq(f64::NAN, f64::NAN, 1e-10));
/// assert!(!approx_eq(f64::NAN, 0.0, 1e-10));
/// ```
#[inline]
#[must_use]
pub fn approx_eq<T: SeriesElement>(a: T, b: T, tolerance: T) -> bool {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => true,
        (false, false) => (a - b).abs() < tolerance,
        _ => false,
    }
}

/// Relative comparison: `|a - b|` measured against the larger magnitude.
///
/// Zero only matches zero. NaNs behave as in [`approx_eq`].
///
/// ```
/// use irregular_ts::utils::approx_eq_relative;
///
/// assert!(approx_eq_relative(3.0e12_f64, 3.0e12 + 1.0, 1e-9));
/// assert!(!approx_eq_relative(0.0_f64, 1e-300, 1e-9));
/// ```
#[inline]
#[must_use]
pub fn approx_eq_relative<T: SeriesElement>(a: T, b: T, rel_tolerance: T) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    let scale = a.abs().max(b.abs());
    if scale == T::zero() {
        return true;
    }
    (a - b).abs() / scale < rel_tolerance
}

/// Mean of a slice computed as the sum of `value / n`.
///
/// Slower than summing first, but the partial sums stay on the scale of the
/// mean instead of growing with the slice length. Returns NaN for an empty
/// slice.
///
/// # Example
///
/// ```
/// use irregular_ts::utils::stable_mean;
///
/// assert!((stable_mean(&[1.0_f64, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
/// assert!(stable_mean::<f64>(&[]).is_nan());
/// ```
#[must_use]
pub fn stable_mean<T: SeriesElement>(values: &[T]) -> T {
    if values.is_empty() {
        return T::nan();
    }
    let Ok(n) = T::from_usize(values.len()) else {
        return T::nan();
    };
    values.iter().fold(T::zero(), |acc, &v| acc + v / n)
}

/// Smallest element of a slice, NaN for an empty slice.
///
/// NaN elements are skipped unless every element is NaN.
#[inline]
#[must_use]
pub fn slice_min<T: SeriesElement>(values: &[T]) -> T {
    values.iter().fold(T::nan(), |acc, &v| acc.min(v))
}
