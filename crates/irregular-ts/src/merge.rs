//! Alignment utilities for the time grids of two series.
//!
//! Both inputs of every function here must be sorted in non-decreasing
//! order. Each function makes one monotone two-pointer pass, so the cost is
//! O(a.len() + b.len()).
//!
//! A `tolerance` absorbs floating-point noise between grids that are meant to
//! coincide: with `tolerance = 0` the comparisons are exact.
//!
//! # Example
//!
//! ```
//! use irregular_ts::merge::{num_leq_sorted, sorted_union};
//!
//! let a = [1.0_f64, 2.0, 5.0];
//! let b = [2.0001_f64, 3.0, 5.0002];
//!
//! assert_eq!(sorted_union(&a, &b, 0.001).unwrap(), vec![1.0, 2.0, 3.0, 5.0]);
//! assert_eq!(num_leq_sorted(&a, &b, 0.001).unwrap(), vec![0, 1, 3]);
//! ```

use crate::error::{Error, Result};
use crate::traits::{validate_output, SeriesElement};

fn validate_tolerance<T: SeriesElement>(tolerance: T) -> Result<()> {
    if tolerance.is_nan() || tolerance < T::zero() {
        return Err(Error::InvalidParameter {
            name: "tolerance",
            reason: "tolerance must be a non-negative number",
        });
    }
    Ok(())
}

fn count_sorted<T, F>(a: &[T], b: &[T], precedes: F) -> Vec<usize>
where
    T: SeriesElement,
    F: Fn(T, T) -> bool,
{
    let mut j = 0;
    a.iter()
        .map(|&x| {
            while j < b.len() && precedes(b[j], x) {
                j += 1;
            }
            j
        })
        .collect()
}

/// For each `a[i]`, counts the elements of `b` that are `<= a[i] + tolerance`.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `tolerance` is negative or NaN.
///
/// # Example
///
/// ```
/// use irregular_ts::merge::num_leq_sorted;
///
/// let counts = num_leq_sorted(&[1.0_f64, 3.0, 5.0], &[2.0, 3.0, 4.0], 0.0).unwrap();
/// assert_eq!(counts, vec![0, 2, 3]);
/// ```
pub fn num_leq_sorted<T: SeriesElement>(a: &[T], b: &[T], tolerance: T) -> Result<Vec<usize>> {
    validate_tolerance(tolerance)?;
    Ok(count_sorted(a, b, |y, x| y <= x + tolerance))
}

/// For each `a[i]`, counts the elements of `b` that are `< a[i] + tolerance`.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `tolerance` is negative or NaN.
///
/// # Example
///
/// ```
/// use irregular_ts::merge::num_less_sorted;
///
/// let counts = num_less_sorted(&[1.0_f64, 3.0, 5.0], &[2.0, 3.0, 4.0], 0.0).unwrap();
/// assert_eq!(counts, vec![0, 1, 3]);
/// ```
pub fn num_less_sorted<T: SeriesElement>(a: &[T], b: &[T], tolerance: T) -> Result<Vec<usize>> {
    validate_tolerance(tolerance)?;
    Ok(count_sorted(a, b, |y, x| y < x + tolerance))
}

/// Merges two sorted slices into their sorted, tolerance-deduplicated union.
///
/// Candidates are taken in sorted order (from `a` first on ties) and a
/// candidate is kept only if it exceeds the last kept value by more than
/// `tolerance`. Candidates are compared against the last kept value, not the
/// last candidate, so a dense run of values thins out instead of collapsing
/// to its first element.
///
/// # Errors
///
/// Returns `Error::InvalidParameter` if `tolerance` is negative or NaN.
pub fn sorted_union<T: SeriesElement>(a: &[T], b: &[T], tolerance: T) -> Result<Vec<T>> {
    let mut output = vec![T::nan(); a.len() + b.len()];
    let written = sorted_union_into(a, b, tolerance, &mut output)?;
    output.truncate(written);
    Ok(output)
}

/// Computes [`sorted_union`] into a pre-allocated buffer.
///
/// Returns the number of values written. `output` must be able to hold
/// `a.len() + b.len()` values; entries past the returned length are left
/// untouched.
///
/// # Errors
///
/// Returns an error if:
/// - `tolerance` is negative or NaN (`Error::InvalidParameter`)
/// - `output` is shorter than `a.len() + b.len()` (`Error::BufferTooSmall`)
pub fn sorted_union_into<T: SeriesElement>(
    a: &[T],
    b: &[T],
    tolerance: T,
    output: &mut [T],
) -> Result<usize> {
    validate_tolerance(tolerance)?;
    validate_output(a.len() + b.len(), output.len(), "sorted_union")?;

    let (mut i, mut j, mut written) = (0, 0, 0);
    let mut previous: Option<T> = None;
    while i < a.len() || j < b.len() {
        let candidate = if i < a.len() && (j == b.len() || a[i] <= b[j]) {
            i += 1;
            a[i - 1]
        } else {
            j += 1;
            b[j - 1]
        };

        if previous.map_or(true, |p| candidate > p + tolerance) {
            output[written] = candidate;
            previous = Some(candidate);
            written += 1;
        }
    }

    log::debug!(
        "sorted_union: {} + {} values merged into {} ({} within tolerance dropped)",
        a.len(),
        b.len(),
        written,
        a.len() + b.len() - written
    );
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_leq_and_less_differ_on_equal_elements() {
        let a = [1.0_f64, 3.0, 5.0];
        let b = [2.0_f64, 3.0, 4.0];
        assert_eq!(num_leq_sorted(&a, &b, 0.0).unwrap(), vec![0, 2, 3]);
        assert_eq!(num_less_sorted(&a, &b, 0.0).unwrap(), vec![0, 1, 3]);
    }

    #[test]
    fn test_tolerance_extends_comparison() {
        let a = [2.9995_f64];
        let b = [3.0_f64];
        assert_eq!(num_leq_sorted(&a, &b, 0.0).unwrap(), vec![0]);
        assert_eq!(num_leq_sorted(&a, &b, 0.001).unwrap(), vec![1]);
    }

    #[test]
    fn test_counts_with_empty_inputs() {
        let empty: [f64; 0] = [];
        assert!(num_leq_sorted(&empty, &[1.0], 0.0).unwrap().is_empty());
        assert_eq!(num_less_sorted(&[1.0_f64, 2.0], &empty, 0.0).unwrap(), vec![0, 0]);
    }

    #[test]
    fn test_sorted_union_example() {
        let a = [1.0_f64, 2.0, 5.0];
        let b = [2.0001_f64, 3.0, 5.0002];
        assert_eq!(sorted_union(&a, &b, 0.001).unwrap(), vec![1.0, 2.0, 3.0, 5.0]);
    }

    #[test]
    fn test_sorted_union_exact_duplicates() {
        let a = [0.0_f64, 1.0, 2.0];
        let b = [1.0_f64, 2.0, 3.0];
        assert_eq!(sorted_union(&a, &b, 0.0).unwrap(), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_sorted_union_chained_tolerance() {
        // 1.4 is dropped against the kept 1.0, and 1.8 is compared with 1.0 too
        let a = [1.0_f64, 1.4, 1.8];
        let result = sorted_union(&a, &[], 0.5).unwrap();
        assert_eq!(result, vec![1.0, 1.8]);
    }

    #[test]
    fn test_sorted_union_one_or_both_empty() {
        let empty: [f64; 0] = [];
        assert!(sorted_union(&empty, &empty, 0.0).unwrap().is_empty());
        assert_eq!(sorted_union(&empty, &[4.0, 5.0], 0.0).unwrap(), vec![4.0, 5.0]);
    }

    #[test]
    fn test_sorted_union_into_buffer() {
        let mut output = [f64::NAN; 5];
        let written = sorted_union_into(&[1.0, 3.0], &[2.0, 3.0], 0.0, &mut output).unwrap();
        assert_eq!(written, 3);
        assert_eq!(&output[..written], &[1.0, 2.0, 3.0]);

        let mut short = [0.0_f64; 3];
        assert!(matches!(
            sorted_union_into(&[1.0, 3.0], &[2.0, 3.0], 0.0, &mut short),
            Err(Error::BufferTooSmall { required: 4, actual: 3, .. })
        ));
    }

    #[test]
    fn test_rejects_bad_tolerance() {
        assert!(num_leq_sorted(&[1.0_f64], &[1.0], -0.1).is_err());
        assert!(num_less_sorted(&[1.0_f64], &[1.0], f64::NAN).is_err());
        assert!(matches!(
            sorted_union(&[1.0_f64], &[1.0], -1.0),
            Err(Error::InvalidParameter { name: "tolerance", .. })
        ));
    }
}
