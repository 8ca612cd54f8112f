//! Linear-time order statistic selection (quickselect).
//!
//! Selects the k-th smallest element of a slice in expected O(n) time by
//! repeatedly partitioning around a median-of-three pivot taken from the first,
//! middle and last element of the active range. No allocation happens inside
//! [`select_nth_in_place`]; [`select_nth`] wraps it with a scratch copy so the
//! caller's data is left untouched.
//!
//! # Example
//!
//! ```
//! use irregular_ts::kernels::select::{select_nth, select_nth_in_place};
//!
//! let data = [9.0_f64, 1.0, 8.0, 2.0, 7.0];
//! assert_eq!(select_nth(&data, 2).unwrap(), 7.0);
//! assert_eq!(data[0], 9.0); // untouched
//!
//! let mut scratch = data;
//! assert_eq!(select_nth_in_place(&mut scratch, 0), 1.0);
//! ```

use crate::error::{Error, Result};
use crate::traits::SeriesElement;

/// Returns the `k`-th smallest element (0-based) of `values`, rearranging the
/// slice in place.
///
/// On return `values[k]` holds the result, every element before position `k`
/// is `<=` it and every element after position `k` is `>=` it. The rolling
/// median relies on the second half of this guarantee.
///
/// # Panics
///
/// Panics if `k >= values.len()`.
///
/// # Performance
///
/// - Expected time: O(n)
/// - Space: O(1)
pub fn select_nth_in_place<T: SeriesElement>(values: &mut [T], k: usize) -> T {
    assert!(
        k < values.len(),
        "order statistic {k} out of range for {} elements",
        values.len()
    );

    let mut left = 0usize;
    let mut right = values.len() - 1;

    loop {
        if right <= left + 1 {
            // One or two elements left in the active range
            if right == left + 1 && values[right] < values[left] {
                values.swap(left, right);
            }
            return values[k];
        }

        // Median of three: afterwards values[left] <= values[left + 1] <= values[right],
        // and both ends act as sentinels for the scans below.
        let mid = left + (right - left) / 2;
        values.swap(mid, left + 1);
        if values[left] > values[right] {
            values.swap(left, right);
        }
        if values[left + 1] > values[right] {
            values.swap(left + 1, right);
        }
        if values[left] > values[left + 1] {
            values.swap(left, left + 1);
        }

        let pivot = values[left + 1];
        let mut i = left + 1;
        let mut j = right;
        loop {
            i += 1;
            while values[i] < pivot {
                i += 1;
            }
            j -= 1;
            while values[j] > pivot {
                j -= 1;
            }
            if j < i {
                break;
            }
            values.swap(i, j);
        }
        values[left + 1] = values[j];
        values[j] = pivot;

        // j >= left + 1, so j - 1 cannot underflow
        if j >= k {
            right = j - 1;
        }
        if j <= k {
            left = i;
        }
    }
}

/// Returns the `k`-th smallest element (0-based) of `values` without
/// modifying it.
///
/// Copies the input into a call-local scratch buffer and runs
/// [`select_nth_in_place`] on the copy.
///
/// # Errors
///
/// Returns `Error::IndexOutOfRange` if `k >= values.len()`.
///
/// # Example
///
/// ```
/// use irregular_ts::kernels::select::select_nth;
///
/// let data = vec![3.0_f64, 1.0, 2.0];
/// assert_eq!(select_nth(&data, 1).unwrap(), 2.0);
/// assert!(select_nth(&data, 3).is_err());
/// ```
pub fn select_nth<T: SeriesElement>(values: &[T], k: usize) -> Result<T> {
    if k >= values.len() {
        return Err(Error::IndexOutOfRange {
            index: k,
            len: values.len(),
        });
    }
    let mut scratch = values.to_vec();
    Ok(select_nth_in_place(&mut scratch, k))
}

/// Median of `scratch`, rearranging it in place.
///
/// For an odd length this is the middle order statistic. For an even length
/// it is the mean of the lower-middle order statistic and the smallest element
/// above it. Returns NaN for an empty slice.
pub fn median_in_place<T: SeriesElement>(scratch: &mut [T]) -> T {
    let len = scratch.len();
    if len == 0 {
        return T::nan();
    }
    let k_low = (len - 1) / 2;
    let k_high = len - k_low - 1;
    let low = select_nth_in_place(scratch, k_low);
    if k_low < k_high {
        let high = crate::utils::slice_min(&scratch[k_high..]);
        (low + high) / T::two()
    } else {
        low
    }
}
