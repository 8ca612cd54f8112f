//! Core traits for irregular-ts numeric operations.
//!
//! This module defines the traits used throughout the library for generic
//! numeric operations on unevenly-spaced series.
//!
//! # Overview
//!
//! The primary trait is [`SeriesElement`], which abstracts over `f32` and `f64`
//! for both observation values and observation times. The module also provides
//! the precondition checks every operator runs before touching its input:
//! [`validate_window`], [`validate_series`] and [`validate_output`], plus the
//! caller-side [`ValidatedInput::validate_strictly_increasing`] check that the
//! operators themselves never perform.
//!
//! # Example
//!
//! ```
//! use irregular_ts::traits::{validate_series, validate_window, SeriesElement};
//!
//! fn window_mean<T: SeriesElement>(values: &[T], times: &[T], tau: T) -> irregular_ts::Result<T> {
//!     validate_window(tau)?;
//!     validate_series(values, times, "window_mean")?;
//!
//!     let cutoff = times[times.len() - 1] - tau;
//!     let (sum, count) = values
//!         .iter()
//!         .zip(times)
//!         .filter(|&(_, &t)| t > cutoff)
//!         .fold((T::zero(), 0usize), |(s, c), (&v, _)| (s + v, c + 1));
//!     Ok(sum / T::from_usize(count)?)
//! }
//!
//! let mean = window_mean(&[1.0_f64, 2.0, 3.0], &[0.0, 1.0, 2.0], 1.5).unwrap();
//! assert!((mean - 2.5).abs() < 1e-10);
//! ```

use num_traits::{Float, NumCast};

use crate::error::{Error, Result};

/// A trait for types that can be used as values and times of a series.
///
/// This trait provides a common interface for numeric operations on series
/// data, abstracting over `f32` and `f64` types.
///
/// # Type Bounds
///
/// The trait requires:
/// - `Float`: Standard floating-point operations (NaN handling, `exp`, `powf`)
/// - `NumCast`: Safe conversion between numeric types
/// - `Copy`: Values can be copied (required for efficient iteration)
/// - `Default`: A default value exists (typically zero)
/// - `Send + Sync`: Series can be processed from worker threads
pub trait SeriesElement: Float + NumCast + Copy + Default + Send + Sync + 'static {
    /// Creates a series element from a `usize` value.
    ///
    /// This is commonly used for converting observation counts to the series
    /// element type.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_usize(value: usize) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "usize to series element",
        })
    }

    /// Creates a series element from an `f64` value.
    ///
    /// # Errors
    ///
    /// Returns `Error::NumericConversion` if the value cannot be represented in this type.
    #[inline]
    fn from_f64(value: f64) -> Result<Self> {
        <Self as NumCast>::from(value).ok_or(Error::NumericConversion {
            context: "f64 to series element",
        })
    }

    /// Returns the constant 2 as this type.
    ///
    /// Used for trapezoid areas and mid-rank tie handling.
    #[inline]
    #[must_use]
    fn two() -> Self {
        Self::one() + Self::one()
    }

    /// Returns the constant 0.5 as this type.
    #[inline]
    #[must_use]
    fn half() -> Self {
        Self::one() / Self::two()
    }

    /// Lossy conversion to `f64` for diagnostics and error reporting.
    #[inline]
    #[must_use]
    fn to_f64_lossy(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }
}

// Blanket implementation for all types that satisfy the bounds
impl<T: Float + NumCast + Copy + Default + Send + Sync + 'static> SeriesElement for T {}

/// Trait for validating a series before handing it to an operator.
///
/// Implemented for slices and vectors of [`SeriesElement`].
pub trait ValidatedInput {
    /// The element type of the series.
    type Element: SeriesElement;

    /// Returns the series as a slice.
    fn as_series(&self) -> &[Self::Element];

    /// Returns the length of the series.
    #[inline]
    #[must_use]
    fn series_len(&self) -> usize {
        self.as_series().len()
    }

    /// Validates that `times` holds exactly one observation time per value.
    ///
    /// # Errors
    ///
    /// Returns `Error::LengthMismatch` if the lengths differ.
    #[inline]
    fn validate_paired_with(&self, times: &[Self::Element], operator: &'static str) -> Result<()> {
        let values = self.series_len();
        if values == times.len() {
            Ok(())
        } else {
            Err(Error::LengthMismatch {
                values,
                times: times.len(),
                operator,
            })
        }
    }

    /// Validates that the series is strictly increasing.
    ///
    /// The operators assume strictly increasing observation times but never
    /// check it themselves; callers that receive times from untrusted sources
    /// run this once before calling them.
    ///
    /// # Errors
    ///
    /// Returns `Error::NonIncreasingTimes` with the index of the first element
    /// that is not greater than its predecessor (NaN counts as a violation).
    fn validate_strictly_increasing(&self) -> Result<()> {
        let series = self.as_series();
        match series.windows(2).position(|w| !(w[1] > w[0])) {
            Some(pos) => Err(Error::NonIncreasingTimes { index: pos + 1 }),
            None => Ok(()),
        }
    }
}

impl<T: SeriesElement> ValidatedInput for [T] {
    type Element = T;

    #[inline]
    fn as_series(&self) -> &[T] {
        self
    }
}

impl<T: SeriesElement> ValidatedInput for Vec<T> {
    type Element = T;

    #[inline]
    fn as_series(&self) -> &[T] {
        self
    }
}

/// Validates that a window width is usable.
///
/// # Errors
///
/// Returns `Error::InvalidWindow` if `tau` is not strictly positive or not finite.
#[inline]
pub fn validate_window<T: SeriesElement>(tau: T) -> Result<()> {
    if !tau.is_finite() {
        return Err(Error::InvalidWindow {
            tau: tau.to_f64_lossy(),
            reason: "window width must be finite",
        });
    }
    if tau <= T::zero() {
        return Err(Error::InvalidWindow {
            tau: tau.to_f64_lossy(),
            reason: "window width must be positive",
        });
    }
    Ok(())
}

/// Validates that `values` and `times` describe the same observations.
///
/// # Errors
///
/// Returns `Error::LengthMismatch` if the slices differ in length.
#[inline]
pub fn validate_series<T: SeriesElement>(
    values: &[T],
    times: &[T],
    operator: &'static str,
) -> Result<()> {
    values.validate_paired_with(times, operator)
}

/// Validates that an output buffer can hold `required` elements.
///
/// # Errors
///
/// Returns `Error::BufferTooSmall` if `actual < required`.
#[inline]
pub const fn validate_output(required: usize, actual: usize, operator: &'static str) -> Result<()> {
    if actual < required {
        Err(Error::BufferTooSmall {
            required,
            actual,
            operator,
        })
    } else {
        Ok(())
    }
}

/// Runs the checks shared by every rolling operator: window width, paired
/// lengths and output capacity.
///
/// # Errors
///
/// Returns the first failing check's error.
#[inline]
pub fn validate_operator_input<T: SeriesElement>(
    values: &[T],
    times: &[T],
    tau: T,
    output_len: usize,
    operator: &'static str,
) -> Result<()> {
    validate_window(tau)?;
    validate_series(values, times, operator)?;
    validate_output(values.len(), output_len, operator)
}
