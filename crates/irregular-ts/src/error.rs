//! Error types for irregular-ts.
//!
//! This module defines the error types returned by the operators when a call
//! violates one of their preconditions.

use thiserror::Error;

/// The main error type for irregular-ts operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The value and time slices have different lengths.
    ///
    /// Every operator pairs `values[i]` with `times[i]`, so both slices must
    /// describe the same number of observations.
    #[error("length mismatch in {operator}: {values} values but {times} times")]
    LengthMismatch {
        /// Number of values provided.
        values: usize,
        /// Number of observation times provided.
        times: usize,
        /// Name of the operator that rejected the input.
        operator: &'static str,
    },

    /// The rolling window width is not usable.
    ///
    /// Returned when `tau` is zero, negative, or not finite.
    #[error("invalid window width {tau}: {reason}")]
    InvalidWindow {
        /// The rejected window width.
        tau: f64,
        /// Description of why the width is invalid.
        reason: &'static str,
    },

    /// An operator-specific parameter is out of range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the parameter.
        name: &'static str,
        /// Description of why the value is invalid.
        reason: &'static str,
    },

    /// The caller-supplied output buffer cannot hold the result.
    #[error("buffer too small for {operator}: required {required} elements, got {actual}")]
    BufferTooSmall {
        /// The number of elements required.
        required: usize,
        /// The number of elements provided.
        actual: usize,
        /// Name of the operator that rejected the buffer.
        operator: &'static str,
    },

    /// An order statistic was requested outside of `[0, len - 1]`.
    #[error("order statistic index {index} out of range for {len} elements")]
    IndexOutOfRange {
        /// The requested (0-based) order statistic.
        index: usize,
        /// Number of elements available.
        len: usize,
    },

    /// Failed to convert a numeric value to the target type.
    ///
    /// This error occurs when using `NumCast::from()` to convert constants
    /// or counts into a generic `Float` type and the conversion fails.
    #[error("numeric conversion failed: {context}")]
    NumericConversion {
        /// Description of the conversion that failed.
        context: &'static str,
    },

    /// Observation times are not strictly increasing.
    #[error("observation times must be strictly increasing: violated at index {index}")]
    NonIncreasingTimes {
        /// Index of the first time that is not greater than its predecessor.
        index: usize,
    },
}

/// Convenience type alias for Results using the irregular-ts Error type.
pub type Result<T> = std::result::Result<T, Error>;
