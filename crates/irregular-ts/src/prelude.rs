//! Commonly used types and traits for convenient importing.
//!
//! # Usage
//!
//! ```
//! use irregular_ts::prelude::*;
//!
//! let values = vec![1.0_f64, 4.0, 2.0, 8.0];
//! let times = vec![0.0_f64, 0.5, 2.0, 2.2];
//!
//! let mean = sma(&values, &times, 1.0, Weighting::Last).unwrap();
//! let smooth = ema(&values, &times, 1.0, values[0], Weighting::Lin).unwrap();
//! let median = rolling_median(&values, &times, 1.0).unwrap();
//! assert_eq!(mean.len(), smooth.len());
//! assert_eq!(median[3], 5.0);
//! ```
//!
//! # Contents
//!
//! ## Error Handling
//! - [`Error`]: The error type for rejected operator calls
//! - [`Result`]: Type alias for `std::result::Result<T, Error>`
//!
//! ## Traits
//! - [`SeriesElement`]: Numeric types usable as values and times
//! - [`ValidatedInput`]: Extension trait for input validation
//!
//! ## Operators
//! All rolling operators with their `_into` variants, the [`Weighting`]
//! selector and the merge utilities.

// Error types
pub use crate::error::{Error, Result};

// Traits
pub use crate::traits::{SeriesElement, ValidatedInput};

// Rolling operators (simple API)
pub use crate::operators::{
    ema, ema_eq, ema_forward, ema_last, ema_lin, rolling_count, rolling_max, rolling_median,
    rolling_min, rolling_moment, rolling_moment_eq, rolling_moment_last, rolling_moment_lin,
    rolling_quantile_eq, rolling_quantile_time_weighted, rolling_rank, rolling_sum, sma, sma_eq,
    sma_eq_stable, sma_forward, sma_last, sma_lin, Weighting,
};

// Rolling operators (_into API for pre-allocated buffers)
pub use crate::operators::{
    ema_eq_into, ema_forward_into, ema_into, ema_last_into, ema_lin_into, rolling_count_into,
    rolling_max_into, rolling_median_into, rolling_min_into, rolling_moment_into,
    rolling_quantile_eq_into, rolling_quantile_time_weighted_into, rolling_rank_into,
    rolling_sum_into, sma_eq_into, sma_eq_stable_into, sma_forward_into, sma_into, sma_last_into,
    sma_lin_into,
};

// Grid alignment
pub use crate::merge::{num_leq_sorted, num_less_sorted, sorted_union, sorted_union_into};
