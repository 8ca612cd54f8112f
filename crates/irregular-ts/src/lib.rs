//! irregular-ts: rolling operators for unevenly-spaced time series
//!
//! This crate computes windowed statistics over series whose observations
//! arrive at irregular times. Windows are defined by a time duration `tau`
//! rather than an observation count, so the number of observations inside a
//! window varies along the series.
//!
//! # Features
//!
//! - **Single pass**: every rolling operator walks the series once with
//!   forward-only window cursors
//! - **Exact boundaries**: each operator documents whether an observation
//!   exactly `tau` old is still inside its window
//! - **Generics**: works with both `f32` and `f64`
//! - **No hidden state**: all scratch space is local to a call, so calls can
//!   run concurrently
//!
//! # Quick Start
//!
//! ```
//! use irregular_ts::prelude::*;
//!
//! let values = vec![5.0_f64, 3.0, 1.0, 4.0, 2.0];
//! let times = vec![0.0_f64, 1.0, 2.0, 3.0, 4.0];
//!
//! let median = rolling_median(&values, &times, 2.5).unwrap();
//! assert_eq!(median[4], 2.0);
//!
//! let counts = rolling_count(&values, &times, 2.5).unwrap();
//! assert_eq!(counts, vec![1.0, 2.0, 3.0, 3.0, 3.0]);
//! ```
//!
//! # Available Operators
//!
//! ## Moving Averages
//! - [`operators::sma()`]: equal, last-point and linear weighting, plus [`operators::sma_forward()`]
//! - [`operators::ema()`]: time-decayed averages, plus [`operators::ema_forward()`]
//! - [`operators::rolling_moment()`]: raw moments of any non-negative order
//!
//! ## Aggregates
//! - [`operators::rolling_sum()`], [`operators::rolling_count()`]
//! - [`operators::rolling_max()`], [`operators::rolling_min()`]
//!
//! ## Order Statistics
//! - [`operators::rolling_median()`]
//! - [`operators::rolling_quantile_eq()`], [`operators::rolling_quantile_time_weighted()`]
//! - [`operators::rolling_rank()`]
//!
//! ## Grid Alignment
//! - [`merge::num_leq_sorted()`], [`merge::num_less_sorted()`], [`merge::sorted_union()`]
//!
//! # Error Handling
//!
//! All operators return [`Result<T, Error>`]. Invalid windows, mismatched
//! lengths and short output buffers are rejected; empty input is not an error.
//!
//! ```
//! use irregular_ts::prelude::*;
//!
//! assert!(sma_eq(&[1.0_f64, 2.0], &[0.0], 1.0).is_err());
//! assert!(sma_eq(&[1.0_f64], &[0.0], 0.0).is_err());
//! assert!(sma_eq::<f64>(&[], &[], 1.0).unwrap().is_empty());
//! ```
//!
//! Observation times are assumed strictly increasing and are not checked by
//! the operators; use [`ValidatedInput::validate_strictly_increasing`] on
//! untrusted input.

#![deny(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::perf)]
#![warn(clippy::nursery)]
#![warn(clippy::needless_collect)]
#![warn(clippy::or_fun_call)]
#![warn(clippy::useless_conversion)]
#![allow(clippy::module_name_repetitions)]

pub mod batch;
pub mod error;
pub mod kernels;
pub mod merge;
pub mod operators;
pub mod prelude;
pub mod traits;
pub mod utils;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use operators::Weighting;
pub use traits::{SeriesElement, ValidatedInput};
pub use utils::{approx_eq, approx_eq_relative, stable_mean, EPSILON};
