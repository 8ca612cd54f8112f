//! Rolling operators for unevenly-spaced series.
//!
//! Every operator takes a value slice, a matching slice of strictly
//! increasing observation times and a window width `tau`, and produces one
//! output per observation. All operators are:
//!
//! - Generic over `f32` and `f64` via the [`SeriesElement`](crate::traits::SeriesElement) trait
//! - Single pass, with window cursors that only move forward
//! - Available as an allocating `op` and a buffer-filling `op_into`
//!
//! # Operators
//!
//! - [`sma`]: simple moving averages (equal, last-point and linear weighting) and the forward SMA
//! - [`ema`]: exponential moving averages and the forward EMA
//! - [`moments`]: rolling raw moments
//! - [`aggregate`]: rolling sum, count, maximum and minimum
//! - [`order_stats`]: rolling median, quantiles and rank

pub mod aggregate;
pub mod ema;
pub mod moments;
pub mod order_stats;
pub mod sma;

use std::fmt;
use std::str::FromStr;

// Re-export operator functions for convenient access
pub use aggregate::{
    rolling_count, rolling_count_into, rolling_max, rolling_max_into, rolling_min,
    rolling_min_into, rolling_sum, rolling_sum_into,
};
pub use ema::{
    ema, ema_eq, ema_eq_into, ema_forward, ema_forward_into, ema_into, ema_last, ema_last_into,
    ema_lin, ema_lin_into,
};
pub use moments::{
    rolling_moment, rolling_moment_eq, rolling_moment_into, rolling_moment_last,
    rolling_moment_lin,
};
pub use order_stats::{
    rolling_median, rolling_median_into, rolling_quantile_eq, rolling_quantile_eq_into,
    rolling_quantile_time_weighted, rolling_quantile_time_weighted_into, rolling_rank,
    rolling_rank_into,
};
pub use sma::{
    sma, sma_eq, sma_eq_into, sma_eq_stable, sma_eq_stable_into, sma_forward, sma_forward_into,
    sma_into, sma_last, sma_last_into, sma_lin, sma_lin_into,
};

/// How observations are weighted between observation times.
///
/// Selects the variant used by the dispatching entry points [`sma()`],
/// [`ema()`] and [`rolling_moment()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weighting {
    /// Each observation counts once, regardless of the time gaps around it.
    #[default]
    Eq,
    /// The series is a step function: each value holds until the next
    /// observation.
    Last,
    /// The series is linearly interpolated between observations.
    Lin,
}

impl Weighting {
    /// Lower-case name used in operator labels and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Last => "last",
            Self::Lin => "lin",
        }
    }
}

impl fmt::Display for Weighting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weighting {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eq" | "equal" => Ok(Self::Eq),
            "last" | "step" => Ok(Self::Last),
            "lin" | "linear" => Ok(Self::Lin),
            other => Err(format!(
                "unknown weighting '{other}' (expected eq, last or lin)"
            )),
        }
    }
}
