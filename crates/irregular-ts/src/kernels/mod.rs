//! Building blocks shared by the rolling operators.
//!
//! # Kernels
//!
//! - [`select`]: in-place quickselect for exact order statistics
//! - [`window`]: two-pointer maintenance of trailing and leading time windows
//! - [`extrema`]: invalidate-and-rescan tracking of a window's extremum
//!
//! None of the kernels allocate or hold state beyond a single call, so any
//! number of them can run concurrently on independent buffers.

pub mod extrema;
pub mod select;
pub mod window;

// Re-export kernel types for convenient access, e.g.
// `use irregular_ts::kernels::TrailingWindow;`
pub use extrema::{Extremum, ExtremumTracker};
pub use select::{median_in_place, select_nth, select_nth_in_place};
pub use window::{LeadingWindow, TrailingWindow, WindowBound};
