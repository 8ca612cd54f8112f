//! Two-pointer maintenance of time-duration windows.
//!
//! Every rolling operator walks the series once with a right edge `i` and
//! keeps a left cursor such that `[times[left], times[i]]` lies inside the
//! trailing window of width `tau`. The left cursor only ever moves forward,
//! so all window bookkeeping costs O(n) over a full pass.
//!
//! Operators fold the new observation into their accumulator, call
//! [`TrailingWindow::advance`] with an eviction callback that retracts each
//! observation leaving the window, then emit their value for `i`.
//!
//! # Boundaries
//!
//! Whether an observation exactly `tau` old still belongs to the window
//! differs between operators and is observable in their output, so it is
//! chosen per operator with [`WindowBound`].
//!
//! # Example
//!
//! ```
//! use irregular_ts::kernels::window::{TrailingWindow, WindowBound};
//!
//! let times = [0.0_f64, 1.0, 2.0, 3.0];
//! let mut window = TrailingWindow::new(2.0, WindowBound::Open);
//! let mut evicted = Vec::new();
//!
//! for i in 0..times.len() {
//!     window.advance(&times, i, |j| evicted.push(j));
//! }
//! // At t=2 the observation at t=0 is exactly tau old and leaves an open window
//! assert_eq!(evicted, vec![0, 1]);
//! assert_eq!(window.left(), 2);
//! ```

use crate::traits::SeriesElement;

/// Which side an observation exactly `tau` old falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBound {
    /// The window is `(t - tau, t]`: an observation at `t - tau` is evicted.
    Open,
    /// The window is `[t - tau, t]`: an observation at `t - tau` is kept.
    Closed,
}

impl WindowBound {
    /// Returns true if an observation at `time` lies outside a window whose
    /// left edge is `cutoff`.
    #[inline]
    #[must_use]
    pub fn is_expired<T: SeriesElement>(self, time: T, cutoff: T) -> bool {
        match self {
            Self::Open => time <= cutoff,
            Self::Closed => time < cutoff,
        }
    }
}

/// Left cursor of a trailing time window of fixed duration.
#[derive(Debug, Clone)]
pub struct TrailingWindow<T> {
    tau: T,
    bound: WindowBound,
    left: usize,
}

impl<T: SeriesElement> TrailingWindow<T> {
    /// Creates a window of width `tau` starting at index 0.
    #[must_use]
    pub const fn new(tau: T, bound: WindowBound) -> Self {
        Self {
            tau,
            bound,
            left: 0,
        }
    }

    /// Returns the window width.
    #[inline]
    #[must_use]
    pub const fn tau(&self) -> T {
        self.tau
    }

    /// Returns the boundary convention.
    #[inline]
    #[must_use]
    pub const fn bound(&self) -> WindowBound {
        self.bound
    }

    /// Index of the oldest observation currently inside the window.
    #[inline]
    #[must_use]
    pub const fn left(&self) -> usize {
        self.left
    }

    /// Left edge in time of the window ending at `times[right]`.
    #[inline]
    #[must_use]
    pub fn cutoff(&self, times: &[T], right: usize) -> T {
        times[right] - self.tau
    }

    /// Number of observations in the window ending at `right`.
    #[inline]
    #[must_use]
    pub const fn len_at(&self, right: usize) -> usize {
        right + 1 - self.left
    }

    /// Moves the right edge to `right` and evicts every observation that fell
    /// out of the window, calling `on_evict` with each evicted index in
    /// increasing order. Returns the new left index.
    ///
    /// The left cursor never passes `right`, so the window always contains
    /// at least the newest observation.
    ///
    /// # Panics
    ///
    /// Panics if `right` is out of bounds for `times`.
    #[inline]
    pub fn advance<F: FnMut(usize)>(&mut self, times: &[T], right: usize, mut on_evict: F) -> usize {
        let cutoff = self.cutoff(times, right);
        while self.left < right && self.bound.is_expired(times[self.left], cutoff) {
            on_evict(self.left);
            self.left += 1;
        }
        self.left
    }
}

/// Right cursor of a forward-looking window `[t, t + tau]`.
///
/// Used when the series is walked from its last observation backwards: the
/// cursor starts at the last index and only ever moves towards the front.
#[derive(Debug, Clone)]
pub struct LeadingWindow<T> {
    tau: T,
    right: usize,
}

impl<T: SeriesElement> LeadingWindow<T> {
    /// Creates a window of width `tau` whose right cursor starts at `last`.
    #[must_use]
    pub const fn new(tau: T, last: usize) -> Self {
        Self { tau, right: last }
    }

    /// Index of the newest observation currently inside the window.
    #[inline]
    #[must_use]
    pub const fn right(&self) -> usize {
        self.right
    }

    /// Moves the left edge to `left` and evicts every observation later than
    /// `times[left] + tau`, calling `on_evict` with each evicted index in
    /// decreasing order. Returns the new right index.
    #[inline]
    pub fn retreat<F: FnMut(usize)>(&mut self, times: &[T], left: usize, mut on_evict: F) -> usize {
        let horizon = times[left] + self.tau;
        while self.right > left && times[self.right] > horizon {
            on_evict(self.right);
            self.right -= 1;
        }
        self.right
    }
}
