//! Rolling extremum tracking for time windows.
//!
//! The tracker remembers the index of the current window's extremum. A new
//! observation replaces it when it is at least as extreme; when the window's
//! left edge moves past the remembered index, the whole current window is
//! rescanned once.
//!
//! # Complexity
//!
//! - Amortized O(1) per observation on typical data
//! - Worst case O(window) per observation (e.g. a strictly decreasing series
//!   for a rolling maximum), since every eviction of the maximum triggers a
//!   rescan
//! - Space: O(1)
//!
//! # Ties
//!
//! Candidates win ties (`>=` for maximum, `<=` for minimum), so the tracker
//! always points at the most recent occurrence of the extreme value and stays
//! valid for as long as possible.

use crate::traits::SeriesElement;

/// Direction of the tracked extremum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extremum {
    /// Track the largest value.
    Max,
    /// Track the smallest value.
    Min,
}

impl Extremum {
    /// Returns true if `candidate` should replace `current`.
    #[inline]
    #[must_use]
    pub fn prefers<T: SeriesElement>(self, candidate: T, current: T) -> bool {
        match self {
            Self::Max => candidate >= current,
            Self::Min => candidate <= current,
        }
    }
}

/// Invalidate-and-rescan tracker for the extremum of a sliding window.
#[derive(Debug, Clone)]
pub struct ExtremumTracker {
    kind: Extremum,
    position: usize,
    rescans: usize,
}

impl ExtremumTracker {
    /// Creates a tracker pointing at index 0.
    #[must_use]
    pub const fn new(kind: Extremum) -> Self {
        Self {
            kind,
            position: 0,
            rescans: 0,
        }
    }

    /// Index of the current extremum.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Number of full-window rescans performed so far.
    #[inline]
    #[must_use]
    pub const fn rescans(&self) -> usize {
        self.rescans
    }

    /// Folds the observation at `index` into the tracker.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `values`.
    #[inline]
    pub fn push<T: SeriesElement>(&mut self, values: &[T], index: usize) {
        if self.kind.prefers(values[index], values[self.position]) {
            self.position = index;
        }
    }

    /// Restores the invariant after the window shrank to `[left, right]`.
    ///
    /// Does nothing while the remembered extremum is still inside the window.
    #[inline]
    pub fn revalidate<T: SeriesElement>(&mut self, values: &[T], left: usize, right: usize) {
        if self.position >= left {
            return;
        }
        self.rescans += 1;
        self.position = left;
        for j in left + 1..=right {
            if self.kind.prefers(values[j], values[self.position]) {
                self.position = j;
            }
        }
    }

    /// Current extremum value.
    #[inline]
    #[must_use]
    pub fn value<T: SeriesElement>(&self, values: &[T]) -> T {
        values[self.position]
    }
}
