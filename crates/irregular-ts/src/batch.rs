//! Batch processing of many independent series.
//!
//! Every operator is a pure function of its input slices, so a batch of series
//! can be processed concurrently with Rayon when the `parallel` feature is
//! enabled. Without the feature the same API runs sequentially.
//!
//! # Feature Flag
//!
//! ```toml
//! [dependencies]
//! irregular-ts = { version = "0.1", features = ["parallel"] }
//! ```
//!
//! # Example
//!
//! ```
//! use irregular_ts::batch::BatchProcessor;
//! use irregular_ts::operators::sma::sma_eq;
//!
//! let series = vec![
//!     (vec![1.0_f64, 2.0, 3.0], vec![0.0, 1.0, 2.0]),
//!     (vec![5.0_f64, 4.0], vec![0.0, 0.25]),
//! ];
//!
//! let results = BatchProcessor::new()
//!     .process(&series, |values, times| sma_eq(values, times, 2.0))
//!     .unwrap();
//! assert_eq!(results.len(), 2);
//! assert!((results[1][1] - 4.5).abs() < 1e-10);
//! ```

use crate::error::Result;
use crate::traits::SeriesElement;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A series as an owned `(values, times)` pair.
pub type OwnedSeries<T> = (Vec<T>, Vec<T>);

/// A series as a borrowed `(values, times)` pair.
pub type SeriesRef<'a, T> = (&'a [T], &'a [T]);

/// Batch processor for running one operator over many series.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    /// Minimum number of series needed to use parallel processing.
    /// Smaller batches are processed sequentially.
    min_parallel_threshold: usize,
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchProcessor {
    /// Creates a new batch processor with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            min_parallel_threshold: 64,
        }
    }

    /// Sets the minimum number of series required to use parallel processing.
    ///
    /// If the number of series is below this threshold, sequential processing
    /// is used instead to avoid parallel overhead.
    #[must_use]
    pub const fn min_parallel_threshold(mut self, threshold: usize) -> Self {
        self.min_parallel_threshold = threshold;
        self
    }

    /// Returns true if a batch of `count` series would be processed in parallel.
    #[must_use]
    pub const fn runs_parallel(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && count >= self.min_parallel_threshold
    }

    /// Applies `operator` to every `(values, times)` pair.
    ///
    /// Results are returned in input order.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `operator`.
    pub fn process<T, F, R>(&self, series: &[OwnedSeries<T>], operator: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T], &[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        let refs: Vec<SeriesRef<'_, T>> = series
            .iter()
            .map(|(values, times)| (values.as_slice(), times.as_slice()))
            .collect();
        self.process_refs(&refs, operator)
    }

    /// Applies `operator` to every borrowed `(values, times)` pair.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `operator`.
    pub fn process_refs<T, F, R>(&self, series: &[SeriesRef<'_, T>], operator: F) -> Result<Vec<R>>
    where
        T: SeriesElement,
        F: Fn(&[T], &[T]) -> Result<R> + Send + Sync,
        R: Send,
    {
        let parallel = self.runs_parallel(series.len());
        log::debug!(
            "batch: {} series, {}",
            series.len(),
            if parallel { "parallel" } else { "sequential" }
        );

        if parallel {
            run_parallel(series, &operator)
        } else {
            series
                .iter()
                .map(|(values, times)| operator(values, times))
                .collect()
        }
    }
}

#[cfg(feature = "parallel")]
fn run_parallel<T, F, R>(series: &[SeriesRef<'_, T>], operator: &F) -> Result<Vec<R>>
where
    T: SeriesElement,
    F: Fn(&[T], &[T]) -> Result<R> + Send + Sync,
    R: Send,
{
    series
        .par_iter()
        .map(|(values, times)| operator(values, times))
        .collect::<Result<Vec<R>>>()
}

// Never reached: `runs_parallel` is always false without the feature.
#[cfg(not(feature = "parallel"))]
fn run_parallel<T, F, R>(series: &[SeriesRef<'_, T>], operator: &F) -> Result<Vec<R>>
where
    T: SeriesElement,
    F: Fn(&[T], &[T]) -> Result<R>,
{
    series
        .iter()
        .map(|(values, times)| operator(values, times))
        .collect()
}

/// Convenience function to process many series with default settings.
///
/// This is a shorthand for `BatchProcessor::new().process(series, operator)`.
///
/// # Errors
///
/// Returns the first error produced by `operator`.
pub fn process_batch<T, F, R>(series: &[OwnedSeries<T>], operator: F) -> Result<Vec<R>>
where
    T: SeriesElement,
    F: Fn(&[T], &[T]) -> Result<R> + Send + Sync,
    R: Send,
{
    BatchProcessor::new().process(series, operator)
}
