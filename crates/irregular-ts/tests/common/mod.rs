//! Shared test utilities for irregular-ts tests.
//!
//! Besides tolerance comparisons this module holds brute-force reference
//! implementations that recompute every window from scratch. They use the
//! same boundary expressions as the library (`times[j] <= times[i] - tau`
//! for open windows, `<` for closed ones) so exact comparisons are valid.

/// Approximate equality check for floating-point values.
///
/// Two NaN values are considered equal for testing purposes.
#[allow(dead_code)]
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    if a.is_nan() && b.is_nan() {
        return true;
    }
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() < eps
}

/// Relative comparison that degrades to absolute near zero.
#[allow(dead_code)]
pub fn approx_eq_scaled(a: f64, b: f64, eps: f64) -> bool {
    approx_eq(a, b, eps * a.abs().max(b.abs()).max(1.0))
}

/// Standard epsilon for high-precision comparisons.
#[allow(dead_code)]
pub const EPSILON: f64 = 1e-10;

/// Builds strictly increasing times from a start time and positive gaps.
#[allow(dead_code)]
pub fn cumulative_times(start: f64, gaps: &[f64]) -> Vec<f64> {
    let mut times = Vec::with_capacity(gaps.len());
    let mut t = start;
    for &gap in gaps {
        times.push(t);
        t += gap;
    }
    times
}

/// Index of the first observation inside the window ending at `i`.
#[allow(dead_code)]
pub fn window_start(times: &[f64], i: usize, tau: f64, closed: bool) -> usize {
    let cutoff = times[i] - tau;
    (0..i)
        .find(|&j| if closed { times[j] >= cutoff } else { times[j] > cutoff })
        .unwrap_or(i)
}

/// Applies `f` to the values of every open window `(t - tau, t]`.
#[allow(dead_code)]
pub fn brute_force_open<F>(values: &[f64], times: &[f64], tau: f64, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    (0..values.len())
        .map(|i| f(&values[window_start(times, i, tau, false)..=i]))
        .collect()
}

/// Median by full sort, averaging the two middle values for even lengths.
#[allow(dead_code)]
pub fn sorted_median(window: &[f64]) -> f64 {
    let mut sorted = window.to_vec();
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Integral of the step interpolant over `[from, to]`, with the series held
/// at `values[0]` before the first observation.
#[allow(dead_code)]
pub fn step_integral(values: &[f64], times: &[f64], from: f64, to: f64) -> f64 {
    let mut area = 0.0;
    if from < times[0] {
        area += values[0] * (times[0].min(to) - from);
    }
    for j in 0..values.len() {
        let start = times[j].max(from);
        let end = times.get(j + 1).copied().unwrap_or(f64::INFINITY).min(to);
        if end > start {
            area += values[j] * (end - start);
        }
    }
    area
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_start() {
        let times = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(window_start(&times, 2, 2.0, false), 1);
        assert_eq!(window_start(&times, 2, 2.0, true), 0);
        assert_eq!(window_start(&times, 3, 0.5, false), 3);
    }

    #[test]
    fn test_step_integral() {
        let values = [1.0, 2.0];
        let times = [0.0, 2.0];
        assert!(approx_eq(step_integral(&values, &times, -1.0, 3.0), 1.0 + 2.0 + 2.0, EPSILON));
    }
}
