//! Summary statistics over a completed outcome set.
//!
//! Percentiles use linear interpolation between closest ranks (the R-7
//! definition, which is also the numpy default): for `p` in `[0, 100]` the
//! position is `h = (n - 1) * p / 100` into the sorted data.

use crate::error::{Result, SimulationError};
use crate::model::SummaryStatistics;

/// Percentile of already-sorted data, `p` in `[0, 100]`.
///
/// Returns `None` for empty input.
#[must_use]
pub fn percentile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }

    let h = (n - 1) as f64 * (p.clamp(0.0, 100.0) / 100.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Arithmetic mean, `None` for empty input
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation (divides by N) around a known mean
#[must_use]
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = values.iter().map(|x| (x - mean).powi(2)).sum();
    (sum_sq / values.len() as f64).sqrt()
}

/// P5/P95 interval, mean, median and population standard deviation.
///
/// Pure: the input is copied before sorting.
pub fn summarize(outcomes: &[f64]) -> Result<SummaryStatistics> {
    let mean = mean(outcomes).ok_or(SimulationError::EmptyInput)?;

    let mut sorted = outcomes.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pct = |p: f64| percentile_sorted(&sorted, p).unwrap_or(mean);

    Ok(SummaryStatistics {
        p5: pct(5.0),
        p95: pct(95.0),
        mean,
        median: pct(50.0),
        std_dev: population_std_dev(outcomes, mean),
    })
}
