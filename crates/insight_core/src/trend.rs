//! Running-mean trend for convergence charts.
//!
//! Given outcomes in trial order, report the mean of the first `k` outcomes
//! at `n_points` counts spaced evenly from `min(100, total)` to `total`.
//! Prefix means come from a single cumulative-sum pass.

use crate::error::{Result, SimulationError};
use crate::model::TrendSeries;

/// Default number of trend points
pub const DEFAULT_TREND_POINTS: usize = 200;

/// Smallest prefix the trend starts from (capped at the total)
pub const TREND_FLOOR: usize = 100;

/// Evenly spaced counts from `min(TREND_FLOOR, total)` to `total`, both
/// inclusive, truncated to integers.
#[must_use]
pub fn trend_counts(total: usize, n_points: usize) -> Vec<usize> {
    let start = TREND_FLOOR.min(total);
    match n_points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (total - start) as f64 / (n_points - 1) as f64;
            let mut counts: Vec<usize> = (0..n_points)
                .map(|i| (start as f64 + step * i as f64) as usize)
                .collect();
            // Pin the endpoint so rounding never drops the final trial
            counts[n_points - 1] = total;
            counts
        }
    }
}

/// Running mean of `outcomes` sampled at `n_points` cumulative counts.
pub fn extract_trend(outcomes: &[f64], n_points: usize) -> Result<TrendSeries> {
    if outcomes.is_empty() {
        return Err(SimulationError::EmptyInput);
    }
    if n_points == 0 {
        return Err(SimulationError::InvalidConfig(
            "trend needs at least one point".into(),
        ));
    }

    let mut prefix = Vec::with_capacity(outcomes.len() + 1);
    prefix.push(0.0);
    let mut acc = 0.0;
    for &x in outcomes {
        acc += x;
        prefix.push(acc);
    }

    let counts = trend_counts(outcomes.len(), n_points);
    let means = counts.iter().map(|&k| prefix[k] / k as f64).collect();

    Ok(TrendSeries { counts, means })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_counts_even_spacing() {
        assert_eq!(trend_counts(1_100, 11), (1..=11).map(|i| i * 100).collect::<Vec<_>>());
    }

    #[test]
    fn test_trend_counts_small_total() {
        assert_eq!(trend_counts(10, 1), vec![10]);
        assert_eq!(trend_counts(10, 3), vec![10, 10, 10]);
        assert_eq!(trend_counts(250, 4), vec![100, 150, 200, 250]);
    }

    #[test]
    fn test_trend_counts_truncate() {
        // 100 + 101/2 = 150.5 truncates to 150
        assert_eq!(trend_counts(201, 3), vec![100, 150, 201]);
    }

    #[test]
    fn test_extract_trend_prefix_means() {
        let outcomes: Vec<f64> = (1..=200).map(f64::from).collect();
        let trend = extract_trend(&outcomes, 2).unwrap();
        assert_eq!(trend.counts, vec![100, 200]);
        assert_eq!(trend.means, vec![50.5, 100.5]);
    }

    #[test]
    fn test_extract_trend_errors() {
        assert_eq!(extract_trend(&[], 5), Err(SimulationError::EmptyInput));
        assert!(matches!(
            extract_trend(&[1.0], 0),
            Err(SimulationError::InvalidConfig(_))
        ));
    }
}
