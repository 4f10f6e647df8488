//! Plain-text rendering of simulation reports.
//!
//! Everything here returns strings so the output can be tested without a
//! terminal; the caller decides where to print it.

use std::fmt::Write;

use insight_core::model::{SensitivityRanking, SimulationReport, Termination, TrendSeries};

use crate::util::format::{format_coefficient, format_count, format_number};

/// Block characters for sub-character precision (from empty to full)
const BIN_CHARS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

pub const HISTOGRAM_BINS: usize = 48;
pub const HISTOGRAM_HEIGHT: usize = 8;
pub const BAR_WIDTH: usize = 30;
pub const SPARKLINE_WIDTH: usize = 48;

/// Count outcomes into `bins` equal-width bins spanning their range.
///
/// A zero-width range puts every outcome into the first bin.
pub fn histogram_counts(outcomes: &[f64], bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    if bins == 0 || outcomes.is_empty() {
        return counts;
    }

    let min = outcomes.iter().copied().fold(f64::INFINITY, f64::min);
    let max = outcomes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bins as f64;

    for &x in outcomes {
        let bin = if width > 0.0 {
            (((x - min) / width).floor() as usize).min(bins - 1)
        } else {
            0
        };
        counts[bin] += 1;
    }
    counts
}

/// Vertical histogram, one string per row from top to bottom
pub fn render_histogram(outcomes: &[f64], bins: usize, height: usize) -> Vec<String> {
    let counts = histogram_counts(outcomes, bins);
    let max_count = counts.iter().copied().max().unwrap_or(0);
    if max_count == 0 || height == 0 {
        return Vec::new();
    }

    let height_units = height * 8;
    let bar_heights: Vec<usize> = counts
        .iter()
        .map(|&c| ((c as f64 / max_count as f64) * height_units as f64).round() as usize)
        .collect();

    (0..height)
        .map(|row| {
            let row_base = (height - 1 - row) * 8;
            bar_heights
                .iter()
                .map(|&bar| {
                    if bar >= row_base + 8 {
                        BIN_CHARS[8]
                    } else if bar > row_base {
                        BIN_CHARS[bar - row_base]
                    } else {
                        BIN_CHARS[0]
                    }
                })
                .collect()
        })
        .collect()
}

/// One-line chart of `values`, averaged down to at most `width` columns
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() || width == 0 {
        return String::new();
    }

    let columns = width.min(values.len());
    let resampled: Vec<f64> = (0..columns)
        .map(|i| {
            let start = i * values.len() / columns;
            let end = ((i + 1) * values.len() / columns).max(start + 1);
            let chunk = &values[start..end];
            chunk.iter().sum::<f64>() / chunk.len() as f64
        })
        .collect();

    let lo = resampled.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = resampled.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;

    resampled
        .iter()
        .map(|&v| {
            let level = if span > 0.0 {
                1 + ((v - lo) / span * 7.0).round() as usize
            } else {
                4
            };
            BIN_CHARS[level.min(8)]
        })
        .collect()
}

/// Horizontal bars of `|r|`, strongest driver first
pub fn render_sensitivity(ranking: &SensitivityRanking, width: usize) -> Vec<String> {
    let name_width = ranking.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);

    ranking
        .iter()
        .map(|entry| {
            let filled = (entry.coefficient.abs() * width as f64).round() as usize;
            let bar = "█".repeat(filled.min(width));
            format!(
                "  {:<name_width$}  {} {:<width$}",
                entry.name,
                format_coefficient(entry.coefficient),
                bar,
            )
            .trim_end()
            .to_string()
        })
        .collect()
}

fn render_trend(trend: &TrendSeries) -> String {
    let mut out = String::new();
    let (Some((first_n, first_mean)), Some(&last_n), Some(last_mean)) =
        (trend.points().next(), trend.counts.last(), trend.last_mean())
    else {
        return out;
    };

    let _ = writeln!(out, "  {}", sparkline(&trend.means, SPARKLINE_WIDTH));
    let _ = writeln!(
        out,
        "  {} trials: {}  ->  {} trials: {}",
        format_count(first_n),
        format_number(first_mean, 4),
        format_count(last_n),
        format_number(last_mean, 4),
    );
    out
}

/// Full text report: summary, distribution, drivers and convergence trend
pub fn render_report(report: &SimulationReport, title: Option<&str>) -> String {
    let mut out = String::new();
    let stats = &report.statistics;

    let _ = writeln!(out, "{}", title.unwrap_or("Simulation"));
    let mode = match report.termination {
        None => "fixed".to_string(),
        Some(Termination::Converged) => "adaptive, converged".to_string(),
        Some(Termination::Exhausted) => "adaptive, reached trial cap".to_string(),
    };
    let _ = writeln!(
        out,
        "  {} trials ({mode}), seed {}",
        format_count(report.trials),
        report.seed
    );
    let _ = writeln!(out);

    let _ = writeln!(
        out,
        "  90% interval  [{}, {}]",
        format_number(stats.p5, 2),
        format_number(stats.p95, 2)
    );
    let _ = writeln!(out, "  Mean          {}", format_number(stats.mean, 2));
    let _ = writeln!(out, "  Median        {}", format_number(stats.median, 2));
    let _ = writeln!(out, "  Std dev       {}", format_number(stats.std_dev, 2));
    let _ = writeln!(out);

    let histogram = render_histogram(report.table.outcomes(), HISTOGRAM_BINS, HISTOGRAM_HEIGHT);
    if !histogram.is_empty() {
        let _ = writeln!(out, "Outcome distribution");
        for row in histogram {
            let _ = writeln!(out, "  {row}");
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "Sensitivity (correlation with outcome)");
    if report.sensitivity.is_degenerate() {
        let _ = writeln!(out, "  (needs at least two variables to compare)");
    }
    for line in render_sensitivity(&report.sensitivity, BAR_WIDTH) {
        let _ = writeln!(out, "{line}");
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Running mean");
    out.push_str(&render_trend(&report.trend));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use insight_core::model::{DistributionKind, RunSettings, VariableSpec};
    use insight_core::simulation::run_report;

    #[test]
    fn test_histogram_counts() {
        let values = [0.0, 0.1, 0.5, 0.9, 1.0];
        assert_eq!(histogram_counts(&values, 2), vec![2, 3]);
        assert_eq!(histogram_counts(&[3.0; 4], 5), vec![4, 0, 0, 0, 0]);
        assert!(histogram_counts(&[], 3).iter().all(|&c| c == 0));
    }

    #[test]
    fn test_render_histogram_tallest_bar_is_full() {
        let rows = render_histogram(&[0.0, 1.0, 1.0], 2, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], " █");
        assert_eq!(rows[1], "██");
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[1.0, 2.0, 3.0], 10).chars().count(), 3);
        assert_eq!(sparkline(&[0.0, 1.0], 2), "▁█");
        assert_eq!(sparkline(&[5.0; 100], 10), "▄".repeat(10));
        assert_eq!(sparkline(&[], 10), "");
    }

    #[test]
    fn test_render_report_sections() {
        let variables = vec![
            VariableSpec::new("Demand", 100.0, 200.0, DistributionKind::Normal).weight(3.0),
            VariableSpec::new("Price", 5.0, 9.0, DistributionKind::Uniform),
        ];
        let report = run_report(&variables, &RunSettings::fixed(2_000), Some(1), 50).unwrap();
        let text = render_report(&report, Some("Launch"));

        assert!(text.starts_with("Launch\n"));
        assert!(text.contains("2,000 trials (fixed), seed 1"));
        assert!(text.contains("90% interval"));
        assert!(text.contains("Demand"));
        assert!(text.contains("Running mean"));
        assert!(!text.contains("needs at least two variables"));
    }
}
