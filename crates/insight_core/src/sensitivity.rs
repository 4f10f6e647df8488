//! Correlation-based sensitivity ranking (tornado chart data).

use crate::model::{OutcomeTable, SensitivityEntry, SensitivityRanking};

/// Pearson correlation coefficient of two equally long series.
///
/// Returns 0.0 instead of an undefined value when either series has zero
/// variance or fewer than two points.
#[must_use]
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 || is_constant(&x[..n]) || is_constant(&y[..n]) {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (sxy / denom).clamp(-1.0, 1.0)
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Correlate every variable column with the outcome column and order by
/// descending absolute coefficient. Ties keep the input order.
#[must_use]
pub fn rank_sensitivity(table: &OutcomeTable) -> SensitivityRanking {
    let outcomes = table.outcomes();
    let mut entries: Vec<SensitivityEntry> = table
        .variable_columns()
        .map(|(name, values)| SensitivityEntry {
            name: name.to_string(),
            coefficient: pearson(values, outcomes),
        })
        .collect();

    // sort_by is stable
    entries.sort_by(|a, b| b.coefficient.abs().total_cmp(&a.coefficient.abs()));

    SensitivityRanking::from_sorted(entries)
}
