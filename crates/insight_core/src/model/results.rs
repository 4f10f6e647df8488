//! Simulation results and summaries
//!
//! Contains the output types handed to presentation code: summary
//! statistics, running-mean trend, sensitivity ranking and the full report.

use serde::{Deserialize, Serialize};

use super::table::OutcomeTable;

/// Percentile interval and moments of an outcome distribution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// 5th percentile (lower edge of the 90% interval)
    pub p5: f64,
    /// 95th percentile (upper edge of the 90% interval)
    pub p95: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation
    #[serde(rename = "std")]
    pub std_dev: f64,
}

impl SummaryStatistics {
    /// Width of the P5..P95 interval
    #[must_use]
    pub fn interval_width(&self) -> f64 {
        self.p95 - self.p5
    }
}

/// Running mean sampled at increasing trial counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// Number of trials each mean covers
    pub counts: Vec<usize>,
    /// Mean of the first `counts[i]` outcomes
    pub means: Vec<f64>,
}

impl TrendSeries {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate `(count, mean)` pairs
    pub fn points(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.counts.iter().copied().zip(self.means.iter().copied())
    }

    /// Most recent running mean
    pub fn last_mean(&self) -> Option<f64> {
        self.means.last().copied()
    }
}

/// Correlation of one input variable with the outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityEntry {
    pub name: String,
    /// Pearson coefficient in `[-1, 1]`; 0.0 for constant columns
    pub coefficient: f64,
}

/// Variables ordered by descending absolute correlation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensitivityRanking {
    entries: Vec<SensitivityEntry>,
}

impl SensitivityRanking {
    /// Wrap entries that are already sorted
    pub(crate) fn from_sorted(entries: Vec<SensitivityEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[SensitivityEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SensitivityEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Coefficient of the named variable
    pub fn coefficient(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.coefficient)
    }

    /// Fewer than two variables: the ranking carries no comparative information
    pub fn is_degenerate(&self) -> bool {
        self.entries.len() < 2
    }
}

/// Terminal state of an adaptive run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// Cumulative mean changed by less than the tolerance between batches
    Converged,
    /// Trial cap reached before the convergence test passed
    Exhausted,
}

/// Output of the convergence controller
#[derive(Debug, Clone)]
pub struct AdaptiveRun {
    /// Every trial executed, across all batches
    pub table: OutcomeTable,
    /// Cumulative mean after each batch
    pub running_means: Vec<f64>,
    pub termination: Termination,
    pub batch_size: usize,
}

impl AdaptiveRun {
    /// Running means paired with the trial count each one covers
    #[must_use]
    pub fn trend(&self) -> TrendSeries {
        TrendSeries {
            counts: (1..=self.running_means.len())
                .map(|batch| batch * self.batch_size)
                .collect(),
            means: self.running_means.clone(),
        }
    }

    #[must_use]
    pub fn converged(&self) -> bool {
        self.termination == Termination::Converged
    }
}

/// Everything a presentation layer needs from one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    /// Seed the run's random source was built from
    pub seed: u64,
    /// Number of trials executed
    pub trials: usize,
    pub statistics: SummaryStatistics,
    pub trend: TrendSeries,
    pub sensitivity: SensitivityRanking,
    /// `None` for fixed-size runs
    pub termination: Option<Termination>,
    pub table: OutcomeTable,
}
