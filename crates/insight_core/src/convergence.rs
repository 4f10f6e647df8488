//! Adaptive runs: execute trials in fixed-size batches until the cumulative
//! mean stops moving or the trial cap is reached.
//!
//! After each batch the cumulative mean over *all* trials so far is compared
//! with the mean after the previous batch:
//!
//! ```text
//! |cur - prev| / (|prev| + 1e-12) < tolerance
//! ```
//!
//! The test is only allowed to pass once `min_trials` have run. The cap is
//! checked after a batch completes, so the final batch may overshoot
//! `max_trials` by up to `batch_size - 1` trials.

use rand::Rng;

use crate::aggregate::run_trials;
use crate::error::{Result, SimulationError};
use crate::model::{AdaptiveRun, ConvergenceConfig, OutcomeTable, Termination, VariableSpec};
use crate::progress::RunProgress;

/// Guards the relative-change test against a zero previous mean
pub const RELATIVE_CHANGE_EPSILON: f64 = 1e-12;

/// Relative change between two cumulative means
#[inline]
#[must_use]
pub fn relative_change(current: f64, previous: f64) -> f64 {
    (current - previous).abs() / (previous.abs() + RELATIVE_CHANGE_EPSILON)
}

/// Bookkeeping for one adaptive run. Lives only for the duration of the run.
#[derive(Debug, Default)]
struct ConvergenceState {
    trials: usize,
    outcome_sum: f64,
    previous_mean: Option<f64>,
    running_means: Vec<f64>,
}

impl ConvergenceState {
    fn with_capacity(batches: usize) -> Self {
        Self {
            running_means: Vec::with_capacity(batches),
            ..Default::default()
        }
    }

    /// Fold a batch into the running sum and record the new cumulative mean
    fn record_batch(&mut self, outcomes: &[f64]) -> f64 {
        self.trials += outcomes.len();
        self.outcome_sum += outcomes.iter().sum::<f64>();
        let mean = self.outcome_sum / self.trials as f64;
        self.running_means.push(mean);
        mean
    }

    fn has_converged(&self, current: f64, config: &ConvergenceConfig) -> bool {
        self.trials >= config.min_trials
            && self
                .previous_mean
                .is_some_and(|prev| relative_change(current, prev) < config.tolerance)
    }
}

/// Run batches until convergence or exhaustion.
pub fn run_adaptive<R: Rng + ?Sized>(
    variables: &[VariableSpec],
    config: &ConvergenceConfig,
    rng: &mut R,
) -> Result<AdaptiveRun> {
    run_adaptive_with_progress(variables, config, rng, &RunProgress::new())
}

/// Run batches until convergence or exhaustion, reporting progress.
///
/// The cancel flag is checked before every batch; a cancelled run returns
/// `Cancelled` and discards the trials accumulated so far.
pub fn run_adaptive_with_progress<R: Rng + ?Sized>(
    variables: &[VariableSpec],
    config: &ConvergenceConfig,
    rng: &mut R,
    progress: &RunProgress,
) -> Result<AdaptiveRun> {
    config.validate()?;

    let capacity = config.initial_capacity();
    let names = variables.iter().map(|v| v.name.clone()).collect();
    let mut table = OutcomeTable::with_capacity(names, capacity);
    let mut state = ConvergenceState::with_capacity(capacity / config.batch_size);

    let termination = loop {
        if progress.is_cancelled() {
            tracing::info!(trials = state.trials, "Adaptive run cancelled");
            return Err(SimulationError::Cancelled);
        }

        let batch = run_trials(variables, config.batch_size, rng)?;
        let current = state.record_batch(batch.outcomes());
        table.append(batch);
        progress.add(config.batch_size);

        tracing::debug!(
            trials = state.trials,
            mean = current,
            previous = ?state.previous_mean,
            "Batch complete"
        );

        if state.has_converged(current, config) {
            break Termination::Converged;
        }
        if state.trials >= config.max_trials {
            break Termination::Exhausted;
        }
        state.previous_mean = Some(current);
    };

    tracing::info!(
        trials = state.trials,
        batches = state.running_means.len(),
        termination = ?termination,
        "Adaptive run finished"
    );

    Ok(AdaptiveRun {
        table,
        running_means: state.running_means,
        termination,
        batch_size: config.batch_size,
    })
}
