//! Tests for the adaptive convergence controller
//!
//! These tests verify that:
//! - A single-batch cap always ends Exhausted (no previous mean to compare)
//! - Row counts are whole batches and never below one batch
//! - Generous tolerances converge as soon as `min_trials` allows
//! - Running means track the accumulated table
//! - Cancellation and invalid configs fail without a table

use crate::convergence::{run_adaptive, run_adaptive_with_progress};
use crate::error::SimulationError;
use crate::model::{ConvergenceConfig, DistributionKind, Termination, VariableSpec};
use crate::progress::RunProgress;
use crate::stats::mean;

use super::test_rng;

fn variables() -> Vec<VariableSpec> {
    vec![
        VariableSpec::new("revenue", 100.0, 200.0, DistributionKind::Normal).weight(2.0),
        VariableSpec::new("cost", 50.0, 80.0, DistributionKind::Uniform),
        VariableSpec::new("growth", 1.0, 3.0, DistributionKind::Triangular),
    ]
}

#[test]
fn test_single_batch_cap_is_exhausted() {
    let config = ConvergenceConfig {
        tolerance: 1e-9,
        min_trials: 1_000,
        max_trials: 1_000,
        batch_size: 1_000,
    };
    let run = run_adaptive(&variables(), &config, &mut test_rng(30)).unwrap();

    assert_eq!(run.termination, Termination::Exhausted);
    assert_eq!(run.table.num_trials(), 1_000);
    assert_eq!(run.running_means.len(), 1);
}

#[test]
fn test_rows_are_whole_batches() {
    let configs = [
        (1_000, 5_000, 1_000),
        (500, 2_500, 1_000),
        (100, 150, 200),
        (1, 7, 3),
    ];
    for (min_trials, max_trials, batch_size) in configs {
        let config = ConvergenceConfig {
            tolerance: 1e-9,
            min_trials,
            max_trials,
            batch_size,
        };
        let run = run_adaptive(&variables(), &config, &mut test_rng(31)).unwrap();
        let rows = run.table.num_trials();

        assert_eq!(rows % batch_size, 0, "rows {rows} for {config:?}");
        assert!(rows >= batch_size.min(max_trials));
        assert!(rows < max_trials + batch_size);
        assert_eq!(run.running_means.len(), rows / batch_size);
    }
}

#[test]
fn test_cap_overshoot_by_final_batch() {
    let config = ConvergenceConfig {
        tolerance: 0.0,
        min_trials: 1_000,
        max_trials: 2_500,
        batch_size: 1_000,
    };
    let run = run_adaptive(&variables(), &config, &mut test_rng(32)).unwrap();

    assert_eq!(run.termination, Termination::Exhausted);
    assert_eq!(run.table.num_trials(), 3_000);
}

#[test]
fn test_zero_tolerance_never_converges() {
    let config = ConvergenceConfig {
        tolerance: 0.0,
        min_trials: 1_000,
        max_trials: 10_000,
        batch_size: 1_000,
    };
    let run = run_adaptive(&variables(), &config, &mut test_rng(33)).unwrap();

    assert_eq!(run.termination, Termination::Exhausted);
    assert_eq!(run.table.num_trials(), 10_000);
    assert_eq!(run.running_means.len(), 10);
}

#[test]
fn test_generous_tolerance_converges_at_min_trials() {
    // Outcome mean is ~100 with small batch-to-batch drift, far below 50%
    let config = ConvergenceConfig {
        tolerance: 0.5,
        min_trials: 3_000,
        max_trials: 100_000,
        batch_size: 1_000,
    };
    let run = run_adaptive(&variables(), &config, &mut test_rng(34)).unwrap();

    assert_eq!(run.termination, Termination::Converged);
    assert!(run.converged());
    assert_eq!(run.table.num_trials(), 3_000);
}

#[test]
fn test_convergence_needs_previous_mean_even_past_min_trials() {
    let config = ConvergenceConfig {
        tolerance: 0.5,
        min_trials: 1,
        max_trials: 100_000,
        batch_size: 1_000,
    };
    let run = run_adaptive(&variables(), &config, &mut test_rng(35)).unwrap();

    assert_eq!(run.termination, Termination::Converged);
    assert_eq!(run.table.num_trials(), 2_000);
}

#[test]
fn test_huge_trial_cap_converges_without_reserving_it() {
    let config = ConvergenceConfig {
        tolerance: 0.5,
        min_trials: 1_000,
        max_trials: 1 << 40,
        batch_size: 1_000,
    };
    let vars = vec![VariableSpec::new("x", 1.0, 2.0, DistributionKind::Uniform)];
    let run = run_adaptive(&vars, &config, &mut test_rng(41)).unwrap();

    assert_eq!(run.termination, Termination::Converged);
    assert_eq!(run.table.num_trials(), 2_000);
}

#[test]
fn test_running_means_track_accumulated_table() {
    let config = ConvergenceConfig {
        tolerance: 0.0,
        min_trials: 500,
        max_trials: 4_000,
        batch_size: 500,
    };
    let run = run_adaptive(&variables(), &config, &mut test_rng(36)).unwrap();
    let outcomes = run.table.outcomes();

    for (i, &running) in run.running_means.iter().enumerate() {
        let k = (i + 1) * config.batch_size;
        let full = mean(&outcomes[..k]).unwrap();
        assert!((running - full).abs() < 1e-9);
    }

    let trend = run.trend();
    assert_eq!(trend.counts, (1..=8).map(|b| b * 500).collect::<Vec<_>>());
    assert_eq!(trend.means, run.running_means);
}

#[test]
fn test_progress_counts_trials() {
    let config = ConvergenceConfig {
        tolerance: 0.0,
        min_trials: 1_000,
        max_trials: 3_000,
        batch_size: 1_000,
    };
    let progress = RunProgress::new();
    let run =
        run_adaptive_with_progress(&variables(), &config, &mut test_rng(37), &progress).unwrap();

    assert_eq!(progress.completed(), run.table.num_trials());
}

#[test]
fn test_cancelled_run_returns_no_table() {
    let progress = RunProgress::new();
    progress.cancel();

    let err = run_adaptive_with_progress(
        &variables(),
        &ConvergenceConfig::default(),
        &mut test_rng(38),
        &progress,
    )
    .unwrap_err();

    assert_eq!(err, SimulationError::Cancelled);
    assert_eq!(progress.completed(), 0);
}

#[test]
fn test_invalid_config_rejected_before_sampling() {
    let config = ConvergenceConfig {
        min_trials: 10_000,
        max_trials: 1_000,
        ..Default::default()
    };
    let progress = RunProgress::new();
    let err = run_adaptive_with_progress(&variables(), &config, &mut test_rng(39), &progress)
        .unwrap_err();

    assert!(matches!(err, SimulationError::InvalidConfig(_)));
    assert_eq!(progress.completed(), 0);
}

#[test]
fn test_weight_error_propagates() {
    let vars = vec![VariableSpec::new("a", 0.0, 1.0, DistributionKind::Uniform).weight(0.0)];
    let err = run_adaptive(&vars, &ConvergenceConfig::default(), &mut test_rng(40)).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidWeights { .. }));
}
