//! Tests for the trial aggregator
//!
//! These tests verify that:
//! - Outcomes are the normalized weighted sum of each trial's values
//! - Scaling every weight by a constant leaves outcomes unchanged
//! - Column order and table shape follow the input variables
//! - Invalid weights or parameters fail without producing a table

use crate::aggregate::{run_trials, weighted_outcomes};
use crate::error::SimulationError;
use crate::model::{DistributionKind, VariableSpec};

use super::test_rng;

fn constant(name: &str, value: f64) -> VariableSpec {
    VariableSpec::new(name, value, value, DistributionKind::Uniform)
}

#[test]
fn test_equal_weights_average_constant_values() {
    let vars = vec![constant("a", 10.0), constant("b", 20.0)];
    let mut rng = test_rng(20);

    let table = run_trials(&vars, 500, &mut rng).unwrap();

    assert_eq!(table.num_trials(), 500);
    assert!(table.outcomes().iter().all(|&o| o == 15.0));
}

#[test]
fn test_weighted_sum_of_given_values() {
    let columns = vec![vec![10.0; 4], vec![20.0; 4]];
    assert_eq!(weighted_outcomes(&columns, &[0.5, 0.5]), vec![15.0; 4]);
}

#[test]
fn test_outcome_is_row_wise_combination() {
    let vars = vec![
        VariableSpec::new("price", 10.0, 20.0, DistributionKind::Uniform).weight(3.0),
        VariableSpec::new("volume", 100.0, 200.0, DistributionKind::Triangular).weight(1.0),
    ];
    let mut rng = test_rng(21);
    let table = run_trials(&vars, 1_000, &mut rng).unwrap();

    let price = table.column("price").unwrap();
    let volume = table.column("volume").unwrap();
    for (i, &outcome) in table.outcomes().iter().enumerate() {
        let expected = 0.75 * price[i] + 0.25 * volume[i];
        assert!((outcome - expected).abs() < 1e-9);
    }
}

#[test]
fn test_weight_scaling_invariance() {
    let base = vec![
        VariableSpec::new("a", 0.0, 10.0, DistributionKind::Uniform).weight(1.0),
        VariableSpec::new("b", 5.0, 50.0, DistributionKind::Normal).weight(2.0),
        VariableSpec::new("c", -3.0, 3.0, DistributionKind::Triangular).weight(3.0),
    ];
    let scaled: Vec<VariableSpec> = base
        .iter()
        .cloned()
        .map(|v| {
            let w = v.weight * 7.5;
            v.weight(w)
        })
        .collect();

    let unscaled_table = run_trials(&base, 2_000, &mut test_rng(22)).unwrap();
    let scaled_table = run_trials(&scaled, 2_000, &mut test_rng(22)).unwrap();

    for (a, b) in unscaled_table.outcomes().iter().zip(scaled_table.outcomes()) {
        assert!((a - b).abs() < 1e-9);
    }
}

#[test]
fn test_columns_follow_input_order() {
    let vars = vec![
        VariableSpec::new("zeta", 0.0, 1.0, DistributionKind::Uniform),
        VariableSpec::new("alpha", 0.0, 1.0, DistributionKind::Normal),
        VariableSpec::new("mid", 0.0, 1.0, DistributionKind::Triangular),
    ];
    let table = run_trials(&vars, 10, &mut test_rng(23)).unwrap();

    assert_eq!(table.variable_names(), &["zeta", "alpha", "mid"]);
    assert_eq!(table.column_names(), vec!["zeta", "alpha", "mid", "outcome"]);
    assert_eq!(table.num_columns(), vars.len() + 1);
}

#[test]
fn test_outcomes_are_finite() {
    let vars = vec![
        VariableSpec::new("a", -1e3, 1e3, DistributionKind::Normal),
        VariableSpec::new("b", 0.0, 1.0, DistributionKind::Uniform).weight(0.0),
    ];
    let table = run_trials(&vars, 5_000, &mut test_rng(24)).unwrap();
    assert!(table.outcomes().iter().all(|o| o.is_finite()));
}

#[test]
fn test_zero_weight_sum_fails() {
    let vars = vec![
        VariableSpec::new("a", 0.0, 1.0, DistributionKind::Uniform).weight(0.0),
        VariableSpec::new("b", 0.0, 1.0, DistributionKind::Uniform).weight(0.0),
    ];
    let err = run_trials(&vars, 100, &mut test_rng(25)).unwrap_err();
    assert_eq!(err, SimulationError::InvalidWeights { total: 0.0 });
}

#[test]
fn test_empty_variable_list_fails() {
    let err = run_trials(&[], 100, &mut test_rng(26)).unwrap_err();
    assert!(matches!(err, SimulationError::InvalidWeights { .. }));
}

#[test]
fn test_sampling_failure_returns_no_table() {
    let vars = vec![
        VariableSpec::new("ok", 0.0, 1.0, DistributionKind::Uniform),
        VariableSpec::new("broken", 0.0, f64::INFINITY, DistributionKind::Triangular),
    ];
    let err = run_trials(&vars, 100, &mut test_rng(27)).unwrap_err();
    assert!(matches!(
        err,
        SimulationError::InvalidParameters {
            distribution: DistributionKind::Triangular,
            ..
        }
    ));
}
