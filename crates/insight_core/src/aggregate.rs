//! Trial aggregation: sample every variable, then reduce each trial to one
//! outcome with a normalized weighted sum.

use rand::Rng;

use crate::error::{Result, SimulationError};
use crate::model::{OutcomeTable, VariableSpec};

/// Weights divided by their sum.
///
/// Fails with `InvalidWeights` when the sum is zero (which includes an empty
/// variable list) or not finite. Negative weights are passed through.
pub fn normalized_weights(variables: &[VariableSpec]) -> Result<Vec<f64>> {
    let total: f64 = variables.iter().map(|v| v.weight).sum();
    if total == 0.0 || !total.is_finite() {
        return Err(SimulationError::InvalidWeights { total });
    }
    Ok(variables.iter().map(|v| v.weight / total).collect())
}

/// Per-trial linear combination of the given columns.
///
/// `columns` and `weights` are paired by position; all columns must have the
/// same length.
pub fn weighted_outcomes(columns: &[Vec<f64>], weights: &[f64]) -> Vec<f64> {
    let n_trials = columns.first().map_or(0, Vec::len);
    let mut outcomes = vec![0.0; n_trials];
    for (column, &weight) in columns.iter().zip(weights) {
        for (outcome, &value) in outcomes.iter_mut().zip(column) {
            *outcome += weight * value;
        }
    }
    outcomes
}

/// Run `n_trials` joint draws of all variables.
///
/// Columns appear in the same order as `variables`. Nothing is returned if
/// any variable fails to sample.
pub fn run_trials<R: Rng + ?Sized>(
    variables: &[VariableSpec],
    n_trials: usize,
    rng: &mut R,
) -> Result<OutcomeTable> {
    let weights = normalized_weights(variables)?;

    let columns = variables
        .iter()
        .map(|var| var.sample(rng, n_trials))
        .collect::<Result<Vec<_>>>()?;

    let outcomes = weighted_outcomes(&columns, &weights);
    let names = variables.iter().map(|v| v.name.clone()).collect();

    Ok(OutcomeTable::from_parts(names, columns, outcomes))
}
