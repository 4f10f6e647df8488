//! Columnar table of per-trial samples and outcomes

use serde::{Deserialize, Serialize};

/// Name of the derived column holding each trial's weighted outcome
pub const OUTCOME_COLUMN: &str = "outcome";

/// Result table of one simulation run.
///
/// Stored column-major: one column per input variable, in the order the
/// variables were given, plus the derived outcome column. Index `i` in every
/// column belongs to the same trial.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutcomeTable {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
    outcomes: Vec<f64>,
}

impl OutcomeTable {
    /// Create an empty table for the given variable names
    #[must_use]
    pub fn with_capacity(names: Vec<String>, trials: usize) -> Self {
        let columns = names.iter().map(|_| Vec::with_capacity(trials)).collect();
        Self {
            names,
            columns,
            outcomes: Vec::with_capacity(trials),
        }
    }

    /// Assemble a table from already-synchronized columns.
    ///
    /// Callers guarantee one column per name and equal column lengths.
    pub(crate) fn from_parts(names: Vec<String>, columns: Vec<Vec<f64>>, outcomes: Vec<f64>) -> Self {
        debug_assert_eq!(names.len(), columns.len());
        debug_assert!(columns.iter().all(|c| c.len() == outcomes.len()));
        Self {
            names,
            columns,
            outcomes,
        }
    }

    /// Append every row of `other`. Column layouts must match.
    pub(crate) fn append(&mut self, other: OutcomeTable) {
        debug_assert_eq!(self.names, other.names);
        for (column, extra) in self.columns.iter_mut().zip(other.columns) {
            column.extend(extra);
        }
        self.outcomes.extend(other.outcomes);
    }

    /// Variable column names, in input order
    pub fn variable_names(&self) -> &[String] {
        &self.names
    }

    /// All column names, variables first and the outcome column last
    pub fn column_names(&self) -> Vec<&str> {
        self.names
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(OUTCOME_COLUMN))
            .collect()
    }

    /// Number of trials (rows)
    pub fn num_trials(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of input variables
    pub fn num_variables(&self) -> usize {
        self.names.len()
    }

    /// Number of columns including the outcome column
    pub fn num_columns(&self) -> usize {
        self.names.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Weighted outcome of every trial, in trial order
    pub fn outcomes(&self) -> &[f64] {
        &self.outcomes
    }

    /// Sampled values of the variable at `index`
    pub fn variable_column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Look up a column by name; `"outcome"` returns the outcome column
    /// unless a variable shadows it.
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
            .or_else(|| (name == OUTCOME_COLUMN).then_some(self.outcomes.as_slice()))
    }

    /// Iterate `(name, values)` over the variable columns
    pub fn variable_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .zip(&self.columns)
            .map(|(name, column)| (name.as_str(), column.as_slice()))
    }

    /// Values of one trial across all columns (variables, then outcome)
    pub fn row(&self, index: usize) -> Option<Vec<f64>> {
        let outcome = *self.outcomes.get(index)?;
        let mut row: Vec<f64> = self.columns.iter().map(|c| c[index]).collect();
        row.push(outcome);
        Some(row)
    }
}
