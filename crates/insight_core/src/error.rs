use std::fmt;

use crate::model::DistributionKind;

/// Errors raised by the simulation engine.
///
/// Every variant is local to the call that produced it: a failed run never
/// hands back a partial outcome table.
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Distribution identifier outside {uniform, normal, triangular}
    InvalidDistribution(String),
    /// The sampling distribution rejected the variable's bounds
    InvalidParameters {
        distribution: DistributionKind,
        min: f64,
        max: f64,
        reason: &'static str,
    },
    /// Variable weights sum to zero, so they cannot be normalized
    InvalidWeights { total: f64 },
    /// Statistics were requested over zero outcomes
    EmptyInput,
    /// Run or trend parameters are out of range
    InvalidConfig(String),
    /// Adaptive run was cancelled between batches
    Cancelled,
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulationError::InvalidDistribution(name) => {
                write!(f, "unknown distribution '{name}' (expected uniform, normal or triangular)")
            }
            SimulationError::InvalidParameters {
                distribution,
                min,
                max,
                reason,
            } => {
                write!(
                    f,
                    "invalid {distribution} parameters (min={min}, max={max}): {reason}"
                )
            }
            SimulationError::InvalidWeights { total } => {
                write!(f, "variable weights sum to {total}; cannot normalize")
            }
            SimulationError::EmptyInput => write!(f, "no outcomes to summarize"),
            SimulationError::InvalidConfig(msg) => write!(f, "configuration error: {msg}"),
            SimulationError::Cancelled => write!(f, "simulation cancelled"),
        }
    }
}

impl std::error::Error for SimulationError {}

pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimulationError::InvalidDistribution("poisson".into());
        assert_eq!(
            err.to_string(),
            "unknown distribution 'poisson' (expected uniform, normal or triangular)"
        );

        let err = SimulationError::InvalidWeights { total: 0.0 };
        assert_eq!(err.to_string(), "variable weights sum to 0; cannot normalize");

        let err = SimulationError::InvalidParameters {
            distribution: DistributionKind::Normal,
            min: f64::NEG_INFINITY,
            max: 1.0,
            reason: "bounds must be finite",
        };
        assert_eq!(
            err.to_string(),
            "invalid normal parameters (min=-inf, max=1): bounds must be finite"
        );
    }
}
