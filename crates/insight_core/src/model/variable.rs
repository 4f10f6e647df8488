//! Input variable definitions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// Closed set of distributions a variable can be drawn from.
///
/// All three are bounded by the variable's `[min, max]` range and centred on
/// its midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistributionKind {
    /// Flat density over `[min, max]`
    #[serde(alias = "Uniform", alias = "균등")]
    Uniform,
    /// Bell curve with `[min, max]` as a ±3σ window, clamped to the bounds
    #[serde(alias = "Normal", alias = "정규")]
    Normal,
    /// Triangle peaking at the midpoint
    #[serde(alias = "Triangular", alias = "삼각")]
    Triangular,
}

impl DistributionKind {
    pub const ALL: [DistributionKind; 3] = [
        DistributionKind::Uniform,
        DistributionKind::Normal,
        DistributionKind::Triangular,
    ];

    /// Canonical lowercase identifier
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DistributionKind::Uniform => "uniform",
            DistributionKind::Normal => "normal",
            DistributionKind::Triangular => "triangular",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionKind {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "uniform" | "균등" => Ok(DistributionKind::Uniform),
            "normal" | "정규" => Ok(DistributionKind::Normal),
            "triangular" | "삼각" => Ok(DistributionKind::Triangular),
            other => Err(SimulationError::InvalidDistribution(other.to_string())),
        }
    }
}

/// One input dimension of a simulation.
///
/// `min < max` is expected to hold; the engine degrades to a constant `min`
/// rather than failing when it does not. Names are not checked for
/// uniqueness and weights are not checked for sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSpec {
    pub name: String,
    pub min: f64,
    pub max: f64,
    #[serde(rename = "dist", alias = "distribution")]
    pub distribution: DistributionKind,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl VariableSpec {
    /// Create a variable with weight 1.0
    #[must_use]
    pub fn new(name: impl Into<String>, min: f64, max: f64, distribution: DistributionKind) -> Self {
        Self {
            name: name.into(),
            min,
            max,
            distribution,
            weight: default_weight(),
        }
    }

    /// Set the relative weight
    #[must_use]
    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Whether the bounds describe a non-empty range
    #[must_use]
    pub fn has_valid_bounds(&self) -> bool {
        self.min < self.max
    }

    /// Midpoint of the range (mean of Normal, mode of Triangular)
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}
