//! Run settings for fixed and adaptive simulations

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimulationError};

/// Largest number of trials an adaptive run reserves up front
pub const MAX_RESERVED_TRIALS: usize = 1 << 20;

/// Parameters of the adaptive (convergence-stopped) run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceConfig {
    /// Relative change of the cumulative mean below which the run stops
    #[serde(alias = "tol")]
    pub tolerance: f64,
    /// Trials to run before the convergence test is allowed to pass
    #[serde(alias = "min_iter")]
    pub min_trials: usize,
    /// Trial cap; the last batch may overshoot it by up to `batch_size - 1`
    #[serde(alias = "max_iter")]
    pub max_trials: usize,
    /// Trials per batch
    #[serde(alias = "chunk")]
    pub batch_size: usize,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            min_trials: 1_000,
            max_trials: 100_000,
            batch_size: 1_000,
        }
    }
}

impl ConvergenceConfig {
    /// Check the positivity and ordering constraints on the trial counts
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(SimulationError::InvalidConfig(
                "batch_size must be positive".into(),
            ));
        }
        if self.min_trials == 0 || self.max_trials == 0 {
            return Err(SimulationError::InvalidConfig(
                "min_trials and max_trials must be positive".into(),
            ));
        }
        if self.min_trials > self.max_trials {
            return Err(SimulationError::InvalidConfig(format!(
                "min_trials ({}) exceeds max_trials ({})",
                self.min_trials, self.max_trials
            )));
        }
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }

    /// Upper bound on the number of trials a run with this config executes.
    /// Saturates at `usize::MAX`.
    #[must_use]
    pub fn trial_capacity(&self) -> usize {
        let batch = self.batch_size.max(1);
        self.max_trials.div_ceil(batch).saturating_mul(batch)
    }

    /// Trials to reserve table space for before the first batch.
    ///
    /// Covers the batches needed to reach `min_trials`, never more than the
    /// run can use and never more than [`MAX_RESERVED_TRIALS`]. Longer runs
    /// grow the table as batches arrive.
    #[must_use]
    pub fn initial_capacity(&self) -> usize {
        let batch = self.batch_size.max(1);
        let through_min = self.min_trials.div_ceil(batch).saturating_mul(batch);
        through_min
            .min(self.trial_capacity())
            .min(MAX_RESERVED_TRIALS)
    }
}

/// How many trials a run executes.
///
/// Serialized with a `mode` tag. Deserialization also accepts the older
/// untagged record shape `{use_auto, tol, max_iter}` / `{use_auto, n_iter}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RunSettings {
    /// Exactly `trials` trials in one pass
    Fixed { trials: usize },
    /// Batches until the cumulative mean stabilizes or the cap is hit
    Adaptive(ConvergenceConfig),
}

#[derive(Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
enum TaggedSettings {
    Fixed { trials: usize },
    Adaptive(ConvergenceConfig),
}

#[derive(Deserialize)]
struct LegacySettings {
    use_auto: bool,
    #[serde(default)]
    tol: Option<f64>,
    #[serde(default)]
    max_iter: Option<usize>,
    #[serde(default)]
    n_iter: Option<usize>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SettingsRecord {
    Tagged(TaggedSettings),
    Legacy(LegacySettings),
}

impl From<LegacySettings> for RunSettings {
    fn from(legacy: LegacySettings) -> Self {
        if !legacy.use_auto {
            return legacy
                .n_iter
                .map_or_else(RunSettings::default, RunSettings::fixed);
        }

        let defaults = ConvergenceConfig::default();
        let max_trials = legacy.max_iter.unwrap_or(defaults.max_trials);
        RunSettings::Adaptive(ConvergenceConfig {
            tolerance: legacy.tol.unwrap_or(defaults.tolerance),
            min_trials: defaults.min_trials.min(max_trials),
            max_trials,
            batch_size: defaults.batch_size,
        })
    }
}

impl<'de> Deserialize<'de> for RunSettings {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match SettingsRecord::deserialize(deserializer)? {
            SettingsRecord::Tagged(TaggedSettings::Fixed { trials }) => RunSettings::Fixed { trials },
            SettingsRecord::Tagged(TaggedSettings::Adaptive(config)) => RunSettings::Adaptive(config),
            SettingsRecord::Legacy(legacy) => legacy.into(),
        })
    }
}

impl Default for RunSettings {
    fn default() -> Self {
        RunSettings::Fixed { trials: 10_000 }
    }
}

impl RunSettings {
    #[must_use]
    pub fn fixed(trials: usize) -> Self {
        RunSettings::Fixed { trials }
    }

    #[must_use]
    pub fn adaptive(config: ConvergenceConfig) -> Self {
        RunSettings::Adaptive(config)
    }

    #[must_use]
    pub fn is_adaptive(&self) -> bool {
        matches!(self, RunSettings::Adaptive(_))
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            RunSettings::Fixed { trials: 0 } => Err(SimulationError::InvalidConfig(
                "trial count must be positive".into(),
            )),
            RunSettings::Fixed { .. } => Ok(()),
            RunSettings::Adaptive(config) => config.validate(),
        }
    }
}
