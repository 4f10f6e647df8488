//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use insight_core::model::{ConvergenceConfig, DistributionKind, RunSettings, VariableSpec};
use insight_core::trend::DEFAULT_TREND_POINTS;

#[derive(Parser, Debug)]
#[command(name = "insight")]
#[command(about = "Monte Carlo decision analysis in the terminal")]
pub struct Args {
    /// Path to the data directory (default: ~/.insight/)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a simulation and print the report
    Run(RunArgs),
    /// Manage saved scenarios
    #[command(subcommand)]
    Scenario(ScenarioCommand),
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Saved scenario to run
    #[arg(short, long, conflicts_with = "variables")]
    pub scenario: Option<String>,

    /// Variable as NAME:MIN:MAX:DIST[:WEIGHT] (repeatable)
    #[arg(long = "var", value_name = "SPEC", value_parser = parse_variable)]
    pub variables: Vec<VariableSpec>,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,

    /// Also write every trial (variables and outcome) to a CSV file
    #[arg(long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Number of points in the running-mean trend
    #[arg(long, default_value_t = DEFAULT_TREND_POINTS)]
    pub trend_points: usize,
}

#[derive(Subcommand, Debug)]
pub enum ScenarioCommand {
    /// Save variables and settings under a name
    Save {
        name: String,

        /// Variable as NAME:MIN:MAX:DIST[:WEIGHT] (repeatable)
        #[arg(long = "var", value_name = "SPEC", value_parser = parse_variable, required = true)]
        variables: Vec<VariableSpec>,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// List saved scenarios
    List,
    /// Print a saved scenario
    Show { name: String },
    /// Delete a saved scenario
    Delete { name: String },
}

/// Fixed or adaptive run settings from flags
#[derive(clap::Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Run exactly N trials
    #[arg(long, conflicts_with = "adaptive")]
    pub trials: Option<usize>,

    /// Run batches until the running mean stabilizes
    #[arg(long)]
    pub adaptive: bool,

    /// Relative change of the running mean that counts as converged
    #[arg(long, requires = "adaptive")]
    pub tolerance: Option<f64>,

    /// Trials to run before convergence may stop the run
    #[arg(long, requires = "adaptive")]
    pub min_trials: Option<usize>,

    /// Trial cap for adaptive runs
    #[arg(long, requires = "adaptive")]
    pub max_trials: Option<usize>,

    /// Trials per adaptive batch
    #[arg(long, requires = "adaptive")]
    pub batch_size: Option<usize>,
}

impl SettingsArgs {
    /// Whether any settings flag was given
    pub fn is_specified(&self) -> bool {
        self.trials.is_some() || self.adaptive
    }

    /// Settings from the flags, defaults for anything not given
    pub fn to_settings(&self) -> RunSettings {
        if !self.adaptive {
            return self.trials.map_or_else(RunSettings::default, RunSettings::fixed);
        }

        let defaults = ConvergenceConfig::default();
        RunSettings::adaptive(ConvergenceConfig {
            tolerance: self.tolerance.unwrap_or(defaults.tolerance),
            min_trials: self.min_trials.unwrap_or(defaults.min_trials),
            max_trials: self.max_trials.unwrap_or(defaults.max_trials),
            batch_size: self.batch_size.unwrap_or(defaults.batch_size),
        })
    }
}

/// Parse `NAME:MIN:MAX:DIST[:WEIGHT]`
pub fn parse_variable(spec: &str) -> Result<VariableSpec, String> {
    let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
    if !(4..=5).contains(&parts.len()) {
        return Err(format!(
            "expected NAME:MIN:MAX:DIST[:WEIGHT], got '{spec}'"
        ));
    }

    let name = parts[0];
    if name.is_empty() {
        return Err("variable name is empty".to_string());
    }

    let number = |field: &str, value: &str| {
        value
            .parse::<f64>()
            .map_err(|_| format!("{field} of '{name}' is not a number: '{value}'"))
    };
    let min = number("min", parts[1])?;
    let max = number("max", parts[2])?;
    let distribution: DistributionKind = parts[3].parse().map_err(|e| format!("{e}"))?;

    let mut variable = VariableSpec::new(name, min, max, distribution);
    if let Some(weight) = parts.get(4) {
        variable = variable.weight(number("weight", weight)?);
    }
    Ok(variable)
}
