//! Command execution

use std::path::PathBuf;

use color_eyre::eyre::{Result, bail, eyre};
use insight_core::model::{
    RunSettings, SensitivityRanking, SimulationReport, SummaryStatistics, Termination,
    TrendSeries, VariableSpec,
};
use insight_core::simulation::run_report;
use serde::Serialize;

use crate::cli::{Command, RunArgs, ScenarioCommand};
use crate::render::render_report;
use crate::storage::{ScenarioRecord, ScenarioStore};
use crate::util::export::write_csv;
use crate::util::format::{format_count, format_number};

/// Report fields printed by `--json`; the per-trial table is left out
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub seed: u64,
    pub trials: usize,
    pub termination: Option<Termination>,
    pub statistics: &'a SummaryStatistics,
    pub sensitivity: &'a SensitivityRanking,
    pub trend: &'a TrendSeries,
}

impl<'a> From<&'a SimulationReport> for JsonReport<'a> {
    fn from(report: &'a SimulationReport) -> Self {
        Self {
            seed: report.seed,
            trials: report.trials,
            termination: report.termination,
            statistics: &report.statistics,
            sensitivity: &report.sensitivity,
            trend: &report.trend,
        }
    }
}

/// What `run` resolved to simulate
#[derive(Debug)]
struct RunPlan {
    title: Option<String>,
    variables: Vec<VariableSpec>,
    settings: RunSettings,
}

pub struct App {
    store: ScenarioStore,
}

impl App {
    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            store: ScenarioStore::new(data_dir),
        }
    }

    pub fn execute(&self, command: Command) -> Result<()> {
        match command {
            Command::Run(args) => self.run(&args),
            Command::Scenario(cmd) => self.scenario(cmd),
        }
    }

    fn run(&self, args: &RunArgs) -> Result<()> {
        let plan = self.plan_run(args)?;
        check_bounds(&plan.variables)?;

        tracing::info!(
            scenario = plan.title.as_deref().unwrap_or("<inline>"),
            variables = plan.variables.len(),
            adaptive = plan.settings.is_adaptive(),
            "Running simulation"
        );

        let report = run_report(&plan.variables, &plan.settings, args.seed, args.trend_points)?;

        tracing::info!(
            seed = report.seed,
            trials = report.trials,
            mean = report.statistics.mean,
            termination = ?report.termination,
            "Simulation finished"
        );

        if args.json {
            println!("{}", serde_json::to_string_pretty(&JsonReport::from(&report))?);
        } else {
            print!("{}", render_report(&report, plan.title.as_deref()));
        }

        if let Some(path) = &args.csv {
            write_csv(&report.table, path)?;
            if !args.json {
                println!("Wrote {} trials to {}", format_count(report.trials), path.display());
            }
        }
        Ok(())
    }

    /// Variables and settings from a saved scenario or from flags. Settings
    /// flags override a scenario's stored settings.
    fn plan_run(&self, args: &RunArgs) -> Result<RunPlan> {
        if let Some(name) = &args.scenario {
            let record = self.store.load(name)?;
            let settings = if args.settings.is_specified() {
                args.settings.to_settings()
            } else {
                record.settings
            };
            return Ok(RunPlan {
                title: Some(record.name),
                variables: record.variables,
                settings,
            });
        }

        if args.variables.is_empty() {
            bail!("No variables given; pass --var NAME:MIN:MAX:DIST or --scenario NAME");
        }
        Ok(RunPlan {
            title: None,
            variables: args.variables.clone(),
            settings: args.settings.to_settings(),
        })
    }

    fn scenario(&self, cmd: ScenarioCommand) -> Result<()> {
        match cmd {
            ScenarioCommand::Save {
                name,
                variables,
                settings,
            } => {
                check_bounds(&variables)?;
                let settings = settings.to_settings();
                settings.validate()?;

                let record = ScenarioRecord::new(name, variables, settings);
                let path = self.store.save(&record)?;
                println!("Saved '{}' to {}", record.name, path.display());
            }
            ScenarioCommand::List => {
                let records = self.store.list()?;
                if records.is_empty() {
                    println!("No saved scenarios in {}", self.store.root().display());
                }
                for record in records {
                    println!("{}", describe_record(&record));
                }
            }
            ScenarioCommand::Show { name } => {
                let record = self.store.load(&name)?;
                print!("{}", record.to_yaml()?);
            }
            ScenarioCommand::Delete { name } => {
                self.store.delete(&name)?;
                println!("Deleted '{name}'");
            }
        }
        Ok(())
    }
}

/// Reject variables whose range is empty or inverted before sampling
pub fn check_bounds(variables: &[VariableSpec]) -> Result<()> {
    let invalid: Vec<String> = variables
        .iter()
        .filter(|v| !v.has_valid_bounds())
        .map(|v| format!("'{}' (min {} must be less than max {})", v.name, v.min, v.max))
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(eyre!("Invalid bounds for {}", invalid.join(", ")))
    }
}

pub fn describe_settings(settings: &RunSettings) -> String {
    match settings {
        RunSettings::Fixed { trials } => format!("fixed, {} trials", format_count(*trials)),
        RunSettings::Adaptive(config) => format!(
            "adaptive, tolerance {}, {}..{} trials in batches of {}",
            config.tolerance,
            format_count(config.min_trials),
            format_count(config.max_trials),
            format_count(config.batch_size),
        ),
    }
}

fn describe_record(record: &ScenarioRecord) -> String {
    let saved = record
        .saved_at
        .map(|ts| format!("  saved {}", ts.strftime("%Y-%m-%d %H:%M")))
        .unwrap_or_default();
    let ranges: Vec<String> = record
        .variables
        .iter()
        .map(|v| {
            format!(
                "{} [{}, {}]",
                v.name,
                format_number(v.min, 2),
                format_number(v.max, 2)
            )
        })
        .collect();

    format!(
        "{}  ({} variables; {}){saved}\n    {}",
        record.name,
        format_count(record.variables.len()),
        describe_settings(&record.settings),
        ranges.join(", ")
    )
}
