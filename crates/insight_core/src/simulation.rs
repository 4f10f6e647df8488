use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::aggregate::run_trials;
use crate::convergence::run_adaptive_with_progress;
use crate::error::{Result, SimulationError};
use crate::model::{
    OutcomeTable, RunSettings, SimulationReport, Termination, TrendSeries, VariableSpec,
};
use crate::progress::RunProgress;
use crate::sensitivity::rank_sensitivity;
use crate::stats::summarize;
use crate::trend::extract_trend;

/// Outcome table of a run plus the trend it naturally produces
#[derive(Debug, Clone)]
pub struct SimulationRun {
    pub table: OutcomeTable,
    pub trend: TrendSeries,
    /// `None` for fixed-size runs
    pub termination: Option<Termination>,
}

/// Execute a run according to `settings`.
///
/// Fixed runs take their trend from the finished table (`trend_points`
/// evenly spaced prefixes); adaptive runs use the per-batch cumulative means
/// recorded while running.
pub fn simulate<R: Rng + ?Sized>(
    variables: &[VariableSpec],
    settings: &RunSettings,
    trend_points: usize,
    rng: &mut R,
    progress: &RunProgress,
) -> Result<SimulationRun> {
    settings.validate()?;

    match settings {
        RunSettings::Fixed { trials } => {
            if progress.is_cancelled() {
                return Err(SimulationError::Cancelled);
            }
            let table = run_trials(variables, *trials, rng)?;
            progress.add(*trials);
            let trend = extract_trend(table.outcomes(), trend_points)?;
            Ok(SimulationRun {
                table,
                trend,
                termination: None,
            })
        }
        RunSettings::Adaptive(config) => {
            let run = run_adaptive_with_progress(variables, config, rng, progress)?;
            let trend = run.trend();
            Ok(SimulationRun {
                table: run.table,
                trend,
                termination: Some(run.termination),
            })
        }
    }
}

/// Summarize a finished run into a report
pub fn analyze(run: SimulationRun, seed: u64) -> Result<SimulationReport> {
    let statistics = summarize(run.table.outcomes())?;
    let sensitivity = rank_sensitivity(&run.table);

    Ok(SimulationReport {
        seed,
        trials: run.table.num_trials(),
        statistics,
        trend: run.trend,
        sensitivity,
        termination: run.termination,
        table: run.table,
    })
}

/// Run and summarize with a dedicated `SmallRng`.
///
/// `seed = None` draws a fresh seed; the seed used is recorded in the report
/// so the run can be reproduced.
pub fn run_report(
    variables: &[VariableSpec],
    settings: &RunSettings,
    seed: Option<u64>,
    trend_points: usize,
) -> Result<SimulationReport> {
    run_report_with_progress(variables, settings, seed, trend_points, &RunProgress::new())
}

/// Like [`run_report`], reporting progress and honoring cancellation
pub fn run_report_with_progress(
    variables: &[VariableSpec],
    settings: &RunSettings,
    seed: Option<u64>,
    trend_points: usize,
    progress: &RunProgress,
) -> Result<SimulationReport> {
    let seed = seed.unwrap_or_else(rand::random);
    tracing::debug!(
        seed,
        variables = variables.len(),
        adaptive = settings.is_adaptive(),
        "Starting simulation"
    );

    let mut rng = SmallRng::seed_from_u64(seed);
    let run = simulate(variables, settings, trend_points, &mut rng, progress)?;
    analyze(run, seed)
}

/// Seeds for `count` replications, derived deterministically from `base_seed`
#[must_use]
pub fn replication_seeds(base_seed: u64, count: usize) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(base_seed);
    (0..count).map(|_| rng.next_u64()).collect()
}

/// Run `count` independent replications of the same scenario.
///
/// Each replication owns a `SmallRng` seeded from [`replication_seeds`], so
/// no sampling state is shared between them. With the `parallel` feature the
/// replications run on the rayon pool; results are in seed order either way.
pub fn replicate(
    variables: &[VariableSpec],
    settings: &RunSettings,
    count: usize,
    base_seed: u64,
    trend_points: usize,
) -> Result<Vec<SimulationReport>> {
    let seeds = replication_seeds(base_seed, count);

    #[cfg(feature = "parallel")]
    let seeds = seeds.into_par_iter();
    #[cfg(not(feature = "parallel"))]
    let seeds = seeds.into_iter();

    seeds
        .map(|seed| run_report(variables, settings, Some(seed), trend_points))
        .collect()
}
