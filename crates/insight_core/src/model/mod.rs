mod results;
mod settings;
mod table;
mod variable;

pub use results::{
    AdaptiveRun, SensitivityEntry, SensitivityRanking, SimulationReport, SummaryStatistics,
    Termination, TrendSeries,
};
pub use settings::{ConvergenceConfig, MAX_RESERVED_TRIALS, RunSettings};
pub use table::{OUTCOME_COLUMN, OutcomeTable};
pub use variable::{DistributionKind, VariableSpec};
