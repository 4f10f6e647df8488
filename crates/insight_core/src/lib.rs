//! Monte Carlo decision-analysis engine
//!
//! This crate provides the simulation core behind the `insight` tool.
//! It supports:
//! - Three bounded input distributions (Uniform, Normal clamped to bounds, Triangular)
//! - Normalized weighted aggregation of independent variables into one outcome per trial
//! - Fixed-size runs and adaptive runs that stop once the cumulative mean stabilizes
//! - Percentile summaries (P5/P95 interval, mean, median, standard deviation)
//! - Running-mean trend extraction for convergence charts
//! - Pearson-correlation sensitivity ranking
//!
//! # Example
//!
//! ```ignore
//! use insight_core::model::{DistributionKind, RunSettings, VariableSpec};
//! use insight_core::simulation::run_report;
//!
//! let variables = vec![
//!     VariableSpec::new("Revenue", 80.0, 120.0, DistributionKind::Normal).weight(2.0),
//!     VariableSpec::new("Cost", 40.0, 70.0, DistributionKind::Triangular),
//! ];
//!
//! let report = run_report(&variables, &RunSettings::fixed(10_000), Some(42), 200)?;
//! println!("90% interval: [{:.2}, {:.2}]", report.statistics.p5, report.statistics.p95);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod convergence;
pub mod error;
pub mod progress;
pub mod sampling;
pub mod sensitivity;
pub mod simulation;
pub mod stats;
pub mod trend;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use error::{Result, SimulationError};
pub use model::{
    ConvergenceConfig, DistributionKind, OutcomeTable, RunSettings, SensitivityRanking,
    SimulationReport, SummaryStatistics, Termination, TrendSeries, VariableSpec,
};
