//! Behavioural tests for the simulation engine
//!
//! Tests are organized by topic:
//! - `sampling` - Bounds and shape of each distribution
//! - `aggregation` - Weighted outcome column
//! - `convergence` - Adaptive run termination and table shape
//! - `statistics` - Summary statistics and trend extraction
//! - `sensitivity` - Correlation ranking
//! - `simulation` - End-to-end reports, seeding and replication

mod aggregation;
mod convergence;

use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Deterministic RNG for tests
pub(crate) fn test_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
