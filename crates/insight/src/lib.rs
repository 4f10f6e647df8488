//! Terminal front end for the insight simulation engine
//!
//! Runs simulations from inline `--var` definitions or saved scenarios and
//! prints a text or JSON report. Scenarios are stored as YAML files in the
//! data directory, next to the log file.

pub mod app;
pub mod cli;
pub mod logging;
pub mod render;
pub mod storage;
pub mod util;

pub use app::App;
pub use logging::init_logging;
