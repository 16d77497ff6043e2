//! QuorumSim Simulation Harness
//!
//! This crate drives the QuorumSim core the way the availability dashboard
//! does, without the dashboard:
//! - **Configuration**: dashboard inputs (monthly failures, hours to fix)
//!   converted into the core's MTBF/MTTR cache key
//! - **Randomness**: a seeded ChaCha8 context, so any run is reproducible
//!   from its seed number
//! - **Scenarios**: named parameter sets with pass/fail assertions
//! - **Export**: JSON timelines for external charting
//!
//! # Usage
//!
//! ```ignore
//! use quorumsim_sim::{ScenarioRunner, ScenarioId};
//!
//! let runner = ScenarioRunner::new(42);
//! let result = runner.run(ScenarioId::DashboardDefault);
//! assert!(result.passed);
//! ```

mod context;
mod error;
mod exporter;
mod runner;
pub mod config;
pub mod scenarios;

pub use config::SimConfig;
pub use context::SeededContext;
pub use error::{HarnessError, Result};
pub use exporter::{AvailabilityEntry, QuorumSeries, SimExport};
pub use runner::{ScenarioResult, ScenarioRunner};
pub use scenarios::ScenarioId;
