//! Error types for the simulation harness.

use quorumsim_core::SimError;
use thiserror::Error;

/// Errors that can occur while driving simulations.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The core rejected an input
    #[error(transparent)]
    Sim(#[from] SimError),

    /// Export file could not be written
    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Export could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Scenario name not recognised
    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

/// Result alias for the harness.
pub type Result<T> = std::result::Result<T, HarnessError>;
