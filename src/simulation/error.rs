//! Error types and handling
//!
//! This module contains the errors surfaced while building and running a resort.
//! Failures inside individual skier or lift tasks never reach here: those tasks
//! end quietly on shutdown, so a [`SimulationError`] always concerns the run as
//! a whole.

use crate::types::{ConfigError, ConfigValidationError};
use thiserror::Error;

/// Errors that can occur while building or running a simulation
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configuration failed validation
    #[error("Invalid resort configuration: {0}")]
    Validation(#[from] ConfigValidationError),

    /// The resort graph could not be assembled
    #[error("Resort topology error: {0}")]
    TopologyError(String),

    /// A skier, lift or snapshot task panicked or was aborted
    #[error("Simulation task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

impl SimulationError {
    /// Create a topology error
    pub fn topology_error(msg: impl Into<String>) -> Self {
        Self::TopologyError(msg.into())
    }

    /// Get the error category
    pub fn category(&self) -> &'static str {
        match self {
            SimulationError::Config(_) => "Configuration",
            SimulationError::Validation(_) => "Validation",
            SimulationError::TopologyError(_) => "Topology",
            SimulationError::TaskFailed(_) => "Task",
        }
    }
}

/// Result type for simulation operations
pub type SimulationResult<T> = Result<T, SimulationError>;
