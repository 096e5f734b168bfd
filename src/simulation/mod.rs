//! Simulation orchestration and control
//!
//! This module contains the orchestrator that starts the resort, the snapshot
//! ticker, run statistics, shutdown helpers, logging setup and error handling.
//!
//! # Overview
//!
//! - **SimulationOrchestrator**: builds the resort and spawns every task
//! - **RunningSimulation**: owns the tasks and stops them on shutdown
//! - **SnapshotTicker**: publishes a [`ResortSnapshot`] every interval
//! - **RunStatistics**: boarding and maintenance totals collected at shutdown
//! - **SimulationError**: errors surfaced while building or running a resort
//!
//! # Usage Example
//!
//! ```rust
//! use ski_resort_simulator::simulation::*;
//! use ski_resort_simulator::types::*;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() -> Result<(), SimulationError> {
//! let config = ResortConfig {
//!     skier_count: 20,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let simulation = SimulationOrchestrator::new(config)?.start()?;
//! let statistics = simulation.run_for(Duration::from_secs(10)).await?;
//! assert!(statistics.is_conserved());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod shutdown;
pub mod snapshot;
pub mod statistics;

// Re-export all public types for convenience
pub use error::*;
pub use logging::*;
pub use orchestrator::*;
pub use shutdown::*;
pub use snapshot::*;
pub use statistics::*;
