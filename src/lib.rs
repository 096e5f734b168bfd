//! Ski Resort Simulator
//!
//! A concurrent simulation of skiers moving through a ski resort: stations on
//! three elevation levels, lifts carrying skiers uphill in batches and descent
//! routes taking them back down.
//!
//! # Overview
//!
//! Every skier and every lift runs as its own task. Lifts board queued skiers
//! at a fixed boarding interval, respect their capacity and periodically drain
//! and stop for maintenance. Skiers pick a random station on another level,
//! plan the shortest chain of available lifts to reach it, or ski straight down
//! a descent route. A snapshot task reports the distribution of skiers at a
//! fixed interval.
//!
//! ## Key Features
//!
//! - **Event-driven lifts**: boarding, arrivals and maintenance without polling
//! - **FIFO boarding queues**: skiers board in the order they joined
//! - **Shortest-path planning**: breadth-first search over available lifts
//! - **On-demand descent routes**: created once per station pair, shared by all
//! - **Consistent snapshots**: every skier is at a station, on a lift or on a route
//! - **Cooperative shutdown**: all tasks stop promptly and leave counters balanced
//!
//! ## Quick Start
//!
//! ```rust
//! use ski_resort_simulator::*;
//!
//! // Describe the resort; the default is a three-station resort with three lifts
//! let config = ResortConfig {
//!     skier_count: 25,
//!     ..Default::default()
//! };
//!
//! // Build it
//! let orchestrator = SimulationOrchestrator::new(config)?;
//!
//! // Inspect the starting state
//! let snapshot = orchestrator.initial_snapshot();
//! println!("{} skiers waiting at {}", snapshot.stations[0].occupants, snapshot.stations[0].name);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Core types, identifiers, and configuration
//! - [`resort`]: Stations, routes, the registry and the resort builder
//! - [`lift`]: Lifts, boarding queues and lift control loops
//! - [`skier`]: Skier tasks and uphill path planning
//! - [`simulation`]: Orchestration, snapshots, statistics and logging
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Resort    │    │    Lift     │
//! │             │    │             │    │             │
//! │ Identifiers │◄───┤ Stations    │◄───┤ Queue       │
//! │ Enums       │    │ Routes      │    │ Controller  │
//! │ Config      │    │ Registry    │    │             │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                            ▲                   ▲
//!                            │                   │
//!                    ┌─────────────┐    ┌─────────────┐
//!                    │   Skier     │    │ Simulation  │
//!                    │             │    │             │
//!                    │ Behavior    │◄───┤ Orchestrator│
//!                    │ Pathfinding │    │ Snapshots   │
//!                    └─────────────┘    └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod lift;
pub mod resort;
pub mod simulation;
pub mod skier;
pub mod types;

// Core types and identifiers
pub use types::{
    ConfigError, ConfigValidationError, Level, LiftConfig, LiftState, ResortConfig, RouteConfig,
    RunId, SkierId, SkierStatus, StationConfig, StationId,
};

// Resort topology
pub use resort::{Resort, ResortBuilder, ResortRegistry, Route, Station};

// Lifts
pub use lift::{BoardingError, Lift, LiftController, LiftParams};

// Skiers
pub use skier::{find_lift_path, Skier, SkierHandle};

// Simulation types and functionality
pub use simulation::{
    LoggingConfig, ResortSnapshot, RunStatistics, RunningSimulation, SimulationError,
    SimulationOrchestrator, SimulationResult, SnapshotTicker, SnapshotTotals,
};
