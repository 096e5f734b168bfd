//! Skiers
//!
//! This module contains the skier task, the shared per-skier state other tasks
//! observe, and the uphill path search over available lifts.
//!
//! # Overview
//!
//! - **SkierHandle**: status and station of a skier, readable by any task
//! - **Skier**: the task choosing targets, riding lifts and skiing descents
//! - **find_lift_path**: breadth-first search for the shortest lift chain

#[allow(clippy::module_inception)]
pub mod skier;
pub mod pathfinding;
pub mod state;

// Re-export all public types for convenience
pub use pathfinding::find_lift_path;
pub use skier::{rng_for, timing, Skier};
pub use state::SkierHandle;
