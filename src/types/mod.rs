//! Core types and identifiers for the ski resort simulator
//!
//! This module contains fundamental types, identifiers, and configuration structures
//! used throughout the simulation system.
//!
//! # Overview
//!
//! - **Identifiers**: numeric skier ids, registry station indices and run UUIDs
//! - **Enums**: elevation levels, lift states and skier statuses
//! - **Configuration**: resort description with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use ski_resort_simulator::types::*;
//!
//! let level = Level::derive(Some("posrednia"), "polowa");
//! assert_eq!(level, Level::Mid);
//!
//! let config = ResortConfig {
//!     skier_count: 100,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

pub mod config;
pub mod enums;
pub mod identifiers;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
pub use identifiers::*;
