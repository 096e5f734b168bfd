//! Resort topology and occupancy
//!
//! This module models the static shape of the resort and the live counters
//! attached to it.
//!
//! # Overview
//!
//! - **Station**: a node with an elevation level and an occupant count
//! - **Route**: a segment between two stations; positive-duration routes are
//!   descents, zero-duration routes back a lift
//! - **ResortRegistry**: lookup of stations, routes, lifts and skiers, with
//!   on-demand creation of descent routes
//! - **ResortBuilder**: builds a registry and lift controllers from configuration
//!
//! # Usage Example
//!
//! ```rust
//! use ski_resort_simulator::resort::*;
//! use ski_resort_simulator::types::*;
//!
//! let config = ResortConfig {
//!     skier_count: 10,
//!     ..Default::default()
//! };
//!
//! let resort = ResortBuilder::new().build(&config).unwrap();
//! let baza = resort.registry.station_by_name("baza").unwrap();
//! assert_eq!(baza.level(), Level::Base);
//! assert_eq!(baza.count(), 10);
//! ```

pub mod builder;
pub mod registry;
pub mod route;
pub mod station;

// Re-export all public types for convenience
pub use builder::{Resort, ResortBuilder};
pub use registry::ResortRegistry;
pub use route::Route;
pub use station::Station;
