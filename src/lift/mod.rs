//! Lifts and their control loops
//!
//! A lift carries skiers from the lower to the upper station of its backing
//! route. Skiers join a FIFO queue through the shared [`Lift`]; the lift's
//! [`LiftController`] task boards groups at each boarding tick, releases riders
//! when their ride is over and periodically drains the lift for maintenance.
//!
//! # Usage Example
//!
//! ```rust
//! use ski_resort_simulator::lift::*;
//! use ski_resort_simulator::resort::*;
//! use ski_resort_simulator::types::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let lower = Arc::new(Station::new(StationId(0), "baza", None));
//! let upper = Arc::new(Station::new(StationId(1), "szczyt", None));
//! let route = Arc::new(Route::new("baza-szczyt", lower, upper, Duration::ZERO));
//!
//! let params = LiftParams {
//!     capacity: 4,
//!     transit_time: Duration::from_secs(5),
//!     boarding_group_size: 2,
//!     maintenance_period: Duration::from_secs(60),
//!     maintenance_duration: Duration::from_secs(20),
//!     boarding_interval: Duration::from_secs(2),
//! };
//! let (lift, _controller) = Lift::new("A", route, params);
//! assert_eq!(lift.state(), LiftState::Running);
//! assert_eq!(lift.upper().name(), "szczyt");
//! ```

pub mod controller;
#[allow(clippy::module_inception)]
pub mod lift;

// Re-export all public types for convenience
pub use controller::LiftController;
pub use lift::{BoardingError, BoardingRequest, Lift, LiftParams};
