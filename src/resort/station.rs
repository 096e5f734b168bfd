//! Station occupancy
//!
//! A station is a node of the resort network with a fixed elevation level and a
//! concurrently updated count of the skiers standing at it.

use crate::types::{Level, StationId};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::warn;

/// A station of the resort with its occupant counter
#[derive(Debug)]
pub struct Station {
    /// Position of the station in the registry
    id: StationId,
    /// Unique station name
    name: String,
    /// Configured station type, if any
    station_type: Option<String>,
    /// Elevation level derived once at creation
    level: Level,
    /// Number of skiers currently at the station
    occupants: AtomicUsize,
}

impl Station {
    /// Create a new empty station; the level is derived from type and name
    pub fn new(id: StationId, name: impl Into<String>, station_type: Option<String>) -> Self {
        let name = name.into();
        let level = Level::derive(station_type.as_deref(), &name);
        Self { id, name, station_type, level, occupants: AtomicUsize::new(0) }
    }

    /// Registry id of the station
    pub fn id(&self) -> StationId {
        self.id
    }

    /// Station name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured station type
    pub fn station_type(&self) -> Option<&str> {
        self.station_type.as_deref()
    }

    /// Elevation level
    pub fn level(&self) -> Level {
        self.level
    }

    /// A skier arrived at the station
    pub fn arrive(&self) {
        self.occupants.fetch_add(1, Ordering::SeqCst);
    }

    /// A skier left the station
    ///
    /// The count never goes below zero; an unmatched departure is logged and ignored.
    pub fn depart(&self) {
        let result = self
            .occupants
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| count.checked_sub(1));
        if result.is_err() {
            warn!(station = %self.name, "Departure from an empty station ignored");
        }
    }

    /// Number of skiers currently at the station
    pub fn count(&self) -> usize {
        self.occupants.load(Ordering::SeqCst)
    }
}
