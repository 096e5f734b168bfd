//! Descent routes and lift backing segments
//!
//! A route joins two stations. Routes with a positive duration are descents that
//! skiers ride down; zero-duration routes only give a lift its lower and upper
//! station.

use crate::resort::station::Station;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// A segment between two stations with an in-transit counter
#[derive(Debug)]
pub struct Route {
    /// Route name, conventionally `<from>-<to>`
    name: String,
    /// Station the route starts at
    from: Arc<Station>,
    /// Station the route ends at
    to: Arc<Station>,
    /// Descent time; zero for lift-only segments
    duration: Duration,
    /// Skiers currently on the route
    in_transit: AtomicUsize,
}

impl Route {
    /// Create a new route
    pub fn new(
        name: impl Into<String>,
        from: Arc<Station>,
        to: Arc<Station>,
        duration: Duration,
    ) -> Self {
        Self { name: name.into(), from, to, duration, in_transit: AtomicUsize::new(0) }
    }

    /// Canonical name for the route between two stations
    pub fn name_for(from: &Station, to: &Station) -> String {
        format!("{}-{}", from.name(), to.name())
    }

    /// Route name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Starting station as configured
    pub fn from(&self) -> &Arc<Station> {
        &self.from
    }

    /// The endpoint with the lower elevation (the starting station on ties)
    pub fn lower(&self) -> &Arc<Station> {
        if self.from.level() <= self.to.level() {
            &self.from
        } else {
            &self.to
        }
    }

    /// The endpoint with the higher elevation
    pub fn upper(&self) -> &Arc<Station> {
        if self.from.level() <= self.to.level() {
            &self.to
        } else {
            &self.from
        }
    }

    /// Descent duration
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Whether skiers can ride this route down
    pub fn is_descent(&self) -> bool {
        !self.duration.is_zero()
    }

    /// A skier started the descent
    pub fn enter(&self) {
        self.in_transit.fetch_add(1, Ordering::SeqCst);
    }

    /// A skier finished the descent
    pub fn exit(&self) {
        let result = self
            .in_transit
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| count.checked_sub(1));
        if result.is_err() {
            warn!(route = %self.name, "Exit from an empty route ignored");
        }
    }

    /// Skiers currently on the route
    pub fn count(&self) -> usize {
        self.in_transit.load(Ordering::SeqCst)
    }
}
