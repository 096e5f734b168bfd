//! Point-in-time views of the resort
//!
//! A [`ResortSnapshot`] copies every counter of the registry at one moment. The
//! [`SnapshotTicker`] task captures one per snapshot interval and publishes it
//! to any number of observers through a watch channel.

use crate::resort::ResortRegistry;
use crate::types::{Level, LiftState, RunId, SkierStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace};

/// Occupancy of one station
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationSnapshot {
    /// Station name
    pub name: String,
    /// Elevation level
    pub level: Level,
    /// Skiers at the station
    pub occupants: usize,
}

/// Load and state of one lift
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiftSnapshot {
    /// Lift name
    pub name: String,
    /// Backing route name
    pub route: String,
    /// Riders aboard
    pub riders: usize,
    /// Skiers waiting in the queue
    pub queued: usize,
    /// Maximum riders aboard
    pub capacity: usize,
    /// Operational state
    pub state: LiftState,
}

/// Traffic on one descent route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSnapshot {
    /// Route name
    pub name: String,
    /// Skiers on the route
    pub in_transit: usize,
    /// Descent time in seconds
    pub duration_secs: u64,
}

/// Number of skiers in each status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkierTally {
    /// Waiting for a lift
    pub waiting: usize,
    /// Riding a lift
    pub on_lift: usize,
    /// Standing at a station
    pub at_station: usize,
    /// Descending a route
    pub skiing: usize,
}

impl SkierTally {
    /// Count one more skier in `status`
    pub fn record(&mut self, status: SkierStatus) {
        match status {
            SkierStatus::Waiting => self.waiting += 1,
            SkierStatus::OnLift => self.on_lift += 1,
            SkierStatus::AtStation => self.at_station += 1,
            SkierStatus::Skiing => self.skiing += 1,
        }
    }

    /// Skiers counted
    pub fn total(&self) -> usize {
        self.waiting + self.on_lift + self.at_station + self.skiing
    }
}

/// Where the skiers of a snapshot are
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTotals {
    /// Sum over stations
    pub at_stations: usize,
    /// Sum over lifts
    pub on_lifts: usize,
    /// Sum over descent routes
    pub on_routes: usize,
}

impl SnapshotTotals {
    /// All skiers accounted for
    pub fn total(&self) -> usize {
        self.at_stations + self.on_lifts + self.on_routes
    }

    /// Whether every one of `skier_count` skiers is in exactly one place
    pub fn is_conserved(&self, skier_count: usize) -> bool {
        self.total() == skier_count
    }
}

/// All counters of the resort at one moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResortSnapshot {
    /// Run the snapshot belongs to
    pub run_id: RunId,
    /// Sequence number; 0 is the state before any task ran
    pub tick: u64,
    /// Wall-clock capture time
    pub taken_at: DateTime<Utc>,
    /// Stations in registry order
    pub stations: Vec<StationSnapshot>,
    /// Lifts in registry order
    pub lifts: Vec<LiftSnapshot>,
    /// Descent routes sorted by name
    pub routes: Vec<RouteSnapshot>,
    /// Skier statuses
    pub skiers: SkierTally,
}

impl ResortSnapshot {
    /// Copy the current counters of `registry`
    ///
    /// Counters are read one by one while tasks keep running, so a capture on a
    /// multi-threaded runtime may catch a skier between two places.
    pub fn capture(registry: &ResortRegistry, run_id: RunId, tick: u64) -> Self {
        let stations = registry
            .stations()
            .iter()
            .map(|station| StationSnapshot {
                name: station.name().to_string(),
                level: station.level(),
                occupants: station.count(),
            })
            .collect();

        let lifts = registry
            .lifts()
            .iter()
            .map(|lift| LiftSnapshot {
                name: lift.name().to_string(),
                route: lift.route().name().to_string(),
                riders: lift.riders(),
                queued: lift.queued(),
                capacity: lift.capacity(),
                state: lift.state(),
            })
            .collect();

        let routes = registry
            .descent_routes()
            .iter()
            .map(|route| RouteSnapshot {
                name: route.name().to_string(),
                in_transit: route.count(),
                duration_secs: route.duration().as_secs(),
            })
            .collect();

        let mut skiers = SkierTally::default();
        for skier in registry.skiers() {
            skiers.record(skier.status());
        }

        Self { run_id, tick, taken_at: Utc::now(), stations, lifts, routes, skiers }
    }

    /// Where the skiers are, summed per kind of place
    pub fn totals(&self) -> SnapshotTotals {
        SnapshotTotals {
            at_stations: self.stations.iter().map(|station| station.occupants).sum(),
            on_lifts: self.lifts.iter().map(|lift| lift.riders).sum(),
            on_routes: self.routes.iter().map(|route| route.in_transit).sum(),
        }
    }

    /// Look up a station entry by name
    pub fn station(&self, name: &str) -> Option<&StationSnapshot> {
        self.stations.iter().find(|station| station.name == name)
    }

    /// Look up a lift entry by name
    pub fn lift(&self, name: &str) -> Option<&LiftSnapshot> {
        self.lifts.iter().find(|lift| lift.name == name)
    }
}

impl fmt::Display for ResortSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Tick {} ({}) ===", self.tick, self.taken_at.format("%H:%M:%S"))?;
        for station in &self.stations {
            writeln!(
                f,
                "Station {:<12} [{:<6}] skiers: {}",
                station.name, station.level, station.occupants
            )?;
        }
        for lift in &self.lifts {
            let marker = match lift.state {
                LiftState::Running => "",
                LiftState::Draining => " [DRAINING]",
                LiftState::Maintenance => " [MAINTENANCE]",
            };
            writeln!(
                f,
                "Lift    {:<12} {:<16} riders: {}/{} queued: {}{}",
                lift.name, lift.route, lift.riders, lift.capacity, lift.queued, marker
            )?;
        }
        for route in &self.routes {
            writeln!(
                f,
                "Route   {:<29} skiing: {} ({}s)",
                route.name, route.in_transit, route.duration_secs
            )?;
        }
        let totals = self.totals();
        write!(
            f,
            "Total: {} at stations, {} on lifts, {} on routes",
            totals.at_stations, totals.on_lifts, totals.on_routes
        )
    }
}

/// Periodic snapshot publisher
#[derive(Debug)]
pub struct SnapshotTicker {
    registry: Arc<ResortRegistry>,
    run_id: RunId,
    interval: Duration,
    publisher: watch::Sender<Arc<ResortSnapshot>>,
    /// Snapshots whose totals did not add up to the skier count
    in_motion: Arc<AtomicU64>,
}

impl SnapshotTicker {
    /// Create a ticker; the receiver starts with a tick 0 snapshot
    pub fn new(
        registry: Arc<ResortRegistry>,
        run_id: RunId,
        interval: Duration,
    ) -> (Self, watch::Receiver<Arc<ResortSnapshot>>) {
        let initial = Arc::new(ResortSnapshot::capture(&registry, run_id, 0));
        let (publisher, receiver) = watch::channel(initial);
        let in_motion = Arc::new(AtomicU64::new(0));
        (Self { registry, run_id, interval, publisher, in_motion }, receiver)
    }

    /// Counter of published snapshots that caught skiers between two counters
    pub fn in_motion_counter(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.in_motion)
    }

    /// Publish a snapshot every interval until `shutdown` is cancelled
    #[instrument(name = "snapshots", skip_all, fields(interval_secs = self.interval.as_secs()))]
    pub async fn run(self, shutdown: CancellationToken) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let expected = self.registry.skier_count();
        let mut tick = 0u64;

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tick += 1;
            let snapshot = ResortSnapshot::capture(&self.registry, self.run_id, tick);
            let totals = snapshot.totals();
            if !totals.is_conserved(expected) {
                self.in_motion.fetch_add(1, Ordering::Relaxed);
                // Counters are read one at a time, so a moving skier can be missed or seen twice
                debug!(
                    tick,
                    expected,
                    counted = totals.total(),
                    "Snapshot caught skiers in motion"
                );
            }
            trace!(tick, at_stations = totals.at_stations, on_lifts = totals.on_lifts, "Snapshot taken");
            self.publisher.send_replace(Arc::new(snapshot));
        }

        info!(ticks = tick, "Snapshot ticker stopped");
    }
}
