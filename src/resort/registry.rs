//! Resort registry
//!
//! The registry is the single shared view of the resort: stations indexed by
//! [`StationId`], lift backing routes, descent routes keyed by name, lifts and
//! skier handles. Everything except the descent route map is fixed once the
//! resort is built; descent routes are created on demand by skiers.

use crate::lift::Lift;
use crate::resort::route::Route;
use crate::resort::station::Station;
use crate::skier::SkierHandle;
use crate::types::StationId;
use dashmap::DashMap;
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Shortest duration, in seconds, of a descent route created on demand
pub const MIN_GENERATED_DESCENT_SECS: u64 = 5;

/// Spread, in seconds, added to [`MIN_GENERATED_DESCENT_SECS`] for created routes
pub const GENERATED_DESCENT_SPREAD_SECS: u64 = 5;

/// Shared registry of every entity in the resort
#[derive(Debug)]
pub struct ResortRegistry {
    /// Stations indexed by their id
    stations: Vec<Arc<Station>>,
    /// Station name to id lookup
    station_index: HashMap<String, StationId>,
    /// Zero-duration routes backing lifts
    lift_routes: Vec<Arc<Route>>,
    /// Descent routes by name, extended concurrently by skiers
    descent_routes: DashMap<String, Arc<Route>>,
    /// All lifts
    lifts: Vec<Arc<Lift>>,
    /// All skiers
    skiers: Vec<Arc<SkierHandle>>,
    /// Descent routes created while the simulation ran
    routes_created: AtomicUsize,
}

impl ResortRegistry {
    /// Assemble a registry from already built parts
    pub(crate) fn new(
        stations: Vec<Arc<Station>>,
        lift_routes: Vec<Arc<Route>>,
        descent_routes: Vec<Arc<Route>>,
        lifts: Vec<Arc<Lift>>,
        skiers: Vec<Arc<SkierHandle>>,
    ) -> Self {
        let station_index = stations
            .iter()
            .map(|station| (station.name().to_string(), station.id()))
            .collect();
        let descent_routes = descent_routes
            .into_iter()
            .map(|route| (route.name().to_string(), route))
            .collect();

        Self {
            stations,
            station_index,
            lift_routes,
            descent_routes,
            lifts,
            skiers,
            routes_created: AtomicUsize::new(0),
        }
    }

    /// All stations in id order
    pub fn stations(&self) -> &[Arc<Station>] {
        &self.stations
    }

    /// Look up a station by id
    pub fn station(&self, id: StationId) -> Option<&Arc<Station>> {
        self.stations.get(id.index())
    }

    /// Look up a station by name
    pub fn station_by_name(&self, name: &str) -> Option<&Arc<Station>> {
        self.station_index.get(name).and_then(|id| self.station(*id))
    }

    /// All lifts in configuration order
    pub fn lifts(&self) -> &[Arc<Lift>] {
        &self.lifts
    }

    /// Look up a lift by name
    pub fn lift_by_name(&self, name: &str) -> Option<&Arc<Lift>> {
        self.lifts.iter().find(|lift| lift.name() == name)
    }

    /// Zero-duration routes backing the lifts
    pub fn lift_routes(&self) -> &[Arc<Route>] {
        &self.lift_routes
    }

    /// All skier handles in id order
    pub fn skiers(&self) -> &[Arc<SkierHandle>] {
        &self.skiers
    }

    /// Number of skiers in the resort
    pub fn skier_count(&self) -> usize {
        self.skiers.len()
    }

    /// Descent routes sorted by name
    pub fn descent_routes(&self) -> Vec<Arc<Route>> {
        let mut routes: Vec<Arc<Route>> =
            self.descent_routes.iter().map(|entry| Arc::clone(entry.value())).collect();
        routes.sort_by(|a, b| a.name().cmp(b.name()));
        routes
    }

    /// Look up the descent route between two stations
    pub fn descent_route(&self, from: &Station, to: &Station) -> Option<Arc<Route>> {
        self.descent_routes
            .get(&Route::name_for(from, to))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Return the descent route between two stations, creating it if needed
    ///
    /// Concurrent callers asking for the same pair all receive the same route;
    /// exactly one of them creates it, with a random duration of 5 to 9 seconds.
    pub fn get_or_create_descent<R: Rng>(
        &self,
        from: &Arc<Station>,
        to: &Arc<Station>,
        rng: &mut R,
    ) -> Arc<Route> {
        let name = Route::name_for(from, to);
        let entry = self.descent_routes.entry(name).or_insert_with(|| {
            let secs = MIN_GENERATED_DESCENT_SECS + rng.gen_range(0..GENERATED_DESCENT_SPREAD_SECS);
            self.routes_created.fetch_add(1, Ordering::Relaxed);
            debug!(
                from = %from.name(),
                to = %to.name(),
                duration_secs = secs,
                "Created descent route"
            );
            Arc::new(Route::new(
                Route::name_for(from, to),
                Arc::clone(from),
                Arc::clone(to),
                Duration::from_secs(secs),
            ))
        });
        Arc::clone(entry.value())
    }

    /// Number of descent routes created on demand
    pub fn routes_created(&self) -> usize {
        self.routes_created.load(Ordering::Relaxed)
    }

    /// Skiers standing at stations
    pub fn skiers_at_stations(&self) -> usize {
        self.stations.iter().map(|station| station.count()).sum()
    }

    /// Skiers riding lifts
    pub fn skiers_on_lifts(&self) -> usize {
        self.lifts.iter().map(|lift| lift.riders()).sum()
    }

    /// Skiers descending routes
    pub fn skiers_on_routes(&self) -> usize {
        self.descent_routes.iter().map(|entry| entry.value().count()).sum()
    }
}
