//! Resort construction from configuration
//!
//! Turns a validated [`ResortConfig`] into a [`ResortRegistry`] plus one
//! [`LiftController`] per lift, and places every skier at the start station.

use crate::lift::{Lift, LiftController, LiftParams};
use crate::resort::registry::ResortRegistry;
use crate::resort::route::Route;
use crate::resort::station::Station;
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::skier::SkierHandle;
use crate::types::{split_route_name, Level, ResortConfig, SkierId, StationId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// A built resort: the shared registry and the lift control loops still to be spawned
#[derive(Debug)]
pub struct Resort {
    /// Shared view of stations, routes, lifts and skiers
    pub registry: Arc<ResortRegistry>,
    /// One control loop per lift, in configuration order
    pub controllers: Vec<LiftController>,
}

/// Builds resorts from configuration
#[derive(Debug, Default, Clone, Copy)]
pub struct ResortBuilder;

impl ResortBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self
    }

    /// Build the resort described by `config`
    ///
    /// The configuration is validated first. A lift whose route is not listed
    /// among the routes gets a zero-duration backing route of its own.
    #[instrument(skip_all, fields(stations = config.stations.len(), lifts = config.lifts.len()))]
    pub fn build(&self, config: &ResortConfig) -> SimulationResult<Resort> {
        config.validate()?;

        let stations: Vec<Arc<Station>> = config
            .stations
            .iter()
            .enumerate()
            .map(|(index, station)| {
                Arc::new(Station::new(
                    StationId(index),
                    station.name.clone(),
                    station.station_type.clone(),
                ))
            })
            .collect();
        let by_name: HashMap<&str, &Arc<Station>> =
            stations.iter().map(|station| (station.name(), station)).collect();

        let endpoints = |route_name: &str| -> SimulationResult<(Arc<Station>, Arc<Station>)> {
            let (from, to) = split_route_name(route_name).ok_or_else(|| {
                SimulationError::topology_error(format!("Malformed route name '{}'", route_name))
            })?;
            let lookup = |name: &str| {
                by_name.get(name).map(|station| Arc::clone(station)).ok_or_else(|| {
                    SimulationError::topology_error(format!(
                        "Route '{}' references unknown station '{}'",
                        route_name, name
                    ))
                })
            };
            Ok((lookup(from)?, lookup(to)?))
        };

        let mut routes: HashMap<String, Arc<Route>> = HashMap::new();
        let mut descent_routes = Vec::new();
        let mut lift_routes = Vec::new();
        for route_config in &config.routes {
            if routes.contains_key(&route_config.name) {
                return Err(SimulationError::topology_error(format!(
                    "Duplicate route name '{}'",
                    route_config.name
                )));
            }
            let (from, to) = endpoints(&route_config.name)?;
            let duration = Duration::from_secs(route_config.duration.max(0) as u64);
            let route = Arc::new(Route::new(route_config.name.clone(), from, to, duration));
            if route.is_descent() {
                descent_routes.push(Arc::clone(&route));
            } else {
                lift_routes.push(Arc::clone(&route));
            }
            routes.insert(route_config.name.clone(), route);
        }

        let mut lifts = Vec::new();
        let mut controllers = Vec::new();
        for lift_config in config.effective_lifts() {
            let route = match routes.get(&lift_config.route) {
                Some(route) => Arc::clone(route),
                None => {
                    let (from, to) = endpoints(&lift_config.route)?;
                    debug!(lift = %lift_config.name, route = %lift_config.route, "Synthesized lift route");
                    let route =
                        Arc::new(Route::new(lift_config.route.clone(), from, to, Duration::ZERO));
                    lift_routes.push(Arc::clone(&route));
                    routes.insert(lift_config.route.clone(), Arc::clone(&route));
                    route
                }
            };
            if route.lower().level() == route.upper().level() {
                warn!(
                    lift = %lift_config.name,
                    level = %route.lower().level(),
                    "Lift joins two stations on the same level"
                );
            }

            let params = LiftParams::from_config(&lift_config, config.global_boarding_interval);
            let (lift, controller) = Lift::new(lift_config.name.clone(), route, params);
            lifts.push(lift);
            controllers.push(controller);
        }

        let start = Self::start_station(config, &stations)?;
        let skiers: Vec<Arc<SkierHandle>> = (1..=config.skier_count)
            .map(|number| {
                start.arrive();
                Arc::new(SkierHandle::new(SkierId(number as u32), start.id()))
            })
            .collect();

        info!(
            stations = stations.len(),
            lifts = lifts.len(),
            descent_routes = descent_routes.len(),
            skiers = skiers.len(),
            start_station = %start.name(),
            "Resort built"
        );

        let registry = ResortRegistry::new(stations, lift_routes, descent_routes, lifts, skiers);
        Ok(Resort { registry: Arc::new(registry), controllers })
    }

    /// The configured start station, else the first base station, else the first station
    fn start_station(
        config: &ResortConfig,
        stations: &[Arc<Station>],
    ) -> SimulationResult<Arc<Station>> {
        let chosen = match &config.start_station {
            Some(name) => stations.iter().find(|station| station.name() == name),
            None => stations
                .iter()
                .find(|station| station.level() == Level::Base)
                .or_else(|| stations.first()),
        };
        chosen
            .map(Arc::clone)
            .ok_or_else(|| SimulationError::topology_error("No start station available"))
    }
}
