//! Skier behavior
//!
//! Each skier runs as its own task. It repeatedly picks a station on another
//! level; higher stations are reached by a chain of lifts, lower ones by
//! skiing a descent route straight to them. Between moves the skier rests.

use crate::lift::BoardingError;
use crate::resort::{ResortRegistry, Station};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::shutdown::{sleep_or_shutdown, ShutdownRequested};
use crate::skier::pathfinding::find_lift_path;
use crate::skier::state::SkierHandle;
use crate::types::{SkierId, SkierStatus};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace};

/// Pauses used by the skier loop
pub mod timing {
    use std::time::Duration;

    /// Pause when no station on another level exists
    pub const NO_TARGET_BACKOFF: Duration = Duration::from_millis(50);

    /// Pause when no available lift path leads to the target
    pub const NO_PATH_BACKOFF: Duration = Duration::from_millis(100);

    /// Pause when the chosen target shares the current level
    pub const SAME_LEVEL_BACKOFF: Duration = Duration::from_millis(50);

    /// Pause at the top of a descent before leaving the station
    pub const PRE_DESCENT_PAUSE: Duration = Duration::from_millis(20);

    /// Shortest rest between moves, in milliseconds
    pub const REST_MIN_MS: u64 = 1000;

    /// Random spread added to the rest, in milliseconds
    pub const REST_SPREAD_MS: u64 = 2000;
}

/// Result of one planning step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The skier reached the target station
    Moved,
    /// Nothing happened; try again after the pause
    Backoff(Duration),
}

/// Random source for a skier; seeded runs derive one stream per skier
pub fn rng_for(id: SkierId, seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(u64::from(id.0))),
        None => StdRng::from_entropy(),
    }
}

/// A skier task
#[derive(Debug)]
pub struct Skier {
    handle: Arc<SkierHandle>,
    registry: Arc<ResortRegistry>,
    current: Arc<Station>,
    rng: StdRng,
}

impl Skier {
    /// Create the task for `handle`, starting from the station it stands at
    pub fn new(
        handle: Arc<SkierHandle>,
        registry: Arc<ResortRegistry>,
        rng: StdRng,
    ) -> SimulationResult<Self> {
        let current = registry.station(handle.station()).cloned().ok_or_else(|| {
            SimulationError::topology_error(format!(
                "{} stands at unknown station {}",
                handle.id(),
                handle.station()
            ))
        })?;
        Ok(Self { handle, registry, current, rng })
    }

    /// Shared state of this skier
    pub fn handle(&self) -> &Arc<SkierHandle> {
        &self.handle
    }

    /// Station the skier is at
    pub fn current_station(&self) -> &Arc<Station> {
        &self.current
    }

    /// Pick a random station on a different level than the current one
    pub fn choose_target(&mut self) -> Option<Arc<Station>> {
        let level = self.current.level();
        let candidates: Vec<&Arc<Station>> = self
            .registry
            .stations()
            .iter()
            .filter(|station| station.level() != level)
            .collect();
        candidates.choose(&mut self.rng).map(|station| Arc::clone(station))
    }

    /// Move around the resort until `shutdown` is cancelled
    #[instrument(name = "skier", skip_all, fields(skier = %self.handle.id()))]
    pub async fn run(mut self, shutdown: CancellationToken) {
        trace!(station = %self.current.name(), "Skier started");
        let mut moves = 0u64;

        loop {
            let pause = match self.step(&shutdown).await {
                Ok(Outcome::Moved) => {
                    moves += 1;
                    let spread = self.rng.gen_range(0..timing::REST_SPREAD_MS);
                    Duration::from_millis(timing::REST_MIN_MS + spread)
                }
                Ok(Outcome::Backoff(pause)) => pause,
                Err(reason) => {
                    debug!(%reason, moves, station = %self.current.name(), "Skier stopped");
                    return;
                }
            };

            if sleep_or_shutdown(pause, &shutdown).await.is_err() {
                debug!(moves, station = %self.current.name(), "Skier stopped");
                return;
            }
        }
    }

    async fn step(&mut self, shutdown: &CancellationToken) -> Result<Outcome, BoardingError> {
        let Some(target) = self.choose_target() else {
            return Ok(Outcome::Backoff(timing::NO_TARGET_BACKOFF));
        };

        match target.level().cmp(&self.current.level()) {
            Ordering::Greater => self.ride_up(&target, shutdown).await,
            Ordering::Less => {
                self.ski_down(target, shutdown).await?;
                Ok(Outcome::Moved)
            }
            Ordering::Equal => Ok(Outcome::Backoff(timing::SAME_LEVEL_BACKOFF)),
        }
    }

    /// Take the lift path to `target`, one lift at a time
    async fn ride_up(
        &mut self,
        target: &Arc<Station>,
        shutdown: &CancellationToken,
    ) -> Result<Outcome, BoardingError> {
        let Some(path) = find_lift_path(&self.registry, self.current.id(), target.id()) else {
            trace!(target = %target.name(), "No lift path available");
            return Ok(Outcome::Backoff(timing::NO_PATH_BACKOFF));
        };

        for lift in path {
            self.handle.set_status(SkierStatus::Waiting);
            lift.request_boarding(&self.handle, shutdown).await?;
            self.current = Arc::clone(lift.upper());
            self.handle.set_station(self.current.id());
            self.handle.set_status(SkierStatus::AtStation);
            trace!(lift = %lift.name(), station = %self.current.name(), "Rode lift");
        }
        Ok(Outcome::Moved)
    }

    /// Ski the descent from the current station to `target`
    ///
    /// A descent interrupted by shutdown still ends at the target, so the skier
    /// is never left on a route.
    async fn ski_down(
        &mut self,
        target: Arc<Station>,
        shutdown: &CancellationToken,
    ) -> Result<(), ShutdownRequested> {
        self.handle.set_status(SkierStatus::AtStation);
        sleep_or_shutdown(timing::PRE_DESCENT_PAUSE, shutdown).await?;

        self.current.depart();
        let route = self.registry.get_or_create_descent(&self.current, &target, &mut self.rng);
        self.handle.set_status(SkierStatus::Skiing);
        route.enter();

        let descent = sleep_or_shutdown(route.duration(), shutdown).await;

        route.exit();
        target.arrive();
        self.handle.set_station(target.id());
        self.handle.set_status(SkierStatus::Waiting);
        trace!(route = %route.name(), "Finished descent");
        self.current = target;
        descent
    }
}
