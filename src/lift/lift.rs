//! Shared lift state and the boarding queue
//!
//! A [`Lift`] is what skiers see: its stations, its state and a FIFO queue they
//! can join. The matching [`LiftController`] owns the other end of the queue
//! and is the only task that boards or releases riders.

use crate::lift::controller::LiftController;
use crate::resort::{Route, Station};
use crate::simulation::shutdown::ShutdownRequested;
use crate::skier::SkierHandle;
use crate::types::{LiftConfig, LiftState};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Operating parameters of a lift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiftParams {
    /// Maximum riders aboard at once
    pub capacity: usize,
    /// Ride time from the lower to the upper station
    pub transit_time: Duration,
    /// Riders admitted per boarding tick
    pub boarding_group_size: usize,
    /// Running time after which maintenance is due
    pub maintenance_period: Duration,
    /// Length of a maintenance stop
    pub maintenance_duration: Duration,
    /// Minimum spacing between boarding ticks
    pub boarding_interval: Duration,
}

impl LiftParams {
    /// Parameters for a configured lift; non-positive values fall back to defaults
    pub fn from_config(config: &LiftConfig, boarding_interval_secs: u64) -> Self {
        let config = config.clone().with_defaults();
        Self {
            capacity: config.capacity as usize,
            transit_time: Duration::from_secs(config.interval),
            boarding_group_size: config.boarding_group_size as usize,
            maintenance_period: Duration::from_secs(config.maintenance_time as u64),
            maintenance_duration: Duration::from_secs(config.maintenance_duration as u64),
            boarding_interval: Duration::from_secs(boarding_interval_secs),
        }
    }
}

/// A skier's place in a lift queue
#[derive(Debug)]
pub struct BoardingRequest {
    /// The queued skier
    pub skier: Arc<SkierHandle>,
    /// Signalled once the skier has arrived at the upper station
    pub release: oneshot::Sender<()>,
}

/// Why a skier did not complete a lift ride
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardingError {
    /// Shutdown was requested while waiting
    #[error("shutdown requested while waiting for the lift")]
    Shutdown,

    /// The lift stopped serving its queue
    #[error("lift {0} stopped before the ride completed")]
    LiftStopped(String),
}

impl From<ShutdownRequested> for BoardingError {
    fn from(_: ShutdownRequested) -> Self {
        BoardingError::Shutdown
    }
}

/// A lift carrying skiers from its lower to its upper station
#[derive(Debug)]
pub struct Lift {
    name: String,
    route: Arc<Route>,
    params: LiftParams,
    state: watch::Sender<LiftState>,
    pub(crate) riders: AtomicUsize,
    pub(crate) queued: AtomicUsize,
    pub(crate) total_boarded: AtomicU64,
    pub(crate) maintenance_cycles: AtomicU64,
    requests: mpsc::UnboundedSender<BoardingRequest>,
}

impl Lift {
    /// Create a running lift on `route` together with its control loop
    ///
    /// The controller starts its maintenance and boarding clocks now.
    pub fn new(
        name: impl Into<String>,
        route: Arc<Route>,
        params: LiftParams,
    ) -> (Arc<Self>, LiftController) {
        let (requests, receiver) = mpsc::unbounded_channel();
        let (state, _) = watch::channel(LiftState::Running);
        let lift = Arc::new(Self {
            name: name.into(),
            route,
            params,
            state,
            riders: AtomicUsize::new(0),
            queued: AtomicUsize::new(0),
            total_boarded: AtomicU64::new(0),
            maintenance_cycles: AtomicU64::new(0),
            requests,
        });
        let controller = LiftController::new(Arc::clone(&lift), receiver);
        (lift, controller)
    }

    /// Lift name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing route
    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    /// Boarding station
    pub fn lower(&self) -> &Arc<Station> {
        self.route.lower()
    }

    /// Arrival station
    pub fn upper(&self) -> &Arc<Station> {
        self.route.upper()
    }

    /// Operating parameters
    pub fn params(&self) -> &LiftParams {
        &self.params
    }

    /// Maximum riders aboard at once
    pub fn capacity(&self) -> usize {
        self.params.capacity
    }

    /// Riders currently aboard
    pub fn riders(&self) -> usize {
        self.riders.load(Ordering::SeqCst)
    }

    /// Skiers waiting in the queue
    pub fn queued(&self) -> usize {
        self.queued.load(Ordering::SeqCst)
    }

    /// Riders boarded since the lift was created
    pub fn total_boarded(&self) -> u64 {
        self.total_boarded.load(Ordering::Relaxed)
    }

    /// Completed maintenance stops
    pub fn maintenance_cycles(&self) -> u64 {
        self.maintenance_cycles.load(Ordering::Relaxed)
    }

    /// Current operational state
    pub fn state(&self) -> LiftState {
        *self.state.borrow()
    }

    /// Whether skiers should plan routes through this lift
    pub fn is_available(&self) -> bool {
        self.state().accepts_riders()
    }

    /// Watch state changes
    pub fn subscribe_state(&self) -> watch::Receiver<LiftState> {
        self.state.subscribe()
    }

    pub(crate) fn set_state(&self, state: LiftState) {
        self.state.send_replace(state);
    }

    /// Append a skier to the queue without waiting
    ///
    /// The returned receiver resolves once the skier reaches the upper station,
    /// or fails if the lift stops serving the queue first. Dropping it before
    /// boarding withdraws the skier.
    pub fn submit(&self, skier: Arc<SkierHandle>) -> oneshot::Receiver<()> {
        let (release, receiver) = oneshot::channel();
        self.queued.fetch_add(1, Ordering::SeqCst);
        if self.requests.send(BoardingRequest { skier, release }).is_err() {
            self.queued.fetch_sub(1, Ordering::SeqCst);
        }
        receiver
    }

    /// Queue for the lift and wait until the ride is over
    ///
    /// Waits first for the lift to accept riders. On success the lift has already
    /// moved the skier from the lower station to the upper one.
    pub async fn request_boarding(
        &self,
        skier: &Arc<SkierHandle>,
        shutdown: &CancellationToken,
    ) -> Result<(), BoardingError> {
        let mut state = self.state.subscribe();
        let running = async { state.wait_for(|state| state.accepts_riders()).await.is_ok() };
        let available = tokio::select! {
            _ = shutdown.cancelled() => return Err(BoardingError::Shutdown),
            available = running => available,
        };
        if !available {
            return Err(BoardingError::LiftStopped(self.name.clone()));
        }

        trace!(lift = %self.name, skier = %skier.id(), "Joined queue");
        let release = self.submit(Arc::clone(skier));
        tokio::select! {
            _ = shutdown.cancelled() => Err(BoardingError::Shutdown),
            result = release => result.map_err(|_| BoardingError::LiftStopped(self.name.clone())),
        }
    }
}
