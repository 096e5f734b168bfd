//! Lift control loop
//!
//! The controller is the single task allowed to board and release riders of a
//! lift. Each cycle it releases riders whose ride is over, then either boards
//! the next group, starts draining for maintenance or finishes the drain. It
//! sleeps until the next arrival, boarding tick or maintenance deadline.

use crate::lift::lift::{BoardingRequest, Lift};
use crate::simulation::shutdown::{sleep_or_shutdown, sleep_until_or_shutdown, ShutdownRequested};
use crate::skier::SkierHandle;
use crate::types::{LiftState, SkierStatus};
use std::collections::VecDeque;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, trace};

/// A boarded skier and the moment it reaches the upper station
#[derive(Debug)]
struct Rider {
    skier: Arc<SkierHandle>,
    arrival: Instant,
    release: oneshot::Sender<()>,
}

/// Control loop of a single lift
#[derive(Debug)]
pub struct LiftController {
    lift: Arc<Lift>,
    requests: mpsc::UnboundedReceiver<BoardingRequest>,
    in_transit: VecDeque<Rider>,
    maintenance_due: Instant,
    next_boarding: Instant,
}

impl LiftController {
    pub(crate) fn new(lift: Arc<Lift>, requests: mpsc::UnboundedReceiver<BoardingRequest>) -> Self {
        let now = Instant::now();
        let params = *lift.params();
        Self {
            lift,
            requests,
            in_transit: VecDeque::new(),
            maintenance_due: now + params.maintenance_period,
            next_boarding: now + params.boarding_interval,
        }
    }

    /// Run until `shutdown` is cancelled
    ///
    /// On shutdown riders still aboard are delivered to the upper station and
    /// queued skiers are turned away.
    #[instrument(name = "lift", skip_all, fields(lift = %self.lift.name()))]
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!(
            lower = %self.lift.lower().name(),
            upper = %self.lift.upper().name(),
            capacity = self.lift.capacity(),
            "Lift started"
        );

        loop {
            let now = Instant::now();
            self.release_arrivals(now);

            match self.lift.state() {
                LiftState::Running if now >= self.maintenance_due => {
                    self.lift.set_state(LiftState::Draining);
                    info!(riders = self.lift.riders(), "Maintenance due, draining");
                    continue;
                }
                LiftState::Running if now >= self.next_boarding => {
                    self.board(now);
                    self.next_boarding = now + self.lift.params().boarding_interval;
                }
                LiftState::Draining if self.in_transit.is_empty() => {
                    if self.hold_maintenance(&shutdown).await.is_err() {
                        break;
                    }
                    continue;
                }
                _ => {}
            }

            if sleep_until_or_shutdown(self.next_wake(now), &shutdown).await.is_err() {
                break;
            }
        }

        self.finish();
    }

    /// Deliver every rider whose ride ended at or before `now`
    fn release_arrivals(&mut self, now: Instant) {
        while self.in_transit.front().is_some_and(|rider| rider.arrival <= now) {
            if let Some(rider) = self.in_transit.pop_front() {
                self.deliver(rider);
            }
        }
    }

    fn deliver(&self, rider: Rider) {
        self.lift.upper().arrive();
        self.lift.riders.fetch_sub(1, Ordering::SeqCst);
        rider.skier.set_station(self.lift.upper().id());
        rider.skier.set_status(SkierStatus::AtStation);
        trace!(skier = %rider.skier.id(), "Rider arrived");
        // The skier may already have stopped listening
        let _ = rider.release.send(());
    }

    /// Board up to one group from the head of the queue
    fn board(&mut self, now: Instant) {
        let params = *self.lift.params();
        let mut boarded = 0;

        while boarded < params.boarding_group_size && self.lift.riders() < params.capacity {
            let Ok(request) = self.requests.try_recv() else {
                break;
            };
            self.lift.queued.fetch_sub(1, Ordering::SeqCst);
            if request.release.is_closed() {
                trace!(skier = %request.skier.id(), "Skipped withdrawn skier");
                continue;
            }

            self.lift.lower().depart();
            self.lift.riders.fetch_add(1, Ordering::SeqCst);
            request.skier.set_status(SkierStatus::OnLift);
            self.in_transit.push_back(Rider {
                skier: request.skier,
                arrival: now + params.transit_time,
                release: request.release,
            });
            boarded += 1;
        }

        if boarded > 0 {
            self.lift.total_boarded.fetch_add(boarded as u64, Ordering::Relaxed);
            debug!(
                boarded,
                riders = self.lift.riders(),
                queued = self.lift.queued(),
                "Boarded group"
            );
        }
    }

    /// Hold the empty lift in maintenance, then restart its clocks
    async fn hold_maintenance(
        &mut self,
        shutdown: &CancellationToken,
    ) -> Result<(), ShutdownRequested> {
        let duration = self.lift.params().maintenance_duration;
        self.lift.set_state(LiftState::Maintenance);
        info!(duration_secs = duration.as_secs(), "Maintenance started");

        sleep_or_shutdown(duration, shutdown).await?;

        let now = Instant::now();
        let params = *self.lift.params();
        self.maintenance_due = now + params.maintenance_period;
        self.next_boarding = now + params.boarding_interval;
        self.lift.maintenance_cycles.fetch_add(1, Ordering::Relaxed);
        self.lift.set_state(LiftState::Running);
        info!("Maintenance finished, lift running");
        Ok(())
    }

    /// Earliest moment the loop has work to do
    fn next_wake(&self, now: Instant) -> Instant {
        let arrival = self.in_transit.front().map(|rider| rider.arrival);
        let deadline = match self.lift.state() {
            LiftState::Running => Some(self.next_boarding.min(self.maintenance_due)),
            LiftState::Draining | LiftState::Maintenance => None,
        };

        match (arrival, deadline) {
            (Some(arrival), Some(deadline)) => arrival.min(deadline),
            (Some(at), None) | (None, Some(at)) => at,
            (None, None) => now + self.lift.params().boarding_interval,
        }
    }

    /// Deliver riders still aboard and turn away the queue
    fn finish(mut self) {
        let delivered = self.in_transit.len();
        while let Some(rider) = self.in_transit.pop_front() {
            self.deliver(rider);
        }

        self.requests.close();
        let mut turned_away = 0;
        while let Ok(request) = self.requests.try_recv() {
            self.lift.queued.fetch_sub(1, Ordering::SeqCst);
            drop(request);
            turned_away += 1;
        }

        info!(
            delivered,
            turned_away,
            total_boarded = self.lift.total_boarded(),
            maintenance_cycles = self.lift.maintenance_cycles(),
            "Lift stopped"
        );
    }
}
