//! Main simulation orchestrator
//!
//! This module contains the SimulationOrchestrator, which builds a resort from
//! configuration, and the RunningSimulation handle that owns every spawned task.

use crate::lift::LiftController;
use crate::resort::{ResortBuilder, ResortRegistry};
use crate::simulation::error::{SimulationError, SimulationResult};
use crate::simulation::snapshot::{ResortSnapshot, SnapshotTicker};
use crate::simulation::statistics::RunStatistics;
use crate::skier::{rng_for, Skier};
use crate::types::{ResortConfig, RunId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument};

/// Builds a resort and starts its tasks
#[derive(Debug)]
pub struct SimulationOrchestrator {
    /// Configuration for the simulation
    config: ResortConfig,
    /// Identifier of this run
    run_id: RunId,
    /// Registry of stations, routes, lifts and skiers
    registry: Arc<ResortRegistry>,
    /// Lift control loops waiting to be spawned
    controllers: Vec<LiftController>,
}

impl SimulationOrchestrator {
    /// Create a new simulation orchestrator
    #[instrument(skip(config), fields(skier_count = config.skier_count, lift_count = config.lifts.len()))]
    pub fn new(config: ResortConfig) -> SimulationResult<Self> {
        let run_id = RunId::new();
        info!(
            "Initializing simulation {} with {} skiers and {} lifts",
            run_id,
            config.skier_count,
            config.lifts.len()
        );

        match config.seed {
            Some(seed) => info!("Using deterministic seed: {}", seed),
            None => debug!("Using entropy-based random seed"),
        }

        let resort = ResortBuilder::new().build(&config)?;

        Ok(Self { config, run_id, registry: resort.registry, controllers: resort.controllers })
    }

    /// Configuration the resort was built from
    pub fn config(&self) -> &ResortConfig {
        &self.config
    }

    /// Identifier of this run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Shared registry
    pub fn registry(&self) -> &Arc<ResortRegistry> {
        &self.registry
    }

    /// State of the resort before any task runs
    pub fn initial_snapshot(&self) -> ResortSnapshot {
        ResortSnapshot::capture(&self.registry, self.run_id, 0)
    }

    /// Spawn every lift, skier and the snapshot ticker on the current runtime
    ///
    /// Lifts are spawned before skiers so no skier queues at a lift whose loop
    /// has not started.
    #[instrument(skip_all, fields(run_id = %self.run_id))]
    pub fn start(self) -> SimulationResult<RunningSimulation> {
        let shutdown = CancellationToken::new();
        let mut tasks = JoinSet::new();

        for controller in self.controllers {
            tasks.spawn(controller.run(shutdown.clone()));
        }

        for handle in self.registry.skiers() {
            let rng = rng_for(handle.id(), self.config.seed);
            let skier = Skier::new(Arc::clone(handle), Arc::clone(&self.registry), rng)?;
            tasks.spawn(skier.run(shutdown.clone()));
        }

        let (ticker, snapshots) = SnapshotTicker::new(
            Arc::clone(&self.registry),
            self.run_id,
            Duration::from_secs(self.config.snapshot_interval),
        );
        let snapshots_in_motion = ticker.in_motion_counter();
        tasks.spawn(ticker.run(shutdown.clone()));

        info!(
            lifts = self.registry.lifts().len(),
            skiers = self.registry.skier_count(),
            "Simulation started"
        );

        Ok(RunningSimulation {
            run_id: self.run_id,
            registry: self.registry,
            shutdown,
            tasks,
            snapshots,
            snapshots_in_motion,
            started: Instant::now(),
        })
    }
}

/// A started simulation; dropping it without [`RunningSimulation::shutdown`]
/// aborts every task
#[derive(Debug)]
pub struct RunningSimulation {
    run_id: RunId,
    registry: Arc<ResortRegistry>,
    shutdown: CancellationToken,
    tasks: JoinSet<()>,
    snapshots: watch::Receiver<Arc<ResortSnapshot>>,
    snapshots_in_motion: Arc<AtomicU64>,
    started: Instant,
}

impl RunningSimulation {
    /// Identifier of this run
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Shared registry
    pub fn registry(&self) -> &Arc<ResortRegistry> {
        &self.registry
    }

    /// Receive every published snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<ResortSnapshot>> {
        self.snapshots.clone()
    }

    /// Token cancelled at shutdown; cancelling it stops the simulation
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Let the simulation run for `duration`, then shut it down
    pub async fn run_for(self, duration: Duration) -> SimulationResult<RunStatistics> {
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            _ = self.shutdown.cancelled() => {}
        }
        self.shutdown().await
    }

    /// Stop every task, wait for them and collect statistics
    #[instrument(skip_all, fields(run_id = %self.run_id))]
    pub async fn shutdown(mut self) -> SimulationResult<RunStatistics> {
        info!("Shutting down simulation");
        self.shutdown.cancel();

        let mut first_failure: Option<SimulationError> = None;
        while let Some(result) = self.tasks.join_next().await {
            if let Err(join_error) = result {
                error!("Simulation task failed: {}", join_error);
                first_failure.get_or_insert(SimulationError::from(join_error));
            }
        }
        if let Some(failure) = first_failure {
            return Err(failure);
        }

        let tick = self.snapshots.borrow().tick + 1;
        let statistics = RunStatistics::collect(
            &self.registry,
            self.run_id,
            self.started.elapsed(),
            tick,
            self.snapshots_in_motion.load(Ordering::Relaxed),
        );
        info!("{}", statistics.generate_compact_summary());
        Ok(statistics)
    }
}
