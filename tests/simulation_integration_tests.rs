//! Integration tests for complete simulation runs
//!
//! Covers skier conservation across snapshots, lift capacity under load,
//! concurrent descent route creation and prompt shutdown.

use rand::rngs::StdRng;
use rand::SeedableRng;
use ski_resort_simulator::resort::ResortBuilder;
use ski_resort_simulator::simulation::{ResortSnapshot, SimulationOrchestrator};
use ski_resort_simulator::types::{LiftState, ResortConfig};
use std::sync::Arc;
use std::time::Duration;

fn assert_consistent(snapshot: &ResortSnapshot, skier_count: usize) {
    let totals = snapshot.totals();
    assert!(
        totals.is_conserved(skier_count),
        "tick {}: {:?} does not add up to {} skiers",
        snapshot.tick,
        totals,
        skier_count
    );
    assert_eq!(snapshot.skiers.total(), skier_count);
    assert_eq!(snapshot.skiers.on_lift, totals.on_lifts, "tick {}", snapshot.tick);
    assert_eq!(snapshot.skiers.skiing, totals.on_routes, "tick {}", snapshot.tick);

    for lift in &snapshot.lifts {
        assert!(
            lift.riders <= lift.capacity,
            "tick {}: lift {} carries {} of {}",
            snapshot.tick,
            lift.name,
            lift.riders,
            lift.capacity
        );
        if lift.state == LiftState::Maintenance {
            assert_eq!(lift.riders, 0, "lift {} in maintenance with riders", lift.name);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_every_snapshot_accounts_for_every_skier() {
    let config = ResortConfig {
        skier_count: 60,
        snapshot_interval: 1,
        seed: Some(2024),
        ..Default::default()
    };
    let simulation = SimulationOrchestrator::new(config).unwrap().start().unwrap();
    let mut snapshots = simulation.subscribe();

    let mut seen = 0;
    while seen < 90 {
        snapshots.changed().await.unwrap();
        let snapshot = Arc::clone(&snapshots.borrow_and_update());
        assert_consistent(&snapshot, 60);
        seen += 1;
    }

    let statistics = simulation.shutdown().await.unwrap();
    assert!(statistics.is_conserved());
    assert_consistent(&statistics.final_snapshot, 60);
    assert!(statistics.total_boardings() > 0);
    assert_eq!(statistics.snapshots_in_motion, 0);
}

#[tokio::test(start_paused = true)]
async fn test_long_run_exercises_every_lift() {
    let config = ResortConfig { skier_count: 40, seed: Some(7), ..Default::default() };
    let simulation = SimulationOrchestrator::new(config).unwrap().start().unwrap();

    let statistics = simulation.run_for(Duration::from_secs(300)).await.unwrap();

    assert!(statistics.is_conserved());
    assert_eq!(statistics.lifts.len(), 3);
    for lift in &statistics.lifts {
        assert!(lift.total_boarded > 0, "lift {} never boarded", lift.name);
        assert!(lift.maintenance_cycles >= 1, "lift {} never serviced", lift.name);
    }

    // After shutdown nobody is left on a lift or a route
    let totals = statistics.final_snapshot.totals();
    assert_eq!(totals.on_lifts, 0);
    assert_eq!(totals.on_routes, 0);
    assert_eq!(totals.at_stations, 40);
    // Every descent was configured up front
    assert_eq!(statistics.routes_created, 0);
}

#[tokio::test(start_paused = true)]
async fn test_descent_routes_created_on_demand() {
    let config = ResortConfig {
        routes: Vec::new(),
        skier_count: 15,
        seed: Some(99),
        ..Default::default()
    };
    let simulation = SimulationOrchestrator::new(config).unwrap().start().unwrap();
    let registry = Arc::clone(simulation.registry());
    assert!(registry.descent_routes().is_empty());

    let statistics = simulation.run_for(Duration::from_secs(120)).await.unwrap();
    let routes = registry.descent_routes();

    assert!(statistics.routes_created > 0);
    assert_eq!(statistics.routes_created, routes.len());
    assert!(statistics.is_conserved());
    for route in &routes {
        assert!(route.is_descent(), "{} does not lead downhill", route.name());
        assert!((5..10).contains(&route.duration().as_secs()));
        assert_eq!(route.count(), 0);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_descent_creation_yields_one_route() {
    let config = ResortConfig { routes: Vec::new(), skier_count: 1, ..Default::default() };
    let resort = ResortBuilder::new().build(&config).unwrap();
    let registry = resort.registry;
    assert!(registry.descent_routes().is_empty());

    let tasks: Vec<_> = (0..32u64)
        .map(|seed| {
            let registry = Arc::clone(&registry);
            tokio::spawn(async move {
                let summit = Arc::clone(registry.station_by_name("szczyt").unwrap());
                let base = Arc::clone(registry.station_by_name("baza").unwrap());
                let mut rng = StdRng::seed_from_u64(seed);
                registry.get_or_create_descent(&summit, &base, &mut rng)
            })
        })
        .collect();

    let mut routes = Vec::new();
    for task in tasks {
        routes.push(task.await.unwrap());
    }

    assert_eq!(registry.routes_created(), 1);
    assert_eq!(registry.descent_routes().len(), 1);
    assert!(routes.iter().all(|route| Arc::ptr_eq(route, &routes[0])));
    assert_eq!(routes[0].name(), "szczyt-baza");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_shutdown_is_prompt() {
    let config = ResortConfig { skier_count: 30, ..Default::default() };
    let simulation = SimulationOrchestrator::new(config).unwrap().start().unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    // Lifts are mid-interval and skiers mid-rest; none of it may delay shutdown
    let statistics = tokio::time::timeout(Duration::from_secs(5), simulation.shutdown())
        .await
        .expect("shutdown did not finish in time")
        .unwrap();

    assert!(statistics.is_conserved());
    assert!(statistics.run_duration < Duration::from_secs(5));
}

#[tokio::test(start_paused = true)]
async fn test_cancelling_token_stops_run() {
    let config = ResortConfig { skier_count: 10, seed: Some(3), ..Default::default() };
    let simulation = SimulationOrchestrator::new(config).unwrap().start().unwrap();
    let token = simulation.shutdown_token();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(20)).await;
        token.cancel();
    });

    let statistics = simulation.run_for(Duration::from_secs(3_600)).await.unwrap();
    assert!(statistics.run_duration <= Duration::from_secs(21));
    assert!(statistics.is_conserved());
}
