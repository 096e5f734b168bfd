// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use ski_resort_simulator::*;


mod simulation_integration_tests;

#[test]
fn test_core_id_types() {
    let run_id = RunId::new();
    assert_ne!(run_id, RunId::new());

    // Test string formatting
    assert!(run_id.to_string().starts_with("RUN_"));
    assert_eq!(SkierId(12).to_string(), "SKIER_12");
    assert_eq!(StationId(0).to_string(), "STATION_0");
}

#[test]
fn test_enum_types() {
    for level in [Level::Base, Level::Mid, Level::Summit] {
        assert!(!level.to_string().is_empty());
    }

    for state in [LiftState::Running, LiftState::Draining, LiftState::Maintenance] {
        assert_eq!(state.to_string().parse::<LiftState>().unwrap(), state);
    }

    for status in [
        SkierStatus::Waiting,
        SkierStatus::OnLift,
        SkierStatus::AtStation,
        SkierStatus::Skiing,
    ] {
        assert!(!status.to_string().is_empty());
    }
}

#[test]
fn test_serialization_roundtrip() {
    let run_id = RunId::new();
    let json = serde_json::to_string(&run_id).unwrap();
    let deserialized: RunId = serde_json::from_str(&json).unwrap();
    assert_eq!(run_id, deserialized);

    let state = LiftState::Draining;
    let json = serde_json::to_string(&state).unwrap();
    let deserialized: LiftState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, deserialized);
}

#[test]
fn test_station_levels_from_resort_description() {
    let json = r#"{
        "stations": [
            {"name": "Dolna", "type": "bazowa"},
            {"name": "Hala", "type": "posrednia"},
            {"name": "Kopa", "type": "szczyt"},
            {"name": "Góra Wschodnia"},
            {"name": "Parking"}
        ]
    }"#;
    let mut config = ResortConfig::from_json_str(json).unwrap();
    config.skier_count = 1;

    let resort = ResortBuilder::new().build(&config).unwrap();
    let levels: Vec<Level> = resort.registry.stations().iter().map(|s| s.level()).collect();
    assert_eq!(
        levels,
        vec![Level::Base, Level::Mid, Level::Summit, Level::Summit, Level::Base]
    );
}

#[test]
fn test_snapshot_json_output_has_prefixes() {
    let orchestrator =
        SimulationOrchestrator::new(ResortConfig { skier_count: 3, ..Default::default() })
            .unwrap();
    let json = serde_json::to_string(&orchestrator.initial_snapshot()).unwrap();

    println!("Snapshot JSON: {}", json);
    assert!(json.contains("\"runId\":\"RUN_"));
    assert!(json.contains("\"stations\""));
    assert!(json.contains("\"lifts\""));
}
