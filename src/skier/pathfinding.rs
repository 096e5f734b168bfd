//! Uphill path planning
//!
//! Skiers reach higher stations only by lift. A path is a breadth-first search
//! over the lifts that currently accept riders, following each lift from its
//! lower to its upper station.

use crate::lift::Lift;
use crate::resort::ResortRegistry;
use crate::types::StationId;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Shortest sequence of available lifts leading from `from` to `to`
///
/// Returns an empty path when the stations coincide and `None` when no path
/// exists. Lifts are taken in registry order, so among equally short paths the
/// first one discovered wins. Lift availability is read once, when the search
/// starts.
pub fn find_lift_path(
    registry: &ResortRegistry,
    from: StationId,
    to: StationId,
) -> Option<Vec<Arc<Lift>>> {
    if from == to {
        return Some(Vec::new());
    }

    let available: Vec<&Arc<Lift>> =
        registry.lifts().iter().filter(|lift| lift.is_available()).collect();

    let mut reached_by: HashMap<StationId, &Arc<Lift>> = HashMap::new();
    let mut visited = HashSet::from([from]);
    let mut frontier = VecDeque::from([from]);

    while let Some(station) = frontier.pop_front() {
        if station == to {
            break;
        }
        for lift in available.iter().filter(|lift| lift.lower().id() == station) {
            let next = lift.upper().id();
            if visited.insert(next) {
                reached_by.insert(next, lift);
                frontier.push_back(next);
            }
        }
    }

    let mut path = Vec::new();
    let mut cursor = to;
    while cursor != from {
        let lift = reached_by.get(&cursor)?;
        path.push(Arc::clone(lift));
        cursor = lift.lower().id();
    }
    path.reverse();
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resort::{ResortBuilder, ResortRegistry};
    use crate::types::{LiftConfig, LiftState, ResortConfig, StationConfig};

    fn lift(name: &str, route: &str) -> LiftConfig {
        LiftConfig {
            name: name.to_string(),
            route: route.to_string(),
            capacity: 4,
            interval: 3,
            boarding_group_size: 1,
            maintenance_time: 60,
            maintenance_duration: 20,
        }
    }

    fn station(name: &str, kind: &str) -> StationConfig {
        StationConfig { name: name.to_string(), station_type: Some(kind.to_string()) }
    }

    fn registry(config: ResortConfig) -> Arc<ResortRegistry> {
        ResortBuilder::new().build(&config).unwrap().registry
    }

    fn names(path: &[Arc<Lift>]) -> Vec<&str> {
        path.iter().map(|lift| lift.name()).collect()
    }

    fn id(registry: &ResortRegistry, name: &str) -> StationId {
        registry.station_by_name(name).unwrap().id()
    }

    #[tokio::test]
    async fn test_direct_lift_is_preferred() {
        let registry = registry(ResortConfig::default());
        let path = find_lift_path(&registry, id(&registry, "baza"), id(&registry, "szczyt"));
        assert_eq!(names(&path.unwrap()), vec!["C"]);
    }

    #[tokio::test]
    async fn test_chain_used_when_direct_lift_unavailable() {
        let registry = registry(ResortConfig::default());
        registry.lift_by_name("C").unwrap().set_state(LiftState::Maintenance);

        let path = find_lift_path(&registry, id(&registry, "baza"), id(&registry, "szczyt"));
        assert_eq!(names(&path.unwrap()), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_no_path_when_every_route_is_down() {
        let registry = registry(ResortConfig::default());
        registry.lift_by_name("C").unwrap().set_state(LiftState::Draining);
        registry.lift_by_name("B").unwrap().set_state(LiftState::Maintenance);

        let path = find_lift_path(&registry, id(&registry, "baza"), id(&registry, "szczyt"));
        assert!(path.is_none());

        // The first hop is still reachable
        let path = find_lift_path(&registry, id(&registry, "baza"), id(&registry, "polowa"));
        assert_eq!(names(&path.unwrap()), vec!["A"]);
    }

    #[tokio::test]
    async fn test_same_station_gives_empty_path() {
        let registry = registry(ResortConfig::default());
        let baza = id(&registry, "baza");
        assert_eq!(find_lift_path(&registry, baza, baza).map(|path| path.len()), Some(0));
    }

    #[tokio::test]
    async fn test_lifts_only_go_up() {
        let registry = registry(ResortConfig::default());
        let path = find_lift_path(&registry, id(&registry, "szczyt"), id(&registry, "baza"));
        assert!(path.is_none());
    }

    #[tokio::test]
    async fn test_path_is_minimal_in_wider_network() {
        // Two mid stations; the long way round has three hops, the short one two
        let config = ResortConfig {
            stations: vec![
                station("dolina", "baza"),
                station("las", "posrednia"),
                station("hala", "posrednia"),
                station("grzbiet", "szczyt"),
                station("wierch", "szczyt"),
            ],
            routes: Vec::new(),
            lifts: vec![
                lift("L1", "dolina-las"),
                lift("L2", "las-hala"),
                lift("L3", "hala-wierch"),
                lift("L4", "dolina-hala"),
                lift("L5", "grzbiet-wierch"),
                lift("L6", "las-grzbiet"),
            ],
            skier_count: 1,
            ..Default::default()
        };
        let registry = registry(config);
        let dolina = id(&registry, "dolina");

        let path = find_lift_path(&registry, dolina, id(&registry, "wierch")).unwrap();
        assert_eq!(names(&path), vec!["L4", "L3"]);

        let path = find_lift_path(&registry, dolina, id(&registry, "grzbiet")).unwrap();
        assert_eq!(names(&path), vec!["L1", "L6"]);

        // Consecutive lifts always connect
        for pair in path.windows(2) {
            assert_eq!(pair[0].upper().id(), pair[1].lower().id());
        }
    }
}
