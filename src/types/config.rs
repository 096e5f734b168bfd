//! Configuration structures for the ski resort simulator
//!
//! This module contains the resort description (stations, routes, lifts), the
//! command line interface and the validation rules applied before a run starts.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Defaults substituted for lift parameters configured as zero or negative
pub mod lift_defaults {
    /// Seconds of running time before maintenance is due
    pub const MAINTENANCE_TIME_SECS: i64 = 60;

    /// Seconds a maintenance stop lasts
    pub const MAINTENANCE_DURATION_SECS: i64 = 20;

    /// Riders admitted per boarding tick
    pub const BOARDING_GROUP_SIZE: i64 = 1;
}

/// Default interval between snapshot ticks, in seconds
pub const DEFAULT_SNAPSHOT_INTERVAL_SECS: u64 = 2;

/// Upper bound for every configured interval and duration, in seconds (one day)
pub const MAX_INTERVAL_SECS: u64 = 86_400;

/// A station entry of the resort description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StationConfig {
    /// Unique station name (e.g. "baza")
    pub name: String,
    /// Free-form station type used to derive the elevation level
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub station_type: Option<String>,
}

/// A route entry; `name` has the form `from-to`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteConfig {
    /// Route name, `<from>-<to>`
    pub name: String,
    /// Descent time in seconds (0 marks a lift-only placeholder)
    #[serde(default)]
    pub duration: i64,
}

/// A lift entry of the resort description
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiftConfig {
    /// Lift name
    pub name: String,
    /// Name of the backing route, `<lower>-<upper>`
    pub route: String,
    /// Maximum number of riders at once
    pub capacity: u32,
    /// Ride time from lower to upper station, in seconds
    #[serde(alias = "transitInterval")]
    pub interval: u64,
    /// Riders admitted per boarding tick
    #[serde(default)]
    pub boarding_group_size: i64,
    /// Seconds of running time before maintenance is due
    #[serde(default)]
    pub maintenance_time: i64,
    /// Seconds a maintenance stop lasts
    #[serde(default)]
    pub maintenance_duration: i64,
}

impl LiftConfig {
    /// Replace non-positive maintenance and boarding parameters with defaults
    pub fn with_defaults(mut self) -> Self {
        if self.maintenance_time <= 0 {
            self.maintenance_time = lift_defaults::MAINTENANCE_TIME_SECS;
        }
        if self.maintenance_duration <= 0 {
            self.maintenance_duration = lift_defaults::MAINTENANCE_DURATION_SECS;
        }
        if self.boarding_group_size <= 0 {
            self.boarding_group_size = lift_defaults::BOARDING_GROUP_SIZE;
        }
        self
    }
}

/// Reject values the run clock cannot add to the current instant
fn check_interval(field: &str, value: u64) -> Result<(), ConfigValidationError> {
    if value > MAX_INTERVAL_SECS {
        return Err(ConfigValidationError::IntervalTooLong { field: field.to_string(), value });
    }
    Ok(())
}

/// Split a `from-to` route name into its two station names
pub fn split_route_name(name: &str) -> Option<(&str, &str)> {
    let (from, to) = name.split_once('-')?;
    let (from, to) = (from.trim(), to.trim());
    if from.is_empty() || to.is_empty() {
        None
    } else {
        Some((from, to))
    }
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ski-resort-simulator",
    version = "0.1.0",
    about = "Ski Resort Simulator - skiers, lifts and descent routes running concurrently",
    long_about = "Simulates skiers moving through a ski resort. Every skier and every lift runs as its own task: lifts board waiting skiers in batches and periodically stop for maintenance, skiers plan lift paths uphill and take descent routes downhill.

EXAMPLES:
    # Run the built-in resort until Ctrl-C
    ski-resort-simulator

    # Use a resort description
    ski-resort-simulator --config resort.json

    # Run for two minutes with 200 skiers and JSON snapshots
    ski-resort-simulator --skier-count 200 --duration 120 --json

    # Generate a configuration template
    ski-resort-simulator --print-config > my-resort.json

    # Validate configuration without running
    ski-resort-simulator --config my-resort.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Built-in default resort (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON resort description. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of skiers to simulate
    #[arg(long, help = "Number of skiers to simulate")]
    pub skier_count: Option<usize>,

    /// Seconds between boarding ticks, shared by every lift
    #[arg(
        long,
        help = "Global boarding interval in seconds",
        long_help = "Seconds between boarding ticks. Every lift admits at most one boarding group per tick. Must be greater than 0."
    )]
    pub boarding_interval: Option<u64>,

    /// Seconds between snapshots
    #[arg(long, help = "Seconds between snapshot reports")]
    pub snapshot_interval: Option<u64>,

    /// Station every skier starts at
    #[arg(long, help = "Name of the starting station")]
    pub start_station: Option<String>,

    /// Stop after this many seconds
    #[arg(
        long,
        help = "Run for this many seconds, then shut down",
        long_help = "Run for this many seconds, then shut down all skiers and lifts. Without this flag the simulation runs until Ctrl-C."
    )]
    pub duration: Option<u64>,

    /// Random seed for reproducible skier behavior
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Emit snapshots as JSON lines instead of the text report
    #[arg(long, help = "Print snapshots as JSON lines")]
    pub json: bool,

    /// Also write logs to rolling files in this directory
    #[arg(long, help = "Directory for log files")]
    pub log_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// Stations of the resort
    #[serde(alias = "stacje")]
    pub stations: Option<Vec<StationConfig>>,

    /// Statically configured routes
    #[serde(alias = "trasy")]
    pub routes: Option<Vec<RouteConfig>>,

    /// Lifts
    #[serde(alias = "wyciagi")]
    pub lifts: Option<Vec<LiftConfig>>,

    /// Number of skiers
    #[serde(alias = "liczbaNarciarzy")]
    pub skier_count: Option<usize>,

    /// Seconds between boarding ticks
    pub global_boarding_interval: Option<u64>,

    /// Seconds between snapshots
    pub snapshot_interval: Option<u64>,

    /// Station every skier starts at
    pub start_station: Option<String>,

    /// Stop after this many seconds
    pub run_duration: Option<u64>,

    /// Random seed
    pub seed: Option<u64>,
}

/// Complete description of a resort and of how to run it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResortConfig {
    /// Stations of the resort
    pub stations: Vec<StationConfig>,

    /// Statically configured routes
    pub routes: Vec<RouteConfig>,

    /// Lifts
    pub lifts: Vec<LiftConfig>,

    /// Number of skiers
    pub skier_count: usize,

    /// Seconds between boarding ticks, shared by all lifts
    pub global_boarding_interval: u64,

    /// Seconds between snapshots
    pub snapshot_interval: u64,

    /// Station every skier starts at (first base station when absent)
    pub start_station: Option<String>,

    /// Stop after this many seconds (run until interrupted when absent)
    pub run_duration: Option<u64>,

    /// Random seed for reproducible skier behavior
    pub seed: Option<u64>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for a resort configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// No stations configured
    #[error("At least one station must be configured")]
    NoStations,

    /// Two stations share a name
    #[error("Duplicate station name: {0}")]
    DuplicateStation(String),

    /// Two lifts share a name
    #[error("Duplicate lift name: {0}")]
    DuplicateLift(String),

    /// Route name is not of the form `from-to`
    #[error("Malformed route name '{0}' (expected '<from>-<to>')")]
    MalformedRouteName(String),

    /// A route or lift references a station that does not exist
    #[error("{referenced_by} references unknown station '{station}'")]
    UnknownStation {
        /// Route or lift holding the reference
        referenced_by: String,
        /// The missing station name
        station: String,
    },

    /// A route connects a station with itself
    #[error("Route '{0}' starts and ends at the same station")]
    DegenerateRoute(String),

    /// Negative route duration
    #[error("Route '{route}' has negative duration {duration}")]
    InvalidRouteDuration {
        /// Route name
        route: String,
        /// The configured duration
        duration: i64,
    },

    /// Lift capacity must be positive
    #[error("Lift '{0}' must have a capacity greater than 0")]
    InvalidCapacity(String),

    /// Skier count is invalid
    #[error("Skier count must be greater than 0, got {0}")]
    InvalidSkierCount(usize),

    /// Boarding interval is invalid
    #[error("Global boarding interval must be greater than 0, got {0}")]
    InvalidBoardingInterval(u64),

    /// Snapshot interval is invalid
    #[error("Snapshot interval must be greater than 0, got {0}")]
    InvalidSnapshotInterval(u64),

    /// Start station does not exist
    #[error("Unknown start station: {0}")]
    UnknownStartStation(String),

    /// An interval or duration exceeds [`MAX_INTERVAL_SECS`]
    #[error("{field} of {value}s exceeds the limit of {}s", MAX_INTERVAL_SECS)]
    IntervalTooLong {
        /// Which setting is out of range
        field: String,
        /// The configured value in seconds
        value: u64,
    },
}

impl Default for ResortConfig {
    fn default() -> Self {
        let station = |name: &str, kind: &str| StationConfig {
            name: name.to_string(),
            station_type: Some(kind.to_string()),
        };
        let route = |name: &str, duration: i64| RouteConfig { name: name.to_string(), duration };
        let lift = |name: &str, route: &str, capacity, interval, group, time, duration| LiftConfig {
            name: name.to_string(),
            route: route.to_string(),
            capacity,
            interval,
            boarding_group_size: group,
            maintenance_time: time,
            maintenance_duration: duration,
        };

        Self {
            stations: vec![
                station("baza", "bazowa"),
                station("polowa", "posrednia"),
                station("szczyt", "szczyt"),
            ],
            routes: vec![
                route("szczyt-baza", 9),
                route("szczyt-polowa", 6),
                route("polowa-baza", 5),
            ],
            lifts: vec![
                lift("A", "baza-polowa", 8, 4, 2, 60, 15),
                lift("B", "polowa-szczyt", 6, 5, 2, 75, 20),
                lift("C", "baza-szczyt", 12, 8, 4, 90, 20),
            ],
            skier_count: 40,
            global_boarding_interval: 2,
            snapshot_interval: DEFAULT_SNAPSHOT_INTERVAL_SECS,
            start_station: None,
            run_duration: None,
            seed: None,
        }
    }
}

impl ResortConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Parse a JSON resort description, merging it with the defaults
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config_file: ConfigFile = serde_json::from_str(content)?;
        Ok(Self::from_config_file(config_file))
    }

    /// Create configuration from a config file, merging with defaults
    ///
    /// A file that lists stations replaces the whole default topology, so the
    /// built-in routes and lifts never leak into a user-supplied resort.
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        let (stations, routes, lifts) = match config_file.stations {
            Some(stations) => (
                stations,
                config_file.routes.unwrap_or_default(),
                config_file.lifts.unwrap_or_default(),
            ),
            None => (
                defaults.stations,
                config_file.routes.unwrap_or(defaults.routes),
                config_file.lifts.unwrap_or(defaults.lifts),
            ),
        };

        Self {
            stations,
            routes,
            lifts,
            skier_count: config_file.skier_count.unwrap_or(defaults.skier_count),
            global_boarding_interval: config_file
                .global_boarding_interval
                .unwrap_or(defaults.global_boarding_interval),
            snapshot_interval: config_file.snapshot_interval.unwrap_or(defaults.snapshot_interval),
            start_station: config_file.start_station.or(defaults.start_station),
            run_duration: config_file.run_duration.or(defaults.run_duration),
            seed: config_file.seed.or(defaults.seed),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.skier_count {
            config.skier_count = value;
        }
        if let Some(value) = args.boarding_interval {
            config.global_boarding_interval = value;
        }
        if let Some(value) = args.snapshot_interval {
            config.snapshot_interval = value;
        }
        if let Some(value) = args.start_station {
            config.start_station = Some(value);
        }
        if let Some(value) = args.duration {
            config.run_duration = Some(value);
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Lifts with non-positive maintenance and boarding parameters defaulted
    pub fn effective_lifts(&self) -> Vec<LiftConfig> {
        self.lifts.iter().cloned().map(LiftConfig::with_defaults).collect()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.stations.is_empty() {
            return Err(ConfigValidationError::NoStations);
        }

        let mut station_names = HashSet::new();
        for station in &self.stations {
            if !station_names.insert(station.name.as_str()) {
                return Err(ConfigValidationError::DuplicateStation(station.name.clone()));
            }
        }

        for route in &self.routes {
            if route.duration < 0 {
                return Err(ConfigValidationError::InvalidRouteDuration {
                    route: route.name.clone(),
                    duration: route.duration,
                });
            }
            check_interval(&format!("Route '{}' duration", route.name), route.duration as u64)?;
            self.validate_route_name(&route.name, &route.name, &station_names)?;
        }

        let mut lift_names = HashSet::new();
        for lift in &self.lifts {
            if !lift_names.insert(lift.name.as_str()) {
                return Err(ConfigValidationError::DuplicateLift(lift.name.clone()));
            }
            if lift.capacity == 0 {
                return Err(ConfigValidationError::InvalidCapacity(lift.name.clone()));
            }
            let effective = lift.clone().with_defaults();
            check_interval(&format!("Lift '{}' interval", lift.name), effective.interval)?;
            check_interval(
                &format!("Lift '{}' maintenance time", lift.name),
                effective.maintenance_time as u64,
            )?;
            check_interval(
                &format!("Lift '{}' maintenance duration", lift.name),
                effective.maintenance_duration as u64,
            )?;
            self.validate_route_name(
                &format!("Lift '{}'", lift.name),
                &lift.route,
                &station_names,
            )?;
        }

        if self.skier_count == 0 {
            return Err(ConfigValidationError::InvalidSkierCount(self.skier_count));
        }

        if self.global_boarding_interval == 0 {
            return Err(ConfigValidationError::InvalidBoardingInterval(
                self.global_boarding_interval,
            ));
        }

        check_interval("Global boarding interval", self.global_boarding_interval)?;

        if self.snapshot_interval == 0 {
            return Err(ConfigValidationError::InvalidSnapshotInterval(self.snapshot_interval));
        }
        check_interval("Snapshot interval", self.snapshot_interval)?;

        if let Some(start) = &self.start_station {
            if !station_names.contains(start.as_str()) {
                return Err(ConfigValidationError::UnknownStartStation(start.clone()));
            }
        }

        Ok(())
    }

    /// Helper method to validate a `from-to` reference against known stations
    fn validate_route_name(
        &self,
        referenced_by: &str,
        route_name: &str,
        station_names: &HashSet<&str>,
    ) -> Result<(), ConfigValidationError> {
        let (from, to) = split_route_name(route_name)
            .ok_or_else(|| ConfigValidationError::MalformedRouteName(route_name.to_string()))?;

        for station in [from, to] {
            if !station_names.contains(station) {
                return Err(ConfigValidationError::UnknownStation {
                    referenced_by: referenced_by.to_string(),
                    station: station.to_string(),
                });
            }
        }

        if from == to {
            return Err(ConfigValidationError::DegenerateRoute(route_name.to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> CliArgs {
        CliArgs {
            config: None,
            skier_count: None,
            boarding_interval: None,
            snapshot_interval: None,
            start_station: None,
            duration: None,
            seed: None,
            json: false,
            log_dir: None,
            verbose: false,
            debug: false,
            dry_run: false,
            print_config: false,
        }
    }

    #[test]
    fn test_resort_config_default() {
        let config = ResortConfig::default();

        assert_eq!(config.stations.len(), 3);
        assert_eq!(config.routes.len(), 3);
        assert_eq!(config.lifts.len(), 3);
        assert_eq!(config.skier_count, 40);
        assert_eq!(config.global_boarding_interval, 2);
        assert_eq!(config.snapshot_interval, DEFAULT_SNAPSHOT_INTERVAL_SECS);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_lift_defaults_applied_to_non_positive_values() {
        let lift = LiftConfig {
            name: "X".to_string(),
            route: "baza-szczyt".to_string(),
            capacity: 4,
            interval: 3,
            boarding_group_size: 0,
            maintenance_time: -5,
            maintenance_duration: 0,
        }
        .with_defaults();

        assert_eq!(lift.maintenance_time, 60);
        assert_eq!(lift.maintenance_duration, 20);
        assert_eq!(lift.boarding_group_size, 1);
    }

    #[test]
    fn test_lift_defaults_keep_positive_values() {
        let lift = LiftConfig {
            name: "X".to_string(),
            route: "baza-szczyt".to_string(),
            capacity: 4,
            interval: 3,
            boarding_group_size: 3,
            maintenance_time: 10,
            maintenance_duration: 5,
        }
        .with_defaults();

        assert_eq!(lift.maintenance_time, 10);
        assert_eq!(lift.maintenance_duration, 5);
        assert_eq!(lift.boarding_group_size, 3);
    }

    #[test]
    fn test_split_route_name() {
        assert_eq!(split_route_name("polowa-baza"), Some(("polowa", "baza")));
        assert_eq!(split_route_name("polowa"), None);
        assert_eq!(split_route_name("-baza"), None);
        assert_eq!(split_route_name("baza-"), None);
    }

    #[test]
    fn test_polish_document_keys_are_accepted() {
        let json = r#"{
            "stacje": [
                {"name": "baza", "type": "bazowa"},
                {"name": "szczyt", "type": "szczyt"}
            ],
            "trasy": [{"name": "szczyt-baza", "duration": 7}],
            "wyciagi": [{
                "name": "A", "route": "baza-szczyt", "capacity": 4, "interval": 3,
                "boardingGroupSize": 2, "maintenanceTime": 0, "maintenanceDuration": 0
            }],
            "liczbaNarciarzy": 12,
            "globalBoardingInterval": 1
        }"#;

        let config = ResortConfig::from_json_str(json).unwrap();
        assert_eq!(config.stations.len(), 2);
        assert_eq!(config.routes[0].duration, 7);
        assert_eq!(config.lifts[0].boarding_group_size, 2);
        assert_eq!(config.skier_count, 12);
        assert_eq!(config.global_boarding_interval, 1);
        assert!(config.validate().is_ok());

        let lifts = config.effective_lifts();
        assert_eq!(lifts[0].maintenance_time, 60);
    }

    #[test]
    fn test_stations_in_file_replace_default_topology() {
        let json = r#"{"stations": [{"name": "baza"}, {"name": "szczyt"}]}"#;
        let config = ResortConfig::from_json_str(json).unwrap();

        assert_eq!(config.stations.len(), 2);
        assert!(config.routes.is_empty());
        assert!(config.lifts.is_empty());
    }

    #[test]
    fn test_config_file_loading() {
        use std::io::Write;
        use tempfile::Builder;

        let mut temp_file = Builder::new().suffix(".json").tempfile().unwrap();
        let config_json = r#"{
            "skierCount": 250,
            "globalBoardingInterval": 3,
            "snapshotInterval": 5,
            "seed": 12345
        }"#;

        temp_file.write_all(config_json.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = ResortConfig::from_file(temp_file.path()).unwrap();

        assert_eq!(config.skier_count, 250);
        assert_eq!(config.global_boarding_interval, 3);
        assert_eq!(config.snapshot_interval, 5);
        assert_eq!(config.seed, Some(12345));
        // Topology falls back to the built-in resort
        assert_eq!(config.lifts.len(), 3);
    }

    #[test]
    fn test_config_file_not_found() {
        match ResortConfig::from_file("/definitely/not/here.json") {
            Err(ConfigError::FileNotFound(_)) => {}
            other => panic!("Expected FileNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_config_file_unsupported_extension() {
        let temp_file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        match ResortConfig::from_file(temp_file.path()) {
            Err(ConfigError::UnsupportedFormat(ext)) => assert_eq!(ext, "yaml"),
            other => panic!("Expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs {
            skier_count: Some(500),
            boarding_interval: Some(4),
            seed: Some(54321),
            duration: Some(30),
            ..bare_args()
        };

        let config = ResortConfig::from_cli_args(args).unwrap();

        assert_eq!(config.skier_count, 500);
        assert_eq!(config.global_boarding_interval, 4);
        assert_eq!(config.seed, Some(54321));
        assert_eq!(config.run_duration, Some(30));
        // Non-overridden fields keep their defaults
        assert_eq!(config.snapshot_interval, DEFAULT_SNAPSHOT_INTERVAL_SECS);
    }

    #[test]
    fn test_validation_unknown_station() {
        let mut config = ResortConfig::default();
        config.routes.push(RouteConfig { name: "szczyt-parking".to_string(), duration: 4 });

        match config.validate() {
            Err(ConfigValidationError::UnknownStation { station, .. }) => {
                assert_eq!(station, "parking");
            }
            other => panic!("Expected UnknownStation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_lift_with_unknown_station() {
        let mut config = ResortConfig::default();
        config.lifts[0].route = "baza-lodowiec".to_string();

        match config.validate() {
            Err(ConfigValidationError::UnknownStation { referenced_by, station }) => {
                assert_eq!(referenced_by, "Lift 'A'");
                assert_eq!(station, "lodowiec");
            }
            other => panic!("Expected UnknownStation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_malformed_route() {
        let mut config = ResortConfig::default();
        config.routes[0].name = "szczytbaza".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::MalformedRouteName(_))
        ));
    }

    #[test]
    fn test_validation_duplicate_station() {
        let mut config = ResortConfig::default();
        config.stations.push(StationConfig { name: "baza".to_string(), station_type: None });

        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::DuplicateStation(name)) if name == "baza"
        ));
    }

    #[test]
    fn test_validation_zero_capacity() {
        let mut config = ResortConfig::default();
        config.lifts[1].capacity = 0;

        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidCapacity(name)) if name == "B"
        ));
    }

    #[test]
    fn test_validation_intervals_and_counts() {
        let mut config = ResortConfig::default();
        config.skier_count = 0;
        assert!(matches!(config.validate(), Err(ConfigValidationError::InvalidSkierCount(0))));

        let mut config = ResortConfig::default();
        config.global_boarding_interval = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidBoardingInterval(0))
        ));

        let mut config = ResortConfig::default();
        config.snapshot_interval = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidSnapshotInterval(0))
        ));
    }

    #[test]
    fn test_validation_start_station() {
        let mut config = ResortConfig::default();
        config.start_station = Some("polowa".to_string());
        assert!(config.validate().is_ok());

        config.start_station = Some("hotel".to_string());
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::UnknownStartStation(_))
        ));
    }

    #[test]
    fn test_validation_interval_upper_bounds() {
        fn too_long(config: &ResortConfig) -> bool {
            matches!(config.validate(), Err(ConfigValidationError::IntervalTooLong { .. }))
        }

        let mut config = ResortConfig::default();
        config.global_boarding_interval = MAX_INTERVAL_SECS;
        config.snapshot_interval = MAX_INTERVAL_SECS;
        assert!(config.validate().is_ok(), "one day is still accepted");

        let mut config = ResortConfig::default();
        config.global_boarding_interval = u64::MAX;
        assert!(too_long(&config));

        let mut config = ResortConfig::default();
        config.snapshot_interval = MAX_INTERVAL_SECS + 1;
        assert!(too_long(&config));

        let mut config = ResortConfig::default();
        config.routes[0].duration = i64::MAX;
        assert!(too_long(&config));

        let mut config = ResortConfig::default();
        config.lifts[0].interval = u64::MAX;
        assert!(too_long(&config));

        let mut config = ResortConfig::default();
        config.lifts[1].maintenance_time = i64::MAX;
        match config.validate() {
            Err(ConfigValidationError::IntervalTooLong { field, value }) => {
                assert_eq!(field, "Lift 'B' maintenance time");
                assert_eq!(value, i64::MAX as u64);
            }
            other => panic!("expected IntervalTooLong, got {:?}", other),
        }

        let mut config = ResortConfig::default();
        config.lifts[2].maintenance_duration = MAX_INTERVAL_SECS as i64 + 1;
        assert!(too_long(&config));

        // Negative maintenance values fall back to defaults before the bound applies
        let mut config = ResortConfig::default();
        config.lifts[0].maintenance_time = i64::MIN;
        config.lifts[0].maintenance_duration = -1;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_print_json_round_trip() {
        let config = ResortConfig::default();
        let json = config.print_json().unwrap();
        assert!(json.contains("globalBoardingInterval"));
        assert!(json.contains("boardingGroupSize"));

        let parsed = ResortConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
