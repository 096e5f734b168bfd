//! Identifier types for the ski resort simulator
//!
//! Skiers carry the numeric id they were created with, stations are addressed by
//! their position in the registry, and each simulation run gets a UUID so that
//! snapshots from different runs can be told apart.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Numeric identifier of a skier (1-based, assigned at startup)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SkierId(pub u32);

impl fmt::Display for SkierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SKIER_{}", self.0)
    }
}

/// Index of a station inside the resort registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StationId(pub usize);

impl StationId {
    /// Position of the station in the registry's station list
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "STATION_{}", self.0)
    }
}

/// Unique identifier for one simulation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new random run ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RUN_{}", self.0.simple())
    }
}

impl Serialize for RunId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("RUN_{}", self.0.simple()))
    }
}

impl<'de> Deserialize<'de> for RunId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let raw = s.strip_prefix("RUN_").unwrap_or(&s);
        let uuid = Uuid::parse_str(raw).map_err(serde::de::Error::custom)?;
        Ok(RunId(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skier_id_display() {
        assert_eq!(SkierId(7).to_string(), "SKIER_7");
    }

    #[test]
    fn test_station_id_index() {
        let id = StationId(2);
        assert_eq!(id.index(), 2);
        assert_eq!(id.to_string(), "STATION_2");
    }

    #[test]
    fn test_run_id_display_format() {
        let id = RunId::new();
        let display_str = id.to_string();

        // RUN_ prefix followed by 32 hex chars
        assert!(display_str.starts_with("RUN_"));
        assert_eq!(display_str.len(), 36);
    }

    #[test]
    fn test_run_id_serialization() {
        let id = RunId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert!(json.contains("RUN_"));

        let back: RunId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);

        // Raw UUIDs are accepted as well
        let raw = format!("\"{}\"", id.0);
        let back: RunId = serde_json::from_str(&raw).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_run_ids_are_unique() {
        assert_ne!(RunId::new(), RunId::new());
    }
}
