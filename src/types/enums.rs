//! Enumeration types for the ski resort simulator
//!
//! Elevation levels of stations, the operational states of a lift and the
//! activity status of a skier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Elevation level of a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    /// Bottom of the resort (level 0)
    Base,
    /// Intermediate station (level 1)
    Mid,
    /// Top of the resort (level 2)
    Summit,
}

const BASE_TYPE_MARKERS: &[&str] = &["baz", "base", "bottom"];
const MID_TYPE_MARKERS: &[&str] = &["posred", "pośred", "pol", "mid", "intermediate"];
const SUMMIT_TYPE_MARKERS: &[&str] = &["szczyt", "summit", "top", "peak"];

const BASE_NAME_MARKERS: &[&str] = &["baza", "base"];
const MID_NAME_MARKERS: &[&str] = &["polowa", "pośred", "mid"];
const SUMMIT_NAME_MARKERS: &[&str] = &["szczyt", "góra", "top", "summit"];

impl Level {
    /// Numeric elevation (0 = base, 1 = mid, 2 = summit)
    pub fn value(self) -> u8 {
        match self {
            Level::Base => 0,
            Level::Mid => 1,
            Level::Summit => 2,
        }
    }

    /// Derive the level of a station from its configured type, falling back
    /// to its name and finally to [`Level::Base`].
    pub fn derive(station_type: Option<&str>, name: &str) -> Self {
        if let Some(kind) = station_type {
            if let Some(level) = Self::match_markers(
                &kind.to_lowercase(),
                BASE_TYPE_MARKERS,
                MID_TYPE_MARKERS,
                SUMMIT_TYPE_MARKERS,
            ) {
                return level;
            }
        }

        Self::match_markers(
            &name.to_lowercase(),
            BASE_NAME_MARKERS,
            MID_NAME_MARKERS,
            SUMMIT_NAME_MARKERS,
        )
        .unwrap_or(Level::Base)
    }

    fn match_markers(
        text: &str,
        base: &[&str],
        mid: &[&str],
        summit: &[&str],
    ) -> Option<Self> {
        if base.iter().any(|marker| text.contains(marker)) {
            Some(Level::Base)
        } else if mid.iter().any(|marker| text.contains(marker)) {
            Some(Level::Mid)
        } else if summit.iter().any(|marker| text.contains(marker)) {
            Some(Level::Summit)
        } else {
            None
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Base => write!(f, "Base"),
            Level::Mid => write!(f, "Mid"),
            Level::Summit => write!(f, "Summit"),
        }
    }
}

/// Operational state of a lift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LiftState {
    /// Boarding and releasing riders normally
    Running,
    /// Maintenance is due; no new boarding, riders already aboard still arrive
    Draining,
    /// Lift is empty and stopped for service
    Maintenance,
}

impl LiftState {
    /// Whether the lift currently accepts skiers into its queue
    pub fn accepts_riders(self) -> bool {
        matches!(self, LiftState::Running)
    }
}

impl fmt::Display for LiftState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiftState::Running => write!(f, "Running"),
            LiftState::Draining => write!(f, "Draining"),
            LiftState::Maintenance => write!(f, "Maintenance"),
        }
    }
}

impl FromStr for LiftState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "running" => Ok(LiftState::Running),
            "draining" => Ok(LiftState::Draining),
            "maintenance" => Ok(LiftState::Maintenance),
            _ => Err(format!("Unknown lift state: {}", s)),
        }
    }
}

/// What a skier is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SkierStatus {
    /// Queued for (or about to queue for) a lift
    Waiting = 0,
    /// Riding a lift
    OnLift = 1,
    /// Standing at a station
    AtStation = 2,
    /// Descending a route
    Skiing = 3,
}

impl SkierStatus {
    /// Decode a status previously stored with `as u8`
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(SkierStatus::Waiting),
            1 => Some(SkierStatus::OnLift),
            2 => Some(SkierStatus::AtStation),
            3 => Some(SkierStatus::Skiing),
            _ => None,
        }
    }
}

impl fmt::Display for SkierStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkierStatus::Waiting => write!(f, "Waiting"),
            SkierStatus::OnLift => write!(f, "On Lift"),
            SkierStatus::AtStation => write!(f, "At Station"),
            SkierStatus::Skiing => write!(f, "Skiing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_type() {
        assert_eq!(Level::derive(Some("bazowa"), "x"), Level::Base);
        assert_eq!(Level::derive(Some("posrednia"), "x"), Level::Mid);
        assert_eq!(Level::derive(Some("Szczyt"), "x"), Level::Summit);
        assert_eq!(Level::derive(Some("SUMMIT"), "x"), Level::Summit);
        assert_eq!(Level::derive(Some("mid-station"), "x"), Level::Mid);
    }

    #[test]
    fn test_level_falls_back_to_name() {
        assert_eq!(Level::derive(Some("unknown"), "polowa"), Level::Mid);
        assert_eq!(Level::derive(None, "Góra"), Level::Summit);
        assert_eq!(Level::derive(None, "baza"), Level::Base);
    }

    #[test]
    fn test_level_defaults_to_base() {
        assert_eq!(Level::derive(None, "parking"), Level::Base);
        assert_eq!(Level::derive(Some(""), "hut"), Level::Base);
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Base < Level::Mid);
        assert!(Level::Mid < Level::Summit);
        assert_eq!(Level::Summit.value(), 2);
    }

    #[test]
    fn test_lift_state_accepts_riders() {
        assert!(LiftState::Running.accepts_riders());
        assert!(!LiftState::Draining.accepts_riders());
        assert!(!LiftState::Maintenance.accepts_riders());
    }

    #[test]
    fn test_lift_state_from_str() {
        assert_eq!("running".parse::<LiftState>().unwrap(), LiftState::Running);
        assert_eq!("MAINTENANCE".parse::<LiftState>().unwrap(), LiftState::Maintenance);
        assert!("broken".parse::<LiftState>().is_err());
    }

    #[test]
    fn test_skier_status_round_trip_through_u8() {
        for status in [
            SkierStatus::Waiting,
            SkierStatus::OnLift,
            SkierStatus::AtStation,
            SkierStatus::Skiing,
        ] {
            assert_eq!(SkierStatus::from_u8(status as u8), Some(status));
        }
        assert_eq!(SkierStatus::from_u8(9), None);
    }
}
