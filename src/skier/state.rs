//! Shared skier state
//!
//! A [`SkierHandle`] is the part of a skier other tasks can see: lifts update the
//! status when they board or release the skier, snapshots tally it.

use crate::types::{SkierId, SkierStatus, StationId};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Observable state of one skier
#[derive(Debug)]
pub struct SkierHandle {
    id: SkierId,
    status: AtomicU8,
    station: AtomicUsize,
}

impl SkierHandle {
    /// New skier standing at `station`, waiting
    pub fn new(id: SkierId, station: StationId) -> Self {
        Self {
            id,
            status: AtomicU8::new(SkierStatus::Waiting as u8),
            station: AtomicUsize::new(station.index()),
        }
    }

    /// Skier id
    pub fn id(&self) -> SkierId {
        self.id
    }

    /// Current status
    pub fn status(&self) -> SkierStatus {
        SkierStatus::from_u8(self.status.load(Ordering::SeqCst)).unwrap_or(SkierStatus::Waiting)
    }

    /// Update the status
    pub fn set_status(&self, status: SkierStatus) {
        self.status.store(status as u8, Ordering::SeqCst);
    }

    /// Last station the skier stood at (or is standing at)
    pub fn station(&self) -> StationId {
        StationId(self.station.load(Ordering::SeqCst))
    }

    /// Record the station the skier is at
    pub fn set_station(&self, station: StationId) {
        self.station.store(station.index(), Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_skier_is_waiting() {
        let skier = SkierHandle::new(SkierId(4), StationId(1));
        assert_eq!(skier.id(), SkierId(4));
        assert_eq!(skier.status(), SkierStatus::Waiting);
        assert_eq!(skier.station(), StationId(1));
    }

    #[test]
    fn test_status_and_station_updates() {
        let skier = SkierHandle::new(SkierId(1), StationId(0));
        skier.set_status(SkierStatus::OnLift);
        assert_eq!(skier.status(), SkierStatus::OnLift);

        skier.set_station(StationId(2));
        skier.set_status(SkierStatus::AtStation);
        assert_eq!(skier.station(), StationId(2));
        assert_eq!(skier.status(), SkierStatus::AtStation);
    }
}
