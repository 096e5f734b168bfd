//! Run statistics
//!
//! Collected once at shutdown, after every task has stopped, so the counters are
//! final and the closing snapshot is consistent.

use crate::resort::ResortRegistry;
use crate::simulation::snapshot::ResortSnapshot;
use crate::types::RunId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Totals of a single lift over the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiftStatistics {
    /// Lift name
    pub name: String,
    /// Riders boarded
    pub total_boarded: u64,
    /// Completed maintenance stops
    pub maintenance_cycles: u64,
}

/// Summary of a finished run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunStatistics {
    /// Run identifier
    pub run_id: RunId,
    /// Skiers simulated
    pub skier_count: usize,
    /// Time between start and shutdown
    pub run_duration: Duration,
    /// Per-lift totals in registry order
    pub lifts: Vec<LiftStatistics>,
    /// Descent routes created while running
    pub routes_created: usize,
    /// Mid-run snapshots whose totals were off because skiers were moving
    pub snapshots_in_motion: u64,
    /// State of the resort after shutdown
    pub final_snapshot: ResortSnapshot,
}

impl RunStatistics {
    /// Gather statistics from a registry whose tasks have all stopped
    pub fn collect(
        registry: &ResortRegistry,
        run_id: RunId,
        run_duration: Duration,
        tick: u64,
        snapshots_in_motion: u64,
    ) -> Self {
        let lifts = registry
            .lifts()
            .iter()
            .map(|lift| LiftStatistics {
                name: lift.name().to_string(),
                total_boarded: lift.total_boarded(),
                maintenance_cycles: lift.maintenance_cycles(),
            })
            .collect();

        Self {
            run_id,
            skier_count: registry.skier_count(),
            run_duration,
            lifts,
            routes_created: registry.routes_created(),
            snapshots_in_motion,
            final_snapshot: ResortSnapshot::capture(registry, run_id, tick),
        }
    }

    /// Riders boarded across all lifts
    pub fn total_boardings(&self) -> u64 {
        self.lifts.iter().map(|lift| lift.total_boarded).sum()
    }

    /// Maintenance stops across all lifts
    pub fn total_maintenance_cycles(&self) -> u64 {
        self.lifts.iter().map(|lift| lift.maintenance_cycles).sum()
    }

    /// Whether every skier is accounted for in the final snapshot
    pub fn is_conserved(&self) -> bool {
        self.final_snapshot.totals().is_conserved(self.skier_count)
    }

    /// Multi-line report printed when the simulator exits
    pub fn generate_summary_output(&self) -> String {
        let mut output = String::new();

        output.push_str("=== Ski Resort Simulation Complete ===\n\n");
        output.push_str(&format!("Run: {}\n", self.run_id));
        output.push_str(&format!("Duration: {:.2} seconds\n", self.run_duration.as_secs_f64()));
        output.push_str(&format!("Skiers: {}\n\n", self.skier_count));

        output.push_str("Lifts:\n");
        for lift in &self.lifts {
            output.push_str(&format!(
                "   {}: {} boarded, {} maintenance stops\n",
                lift.name, lift.total_boarded, lift.maintenance_cycles
            ));
        }
        output.push_str(&format!(
            "   Total: {} boarded, {} maintenance stops\n\n",
            self.total_boardings(),
            self.total_maintenance_cycles()
        ));

        output.push_str(&format!("Descent routes created: {}\n", self.routes_created));
        output.push_str(&format!(
            "Snapshots taken with skiers in motion: {}\n\n",
            self.snapshots_in_motion
        ));

        let totals = self.final_snapshot.totals();
        output.push_str("Final distribution:\n");
        for station in &self.final_snapshot.stations {
            output.push_str(&format!("   {}: {}\n", station.name, station.occupants));
        }
        output.push_str(&format!(
            "   Accounted for: {} of {} skiers\n",
            totals.total(),
            self.skier_count
        ));

        output
    }

    /// One-line summary suitable for logging
    pub fn generate_compact_summary(&self) -> String {
        format!(
            "Run {}: {} skiers, {:.1}s, {} boardings, {} maintenance stops, {} routes created",
            self.run_id,
            self.skier_count,
            self.run_duration.as_secs_f64(),
            self.total_boardings(),
            self.total_maintenance_cycles(),
            self.routes_created
        )
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.generate_summary_output())
    }
}
