//! Hooks into a running scheduler
//!
//! Observers see every settlement, every successful relaxation, and every spot fire
//! as it happens. They cannot influence the run.

use crate::physics::SpotFire;
use crate::solver::PendingEvent;
use serde::{Deserialize, Serialize};

/// Summary counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Cells finalized
    pub settled_cells: usize,
    /// Popped entries discarded because the cell had already settled
    pub stale_pops: usize,
    /// Successful decrease-key updates (neighbor and spot-fire)
    pub relaxations: usize,
    /// Spot fires that lowered a cell's time
    pub spot_fires: usize,
    /// Whether the run stopped at the time horizon with events still queued
    pub truncated: bool,
    /// Time of the last settled cell, if any
    pub last_settled_time: Option<f64>,
}

/// Receives scheduler events; every method defaults to a no-op
pub trait RunObserver {
    /// A cell was finalized at `event.time`
    fn on_settle(&mut self, _event: &PendingEvent) {}

    /// A cell's best time dropped from `previous` to `event.time`
    fn on_relax(&mut self, _event: &PendingEvent, _previous: f64) {}

    /// An ember landed and lowered the target's best time
    fn on_spot_fire(&mut self, _source: (usize, usize), _spot: &SpotFire) {}

    /// The run finished
    fn on_finish(&mut self, _stats: &RunStats) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl RunObserver for NoopObserver {}

/// Observer that records the full event history, mostly for tests and diagnostics
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    /// Settled events in pop order
    pub settled: Vec<PendingEvent>,
    /// `(event, previous_time)` for each relaxation
    pub relaxations: Vec<(PendingEvent, f64)>,
    /// `(source cell, spot fire)` pairs
    pub spot_fires: Vec<((usize, usize), SpotFire)>,
    /// Final counters
    pub stats: Option<RunStats>,
}

impl RunObserver for RecordingObserver {
    fn on_settle(&mut self, event: &PendingEvent) {
        self.settled.push(*event);
    }

    fn on_relax(&mut self, event: &PendingEvent, previous: f64) {
        self.relaxations.push((*event, previous));
    }

    fn on_spot_fire(&mut self, source: (usize, usize), spot: &SpotFire) {
        self.spot_fires.push((source, *spot));
    }

    fn on_finish(&mut self, stats: &RunStats) {
        self.stats = Some(*stats);
    }
}
