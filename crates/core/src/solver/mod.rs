//! Wavefront propagation engine
//!
//! This module contains the priority-queue relaxation that turns ignition seeds into
//! an ignition-time field:
//!
//! - `event` - time-ordered queue entries with a fixed row-major tie-break
//! - `observer` - hooks and counters for inspecting a run
//! - `scheduler` - the run loop itself

pub mod event;
pub mod observer;
pub mod scheduler;

pub use event::PendingEvent;
pub use observer::{NoopObserver, RecordingObserver, RunObserver, RunStats};
pub use scheduler::{CellState, RunOutcome, WavefrontScheduler};
