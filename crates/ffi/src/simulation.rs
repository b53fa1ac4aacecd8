use fire_spread_core::RunStats;

use crate::error::{DefaultFireSpreadError, FireSpreadErrorCode};
use crate::helpers::{handle_ffi_result, instance_from_ptr, write_out};
use crate::instance::FireSpreadInstance;

/// C-compatible run counters.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FireSpreadRunStats {
    /// Cells whose arrival time was committed
    pub settled_cells: usize,
    /// Cells left with a tentative time when the horizon stopped the run
    pub frontier_cells: usize,
    /// Spot fires that brought a cell's arrival forward
    pub spot_fires: usize,
    /// Whether the run stopped at the horizon with events still queued
    pub truncated: bool,
    /// Latest committed arrival (minutes), or -1 if nothing settled
    pub last_settled_time: f64,
}

impl FireSpreadRunStats {
    fn new(stats: &RunStats, frontier_cells: usize) -> Self {
        Self {
            settled_cells: stats.settled_cells,
            frontier_cells,
            spot_fires: stats.spot_fires,
            truncated: stats.truncated,
            last_settled_time: stats.last_settled_time.unwrap_or(-1.0),
        }
    }
}

/// Seed a fire at `(row, col)` starting at `start_time` minutes.
///
/// Off-grid cells, Water cells, and NaN or infinite start times are ignored;
/// `out_accepted` reports whether the seed took.
///
/// # Returns
/// - `Ok` on success (including ignored seeds)
/// - `NullPointer` if `ptr` or `out_accepted` is null
/// - `AlreadyRun` if `fire_spread_run` was already called
/// - `LockPoisoned` if the scheduler lock is poisoned
///
/// # Safety
/// - `ptr` must be a live pointer from `fire_spread_new`
/// - `out_accepted` must be valid for a `bool` write
#[no_mangle]
pub unsafe extern "C" fn fire_spread_ignite(
    ptr: *const FireSpreadInstance,
    row: i64,
    col: i64,
    start_time: f64,
    out_accepted: *mut bool,
) -> FireSpreadErrorCode {
    handle_ffi_result(|| {
        // SAFETY: caller contract on ptr.
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if out_accepted.is_null() {
            return Err(DefaultFireSpreadError::null_pointer("out_accepted"));
        }
        let mut guard = instance.scheduler()?;
        let scheduler = guard.as_mut().ok_or_else(DefaultFireSpreadError::already_run)?;
        let accepted = scheduler.ignite(row, col, start_time);
        // SAFETY: out_accepted checked non-null above.
        unsafe { write_out(out_accepted, "out_accepted", accepted) }
    })
}

/// Run the spread to completion or until `max_time` minutes.
///
/// Pass `INFINITY` (or NaN) for an unbounded run. The scheduler is consumed and the
/// ignition-time field is kept on the instance for the query functions.
///
/// # Returns
/// - `Ok` on success
/// - `NullPointer` if `ptr` is null
/// - `AlreadyRun` on a second call
/// - `LockPoisoned` if an internal lock is poisoned
///
/// # Safety
/// - `ptr` must be a live pointer from `fire_spread_new`
/// - `out_stats` must be null or valid for a `FireSpreadRunStats` write
#[no_mangle]
pub unsafe extern "C" fn fire_spread_run(
    ptr: *const FireSpreadInstance,
    max_time: f64,
    out_stats: *mut FireSpreadRunStats,
) -> FireSpreadErrorCode {
    handle_ffi_result(|| {
        // SAFETY: caller contract on ptr.
        let instance = unsafe { instance_from_ptr(ptr) }?;
        let scheduler = instance
            .scheduler()?
            .take()
            .ok_or_else(DefaultFireSpreadError::already_run)?;

        let outcome = scheduler.run_observed(max_time, &mut fire_spread_core::NoopObserver);
        let stats = FireSpreadRunStats::new(&outcome.stats, outcome.frontier.len());

        *instance
            .outcome
            .write()
            .map_err(|_| DefaultFireSpreadError::lock_poisoned("outcome"))? = Some(outcome);

        if out_stats.is_null() {
            return Ok(());
        }
        // SAFETY: out_stats checked non-null above.
        unsafe { write_out(out_stats, "out_stats", stats) }
    })
}
