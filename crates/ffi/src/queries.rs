use fire_spread_core::FrameStats;
use std::slice;

use crate::error::{DefaultFireSpreadError, FireSpreadErrorCode};
use crate::helpers::{handle_ffi_result, instance_from_ptr, write_out};
use crate::instance::FireSpreadInstance;

/// C-compatible snapshot of the fire at one frame time.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FireSpreadFrameStats {
    /// Frame time (minutes)
    pub time: f64,
    /// Cells ignited at or before the frame time
    pub ignited_cells: usize,
    /// Cells still burning at the frame time
    pub active_cells: usize,
    /// Total burnt area (hectares)
    pub burnt_hectares: f64,
    /// Currently burning area (hectares)
    pub active_hectares: f64,
    /// Length of the burnt-area boundary (km)
    pub perimeter_km: f64,
}

impl From<FrameStats> for FireSpreadFrameStats {
    fn from(stats: FrameStats) -> Self {
        Self {
            time: stats.time,
            ignited_cells: stats.ignited_cells,
            active_cells: stats.active_cells,
            burnt_hectares: stats.burnt_hectares,
            active_hectares: stats.active_hectares,
            perimeter_km: stats.perimeter_km,
        }
    }
}

/// Report the grid dimensions and cell size of an instance.
///
/// Any of the out-parameters may be null to skip it.
///
/// # Safety
/// - `ptr` must be a live pointer from `fire_spread_new`
/// - Non-null out-parameters must be valid for writes
#[no_mangle]
pub unsafe extern "C" fn fire_spread_get_dimensions(
    ptr: *const FireSpreadInstance,
    out_rows: *mut usize,
    out_cols: *mut usize,
    out_cell_size: *mut f64,
) -> FireSpreadErrorCode {
    handle_ffi_result(|| {
        // SAFETY: caller contract on ptr.
        let instance = unsafe { instance_from_ptr(ptr) }?;
        // SAFETY: each write is guarded by its null check.
        unsafe {
            if !out_rows.is_null() {
                write_out(out_rows, "out_rows", instance.rows)?;
            }
            if !out_cols.is_null() {
                write_out(out_cols, "out_cols", instance.cols)?;
            }
            if !out_cell_size.is_null() {
                write_out(out_cell_size, "out_cell_size", instance.cell_size)?;
            }
        }
        Ok(())
    })
}

/// Copy the ignition-time field into a caller-owned buffer, row-major.
///
/// Cells the fire never reached are written as `INFINITY`.
///
/// # Returns
/// - `Ok` on success
/// - `NullPointer` if `ptr` or `out_buffer` is null
/// - `InvalidParameter` if `buffer_len` is smaller than `rows * cols`
/// - `NotRun` if `fire_spread_run` has not been called
///
/// # Safety
/// - `ptr` must be a live pointer from `fire_spread_new`
/// - `out_buffer` must be valid for `buffer_len` writes of `f64`
#[no_mangle]
pub unsafe extern "C" fn fire_spread_get_ignition_times(
    ptr: *const FireSpreadInstance,
    out_buffer: *mut f64,
    buffer_len: usize,
) -> FireSpreadErrorCode {
    handle_ffi_result(|| {
        // SAFETY: caller contract on ptr.
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if out_buffer.is_null() {
            return Err(DefaultFireSpreadError::null_pointer("out_buffer"));
        }
        let needed = instance.cell_count();
        if buffer_len < needed {
            return Err(DefaultFireSpreadError::invalid_parameter(format!(
                "buffer_len {buffer_len} is smaller than the {needed} grid cells"
            )));
        }

        let guard = instance.outcome()?;
        let outcome = guard.as_ref().ok_or_else(DefaultFireSpreadError::not_run)?;

        // SAFETY: out_buffer is non-null and valid for buffer_len >= needed writes.
        let out = unsafe { slice::from_raw_parts_mut(out_buffer, needed) };
        out.copy_from_slice(outcome.field.as_slice());
        Ok(())
    })
}

/// Compute burnt and burning statistics at `frame_time` minutes.
///
/// A cell burns during `[ignition, ignition + burn_duration)`.
///
/// # Returns
/// - `Ok` on success
/// - `NullPointer` if `ptr` or `out_stats` is null
/// - `InvalidParameter` if `burn_duration` is negative or NaN
/// - `NotRun` if `fire_spread_run` has not been called
///
/// # Safety
/// - `ptr` must be a live pointer from `fire_spread_new`
/// - `out_stats` must be valid for a `FireSpreadFrameStats` write
#[no_mangle]
pub unsafe extern "C" fn fire_spread_get_frame_stats(
    ptr: *const FireSpreadInstance,
    frame_time: f64,
    burn_duration: f64,
    out_stats: *mut FireSpreadFrameStats,
) -> FireSpreadErrorCode {
    handle_ffi_result(|| {
        // SAFETY: caller contract on ptr.
        let instance = unsafe { instance_from_ptr(ptr) }?;
        if burn_duration.is_nan() || burn_duration < 0.0 {
            return Err(DefaultFireSpreadError::invalid_parameter(format!(
                "burn_duration must be non-negative, got {burn_duration}"
            )));
        }

        let guard = instance.outcome()?;
        let outcome = guard.as_ref().ok_or_else(DefaultFireSpreadError::not_run)?;
        let stats = outcome
            .field
            .frame_stats(frame_time, burn_duration, instance.cell_size);

        // SAFETY: write_out rejects null.
        unsafe { write_out(out_stats, "out_stats", stats.into()) }
    })
}
