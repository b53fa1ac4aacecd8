use fire_spread_core::{RunOutcome, SimulationConfig, TerrainGrid, WavefrontScheduler};
use std::slice;
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard};

use crate::error::{DefaultFireSpreadError, FireSpreadErrorCode};
use crate::helpers::{handle_ffi_result, write_out};

/// A single fire spread run: terrain, seeds, and (once run) its results.
///
/// # Lifecycle
/// 1. `fire_spread_new` builds the terrain and scheduler
/// 2. `fire_spread_ignite` seeds one or more cells
/// 3. `fire_spread_run` consumes the scheduler and stores the outcome
/// 4. Query functions read the stored ignition-time field
/// 5. `fire_spread_destroy` frees the instance
///
/// An instance runs exactly once. Igniting or running again after step 3 returns
/// `AlreadyRun`; querying before step 3 returns `NotRun`.
///
/// # Thread Safety
/// The pending scheduler sits behind a `Mutex` and the outcome behind an `RwLock`,
/// so queries from several threads can proceed concurrently once the run finished.
///
/// # Example (C)
/// ```c
/// FireSpreadInstance* sim = NULL;
/// if (fire_spread_new(rows, cols, 30.0, elevation, fuel_codes, 10.0, 270.0, 42, &sim) != Ok) {
///     printf("%s\n", fire_spread_get_last_error());
///     return;
/// }
/// bool accepted = false;
/// fire_spread_ignite(sim, rows / 2, cols / 2, 0.0, &accepted);
/// FireSpreadRunStats stats;
/// fire_spread_run(sim, 600.0, &stats);
/// fire_spread_destroy(sim);
/// ```
pub struct FireSpreadInstance {
    pub(crate) scheduler: Mutex<Option<WavefrontScheduler>>,
    pub(crate) outcome: RwLock<Option<RunOutcome>>,
    pub(crate) rows: usize,
    pub(crate) cols: usize,
    pub(crate) cell_size: f64,
}

impl FireSpreadInstance {
    pub(crate) fn scheduler(
        &self,
    ) -> Result<MutexGuard<'_, Option<WavefrontScheduler>>, DefaultFireSpreadError> {
        self.scheduler
            .lock()
            .map_err(|_| DefaultFireSpreadError::lock_poisoned("scheduler"))
    }

    pub(crate) fn outcome(
        &self,
    ) -> Result<RwLockReadGuard<'_, Option<RunOutcome>>, DefaultFireSpreadError> {
        self.outcome
            .read()
            .map_err(|_| DefaultFireSpreadError::lock_poisoned("outcome"))
    }

    pub(crate) fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// Create a new fire spread instance over a `rows x cols` terrain.
///
/// # Parameters
/// - `rows`, `cols`: Grid dimensions (both > 0)
/// - `cell_size`: Cell edge length in meters (> 0)
/// - `elevation`: `rows * cols` elevations in meters, row-major
/// - `fuel_codes`: `rows * cols` fuel codes, row-major (0=Urban, 1=Grass, 2=Forest, 3=Water)
/// - `wind_speed`: Wind speed in m/s (>= 0)
/// - `wind_direction`: Bearing the wind blows FROM, degrees clockwise from north
/// - `seed`: Seed for ember spotting
/// - `out_instance`: Receives the new instance pointer on success
///
/// # Returns
/// - `Ok` on success
/// - `NullPointer` if any pointer argument is null
/// - `InvalidTerrainParameters` for bad dimensions, cell size, elevations, or fuel codes
/// - `InvalidParameter` for bad wind values
///
/// # Safety
/// - `elevation` and `fuel_codes` must each be valid for `rows * cols` reads
/// - `out_instance` must be valid for a pointer write
/// - The returned pointer must be released with `fire_spread_destroy`
#[no_mangle]
#[expect(clippy::too_many_arguments)]
pub unsafe extern "C" fn fire_spread_new(
    rows: usize,
    cols: usize,
    cell_size: f64,
    elevation: *const f64,
    fuel_codes: *const u8,
    wind_speed: f64,
    wind_direction: f64,
    seed: u64,
    out_instance: *mut *mut FireSpreadInstance,
) -> FireSpreadErrorCode {
    handle_ffi_result(|| {
        if out_instance.is_null() {
            return Err(DefaultFireSpreadError::null_pointer("out_instance"));
        }
        if elevation.is_null() {
            return Err(DefaultFireSpreadError::null_pointer("elevation"));
        }
        if fuel_codes.is_null() {
            return Err(DefaultFireSpreadError::null_pointer("fuel_codes"));
        }
        let len = rows.checked_mul(cols).ok_or_else(|| {
            DefaultFireSpreadError::invalid_terrain_parameter_msg(
                "rows/cols",
                "dimensions overflow",
            )
        })?;

        // SAFETY: both pointers are non-null and the caller guarantees `len` reads.
        let (elevation, fuel_codes) = unsafe {
            (
                slice::from_raw_parts(elevation, len),
                slice::from_raw_parts(fuel_codes, len),
            )
        };

        let config = SimulationConfig::with_wind(wind_speed, wind_direction)?
            .cell_size(cell_size)
            .seed(seed);
        let grid =
            TerrainGrid::from_fuel_codes(rows, cols, cell_size, elevation.to_vec(), fuel_codes)?;
        let scheduler = WavefrontScheduler::from_config(grid, &config)?;

        let instance = Box::new(FireSpreadInstance {
            scheduler: Mutex::new(Some(scheduler)),
            outcome: RwLock::new(None),
            rows,
            cols,
            cell_size,
        });

        // SAFETY: out_instance checked non-null above.
        unsafe { write_out(out_instance, "out_instance", Box::into_raw(instance)) }
    })
}

/// Release a fire spread instance created by `fire_spread_new`.
///
/// Passing null is a no-op.
///
/// # Safety
/// `ptr` must be null or a pointer returned by `fire_spread_new` that has not yet
/// been destroyed. It must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn fire_spread_destroy(ptr: *mut FireSpreadInstance) {
    if !ptr.is_null() {
        // SAFETY: ptr came from Box::into_raw in fire_spread_new.
        drop(unsafe { Box::from_raw(ptr) });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    #[test]
    fn test_new_and_destroy() {
        let elevation = vec![0.0; 12];
        let fuel = vec![1u8; 12];
        let mut sim: *mut FireSpreadInstance = ptr::null_mut();

        let code = unsafe {
            fire_spread_new(
                3,
                4,
                30.0,
                elevation.as_ptr(),
                fuel.as_ptr(),
                5.0,
                90.0,
                7,
                &mut sim,
            )
        };
        assert_eq!(code, FireSpreadErrorCode::Ok);
        assert!(!sim.is_null());
        unsafe { fire_spread_destroy(sim) };
    }

    #[test]
    fn test_new_honours_non_default_cell_size() {
        let elevation = vec![0.0; 4];
        let fuel = vec![2u8; 4];
        let mut sim: *mut FireSpreadInstance = ptr::null_mut();

        let code = unsafe {
            fire_spread_new(2, 2, 10.0, elevation.as_ptr(), fuel.as_ptr(), 0.0, 0.0, 0, &mut sim)
        };
        assert_eq!(code, FireSpreadErrorCode::Ok);
        assert_eq!(unsafe { &*sim }.cell_size, 10.0);
        unsafe { fire_spread_destroy(sim) };
    }

    #[test]
    fn test_new_rejects_bad_fuel_code() {
        let elevation = vec![0.0; 4];
        let fuel = vec![1u8, 9, 1, 1];
        let mut sim: *mut FireSpreadInstance = ptr::null_mut();

        let code = unsafe {
            fire_spread_new(
                2,
                2,
                30.0,
                elevation.as_ptr(),
                fuel.as_ptr(),
                0.0,
                0.0,
                0,
                &mut sim,
            )
        };
        assert_eq!(code, FireSpreadErrorCode::InvalidTerrainParameters);
        assert!(sim.is_null());
        assert_eq!(
            crate::error::fire_spread_get_last_error_code(),
            FireSpreadErrorCode::InvalidTerrainParameters
        );
    }

    #[test]
    fn test_new_rejects_null_rasters() {
        let mut sim: *mut FireSpreadInstance = ptr::null_mut();
        let code = unsafe {
            fire_spread_new(2, 2, 30.0, ptr::null(), ptr::null(), 0.0, 0.0, 0, &mut sim)
        };
        assert_eq!(code, FireSpreadErrorCode::NullPointer);
    }
}
