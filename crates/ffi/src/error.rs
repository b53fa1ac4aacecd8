use fire_spread_core::SimulationError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait FireSpreadError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> FireSpreadErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FireSpreadError` for common FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFireSpreadError {
    code: FireSpreadErrorCode,
    msg: String,
}

impl DefaultFireSpreadError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FireSpreadErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: FireSpreadErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for invalid terrain parameters with a custom message.
    pub fn invalid_terrain_parameter_msg(param_name: &str, message: &str) -> Self {
        Self {
            code: FireSpreadErrorCode::InvalidTerrainParameters,
            msg: format!("Terrain parameter {param_name}: {message}"),
        }
    }

    /// Create error for invalid parameter.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: FireSpreadErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for a second `fire_spread_run` on the same instance.
    pub fn already_run() -> Self {
        Self {
            code: FireSpreadErrorCode::AlreadyRun,
            msg: "Simulation has already been run; create a new instance to re-run".to_string(),
        }
    }

    /// Create error for reading results before `fire_spread_run`.
    pub fn not_run() -> Self {
        Self {
            code: FireSpreadErrorCode::NotRun,
            msg: "Simulation has not been run yet".to_string(),
        }
    }
}

impl From<SimulationError> for DefaultFireSpreadError {
    fn from(error: SimulationError) -> Self {
        let msg = error.to_string();
        match error {
            SimulationError::EmptyGrid { .. } => {
                Self::invalid_terrain_parameter_msg("rows/cols", &msg)
            }
            SimulationError::RasterShapeMismatch { raster, .. } => {
                Self::invalid_terrain_parameter_msg(raster, &msg)
            }
            SimulationError::InvalidCellSize(_) | SimulationError::CellSizeMismatch { .. } => {
                Self::invalid_terrain_parameter_msg("cell_size", &msg)
            }
            SimulationError::NonFiniteElevation { .. } => {
                Self::invalid_terrain_parameter_msg("elevation", &msg)
            }
            SimulationError::UnknownFuelCode(_) => {
                Self::invalid_terrain_parameter_msg("fuel_codes", &msg)
            }
            SimulationError::InvalidWindSpeed(_)
            | SimulationError::InvalidWindDirection(_)
            | SimulationError::InvalidSpottingConfig(_) => Self::invalid_parameter(msg),
        }
    }
}

impl FireSpreadError for DefaultFireSpreadError {
    fn code(&self) -> FireSpreadErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by fire spread functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireSpreadErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid terrain parameters: dimensions, cell size, elevation, or fuel codes.
    InvalidTerrainParameters = 3,

    /// Invalid parameter passed to function.
    InvalidParameter = 4,

    /// The instance has already been run.
    AlreadyRun = 5,

    /// Results requested before the instance was run.
    NotRun = 6,
}

impl From<DefaultFireSpreadError> for FireSpreadErrorCode {
    fn from(error: DefaultFireSpreadError) -> Self {
        error.code
    }
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    static LAST_ERROR: RefCell<(Option<CString>, FireSpreadErrorCode)> = const { RefCell::new((None, FireSpreadErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, FireSpreadErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, FireSpreadErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that sets
/// or clears the error. **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```c
/// FireSpreadInstance* sim = NULL;
/// FireSpreadErrorCode err = fire_spread_new(rows, cols, 30.0, elev, fuel, 10.0, 0.0, 42, &sim);
/// if (err != Ok) {
///     const char* error = fire_spread_get_last_error();
///     if (error) {
///         printf("Fire spread creation failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn fire_spread_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
#[no_mangle]
pub extern "C" fn fire_spread_get_last_error_code() -> FireSpreadErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
