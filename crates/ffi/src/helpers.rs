use crate::error::{with_last_error_mut, DefaultFireSpreadError, FireSpreadError, FireSpreadErrorCode};
use crate::instance::FireSpreadInstance;
use std::ffi::CString;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FireSpreadError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FireSpreadError) -> FireSpreadErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FireSpreadErrorCode::Ok;
    });
}

/// Record the outcome of a fallible operation in thread-local storage.
pub(crate) fn track_result<T, E: FireSpreadError>(
    result: Result<T, E>,
) -> Result<T, FireSpreadErrorCode> {
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Run an FFI body and convert its result into an error code.
pub(crate) fn handle_ffi_result<F>(f: F) -> FireSpreadErrorCode
where
    F: FnOnce() -> Result<(), DefaultFireSpreadError>,
{
    match track_result(f()) {
        Ok(()) => FireSpreadErrorCode::Ok,
        Err(code) => code,
    }
}

/// Borrow an instance from a raw pointer.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `fire_spread_new`.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const FireSpreadInstance,
) -> Result<&'a FireSpreadInstance, DefaultFireSpreadError> {
    // SAFETY: caller guarantees ptr is null or valid; null is rejected here.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultFireSpreadError::null_pointer("ptr"))
}

/// Write `value` through an out-parameter, rejecting null.
///
/// # Safety
/// `out` must be null or valid for a write of `T`.
pub(crate) unsafe fn write_out<T>(
    out: *mut T,
    name: &str,
    value: T,
) -> Result<(), DefaultFireSpreadError> {
    if out.is_null() {
        return Err(DefaultFireSpreadError::null_pointer(name));
    }
    // SAFETY: non-null checked above; validity is the caller's contract.
    unsafe { out.write(value) };
    Ok(())
}
