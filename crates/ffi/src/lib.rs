//! C bindings for the wavefront fire spread simulator
//!
//! One opaque [`FireSpreadInstance`] per run. Every function returns a
//! [`FireSpreadErrorCode`]; on failure the message is available from
//! [`fire_spread_get_last_error`] on the same thread.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{fire_spread_get_last_error, fire_spread_get_last_error_code, FireSpreadErrorCode};
pub use instance::{fire_spread_destroy, fire_spread_new, FireSpreadInstance};
pub use queries::{
    fire_spread_get_dimensions, fire_spread_get_frame_stats, fire_spread_get_ignition_times,
    FireSpreadFrameStats,
};
pub use simulation::{fire_spread_ignite, fire_spread_run, FireSpreadRunStats};
