//! Wavefront Fire Spread Core Library
//!
//! Computes, for every cell of a terrain raster, the earliest time fire arrives.
//! Spread is a directed shortest-arrival-time problem over the 8-connected grid:
//! edge weights come from a fuel/slope/wind rate-of-spread model and are
//! asymmetric, and burning forest can throw embers that start spot fires ahead of
//! the front.
//!
//! ## Usage
//!
//! ```
//! use fire_spread_core::{FuelType, TerrainGrid, WavefrontScheduler, Wind};
//!
//! let grid = TerrainGrid::uniform(5, 5, 30.0, 0.0, FuelType::Forest).unwrap();
//! let mut scheduler = WavefrontScheduler::with_seed(grid, Wind::calm(), 42).unwrap();
//! scheduler.ignite(2, 2, 0.0);
//! let field = scheduler.run(f64::INFINITY);
//! assert!((field.time(2, 3) - 60.0).abs() < 1e-9);
//! ```
//!
//! Times are minutes, distances meters, wind speed m/s.

// Core types and utilities
pub mod config;
pub mod core_types;
pub mod error;

// Rasters, spread physics, and the propagation engine
pub mod grid;
pub mod physics;
pub mod solver;

// Re-export core types
pub use config::SimulationConfig;
pub use core_types::{FuelType, Wind};
pub use error::SimulationError;

// Re-export grid and engine types
pub use grid::{frame_times, FrameStats, IgnitionTimeField, TerrainGrid};
pub use physics::{EmberSpotting, SpotFire, SpottingConfig, SpreadRateModel};
pub use solver::{
    CellState, NoopObserver, PendingEvent, RecordingObserver, RunObserver, RunOutcome, RunStats,
    WavefrontScheduler,
};
