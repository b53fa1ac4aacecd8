//! Raster inputs and outputs of the spread solver

pub mod field;
pub mod synthetic;
pub mod terrain;

// Re-export main types
pub use field::{frame_times, FrameStats, IgnitionTimeField};
pub use terrain::TerrainGrid;
