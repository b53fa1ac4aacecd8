//! Fire behaviour models used by the wavefront scheduler
//!
//! - `spread_rate` - directional cell-to-cell rate of spread (fuel, slope, wind)
//! - `ember_spotting` - stochastic long-range spot fires from burning forest

pub mod ember_spotting;
pub mod spread_rate;

pub use ember_spotting::{EmberSpotting, SpotFire, SpottingConfig};
pub use spread_rate::{EdgeSpread, Neighbor, SpreadRateModel, NEIGHBORS};
