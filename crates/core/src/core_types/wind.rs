//! Uniform wind for a run
//!
//! Bearings follow the meteorological convention: the compass direction the wind
//! blows FROM, 0° = North, clockwise. Grid vectors are `(row, col)` with rows
//! increasing south and columns increasing east.

use crate::error::SimulationError;
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Wind speed and bearing, constant over a run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    /// Speed in m/s
    pub(crate) speed: f64,
    /// Compass bearing the wind blows from (degrees)
    pub(crate) direction: f64,
}

impl Wind {
    /// Create wind from speed (m/s) and "from" bearing (degrees)
    ///
    /// # Errors
    /// Returns [`SimulationError::InvalidWindSpeed`] for negative or non-finite speed,
    /// [`SimulationError::InvalidWindDirection`] for a non-finite bearing.
    pub fn new(speed: f64, direction: f64) -> Result<Self, SimulationError> {
        if !speed.is_finite() || speed < 0.0 {
            return Err(SimulationError::InvalidWindSpeed(speed));
        }
        if !direction.is_finite() {
            return Err(SimulationError::InvalidWindDirection(direction));
        }
        Ok(Self { speed, direction })
    }

    /// Still air
    pub fn calm() -> Self {
        Self::default()
    }

    /// Speed in m/s
    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// "From" bearing in degrees
    #[inline]
    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// "From" bearing in radians
    #[inline]
    pub fn bearing_radians(&self) -> f64 {
        self.direction.to_radians()
    }

    /// Unit vector the wind blows toward, in `(row, col)` grid form
    ///
    /// A north wind (0°) blows south: `(1, 0)`. An east wind (90°) blows west: `(0, -1)`.
    pub fn downwind_unit(&self) -> Vector2<f64> {
        let bearing = self.bearing_radians();
        Vector2::new(bearing.cos(), -bearing.sin())
    }
}
