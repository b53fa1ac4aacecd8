//! Run configuration
//!
//! Everything a scheduler needs besides the terrain itself. Serializable so that a
//! run can be described in a file and replayed from its seed.

use crate::core_types::Wind;
use crate::error::SimulationError;
use crate::physics::SpottingConfig;
use serde::{Deserialize, Serialize};

/// Inputs for one spread run, excluding terrain rasters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Cell edge length in meters; the scheduler rejects a grid with a different one
    pub cell_size: f64,
    /// Uniform wind for the whole run
    pub wind: Wind,
    /// Seed for the ember-spotting generator
    pub seed: u64,
    /// Ember spotting parameters
    pub spotting: SpottingConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            wind: Wind::calm(),
            seed: 0,
            spotting: SpottingConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Default configuration with the given wind (m/s, "from" bearing in degrees)
    ///
    /// # Errors
    /// Propagates wind validation errors.
    pub fn with_wind(speed: f64, direction: f64) -> Result<Self, SimulationError> {
        Ok(Self {
            wind: Wind::new(speed, direction)?,
            ..Self::default()
        })
    }

    /// Builder-style cell size override; must match the grid passed to the scheduler
    pub fn cell_size(mut self, cell_size: f64) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Builder-style seed override
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builder-style spotting override
    pub fn spotting(mut self, spotting: SpottingConfig) -> Self {
        self.spotting = spotting;
        self
    }

    /// Check every field, including values that bypassed constructors via serde
    ///
    /// # Errors
    /// Returns the first invalid field found.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(SimulationError::InvalidCellSize(self.cell_size));
        }
        Wind::new(self.wind.speed(), self.wind.direction())?;
        self.spotting.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cell_size, 30.0);
        assert!(config.spotting.enabled);
    }

    #[test]
    fn test_builders() {
        let config = SimulationConfig::with_wind(12.0, 270.0)
            .unwrap()
            .seed(17)
            .spotting(SpottingConfig::disabled());
        assert_eq!(config.wind.speed(), 12.0);
        assert_eq!(config.seed, 17);
        assert!(!config.spotting.enabled);
    }

    #[test]
    fn test_invalid_fields_rejected() {
        assert!(SimulationConfig::with_wind(-3.0, 0.0).is_err());

        let config = SimulationConfig {
            cell_size: 0.0,
            ..SimulationConfig::default()
        };
        assert_eq!(config.validate(), Err(SimulationError::InvalidCellSize(0.0)));

        let config = SimulationConfig::default().spotting(SpottingConfig {
            probability: -0.1,
            ..SpottingConfig::default()
        });
        assert!(config.validate().is_err());
    }
}
