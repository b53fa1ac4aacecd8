//! Core value types shared by the grid, physics, and solver

pub mod fuel;
pub mod noise;
pub mod wind;

pub use fuel::FuelType;
pub use wind::Wind;
