//! Random sampling helpers driven by an explicitly owned generator
//!
//! Every stochastic draw in the crate goes through a caller-supplied [`Rng`], so a
//! run is reproducible from its seed.

use rand::Rng;
use std::f64::consts::PI;

/// Standard normal sample via the Box-Muller transform
///
/// Consumes exactly two uniform draws.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = rng.random::<f64>().max(1e-300); // avoid ln(0)
    let u2: f64 = rng.random();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

/// Normal sample with the given mean and standard deviation
#[inline]
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    mean + std_dev * standard_normal(rng)
}

/// Uniform sample in `[low, high]`
#[inline]
pub fn uniform_between<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    low + rng.random::<f64>() * (high - low)
}
