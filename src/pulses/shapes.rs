//! RF pulse shape generators
//!
//! Each generator takes the number of steps of the pulse support plus the
//! shape parameters, and returns a [`PulseEnvelope`] normalized to unit
//! integral (the samples divided by their sum, not by the step count or
//! the duration). The sample grids follow the usual linspace convention: a
//! single-sample grid collapses to the left endpoint.

use std::f64::consts::PI;

use nalgebra::DVector;

use crate::error::{Result, SimulationError};
use crate::pulses::envelope::PulseEnvelope;

/// Reference width of the Gaussian shape.
pub const GAUSSIAN_SIGMA: f64 = 1.0;
/// Reference support half-width of the Gaussian shape, in units of sigma.
pub const GAUSSIAN_X_MAX: f64 = 3.5;
/// Reference side-lobe count of the sinc shape.
pub const SINC_SIDE_LOBES: usize = 2;
/// Reference steepness of the hyperbolic-secant shape.
pub const SECH_X_MAX: f64 = 10.0;

fn ensure_steps(steps: usize) -> Result<()> {
    if steps < 1 {
        return Err(SimulationError::InvalidArgument(
            "a pulse shape needs at least 1 step".to_string(),
        ));
    }
    Ok(())
}

/// `steps` evenly spaced samples over `[start, end]`, both ends included.
fn sample_grid(start: f64, end: f64, steps: usize) -> DVector<f64> {
    if steps == 1 {
        return DVector::from_element(1, start);
    }
    let spacing = (end - start) / (steps - 1) as f64;
    DVector::from_fn(steps, |index, _| start + index as f64 * spacing)
}

/// Uniform-amplitude (hard) pulse.
pub fn block(steps: usize) -> Result<PulseEnvelope> {
    ensure_steps(steps)?;
    PulseEnvelope::normalized(DVector::from_element(steps, 1.0))
}

/// Gaussian pulse sampled on `[-x_max, +x_max]`.
///
/// Reference parameters: `sigma` = [`GAUSSIAN_SIGMA`], `x_max` =
/// [`GAUSSIAN_X_MAX`].
pub fn gaussian(steps: usize, sigma: f64, x_max: f64) -> Result<PulseEnvelope> {
    ensure_steps(steps)?;
    if !(sigma > 0.0 && sigma.is_finite()) {
        return Err(SimulationError::InvalidArgument(format!(
            "gaussian sigma must be positive, got {sigma}"
        )));
    }

    let grid = sample_grid(-x_max, x_max, steps);
    let normalization = sigma * (2.0 * PI).sqrt();
    let samples = grid.map(|x| (-(x * x) / (2.0 * sigma * sigma)).exp() / normalization);
    PulseEnvelope::normalized(samples)
}

/// Sinc pulse with `side_lobes` lobes on each side of the main lobe,
/// sampled on `[-(side_lobes+1), +(side_lobes+1)]`.
///
/// Reference parameter: `side_lobes` = [`SINC_SIDE_LOBES`].
pub fn sinc(steps: usize, side_lobes: usize) -> Result<PulseEnvelope> {
    ensure_steps(steps)?;

    let half_width = (side_lobes + 1) as f64;
    let grid = sample_grid(-half_width, half_width, steps);
    let samples = grid.map(normalized_sinc);
    PulseEnvelope::normalized(samples)
}

/// Hyperbolic-secant pulse `1/cosh(x_max·x)` sampled on `[-1, +1]`.
///
/// Reference parameter: `x_max` = [`SECH_X_MAX`].
pub fn sech(steps: usize, x_max: f64) -> Result<PulseEnvelope> {
    ensure_steps(steps)?;
    if !x_max.is_finite() {
        return Err(SimulationError::InvalidArgument(format!(
            "sech x_max must be finite, got {x_max}"
        )));
    }

    let grid = sample_grid(-1.0, 1.0, steps);
    let samples = grid.map(|x| 1.0 / (x_max * x).cosh());
    PulseEnvelope::normalized(samples)
}

/// Normalized sinc, `sin(πx)/(πx)` with the removable singularity filled.
fn normalized_sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
