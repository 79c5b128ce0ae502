//! cest-rs: Bloch–McConnell Simulation Framework for CEST MRI
//!
//! A library for simulating the magnetization dynamics of exchanging spin
//! pools under radio-frequency saturation, and for deriving
//! saturation-transfer metrics (MTR) from the resulting Z-spectra.
//!
//! # Architecture
//!
//! cest-rs is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - [`physics`] describes the system (pools, exchange rates, states)
//!    - [`solver`] propagates it (rate matrices, matrix exponentials)
//!
//! 2. **Value semantics everywhere**
//!    - Every input is an immutable value; every call computes a fresh
//!      result from its arguments
//!    - Independent offsets and voxels can run on any worker pool with no
//!      shared state (enable the `parallel` feature for built-in rayon
//!      sweeps)
//!
//! # Quick Start
//!
//! ```rust
//! use cest_rs::analysis::{mtr, Normalization};
//! use cest_rs::physics::{species, PoolSystem};
//! use cest_rs::solver::{Propagator, Saturation};
//!
//! # fn main() -> Result<(), cest_rs::SimulationError> {
//! // 1. Two exchanging pools: water and mobile amides at 3.5 ppm
//! let system = PoolSystem::two_pool(species::water(), species::mobile_amides())?;
//!
//! // 2. Propagator at a 300 MHz main field (1 ppm = 300 Hz)
//! let propagator = Propagator::new(system, 300e6)?;
//!
//! // 3. Continuous-wave saturation, swept over a symmetric offset schedule
//! let saturation = Saturation::continuous_wave(535.0, 0.5);
//! let offsets = [-3.5, 0.0, 3.5];
//! let spectrum = propagator.z_spectrum(&offsets, &saturation)?;
//!
//! // 4. Saturation-transfer metric over the label half
//! let transfer = mtr(&offsets, &spectrum.signals(), Normalization::NormRef)?;
//! assert_eq!(transfer.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: pools, pool systems, magnetization states, presets
//! - [`pulses`]: RF pulse envelopes (block, Gaussian, sinc, sech, trains)
//! - [`solver`]: rate matrices, the propagator, Z-spectrum sweeps
//! - [`analysis`]: MTR maps from Z-spectra

// Core modules
pub mod analysis;
pub mod error;
pub mod physics;
pub mod pulses;
pub mod solver;

pub use error::{Result, SimulationError};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use cest_rs::prelude::*;
    //! ```
    pub use crate::analysis::{mtr, mtr_volume, Normalization};
    pub use crate::error::{Result, SimulationError};
    pub use crate::physics::{species, MagnetizationState, Pool, PoolSystem, GAMMA_PROTON};
    pub use crate::pulses::{block, gaussian, sech, sinc, train, PulseEnvelope};
    pub use crate::solver::{Propagator, Saturation, SpectrumSample, ZSpectrum};
}
