//! Library of RF saturation pulses
//!
//! Each shape generator has the same first parameter, the number of steps
//! of the pulse support, and returns a [`PulseEnvelope`] whose samples sum
//! to 1. The step *duration* is not part of the envelope: it is supplied
//! to the propagator together with the amplitude scaling, so the same
//! envelope can drive pulses of any length.
//!
//! # Scaling convention
//!
//! Multiplying an envelope by `w1 · steps` (see
//! [`PulseEnvelope::amplitudes`]) yields an amplitude-vs-time sequence
//! equivalent in integrated effect to a continuous-wave pulse of amplitude
//! `w1` rad/s, with `w1 = γ·B1`:
//!
//! ```
//! use cest_rs::physics::GAMMA_PROTON;
//! use cest_rs::pulses::{gaussian, GAUSSIAN_SIGMA, GAUSSIAN_X_MAX};
//!
//! let envelope = gaussian(1000, GAUSSIAN_SIGMA, GAUSSIAN_X_MAX)?;
//! let b1 = 6e-6; // T
//! let amplitudes = envelope.amplitudes(GAMMA_PROTON * b1);
//! assert_eq!(amplitudes.len(), 1000);
//! # Ok::<(), cest_rs::SimulationError>(())
//! ```

// Module declarations
pub mod envelope;
pub mod shapes;

// Re-export commonly used items for convenience
pub use envelope::{train, PulseEnvelope};
pub use shapes::{
    block, gaussian, sech, sinc, GAUSSIAN_SIGMA, GAUSSIAN_X_MAX, SECH_X_MAX, SINC_SIDE_LOBES,
};
