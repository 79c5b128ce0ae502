//! Error types for the simulation engine
//!
//! Two failure classes exist, and they are deliberately kept distinct:
//!
//! - [`SimulationError::InvalidArgument`]: malformed inputs (non-positive
//!   relaxation times, empty pulse envelopes, unknown normalization names,
//!   asymmetric frequency axes). Always detected *before* any computation
//!   starts; no input is ever partially consumed.
//! - [`SimulationError::NumericalInstability`]: the propagation produced
//!   non-finite magnetization. This is surfaced with enough context (RF
//!   offset and step index) to reproduce the failing computation, never
//!   masked as a zero or garbage result.
//!
//! Dimension mismatches between a pool system and its state vector are
//! programming-contract violations and are enforced with assertions, not
//! with this error type.

use thiserror::Error;

/// Error type of the simulation engine.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimulationError {
    /// Malformed input detected before computation started.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The propagation produced NaN or infinite magnetization.
    ///
    /// Carries the RF offset (Hz) and the pulse step index at which the
    /// non-finite value first appeared.
    #[error(
        "numerical instability at offset {offset_hz} Hz, step {step}: {detail}. \
         Check the pool relaxation and exchange rates for pathological values."
    )]
    NumericalInstability {
        /// RF carrier offset of the failing computation, in Hz.
        offset_hz: f64,
        /// Index of the pulse sample being applied (0 for constant-wave).
        step: usize,
        /// Description of the detected problem.
        detail: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SimulationError>;

// =================================================================================================
// Tests
// =================================================================================================
