//! Numerical propagation engine
//!
//! This module turns a [`PoolSystem`](crate::physics::PoolSystem) into rate
//! matrices and advances magnetization states through them.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! The engine separates concerns into three layers:
//!
//! 1. **[`rate_matrix`]**: the physics equations. Assembles the
//!    Bloch–McConnell rate matrix `A` with `dM/dt = A·M` for one
//!    (carrier, amplitude) pair. Pure computation, no integration.
//!
//! 2. **[`Saturation`]**: WHAT to apply. A constant-wave amplitude with a
//!    duration, or a shaped pulse as per-step amplitudes with a fixed step.
//!    Carries its own `validate()`.
//!
//! 3. **[`Propagator`]**: the numerical method. One matrix-exponential
//!    step primitive (`exp(A·Δt)·M`, scaling-and-squaring Padé via
//!    nalgebra) shared by both saturation modes, plus the Z-spectrum sweep
//!    in [`sweep`].
//!
//! This separation means there is exactly one implementation of the
//! physics: the constant-wave mode is the single-step special case of the
//! shaped mode, and the two agree identically for a block envelope.
//!
//! # Error Handling
//!
//! All fallible operations return
//! `Result<T, `[`SimulationError`](crate::SimulationError)`>`:
//! malformed inputs fail *before* computation starts, non-finite
//! propagation results fail with the offending offset and step attached.
//! The engine never retries and never recovers silently.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod propagator;
pub mod rate_matrix;
pub mod sweep;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use propagator::{Propagator, Saturation};
pub use rate_matrix::rate_matrix;
pub use sweep::{SpectrumSample, ZSpectrum};
