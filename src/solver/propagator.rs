//! Matrix-exponential propagation of magnetization states
//!
//! # Mathematical Background
//!
//! Within one interval of constant RF amplitude the Bloch–McConnell system
//! is linear with a constant rate matrix, so the propagation over the
//! interval is closed-form:
//!
//! ```text
//! M(t + Δt) = exp(A·Δt) · M(t)
//! ```
//!
//! A shaped pulse is treated as piecewise-constant: one rate matrix and one
//! exponential per envelope sample, each step feeding the next. Both
//! operating modes, constant-wave and shaped, share this single step
//! primitive, so there is exactly one implementation of the physics.
//!
//! # Numerical contract
//!
//! The rate matrices combine fast relaxation (large negative real
//! eigenvalues, e.g. `-R2 - k` beyond 10³ s⁻¹) with oscillatory
//! precession/nutation couplings. The exponential is therefore computed
//! with nalgebra's scaling-and-squaring Padé approximation, which is stable
//! in exactly this regime; truncated Taylor stepping is not an acceptable
//! substitute. No solver tolerance is exposed because each step is
//! closed-form.
//!
//! Propagation is deterministic: same inputs, same output, no internal
//! state. Non-finite magnetization coming out of a step is surfaced as
//! [`SimulationError::NumericalInstability`] with the offset and step index
//! attached, never silently propagated.

use nalgebra::{DMatrix, DVector};

use crate::error::{Result, SimulationError};
use crate::physics::{MagnetizationState, PoolSystem};
use crate::pulses::PulseEnvelope;
use crate::solver::rate_matrix::rate_matrix;

// =================================================================================================
// Saturation configuration
// =================================================================================================

/// The RF saturation to apply: WHAT the propagator integrates.
///
/// Validation follows the fail-before-compute rule: [`Saturation::validate`]
/// runs before any matrix is assembled, and never partially consumes an
/// input.
#[derive(Clone, Debug, PartialEq)]
pub enum Saturation {
    /// Constant amplitude `w1` \[rad/s\] for `duration` \[s\]. One rate
    /// matrix, one exponential.
    ContinuousWave {
        /// RF amplitude \[rad/s\].
        w1: f64,
        /// Saturation duration \[s\].
        duration: f64,
    },

    /// Piecewise-constant shaped pulse: instantaneous amplitudes \[rad/s\],
    /// one per step of fixed duration `step` \[s\]. Zero-amplitude samples
    /// (train gaps) degenerate to pure relaxation/exchange.
    Shaped {
        /// Instantaneous amplitude of each step \[rad/s\].
        amplitudes: DVector<f64>,
        /// Duration of one step \[s\].
        step: f64,
    },
}

impl Saturation {
    /// Continuous-wave saturation.
    pub fn continuous_wave(w1: f64, duration: f64) -> Self {
        Self::ContinuousWave { w1, duration }
    }

    /// Shaped saturation from a unit-integral envelope, scaled so that the
    /// pulse is equivalent in integrated effect to a continuous-wave pulse
    /// of amplitude `w1` \[rad/s\] over the same support.
    pub fn shaped(envelope: &PulseEnvelope, w1: f64, step: f64) -> Self {
        Self::Shaped {
            amplitudes: envelope.amplitudes(w1),
            step,
        }
    }

    /// Shaped saturation from raw per-step amplitudes \[rad/s\].
    pub fn from_amplitudes(amplitudes: DVector<f64>, step: f64) -> Self {
        Self::Shaped { amplitudes, step }
    }

    /// Name identifier, for metadata and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ContinuousWave { .. } => "continuous-wave",
            Self::Shaped { .. } => "shaped",
        }
    }

    /// Total saturation time \[s\].
    pub fn duration(&self) -> f64 {
        match self {
            Self::ContinuousWave { duration, .. } => *duration,
            Self::Shaped { amplitudes, step } => *step * amplitudes.len() as f64,
        }
    }

    /// Validate that the parameters are physically meaningful.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::ContinuousWave { w1, duration } => {
                if !w1.is_finite() {
                    return Err(SimulationError::InvalidArgument(format!(
                        "RF amplitude must be finite, got {w1}"
                    )));
                }
                if !(*duration > 0.0 && duration.is_finite()) {
                    return Err(SimulationError::InvalidArgument(format!(
                        "saturation duration must be positive, got {duration}"
                    )));
                }
                Ok(())
            }
            Self::Shaped { amplitudes, step } => {
                if amplitudes.is_empty() {
                    return Err(SimulationError::InvalidArgument(
                        "a shaped pulse needs at least 1 amplitude sample".to_string(),
                    ));
                }
                if amplitudes.iter().any(|amplitude| !amplitude.is_finite()) {
                    return Err(SimulationError::InvalidArgument(
                        "shaped pulse amplitudes must all be finite".to_string(),
                    ));
                }
                if !(*step > 0.0 && step.is_finite()) {
                    return Err(SimulationError::InvalidArgument(format!(
                        "pulse step duration must be positive, got {step}"
                    )));
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Propagator
// =================================================================================================

/// Bloch–McConnell propagator for one pool system at one main field.
///
/// Holds only immutable configuration (the pool system, the main-field
/// frequency and the per-pool resonance offsets derived from it), so one
/// propagator can serve any number of concurrent offset or voxel
/// computations.
#[derive(Clone, Debug)]
pub struct Propagator {
    system: PoolSystem,
    b0: f64,
    offsets_hz: Vec<f64>,
    delta_b0_ppm: f64,
}

impl Propagator {
    /// Create a propagator.
    ///
    /// # Arguments
    ///
    /// * `system` - The exchanging pools
    /// * `b0` - Main-field frequency \[Hz\], used to convert ppm offsets
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidArgument`] when `b0` is not a positive
    /// finite frequency.
    pub fn new(system: PoolSystem, b0: f64) -> Result<Self> {
        if !(b0 > 0.0 && b0.is_finite()) {
            return Err(SimulationError::InvalidArgument(format!(
                "main field frequency must be positive, got {b0}"
            )));
        }

        let offsets_hz = system
            .pools()
            .iter()
            .map(|pool| pool.chemical_shift() * b0 * 1e-6)
            .collect();

        Ok(Self {
            system,
            b0,
            offsets_hz,
            delta_b0_ppm: 0.0,
        })
    }

    /// Account for a B0 inhomogeneity of `delta_b0_ppm` \[ppm\]: the
    /// effective RF carrier is shifted by `delta_b0_ppm · B0 · 1e-6` Hz.
    pub fn with_b0_shift(mut self, delta_b0_ppm: f64) -> Self {
        self.delta_b0_ppm = delta_b0_ppm;
        self
    }

    /// The pool system.
    pub fn system(&self) -> &PoolSystem {
        &self.system
    }

    /// Main-field frequency \[Hz\].
    pub fn b0(&self) -> f64 {
        self.b0
    }

    /// Convert a ppm offset to Hz at this main field.
    pub fn ppm_to_hz(&self, ppm: f64) -> f64 {
        ppm * self.b0 * 1e-6
    }

    /// Thermal equilibrium state of the pool system.
    pub fn equilibrium(&self) -> MagnetizationState {
        MagnetizationState::equilibrium(&self.system)
    }

    /// Propagate a state through one saturation applied at `offset_hz`.
    ///
    /// # Arguments
    ///
    /// * `offset_hz` - RF carrier offset \[Hz\]
    /// * `saturation` - The saturation to apply
    /// * `initial` - Starting magnetization
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidArgument`] for a malformed saturation,
    /// [`SimulationError::NumericalInstability`] when a step produces
    /// non-finite magnetization.
    ///
    /// # Panics
    ///
    /// When `initial` does not match the pool system's dimension
    /// (programming-contract violation).
    pub fn saturate(
        &self,
        offset_hz: f64,
        saturation: &Saturation,
        initial: &MagnetizationState,
    ) -> Result<MagnetizationState> {
        saturation.validate()?;
        assert_eq!(
            initial.dimension(),
            self.system.dimension(),
            "state dimension {} does not match pool system dimension {}",
            initial.dimension(),
            self.system.dimension()
        );

        let carrier_hz = offset_hz + self.ppm_to_hz(self.delta_b0_ppm);

        match saturation {
            Saturation::ContinuousWave { w1, duration } => {
                let matrix = rate_matrix(&self.system, &self.offsets_hz, carrier_hz, *w1);
                self.exponential_step(&matrix, *duration, initial, offset_hz, 0)
            }
            Saturation::Shaped { amplitudes, step } => {
                let mut state = initial.clone();
                for (index, &w1) in amplitudes.iter().enumerate() {
                    let matrix = rate_matrix(&self.system, &self.offsets_hz, carrier_hz, w1);
                    state = self.exponential_step(&matrix, *step, &state, offset_hz, index)?;
                }
                Ok(state)
            }
        }
    }

    /// The shared step primitive: `exp(A·Δt)·M` with a finiteness check.
    fn exponential_step(
        &self,
        matrix: &DMatrix<f64>,
        dt: f64,
        state: &MagnetizationState,
        offset_hz: f64,
        step: usize,
    ) -> Result<MagnetizationState> {
        let propagated = (matrix * dt).exp() * state.as_vector();
        let next = MagnetizationState::from_raw(propagated);

        if !next.is_finite() {
            return Err(SimulationError::NumericalInstability {
                offset_hz,
                step,
                detail: "matrix exponential produced non-finite magnetization".to_string(),
            });
        }
        Ok(next)
    }
}

// =================================================================================================
// Tests
// =================================================================================================
