//! Augmented magnetization state vector
//!
//! The Bloch–McConnell equations with longitudinal relaxation are affine,
//! `dM/dt = A·M + b`. Appending a constant slot that is always exactly 1
//! turns them into a purely linear system on a `3N+1` vector: the relaxation
//! drive `R1·M0` moves into the last matrix column and the last matrix row
//! is all zero, so the slot never evolves. This is what lets the propagator
//! use a single matrix exponential per step.

use nalgebra::DVector;

use crate::error::{Result, SimulationError};
use crate::physics::PoolSystem;

/// Magnetization of an N-pool system in augmented coordinates.
///
/// Layout: `[Mx_0, My_0, Mz_0, Mx_1, My_1, Mz_1, …, 1]` with pool 0 the
/// reference pool. The trailing slot is fixed at 1 by construction and is
/// preserved exactly by propagation (the rate matrix has an all-zero last
/// row).
#[derive(Debug, Clone, PartialEq)]
pub struct MagnetizationState {
    components: DVector<f64>,
}

impl MagnetizationState {
    /// Thermal equilibrium state of a pool system:
    /// `[0, 0, M0_0, 0, 0, M0_1, …, 1]`.
    pub fn equilibrium(system: &PoolSystem) -> Self {
        let mut components = DVector::zeros(system.dimension());
        for (index, pool) in system.pools().iter().enumerate() {
            components[3 * index + 2] = pool.m0();
        }
        components[system.dimension() - 1] = 1.0;
        Self { components }
    }

    /// Build a state from raw components.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidArgument`] when the length is not `3N+1`
    /// for some `N ≥ 2`, or the trailing slot is not exactly 1.
    pub fn from_vector(components: DVector<f64>) -> Result<Self> {
        let length = components.len();
        if length < 7 || length % 3 != 1 {
            return Err(SimulationError::InvalidArgument(format!(
                "state length must be 3N+1 with N >= 2 pools, got {length}"
            )));
        }
        if components[length - 1] != 1.0 {
            return Err(SimulationError::InvalidArgument(format!(
                "the trailing state slot must be exactly 1, got {}",
                components[length - 1]
            )));
        }
        Ok(Self { components })
    }

    /// Wrap a propagated vector without re-validating the layout. The
    /// propagator guarantees the invariants structurally.
    pub(crate) fn from_raw(components: DVector<f64>) -> Self {
        debug_assert!(components.len() >= 7 && components.len() % 3 == 1);
        Self { components }
    }

    /// Number of pools represented by this state.
    pub fn pool_count(&self) -> usize {
        (self.components.len() - 1) / 3
    }

    /// Length of the augmented vector, `3N+1`.
    pub fn dimension(&self) -> usize {
        self.components.len()
    }

    /// Transverse x component of one pool.
    pub fn x(&self, pool: usize) -> f64 {
        self.components[3 * pool]
    }

    /// Transverse y component of one pool.
    pub fn y(&self, pool: usize) -> f64 {
        self.components[3 * pool + 1]
    }

    /// Longitudinal component of one pool. `longitudinal(0)` is the
    /// Z-spectrum readout.
    pub fn longitudinal(&self, pool: usize) -> f64 {
        self.components[3 * pool + 2]
    }

    /// The raw augmented vector.
    pub fn as_vector(&self) -> &DVector<f64> {
        &self.components
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.components.iter().all(|value| value.is_finite())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
