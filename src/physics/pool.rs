//! Pool and pool-system data model
//!
//! A [`Pool`] describes one chemically distinct proton population: its
//! relaxation times, resonance offset, equilibrium magnetization and the
//! first-order rate at which it exchanges magnetization with the reference
//! pool. A [`PoolSystem`] is the validated, ordered collection of pools that
//! the rate-matrix builder and the propagator operate on.
//!
//! # Exchange topology
//!
//! The reference pool (water in every practical CEST experiment) sits at
//! index 0. Every other pool *b* exchanges into the reference pool *a* with
//! rate `k_b`; the back-rate out of the reference pool follows from
//! magnetization conservation as `f_b · k_b` with `f_b = M0_b / M0_a`.
//! The reference pool therefore carries a structurally zero `exchange_rate`
//! of its own.

use crate::error::{Result, SimulationError};

// =================================================================================================
// Pool
// =================================================================================================

/// One spin species: relaxation, resonance offset, concentration, exchange.
///
/// Immutable value type. Construct with [`Pool::new`]; derive modified
/// copies with [`Pool::with_m0`] or [`Pool::with_exchange_rate`]; presets
/// from [`species`](crate::physics::species) are never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pool {
    t1: f64,
    t2: f64,
    chemical_shift: f64,
    m0: f64,
    exchange_rate: f64,
}

impl Pool {
    /// Create a pool.
    ///
    /// # Arguments
    ///
    /// * `t1` - Longitudinal relaxation time \[s\], > 0
    /// * `t2` - Transverse relaxation time \[s\], > 0
    /// * `chemical_shift` - Resonance offset from the reference pool \[ppm\]
    /// * `m0` - Equilibrium longitudinal magnetization (unitless), ≥ 0
    /// * `exchange_rate` - Rate of exchange into the reference pool \[1/s\], ≥ 0
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidArgument`] when a relaxation time is not
    /// strictly positive, or `m0`/`exchange_rate` is negative or non-finite.
    pub fn new(
        t1: f64,
        t2: f64,
        chemical_shift: f64,
        m0: f64,
        exchange_rate: f64,
    ) -> Result<Self> {
        if !(t1 > 0.0 && t1.is_finite()) {
            return Err(SimulationError::InvalidArgument(format!(
                "T1 must be a positive time in seconds, got {t1}"
            )));
        }
        if !(t2 > 0.0 && t2.is_finite()) {
            return Err(SimulationError::InvalidArgument(format!(
                "T2 must be a positive time in seconds, got {t2}"
            )));
        }
        if !chemical_shift.is_finite() {
            return Err(SimulationError::InvalidArgument(format!(
                "chemical shift must be finite, got {chemical_shift}"
            )));
        }
        if !(m0 >= 0.0 && m0.is_finite()) {
            return Err(SimulationError::InvalidArgument(format!(
                "M0 must be non-negative, got {m0}"
            )));
        }
        if !(exchange_rate >= 0.0 && exchange_rate.is_finite()) {
            return Err(SimulationError::InvalidArgument(format!(
                "exchange rate must be non-negative, got {exchange_rate}"
            )));
        }

        Ok(Self {
            t1,
            t2,
            chemical_shift,
            m0,
            exchange_rate,
        })
    }

    /// Construct a vetted literature preset. Bypasses the runtime checks of
    /// [`Pool::new`]; only reachable from the species catalogue.
    pub(crate) const fn preset(
        t1: f64,
        t2: f64,
        chemical_shift: f64,
        m0: f64,
        exchange_rate: f64,
    ) -> Self {
        Self {
            t1,
            t2,
            chemical_shift,
            m0,
            exchange_rate,
        }
    }

    /// Longitudinal relaxation time \[s\].
    pub fn t1(&self) -> f64 {
        self.t1
    }

    /// Transverse relaxation time \[s\].
    pub fn t2(&self) -> f64 {
        self.t2
    }

    /// Longitudinal relaxation rate `R1 = 1/T1` \[1/s\].
    pub fn r1(&self) -> f64 {
        1.0 / self.t1
    }

    /// Transverse relaxation rate `R2 = 1/T2` \[1/s\].
    pub fn r2(&self) -> f64 {
        1.0 / self.t2
    }

    /// Resonance offset from the reference pool \[ppm\].
    pub fn chemical_shift(&self) -> f64 {
        self.chemical_shift
    }

    /// Equilibrium longitudinal magnetization (unitless).
    pub fn m0(&self) -> f64 {
        self.m0
    }

    /// Exchange rate into the reference pool \[1/s\].
    pub fn exchange_rate(&self) -> f64 {
        self.exchange_rate
    }

    /// Copy of this pool with a different equilibrium magnetization.
    pub fn with_m0(&self, m0: f64) -> Result<Self> {
        Self::new(self.t1, self.t2, self.chemical_shift, m0, self.exchange_rate)
    }

    /// Copy of this pool with a different exchange rate.
    pub fn with_exchange_rate(&self, exchange_rate: f64) -> Result<Self> {
        Self::new(self.t1, self.t2, self.chemical_shift, self.m0, exchange_rate)
    }

    /// Copy of this pool with a different chemical shift.
    pub fn with_chemical_shift(&self, chemical_shift: f64) -> Result<Self> {
        Self::new(self.t1, self.t2, chemical_shift, self.m0, self.exchange_rate)
    }
}

// =================================================================================================
// PoolSystem
// =================================================================================================

/// Ordered collection of exchanging pools, reference pool first.
///
/// Invariants enforced at construction:
/// - at least two pools;
/// - the reference pool (index 0) has `exchange_rate == 0` and `M0 > 0`
///   (the relative concentrations `f_b = M0_b / M0_a` are computed from it).
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSystem {
    pools: Vec<Pool>,
}

impl PoolSystem {
    /// Create a pool system. The first pool is the reference pool.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidArgument`] when fewer than two pools are
    /// given, the reference pool exchanges (its rate must be structurally
    /// zero), or the reference pool has `M0 == 0`.
    pub fn new(pools: Vec<Pool>) -> Result<Self> {
        if pools.len() < 2 {
            return Err(SimulationError::InvalidArgument(format!(
                "a pool system needs at least 2 pools, got {}",
                pools.len()
            )));
        }
        if pools[0].exchange_rate() != 0.0 {
            return Err(SimulationError::InvalidArgument(format!(
                "the reference pool must not carry an exchange rate, got {}",
                pools[0].exchange_rate()
            )));
        }
        if pools[0].m0() == 0.0 {
            return Err(SimulationError::InvalidArgument(
                "the reference pool must have M0 > 0".to_string(),
            ));
        }

        Ok(Self { pools })
    }

    /// Convenience constructor for the ubiquitous two-pool experiment.
    pub fn two_pool(reference: Pool, solute: Pool) -> Result<Self> {
        Self::new(vec![reference, solute])
    }

    /// Number of pools.
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// A pool system is never empty; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// All pools, reference pool first.
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// The reference pool.
    pub fn reference(&self) -> &Pool {
        &self.pools[0]
    }

    /// Size of the augmented magnetization vector: three Cartesian
    /// components per pool plus the constant slot.
    pub fn dimension(&self) -> usize {
        3 * self.pools.len() + 1
    }

    /// Relative concentration `f_p = M0_p / M0_reference`.
    pub fn relative_concentration(&self, index: usize) -> f64 {
        self.pools[index].m0() / self.pools[0].m0()
    }

    /// Total exchange rate out of the reference pool: `Σ_b f_b · k_b` over
    /// all non-reference pools.
    pub fn reference_outflow(&self) -> f64 {
        self.pools
            .iter()
            .enumerate()
            .skip(1)
            .map(|(index, pool)| self.relative_concentration(index) * pool.exchange_rate())
            .sum()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
