//! Bloch–McConnell rate-matrix assembly
//!
//! # Mathematical Background
//!
//! The coupled relaxation–exchange dynamics of an N-pool system under RF
//! irradiation form a linear ODE system on the augmented state vector,
//!
//! ```text
//! dM/dt = A·M
//! ```
//!
//! where `A` is the `(3N+1)×(3N+1)` rate matrix assembled here. For two
//! pools (reference pool *a*, exchanging pool *b* with exchange rate `k_b`
//! and relative concentration `f_b = M0_b/M0_a`) the matrix reads, with
//! `Δ_p = 2π·(w − w_p)` the precession of pool *p* in the rotating frame
//! and `w1` the RF amplitude in rad/s:
//!
//! ```text
//! //     Mxa          Mya          Mza      Mxb      Myb      Mzb        1
//! [ -R2a-f_b·k_b,     -Δa,           0,     k_b,       0,       0,       0 ]
//! [       Δa,    -R2a-f_b·k_b,     -w1,       0,     k_b,       0,       0 ]
//! [        0,          w1,   -R1a-f_b·k_b,   0,       0,     k_b, R1a·M0a ]
//! [  f_b·k_b,           0,           0, -R2b-k_b,   -Δb,       0,       0 ]
//! [        0,      f_b·k_b,          0,      Δb, -R2b-k_b,   -w1,       0 ]
//! [        0,           0,     f_b·k_b,       0,      w1, -R1b-k_b, R1b·M0b ]
//! [        0,           0,           0,       0,       0,       0,       0 ]
//! ```
//!
//! Magnetization conservation fixes the couplings: pool *b* loses
//! magnetization at rate `k_b` (appearing in the reference pool's rows) and
//! the reference pool loses it at the back-rate `f_b·k_b` (appearing in
//! pool *b*'s rows). With more than two pools every non-reference pool
//! couples to the reference pool in the same pattern and the reference
//! diagonal carries the summed outflow `Σ_b f_b·k_b`.
//!
//! Each pool's z-row carries its own `R1·M0` drive in the augmented
//! column; the all-zero last row pins the constant slot.
//!
//! The matrix is a transient value: built fresh for every
//! (carrier, amplitude) pair and consumed immediately by the exponential
//! step. It is never mutated after assembly.

use std::f64::consts::TAU;

use nalgebra::DMatrix;

use crate::physics::PoolSystem;

/// Assemble the instantaneous rate matrix of a pool system.
///
/// # Arguments
///
/// * `system` - The exchanging pools, reference pool first
/// * `offsets_hz` - Per-pool resonance offsets \[Hz\], already converted
///   from ppm with the main-field frequency
/// * `carrier_hz` - RF carrier offset \[Hz\]
/// * `w1` - Instantaneous RF amplitude \[rad/s\]
///
/// # Panics
///
/// When `offsets_hz` does not have one entry per pool. A mismatch here is
/// a programming-contract violation, not a recoverable runtime condition.
pub fn rate_matrix(
    system: &PoolSystem,
    offsets_hz: &[f64],
    carrier_hz: f64,
    w1: f64,
) -> DMatrix<f64> {
    assert_eq!(
        offsets_hz.len(),
        system.len(),
        "need one resonance offset per pool: {} offsets for {} pools",
        offsets_hz.len(),
        system.len()
    );

    let dimension = system.dimension();
    let drive_column = dimension - 1;
    let mut matrix = DMatrix::zeros(dimension, dimension);

    let reference_outflow = system.reference_outflow();

    for (index, pool) in system.pools().iter().enumerate() {
        let row = 3 * index;
        let precession = TAU * (carrier_hz - offsets_hz[index]);
        let outflow = if index == 0 {
            reference_outflow
        } else {
            pool.exchange_rate()
        };

        // Intra-pool block: relaxation + outflow on the diagonal,
        // precession and RF nutation off-diagonal.
        matrix[(row, row)] = -pool.r2() - outflow;
        matrix[(row, row + 1)] = -precession;
        matrix[(row + 1, row)] = precession;
        matrix[(row + 1, row + 1)] = -pool.r2() - outflow;
        matrix[(row + 1, row + 2)] = -w1;
        matrix[(row + 2, row + 1)] = w1;
        matrix[(row + 2, row + 2)] = -pool.r1() - outflow;

        // Longitudinal relaxation drive through the augmented column.
        matrix[(row + 2, drive_column)] = pool.r1() * pool.m0();

        // Exchange coupling with the reference pool, component-wise.
        if index > 0 {
            let into_reference = pool.exchange_rate();
            let into_pool = system.relative_concentration(index) * pool.exchange_rate();
            for component in 0..3 {
                matrix[(component, row + component)] = into_reference;
                matrix[(row + component, component)] = into_pool;
            }
        }
    }

    // Last row stays all zero: the constant slot never evolves.
    matrix
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{Pool, PoolSystem};

    fn two_pool_system() -> PoolSystem {
        PoolSystem::two_pool(
            Pool::new(1.2, 40e-3, 0.0, 1.0, 0.0).unwrap(),
            Pool::new(1.2, 10e-3, 3.5, 0.001, 22.0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_two_pool_matrix_entries() {
        let system = two_pool_system();
        let offsets = [0.0, 1050.0];
        let carrier = 300.0;
        let w1 = 535.0;
        let matrix = rate_matrix(&system, &offsets, carrier, w1);

        let r1a = 1.0 / 1.2;
        let r2a = 1.0 / 40e-3;
        let r1b = 1.0 / 1.2;
        let r2b = 1.0 / 10e-3;
        let kb = 22.0;
        let fbkb = 0.001 * 22.0;
        let delta_a = TAU * (carrier - 0.0);
        let delta_b = TAU * (carrier - 1050.0);

        // Reference pool rows
        assert!((matrix[(0, 0)] - (-r2a - fbkb)).abs() < 1e-12);
        assert!((matrix[(0, 1)] - (-delta_a)).abs() < 1e-9);
        assert!((matrix[(0, 3)] - kb).abs() < 1e-12);
        assert!((matrix[(1, 0)] - delta_a).abs() < 1e-9);
        assert!((matrix[(1, 2)] - (-w1)).abs() < 1e-12);
        assert!((matrix[(1, 4)] - kb).abs() < 1e-12);
        assert!((matrix[(2, 1)] - w1).abs() < 1e-12);
        assert!((matrix[(2, 2)] - (-r1a - fbkb)).abs() < 1e-12);
        assert!((matrix[(2, 5)] - kb).abs() < 1e-12);
        assert!((matrix[(2, 6)] - r1a * 1.0).abs() < 1e-12);

        // Exchanging pool rows
        assert!((matrix[(3, 0)] - fbkb).abs() < 1e-12);
        assert!((matrix[(3, 3)] - (-r2b - kb)).abs() < 1e-12);
        assert!((matrix[(3, 4)] - (-delta_b)).abs() < 1e-9);
        assert!((matrix[(4, 1)] - fbkb).abs() < 1e-12);
        assert!((matrix[(4, 3)] - delta_b).abs() < 1e-9);
        assert!((matrix[(4, 5)] - (-w1)).abs() < 1e-12);
        assert!((matrix[(5, 2)] - fbkb).abs() < 1e-12);
        assert!((matrix[(5, 4)] - w1).abs() < 1e-12);
        assert!((matrix[(5, 5)] - (-r1b - kb)).abs() < 1e-12);
        assert!((matrix[(5, 6)] - r1b * 0.001).abs() < 1e-12);

        // Zero entries where no physics couples
        assert_eq!(matrix[(0, 2)], 0.0);
        assert_eq!(matrix[(0, 4)], 0.0);
        assert_eq!(matrix[(3, 1)], 0.0);
        assert_eq!(matrix[(3, 6)], 0.0);
    }

    #[test]
    fn test_last_row_is_zero() {
        let system = two_pool_system();
        let matrix = rate_matrix(&system, &[0.0, 1050.0], 300.0, 535.0);
        for column in 0..7 {
            assert_eq!(matrix[(6, column)], 0.0);
        }
    }

    #[test]
    fn test_equilibrium_is_stationary_without_rf() {
        use crate::physics::MagnetizationState;

        let system = two_pool_system();
        let matrix = rate_matrix(&system, &[0.0, 1050.0], 300.0, 0.0);
        let equilibrium = MagnetizationState::equilibrium(&system);
        let derivative = &matrix * equilibrium.as_vector();

        // dM/dt must vanish at thermal equilibrium when w1 = 0: relaxation
        // drives and exchange flows balance exactly.
        for component in derivative.iter() {
            assert!(component.abs() < 1e-12, "non-zero derivative {component}");
        }
    }

    #[test]
    fn test_three_pool_block_structure() {
        let system = PoolSystem::new(vec![
            Pool::new(1.2, 40e-3, 0.0, 1.0, 0.0).unwrap(),
            Pool::new(1.2, 10e-3, 3.5, 0.001, 22.0).unwrap(),
            Pool::new(1.0, 7e-3, 2.0, 0.002, 500.0).unwrap(),
        ])
        .unwrap();
        let offsets = [0.0, 1050.0, 600.0];
        let matrix = rate_matrix(&system, &offsets, 0.0, 100.0);

        assert_eq!(matrix.nrows(), 10);

        // Reference diagonal carries the summed outflow.
        let outflow = 0.001 * 22.0 + 0.002 * 500.0;
        assert!((matrix[(0, 0)] - (-25.0 - outflow)).abs() < 1e-12);

        // Pool 2 couples to the reference pool only.
        assert!((matrix[(0, 6)] - 500.0).abs() < 1e-12);
        assert!((matrix[(6, 0)] - 0.002 * 500.0).abs() < 1e-12);
        assert_eq!(matrix[(3, 6)], 0.0);
        assert_eq!(matrix[(6, 3)], 0.0);
    }

    #[test]
    #[should_panic(expected = "need one resonance offset per pool")]
    fn test_offset_count_mismatch_panics() {
        let system = two_pool_system();
        rate_matrix(&system, &[0.0], 0.0, 0.0);
    }
}
