//! Helper functions for integration tests

use cest_rs::physics::{Pool, PoolSystem};
use cest_rs::solver::Propagator;

/// Main field such that 1 ppm = 300 Hz.
pub const B0_300MHZ: f64 = 300e6;

/// Reference water pool used across the integration tests.
pub fn water_pool() -> Pool {
    Pool::new(1.2, 40e-3, 0.0, 1.0, 0.0).unwrap()
}

/// Amide-like solute pool at 3.5 ppm with a configurable exchange rate.
pub fn amide_pool(m0: f64, exchange_rate: f64) -> Pool {
    Pool::new(1.2, 10e-3, 3.5, m0, exchange_rate).unwrap()
}

/// Water + solute propagator at the 300 MHz reference field.
pub fn two_pool_propagator(m0_solute: f64, exchange_rate: f64) -> Propagator {
    let system =
        PoolSystem::two_pool(water_pool(), amide_pool(m0_solute, exchange_rate)).unwrap();
    Propagator::new(system, B0_300MHZ).unwrap()
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Exact longitudinal solution of a two-pool system without RF.
///
/// With `w1 = 0` the two z components close on themselves:
///
/// ```text
/// d/dt [za]   [-(R1a+f·k)      k     ] [za]   [R1a·M0a]
///      [zb] = [   f·k      -(R1b+k)  ] [zb] + [R1b·M0b]
/// ```
///
/// The fixed point is the thermal equilibrium `(M0a, M0b)` and the
/// deviation decays through `exp(G·t)`, evaluated here in closed form with
/// the two-eigenvalue Lagrange interpolation
/// `exp(G·t) = ((G−λ2·I)·e^{λ1 t} − (G−λ1·I)·e^{λ2 t}) / (λ1−λ2)`.
///
/// Returns `(za(t), zb(t))`.
pub fn z_decay_closed_form(
    water: &Pool,
    solute: &Pool,
    za0: f64,
    zb0: f64,
    t: f64,
) -> (f64, f64) {
    let f = solute.m0() / water.m0();
    let k = solute.exchange_rate();

    // G entries
    let g11 = -(water.r1() + f * k);
    let g12 = k;
    let g21 = f * k;
    let g22 = -(solute.r1() + k);

    // Eigenvalues of the 2x2
    let trace = g11 + g22;
    let determinant = g11 * g22 - g12 * g21;
    let discriminant = (trace * trace - 4.0 * determinant).sqrt();
    let lambda_1 = 0.5 * (trace + discriminant);
    let lambda_2 = 0.5 * (trace - discriminant);
    assert!(
        (lambda_1 - lambda_2).abs() > 1e-12,
        "degenerate eigenvalues; pick different test parameters"
    );

    let e1 = (lambda_1 * t).exp();
    let e2 = (lambda_2 * t).exp();
    let scale = 1.0 / (lambda_1 - lambda_2);

    // exp(G t) entries by Lagrange interpolation on the spectrum
    let exp11 = scale * ((g11 - lambda_2) * e1 - (g11 - lambda_1) * e2);
    let exp12 = scale * (g12 * e1 - g12 * e2);
    let exp21 = scale * (g21 * e1 - g21 * e2);
    let exp22 = scale * ((g22 - lambda_2) * e1 - (g22 - lambda_1) * e2);

    let ua = za0 - water.m0();
    let ub = zb0 - solute.m0();

    (
        water.m0() + exp11 * ua + exp12 * ub,
        solute.m0() + exp21 * ua + exp22 * ub,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_closed_form_at_zero_time_is_initial_state() {
        let water = water_pool();
        let solute = amide_pool(0.001, 22.0);
        let (za, zb) = z_decay_closed_form(&water, &solute, 0.3, 0.0002, 0.0);
        assert!((za - 0.3).abs() < 1e-12);
        assert!((zb - 0.0002).abs() < 1e-12);
    }

    #[test]
    fn test_closed_form_fixed_point_is_equilibrium() {
        let water = water_pool();
        let solute = amide_pool(0.001, 22.0);
        let (za, zb) = z_decay_closed_form(&water, &solute, 1.0, 0.001, 5.0);
        assert!((za - 1.0).abs() < 1e-9);
        assert!((zb - 0.001).abs() < 1e-9);
    }
}
