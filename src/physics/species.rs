//! Catalogue of literature pool presets
//!
//! Values from "Analysis of chemical exchange saturation transfer
//! contributions from brain metabolites to the Z-spectra at various field
//! strengths and pH", Khlebnikov et al. Scientific Reports 9(1), 2019.
//! doi:10.1038/s41598-018-37295-y
//!
//! Notes
//! - concentrations in the paper are given in mM; the 1/55 factor comes
//!   from the molarity of pure water
//! - the paper mentions that the T2 of labile protons of taurine and mobile
//!   amides could not be fitted reliably and was set at 10 ms
//!
//! Presets are plain [`Pool`] values: to vary a parameter, derive a copy
//! with `with_m0` / `with_exchange_rate`; the catalogue itself is
//! read-only.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::physics::Pool;

/// Pure water, the reference pool.
pub fn water() -> Pool {
    Pool::preset(1.2, 40e-3, 0.0, 1.0, 0.0)
}

/// Myo-inositol hydroxyl protons at 1 ppm.
pub fn myo_inositol() -> Pool {
    Pool::preset(1.2, 22.8e-3, 1.0, 0.0054 / 55.0, 2090.0)
}

/// Creatine guanidinium protons at 2 ppm.
pub fn creatine() -> Pool {
    Pool::preset(1.2, 7.1e-3, 2.0, 0.00705 / 55.0, 810.0)
}

/// Phosphocreatine, 1.93 ppm resonance.
pub fn phosphocreatine_1_93ppm() -> Pool {
    Pool::preset(1.2, 7.8e-3, 1.93, 0.00705 / 55.0, 67.0)
}

/// Phosphocreatine, 2.64 ppm resonance.
pub fn phosphocreatine_2_64ppm() -> Pool {
    Pool::preset(1.2, 7.8e-3, 2.64, 0.00705 / 55.0, 126.0)
}

/// GABA amine protons at 2.91 ppm.
pub fn gaba() -> Pool {
    Pool::preset(1.2, 17.2e-3, 2.91, 0.0015 / 55.0, 6900.0)
}

/// Taurine amine protons at 3.18 ppm.
pub fn taurine() -> Pool {
    Pool::preset(1.2, 10e-3, 3.18, 0.00155 / 55.0, 49600.0)
}

/// Glutamate amine protons at 3.2 ppm.
pub fn glutamate() -> Pool {
    Pool::preset(1.2, 6.9e-3, 3.2, 0.0066 / 55.0, 7480.0)
}

/// Glutamine, 2.15 ppm resonance.
pub fn glutamine_2_15ppm() -> Pool {
    Pool::preset(1.2, 13.8e-3, 2.15, 0.003 / 55.0, 17.0)
}

/// Glutamine, 2.87 ppm resonance.
pub fn glutamine_2_87ppm() -> Pool {
    Pool::preset(1.2, 13.8e-3, 2.87, 0.003 / 55.0, 49.0)
}

/// Glutamine, 3.18 ppm resonance.
pub fn glutamine_3_18ppm() -> Pool {
    Pool::preset(1.2, 13.8e-3, 3.18, 0.003 / 55.0, 22880.0)
}

/// Mobile amide protons at 3.5 ppm.
pub fn mobile_amides() -> Pool {
    Pool::preset(1.2, 10e-3, 3.5, 0.072 / 55.0, 22.0)
}

static CATALOGUE: LazyLock<HashMap<&'static str, Pool>> = LazyLock::new(|| {
    HashMap::from([
        ("water", water()),
        ("myo_inositol", myo_inositol()),
        ("creatine", creatine()),
        ("phosphocreatine_1_93ppm", phosphocreatine_1_93ppm()),
        ("phosphocreatine_2_64ppm", phosphocreatine_2_64ppm()),
        ("gaba", gaba()),
        ("taurine", taurine()),
        ("glutamate", glutamate()),
        ("glutamine_2_15ppm", glutamine_2_15ppm()),
        ("glutamine_2_87ppm", glutamine_2_87ppm()),
        ("glutamine_3_18ppm", glutamine_3_18ppm()),
        ("mobile_amides", mobile_amides()),
    ])
});

/// Look a preset up by name. Returns a copy; the catalogue cannot be
/// modified through it.
pub fn by_name(name: &str) -> Option<Pool> {
    CATALOGUE.get(name).copied()
}

/// Names of all catalogued species, sorted.
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<_> = CATALOGUE.keys().copied().collect();
    names.sort_unstable();
    names
}

// =================================================================================================
// Tests
// =================================================================================================
