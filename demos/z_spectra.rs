//! Z-spectra of three solutes exchanging with water under a shaped
//! saturation pulse, followed by MTR analysis of each spectrum.
//!
//! Run with `cargo run --example z_spectra`.

use cest_rs::analysis::{label_offsets, mtr, Normalization};
use cest_rs::physics::{species, PoolSystem, GAMMA_PROTON};
use cest_rs::pulses::{gaussian, GAUSSIAN_SIGMA, GAUSSIAN_X_MAX};
use cest_rs::solver::{Propagator, Saturation};

fn main() -> cest_rs::Result<()> {
    // Experimental conditions: main field (Hz), saturation pulse
    // amplitude (T) and duration (s), time step (s)
    let b0 = 300e6;
    let b1 = 6e-6;
    let tau: f64 = 1.0;
    let step: f64 = 1e-2;

    // Offsets of the RF pulse (ppm)
    let offsets: Vec<f64> = (0..101).map(|index| -5.0 + 0.1 * index as f64).collect();

    // Shaped saturation: a Gaussian envelope equivalent in integrated
    // effect to the continuous-wave pulse defined by b1 and tau
    let steps = (tau / step).round() as usize;
    let envelope = gaussian(steps, GAUSSIAN_SIGMA, GAUSSIAN_X_MAX)?;
    let saturation = Saturation::shaped(&envelope, GAMMA_PROTON * b1, step);

    for name in ["glutamate", "creatine", "mobile_amides"] {
        let solute = species::by_name(name).expect("catalogued species");
        // Unrealistic concentration, to better show the effect
        let solute = solute.with_m0(20.0 * solute.m0())?;

        let system = PoolSystem::two_pool(species::water(), solute)?;
        let propagator = Propagator::new(system, b0)?;

        let spectrum = propagator.z_spectrum(&offsets, &saturation)?;
        let transfer = mtr(&offsets, &spectrum.signals(), Normalization::NormRef)?;
        let label = label_offsets(&offsets)?;

        let (peak_index, peak) = transfer
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .expect("non-empty transfer map");

        println!("{name}:");
        println!(
            "  Z at {:+.1} ppm: {:.4}",
            solute.chemical_shift(),
            spectrum
                .samples()
                .iter()
                .min_by(|a, b| {
                    (a.offset_ppm - solute.chemical_shift())
                        .abs()
                        .total_cmp(&(b.offset_ppm - solute.chemical_shift()).abs())
                })
                .expect("non-empty spectrum")
                .signal
        );
        println!("  MTR peak: {:.4} at {:+.1} ppm", peak, label[peak_index]);
    }

    Ok(())
}
