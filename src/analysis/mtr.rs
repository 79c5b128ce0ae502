//! Saturation-transfer ratio (MTR) computation
//!
//! A Z-spectrum acquired on a ppm axis symmetric about 0 is split into a
//! *label* half (ppm ≥ 0, schedule order) and a *reference* half (ppm ≤ 0,
//! reversed), so that index `i` of each half addresses the same absolute
//! offset. The four normalizations of Zaiss et al. (NMR in Biomedicine
//! 27(3), 2014, doi:10.1002/nbm.3054) then combine corresponding samples
//! `Zl` and `Zr` point-wise.
//!
//! The split keeps 0 ppm in both halves, where every normalization yields
//! exactly zero asymmetry by construction.

use std::str::FromStr;

use ndarray::{ArrayD, Axis, IxDyn};

use crate::error::{Result, SimulationError};

/// Relative tolerance for the mirror check of the ppm axis.
const AXIS_MIRROR_TOLERANCE: f64 = 1e-6;

// =================================================================================================
// Normalization
// =================================================================================================

/// MTR normalization formula, applied to corresponding label/reference
/// samples `Zl`/`Zr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Plain asymmetry: `Zr − Zl` (Eq. 7).
    Asym,
    /// Reference-normalized: `(Zr − Zl) / Zr` (Eq. 8).
    NormRef,
    /// Proton-concentration-corrected: `(Zr − Zl) / (Zr − Zl + Zl·Zr)`
    /// (Eq. 9).
    Pcm,
    /// Inverse-spectrum (relaxation-compensated): `1/Zl − 1/Zr` (Eq. 10).
    Rex,
}

impl Normalization {
    /// Name identifier, matching the `FromStr` spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Asym => "asym",
            Self::NormRef => "normref",
            Self::Pcm => "pcm",
            Self::Rex => "rex",
        }
    }

    /// Apply the formula to one label/reference pair.
    fn apply(&self, z_label: f64, z_reference: f64) -> f64 {
        match self {
            Self::Asym => z_reference - z_label,
            Self::NormRef => (z_reference - z_label) / z_reference,
            Self::Pcm => {
                (z_reference - z_label)
                    / (z_reference - z_label + z_label * z_reference)
            }
            Self::Rex => 1.0 / z_label - 1.0 / z_reference,
        }
    }
}

impl FromStr for Normalization {
    type Err = SimulationError;

    /// Case-insensitive parse of `asym`, `normref`, `pcm`, `rex`.
    fn from_str(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "asym" => Ok(Self::Asym),
            "normref" => Ok(Self::NormRef),
            "pcm" => Ok(Self::Pcm),
            "rex" => Ok(Self::Rex),
            other => Err(SimulationError::InvalidArgument(format!(
                "unknown normalization: {other}"
            ))),
        }
    }
}

// =================================================================================================
// Axis splitting
// =================================================================================================

/// Index maps of the two spectrum halves: `label[i]` and `reference[i]`
/// address the same absolute offset.
struct AxisSplit {
    label: Vec<usize>,
    reference: Vec<usize>,
}

/// Split a ppm axis at 0 into label (ppm ≥ 0) and reference (ppm ≤ 0,
/// reversed) index maps.
///
/// Halves of unequal length are rejected: there is no defined alignment to
/// compute a ratio over. Equal-length halves whose mirrored magnitudes
/// disagree beyond tolerance proceed with a warning: the computation is
/// well-defined but the axis violates the symmetry precondition.
fn split_axis(ppm: &[f64]) -> Result<AxisSplit> {
    let label: Vec<usize> = (0..ppm.len()).filter(|&index| ppm[index] >= 0.0).collect();
    let mut reference: Vec<usize> =
        (0..ppm.len()).filter(|&index| ppm[index] <= 0.0).collect();
    reference.reverse();

    if label.is_empty() || reference.is_empty() {
        return Err(SimulationError::InvalidArgument(
            "the ppm axis must contain both signs around 0".to_string(),
        ));
    }
    if label.len() != reference.len() {
        return Err(SimulationError::InvalidArgument(format!(
            "asymmetric ppm axis: {} label offsets vs {} reference offsets",
            label.len(),
            reference.len()
        )));
    }

    for (&label_index, &reference_index) in label.iter().zip(&reference) {
        let mismatch = (ppm[label_index] + ppm[reference_index]).abs();
        if mismatch > AXIS_MIRROR_TOLERANCE * ppm[label_index].abs().max(1.0) {
            log::warn!(
                "ppm axis is not mirror-symmetric: {} ppm pairs with {} ppm; \
                 proceeding with positional alignment",
                ppm[label_index],
                ppm[reference_index]
            );
            break;
        }
    }

    Ok(AxisSplit { label, reference })
}

/// The offsets the MTR values are aligned to: the label half of `ppm`, in
/// schedule order.
pub fn label_offsets(ppm: &[f64]) -> Result<Vec<f64>> {
    let split = split_axis(ppm)?;
    Ok(split.label.iter().map(|&index| ppm[index]).collect())
}

// =================================================================================================
// MTR computation
// =================================================================================================

/// Compute the saturation-transfer metric of one spectrum.
///
/// # Arguments
///
/// * `ppm` - The offset axis, symmetric about 0
/// * `signal` - Longitudinal signal per offset, same length as `ppm`
/// * `normalization` - The formula to apply
///
/// # Returns
///
/// One value per label-half offset (see [`label_offsets`]).
///
/// # Errors
///
/// [`SimulationError::InvalidArgument`] when the lengths differ or the
/// axis halves cannot be aligned.
pub fn mtr(ppm: &[f64], signal: &[f64], normalization: Normalization) -> Result<Vec<f64>> {
    if signal.len() != ppm.len() {
        return Err(SimulationError::InvalidArgument(format!(
            "signal length {} does not match ppm axis length {}",
            signal.len(),
            ppm.len()
        )));
    }

    let split = split_axis(ppm)?;
    Ok(split
        .label
        .iter()
        .zip(&split.reference)
        .map(|(&label_index, &reference_index)| {
            normalization.apply(signal[label_index], signal[reference_index])
        })
        .collect())
}

/// Compute a voxel-wise saturation-transfer map.
///
/// The last axis of `z_spectra` is the offset axis and must match `ppm`;
/// any leading axes are spatial. The result has the same leading axes and
/// the label half as its last axis.
///
/// # Errors
///
/// [`SimulationError::InvalidArgument`] when the offset axis does not
/// match the ppm axis, or the axis halves cannot be aligned.
pub fn mtr_volume(
    ppm: &[f64],
    z_spectra: &ArrayD<f64>,
    normalization: Normalization,
) -> Result<ArrayD<f64>> {
    if z_spectra.ndim() == 0 {
        return Err(SimulationError::InvalidArgument(
            "z-spectrum volume needs at least the offset axis".to_string(),
        ));
    }
    let offset_axis = Axis(z_spectra.ndim() - 1);
    if z_spectra.len_of(offset_axis) != ppm.len() {
        return Err(SimulationError::InvalidArgument(format!(
            "volume offset axis has {} samples, ppm axis has {}",
            z_spectra.len_of(offset_axis),
            ppm.len()
        )));
    }

    let split = split_axis(ppm)?;

    let mut result_shape = z_spectra.shape().to_vec();
    *result_shape
        .last_mut()
        .expect("volume has at least one axis") = split.label.len();
    let mut result = ArrayD::zeros(IxDyn(&result_shape));

    // Lanes pair up one-to-one: both arrays share the leading (spatial)
    // axes and iterate them in the same logical order.
    for (spectrum, mut map) in z_spectra
        .lanes(offset_axis)
        .into_iter()
        .zip(result.lanes_mut(offset_axis))
    {
        for (output_index, (&label_index, &reference_index)) in
            split.label.iter().zip(&split.reference).enumerate()
        {
            map[output_index] =
                normalization.apply(spectrum[label_index], spectrum[reference_index]);
        }
    }

    Ok(result)
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    /// Axis -2..+2 ppm in 1-ppm steps, ascending.
    fn axis() -> Vec<f64> {
        vec![-2.0, -1.0, 0.0, 1.0, 2.0]
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!("asym".parse::<Normalization>().unwrap(), Normalization::Asym);
        assert_eq!(
            "NormRef".parse::<Normalization>().unwrap(),
            Normalization::NormRef
        );
        assert_eq!("PCM".parse::<Normalization>().unwrap(), Normalization::Pcm);
        assert_eq!("rex".parse::<Normalization>().unwrap(), Normalization::Rex);
        assert!("lorentzian".parse::<Normalization>().is_err());
    }

    #[test]
    fn test_label_offsets() {
        assert_eq!(label_offsets(&axis()).unwrap(), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn test_symmetric_spectrum_gives_zero_for_all_kinds() {
        // Zl == Zr everywhere: all four formulas must agree at zero.
        let signal = vec![0.8, 0.5, 0.1, 0.5, 0.8];
        for normalization in [
            Normalization::Asym,
            Normalization::NormRef,
            Normalization::Pcm,
            Normalization::Rex,
        ] {
            let values = mtr(&axis(), &signal, normalization).unwrap();
            assert_eq!(values.len(), 3);
            for value in values {
                assert!(
                    value.abs() < 1e-12,
                    "{} not zero for {:?}",
                    value,
                    normalization
                );
            }
        }
    }

    #[test]
    fn test_asym_values() {
        // Label half (0, +1, +2) darker than reference half: positive MTR.
        let signal = vec![0.9, 0.6, 0.1, 0.4, 0.8];
        let values = mtr(&axis(), &signal, Normalization::Asym).unwrap();
        assert!((values[0] - 0.0).abs() < 1e-12);
        assert!((values[1] - (0.6 - 0.4)).abs() < 1e-12);
        assert!((values[2] - (0.9 - 0.8)).abs() < 1e-12);
    }

    #[test]
    fn test_normref_pcm_rex_formulas() {
        let z_label = 0.4;
        let z_reference = 0.6;
        let signal = vec![z_reference, 0.1, z_label];
        let ppm = vec![-1.0, 0.0, 1.0];

        let normref = mtr(&ppm, &signal, Normalization::NormRef).unwrap()[1];
        assert!((normref - (z_reference - z_label) / z_reference).abs() < 1e-12);

        let pcm = mtr(&ppm, &signal, Normalization::Pcm).unwrap()[1];
        let expected = (z_reference - z_label)
            / (z_reference - z_label + z_label * z_reference);
        assert!((pcm - expected).abs() < 1e-12);

        let rex = mtr(&ppm, &signal, Normalization::Rex).unwrap()[1];
        assert!((rex - (1.0 / z_label - 1.0 / z_reference)).abs() < 1e-12);
    }

    #[test]
    fn test_unbalanced_axis_is_rejected() {
        let ppm = vec![-1.0, 0.0, 1.0, 2.0];
        let signal = vec![0.5; 4];
        assert!(matches!(
            mtr(&ppm, &signal, Normalization::Asym),
            Err(SimulationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_single_sign_axis_is_rejected() {
        let ppm = vec![1.0, 2.0, 3.0];
        let signal = vec![0.5; 3];
        assert!(mtr(&ppm, &signal, Normalization::Asym).is_err());
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        assert!(mtr(&axis(), &[0.5; 4], Normalization::Asym).is_err());
    }

    #[test]
    fn test_volume_matches_per_voxel_mtr() {
        let ppm = axis();
        let voxel_a = vec![0.9, 0.6, 0.1, 0.4, 0.8];
        let voxel_b = vec![0.7, 0.5, 0.2, 0.5, 0.7];

        let mut volume = Array2::zeros((2, 5));
        volume.row_mut(0).assign(&ndarray::arr1(&voxel_a));
        volume.row_mut(1).assign(&ndarray::arr1(&voxel_b));
        let volume = volume.into_dyn();

        let map = mtr_volume(&ppm, &volume, Normalization::Asym).unwrap();
        assert_eq!(map.shape(), &[2, 3]);

        let expected_a = mtr(&ppm, &voxel_a, Normalization::Asym).unwrap();
        let expected_b = mtr(&ppm, &voxel_b, Normalization::Asym).unwrap();
        for index in 0..3 {
            assert!((map[[0, index]] - expected_a[index]).abs() < 1e-12);
            assert!((map[[1, index]] - expected_b[index]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_volume_rejects_mismatched_offset_axis() {
        let volume = Array2::<f64>::zeros((2, 4)).into_dyn();
        assert!(mtr_volume(&axis(), &volume, Normalization::Asym).is_err());
    }
}
