//! Pulse envelope value type and the pulse-train compositor

use nalgebra::DVector;

use crate::error::{Result, SimulationError};

// =================================================================================================
// PulseEnvelope
// =================================================================================================

/// Dimensionless RF amplitude envelope with unit integral.
///
/// The samples of an envelope always sum to exactly 1, whatever shape
/// generated them. This is the "unit saturation integral" contract: scaling
/// the envelope with [`PulseEnvelope::amplitudes`] yields a per-step rad/s
/// amplitude sequence whose integrated effect equals a continuous-wave
/// pulse of the same nominal amplitude over the same support.
///
/// Constructed once per simulation run from a shape generator
/// ([`shapes`](crate::pulses::shapes)) or from [`train`]; read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct PulseEnvelope {
    samples: DVector<f64>,
}

impl PulseEnvelope {
    /// Normalize raw samples to unit sum.
    ///
    /// # Errors
    ///
    /// [`SimulationError::InvalidArgument`] when the samples are empty, or
    /// their sum is zero or non-finite (no unit-integral normalization
    /// exists).
    pub(crate) fn normalized(samples: DVector<f64>) -> Result<Self> {
        if samples.is_empty() {
            return Err(SimulationError::InvalidArgument(
                "a pulse envelope needs at least 1 sample".to_string(),
            ));
        }
        let sum = samples.sum();
        if !sum.is_finite() || sum == 0.0 {
            return Err(SimulationError::InvalidArgument(format!(
                "pulse samples sum to {sum}; cannot normalize to unit integral"
            )));
        }
        Ok(Self {
            samples: samples / sum,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// An envelope is never empty; kept for API completeness.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The normalized samples.
    pub fn samples(&self) -> &DVector<f64> {
        &self.samples
    }

    /// One sample.
    pub fn sample(&self, index: usize) -> f64 {
        self.samples[index]
    }

    /// Sum of the samples. Always 1 within floating-point rounding.
    pub fn integral(&self) -> f64 {
        self.samples.sum()
    }

    /// Instantaneous amplitude sequence \[rad/s\] equivalent in integrated
    /// effect to a continuous-wave pulse of amplitude `w1` \[rad/s\] over
    /// the full support (gaps included): `samples · w1 · S` for `S` samples.
    pub fn amplitudes(&self, w1: f64) -> DVector<f64> {
        &self.samples * (w1 * self.samples.len() as f64)
    }
}

// =================================================================================================
// Pulse train
// =================================================================================================

/// Concatenate `count` copies of `pulse` separated by `gap_steps`
/// zero-amplitude samples, renormalized to unit integral.
///
/// The result has `count·len(pulse) + (count−1)·gap_steps` samples; with
/// `count == 1` the gap is unused and the result equals `pulse`.
///
/// # Errors
///
/// [`SimulationError::InvalidArgument`] when `count < 1`.
pub fn train(pulse: &PulseEnvelope, count: usize, gap_steps: usize) -> Result<PulseEnvelope> {
    if count < 1 {
        return Err(SimulationError::InvalidArgument(format!(
            "a pulse train needs at least 1 pulse, got {count}"
        )));
    }

    let pulse_steps = pulse.len();
    let mut samples = DVector::zeros(count * pulse_steps + (count - 1) * gap_steps);

    let mut begin = 0;
    for repetition in 0..count {
        samples
            .rows_mut(begin, pulse_steps)
            .copy_from(pulse.samples());
        begin += pulse_steps;
        if repetition + 1 < count {
            // Gap samples stay at zero amplitude.
            begin += gap_steps;
        }
    }

    PulseEnvelope::normalized(samples)
}

// =================================================================================================
// Tests
// =================================================================================================
