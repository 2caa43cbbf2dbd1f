//! Signal metrics
//!
//! Block summaries used to judge what the crystalizer did to a signal:
//! - Peak: largest absolute sample value
//! - RMS: root mean square level
//! - Crest factor: peak-to-RMS ratio in dB
//!
//! Accumulation is done in `f64`; integer PCM cast to `f32` squares well past
//! the range where `f32` sums stay exact. None of these functions return NaN
//! or infinity: empty, silent and non-finite blocks are reported as errors.

use crate::error::{AudioError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Summary of one sample block
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalMetrics {
    /// Largest absolute sample value
    pub peak: f64,
    /// Root mean square level
    pub rms: f64,
    /// `20 * log10(peak / rms)`
    pub crest_factor_db: f64,
}

impl SignalMetrics {
    /// Compute all three metrics in one pass
    ///
    /// # Errors
    /// `EmptyInput`, `NonFiniteSample` or `DegenerateSignal` (silent block).
    pub fn analyze(block: &[f32]) -> Result<Self> {
        let (peak, sum_squares) = accumulate(block)?;
        let rms = (sum_squares / block.len() as f64).sqrt();
        let crest_factor_db = crest_from(peak, rms)?;

        Ok(Self {
            peak,
            rms,
            crest_factor_db,
        })
    }
}

impl fmt::Display for SignalMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Peak: {:.4}, RMS: {:.4}, Crest factor: {:.2} dB",
            self.peak, self.rms, self.crest_factor_db
        )
    }
}

/// Largest absolute sample value
pub fn peak(block: &[f32]) -> Result<f64> {
    accumulate(block).map(|(peak, _)| peak)
}

/// Root mean square level
pub fn rms(block: &[f32]) -> Result<f64> {
    let (_, sum_squares) = accumulate(block)?;
    Ok((sum_squares / block.len() as f64).sqrt())
}

/// Peak-to-RMS ratio in dB
pub fn crest_factor_db(block: &[f32]) -> Result<f64> {
    SignalMetrics::analyze(block).map(|m| m.crest_factor_db)
}

/// Peak and sum of squares, rejecting empty and non-finite blocks
fn accumulate(block: &[f32]) -> Result<(f64, f64)> {
    if block.is_empty() {
        return Err(AudioError::EmptyInput);
    }

    let mut peak = 0.0f64;
    let mut sum_squares = 0.0f64;

    for (index, &sample) in block.iter().enumerate() {
        if !sample.is_finite() {
            return Err(AudioError::NonFiniteSample { index });
        }
        let sample = f64::from(sample);
        peak = peak.max(sample.abs());
        sum_squares += sample * sample;
    }

    Ok((peak, sum_squares))
}

fn crest_from(peak: f64, rms: f64) -> Result<f64> {
    if peak == 0.0 || rms == 0.0 {
        return Err(AudioError::DegenerateSignal { peak, rms });
    }
    Ok(20.0 * (peak / rms).log10())
}
