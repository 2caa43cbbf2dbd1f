/// Crystalizer transient shaper
///
/// Pushes every sample further away from the line between its two neighbors,
/// which exaggerates attacks and other fast amplitude changes. For a sample
/// `v` with neighbors `prev` and `next`:
///
/// ```text
/// v1  = v + (v - prev) * intensity
/// v2  = v + (v - next) * intensity
/// out = 0.5 * (v1 + v2)
/// ```
///
/// Deltas are always taken against the unshaped input. This module contains
/// the block-local flavor: the last sample of a block has no right-hand
/// neighbor yet, so it mirrors the backward delta instead. See
/// [`LookaheadCrystalizer`](super::LookaheadCrystalizer) for the variant that
/// waits for the next block.
use super::AudioEffect;
use crate::error::{AudioError, Result};

/// Upper bound for the intensity parameter
pub const MAX_INTENSITY: f32 = 40.0;

/// Intensity used by [`Crystalizer::default`]
pub const DEFAULT_INTENSITY: f32 = 1.0;

/// Check that `intensity` is usable
///
/// Negative values would invert the effect, so they are rejected rather than
/// clamped.
pub fn validate_intensity(intensity: f32) -> Result<f32> {
    if intensity.is_finite() && (0.0..=MAX_INTENSITY).contains(&intensity) {
        Ok(intensity)
    } else {
        Err(AudioError::InvalidIntensity(intensity))
    }
}

/// Shape one sample from its two neighbors
///
/// Both deltas are summed into one curvature term in `f64`, so no finite
/// input overflows and zero intensity returns `v` bit for bit.
#[inline]
pub(crate) fn shape(prev: f32, v: f32, next: f32, intensity: f32) -> f32 {
    let (prev, v, next) = (f64::from(prev), f64::from(v), f64::from(next));
    let curvature = (v - prev) + (v - next);
    (v + 0.5 * f64::from(intensity) * curvature) as f32
}

/// Shape a sample whose right-hand neighbor is unknown
///
/// The forward delta reuses the backward one with the sign flipped, so the
/// two deltas cancel and the sample passes through.
#[inline]
pub(crate) fn shape_edge(prev: f32, v: f32, intensity: f32) -> f32 {
    let (prev, v) = (f64::from(prev), f64::from(v));
    let curvature = (v - prev) + (prev - v);
    (v + 0.5 * f64::from(intensity) * curvature) as f32
}

/// Shape one block
///
/// `state` is the last input sample of the previous block, or `None` for the
/// first block of a stream (the block's own first sample is used, giving a
/// zero backward delta). Returns the state to pass with the next block. An
/// empty block leaves the state untouched.
///
/// # Errors
/// `LengthMismatch` if `output` is not exactly as long as `input`; `output`
/// is left untouched.
pub fn crystalize_block(
    input: &[f32],
    output: &mut [f32],
    state: Option<f32>,
    intensity: f32,
) -> Result<Option<f32>> {
    if input.len() != output.len() {
        return Err(AudioError::LengthMismatch {
            input: input.len(),
            output: output.len(),
        });
    }

    let Some(&first) = input.first() else {
        return Ok(state);
    };

    let mut prev = state.unwrap_or(first);
    let last = input.len() - 1;

    for (n, &v) in input.iter().enumerate() {
        output[n] = if n < last {
            shape(prev, v, input[n + 1], intensity)
        } else {
            shape_edge(prev, v, intensity)
        };
        prev = v;
    }

    Ok(Some(prev))
}

/// Block-local crystalizer effect
///
/// # Real-Time Safety
/// - No allocations in `process()`
/// - Zero latency
pub struct Crystalizer {
    intensity: f32,
    /// Last unshaped sample of the previous block
    last: Option<f32>,
    enabled: bool,
}

impl Crystalizer {
    /// Create a crystalizer with the given intensity
    pub fn new(intensity: f32) -> Result<Self> {
        let intensity = validate_intensity(intensity)?;
        tracing::debug!(intensity, "Created block-local crystalizer");

        Ok(Self {
            intensity,
            last: None,
            enabled: true,
        })
    }

    /// Current intensity
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Change the intensity (takes effect on the next block)
    pub fn set_intensity(&mut self, intensity: f32) -> Result<()> {
        self.intensity = validate_intensity(intensity)?;
        Ok(())
    }

    /// Carry-over state: last input sample seen, if any
    pub fn last_sample(&self) -> Option<f32> {
        self.last
    }

    /// Shape `input` into `output`
    pub fn process_into(&mut self, input: &[f32], output: &mut [f32]) -> Result<()> {
        if input.len() != output.len() {
            return Err(AudioError::LengthMismatch {
                input: input.len(),
                output: output.len(),
            });
        }

        if self.enabled {
            self.last = crystalize_block(input, output, self.last, self.intensity)?;
        } else {
            output.copy_from_slice(input);
            if let Some(&v) = input.last() {
                self.last = Some(v);
            }
        }

        Ok(())
    }

    /// Shape a block into a freshly allocated vector
    pub fn process_block(&mut self, block: &[f32]) -> Vec<f32> {
        let mut output = block.to_vec();
        self.process(&mut output, 0);
        output
    }
}

impl Default for Crystalizer {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
            last: None,
            enabled: true,
        }
    }
}

impl AudioEffect for Crystalizer {
    fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
        let Some(&last_input) = buffer.last() else {
            return;
        };

        if !self.enabled {
            self.last = Some(last_input);
            return;
        }

        let mut prev = self.last.unwrap_or(buffer[0]);
        let last = buffer.len() - 1;

        for n in 0..last {
            let v = buffer[n];
            buffer[n] = shape(prev, v, buffer[n + 1], self.intensity);
            prev = v;
        }
        buffer[last] = shape_edge(prev, last_input, self.intensity);

        self.last = Some(last_input);
    }

    fn reset(&mut self) {
        self.last = None;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &str {
        "Crystalizer"
    }
}
