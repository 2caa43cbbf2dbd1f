/// Crystalizer with cross-block look-ahead
///
/// Shaping a sample needs its right-hand neighbor, and for the last sample of
/// a block that neighbor only arrives with the next block. This variant holds
/// the newest sample back until its neighbor is known, so every output slot
/// carries the shaped value of the sample one position earlier. The cost is
/// one sample of latency; the gain is output that does not depend on how the
/// stream was cut into blocks.
///
/// The mirrored-delta approximation is used only once, in [`finish`], for
/// the final sample of the stream.
///
/// [`finish`]: LookaheadCrystalizer::finish
use super::crystalizer::{shape, shape_edge, validate_intensity, DEFAULT_INTENSITY};
use super::AudioEffect;
use crate::error::Result;

/// Look-ahead crystalizer effect
///
/// # Real-Time Safety
/// - No allocations in `process()`
/// - One sample of latency
pub struct LookaheadCrystalizer {
    intensity: f32,
    /// Unshaped left-hand neighbor of `held`
    prev: Option<f32>,
    /// Newest input sample, waiting for its right-hand neighbor
    held: Option<f32>,
    enabled: bool,
}

impl LookaheadCrystalizer {
    /// Create a look-ahead crystalizer with the given intensity
    pub fn new(intensity: f32) -> Result<Self> {
        let intensity = validate_intensity(intensity)?;
        tracing::debug!(intensity, "Created look-ahead crystalizer");

        Ok(Self {
            intensity,
            prev: None,
            held: None,
            enabled: true,
        })
    }

    /// Current intensity
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// Change the intensity (applies to every sample emitted afterwards)
    pub fn set_intensity(&mut self, intensity: f32) -> Result<()> {
        self.intensity = validate_intensity(intensity)?;
        Ok(())
    }

    /// Carry-over state: last input sample seen, if any
    ///
    /// This sample has not been emitted yet; it waits for its right-hand
    /// neighbor or for [`finish`](Self::finish).
    pub fn last_sample(&self) -> Option<f32> {
        self.held
    }

    /// End the stream and emit the held-back sample
    ///
    /// The held sample has no right-hand neighbor, so its forward delta
    /// mirrors the backward one. Returns `None` when nothing is held. The
    /// effect is ready for a new stream afterwards.
    pub fn finish(&mut self) -> Option<f32> {
        let v = self.held.take()?;
        let prev = self.prev.take().unwrap_or(v);

        tracing::trace!("Flushed look-ahead crystalizer");

        if self.enabled {
            Some(shape_edge(prev, v, self.intensity))
        } else {
            Some(v)
        }
    }
}

impl Default for LookaheadCrystalizer {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
            prev: None,
            held: None,
            enabled: true,
        }
    }
}

impl AudioEffect for LookaheadCrystalizer {
    /// Emits the shaped value of the previous input sample in every slot.
    /// The very first slot of a stream has nothing to emit and gets `0.0`.
    fn process(&mut self, buffer: &mut [f32], _sample_rate: u32) {
        for slot in buffer.iter_mut() {
            let next = *slot;

            *slot = match self.held {
                Some(v) => {
                    let prev = self.prev.unwrap_or(v);
                    self.prev = Some(v);

                    if self.enabled {
                        shape(prev, v, next, self.intensity)
                    } else {
                        v
                    }
                }
                None => 0.0,
            };

            self.held = Some(next);
        }
    }

    fn reset(&mut self) {
        self.prev = None;
        self.held = None;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn name(&self) -> &str {
        "Lookahead Crystalizer"
    }

    fn latency_samples(&self) -> usize {
        1
    }
}
