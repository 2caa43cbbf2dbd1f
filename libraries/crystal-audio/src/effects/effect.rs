/// Common interface for block-based effects
///
/// The host hands every effect consecutive mono blocks of one stream, in time
/// order. An effect keeps whatever carry-over state it needs between calls.
use std::time::Duration;

/// Trait for block-processing audio effects
///
/// # Safety
/// - Must NOT allocate memory in `process()` (real-time constraint)
/// - Must be Send to allow moving the effect onto an audio thread
pub trait AudioEffect: Send {
    /// Process a mono block in-place
    ///
    /// # Arguments
    /// * `buffer` - Consecutive samples of one stream
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Real-Time Constraints
    /// - No allocations
    /// - No blocking operations
    /// - O(buffer length)
    fn process(&mut self, buffer: &mut [f32], sample_rate: u32);

    /// Forget all carry-over state (start of a new stream)
    fn reset(&mut self);

    /// Enable/disable the effect
    fn set_enabled(&mut self, enabled: bool);

    /// Check if effect is enabled
    fn is_enabled(&self) -> bool;

    /// Get effect name (for debugging)
    fn name(&self) -> &str;

    /// Number of samples by which the output trails the input
    fn latency_samples(&self) -> usize {
        0
    }

    /// Output delay expressed as wall-clock time at `sample_rate`
    fn latency(&self, sample_rate: u32) -> Duration {
        if sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.latency_samples() as f64 / f64::from(sample_rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Mock effect for testing the provided methods
    struct Delay {
        samples: usize,
    }

    impl AudioEffect for Delay {
        fn process(&mut self, _buffer: &mut [f32], _sample_rate: u32) {}

        fn reset(&mut self) {}

        fn set_enabled(&mut self, _enabled: bool) {}

        fn is_enabled(&self) -> bool {
            true
        }

        fn name(&self) -> &str {
            "Delay"
        }

        fn latency_samples(&self) -> usize {
            self.samples
        }
    }

    #[test]
    fn latency_in_seconds() {
        let delay = Delay { samples: 480 };
        assert_eq!(delay.latency(48000), Duration::from_millis(10));
    }

    #[test]
    fn zero_sample_rate_has_no_latency() {
        let delay = Delay { samples: 1 };
        assert_eq!(delay.latency(0), Duration::ZERO);
    }
}
