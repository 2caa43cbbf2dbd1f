/// Audio-specific errors
use thiserror::Error;

/// Result type alias using `AudioError`
pub type Result<T> = std::result::Result<T, AudioError>;

/// Audio error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AudioError {
    /// A block of length 0 was passed where samples are required
    #[error("Empty input: at least one sample is required")]
    EmptyInput,

    /// Intensity is negative, non-finite or above the supported maximum
    #[error("Invalid intensity: {0} (must be finite and within 0.0..=40.0)")]
    InvalidIntensity(f32),

    /// Crest factor requested for a block with zero peak or zero RMS
    #[error("Degenerate signal: crest factor undefined (peak {peak}, rms {rms})")]
    DegenerateSignal { peak: f64, rms: f64 },

    /// NaN or infinity found in a block handed to the metrics
    #[error("Non-finite sample at index {index}")]
    NonFiniteSample { index: usize },

    /// Input and output blocks differ in length
    #[error("Length mismatch: input has {input} samples, output has {output}")]
    LengthMismatch { input: usize, output: usize },
}
