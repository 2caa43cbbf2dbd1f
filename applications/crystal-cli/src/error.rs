/// Harness error types
use crystal_audio::AudioError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("Channel {channel} out of range (file has {channels} channels)")]
    ChannelOutOfRange { channel: u16, channels: u16 },

    #[error("Slice {start}..{end} out of range (signal has {len} samples)")]
    SliceOutOfRange { start: usize, end: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for CliError {
    fn from(err: config::ConfigError) -> Self {
        CliError::Config(err.to_string())
    }
}
