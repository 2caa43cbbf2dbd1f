//! WAV input and output
//!
//! Integer PCM is cast to `f32` without rescaling, so a 16-bit file yields
//! samples in `-32768.0..=32767.0`. Writing reverses the cast, rounding and
//! clamping to the target bit depth.

use crate::error::{CliError, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;
use tracing::{debug, warn};

/// One channel of a WAV file
#[derive(Debug, Clone)]
pub struct WavSignal {
    pub samples: Vec<f32>,
    /// Spec of the source file (channel count included)
    pub spec: WavSpec,
}

impl WavSignal {
    pub fn sample_rate(&self) -> u32 {
        self.spec.sample_rate
    }
}

/// Read `channel` from the WAV file at `path`
pub fn read_channel(path: &Path, channel: u16) -> Result<WavSignal> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    if channel >= spec.channels {
        return Err(CliError::ChannelOutOfRange {
            channel,
            channels: spec.channels,
        });
    }

    let stride = usize::from(spec.channels);
    let offset = usize::from(channel);

    let samples = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .skip(offset)
            .step_by(stride)
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => reader
            .samples::<i32>()
            .skip(offset)
            .step_by(stride)
            .map(|s| s.map(|s| s as f32))
            .collect::<std::result::Result<Vec<_>, _>>()?,
    };

    debug!(
        "Read {} samples from {:?} (channel {} of {}, {} Hz, {:?} {} bit)",
        samples.len(),
        path,
        channel,
        spec.channels,
        spec.sample_rate,
        spec.sample_format,
        spec.bits_per_sample
    );

    Ok(WavSignal { samples, spec })
}

/// Write `samples` as a mono WAV with the sample rate and format of `like`
///
/// Returns the number of integer samples that had to be clamped.
pub fn write_mono(path: &Path, samples: &[f32], like: &WavSpec) -> Result<usize> {
    let spec = WavSpec {
        channels: 1,
        ..*like
    };
    let mut writer = WavWriter::create(path, spec)?;
    let mut clipped = 0;

    match spec.sample_format {
        SampleFormat::Float => {
            for &sample in samples {
                writer.write_sample(sample)?;
            }
        }
        SampleFormat::Int => {
            let max = ((1i64 << (spec.bits_per_sample - 1)) - 1) as f32;
            let min = -((1i64 << (spec.bits_per_sample - 1)) as f32);

            for &sample in samples {
                let rounded = sample.round();
                if rounded > max || rounded < min {
                    clipped += 1;
                }
                writer.write_sample(rounded.clamp(min, max) as i32)?;
            }
        }
    }

    writer.finalize()?;

    if clipped > 0 {
        warn!("Clamped {} samples to {}-bit range", clipped, spec.bits_per_sample);
    }
    debug!("Wrote {} samples to {:?}", samples.len(), path);

    Ok(clipped)
}
