//! Offline driver for the crystalizer
//!
//! Feeds a whole signal through a shaper in fixed-size blocks, the way an
//! audio callback would, and returns output aligned with the input.

use crate::config::{AnalysisSettings, ShaperMode, ShaperSettings};
use crate::error::{CliError, Result};
use crate::report::MetricsReport;
use crate::wav;
use crystal_audio::effects::{AudioEffect, Crystalizer, LookaheadCrystalizer};
use std::path::Path;
use tracing::{debug, info, warn};

/// Shape `samples` block by block
///
/// Look-ahead output is shifted back by its one sample of latency and the
/// flushed tail is appended, so the result always lines up with the input.
pub fn run_stream(samples: &[f32], settings: &ShaperSettings, sample_rate: u32) -> Result<Vec<f32>> {
    if settings.block_size == 0 {
        return Err(CliError::Config("block size must be at least 1".to_string()));
    }

    let mut output = samples.to_vec();

    match settings.mode {
        ShaperMode::BlockLocal => {
            let mut effect = Crystalizer::new(settings.intensity)?;
            for block in output.chunks_mut(settings.block_size) {
                effect.process(block, sample_rate);
            }
        }
        ShaperMode::Lookahead => {
            let mut effect = LookaheadCrystalizer::new(settings.intensity)?;
            for block in output.chunks_mut(settings.block_size) {
                effect.process(block, sample_rate);
            }

            if let Some(tail) = effect.finish() {
                output.rotate_left(1);
                if let Some(last) = output.last_mut() {
                    *last = tail;
                }
            }
        }
    }

    debug!(
        "Shaped {} samples ({:?}, intensity {}, block size {})",
        samples.len(),
        settings.mode,
        settings.intensity,
        settings.block_size
    );

    Ok(output)
}

/// Take `[start, start + len)` out of `samples`
pub fn slice(samples: &[f32], start: usize, len: usize) -> Result<&[f32]> {
    let end = start.saturating_add(len);
    samples
        .get(start..end)
        .ok_or(CliError::SliceOutOfRange {
            start,
            end,
            len: samples.len(),
        })
}

/// Shape a slice of `samples` and compare it with the original
pub fn analyze_signal(
    samples: &[f32],
    sample_rate: u32,
    analysis: &AnalysisSettings,
    shaper: &ShaperSettings,
) -> Result<MetricsReport> {
    let original = slice(samples, analysis.slice_start, analysis.slice_len)?;
    let processed = run_stream(original, shaper, sample_rate)?;
    MetricsReport::compare(original, &processed)
}

/// Read one channel of a WAV file and analyze a slice of it
pub fn analyze_file(
    path: &Path,
    analysis: &AnalysisSettings,
    shaper: &ShaperSettings,
) -> Result<MetricsReport> {
    let signal = wav::read_channel(path, analysis.channel)?;
    info!(
        "Analyzing {:?}: samples {}..{}",
        path,
        analysis.slice_start,
        analysis.slice_start.saturating_add(analysis.slice_len)
    );
    analyze_signal(&signal.samples, signal.sample_rate(), analysis, shaper)
}

/// Outcome of [`process_file`]
#[derive(Debug, Clone)]
pub struct ProcessSummary {
    pub samples: usize,
    pub sample_rate: u32,
    /// Integer samples clamped on write
    pub clipped: usize,
    /// Whole-file metrics; `None` for silent input
    pub report: Option<MetricsReport>,
}

/// Shape one channel of `input` and write it to `output` as mono
pub fn process_file(
    input: &Path,
    output: &Path,
    channel: u16,
    shaper: &ShaperSettings,
) -> Result<ProcessSummary> {
    let signal = wav::read_channel(input, channel)?;
    let processed = run_stream(&signal.samples, shaper, signal.sample_rate())?;
    let clipped = wav::write_mono(output, &processed, &signal.spec)?;

    let report = match MetricsReport::compare(&signal.samples, &processed) {
        Ok(report) => Some(report),
        Err(err) => {
            warn!("Skipping metrics for {:?}: {}", input, err);
            None
        }
    };

    info!("Processed {:?} -> {:?}", input, output);

    Ok(ProcessSummary {
        samples: processed.len(),
        sample_rate: signal.sample_rate(),
        clipped,
        report,
    })
}
