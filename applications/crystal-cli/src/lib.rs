//! Crystalizer evaluation harness
//!
//! Reads WAV files, runs them through the crystalizer block by block and
//! reports peak / RMS / crest factor before and after.
//!
//! This library exposes the harness components for testing purposes.

pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod wav;

// Re-export commonly used types for convenience
pub use config::{AnalysisSettings, CrystalConfig, ShaperMode, ShaperSettings};
pub use error::{CliError, Result};
pub use report::MetricsReport;
pub use runner::{analyze_file, process_file, run_stream, ProcessSummary};
