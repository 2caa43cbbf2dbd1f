/// Harness configuration
use crate::error::{CliError, Result};
use crystal_audio::effects::validate_intensity;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File picked up from the working directory when no `--config` is given
pub const DEFAULT_CONFIG_FILE: &str = "crystalizer.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrystalConfig {
    #[serde(default = "default_shaper")]
    pub shaper: ShaperSettings,

    #[serde(default = "default_analysis")]
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ShaperSettings {
    #[serde(default = "default_intensity")]
    pub intensity: f32,

    #[serde(default)]
    pub mode: ShaperMode,

    /// Samples handed to the shaper per call
    #[serde(default = "default_block_size")]
    pub block_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisSettings {
    /// First sample of the analyzed slice
    #[serde(default = "default_slice_start")]
    pub slice_start: usize,

    #[serde(default = "default_slice_len")]
    pub slice_len: usize,

    /// Channel taken from multi-channel files
    #[serde(default)]
    pub channel: u16,
}

/// Which crystalizer flavor the runner uses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ShaperMode {
    /// One sample of latency, exact across block boundaries
    #[default]
    Lookahead,
    /// Zero latency, approximates each block's last sample
    BlockLocal,
}

impl CrystalConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `crystalizer.toml` in the
    /// working directory is used when present. Environment variables
    /// prefixed with `CRYSTAL_` override file values, with `__` between
    /// section and key (`CRYSTAL_SHAPER__INTENSITY=2.5`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("CRYSTAL")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = settings.build()?.try_deserialize()?;
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        validate_intensity(self.shaper.intensity)?;

        if self.shaper.block_size == 0 {
            return Err(CliError::Config(
                "shaper.block_size must be at least 1".to_string(),
            ));
        }

        if self.analysis.slice_len == 0 {
            return Err(CliError::Config(
                "analysis.slice_len must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

// Default values
fn default_shaper() -> ShaperSettings {
    ShaperSettings {
        intensity: default_intensity(),
        mode: ShaperMode::default(),
        block_size: default_block_size(),
    }
}

fn default_intensity() -> f32 {
    4.0
}

fn default_block_size() -> usize {
    512
}

fn default_analysis() -> AnalysisSettings {
    AnalysisSettings {
        slice_start: default_slice_start(),
        slice_len: default_slice_len(),
        channel: 0,
    }
}

fn default_slice_start() -> usize {
    14000
}

fn default_slice_len() -> usize {
    1000
}

impl Default for CrystalConfig {
    fn default() -> Self {
        Self {
            shaper: default_shaper(),
            analysis: default_analysis(),
        }
    }
}

impl Default for ShaperSettings {
    fn default() -> Self {
        default_shaper()
    }
}
