/// Crystalizer - transient shaper evaluation tool
use clap::{Args, Parser, Subcommand};
use crystal_cli::{analyze_file, process_file, CrystalConfig, ShaperMode};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "crystalizer")]
#[command(about = "Crystalizer transient shaper: analyze and process WAV files", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./crystalizer.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shape a slice of a file and print before/after metrics
    Analyze {
        /// WAV file to analyze
        input: PathBuf,

        /// First sample of the slice
        #[arg(long)]
        start: Option<usize>,

        /// Number of samples in the slice
        #[arg(long)]
        len: Option<usize>,

        #[command(flatten)]
        shaper: ShaperArgs,

        /// Print metrics as JSON
        #[arg(long)]
        json: bool,
    },
    /// Shape a whole file and write the result as mono WAV
    Process {
        /// Source WAV file
        input: PathBuf,

        /// Destination WAV file
        output: PathBuf,

        #[command(flatten)]
        shaper: ShaperArgs,
    },
}

/// Overrides for the configured shaper settings
#[derive(Args)]
struct ShaperArgs {
    /// Shaping intensity (0.0 - 40.0)
    #[arg(short, long)]
    intensity: Option<f32>,

    /// Shaper flavor
    #[arg(long, value_enum)]
    mode: Option<ShaperMode>,

    /// Samples per processing block
    #[arg(long)]
    block_size: Option<usize>,

    /// Channel to read from multi-channel files
    #[arg(long)]
    channel: Option<u16>,
}

impl ShaperArgs {
    fn apply(&self, config: &mut CrystalConfig) {
        if let Some(intensity) = self.intensity {
            config.shaper.intensity = intensity;
        }
        if let Some(mode) = self.mode {
            config.shaper.mode = mode;
        }
        if let Some(block_size) = self.block_size {
            config.shaper.block_size = block_size;
        }
        if let Some(channel) = self.channel {
            config.analysis.channel = channel;
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "crystalizer=info,crystal_cli=info,crystal_audio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = CrystalConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            input,
            start,
            len,
            shaper,
            json,
        } => {
            shaper.apply(&mut config);
            if let Some(start) = start {
                config.analysis.slice_start = start;
            }
            if let Some(len) = len {
                config.analysis.slice_len = len;
            }
            config.validate()?;

            let report = analyze_file(&input, &config.analysis, &config.shaper)?;

            if json {
                println!("{}", report.to_json()?);
            } else {
                println!("{}", report);
            }
        }
        Commands::Process {
            input,
            output,
            shaper,
        } => {
            shaper.apply(&mut config);
            config.validate()?;

            let summary = process_file(&input, &output, config.analysis.channel, &config.shaper)?;

            tracing::info!(
                "Wrote {} samples at {} Hz ({} clamped)",
                summary.samples,
                summary.sample_rate,
                summary.clipped
            );
            if let Some(report) = summary.report {
                println!("{}", report);
            }
        }
    }

    Ok(())
}
