//! Crystalizer Audio
//!
//! Transient shaping and signal metrics.
//!
//! This crate provides:
//! - A block-local crystalizer (zero latency)
//! - A look-ahead crystalizer (one sample of latency, exact across blocks)
//! - Peak / RMS / crest factor metrics for judging the result
//!
//! # Example: Shaping a Stream
//!
//! ```rust
//! use crystal_audio::effects::{AudioEffect, LookaheadCrystalizer};
//!
//! # fn example() -> crystal_audio::Result<()> {
//! let mut crystalizer = LookaheadCrystalizer::new(4.0)?;
//!
//! let mut block = vec![0.0, 0.5, -0.25, 0.1];
//! crystalizer.process(&mut block, 44100);
//!
//! // End of stream: emit the sample held back for look-ahead
//! let tail = crystalizer.finish();
//! assert!(tail.is_some());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Example: Comparing Metrics
//!
//! ```rust
//! use crystal_audio::effects::Crystalizer;
//! use crystal_audio::SignalMetrics;
//!
//! # fn example() -> crystal_audio::Result<()> {
//! let original = vec![0.1, 0.4, 0.2, -0.3, -0.1];
//! let processed = Crystalizer::new(4.0)?.process_block(&original);
//!
//! let before = SignalMetrics::analyze(&original)?;
//! let after = SignalMetrics::analyze(&processed)?;
//! assert!(after.peak > before.peak);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod effects;
mod error;
pub mod metrics;

pub use error::{AudioError, Result};
pub use metrics::SignalMetrics;
