//! Transient shaping effects
//!
//! All effects process mono `f32` blocks of one stream, in time order, and
//! implement [`AudioEffect`]. Each channel or stream needs its own instance.
//!
//! Available effects:
//! - **Crystalizer**: zero-latency shaper; approximates the right-hand
//!   neighbor of each block's last sample
//! - **LookaheadCrystalizer**: one sample of latency, exact across block
//!   boundaries

mod crystalizer;
mod effect;
mod lookahead;

pub use crystalizer::{
    crystalize_block, validate_intensity, Crystalizer, DEFAULT_INTENSITY, MAX_INTENSITY,
};
pub use effect::AudioEffect;
pub use lookahead::LookaheadCrystalizer;
