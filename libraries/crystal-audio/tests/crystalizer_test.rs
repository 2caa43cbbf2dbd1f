//! Crystalizer behavior tests
//!
//! End-to-end checks of the shapers against known signals, judged with the
//! crate's own metrics.

use crystal_audio::effects::{AudioEffect, Crystalizer, LookaheadCrystalizer};
use crystal_audio::{AudioError, SignalMetrics};
use std::f32::consts::PI;
use std::time::Duration;

const SAMPLE_RATE: u32 = 48000;

// ============================================================================
// TEST UTILITIES
// ============================================================================

fn generate_sine(frequency: f32, amplitude: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| amplitude * (2.0 * PI * frequency * i as f32 / SAMPLE_RATE as f32).sin())
        .collect()
}

/// Quiet sine with a click every `spacing` samples
fn generate_clicks_on_sine(num_samples: usize, spacing: usize) -> Vec<f32> {
    let mut signal = generate_sine(100.0, 0.3, num_samples);
    for sample in signal.iter_mut().step_by(spacing).skip(1) {
        *sample += 0.5;
    }
    signal
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn test_curvature_is_amplified() {
    let input = [0.0, 10.0, 0.0, -10.0, 0.0];
    let mut crystalizer = Crystalizer::new(1.0).unwrap();

    let output = crystalizer.process_block(&input);

    assert_eq!(output.len(), input.len());
    assert!(output[1].abs() > input[1].abs());
    assert!(output[3].abs() > input[3].abs());
    assert_eq!(crystalizer.last_sample(), Some(0.0));
}

#[test]
fn test_clicks_raise_crest_factor() {
    let original = generate_clicks_on_sine(4800, 480);
    let mut crystalizer = Crystalizer::new(4.0).unwrap();

    let processed = crystalizer.process_block(&original);

    let before = SignalMetrics::analyze(&original).unwrap();
    let after = SignalMetrics::analyze(&processed).unwrap();

    assert!(after.peak > before.peak);
    assert!(
        after.crest_factor_db > before.crest_factor_db,
        "crest factor should grow: {} -> {}",
        before.crest_factor_db,
        after.crest_factor_db
    );
}

#[test]
fn test_slow_sine_is_nearly_untouched() {
    // Curvature of a 50 Hz sine at 48 kHz is tiny
    let original = generate_sine(50.0, 0.8, 4800);
    let processed = Crystalizer::new(1.0).unwrap().process_block(&original);

    // The first sample only sees its forward delta
    let max_diff = original
        .iter()
        .zip(&processed)
        .skip(1)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);

    assert!(max_diff < 0.001, "max diff {}", max_diff);
}

#[test]
fn test_silent_block_is_degenerate() {
    let silence = [0.0f32; 5];
    let processed = Crystalizer::new(4.0).unwrap().process_block(&silence);

    assert_eq!(processed, silence);
    assert!(matches!(
        SignalMetrics::analyze(&processed),
        Err(AudioError::DegenerateSignal { .. })
    ));
}

// ============================================================================
// STREAMING
// ============================================================================

#[test]
fn test_lookahead_boundary_is_exact() {
    let signal = generate_clicks_on_sine(1000, 97);
    let one_shot = Crystalizer::new(4.0).unwrap().process_block(&signal);

    let mut lookahead = LookaheadCrystalizer::new(4.0).unwrap();
    let mut streamed = Vec::with_capacity(signal.len() + 1);
    for block in signal.chunks(128) {
        let mut buffer = block.to_vec();
        lookahead.process(&mut buffer, SAMPLE_RATE);
        streamed.extend_from_slice(&buffer);
    }
    streamed.extend(lookahead.finish());

    assert_eq!(streamed[0], 0.0);
    assert_eq!(&streamed[1..], one_shot.as_slice());
}

#[test]
fn test_block_local_boundary_uses_approximation() {
    let signal = generate_clicks_on_sine(256, 97);
    let one_shot = Crystalizer::new(4.0).unwrap().process_block(&signal);

    let mut crystalizer = Crystalizer::new(4.0).unwrap();
    let mut buffer = signal.clone();
    for block in buffer.chunks_mut(128) {
        crystalizer.process(block, SAMPLE_RATE);
    }

    let differing: Vec<usize> = (0..signal.len())
        .filter(|&n| buffer[n] != one_shot[n])
        .collect();

    assert!(differing.iter().all(|&n| n == 127), "{:?}", differing);
}

#[test]
fn test_independent_instances_per_stream() {
    let left = generate_sine(440.0, 0.5, 256);
    let right = generate_clicks_on_sine(256, 64);

    let mut left_fx = LookaheadCrystalizer::new(2.0).unwrap();
    let mut right_fx = LookaheadCrystalizer::new(2.0).unwrap();

    let mut left_buf = left.clone();
    let mut right_buf = right;
    for (l, r) in left_buf.chunks_mut(64).zip(right_buf.chunks_mut(64)) {
        left_fx.process(l, SAMPLE_RATE);
        right_fx.process(r, SAMPLE_RATE);
    }

    let mut solo = LookaheadCrystalizer::new(2.0).unwrap();
    let mut solo_buf = left;
    solo.process(&mut solo_buf, SAMPLE_RATE);

    assert_eq!(left_buf, solo_buf);
}

#[test]
fn test_reported_latency() {
    let block_local = Crystalizer::new(1.0).unwrap();
    let lookahead = LookaheadCrystalizer::new(1.0).unwrap();

    assert_eq!(block_local.latency(SAMPLE_RATE), Duration::ZERO);
    assert_eq!(lookahead.latency_samples(), 1);
    assert!(lookahead.latency(SAMPLE_RATE) > Duration::from_micros(20));
    assert!(lookahead.latency(SAMPLE_RATE) < Duration::from_micros(21));
}

#[test]
fn test_effects_are_object_safe() {
    let mut effects: Vec<Box<dyn AudioEffect>> = vec![
        Box::new(Crystalizer::new(1.0).unwrap()),
        Box::new(LookaheadCrystalizer::new(1.0).unwrap()),
    ];

    let mut buffer = vec![0.25f32; 32];
    for effect in &mut effects {
        effect.process(&mut buffer, SAMPLE_RATE);
        effect.reset();
    }

    assert_eq!(effects[0].name(), "Crystalizer");
    assert_eq!(effects[1].name(), "Lookahead Crystalizer");
    assert!(buffer.iter().all(|s| s.is_finite()));
}
