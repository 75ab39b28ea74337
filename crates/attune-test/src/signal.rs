//! Deterministic audio signal generators
//!
//! Speech surrogates for driving the voice pipeline in tests and benches.
//! The named chunks are tuned so that, fed repeatedly, the smoothed features
//! land squarely inside one classifier band.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Sample rate used throughout the harness.
pub const SAMPLE_RATE: u32 = 16_000;

/// Pure sine tone.
pub fn sine(freq: f32, sample_rate: u32, len: usize, amplitude: f32) -> Vec<f32> {
    (0..len)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()
        })
        .collect()
}

/// Uniform noise in [-amplitude, amplitude], seeded for reproducibility.
pub fn noise(seed: u64, len: usize, amplitude: f32) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-amplitude..=amplitude)).collect()
}

/// All-zero samples.
pub fn silence(len: usize) -> Vec<f32> {
    vec![0.0; len]
}

/// One second of moderate, steady tone. Repeated, it classifies Positive.
pub fn calm_chunk() -> Vec<f32> {
    sine(1500.0, SAMPLE_RATE, SAMPLE_RATE as usize, 0.0636)
}

/// One second of quiet, slow tone. Repeated, it classifies Sad.
pub fn flat_chunk() -> Vec<f32> {
    sine(200.0, SAMPLE_RATE, SAMPLE_RATE as usize, 0.03)
}

/// One second of loud, rapid tone. Repeated, it classifies Frustrated.
pub fn agitated_chunk() -> Vec<f32> {
    sine(4000.0, SAMPLE_RATE, SAMPLE_RATE as usize, 0.12)
}
