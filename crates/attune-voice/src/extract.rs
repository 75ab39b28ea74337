//! Prosodic feature extraction
//!
//! One chunk in, three scalars out. Every path is total: inputs that defeat
//! an estimator produce its documented baseline, never an error.

use attune_core::AudioFeatures;

/// Pitch reported when estimation cannot produce an in-band value.
pub const PITCH_BASELINE_HZ: f32 = 150.0;
/// Lower edge of the human voice fundamental band.
pub const PITCH_MIN_HZ: f32 = 80.0;
/// Upper edge of the human voice fundamental band.
pub const PITCH_MAX_HZ: f32 = 400.0;
/// RMS level of typical conversational speech; energy is measured against it.
pub const ENERGY_REFERENCE_RMS: f32 = 0.1;
/// Zero-crossing rate (per second) of baseline-tempo speech.
pub const CROSSING_RATE_BASELINE: f32 = 3000.0;
/// Tempo reported when the chunk carries no rate information.
pub const TEMPO_BASELINE: f32 = 1.0;
/// Tempo clamp range.
pub const TEMPO_MIN: f32 = 0.5;
pub const TEMPO_MAX: f32 = 2.0;
/// Chunks with RMS below this carry no usable voice signal.
pub const SILENCE_RMS: f32 = 0.01;

/// Extract pitch, energy, and tempo from one chunk of mono samples in
/// [-1.0, 1.0]. An empty chunk yields the baseline triple.
pub fn extract_features(samples: &[f32], sample_rate: u32) -> AudioFeatures {
    if samples.is_empty() {
        return AudioFeatures {
            pitch: PITCH_BASELINE_HZ,
            energy: 0.0,
            tempo: TEMPO_BASELINE,
        };
    }

    AudioFeatures {
        pitch: estimate_pitch(samples, sample_rate),
        energy: calculate_energy(samples),
        tempo: estimate_tempo(samples, sample_rate),
    }
}

/// True when the chunk is too quiet to analyze.
pub fn is_silent(samples: &[f32]) -> bool {
    rms(samples) < SILENCE_RMS
}

/// Fundamental frequency estimate via autocorrelation peak search.
///
/// Correlation is computed only over the lag band implied by 80-400 Hz; the
/// values there equal the full autocorrelation's, and amplitude normalization
/// drops out of the peak comparison. Chunks too short to fit the band, and
/// peaks that convert to an out-of-band frequency, fall back to
/// [`PITCH_BASELINE_HZ`].
pub fn estimate_pitch(samples: &[f32], sample_rate: u32) -> f32 {
    let n = samples.len();
    let min_period = (sample_rate / PITCH_MAX_HZ as u32) as usize;
    let max_period = (sample_rate / PITCH_MIN_HZ as u32) as usize;

    if n == 0 || max_period >= n {
        return PITCH_BASELINE_HZ;
    }

    let mut best_lag = 0usize;
    let mut best_corr = f64::NEG_INFINITY;
    for lag in min_period.max(1)..max_period {
        let mut corr = 0.0f64;
        for i in 0..n - lag {
            corr += samples[i] as f64 * samples[i + lag] as f64;
        }
        if corr > best_corr {
            best_corr = corr;
            best_lag = lag;
        }
    }

    if best_lag == 0 {
        return PITCH_BASELINE_HZ;
    }

    let pitch = sample_rate as f32 / best_lag as f32;
    if !(PITCH_MIN_HZ..=PITCH_MAX_HZ).contains(&pitch) {
        tracing::debug!("pitch {:.1} Hz outside voice band, using baseline", pitch);
        return PITCH_BASELINE_HZ;
    }
    pitch
}

/// RMS loudness scaled by the reference speech level, clamped to [0, 1].
pub fn calculate_energy(samples: &[f32]) -> f32 {
    (rms(samples) / ENERGY_REFERENCE_RMS).min(1.0)
}

/// Speaking-rate ratio from the zero-crossing rate, clamped to [0.5, 2.0].
///
/// A sample sitting exactly on zero counts as half a crossing on each side,
/// matching the sign-difference convention.
pub fn estimate_tempo(samples: &[f32], sample_rate: u32) -> f32 {
    if samples.is_empty() || sample_rate == 0 {
        return TEMPO_BASELINE;
    }

    let mut sign_steps = 0u64;
    for pair in samples.windows(2) {
        sign_steps += sgn(pair[1]).abs_diff(sgn(pair[0])) as u64;
    }
    let crossings = sign_steps as f64 / 2.0;

    let duration = samples.len() as f64 / sample_rate as f64;
    let zcr = crossings / duration;

    let tempo = zcr as f32 / CROSSING_RATE_BASELINE;
    tempo.clamp(TEMPO_MIN, TEMPO_MAX)
}

#[inline]
fn sgn(x: f32) -> i8 {
    if x > 0.0 {
        1
    } else if x < 0.0 {
        -1
    } else {
        0
    }
}

fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| s as f64 * s as f64).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn sine(freq: f32, sample_rate: u32, len: usize, amplitude: f32) -> Vec<f32> {
        (0..len)
            .map(|i| {
                let t = i as f32 / sample_rate as f32;
                amplitude * (2.0 * std::f32::consts::PI * freq * t).sin()
            })
            .collect()
    }

    fn noise(len: usize, amplitude: f32, seed: u64) -> Vec<f32> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..len).map(|_| rng.gen_range(-amplitude..amplitude)).collect()
    }

    #[test]
    fn test_empty_chunk_yields_baselines() {
        let features = extract_features(&[], 16_000);
        assert_eq!(features.pitch, PITCH_BASELINE_HZ);
        assert_eq!(features.energy, 0.0);
        assert_eq!(features.tempo, TEMPO_BASELINE);
    }

    #[test]
    fn test_pitch_of_pure_tone() {
        let samples = sine(200.0, 16_000, 1600, 0.5);
        let pitch = estimate_pitch(&samples, 16_000);
        assert!((pitch - 200.0).abs() < 5.0, "pitch was {pitch}");
    }

    #[test]
    fn test_pitch_short_chunk_falls_back() {
        // 150 samples cannot fit the 200-sample lag needed for 80 Hz at 16 kHz
        let samples = sine(200.0, 16_000, 150, 0.5);
        assert_eq!(estimate_pitch(&samples, 16_000), PITCH_BASELINE_HZ);
    }

    #[test]
    fn test_pitch_just_above_band_falls_back() {
        // At 22050 Hz the shortest searched lag converts to 400.9 Hz, which
        // fails the band check even though the lag itself was searched
        let samples = sine(401.0, 22_050, 2205, 0.5);
        assert_eq!(estimate_pitch(&samples, 22_050), PITCH_BASELINE_HZ);
    }

    #[test]
    fn test_energy_tracks_amplitude() {
        let quiet = vec![0.05f32; 800];
        let energy = calculate_energy(&quiet);
        assert!((energy - 0.5).abs() < 1e-3, "energy was {energy}");

        let loud = vec![0.5f32; 800];
        assert_eq!(calculate_energy(&loud), 1.0);

        assert_eq!(calculate_energy(&vec![0.0f32; 800]), 0.0);
    }

    #[test]
    fn test_tempo_tracks_crossing_rate() {
        // A 1500 Hz tone crosses zero 3000 times per second: the baseline rate
        let baseline = sine(1500.0, 16_000, 16_000, 0.5);
        let tempo = estimate_tempo(&baseline, 16_000);
        assert!((tempo - 1.0).abs() < 0.05, "tempo was {tempo}");

        // 200 Hz crosses far less often and pins to the lower clamp
        let slow = sine(200.0, 16_000, 16_000, 0.5);
        assert_eq!(estimate_tempo(&slow, 16_000), TEMPO_MIN);

        // 4 kHz crosses far more often and pins to the upper clamp
        let fast = sine(4000.0, 16_000, 16_000, 0.5);
        assert_eq!(estimate_tempo(&fast, 16_000), TEMPO_MAX);
    }

    #[test]
    fn test_zero_touch_counts_half_per_side() {
        // sign steps: 1->0 and 0->-1, one full crossing in total
        let samples = [1.0f32, 0.0, -1.0];
        let tempo = estimate_tempo(&samples, 3);
        // one crossing over one second of "audio" = zcr 1, clamped up to 0.5
        assert_eq!(tempo, TEMPO_MIN);
    }

    #[test]
    fn test_silence_detection() {
        assert!(is_silent(&[]));
        assert!(is_silent(&vec![0.005f32; 400]));
        assert!(!is_silent(&vec![0.02f32; 400]));
        assert!(!is_silent(&noise(400, 0.5, 7)));
    }

    #[test]
    fn test_noise_still_yields_in_band_pitch() {
        let samples = noise(1600, 0.8, 42);
        let pitch = estimate_pitch(&samples, 16_000);
        assert!((PITCH_MIN_HZ..=PITCH_MAX_HZ).contains(&pitch));
    }

    proptest! {
        #[test]
        fn prop_features_stay_in_documented_ranges(
            samples in proptest::collection::vec(-1.0f32..1.0, 0..400),
            sample_rate in proptest::sample::select(vec![8_000u32, 16_000, 22_050, 44_100]),
        ) {
            let features = extract_features(&samples, sample_rate);
            prop_assert!((PITCH_MIN_HZ..=PITCH_MAX_HZ).contains(&features.pitch));
            prop_assert!((0.0..=1.0).contains(&features.energy));
            prop_assert!((TEMPO_MIN..=TEMPO_MAX).contains(&features.tempo));
        }
    }
}
