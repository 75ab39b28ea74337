//! Threshold-band emotion classification
//!
//! Six additive rule scores over the smoothed feature vector. The winner is
//! the first emotion in tie-break rank order carrying the maximum score; a
//! maximum below the confidence floor collapses to Neutral at that floor.

use attune_core::{EmotionType, SmoothedFeatures};

/// Fixed threshold bands for the rule scores.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifierThresholds {
    pub pitch_variance_high: f32,
    pub pitch_variance_low: f32,
    pub energy_high: f32,
    pub energy_low: f32,
    pub tempo_fast: f32,
    pub tempo_slow: f32,
    /// Scores below this floor force (Neutral, floor).
    pub min_confidence: f32,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        ClassifierThresholds {
            pitch_variance_high: 50.0,
            pitch_variance_low: 15.0,
            energy_high: 0.7,
            energy_low: 0.3,
            tempo_fast: 1.3,
            tempo_slow: 0.7,
            min_confidence: 0.3,
        }
    }
}

/// Rule-based classifier. Pure: identical features give identical output.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmotionClassifier {
    thresholds: ClassifierThresholds,
}

impl EmotionClassifier {
    pub fn new(thresholds: ClassifierThresholds) -> Self {
        EmotionClassifier { thresholds }
    }

    pub fn thresholds(&self) -> &ClassifierThresholds {
        &self.thresholds
    }

    /// Score all six emotions and pick the winner.
    ///
    /// Contributing conditions per emotion (each hit adds its weight):
    /// - Defensive: variance > high (0.4); tempo > fast (0.3); energy > high (0.3)
    /// - Frustrated: energy > high (0.4); variance > 0.7*high (0.3);
    ///   tempo > 0.9*fast or tempo < 1.1*slow (0.3)
    /// - Sad: energy < low (0.4); tempo < slow (0.3); variance < low (0.3)
    /// - Anxious: variance > high (0.4); tempo > fast (0.3); energy > 0.8*high (0.3)
    /// - Positive: low < energy < high (0.3); 1.2*slow < tempo < 0.9*fast (0.4);
    ///   low < variance < 0.8*high (0.3)
    /// - Neutral: single 0.5 when energy, tempo, and variance all sit in the
    ///   mid bands
    ///
    /// Ties resolve to the lowest [`EmotionType::rank`]. Non-finite inputs
    /// fail every band and therefore collapse to Neutral at the floor.
    pub fn classify(&self, features: &SmoothedFeatures) -> (EmotionType, f32) {
        let t = &self.thresholds;
        let variance = features.pitch_variance;
        let energy = features.energy_mean;
        let tempo = features.tempo_mean;

        let mut scores = [0.0f32; 6];
        let idx = |emotion: EmotionType| emotion.rank() as usize;

        // Defensive: wide pitch spread, fast speech, raised energy
        if variance > t.pitch_variance_high {
            scores[idx(EmotionType::Defensive)] += 0.4;
        }
        if tempo > t.tempo_fast {
            scores[idx(EmotionType::Defensive)] += 0.3;
        }
        if energy > t.energy_high {
            scores[idx(EmotionType::Defensive)] += 0.3;
        }

        // Frustrated: high energy, irregular tempo, moderate pitch spread
        if energy > t.energy_high {
            scores[idx(EmotionType::Frustrated)] += 0.4;
        }
        if variance > t.pitch_variance_high * 0.7 {
            scores[idx(EmotionType::Frustrated)] += 0.3;
        }
        if tempo > t.tempo_fast * 0.9 || tempo < t.tempo_slow * 1.1 {
            scores[idx(EmotionType::Frustrated)] += 0.3;
        }

        // Sad: low energy, slow speech, flat pitch
        if energy < t.energy_low {
            scores[idx(EmotionType::Sad)] += 0.4;
        }
        if tempo < t.tempo_slow {
            scores[idx(EmotionType::Sad)] += 0.3;
        }
        if variance < t.pitch_variance_low {
            scores[idx(EmotionType::Sad)] += 0.3;
        }

        // Anxious: wide pitch spread, fast speech, moderately raised energy
        if variance > t.pitch_variance_high {
            scores[idx(EmotionType::Anxious)] += 0.4;
        }
        if tempo > t.tempo_fast {
            scores[idx(EmotionType::Anxious)] += 0.3;
        }
        if energy > t.energy_high * 0.8 {
            scores[idx(EmotionType::Anxious)] += 0.3;
        }

        // Positive: moderate energy, steady tempo, lively but bounded pitch
        if energy > t.energy_low && energy < t.energy_high {
            scores[idx(EmotionType::Positive)] += 0.3;
        }
        if tempo > t.tempo_slow * 1.2 && tempo < t.tempo_fast * 0.9 {
            scores[idx(EmotionType::Positive)] += 0.4;
        }
        if variance > t.pitch_variance_low && variance < t.pitch_variance_high * 0.8 {
            scores[idx(EmotionType::Positive)] += 0.3;
        }

        // Neutral: everything in the mid bands at once
        if energy > t.energy_low * 1.2
            && energy < t.energy_high * 0.8
            && tempo > t.tempo_slow * 1.1
            && tempo < t.tempo_fast * 0.9
            && variance < t.pitch_variance_high * 0.6
        {
            scores[idx(EmotionType::Neutral)] += 0.5;
        }

        let mut best = EmotionType::Neutral;
        let mut best_score = f32::NEG_INFINITY;
        for emotion in EmotionType::ALL {
            let score = scores[idx(emotion)];
            if score > best_score {
                best = emotion;
                best_score = score;
            }
        }

        if best_score < t.min_confidence {
            return (EmotionType::Neutral, t.min_confidence);
        }
        (best, best_score.min(1.0))
    }
}
