//! Affect primitives
//!
//! ATTUNE classifies voice audio into a small closed set of emotion
//! categories. The declaration order of [`EmotionType`] doubles as the
//! tie-break rank: wherever scores or votes tie, the variant declared first
//! wins. Classifier scoring, trend voting, and predominant-emotion selection
//! all iterate [`EmotionType::ALL`] so the rule cannot drift between call
//! sites.

use serde::{Deserialize, Serialize};

use crate::error::{AttuneError, AttuneResult};
use crate::time::SessionTime;

/// Categorical affect estimate.
///
/// Tie-break rank = declaration order: Neutral, Defensive, Frustrated, Sad,
/// Anxious, Positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum EmotionType {
    #[default]
    Neutral = 0,
    Defensive = 1,
    Frustrated = 2,
    Sad = 3,
    Anxious = 4,
    Positive = 5,
}

impl EmotionType {
    /// Every variant, in tie-break rank order.
    pub const ALL: [EmotionType; 6] = [
        EmotionType::Neutral,
        EmotionType::Defensive,
        EmotionType::Frustrated,
        EmotionType::Sad,
        EmotionType::Anxious,
        EmotionType::Positive,
    ];

    /// Lowercase name, the form used in snapshots and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            EmotionType::Neutral => "neutral",
            EmotionType::Defensive => "defensive",
            EmotionType::Frustrated => "frustrated",
            EmotionType::Sad => "sad",
            EmotionType::Anxious => "anxious",
            EmotionType::Positive => "positive",
        }
    }

    /// Parse a lowercase name. Unknown names are rejected, never coerced.
    pub fn parse(name: &str) -> AttuneResult<Self> {
        match name {
            "neutral" => Ok(EmotionType::Neutral),
            "defensive" => Ok(EmotionType::Defensive),
            "frustrated" => Ok(EmotionType::Frustrated),
            "sad" => Ok(EmotionType::Sad),
            "anxious" => Ok(EmotionType::Anxious),
            "positive" => Ok(EmotionType::Positive),
            other => Err(AttuneError::UnknownEmotion(other.to_string())),
        }
    }

    /// Tie-break rank (lower wins ties).
    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// States that indicate readiness to move the conversation forward.
    pub fn is_ready(self) -> bool {
        matches!(self, EmotionType::Neutral | EmotionType::Positive)
    }

    /// States that call for slowing the conversation down.
    pub fn is_distressed(self) -> bool {
        matches!(
            self,
            EmotionType::Defensive
                | EmotionType::Frustrated
                | EmotionType::Sad
                | EmotionType::Anxious
        )
    }
}

impl std::fmt::Display for EmotionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw per-chunk measurement produced by feature extraction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    /// Fundamental frequency estimate in Hz.
    pub pitch: f32,
    /// Loudness in [0, 1] relative to the reference level.
    pub energy: f32,
    /// Speaking-rate ratio, 1.0 = baseline.
    pub tempo: f32,
}

/// Sliding-window aggregate consumed by the classifier.
///
/// `pitch_variance` is the standard deviation of windowed pitch, kept under
/// the name the threshold constants use.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct SmoothedFeatures {
    pub pitch_mean: f32,
    pub pitch_variance: f32,
    pub energy_mean: f32,
    pub tempo_mean: f32,
}

/// One classified sample. Immutable once built.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EmotionState {
    pub emotion: EmotionType,
    pub confidence: f32,
    pub timestamp: SessionTime,
    pub features: SmoothedFeatures,
}

impl EmotionState {
    /// Confidence is held in [0, 1]; non-finite input collapses to 0.
    pub fn new(
        emotion: EmotionType,
        confidence: f32,
        timestamp: SessionTime,
        features: SmoothedFeatures,
    ) -> Self {
        let confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            0.0
        };
        EmotionState {
            emotion,
            confidence,
            timestamp,
            features,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_emotion_name_roundtrip() {
        for emotion in EmotionType::ALL {
            let recovered = EmotionType::parse(emotion.as_str()).unwrap();
            assert_eq!(emotion, recovered);
        }
    }

    #[test]
    fn test_unknown_emotion_rejected() {
        assert!(EmotionType::parse("euphoric").is_err());
        assert!(EmotionType::parse("Neutral").is_err());
        assert!(EmotionType::parse("").is_err());
    }

    #[test]
    fn test_ready_and_distressed_partition() {
        for emotion in EmotionType::ALL {
            assert_ne!(emotion.is_ready(), emotion.is_distressed());
        }
        assert!(EmotionType::Neutral.is_ready());
        assert!(EmotionType::Positive.is_ready());
        assert!(EmotionType::Sad.is_distressed());
    }

    #[test]
    fn test_rank_follows_declaration_order() {
        for pair in EmotionType::ALL.windows(2) {
            assert!(pair[0].rank() < pair[1].rank());
        }
    }

    #[test]
    fn test_confidence_clamped_at_construction() {
        let features = SmoothedFeatures::default();
        let t = SessionTime::ZERO;

        let high = EmotionState::new(EmotionType::Neutral, 1.7, t, features);
        assert_eq!(high.confidence, 1.0);

        let low = EmotionState::new(EmotionType::Neutral, -0.2, t, features);
        assert_eq!(low.confidence, 0.0);

        let nan = EmotionState::new(EmotionType::Neutral, f32::NAN, t, features);
        assert_eq!(nan.confidence, 0.0);
    }

    #[test]
    fn test_emotion_state_serializes_to_plain_primitives() {
        let state = EmotionState::new(
            EmotionType::Defensive,
            0.9,
            SessionTime::from_secs(3),
            SmoothedFeatures {
                pitch_mean: 180.0,
                pitch_variance: 55.0,
                energy_mean: 0.8,
                tempo_mean: 1.4,
            },
        );

        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["emotion"], "defensive");
        assert!(value["features"].is_object());
        assert!(value["features"]["pitch_mean"].is_number());
        assert!(value["timestamp"].is_i64());
    }

    proptest! {
        #[test]
        fn prop_confidence_always_in_unit_interval(raw in proptest::num::f32::ANY) {
            let state = EmotionState::new(
                EmotionType::Neutral,
                raw,
                SessionTime::ZERO,
                SmoothedFeatures::default(),
            );
            prop_assert!((0.0..=1.0).contains(&state.confidence));
        }
    }
}
