//! Composed audio-to-emotion pipeline
//!
//! One [`EmotionSensor`] per live conversation: it owns the smoothing window,
//! the classifier, and the windowed history, and stamps samples from the
//! injected clock. Callers decide the cadence (roughly one chunk per second
//! of accumulated audio) and whether to skip silent chunks via
//! [`attune_voice::is_silent`].

use std::time::Duration;

use attune_core::{EmotionState, EmotionType, SharedClock};
use attune_voice::{extract_features, FeatureWindow};

use crate::classify::{ClassifierThresholds, EmotionClassifier};
use crate::history::{EmotionHistory, HistoryConfig, READINESS_WINDOW};

/// Stateful analysis front end over the stateless extractor.
pub struct EmotionSensor {
    clock: SharedClock,
    window: FeatureWindow,
    classifier: EmotionClassifier,
    history: EmotionHistory,
}

impl EmotionSensor {
    pub fn new(clock: SharedClock) -> Self {
        EmotionSensor::with_config(clock, ClassifierThresholds::default(), HistoryConfig::default())
    }

    pub fn with_config(
        clock: SharedClock,
        thresholds: ClassifierThresholds,
        history: HistoryConfig,
    ) -> Self {
        EmotionSensor {
            clock,
            window: FeatureWindow::new(),
            classifier: EmotionClassifier::new(thresholds),
            history: EmotionHistory::new(history),
        }
    }

    /// Analyze one chunk: extract, smooth, classify, record.
    ///
    /// Always returns a usable state; degraded input surfaces as Neutral at
    /// the confidence floor rather than as an error. Silent chunks are still
    /// analyzed when handed in; skipping them is the caller's policy.
    pub fn analyze(&mut self, samples: &[f32], sample_rate: u32) -> EmotionState {
        let features = extract_features(samples, sample_rate);
        self.window.push(features);
        let smoothed = self.window.smoothed();

        let (emotion, confidence) = self.classifier.classify(&smoothed);
        let state = EmotionState::new(emotion, confidence, self.clock.now(), smoothed);
        self.history.insert(state);
        state
    }

    /// Most recent classification, Neutral before any analysis.
    pub fn current_emotion(&self) -> EmotionType {
        self.history.last().map(|s| s.emotion).unwrap_or_default()
    }

    pub fn last(&self) -> Option<&EmotionState> {
        self.history.last()
    }

    /// Majority emotion over the trailing window.
    pub fn trend(&self, window: Duration) -> EmotionType {
        self.history.trend(self.clock.now(), window)
    }

    /// Readiness over the conventional 60 s window.
    pub fn is_ready(&self) -> bool {
        self.history
            .is_ready_for_transition(self.clock.now(), READINESS_WINDOW)
    }

    pub fn history(&self) -> &EmotionHistory {
        &self.history
    }

    /// Clear the smoothing window and the history, e.g. between speakers.
    pub fn reset(&mut self) {
        self.window.reset();
        self.history.reset();
    }
}
