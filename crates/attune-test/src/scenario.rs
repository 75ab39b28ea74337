//! End-to-end session scenarios
//!
//! Drives the full pipeline the way a runtime would: audio chunks through an
//! [`EmotionSensor`], utterances and transition checks through a
//! [`SessionEngine`], all on one stepped clock so whole sessions run in
//! microseconds.

use std::sync::Arc;
use std::time::Duration;

use attune_core::{EmotionState, ManualClock, SessionTime};
use attune_emotion::EmotionSensor;
use attune_session::{FeedbackData, Phase, SessionEngine};

use crate::signal::{self, SAMPLE_RATE};

// ============================================================================
// SCENARIO HARNESS
// ============================================================================

/// One simulated conversation: sensor, engine, and the clock driving both.
pub struct SessionScenario {
    pub clock: Arc<ManualClock>,
    pub sensor: EmotionSensor,
    pub engine: SessionEngine,
}

impl SessionScenario {
    pub fn new(feedback: FeedbackData) -> Self {
        let clock = ManualClock::shared(SessionTime::ZERO);
        SessionScenario {
            sensor: EmotionSensor::new(clock.clone()),
            engine: SessionEngine::new(feedback, clock.clone()),
            clock,
        }
    }

    /// One second of audio: advance the clock, analyze, feed the engine.
    pub fn hear(&mut self, samples: &[f32]) -> EmotionState {
        self.clock.advance(Duration::from_secs(1));
        let state = self.sensor.analyze(samples, SAMPLE_RATE);
        self.engine.record_emotion(state);
        state
    }

    /// One user turn a second later.
    pub fn say(&mut self, text: &str) {
        self.clock.advance(Duration::from_secs(1));
        self.engine.record_user_response(text, None);
    }

    /// Let time pass without any signal.
    pub fn wait(&mut self, duration: Duration) {
        self.clock.advance(duration);
    }

    /// Transition if the engine agrees it is time.
    pub fn try_advance(&mut self) -> Option<Phase> {
        if self.engine.should_transition(None) {
            Some(self.engine.transition_to_next_phase())
        } else {
            None
        }
    }
}

// ============================================================================
// INTEGRATION TESTS
// ============================================================================
