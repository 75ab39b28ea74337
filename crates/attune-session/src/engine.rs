//! The phase state machine
//!
//! One engine per live conversation. Transition checks are pure reads over
//! elapsed time and the recent emotional journey; the only mutations happen
//! in the explicit record and transition operations.

use std::time::Duration;

use attune_core::{EmotionState, EmotionType, SessionTime, SharedClock};
use attune_emotion::{emotional_readiness, predominant_emotion};
use serde::Serialize;

use crate::extract::{GoalExtractor, KeywordGoalExtractor, KeywordThemeExtractor, ThemeExtractor};
use crate::feedback::FeedbackData;
use crate::phase::{Phase, PhaseRecord};
use crate::prompts::{self, PhaseGuidance};
use crate::snapshot::SessionSnapshot;
use crate::state::ConversationState;
use crate::summary::{self, SessionSummary};

/// Relationship may end on elapsed time alone after this many seconds.
pub const RELATIONSHIP_MIN_SECS: f64 = 120.0;
/// Relationship may end early when readiness is also present.
pub const RELATIONSHIP_EARLY_SECS: f64 = 90.0;
/// Reaction floor; readiness is still required.
pub const REACTION_MIN_SECS: f64 = 180.0;
/// Reaction ends unconditionally after this long.
pub const REACTION_MAX_SECS: f64 = 600.0;
/// Content floor; the theme quorum is still required.
pub const CONTENT_MIN_SECS: f64 = 240.0;
/// Content ends unconditionally after this long.
pub const CONTENT_MAX_SECS: f64 = 720.0;
/// Distinct themes required for the Content floor transition.
pub const CONTENT_THEME_QUORUM: usize = 2;
/// Goal utterances at or below this many characters are ignored.
pub const MIN_GOAL_UTTERANCE_CHARS: usize = 20;
/// Lookback for readiness, adaptation, and pacing reads.
pub const RECENT_EMOTION_WINDOW: Duration = Duration::from_secs(60);

/// Delivery advice derived from the recent emotional trend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PacingProfile {
    pub pace: &'static str,
    pub pause_duration: &'static str,
    pub validation_level: &'static str,
    pub complexity: &'static str,
    pub note: String,
}

/// Drives one conversation through the four phases.
pub struct SessionEngine {
    clock: SharedClock,
    state: ConversationState,
    theme_extractor: Box<dyn ThemeExtractor>,
    goal_extractor: Box<dyn GoalExtractor>,
}

impl SessionEngine {
    /// Engine with the default keyword extractors, starting in Relationship.
    pub fn new(feedback: FeedbackData, clock: SharedClock) -> Self {
        SessionEngine::with_extractors(
            feedback,
            clock,
            Box::new(KeywordThemeExtractor),
            Box::new(KeywordGoalExtractor),
        )
    }

    pub fn with_extractors(
        feedback: FeedbackData,
        clock: SharedClock,
        theme_extractor: Box<dyn ThemeExtractor>,
        goal_extractor: Box<dyn GoalExtractor>,
    ) -> Self {
        let now = clock.now();
        SessionEngine {
            state: ConversationState::new(feedback, now),
            theme_extractor,
            goal_extractor,
            clock,
        }
    }

    pub fn current_phase(&self) -> Phase {
        self.state.current_phase
    }

    /// Seconds spent in the current phase.
    pub fn time_in_phase(&self) -> f64 {
        self.clock.now().secs_since(self.state.phase_start)
    }

    /// Seconds since the session started.
    pub fn session_duration(&self) -> f64 {
        self.clock.now().secs_since(self.state.session_start)
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Append an emotion sample to the journey.
    pub fn record_emotion(&mut self, emotion: EmotionState) {
        self.state.record_emotion(emotion);
    }

    /// Readiness over the last 60 s of the journey.
    pub fn is_emotionally_ready(&self) -> bool {
        let recent = self
            .state
            .recent_emotions(self.clock.now(), RECENT_EMOTION_WINDOW);
        emotional_readiness(recent)
    }

    /// Whether the current phase should end now.
    ///
    /// A supplied emotion is appended to the journey first; the check itself
    /// mutates nothing else and is safe to call every turn.
    pub fn should_transition(&mut self, emotion: Option<EmotionState>) -> bool {
        if let Some(state) = emotion {
            self.state.record_emotion(state);
        }

        let elapsed = self.time_in_phase();
        match self.state.current_phase {
            Phase::Relationship => {
                elapsed >= RELATIONSHIP_MIN_SECS
                    || (elapsed >= RELATIONSHIP_EARLY_SECS && self.is_emotionally_ready())
            }
            Phase::Reaction => {
                (elapsed >= REACTION_MIN_SECS && self.is_emotionally_ready())
                    || elapsed >= REACTION_MAX_SECS
            }
            Phase::Content => {
                (elapsed >= CONTENT_MIN_SECS
                    && self.state.content_themes.len() >= CONTENT_THEME_QUORUM)
                    || elapsed >= CONTENT_MAX_SECS
            }
            Phase::Coaching => false,
        }
    }

    /// Advance to the next phase, recording the one just completed.
    ///
    /// In Coaching this is a pure no-op: no record is appended and the
    /// phase start is left untouched.
    pub fn transition_to_next_phase(&mut self) -> Phase {
        let old_phase = self.state.current_phase;
        if old_phase.is_terminal() {
            return old_phase;
        }

        let now = self.clock.now();
        let elapsed = now.secs_since(self.state.phase_start);
        self.state.phase_history.push(PhaseRecord {
            phase: old_phase,
            duration_secs: elapsed,
            ended_at: now,
        });

        let new_phase = old_phase.next();
        self.state.current_phase = new_phase;
        self.state.phase_start = now;
        tracing::debug!("phase transition: {} -> {} after {:.0}s", old_phase, new_phase, elapsed);
        new_phase
    }

    /// Record one user turn, routing extraction by the current phase.
    ///
    /// Empty and whitespace-only text is a no-op for extraction; a supplied
    /// emotion is still appended.
    pub fn record_user_response(&mut self, response: &str, emotion: Option<EmotionState>) {
        if let Some(state) = emotion {
            self.state.record_emotion(state);
        }

        if response.trim().is_empty() {
            return;
        }

        match self.state.current_phase {
            Phase::Relationship => {}
            Phase::Reaction => self.state.reactions.push(response.to_string()),
            Phase::Content => {
                for theme in self.theme_extractor.themes(response) {
                    self.state.record_theme(theme);
                }
            }
            Phase::Coaching => {
                if let Some(kind) = self.goal_extractor.goal_kind(response) {
                    if response.chars().count() > MIN_GOAL_UTTERANCE_CHARS {
                        self.state
                            .record_goal(kind, response.to_string(), self.clock.now());
                    }
                }
            }
        }
    }

    /// Upstream instruction text for the current phase.
    pub fn phase_prompt(&self, include_adaptation: bool) -> String {
        let recent = self
            .state
            .recent_emotions(self.clock.now(), RECENT_EMOTION_WINDOW);
        prompts::phase_prompt(&self.state, recent, include_adaptation)
    }

    /// Structured goals, questions, and tips for the current phase.
    pub fn phase_guidance(&self) -> PhaseGuidance {
        prompts::phase_guidance(self.state.current_phase, self.time_in_phase())
    }

    /// Delivery pacing derived from the recent emotional trend.
    pub fn pacing(&self) -> PacingProfile {
        let recent = self
            .state
            .recent_emotions(self.clock.now(), RECENT_EMOTION_WINDOW);
        let predominant = predominant_emotion(recent).unwrap_or_default();

        if predominant.is_distressed() {
            PacingProfile {
                pace: "slow",
                pause_duration: "extended",
                validation_level: "high",
                complexity: "low",
                note: format!(
                    "User is showing {predominant} emotions. Slow down, validate more, simplify."
                ),
            }
        } else if predominant == EmotionType::Positive {
            PacingProfile {
                pace: "normal",
                pause_duration: "standard",
                validation_level: "normal",
                complexity: "normal",
                note: "User is in a positive state. Maintain momentum and depth.".to_string(),
            }
        } else {
            PacingProfile {
                pace: "normal",
                pause_duration: "standard",
                validation_level: "normal",
                complexity: "normal",
                note: "User is in a neutral state. Continue with standard pacing.".to_string(),
            }
        }
    }

    /// End-of-session rollup.
    pub fn summary(&self) -> SessionSummary {
        summary::build_summary(&self.state, self.clock.now())
    }

    /// Full state export for external persistence.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.state)
    }

    /// Replace state from a snapshot. Missing fields keep their prior values.
    pub fn restore(&mut self, snapshot: SessionSnapshot) {
        snapshot.apply(&mut self.state);
    }
}

impl std::fmt::Debug for SessionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEngine")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
