//! Full-state snapshots for external persistence

use attune_core::{EmotionState, SessionTime};
use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackData;
use crate::phase::{Phase, PhaseRecord};
use crate::state::{ConversationState, DevelopmentPlan};

/// Serializable copy of a [`ConversationState`].
///
/// Every field is optional so checkpoints can be partial; [`apply`] fills
/// only what is present and leaves the rest at prior values. Unknown phase
/// or emotion names fail at deserialization, before any state is touched.
///
/// A snapshot without `development_plan` leaves a prior plan in place, since
/// an absent plan is also a valid session state.
///
/// [`apply`]: SessionSnapshot::apply
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub current_phase: Option<Phase>,
    pub phase_start: Option<SessionTime>,
    pub session_start: Option<SessionTime>,
    pub feedback: Option<FeedbackData>,
    pub reactions: Option<Vec<String>>,
    pub content_themes: Option<Vec<String>>,
    pub development_plan: Option<DevelopmentPlan>,
    pub journey: Option<Vec<EmotionState>>,
    pub phase_history: Option<Vec<PhaseRecord>>,
}

impl SessionSnapshot {
    /// Full snapshot of `state`.
    pub fn capture(state: &ConversationState) -> Self {
        SessionSnapshot {
            current_phase: Some(state.current_phase),
            phase_start: Some(state.phase_start),
            session_start: Some(state.session_start),
            feedback: Some(state.feedback.clone()),
            reactions: Some(state.reactions.clone()),
            content_themes: Some(state.content_themes.clone()),
            development_plan: state.development_plan.clone(),
            journey: Some(state.journey.clone()),
            phase_history: Some(state.phase_history.clone()),
        }
    }

    /// True when at least one core field is missing.
    pub fn is_partial(&self) -> bool {
        self.current_phase.is_none()
            || self.phase_start.is_none()
            || self.session_start.is_none()
            || self.feedback.is_none()
            || self.reactions.is_none()
            || self.content_themes.is_none()
            || self.journey.is_none()
            || self.phase_history.is_none()
    }

    /// Overwrite the provided fields of `state`.
    ///
    /// Partial snapshots can mask data loss, so they are logged.
    pub fn apply(self, state: &mut ConversationState) {
        if self.is_partial() {
            tracing::warn!("applying partial session snapshot, missing fields keep prior values");
        }

        if let Some(phase) = self.current_phase {
            state.current_phase = phase;
        }
        if let Some(at) = self.phase_start {
            state.phase_start = at;
        }
        if let Some(at) = self.session_start {
            state.session_start = at;
        }
        if let Some(feedback) = self.feedback {
            state.feedback = feedback;
        }
        if let Some(reactions) = self.reactions {
            state.reactions = reactions;
        }
        if let Some(themes) = self.content_themes {
            state.content_themes = themes;
        }
        if let Some(plan) = self.development_plan {
            state.development_plan = Some(plan);
        }
        if let Some(journey) = self.journey {
            state.journey = journey;
        }
        if let Some(history) = self.phase_history {
            state.phase_history = history;
        }
    }
}
