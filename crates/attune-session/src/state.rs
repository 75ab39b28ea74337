//! Conversation state accumulated over one session

use std::time::Duration;

use attune_core::{EmotionState, SessionTime};
use serde::{Deserialize, Serialize};

use crate::extract::GoalKind;
use crate::feedback::FeedbackData;
use crate::phase::{Phase, PhaseRecord};

/// Reaction digests quote at most this many recent utterances.
const SUMMARY_REACTION_LIMIT: usize = 3;

/// One Start/Stop/Continue commitment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentGoal {
    pub kind: GoalKind,
    /// The raw utterance the commitment was extracted from.
    pub description: String,
    pub recorded_at: SessionTime,
}

/// Goals collected during the Coaching phase.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DevelopmentPlan {
    pub goals: Vec<DevelopmentGoal>,
    /// Set when the first goal is recorded.
    pub created_at: Option<SessionTime>,
}

/// Everything one conversation accumulates.
///
/// Owned exclusively by one [`SessionEngine`](crate::engine::SessionEngine)
/// and mutated only through its operations. Journey entries arrive in clock
/// order; the windowed queries below rely on that.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    pub current_phase: Phase,
    pub phase_start: SessionTime,
    pub session_start: SessionTime,
    pub feedback: FeedbackData,
    /// Raw Reaction-phase utterances, oldest first.
    pub reactions: Vec<String>,
    /// Insertion-ordered, duplicate-free theme tags.
    pub content_themes: Vec<String>,
    pub development_plan: Option<DevelopmentPlan>,
    /// Full emotional journey for the session, oldest first.
    pub journey: Vec<EmotionState>,
    pub phase_history: Vec<PhaseRecord>,
}

impl ConversationState {
    pub fn new(feedback: FeedbackData, now: SessionTime) -> Self {
        ConversationState {
            current_phase: Phase::Relationship,
            phase_start: now,
            session_start: now,
            feedback,
            reactions: Vec::new(),
            content_themes: Vec::new(),
            development_plan: None,
            journey: Vec::new(),
            phase_history: Vec::new(),
        }
    }

    pub fn record_emotion(&mut self, state: EmotionState) {
        self.journey.push(state);
    }

    /// Journey entries within `window` of `now`, oldest first.
    pub fn recent_emotions(&self, now: SessionTime, window: Duration) -> &[EmotionState] {
        let cutoff = now.saturating_sub(window);
        let start = self.journey.partition_point(|e| e.timestamp < cutoff);
        &self.journey[start..]
    }

    /// Record a theme tag at most once, preserving insertion order.
    pub fn record_theme(&mut self, theme: String) {
        if !self.content_themes.contains(&theme) {
            self.content_themes.push(theme);
        }
    }

    /// Append a goal, creating the plan on first use.
    pub fn record_goal(&mut self, kind: GoalKind, description: String, now: SessionTime) {
        let plan = self
            .development_plan
            .get_or_insert_with(DevelopmentPlan::default);
        if plan.created_at.is_none() {
            plan.created_at = Some(now);
        }
        plan.goals.push(DevelopmentGoal {
            kind,
            description,
            recorded_at: now,
        });
    }

    /// Prompt-ready digest of the latest reactions.
    pub fn reactions_summary(&self) -> String {
        if self.reactions.is_empty() {
            return "No reactions recorded yet.".to_string();
        }

        let tail = self.reactions.len().saturating_sub(SUMMARY_REACTION_LIMIT);
        self.reactions[tail..]
            .iter()
            .map(|r| format!("- {r}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prompt-ready digest of the themes discussed so far.
    pub fn themes_summary(&self) -> String {
        if self.content_themes.is_empty() {
            return "No content themes discussed yet.".to_string();
        }

        self.content_themes
            .iter()
            .map(|t| format!("- {t}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
