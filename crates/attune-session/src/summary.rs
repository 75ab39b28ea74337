//! End-of-session rollup for the persistence layer

use std::collections::BTreeMap;

use attune_core::{EmotionType, SessionTime};
use attune_emotion::predominant_emotion;
use serde::Serialize;

use crate::phase::Phase;
use crate::state::{ConversationState, DevelopmentGoal};

/// Content theme count that qualifies as an insight.
const INSIGHT_THEME_COUNT: usize = 3;
/// Completed phase count that marks a full journey.
const INSIGHT_PHASE_COUNT: usize = 3;

/// Emotional arc across the whole session.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EmotionalJourney {
    pub start_emotion: Option<EmotionType>,
    pub end_emotion: Option<EmotionType>,
    pub predominant_emotion: Option<EmotionType>,
    /// How many consecutive sample pairs disagreed.
    pub emotion_changes: usize,
    pub emotion_distribution: BTreeMap<EmotionType, usize>,
}

/// Development plan as reported in the summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanSummary {
    pub goals: Vec<DevelopmentGoal>,
    pub goal_count: usize,
    pub created: bool,
    pub created_at: Option<SessionTime>,
}

/// Everything a persistence collaborator stores at session end.
///
/// Serializes to plain nested primitives: string-keyed maps, lists, numbers.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SessionSummary {
    pub user_id: String,
    pub started_at: SessionTime,
    pub ended_at: SessionTime,
    pub duration_secs: f64,
    /// Seconds per phase, completed phases plus the in-progress one.
    pub phase_durations: BTreeMap<Phase, f64>,
    pub phases_completed: Vec<Phase>,
    pub current_phase: Phase,
    pub emotional_journey: EmotionalJourney,
    pub reactions_explored: usize,
    pub content_themes: Vec<String>,
    pub development_plan: PlanSummary,
    pub key_insights: Vec<String>,
}

/// Roll the accumulated state up as of `now`.
pub fn build_summary(state: &ConversationState, now: SessionTime) -> SessionSummary {
    let mut phase_durations = BTreeMap::new();
    for record in &state.phase_history {
        phase_durations.insert(record.phase, record.duration_secs);
    }
    phase_durations.insert(state.current_phase, now.secs_since(state.phase_start));

    SessionSummary {
        user_id: state.feedback.user_id.clone(),
        started_at: state.session_start,
        ended_at: now,
        duration_secs: now.secs_since(state.session_start),
        phase_durations,
        phases_completed: state.phase_history.iter().map(|r| r.phase).collect(),
        current_phase: state.current_phase,
        emotional_journey: analyze_journey(state),
        reactions_explored: state.reactions.len(),
        content_themes: state.content_themes.clone(),
        development_plan: plan_summary(state),
        key_insights: key_insights(state),
    }
}

fn analyze_journey(state: &ConversationState) -> EmotionalJourney {
    let journey = &state.journey;

    let mut distribution = BTreeMap::new();
    for sample in journey {
        *distribution.entry(sample.emotion).or_insert(0usize) += 1;
    }

    let emotion_changes = journey
        .windows(2)
        .filter(|pair| pair[0].emotion != pair[1].emotion)
        .count();

    EmotionalJourney {
        start_emotion: journey.first().map(|s| s.emotion),
        end_emotion: journey.last().map(|s| s.emotion),
        predominant_emotion: predominant_emotion(journey),
        emotion_changes,
        emotion_distribution: distribution,
    }
}

fn plan_summary(state: &ConversationState) -> PlanSummary {
    match &state.development_plan {
        Some(plan) => PlanSummary {
            goals: plan.goals.clone(),
            goal_count: plan.goals.len(),
            created: true,
            created_at: plan.created_at,
        },
        None => PlanSummary {
            goals: Vec::new(),
            goal_count: 0,
            created: false,
            created_at: None,
        },
    }
}

fn key_insights(state: &ConversationState) -> Vec<String> {
    let mut insights = Vec::new();

    if let (Some(first), Some(last)) = (state.journey.first(), state.journey.last()) {
        if first.emotion.is_distressed() && last.emotion.is_ready() {
            insights.push(
                "Successfully processed initial defensiveness and reached a receptive state"
                    .to_string(),
            );
        }
    }

    if state.content_themes.len() >= INSIGHT_THEME_COUNT {
        insights.push(format!(
            "Identified {} key development themes",
            state.content_themes.len()
        ));
    }

    if let Some(plan) = &state.development_plan {
        if !plan.goals.is_empty() {
            insights.push(format!(
                "Created development plan with {} actionable goal(s)",
                plan.goals.len()
            ));
        }
    }

    if state.phase_history.len() >= INSIGHT_PHASE_COUNT {
        insights.push("Completed full R2C2 framework journey".to_string());
    }

    if insights.is_empty() {
        insights.push("Session in progress".to_string());
    }

    insights
}
