//! Phase prompt templates and emotional adaptation text
//!
//! Everything here is a deterministic lookup: the only inputs are the phase,
//! the accumulated state digests, and the predominant recent emotion. The
//! rendered prompt stays within a few KB so it can be re-requested freely.

use attune_core::{EmotionState, EmotionType};
use attune_emotion::predominant_emotion;
use serde::Serialize;

use crate::phase::Phase;
use crate::state::ConversationState;

/// Structured guidance surfaced alongside the prompt text.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PhaseGuidance {
    pub phase: Phase,
    pub time_in_phase_secs: f64,
    pub goals: Vec<&'static str>,
    pub key_questions: Vec<&'static str>,
    pub tips: Vec<&'static str>,
}

/// Upstream instruction text for the current phase.
///
/// With `include_adaptation` set, an adaptation block chosen by the
/// predominant emotion in `recent` is appended; an empty `recent` selects
/// the Neutral block.
pub fn phase_prompt(
    state: &ConversationState,
    recent: &[EmotionState],
    include_adaptation: bool,
) -> String {
    let mut prompt = match state.current_phase {
        Phase::Relationship => relationship_prompt(),
        Phase::Reaction => reaction_prompt(state),
        Phase::Content => content_prompt(state),
        Phase::Coaching => coaching_prompt(state),
    };

    if include_adaptation {
        prompt.push_str("\n\n");
        prompt.push_str(&adaptation_guidance(recent));
    }

    prompt
}

fn relationship_prompt() -> String {
    r#"You are in the RELATIONSHIP BUILDING phase of the R2C2 framework.

## Phase Goal
Create psychological safety and establish rapport. The employee needs to feel
comfortable and trust you before diving into potentially difficult feedback.

## What to Do
- Introduce yourself warmly and acknowledge that receiving feedback can bring
  up a lot of feelings. That's completely normal.
- Set the tone: this is a safe space with no judgment, just support for growth.
- Ask how they are feeling about the feedback they received, listen actively,
  and validate: "That makes sense..." "I can understand why you'd feel that
  way..."
- Explain the process: reactions first, then the content, then a concrete plan.
- Emphasize their control: "We'll move at your pace."

## What NOT to Do
- Don't rush into the feedback content yet
- Don't ask them to analyze or defend anything
- Don't minimize their feelings ("Don't worry, it's not that bad")

## Transition Signal
When they seem comfortable and have acknowledged their feelings, suggest:
"Would it be okay if we start exploring your reactions to the feedback?"

Keep this phase brief but don't skip it. Trust is essential for what comes
next."#
        .to_string()
}

fn reaction_prompt(state: &ConversationState) -> String {
    let feedback = state.feedback.theme_summary();
    format!(
        r#"You are in the REACTION EXPLORATION phase of the R2C2 framework.

## Phase Goal
Help the employee explore and process their emotional reactions to the
feedback. Defensiveness is the biggest barrier to learning from feedback.
This phase reduces it by creating space for emotions.

## Feedback They Received
{feedback}

## What to Do
- Ask open-ended questions: "What was your first reaction when you read the
  feedback?" "What surprised you?"
- Reflect back what you hear and normalize defensiveness: "It's completely
  natural to feel defensive. Our brains are wired to protect us from
  criticism."
- Explore specific triggers: "Which pieces of feedback felt hardest to hear?"
- Give space for silence. Don't rush to fill it.
- Distinguish between the emotion and the feedback: honor the feeling first.

## What NOT to Do
- Don't problem-solve yet
- Don't challenge their feelings ("But don't you think...")
- Don't agree that the feedback is wrong or unfair

## Transition Signal
When their voice becomes calmer, they start asking questions, or they
acknowledge some truth in the feedback, suggest: "Would it be okay if we
start looking at the actual content of the feedback more objectively?"

This phase is critical. Don't rush it. Emotional processing takes time."#
    )
}

fn content_prompt(state: &ConversationState) -> String {
    let feedback = state.feedback.theme_summary();
    let reactions = state.reactions_summary();
    format!(
        r#"You are in the CONTENT DISCUSSION phase of the R2C2 framework.

## Phase Goal
Help the employee understand the feedback content clearly and objectively.
Now that emotions have been processed, they can look at the feedback as data
rather than attack.

## Feedback Themes
{feedback}

## Their Reactions So Far
{reactions}

## What to Do
- Start with patterns: "Looking at all the feedback together, what patterns
  do you notice?"
- Separate behavior from identity: the feedback is about what they do, not
  who they are.
- Look for blind spots and connect behavior to impact: "When you do that,
  what impact might it have on others?"
- Prioritize: "Of all these themes, which ones feel most important to
  address?"

## What NOT to Do
- Don't let them dismiss feedback as "wrong" or "unfair" without exploring it
- Don't overwhelm them. Focus on 2-3 key themes.
- Don't let them make it about character instead of behavior

## Transition Signal
When they can articulate the feedback without defensiveness and start asking
"So what should I do about this?", suggest: "Should we start thinking about
what you want to do with these insights?"

This phase is about clarity and understanding, not yet about action."#
    )
}

fn coaching_prompt(state: &ConversationState) -> String {
    let feedback = state.feedback.theme_summary();
    let themes = state.themes_summary();
    format!(
        r#"You are in the COACHING FOR CHANGE phase of the R2C2 framework.

## Phase Goal
Help the employee create a concrete, actionable development plan. This is
where insights become action. Focus on 1-3 specific, achievable commitments.

## Feedback Themes
{feedback}

## Key Insights from Our Discussion
{themes}

## What to Do
- Narrow the focus: "Which 1-3 areas do you want to focus on first?"
- Help them form SMART goals: specific, measurable, achievable, relevant,
  time-bound. Not "communicate better" but "send a summary email after each
  meeting".
- Use the START, STOP, CONTINUE framework: one new behavior to begin, one to
  stop or do less of, one that works and should continue.
- Plan for obstacles: "What might get in the way?" "Who can help you?"
- Recap clearly and acknowledge their commitment.

## What NOT to Do
- Don't let them commit to too much
- Don't accept vague goals ("I'll be better at communication")
- Don't make it your plan. It has to be theirs.

## Transition to Closing
When you have 1-3 concrete commitments, summarize the full plan, acknowledge
their growth, and remind them this is a journey, not a destination."#
    )
}

/// Adaptation block for the predominant emotion in `recent`.
///
/// An empty slice selects the Neutral block, so callers always get usable
/// guidance text.
pub fn adaptation_guidance(recent: &[EmotionState]) -> String {
    let predominant = predominant_emotion(recent).unwrap_or_default();

    let block = match predominant {
        EmotionType::Defensive => {
            r#"**Current Emotional State: DEFENSIVE**

The user is showing signs of defensiveness. This is completely normal and
expected.
- SLOW DOWN: don't rush forward, give them space to process
- VALIDATE MORE: "That makes complete sense..." "I can understand why you'd
  feel that way..."
- NORMALIZE: defensiveness is a natural protective response
- REFLECT, DON'T ADVISE: reflect their feelings back instead of
  problem-solving
Avoid pushing them to "see the other side" too quickly or moving to
solutions."#
        }
        EmotionType::Frustrated => {
            r#"**Current Emotional State: FRUSTRATED**

The user is showing frustration. They may feel stuck, misunderstood, or
overwhelmed.
- ACKNOWLEDGE IT: name it directly: "I'm sensing some frustration..."
- SLOW THE PACE: don't add more information or questions, simplify
- VALIDATE THE DIFFICULTY: "This is hard work. It's okay to feel frustrated."
- CHECK IN: "What would be most helpful right now?"
Avoid adding complexity or being overly cheerful or dismissive."#
        }
        EmotionType::Sad => {
            r#"**Current Emotional State: SAD**

The user is showing sadness. The feedback may have touched on something
painful.
- SLOW WAY DOWN: give lots of space for silence and processing
- BE GENTLE: use softer, more compassionate language
- VALIDATE THE PAIN: "This is touching on something painful, isn't it?"
- CHECK THEIR CAPACITY: "Do you want to keep going, or would you like to
  pause?"
Avoid trying to cheer them up, minimizing the pain, or rushing to
solutions."#
        }
        EmotionType::Anxious => {
            r#"**Current Emotional State: ANXIOUS**

The user is showing anxiety. They may be worried about the implications of
the feedback or feeling overwhelmed.
- PROVIDE REASSURANCE: remind them this is a safe space
- GROUND THEM: focus on the present moment, one thing at a time
- OFFER CONTROL: give them choices about what to focus on
- BE STEADY AND CALM: "We don't have to solve everything today"
Avoid future-focused questions that increase worry and avoid creating time
pressure."#
        }
        EmotionType::Positive => {
            r#"**Current Emotional State: POSITIVE/OPEN**

The user is showing positive emotions and openness. They're in a good state
for learning and growth.
- LEVERAGE THE OPENNESS: this is a great time to go deeper
- MAINTAIN MOMENTUM: keep the energy going with curious questions
- CELEBRATE INSIGHTS: acknowledge their growth and openness
Avoid becoming complacent or rushing just because they're positive."#
        }
        EmotionType::Neutral => {
            r#"**Current Emotional State: NEUTRAL/CALM**

The user is in a neutral, calm state. This is ideal for productive
conversation.
- MAINTAIN THE PACE: continue with your normal coaching approach
- STAY CURIOUS: ask open-ended questions
- WATCH FOR SHIFTS: monitor for emotional changes as you explore sensitive
  topics

This is a good state for learning and growth. Continue with your
phase-specific guidance."#
        }
    };

    format!("## EMOTIONAL ADAPTATION GUIDANCE\n\n{block}")
}

/// Structured goals, questions, and tips for a phase.
pub fn phase_guidance(phase: Phase, time_in_phase_secs: f64) -> PhaseGuidance {
    let (goals, key_questions, tips) = match phase {
        Phase::Relationship => (
            vec![
                "Build rapport and trust",
                "Create psychological safety",
                "Set expectations for the conversation",
            ],
            vec![
                "How are you feeling about the feedback you received?",
                "What was it like to read through your 360\u{b0} feedback?",
                "Have you received feedback like this before?",
            ],
            vec![
                "Be warm and empathetic",
                "Validate their feelings",
                "Keep it brief (2-3 minutes)",
            ],
        ),
        Phase::Reaction => (
            vec![
                "Explore emotional reactions",
                "Normalize defensiveness",
                "Reduce emotional barriers to learning",
            ],
            vec![
                "What was your first reaction when you read the feedback?",
                "Which pieces of feedback surprised you or felt unfair?",
                "What emotions are coming up as we talk about this?",
            ],
            vec![
                "Don't rush this phase",
                "Reflect emotions back",
                "Avoid problem-solving yet",
            ],
        ),
        Phase::Content => (
            vec![
                "Understand feedback objectively",
                "Identify patterns and themes",
                "Distinguish behavior from identity",
            ],
            vec![
                "What patterns do you notice across the feedback?",
                "How might others be experiencing your behavior?",
                "Which feedback themes feel most important to address?",
            ],
            vec![
                "Help them see others' perspectives",
                "Focus on behaviors, not character",
                "Look for recurring themes",
            ],
        ),
        Phase::Coaching => (
            vec![
                "Create actionable development plan",
                "Set SMART goals",
                "Identify specific behavior changes",
            ],
            vec![
                "What 1-3 areas do you want to focus on?",
                "What specific behavior will you start/stop/continue?",
                "What obstacles might you face?",
                "Who can support you in this change?",
            ],
            vec![
                "Keep it focused (1-3 goals)",
                "Make goals specific and measurable",
                "Ensure commitments are realistic",
            ],
        ),
    };

    PhaseGuidance {
        phase,
        time_in_phase_secs,
        goals,
        key_questions,
        tips,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{FeedbackData, FeedbackTheme};
    use attune_core::{SessionTime, SmoothedFeatures};

    fn state_in(phase: Phase) -> ConversationState {
        let feedback = FeedbackData {
            user_id: "u-1".to_string(),
            themes: vec![FeedbackTheme {
                category: "peer".to_string(),
                theme: "talks over people".to_string(),
                frequency: 3,
            }],
            ..FeedbackData::default()
        };
        let mut state = ConversationState::new(feedback, SessionTime::ZERO);
        state.current_phase = phase;
        state
    }

    fn emotions(emotion: EmotionType, count: usize) -> Vec<EmotionState> {
        (0..count)
            .map(|i| {
                EmotionState::new(
                    emotion,
                    0.8,
                    SessionTime::from_secs(i as i64),
                    SmoothedFeatures::default(),
                )
            })
            .collect()
    }

    #[test]
    fn test_each_phase_has_its_own_prompt() {
        let headers = [
            (Phase::Relationship, "RELATIONSHIP BUILDING"),
            (Phase::Reaction, "REACTION EXPLORATION"),
            (Phase::Content, "CONTENT DISCUSSION"),
            (Phase::Coaching, "COACHING FOR CHANGE"),
        ];
        for (phase, header) in headers {
            let prompt = phase_prompt(&state_in(phase), &[], false);
            assert!(prompt.starts_with(&format!("You are in the {header} phase")));
        }
    }

    #[test]
    fn test_reaction_prompt_quotes_feedback_themes() {
        let prompt = phase_prompt(&state_in(Phase::Reaction), &[], false);
        assert!(prompt.contains("- [PEER] talks over people (mentioned 3 times)"));
    }

    #[test]
    fn test_content_prompt_falls_back_without_reactions() {
        let prompt = phase_prompt(&state_in(Phase::Content), &[], false);
        assert!(prompt.contains("No reactions recorded yet."));
    }

    #[test]
    fn test_coaching_prompt_lists_discussed_themes() {
        let mut state = state_in(Phase::Coaching);
        state.record_theme("delegation".to_string());
        let prompt = phase_prompt(&state, &[], false);
        assert!(prompt.contains("- delegation"));
    }

    #[test]
    fn test_adaptation_block_appended_on_request() {
        let state = state_in(Phase::Relationship);
        let bare = phase_prompt(&state, &[], false);
        assert!(!bare.contains("EMOTIONAL ADAPTATION GUIDANCE"));

        let adapted = phase_prompt(&state, &emotions(EmotionType::Sad, 3), true);
        assert!(adapted.contains("EMOTIONAL ADAPTATION GUIDANCE"));
        assert!(adapted.contains("Current Emotional State: SAD"));
    }

    #[test]
    fn test_adaptation_defaults_to_neutral_without_history() {
        let guidance = adaptation_guidance(&[]);
        assert!(guidance.contains("Current Emotional State: NEUTRAL/CALM"));
    }

    #[test]
    fn test_adaptation_follows_predominant_emotion() {
        let mut recent = emotions(EmotionType::Anxious, 3);
        recent.extend(emotions(EmotionType::Positive, 2));
        let guidance = adaptation_guidance(&recent);
        assert!(guidance.contains("Current Emotional State: ANXIOUS"));
    }

    #[test]
    fn test_prompts_stay_small() {
        for phase in Phase::ALL {
            let prompt = phase_prompt(&state_in(phase), &emotions(EmotionType::Defensive, 3), true);
            assert!(prompt.len() < 4096, "{phase} prompt is {} bytes", prompt.len());
        }
    }

    #[test]
    fn test_guidance_structure_per_phase() {
        let guidance = phase_guidance(Phase::Relationship, 42.0);
        assert_eq!(guidance.phase, Phase::Relationship);
        assert_eq!(guidance.time_in_phase_secs, 42.0);
        assert_eq!(guidance.goals.len(), 3);
        assert_eq!(guidance.tips.len(), 3);

        // Coaching carries an extra key question
        assert_eq!(phase_guidance(Phase::Coaching, 0.0).key_questions.len(), 4);
        for phase in Phase::ALL {
            assert_eq!(phase_guidance(phase, 0.0).goals.len(), 3);
        }
    }
}
