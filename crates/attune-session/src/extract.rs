//! Keyword extraction of content themes and development goals
//!
//! Extraction sits behind small traits so the heuristics can be swapped for
//! something smarter without touching transition or summary logic. The
//! default implementations are plain case-insensitive keyword scans.

use attune_core::{AttuneError, AttuneResult};
use serde::{Deserialize, Serialize};

/// The fixed vocabulary matched during the Content phase.
pub const CONTENT_THEME_KEYWORDS: [&str; 12] = [
    "communication",
    "leadership",
    "collaboration",
    "feedback",
    "delegation",
    "listening",
    "empathy",
    "decision-making",
    "accountability",
    "follow-through",
    "organization",
    "planning",
];

/// Start/Stop/Continue commitment families.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum GoalKind {
    Start = 0,
    Stop = 1,
    Continue = 2,
}

impl GoalKind {
    pub const ALL: [GoalKind; 3] = [GoalKind::Start, GoalKind::Stop, GoalKind::Continue];

    pub fn as_str(self) -> &'static str {
        match self {
            GoalKind::Start => "start",
            GoalKind::Stop => "stop",
            GoalKind::Continue => "continue",
        }
    }

    pub fn parse(name: &str) -> AttuneResult<Self> {
        match name {
            "start" => Ok(GoalKind::Start),
            "stop" => Ok(GoalKind::Stop),
            "continue" => Ok(GoalKind::Continue),
            other => Err(AttuneError::UnknownGoalKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for GoalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pulls discussion topics out of a Content-phase utterance.
pub trait ThemeExtractor: Send + Sync {
    /// Themes found in the utterance, in match order, without deduplication
    /// against prior utterances. The engine handles session-level dedup.
    fn themes(&self, utterance: &str) -> Vec<String>;
}

/// Detects a Start/Stop/Continue commitment in a Coaching-phase utterance.
pub trait GoalExtractor: Send + Sync {
    fn goal_kind(&self, utterance: &str) -> Option<GoalKind>;
}

/// Substring scan over [`CONTENT_THEME_KEYWORDS`].
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordThemeExtractor;

impl ThemeExtractor for KeywordThemeExtractor {
    fn themes(&self, utterance: &str) -> Vec<String> {
        let lowered = utterance.to_lowercase();
        CONTENT_THEME_KEYWORDS
            .iter()
            .filter(|keyword| lowered.contains(*keyword))
            .map(|keyword| keyword.to_string())
            .collect()
    }
}

const START_WORDS: [&str; 3] = ["start", "begin", "initiate"];
const STOP_WORDS: [&str; 4] = ["stop", "quit", "cease", "avoid"];
const CONTINUE_WORDS: [&str; 3] = ["continue", "keep", "maintain"];

/// Action-word scan, first matching family wins in Start, Stop, Continue order.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeywordGoalExtractor;

impl GoalExtractor for KeywordGoalExtractor {
    fn goal_kind(&self, utterance: &str) -> Option<GoalKind> {
        let lowered = utterance.to_lowercase();
        if START_WORDS.iter().any(|w| lowered.contains(w)) {
            Some(GoalKind::Start)
        } else if STOP_WORDS.iter().any(|w| lowered.contains(w)) {
            Some(GoalKind::Stop)
        } else if CONTINUE_WORDS.iter().any(|w| lowered.contains(w)) {
            Some(GoalKind::Continue)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_extraction_is_case_insensitive() {
        let extractor = KeywordThemeExtractor;
        let themes = extractor.themes("My LEADERSHIP style hurts Collaboration");
        assert_eq!(themes, vec!["leadership", "collaboration"]);
    }

    #[test]
    fn test_theme_extraction_matches_hyphenated_keywords() {
        let extractor = KeywordThemeExtractor;
        let themes = extractor.themes("I second-guess my decision-making under pressure");
        assert_eq!(themes, vec!["decision-making"]);
    }

    #[test]
    fn test_theme_extraction_empty_for_off_topic_text() {
        let extractor = KeywordThemeExtractor;
        assert!(extractor.themes("the weather was nice today").is_empty());
    }

    #[test]
    fn test_goal_kind_families() {
        let extractor = KeywordGoalExtractor;
        assert_eq!(
            extractor.goal_kind("I will begin writing meeting summaries"),
            Some(GoalKind::Start)
        );
        assert_eq!(
            extractor.goal_kind("I need to quit interrupting people"),
            Some(GoalKind::Stop)
        );
        assert_eq!(
            extractor.goal_kind("I want to maintain my weekly one-on-ones"),
            Some(GoalKind::Continue)
        );
        assert_eq!(extractor.goal_kind("that sounds reasonable"), None);
    }

    #[test]
    fn test_goal_kind_prefers_start_family() {
        // "start" and "stop" both present, family order decides
        let extractor = KeywordGoalExtractor;
        assert_eq!(
            extractor.goal_kind("I'll start delegating and stop micromanaging"),
            Some(GoalKind::Start)
        );
    }

    #[test]
    fn test_goal_kind_roundtrip() {
        for kind in GoalKind::ALL {
            assert_eq!(GoalKind::parse(kind.as_str()).unwrap(), kind);
        }
        assert!(GoalKind::parse("defer").is_err());
    }
}
