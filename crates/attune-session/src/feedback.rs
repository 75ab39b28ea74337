//! 360-degree feedback handed to the engine at session start

use attune_core::SessionTime;
use serde::{Deserialize, Serialize};

/// Prompts quote at most this many themes.
const SUMMARY_THEME_LIMIT: usize = 5;

/// One aggregated feedback theme.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackTheme {
    /// Source category, e.g. "manager", "peer", "general".
    pub category: String,
    pub theme: String,
    /// How many respondents raised it.
    pub frequency: u32,
}

/// Collected 360-degree feedback for one user.
///
/// The engine treats this as read-only context: it is quoted into phase
/// prompts but never mutated during a session.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackData {
    pub feedback_id: String,
    pub user_id: String,
    pub collection_date: SessionTime,
    pub themes: Vec<FeedbackTheme>,
    pub raw_comments: Vec<String>,
}

impl FeedbackData {
    /// Prompt-ready digest of the strongest themes.
    pub fn theme_summary(&self) -> String {
        if self.themes.is_empty() {
            return "No specific feedback themes provided yet.".to_string();
        }

        self.themes
            .iter()
            .take(SUMMARY_THEME_LIMIT)
            .map(|t| {
                format!(
                    "- [{}] {} (mentioned {} times)",
                    t.category.to_uppercase(),
                    t.theme,
                    t.frequency
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
