//! The four R2C2 phases and their strict forward ordering

use attune_core::{AttuneError, AttuneResult, SessionTime};
use serde::{Deserialize, Serialize};

/// One stage of the coaching conversation.
///
/// Phases advance strictly in declaration order and never move backward
/// through engine operations. Coaching is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Phase {
    #[default]
    Relationship = 0,
    Reaction = 1,
    Content = 2,
    Coaching = 3,
}

impl Phase {
    /// Every phase, in conversation order.
    pub const ALL: [Phase; 4] = [
        Phase::Relationship,
        Phase::Reaction,
        Phase::Content,
        Phase::Coaching,
    ];

    /// Lowercase name, the form used in snapshots and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Relationship => "relationship",
            Phase::Reaction => "reaction",
            Phase::Content => "content",
            Phase::Coaching => "coaching",
        }
    }

    /// Parse a lowercase name. Unknown names are rejected, never coerced.
    pub fn parse(name: &str) -> AttuneResult<Self> {
        match name {
            "relationship" => Ok(Phase::Relationship),
            "reaction" => Ok(Phase::Reaction),
            "content" => Ok(Phase::Content),
            "coaching" => Ok(Phase::Coaching),
            other => Err(AttuneError::UnknownPhase(other.to_string())),
        }
    }

    /// The phase that follows this one. Coaching yields itself.
    pub fn next(self) -> Phase {
        match self {
            Phase::Relationship => Phase::Reaction,
            Phase::Reaction => Phase::Content,
            Phase::Content => Phase::Coaching,
            Phase::Coaching => Phase::Coaching,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::Coaching
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed phase, appended at the moment of transition.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhaseRecord {
    pub phase: Phase,
    /// Seconds spent in the phase.
    pub duration_secs: f64,
    pub ended_at: SessionTime,
}
