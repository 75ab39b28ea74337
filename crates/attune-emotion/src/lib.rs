//! ATTUNE Emotion - Affect classification and history
//!
//! Turns smoothed prosodic features into a categorical emotion with a
//! confidence score, keeps a time-windowed history of classifications, and
//! answers the two questions the session engine asks of that history:
//! what is the recent trend, and is the speaker emotionally ready to move on.
//!
//! Classification is a fixed threshold heuristic, deliberately not a trained
//! or pluggable model. There is no "unknown" outcome: weak or contradictory
//! signals collapse to Neutral at the minimum confidence.

pub mod classify;
pub mod history;
pub mod sensor;

pub use classify::*;
pub use history::*;
pub use sensor::*;
