//! Windowed emotion history and its derived signals
//!
//! The store holds chronological [`EmotionState`] samples and evicts on every
//! insert, so no entry older than the window survives an insertion. The trend
//! and readiness predicates are exposed as free functions over slices as well:
//! the session engine applies them to its own journey log, and both callers
//! therefore share one implementation.

use std::time::Duration;

use attune_core::{EmotionState, EmotionType, SessionTime};

/// Default retention of the windowed store.
pub const DEFAULT_HISTORY_WINDOW: Duration = Duration::from_secs(300);
/// Conventional lookback for trend queries.
pub const TREND_WINDOW: Duration = Duration::from_secs(30);
/// Conventional lookback for readiness queries.
pub const READINESS_WINDOW: Duration = Duration::from_secs(60);
/// Readiness samples at most this many of the newest entries in the window.
pub const READINESS_SAMPLE: usize = 3;

/// Retention configuration for [`EmotionHistory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryConfig {
    pub window: Duration,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            window: DEFAULT_HISTORY_WINDOW,
        }
    }
}

/// Append-only, time-windowed store of classified samples.
///
/// Entries must arrive in chronological order; the newest entry's timestamp
/// anchors eviction.
#[derive(Clone, Debug, Default)]
pub struct EmotionHistory {
    config: HistoryConfig,
    entries: Vec<EmotionState>,
}

impl EmotionHistory {
    pub fn new(config: HistoryConfig) -> Self {
        EmotionHistory {
            config,
            entries: Vec::new(),
        }
    }

    pub fn with_window(window: Duration) -> Self {
        EmotionHistory::new(HistoryConfig { window })
    }

    pub fn window(&self) -> Duration {
        self.config.window
    }

    /// Append a sample and drop everything older than the window, measured
    /// from the new sample's timestamp.
    pub fn insert(&mut self, state: EmotionState) {
        let cutoff = state.timestamp.saturating_sub(self.config.window);
        self.entries.push(state);
        let keep_from = self.entries.partition_point(|e| e.timestamp < cutoff);
        if keep_from > 0 {
            self.entries.drain(..keep_from);
        }
    }

    /// Entries whose timestamps fall within `window` of `now`, oldest first.
    pub fn recent(&self, now: SessionTime, window: Duration) -> &[EmotionState] {
        let cutoff = now.saturating_sub(window);
        let from = self.entries.partition_point(|e| e.timestamp < cutoff);
        &self.entries[from..]
    }

    /// Everything currently retained, oldest first.
    pub fn all(&self) -> &[EmotionState] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&EmotionState> {
        self.entries.last()
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Majority emotion within the window; empty windows read as Neutral.
    pub fn trend(&self, now: SessionTime, window: Duration) -> EmotionType {
        predominant_emotion(self.recent(now, window)).unwrap_or(EmotionType::Neutral)
    }

    /// Readiness over the newest [`READINESS_SAMPLE`] entries in the window.
    pub fn is_ready_for_transition(&self, now: SessionTime, window: Duration) -> bool {
        emotional_readiness(self.recent(now, window))
    }
}

/// Majority vote over a chronological slice. Ties resolve to the lowest
/// [`EmotionType::rank`]; an empty slice has no majority.
pub fn predominant_emotion(entries: &[EmotionState]) -> Option<EmotionType> {
    if entries.is_empty() {
        return None;
    }

    let mut counts = [0usize; 6];
    for entry in entries {
        counts[entry.emotion.rank() as usize] += 1;
    }

    let mut best = EmotionType::Neutral;
    let mut best_count = 0usize;
    for emotion in EmotionType::ALL {
        let count = counts[emotion.rank() as usize];
        if count > best_count {
            best = emotion;
            best_count = count;
        }
    }
    Some(best)
}

/// Readiness predicate over a window of samples.
///
/// Fewer than [`READINESS_SAMPLE`] entries in the window mean there is not
/// enough signal: not ready. Otherwise only the newest `READINESS_SAMPLE`
/// entries count. Any Sad sample forces not-ready regardless of the rest;
/// otherwise ready-set members must make up at least half the sample, with
/// exact halves counting as ready.
pub fn emotional_readiness(entries: &[EmotionState]) -> bool {
    if entries.len() < READINESS_SAMPLE {
        return false;
    }
    let sample = &entries[entries.len() - READINESS_SAMPLE..];

    if sample.iter().any(|e| e.emotion == EmotionType::Sad) {
        return false;
    }

    let ready = sample.iter().filter(|e| e.emotion.is_ready()).count();
    ready * 2 >= sample.len()
}

/// Gate parameters for forwarding classifications downstream.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GateConfig {
    /// Samples below this confidence are never forwarded.
    pub min_confidence: f32,
    /// An unchanged emotion is forwarded again only after this long.
    pub min_interval: Duration,
}

impl Default for GateConfig {
    fn default() -> Self {
        GateConfig {
            min_confidence: 0.4,
            min_interval: Duration::from_secs(10),
        }
    }
}

/// Emission throttle for consumers that forward samples downstream.
///
/// Forward a sample only when it is confident enough AND it is the first, or
/// the emotion changed, or the interval elapsed since the last forwarded one.
/// This is caller policy, kept out of the store itself.
#[derive(Clone, Debug, Default)]
pub struct EmissionGate {
    config: GateConfig,
    last: Option<(EmotionType, SessionTime)>,
}

impl EmissionGate {
    pub fn new(config: GateConfig) -> Self {
        EmissionGate { config, last: None }
    }

    /// Decide whether to forward `state`; admitting records it as the last
    /// forwarded sample.
    pub fn admit(&mut self, state: &EmotionState) -> bool {
        if state.confidence < self.config.min_confidence {
            return false;
        }

        let admit = match self.last {
            None => true,
            Some((emotion, at)) => {
                state.emotion != emotion || state.timestamp - at >= self.config.min_interval
            }
        };

        if admit {
            self.last = Some((state.emotion, state.timestamp));
        }
        admit
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use attune_core::SmoothedFeatures;

    fn sample(emotion: EmotionType, at_secs: i64) -> EmotionState {
        EmotionState::new(
            emotion,
            0.8,
            SessionTime::from_secs(at_secs),
            SmoothedFeatures::default(),
        )
    }

    #[test]
    fn test_insert_evicts_entries_older_than_window() {
        let mut history = EmotionHistory::default();
        history.insert(sample(EmotionType::Neutral, 0));
        history.insert(sample(EmotionType::Neutral, 100));
        history.insert(sample(EmotionType::Positive, 301));

        // The t=0 entry is now older than the 300 s window
        assert_eq!(history.len(), 2);
        assert_eq!(history.all()[0].timestamp, SessionTime::from_secs(100));
    }

    #[test]
    fn test_recent_respects_window_boundary() {
        let mut history = EmotionHistory::default();
        history.insert(sample(EmotionType::Neutral, 10));
        history.insert(sample(EmotionType::Positive, 50));
        history.insert(sample(EmotionType::Sad, 90));

        let now = SessionTime::from_secs(100);
        let recent = history.recent(now, Duration::from_secs(60));
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].emotion, EmotionType::Positive);
    }

    #[test]
    fn test_trend_on_empty_history_is_neutral() {
        let history = EmotionHistory::default();
        assert_eq!(
            history.trend(SessionTime::from_secs(100), TREND_WINDOW),
            EmotionType::Neutral
        );
    }

    #[test]
    fn test_trend_majority_and_tie_break() {
        let mut history = EmotionHistory::default();
        history.insert(sample(EmotionType::Positive, 1));
        history.insert(sample(EmotionType::Positive, 2));
        history.insert(sample(EmotionType::Anxious, 3));

        let now = SessionTime::from_secs(5);
        assert_eq!(history.trend(now, TREND_WINDOW), EmotionType::Positive);

        // One Defensive against one Positive: tied counts, lower rank wins
        let mut tied = EmotionHistory::default();
        tied.insert(sample(EmotionType::Positive, 1));
        tied.insert(sample(EmotionType::Defensive, 2));
        assert_eq!(tied.trend(now, TREND_WINDOW), EmotionType::Defensive);
    }

    #[test]
    fn test_readiness_needs_three_samples() {
        let mut history = EmotionHistory::default();
        history.insert(sample(EmotionType::Positive, 1));
        history.insert(sample(EmotionType::Positive, 2));

        let now = SessionTime::from_secs(5);
        assert!(!history.is_ready_for_transition(now, READINESS_WINDOW));

        history.insert(sample(EmotionType::Positive, 3));
        assert!(history.is_ready_for_transition(now, READINESS_WINDOW));
    }

    #[test]
    fn test_any_sad_sample_forces_not_ready() {
        let mut history = EmotionHistory::default();
        history.insert(sample(EmotionType::Positive, 1));
        history.insert(sample(EmotionType::Sad, 2));
        history.insert(sample(EmotionType::Positive, 3));

        let now = SessionTime::from_secs(5);
        assert!(!history.is_ready_for_transition(now, READINESS_WINDOW));
    }

    #[test]
    fn test_sad_outside_sample_does_not_block() {
        let mut history = EmotionHistory::default();
        history.insert(sample(EmotionType::Sad, 1));
        history.insert(sample(EmotionType::Neutral, 2));
        history.insert(sample(EmotionType::Positive, 3));
        history.insert(sample(EmotionType::Neutral, 4));

        // Sample is the last three entries; the Sad at t=1 is outside it
        let now = SessionTime::from_secs(5);
        assert!(history.is_ready_for_transition(now, READINESS_WINDOW));
    }

    #[test]
    fn test_distressed_majority_is_not_ready() {
        let mut history = EmotionHistory::default();
        history.insert(sample(EmotionType::Defensive, 1));
        history.insert(sample(EmotionType::Frustrated, 2));
        history.insert(sample(EmotionType::Neutral, 3));

        // One ready of three: 2*1 < 3
        let now = SessionTime::from_secs(5);
        assert!(!history.is_ready_for_transition(now, READINESS_WINDOW));
    }

    #[test]
    fn test_two_ready_of_three_is_ready() {
        let mut history = EmotionHistory::default();
        history.insert(sample(EmotionType::Neutral, 1));
        history.insert(sample(EmotionType::Defensive, 2));
        history.insert(sample(EmotionType::Positive, 3));

        let now = SessionTime::from_secs(5);
        assert!(history.is_ready_for_transition(now, READINESS_WINDOW));
    }

    #[test]
    fn test_old_entries_leave_readiness_window() {
        let mut history = EmotionHistory::default();
        history.insert(sample(EmotionType::Positive, 1));
        history.insert(sample(EmotionType::Positive, 2));
        history.insert(sample(EmotionType::Positive, 3));

        // Sixty-plus seconds later only the stale entries exist
        let now = SessionTime::from_secs(200);
        assert!(!history.is_ready_for_transition(now, READINESS_WINDOW));
    }

    #[test]
    fn test_gate_admits_first_confident_sample() {
        let mut gate = EmissionGate::default();
        assert!(gate.admit(&sample(EmotionType::Neutral, 0)));
    }

    #[test]
    fn test_gate_rejects_low_confidence_without_recording() {
        let mut gate = EmissionGate::default();
        let weak = EmotionState::new(
            EmotionType::Defensive,
            0.35,
            SessionTime::from_secs(0),
            SmoothedFeatures::default(),
        );
        assert!(!gate.admit(&weak));

        // The rejected sample was not recorded, so the next one is "first"
        assert!(gate.admit(&sample(EmotionType::Defensive, 1)));
    }

    #[test]
    fn test_gate_suppresses_unchanged_emotion_within_interval() {
        let mut gate = EmissionGate::default();
        assert!(gate.admit(&sample(EmotionType::Neutral, 0)));
        assert!(!gate.admit(&sample(EmotionType::Neutral, 5)));
        // Change of emotion passes immediately
        assert!(gate.admit(&sample(EmotionType::Frustrated, 6)));
        // Unchanged again, but the interval elapsed
        assert!(gate.admit(&sample(EmotionType::Frustrated, 16)));
    }

    #[test]
    fn test_gate_reset_forgets_last_emission() {
        let mut gate = EmissionGate::default();
        assert!(gate.admit(&sample(EmotionType::Neutral, 0)));
        gate.reset();
        assert!(gate.admit(&sample(EmotionType::Neutral, 1)));
    }
}
