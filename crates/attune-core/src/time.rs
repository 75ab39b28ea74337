//! Time primitives for ATTUNE sessions
//!
//! All duration math in the workspace goes through [`SessionTime`] values
//! obtained from an injected [`Clock`]. Nothing below this module reads the
//! system clock directly, so tests can step time instead of sleeping.

use std::ops::{Add, Sub};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// A point in session time, microseconds since an arbitrary epoch.
///
/// The epoch is whatever the active [`Clock`] says it is: wall-clock Unix time
/// for [`SystemClock`], an explicit starting point for [`ManualClock`]. Only
/// differences between values are meaningful to the session logic.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionTime(pub i64);

impl SessionTime {
    pub const ZERO: SessionTime = SessionTime(0);
    pub const MAX: SessionTime = SessionTime(i64::MAX);

    #[inline]
    pub fn from_micros(micros: i64) -> Self {
        SessionTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: i64) -> Self {
        SessionTime(millis * 1000)
    }

    #[inline]
    pub fn from_secs(secs: i64) -> Self {
        SessionTime(secs * 1_000_000)
    }

    #[inline]
    pub fn from_secs_f64(secs: f64) -> Self {
        SessionTime((secs * 1_000_000.0) as i64)
    }

    #[inline]
    pub fn as_micros(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_millis(self) -> i64 {
        self.0 / 1000
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        SessionTime(self.0.saturating_add(duration.as_micros() as i64))
    }

    #[inline]
    pub fn saturating_sub(self, duration: Duration) -> Self {
        SessionTime(self.0.saturating_sub(duration.as_micros() as i64))
    }

    /// Seconds elapsed from `earlier` to `self`, zero if `earlier` is ahead.
    #[inline]
    pub fn secs_since(self, earlier: SessionTime) -> f64 {
        (self - earlier).as_secs_f64()
    }
}

impl Add<Duration> for SessionTime {
    type Output = SessionTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        SessionTime(self.0 + rhs.as_micros() as i64)
    }
}

impl Sub<Duration> for SessionTime {
    type Output = SessionTime;

    #[inline]
    fn sub(self, rhs: Duration) -> Self::Output {
        SessionTime(self.0 - rhs.as_micros() as i64)
    }
}

impl Sub<SessionTime> for SessionTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: SessionTime) -> Self::Output {
        let diff = self.0 - rhs.0;
        if diff >= 0 {
            Duration::from_micros(diff as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl std::fmt::Debug for SessionTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t+{:.3}s", self.as_secs_f64())
    }
}

/// Clock capability injected into every time-reading component.
pub trait Clock: Send + Sync {
    fn now(&self) -> SessionTime;
}

/// Shared handle to a clock implementation.
pub type SharedClock = Arc<dyn Clock>;

/// Wall-clock time since the Unix epoch.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SessionTime {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO);
        SessionTime(since_epoch.as_micros() as i64)
    }
}

/// Steppable clock for tests. Never advances on its own.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<SessionTime>,
}

impl ManualClock {
    pub fn new(start: SessionTime) -> Self {
        ManualClock {
            now: Mutex::new(start),
        }
    }

    /// Shared handle starting at `start`, ready to hand to components.
    pub fn shared(start: SessionTime) -> Arc<ManualClock> {
        Arc::new(ManualClock::new(start))
    }

    pub fn set(&self, to: SessionTime) {
        *self.now.lock() = to;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now = now.saturating_add(by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SessionTime {
        *self.now.lock()
    }
}
