//! Clock sources for "now"
//!
//! [`Instant::now`] reads whichever source is installed in the process
//! [`context`](crate::context). Production code uses [`SystemClock`]; tests
//! install a [`MockClock`] and move it by hand.
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//!
//! use tempora_core::{ClockSource, Instant, MockClock};
//!
//! let start = Instant::parse("2016-05-12T22:37:46Z", None).unwrap();
//! let clock = MockClock::new(start);
//!
//! clock.advance(Duration::from_secs(90));
//! assert_eq!(clock.now().to_canonical_string(), "2016-05-12T22:39:16+00:00");
//! ```

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

use crate::context;
use crate::types::Instant;

/// Trait for anything that can answer "what time is it"
pub trait ClockSource: Send + Sync + Debug {
    /// Current moment
    fn now(&self) -> Instant;
}

/// Real system clock
///
/// Reads the operating system wall clock at microsecond precision and
/// reports it in the process default zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> Instant {
        Instant::from_utc(Utc::now(), context::default_timezone())
    }
}

/// Mock clock for deterministic tests
///
/// The clock stands still until moved. Clones share the same reading, so a
/// test can keep one handle while the context holds another.
#[derive(Debug, Clone)]
pub struct MockClock {
    current: Arc<Mutex<Instant>>,
}

impl MockClock {
    /// Create a mock clock frozen at `start`
    #[must_use]
    pub fn new(start: Instant) -> Self {
        Self { current: Arc::new(Mutex::new(start)) }
    }

    /// Move the clock forward
    ///
    /// A step that would leave the representable range is logged and
    /// ignored.
    pub fn advance(&self, step: StdDuration) {
        self.shift(step, "advance", |utc, delta| utc.checked_add_signed(delta));
    }

    /// Move the clock backward
    pub fn rewind(&self, step: StdDuration) {
        self.shift(step, "rewind", |utc, delta| utc.checked_sub_signed(delta));
    }

    /// Jump to an absolute moment
    pub fn set(&self, instant: Instant) {
        *self.current.lock() = instant;
    }

    fn shift(
        &self,
        step: StdDuration,
        direction: &str,
        apply: impl FnOnce(DateTime<Utc>, TimeDelta) -> Option<DateTime<Utc>>,
    ) {
        let mut current = self.current.lock();
        let shifted = TimeDelta::from_std(step).ok().and_then(|delta| apply(current.utc(), delta));
        match shifted {
            Some(utc) => *current = Instant::from_utc(utc, current.timezone()),
            None => tracing::warn!(?step, direction, "mock clock step out of range, ignored"),
        }
    }
}

impl ClockSource for MockClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }
}
