//! Process-wide date-time context
//!
//! Holds the clock source behind [`Instant::now`](crate::Instant::now), the
//! default zone used when a constructor is given none, and the optional
//! display-format override. Everything lazily starts as [`SystemClock`],
//! UTC, and no override; [`reset`] returns to that state.
//!
//! Tests that touch the context share global state and should run
//! serially.
//!
//! # Examples
//!
//! ```
//! use tempora_core::{context, Instant, MockClock};
//!
//! let frozen = Instant::parse("2016-05-12T22:37:46Z", None).unwrap();
//! {
//!     let _guard = context::override_clock(MockClock::new(frozen));
//!     assert_eq!(Instant::now(), frozen);
//! }
//! // previous clock restored here
//! ```

use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::clock::{ClockSource, SystemClock};
use crate::errors::Result;
use crate::types::instant::validate_pattern;
use crate::types::Zone;

#[derive(Debug)]
struct Context {
    clock: Arc<dyn ClockSource>,
    default_timezone: Zone,
    format: Option<String>,
}

impl Default for Context {
    fn default() -> Self {
        Self { clock: Arc::new(SystemClock), default_timezone: Zone::utc(), format: None }
    }
}

static CONTEXT: Lazy<RwLock<Context>> = Lazy::new(|| RwLock::new(Context::default()));

/// Currently installed clock source
///
/// The handle is cloned out so callers never hold the context lock while
/// reading the clock.
#[must_use]
pub fn clock() -> Arc<dyn ClockSource> {
    Arc::clone(&CONTEXT.read().clock)
}

/// Install a clock source, returning the one it replaces
pub fn set_clock(clock: impl ClockSource + 'static) -> Arc<dyn ClockSource> {
    swap_clock(Arc::new(clock))
}

/// Reinstall the system clock
pub fn reset_clock() {
    swap_clock(Arc::new(SystemClock));
}

/// Install a clock source until the returned guard is dropped
#[must_use = "the previous clock is restored as soon as the guard is dropped"]
pub fn override_clock(clock: impl ClockSource + 'static) -> ClockOverride {
    ClockOverride { previous: Some(set_clock(clock)) }
}

fn swap_clock(clock: Arc<dyn ClockSource>) -> Arc<dyn ClockSource> {
    tracing::debug!(?clock, "clock source replaced");
    std::mem::replace(&mut CONTEXT.write().clock, clock)
}

/// RAII guard from [`override_clock`]
#[derive(Debug)]
pub struct ClockOverride {
    previous: Option<Arc<dyn ClockSource>>,
}

impl Drop for ClockOverride {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            swap_clock(previous);
        }
    }
}

/// Zone used when a constructor is not given one
#[must_use]
pub fn default_timezone() -> Zone {
    CONTEXT.read().default_timezone
}

/// Replace the default zone
pub fn set_default_timezone(zone: Zone) {
    tracing::debug!(%zone, "default timezone changed");
    CONTEXT.write().default_timezone = zone;
}

/// Display-format override, if any
#[must_use]
pub fn format() -> Option<String> {
    CONTEXT.read().format.clone()
}

/// Set or clear the display-format override
///
/// `None` restores canonical display. The override affects `Display` for
/// [`Instant`](crate::Instant) only; serialization stays canonical.
///
/// # Errors
/// Returns `DateTimeError::InvalidFormat` if the pattern cannot be
/// rendered. The previous override is kept in that case.
pub fn set_format(format: Option<String>) -> Result<()> {
    if let Some(pattern) = format.as_deref() {
        validate_pattern(pattern)?;
    }
    tracing::debug!(format = ?format, "display format changed");
    CONTEXT.write().format = format;
    Ok(())
}

/// Restore the system clock, UTC and canonical display
pub fn reset() {
    tracing::debug!("date-time context reset");
    *CONTEXT.write() = Context::default();
}
