//! # Tempora Core
//!
//! Immutable date-time values with timezone awareness and ISO-8601
//! durations.
//!
//! This crate contains:
//! - [`Instant`]: an absolute moment at microsecond resolution, displayed
//!   in a [`Zone`]
//! - [`Duration`]: six independent calendar components rendered as
//!   `P[nY][nM][nD][T[nH][nM][nS]]`
//! - [`calendar`]: the [`CalendarEngine`] port and its chrono-backed
//!   default
//! - [`clock`] and [`context`]: the replaceable source of "now" and the
//!   process-wide defaults
//!
//! ## Architecture Principles
//! - Only depends on `tempora-common` for shared error vocabulary
//! - No configuration files, environment variables or subscribers
//! - Calendar arithmetic behind a trait so the duration model stays small
//!
//! ```
//! use tempora_core::Instant;
//!
//! let earlier = Instant::parse("2015-02-22 14:33:54", None).unwrap();
//! let later = Instant::parse("2017-01-10 12:20:11", None).unwrap();
//!
//! assert_eq!(earlier.diff(&later, false).to_string(), "P1Y10M15DT21H46M17S");
//! assert_eq!(later.diff(&earlier, true).to_string(), "P1Y10M15DT21H46M17S");
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod calendar;
pub mod clock;
pub mod constants;
pub mod context;
pub mod errors;
pub mod types;

// Re-export specific items to avoid ambiguity
pub use calendar::{CalendarDiff, CalendarEngine, ChronoCalendar};
pub use clock::{ClockSource, MockClock, SystemClock};
pub use context::ClockOverride;
pub use errors::{DateTimeError, Result};
pub use types::{Duration, Instant, Zone};
