//! Calendar engine port
//!
//! The engine owns calendar-aware subtraction. [`Duration`](crate::Duration)
//! only adapts what the engine reports, so a different engine can be
//! plugged in without touching the duration model.

use crate::types::Instant;

/// Raw result of a calendar-aware subtraction
///
/// Components are what the engine computed between the chronologically
/// earlier and later instant. `invert` records the direction: it is `true`
/// when the second operand is before the first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CalendarDiff {
    /// Whole years
    pub years: i64,
    /// Months left after the years
    pub months: i64,
    /// Days left after the months
    pub days: i64,
    /// Hours left after the days
    pub hours: i64,
    /// Minutes left after the hours
    pub minutes: i64,
    /// Seconds left after the minutes
    pub seconds: i64,
    /// Sub-second remainder
    pub microseconds: i64,
    /// `true` when `b` is earlier than `a`
    pub invert: bool,
}

/// Trait for calendar-aware instant subtraction
pub trait CalendarEngine: Send + Sync {
    /// Difference from `a` to `b`
    fn diff(&self, a: &Instant, b: &Instant) -> CalendarDiff;
}
