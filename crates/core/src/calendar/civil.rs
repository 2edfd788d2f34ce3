//! Default calendar engine: civil-time subtraction with borrowing
//!
//! The pair is ordered chronologically and the later reading is subtracted
//! from field by field, borrowing upward (µs → s → min → h → day → month →
//! year). A borrowed day is worth the length of the earlier reading's month.
//!
//! Instants sharing a zone are compared by their wall-clock readings, so a
//! diff across a daylight-saving change reports civil time rather than
//! elapsed time: 2016-08-22 12:00 to 2016-11-22 11:00 in Europe/Bratislava
//! is `P2M30DT23H`, not three whole months. Instants in different zones, or
//! whose wall-clock readings run backwards across a fall-back transition,
//! are compared in UTC. This engine never reports negative components.

use chrono::{Datelike, NaiveDateTime, Timelike};

use super::ports::{CalendarDiff, CalendarEngine};
use crate::constants::MICROS_PER_SECOND;
use crate::types::Instant;

/// Calendar engine backed by chrono's civil date-time types
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoCalendar;

impl CalendarEngine for ChronoCalendar {
    fn diff(&self, a: &Instant, b: &Instant) -> CalendarDiff {
        let invert = b < a;
        let (earlier, later) = if invert { (b, a) } else { (a, b) };

        let (from, to) = readings(earlier, later);
        CalendarDiff { invert, ..civil_difference(&from, &to) }
    }
}

/// Number of days in `month` (1-12) of the proleptic Gregorian `year`
#[must_use]
pub const fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn readings(earlier: &Instant, later: &Instant) -> (NaiveDateTime, NaiveDateTime) {
    if earlier.timezone() == later.timezone() {
        let (from, to) = (earlier.local(), later.local());
        if from <= to {
            return (from, to);
        }
    }
    (earlier.utc().naive_utc(), later.utc().naive_utc())
}

/// Subtract `from` from `to` (`from <= to`) field by field
fn civil_difference(from: &NaiveDateTime, to: &NaiveDateTime) -> CalendarDiff {
    let mut microseconds = micros_of(to) - micros_of(from);
    let carry = borrow(&mut microseconds, MICROS_PER_SECOND);

    let mut seconds = i64::from(to.second()) - i64::from(from.second()) - carry;
    let carry = borrow(&mut seconds, 60);

    let mut minutes = i64::from(to.minute()) - i64::from(from.minute()) - carry;
    let carry = borrow(&mut minutes, 60);

    let mut hours = i64::from(to.hour()) - i64::from(from.hour()) - carry;
    let carry = borrow(&mut hours, 24);

    let mut days = i64::from(to.day()) - i64::from(from.day()) - carry;
    let carry = borrow(&mut days, i64::from(days_in_month(from.year(), from.month())));

    let mut months = i64::from(to.month()) - i64::from(from.month()) - carry;
    let carry = borrow(&mut months, 12);

    let years = i64::from(to.year()) - i64::from(from.year()) - carry;

    CalendarDiff { years, months, days, hours, minutes, seconds, microseconds, invert: false }
}

fn micros_of(reading: &NaiveDateTime) -> i64 {
    i64::from(reading.nanosecond() / 1_000)
}

/// Bring a negative field back into range, returning the amount borrowed
/// from the next larger field
fn borrow(value: &mut i64, span: i64) -> i64 {
    if *value < 0 {
        *value += span;
        1
    } else {
        0
    }
}
