//! ISO-8601 durations as six non-carrying components
//!
//! A [`Duration`] is a container for the designator values of a
//! `P[nY][nM][nD][T[nH][nM][nS]]` string, not an elapsed-time scalar:
//! 90 minutes stays 90 minutes, it is never carried into an hour. That is
//! what lets `parse` and `to_canonical_string` invert each other exactly.
//!
//! # Examples
//!
//! ```
//! use tempora_core::Duration;
//!
//! let duration: Duration = "P11Y12M13DT14H15M16S".parse().unwrap();
//! assert_eq!(duration.components(), [11, 12, 13, 14, 15, 16]);
//! assert_eq!(duration.to_string(), "P11Y12M13DT14H15M16S");
//!
//! assert!(Duration::parse("P0D").unwrap().is_zero());
//! assert_eq!(Duration::ZERO.to_string(), "P0D");
//! ```

use std::fmt::{self, Write as _};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tempora_common::canonical_string;

use crate::calendar::{CalendarDiff, CalendarEngine, ChronoCalendar};
use crate::constants::{
    DATE_DESIGNATORS, PERIOD_DESIGNATOR, TIME_DESIGNATOR, TIME_DESIGNATORS, ZERO_DURATION,
};
use crate::errors::{DateTimeError, Result};
use crate::types::Instant;

/// Six-component duration (years, months, days, hours, minutes, seconds)
/// with a direction flag
///
/// A duration built from a diff keeps the components the calendar engine
/// reported and records the direction separately: `is_inverted` is `true`
/// when the diff ran from a later instant to an earlier one. The canonical
/// string renders the components only, so `later.diff(&earlier, false)`
/// and `earlier.diff(&later, false)` print the same text.
/// [`Duration::signed_components`] applies the direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Duration {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    invert: bool,
}

impl Duration {
    /// The all-zero duration, `P0D`
    pub const ZERO: Self = Self::from_parts(0, 0, 0, 0, 0, 0);

    /// Store six component values as given
    ///
    /// No normalisation or carrying takes place.
    #[must_use]
    pub const fn from_parts(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    ) -> Self {
        Self { years, months, days, hours, minutes, seconds, invert: false }
    }

    /// Parse a canonical duration string
    ///
    /// Grammar: `P[nY][nM][nD][T[nH][nM][nS]]` with non-negative decimal
    /// integers, each designator at most once and in that order. `T` must be
    /// followed by at least one time component. `P` alone is rejected; the
    /// zero duration is written `P0D`.
    ///
    /// # Errors
    /// Returns `DateTimeError::MalformedDuration` naming the first grammar
    /// violation.
    pub fn parse(text: &str) -> Result<Self> {
        let result = parse_components(text);
        if let Err(ref err) = result {
            tracing::trace!(input = text, error = %err, "duration rejected");
        }
        result
    }

    /// Adapt a calendar-engine diff into a duration
    ///
    /// - `absolute`: every component becomes its magnitude and the direction
    ///   is dropped.
    /// - otherwise the components are kept exactly as the engine reported
    ///   them, including a sign the engine used to absorb an offset change,
    ///   and the engine's `invert` flag becomes [`Duration::is_inverted`].
    ///
    /// Sub-second differences are not represented and are dropped.
    #[must_use]
    pub fn from_calendar_diff(diff: &CalendarDiff, absolute: bool) -> Self {
        let raw = [diff.years, diff.months, diff.days, diff.hours, diff.minutes, diff.seconds];

        if absolute {
            Self::from_components(raw.map(i64::saturating_abs), false)
        } else {
            Self::from_components(raw, diff.invert)
        }
    }

    /// Duration between `a` and `b` using the default calendar engine
    #[must_use]
    pub fn from_instant_diff(a: &Instant, b: &Instant, absolute: bool) -> Self {
        Self::from_instant_diff_with(&ChronoCalendar, a, b, absolute)
    }

    /// Duration between `a` and `b` using an explicit calendar engine
    #[must_use]
    pub fn from_instant_diff_with(
        engine: &dyn CalendarEngine,
        a: &Instant,
        b: &Instant,
        absolute: bool,
    ) -> Self {
        Self::from_calendar_diff(&engine.diff(a, b), absolute)
    }

    /// Render the canonical string
    ///
    /// Zero components are omitted, `T` is emitted only when a time
    /// component is non-zero, and the all-zero duration renders as `P0D`.
    /// Negative components carry their `-` inside the designator (`T-1H`).
    /// The direction flag is not rendered.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        self.to_string()
    }

    /// Years component
    #[must_use]
    pub const fn years(&self) -> i64 {
        self.years
    }

    /// Months component
    #[must_use]
    pub const fn months(&self) -> i64 {
        self.months
    }

    /// Days component
    #[must_use]
    pub const fn days(&self) -> i64 {
        self.days
    }

    /// Hours component
    #[must_use]
    pub const fn hours(&self) -> i64 {
        self.hours
    }

    /// Minutes component
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        self.minutes
    }

    /// Seconds component
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    /// `true` when built from a diff whose second instant is the earlier one
    #[must_use]
    pub const fn is_inverted(&self) -> bool {
        self.invert
    }

    /// Components with the direction applied
    ///
    /// Not inverted, this is [`Duration::components`]. Inverted, every
    /// component is negated except one the engine reported as negative while
    /// a larger unit is positive; that sign is the engine absorbing an
    /// offset change and is kept as reported. Zero stays zero.
    #[must_use]
    pub fn signed_components(&self) -> [i64; 6] {
        let raw = self.components();
        if !self.invert {
            return raw;
        }

        let mut signed = raw;
        for (index, value) in signed.iter_mut().enumerate() {
            let incongruent = *value < 0 && raw[..index].iter().any(|larger| *larger > 0);
            if !incongruent {
                *value = value.saturating_neg();
            }
        }
        signed
    }

    /// All components as `[years, months, days, hours, minutes, seconds]`
    #[must_use]
    pub const fn components(&self) -> [i64; 6] {
        [self.years, self.months, self.days, self.hours, self.minutes, self.seconds]
    }

    /// Whether every component is zero
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.years == 0
            && self.months == 0
            && self.days == 0
            && self.hours == 0
            && self.minutes == 0
            && self.seconds == 0
    }

    const fn from_components(c: [i64; 6], invert: bool) -> Self {
        Self {
            years: c[0],
            months: c[1],
            days: c[2],
            hours: c[3],
            minutes: c[4],
            seconds: c[5],
            invert,
        }
    }
}

fn write_section(
    f: &mut fmt::Formatter<'_>,
    values: &[i64; 3],
    designators: &[char; 3],
) -> fmt::Result {
    for (value, designator) in values.iter().zip(designators) {
        if *value != 0 {
            write!(f, "{value}{designator}")?;
        }
    }
    Ok(())
}

fn parse_components(text: &str) -> Result<Duration> {
    let body = text.strip_prefix(PERIOD_DESIGNATOR).ok_or_else(|| {
        DateTimeError::malformed_duration(text, format!("must start with '{PERIOD_DESIGNATOR}'"))
    })?;
    if body.is_empty() {
        return Err(DateTimeError::malformed_duration(text, "no components"));
    }

    let (date_part, time_part) = match body.split_once(TIME_DESIGNATOR) {
        Some((_, "")) => {
            return Err(DateTimeError::malformed_duration(
                text,
                format!("'{TIME_DESIGNATOR}' must be followed by a time component"),
            ));
        }
        Some((date, time)) => (date, Some(time)),
        None => (body, None),
    };

    let [years, months, days] = parse_section(text, date_part, &DATE_DESIGNATORS)?;
    let [hours, minutes, seconds] = match time_part {
        Some(time) => parse_section(text, time, &TIME_DESIGNATORS)?,
        None => [0; 3],
    };

    Ok(Duration::from_parts(years, months, days, hours, minutes, seconds))
}

/// Parse one half of a duration against its ordered designators
fn parse_section(input: &str, section: &str, designators: &[char; 3]) -> Result<[i64; 3]> {
    let mut values = [0_i64; 3];
    let mut next_slot = 0;
    let mut number = String::new();

    for ch in section.chars() {
        if ch.is_ascii_digit() {
            number.push(ch);
            continue;
        }

        let slot = designators[next_slot..]
            .iter()
            .position(|d| *d == ch)
            .map(|offset| next_slot + offset)
            .ok_or_else(|| {
                let reason = if designators.contains(&ch) {
                    format!("designator '{ch}' is repeated or out of order")
                } else {
                    format!("unexpected character '{ch}'")
                };
                DateTimeError::malformed_duration(input, reason)
            })?;

        if number.is_empty() {
            return Err(DateTimeError::malformed_duration(
                input,
                format!("expected a number before '{ch}'"),
            ));
        }

        values[slot] = number.parse().map_err(|_| {
            DateTimeError::malformed_duration(input, format!("number '{number}' is out of range"))
        })?;
        number.clear();
        next_slot = slot + 1;
    }

    if !number.is_empty() {
        return Err(DateTimeError::malformed_duration(
            input,
            format!("number '{number}' has no designator"),
        ));
    }

    Ok(values)
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str(ZERO_DURATION);
        }

        f.write_char(PERIOD_DESIGNATOR)?;
        write_section(f, &[self.years, self.months, self.days], &DATE_DESIGNATORS)?;
        if self.hours != 0 || self.minutes != 0 || self.seconds != 0 {
            f.write_char(TIME_DESIGNATOR)?;
            write_section(f, &[self.hours, self.minutes, self.seconds], &TIME_DESIGNATORS)?;
        }
        Ok(())
    }
}

impl FromStr for Duration {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Serialized as the canonical string; the direction flag is not carried.
impl Serialize for Duration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        canonical_string::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Duration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        canonical_string::deserialize(deserializer)
    }
}
