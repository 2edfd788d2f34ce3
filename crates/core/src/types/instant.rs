//! Immutable points in time with a timezone and microsecond resolution
//!
//! An [`Instant`] is an absolute moment plus the [`Zone`] it is displayed
//! in. Equality, hashing and ordering look only at the absolute moment, so
//! `22:37:46+02:00` equals `20:37:46Z`.
//!
//! # Examples
//!
//! ```
//! use tempora_core::{Instant, Zone};
//!
//! let zoned = Instant::parse("2016-05-12T22:37:46+02:00", None).unwrap();
//! let named = Instant::parse(
//!     "2016-05-12 22:37:46.000000",
//!     Some(Zone::named("Europe/Bratislava").unwrap()),
//! )
//! .unwrap();
//! assert_eq!(zoned, named);
//!
//! assert_eq!(zoned.to_canonical_string(), "2016-05-12T22:37:46+02:00");
//! ```

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tempora_common::canonical_string;

use super::duration::Duration;
use super::zone::{parse_offset, Zone};
use crate::calendar::CalendarEngine;
use crate::clock::ClockSource;
use crate::constants::{CANONICAL_FORMAT, CANONICAL_FORMAT_MICROS, MICROS_PER_SECOND};
use crate::context;
use crate::errors::{DateTimeError, Result};

/// Local formats tried after the date-only form, separator normalised to `T`
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Length of the `YYYY-MM-DD` prefix
const DATE_LEN: usize = 10;

/// An absolute moment at microsecond resolution, displayed in a [`Zone`]
#[derive(Debug, Clone, Copy)]
pub struct Instant {
    utc: DateTime<Utc>,
    zone: Zone,
}

impl Instant {
    /// The current moment according to the process-wide clock source
    #[must_use]
    pub fn now() -> Self {
        context::clock().now()
    }

    /// The current moment according to an explicit clock source
    #[must_use]
    pub fn now_with(clock: &dyn ClockSource) -> Self {
        clock.now()
    }

    /// Wrap a chrono UTC moment, truncating below microseconds
    #[must_use]
    pub fn from_utc(utc: DateTime<Utc>, zone: Zone) -> Self {
        // Leap-second readings carry nanos >= 1e9; pin them to the last
        // representable microsecond of that second.
        let nanos = utc.nanosecond().min(999_999_999) / 1_000 * 1_000;
        let utc = utc.with_nanosecond(nanos).unwrap_or(utc);
        Self { utc, zone }
    }

    /// Whole seconds since the Unix epoch, zero microseconds
    ///
    /// Without a zone the process default zone is used.
    ///
    /// # Errors
    /// Returns `DateTimeError::OutOfRange` if the calendar engine cannot
    /// represent the moment.
    pub fn from_epoch_seconds(seconds: i64, zone: Option<Zone>) -> Result<Self> {
        let utc = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| DateTimeError::OutOfRange(format!("epoch seconds {seconds}")))?;
        Ok(Self::from_utc(utc, zone.unwrap_or_else(context::default_timezone)))
    }

    /// Fractional seconds since the Unix epoch
    ///
    /// The value is split into its floor and a fraction in `[0, 1)`, so
    /// `-1.25` becomes second `-2` plus 750 000 µs. The fraction is rounded
    /// to the nearest microsecond; rounding up to a whole second carries.
    ///
    /// # Errors
    /// Returns `DateTimeError::OutOfRange` for NaN, infinities, and moments
    /// the calendar engine cannot represent.
    pub fn from_epoch_seconds_f64(value: f64, zone: Option<Zone>) -> Result<Self> {
        let out_of_range = || DateTimeError::OutOfRange(format!("epoch seconds {value}"));
        if !value.is_finite() {
            return Err(out_of_range());
        }

        let whole = value.floor();
        let mut micros = ((value - whole) * 1e6).round() as i64;
        let mut seconds = whole as i64;
        if micros >= MICROS_PER_SECOND {
            seconds = seconds.checked_add(1).ok_or_else(out_of_range)?;
            micros = 0;
        }

        let nanos = u32::try_from(micros * 1_000).map_err(|_| out_of_range())?;
        let utc = DateTime::from_timestamp(seconds, nanos).ok_or_else(out_of_range)?;
        Ok(Self::from_utc(utc, zone.unwrap_or_else(context::default_timezone)))
    }

    /// Parse a date/time string
    ///
    /// Accepted forms: `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, and
    /// `YYYY-MM-DD HH:MM:SS[.f]` (`T` or space as separator), optionally
    /// followed by `Z` or a `±HH[:MM]` offset. An offset in the text decides
    /// the zone; otherwise `zone`, otherwise the process default zone.
    /// Fractions finer than a microsecond are truncated.
    ///
    /// # Errors
    /// Returns `DateTimeError::MalformedInstant` if the text is not a
    /// date/time in one of these forms.
    pub fn parse(text: &str, zone: Option<Zone>) -> Result<Self> {
        let result = parse_instant(text, zone);
        if let Err(ref err) = result {
            tracing::trace!(input = text, error = %err, "instant rejected");
        }
        result
    }

    /// Same moment, displayed in another zone
    #[must_use]
    pub const fn with_timezone(&self, zone: Zone) -> Self {
        Self { utc: self.utc, zone }
    }

    /// Same moment, displayed in the process default zone
    #[must_use]
    pub fn in_default_timezone(&self) -> Self {
        self.with_timezone(context::default_timezone())
    }

    /// Calendar duration between `self` and `other`
    ///
    /// The components are the engine's reading of the gap; the result is
    /// [inverted](Duration::is_inverted) when `other` is earlier than
    /// `self`. With `absolute` set the result holds magnitudes only and no
    /// direction, so `a.diff(&b, true) == b.diff(&a, true)`.
    #[must_use]
    pub fn diff(&self, other: &Self, absolute: bool) -> Duration {
        Duration::from_instant_diff(self, other, absolute)
    }

    /// [`Instant::diff`] with an explicit calendar engine
    #[must_use]
    pub fn diff_with(&self, engine: &dyn CalendarEngine, other: &Self, absolute: bool) -> Duration {
        Duration::from_instant_diff_with(engine, self, other, absolute)
    }

    /// Render the canonical ISO-8601 string
    ///
    /// `YYYY-MM-DDTHH:MM:SS±HH:MM` when the microsecond field is zero,
    /// otherwise `YYYY-MM-DDTHH:MM:SS.ffffff±HH:MM` with exactly six digits.
    #[must_use]
    pub fn to_canonical_string(&self) -> String {
        let pattern =
            if self.microsecond() == 0 { CANONICAL_FORMAT } else { CANONICAL_FORMAT_MICROS };
        self.zoned().format(pattern).to_string()
    }

    /// Render with a strftime-style pattern
    ///
    /// # Errors
    /// Returns `DateTimeError::InvalidFormat` if chrono rejects the pattern.
    pub fn format(&self, pattern: &str) -> Result<String> {
        validate_pattern(pattern)?;
        let mut out = String::new();
        write!(out, "{}", self.zoned().format(pattern))
            .map_err(|_| DateTimeError::InvalidFormat(pattern.to_string()))?;
        Ok(out)
    }

    /// Whole seconds since the Unix epoch
    #[must_use]
    pub fn epoch_seconds(&self) -> i64 {
        self.utc.timestamp()
    }

    /// Microsecond fraction, always in `[0, 999_999]`
    #[must_use]
    pub fn microsecond(&self) -> u32 {
        self.utc.timestamp_subsec_micros()
    }

    /// Display zone
    #[must_use]
    pub const fn timezone(&self) -> Zone {
        self.zone
    }

    /// UTC offset in effect at this moment in the display zone
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        self.zone.offset_at(&self.utc)
    }

    /// Wall-clock reading in the display zone
    #[must_use]
    pub fn local(&self) -> NaiveDateTime {
        self.zone.to_local(&self.utc)
    }

    /// The moment as a chrono UTC value
    #[must_use]
    pub const fn utc(&self) -> DateTime<Utc> {
        self.utc
    }

    fn zoned(&self) -> DateTime<FixedOffset> {
        self.utc.with_timezone(&self.offset())
    }
}

/// Reject strftime patterns chrono cannot render
pub(crate) fn validate_pattern(pattern: &str) -> Result<()> {
    if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
        return Err(DateTimeError::InvalidFormat(pattern.to_string()));
    }
    Ok(())
}

fn parse_instant(text: &str, zone: Option<Zone>) -> Result<Instant> {
    let trimmed = text.trim();
    let (local_part, explicit_zone) = split_offset(trimmed)
        .ok_or_else(|| DateTimeError::malformed_instant(text, "invalid UTC offset"))?;

    let local = parse_local(local_part).ok_or_else(|| {
        DateTimeError::malformed_instant(text, "expected YYYY-MM-DD[THH:MM[:SS[.f]]][±HH:MM]")
    })?;

    let zone = explicit_zone.or(zone).unwrap_or_else(context::default_timezone);
    let utc = zone
        .from_local(&local)
        .ok_or_else(|| DateTimeError::malformed_instant(text, format!("not a time in {zone}")))?;

    Ok(Instant::from_utc(utc, zone))
}

/// Split a trailing `Z` or numeric offset off the time portion
///
/// Returns `None` when a suffix is present but is not a valid offset.
fn split_offset(text: &str) -> Option<(&str, Option<Zone>)> {
    if let Some(rest) = text.strip_suffix(['Z', 'z']) {
        return Some((rest, Some(Zone::utc())));
    }

    let Some(time_portion) = text.get(DATE_LEN..) else {
        return Some((text, None));
    };
    match time_portion.rfind(['+', '-']) {
        Some(index) => {
            let split = DATE_LEN + index;
            let offset = parse_offset(&text[split..])?;
            Some((&text[..split], Some(Zone::Fixed(offset))))
        }
        None => Some((text, None)),
    }
}

fn parse_local(text: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    let normalized = normalize_separator(text);
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
}

fn normalize_separator(text: &str) -> Cow<'_, str> {
    match text.as_bytes().get(DATE_LEN) {
        Some(b' ' | b't') => {
            let mut owned = text.to_string();
            owned.replace_range(DATE_LEN..=DATE_LEN, "T");
            Cow::Owned(owned)
        }
        _ => Cow::Borrowed(text),
    }
}

impl PartialEq for Instant {
    fn eq(&self, other: &Self) -> bool {
        self.utc == other.utc
    }
}

impl Eq for Instant {}

impl Hash for Instant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.utc.hash(state);
    }
}

impl PartialOrd for Instant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.utc.cmp(&other.utc)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match context::format() {
            Some(pattern) => match self.format(&pattern) {
                Ok(rendered) => f.write_str(&rendered),
                Err(_) => f.write_str(&self.to_canonical_string()),
            },
            None => f.write_str(&self.to_canonical_string()),
        }
    }
}

impl FromStr for Instant {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s, None)
    }
}

impl From<DateTime<Utc>> for Instant {
    fn from(utc: DateTime<Utc>) -> Self {
        Self::from_utc(utc, Zone::utc())
    }
}

impl Serialize for Instant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_canonical_string())
    }
}

impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        canonical_string::deserialize(deserializer)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for types::instant.
    use super::*;

    fn utc_zone() -> Option<Zone> {
        Some(Zone::utc())
    }

    fn bratislava() -> Zone {
        Zone::named("Europe/Bratislava").unwrap()
    }

    /// Validates `Instant::from_epoch_seconds`.
    ///
    /// Assertions:
    /// - 1463490311 renders as 2016-05-17T15:05:11+02:00 in Bratislava.
    /// - The microsecond field is zero.
    #[test]
    fn test_from_epoch_seconds() {
        let instant = Instant::from_epoch_seconds(1_463_490_311, Some(bratislava())).unwrap();
        assert_eq!(instant.to_canonical_string(), "2016-05-17T15:05:11+02:00");
        assert_eq!(instant.microsecond(), 0);
        assert_eq!(instant.epoch_seconds(), 1_463_490_311);
    }

    #[test]
    fn test_from_epoch_seconds_out_of_range() {
        assert!(matches!(
            Instant::from_epoch_seconds(i64::MAX, utc_zone()),
            Err(DateTimeError::OutOfRange(_))
        ));
    }

    /// Validates fractional epoch splitting.
    ///
    /// Assertions:
    /// - Positive fractions round to the nearest microsecond.
    /// - Negative values keep a non-negative fraction.
    /// - A fraction rounding to one second carries.
    #[test]
    fn test_from_epoch_seconds_f64() {
        let positive = Instant::from_epoch_seconds_f64(1_463_490_311.5, utc_zone()).unwrap();
        assert_eq!(positive.epoch_seconds(), 1_463_490_311);
        assert_eq!(positive.microsecond(), 500_000);

        let negative = Instant::from_epoch_seconds_f64(-1.25, utc_zone()).unwrap();
        assert_eq!(negative.epoch_seconds(), -2);
        assert_eq!(negative.microsecond(), 750_000);
        assert_eq!(negative.to_canonical_string(), "1969-12-31T23:59:58.750000+00:00");

        let carried = Instant::from_epoch_seconds_f64(10.999_999_9, utc_zone()).unwrap();
        assert_eq!(carried.epoch_seconds(), 11);
        assert_eq!(carried.microsecond(), 0);
    }

    #[test]
    fn test_from_epoch_seconds_f64_rejects_non_finite() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 1e300] {
            assert!(matches!(
                Instant::from_epoch_seconds_f64(value, utc_zone()),
                Err(DateTimeError::OutOfRange(_))
            ));
        }
    }

    /// Validates the accepted textual forms.
    #[test]
    fn test_parse_forms() {
        let cases = [
            ("2016-05-12", "2016-05-12T00:00:00+00:00"),
            ("2016-05-12 22:37", "2016-05-12T22:37:00+00:00"),
            ("2016-05-12T22:37:46", "2016-05-12T22:37:46+00:00"),
            ("2016-05-12t22:37:46z", "2016-05-12T22:37:46+00:00"),
            ("2016-05-12 22:37:46.5", "2016-05-12T22:37:46.500000+00:00"),
            ("2016-05-12 22:37:46.123456789", "2016-05-12T22:37:46.123456+00:00"),
            ("2016-05-12 22:37:46.123456-05:00", "2016-05-12T22:37:46.123456-05:00"),
            ("2016-05-12T22:37:46+0530", "2016-05-12T22:37:46+05:30"),
            ("  2016-05-12T22:37:46Z  ", "2016-05-12T22:37:46+00:00"),
        ];
        for (text, canonical) in cases {
            let instant = Instant::parse(text, utc_zone()).unwrap();
            assert_eq!(instant.to_canonical_string(), canonical, "canonical form of {text}");
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let rejected = [
            "",
            "yesterday",
            "2016-13-01",
            "2016-02-30 10:00:00",
            "2016-05-12T25:00:00",
            "2016-05-12T22:37:46+25:00",
            "2016-05-12T22:37:46 garbage",
            "2016/05/12 22:37:46",
            "2016-05-12T22",
        ];
        for text in rejected {
            let result = Instant::parse(text, utc_zone());
            assert!(
                matches!(result, Err(DateTimeError::MalformedInstant { .. })),
                "{text:?} should be rejected, got {result:?}"
            );
        }
    }

    /// Validates that an explicit offset in the text wins over the zone
    /// argument.
    #[test]
    fn test_parse_explicit_offset_wins() {
        let instant = Instant::parse("2016-05-12T22:37:46-05:00", Some(bratislava())).unwrap();
        assert_eq!(instant.timezone(), Zone::fixed(-18_000).unwrap());
        assert_eq!(instant.offset().local_minus_utc(), -18_000);
    }

    /// Validates equality across zones.
    ///
    /// Assertions:
    /// - The same moment in a fixed and a named zone compares equal.
    /// - Equal instants hash identically.
    #[test]
    fn test_equality_ignores_zone() {
        use std::collections::HashSet;

        let fixed = Instant::parse("2016-05-12T22:37:46+02:00", None).unwrap();
        let named = Instant::parse("2016-05-12 22:37:46.000000", Some(bratislava())).unwrap();
        assert_eq!(fixed, named);
        assert_ne!(fixed.timezone(), named.timezone());

        let set: HashSet<Instant> = [fixed, named].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_ordering() {
        let later = Instant::parse("2017-01-10 12:20:11", utc_zone()).unwrap();
        let earlier = Instant::parse("2015-02-22 14:33:54", utc_zone()).unwrap();
        assert!(later > earlier);
        assert!(!(later <= earlier));

        let micro = Instant::parse("2016-05-12 22:37:46.000001", utc_zone()).unwrap();
        let whole = Instant::parse("2016-05-12 22:37:46", utc_zone()).unwrap();
        assert!(micro > whole);
        assert!(!(micro <= whole));
    }

    /// Validates the asymmetric microsecond formatting.
    #[test]
    fn test_canonical_string_microseconds() {
        let whole = Instant::parse("2016-05-16 14:09:10", Some(bratislava())).unwrap();
        assert_eq!(whole.to_canonical_string(), "2016-05-16T14:09:10+02:00");

        let fraction = Instant::parse("2016-05-16 14:32:51.678991", Some(bratislava())).unwrap();
        assert_eq!(fraction.to_canonical_string(), "2016-05-16T14:32:51.678991+02:00");

        let tiny = Instant::parse("2016-05-16 14:32:51.000001", utc_zone()).unwrap();
        assert_eq!(tiny.to_canonical_string(), "2016-05-16T14:32:51.000001+00:00");
    }

    #[test]
    fn test_with_timezone_keeps_moment() {
        let instant = Instant::parse("2016-05-12T22:37:46+02:00", None).unwrap();
        let moved = instant.with_timezone(Zone::fixed(-18_000).unwrap());
        assert_eq!(instant, moved);
        assert_eq!(moved.to_canonical_string(), "2016-05-12T15:37:46-05:00");
    }

    #[test]
    fn test_format_patterns() {
        let instant = Instant::parse("2016-05-12T22:37:46+02:00", None).unwrap();
        assert_eq!(instant.format("%d.%m.%Y %H:%M").unwrap(), "12.05.2016 22:37");
        assert!(matches!(instant.format("%Q"), Err(DateTimeError::InvalidFormat(_))));
    }

    #[test]
    fn test_serde_as_canonical_string() {
        let instant = Instant::parse("2016-05-12T22:37:46.123456-05:00", None).unwrap();
        let json = serde_json::to_string(&instant).unwrap();
        assert_eq!(json, "\"2016-05-12T22:37:46.123456-05:00\"");

        let back: Instant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instant);
        assert_eq!(back.offset(), instant.offset());

        assert!(serde_json::from_str::<Instant>("\"not a date\"").is_err());
    }

    #[test]
    fn test_leap_second_is_pinned() {
        let leap = Instant::parse("2016-12-31T23:59:60Z", None).unwrap();
        assert_eq!(leap.microsecond(), 999_999);
        assert_eq!(leap.to_canonical_string(), "2016-12-31T23:59:59.999999+00:00");
    }
}
