//! Timezone association carried by every [`Instant`](super::Instant)

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

use crate::constants::{MAX_OFFSET_SECONDS, SECONDS_PER_HOUR};
use crate::errors::{DateTimeError, Result};

/// A named IANA zone or a fixed offset from UTC
///
/// Offsets of named zones are resolved through the chrono-tz database at
/// the moment in question, so a `Zone::Named` can report different offsets
/// for summer and winter instants. Equality compares the zone itself, not
/// the offset it happens to have at some moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// IANA database zone, e.g. `Europe/Bratislava`
    Named(Tz),
    /// Constant offset, e.g. `+02:00`
    Fixed(FixedOffset),
}

impl Zone {
    /// The UTC zone
    #[must_use]
    pub const fn utc() -> Self {
        Self::Named(Tz::UTC)
    }

    /// Look up an IANA zone by name
    ///
    /// # Errors
    /// Returns `DateTimeError::UnknownTimezone` if the database has no such
    /// zone.
    pub fn named(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self::Named)
            .map_err(|_| DateTimeError::UnknownTimezone(name.to_string()))
    }

    /// Build a fixed zone `seconds` east of UTC
    ///
    /// # Errors
    /// Returns `DateTimeError::OutOfRange` unless the offset is strictly
    /// within one day.
    pub fn fixed(seconds: i32) -> Result<Self> {
        if seconds.unsigned_abs() >= MAX_OFFSET_SECONDS.unsigned_abs() {
            return Err(DateTimeError::OutOfRange(format!("UTC offset of {seconds} seconds")));
        }
        FixedOffset::east_opt(seconds)
            .map(Self::Fixed)
            .ok_or_else(|| DateTimeError::OutOfRange(format!("UTC offset of {seconds} seconds")))
    }

    /// Offset from UTC in effect at the given moment
    #[must_use]
    pub fn offset_at(&self, utc: &DateTime<Utc>) -> FixedOffset {
        match self {
            Self::Named(tz) => tz.offset_from_utc_datetime(&utc.naive_utc()).fix(),
            Self::Fixed(offset) => *offset,
        }
    }

    /// Wall-clock reading of a UTC moment in this zone
    #[must_use]
    pub fn to_local(&self, utc: &DateTime<Utc>) -> NaiveDateTime {
        utc.with_timezone(&self.offset_at(utc)).naive_local()
    }

    /// Resolve a wall-clock reading in this zone to a UTC moment
    ///
    /// Readings repeated by a fall-back transition resolve to the earlier
    /// moment. Readings skipped by a spring-forward transition are moved
    /// forward by one hour. Returns `None` only when the reading cannot be
    /// represented at all.
    #[must_use]
    pub fn from_local(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Self::Fixed(offset) => {
                offset.from_local_datetime(local).single().map(|resolved| resolved.to_utc())
            }
            Self::Named(tz) => tz
                .from_local_datetime(local)
                .earliest()
                .or_else(|| {
                    let shifted =
                        local.checked_add_signed(TimeDelta::seconds(SECONDS_PER_HOUR))?;
                    tz.from_local_datetime(&shifted).earliest()
                })
                .map(|resolved| resolved.to_utc()),
        }
    }
}

impl Default for Zone {
    fn default() -> Self {
        Self::utc()
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(tz) => f.write_str(tz.name()),
            Self::Fixed(offset) => write_offset(f, offset.local_minus_utc()),
        }
    }
}

impl FromStr for Zone {
    type Err = DateTimeError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z") {
            return Ok(Self::utc());
        }
        if let Some(offset) = parse_offset(trimmed) {
            return Ok(Self::Fixed(offset));
        }
        Self::named(trimmed)
    }
}

impl From<Tz> for Zone {
    fn from(tz: Tz) -> Self {
        Self::Named(tz)
    }
}

impl From<FixedOffset> for Zone {
    fn from(offset: FixedOffset) -> Self {
        Self::Fixed(offset)
    }
}

/// Parse `±HH`, `±HHMM` or `±HH:MM`
pub(crate) fn parse_offset(text: &str) -> Option<FixedOffset> {
    if !text.is_ascii() {
        return None;
    }
    let (sign, rest) = match text.as_bytes().first()? {
        b'+' => (1, &text[1..]),
        b'-' => (-1, &text[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.len() {
        2 => (rest, "00"),
        4 => (&rest[..2], &rest[2..]),
        5 if rest.as_bytes()[2] == b':' => (&rest[..2], &rest[3..]),
        _ => return None,
    };
    if !hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3_600 + minutes * 60))
}

pub(crate) fn write_offset(f: &mut impl fmt::Write, seconds: i32) -> fmt::Result {
    let sign = if seconds < 0 { '-' } else { '+' };
    let magnitude = seconds.unsigned_abs();
    write!(f, "{sign}{:02}:{:02}", magnitude / 3_600, (magnitude % 3_600) / 60)
}

#[cfg(test)]
mod tests {
    //! Unit tests for types::zone.
    use chrono::NaiveDate;

    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, i: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, i, 0).unwrap()
    }

    /// Validates the accepted textual zone forms.
    ///
    /// Assertions:
    /// - `UTC` and `Z` map to the UTC zone.
    /// - Numeric offsets with and without colon map to fixed zones.
    /// - IANA names map to named zones.
    #[test]
    fn test_parse_zone_forms() {
        assert_eq!("UTC".parse::<Zone>().unwrap(), Zone::utc());
        assert_eq!("z".parse::<Zone>().unwrap(), Zone::utc());
        assert_eq!("+02:00".parse::<Zone>().unwrap(), Zone::fixed(7_200).unwrap());
        assert_eq!("-0530".parse::<Zone>().unwrap(), Zone::fixed(-19_800).unwrap());
        assert_eq!("+01".parse::<Zone>().unwrap(), Zone::fixed(3_600).unwrap());
        assert_eq!(
            "Europe/Bratislava".parse::<Zone>().unwrap(),
            Zone::Named(chrono_tz::Europe::Bratislava)
        );
    }

    #[test]
    fn test_parse_zone_rejects_garbage() {
        assert!(matches!("Mars/Olympus".parse::<Zone>(), Err(DateTimeError::UnknownTimezone(_))));
        assert!(parse_offset("+2:00").is_none());
        assert!(parse_offset("+24:00").is_none());
        assert!(parse_offset("+02:60").is_none());
        assert!(parse_offset("02:00").is_none());
        assert!(parse_offset("+0é:00").is_none());
    }

    #[test]
    fn test_fixed_out_of_range() {
        assert!(matches!(Zone::fixed(86_400), Err(DateTimeError::OutOfRange(_))));
        assert!(Zone::fixed(-86_399).is_ok());
        assert!(matches!(Zone::fixed(i32::MIN), Err(DateTimeError::OutOfRange(_))));
        assert!(matches!(Zone::fixed(i32::MAX), Err(DateTimeError::OutOfRange(_))));
    }

    #[test]
    fn test_display() {
        assert_eq!(Zone::utc().to_string(), "UTC");
        assert_eq!(Zone::fixed(-18_000).unwrap().to_string(), "-05:00");
        assert_eq!(Zone::fixed(19_800).unwrap().to_string(), "+05:30");
        assert_eq!(Zone::named("America/New_York").unwrap().to_string(), "America/New_York");
    }

    /// Validates that named zones report seasonal offsets.
    #[test]
    fn test_offset_at_follows_daylight_saving() {
        let zone = Zone::named("Europe/Bratislava").unwrap();
        let summer = zone.from_local(&local(2016, 8, 22, 12, 0)).unwrap();
        let winter = zone.from_local(&local(2016, 11, 22, 11, 0)).unwrap();

        assert_eq!(zone.offset_at(&summer).local_minus_utc(), 7_200);
        assert_eq!(zone.offset_at(&winter).local_minus_utc(), 3_600);
        assert_eq!(zone.to_local(&summer), local(2016, 8, 22, 12, 0));
    }

    /// Validates transition handling for local readings.
    ///
    /// Assertions:
    /// - A repeated reading (fall back) resolves to the earlier moment.
    /// - A skipped reading (spring forward) moves forward one hour.
    #[test]
    fn test_from_local_transitions() {
        let zone = Zone::named("Europe/Bratislava").unwrap();

        let repeated = zone.from_local(&local(2016, 10, 30, 2, 30)).unwrap();
        assert_eq!(repeated.naive_utc(), local(2016, 10, 30, 0, 30));

        let skipped = zone.from_local(&local(2016, 3, 27, 2, 30)).unwrap();
        assert_eq!(skipped.naive_utc(), local(2016, 3, 27, 1, 30));
        assert_eq!(zone.to_local(&skipped), local(2016, 3, 27, 3, 30));
    }
}
