//! Constants shared by the date-time types

/// Canonical string of the all-zero duration
pub const ZERO_DURATION: &str = "P0D";

/// Leading designator of every duration string
pub const PERIOD_DESIGNATOR: char = 'P';

/// Separator between the date and time halves of a duration string
pub const TIME_DESIGNATOR: char = 'T';

/// Designators of the date half, in the order they must appear
pub const DATE_DESIGNATORS: [char; 3] = ['Y', 'M', 'D'];

/// Designators of the time half, in the order they must appear
pub const TIME_DESIGNATORS: [char; 3] = ['H', 'M', 'S'];

/// Canonical instant format when the microsecond field is zero
pub const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Canonical instant format when the microsecond field is non-zero
pub const CANONICAL_FORMAT_MICROS: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// Microseconds in one second
pub const MICROS_PER_SECOND: i64 = 1_000_000;

/// Seconds in one hour, used for spring-forward gap resolution
pub const SECONDS_PER_HOUR: i64 = 3_600;

/// Largest UTC offset accepted for fixed zones (exclusive)
pub const MAX_OFFSET_SECONDS: i32 = 86_400;
