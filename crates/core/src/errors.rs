//! Error types used throughout the date-time core

use std::time::Duration;

use tempora_common::error::{ErrorClassification, ErrorSeverity};
use thiserror::Error;

/// Errors raised while constructing, parsing or rendering date-time values
///
/// Every operation in this crate is pure and deterministic, so none of these
/// errors is retryable: the same input fails the same way every time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateTimeError {
    /// Text does not follow the `P[nY][nM][nD][T[nH][nM][nS]]` grammar
    #[error("Malformed duration '{input}': {reason}")]
    MalformedDuration {
        /// Rejected text
        input: String,
        /// What the parser objected to
        reason: String,
    },

    /// Text is not a date/time the calendar engine understands
    #[error("Malformed instant '{input}': {reason}")]
    MalformedInstant {
        /// Rejected text
        input: String,
        /// What the calendar engine objected to
        reason: String,
    },

    /// Neither an IANA zone name nor a UTC offset
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Value lies outside the range the calendar engine can represent
    #[error("Value out of range: {0}")]
    OutOfRange(String),

    /// A strftime-style pattern the formatter rejects
    #[error("Invalid format pattern '{0}'")]
    InvalidFormat(String),
}

impl DateTimeError {
    pub(crate) fn malformed_duration(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDuration { input: input.to_string(), reason: reason.into() }
    }

    pub(crate) fn malformed_instant(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedInstant { input: input.to_string(), reason: reason.into() }
    }
}

impl ErrorClassification for DateTimeError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MalformedDuration { .. }
            | Self::MalformedInstant { .. }
            | Self::UnknownTimezone(_) => ErrorSeverity::Warning,
            Self::OutOfRange(_) | Self::InvalidFormat(_) => ErrorSeverity::Error,
        }
    }

    fn is_critical(&self) -> bool {
        false
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Result type alias for date-time operations
pub type Result<T> = std::result::Result<T, DateTimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_duration_message() {
        let err = DateTimeError::malformed_duration("P1X", "unexpected designator 'X'");
        assert_eq!(err.to_string(), "Malformed duration 'P1X': unexpected designator 'X'");
        assert_eq!(err.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_never_retryable() {
        let errors = [
            DateTimeError::malformed_instant("yesterday-ish", "no date"),
            DateTimeError::UnknownTimezone("Mars/Olympus".to_string()),
            DateTimeError::OutOfRange("epoch seconds 1e300".to_string()),
            DateTimeError::InvalidFormat("%Q".to_string()),
        ];

        for err in errors {
            assert!(!err.is_retryable(), "{err} should not be retryable");
            assert!(!err.is_critical());
            assert_eq!(err.retry_after(), None);
        }
    }
}
