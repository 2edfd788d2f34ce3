//! Infrastructure error type
//!
//! Wraps the shared error vocabulary and date-time errors so loaders and
//! bootstrap code can use `?` across both.

use std::time::Duration;

use tempora_common::error::{CommonError, ErrorClassification, ErrorSeverity};
use tempora_core::DateTimeError;
use thiserror::Error;

/// Errors raised while loading configuration or initialising the process
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfraError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error(transparent)]
    DateTime(#[from] DateTimeError),
}

impl ErrorClassification for InfraError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Common(err) => err.is_retryable(),
            Self::DateTime(err) => err.is_retryable(),
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Common(err) => err.severity(),
            Self::DateTime(err) => err.severity(),
        }
    }

    fn is_critical(&self) -> bool {
        match self {
            Self::Common(err) => err.is_critical(),
            Self::DateTime(err) => err.is_critical(),
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Common(err) => err.retry_after(),
            Self::DateTime(err) => err.retry_after(),
        }
    }
}

impl From<std::io::Error> for InfraError {
    fn from(err: std::io::Error) -> Self {
        Self::Common(err.into())
    }
}

/// Result type alias for infrastructure operations
pub type InfraResult<T> = std::result::Result<T, InfraError>;
