//! Configuration loading and management
//!
//! This module provides utilities for loading the process date-time
//! settings from environment variables and files.

pub mod loader;

use serde::{Deserialize, Serialize};
use tempora_core::Zone;

use crate::errors::InfraResult;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};

/// Process-level date-time settings
///
/// Every field is optional; an absent field leaves the corresponding
/// context default (UTC, canonical display) in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// IANA zone name or UTC offset used when a constructor gets no zone
    pub default_timezone: Option<String>,
    /// strftime-style display-format override for instants
    pub format: Option<String>,
}

impl Settings {
    /// Resolve the configured default zone
    ///
    /// # Errors
    /// Returns `DateTimeError::UnknownTimezone` if the name is neither an
    /// IANA zone nor a UTC offset.
    pub fn timezone(&self) -> InfraResult<Option<Zone>> {
        self.default_timezone.as_deref().map(str::parse::<Zone>).transpose().map_err(Into::into)
    }

    /// `true` when no field is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.default_timezone.is_none() && self.format.is_none()
    }
}
