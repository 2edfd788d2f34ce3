//! Process start-up wiring
//!
//! Applies loaded [`Settings`] to the date-time context. Call [`init`] once
//! near the top of `main`, after [`init_tracing`](crate::init_tracing) if
//! start-up logging is wanted.

use tempora_core::context;

use crate::config::{self, Settings};
use crate::errors::InfraResult;

/// Install the settings into the process-wide context
///
/// Both fields are validated before anything changes, so a bad zone or
/// pattern leaves the context untouched. An absent format clears any
/// override; an absent zone keeps the current default.
///
/// # Errors
/// Returns `DateTimeError::UnknownTimezone` or
/// `DateTimeError::InvalidFormat` for values the core rejects.
pub fn apply(settings: &Settings) -> InfraResult<()> {
    let zone = settings.timezone()?;
    context::set_format(settings.format.clone())?;
    if let Some(zone) = zone {
        context::set_default_timezone(zone);
    }

    tracing::info!(
        default_timezone = %context::default_timezone(),
        format = settings.format.as_deref().unwrap_or("canonical"),
        "Date-time context configured"
    );
    Ok(())
}

/// Load settings and apply them
///
/// # Errors
/// Propagates loader and validation errors from [`config::load`] and
/// [`apply`].
pub fn init() -> InfraResult<Settings> {
    let settings = config::load()?;
    apply(&settings)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempora_core::{DateTimeError, Instant, Zone};

    use super::*;
    use crate::errors::InfraError;

    /// Validates `apply` with a full settings block.
    ///
    /// Assertions:
    /// - The default zone drives zone-less constructors.
    /// - The format override drives `Display`.
    #[test]
    #[serial]
    fn test_apply_installs_zone_and_format() {
        context::reset();
        let settings = Settings {
            default_timezone: Some("Europe/Bratislava".to_string()),
            format: Some("%Y/%m/%d %H:%M".to_string()),
        };

        apply(&settings).unwrap();

        let instant = Instant::parse("2016-05-12 22:37:46", None).unwrap();
        assert_eq!(instant.timezone(), Zone::named("Europe/Bratislava").unwrap());
        assert_eq!(instant.to_string(), "2016/05/12 22:37");
        context::reset();
    }

    /// Validates that rejected settings leave the context untouched.
    #[test]
    #[serial]
    fn test_apply_rejects_without_side_effects() {
        context::reset();

        let bad_zone = Settings {
            default_timezone: Some("Mars/Olympus".to_string()),
            format: Some("%H".to_string()),
        };
        assert!(matches!(
            apply(&bad_zone),
            Err(InfraError::DateTime(DateTimeError::UnknownTimezone(_)))
        ));
        assert_eq!(context::format(), None);

        let bad_format = Settings {
            default_timezone: Some("America/New_York".to_string()),
            format: Some("%Q".to_string()),
        };
        assert!(matches!(
            apply(&bad_format),
            Err(InfraError::DateTime(DateTimeError::InvalidFormat(_)))
        ));
        assert_eq!(context::default_timezone(), Zone::utc());
        context::reset();
    }
}
