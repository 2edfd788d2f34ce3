//! Tracing subscriber set-up
//!
//! Library crates only emit `tracing` events; installing a subscriber is
//! left to the binary. The filter comes from `RUST_LOG`, falling back to
//! [`DEFAULT_FILTER`].

use tempora_common::error::CommonError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::InfraResult;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "info,tempora_core=warn";

/// Output encoding for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable single-line output
    #[default]
    Text,
    /// One JSON object per event
    Json,
}

/// Install a human-readable global subscriber
///
/// # Errors
/// Returns `CommonError::Internal` if a global subscriber is already set.
pub fn init_tracing() -> InfraResult<()> {
    init_tracing_with(LogFormat::Text)
}

/// Install a global subscriber with the given output format
///
/// # Errors
/// Returns `CommonError::Internal` if a global subscriber is already set.
pub fn init_tracing_with(format: LogFormat) -> InfraResult<()> {
    let filter = env_filter();
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format {
        LogFormat::Text => registry.with(fmt::layer().with_target(false)).try_init(),
        LogFormat::Json => registry.with(fmt::layer().json()).try_init(),
    };

    result.map_err(|e| CommonError::internal(e.to_string(), "tracing subscriber"))?;
    Ok(())
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}
