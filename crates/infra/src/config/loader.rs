//! Configuration loader
//!
//! Loads date-time settings from environment variables or files.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the environment if one is present
//! 2. Attempts to load from environment variables
//! 3. If none are set, probes multiple paths for config files
//! 4. If no file exists either, returns the defaults
//!
//! ## Environment Variables
//! - `TEMPORA_TIMEZONE`: Default zone (IANA name or UTC offset)
//! - `TZ`: Fallback for `TEMPORA_TIMEZONE`; ignored unless it names a zone
//! - `TEMPORA_FORMAT`: strftime-style display format for instants
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./tempora.toml` or `./tempora.json` (current working directory)
//! 2. `../tempora.toml` or `../tempora.json` (parent directory)
//! 3. `../../tempora.toml` or `../../tempora.json` (grandparent directory)
//! 4. The same names relative to the executable location

use std::path::{Path, PathBuf};

use tempora_common::error::CommonError;
use tempora_core::Zone;

use super::Settings;
use crate::errors::InfraResult;

pub(crate) const TIMEZONE_VAR: &str = "TEMPORA_TIMEZONE";
pub(crate) const SYSTEM_TIMEZONE_VAR: &str = "TZ";
pub(crate) const FORMAT_VAR: &str = "TEMPORA_FORMAT";

const CONFIG_FILE_NAMES: [&str; 2] = ["tempora.toml", "tempora.json"];

/// Load settings with automatic fallback strategy
///
/// First attempts to load from environment variables. If none are set,
/// falls back to the first config file found, and finally to defaults.
///
/// # Errors
/// Returns `CommonError::Config` or `CommonError::Serialization` if a
/// config file is found but cannot be read or parsed.
pub fn load() -> InfraResult<Settings> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
        Err(e) => tracing::debug!(error = %e, "No .env file loaded"),
    }

    match load_from_env() {
        Ok(settings) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(settings)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            match probe_config_paths() {
                Some(path) => load_from_file(Some(path)),
                None => {
                    tracing::info!("No configuration found, using defaults");
                    Ok(Settings::default())
                }
            }
        }
    }
}

/// Load settings from environment variables
///
/// Empty variables count as unset. `TZ` is only consulted when
/// `TEMPORA_TIMEZONE` is unset, and only if it names a zone this crate
/// understands; POSIX rule strings are skipped.
///
/// # Errors
/// Returns `CommonError::Config` if none of the variables is set.
pub fn load_from_env() -> InfraResult<Settings> {
    let default_timezone = env_var(TIMEZONE_VAR).or_else(system_timezone);
    let format = env_var(FORMAT_VAR);

    let settings = Settings { default_timezone, format };
    if settings.is_empty() {
        return Err(CommonError::config(format!(
            "Missing environment variables: none of {TIMEZONE_VAR}, {SYSTEM_TIMEZONE_VAR}, \
             {FORMAT_VAR} is set"
        ))
        .into());
    }
    Ok(settings)
}

/// Load settings from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `CommonError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - Format is unsupported
///
/// Returns `CommonError::Serialization` if the contents do not parse.
pub fn load_from_file(path: Option<PathBuf>) -> InfraResult<Settings> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CommonError::config(format!(
                    "Config file not found: {}",
                    p.display()
                ))
                .into());
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CommonError::config("No config file found in any of the standard locations")
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path).map_err(|e| {
        CommonError::config(format!("Failed to read {}: {e}", config_path.display()))
    })?;

    parse_config(&contents, &config_path)
}

/// Parse settings from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> InfraResult<Settings> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    let settings = match extension {
        "toml" => toml::from_str(contents).map_err(CommonError::from)?,
        "json" => serde_json::from_str(contents).map_err(CommonError::from)?,
        _ => {
            return Err(CommonError::config(format!("Unsupported config format: {extension}"))
                .into());
        }
    };
    Ok(settings)
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.extend([exe_dir.to_path_buf(), exe_dir.join(".."), exe_dir.join("../..")]);
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Non-empty environment variable
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// `TZ`, with the glibc `:` prefix removed, if it names a known zone
fn system_timezone() -> Option<String> {
    let raw = env_var(SYSTEM_TIMEZONE_VAR)?;
    let name = raw.trim_start_matches(':');
    match name.parse::<Zone>() {
        Ok(_) => Some(name.to_string()),
        Err(e) => {
            tracing::debug!(tz = %raw, error = %e, "Ignoring TZ that names no known zone");
            None
        }
    }
}
