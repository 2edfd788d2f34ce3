//! # Tempora Infrastructure
//!
//! Process-level wiring around `tempora-core`.
//!
//! This crate contains:
//! - Configuration loading from `.env`, environment variables and files
//! - Bootstrap that installs settings into the date-time context
//! - Tracing subscriber initialisation
//!
//! ## Architecture
//! - Depends on `tempora-common` and `tempora-core`
//! - Contains all "impure" code (environment, files, global subscriber)
//!
//! ```no_run
//! fn main() -> Result<(), tempora_infra::InfraError> {
//!     tempora_infra::init_tracing()?;
//!     let settings = tempora_infra::bootstrap::init()?;
//!     tracing::info!(?settings, "ready");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod bootstrap;
pub mod config;
pub mod errors;
pub mod observability;

// Re-export commonly used items
pub use config::Settings;
pub use errors::{InfraError, InfraResult};
pub use observability::{init_tracing, init_tracing_with, LogFormat};
