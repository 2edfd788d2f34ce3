//! Foundation utilities shared across tempora crates.
//!
//! This crate carries no date-time knowledge. It provides:
//! - `error`: the shared error vocabulary and the `ErrorClassification` trait
//! - `utils`: serde helpers for types whose wire form is a canonical string

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod error;
pub mod utils;

// Re-export commonly used types and traits for convenience
pub use error::{CommonError, CommonResult, ErrorClassification, ErrorSeverity};
pub use utils::serde::canonical_string;
