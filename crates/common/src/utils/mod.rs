//! Common utility functions
//!
//! - **[`serde`]**: Serialization helpers for canonical string wire forms

pub mod serde;

// Re-export commonly used items for convenience
pub use self::serde::canonical_string;
