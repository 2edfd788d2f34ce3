//! Date-time value types
//!
//! - **[`Instant`]**: an absolute moment with a display zone
//! - **[`Duration`]**: six independent calendar components
//! - **[`Zone`]**: IANA zone or fixed UTC offset

pub mod duration;
pub mod instant;
pub mod zone;

pub use duration::Duration;
pub use instant::Instant;
pub use zone::Zone;
