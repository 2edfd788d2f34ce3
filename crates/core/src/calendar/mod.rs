//! Calendar-aware subtraction of instants
//!
//! - **[`ports`]**: the [`CalendarEngine`] trait and its [`CalendarDiff`]
//!   result
//! - **[`civil`]**: [`ChronoCalendar`], the default engine built on chrono

pub mod civil;
pub mod ports;

pub use civil::{days_in_month, ChronoCalendar};
pub use ports::{CalendarDiff, CalendarEngine};
