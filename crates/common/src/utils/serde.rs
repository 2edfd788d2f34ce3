//! Serialization utilities for value types with a canonical textual form
//!
//! Value types in tempora cross process boundaries as their canonical
//! string, never as a struct. This module holds the serde glue for that
//! contract so each type does not reimplement it.

use std::fmt::Display;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

/// Serialize any `Display + FromStr` value as its string form
///
/// # Usage
/// ```rust
/// use std::net::Ipv4Addr;
///
/// use serde::{Deserialize, Serialize};
/// use tempora_common::canonical_string;
///
/// #[derive(Serialize, Deserialize)]
/// struct Endpoint {
///     #[serde(with = "canonical_string")]
///     address: Ipv4Addr,
/// }
/// ```
pub mod canonical_string {
    use super::*;

    /// Serde serialization result type
    type SerializeResult<S> = Result<<S as Serializer>::Ok, <S as Serializer>::Error>;

    /// Serialize a value through its `Display` implementation
    pub fn serialize<T, S>(value: &T, serializer: S) -> SerializeResult<S>
    where
        T: Display,
        S: Serializer,
    {
        serializer.collect_str(value)
    }

    /// Deserialize a string and parse it through `FromStr`
    ///
    /// Parse failures surface as a custom deserializer error carrying the
    /// parser's message; they are never coerced to a default value.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse::<T>().map_err(D::Error::custom)
    }
}
