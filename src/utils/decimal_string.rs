//! Decimal-string encoding for numeric fields.
//!
//! The simulator reads every scalar in the network map as text, so numeric
//! fields are written as `"42"` rather than `42`. On the way in both forms
//! are accepted, which lets transaction and state files come straight from
//! tools that emit native JSON numbers.

use serde::de::{self, Deserializer, Visitor};
use serde::Serializer;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

/// Serialize any displayable value as its decimal string form
pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: fmt::Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

/// Deserialize a value from either a decimal string or a native integer
pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr + TryFrom<u64> + TryFrom<i64>,
    <T as FromStr>::Err: fmt::Display,
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(DecimalVisitor(PhantomData))
}

struct DecimalVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for DecimalVisitor<T>
where
    T: FromStr + TryFrom<u64> + TryFrom<i64>,
    <T as FromStr>::Err: fmt::Display,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer or a decimal string")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
        v.trim().parse::<T>().map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::custom(format!("integer {} out of range", v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
        T::try_from(v).map_err(|_| E::custom(format!("integer {} out of range", v)))
    }
}
