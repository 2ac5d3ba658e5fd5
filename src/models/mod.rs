// src/models/mod.rs

pub mod attempt;
pub mod category;
pub mod question;
pub mod quiz;
pub mod stats;

use serde::{Deserialize, Deserializer};

/// Deserializes an update field that tells "absent" apart from an explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "nullable")]` on an
/// `Option<Option<T>>`: a missing key stays `None`, `null` becomes `Some(None)`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
