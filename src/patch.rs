/// Patch-field deserialization support
///
/// Double-option patch fields need JSON null to land in the inner
/// option (an explicit clear) while an absent field stays the outer
/// None (leave the stored value untouched). Serde's stock `Option`
/// deserializer folds null into the outer None, so present values are
/// wrapped here and `#[serde(default)]` covers the absent case.

use serde::{Deserialize, Deserializer};

/// Deserialize a present patch field, mapping null to `Some(None)`
///
/// Use together with `#[serde(default)]`:
/// absent -> `None`, null -> `Some(None)`, value -> `Some(Some(value))`.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::deserialize(deserializer).map(Some)
}
