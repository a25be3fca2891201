//! Case-insensitive JSON decoding
//!
//! The remote API is not consistent about property casing (`id`, `Id`,
//! `orderLines`, `OrderLines`). Object keys are folded to lowercase before
//! deserializing, and models declare lowercase decode names to match.
//! Records this client does not interpret are left exactly as received.

use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;

/// Decodes a JSON body, matching property names case-insensitively
///
/// # Returns
/// * `Ok(T)` - The decoded value
/// * `Err(serde_json::Error)` - If the body is not JSON, does not fit `T`,
///   or is the JSON literal `null`
pub fn decode_case_insensitive<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, serde_json::Error> {
    let value: Value = serde_json::from_slice(bytes)?;
    if value.is_null() {
        return Err(serde_json::Error::custom("response body decoded to null"));
    }

    serde_json::from_value(fold_keys(value))
}

/// Fields whose values are opaque records; their inner keys keep their casing
const OPAQUE_FIELDS: &[&str] = &["authors"];

/// Lowercases object keys recursively, except inside opaque fields
fn fold_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| {
                    let key = key.to_lowercase();
                    if OPAQUE_FIELDS.contains(&key.as_str()) {
                        (key, value)
                    } else {
                        (key, fold_keys(value))
                    }
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(fold_keys).collect()),
        other => other,
    }
}
