//! Identifier decoding. The library service sends numeric ids while the auth
//! service and stored sessions use strings; the console treats all of them as
//! opaque strings.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes an id given as a JSON string or number into a `String`.
///
/// # Errors
/// Fails when the value is neither a string nor a number.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(value) => Ok(value),
        Value::Number(value) => Ok(value.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

/// Trims an id before it is spliced into a URL path. Only ASCII letters,
/// digits, `-` and `_` are accepted, so an id can never add a segment (`/`,
/// `..`), start a query or fragment (`?`, `#`) or smuggle an escape (`%`).
#[must_use]
pub fn normalize(id: &str) -> Option<&str> {
    let trimmed = id.trim();
    let plain = trimmed
        .bytes()
        .all(|byte| byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_');
    (!trimmed.is_empty() && plain).then_some(trimmed)
}
