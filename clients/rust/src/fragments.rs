//! Splitting a document into SetValue fragments.
//!
//! The program merges top-level keys, so a document can be written as several
//! smaller objects, each holding a run of keys. Keys are never split across
//! fragments and keep their order, so the stored document ends up with the same
//! key order as the input.

use json_metadata_core::document::JsonObject;
use serde_json::Value;

use crate::errors::{JsonClientError, JsonClientResult};

/// Compact length of `"key":value` inside an object.
fn entry_len(key: &str, value: &Value) -> JsonClientResult<usize> {
    let key_len = serde_json::to_vec(key)?.len();
    let value_len = serde_json::to_vec(value)?.len();
    Ok(key_len + 1 + value_len)
}

/// Splits `document` into compact JSON objects no longer than `max_len` bytes.
///
/// Returns no fragments for an empty document. Fails with
/// [`JsonClientError::FragmentTooLarge`] when a single key does not fit.
pub fn split_object(document: &JsonObject, max_len: usize) -> JsonClientResult<Vec<Vec<u8>>> {
    let mut fragments = Vec::new();
    let mut current = JsonObject::new();
    // length of `current` serialized: braces plus entries plus separating commas
    let mut current_len = 2;

    for (key, value) in document {
        let len = entry_len(key, value)?;
        if len + 2 > max_len {
            return Err(JsonClientError::FragmentTooLarge {
                key: key.clone(),
                size: len + 2,
                max_size: max_len,
            });
        }

        let separator = usize::from(!current.is_empty());
        if current_len + separator + len > max_len {
            fragments.push(serde_json::to_vec(&current)?);
            current = JsonObject::new();
            current_len = 2;
        }

        current_len += usize::from(!current.is_empty()) + len;
        current.insert(key.clone(), value.clone());
    }

    if !current.is_empty() {
        fragments.push(serde_json::to_vec(&current)?);
    }
    Ok(fragments)
}

/// Parses `text` as a JSON object.
pub fn parse_object(text: &str) -> JsonClientResult<JsonObject> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(JsonClientError::InvalidInput(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
