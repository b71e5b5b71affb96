//! The JSON document held in a subject account.
//!
//! A subject buffer is compact JSON text followed by padding. Padding is ASCII
//! space, which JSON accepts as trailing whitespace, so a reader that parses the
//! whole buffer still gets the document back. [`content`] additionally strips
//! NUL bytes so zero-filled accounts allocated by other tools read cleanly.
//!
//! Merging is shallow: each top-level key of a fragment replaces the stored
//! value wholesale. Keys already present keep their position and new keys are
//! appended, so the serialized output is deterministic for a given history.

use serde_json::{Map, Value};

use crate::error::{JsonMetadataError, JsonMetadataResult};

/// Content written by Initialize.
pub const EMPTY_DOCUMENT: &[u8] = b"{}";

/// Byte used to fill the buffer past the end of the document.
pub const PADDING_BYTE: u8 = b' ';

pub type JsonObject = Map<String, Value>;

/// The empty document.
pub fn write_initial() -> Vec<u8> {
    EMPTY_DOCUMENT.to_vec()
}

fn is_padding(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r' | 0)
}

/// The document bytes of `buffer` without trailing padding.
pub fn content(buffer: &[u8]) -> &[u8] {
    let end = buffer
        .iter()
        .rposition(|b| !is_padding(*b))
        .map(|i| i + 1)
        .unwrap_or(0);
    &buffer[..end]
}

/// Parses the stored document. Anything that is not a JSON object reads as `None`.
pub fn read(buffer: &[u8]) -> Option<JsonObject> {
    match serde_json::from_slice::<Value>(content(buffer)) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Parses a SetValue payload, which must be a JSON object.
pub fn parse_fragment(fragment: &[u8]) -> JsonMetadataResult<JsonObject> {
    match serde_json::from_slice::<Value>(fragment) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(JsonMetadataError::MalformedFragment),
    }
}

/// Upserts every top-level key of `updates` into `document`.
pub fn merge_object(document: &mut JsonObject, updates: JsonObject) {
    for (key, value) in updates {
        // insert keeps the position of an existing key
        document.insert(key, value);
    }
}

/// Merges `fragment` into the document stored in `existing` and returns the
/// serialized result.
///
/// `existing` that does not hold a JSON object is treated as empty, so the
/// result is the fragment itself.
pub fn merge(existing: &[u8], fragment: &[u8]) -> JsonMetadataResult<Vec<u8>> {
    let updates = parse_fragment(fragment)?;
    let mut document = read(existing).unwrap_or_default();
    merge_object(&mut document, updates);
    serialize(&document)
}

pub fn serialize(document: &JsonObject) -> JsonMetadataResult<Vec<u8>> {
    serde_json::to_vec(document).map_err(|_| JsonMetadataError::SerializationError)
}

/// Buffer length needed to hold `document_len` bytes. Buffers never shrink.
pub fn required_capacity(current_len: usize, document_len: usize) -> usize {
    current_len.max(document_len)
}

/// Writes `document` at the start of `buffer` and pads the remainder.
///
/// Nothing is written if the buffer is too small.
pub fn commit(buffer: &mut [u8], document: &[u8]) -> JsonMetadataResult<()> {
    if buffer.len() < document.len() {
        return Err(JsonMetadataError::CapacityGrowthFailed);
    }
    let (head, tail) = buffer.split_at_mut(document.len());
    head.copy_from_slice(document);
    tail.fill(PADDING_BYTE);
    Ok(())
}
