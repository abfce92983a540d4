//! JSON encoding of persisted session documents.
//!
//! Session files are rewritten on every token rotation, so their bytes
//! must only change when a value does: two-space indentation, a trailing
//! newline, and key order taken from the source type (`BTreeMap` fields
//! keep token names sorted).

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Failure to encode or decode a persisted document.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// The document could not be encoded.
    #[error("failed to encode document: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The stored bytes are not a valid document.
    #[error("failed to decode document: {0}")]
    Deserialize(#[source] serde_json::Error),
}

/// Encodes `value` as indented JSON ready to be written to disk.
///
/// # Errors
///
/// Returns an error if `value` cannot be represented as JSON.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut buffer = Vec::with_capacity(256);
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"  "));
    value
        .serialize(&mut serializer)
        .map_err(SerializationError::Serialize)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Decodes a document read from disk.
///
/// # Errors
///
/// Returns an error if the bytes are not valid JSON for `T`.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}
