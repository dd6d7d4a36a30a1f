//! JSON encoding of the stored collection.
//!
//! The on-disk format is a compact JSON array of records. Empty or
//! whitespace-only contents decode to an empty collection.

use crate::record::Record;

/// Decode the raw contents of a backing file.
///
/// # Errors
///
/// Returns the decoder error if the bytes are neither blank nor a JSON array
/// of records.
pub fn decode(bytes: &[u8]) -> serde_json::Result<Vec<Record>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_json::from_slice(bytes)
}

/// Encode a collection for writing to a backing file.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn encode(records: &[Record]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(records)
}
