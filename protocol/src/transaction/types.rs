//! The transfer record and its canonical byte encoding.
//!
//! A signature is only as good as the byte reproduction behind it: verifiers
//! re-derive the digest from the record, so the encoding must be
//! deterministic across runs, platforms, and implementations. The canonical
//! form is compact JSON with the field order fixed by struct declaration
//! (`from`, `to`, `value`) — byte-compatible with the encoding the existing
//! corpus of signatures was produced over, which is why we cannot swap in a
//! binary format without invalidating every signature out there.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors while canonically encoding a record.
///
/// For well-formed records (valid UTF-8 identifiers, which `String` already
/// guarantees) encoding is total; this exists because the serializer's
/// failure path still has to go somewhere other than a panic.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// The serializer failed.
    #[error("canonical encoding failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A request to move value from one account identifier to another.
///
/// Identifiers are free-form strings: either a human-readable label
/// ("Bill") or a canonical hex address. The verification path in
/// [`crate::transaction::verification`] only engages the address
/// interpretation of `from_id`.
///
/// # Examples
///
/// ```
/// use transfer_protocol::transaction::TransferRecord;
///
/// let record = TransferRecord::new("Bill", "Aaron", 1000);
/// let bytes = record.canonical_bytes().unwrap();
/// assert_eq!(bytes, br#"{"from":"Bill","to":"Aaron","value":1000}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRecord {
    /// Sender identifier: a label or a `0x`-prefixed hex address.
    #[serde(rename = "from")]
    pub from_id: String,

    /// Recipient identifier.
    #[serde(rename = "to")]
    pub to_id: String,

    /// Quantity transferred, in the smallest unit.
    pub value: u64,
}

impl TransferRecord {
    /// Creates a transfer record.
    pub fn new(from_id: impl Into<String>, to_id: impl Into<String>, value: u64) -> Self {
        Self {
            from_id: from_id.into(),
            to_id: to_id.into(),
            value,
        }
    }

    /// Returns the canonical byte encoding used for digesting and signing.
    ///
    /// Compact JSON, fields in declaration order, no whitespace. Identical
    /// field values always produce byte-identical output — the invariant
    /// every signature in existence depends on.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        Ok(serde_json::to_vec(self)?)
    }
}
