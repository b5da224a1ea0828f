//! Transfer signing: the one-shot canonicalize → digest → sign path.
//!
//! Signing is a separate step from record construction because the keypair
//! may not be available where the record is built (remote signer, hardware
//! key). There is no ambient key state anywhere in this crate: every signing
//! call takes the keypair as an explicit argument, which keeps the module
//! free of hidden state and safe for concurrent use.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{EncodingError, TransferRecord};
use crate::crypto::hash::message_digest;
use crate::crypto::keys::TransferKeypair;
use crate::crypto::signatures::{sign_digest, RecoverableSignature, SigningError};

/// Errors while signing a transfer end to end.
#[derive(Debug, Error)]
pub enum TransferSignError {
    /// Canonical encoding of the record failed.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The digest could not be signed.
    #[error(transparent)]
    Signing(#[from] SigningError),
}

/// A transfer record bundled with the signature produced over it.
///
/// The `stamped` flag records which digest path the signature covers;
/// verification must use the same path or recovery will (correctly) point
/// at a different identity. Serializes with the signature in wire hex form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransfer {
    /// The transfer exactly as signed. Mutating this after signing does not
    /// invalidate the signature object — it invalidates the *correspondence*
    /// between the two, which only verification can detect.
    pub record: TransferRecord,

    /// Recoverable signature over the record's digest.
    pub signature: RecoverableSignature,

    /// Whether the digest was domain-separated with the message stamp.
    pub stamped: bool,
}

/// Canonicalize, digest, and sign a transfer record in one step.
///
/// `with_stamp` selects the digest path; pass `true` unless you are
/// verifying against legacy unstamped signatures (see
/// [`message_digest`]'s deprecation note on the unstamped path).
///
/// # Example
///
/// ```
/// use transfer_protocol::crypto::TransferKeypair;
/// use transfer_protocol::transaction::{sign_transfer, TransferRecord};
///
/// let kp = TransferKeypair::generate();
/// let record = TransferRecord::new("Bill", "Aaron", 1000);
/// let signed = sign_transfer(&record, &kp, true).unwrap();
/// assert!(signed.stamped);
/// ```
pub fn sign_transfer(
    record: &TransferRecord,
    keypair: &TransferKeypair,
    with_stamp: bool,
) -> Result<SignedTransfer, TransferSignError> {
    let canonical = record.canonical_bytes()?;
    let digest = message_digest(&canonical, with_stamp);
    let signature = sign_digest(&digest, keypair)?;

    Ok(SignedTransfer {
        record: record.clone(),
        signature,
        stamped: with_stamp,
    })
}
