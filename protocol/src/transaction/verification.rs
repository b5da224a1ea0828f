//! Transfer verification: recover the signer and compare against the
//! declared sender.
//!
//! Recovery alone proves nothing about the payload — see the hazard notes
//! in [`crate::crypto::signatures`]. The guard this module provides is the
//! comparison: re-derive the digest from the record's canonical bytes,
//! recover the identity, and require it to equal the address the record
//! *claims* sent it. A tampered record recovers a stranger's address and
//! fails the comparison; it never fails recovery itself.

use thiserror::Error;

use super::signing::SignedTransfer;
use super::types::{EncodingError, TransferRecord};
use crate::crypto::hash::message_digest;
use crate::crypto::signatures::{
    recover_identity, RecoverableSignature, RecoveredIdentity, RecoveryError,
};
use crate::identity::Address;

/// Errors during transfer verification.
#[derive(Debug, Error)]
pub enum VerificationError {
    /// Canonical encoding of the record failed.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The signature or digest was malformed.
    #[error(transparent)]
    Recovery(#[from] RecoveryError),

    /// The record's `from` identifier is not a parseable address, so there
    /// is nothing to compare the recovered identity against.
    #[error("sender identifier {0:?} is not an address; cannot verify")]
    UnverifiableSender(String),

    /// The recovered identity does not match the declared sender. Either
    /// the record was mutated after signing or it was signed by the wrong
    /// key.
    #[error("sender mismatch: record declares {declared}, signature recovers {recovered}")]
    SenderMismatch {
        /// The address the record claims as sender.
        declared: Address,
        /// The address actually recovered from the signature.
        recovered: Address,
    },
}

/// Recover the identity that signed a transfer record.
///
/// Re-derives the digest from the record's canonical bytes (the only digest
/// against which recovery is meaningful) and recovers the signer. `with_stamp`
/// must match the flag used at signing time.
///
/// The result is whatever identity the math yields. If the record was
/// mutated since signing, this is a valid-looking stranger — use
/// [`verify_transfer`] when you need that detected.
pub fn recover_sender(
    record: &TransferRecord,
    signature: &RecoverableSignature,
    with_stamp: bool,
) -> Result<RecoveredIdentity, VerificationError> {
    let canonical = record.canonical_bytes()?;
    let digest = message_digest(&canonical, with_stamp);
    Ok(recover_identity(&digest, signature)?)
}

/// Verify a signed transfer: the recovered signer must equal the declared
/// sender.
///
/// Requires the record's `from` identifier to parse as an address —
/// free-form labels carry no key material and cannot be verified, only
/// recovered against. On success returns the (now confirmed) sender
/// address.
///
/// # Errors
///
/// - [`VerificationError::UnverifiableSender`] if `from` is not an address.
/// - [`VerificationError::SenderMismatch`] if the record was tampered with
///   or signed by a key other than the declared sender's.
pub fn verify_transfer(signed: &SignedTransfer) -> Result<Address, VerificationError> {
    let declared: Address = signed
        .record
        .from_id
        .parse()
        .map_err(|_| VerificationError::UnverifiableSender(signed.record.from_id.clone()))?;

    let recovered = recover_sender(&signed.record, &signed.signature, signed.stamped)?;
    if recovered.address() != declared {
        return Err(VerificationError::SenderMismatch {
            declared,
            recovered: recovered.address(),
        });
    }

    Ok(declared)
}
