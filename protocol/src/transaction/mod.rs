//! # Transfers
//!
//! The transfer record, its canonical byte encoding, and the signing and
//! verification paths built on top of [`crate::crypto`].
//!
//! Construction, signing, and verification are separate steps: a record can
//! be built and canonicalized without key material, signed wherever the key
//! lives, and verified by anyone holding only the record and the signature.

pub mod signing;
pub mod types;
pub mod verification;

pub use signing::{sign_transfer, SignedTransfer, TransferSignError};
pub use types::{EncodingError, TransferRecord};
pub use verification::{recover_sender, verify_transfer, VerificationError};
