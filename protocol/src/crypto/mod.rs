//! # Cryptographic Primitives
//!
//! Everything security-related flows through here: keccak-256 hashing,
//! secp256k1 keypairs, and recoverable ECDSA signatures.
//!
//! We deliberately chose the boring, well-trodden path for this curve:
//!
//! - **keccak-256** (via `sha3`) — the digest function the secp256k1
//!   ecosystem standardized on. Not SHA3-256; the padding differs.
//! - **secp256k1 ECDSA with recovery** (via `k256`) — signatures carry a
//!   recovery id so the signer's public key can be derived from the
//!   signature itself. No public-key distribution needed.
//! - **RFC 6979 deterministic nonces** — `k256`'s default. A broken RNG at
//!   signing time cannot leak the private key.
//!
//! Nothing here is hand-rolled. These are thin, type-safe wrappers around
//! audited implementations, giving us one place to audit signing operations
//! and consistent error types across the codebase.

pub mod hash;
pub mod keys;
pub mod signatures;

// Re-export the things people actually need so they don't have to memorize
// our module hierarchy.
pub use hash::{keccak256, message_digest, stamped_digest};
pub use keys::TransferKeypair;
pub use signatures::{
    recover_identity, sign_digest, RecoverableSignature, RecoveredIdentity, SignatureComponents,
};
