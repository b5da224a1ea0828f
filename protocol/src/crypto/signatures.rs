//! # Recoverable Signatures
//!
//! secp256k1 ECDSA signing over 32-byte digests, public-key recovery, and
//! the 65-byte `R || S || V` wire format.
//!
//! ## Why recoverable signatures?
//!
//! An ordinary ECDSA signature needs the public key on hand to verify. A
//! *recoverable* signature carries one extra byte — the recovery id `V` —
//! that lets the verifier derive the signer's public key (and from it, the
//! address) from the signature and digest alone. No key distribution, no
//! lookup table.
//!
//! ## The hazard, stated plainly
//!
//! Recovery does **not** validate the payload. Given a signature over digest
//! `A` and any other well-formed digest `B`, [`recover_identity`] happily
//! returns a mathematically valid public key — just not the signer's. It
//! cannot fail on this, because every (digest, signature) pair maps to
//! *some* curve point. Callers must re-derive the digest from the exact
//! canonical bytes that were signed and compare the recovered address
//! against the expected sender. [`crate::transaction::verification`] does
//! exactly that; use it instead of trusting recovery alone.

use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

use super::keys::TransferKeypair;
use crate::identity::Address;

/// Length of a recoverable signature: 32-byte R, 32-byte S, 1-byte V.
pub const SIGNATURE_LENGTH: usize = 65;

/// Length of a signable digest. Signing anything that is not exactly a
/// 32-byte hash output is a misuse, not a feature.
pub const DIGEST_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors during signature generation.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The digest is not exactly 32 bytes.
    #[error("digest must be {DIGEST_LENGTH} bytes, got {got}")]
    InvalidDigestLength {
        /// Actual digest length.
        got: usize,
    },

    /// The underlying ECDSA operation failed (malformed key material).
    #[error("ecdsa signing failed")]
    Signing,
}

/// Errors during public-key recovery.
///
/// Note what is absent: there is no "wrong digest" variant. Recovery with a
/// digest other than the signed one succeeds and returns a different
/// identity. That outcome is detected by comparison, never by this error.
#[derive(Debug, Error)]
pub enum RecoveryError {
    /// The digest is not exactly 32 bytes.
    #[error("digest must be {DIGEST_LENGTH} bytes, got {got}")]
    InvalidDigestLength {
        /// Actual digest length.
        got: usize,
    },

    /// The V byte is not a valid recovery id (must be 0–3).
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    /// The R/S halves do not form a well-formed ECDSA signature.
    #[error("malformed signature: r/s not valid scalars")]
    MalformedSignature,

    /// No curve point corresponds to this (digest, signature) pair.
    #[error("public key recovery failed")]
    RecoveryFailed,
}

/// Errors while decoding or splitting a wire-format signature.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The string is not valid hexadecimal after the optional `0x` prefix.
    #[error("invalid hex in signature: {0}")]
    InvalidHex(String),

    /// The decoded signature is not exactly 65 bytes.
    #[error("invalid signature length: expected {SIGNATURE_LENGTH} bytes, got {got}")]
    InvalidLength {
        /// Actual number of decoded bytes.
        got: usize,
    },
}

// ---------------------------------------------------------------------------
// RecoverableSignature
// ---------------------------------------------------------------------------

/// A 65-byte recoverable ECDSA signature: `R (0..32) || S (32..64) || V (64)`.
///
/// `V` is the raw recovery id (0–3; in practice 0 or 1, since 2 and 3 only
/// occur for astronomically rare R values). Immutable once created — there
/// is no setter, and every accessor copies.
///
/// Wire form is `0x` followed by 130 hex digits, matching common blockchain
/// tooling. Serde uses the wire form.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl RecoverableSignature {
    /// Create a signature from its raw 65-byte representation.
    pub fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self { bytes }
    }

    /// Try to create a signature from a byte slice.
    pub fn try_from_slice(slice: &[u8]) -> Result<Self, FormatError> {
        if slice.len() != SIGNATURE_LENGTH {
            return Err(FormatError::InvalidLength { got: slice.len() });
        }
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes.copy_from_slice(slice);
        Ok(Self { bytes })
    }

    /// Parse a wire-format signature: optional `0x` prefix, then 130 hex digits.
    pub fn from_hex(s: &str) -> Result<Self, FormatError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(stripped).map_err(|_| FormatError::InvalidHex(stripped.to_string()))?;
        Self::try_from_slice(&bytes)
    }

    /// The raw 65 bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// The wire encoding: `0x` + 130 hex digits.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.bytes))
    }

    /// The R component (bytes 0..32), big-endian.
    pub fn r(&self) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.bytes[..32]);
        r
    }

    /// The S component (bytes 32..64), big-endian.
    pub fn s(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.bytes[32..64]);
        s
    }

    /// The V byte — the recovery id.
    pub fn v(&self) -> u8 {
        self.bytes[64]
    }

    /// Decompose into `(v, r, s)` for wire formats that transmit the
    /// components separately.
    pub fn components(&self) -> SignatureComponents {
        SignatureComponents {
            v: self.v(),
            r: self.r(),
            s: self.s(),
        }
    }
}

impl fmt::Display for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for RecoverableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(
            f,
            "RecoverableSignature({}...{})",
            &hex_str[..10],
            &hex_str[hex_str.len() - 8..]
        )
    }
}

impl Serialize for RecoverableSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RecoverableSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// SignatureComponents
// ---------------------------------------------------------------------------

/// The `(v, r, s)` decomposition of a recoverable signature.
///
/// Some wire formats transmit the three components as separate integers
/// rather than one 65-byte blob. [`join`](Self::join) reassembles the exact
/// original bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureComponents {
    /// The recovery id byte.
    pub v: u8,
    /// The R scalar, big-endian.
    pub r: [u8; 32],
    /// The S scalar, big-endian.
    pub s: [u8; 32],
}

impl SignatureComponents {
    /// Reassemble the 65-byte signature. Exact inverse of
    /// [`RecoverableSignature::components`].
    pub fn join(&self) -> RecoverableSignature {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        RecoverableSignature::from_bytes(bytes)
    }
}

/// Split a wire-format signature string into its `(v, r, s)` components.
///
/// Accepts the `0x`-prefixed hex form (prefix optional). Fails with
/// [`FormatError`] if the input does not decode to exactly 65 bytes.
pub fn split_signature_components(sig_hex: &str) -> Result<SignatureComponents, FormatError> {
    Ok(RecoverableSignature::from_hex(sig_hex)?.components())
}

// ---------------------------------------------------------------------------
// RecoveredIdentity
// ---------------------------------------------------------------------------

/// The signer identity recovered from a (digest, signature) pair.
///
/// Carries both the verifying key and the address derived from it. **Only
/// meaningful when the digest supplied at recovery is bit-identical to the
/// digest that was signed** — see the module docs for the hazard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredIdentity {
    verifying_key: VerifyingKey,
    address: Address,
}

impl RecoveredIdentity {
    /// The recovered public key.
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// The address derived from the recovered public key.
    pub fn address(&self) -> Address {
        self.address
    }
}

impl fmt::Display for RecoveredIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.address)
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Sign a 32-byte digest, producing a recoverable signature.
///
/// Nonces are RFC 6979 deterministic (the `k256` default), so the same
/// (digest, key) pair always produces the same signature — convenient for
/// tests and immune to RNG failures at signing time. The S half is
/// low-S-normalized and the recovery id adjusted to match, so signatures
/// are canonical.
///
/// # Errors
///
/// [`SigningError::InvalidDigestLength`] if `digest` is not exactly 32
/// bytes. Signing a non-digest is always a caller bug; we refuse rather
/// than hash-and-guess.
pub fn sign_digest(
    digest: &[u8],
    keypair: &TransferKeypair,
) -> Result<RecoverableSignature, SigningError> {
    if digest.len() != DIGEST_LENGTH {
        return Err(SigningError::InvalidDigestLength { got: digest.len() });
    }

    let (sig, recovery_id) = keypair
        .signing_key()
        .sign_prehash_recoverable(digest)
        .map_err(|_| SigningError::Signing)?;

    let mut bytes = [0u8; SIGNATURE_LENGTH];
    bytes[..64].copy_from_slice(&sig.to_bytes());
    bytes[64] = recovery_id.to_byte();
    Ok(RecoverableSignature::from_bytes(bytes))
}

/// Recover the signer's identity from a digest and signature.
///
/// Given the same 32-byte digest that was signed, returns the signer's
/// public key and address — no prior knowledge of the public key needed.
///
/// # Errors
///
/// Fails only on *malformed* inputs: wrong digest length, a V byte outside
/// 0–3, R/S values that are not valid scalars, or a pair for which no curve
/// point exists. It does **not** fail when the digest differs from the one
/// originally signed; that case silently yields a different identity.
/// Callers must compare the result against an expected sender — see
/// [`crate::transaction::verification::verify_transfer`].
pub fn recover_identity(
    digest: &[u8],
    signature: &RecoverableSignature,
) -> Result<RecoveredIdentity, RecoveryError> {
    if digest.len() != DIGEST_LENGTH {
        return Err(RecoveryError::InvalidDigestLength { got: digest.len() });
    }

    let recovery_id = RecoveryId::from_byte(signature.v())
        .ok_or(RecoveryError::InvalidRecoveryId(signature.v()))?;

    let ecdsa_sig = EcdsaSignature::from_slice(&signature.as_bytes()[..64])
        .map_err(|_| RecoveryError::MalformedSignature)?;

    let verifying_key = VerifyingKey::recover_from_prehash(digest, &ecdsa_sig, recovery_id)
        .map_err(|_| RecoveryError::RecoveryFailed)?;

    let address = Address::from_verifying_key(&verifying_key);
    Ok(RecoveredIdentity {
        verifying_key,
        address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::hash::stamped_digest;

    fn test_keypair() -> TransferKeypair {
        let mut secret = [0u8; 32];
        secret[31] = 0x42;
        TransferKeypair::from_bytes(&secret).unwrap()
    }

    #[test]
    fn sign_and_recover_roundtrip() {
        let kp = test_keypair();
        let digest = stamped_digest(b"move 1000 from bill to aaron");
        let sig = sign_digest(&digest, &kp).unwrap();
        let recovered = recover_identity(&digest, &sig).unwrap();
        assert_eq!(recovered.address(), kp.address());
        assert_eq!(recovered.verifying_key(), &kp.verifying_key());
    }

    #[test]
    fn signing_is_deterministic() {
        // RFC 6979: same key + same digest = same signature, bit for bit.
        let kp = test_keypair();
        let digest = stamped_digest(b"determinism");
        let sig1 = sign_digest(&digest, &kp).unwrap();
        let sig2 = sign_digest(&digest, &kp).unwrap();
        assert_eq!(sig1.as_bytes(), sig2.as_bytes());
    }

    #[test]
    fn different_digests_recover_different_identities() {
        // The documented hazard, pinned as a regression guard: recovery with
        // the wrong digest succeeds and returns the WRONG identity. If this
        // test ever fails, either the curve is broken or someone added an
        // implicit integrity check that does not belong here.
        let kp = test_keypair();
        let signed_digest = stamped_digest(b"the payload that was signed");
        let other_digest = stamped_digest(b"a different payload");

        let sig = sign_digest(&signed_digest, &kp).unwrap();
        let recovered = recover_identity(&other_digest, &sig).unwrap();
        assert_ne!(
            recovered.address(),
            kp.address(),
            "recovery against a foreign digest must not yield the signer"
        );
    }

    #[test]
    fn rejects_short_digest_on_sign() {
        let kp = test_keypair();
        match sign_digest(b"too short", &kp) {
            Err(SigningError::InvalidDigestLength { got: 9 }) => {}
            other => panic!("expected InvalidDigestLength, got {:?}", other),
        }
    }

    #[test]
    fn rejects_short_digest_on_recover() {
        let kp = test_keypair();
        let digest = stamped_digest(b"payload");
        let sig = sign_digest(&digest, &kp).unwrap();
        match recover_identity(&digest[..16], &sig) {
            Err(RecoveryError::InvalidDigestLength { got: 16 }) => {}
            other => panic!("expected InvalidDigestLength, got {:?}", other),
        }
    }

    #[test]
    fn rejects_invalid_recovery_id() {
        let kp = test_keypair();
        let digest = stamped_digest(b"payload");
        let sig = sign_digest(&digest, &kp).unwrap();

        let mut bytes = *sig.as_bytes();
        bytes[64] = 27; // pre-offset V from other ecosystems; not raw 0-3
        let tampered = RecoverableSignature::from_bytes(bytes);

        match recover_identity(&digest, &tampered) {
            Err(RecoveryError::InvalidRecoveryId(27)) => {}
            other => panic!("expected InvalidRecoveryId, got {:?}", other),
        }
    }

    #[test]
    fn rejects_zero_r_s() {
        // All-zero R/S are not valid scalars; must fail loudly, never
        // return a silent wrong answer.
        let digest = stamped_digest(b"payload");
        let zeroed = RecoverableSignature::from_bytes([0u8; SIGNATURE_LENGTH]);
        assert!(matches!(
            recover_identity(&digest, &zeroed),
            Err(RecoveryError::MalformedSignature)
        ));
    }

    #[test]
    fn wire_hex_roundtrip() {
        let kp = test_keypair();
        let digest = stamped_digest(b"wire");
        let sig = sign_digest(&digest, &kp).unwrap();

        let wire = sig.to_hex();
        assert!(wire.starts_with("0x"));
        assert_eq!(wire.len(), 2 + 130);

        let parsed = RecoverableSignature::from_hex(&wire).unwrap();
        assert_eq!(sig, parsed);

        // The prefix is optional on input.
        let bare = RecoverableSignature::from_hex(&wire[2..]).unwrap();
        assert_eq!(sig, bare);
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        match RecoverableSignature::from_hex("0xdeadbeef") {
            Err(FormatError::InvalidLength { got: 4 }) => {}
            other => panic!("expected InvalidLength, got {:?}", other),
        }
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        assert!(matches!(
            RecoverableSignature::from_hex("0xnot-hex"),
            Err(FormatError::InvalidHex(_))
        ));
    }

    #[test]
    fn split_components_roundtrip() {
        let kp = test_keypair();
        let digest = stamped_digest(b"split me");
        let sig = sign_digest(&digest, &kp).unwrap();

        let parts = split_signature_components(&sig.to_hex()).unwrap();
        assert_eq!(parts.r, sig.r());
        assert_eq!(parts.s, sig.s());
        assert_eq!(parts.v, sig.v());

        // Reassembly reproduces the original bytes exactly.
        assert_eq!(parts.join(), sig);
    }

    #[test]
    fn split_rejects_truncated_input() {
        let kp = test_keypair();
        let digest = stamped_digest(b"short");
        let sig = sign_digest(&digest, &kp).unwrap();
        let wire = sig.to_hex();
        let truncated = &wire[..2 + 128]; // drop the V byte
        assert!(matches!(
            split_signature_components(truncated),
            Err(FormatError::InvalidLength { got: 64 })
        ));
    }

    #[test]
    fn v_byte_is_raw_recovery_id() {
        let kp = test_keypair();
        let digest = stamped_digest(b"v check");
        let sig = sign_digest(&digest, &kp).unwrap();
        assert!(sig.v() <= 3, "V must be a raw recovery id, got {}", sig.v());
    }

    #[test]
    fn serde_uses_wire_form() {
        let kp = test_keypair();
        let digest = stamped_digest(b"serde");
        let sig = sign_digest(&digest, &kp).unwrap();

        let json = serde_json::to_string(&sig).unwrap();
        assert!(json.starts_with("\"0x"));
        let back: RecoverableSignature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, back);
    }
}
