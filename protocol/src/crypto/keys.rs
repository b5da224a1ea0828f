//! # Key Management
//!
//! secp256k1 keypair generation and serialization.
//!
//! Every signer of a transfer holds one of these. The module handles
//! creation from the OS RNG, reconstruction from raw or hex-encoded secret
//! scalars, and address derivation. Actually *loading* key material from
//! disk or a secret store is the binary's job, not the library's — the
//! library only ever receives an already-constructed keypair.
//!
//! ## Security considerations
//!
//! - Not every 32-byte string is a valid secp256k1 secret key. Zero and
//!   values at or above the curve order are rejected by `k256`, and we
//!   surface that as [`KeyError::InvalidSecretKey`] rather than papering
//!   over it.
//! - We use OS-level RNG (`OsRng`) for key generation.
//! - Key bytes are never logged, and `Debug` prints only the address.

use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;
use std::fmt;
use thiserror::Error;

use crate::identity::Address;

/// Length of a raw secp256k1 secret key, in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Errors that can occur during key operations.
///
/// Intentionally vague about *why* construction failed — leaking details
/// about key material through error messages is a classic footgun.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("invalid secret key bytes: wrong length or not a valid scalar")]
    InvalidSecretKey,

    #[error("invalid public key bytes: not a valid secp256k1 point")]
    InvalidPublicKey,
}

/// A secp256k1 keypair used to sign transfer digests.
///
/// The private scalar is the only secret: the public key, and therefore the
/// address, is derived from it on demand. Recovery means verifiers never
/// need the public key ahead of time — it falls out of the signature.
///
/// ## Serialization
///
/// `TransferKeypair` intentionally does NOT implement `Serialize` /
/// `Deserialize`. Exporting a private key should be a deliberate act, not
/// something that happens because a keypair ended up inside a struct that
/// got serialized. Use [`secret_key_bytes`](Self::secret_key_bytes)
/// explicitly.
///
/// # Examples
///
/// ```
/// use transfer_protocol::crypto::{TransferKeypair, sign_digest, recover_identity, stamped_digest};
///
/// let kp = TransferKeypair::generate();
/// let digest = stamped_digest(b"some canonical bytes");
/// let sig = sign_digest(&digest, &kp).unwrap();
/// let recovered = recover_identity(&digest, &sig).unwrap();
/// assert_eq!(recovered.address(), kp.address());
/// ```
pub struct TransferKeypair {
    /// The secp256k1 signing (private) key. 32 bytes of pure responsibility.
    signing_key: SigningKey,
}

impl TransferKeypair {
    /// Generate a fresh keypair using the OS cryptographic RNG.
    ///
    /// `OsRng` pulls from `/dev/urandom` on Unix and `BCryptGenRandom` on
    /// Windows. If either of those is compromised, these keys are the least
    /// of your worries.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut OsRng);
        Self { signing_key }
    }

    /// Reconstruct a keypair from raw 32-byte secret key material.
    ///
    /// Fails if the bytes are zero or not below the curve order — unlike
    /// Ed25519, secp256k1 secret keys are not arbitrary byte strings.
    pub fn from_bytes(secret_key_bytes: &[u8; SECRET_KEY_LENGTH]) -> Result<Self, KeyError> {
        let signing_key =
            SigningKey::from_slice(secret_key_bytes).map_err(|_| KeyError::InvalidSecretKey)?;
        Ok(Self { signing_key })
    }

    /// Reconstruct a keypair from a hex-encoded secret key.
    ///
    /// This is the on-disk format the `transfer-signer` binary reads: 64
    /// hex characters, no prefix. Please don't put raw hex keys in config
    /// files in production.
    pub fn from_hex(hex_str: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(hex_str.trim()).map_err(|_| KeyError::InvalidSecretKey)?;
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeyError::InvalidSecretKey);
        }
        let mut arr = [0u8; SECRET_KEY_LENGTH];
        arr.copy_from_slice(&bytes);
        Self::from_bytes(&arr)
    }

    /// Get the underlying `VerifyingKey` (the public key).
    pub fn verifying_key(&self) -> VerifyingKey {
        *self.signing_key.verifying_key()
    }

    /// The 33-byte SEC1 compressed public key.
    pub fn public_key_bytes(&self) -> [u8; 33] {
        let point = self.verifying_key().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// The 20-byte address derived from this keypair's public key.
    ///
    /// This is the identity that signature recovery yields. Safe to share,
    /// log, print on business cards.
    pub fn address(&self) -> Address {
        Address::from_verifying_key(&self.verifying_key())
    }

    /// Exports the raw 32-byte secret key material.
    ///
    /// **Handle with extreme care.** This is the only secret standing
    /// between an attacker and this identity. Don't log it.
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing_key.to_bytes().into()
    }

    /// Hex-encode the secret key — the inverse of [`from_hex`](Self::from_hex).
    ///
    /// Same caveats as [`secret_key_bytes`](Self::secret_key_bytes).
    pub fn secret_key_hex(&self) -> String {
        hex::encode(self.secret_key_bytes())
    }

    /// Get a reference to the underlying `SigningKey`.
    ///
    /// Needed by internal code that talks directly to `k256`. Try not to
    /// pass this around more than necessary.
    pub fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl Clone for TransferKeypair {
    /// Cloning a keypair is allowed but should make you uncomfortable.
    /// Every copy of a private key is another thing to protect.
    fn clone(&self) -> Self {
        Self {
            signing_key: self.signing_key.clone(),
        }
    }
}

impl fmt::Debug for TransferKeypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print secret key material in debug output. Not even "partially."
        write!(f, "TransferKeypair(address={})", self.address())
    }
}

impl PartialEq for TransferKeypair {
    /// Two keypairs are equal if their public keys match. Comparing secret
    /// material in a non-constant-time way is a bad habit, and for identity
    /// purposes the public key is what matters.
    fn eq(&self, other: &Self) -> bool {
        self.verifying_key() == other.verifying_key()
    }
}

impl Eq for TransferKeypair {}
