//! # Addresses
//!
//! A 20-byte account identifier derived from a secp256k1 public key:
//!
//! ```text
//! public_key (uncompressed SEC1, 65 bytes)
//!     -> drop the 0x04 tag byte -> 64 bytes
//!     -> keccak256 -> 32 bytes
//!     -> last 20 bytes -> address
//! ```
//!
//! This is the Ethereum address convention, chosen for interoperability:
//! external verifiers expect `0x` + 40 hex digits, and the mixed-case
//! EIP-55 checksum gives copy-paste error detection without changing the
//! underlying bytes.

use k256::ecdsa::VerifyingKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::crypto::hash::keccak256;

/// Length of an address, in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// Errors that can occur while parsing an address string.
#[derive(Debug, Error)]
pub enum AddressError {
    /// The string is not valid hexadecimal after the optional `0x` prefix.
    #[error("invalid hex in address: {0}")]
    InvalidHex(String),

    /// The decoded bytes are not exactly 20 bytes.
    #[error("invalid address length: expected {ADDRESS_LENGTH} bytes, got {got}")]
    InvalidLength {
        /// Actual number of decoded bytes.
        got: usize,
    },
}

/// A 20-byte account identifier.
///
/// Displays as `0x` followed by 40 hex digits in EIP-55 mixed case. Parsing
/// accepts any casing with or without the `0x` prefix — checksum casing is
/// an output convention, not an input requirement, because the original
/// tooling ecosystem never enforced it on input either.
///
/// # Examples
///
/// ```
/// use transfer_protocol::identity::Address;
///
/// let addr: Address = "0xF01813E4B85e178A83e29B8E7bF26BD830a25f32".parse().unwrap();
/// assert_eq!(addr.to_string(), "0xF01813E4B85e178A83e29B8E7bF26BD830a25f32");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Create an address from raw bytes.
    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derive the address of a public key.
    ///
    /// Hashes the 64-byte uncompressed point (without the SEC1 `0x04` tag)
    /// with keccak-256 and keeps the trailing 20 bytes.
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        let point = key.to_encoded_point(false);
        // Skip the 0x04 tag byte; the hash covers only the x||y coordinates.
        let digest = keccak256(&point.as_bytes()[1..]);
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes.copy_from_slice(&digest[12..]);
        Self(bytes)
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// The EIP-55 mixed-case hex representation, `0x`-prefixed.
    ///
    /// Casing is derived from the keccak-256 hash of the lowercase hex
    /// digits: a letter is uppercased when the corresponding hash nibble is
    /// 8 or above. Verifiers that ignore case still accept it; verifiers
    /// that check it catch single-character typos.
    pub fn to_checksum_string(&self) -> String {
        let lower = hex::encode(self.0);
        let digest = keccak256(lower.as_bytes());

        let mut out = String::with_capacity(2 + 40);
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                digest[i / 2] >> 4
            } else {
                digest[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let bytes =
            hex::decode(stripped).map_err(|_| AddressError::InvalidHex(stripped.to_string()))?;
        if bytes.len() != ADDRESS_LENGTH {
            return Err(AddressError::InvalidLength { got: bytes.len() });
        }
        let mut arr = [0u8; ADDRESS_LENGTH];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum_string())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum_string())
    }
}

impl Serialize for Address {
    /// Serializes as the checksummed hex string, matching the wire
    /// convention external verifiers expect.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_checksum_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
