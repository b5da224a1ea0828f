//! # Hashing
//!
//! Keccak-256 digests and the domain-separation stamp applied to transfer
//! messages before signing.
//!
//! ## Why keccak-256 and not SHA3-256?
//!
//! They are not the same function. Keccak-256 is the pre-standardization
//! variant (different padding byte) that the secp256k1 ecosystem settled on
//! for address derivation and message digests. Every external verifier we
//! care about expects keccak, so keccak it is. The `sha3` crate ships both;
//! we only ever use `Keccak256`.
//!
//! ## The stamp
//!
//! Signing raw payload hashes is how cross-protocol replay happens: a
//! signature over bytes that happen to be valid in some other format can be
//! presented there as consent. The stamp prefixes every message with a fixed
//! ASCII tag plus the payload's decimal length before hashing, so a transfer
//! signature can never double as a signature over anything else. The leading
//! `0x19` byte makes the prefixed message unparseable as most structured
//! encodings.

use sha3::{Digest, Keccak256};

/// ASCII prefix mixed into every stamped digest. The `\x19` control byte
/// guarantees the stamped message is not itself a valid transfer encoding.
pub const STAMP_PREFIX: &[u8] = b"\x19Ardan Signed Message:\n";

/// Compute the keccak-256 hash of the input data.
///
/// Returns a 32-byte digest. Pure function; succeeds for any byte input.
///
/// # Example
///
/// ```
/// use transfer_protocol::crypto::keccak256;
///
/// let digest = keccak256(b"transfer 1000 to aaron");
/// assert_eq!(digest.len(), 32);
/// ```
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Hash multiple byte slices together without concatenation overhead.
///
/// Feeding the parts sequentially into the hasher produces the same digest
/// as hashing their concatenation, minus the temporary buffer. Used to mix
/// the stamp prefix, the length tag, and the payload in one pass.
pub fn keccak256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// Compute the domain-separated digest of a canonical message.
///
/// The hashed input is `STAMP_PREFIX || decimal(len(data)) || data`. The
/// decimal length binds the stamp to exactly this payload — without it, a
/// prefix of one message could masquerade as another.
///
/// # Example
///
/// ```
/// use transfer_protocol::crypto::stamped_digest;
///
/// let d = stamped_digest(b"{\"from\":\"Bill\",\"to\":\"Aaron\",\"value\":1000}");
/// assert_eq!(d.len(), 32);
/// ```
pub fn stamped_digest(data: &[u8]) -> [u8; 32] {
    let len_tag = data.len().to_string();
    keccak256_multi(&[STAMP_PREFIX, len_tag.as_bytes(), data])
}

/// Compute the digest of a canonical message, with or without the stamp.
///
/// `with_stamp = true` is the path every new signature should take.
///
/// The unstamped path (`with_stamp = false`) hashes the bytes directly and
/// is retained only for comparison against signatures produced before the
/// stamp existed. It is **deprecated**: without domain separation, a
/// signature over these bytes is replayable wherever the same raw bytes are
/// meaningful.
pub fn message_digest(data: &[u8], with_stamp: bool) -> [u8; 32] {
    if with_stamp {
        stamped_digest(data)
    } else {
        keccak256(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keccak256_known_vector() {
        // keccak-256 of the empty string. If this fails, someone swapped in
        // SHA3-256 (which hashes empty input to a7ffc6f8...).
        let digest = keccak256(b"");
        let expected =
            hex::decode("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
                .unwrap();
        assert_eq!(digest.as_slice(), expected.as_slice());
    }

    #[test]
    fn keccak256_deterministic() {
        let a = keccak256(b"transfer");
        let b = keccak256(b"transfer");
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn keccak256_multi_matches_concatenation() {
        let multi = keccak256_multi(&[b"hello", b" ", b"world"]);
        let single = keccak256(b"hello world");
        assert_eq!(multi, single);
    }

    #[test]
    fn stamped_digest_matches_manual_construction() {
        let data = b"{\"from\":\"Bill\",\"to\":\"Aaron\",\"value\":1000}";
        let mut manual = Vec::new();
        manual.extend_from_slice(STAMP_PREFIX);
        manual.extend_from_slice(data.len().to_string().as_bytes());
        manual.extend_from_slice(data);

        assert_eq!(stamped_digest(data), keccak256(&manual));
    }

    #[test]
    fn stamped_and_unstamped_digests_differ() {
        // The whole point of domain separation. Never assert these equal.
        let data = b"same payload";
        assert_ne!(message_digest(data, true), message_digest(data, false));
    }

    #[test]
    fn message_digest_routes_correctly() {
        let data = b"payload";
        assert_eq!(message_digest(data, true), stamped_digest(data));
        assert_eq!(message_digest(data, false), keccak256(data));
    }

    #[test]
    fn stamp_length_tag_binds_payload_length() {
        // The decimal length is part of the hashed input, so payloads of
        // different lengths get different stamps even before their contents
        // are mixed in.
        assert_ne!(stamped_digest(&[0u8; 9]), stamped_digest(&[0u8; 10]));
    }

    #[test]
    fn empty_input_stamps_cleanly() {
        // Zero-length payload gets the tag "0"; still a valid digest.
        let d = stamped_digest(b"");
        assert_eq!(d, keccak256(b"\x19Ardan Signed Message:\n0"));
    }
}
