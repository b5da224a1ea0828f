//! # Identity
//!
//! Addresses — the short, human-facing representation of a signer.
//!
//! An address is derived from a secp256k1 public key, never stored alongside
//! one: the whole point of recoverable signatures is that the verifier
//! re-derives the signer's identity from the signature itself and compares
//! it to a declared address.

pub mod address;

pub use address::{Address, AddressError};
