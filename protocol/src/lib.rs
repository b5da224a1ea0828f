// Copyright (c) 2026 Transfer Protocol Contributors. MIT License.
// See LICENSE for details.

//! # Transfer Protocol — Core Library
//!
//! Deterministic encoding, digesting, signing, and signer recovery for
//! monetary transfer records, following the secp256k1/keccak-256 conventions
//! used by Ethereum-style tooling.
//!
//! The library owns exactly one lifecycle: canonicalize a [`TransferRecord`]
//! into bytes, compute a domain-separated keccak-256 digest, sign that digest
//! with a secp256k1 key, and recover (or verify) the signer's address from a
//! digest/signature pair. There is no ledger, no networking, and no storage —
//! key loading from disk lives in the `transfer-signer` binary.
//!
//! ## Architecture
//!
//! - **crypto** — keccak-256 hashing, secp256k1 keypairs, recoverable
//!   ECDSA signatures. Thin, type-safe wrappers over `sha3` and `k256`.
//! - **identity** — 20-byte addresses derived from public keys, with
//!   EIP-55 checksum formatting.
//! - **transaction** — the transfer record, its canonical byte encoding,
//!   and the signing/verification paths built on top of `crypto`.
//!
//! ## The recovery hazard
//!
//! ECDSA public-key recovery does not validate the payload. Feeding
//! [`crypto::recover_identity`] a digest other than the one that was signed
//! yields a *different, mathematically valid* identity — silently. The
//! verification path in [`transaction::verification`] exists precisely so
//! callers compare the recovered address against the declared sender instead
//! of trusting recovery alone.
//!
//! [`TransferRecord`]: transaction::TransferRecord

pub mod crypto;
pub mod identity;
pub mod transaction;
