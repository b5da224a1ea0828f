//! # CLI Interface
//!
//! Defines the command-line argument structure for `transfer-signer` using
//! `clap` derive. Supports four subcommands: `keygen`, `sign`, `recover`,
//! and `split`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Transfer signing and recovery tool.
///
/// Signs transfer records with a secp256k1 key, recovers signer addresses
/// from signatures, and splits wire-format signatures into their V/R/S
/// components. Structured output goes to stdout; logs go to stderr.
#[derive(Parser, Debug)]
#[command(
    name = "transfer-signer",
    about = "Sign transfers and recover signer addresses",
    version,
    propagate_version = true
)]
pub struct SignerCli {
    /// Log output format: "pretty" or "json".
    #[arg(long, env = "SIGNER_LOG_FORMAT", default_value = "pretty", global = true)]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the transfer-signer binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a fresh keypair and write it to a key file.
    Keygen(KeygenArgs),
    /// Sign a transfer record and print the signed transfer as JSON.
    Sign(SignArgs),
    /// Recover the signer's address from a transfer record and a signature.
    Recover(RecoverArgs),
    /// Split a wire-format signature into its V, R, and S components.
    Split(SplitArgs),
}

/// Arguments for the `keygen` subcommand.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Path for the new key file. Must not already exist.
    #[arg(long, short = 'o', env = "SIGNER_KEY_FILE")]
    pub out: PathBuf,
}

/// The transfer fields shared by `sign` and `recover`.
#[derive(Args, Debug)]
pub struct TransferArgs {
    /// Sender identifier (label or 0x-prefixed hex address).
    #[arg(long)]
    pub from: String,

    /// Recipient identifier.
    #[arg(long)]
    pub to: String,

    /// Amount to transfer, in the smallest unit.
    #[arg(long)]
    pub value: u64,

    /// Hash the canonical bytes directly, without the domain-separation
    /// stamp. Deprecated; only for interop with legacy unstamped signatures.
    #[arg(long)]
    pub no_stamp: bool,
}

/// Arguments for the `sign` subcommand.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Path to the hex-encoded private key file.
    #[arg(long, short = 'k', env = "SIGNER_KEY_FILE")]
    pub key: PathBuf,

    #[command(flatten)]
    pub transfer: TransferArgs,
}

/// Arguments for the `recover` subcommand.
#[derive(Args, Debug)]
pub struct RecoverArgs {
    #[command(flatten)]
    pub transfer: TransferArgs,

    /// The wire-format signature: 0x followed by 130 hex digits.
    #[arg(long, short = 's')]
    pub signature: String,

    /// Expected sender address; when given, recovery is followed by a
    /// comparison and a non-zero exit on mismatch.
    #[arg(long)]
    pub expect: Option<String>,
}

/// Arguments for the `split` subcommand.
#[derive(Args, Debug)]
pub struct SplitArgs {
    /// The wire-format signature: 0x followed by 130 hex digits.
    #[arg(long, short = 's')]
    pub signature: String,
}
