// Copyright (c) 2026 Transfer Protocol Contributors. MIT License.
// See LICENSE for details.

//! # Transfer Signer
//!
//! Entry point for the `transfer-signer` binary. Parses CLI arguments,
//! initializes logging, and dispatches to one of four subcommands:
//!
//! - `keygen`  — generate a keypair and write it to a key file
//! - `sign`    — sign a transfer record with a key loaded from disk
//! - `recover` — recover the signer's address from a record and signature
//! - `split`   — decompose a wire signature into V/R/S components
//!
//! Structured output (JSON, addresses) goes to stdout; diagnostics go to
//! stderr via `tracing`, so output can be piped cleanly.

mod cli;
mod key_store;
mod logging;

use anyhow::{bail, Context, Result};
use clap::Parser;

use transfer_protocol::crypto::signatures::{split_signature_components, RecoverableSignature};
use transfer_protocol::identity::Address;
use transfer_protocol::transaction::signing::sign_transfer;
use transfer_protocol::transaction::types::TransferRecord;
use transfer_protocol::transaction::verification::recover_sender;

use cli::{Commands, KeygenArgs, RecoverArgs, SignArgs, SignerCli, SplitArgs};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = SignerCli::parse();
    logging::init_logging(
        "transfer_signer=info,transfer_protocol=info",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    match cli.command {
        Commands::Keygen(args) => keygen(args),
        Commands::Sign(args) => sign(args),
        Commands::Recover(args) => recover(args),
        Commands::Split(args) => split(args),
    }
}

/// Generates a fresh keypair, writes the key file, and prints the address.
fn keygen(args: KeygenArgs) -> Result<()> {
    let keypair = transfer_protocol::crypto::TransferKeypair::generate();
    key_store::store_keypair(&args.out, &keypair)?;

    tracing::info!(path = %args.out.display(), address = %keypair.address(), "keypair written");
    println!("{}", keypair.address());
    Ok(())
}

/// Signs a transfer and prints the signed transfer as JSON.
fn sign(args: SignArgs) -> Result<()> {
    let keypair = key_store::load_keypair(&args.key)?;
    let record = TransferRecord::new(args.transfer.from, args.transfer.to, args.transfer.value);

    let signed = sign_transfer(&record, &keypair, !args.transfer.no_stamp)
        .context("unable to sign transfer")?;

    tracing::info!(
        signer = %keypair.address(),
        signature = %signed.signature,
        stamped = signed.stamped,
        "transfer signed"
    );

    println!("{}", serde_json::to_string_pretty(&signed)?);
    Ok(())
}

/// Recovers the signer's address and prints it; with `--expect`, also
/// compares and fails on mismatch.
fn recover(args: RecoverArgs) -> Result<()> {
    let signature = RecoverableSignature::from_hex(&args.signature)
        .context("unable to parse wire signature")?;
    let record = TransferRecord::new(args.transfer.from, args.transfer.to, args.transfer.value);

    let identity = recover_sender(&record, &signature, !args.transfer.no_stamp)
        .context("unable to recover signer")?;

    tracing::info!(address = %identity.address(), "identity recovered");
    println!("{}", identity.address());

    if let Some(expect) = args.expect {
        let expected: Address = expect
            .parse()
            .context("unable to parse expected address")?;
        if identity.address() != expected {
            // Recovery succeeded but the identity is not who the caller
            // thinks signed. This is how tampering surfaces.
            bail!(
                "recovered address {} does not match expected {}",
                identity.address(),
                expected
            );
        }
        tracing::info!(address = %expected, "recovered address matches expected sender");
    }

    Ok(())
}

/// Splits a wire signature into components and prints them as JSON.
fn split(args: SplitArgs) -> Result<()> {
    let components =
        split_signature_components(&args.signature).context("unable to split signature")?;

    println!(
        "{}",
        serde_json::json!({
            "v": components.v,
            "r": format!("0x{}", hex::encode(components.r)),
            "s": format!("0x{}", hex::encode(components.s)),
        })
    );
    Ok(())
}
