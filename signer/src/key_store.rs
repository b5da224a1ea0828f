//! # Key Files
//!
//! Loading and storing secp256k1 private keys on disk.
//!
//! The on-disk format is the one the surrounding tooling ecosystem uses: a
//! single line of 64 hex characters (the raw 32-byte secret scalar), no
//! prefix, optional trailing newline. The library deliberately knows nothing
//! about files — this module is the "external collaborator" that hands it an
//! already-loaded keypair.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use transfer_protocol::crypto::keys::TransferKeypair;

/// Load a keypair from a hex-encoded key file.
pub fn load_keypair(path: &Path) -> Result<TransferKeypair> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("unable to read key file {}", path.display()))?;

    TransferKeypair::from_hex(&contents)
        .with_context(|| format!("key file {} does not contain a valid key", path.display()))
}

/// Write a keypair's secret to a key file, hex-encoded.
///
/// Refuses to overwrite an existing file: clobbering a key file destroys an
/// identity, and there is no undo. On Unix the file is created with mode
/// 0600.
pub fn store_keypair(path: &Path, keypair: &TransferKeypair) -> Result<()> {
    anyhow::ensure!(
        !path.exists(),
        "refusing to overwrite existing key file {}",
        path.display()
    );

    let hex_line = format!("{}\n", keypair.secret_key_hex());
    fs::write(path, hex_line)
        .with_context(|| format!("unable to write key file {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("unable to restrict permissions on {}", path.display()))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signer.key");

        let kp = TransferKeypair::generate();
        store_keypair(&path, &kp).unwrap();

        let loaded = load_keypair(&path).unwrap();
        assert_eq!(loaded.address(), kp.address());
    }

    #[test]
    fn load_tolerates_trailing_newline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signer.key");

        let kp = TransferKeypair::generate();
        std::fs::write(&path, format!("{}\n\n", kp.secret_key_hex())).unwrap();

        let loaded = load_keypair(&path).unwrap();
        assert_eq!(loaded.address(), kp.address());
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signer.key");

        let kp = TransferKeypair::generate();
        store_keypair(&path, &kp).unwrap();
        assert!(store_keypair(&path, &TransferKeypair::generate()).is_err());
    }

    #[test]
    fn missing_file_is_an_error_with_context() {
        let err = load_keypair(Path::new("/nonexistent/signer.key")).unwrap_err();
        assert!(err.to_string().contains("unable to read key file"));
    }

    #[test]
    fn garbage_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signer.key");
        std::fs::write(&path, "this is not a key").unwrap();
        assert!(load_keypair(&path).is_err());
    }
}
