//! SHA-256 checksums in the `sha256:<hex>` format
//!
//! Used to decide whether a generated document differs from the file
//! already on disk.

use crate::{Error, Result};
use sha2::{Digest, Sha256};
use std::path::Path;

const PREFIX: &str = "sha256:";

/// Compute the checksum of string content.
pub fn compute_content_checksum(content: &str) -> String {
    digest(content.as_bytes())
}

/// Compute the checksum of a file's bytes.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn compute_file_checksum(path: &Path) -> Result<Option<String>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(digest(&bytes))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(path, e)),
    }
}

fn digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn content_checksum_has_prefix() {
        assert!(compute_content_checksum("local all all peer").starts_with("sha256:"));
    }

    #[test]
    fn content_and_file_checksums_agree() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("hba.conf");
        std::fs::write(&path, "host all all 127.0.0.1/32 trust\n").unwrap();

        let from_file = compute_file_checksum(&path).unwrap();
        assert_eq!(
            from_file,
            Some(compute_content_checksum("host all all 127.0.0.1/32 trust\n"))
        );
    }

    #[test]
    fn missing_file_has_no_checksum() {
        let temp = TempDir::new().unwrap();
        let checksum = compute_file_checksum(&temp.path().join("absent.conf")).unwrap();
        assert!(checksum.is_none());
    }
}
