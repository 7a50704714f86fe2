//! Archive checksums
//!
//! The SHA-256 of the packaged archive is logged before submission and
//! reported in the export summary, so an operator can match a service-side
//! upload against the local build.

use crate::domain::Result;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Hex SHA-256 and byte size of a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    pub sha256: String,
    pub size: u64,
}

/// Calculate the SHA-256 checksum of a file, streaming its content
///
/// # Examples
///
/// ```
/// use depot::core::archive::checksum::calculate_file_checksum;
/// use std::io::Write;
///
/// let mut file = tempfile::NamedTempFile::new().unwrap();
/// file.write_all(b"hello").unwrap();
///
/// let digest = calculate_file_checksum(file.path()).unwrap();
/// assert_eq!(digest.size, 5);
/// assert_eq!(digest.sha256.len(), 64);
/// ```
pub fn calculate_file_checksum(path: &Path) -> Result<FileDigest> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 64 * 1024];
    let mut size = 0u64;

    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
        size += read as u64;
    }

    let result = hasher.finalize();
    Ok(FileDigest {
        sha256: format!("{result:x}"),
        size,
    })
}

/// Calculate the SHA-256 checksum of raw bytes
pub fn calculate_checksum_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}
