//! Content checksums for exact deduplication.

use blake3::Hasher as Blake3Hasher;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// File-content checksum used as the dedup key.
///
/// Not a cryptographic integrity guarantee: two files are "the same" for the
/// pipeline iff their checksums match, regardless of path or name.
pub type Checksum = blake3::Hash;

/// Computes content checksums for dedup.
pub struct Hasher;

impl Hasher {
    /// Checksum an in-memory byte buffer.
    ///
    /// Used on the worker path, where the file has already been read once for
    /// both hashing and decoding.
    pub fn content_checksum(data: &[u8]) -> Checksum {
        let mut hasher = Blake3Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }

    /// Checksum a file by streaming it, without loading it fully into memory.
    pub fn content_checksum_file(path: &Path) -> std::io::Result<Checksum> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut hasher = Blake3Hasher::new();

        let mut buffer = [0u8; 65536];
        loop {
            let bytes_read = reader.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            hasher.update(&buffer[..bytes_read]);
        }

        Ok(hasher.finalize())
    }
}
