//! Eligibility predicate for filesystem entries.

use walkdir::DirEntry;

/// Decides whether a filesystem entry is a valid pipeline input.
///
/// An entry is eligible iff its base name does not start with the hidden-file
/// marker, it is a regular file, and its size is strictly positive. The
/// predicate has no side effects; metadata retrieval failures are the
/// caller's concern and are treated as "not eligible".
pub struct PathFilter;

impl PathFilter {
    /// Pure form of the predicate, usable without touching the filesystem.
    pub fn is_eligible(base_name: &str, is_dir: bool, size: u64) -> bool {
        !base_name.starts_with('.') && !is_dir && size > 0
    }

    /// Apply the predicate to a walk entry, reading its metadata.
    pub fn accepts(entry: &DirEntry) -> bool {
        let base_name = entry.file_name().to_string_lossy();
        let Ok(metadata) = entry.metadata() else {
            return false;
        };
        Self::is_eligible(&base_name, metadata.is_dir(), metadata.len())
    }
}
