//! Concurrent dedup gate over content checksums.

use std::collections::HashSet;
use std::sync::Mutex;

use super::hash::Checksum;

/// Thread-safe membership test over previously seen content checksums.
///
/// The backing set is owned exclusively by the gate and only ever grows; a
/// long run over many unique files grows it unboundedly, which is the
/// accepted memory/throughput trade-off for in-process dedup. All access
/// passes through one mutex so that check-and-insert is atomic: no two
/// concurrent callers can both observe "not present" for the same checksum.
#[derive(Debug, Default)]
pub struct ChecksumGate {
    seen: Mutex<HashSet<Checksum>>,
}

impl ChecksumGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically check membership and insert if absent.
    ///
    /// Returns true iff this is the first time the checksum has been
    /// observed. Safe under unbounded concurrent callers.
    pub fn observe(&self, checksum: Checksum) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(checksum)
    }

    /// Number of distinct checksums observed so far.
    pub fn len(&self) -> usize {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
