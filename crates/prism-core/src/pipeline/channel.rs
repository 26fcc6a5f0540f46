//! Bounded hand-off queue between the path producer and the worker pool.

use std::path::PathBuf;
use tokio::sync::mpsc;

/// Sender half of the pending queue.
pub type PathSender = mpsc::Sender<PathBuf>;

/// Receiver half of the pending queue.
pub type PathReceiver = mpsc::Receiver<PathBuf>;

/// Create the bounded pending queue with the given capacity.
///
/// When the buffer is full the producer's send blocks, providing backpressure
/// so a fast walk cannot outrun a slow worker pool in memory. Dropping the
/// sender closes the queue; workers observe completion when the queue is both
/// closed and drained.
pub fn pending_queue(capacity: usize) -> (PathSender, PathReceiver) {
    mpsc::channel(capacity)
}
