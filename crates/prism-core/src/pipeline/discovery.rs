//! Path discovery: walks the input tree and feeds the pending queue.
//!
//! Two strategies implement the same capability — emit every eligible path
//! exactly once, then close the queue:
//!
//! - [`StreamingWalk`] pushes paths in traversal order as the walk finds
//!   them. Memory stays O(queue capacity) regardless of tree size.
//! - [`ShuffledWalk`] buffers the whole walk, then emits a uniformly random
//!   permutation. With dedup active this keeps traversal order from biasing
//!   which copy of a duplicate survives (streaming would always keep the
//!   walk-order-first copy, silently unbalancing dataset classes).
//!
//! The strategy is chosen once at startup and fixed for the run.

use std::future::Future;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::SeedableRng;
use walkdir::WalkDir;

use crate::error::PipelineError;

use super::channel::PathSender;
use super::filter::PathFilter;

/// A source of eligible input paths.
///
/// `produce` pushes every eligible path under the source's root onto the
/// queue exactly once and returns the number pushed. The queue is closed
/// (sender dropped) when the future resolves, and only then.
pub trait PathSource: Send + 'static {
    fn produce(
        self,
        tx: PathSender,
    ) -> impl Future<Output = Result<u64, PipelineError>> + Send;
}

/// Verify the input root exists and is a directory.
///
/// Per-entry errors during the walk are skippable; an unreadable root is not.
pub fn check_input_root(root: &Path) -> Result<(), PipelineError> {
    match std::fs::metadata(root) {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(PipelineError::InputRoot {
            path: root.to_path_buf(),
            message: "not a directory".to_string(),
        }),
        Err(e) => Err(PipelineError::InputRoot {
            path: root.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

fn walk_eligible(root: &Path) -> impl Iterator<Item = PathBuf> + '_ {
    WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                // Unreadable entries are skipped; the walk continues.
                tracing::warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(PathFilter::accepts)
        .map(|entry| entry.into_path())
}

/// Streaming strategy: push paths as the walk finds them.
pub struct StreamingWalk {
    root: PathBuf,
}

impl StreamingWalk {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PathSource for StreamingWalk {
    async fn produce(self, tx: PathSender) -> Result<u64, PipelineError> {
        check_input_root(&self.root)?;

        let mut pushed = 0u64;
        for path in walk_eligible(&self.root) {
            if tx.send(path).await.is_err() {
                tracing::debug!("Pending queue closed by consumers — stopping walk");
                break;
            }
            pushed += 1;
        }

        tracing::debug!("Streaming walk complete: {pushed} paths");
        Ok(pushed)
    }
}

/// Shuffle-buffered strategy: collect the full walk, then emit a permutation.
pub struct ShuffledWalk {
    root: PathBuf,
    seed: Option<u64>,
}

impl ShuffledWalk {
    pub fn new(root: impl Into<PathBuf>, seed: Option<u64>) -> Self {
        Self {
            root: root.into(),
            seed,
        }
    }
}

impl PathSource for ShuffledWalk {
    async fn produce(self, tx: PathSender) -> Result<u64, PipelineError> {
        check_input_root(&self.root)?;

        let mut paths: Vec<PathBuf> = walk_eligible(&self.root).collect();

        // Sort to a stable base order so a fixed seed reproduces the same
        // permutation regardless of filesystem enumeration order.
        paths.sort();

        let mut rng = match self.seed {
            Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
            None => rand::rngs::StdRng::from_entropy(),
        };
        paths.shuffle(&mut rng);

        let mut pushed = 0u64;
        for path in paths {
            if tx.send(path).await.is_err() {
                tracing::debug!("Pending queue closed by consumers — stopping emission");
                break;
            }
            pushed += 1;
        }

        tracing::debug!("Shuffled walk complete: {pushed} paths");
        Ok(pushed)
    }
}
