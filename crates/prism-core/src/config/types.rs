//! Sub-configuration structs with defaults matching the original tool.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::types::Anchor;

/// Input and output tree locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the source image tree
    pub input_root: PathBuf,

    /// Root under which the mirrored output tree is written
    pub output_root: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("image_packs"),
            output_root: PathBuf::from("image_thumbs"),
        }
    }
}

/// Concurrency and dispatch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Worker count; 0 means 2x available parallelism
    pub workers: usize,

    /// Pending-queue capacity as a multiple of the worker count
    pub queue_multiplier: usize,

    /// Skip files whose content checksum has already been seen
    pub dedup: bool,

    /// Buffer the whole walk and emit paths in a random permutation.
    /// Prevents traversal order from biasing which duplicate survives.
    pub shuffle: bool,

    /// Fixed RNG seed for the shuffled strategy; None draws from entropy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            queue_multiplier: 4,
            dedup: true,
            shuffle: true,
            seed: None,
        }
    }
}

impl ProcessingConfig {
    /// Resolve the effective worker count.
    pub fn worker_count(&self) -> usize {
        if self.workers > 0 {
            return self.workers;
        }
        let parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        parallelism * 2
    }

    /// Resolve the pending-queue capacity.
    pub fn queue_capacity(&self) -> usize {
        self.worker_count() * self.queue_multiplier
    }
}

/// Thumbnail rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThumbnailConfig {
    /// Target output width in pixels
    pub width: u32,

    /// Target output height in pixels
    pub height: u32,

    /// Crop anchors; one variant is rendered per anchor
    pub anchors: Vec<Anchor>,

    /// Also render a vertically flipped variant per anchor
    pub flip_vertical: bool,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            width: 224,
            height: 224,
            anchors: vec![Anchor::Left, Anchor::Right, Anchor::Center],
            flip_vertical: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
