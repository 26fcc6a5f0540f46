//! Shared types for the thumbnail pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Horizontal crop anchor for a thumbnail variant.
///
/// The cover-resized image is cropped to the target size with the crop window
/// pinned to one of these positions; the vertical offset is always centered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    Left,
    Center,
    Right,
}

impl Anchor {
    /// The variant-name stem used in output filenames.
    pub fn name(&self) -> &'static str {
        match self {
            Anchor::Left => "left",
            Anchor::Center => "center",
            Anchor::Right => "right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Anchor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Anchor::Left),
            "center" => Ok(Anchor::Center),
            "right" => Ok(Anchor::Right),
            other => Err(format!(
                "unknown anchor '{other}' (expected left, center, or right)"
            )),
        }
    }
}

/// Totals reported after a completed run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Files fully processed (decoded, rendered, and written)
    pub processed: u64,
    /// Files skipped because their checksum was already seen
    pub duplicates: u64,
    /// Files abandoned due to a per-file error
    pub failed: u64,
    /// Individual variant files written to disk
    pub variants_written: u64,
    /// Eligible paths emitted by the producer
    pub discovered: u64,
    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl RunSummary {
    /// Total files pulled off the queue by the worker pool.
    pub fn consumed(&self) -> u64 {
        self.processed + self.duplicates + self.failed
    }
}
