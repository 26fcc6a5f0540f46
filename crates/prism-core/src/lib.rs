//! Prism Core - concurrent batch thumbnail pipeline.
//!
//! Prism discovers image files under an input tree, filters and optionally
//! shuffles them, deduplicates by content checksum, and fans them out to a
//! bounded worker pool that writes fixed-size crop variants under a mirrored
//! output tree.
//!
//! # Architecture
//!
//! ```text
//! walk → filter → [shuffle] → bounded queue → workers → decode → dedup gate
//!                                                     → transform → PNG out
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use prism_core::{Config, Processor};
//!
//! #[tokio::main]
//! async fn main() -> prism_core::Result<()> {
//!     let config = Config::load()?;
//!     let summary = Processor::new(config).run().await?;
//!     println!("{} thumbnails written", summary.variants_written);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, PipelineError, PipelineResult, PrismError, Result};
pub use pipeline::{ChecksumGate, OutputMapper, Processor, ThumbnailRenderer};
pub use types::{Anchor, RunSummary};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
