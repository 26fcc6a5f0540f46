//! The ingestion/dispatch pipeline.
//!
//! Stages, in data-flow order:
//! - **filter**: eligibility predicate for walked entries
//! - **discovery**: the path producer and its two emission strategies
//! - **channel**: bounded hand-off queue with backpressure
//! - **hash** / **dedup**: content checksums and the concurrent dedup gate
//! - **decode**: raw bytes to pixels
//! - **transform**: anchored crop variants from one decoded image
//! - **output**: mirrored output-path mapping
//! - **worker**: the pool draining the queue
//! - **processor**: orchestrates one run end to end

pub mod channel;
pub mod decode;
pub mod dedup;
pub mod discovery;
pub mod filter;
pub mod hash;
pub mod output;
pub mod processor;
pub mod transform;
pub mod worker;

// Re-exports for convenient access
pub use channel::{pending_queue, PathReceiver, PathSender};
pub use decode::{DecodedImage, ImageDecoder};
pub use dedup::ChecksumGate;
pub use discovery::{check_input_root, PathSource, ShuffledWalk, StreamingWalk};
pub use filter::PathFilter;
pub use hash::{Checksum, Hasher};
pub use output::OutputMapper;
pub use processor::Processor;
pub use transform::{ThumbnailRenderer, TransformPipeline};
pub use worker::{RunStats, WorkerPool};
