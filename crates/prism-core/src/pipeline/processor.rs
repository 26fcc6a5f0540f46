//! Run orchestration: wires the producer, the queue, and the worker pool.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::types::RunSummary;

use super::channel::pending_queue;
use super::dedup::ChecksumGate;
use super::discovery::{check_input_root, PathSource, ShuffledWalk, StreamingWalk};
use super::output::OutputMapper;
use super::transform::ThumbnailRenderer;
use super::worker::{RunStats, WorkerPool};

/// Orchestrates one batch run from tree walk to final summary.
pub struct Processor {
    config: Config,
}

impl Processor {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute the run to completion.
    ///
    /// The producer strategy is fixed here, before anything is spawned. An
    /// inaccessible input root aborts before any worker starts; from then on
    /// the run only ends once the producer has closed the queue and every
    /// worker has drained it and exited.
    pub async fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let input_root = self.config.input_root();
        let output_root = self.config.output_root();

        // Fatal setup checks: workers must never start against an invalid
        // configuration or a bad root.
        self.config.validate()?;
        check_input_root(&input_root)?;

        let workers = self.config.processing.worker_count();
        let capacity = self.config.processing.queue_capacity();
        tracing::info!(
            "Starting run: {workers} workers, queue capacity {capacity}, \
             shuffle={}, dedup={}",
            self.config.processing.shuffle,
            self.config.processing.dedup,
        );

        let (tx, rx) = pending_queue(capacity);

        let producer = if self.config.processing.shuffle {
            let source = ShuffledWalk::new(&input_root, self.config.processing.seed);
            tokio::spawn(source.produce(tx))
        } else {
            let source = StreamingWalk::new(&input_root);
            tokio::spawn(source.produce(tx))
        };

        let gate = self
            .config
            .processing
            .dedup
            .then(|| Arc::new(ChecksumGate::new()));
        let stats = Arc::new(RunStats::default());
        let pool = WorkerPool::new(
            workers,
            gate,
            Arc::new(ThumbnailRenderer::new(self.config.thumbnail.clone())),
            OutputMapper::new(&input_root, &output_root),
            stats.clone(),
        );

        pool.run(rx).await?;

        let discovered = producer
            .await
            .map_err(|e| PipelineError::Join {
                message: e.to_string(),
            })?
            .map_err(crate::error::PrismError::Pipeline)?;

        let summary = RunSummary {
            processed: stats.processed.load(Ordering::Relaxed),
            duplicates: stats.duplicates.load(Ordering::Relaxed),
            failed: stats.failed.load(Ordering::Relaxed),
            variants_written: stats.variants_written.load(Ordering::Relaxed),
            discovered,
            elapsed: start.elapsed(),
        };

        tracing::info!(
            "Run complete: {} processed, {} duplicates, {} failed, {} variants in {:.1?}",
            summary.processed,
            summary.duplicates,
            summary.failed,
            summary.variants_written,
            summary.elapsed,
        );
        Ok(summary)
    }
}
