//! The worker pool: drains the pending queue and writes rendered variants.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use image::ImageFormat;
use tokio::sync::Mutex;

use crate::error::PipelineError;

use super::channel::PathReceiver;
use super::decode::ImageDecoder;
use super::dedup::ChecksumGate;
use super::hash::Hasher;
use super::output::OutputMapper;
use super::transform::TransformPipeline;

/// Per-run counters, shared across workers.
#[derive(Debug, Default)]
pub struct RunStats {
    pub processed: AtomicU64,
    pub duplicates: AtomicU64,
    pub failed: AtomicU64,
    pub variants_written: AtomicU64,
}

/// Everything a worker needs, shared by the whole pool.
struct WorkerContext {
    gate: Option<Arc<ChecksumGate>>,
    renderer: Arc<dyn TransformPipeline>,
    mapper: OutputMapper,
    stats: Arc<RunStats>,
}

/// Fixed-size pool of concurrent workers.
///
/// Workers share the queue receiver behind a mutex; each repeatedly pulls one
/// path (blocking while the queue is empty but open) and terminates once the
/// queue is both closed and drained. A failing file never terminates a worker
/// — per-file errors are logged, counted, and skipped.
pub struct WorkerPool {
    workers: usize,
    context: Arc<WorkerContext>,
}

impl WorkerPool {
    pub fn new(
        workers: usize,
        gate: Option<Arc<ChecksumGate>>,
        renderer: Arc<dyn TransformPipeline>,
        mapper: OutputMapper,
        stats: Arc<RunStats>,
    ) -> Self {
        Self {
            workers,
            context: Arc::new(WorkerContext {
                gate,
                renderer,
                mapper,
                stats,
            }),
        }
    }

    /// Run the pool to completion: returns once every worker has observed
    /// the queue closed and empty.
    pub async fn run(&self, rx: PathReceiver) -> Result<(), PipelineError> {
        let rx = Arc::new(Mutex::new(rx));

        let mut handles = Vec::with_capacity(self.workers);
        for worker_id in 0..self.workers {
            let context = self.context.clone();
            let rx = rx.clone();
            handles.push(tokio::spawn(worker_loop(worker_id, context, rx)));
        }

        for handle in handles {
            handle.await.map_err(|e| PipelineError::Join {
                message: e.to_string(),
            })?;
        }
        Ok(())
    }
}

async fn worker_loop(
    worker_id: usize,
    context: Arc<WorkerContext>,
    rx: Arc<Mutex<PathReceiver>>,
) {
    loop {
        // Hold the receiver lock only while pulling one path.
        let path = { rx.lock().await.recv().await };
        let Some(path) = path else {
            tracing::trace!("Worker {worker_id}: queue closed and drained");
            break;
        };
        process_path(&context, path).await;
    }
}

/// Process one input path end to end. Errors are absorbed here: they are
/// logged and counted, and the worker moves on to the next path.
async fn process_path(context: &WorkerContext, path: PathBuf) {
    tracing::debug!("Processing {:?}", path);
    let stats = &context.stats;

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(source) => {
            let e = PipelineError::Read {
                path: path.clone(),
                source,
            };
            tracing::error!("{e}");
            stats.failed.fetch_add(1, Ordering::Relaxed);
            return;
        }
    };

    // Checksum is computed unconditionally, even with dedup off, so the cost
    // profile does not change when toggling the gate. Hashing a large file is
    // CPU-bound, so it runs off the async threads like decode and render.
    let (checksum, bytes) = match tokio::task::spawn_blocking(move || {
        let checksum = Hasher::content_checksum(&bytes);
        (checksum, bytes)
    })
    .await
    {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!("Checksum task failed for {:?}: {e}", path);
            stats.failed.fetch_add(1, Ordering::Relaxed);
            return;
        }
    };
    if let Some(gate) = &context.gate {
        if !gate.observe(checksum) {
            tracing::debug!("Skipping duplicate {:?}", path);
            stats.duplicates.fetch_add(1, Ordering::Relaxed);
            return;
        }
    }

    let decoded = match ImageDecoder::decode_from_bytes(bytes, &path).await {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::error!("{e}");
            stats.failed.fetch_add(1, Ordering::Relaxed);
            return;
        }
    };
    tracing::trace!("Decoded {:?} ({}x{})", path, decoded.width, decoded.height);

    let output_dir = match context.mapper.output_dir(&path, true) {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("Skipping {:?}: {e}", path);
            stats.failed.fetch_add(1, Ordering::Relaxed);
            return;
        }
    };

    // Render and encode are CPU-bound; run them off the async threads.
    let renderer = context.renderer.clone();
    let stats_task = stats.clone();
    let image = decoded.image;
    let input_path = path.clone();
    let write_result = tokio::task::spawn_blocking(move || {
        let variants = renderer.render(&image);
        for (variant, rendered) in &variants {
            let file_name = OutputMapper::variant_file_name(&input_path, variant);
            let target = output_dir.join(file_name);
            rendered
                .save_with_format(&target, ImageFormat::Png)
                .map_err(|e| PipelineError::Encode {
                    path: target.clone(),
                    message: e.to_string(),
                })?;
            tracing::trace!("Saved {:?}", target);
            stats_task.variants_written.fetch_add(1, Ordering::Relaxed);
        }
        Ok::<(), PipelineError>(())
    })
    .await;

    match write_result {
        Ok(Ok(())) => {
            stats.processed.fetch_add(1, Ordering::Relaxed);
        }
        Ok(Err(e)) => {
            tracing::error!("{e}");
            stats.failed.fetch_add(1, Ordering::Relaxed);
        }
        Err(e) => {
            tracing::error!("Render task failed for {:?}: {e}", path);
            stats.failed.fetch_add(1, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThumbnailConfig;
    use crate::pipeline::channel::pending_queue;
    use crate::pipeline::transform::ThumbnailRenderer;
    use crate::types::Anchor;
    use std::path::Path;

    fn write_png(path: &Path, width: u32, height: u32, tint: u8) {
        let mut buf = image::RgbImage::new(width, height);
        for pixel in buf.pixels_mut() {
            *pixel = image::Rgb([tint, tint / 2, 255 - tint]);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        buf.save_with_format(path, image::ImageFormat::Png).unwrap();
    }

    fn test_pool(
        input_root: &Path,
        output_root: &Path,
        gate: Option<Arc<ChecksumGate>>,
    ) -> (WorkerPool, Arc<RunStats>) {
        let renderer = Arc::new(ThumbnailRenderer::new(ThumbnailConfig {
            width: 16,
            height: 16,
            anchors: vec![Anchor::Center],
            flip_vertical: false,
        }));
        let stats = Arc::new(RunStats::default());
        let pool = WorkerPool::new(
            2,
            gate,
            renderer,
            OutputMapper::new(input_root, output_root),
            stats.clone(),
        );
        (pool, stats)
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn pool_processes_and_writes_variants() {
        let tmp = tempfile::tempdir().unwrap();
        let input_root = tmp.path().join("in");
        let output_root = tmp.path().join("out");
        write_png(&input_root.join("a/one.png"), 64, 48, 10);
        write_png(&input_root.join("b/two.png"), 48, 64, 200);

        let (pool, stats) = test_pool(&input_root, &output_root, None);
        let (tx, rx) = pending_queue(4);
        tx.send(input_root.join("a/one.png")).await.unwrap();
        tx.send(input_root.join("b/two.png")).await.unwrap();
        drop(tx);

        pool.run(rx).await.unwrap();

        assert_eq!(stats.processed.load(Ordering::Relaxed), 2);
        assert_eq!(stats.variants_written.load(Ordering::Relaxed), 2);
        assert!(output_root.join("a/one_center.png").is_file());
        assert!(output_root.join("b/two_center.png").is_file());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn duplicate_content_is_skipped_without_output() {
        let tmp = tempfile::tempdir().unwrap();
        let input_root = tmp.path().join("in");
        let output_root = tmp.path().join("out");
        write_png(&input_root.join("a/one.png"), 64, 48, 10);
        std::fs::copy(
            input_root.join("a/one.png"),
            input_root.join("a/copy.png"),
        )
        .unwrap();

        let gate = Arc::new(ChecksumGate::new());
        let (pool, stats) = test_pool(&input_root, &output_root, Some(gate));
        let (tx, rx) = pending_queue(4);
        tx.send(input_root.join("a/one.png")).await.unwrap();
        tx.send(input_root.join("a/copy.png")).await.unwrap();
        drop(tx);

        pool.run(rx).await.unwrap();

        assert_eq!(stats.processed.load(Ordering::Relaxed), 1);
        assert_eq!(stats.duplicates.load(Ordering::Relaxed), 1);
        // Exactly one of the two inputs produced output.
        let outputs = walkdir::WalkDir::new(&output_root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .count();
        assert_eq!(outputs, 1);
    }

    #[tokio::test]
    async fn dedup_completes_on_a_single_runtime_thread() {
        // Hash, decode, and render all hop to the blocking pool, so even a
        // single-threaded runtime must drain the queue without stalling.
        let tmp = tempfile::tempdir().unwrap();
        let input_root = tmp.path().join("in");
        let output_root = tmp.path().join("out");
        write_png(&input_root.join("one.png"), 64, 48, 10);
        std::fs::copy(input_root.join("one.png"), input_root.join("two.png")).unwrap();

        let gate = Arc::new(ChecksumGate::new());
        let (pool, stats) = test_pool(&input_root, &output_root, Some(gate));
        let (tx, rx) = pending_queue(4);
        tx.send(input_root.join("one.png")).await.unwrap();
        tx.send(input_root.join("two.png")).await.unwrap();
        drop(tx);

        pool.run(rx).await.unwrap();

        assert_eq!(stats.processed.load(Ordering::Relaxed), 1);
        assert_eq!(stats.duplicates.load(Ordering::Relaxed), 1);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn bad_input_does_not_stop_the_pool() {
        let tmp = tempfile::tempdir().unwrap();
        let input_root = tmp.path().join("in");
        let output_root = tmp.path().join("out");
        std::fs::create_dir_all(&input_root).unwrap();
        std::fs::write(input_root.join("garbage.png"), b"not an image at all").unwrap();
        write_png(&input_root.join("good.png"), 32, 32, 90);

        let (pool, stats) = test_pool(&input_root, &output_root, None);
        let (tx, rx) = pending_queue(4);
        tx.send(input_root.join("garbage.png")).await.unwrap();
        tx.send(input_root.join("good.png")).await.unwrap();
        drop(tx);

        pool.run(rx).await.unwrap();

        assert_eq!(stats.failed.load(Ordering::Relaxed), 1);
        assert_eq!(stats.processed.load(Ordering::Relaxed), 1);
        assert!(output_root.join("good_center.png").is_file());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn path_outside_input_root_is_counted_failed() {
        let tmp = tempfile::tempdir().unwrap();
        let input_root = tmp.path().join("in");
        let output_root = tmp.path().join("out");
        std::fs::create_dir_all(&input_root).unwrap();
        let stray = tmp.path().join("stray.png");
        write_png(&stray, 32, 32, 50);

        let (pool, stats) = test_pool(&input_root, &output_root, None);
        let (tx, rx) = pending_queue(4);
        tx.send(stray).await.unwrap();
        drop(tx);

        pool.run(rx).await.unwrap();

        assert_eq!(stats.failed.load(Ordering::Relaxed), 1);
        assert_eq!(stats.processed.load(Ordering::Relaxed), 0);
    }
}
