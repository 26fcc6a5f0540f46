//! Prism CLI - concurrent batch thumbnail generator.
//!
//! Prism walks an input image tree, optionally shuffles and deduplicates it,
//! and writes fixed-size crop variants under a mirrored output tree.
//!
//! # Usage
//!
//! ```bash
//! # Thumbnail a tree with the defaults (dedup + shuffle on)
//! prism -i ./image_packs -o ./image_thumbs
//!
//! # Deterministic order, single anchor, no flipped variants
//! prism -i ./packs -o ./thumbs --seed 42 --anchors center --no-flip
//! ```

use clap::Parser;
use std::path::PathBuf;

use prism_core::{Anchor, Config, Processor, RunSummary};

mod logging;

/// Prism - concurrent batch thumbnail generator with content-hash dedup.
#[derive(Parser, Debug)]
#[command(name = "prism")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input directory tree
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output directory root
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Disable content-checksum deduplication
    #[arg(long)]
    no_dedup: bool,

    /// Emit paths in walk order instead of a random permutation
    #[arg(long)]
    no_shuffle: bool,

    /// Fixed RNG seed for the shuffled order (implies shuffle)
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the vertically flipped variant per anchor
    #[arg(long)]
    no_flip: bool,

    /// Crop anchors (left, center, right)
    #[arg(long, value_delimiter = ',')]
    anchors: Vec<Anchor>,

    /// Target thumbnail width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Target thumbnail height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Worker count (default: 2x available parallelism)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Config file path (default: platform config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json_logs: bool,
}

impl Cli {
    /// Overlay CLI flags onto the loaded configuration.
    fn apply_to(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.paths.input_root = input.clone();
        }
        if let Some(output) = &self.output {
            config.paths.output_root = output.clone();
        }
        if self.no_dedup {
            config.processing.dedup = false;
        }
        if self.no_shuffle {
            config.processing.shuffle = false;
        }
        if let Some(seed) = self.seed {
            config.processing.seed = Some(seed);
            config.processing.shuffle = true;
        }
        if self.no_flip {
            config.thumbnail.flip_vertical = false;
        }
        if !self.anchors.is_empty() {
            let mut anchors = self.anchors.clone();
            anchors.sort();
            anchors.dedup();
            config.thumbnail.anchors = anchors;
        }
        if let Some(width) = self.width {
            config.thumbnail.width = width;
        }
        if let Some(height) = self.height {
            config.thumbnail.height = height;
        }
        if let Some(workers) = self.workers {
            config.processing.workers = workers;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => match Config::load() {
            Ok(config) => config,
            Err(e) => {
                eprintln!(
                    "Warning: Failed to load config: {e}\n  \
                     Using default configuration."
                );
                Config::default()
            }
        },
    };
    cli.apply_to(&mut config);
    // Flags can push a loaded config out of range, so validate the overlay.
    config.validate()?;
    logging::init(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Prism v{}", prism_core::VERSION);

    let summary = Processor::new(config).run().await?;
    print_summary(&summary);
    Ok(())
}

/// Print a formatted summary table after the run.
fn print_summary(summary: &RunSummary) {
    let rate = if summary.elapsed.as_secs_f64() > 0.0 {
        summary.processed as f64 / summary.elapsed.as_secs_f64()
    } else {
        0.0
    };

    eprintln!();
    eprintln!("  ====================================");
    eprintln!("               Summary");
    eprintln!("  ====================================");
    eprintln!("    Processed:    {:>8}", summary.processed);
    if summary.duplicates > 0 {
        eprintln!("    Duplicates:   {:>8}", summary.duplicates);
    }
    if summary.failed > 0 {
        eprintln!("    Failed:       {:>8}", summary.failed);
    }
    eprintln!("    Variants:     {:>8}", summary.variants_written);
    eprintln!("  ------------------------------------");
    eprintln!("    Discovered:   {:>8}", summary.discovered);
    eprintln!("    Duration:     {:>7.1}s", summary.elapsed.as_secs_f64());
    eprintln!("    Rate:         {:>7.1} img/sec", rate);
    eprintln!("  ====================================");
}
