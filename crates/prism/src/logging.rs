//! Logging initialization.
//!
//! Structured logging via the `tracing` ecosystem; output goes to stderr.

use prism_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the logging subsystem from config, with CLI overrides.
///
/// `verbose` forces DEBUG level; `json_logs` forces JSON output. Either can
/// also come from the `[logging]` config section, and the RUST_LOG
/// environment variable overrides the level entirely.
pub fn init(config: &Config, verbose: bool, json_logs: bool) {
    let debug = verbose || matches!(config.logging.level.as_str(), "debug" | "trace");
    let default_level = if debug {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    if json_logs || config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(true),
            )
            .init();
    }
}
