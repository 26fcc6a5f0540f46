//! Error types for the Prism thumbnail pipeline.
//!
//! The taxonomy mirrors the run's failure policy: configuration and input-root
//! errors are fatal and abort before any worker starts; per-file errors carry
//! the offending path, are logged by the worker, and never stop the batch.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Prism operations.
#[derive(Error, Debug)]
pub enum PrismError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Pipeline processing errors
    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Pipeline processing errors, organized by stage.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input root is missing, not a directory, or unreadable (fatal)
    #[error("Cannot read input root {path}: {message}")]
    InputRoot { path: PathBuf, message: String },

    /// Reading a file's bytes failed
    #[error("Read error for {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Image decoding failed
    #[error("Decode error for {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// Writing a rendered variant failed
    #[error("Encode error for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// An input path could not be re-rooted under the output root.
    /// Structural precondition: every queued path lies under the input root.
    #[error("Path {path} is not under input root {input_root}")]
    PathMapping { path: PathBuf, input_root: PathBuf },

    /// Creating an output directory failed
    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A producer or worker task failed to join
    #[error("Task join error: {message}")]
    Join { message: String },
}

/// Convenience type alias for Prism results.
pub type Result<T> = std::result::Result<T, PrismError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
