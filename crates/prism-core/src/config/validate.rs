//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    ///
    /// Runs on load, and again on the effective configuration after CLI
    /// overrides are applied.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.processing.queue_multiplier == 0 {
            return Err(ConfigError::ValidationError(
                "processing.queue_multiplier must be > 0".into(),
            ));
        }
        if self.thumbnail.width == 0 || self.thumbnail.height == 0 {
            return Err(ConfigError::ValidationError(
                "thumbnail.width and thumbnail.height must be > 0".into(),
            ));
        }
        if self.thumbnail.anchors.is_empty() {
            return Err(ConfigError::ValidationError(
                "thumbnail.anchors must name at least one anchor".into(),
            ));
        }
        if self.paths.input_root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "paths.input_root must not be empty".into(),
            ));
        }
        if self.paths.output_root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "paths.output_root must not be empty".into(),
            ));
        }
        Ok(())
    }
}
