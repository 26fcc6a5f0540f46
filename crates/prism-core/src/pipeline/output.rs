//! Maps input paths to mirrored output locations.

use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Re-roots input paths under the output root, mirroring the tree structure.
#[derive(Debug, Clone)]
pub struct OutputMapper {
    input_root: PathBuf,
    output_root: PathBuf,
}

impl OutputMapper {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
        }
    }

    /// Compute the output directory for an input file.
    ///
    /// Strips the input root from the path and re-roots the remaining
    /// relative directory under the output root. A path that does not lie
    /// under the input root violates a structural precondition and is an
    /// error, never a silent fallback.
    ///
    /// With `ensure` set, the directory is created if absent. Creation is
    /// idempotent and safe to race: concurrent workers may map into the same
    /// directory, and directory-exists is not an error.
    pub fn output_dir(&self, input_path: &Path, ensure: bool) -> Result<PathBuf, PipelineError> {
        let relative =
            input_path
                .strip_prefix(&self.input_root)
                .map_err(|_| PipelineError::PathMapping {
                    path: input_path.to_path_buf(),
                    input_root: self.input_root.clone(),
                })?;

        let dir = match relative.parent() {
            Some(parent) => self.output_root.join(parent),
            None => self.output_root.clone(),
        };

        if ensure {
            std::fs::create_dir_all(&dir).map_err(|source| PipelineError::OutputDir {
                path: dir.clone(),
                source,
            })?;
        }

        Ok(dir)
    }

    /// Filename for one rendered variant: `<original-stem>_<variant>.png`.
    pub fn variant_file_name(input_path: &Path, variant: &str) -> String {
        let stem = input_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());
        format!("{stem}_{variant}.png")
    }
}
