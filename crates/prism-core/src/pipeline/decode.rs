//! Image decoding from in-memory bytes.

use image::{DynamicImage, GenericImageView};
use std::path::Path;

use crate::error::PipelineError;

/// Decodes raw file bytes into images, detecting the format from content.
pub struct ImageDecoder;

/// Result of decoding an image.
pub struct DecodedImage {
    /// The decoded pixel data
    pub image: DynamicImage,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageDecoder {
    /// Decode an image from bytes already read for checksumming.
    ///
    /// Decoding is CPU-bound, so it runs under `spawn_blocking` to keep the
    /// worker's runtime thread free.
    pub async fn decode_from_bytes(
        bytes: Vec<u8>,
        path: &Path,
    ) -> Result<DecodedImage, PipelineError> {
        let path_owned = path.to_path_buf();
        match tokio::task::spawn_blocking(move || Self::decode_bytes_sync(bytes, &path_owned)).await
        {
            Ok(result) => result,
            Err(e) => Err(PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Task join error: {e}"),
            }),
        }
    }

    /// Synchronous decode from bytes (runs in spawn_blocking).
    fn decode_bytes_sync(bytes: Vec<u8>, path: &Path) -> Result<DecodedImage, PipelineError> {
        use std::io::Cursor;

        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| PipelineError::Decode {
                path: path.to_path_buf(),
                message: format!("Cannot detect image format: {e}"),
            })?;
        let image = reader.decode().map_err(|e| PipelineError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let (width, height) = image.dimensions();
        Ok(DecodedImage {
            image,
            width,
            height,
        })
    }
}
