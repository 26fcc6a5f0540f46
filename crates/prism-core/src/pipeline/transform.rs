//! The per-image transform: cover-resize, anchored crops, optional flips.

use std::collections::BTreeMap;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::config::ThumbnailConfig;
use crate::types::Anchor;

/// The transform capability the worker pool depends on.
///
/// Implementations map one decoded image to named rendered variants; the pool
/// writes exactly one output file per entry in the returned map.
pub trait TransformPipeline: Send + Sync {
    fn render(&self, image: &DynamicImage) -> BTreeMap<String, DynamicImage>;
}

/// Renders fixed-size thumbnails: one variant per configured anchor, plus a
/// `_flipped` variant per anchor when vertical flip is enabled.
pub struct ThumbnailRenderer {
    config: ThumbnailConfig,
}

impl ThumbnailRenderer {
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Resize so both dimensions cover the target, preserving aspect ratio.
    ///
    /// The scale is computed in floating point and rounded up, so the result
    /// is never smaller than the target in either dimension.
    fn cover_resize(&self, image: &DynamicImage) -> DynamicImage {
        let (width, height) = (image.width(), image.height());
        let scale = f64::max(
            self.config.width as f64 / width as f64,
            self.config.height as f64 / height as f64,
        );
        let resized_width = ((width as f64 * scale).ceil() as u32).max(self.config.width);
        let resized_height = ((height as f64 * scale).ceil() as u32).max(self.config.height);
        image.resize_exact(resized_width, resized_height, FilterType::Lanczos3)
    }

    /// Crop the cover-resized image to the target size at the given anchor.
    /// Horizontal position follows the anchor; vertical is centered.
    fn crop_at(&self, resized: &DynamicImage, anchor: Anchor) -> DynamicImage {
        let (tw, th) = (self.config.width, self.config.height);
        let x = match anchor {
            Anchor::Left => 0,
            Anchor::Center => (resized.width() - tw) / 2,
            Anchor::Right => resized.width() - tw,
        };
        let y = (resized.height() - th) / 2;
        resized.crop_imm(x, y, tw, th)
    }
}

impl TransformPipeline for ThumbnailRenderer {
    fn render(&self, image: &DynamicImage) -> BTreeMap<String, DynamicImage> {
        let mut variants = BTreeMap::new();

        // Resize once; every variant crops from the same intermediate.
        let resized = self.cover_resize(image);

        for &anchor in &self.config.anchors {
            let cropped = self.crop_at(&resized, anchor);
            if self.config.flip_vertical {
                variants.insert(format!("{}_flipped", anchor.name()), cropped.flipv());
            }
            variants.insert(anchor.name().to_string(), cropped);
        }

        variants
    }
}
