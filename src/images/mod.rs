use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResizeError {
    #[error("Image could not be processed: failed to load source: {0}")]
    Load(String),

    #[error("Image could not be processed: encoding failed: {0}")]
    Encode(String),
}

/// The resize primitive the resolver talks to. Takes a source image, produces
/// a re-encoded raster at exactly `width x height` pixels at the target path
/// (aspect ratio is not preserved), or fails as a whole. The trait seam is
/// what lets tests observe generation without touching real image data.
pub trait Resizer: Send + Sync {
    fn resize(
        &self,
        source: &Path,
        target: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ResizeError>;
}

/// Default resizer: decodes the source, stretches it to the exact target
/// dimensions and writes a JPEG.
pub struct JpegResizer {
    quality: u8,
}

impl JpegResizer {
    pub fn new() -> Self {
        Self { quality: 85 }
    }
}

impl Default for JpegResizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Resizer for JpegResizer {
    fn resize(
        &self,
        source: &Path,
        target: &Path,
        width: u32,
        height: u32,
    ) -> Result<(), ResizeError> {
        let img = image::open(source).map_err(|e| ResizeError::Load(e.to_string()))?;

        // Exact dimensions; stretch rather than fit.
        let resized = img.resize_exact(width, height, FilterType::Lanczos3);

        let file = File::create(target).map_err(|e| ResizeError::Encode(e.to_string()))?;
        let mut encoder = JpegEncoder::new_with_quality(BufWriter::new(file), self.quality);
        encoder
            .encode_image(&resized.to_rgb8())
            .map_err(|e| ResizeError::Encode(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};
    use tempfile::TempDir;

    #[test]
    fn resize_produces_exact_target_dimensions() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.jpg");
        let target = dir.path().join("resized.jpg");
        RgbImage::from_pixel(300, 200, Rgb([120, 140, 160]))
            .save(&source)
            .unwrap();

        JpegResizer::new().resize(&source, &target, 99, 47).unwrap();

        let thumb = image::open(&target).unwrap();
        assert_eq!(thumb.dimensions(), (99, 47));
    }

    #[test]
    fn resize_fails_for_missing_source() {
        let dir = TempDir::new().unwrap();
        let result = JpegResizer::new().resize(
            &dir.path().join("missing.jpg"),
            &dir.path().join("out.jpg"),
            10,
            10,
        );
        assert!(matches!(result, Err(ResizeError::Load(_))));
    }
}
