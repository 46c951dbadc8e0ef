use std::io::Cursor;

use image::{ImageReader, codecs::jpeg::JpegEncoder, imageops::FilterType};
use tracing::warn;

use crate::domain::recipe_extraction::{
    entities::{ImageOptions, OptimizedImage},
    ports::ImageOptimizer,
    value_objects::is_passthrough_mime_type,
};

const OUTPUT_MIME_TYPE: &str = "image/jpeg";

/// Downscales to the configured width and re-encodes as JPEG.
#[derive(Debug, Clone, Default)]
pub struct JpegImageOptimizer;

impl JpegImageOptimizer {
    pub fn new() -> Self {
        Self
    }

    fn reencode(bytes: &[u8], options: ImageOptions) -> Result<Vec<u8>, String> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| format!("Failed to read image: {}", e))?;

        let img = reader
            .decode()
            .map_err(|e| format!("Failed to decode image: {}", e))?;

        // resize() keeps the aspect ratio within the bounds; never enlarge.
        let img = if img.width() > options.max_width {
            img.resize(options.max_width, u32::MAX, FilterType::Lanczos3)
        } else {
            img
        };

        let mut buf = Cursor::new(Vec::new());
        let encoder = JpegEncoder::new_with_quality(&mut buf, options.quality.clamp(1, 100));
        img.to_rgb8()
            .write_with_encoder(encoder)
            .map_err(|e| format!("Failed to encode image: {}", e))?;

        Ok(buf.into_inner())
    }
}

impl ImageOptimizer for JpegImageOptimizer {
    fn optimize(&self, bytes: Vec<u8>, mime_type: String, options: ImageOptions) -> OptimizedImage {
        if is_passthrough_mime_type(&mime_type) {
            return OptimizedImage::PassThrough { bytes, mime_type };
        }

        match Self::reencode(&bytes, options) {
            Ok(optimized) => OptimizedImage::Optimized {
                bytes: optimized,
                mime_type: OUTPUT_MIME_TYPE.to_string(),
            },
            Err(e) => {
                warn!("skipping image optimization: {}", e);
                OptimizedImage::PassThrough { bytes, mime_type }
            }
        }
    }
}
