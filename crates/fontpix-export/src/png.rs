//! PNG export format
//!
//! Glyph images are already RGBA, so they go to the encoder unchanged.

use fontpix_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::RgbaImage,
};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};

/// Encode an RGBA glyph image as PNG
///
/// Empty images (whitespace glyphs) have no PNG representation and are
/// rejected, as are pixel buffers that do not match the dimensions.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    if image.is_empty() {
        return Err(ExportError::InvalidImage(format!(
            "cannot encode a {}x{} image",
            image.width, image.height
        ))
        .into());
    }

    let expected = image.stride * image.height as usize;
    if image.stride != image.width as usize * 4 || image.pixels.len() != expected {
        return Err(ExportError::InvalidImage(format!(
            "expected {} bytes for {}x{} RGBA, got {}",
            image.width as usize * 4 * image.height as usize,
            image.width,
            image.height,
            image.pixels.len()
        ))
        .into());
    }

    let mut png_data = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut png_data, CompressionType::Default, FilterType::Sub);
    encoder
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgba8)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    log::debug!(
        "png: encoded {}x{} glyph into {} bytes",
        image.width,
        image.height,
        png_data.len()
    );
    Ok(png_data)
}

/// PNG exporter for glyph images
///
/// ```
/// use fontpix_core::Exporter;
/// use fontpix_core::types::RgbaImage;
/// use fontpix_export::PngExporter;
///
/// let image = RgbaImage::new(1, 1, vec![255, 255, 255, 255]);
/// let png = PngExporter::new().export(&image).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct PngExporter;

impl PngExporter {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, image: &RgbaImage) -> Result<Vec<u8>> {
        encode_png(image)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}
