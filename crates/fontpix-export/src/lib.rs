//! Exporters: finished glyph images to file formats
//!
//! Every exporter implements [`fontpix_core::Exporter`], so front-ends can
//! pick one by name and never care about the encoding.

pub mod png;

pub use png::{encode_png, PngExporter};

use std::fs;
use std::path::Path;

use fontpix_core::error::{ExportError, Result};
use fontpix_core::types::RgbaImage;
use fontpix_core::Exporter;

/// Look up an exporter by its file extension
pub fn by_extension(extension: &str) -> Option<Box<dyn Exporter>> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some(Box::new(PngExporter::new())),
        _ => None,
    }
}

/// Encode `image` in the format named by the path's extension and write it
pub fn save(image: &RgbaImage, path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let exporter = by_extension(extension).ok_or_else(|| {
        ExportError::FormatNotSupported(format!("no exporter for {}", path.display()))
    })?;

    let bytes = exporter.export(image)?;
    fs::write(path, &bytes)?;

    log::info!(
        "{}: wrote {} bytes to {}",
        exporter.name(),
        bytes.len(),
        path.display()
    );
    Ok(())
}
