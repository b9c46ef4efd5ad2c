pub mod info;
pub mod render;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use fontpix::{Face, FaceConfig, Library, SkrifaEngine};

/// Read a font file and open one of its faces
pub fn open_face(
    path: &Path,
    face_index: u32,
    config: &FaceConfig,
) -> Result<(Arc<Library<SkrifaEngine>>, Face<SkrifaEngine>)> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let library = Arc::new(Library::new(SkrifaEngine::new())?);
    let face = Face::with_config(&library, &data, face_index, config)
        .with_context(|| format!("loading face {} of {}", face_index, path.display()))?;
    Ok((library, face))
}
