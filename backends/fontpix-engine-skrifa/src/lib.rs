//! Pure-Rust rendering engine for fontpix
//!
//! Fonts are parsed with skrifa, outlines are filled with tiny-skia, and
//! embedded bitmap strikes are decoded straight from the font's tables. The
//! engine hands its results over in the same shape a FreeType slot would:
//! a bitmap tagged with its pixel mode, plus 26.6 metrics.
//!
//! ```no_run
//! use fontpix_core::{transcode, Engine};
//! use fontpix_core::fixed::F26Dot6;
//! use fontpix_core::types::LoadFlags;
//! use fontpix_engine_skrifa::SkrifaEngine;
//!
//! let engine = SkrifaEngine::new();
//! let mut library = engine.initialize().unwrap();
//! let data = std::fs::read("DejaVuSans.ttf").unwrap();
//! let mut face = engine.load_face(&mut library, &data, 0).unwrap();
//! engine.set_char_size(&mut face, F26Dot6::from_int(16), 72).unwrap();
//!
//! let slot = engine.load_glyph(&mut face, 'g' as u32, LoadFlags::RENDER).unwrap();
//! let rgba = transcode(&slot.bitmap).unwrap();
//! assert_eq!(rgba.len(), (slot.bitmap.width * slot.bitmap.rows * 4) as usize);
//! ```

pub mod codes;
mod outline;
mod strike;

use fontpix_core::error::ErrorCode;
use fontpix_core::fixed::{F26Dot6, RawGlyphMetrics};
use fontpix_core::traits::{Engine, EngineResult};
use fontpix_core::types::{BitmapDescriptor, GlyphSlot, LoadFlags, PixelMode};
use skrifa::raw::types::Tag;
use skrifa::raw::{FileRef, TableProvider};
use skrifa::{FontRef, GlyphId, MetadataProvider};

/// Largest bitmap edge the engine will produce, in pixels
pub const MAX_DIMENSION: u32 = 16384;

/// Tables that carry color glyphs
const COLOR_TABLES: [Tag; 3] = [
    Tag::new(b"COLR"),
    Tag::new(b"CBDT"),
    Tag::new(b"sbix"),
];

/// A rendered glyph as the engine keeps it in the face's slot
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Rendered {
    pub width: u32,
    pub rows: u32,
    pub pitch: i32,
    pub mode: PixelMode,
    pub buffer: Vec<u8>,
    pub metrics: RawGlyphMetrics,
}

impl Rendered {
    fn empty() -> Self {
        Self {
            width: 0,
            rows: 0,
            pitch: 0,
            mode: PixelMode::Gray,
            buffer: Vec::new(),
            metrics: RawGlyphMetrics::default(),
        }
    }
}

/// Build slot metrics from a glyph box in pixels
///
/// `bearing_y` is the distance from the baseline up to the top row. Vertical
/// metrics are synthesized: the box is centered on the pen position
/// horizontally and inside the line's vertical advance.
pub(crate) fn layout_metrics(
    bearing_x: f32,
    bearing_y: f32,
    width: f32,
    height: f32,
    advance: f32,
    vert_advance: f32,
) -> RawGlyphMetrics {
    RawGlyphMetrics {
        width: F26Dot6::from_float(width),
        height: F26Dot6::from_float(height),
        hori_bearing_x: F26Dot6::from_float(bearing_x),
        hori_bearing_y: F26Dot6::from_float(bearing_y),
        hori_advance: F26Dot6::from_float(advance),
        vert_bearing_x: F26Dot6::from_float(bearing_x - advance / 2.0),
        vert_bearing_y: F26Dot6::from_float((vert_advance - height) / 2.0),
        vert_advance: F26Dot6::from_float(vert_advance),
    }
}

/// Engine instance state
#[derive(Debug, Default)]
pub struct SkrifaLibrary {
    faces_loaded: u64,
}

/// A loaded face: the font bytes, the current size and the glyph slot
pub struct SkrifaFace {
    data: Vec<u8>,
    index: u32,
    ppem: Option<f32>,
    color: bool,
    slot: Rendered,
}

impl SkrifaFace {
    fn font(&self) -> EngineResult<FontRef<'_>> {
        FontRef::from_index(&self.data, self.index).map_err(|_| codes::INVALID_FILE_FORMAT)
    }
}

/// The skrifa + tiny-skia engine
#[derive(Debug, Default, Clone, Copy)]
pub struct SkrifaEngine;

impl SkrifaEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for SkrifaEngine {
    type Library = SkrifaLibrary;
    type Face = SkrifaFace;

    fn name(&self) -> &'static str {
        "skrifa"
    }

    fn initialize(&self) -> EngineResult<SkrifaLibrary> {
        Ok(SkrifaLibrary::default())
    }

    fn finalize(&self, library: SkrifaLibrary) -> EngineResult<()> {
        log::debug!("skrifa: finalize after {} faces", library.faces_loaded);
        Ok(())
    }

    fn load_face(
        &self,
        library: &mut SkrifaLibrary,
        data: &[u8],
        index: u32,
    ) -> EngineResult<SkrifaFace> {
        match FileRef::new(data) {
            Ok(FileRef::Font(_)) if index != 0 => return Err(codes::INVALID_ARGUMENT),
            Ok(_) => {},
            Err(_) => return Err(codes::UNKNOWN_FILE_FORMAT),
        }

        let font = FontRef::from_index(data, index).map_err(|_| codes::INVALID_ARGUMENT)?;
        let color = COLOR_TABLES
            .iter()
            .any(|tag| font.table_data(*tag).is_some());

        library.faces_loaded += 1;
        log::debug!(
            "skrifa: loaded face {} ({} bytes, {} glyphs, color: {})",
            index,
            data.len(),
            font.maxp().map(|m| m.num_glyphs()).unwrap_or(0),
            color
        );

        Ok(SkrifaFace {
            data: data.to_vec(),
            index,
            ppem: None,
            color,
            slot: Rendered::empty(),
        })
    }

    fn set_char_size(&self, face: &mut SkrifaFace, height: F26Dot6, dpi: u32) -> EngineResult<()> {
        if height <= F26Dot6::ZERO {
            return Err(codes::INVALID_PIXEL_SIZE);
        }
        let dpi = if dpi == 0 { 72 } else { dpi };
        face.ppem = Some(height.to_float() * dpi as f32 / 72.0);
        Ok(())
    }

    fn has_color(&self, face: &SkrifaFace) -> bool {
        face.color
    }

    fn load_glyph<'f>(
        &self,
        face: &'f mut SkrifaFace,
        code: u32,
        flags: LoadFlags,
    ) -> EngineResult<GlyphSlot<'f>> {
        let ppem = face.ppem.ok_or(codes::INVALID_SIZE_HANDLE)?;
        let monochrome = flags.contains(LoadFlags::MONOCHROME);

        let rendered = {
            let font = face.font()?;
            // Unmapped characters render the .notdef glyph
            let gid = char::from_u32(code)
                .and_then(|ch| font.charmap().map(ch))
                .unwrap_or(GlyphId::NOTDEF);

            let strike_first = flags.contains(LoadFlags::COLOR) && face.color;
            if strike_first {
                match strike::render(&font, gid, ppem)? {
                    Some(rendered) => rendered,
                    None => outline::render(&font, gid, ppem, monochrome)?,
                }
            } else {
                match outline::render(&font, gid, ppem, monochrome) {
                    Ok(rendered) => rendered,
                    // Bitmap-only fonts have no outline to draw
                    Err(code) if code == codes::INVALID_GLYPH_INDEX => {
                        strike::render(&font, gid, ppem)?.ok_or(code)?
                    },
                    Err(code) => return Err(code),
                }
            }
        };

        face.slot = rendered;
        let slot = &face.slot;
        Ok(GlyphSlot {
            bitmap: BitmapDescriptor {
                width: slot.width,
                rows: slot.rows,
                pitch: slot.pitch,
                pixel_mode: slot.mode,
                buffer: &slot.buffer,
            },
            metrics: slot.metrics,
        })
    }

    fn release_slot(&self, face: &mut SkrifaFace) {
        face.slot.buffer.clear();
    }

    fn finalize_face(&self, face: SkrifaFace) -> EngineResult<()> {
        log::debug!("skrifa: finalize face {}", face.index);
        Ok(())
    }

    fn error_string(&self, code: ErrorCode) -> Option<&'static str> {
        codes::message(code)
    }
}
