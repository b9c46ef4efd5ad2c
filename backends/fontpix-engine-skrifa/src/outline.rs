//! Outline glyphs rasterized with tiny-skia
//!
//! The outline is drawn unhinted at the face's ppem, its bounds are snapped
//! outward to whole pixels, and the path is filled into a tiny-skia mask.
//! Anti-aliased masks become 8-bit gray bitmaps; aliased ones are packed
//! into 1-bit rows padded to 16 bits.

use fontpix_core::{error::ErrorCode, fixed::RawGlyphMetrics, types::PixelMode};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, GlyphId, MetadataProvider};
use tiny_skia::{FillRule, Mask, PathBuilder, Transform};

use crate::{codes, Rendered, MAX_DIMENSION};

/// An OutlinePen that builds a tiny-skia Path
struct TinySkiaPathPen {
    builder: PathBuilder,
}

impl TinySkiaPathPen {
    fn new() -> Self {
        Self {
            builder: PathBuilder::new(),
        }
    }

    fn finish(self) -> Option<tiny_skia::Path> {
        self.builder.finish()
    }
}

impl OutlinePen for TinySkiaPathPen {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.builder.quad_to(cx0, cy0, x, y);
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.builder.cubic_to(cx0, cy0, cx1, cy1, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Rasterize glyph `gid` at `ppem` pixels per em
pub(crate) fn render(
    font: &FontRef<'_>,
    gid: GlyphId,
    ppem: f32,
    monochrome: bool,
) -> Result<Rendered, ErrorCode> {
    let size = Size::new(ppem);
    let location = LocationRef::default();

    let outlines = font.outline_glyphs();
    let glyph = outlines.get(gid).ok_or(codes::INVALID_GLYPH_INDEX)?;

    let mut pen = TinySkiaPathPen::new();
    glyph
        .draw(DrawSettings::unhinted(size, location), &mut pen)
        .map_err(|_| codes::INVALID_OUTLINE)?;

    let advance = font
        .glyph_metrics(size, location)
        .advance_width(gid)
        .unwrap_or(0.0);
    let line = font.metrics(size, location);
    let vert_advance = line.ascent - line.descent;

    // Whitespace and other inkless glyphs have no path at all
    let Some(path) = pen.finish() else {
        let metrics = crate::layout_metrics(0.0, 0.0, 0.0, 0.0, advance, vert_advance);
        return Ok(inkless(monochrome, metrics));
    };

    let bounds = path.bounds();
    let x0 = bounds.left().floor();
    let x1 = bounds.right().ceil();
    // Font space is y-up: the top of the ink is the largest y
    let y0 = bounds.top().floor();
    let y1 = bounds.bottom().ceil();

    let width = (x1 - x0) as u32;
    let rows = (y1 - y0) as u32;
    if width > MAX_DIMENSION || rows > MAX_DIMENSION {
        return Err(codes::OUT_OF_MEMORY);
    }

    log::trace!(
        "skrifa: outline gid={} ppem={} box=({}, {})..({}, {})",
        gid.to_u32(),
        ppem,
        x0,
        y0,
        x1,
        y1
    );

    let metrics = crate::layout_metrics(x0, y1, x1 - x0, y1 - y0, advance, vert_advance);

    // Zero-area ink, e.g. a hairline flattened onto one row
    let Some(mut mask) = Mask::new(width, rows) else {
        return Ok(inkless(monochrome, metrics));
    };

    // Flip y and move the snapped box to the origin
    let transform = Transform::from_scale(1.0, -1.0).post_translate(-x0, y1);
    mask.fill_path(&path, FillRule::Winding, !monochrome, transform);

    let coverage = mask.data();
    if monochrome {
        let pitch = mono_pitch(width);
        Ok(Rendered {
            width,
            rows,
            pitch: pitch as i32,
            mode: PixelMode::Mono,
            buffer: pack_bits(coverage, width as usize, rows as usize, pitch),
            metrics,
        })
    } else {
        Ok(Rendered {
            width,
            rows,
            pitch: width as i32,
            mode: PixelMode::Gray,
            buffer: coverage.to_vec(),
            metrics,
        })
    }
}

/// An empty bitmap tagged with the requested output mode
fn inkless(monochrome: bool, metrics: RawGlyphMetrics) -> Rendered {
    Rendered {
        width: 0,
        rows: 0,
        pitch: 0,
        mode: if monochrome { PixelMode::Mono } else { PixelMode::Gray },
        buffer: Vec::new(),
        metrics,
    }
}

/// Bytes per 1-bit row, rounded up to a 16-bit boundary
pub(crate) fn mono_pitch(width: u32) -> usize {
    (width as usize).div_ceil(16) * 2
}

/// Pack 8-bit coverage into MSB-first bit rows; half coverage or more is ink
pub(crate) fn pack_bits(coverage: &[u8], width: usize, rows: usize, pitch: usize) -> Vec<u8> {
    let mut packed = vec![0u8; pitch * rows];
    for y in 0..rows {
        for x in 0..width {
            if coverage[y * width + x] >= 0x80 {
                packed[y * pitch + x / 8] |= 0x80 >> (x % 8);
            }
        }
    }
    packed
}
