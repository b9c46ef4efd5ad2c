//! Embedded bitmap strikes (sbix, CBDT/CBLC, EBDT/EBLC)
//!
//! Strikes are used at their native size: the strike closest to the face's
//! ppem is picked and its bitmap is handed over unscaled. Color data ends up
//! as premultiplied BGRA, masks as 1-bit or 8-bit gray.

use fontpix_core::{error::ErrorCode, types::PixelMode};
use skrifa::bitmap::{BitmapData, BitmapStrikes, Origin};
use skrifa::instance::{LocationRef, Size};
use skrifa::{FontRef, GlyphId, MetadataProvider};

use crate::{codes, outline, Rendered, MAX_DIMENSION};

/// Render `gid` from the best strike for `ppem`, if the font has one
pub(crate) fn render(
    font: &FontRef<'_>,
    gid: GlyphId,
    ppem: f32,
) -> Result<Option<Rendered>, ErrorCode> {
    let strikes = BitmapStrikes::new(font);
    if strikes.is_empty() {
        return Ok(None);
    }

    let Some(glyph) = strikes.glyph_for_size(Size::new(ppem), gid) else {
        return Ok(None);
    };

    let (width, rows, pitch, mode, buffer) = match &glyph.data {
        BitmapData::Bgra(data) => {
            let (width, rows) = (glyph.width, glyph.height);
            let len = width as usize * rows as usize * 4;
            let data = data.get(..len).ok_or(codes::INVALID_TABLE)?;
            (width, rows, width as i32 * 4, PixelMode::Bgra, data.to_vec())
        },
        BitmapData::Png(data) => {
            let (width, rows, bgra) = decode_png(data)?;
            (width, rows, width as i32 * 4, PixelMode::Bgra, bgra)
        },
        BitmapData::Mask(mask) => {
            let (width, rows) = (glyph.width, glyph.height);
            let (pitch, mode, buffer) =
                unpack_mask(mask.bpp, mask.is_packed, mask.data, width, rows)?;
            (width, rows, pitch as i32, mode, buffer)
        },
    };

    if width > MAX_DIMENSION || rows > MAX_DIMENSION {
        return Err(codes::OUT_OF_MEMORY);
    }

    let (bearing_x, bearing_y) = match glyph.placement_origin {
        Origin::TopLeft => (
            glyph.bearing_x - glyph.inner_bearing_x,
            glyph.bearing_y - glyph.inner_bearing_y,
        ),
        Origin::BottomLeft => (
            glyph.bearing_x - glyph.inner_bearing_x,
            glyph.bearing_y - glyph.inner_bearing_y + rows as f32,
        ),
    };

    // Metrics at the strike's own size, matching the unscaled bitmap
    let strike_size = Size::new(glyph.ppem_x);
    let location = LocationRef::default();
    let advance = font
        .glyph_metrics(strike_size, location)
        .advance_width(gid)
        .unwrap_or(width as f32);
    let line = font.metrics(strike_size, location);

    log::trace!(
        "skrifa: strike gid={} ppem={} -> {:?} {}x{}",
        gid.to_u32(),
        glyph.ppem_x,
        mode,
        width,
        rows
    );

    Ok(Some(Rendered {
        width,
        rows,
        pitch,
        mode,
        buffer,
        metrics: crate::layout_metrics(
            bearing_x,
            bearing_y,
            width as f32,
            rows as f32,
            advance,
            line.ascent - line.descent,
        ),
    }))
}

/// Decode a PNG strike into premultiplied BGRA
fn decode_png(data: &[u8]) -> Result<(u32, u32, Vec<u8>), ErrorCode> {
    let mut decoder = png::Decoder::new(data);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder.read_info().map_err(|_| codes::INVALID_TABLE)?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|_| codes::INVALID_TABLE)?;
    let pixels = &buf[..info.buffer_size()];

    let mut bgra = Vec::with_capacity(info.width as usize * info.height as usize * 4);
    match info.color_type {
        png::ColorType::Rgba => {
            for px in pixels.chunks_exact(4) {
                push_premultiplied(&mut bgra, px[0], px[1], px[2], px[3]);
            }
        },
        png::ColorType::Rgb => {
            for px in pixels.chunks_exact(3) {
                bgra.extend_from_slice(&[px[2], px[1], px[0], 255]);
            }
        },
        png::ColorType::GrayscaleAlpha => {
            for px in pixels.chunks_exact(2) {
                push_premultiplied(&mut bgra, px[0], px[0], px[0], px[1]);
            }
        },
        png::ColorType::Grayscale => {
            for &g in pixels {
                bgra.extend_from_slice(&[g, g, g, 255]);
            }
        },
        // EXPAND turns palettes into RGB(A)
        png::ColorType::Indexed => return Err(codes::INVALID_TABLE),
    }

    Ok((info.width, info.height, bgra))
}

fn push_premultiplied(out: &mut Vec<u8>, r: u8, g: u8, b: u8, a: u8) {
    let mul = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
    out.extend_from_slice(&[mul(b), mul(g), mul(r), a]);
}

/// Convert a strike mask into 1-bit rows (`bpp == 1`) or 8-bit gray
///
/// Packed masks run their bits on from one row to the next; unpacked masks
/// start every row on a byte boundary.
fn unpack_mask(
    bpp: u8,
    is_packed: bool,
    data: &[u8],
    width: u32,
    rows: u32,
) -> Result<(usize, PixelMode, Vec<u8>), ErrorCode> {
    let bpp = bpp as usize;
    if !matches!(bpp, 1 | 2 | 4 | 8) {
        return Err(codes::INVALID_TABLE);
    }

    let (width, rows) = (width as usize, rows as usize);
    let row_bits = width * bpp;
    let stride_bits = if is_packed {
        row_bits
    } else {
        row_bits.div_ceil(8) * 8
    };
    if data.len() * 8 < stride_bits * rows.saturating_sub(1) + row_bits {
        return Err(codes::INVALID_TABLE);
    }

    let sample = |x: usize, y: usize| -> u8 {
        let bit = y * stride_bits + x * bpp;
        let byte = data[bit / 8];
        let shift = 8 - bpp - bit % 8;
        (byte >> shift) & ((1u16 << bpp) - 1) as u8
    };

    if bpp == 1 {
        let pitch = outline::mono_pitch(width as u32);
        let mut packed = vec![0u8; pitch * rows];
        for y in 0..rows {
            for x in 0..width {
                if sample(x, y) != 0 {
                    packed[y * pitch + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }
        return Ok((pitch, PixelMode::Mono, packed));
    }

    let max = (1u16 << bpp) - 1;
    let mut gray = Vec::with_capacity(width * rows);
    for y in 0..rows {
        for x in 0..width {
            gray.push((sample(x, y) as u16 * 255 / max) as u8);
        }
    }
    Ok((width, PixelMode::Gray, gray))
}
