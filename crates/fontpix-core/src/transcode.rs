//! Engine bitmaps to canonical RGBA
//!
//! Three source layouts are understood:
//!
//! - [`PixelMode::Mono`]: packed bits, MSB first. Set bits become opaque
//!   white, clear bits opaque black.
//! - [`PixelMode::Gray`]: one coverage byte per pixel, replicated into R, G
//!   and B with an opaque alpha.
//! - [`PixelMode::Bgra`]: four premultiplied bytes per pixel, reordered to
//!   R, G, B, A. Alpha is carried through, not synthesized.
//!
//! Rows in the source are `|pitch|` bytes apart and may carry padding past
//! the pixel data. A negative pitch stores the bottom row first; output is
//! always written top row first, left to right, with no padding.
//!
//! The whole source is validated before any output is produced, so a failure
//! never yields a partial buffer.

use crate::error::{FontpixError, Result};
use crate::types::{BitmapDescriptor, PixelMode};

/// Convert `bitmap` into `rows * width * 4` bytes of RGBA
pub fn transcode(bitmap: &BitmapDescriptor<'_>) -> Result<Vec<u8>> {
    let width = bitmap.width as usize;
    let row_bytes = match bitmap.pixel_mode {
        PixelMode::Mono => width.div_ceil(8),
        PixelMode::Gray => width,
        PixelMode::Bgra => width * 4,
        PixelMode::Unsupported(tag) => return Err(FontpixError::UnsupportedPixelMode(tag)),
    };

    if bitmap.width == 0 || bitmap.rows == 0 {
        return Ok(Vec::new());
    }

    let layout = RowLayout::new(bitmap, row_bytes)?;
    let mut pix = Vec::with_capacity(width * bitmap.rows as usize * 4);

    log::trace!(
        "transcode: {:?} {}x{} pitch={}",
        bitmap.pixel_mode,
        bitmap.width,
        bitmap.rows,
        bitmap.pitch
    );

    match bitmap.pixel_mode {
        PixelMode::Mono => {
            for y in 0..layout.rows {
                unpack_mono_row(layout.row(bitmap.buffer, y), width, &mut pix);
            }
        },
        PixelMode::Gray => {
            for y in 0..layout.rows {
                for &b in layout.row(bitmap.buffer, y) {
                    pix.extend_from_slice(&[b, b, b, 255]);
                }
            }
        },
        PixelMode::Bgra => {
            for y in 0..layout.rows {
                for px in layout.row(bitmap.buffer, y).chunks_exact(4) {
                    pix.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
                }
            }
        },
        PixelMode::Unsupported(tag) => return Err(FontpixError::UnsupportedPixelMode(tag)),
    }

    debug_assert_eq!(pix.len(), width * layout.rows * 4);
    Ok(pix)
}

/// Emit exactly `width` pixels from a packed row, stopping mid-byte if needed
fn unpack_mono_row(row: &[u8], width: usize, pix: &mut Vec<u8>) {
    let mut remaining = width;
    for &byte in row {
        let bits = remaining.min(8);
        for bit in 0..bits {
            let v = ((byte >> (7 - bit)) & 1) * 255;
            pix.extend_from_slice(&[v, v, v, 255]);
        }
        remaining -= bits;
    }
}

/// Validated row addressing into a source buffer
struct RowLayout {
    rows: usize,
    stride: usize,
    row_bytes: usize,
    bottom_up: bool,
}

impl RowLayout {
    fn new(bitmap: &BitmapDescriptor<'_>, row_bytes: usize) -> Result<Self> {
        let stride = bitmap.pitch.unsigned_abs() as usize;
        if stride < row_bytes {
            return Err(FontpixError::InvalidPitch {
                pitch: bitmap.pitch,
                width: bitmap.width,
            });
        }

        let rows = bitmap.rows as usize;
        let expected = (rows - 1) * stride + row_bytes;
        if bitmap.buffer.len() < expected {
            return Err(FontpixError::TruncatedBitmap {
                expected,
                actual: bitmap.buffer.len(),
            });
        }

        Ok(Self {
            rows,
            stride,
            row_bytes,
            bottom_up: bitmap.pitch < 0,
        })
    }

    /// Pixel bytes of output row `y`, padding excluded
    fn row<'a>(&self, buffer: &'a [u8], y: usize) -> &'a [u8] {
        let memory_row = if self.bottom_up { self.rows - 1 - y } else { y };
        let start = memory_row * self.stride;
        &buffer[start..start + self.row_bytes]
    }
}
