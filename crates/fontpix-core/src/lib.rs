//! Fontpix Core: engine bitmaps in, canonical RGBA out
//!
//! A rendering engine hands back glyph bitmaps in whatever layout suits it:
//! packed 1-bit rows, padded 8-bit coverage, premultiplied BGRA. This crate
//! holds the pieces that turn those into one predictable shape.
//!
//! ## The Pieces
//!
//! - [`transcode`] - Bitmap descriptor to tightly packed RGBA rows
//! - [`fixed`] - 26.6 fixed point and the glyph metric converter
//! - [`traits::Engine`] - The seam every rendering engine implements
//! - [`traits::Exporter`] - Where finished images leave the system
//! - [`config`] - Face defaults with environment overrides
//!
//! ## Transcoding a Bitmap
//!
//! ```rust
//! use fontpix_core::types::{BitmapDescriptor, PixelMode};
//! use fontpix_core::transcode::transcode;
//!
//! // Two gray pixels in a row padded to four bytes
//! let buffer = [0x00, 0x80, 0xAA, 0xAA];
//! let bitmap = BitmapDescriptor {
//!     width: 2,
//!     rows: 1,
//!     pitch: 4,
//!     pixel_mode: PixelMode::Gray,
//!     buffer: &buffer,
//! };
//!
//! let pixels = transcode(&bitmap)?;
//! assert_eq!(pixels, vec![0, 0, 0, 255, 0x80, 0x80, 0x80, 255]);
//! # Ok::<(), fontpix_core::FontpixError>(())
//! ```

pub mod config;
pub mod error;
pub mod fixed;
pub mod traits;
pub mod transcode;

#[cfg(test)]
mod proptests;

pub use config::FaceConfig;
pub use error::{EngineError, ErrorCode, FontpixError, HandleKind, Result};
pub use fixed::{convert_metrics, F26Dot6, RawGlyphMetrics};
pub use traits::{Engine, Exporter};
pub use transcode::transcode;

/// The data structures shared by engines, the transcoder and front-ends
pub mod types {
    use crate::fixed::RawGlyphMetrics;

    /// How the engine laid out a bitmap's pixels
    ///
    /// Tags follow the numbering rasterizers conventionally use, so an
    /// unexpected tag can be reported as-is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum PixelMode {
        /// 1 bit per pixel, most significant bit first
        Mono,
        /// 8 bits of coverage per pixel
        Gray,
        /// 4 bytes per pixel, premultiplied, blue first
        Bgra,
        /// Anything else (none, 2/4-bit gray, LCD, ...)
        Unsupported(u8),
    }

    impl PixelMode {
        pub const TAG_MONO: u8 = 1;
        pub const TAG_GRAY: u8 = 2;
        pub const TAG_BGRA: u8 = 7;

        pub const fn from_tag(tag: u8) -> Self {
            match tag {
                Self::TAG_MONO => Self::Mono,
                Self::TAG_GRAY => Self::Gray,
                Self::TAG_BGRA => Self::Bgra,
                other => Self::Unsupported(other),
            }
        }

        pub const fn tag(self) -> u8 {
            match self {
                Self::Mono => Self::TAG_MONO,
                Self::Gray => Self::TAG_GRAY,
                Self::Bgra => Self::TAG_BGRA,
                Self::Unsupported(tag) => tag,
            }
        }
    }

    /// A rendered glyph as the engine stores it
    ///
    /// `buffer` aliases the engine's glyph slot and is only valid until the
    /// next load on the same face. A negative `pitch` means the bottom row
    /// comes first in memory.
    #[derive(Debug, Clone, Copy)]
    pub struct BitmapDescriptor<'a> {
        pub width: u32,
        pub rows: u32,
        pub pitch: i32,
        pub pixel_mode: PixelMode,
        pub buffer: &'a [u8],
    }

    /// Everything a single glyph load produces, borrowed from the face
    #[derive(Debug, Clone, Copy)]
    pub struct GlyphSlot<'a> {
        pub bitmap: BitmapDescriptor<'a>,
        pub metrics: RawGlyphMetrics,
    }

    bitflags::bitflags! {
        /// What a glyph load should produce
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct LoadFlags: u32 {
            /// Rasterize immediately instead of returning an outline
            const RENDER = 1 << 2;
            /// Produce 1-bit output instead of 8-bit coverage
            const MONOCHROME = 1 << 12;
            /// Prefer embedded color glyphs (BGRA output)
            const COLOR = 1 << 20;
        }
    }

    /// Glyph metrics in whole pixels
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct GlyphMetrics {
        pub width: i32,
        pub height: i32,
        pub horizontal_bearing_x: i32,
        pub horizontal_bearing_y: i32,
        pub advance_width: i32,
        pub vertical_bearing_x: i32,
        pub vertical_bearing_y: i32,
        pub advance_height: i32,
    }

    /// Canonical output: tightly packed RGBA rows
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RgbaImage {
        pub width: u32,
        pub height: u32,
        /// Bytes per row, always `width * 4`
        pub stride: usize,
        pub pixels: Vec<u8>,
    }

    impl RgbaImage {
        pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
            Self {
                width,
                height,
                stride: width as usize * 4,
                pixels,
            }
        }

        pub fn is_empty(&self) -> bool {
            self.width == 0 || self.height == 0
        }

        /// RGBA of the pixel at `(x, y)`, if inside the image
        pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
            if x >= self.width || y >= self.height {
                return None;
            }
            let i = y as usize * self.stride + x as usize * 4;
            let px = self.pixels.get(i..i + 4)?;
            Some([px[0], px[1], px[2], px[3]])
        }
    }
}
