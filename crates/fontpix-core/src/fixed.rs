//! 26.6 fixed-point values and the glyph metric converter
//!
//! Engines report positions and sizes with 6 fractional bits. Converting to
//! whole pixels is an arithmetic right shift, so negative values floor
//! (`-1` becomes `-1`, not `0`).

use crate::types::GlyphMetrics;

/// A 26.6 fixed-point number: 26 integer bits, 6 fractional bits
///
/// ```rust
/// use fontpix_core::fixed::F26Dot6;
///
/// let x = F26Dot6::from_int(5);
/// let y = F26Dot6::from_float(5.5);
/// assert_eq!(x.to_int(), 5);
/// assert_eq!(y.raw(), 352);
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct F26Dot6(i32);

impl F26Dot6 {
    pub const FRAC_BITS: u32 = 6;

    pub const ZERO: F26Dot6 = F26Dot6(0);

    /// Wrap a raw 26.6 value as reported by an engine
    #[inline]
    pub const fn from_raw(raw: i32) -> Self {
        F26Dot6(raw)
    }

    #[inline]
    pub const fn from_int(x: i32) -> Self {
        F26Dot6(x << Self::FRAC_BITS)
    }

    /// Nearest representable value, rounding half away from zero
    #[inline]
    pub fn from_float(x: f32) -> Self {
        F26Dot6((x * 64.0).round() as i32)
    }

    /// Whole pixels, flooring toward negative infinity
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 >> Self::FRAC_BITS
    }

    #[inline]
    pub fn to_float(self) -> f32 {
        self.0 as f32 / 64.0
    }

    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// Glyph metrics as the engine reports them, all in 26.6
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawGlyphMetrics {
    pub width: F26Dot6,
    pub height: F26Dot6,
    pub hori_bearing_x: F26Dot6,
    pub hori_bearing_y: F26Dot6,
    pub hori_advance: F26Dot6,
    pub vert_bearing_x: F26Dot6,
    pub vert_bearing_y: F26Dot6,
    pub vert_advance: F26Dot6,
}

/// Convert engine metrics into whole pixels
pub fn convert_metrics(raw: &RawGlyphMetrics) -> GlyphMetrics {
    GlyphMetrics {
        width: raw.width.to_int(),
        height: raw.height.to_int(),
        horizontal_bearing_x: raw.hori_bearing_x.to_int(),
        horizontal_bearing_y: raw.hori_bearing_y.to_int(),
        advance_width: raw.hori_advance.to_int(),
        vertical_bearing_x: raw.vert_bearing_x.to_int(),
        vertical_bearing_y: raw.vert_bearing_y.to_int(),
        advance_height: raw.vert_advance.to_int(),
    }
}
