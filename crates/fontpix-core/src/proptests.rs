use crate::fixed::F26Dot6;
use crate::transcode::transcode;
use crate::types::{BitmapDescriptor, PixelMode};
use proptest::prelude::*;

/// A source layout plus a buffer sized for it
#[derive(Debug, Clone)]
struct Source {
    width: u32,
    rows: u32,
    pitch: i32,
    buffer: Vec<u8>,
}

impl Source {
    fn descriptor(&self, mode: PixelMode) -> BitmapDescriptor<'_> {
        BitmapDescriptor {
            width: self.width,
            rows: self.rows,
            pitch: self.pitch,
            pixel_mode: mode,
            buffer: &self.buffer,
        }
    }

    /// Byte offset of output row `y` in the source buffer
    fn row_start(&self, y: usize) -> usize {
        let stride = self.pitch.unsigned_abs() as usize;
        if self.pitch < 0 {
            (self.rows as usize - 1 - y) * stride
        } else {
            y * stride
        }
    }
}

fn source(bytes_per_row: fn(u32) -> usize) -> impl Strategy<Value = Source> {
    (0u32..40, 0u32..12, 0usize..4, any::<bool>()).prop_flat_map(
        move |(width, rows, padding, bottom_up)| {
            let stride = bytes_per_row(width) + padding;
            let pitch = if bottom_up { -(stride as i32) } else { stride as i32 };
            prop::collection::vec(any::<u8>(), stride * rows as usize).prop_map(move |buffer| {
                Source {
                    width,
                    rows,
                    pitch,
                    buffer,
                }
            })
        },
    )
}

fn mono_row_bytes(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

fn gray_row_bytes(width: u32) -> usize {
    width as usize
}

fn bgra_row_bytes(width: u32) -> usize {
    width as usize * 4
}

// Property: mono output is 4 bytes per pixel, opaque, and matches each source bit
proptest! {
    #[test]
    fn prop_mono_matches_bits(src in source(mono_row_bytes)) {
        let out = transcode(&src.descriptor(PixelMode::Mono)).unwrap();
        prop_assert_eq!(out.len(), 4 * src.width as usize * src.rows as usize);

        for y in 0..src.rows as usize {
            let start = src.row_start(y);
            for x in 0..src.width as usize {
                let bit = (src.buffer[start + x / 8] >> (7 - (x % 8))) & 1;
                let v = bit * 255;
                let i = (y * src.width as usize + x) * 4;
                prop_assert_eq!(&out[i..i + 4], &[v, v, v, 255][..]);
            }
        }
    }
}

// Property: gray output replicates coverage into RGB with opaque alpha
proptest! {
    #[test]
    fn prop_gray_replicates_coverage(src in source(gray_row_bytes)) {
        let out = transcode(&src.descriptor(PixelMode::Gray)).unwrap();
        prop_assert_eq!(out.len(), 4 * src.width as usize * src.rows as usize);

        for y in 0..src.rows as usize {
            let start = src.row_start(y);
            for x in 0..src.width as usize {
                let b = src.buffer[start + x];
                let i = (y * src.width as usize + x) * 4;
                prop_assert_eq!(&out[i..i + 4], &[b, b, b, 255][..]);
            }
        }
    }
}

// Property: BGRA output is the source pixel with bytes 2, 1, 0, 3
proptest! {
    #[test]
    fn prop_bgra_permutes_channels(src in source(bgra_row_bytes)) {
        let out = transcode(&src.descriptor(PixelMode::Bgra)).unwrap();
        prop_assert_eq!(out.len(), 4 * src.width as usize * src.rows as usize);

        for y in 0..src.rows as usize {
            let start = src.row_start(y);
            for x in 0..src.width as usize {
                let s = start + x * 4;
                let i = (y * src.width as usize + x) * 4;
                let expected = [src.buffer[s + 2], src.buffer[s + 1], src.buffer[s], src.buffer[s + 3]];
                prop_assert_eq!(&out[i..i + 4], &expected[..]);
            }
        }
    }
}

// Property: unsupported tags always fail, whatever the geometry
proptest! {
    #[test]
    fn prop_unsupported_tags_fail(tag in any::<u8>(), src in source(bgra_row_bytes)) {
        prop_assume!(!matches!(tag, PixelMode::TAG_MONO | PixelMode::TAG_GRAY | PixelMode::TAG_BGRA));
        let result = transcode(&src.descriptor(PixelMode::from_tag(tag)));
        prop_assert!(result.is_err());
    }
}

// Property: the metric shift equals floor division by 64
proptest! {
    #[test]
    fn prop_fixed_to_int_floors(raw in -1_000_000i32..1_000_000) {
        let expected = (raw as f64 / 64.0).floor() as i32;
        prop_assert_eq!(F26Dot6::from_raw(raw).to_int(), expected);
    }
}
