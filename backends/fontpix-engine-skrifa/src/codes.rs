//! Engine error codes
//!
//! Numbering and wording follow the FreeType error table so callers that
//! already know those codes can keep matching on them.

use fontpix_core::error::ErrorCode;

pub const UNKNOWN_FILE_FORMAT: ErrorCode = ErrorCode(0x02);
pub const INVALID_FILE_FORMAT: ErrorCode = ErrorCode(0x03);
pub const INVALID_ARGUMENT: ErrorCode = ErrorCode(0x06);
pub const INVALID_GLYPH_INDEX: ErrorCode = ErrorCode(0x10);
pub const INVALID_OUTLINE: ErrorCode = ErrorCode(0x14);
pub const INVALID_PIXEL_SIZE: ErrorCode = ErrorCode(0x17);
pub const INVALID_SIZE_HANDLE: ErrorCode = ErrorCode(0x24);
pub const OUT_OF_MEMORY: ErrorCode = ErrorCode(0x40);
pub const INVALID_TABLE: ErrorCode = ErrorCode(0x8E);

/// Text for a code, `None` for codes this engine never produces
pub fn message(code: ErrorCode) -> Option<&'static str> {
    let text = match code {
        UNKNOWN_FILE_FORMAT => "unknown file format",
        INVALID_FILE_FORMAT => "broken file",
        INVALID_ARGUMENT => "invalid argument",
        INVALID_GLYPH_INDEX => "invalid glyph index",
        INVALID_OUTLINE => "invalid outline",
        INVALID_PIXEL_SIZE => "invalid pixel size",
        INVALID_SIZE_HANDLE => "invalid size handle",
        OUT_OF_MEMORY => "out of memory",
        INVALID_TABLE => "invalid table",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_have_text() {
        assert_eq!(message(UNKNOWN_FILE_FORMAT), Some("unknown file format"));
        assert_eq!(message(INVALID_PIXEL_SIZE), Some("invalid pixel size"));
        assert_eq!(message(ErrorCode(0x7F)), None);
    }
}
