//! Error types for fontpix

use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FontpixError>;

/// Main error type for fontpix
#[derive(Debug, Error)]
pub enum FontpixError {
    #[error("{0}")]
    Engine(#[from] EngineError),

    #[error("pixel mode 0x{0:02x} not implemented")]
    UnsupportedPixelMode(u8),

    #[error("bitmap buffer too small: expected {expected} bytes, got {actual}")]
    TruncatedBitmap { expected: usize, actual: usize },

    #[error("bitmap pitch {pitch} cannot hold {width} pixels per row")]
    InvalidPitch { pitch: i32, width: u32 },

    #[error("{0} handle already released")]
    Released(HandleKind),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which native handle an operation found already torn down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleKind {
    Library,
    Face,
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Library => f.write_str("library"),
            Self::Face => f.write_str("face"),
        }
    }
}

/// Numeric status reported by a rendering engine
///
/// Zero never appears here: engines return `Ok` for success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:02x}", self.0)
    }
}

/// An engine failure resolved to a readable message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EngineError {
    pub code: ErrorCode,
    pub message: String,
}

impl EngineError {
    /// Resolve `code` through the engine's own string table.
    ///
    /// Codes without an entry read as `Errno 0x..`.
    pub fn resolve(code: ErrorCode, text: Option<&str>) -> Self {
        let message = match text {
            Some(text) => text.to_string(),
            None => format!("Errno {code}"),
        };
        Self { code, message }
    }
}

/// Image sink errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Format not supported: {0}")]
    FormatNotSupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_error_uses_engine_text() {
        let err = EngineError::resolve(ErrorCode(0x02), Some("unknown file format"));
        assert_eq!(err.to_string(), "unknown file format");
        assert_eq!(err.code.raw(), 2);
    }

    #[test]
    fn test_engine_error_falls_back_to_hex() {
        let err = EngineError::resolve(ErrorCode(0x5a), None);
        assert_eq!(err.to_string(), "Errno 0x5a");

        let err = EngineError::resolve(ErrorCode(3), None);
        assert_eq!(err.to_string(), "Errno 0x03");
    }

    #[test]
    fn test_unsupported_mode_names_tag() {
        let err = FontpixError::UnsupportedPixelMode(5);
        assert_eq!(err.to_string(), "pixel mode 0x05 not implemented");
    }

    #[test]
    fn test_released_message() {
        assert_eq!(
            FontpixError::Released(HandleKind::Face).to_string(),
            "face handle already released"
        );
    }
}
