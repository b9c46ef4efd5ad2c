//! The contracts between fontpix and the outside world
//!
//! - [`Engine`] - A rendering engine: owns fonts, loads and rasterizes glyphs
//! - [`Exporter`] - An image sink: turns finished RGBA images into files

use crate::error::ErrorCode;
use crate::fixed::F26Dot6;
use crate::types::{GlyphSlot, LoadFlags, RgbaImage};

/// Result type for raw engine calls: numeric codes, resolved by the caller
pub type EngineResult<T> = std::result::Result<T, ErrorCode>;

/// A font rendering engine
///
/// Handles are plain values. Teardown methods take them by value, so a handle
/// cannot be finalized twice through this trait. Engine methods are not
/// required to be thread safe for a single handle: callers serialize access
/// to each library and each face.
///
/// ```ignore
/// struct MyEngine;
///
/// impl Engine for MyEngine {
///     type Library = ();
///     type Face = MyFace;
///
///     fn name(&self) -> &'static str {
///         "my-engine"
///     }
///
///     fn load_glyph<'f>(&self, face: &'f mut MyFace, code: u32, flags: LoadFlags)
///         -> EngineResult<GlyphSlot<'f>> {
///         face.render(code, flags)?;
///         Ok(face.slot())
///     }
///     // ...
/// }
/// ```
pub trait Engine: Send + Sync {
    /// One initialized engine instance
    type Library: Send + Sync;

    /// One loaded font face, including its glyph slot
    type Face: Send;

    /// Identify yourself in logs
    fn name(&self) -> &'static str;

    /// Create an engine instance
    fn initialize(&self) -> EngineResult<Self::Library>;

    /// Tear down an engine instance
    fn finalize(&self, library: Self::Library) -> EngineResult<()>;

    /// Open face `index` of a font held in memory
    ///
    /// The engine keeps its own copy of `data`.
    fn load_face(
        &self,
        library: &mut Self::Library,
        data: &[u8],
        index: u32,
    ) -> EngineResult<Self::Face>;

    /// Set the nominal character height for subsequent loads
    fn set_char_size(&self, face: &mut Self::Face, height: F26Dot6, dpi: u32) -> EngineResult<()>;

    /// Whether the face carries embedded color glyphs
    fn has_color(&self, face: &Self::Face) -> bool;

    /// Load and render the glyph for a character code into the face's slot
    ///
    /// The returned slot borrows the face and is overwritten by the next load.
    fn load_glyph<'f>(
        &self,
        face: &'f mut Self::Face,
        code: u32,
        flags: LoadFlags,
    ) -> EngineResult<GlyphSlot<'f>>;

    /// Called once the caller has copied everything it needs out of the slot
    fn release_slot(&self, _face: &mut Self::Face) {}

    /// Tear down a face
    fn finalize_face(&self, face: Self::Face) -> EngineResult<()>;

    /// Human-readable text for an error code, if the engine knows one
    fn error_string(&self, _code: ErrorCode) -> Option<&'static str> {
        None
    }
}

/// Where finished images become files
pub trait Exporter: Send + Sync {
    /// Who are you?
    fn name(&self) -> &'static str;

    /// Encode the image as bytes
    fn export(&self, image: &RgbaImage) -> crate::Result<Vec<u8>>;

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    /// What MIME type identifies your format?
    fn mime_type(&self) -> &'static str;
}
