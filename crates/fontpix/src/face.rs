//! Font faces and glyph retrieval

use std::sync::Arc;

use parking_lot::Mutex;

use fontpix_core::{
    config::FaceConfig,
    error::{FontpixError, HandleKind, Result},
    fixed::{convert_metrics, F26Dot6},
    traits::Engine,
    transcode::transcode,
    types::{GlyphMetrics, LoadFlags, RgbaImage},
};

use crate::library::Library;

struct FaceState<F> {
    native: Option<F>,
    monochrome: bool,
}

/// One font loaded into a [`Library`]
///
/// Loading a glyph overwrites the engine's glyph slot, so every operation
/// holds the face lock from start to finish. Distinct faces never contend.
pub struct Face<E: Engine> {
    library: Arc<Library<E>>,
    index: u32,
    state: Mutex<FaceState<E::Face>>,
}

impl<E: Engine> Face<E> {
    /// Open face `index` from font bytes using the process-wide defaults
    pub fn new(library: &Arc<Library<E>>, data: &[u8], index: u32) -> Result<Self> {
        Self::with_config(library, data, index, &FaceConfig::global())
    }

    /// Open face `index` from font bytes with explicit settings
    pub fn with_config(
        library: &Arc<Library<E>>,
        data: &[u8],
        index: u32,
        config: &FaceConfig,
    ) -> Result<Self> {
        config.validate()?;
        let engine = library.engine();

        let mut native = {
            let mut lib = library.native.write();
            let lib = lib
                .as_mut()
                .ok_or(FontpixError::Released(HandleKind::Library))?;
            engine
                .load_face(lib, data, index)
                .map_err(|code| library.error(code))?
        };

        // The face is not shared yet, but a failed size must not leak it
        let height = F26Dot6::from_float(config.points);
        if let Err(code) = engine.set_char_size(&mut native, height, config.dpi) {
            if let Err(teardown) = engine.finalize_face(native) {
                log::warn!(
                    "{}: dropping face after size failure: {}",
                    engine.name(),
                    library.error(teardown)
                );
            }
            return Err(library.error(code));
        }

        log::debug!(
            "{}: face {} loaded from {} bytes at {}pt/{}dpi",
            engine.name(),
            index,
            data.len(),
            config.points,
            config.dpi
        );

        Ok(Self {
            library: Arc::clone(library),
            index,
            state: Mutex::new(FaceState {
                native: Some(native),
                monochrome: config.monochrome,
            }),
        })
    }

    pub fn library(&self) -> &Arc<Library<E>> {
        &self.library
    }

    /// Face index within a font collection
    pub fn face_index(&self) -> u32 {
        self.index
    }

    /// Change the character size for all later glyph loads
    pub fn set_char_size(&self, points: f32, dpi: u32) -> Result<()> {
        FaceConfig {
            points,
            dpi,
            monochrome: false,
        }
        .validate()?;

        let mut state = self.state.lock();
        let lib = self.library.native.read();
        if lib.is_none() {
            return Err(FontpixError::Released(HandleKind::Library));
        }
        let native = state
            .native
            .as_mut()
            .ok_or(FontpixError::Released(HandleKind::Face))?;

        self.library
            .engine()
            .set_char_size(native, F26Dot6::from_float(points), dpi)
            .map_err(|code| self.library.error(code))
    }

    /// Ask for 1-bit instead of 8-bit coverage bitmaps
    pub fn set_monochrome(&self, monochrome: bool) -> Result<()> {
        let mut state = self.state.lock();
        let lib = self.library.native.read();
        if lib.is_none() {
            return Err(FontpixError::Released(HandleKind::Library));
        }
        if state.native.is_none() {
            return Err(FontpixError::Released(HandleKind::Face));
        }
        state.monochrome = monochrome;
        Ok(())
    }

    /// Apply size and output settings in one step
    pub fn configure(&self, config: &FaceConfig) -> Result<()> {
        self.set_char_size(config.points, config.dpi)?;
        self.set_monochrome(config.monochrome)
    }

    /// Whether the font carries embedded color glyphs
    pub fn has_color(&self) -> Result<bool> {
        let state = self.state.lock();
        let lib = self.library.native.read();
        if lib.is_none() {
            return Err(FontpixError::Released(HandleKind::Library));
        }
        let native = state
            .native
            .as_ref()
            .ok_or(FontpixError::Released(HandleKind::Face))?;
        Ok(self.library.engine().has_color(native))
    }

    /// Render the glyph for `ch` into an RGBA image plus its metrics
    ///
    /// The engine's bitmap is copied out before the face lock is released,
    /// so the returned image is independent of later loads.
    pub fn glyph(&self, ch: char) -> Result<(RgbaImage, GlyphMetrics)> {
        let mut state = self.state.lock();
        let lib = self.library.native.read();
        if lib.is_none() {
            return Err(FontpixError::Released(HandleKind::Library));
        }

        let monochrome = state.monochrome;
        let native = state
            .native
            .as_mut()
            .ok_or(FontpixError::Released(HandleKind::Face))?;
        let engine = self.library.engine();

        let mut flags = LoadFlags::RENDER;
        if engine.has_color(native) {
            flags |= LoadFlags::COLOR;
        }
        if monochrome {
            flags |= LoadFlags::MONOCHROME;
        }

        let slot = engine
            .load_glyph(native, ch as u32, flags)
            .map_err(|code| self.library.error(code))?;

        let pixels = transcode(&slot.bitmap);
        let (width, rows, mode) = (slot.bitmap.width, slot.bitmap.rows, slot.bitmap.pixel_mode);
        let metrics = convert_metrics(&slot.metrics);
        engine.release_slot(native);

        log::debug!(
            "{}: glyph U+{:04X} flags={:?} -> {:?} {}x{}",
            engine.name(),
            ch as u32,
            flags,
            mode,
            width,
            rows
        );

        Ok((RgbaImage::new(width, rows, pixels?), metrics))
    }

    /// Release the face
    ///
    /// A second call fails with [`FontpixError::Released`]. Once the library
    /// has been released the engine has already discarded the face, so only
    /// the local handle is dropped.
    pub fn done(&self) -> Result<()> {
        let mut state = self.state.lock();
        let lib = self.library.native.read();
        let native = state
            .native
            .take()
            .ok_or(FontpixError::Released(HandleKind::Face))?;

        if lib.is_none() {
            log::debug!("face {} dropped after its library", self.index);
            return Ok(());
        }

        self.library
            .engine()
            .finalize_face(native)
            .map_err(|code| self.library.error(code))
    }

    pub fn is_released(&self) -> bool {
        self.state.lock().native.is_none()
    }
}

impl<E: Engine> Drop for Face<E> {
    fn drop(&mut self) {
        let Some(native) = self.state.get_mut().native.take() else {
            return;
        };
        if self.library.native.read().is_none() {
            return;
        }
        if let Err(code) = self.library.engine().finalize_face(native) {
            log::warn!(
                "{}: face teardown failed: {}",
                self.library.engine().name(),
                self.library.error(code)
            );
        }
    }
}
