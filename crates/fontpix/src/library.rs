//! The engine instance handle

use parking_lot::RwLock;

use fontpix_core::{
    error::{EngineError, ErrorCode, FontpixError, HandleKind, Result},
    traits::Engine,
};

/// One initialized rendering engine
///
/// The native handle sits behind a read-write lock. Creating faces and
/// tearing down take it exclusively; face operations share it, so faces of
/// one library can work in parallel while the library cannot disappear
/// underneath them.
pub struct Library<E: Engine> {
    engine: E,
    pub(crate) native: RwLock<Option<E::Library>>,
}

impl<E: Engine> Library<E> {
    /// Initialize a fresh engine instance
    pub fn new(engine: E) -> Result<Self> {
        let native = engine
            .initialize()
            .map_err(|code| resolve(&engine, code))?;

        log::info!("{}: library initialized", engine.name());

        Ok(Self {
            engine,
            native: RwLock::new(Some(native)),
        })
    }

    /// The engine driving this library
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Release the engine instance
    ///
    /// Faces created from this library stop working afterwards. A second
    /// call fails with [`FontpixError::Released`].
    pub fn done(&self) -> Result<()> {
        let mut native = self.native.write();
        let handle = native
            .take()
            .ok_or(FontpixError::Released(HandleKind::Library))?;

        self.engine
            .finalize(handle)
            .map_err(|code| self.error(code))?;

        log::info!("{}: library released", self.engine.name());
        Ok(())
    }

    pub fn is_released(&self) -> bool {
        self.native.read().is_none()
    }

    /// Turn an engine code into a readable error
    pub(crate) fn error(&self, code: ErrorCode) -> FontpixError {
        resolve(&self.engine, code)
    }
}

impl<E: Engine> Drop for Library<E> {
    fn drop(&mut self) {
        if let Some(handle) = self.native.get_mut().take() {
            if let Err(code) = self.engine.finalize(handle) {
                log::warn!(
                    "{}: library teardown failed: {}",
                    self.engine.name(),
                    resolve(&self.engine, code)
                );
            }
        }
    }
}

fn resolve<E: Engine>(engine: &E, code: ErrorCode) -> FontpixError {
    EngineError::resolve(code, engine.error_string(code)).into()
}
