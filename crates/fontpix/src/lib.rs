//! Fontpix: characters in, RGBA glyph images out
//!
//! Wraps a rendering engine behind two handles:
//!
//! - [`Library`] - one engine instance
//! - [`Face`] - one font loaded into that instance
//!
//! Each handle carries its own lock. Two faces can render at the same time;
//! two calls on one face take turns.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fontpix::{Face, Library, SkrifaEngine};
//!
//! let data = std::fs::read("DejaVuSans.ttf")?;
//! let library = Arc::new(Library::new(SkrifaEngine::new())?);
//! let face = Face::new(&library, &data, 0)?;
//! face.set_char_size(32.0, 72)?;
//!
//! let (image, metrics) = face.glyph('A')?;
//! println!("{}x{} advance {}", image.width, image.height, metrics.advance_width);
//!
//! face.done()?;
//! library.done()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod face;
mod library;

pub use face::Face;
pub use library::Library;

pub use fontpix_core::{
    config::{self, FaceConfig},
    error::{EngineError, ErrorCode, FontpixError, HandleKind, Result},
    types::{GlyphMetrics, RgbaImage},
    Engine,
};

#[cfg(feature = "skrifa")]
pub use fontpix_engine_skrifa::SkrifaEngine;
