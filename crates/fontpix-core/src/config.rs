//! Face configuration defaults
//!
//! Every new face starts from [`FaceConfig::global`]: 12 pt at 72 dpi with
//! anti-aliased output, unless the environment says otherwise.
//!
//! # Environment Variables
//!
//! - `FONTPIX_PT` - character size in points (e.g. `32` or `10.5`)
//! - `FONTPIX_DPI` - device resolution (e.g. `96`)
//! - `FONTPIX_MONO` - `1`, `true`, `yes` or `on` for 1-bit output
//!
//! ```bash
//! FONTPIX_PT=32 FONTPIX_MONO=1 ./my_app
//! ```
//!
//! The environment is read once per process. Unparsable values are logged
//! and the built-in defaults are used instead.

use std::sync::OnceLock;

use crate::error::{FontpixError, Result};

pub const ENV_POINTS: &str = "FONTPIX_PT";
pub const ENV_DPI: &str = "FONTPIX_DPI";
pub const ENV_MONO: &str = "FONTPIX_MONO";

static GLOBAL: OnceLock<FaceConfig> = OnceLock::new();

/// Size and output settings applied to a face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceConfig {
    /// Character height in points
    pub points: f32,
    /// Device resolution; 0 is treated as 72 by engines
    pub dpi: u32,
    /// Request 1-bit bitmaps instead of 8-bit coverage
    pub monochrome: bool,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            points: 12.0,
            dpi: 72,
            monochrome: false,
        }
    }
}

impl FaceConfig {
    /// Defaults with environment overrides, computed once per process
    pub fn global() -> Self {
        *GLOBAL.get_or_init(|| match Self::from_env() {
            Ok(config) => {
                log::debug!("fontpix face defaults: {:?}", config);
                config
            },
            Err(e) => {
                log::warn!("ignoring fontpix environment overrides: {}", e);
                Self::default()
            },
        })
    }

    /// Defaults with overrides read from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(val) = lookup(ENV_POINTS) {
            config.points = val
                .trim()
                .parse()
                .map_err(|_| FontpixError::Config(format!("{ENV_POINTS}={val:?} is not a number")))?;
        }

        if let Some(val) = lookup(ENV_DPI) {
            config.dpi = val
                .trim()
                .parse()
                .map_err(|_| FontpixError::Config(format!("{ENV_DPI}={val:?} is not an integer")))?;
        }

        if let Some(val) = lookup(ENV_MONO) {
            config.monochrome =
                matches!(val.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject sizes no engine can render
    pub fn validate(&self) -> Result<()> {
        if !self.points.is_finite() || self.points <= 0.0 {
            return Err(FontpixError::Config(format!(
                "character size must be positive, got {}",
                self.points
            )));
        }
        Ok(())
    }
}
