//! Frame driver configuration.
//!
//! ```toml
//! virtual_width = 1280
//! virtual_height = 720
//! resolution = 1.0
//! blink_interval = 0.5
//! wheel_resolution = 32
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::{UiError, UiResult};

/// Settings for a [`Tui`](crate::Tui). Every key is optional.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Authoring width in virtual units.
    pub virtual_width: f32,
    /// Authoring height in virtual units.
    pub virtual_height: f32,
    /// Multiplier applied to the output size of registry-created targets.
    pub resolution: f32,
    /// Caret blink half-period in seconds.
    pub blink_interval: f32,
    /// Segments used to draw the color wheel.
    pub wheel_resolution: u32,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            virtual_width: 1280.0,
            virtual_height: 720.0,
            resolution: 1.0,
            blink_interval: 0.5,
            wheel_resolution: 32,
        }
    }
}

impl TuiConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Config`] on malformed input and
    /// [`UiError::InvalidConfig`] if [`validate`](Self::validate) fails.
    pub fn from_toml_str(text: &str) -> UiResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the virtual size and resolution are positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidConfig`] naming the first bad key.
    pub fn validate(&self) -> UiResult<()> {
        for (key, value) in [
            ("virtual_width", self.virtual_width),
            ("virtual_height", self.virtual_height),
            ("resolution", self.resolution),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(UiError::InvalidConfig(format!(
                    "{key} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::ConfigIo`] if the file cannot be read and
    /// [`UiError::Config`] or [`UiError::InvalidConfig`] if it does not parse.
    pub fn load(path: impl AsRef<Path>) -> UiResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| UiError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Output size in pixels after applying `resolution`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn output_size(&self) -> (u32, u32) {
        (
            (self.virtual_width * self.resolution).max(1.0) as u32,
            (self.virtual_height * self.resolution).max(1.0) as u32,
        )
    }
}
