//! Texture handles and decoded image data.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{RenderError, RenderResult};

/// Backend-issued texture handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A GPU texture with its pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Texture {
    /// Backend handle.
    pub id: TextureId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Texture {
    /// Width as a float, for UV math.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn width_f(&self) -> f32 {
        self.width as f32
    }

    /// Height as a float, for UV math.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn height_f(&self) -> f32 {
        self.height as f32
    }
}

/// Decoded RGBA8 pixels ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageData {
    /// Wraps a tightly packed RGBA8 buffer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidImageData`] if the buffer length is not
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> RenderResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(RenderError::InvalidImageData {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// A single opaque white pixel.
    #[must_use]
    pub fn white_pixel() -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![255, 255, 255, 255],
        }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major from the top-left.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// Decodes image files for upload. Implemented by the host application.
pub trait TextureLoader {
    /// Decodes the image at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::ImageLoad`] when the file cannot be read or decoded.
    fn load(&mut self, path: &Path) -> RenderResult<ImageData>;
}

/// A loader serving pre-decoded images by path.
#[derive(Debug, Default)]
pub struct MemoryImages {
    images: HashMap<PathBuf, ImageData>,
}

impl MemoryImages {
    /// Creates an empty loader.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an image under `path`.
    pub fn insert(&mut self, path: impl Into<PathBuf>, image: ImageData) {
        self.images.insert(path.into(), image);
    }
}

impl TextureLoader for MemoryImages {
    fn load(&mut self, path: &Path) -> RenderResult<ImageData> {
        self.images
            .get(path)
            .cloned()
            .ok_or_else(|| RenderError::ImageLoad {
                path: path.display().to_string(),
                reason: "not registered".to_owned(),
            })
    }
}
