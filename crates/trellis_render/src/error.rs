//! # Render Error Types
//!
//! Errors raised while creating GPU resources or loading fonts.

use thiserror::Error;

/// Errors that can occur in the draw layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Pixel buffer length does not match `width * height * 4`.
    #[error("invalid image data: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidImageData {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// Bytes required.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// Backend refused a texture upload.
    #[error("texture upload failed: {0}")]
    TextureUpload(String),

    /// Image decoding failed.
    #[error("image load failed for {path}: {reason}")]
    ImageLoad {
        /// File that failed.
        path: String,
        /// Decoder message.
        reason: String,
    },

    /// Glyph backend failed to load a font.
    #[error("font load failed for {0}")]
    FontLoad(String),

    /// Backend failed to build the sprite pipeline.
    #[error("pipeline creation failed: {0}")]
    Pipeline(String),

    /// Backend failed to create an off-screen target.
    #[error("render target creation failed: {0}")]
    RenderTarget(String),
}

/// Result type for draw-layer operations.
pub type RenderResult<T> = Result<T, RenderError>;
