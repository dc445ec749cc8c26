//! Glyph rasterizer seam.
//!
//! Text never goes through the sprite pipeline. The rasterizer owns its own
//! GPU state, so the renderer closes its pass around every text draw.

use std::path::Path;

use crate::color::Color;
use crate::error::RenderResult;
use crate::recorder::{CommandLog, GpuCommand};

/// Rasterizer-issued font handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FontId(pub u32);

impl FontId {
    /// The rasterizer's built-in font.
    pub const DEFAULT: Self = Self(0);
}

/// External text backend.
pub trait GlyphRasterizer {
    /// Loads a font file.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::FontLoad`](crate::RenderError::FontLoad) when the
    /// file cannot be used.
    fn load_font(&mut self, path: &Path) -> RenderResult<FontId>;

    /// Measures `text` at `size` output pixels, returning `(width, height)`.
    fn measure(&self, font: FontId, text: &str, size: f32) -> (f32, f32);

    /// Draws `text` with its top-left corner at `(x, y)` in output pixels.
    fn draw(&mut self, font: FontId, text: &str, x: f32, y: f32, size: f32, color: Color);
}

/// Fixed-advance rasterizer for headless runs and tests.
///
/// Every character is `size * advance` wide and lines are `size` tall.
#[derive(Debug, Clone)]
pub struct MonospaceGlyphs {
    advance: f32,
    next_font: u32,
    log: Option<CommandLog>,
}

impl MonospaceGlyphs {
    /// Default advance as a fraction of the font size.
    pub const DEFAULT_ADVANCE: f32 = 0.5;

    /// Creates a rasterizer with the default advance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            advance: Self::DEFAULT_ADVANCE,
            next_font: 1,
            log: None,
        }
    }

    /// Sets the advance fraction.
    #[must_use]
    pub fn with_advance(mut self, advance: f32) -> Self {
        self.advance = advance;
        self
    }

    /// Records text draws into `log`, interleaved with backend commands.
    #[must_use]
    pub fn with_log(mut self, log: CommandLog) -> Self {
        self.log = Some(log);
        self
    }
}

impl Default for MonospaceGlyphs {
    fn default() -> Self {
        Self::new()
    }
}

impl GlyphRasterizer for MonospaceGlyphs {
    fn load_font(&mut self, _path: &Path) -> RenderResult<FontId> {
        let id = FontId(self.next_font);
        self.next_font += 1;
        Ok(id)
    }

    #[allow(clippy::cast_precision_loss)]
    fn measure(&self, _font: FontId, text: &str, size: f32) -> (f32, f32) {
        let chars = text.chars().count() as f32;
        (chars * size * self.advance, size)
    }

    fn draw(&mut self, font: FontId, text: &str, x: f32, y: f32, size: f32, color: Color) {
        if let Some(log) = &self.log {
            log.push(GpuCommand::Text {
                font,
                text: text.to_owned(),
                x,
                y,
                size,
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_measure() {
        let glyphs = MonospaceGlyphs::new();
        assert_eq!(glyphs.measure(FontId::DEFAULT, "abcd", 10.0), (20.0, 10.0));
        assert_eq!(glyphs.measure(FontId::DEFAULT, "", 10.0), (0.0, 10.0));
    }

    #[test]
    fn test_fonts_get_distinct_ids() {
        let mut glyphs = MonospaceGlyphs::new();
        let a = glyphs.load_font(Path::new("a.ttf")).unwrap();
        let b = glyphs.load_font(Path::new("b.ttf")).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, FontId::DEFAULT);
    }
}
