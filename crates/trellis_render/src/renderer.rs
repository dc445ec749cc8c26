//! The sprite renderer.
//!
//! Every draw is one textured unit quad. A frame is bracketed by
//! [`Renderer::begin`] and [`Renderer::end`]; text and the color wheel step
//! outside the pass because they own their GPU state.
//!
//! Clip rects are kept in top-left output pixels and only flipped to the
//! backend's bottom-left convention when the scissor is issued.

use std::f32::consts::TAU;
use std::path::Path;

use tracing::{debug, trace};

use crate::backend::{
    FanVertex, GraphicsBackend, PassState, PipelineDesc, QuadUniforms, ScissorRect, QUAD_INDICES,
    UNIT_QUAD,
};
use crate::color::Color;
use crate::error::RenderResult;
use crate::geometry::Rect;
use crate::glyph::{FontId, GlyphRasterizer};
use crate::nine_patch::NinePatch;
use crate::shaders::{FAN_WGSL, SPRITE_WGSL};
use crate::texture::{ImageData, Texture};

/// Counters for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Textured quads drawn.
    pub quad_draws: u32,
    /// Text runs drawn.
    pub text_draws: u32,
    /// Fans drawn.
    pub fan_draws: u32,
    /// `clip_start` calls rejected as empty.
    pub rejected_clips: u32,
}

/// Batched 2D renderer with a nested scissor stack.
pub struct Renderer {
    backend: Box<dyn GraphicsBackend>,
    glyphs: Box<dyn GlyphRasterizer>,
    width: u32,
    height: u32,
    virtual_width: f32,
    clip_stack: Vec<Rect>,
    white: Texture,
    in_pass: bool,
    stats: RenderStats,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("clip_depth", &self.clip_stack.len())
            .field("in_pass", &self.in_pass)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    /// Builds the pipeline and the internal white texture.
    ///
    /// # Errors
    ///
    /// Fails if the backend cannot build the pipeline or upload the texture.
    pub fn new(
        mut backend: Box<dyn GraphicsBackend>,
        glyphs: Box<dyn GlyphRasterizer>,
    ) -> RenderResult<Self> {
        backend.create_pipeline(&PipelineDesc {
            vertices: &UNIT_QUAD,
            indices: &QUAD_INDICES,
            sprite_shader: SPRITE_WGSL,
            fan_shader: FAN_WGSL,
        })?;
        let white = ImageData::white_pixel();
        let white = Texture {
            id: backend.upload_texture(&white)?,
            width: white.width(),
            height: white.height(),
        };

        Ok(Self {
            backend,
            glyphs,
            width: 1,
            height: 1,
            virtual_width: 1.0,
            clip_stack: Vec::with_capacity(16),
            white,
            in_pass: false,
            stats: RenderStats::default(),
        })
    }

    /// Sets the pixel size of the bound output.
    pub fn set_target(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Sets the authoring width that point sizes refer to.
    pub fn set_virtual_width(&mut self, width: f32) {
        self.virtual_width = width;
    }

    /// Output width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Enters the sprite pass. Does nothing if already inside one.
    pub fn begin(&mut self) {
        if self.in_pass {
            return;
        }
        self.backend
            .begin_pass(&PassState::for_output(self.width, self.height));
        self.in_pass = true;
        if let Some(top) = self.clip_stack.last().copied() {
            let scissor = self.scissor(top);
            self.backend.set_scissor(Some(scissor));
        }
    }

    /// Leaves the sprite pass. Does nothing outside one.
    pub fn end(&mut self) {
        if !self.in_pass {
            return;
        }
        self.backend.end_pass();
        self.in_pass = false;
    }

    /// True between [`begin`](Self::begin) and [`end`](Self::end).
    #[must_use]
    pub fn in_pass(&self) -> bool {
        self.in_pass
    }

    /// Draws `texture`'s `uv` region into a rect in output pixels.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &mut self,
        texture: &Texture,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        uv: [f32; 4],
        color: Color,
        grayscale: bool,
    ) {
        let uniforms = QuadUniforms {
            uv_rect: uv,
            transform: [x, y, width, height],
            color: color.to_array(),
            grayscale: if grayscale { 1.0 } else { 0.0 },
            _pad: [0.0; 3],
        };
        self.backend.draw_quad(texture.id, &uniforms);
        self.stats.quad_draws += 1;
    }

    /// Fills `rect` with a solid color.
    pub fn rectangle(&mut self, rect: Rect, color: Color) {
        let white = self.white;
        self.draw(
            &white,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            [0.0, 0.0, 1.0, 1.0],
            color,
            false,
        );
    }

    /// Draws `patch` stretched over `bounds`.
    pub fn nine_patch(&mut self, patch: &NinePatch, bounds: Rect, color: Color, grayscale: bool) {
        let texture = patch.texture;
        for slice in patch.slices(bounds).as_slice() {
            let r = slice.rect;
            self.draw(&texture, r.x, r.y, r.width, r.height, slice.uv, color, grayscale);
        }
    }

    /// Draws an HSV color wheel of full saturation at the rim.
    ///
    /// Hue runs with the angle measured from +X towards +Y (screen down).
    #[allow(clippy::cast_precision_loss)]
    pub fn color_wheel(
        &mut self,
        center: (f32, f32),
        radius: f32,
        segments: u32,
        value: f32,
        grayscale: bool,
    ) {
        let segments = segments.max(3);
        let tone = |c: Color| if grayscale { c.greyscale() } else { c };

        let mut fan = Vec::with_capacity(segments as usize + 2);
        fan.push(FanVertex {
            position: [center.0, center.1],
            color: tone(Color::from_hsv(0.0, 0.0, value)).to_array(),
        });
        for i in 0..=segments {
            let t = i as f32 / segments as f32;
            let angle = t * TAU;
            fan.push(FanVertex {
                position: [
                    center.0 + radius * angle.cos(),
                    center.1 + radius * angle.sin(),
                ],
                color: tone(Color::from_hsv(t.fract(), 1.0, value)).to_array(),
            });
        }

        let resume = self.in_pass;
        self.end();
        self.backend.draw_fan(&fan);
        self.stats.fan_draws += 1;
        if resume {
            self.begin();
        }
    }

    /// Pushes a clip rect in output pixels, intersected with the current one.
    ///
    /// Returns `false` and pushes nothing when the result is empty; the
    /// caller must then skip its content and must not call
    /// [`clip_end`](Self::clip_end).
    pub fn clip_start(&mut self, rect: Rect) -> bool {
        let clipped = match self.clip_stack.last() {
            Some(top) => rect.intersect(top),
            None => rect,
        };
        if clipped.is_empty() {
            trace!("Rejected empty clip region {:?}", clipped);
            self.stats.rejected_clips += 1;
            return false;
        }
        self.clip_stack.push(clipped);
        let scissor = self.scissor(clipped);
        self.backend.set_scissor(Some(scissor));
        true
    }

    /// Pops the current clip rect, restoring the parent or disabling the
    /// scissor when the stack empties.
    pub fn clip_end(&mut self) {
        if self.clip_stack.pop().is_none() {
            debug!("clip_end without a matching clip_start");
            return;
        }
        let scissor = self.clip_stack.last().map(|top| self.scissor(*top));
        self.backend.set_scissor(scissor);
    }

    /// The active clip rect in top-left output pixels.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Number of pushed clip rects.
    #[must_use]
    pub fn clip_depth(&self) -> usize {
        self.clip_stack.len()
    }

    /// Draws text with its top-left corner at `(x, y)` in output pixels.
    ///
    /// `points` is authored in virtual units, see [`font_size`](Self::font_size).
    pub fn text(&mut self, font: FontId, text: &str, x: f32, y: f32, points: f32, color: Color) {
        let size = self.font_size(points);
        let resume = self.in_pass;
        self.end();
        self.glyphs.draw(font, text, x, y, size, color);
        self.stats.text_draws += 1;
        if resume {
            self.begin();
        }
    }

    /// Measures `text` at `points` in output pixels.
    #[must_use]
    pub fn text_size(&self, font: FontId, text: &str, points: f32) -> (f32, f32) {
        self.glyphs.measure(font, text, self.font_size(points))
    }

    /// Converts a point size authored in virtual units to output pixels.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn font_size(&self, points: f32) -> f32 {
        if self.virtual_width <= 0.0 {
            return points;
        }
        points * self.width as f32 / self.virtual_width
    }

    /// Loads a font through the glyph rasterizer.
    ///
    /// # Errors
    ///
    /// Propagates the rasterizer's font error.
    pub fn load_font(&mut self, path: &Path) -> RenderResult<FontId> {
        self.glyphs.load_font(path)
    }

    /// Uploads an image to the backend.
    ///
    /// # Errors
    ///
    /// Propagates the backend's upload error.
    pub fn upload(&mut self, image: &ImageData) -> RenderResult<Texture> {
        let id = self.backend.upload_texture(image)?;
        Ok(Texture {
            id,
            width: image.width(),
            height: image.height(),
        })
    }

    /// Counters since the last [`reset_stats`](Self::reset_stats).
    #[must_use]
    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Zeroes the frame counters.
    pub fn reset_stats(&mut self) {
        self.stats = RenderStats::default();
    }

    /// The backend, for output targets that bind themselves.
    pub fn backend_mut(&mut self) -> &mut dyn GraphicsBackend {
        self.backend.as_mut()
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn scissor(&self, rect: Rect) -> ScissorRect {
        let flipped_y = self.height as f32 - (rect.y + rect.height);
        ScissorRect {
            x: rect.x as i32,
            y: flipped_y as i32,
            width: rect.width as i32,
            height: rect.height as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::MonospaceGlyphs;
    use crate::recorder::{CommandLog, GpuCommand, RecordingBackend};
    use crate::texture::TextureId;

    fn renderer() -> (Renderer, CommandLog) {
        let (backend, log) = RecordingBackend::create();
        let glyphs = MonospaceGlyphs::new().with_log(log.clone());
        let mut renderer = Renderer::new(Box::new(backend), Box::new(glyphs)).unwrap();
        renderer.set_target(100, 100);
        renderer.set_virtual_width(100.0);
        log.clear();
        (renderer, log)
    }

    #[test]
    fn test_new_builds_pipeline_and_white_texture() {
        let (backend, log) = RecordingBackend::create();
        let _renderer = Renderer::new(Box::new(backend), Box::new(MonospaceGlyphs::new())).unwrap();
        let commands = log.snapshot();
        assert_eq!(commands[0], GpuCommand::CreatePipeline { index_count: 6 });
        assert!(matches!(
            commands[1],
            GpuCommand::UploadTexture {
                width: 1,
                height: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_nested_clips_intersect_and_restore() {
        let (mut r, log) = renderer();

        assert!(r.clip_start(Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert!(r.clip_start(Rect::new(10.0, 10.0, 50.0, 50.0)));
        assert_eq!(r.current_clip(), Some(Rect::new(10.0, 10.0, 40.0, 40.0)));
        assert_eq!(
            log.last_scissor(),
            Some(Some(ScissorRect {
                x: 10,
                y: 50,
                width: 40,
                height: 40,
            }))
        );

        r.clip_end();
        assert_eq!(r.current_clip(), Some(Rect::new(0.0, 0.0, 50.0, 50.0)));
        assert_eq!(
            log.last_scissor(),
            Some(Some(ScissorRect {
                x: 0,
                y: 50,
                width: 50,
                height: 50,
            }))
        );

        r.clip_end();
        assert_eq!(r.current_clip(), None);
        assert_eq!(log.last_scissor(), Some(None));
    }

    #[test]
    fn test_disjoint_clip_is_rejected_without_push() {
        let (mut r, _log) = renderer();
        assert!(r.clip_start(Rect::new(0.0, 0.0, 20.0, 20.0)));
        assert!(!r.clip_start(Rect::new(40.0, 40.0, 10.0, 10.0)));
        assert_eq!(r.clip_depth(), 1);
        assert_eq!(r.stats().rejected_clips, 1);

        assert!(!r.clip_start(Rect::new(5.0, 5.0, 0.5, 10.0)));
        assert_eq!(r.clip_depth(), 1);
    }

    #[test]
    fn test_text_closes_and_reopens_pass() {
        let (mut r, log) = renderer();
        r.begin();
        r.text(FontId::DEFAULT, "hi", 1.0, 2.0, 8.0, Color::BLACK);
        r.end();

        let kinds: Vec<&'static str> = log
            .snapshot()
            .iter()
            .map(|c| match c {
                GpuCommand::BeginPass(_) => "begin",
                GpuCommand::EndPass => "end",
                GpuCommand::Text { .. } => "text",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["begin", "end", "text", "begin", "end"]);
        assert_eq!(r.stats().text_draws, 1);
    }

    #[test]
    fn test_begin_reapplies_active_scissor() {
        let (mut r, log) = renderer();
        assert!(r.clip_start(Rect::new(0.0, 0.0, 30.0, 30.0)));
        log.clear();
        r.begin();
        assert_eq!(
            log.last_scissor(),
            Some(Some(ScissorRect {
                x: 0,
                y: 70,
                width: 30,
                height: 30,
            }))
        );
    }

    #[test]
    fn test_nine_patch_issues_one_draw_per_slice() {
        let (mut r, log) = renderer();
        let atlas = Texture {
            id: TextureId(9),
            width: 32,
            height: 32,
        };
        let patch = NinePatch::new(atlas, [0.0, 0.0, 1.0, 1.0], 4.0, 4.0, 4.0, 4.0);
        r.begin();
        r.nine_patch(&patch, Rect::new(0.0, 0.0, 40.0, 20.0), Color::WHITE, true);
        r.end();

        assert_eq!(log.quad_draws(), 9);
        let grey = log.snapshot().iter().all(|c| match c {
            GpuCommand::DrawQuad { uniforms, .. } => uniforms.grayscale > 0.0,
            _ => true,
        });
        assert!(grey);
    }

    #[test]
    fn test_color_wheel_fan_shape() {
        let (mut r, log) = renderer();
        r.color_wheel((50.0, 50.0), 10.0, 8, 1.0, false);
        let fan = log.snapshot().into_iter().find_map(|c| match c {
            GpuCommand::DrawFan { vertices } => Some(vertices),
            _ => None,
        });
        let fan = fan.unwrap();
        assert_eq!(fan.len(), 10);
        assert_eq!(fan[0].position, [50.0, 50.0]);
        assert_eq!(fan[1].position, [60.0, 50.0]);
        assert_eq!(fan[1].color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_font_size_scales_with_output() {
        let (mut r, _log) = renderer();
        r.set_target(200, 100);
        assert!((r.font_size(8.0) - 16.0).abs() < f32::EPSILON);
    }
}
