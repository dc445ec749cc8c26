//! GPU backend seam.
//!
//! The [`Renderer`](crate::Renderer) does all sprite math and state tracking;
//! a backend only has to turn these calls into API commands:
//!
//! ```text
//! create_pipeline ─ once: unit quad VBO/IBO + sprite shader + fan shader
//! begin_pass      ─ alpha blend on, culling off, ortho projection, bind pipeline
//! draw_quad       ─ bind texture unit 0, upload QuadUniforms, draw 6 indices
//! draw_fan        ─ immediate triangle fan (color wheel), outside a pass
//! set_scissor     ─ bottom-left origin, None disables the scissor test
//! end_pass        ─ release pipeline state so foreign renderers can run
//! ```

use crate::color::Color;
use crate::error::RenderResult;
use crate::texture::{ImageData, TextureId};

/// Unit-quad vertex: position doubles as texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadVertex {
    /// Position in the unit square.
    pub position: [f32; 2],
}

/// The shared unit quad.
pub const UNIT_QUAD: [QuadVertex; 4] = [
    QuadVertex { position: [0.0, 0.0] },
    QuadVertex { position: [1.0, 0.0] },
    QuadVertex { position: [1.0, 1.0] },
    QuadVertex { position: [0.0, 1.0] },
];

/// Index list for [`UNIT_QUAD`].
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Per-draw uniform block for the sprite shader.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct QuadUniforms {
    /// Texture sub-rect (u, v, width, height).
    pub uv_rect: [f32; 4],
    /// Screen placement (x, y, width, height) in output pixels.
    pub transform: [f32; 4],
    /// Tint multiplied with the sampled texel.
    pub color: [f32; 4],
    /// Non-zero converts the texel to greyscale before tinting.
    pub grayscale: f32,
    /// Keeps the block 16-byte aligned.
    pub _pad: [f32; 3],
}

/// Vertex of a colored triangle fan.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FanVertex {
    /// Position in output pixels.
    pub position: [f32; 2],
    /// Vertex color.
    pub color: [f32; 4],
}

/// Everything a backend needs to build the sprite pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineDesc<'a> {
    /// Unit quad vertices.
    pub vertices: &'a [QuadVertex],
    /// Unit quad indices.
    pub indices: &'a [u32],
    /// WGSL source of the sprite shader.
    pub sprite_shader: &'a str,
    /// WGSL source of the fan shader.
    pub fan_shader: &'a str,
}

/// Fixed-function state for a sprite pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassState {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Column-major orthographic projection, top-left origin.
    pub projection: [[f32; 4]; 4],
    /// Standard `SRC_ALPHA, ONE_MINUS_SRC_ALPHA` blending.
    pub alpha_blend: bool,
    /// Back-face culling.
    pub cull_faces: bool,
}

impl PassState {
    /// Pass state for an output of the given pixel size.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn for_output(width: u32, height: u32) -> Self {
        let w = width.max(1) as f32;
        let h = height.max(1) as f32;
        Self {
            width,
            height,
            projection: [
                [2.0 / w, 0.0, 0.0, 0.0],
                [0.0, -2.0 / h, 0.0, 0.0],
                [0.0, 0.0, -1.0, 0.0],
                [-1.0, 1.0, 0.0, 1.0],
            ],
            alpha_blend: true,
            cull_faces: false,
        }
    }
}

/// Scissor box in framebuffer pixels, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScissorRect {
    /// Left edge.
    pub x: i32,
    /// Bottom edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

/// Backend-issued off-screen target handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(pub u32);

/// The graphics API behind the renderer.
pub trait GraphicsBackend {
    /// Builds the shared quad geometry and shader programs.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Pipeline`](crate::RenderError::Pipeline) if the
    /// shaders fail to build.
    fn create_pipeline(&mut self, desc: &PipelineDesc<'_>) -> RenderResult<()>;

    /// Uploads RGBA8 pixels and returns a handle.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::TextureUpload`](crate::RenderError::TextureUpload)
    /// when the backend rejects the image.
    fn upload_texture(&mut self, image: &ImageData) -> RenderResult<TextureId>;

    /// Enters sprite rendering state.
    fn begin_pass(&mut self, state: &PassState);

    /// Leaves sprite rendering state.
    fn end_pass(&mut self);

    /// Draws one textured unit quad.
    fn draw_quad(&mut self, texture: TextureId, uniforms: &QuadUniforms);

    /// Draws a triangle fan; the first vertex is the hub.
    fn draw_fan(&mut self, vertices: &[FanVertex]);

    /// Sets or clears the scissor box.
    fn set_scissor(&mut self, scissor: Option<ScissorRect>);

    /// Creates an off-screen color target.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RenderTarget`](crate::RenderError::RenderTarget)
    /// when the backend cannot allocate it.
    fn create_render_target(&mut self, width: u32, height: u32) -> RenderResult<RenderTargetId>;

    /// Redirects drawing to `target`, or back to the window with `None`.
    /// A `clear` color wipes the target after binding.
    fn bind_render_target(&mut self, target: Option<RenderTargetId>, clear: Option<Color>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_maps_corners() {
        let pass = PassState::for_output(200, 100);
        let m = pass.projection;
        let project = |x: f32, y: f32| {
            (
                m[0][0] * x + m[1][0] * y + m[3][0],
                m[0][1] * x + m[1][1] * y + m[3][1],
            )
        };

        assert_eq!(project(0.0, 0.0), (-1.0, 1.0));
        assert_eq!(project(200.0, 100.0), (1.0, -1.0));
    }

    #[test]
    fn test_uniform_block_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<QuadUniforms>(), 64);
        let uniforms = QuadUniforms::default();
        assert_eq!(bytemuck::bytes_of(&uniforms).len(), 64);
    }
}
