//! Headless backend that records every call.
//!
//! Used by tests, tooling and hosts that replay frames into their own API.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::backend::{
    FanVertex, GraphicsBackend, PassState, PipelineDesc, QuadUniforms, RenderTargetId,
    ScissorRect,
};
use crate::color::Color;
use crate::error::RenderResult;
use crate::glyph::FontId;
use crate::texture::{ImageData, TextureId};

/// One recorded backend or rasterizer call.
#[derive(Debug, Clone, PartialEq)]
pub enum GpuCommand {
    /// Pipeline built.
    CreatePipeline {
        /// Number of quad indices.
        index_count: usize,
    },
    /// Texture uploaded.
    UploadTexture {
        /// Issued handle.
        id: TextureId,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Sprite pass opened.
    BeginPass(PassState),
    /// Sprite pass closed.
    EndPass,
    /// One textured quad.
    DrawQuad {
        /// Bound texture.
        texture: TextureId,
        /// Uniform block.
        uniforms: QuadUniforms,
    },
    /// One triangle fan.
    DrawFan {
        /// Fan vertices, hub first.
        vertices: Vec<FanVertex>,
    },
    /// Scissor changed; `None` disables it.
    Scissor(Option<ScissorRect>),
    /// Off-screen target created.
    CreateTarget {
        /// Issued handle.
        id: RenderTargetId,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
    /// Target bound; `None` is the window.
    BindTarget {
        /// Bound target.
        target: Option<RenderTargetId>,
        /// Clear color applied after binding.
        clear: Option<Color>,
    },
    /// Text drawn by the glyph rasterizer.
    Text {
        /// Font used.
        font: FontId,
        /// The string.
        text: String,
        /// Left edge.
        x: f32,
        /// Top edge.
        y: f32,
        /// Pixel size.
        size: f32,
        /// Text color.
        color: Color,
    },
}

/// Shared, cloneable handle to a command list.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Arc<Mutex<Vec<GpuCommand>>>,
}

impl CommandLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn push(&self, command: GpuCommand) {
        self.commands.lock().push(command);
    }

    /// Removes and returns everything recorded so far.
    #[must_use]
    pub fn take(&self) -> Vec<GpuCommand> {
        std::mem::take(&mut *self.commands.lock())
    }

    /// Drops everything recorded so far.
    pub fn clear(&self) {
        self.commands.lock().clear();
    }

    /// Copies the recorded commands.
    #[must_use]
    pub fn snapshot(&self) -> Vec<GpuCommand> {
        self.commands.lock().clone()
    }

    /// Number of recorded commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.lock().len()
    }

    /// True if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.lock().is_empty()
    }

    /// Number of quad draws recorded.
    #[must_use]
    pub fn quad_draws(&self) -> usize {
        self.commands
            .lock()
            .iter()
            .filter(|c| matches!(c, GpuCommand::DrawQuad { .. }))
            .count()
    }

    /// The most recent scissor command, if any.
    #[must_use]
    pub fn last_scissor(&self) -> Option<Option<ScissorRect>> {
        self.commands.lock().iter().rev().find_map(|c| match c {
            GpuCommand::Scissor(s) => Some(*s),
            _ => None,
        })
    }
}

/// A [`GraphicsBackend`] that only records.
#[derive(Debug)]
pub struct RecordingBackend {
    log: CommandLog,
    next_texture: u32,
    next_target: u32,
}

impl RecordingBackend {
    /// Creates a backend and returns it with a handle to its log.
    #[must_use]
    pub fn create() -> (Self, CommandLog) {
        let log = CommandLog::new();
        let backend = Self {
            log: log.clone(),
            next_texture: 1,
            next_target: 1,
        };
        (backend, log)
    }
}

impl GraphicsBackend for RecordingBackend {
    fn create_pipeline(&mut self, desc: &PipelineDesc<'_>) -> RenderResult<()> {
        self.log.push(GpuCommand::CreatePipeline {
            index_count: desc.indices.len(),
        });
        Ok(())
    }

    fn upload_texture(&mut self, image: &ImageData) -> RenderResult<TextureId> {
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.log.push(GpuCommand::UploadTexture {
            id,
            width: image.width(),
            height: image.height(),
        });
        Ok(id)
    }

    fn begin_pass(&mut self, state: &PassState) {
        self.log.push(GpuCommand::BeginPass(*state));
    }

    fn end_pass(&mut self) {
        self.log.push(GpuCommand::EndPass);
    }

    fn draw_quad(&mut self, texture: TextureId, uniforms: &QuadUniforms) {
        self.log.push(GpuCommand::DrawQuad {
            texture,
            uniforms: *uniforms,
        });
    }

    fn draw_fan(&mut self, vertices: &[FanVertex]) {
        self.log.push(GpuCommand::DrawFan {
            vertices: vertices.to_vec(),
        });
    }

    fn set_scissor(&mut self, scissor: Option<ScissorRect>) {
        self.log.push(GpuCommand::Scissor(scissor));
    }

    fn create_render_target(&mut self, width: u32, height: u32) -> RenderResult<RenderTargetId> {
        let id = RenderTargetId(self.next_target);
        self.next_target += 1;
        self.log.push(GpuCommand::CreateTarget { id, width, height });
        Ok(id)
    }

    fn bind_render_target(&mut self, target: Option<RenderTargetId>, clear: Option<Color>) {
        self.log.push(GpuCommand::BindTarget { target, clear });
    }
}
