//! # Trellis Render
//!
//! The draw layer under the Trellis widget toolkit.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        Renderer                          │
//! ├──────────────────────────────────────────────────────────┤
//! │  draw / rectangle / nine_patch ──► GraphicsBackend quad   │
//! │  color_wheel ──── end() ─────────► GraphicsBackend fan    │
//! │  text ─────────── end() ─────────► GlyphRasterizer        │
//! │  clip_start / clip_end ──────────► scissor (Y flipped)    │
//! └──────────────────────────────────────────────────────────┘
//!            ▲                                   ▲
//!     OutputTarget (Viewport,           RecordingBackend +
//!     ProjectedSurface)                 MonospaceGlyphs (headless)
//! ```
//!
//! The GPU API, font rasterizer and image decoder are host-provided through
//! [`GraphicsBackend`], [`GlyphRasterizer`] and [`TextureLoader`].

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod backend;
pub mod color;
pub mod error;
pub mod geometry;
pub mod glyph;
pub mod nine_patch;
pub mod output;
pub mod recorder;
pub mod renderer;
pub mod shaders;
pub mod texture;

pub use backend::{
    FanVertex, GraphicsBackend, PassState, PipelineDesc, QuadUniforms, QuadVertex,
    RenderTargetId, ScissorRect,
};
pub use color::Color;
pub use error::{RenderError, RenderResult};
pub use geometry::Rect;
pub use glyph::{FontId, GlyphRasterizer, MonospaceGlyphs};
pub use nine_patch::{NinePatch, NineSlice, NineSlices};
pub use output::{OutputTarget, PointerSample, ProjectedSurface, SurfaceProjector, Viewport};
pub use recorder::{CommandLog, GpuCommand, RecordingBackend};
pub use renderer::{RenderStats, Renderer};
pub use texture::{ImageData, MemoryImages, Texture, TextureId, TextureLoader};
