//! Output targets.
//!
//! A target is where a frame lands and the space the pointer is reported in.
//! [`Viewport`] draws straight into the window; [`ProjectedSurface`] draws
//! into an off-screen target that the host composites onto a 3D object, and
//! recovers the pointer by projecting it onto that object.

use tracing::debug;

use crate::backend::{GraphicsBackend, RenderTargetId};
use crate::color::Color;
use crate::error::RenderResult;

/// Pointer position in a target's pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// X in target pixels.
    pub x: f32,
    /// Y in target pixels, top-left origin.
    pub y: f32,
    /// False when the pointer is not over the target.
    pub on_surface: bool,
}

/// Something the UI can be drawn into.
pub trait OutputTarget {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Top-left corner of the target inside the window.
    fn viewport_origin(&self) -> (f32, f32) {
        (0.0, 0.0)
    }

    /// Maps a window pointer position into target pixels.
    fn pointer_position(&mut self, window_x: f32, window_y: f32) -> PointerSample;

    /// Redirects drawing to this target.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot provide the target.
    fn bind(&mut self, backend: &mut dyn GraphicsBackend) -> RenderResult<()>;

    /// Finishes drawing into this target.
    fn unbind(&mut self, backend: &mut dyn GraphicsBackend);
}

/// A rectangle of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    x: f32,
    y: f32,
    width: u32,
    height: u32,
}

impl Viewport {
    /// A viewport covering a `width` x `height` window.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    /// Moves the viewport inside the window.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Changes the viewport size after a window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl OutputTarget for Viewport {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn viewport_origin(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    fn pointer_position(&mut self, window_x: f32, window_y: f32) -> PointerSample {
        PointerSample {
            x: window_x - self.x,
            y: window_y - self.y,
            on_surface: true,
        }
    }

    fn bind(&mut self, backend: &mut dyn GraphicsBackend) -> RenderResult<()> {
        backend.bind_render_target(None, None);
        Ok(())
    }

    fn unbind(&mut self, _backend: &mut dyn GraphicsBackend) {}
}

/// Host hook for UI drawn onto a 3D object.
pub trait SurfaceProjector {
    /// Casts the window pointer at the object and returns the hit in surface
    /// UV space (`0..=1`, bottom-left origin), or `None` on a miss.
    fn project(&mut self, window_x: f32, window_y: f32) -> Option<(f32, f32)>;

    /// Called after each frame with the finished target.
    fn present(&mut self, target: RenderTargetId);
}

/// Off-screen target mapped onto a 3D surface.
#[derive(Debug)]
pub struct ProjectedSurface<P> {
    width: u32,
    height: u32,
    target: Option<RenderTargetId>,
    clear: Color,
    last: (f32, f32),
    projector: P,
}

impl<P: SurfaceProjector> ProjectedSurface<P> {
    /// Creates a surface of `width` x `height` pixels.
    ///
    /// The backend target is allocated on first bind.
    #[must_use]
    pub fn new(width: u32, height: u32, projector: P) -> Self {
        Self {
            width,
            height,
            target: None,
            clear: Color::TRANSPARENT,
            last: (0.0, 0.0),
            projector,
        }
    }

    /// Sets the color the target is cleared to each frame.
    #[must_use]
    pub fn with_clear(mut self, clear: Color) -> Self {
        self.clear = clear;
        self
    }

    /// The backend target, once bound.
    #[must_use]
    pub fn target(&self) -> Option<RenderTargetId> {
        self.target
    }

    /// The projector.
    pub fn projector_mut(&mut self) -> &mut P {
        &mut self.projector
    }
}

impl<P: SurfaceProjector> OutputTarget for ProjectedSurface<P> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[allow(clippy::cast_precision_loss)]
    fn pointer_position(&mut self, window_x: f32, window_y: f32) -> PointerSample {
        match self.projector.project(window_x, window_y) {
            Some((u, v)) => {
                let x = u * self.width as f32;
                let y = (1.0 - v) * self.height as f32;
                self.last = (x, y);
                PointerSample {
                    x,
                    y,
                    on_surface: true,
                }
            }
            None => PointerSample {
                x: self.last.0,
                y: self.last.1,
                on_surface: false,
            },
        }
    }

    fn bind(&mut self, backend: &mut dyn GraphicsBackend) -> RenderResult<()> {
        let target = match self.target {
            Some(target) => target,
            None => {
                let target = backend.create_render_target(self.width, self.height)?;
                debug!(
                    "Created {}x{} surface target {:?}",
                    self.width, self.height, target
                );
                self.target = Some(target);
                target
            }
        };
        backend.bind_render_target(Some(target), Some(self.clear));
        Ok(())
    }

    fn unbind(&mut self, backend: &mut dyn GraphicsBackend) {
        backend.bind_render_target(None, None);
        if let Some(target) = self.target {
            self.projector.present(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::{GpuCommand, RecordingBackend};

    struct FixedHit {
        hit: Option<(f32, f32)>,
        presented: Vec<RenderTargetId>,
    }

    impl SurfaceProjector for FixedHit {
        fn project(&mut self, _x: f32, _y: f32) -> Option<(f32, f32)> {
            self.hit
        }

        fn present(&mut self, target: RenderTargetId) {
            self.presented.push(target);
        }
    }

    #[test]
    fn test_viewport_offsets_pointer() {
        let mut viewport = Viewport::new(640, 480).at(100.0, 50.0);
        let sample = viewport.pointer_position(150.0, 70.0);
        assert_eq!(sample.x, 50.0);
        assert_eq!(sample.y, 20.0);
        assert!(sample.on_surface);
    }

    #[test]
    fn test_projected_surface_flips_v_and_remembers_last_hit() {
        let projector = FixedHit {
            hit: Some((0.25, 0.75)),
            presented: Vec::new(),
        };
        let mut surface = ProjectedSurface::new(200, 100, projector);

        let hit = surface.pointer_position(0.0, 0.0);
        assert_eq!((hit.x, hit.y), (50.0, 25.0));
        assert!(hit.on_surface);

        surface.projector_mut().hit = None;
        let miss = surface.pointer_position(0.0, 0.0);
        assert_eq!((miss.x, miss.y), (50.0, 25.0));
        assert!(!miss.on_surface);
    }

    #[test]
    fn test_projected_surface_creates_target_once_and_presents() {
        let (mut backend, log) = RecordingBackend::create();
        let projector = FixedHit {
            hit: None,
            presented: Vec::new(),
        };
        let mut surface = ProjectedSurface::new(64, 32, projector);

        surface.bind(&mut backend).unwrap();
        surface.unbind(&mut backend);
        surface.bind(&mut backend).unwrap();
        surface.unbind(&mut backend);

        let creates = log
            .snapshot()
            .iter()
            .filter(|c| matches!(c, GpuCommand::CreateTarget { .. }))
            .count();
        assert_eq!(creates, 1);
        let target = surface.target().unwrap();
        assert_eq!(surface.projector_mut().presented, vec![target, target]);
    }
}
