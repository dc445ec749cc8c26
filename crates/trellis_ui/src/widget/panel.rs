//! Container widget.

use trellis_render::{Color, Rect, Renderer};

use super::core::{component, Behavior, WidgetContext};
use crate::layout::Layout;
use crate::style::regions;

/// Owns children and optionally lays them out.
///
/// Child order is both draw order and layout order. Children are stored in
/// the [`WidgetTree`](super::WidgetTree); the panel only keeps its layout.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Layout applied to the children every update.
    pub layout: Option<Layout>,
    /// Draw the `Panel` nine-patch behind the children.
    pub background: bool,
}

impl Panel {
    /// A panel with a background and no layout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layout: None,
            background: true,
        }
    }

    /// A panel with a background and `layout`.
    #[must_use]
    pub fn with_layout(layout: Layout) -> Self {
        Self {
            layout: Some(layout),
            background: true,
        }
    }

    /// Hides the background.
    #[must_use]
    pub fn transparent(mut self) -> Self {
        self.background = false;
        self
    }

    /// Area children are laid into, in the panel's own space.
    #[must_use]
    pub fn content_bounds(bounds: Rect) -> Rect {
        Rect::new(1.0, 1.0, bounds.width - 2.0, bounds.height - 2.0)
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::new()
    }
}

impl Behavior for Panel {
    fn render(&mut self, ctx: &WidgetContext<'_>, renderer: &mut Renderer) {
        if !self.background || ctx.style.is_none() {
            return;
        }
        if let Some(patch) = ctx.patch(regions::PANEL) {
            renderer.nine_patch(patch, ctx.draw_bounds, Color::WHITE, false);
        }
    }
}

component!(Panel, 50.0, 50.0, auto_size = false);
