//! Static text with an optional icon.

use trellis_render::{FontId, Rect, Renderer, Texture};

use super::core::{component, Behavior, WidgetContext};
use crate::layout::Margin;

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    /// Against the left padding.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Against the right padding.
    Right,
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    /// Against the top padding.
    Top,
    /// Centered.
    #[default]
    Middle,
    /// Against the bottom padding.
    Bottom,
}

/// Text alignment on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextAlign {
    /// Horizontal part.
    pub horizontal: HAlign,
    /// Vertical part.
    pub vertical: VAlign,
}

impl TextAlign {
    /// Left and vertically centered.
    pub const LEFT: Self = Self::new(HAlign::Left, VAlign::Middle);
    /// Centered on both axes.
    pub const CENTER: Self = Self::new(HAlign::Center, VAlign::Middle);

    /// Creates an alignment.
    #[must_use]
    pub const fn new(horizontal: HAlign, vertical: VAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Top-left corner for a `size` block inside `bounds`.
    ///
    /// Centered axes ignore padding, as the text is meant to sit on the
    /// visual middle of the widget.
    #[must_use]
    pub fn place(self, bounds: Rect, size: (f32, f32), padding: Margin) -> (f32, f32) {
        let (w, h) = size;
        let x = bounds.x
            + match self.horizontal {
                HAlign::Left => padding.left,
                HAlign::Center => bounds.width / 2.0 - w / 2.0,
                HAlign::Right => (bounds.width - w) - padding.right,
            };
        let y = bounds.y
            + match self.vertical {
                VAlign::Top => padding.top,
                VAlign::Middle => bounds.height / 2.0 - h / 2.0,
                VAlign::Bottom => (bounds.height - h) - padding.bottom,
            };
        (x, y)
    }
}

/// Scales a padding authored in virtual units to output pixels.
pub(crate) fn scaled_padding(padding: Margin, scale: (f32, f32)) -> Margin {
    Margin::new(
        padding.left * scale.0,
        padding.right * scale.0,
        padding.bottom * scale.1,
        padding.top * scale.1,
    )
}

/// A string on the screen.
#[derive(Debug, Clone)]
pub struct Label {
    /// The text.
    pub text: String,
    /// Where the text sits.
    pub text_align: TextAlign,
    /// Optional icon.
    pub icon: Option<Texture>,
    /// Horizontal placement of the icon.
    pub icon_align: HAlign,
    /// Font override; the style font otherwise.
    pub font: Option<FontId>,
    /// Point size in virtual units.
    pub font_size: f32,
    /// Inner spacing in virtual units.
    pub padding: Margin,
    preferred: Option<(f32, f32)>,
}

impl Label {
    /// Creates a left-aligned label.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            text_align: TextAlign::LEFT,
            icon: None,
            icon_align: HAlign::Center,
            font: None,
            font_size: 8.0,
            padding: Margin::uniform(4.0),
            preferred: None,
        }
    }

    /// Sets the alignment.
    #[must_use]
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.text_align = align;
        self
    }

    /// Sets an icon drawn behind the text.
    #[must_use]
    pub fn with_icon(mut self, icon: Texture, align: HAlign) -> Self {
        self.icon = Some(icon);
        self.icon_align = align;
        self
    }

    /// Font to draw with in `ctx`.
    pub(crate) fn font_in(&self, ctx: &WidgetContext<'_>) -> FontId {
        self.font
            .or_else(|| ctx.style.map(crate::style::Style::font))
            .unwrap_or_default()
    }

    /// Measures the text in output pixels.
    pub(crate) fn measure(&self, ctx: &WidgetContext<'_>, renderer: &Renderer) -> (f32, f32) {
        renderer.text_size(self.font_in(ctx), &self.text, self.font_size)
    }

    /// Draws the text aligned inside `bounds`.
    pub(crate) fn draw_text(&self, ctx: &WidgetContext<'_>, renderer: &mut Renderer, bounds: Rect) {
        let Some(style) = ctx.style else {
            return;
        };
        if self.text.is_empty() {
            return;
        }
        let font = self.font_in(ctx);
        let size = renderer.text_size(font, &self.text, self.font_size);
        let padding = scaled_padding(self.padding, ctx.scale);
        let (x, y) = self.text_align.place(bounds, size, padding);
        renderer.text(
            font,
            &self.text,
            x,
            y,
            self.font_size,
            style.text_color(ctx.enabled),
        );
    }

    fn draw_icon(&self, ctx: &WidgetContext<'_>, renderer: &mut Renderer) {
        let Some(icon) = self.icon else {
            return;
        };
        let b = ctx.draw_bounds;
        let (img_w, img_h) = (icon.width_f(), icon.height_f());
        let ratio = b.width.min(b.height) / img_w.max(img_h).max(1.0);
        let iw = (img_w * ratio).min(img_w);
        let ih = (img_h * ratio).min(img_h);
        let padding = scaled_padding(self.padding, ctx.scale);

        let x = b.x
            + match self.icon_align {
                HAlign::Left => padding.left,
                HAlign::Center => b.width / 2.0 - iw / 2.0,
                HAlign::Right => (b.width - iw) - padding.right,
            };
        let y = b.y + (b.height / 2.0 - ih / 2.0);
        renderer.draw(
            &icon,
            x,
            y,
            iw,
            ih,
            [0.0, 0.0, 1.0, 1.0],
            trellis_render::Color::WHITE,
            !ctx.enabled,
        );
    }
}

impl Default for Label {
    fn default() -> Self {
        Self::new("")
    }
}

impl Behavior for Label {
    fn update(&mut self, ctx: &WidgetContext<'_>, renderer: &Renderer, _dt: f32) {
        if ctx.style.is_none() {
            self.preferred = None;
            return;
        }
        let (w, h) = self.measure(ctx, renderer);
        self.preferred = Some((
            w / ctx.scale.0 + self.padding.horizontal(),
            h / ctx.scale.1 + self.padding.vertical(),
        ));
    }

    fn preferred_size(&self) -> Option<(f32, f32)> {
        self.preferred
    }

    fn render(&mut self, ctx: &WidgetContext<'_>, renderer: &mut Renderer) {
        self.draw_text(ctx, renderer, ctx.draw_bounds);
        self.draw_icon(ctx, renderer);
    }
}

component!(Label, 190.0, 32.0, auto_size = true);

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Rect = Rect::new(10.0, 20.0, 100.0, 40.0);

    #[test]
    fn test_alignment_corners() {
        let padding = Margin::uniform(4.0);
        let size = (30.0, 10.0);

        let top_left = TextAlign::new(HAlign::Left, VAlign::Top).place(BOUNDS, size, padding);
        assert_eq!(top_left, (14.0, 24.0));

        let bottom_right =
            TextAlign::new(HAlign::Right, VAlign::Bottom).place(BOUNDS, size, padding);
        assert_eq!(bottom_right, (76.0, 46.0));
    }

    #[test]
    fn test_center_ignores_padding() {
        let padding = Margin::uniform(9.0);
        let (x, y) = TextAlign::CENTER.place(BOUNDS, (30.0, 10.0), padding);
        assert_eq!((x, y), (45.0, 35.0));
    }

    #[test]
    fn test_defaults() {
        let label = Label::new("hi");
        assert_eq!(label.text_align, TextAlign::LEFT);
        assert_eq!(label.font_size, 8.0);
        assert_eq!(label.padding, Margin::uniform(4.0));
        assert_eq!(label.preferred_size(), None);
    }
}
