//! Two-state toggle with a caption.

use trellis_render::{Color, Rect, Renderer};

use super::core::{component, Behavior, Listeners, WidgetContext, WidgetId};
use super::label::Label;
use crate::event::{Event, EventStatus};
use crate::style::regions;

/// A box that toggles on a complete press and release inside it.
#[derive(Debug)]
pub struct CheckBox {
    /// Caption, drawn right of the box.
    pub label: Label,
    /// Called with the previous value whenever `checked` flips.
    pub change_listeners: Listeners<bool>,
    checked: bool,
    pressed: bool,
    preferred: Option<(f32, f32)>,
}

impl CheckBox {
    /// Creates an unchecked box.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            label: Label::new(text),
            change_listeners: Listeners::new(),
            checked: false,
            pressed: false,
            preferred: None,
        }
    }

    /// Adds a change listener.
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(WidgetId, &bool) + 'static) -> Self {
        self.change_listeners.add(listener);
        self
    }

    /// Current value.
    #[must_use]
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Sets the value, notifying listeners only if it changes.
    pub fn set_checked(&mut self, checked: bool) {
        if checked != self.checked {
            let prev = self.checked;
            self.checked = checked;
            self.change_listeners.emit(&prev);
        }
    }

    /// Box size in output pixels for text of size `(w, h)`.
    fn icon_size(ctx: &WidgetContext<'_>, text: (f32, f32)) -> Option<(f32, f32)> {
        let patch = ctx.style?.texture(regions::CHECKBOX_NORMAL)?;
        let (pw, ph) = (patch.width(), patch.height());
        let ratio = text.0.max(text.1) / pw.max(ph).max(1.0);
        Some(((pw * ratio).min(pw), (ph * ratio).min(ph)))
    }
}

impl Default for CheckBox {
    fn default() -> Self {
        Self::new("")
    }
}

impl Behavior for CheckBox {
    fn update(&mut self, ctx: &WidgetContext<'_>, renderer: &Renderer, _dt: f32) {
        if ctx.style.is_none() {
            self.preferred = None;
            return;
        }
        let (w, h) = self.label.measure(ctx, renderer);
        let (iw, _) = Self::icon_size(ctx, (w, h)).unwrap_or((0.0, 0.0));
        let padding = self.label.padding;
        self.preferred = Some((
            (w + iw) / ctx.scale.0 + padding.horizontal(),
            h / ctx.scale.1 + padding.vertical(),
        ));
    }

    fn preferred_size(&self) -> Option<(f32, f32)> {
        self.preferred
    }

    fn render(&mut self, ctx: &WidgetContext<'_>, renderer: &mut Renderer) {
        let (box_region, mark_region) = if ctx.enabled {
            (regions::CHECKBOX_NORMAL, regions::CHECKBOX_MARK_NORMAL)
        } else {
            (regions::CHECKBOX_DISABLED, regions::CHECKBOX_MARK_DISABLED)
        };
        let Some(icon) = ctx.patch(box_region) else {
            return;
        };

        let text = self.label.measure(ctx, renderer);
        let (iw, ih) = Self::icon_size(ctx, text).unwrap_or((icon.width(), icon.height()));
        let nb = ctx.draw_bounds;
        let icon_bounds = Rect::new(nb.x + 1.0, nb.y + (nb.height / 2.0 - ih / 2.0), iw, ih);
        renderer.nine_patch(icon, icon_bounds, Color::WHITE, false);
        if self.checked {
            if let Some(mark) = ctx.patch(mark_region) {
                renderer.nine_patch(mark, icon_bounds, Color::WHITE, false);
            }
        }

        let text_bounds = Rect::new(nb.x + iw, nb.y, nb.width - iw * 2.0, nb.height);
        self.label.draw_text(ctx, renderer, text_bounds);
    }

    fn handle_event(&mut self, ctx: &WidgetContext<'_>, event: &Event) -> EventStatus {
        if let Event::MouseButton(e) = event {
            if !ctx.enabled || !ctx.hit(e.x, e.y) {
                self.pressed = false;
            } else if e.pressed {
                self.pressed = true;
            } else if self.pressed {
                self.pressed = false;
                self.set_checked(!self.checked);
            }
        }
        EventStatus::Available
    }

    fn set_owner(&mut self, id: WidgetId) {
        self.change_listeners.set_owner(id);
    }
}

component!(CheckBox, 190.0, 32.0, auto_size = true);
