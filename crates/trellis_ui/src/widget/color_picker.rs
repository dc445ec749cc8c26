//! HSV color wheel.

use std::f32::consts::TAU;

use trellis_render::{Color, Rect, Renderer};

use super::core::{component, Behavior, Listeners, WidgetContext, WidgetId};
use crate::event::{Event, EventStatus};
use crate::input::MouseButton;
use crate::style::regions;

/// Picks hue and saturation on a wheel; value is set programmatically.
///
/// Each component has its own listener list, called with the previous
/// component value when it changes.
#[derive(Debug)]
pub struct ColorPicker {
    /// Space between the wheel and the widget edge, in virtual units.
    pub padding: f32,
    /// Hue change listeners.
    pub hue_listeners: Listeners<f32>,
    /// Saturation change listeners.
    pub saturation_listeners: Listeners<f32>,
    /// Value change listeners.
    pub value_listeners: Listeners<f32>,
    hue: f32,
    saturation: f32,
    value: f32,
    dragging: bool,
}

impl ColorPicker {
    /// Creates a picker showing `color`.
    #[must_use]
    pub fn new(color: Color) -> Self {
        let (hue, saturation, value) = color.to_hsv();
        Self {
            padding: 6.0,
            hue_listeners: Listeners::new(),
            saturation_listeners: Listeners::new(),
            value_listeners: Listeners::new(),
            hue,
            saturation,
            value,
            dragging: false,
        }
    }

    /// Hue in `[0, 1)`.
    #[must_use]
    pub fn hue(&self) -> f32 {
        self.hue
    }

    /// Saturation in `[0, 1]`.
    #[must_use]
    pub fn saturation(&self) -> f32 {
        self.saturation
    }

    /// Value in `[0, 1]`.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Sets the hue.
    pub fn set_hue(&mut self, hue: f32) {
        Self::assign(&mut self.hue, hue, &mut self.hue_listeners);
    }

    /// Sets the saturation.
    pub fn set_saturation(&mut self, saturation: f32) {
        Self::assign(&mut self.saturation, saturation, &mut self.saturation_listeners);
    }

    /// Sets the value.
    pub fn set_value(&mut self, value: f32) {
        Self::assign(&mut self.value, value, &mut self.value_listeners);
    }

    /// The selected color.
    #[must_use]
    pub fn color(&self) -> Color {
        Color::from_hsv(self.hue, self.saturation, self.value)
    }

    /// Selects `color`, notifying each component that changes.
    pub fn set_color(&mut self, color: Color) {
        let (h, s, v) = color.to_hsv();
        self.set_hue(h);
        self.set_saturation(s);
        self.set_value(v);
    }

    #[allow(clippy::float_cmp)]
    fn assign(slot: &mut f32, value: f32, listeners: &mut Listeners<f32>) {
        if value != *slot {
            let prev = *slot;
            *slot = value;
            listeners.emit(&prev);
        }
    }

    /// Wheel center and radius in output pixels.
    fn wheel(&self, ctx: &WidgetContext<'_>) -> ((f32, f32), f32) {
        let b = ctx.draw_bounds;
        let size = b.width.min(b.height) - self.padding * ctx.scale.0 * 2.0;
        (b.center(), size / 2.0)
    }

    fn pick(&mut self, ctx: &WidgetContext<'_>, x: f32, y: f32) {
        let ((cx, cy), radius) = self.wheel(ctx);
        if radius <= 0.0 {
            return;
        }
        let (dx, dy) = (x - cx, y - cy);
        let dist = dx.hypot(dy);
        let degrees = dy.atan2(dx).to_degrees();
        self.set_saturation((dist / radius).max(0.0).min(1.0));
        self.set_hue(((degrees + 360.0) % 360.0) / 360.0);
    }
}

impl Default for ColorPicker {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

impl Behavior for ColorPicker {
    fn render(&mut self, ctx: &WidgetContext<'_>, renderer: &mut Renderer) {
        if let Some(panel) = ctx.patch(regions::PANEL) {
            renderer.nine_patch(panel, ctx.draw_bounds, Color::WHITE, false);
        }

        let (center, radius) = self.wheel(ctx);
        renderer.color_wheel(
            center,
            radius,
            ctx.config.wheel_resolution,
            self.value,
            !ctx.enabled,
        );

        let Some(dot) = ctx.patch(regions::DOT) else {
            return;
        };
        let aspect = ctx.virtual_aspect();
        let (dw, dh) = (dot.width() / aspect, dot.height() / aspect);
        let angle = self.hue * TAU;
        let reach = radius * self.saturation.max(0.0).min(1.0);
        let x = center.0 + angle.cos() * reach;
        let y = center.1 + angle.sin() * reach;
        renderer.nine_patch(
            dot,
            Rect::new(x - dw / 2.0, y - dh / 2.0, dw, dh),
            Color::WHITE,
            !ctx.enabled,
        );
    }

    fn handle_event(&mut self, ctx: &WidgetContext<'_>, event: &Event) -> EventStatus {
        match event {
            Event::MouseButton(e) => {
                let left = e.button == MouseButton::Left;
                if left && ctx.hit(e.x, e.y) {
                    self.dragging = true;
                    self.pick(ctx, e.x, e.y);
                } else {
                    self.dragging = false;
                }
                if !e.pressed || !left {
                    self.dragging = false;
                }
            }
            Event::MouseMotion(e) => {
                if self.dragging && ctx.hit(e.x, e.y) {
                    self.pick(ctx, e.x, e.y);
                } else {
                    self.dragging = false;
                }
            }
            _ => {}
        }
        EventStatus::Available
    }

    fn set_owner(&mut self, id: WidgetId) {
        self.hue_listeners.set_owner(id);
        self.saturation_listeners.set_owner(id);
        self.value_listeners.set_owner(id);
    }
}

component!(ColorPicker, 70.0, 70.0, auto_size = false);
