//! Value slider.

use trellis_render::{Color, Rect, Renderer};

use super::core::{component, Behavior, Listeners, PointerState, WidgetContext, WidgetId};
use crate::event::{Event, EventStatus};
use crate::style::regions;

/// A closed numeric interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    /// Lower end.
    pub min: f32,
    /// Upper end.
    pub max: f32,
}

impl Range {
    /// Creates a range.
    #[must_use]
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Clamps `value` into the range.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        self.min.max(self.max.min(value))
    }

    /// Maps `value` to `[0, 1]`. An empty range maps everything to 0.
    #[must_use]
    pub fn normalized(&self, value: f32) -> f32 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / span
    }

    /// Maps a ratio back into the range.
    #[must_use]
    pub fn unnormalized(&self, ratio: f32) -> f32 {
        self.clamp(ratio * self.delta() + self.min)
    }

    /// Length of the range.
    #[must_use]
    pub fn delta(&self) -> f32 {
        (self.max - self.min).abs()
    }
}

/// Rounds half-way cases to the nearest even integer.
#[allow(clippy::float_cmp)]
fn round_half_even(x: f32) -> f32 {
    let rounded = x.round();
    if (x - x.trunc()).abs() == 0.5 && rounded % 2.0 != 0.0 {
        rounded - x.signum()
    } else {
        rounded
    }
}

/// Snaps `value` to the nearest multiple of `step`.
#[must_use]
pub fn round_partial(value: f32, step: f32) -> f32 {
    if step == 0.0 {
        return value;
    }
    round_half_even(value / step) * step
}

/// Slider direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Minimum at the left.
    #[default]
    Horizontal,
    /// Minimum at the top; the wheel moves it the other way.
    Vertical,
}

/// A thumb dragged along a track.
#[derive(Debug)]
pub struct Slider {
    /// Allowed values.
    pub range: Range,
    /// Wheel increment, thumb size and snapping resolution.
    pub step: f32,
    /// Snap pointer-driven values to multiples of `step`.
    pub rounded: bool,
    /// Direction of the track.
    pub orientation: Orientation,
    /// Called with the previous value whenever the value changes.
    pub change_listeners: Listeners<f32>,
    value: f32,
    pointer: PointerState,
    thumb: Rect,
}

impl Slider {
    /// Creates a horizontal slider over `[min, max]`.
    #[must_use]
    pub fn new(min: f32, max: f32, step: f32) -> Self {
        Self {
            range: Range::new(min, max),
            step,
            rounded: false,
            orientation: Orientation::Horizontal,
            change_listeners: Listeners::new(),
            value: min,
            pointer: PointerState::default(),
            thumb: Rect::new(0.0, 0.0, 1.0, 1.0),
        }
    }

    /// Enables snapping.
    #[must_use]
    pub fn rounded(mut self) -> Self {
        self.rounded = true;
        self
    }

    /// Makes the slider vertical.
    #[must_use]
    pub fn vertical(mut self) -> Self {
        self.orientation = Orientation::Vertical;
        self
    }

    /// Adds a change listener.
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(WidgetId, &f32) + 'static) -> Self {
        self.change_listeners.add(listener);
        self
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Sets the value, clamped to the range. Listeners run only on change.
    #[allow(clippy::float_cmp)]
    pub fn set_value(&mut self, value: f32) {
        let value = self.range.clamp(value);
        if value != self.value {
            let prev = self.value;
            self.value = value;
            self.change_listeners.emit(&prev);
        }
    }

    /// Thumb rect in output pixels as of the last update.
    #[must_use]
    pub fn thumb(&self) -> Rect {
        self.thumb
    }

    /// Hover and press flags.
    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }

    fn along(&self, rect: Rect) -> (f32, f32) {
        match self.orientation {
            Orientation::Horizontal => (rect.x, rect.width),
            Orientation::Vertical => (rect.y, rect.height),
        }
    }

    fn thumb_size(&self, ctx: &WidgetContext<'_>) -> f32 {
        let (_, size) = self.along(ctx.draw_bounds);
        let delta = self.range.delta();
        let proportional = if delta > 0.0 {
            size * self.step / delta
        } else {
            size
        };
        let texture = ctx
            .style
            .and_then(|style| style.texture(regions::SLIDER_THUMB_NORMAL))
            .map_or(0.0, |patch| match self.orientation {
                Orientation::Horizontal => patch.width(),
                Orientation::Vertical => patch.height(),
            });
        proportional.max(texture + 2.0)
    }

    fn track_size(&self, ctx: &WidgetContext<'_>) -> f32 {
        self.along(ctx.draw_bounds).1.trunc()
    }

    /// Moves the value to the pointer coordinate `p` along the track.
    fn drag_to(&mut self, ctx: &WidgetContext<'_>, p: f32) {
        let thumb = self.thumb_size(ctx);
        let track = self.track_size(ctx);
        let (start, _) = self.along(ctx.draw_bounds);

        let travel = Range::new(thumb / 2.0, track - thumb / 2.0);
        let offset = (p - start).max(0.0).min(track);
        let value = self.range.unnormalized(travel.normalized(offset));
        self.set_value(if self.rounded {
            round_partial(value, self.step)
        } else {
            value
        });
    }

    fn pointer_coord(&self, x: f32, y: f32) -> f32 {
        match self.orientation {
            Orientation::Horizontal => x,
            Orientation::Vertical => y,
        }
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new(0.0, 100.0, 10.0)
    }
}

impl Behavior for Slider {
    fn update(&mut self, ctx: &WidgetContext<'_>, _renderer: &Renderer, _dt: f32) {
        self.value = self.range.clamp(self.value);
        let thumb = self.thumb_size(ctx);
        let travel = Range::new(thumb / 2.0, self.track_size(ctx) - thumb / 2.0);
        let pos = self.range.normalized(self.value) * travel.delta();

        let b = ctx.draw_bounds;
        self.thumb = match self.orientation {
            Orientation::Horizontal => Rect::new(pos + b.x, b.y, thumb, b.height),
            Orientation::Vertical => Rect::new(b.x, pos + b.y, b.width, thumb),
        };
    }

    fn render(&mut self, ctx: &WidgetContext<'_>, renderer: &mut Renderer) {
        let (track, thumb) = if !ctx.enabled {
            (regions::SLIDER_TRACK_DISABLED, regions::SLIDER_THUMB_DISABLED)
        } else if self.pointer.pressed {
            (regions::SLIDER_TRACK_NORMAL, regions::SLIDER_THUMB_CLICK)
        } else if self.pointer.hovered {
            (regions::SLIDER_TRACK_NORMAL, regions::SLIDER_THUMB_HOVER)
        } else {
            (regions::SLIDER_TRACK_NORMAL, regions::SLIDER_THUMB_NORMAL)
        };
        if let (Some(track), Some(thumb)) = (ctx.patch(track), ctx.patch(thumb)) {
            renderer.nine_patch(track, ctx.draw_bounds, Color::WHITE, false);
            renderer.nine_patch(thumb, self.thumb, Color::WHITE, false);
        }
    }

    fn handle_event(&mut self, ctx: &WidgetContext<'_>, event: &Event) -> EventStatus {
        match event {
            Event::Scroll { delta } if ctx.focused => {
                let step = delta * self.step;
                match self.orientation {
                    Orientation::Horizontal => self.set_value(self.value + step),
                    Orientation::Vertical => self.set_value(self.value - step),
                }
                return EventStatus::Consumed;
            }
            Event::MouseButton(e) => {
                if ctx.hit(e.x, e.y) {
                    self.pointer.pressed = e.pressed;
                    if e.pressed {
                        self.pointer.hovered = true;
                        self.drag_to(ctx, self.pointer_coord(e.x, e.y));
                    }
                } else {
                    self.pointer.pressed = false;
                }
                if !e.pressed {
                    self.pointer.reset();
                }
            }
            Event::MouseMotion(e) => {
                if ctx.hit(e.x, e.y) {
                    self.pointer.hovered = true;
                } else if !self.pointer.pressed {
                    self.pointer.hovered = false;
                }
                if self.pointer.pressed {
                    self.drag_to(ctx, self.pointer_coord(e.x, e.y));
                }
            }
            _ => {}
        }
        EventStatus::Available
    }

    fn set_owner(&mut self, id: WidgetId) {
        self.change_listeners.set_owner(id);
    }
}

component!(Slider, 120.0, 9.0, auto_size = false);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{MouseButtonEvent, MouseMotionEvent};
    use crate::input::{Modifiers, MouseButton};
    use crate::testing::context;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn press(x: f32) -> Event {
        Event::MouseButton(MouseButtonEvent {
            button: MouseButton::Left,
            pressed: true,
            x,
            y: 5.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn test_range_helpers() {
        let range = Range::new(0.0, 100.0);
        assert_eq!(range.clamp(150.0), 100.0);
        assert_eq!(range.normalized(25.0), 0.25);
        assert_eq!(range.unnormalized(0.5), 50.0);
        assert_eq!(range.delta(), 100.0);
        assert_eq!(Range::new(3.0, 3.0).normalized(3.0), 0.0);
    }

    #[test]
    fn test_round_partial_half_even() {
        assert_eq!(round_partial(14.0, 10.0), 10.0);
        assert_eq!(round_partial(16.0, 10.0), 20.0);
        assert_eq!(round_partial(25.0, 10.0), 20.0);
        assert_eq!(round_partial(35.0, 10.0), 40.0);
        assert_eq!(round_partial(-25.0, 10.0), -20.0);
    }

    #[test]
    fn test_set_value_clamps_and_round_trips() {
        let mut slider = Slider::default();
        slider.set_value(42.5);
        assert_eq!(slider.value(), 42.5);
        slider.set_value(500.0);
        assert_eq!(slider.value(), 100.0);
        slider.set_value(-1.0);
        assert_eq!(slider.value(), 0.0);
    }

    #[test]
    fn test_listeners_get_previous_value() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut slider = Slider::default().on_change(move |_, prev| sink.borrow_mut().push(*prev));

        slider.set_value(30.0);
        slider.set_value(30.0);
        slider.set_value(40.0);
        assert_eq!(*seen.borrow(), vec![0.0, 30.0]);
    }

    #[test]
    fn test_press_jumps_to_pointer() {
        let config = crate::TuiConfig::default();
        // No style: thumb is max(100 * 10 / 100, 2) = 10 wide, travel [5, 95].
        let ctx = context(&config, 0.0, 0.0, 100.0, 10.0);
        let mut slider = Slider::default();

        slider.handle_event(&ctx, &press(50.0));
        assert_eq!(slider.value(), 50.0);
        assert!(slider.pointer().pressed);

        slider.handle_event(&ctx, &press(0.5));
        assert_eq!(slider.value(), 0.0);
        slider.handle_event(&ctx, &press(99.0));
        assert_eq!(slider.value(), 100.0);
    }

    #[test]
    fn test_drag_rounds_when_enabled() {
        let config = crate::TuiConfig::default();
        let ctx = context(&config, 0.0, 0.0, 100.0, 10.0);
        let mut slider = Slider::default().rounded();

        slider.handle_event(&ctx, &press(50.0));
        // (17.6 - 5) / 90 * 100 = 14 -> 10
        slider.handle_event(
            &ctx,
            &Event::MouseMotion(MouseMotionEvent {
                x: 17.6,
                y: 5.0,
                dx: 0.0,
                dy: 0.0,
            }),
        );
        assert_eq!(slider.value(), 10.0);
    }

    #[test]
    fn test_scroll_needs_focus() {
        let config = crate::TuiConfig::default();
        let mut ctx = context(&config, 0.0, 0.0, 100.0, 10.0);
        let mut slider = Slider::default();

        let wheel = Event::Scroll { delta: 1.0 };
        assert_eq!(slider.handle_event(&ctx, &wheel), EventStatus::Available);
        assert_eq!(slider.value(), 0.0);

        ctx.focused = true;
        assert_eq!(slider.handle_event(&ctx, &wheel), EventStatus::Consumed);
        assert_eq!(slider.value(), 10.0);

        let mut vertical = Slider::default().vertical();
        vertical.set_value(50.0);
        vertical.handle_event(&ctx, &wheel);
        assert_eq!(vertical.value(), 40.0);
    }

    #[test]
    fn test_update_places_thumb() {
        let config = crate::TuiConfig::default();
        let ctx = context(&config, 10.0, 0.0, 100.0, 10.0);
        let renderer = crate::testing::renderer();
        let mut slider = Slider::default();
        slider.set_value(100.0);
        slider.update(&ctx, &renderer, 0.0);
        assert_eq!(slider.thumb(), Rect::new(100.0, 0.0, 10.0, 10.0));
    }
}
