//! Push button.

use trellis_render::{Color, Renderer};

use super::core::{component, Behavior, Listeners, PointerState, WidgetContext, WidgetId};
use super::label::{Label, TextAlign};
use crate::event::{Event, EventStatus, MouseButtonEvent};
use crate::style::regions;

/// A label drawn over a per-state nine-patch that reports clicks.
///
/// A click is a press and a release both inside the button. Moving out
/// while pressed cancels it.
#[derive(Debug)]
pub struct Button {
    /// Caption.
    pub label: Label,
    /// Called with the releasing event on every click.
    pub click_listeners: Listeners<MouseButtonEvent>,
    pointer: PointerState,
}

impl Button {
    /// Creates a button with centered text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            label: Label::new(text).with_align(TextAlign::CENTER),
            click_listeners: Listeners::new(),
            pointer: PointerState::default(),
        }
    }

    /// Adds a click listener.
    #[must_use]
    pub fn on_click(mut self, listener: impl FnMut(WidgetId, &MouseButtonEvent) + 'static) -> Self {
        self.click_listeners.add(listener);
        self
    }

    /// Hover and press flags.
    #[must_use]
    pub fn pointer(&self) -> PointerState {
        self.pointer
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new("")
    }
}

impl Behavior for Button {
    fn update(&mut self, ctx: &WidgetContext<'_>, renderer: &Renderer, dt: f32) {
        self.label.update(ctx, renderer, dt);
    }

    fn preferred_size(&self) -> Option<(f32, f32)> {
        self.label.preferred_size()
    }

    fn render(&mut self, ctx: &WidgetContext<'_>, renderer: &mut Renderer) {
        if ctx.style.is_none() {
            return;
        }
        let region = if !ctx.enabled {
            regions::BUTTON_DISABLED
        } else if self.pointer.pressed {
            regions::BUTTON_CLICK
        } else if self.pointer.hovered {
            regions::BUTTON_HOVER
        } else {
            regions::BUTTON_NORMAL
        };
        if let Some(patch) = ctx.patch(region) {
            renderer.nine_patch(patch, ctx.draw_bounds, Color::WHITE, false);
        }
        self.label.render(ctx, renderer);
    }

    fn handle_event(&mut self, ctx: &WidgetContext<'_>, event: &Event) -> EventStatus {
        match event {
            Event::MouseButton(e) => {
                if ctx.enabled && ctx.hit(e.x, e.y) {
                    if e.pressed {
                        self.pointer.pressed = true;
                    } else if self.pointer.pressed {
                        self.pointer.pressed = false;
                        self.click_listeners.emit(e);
                    }
                } else {
                    self.pointer.reset();
                }
            }
            Event::MouseMotion(e) => {
                if ctx.hit(e.x, e.y) {
                    self.pointer.hovered = true;
                } else {
                    self.pointer.reset();
                }
            }
            _ => {}
        }
        EventStatus::Available
    }

    fn set_owner(&mut self, id: WidgetId) {
        self.click_listeners.set_owner(id);
    }
}

component!(Button, 190.0, 32.0, auto_size = false);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MouseMotionEvent;
    use crate::input::{Modifiers, MouseButton};
    use crate::testing::context;
    use std::cell::Cell;
    use std::rc::Rc;

    fn button_event(x: f32, pressed: bool) -> Event {
        Event::MouseButton(MouseButtonEvent {
            button: MouseButton::Left,
            pressed,
            x,
            y: 10.0,
            modifiers: Modifiers::default(),
        })
    }

    fn motion(x: f32) -> Event {
        Event::MouseMotion(MouseMotionEvent {
            x,
            y: 10.0,
            dx: 0.0,
            dy: 0.0,
        })
    }

    fn counting_button() -> (Button, Rc<Cell<u32>>) {
        let clicks = Rc::new(Cell::new(0));
        let sink = Rc::clone(&clicks);
        let button = Button::new("ok").on_click(move |_, _| sink.set(sink.get() + 1));
        (button, clicks)
    }

    #[test]
    fn test_press_release_inside_clicks() {
        let config = crate::TuiConfig::default();
        let ctx = context(&config, 0.0, 0.0, 100.0, 20.0);
        let (mut button, clicks) = counting_button();

        button.handle_event(&ctx, &motion(50.0));
        button.handle_event(&ctx, &button_event(50.0, true));
        assert!(button.pointer().pressed);
        button.handle_event(&ctx, &button_event(50.0, false));

        assert_eq!(clicks.get(), 1);
        assert_eq!(
            button.pointer(),
            PointerState {
                hovered: true,
                pressed: false
            }
        );
    }

    #[test]
    fn test_leaving_while_pressed_cancels() {
        let config = crate::TuiConfig::default();
        let ctx = context(&config, 0.0, 0.0, 100.0, 20.0);
        let (mut button, clicks) = counting_button();

        button.handle_event(&ctx, &button_event(50.0, true));
        button.handle_event(&ctx, &motion(150.0));
        button.handle_event(&ctx, &motion(50.0));
        button.handle_event(&ctx, &button_event(50.0, false));

        assert_eq!(clicks.get(), 0);
    }

    #[test]
    fn test_disabled_never_presses() {
        let config = crate::TuiConfig::default();
        let mut ctx = context(&config, 0.0, 0.0, 100.0, 20.0);
        ctx.enabled = false;
        let (mut button, clicks) = counting_button();

        button.handle_event(&ctx, &button_event(50.0, true));
        button.handle_event(&ctx, &button_event(50.0, false));

        assert!(!button.pointer().pressed);
        assert_eq!(clicks.get(), 0);
    }
}
