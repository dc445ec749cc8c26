//! The per-frame driver.
//!
//! A [`Tui`] owns one widget tree together with its renderer, output target
//! and style. Each frame the host calls [`Tui::update`] with the polled
//! input and then [`Tui::render`].

use std::path::Path;
use std::sync::Arc;

use tracing::debug;
use trellis_render::{OutputTarget, Renderer, TextureLoader};

use crate::config::TuiConfig;
use crate::error::UiResult;
use crate::event::{
    Event, EventHandler, EventStatus, EventSubscriber, KeyEvent, MouseButtonEvent,
    MouseMotionEvent,
};
use crate::input::{InputState, MouseButton};
use crate::layout::LayoutArgs;
use crate::style::Style;
use crate::widget::{Component, Frame, Widget, WidgetId, WidgetTree};

/// Routes dispatcher keys into the tree and collects the focus request.
struct Dispatcher<'t, 'f> {
    tree: &'t mut WidgetTree,
    frame: Frame<'f>,
    focus_request: Option<WidgetId>,
}

impl EventSubscriber<WidgetId> for Dispatcher<'_, '_> {
    fn is_enabled(&self, id: WidgetId) -> bool {
        self.tree.is_enabled(id) && self.tree.get(id).is_some_and(|w| w.state.visible)
    }

    fn handle_event(&mut self, id: WidgetId, event: &Event) -> EventStatus {
        self.tree
            .dispatch(id, event, &self.frame, &mut self.focus_request)
    }
}

/// A UI root: widgets, events, renderer, output and style.
pub struct Tui {
    config: TuiConfig,
    tree: WidgetTree,
    events: EventHandler<WidgetId>,
    renderer: Renderer,
    output: Box<dyn OutputTarget>,
    style: Arc<Style>,
    focused: Option<WidgetId>,
    pointer: Option<(f32, f32)>,
}

impl Tui {
    /// Creates an empty UI drawing into `output`.
    #[must_use]
    pub fn new(
        config: TuiConfig,
        mut renderer: Renderer,
        output: Box<dyn OutputTarget>,
        style: Arc<Style>,
    ) -> Self {
        renderer.set_virtual_width(config.virtual_width);
        renderer.set_target(output.width(), output.height());
        Self {
            config,
            tree: WidgetTree::new(),
            events: EventHandler::new(),
            renderer,
            output,
            style,
            focused: None,
            pointer: None,
        }
    }

    /// Creates an empty UI, loading its style from `path`.
    ///
    /// # Errors
    ///
    /// Fails if the style cannot be loaded.
    pub fn from_style_file(
        config: TuiConfig,
        mut renderer: Renderer,
        output: Box<dyn OutputTarget>,
        path: impl AsRef<Path>,
        loader: &mut dyn TextureLoader,
    ) -> UiResult<Self> {
        let style = Style::load(path, loader, &mut renderer)?;
        Ok(Self::new(config, renderer, output, Arc::new(style)))
    }

    /// Adds a top-level widget and subscribes it to every event type.
    pub fn add(&mut self, widget: impl Into<Widget>) -> WidgetId {
        let id = self
            .tree
            .insert_root(widget.into(), Some(Arc::clone(&self.style)));
        self.events.bind_all(id);
        id
    }

    /// Adds a widget to the panel `parent`.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is unknown or not a panel.
    pub fn add_child(
        &mut self,
        parent: WidgetId,
        widget: impl Into<Widget>,
        args: LayoutArgs,
    ) -> UiResult<WidgetId> {
        self.tree.attach(parent, widget.into(), args)
    }

    /// Moves `id` under the panel `parent`.
    ///
    /// # Errors
    ///
    /// Fails if either widget is unknown, `parent` is not a panel, or
    /// `parent` lies inside `id`'s subtree.
    pub fn move_to(&mut self, id: WidgetId, parent: WidgetId, args: LayoutArgs) -> UiResult<()> {
        let was_root = self.tree.contains(id) && self.tree.parent(id).is_none();
        self.tree.reparent(id, parent, args)?;
        if was_root {
            self.events.unbind(id);
        }
        Ok(())
    }

    /// Removes `id` and its subtree, returning the removed ids.
    ///
    /// # Errors
    ///
    /// Fails if `id` is unknown.
    pub fn remove(&mut self, id: WidgetId) -> UiResult<Vec<WidgetId>> {
        let removed = self.tree.remove(id)?;
        for &gone in &removed {
            self.events.unbind(gone);
        }
        if self.focused.is_some_and(|f| removed.contains(&f)) {
            self.focused = None;
        }
        Ok(removed)
    }

    /// The concrete component of `id`.
    #[must_use]
    pub fn get<C: Component>(&self, id: WidgetId) -> Option<&C> {
        self.tree.component(id)
    }

    /// The concrete component of `id`.
    #[must_use]
    pub fn get_mut<C: Component>(&mut self, id: WidgetId) -> Option<&mut C> {
        self.tree.component_mut(id)
    }

    /// The widget `id`.
    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&Widget> {
        self.tree.get(id)
    }

    /// The widget `id`.
    #[must_use]
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.tree.get_mut(id)
    }

    /// First widget named `name`, depth-first.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.tree.find(name)
    }

    /// The widget tree.
    #[must_use]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The widget holding keyboard focus.
    #[must_use]
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Moves keyboard focus.
    ///
    /// The previous holder gets `Focus { focused: false }` and the new one
    /// `Focus { focused: true }`, each on its own handler only.
    pub fn set_focus(&mut self, id: Option<WidgetId>) {
        if self.focused == id {
            return;
        }
        let frame = Frame::new(&self.config, (self.output.width(), self.output.height()));
        if let Some(previous) = self.focused.take() {
            self.tree.set_focused(previous, false);
            self.tree
                .deliver(previous, &Event::Focus { focused: false }, &frame);
        }
        if let Some(next) = id.filter(|&next| self.tree.contains(next)) {
            self.tree.set_focused(next, true);
            self.tree
                .deliver(next, &Event::Focus { focused: true }, &frame);
            self.focused = Some(next);
        }
        debug!("Focus moved to {:?}", self.focused);
    }

    /// The active style.
    #[must_use]
    pub fn style(&self) -> &Arc<Style> {
        &self.style
    }

    /// Replaces the style and hands it to every widget.
    pub fn set_style(&mut self, style: Arc<Style>) {
        self.style = style;
        self.refresh();
    }

    /// Hands the active style to every widget again.
    pub fn refresh(&mut self) {
        self.tree.refresh_style(&self.style);
    }

    /// Frame settings.
    #[must_use]
    pub fn config(&self) -> &TuiConfig {
        &self.config
    }

    /// Output pixels per virtual unit.
    #[must_use]
    pub fn scale(&self) -> (f32, f32) {
        Frame::new(&self.config, self.output_size()).scale
    }

    /// Size of the output target in pixels.
    #[must_use]
    pub fn output_size(&self) -> (u32, u32) {
        (self.output.width(), self.output.height())
    }

    /// The renderer.
    #[must_use]
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// The renderer.
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Offers `event` to the top-level widgets in insertion order.
    ///
    /// A focus change requested during dispatch is applied afterwards.
    pub fn dispatch(&mut self, event: &Event) -> EventStatus {
        let mut dispatcher = Dispatcher {
            tree: &mut self.tree,
            frame: Frame::new(&self.config, (self.output.width(), self.output.height())),
            focus_request: None,
        };
        let status = self.events.send(event, &mut dispatcher);
        if let Some(id) = dispatcher.focus_request {
            self.set_focus(Some(id));
        }
        status
    }

    /// Turns `input` into events, then updates and lays out every widget.
    pub fn update(&mut self, input: &InputState, dt: f32) {
        let sample = self.output.pointer_position(input.mouse_x, input.mouse_y);
        let modifiers = input.modifiers;

        if sample.on_surface {
            for button in MouseButton::ALL {
                for pressed in [true, false] {
                    let edge = if pressed {
                        input.mouse_clicked(button)
                    } else {
                        input.mouse_released(button)
                    };
                    if edge {
                        self.dispatch(&Event::MouseButton(MouseButtonEvent {
                            button,
                            pressed,
                            x: sample.x,
                            y: sample.y,
                            modifiers,
                        }));
                    }
                }
            }

            let (px, py) = self.pointer.unwrap_or((sample.x, sample.y));
            #[allow(clippy::float_cmp)]
            let moved = self.pointer.is_none() || px != sample.x || py != sample.y;
            if moved {
                self.dispatch(&Event::MouseMotion(MouseMotionEvent {
                    x: sample.x,
                    y: sample.y,
                    dx: sample.x - px,
                    dy: sample.y - py,
                }));
            }
            self.pointer = Some((sample.x, sample.y));

            let scroll = input.scroll_delta.1;
            if scroll != 0.0 {
                self.dispatch(&Event::Scroll {
                    delta: scroll.signum(),
                });
            }
        }

        for character in input.text_input.chars() {
            self.dispatch(&Event::Text { character });
        }
        for &key in input.keys_pressed() {
            self.dispatch(&Event::Key(KeyEvent {
                key,
                modifiers,
                pressed: true,
            }));
        }
        for &key in input.keys_released() {
            self.dispatch(&Event::Key(KeyEvent {
                key,
                modifiers,
                pressed: false,
            }));
        }

        let (width, height) = self.output_size();
        self.renderer.set_target(width, height);
        let frame = Frame::new(&self.config, (width, height));
        self.tree.update(&frame, &self.renderer, dt);
    }

    /// Draws every visible top-level widget into the output target.
    ///
    /// # Errors
    ///
    /// Fails if the output target cannot be bound.
    pub fn render(&mut self) -> UiResult<()> {
        let (width, height) = self.output_size();
        self.output.bind(self.renderer.backend_mut())?;
        self.renderer.set_target(width, height);
        self.renderer.reset_stats();

        self.renderer.begin();
        let frame = Frame::new(&self.config, (width, height));
        self.tree.render(&frame, &mut self.renderer);
        self.renderer.end();

        self.output.unbind(self.renderer.backend_mut());
        Ok(())
    }
}

impl std::fmt::Debug for Tui {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tui")
            .field("config", &self.config)
            .field("tree", &self.tree)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use crate::layout::Layout;
    use crate::testing::tui;
    use crate::widget::{Button, CheckBox, Edit, Label, Panel, Slider};
    use std::cell::Cell;
    use std::rc::Rc;
    use trellis_render::{
        GpuCommand, MonospaceGlyphs, ProjectedSurface, RecordingBackend, RenderTargetId,
        SurfaceProjector,
    };

    /// A projector whose ray never hits the surface.
    struct Miss;

    impl SurfaceProjector for Miss {
        fn project(&mut self, _x: f32, _y: f32) -> Option<(f32, f32)> {
            None
        }

        fn present(&mut self, _target: RenderTargetId) {}
    }

    fn press(x: f32, y: f32) -> Event {
        Event::MouseButton(MouseButtonEvent {
            button: MouseButton::Left,
            pressed: true,
            x,
            y,
            modifiers: crate::input::Modifiers::default(),
        })
    }

    #[test]
    fn test_press_moves_focus_after_dispatch() {
        let (mut ui, _log) = tui();
        let edit = ui.add(Widget::new(Edit::default()).at(10.0, 10.0));

        assert!(ui.dispatch(&press(20.0, 15.0)).is_consumed());
        assert_eq!(ui.focused(), Some(edit));
        assert!(ui.widget(edit).unwrap().state.is_focused());

        assert!(!ui.dispatch(&press(900.0, 600.0)).is_consumed());
        assert_eq!(ui.focused(), Some(edit));
    }

    #[test]
    fn test_set_focus_notifies_both_widgets() {
        let (mut ui, _log) = tui();
        let a = ui.add(Edit::new("abc"));
        let b = ui.add(Widget::new(Edit::new("xyz")).at(0.0, 40.0));

        ui.set_focus(Some(a));
        ui.dispatch(&Event::Key(KeyEvent {
            key: Key::End,
            modifiers: crate::input::Modifiers::default(),
            pressed: true,
        }));
        assert_eq!(ui.get::<Edit>(a).map(Edit::caret), Some(3));

        ui.set_focus(Some(b));
        assert_eq!(ui.get::<Edit>(a).map(Edit::caret), Some(0));
        assert!(!ui.widget(a).unwrap().state.is_focused());
        assert!(ui.widget(b).unwrap().state.is_focused());
    }

    #[test]
    fn test_first_root_wins_overlapping_press() {
        let (mut ui, _log) = tui();
        let clicks = Rc::new(Cell::new(0));
        let seen = Rc::clone(&clicks);
        let first = ui.add(Button::new("a").on_click(move |_, _| seen.set(seen.get() + 1)));
        ui.add(Button::new("b"));

        ui.dispatch(&press(20.0, 10.0));
        let mut release = press(20.0, 10.0);
        if let Event::MouseButton(e) = &mut release {
            e.pressed = false;
        }
        ui.dispatch(&release);
        assert_eq!(clicks.get(), 1);
        assert_eq!(ui.focused(), Some(first));
    }

    #[test]
    fn test_remove_clears_bindings_and_focus() {
        let (mut ui, _log) = tui();
        let panel = ui.add(Panel::with_layout(Layout::Stack));
        let child = ui.add_child(panel, CheckBox::new("c"), LayoutArgs::None).unwrap();
        ui.set_focus(Some(child));

        let removed = ui.remove(panel).unwrap();
        assert_eq!(removed, vec![panel, child]);
        assert_eq!(ui.focused(), None);
        assert!(ui.tree().is_empty());
        assert!(!ui.dispatch(&press(10.0, 10.0)).is_consumed());
    }

    #[test]
    fn test_moved_root_is_no_longer_a_subscriber() {
        let (mut ui, _log) = tui();
        let panel = ui.add(Widget::new(Panel::new()).sized(400.0, 400.0));
        let label = ui.add(Widget::new(Label::new("x")).at(500.0, 500.0));

        ui.move_to(label, panel, LayoutArgs::None).unwrap();
        assert_eq!(ui.tree().roots(), &[panel]);
        assert_eq!(ui.tree().parent(label), Some(panel));
        assert!(ui.move_to(panel, label, LayoutArgs::None).is_err());
    }

    #[test]
    fn test_render_brackets_frame_and_balances_clips() {
        let (mut ui, log) = tui();
        ui.add(Widget::new(Button::new("ok")).named("ok"));
        ui.update(&InputState::new(), 0.016);
        log.clear();

        ui.render().unwrap();
        let commands = log.take();
        assert!(matches!(commands.first(), Some(GpuCommand::BindTarget { .. })));
        assert!(commands
            .iter()
            .any(|c| matches!(c, GpuCommand::Text { text, .. } if text == "ok")));
        assert_eq!(ui.renderer().clip_depth(), 0);
        assert!(ui.renderer().stats().quad_draws > 0);
        assert_eq!(ui.find("ok"), ui.tree().roots().first().copied());
    }

    #[test]
    fn test_update_synthesizes_text_for_focused_edit() {
        let (mut ui, _log) = tui();
        let edit = ui.add(Edit::default());
        ui.set_focus(Some(edit));

        let mut input = InputState::new();
        input.text("hi");
        input.key_down(Key::Backspace);
        ui.update(&input, 0.016);
        assert_eq!(ui.get::<Edit>(edit).map(Edit::text), Some("h"));
    }

    #[test]
    fn test_pointer_input_ignored_off_surface() {
        let (backend, _log) = RecordingBackend::create();
        let renderer = Renderer::new(Box::new(backend), Box::new(MonospaceGlyphs::new())).unwrap();
        let mut ui = Tui::new(
            TuiConfig::default(),
            renderer,
            Box::new(ProjectedSurface::new(1280, 720, Miss)),
            Arc::new(crate::testing::style()),
        );
        let slider = ui.add(Widget::new(Slider::default()).sized(200.0, 20.0));
        ui.set_focus(Some(slider));

        let mut input = InputState::new();
        input.set_mouse_pos(50.0, 10.0);
        input.mouse_button_down(MouseButton::Left);
        input.scroll(0.0, 3.0);
        ui.update(&input, 0.016);
        assert_eq!(ui.get::<Slider>(slider).map(Slider::value), Some(0.0));
    }
}
