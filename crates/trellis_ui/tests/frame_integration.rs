//! # Frame Integration Tests
//!
//! Whole frames driven through `InputState`, the way a host drives them:
//!
//! 1. **Style**: a JSON sheet loaded through an in-memory image loader
//! 2. **Widgets**: check box, slider and password field reacting to input
//! 3. **Layout**: stack and border panels placing children
//! 4. **Render**: clip regions balanced across a nested tree
//!
//! Run with: cargo test -p trellis_ui --test frame_integration

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;

use trellis_render::{
    CommandLog, GpuCommand, ImageData, MemoryImages, MonospaceGlyphs, RecordingBackend, Rect,
    Renderer, Viewport,
};
use trellis_ui::style::regions;
use trellis_ui::{
    BorderSlot, Button, CheckBox, Edit, InputState, Label, Layout, LayoutArgs, MouseButton, Panel,
    Slider, Style, StyleSheet, Tui, TuiConfig, Widget,
};

const REGION_NAMES: [&str; 21] = [
    regions::PANEL,
    regions::BUTTON_NORMAL,
    regions::BUTTON_HOVER,
    regions::BUTTON_CLICK,
    regions::BUTTON_DISABLED,
    regions::CHECKBOX_NORMAL,
    regions::CHECKBOX_DISABLED,
    regions::CHECKBOX_MARK_NORMAL,
    regions::CHECKBOX_MARK_DISABLED,
    regions::SLIDER_TRACK_NORMAL,
    regions::SLIDER_TRACK_DISABLED,
    regions::SLIDER_THUMB_NORMAL,
    regions::SLIDER_THUMB_HOVER,
    regions::SLIDER_THUMB_CLICK,
    regions::SLIDER_THUMB_DISABLED,
    regions::TEXTBOX_NORMAL,
    regions::TEXTBOX_HOVER,
    regions::TEXTBOX_CLICK,
    regions::TEXTBOX_DISABLED,
    regions::TEXTBOX_SELECT,
    regions::DOT,
];

// ============================================================================
// FIXTURE
// ============================================================================

fn style_json() -> String {
    let regions: Vec<String> = REGION_NAMES
        .iter()
        .map(|name| format!("\"{name}\": [[0.0, 0.0, 0.25, 0.25], [2, 2, 2, 2]]"))
        .collect();
    format!(
        "{{ \"image\": \"skin.png\", \"regions\": {{ {} }} }}",
        regions.join(", ")
    )
}

fn ui() -> (Tui, CommandLog) {
    let (backend, log) = RecordingBackend::create();
    let glyphs = MonospaceGlyphs::new().with_log(log.clone());
    let mut renderer = Renderer::new(Box::new(backend), Box::new(glyphs)).unwrap();

    let mut images = MemoryImages::new();
    images.insert("skin.png", ImageData::new(64, 64, vec![255; 64 * 64 * 4]).unwrap());
    let sheet = StyleSheet::parse(&style_json()).unwrap();
    let style = Style::from_sheet(&sheet, Path::new(""), &mut images, &mut renderer).unwrap();
    assert_eq!(style.len(), REGION_NAMES.len());

    let ui = Tui::new(
        TuiConfig::default(),
        renderer,
        Box::new(Viewport::new(1280, 720)),
        Arc::new(style),
    );
    (ui, log)
}

/// Runs one frame with the pointer at `(x, y)`.
fn frame(ui: &mut Tui, input: &mut InputState, x: f32, y: f32, edit: impl FnOnce(&mut InputState)) {
    input.begin_frame();
    input.set_mouse_pos(x, y);
    edit(input);
    ui.update(input, 1.0 / 60.0);
}

fn click(ui: &mut Tui, input: &mut InputState, x: f32, y: f32) {
    frame(ui, input, x, y, |i| i.mouse_button_down(MouseButton::Left));
    frame(ui, input, x, y, |i| i.mouse_button_up(MouseButton::Left));
}

// ============================================================================
// WIDGETS
// ============================================================================

#[test]
fn verify_checkbox_toggles_once_per_click() {
    let (mut ui, _log) = ui();
    let mut input = InputState::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let panel = ui.add(Widget::new(Panel::with_layout(Layout::Stack)).sized(400.0, 300.0));
    let check = ui
        .add_child(
            panel,
            CheckBox::new("sound").on_change(move |_, prev| sink.borrow_mut().push(*prev)),
            LayoutArgs::None,
        )
        .unwrap();
    frame(&mut ui, &mut input, 0.0, 0.0, |_| {});

    click(&mut ui, &mut input, 10.0, 8.0);
    assert_eq!(ui.get::<CheckBox>(check).map(CheckBox::checked), Some(true));
    assert_eq!(*seen.borrow(), vec![false]);
    assert_eq!(ui.focused(), Some(check));

    // Released outside: no toggle.
    frame(&mut ui, &mut input, 10.0, 8.0, |i| i.mouse_button_down(MouseButton::Left));
    frame(&mut ui, &mut input, 600.0, 600.0, |i| i.mouse_button_up(MouseButton::Left));
    assert_eq!(ui.get::<CheckBox>(check).map(CheckBox::checked), Some(true));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn verify_disabled_panel_blocks_its_children() {
    let (mut ui, _log) = ui();
    let mut input = InputState::new();
    let panel = ui.add(Widget::new(Panel::with_layout(Layout::Stack)).sized(400.0, 300.0));
    let check = ui.add_child(panel, CheckBox::new("x"), LayoutArgs::None).unwrap();
    frame(&mut ui, &mut input, 0.0, 0.0, |_| {});

    ui.widget_mut(panel).unwrap().state.enabled = false;
    click(&mut ui, &mut input, 10.0, 8.0);
    assert_eq!(ui.get::<CheckBox>(check).map(CheckBox::checked), Some(false));
    assert_eq!(ui.focused(), None);
}

#[test]
fn verify_slider_jump_drag_and_scroll() {
    let (mut ui, _log) = ui();
    let mut input = InputState::new();
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);
    let slider = ui.add(
        Widget::new(Slider::default().on_change(move |_, prev| sink.borrow_mut().push(*prev)))
            .at(100.0, 100.0)
            .sized(200.0, 20.0),
    );
    frame(&mut ui, &mut input, 0.0, 0.0, |_| {});

    // Thumb is 20 wide, so the value travels over x in [110, 290].
    frame(&mut ui, &mut input, 200.0, 110.0, |i| i.mouse_button_down(MouseButton::Left));
    assert_eq!(ui.get::<Slider>(slider).map(Slider::value), Some(50.0));

    frame(&mut ui, &mut input, 290.0, 110.0, |_| {});
    assert_eq!(ui.get::<Slider>(slider).map(Slider::value), Some(100.0));

    frame(&mut ui, &mut input, 290.0, 110.0, |i| {
        i.mouse_button_up(MouseButton::Left);
        i.scroll(0.0, -3.0);
    });
    assert_eq!(ui.get::<Slider>(slider).map(Slider::value), Some(90.0));
    assert_eq!(*values.borrow(), vec![0.0, 50.0, 100.0]);
}

#[test]
fn verify_password_field_masks_rendered_text() {
    let (mut ui, log) = ui();
    let mut input = InputState::new();
    let field = ui.add(Widget::new(Edit::password('*')).at(0.0, 200.0));

    click(&mut ui, &mut input, 20.0, 210.0);
    assert_eq!(ui.focused(), Some(field));
    frame(&mut ui, &mut input, 20.0, 210.0, |i| i.text("abc"));
    assert_eq!(ui.get::<Edit>(field).map(Edit::text), Some("abc"));

    log.clear();
    ui.render().unwrap();
    let texts: Vec<String> = log
        .snapshot()
        .into_iter()
        .filter_map(|c| match c {
            GpuCommand::Text { text, .. } => Some(text),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["***".to_owned()]);
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn verify_border_layout_slots() {
    let (mut ui, mut input) = (ui().0, InputState::new());
    let panel = ui.add(Widget::new(Panel::with_layout(Layout::border())).sized(400.0, 300.0));
    let top = ui
        .add_child(panel, Button::new("top"), LayoutArgs::Border(BorderSlot::Top))
        .unwrap();
    let center = ui.add_child(panel, Button::new("center"), LayoutArgs::None).unwrap();
    frame(&mut ui, &mut input, 0.0, 0.0, |_| {});

    let bounds = |id| ui.widget(id).map(|w| w.state.bounds);
    assert_eq!(bounds(top), Some(Rect::new(3.0, 3.0, 394.0, 32.0)));
    assert_eq!(bounds(center), Some(Rect::new(3.0, 39.0, 394.0, 258.0)));
}

#[test]
fn verify_labels_auto_size_inside_stack() {
    let (mut ui, mut input) = (ui().0, InputState::new());
    let panel = ui.add(Widget::new(Panel::with_layout(Layout::Stack)).sized(300.0, 300.0));
    let a = ui.add_child(panel, Label::new("first"), LayoutArgs::None).unwrap();
    let b = ui.add_child(panel, Label::new("second"), LayoutArgs::None).unwrap();
    frame(&mut ui, &mut input, 0.0, 0.0, |_| {});

    let a = ui.widget(a).unwrap().state.bounds;
    let b = ui.widget(b).unwrap().state.bounds;
    // 8pt text is 8px tall at 1:1 scale, plus 4 padding on each side.
    assert_eq!(a.height, 16.0);
    assert_eq!(a.width, 296.0);
    assert_eq!(b.y, a.y + a.height + 2.0);
}

// ============================================================================
// RENDER
// ============================================================================

#[test]
fn verify_nested_clips_are_balanced() {
    let (mut ui, log) = ui();
    let mut input = InputState::new();
    let outer = ui.add(Widget::new(Panel::new()).sized(200.0, 100.0));
    let inner = ui
        .add_child(
            outer,
            Widget::new(Panel::new()).at(10.0, 10.0).sized(100.0, 50.0),
            LayoutArgs::None,
        )
        .unwrap();
    ui.add_child(inner, Widget::new(Button::new("deep")).at(5.0, 5.0), LayoutArgs::None)
        .unwrap();
    // Outside its parent: its clip region is empty.
    ui.add_child(outer, Widget::new(Button::new("hidden")).at(500.0, 500.0), LayoutArgs::None)
        .unwrap();
    frame(&mut ui, &mut input, 0.0, 0.0, |_| {});

    log.clear();
    ui.render().unwrap();
    assert_eq!(ui.renderer().clip_depth(), 0);
    assert_eq!(ui.renderer().stats().rejected_clips, 1);
    assert_eq!(log.last_scissor(), Some(None));
}
