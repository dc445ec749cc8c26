//! Single-line text field.
//!
//! The caret and the selection anchor are character indices. Glyph edges are
//! measured on every render and used to map the pointer back to an index,
//! so nothing survives a font or size change.

use trellis_render::{Color, FontId, Rect, Renderer};

use super::core::{component, Behavior, Listeners, PointerState, WidgetContext, WidgetId};
use crate::event::{Event, EventStatus, KeyEvent};
use crate::input::Key;
use crate::style::regions;

/// Left inset of the text, in output pixels, before scrolling.
const TEXT_INSET: f32 = 3.0;

/// An editable line of text with caret, selection and scrolling.
#[derive(Debug)]
pub struct Edit {
    /// Font override; the style font otherwise.
    pub font: Option<FontId>,
    /// Point size in virtual units.
    pub font_size: f32,
    /// Accepts keyboard and pointer editing.
    pub editable: bool,
    /// Draws every character as `mask`.
    pub masked: bool,
    /// Character shown when masked.
    pub mask: char,
    /// Called with the previous text whenever the text changes.
    pub change_listeners: Listeners<str>,
    text: String,
    caret: usize,
    selection: Option<usize>,
    pointer: PointerState,
    click_x: Option<f32>,
    drag_x: Option<f32>,
    extend_selection: bool,
    text_offset: f32,
    text_origin: f32,
    glyphs: Vec<f32>,
    line_height: f32,
    blink: bool,
    blink_time: f32,
}

impl Edit {
    /// Creates a field holding `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            font: None,
            font_size: 10.0,
            editable: true,
            masked: false,
            mask: '*',
            change_listeners: Listeners::new(),
            text: text.into(),
            caret: 0,
            selection: None,
            pointer: PointerState::default(),
            click_x: None,
            drag_x: None,
            extend_selection: false,
            text_offset: TEXT_INSET,
            text_origin: 0.0,
            glyphs: Vec::new(),
            line_height: 0.0,
            blink: true,
            blink_time: 0.0,
        }
    }

    /// A masked field.
    #[must_use]
    pub fn password(mask: char) -> Self {
        Self {
            masked: true,
            mask,
            ..Self::new("")
        }
    }

    /// Adds a change listener.
    #[must_use]
    pub fn on_change(mut self, listener: impl FnMut(WidgetId, &str) + 'static) -> Self {
        self.change_listeners.add(listener);
        self
    }

    /// The text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and keeps the caret inside it.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let prev = std::mem::replace(&mut self.text, text.into());
        self.caret = self.caret.min(self.len());
        self.selection = None;
        if prev != self.text {
            self.change_listeners.emit(&prev);
        }
    }

    /// Caret position in characters.
    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Selected character range, if any.
    #[must_use]
    pub fn selection(&self) -> Option<(usize, usize)> {
        self.selection
            .map(|anchor| (anchor.min(self.caret), anchor.max(self.caret)))
    }

    /// Whether the caret is in its visible blink phase.
    #[must_use]
    pub fn caret_visible(&self) -> bool {
        self.blink
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn edit(&mut self, change: impl FnOnce(&mut String)) {
        let prev = self.text.clone();
        change(&mut self.text);
        if prev != self.text {
            self.change_listeners.emit(&prev);
        }
    }

    fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            return false;
        };
        let (from, to) = (self.byte_index(start), self.byte_index(end));
        self.edit(|text| {
            text.replace_range(from..to, "");
        });
        self.caret = start;
        self.selection = None;
        true
    }

    fn insert(&mut self, character: char) {
        self.delete_selection();
        let at = self.byte_index(self.caret);
        self.edit(|text| text.insert(at, character));
        self.caret += 1;
        self.selection = None;
        self.wake_caret();
    }

    /// Shows the caret and restarts its blink period.
    fn wake_caret(&mut self) {
        self.blink = true;
        self.blink_time = 0.0;
    }

    fn press_key(&mut self, key: KeyEvent) {
        let len = self.len();
        match key.key {
            Key::Left => {
                self.caret = self.caret.saturating_sub(1);
                self.selection = None;
            }
            Key::Right => {
                self.caret = (self.caret + 1).min(len);
                self.selection = None;
            }
            Key::Home => {
                self.caret = 0;
                self.selection = None;
            }
            Key::End => {
                self.caret = len;
                self.selection = None;
            }
            Key::Delete => {
                if !self.delete_selection() && self.caret < len {
                    let (from, to) = (self.byte_index(self.caret), self.byte_index(self.caret + 1));
                    self.edit(|text| text.replace_range(from..to, ""));
                }
                self.selection = None;
            }
            Key::Backspace => {
                if !self.delete_selection() && self.caret > 0 {
                    let (from, to) = (self.byte_index(self.caret - 1), self.byte_index(self.caret));
                    self.edit(|text| text.replace_range(from..to, ""));
                    self.caret -= 1;
                }
                self.selection = None;
            }
            _ => {}
        }
        self.wake_caret();
    }

    /// Caret index closest to `x`, measured from the text origin.
    fn index_at(&self, x: f32, text_width: f32) -> usize {
        let Some(&first) = self.glyphs.first() else {
            return 0;
        };
        let mut best = 0;
        let mut best_x = first;
        for (i, &edge) in self.glyphs.iter().enumerate().skip(1) {
            if (best_x - x).abs() > (edge - x).abs() {
                best = i;
                best_x = edge;
            }
        }
        if (best_x - x).abs() > (text_width - x).abs() {
            best = self.glyphs.len();
        }
        best
    }

    /// Offset of caret index `index` from the text origin.
    fn offset_of(&self, index: usize, text_width: f32) -> f32 {
        if index >= self.glyphs.len() {
            if self.glyphs.is_empty() {
                0.0
            } else {
                text_width
            }
        } else {
            self.glyphs[index]
        }
    }

    /// Applies pending pointer input to the caret and selection.
    fn settle_caret(&mut self, text_width: f32) {
        if let Some(x) = self.click_x.take() {
            if self.extend_selection {
                self.selection.get_or_insert(self.caret);
            } else {
                self.selection = None;
            }
            self.caret = self.index_at(x, text_width);
        } else if let Some(x) = self.drag_x {
            self.selection.get_or_insert(self.caret);
            self.caret = self.index_at(x, text_width);
        }
        self.caret = self.caret.min(self.glyphs.len());
        if self.selection == Some(self.caret) {
            self.selection = None;
        }
    }

    fn measure_glyphs(&mut self, renderer: &Renderer, font: FontId, shown: &str) {
        self.glyphs.clear();
        for (byte, _) in shown.char_indices() {
            let (w, h) = renderer.text_size(font, &shown[..byte], self.font_size);
            self.glyphs.push(w);
            self.line_height = self.line_height.max(h);
        }
    }
}

impl Default for Edit {
    fn default() -> Self {
        Self::new("")
    }
}

impl Behavior for Edit {
    fn update(&mut self, ctx: &WidgetContext<'_>, _renderer: &Renderer, dt: f32) {
        self.text_offset = TEXT_INSET;
        if !ctx.focused {
            self.selection = None;
        }
        self.blink_time += dt;
        if self.blink_time >= ctx.config.blink_interval {
            self.blink = !self.blink;
            self.blink_time = 0.0;
        }
    }

    fn render(&mut self, ctx: &WidgetContext<'_>, renderer: &mut Renderer) {
        let Some(style) = ctx.style else {
            return;
        };
        let nb = ctx.draw_bounds;

        let region = if !ctx.enabled {
            regions::TEXTBOX_DISABLED
        } else if ctx.focused {
            regions::TEXTBOX_CLICK
        } else if self.pointer.hovered {
            regions::TEXTBOX_HOVER
        } else {
            regions::TEXTBOX_NORMAL
        };
        if let Some(patch) = ctx.patch(region) {
            renderer.nine_patch(patch, nb, Color::WHITE, false);
        }

        let color = style.text_color(ctx.enabled);
        let font = self.font.unwrap_or_else(|| style.font());
        let shown = if self.masked {
            self.mask.to_string().repeat(self.len())
        } else {
            self.text.clone()
        };
        let (tw, th) = renderer.text_size(font, &shown, self.font_size);
        let text_y = nb.y + (nb.height / 2.0 - th / 2.0);

        self.measure_glyphs(renderer, font, &shown);
        self.settle_caret(tw);

        let count = self.glyphs.len();
        let start = nb.x + self.text_offset;
        let prev_x = start + self.offset_of(self.caret.saturating_sub(1), tw);
        let next_x = start + self.offset_of((self.caret + 1).min(count), tw);
        let clip_right = start + TEXT_INSET + (nb.width - 12.0);
        if next_x > clip_right {
            self.text_offset -= next_x - clip_right + 1.0;
        }
        if prev_x < nb.x {
            self.text_offset += nb.x - prev_x + 1.0;
        }
        let origin = (nb.x + self.text_offset).trunc();
        self.text_origin = origin;

        renderer.text(font, &shown, origin, text_y, self.font_size, color);

        if let Some((from, to)) = self.selection() {
            if let Some(select) = ctx.patch(regions::TEXTBOX_SELECT) {
                let x0 = self.offset_of(from, tw);
                let x1 = self.offset_of(to, tw);
                renderer.nine_patch(
                    select,
                    Rect::new(origin + x0, text_y, x1 - x0, self.line_height),
                    Color::WHITE,
                    false,
                );
            }
        }

        if self.blink && ctx.focused && self.editable {
            let caret_h = th + 2.0;
            let caret_y = nb.y + (nb.height / 2.0 - caret_h / 2.0);
            let caret_x = origin + self.offset_of(self.caret, tw);
            renderer.rectangle(Rect::new(caret_x, caret_y, ctx.scale.0, caret_h), color);
        }
    }

    fn handle_event(&mut self, ctx: &WidgetContext<'_>, event: &Event) -> EventStatus {
        match event {
            Event::Text { character } if ctx.focused && self.editable => {
                self.insert(*character);
            }
            Event::Key(key) if key.pressed && ctx.focused && self.editable => {
                self.press_key(*key);
            }
            Event::MouseButton(e) if self.editable => {
                if ctx.hit(e.x, e.y) {
                    if e.pressed {
                        self.drag_x = None;
                        self.click_x = Some(e.x - self.text_origin);
                        self.extend_selection = e.modifiers.shift;
                        self.wake_caret();
                        self.pointer.pressed = true;
                    } else {
                        self.pointer.pressed = false;
                        self.click_x = None;
                        self.drag_x = None;
                    }
                } else {
                    self.pointer.pressed = false;
                    self.click_x = None;
                }
                if !e.pressed {
                    self.click_x = None;
                    self.drag_x = None;
                    self.pointer.reset();
                }
            }
            Event::MouseMotion(e) if self.editable => {
                if ctx.hit(e.x, e.y) {
                    if self.pointer.pressed {
                        self.drag_x = Some(e.x - self.text_origin);
                    }
                    self.pointer.hovered = true;
                } else {
                    self.pointer.reset();
                    self.click_x = None;
                    self.drag_x = None;
                }
            }
            Event::Focus { .. } => {
                self.caret = 0;
                self.selection = None;
                self.pointer.hovered = false;
                return EventStatus::Consumed;
            }
            _ => {}
        }
        EventStatus::Available
    }

    fn set_owner(&mut self, id: WidgetId) {
        self.change_listeners.set_owner(id);
    }
}

component!(Edit, 190.0, 20.0, auto_size = false);
