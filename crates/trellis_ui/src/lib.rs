//! # Trellis UI
//!
//! Retained widget toolkit drawn through [`trellis_render`].
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                          FRAME                             │
//! ├────────────────────────────────────────────────────────────┤
//! │  InputState → Events → EventHandler → roots → children     │
//! │                                      ↓                     │
//! │  update: measure → auto-size → Stack / Flow / Border       │
//! │                                      ↓                     │
//! │  render: clip_start(root) → widget → clip_start(child) ... │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! Geometry is authored in virtual units ([`TuiConfig::virtual_width`] by
//! [`TuiConfig::virtual_height`]) and corrected to output pixels when a
//! widget is drawn or hit-tested. A hit area is clipped by every ancestor.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use trellis_render::{MonospaceGlyphs, RecordingBackend, Renderer, Viewport};
//! use trellis_ui::{Button, InputState, Style, Tui, TuiConfig};
//!
//! # fn main() -> trellis_ui::UiResult<()> {
//! let (backend, _log) = RecordingBackend::create();
//! let renderer = Renderer::new(Box::new(backend), Box::new(MonospaceGlyphs::new()))?;
//! let mut ui = Tui::new(
//!     TuiConfig::default(),
//!     renderer,
//!     Box::new(Viewport::new(1280, 720)),
//!     Arc::new(Style::new()),
//! );
//! ui.add(Button::new("OK").on_click(|id, _| println!("clicked {id}")));
//!
//! let input = InputState::new();
//! ui.update(&input, 1.0 / 60.0);
//! ui.render()?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod event;
pub mod input;
pub mod layout;
pub mod registry;
pub mod style;
pub mod tui;
pub mod widget;

#[cfg(test)]
mod testing;

pub use config::TuiConfig;
pub use error::{UiError, UiResult};
pub use event::{Event, EventHandler, EventStatus, EventSubscriber, EventType};
pub use input::{InputSource, InputState, Key, Modifiers, MouseButton};
pub use layout::{BorderLayout, BorderSlot, Layout, LayoutArgs, Margin};
pub use registry::UiRegistry;
pub use style::{Style, StyleSheet};
pub use tui::Tui;
pub use widget::{
    Button, CheckBox, ColorPicker, Edit, Label, Panel, Slider, Widget, WidgetId, WidgetTree,
};
