//! Core widget types shared by every widget kind.

use std::fmt;
use std::sync::Arc;

use tracing::trace;
use trellis_render::{NinePatch, Rect, Renderer};

use crate::config::TuiConfig;
use crate::event::{Event, EventStatus};
use crate::layout::{LayoutArgs, Margin};
use crate::style::Style;

/// Unique identifier for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Id carried by widgets that are not in a tree yet.
    pub const DETACHED: Self = Self(0);

    /// Creates a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State every widget has, whatever its kind.
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// User-facing name, used by [`Tui::find`](crate::Tui::find).
    pub name: String,
    /// Bounds in the parent's space, in virtual units.
    pub bounds: Rect,
    /// Hidden widgets are neither drawn, laid out nor hit.
    pub visible: bool,
    /// The widget's own enabled flag. See [`WidgetTree::is_enabled`](super::WidgetTree::is_enabled).
    pub enabled: bool,
    /// Lets the widget resize itself to its content.
    pub auto_size: bool,
    /// Spacing used by the parent's layout.
    pub margin: Margin,
    /// Arguments for the parent's layout.
    pub layout_args: LayoutArgs,
    pub(crate) focused: bool,
    pub(crate) parent: Option<WidgetId>,
    pub(crate) style: Option<Arc<Style>>,
}

impl WidgetState {
    /// Creates a detached state with the given size.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            name: String::new(),
            bounds: Rect::new(0.0, 0.0, width, height),
            visible: true,
            enabled: true,
            auto_size: false,
            margin: Margin::default(),
            layout_args: LayoutArgs::None,
            focused: false,
            parent: None,
            style: None,
        }
    }

    /// Whether this widget holds keyboard focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Parent panel, `None` for roots.
    #[must_use]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// The style this widget draws with.
    #[must_use]
    pub fn style(&self) -> Option<&Arc<Style>> {
        self.style.as_ref()
    }
}

/// Hover and press flags of pointer-driven widgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerState {
    /// Pointer is over the widget.
    pub hovered: bool,
    /// A press started inside the widget and has not been released.
    pub pressed: bool,
}

impl PointerState {
    /// Drops both flags.
    pub fn reset(&mut self) {
        self.hovered = false;
        self.pressed = false;
    }
}

/// Callbacks attached to a widget, invoked with the widget's id.
pub struct Listeners<A: ?Sized> {
    owner: WidgetId,
    callbacks: Vec<Box<dyn FnMut(WidgetId, &A)>>,
}

impl<A: ?Sized> Listeners<A> {
    /// An empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            owner: WidgetId::DETACHED,
            callbacks: Vec::new(),
        }
    }

    /// Appends a callback.
    pub fn add(&mut self, callback: impl FnMut(WidgetId, &A) + 'static) {
        self.callbacks.push(Box::new(callback));
    }

    /// Number of callbacks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns true if no callback is attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub(crate) fn set_owner(&mut self, owner: WidgetId) {
        self.owner = owner;
    }

    pub(crate) fn emit(&mut self, arg: &A) {
        for callback in &mut self.callbacks {
            callback(self.owner, arg);
        }
    }
}

impl<A: ?Sized> Default for Listeners<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ?Sized> fmt::Debug for Listeners<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("owner", &self.owner)
            .field("len", &self.callbacks.len())
            .finish()
    }
}

/// Everything a widget may look at while it is updated, drawn or offered
/// an event.
///
/// Rects are in output pixels.
#[derive(Debug, Clone, Copy)]
pub struct WidgetContext<'a> {
    /// The widget.
    pub id: WidgetId,
    /// Its style, if it has one.
    pub style: Option<&'a Style>,
    /// Frame settings.
    pub config: &'a TuiConfig,
    /// Output pixels per virtual unit, per axis.
    pub scale: (f32, f32),
    /// Bounds clipped by every ancestor; used for hit testing.
    pub bounds: Rect,
    /// Unclipped bounds; used for drawing.
    pub draw_bounds: Rect,
    /// Own flag and every ancestor's.
    pub enabled: bool,
    /// Keyboard focus.
    pub focused: bool,
}

impl<'a> WidgetContext<'a> {
    /// Looks up a style region, tracing when it is missing.
    #[must_use]
    pub fn patch(&self, name: &str) -> Option<&'a NinePatch> {
        let patch = self.style.and_then(|style| style.texture(name));
        if patch.is_none() {
            trace!("Widget {} skips missing style region {}", self.id, name);
        }
        patch
    }

    /// Returns true if `(x, y)` hits the widget.
    #[must_use]
    pub fn hit(&self, x: f32, y: f32) -> bool {
        self.bounds.contains(x, y)
    }

    /// Ratio between virtual width and height.
    #[must_use]
    pub fn virtual_aspect(&self) -> f32 {
        self.config.virtual_width / self.config.virtual_height
    }
}

/// Per-kind behavior. The tree supplies geometry and handles focus;
/// kinds only draw themselves and react to events.
pub trait Behavior {
    /// Recomputes derived state once per frame.
    fn update(&mut self, _ctx: &WidgetContext<'_>, _renderer: &Renderer, _dt: f32) {}

    /// Content size in virtual units, applied when the widget auto-sizes.
    fn preferred_size(&self) -> Option<(f32, f32)> {
        None
    }

    /// Draws the widget. Children are drawn by the tree afterwards.
    fn render(&mut self, _ctx: &WidgetContext<'_>, _renderer: &mut Renderer) {}

    /// Offers an event. Unconsumed events fall through to focus handling.
    fn handle_event(&mut self, _ctx: &WidgetContext<'_>, _event: &Event) -> EventStatus {
        EventStatus::Available
    }

    /// Tells the widget its id so listeners can report it.
    fn set_owner(&mut self, _id: WidgetId) {}
}

/// A concrete widget type that can be stored in a tree.
pub trait Component: Behavior + Sized {
    /// Size of a freshly created widget, in virtual units.
    const SIZE: (f32, f32);
    /// Whether a fresh widget sizes itself to its content.
    const AUTO_SIZE: bool;

    /// Wraps `self` in the closed widget enum.
    fn into_kind(self) -> super::WidgetKind;

    /// Borrows the concrete widget out of `kind`.
    fn from_kind(kind: &super::WidgetKind) -> Option<&Self>;

    /// Mutably borrows the concrete widget out of `kind`.
    fn from_kind_mut(kind: &mut super::WidgetKind) -> Option<&mut Self>;
}

/// Implements [`Component`] for a widget type.
macro_rules! component {
    ($ty:ident, $width:expr, $height:expr, auto_size = $auto:expr) => {
        impl $crate::widget::Component for $ty {
            const SIZE: (f32, f32) = ($width, $height);
            const AUTO_SIZE: bool = $auto;

            fn into_kind(self) -> $crate::widget::WidgetKind {
                $crate::widget::WidgetKind::$ty(self)
            }

            fn from_kind(kind: &$crate::widget::WidgetKind) -> Option<&Self> {
                match kind {
                    $crate::widget::WidgetKind::$ty(inner) => Some(inner),
                    _ => None,
                }
            }

            fn from_kind_mut(kind: &mut $crate::widget::WidgetKind) -> Option<&mut Self> {
                match kind {
                    $crate::widget::WidgetKind::$ty(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

pub(crate) use component;

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_widget_id_display() {
        assert_eq!(WidgetId::new(42).to_string(), "#42");
        assert_eq!(WidgetId::DETACHED.raw(), 0);
    }

    #[test]
    fn test_listeners_receive_owner() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut listeners: Listeners<bool> = Listeners::new();
        listeners.add(move |id, prev| sink.borrow_mut().push((id, *prev)));
        listeners.set_owner(WidgetId(3));
        listeners.emit(&true);

        assert_eq!(*seen.borrow(), vec![(WidgetId(3), true)]);
        assert_eq!(listeners.len(), 1);
    }

    #[test]
    fn test_default_state() {
        let state = WidgetState::new(50.0, 50.0);
        assert_eq!(state.margin, Margin::uniform(2.0));
        assert!(state.visible && state.enabled && !state.is_focused());
        assert_eq!(state.parent(), None);
    }
}
