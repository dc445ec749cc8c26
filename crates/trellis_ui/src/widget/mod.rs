//! Widget system for UI components.
//!
//! Widgets live in a [`WidgetTree`] arena and are addressed by [`WidgetId`].
//! Every widget is a [`WidgetState`] plus one closed [`WidgetKind`]; the
//! tree supplies geometry, clipping and focus, the kind supplies behavior.

mod button;
mod checkbox;
mod color_picker;
mod core;
mod edit;
mod label;
mod panel;
mod slider;
mod tree;

pub use self::button::Button;
pub use self::checkbox::CheckBox;
pub use self::color_picker::ColorPicker;
pub use self::core::{
    Behavior, Component, Listeners, PointerState, WidgetContext, WidgetId, WidgetState,
};
pub use self::edit::Edit;
pub use self::label::{HAlign, Label, TextAlign, VAlign};
pub use self::panel::Panel;
pub use self::slider::{round_partial, Orientation, Range, Slider};
pub use self::tree::{Placement, WidgetTree};

pub(crate) use self::tree::Frame;

use trellis_render::Renderer;

use crate::event::{Event, EventStatus};

/// Every widget kind the toolkit knows.
#[derive(Debug)]
pub enum WidgetKind {
    /// Container.
    Panel(Panel),
    /// Static text.
    Label(Label),
    /// Push button.
    Button(Button),
    /// Toggle.
    CheckBox(CheckBox),
    /// Value slider.
    Slider(Slider),
    /// Color wheel.
    ColorPicker(ColorPicker),
    /// Text field.
    Edit(Edit),
}

macro_rules! each_kind {
    ($kind:expr, $inner:ident => $body:expr) => {
        match $kind {
            WidgetKind::Panel($inner) => $body,
            WidgetKind::Label($inner) => $body,
            WidgetKind::Button($inner) => $body,
            WidgetKind::CheckBox($inner) => $body,
            WidgetKind::Slider($inner) => $body,
            WidgetKind::ColorPicker($inner) => $body,
            WidgetKind::Edit($inner) => $body,
        }
    };
}

impl WidgetKind {
    /// Kind name, for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Panel(_) => "Panel",
            Self::Label(_) => "Label",
            Self::Button(_) => "Button",
            Self::CheckBox(_) => "CheckBox",
            Self::Slider(_) => "Slider",
            Self::ColorPicker(_) => "ColorPicker",
            Self::Edit(_) => "Edit",
        }
    }

    /// The panel, if this is one.
    #[must_use]
    pub fn as_panel(&self) -> Option<&Panel> {
        match self {
            Self::Panel(panel) => Some(panel),
            _ => None,
        }
    }

    /// The panel, if this is one.
    #[must_use]
    pub fn as_panel_mut(&mut self) -> Option<&mut Panel> {
        match self {
            Self::Panel(panel) => Some(panel),
            _ => None,
        }
    }
}

impl Behavior for WidgetKind {
    fn update(&mut self, ctx: &WidgetContext<'_>, renderer: &Renderer, dt: f32) {
        each_kind!(self, w => w.update(ctx, renderer, dt));
    }

    fn preferred_size(&self) -> Option<(f32, f32)> {
        each_kind!(self, w => w.preferred_size())
    }

    fn render(&mut self, ctx: &WidgetContext<'_>, renderer: &mut Renderer) {
        each_kind!(self, w => w.render(ctx, renderer));
    }

    fn handle_event(&mut self, ctx: &WidgetContext<'_>, event: &Event) -> EventStatus {
        each_kind!(self, w => w.handle_event(ctx, event))
    }

    fn set_owner(&mut self, id: WidgetId) {
        each_kind!(self, w => w.set_owner(id));
    }
}

/// A widget: shared state plus its kind.
#[derive(Debug)]
pub struct Widget {
    id: WidgetId,
    /// Geometry and flags.
    pub state: WidgetState,
    /// Kind-specific data and behavior.
    pub kind: WidgetKind,
}

impl Widget {
    /// Wraps a component in a detached widget with the component's defaults.
    #[must_use]
    pub fn new<C: Component>(component: C) -> Self {
        let (width, height) = C::SIZE;
        let mut state = WidgetState::new(width, height);
        state.auto_size = C::AUTO_SIZE;
        Self {
            id: WidgetId::DETACHED,
            state,
            kind: component.into_kind(),
        }
    }

    /// Sets the lookup name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.state.name = name.into();
        self
    }

    /// Sets the size in virtual units.
    #[must_use]
    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.state.bounds.width = width;
        self.state.bounds.height = height;
        self
    }

    /// Sets the position in the parent's space.
    #[must_use]
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.state.bounds.x = x;
        self.state.bounds.y = y;
        self
    }

    /// Id in the tree, [`WidgetId::DETACHED`] before insertion.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The concrete component.
    #[must_use]
    pub fn component<C: Component>(&self) -> Option<&C> {
        C::from_kind(&self.kind)
    }

    /// The concrete component.
    #[must_use]
    pub fn component_mut<C: Component>(&mut self) -> Option<&mut C> {
        C::from_kind_mut(&mut self.kind)
    }
}

impl<C: Component> From<C> for Widget {
    fn from(component: C) -> Self {
        Self::new(component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_defaults() {
        let label = Widget::new(Label::new("a"));
        assert_eq!(label.state.bounds.width, 190.0);
        assert!(label.state.auto_size);

        let button = Widget::new(Button::new("b"));
        assert!(!button.state.auto_size);

        let slider = Widget::new(Slider::default());
        assert_eq!((slider.state.bounds.width, slider.state.bounds.height), (120.0, 9.0));
    }

    #[test]
    fn test_component_downcast() {
        let mut widget = Widget::new(CheckBox::new("c")).named("opt");
        assert!(widget.component::<Label>().is_none());
        widget
            .component_mut::<CheckBox>()
            .map(|c| c.set_checked(true));
        assert_eq!(widget.component::<CheckBox>().map(CheckBox::checked), Some(true));
        assert_eq!(widget.state.name, "opt");
        assert_eq!(widget.kind.name(), "CheckBox");
    }
}
