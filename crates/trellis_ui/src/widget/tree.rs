//! Widget tree for hierarchical UI management.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;
use trellis_render::{Rect, Renderer};

use super::{Behavior, Widget, WidgetContext, WidgetId, WidgetKind, WidgetState};
use crate::config::TuiConfig;
use crate::error::{UiError, UiResult};
use crate::event::{Event, EventStatus};
use crate::layout::{LayoutArgs, LayoutItem};
use crate::style::Style;
use crate::widget::Panel;

/// Where a widget's parent sits, as seen from the root.
///
/// All fields are in virtual units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Root-space position of the parent's top-left corner.
    pub origin: (f32, f32),
    /// Intersection of every ancestor's bounds; `None` for roots.
    pub clip: Option<Rect>,
    /// Every ancestor is enabled.
    pub enabled: bool,
}

impl Placement {
    /// Placement of a root widget.
    pub const ROOT: Self = Self {
        origin: (0.0, 0.0),
        clip: None,
        enabled: true,
    };

    /// `local` moved into root space, ignoring clipping.
    #[must_use]
    pub fn draw_bounds(&self, local: Rect) -> Rect {
        local.translate(self.origin.0, self.origin.1)
    }

    /// `local` moved into root space and clipped by every ancestor.
    #[must_use]
    pub fn hit_bounds(&self, local: Rect) -> Rect {
        let bounds = self.draw_bounds(local);
        match self.clip {
            Some(clip) => bounds.intersect(&clip),
            None => bounds,
        }
    }

    /// Placement handed to the children of `parent`.
    #[must_use]
    pub fn child(&self, parent: &WidgetState) -> Self {
        let draw = self.draw_bounds(parent.bounds);
        Self {
            origin: (draw.x, draw.y),
            clip: Some(self.hit_bounds(parent.bounds)),
            enabled: self.enabled && parent.enabled,
        }
    }
}

/// Per-frame values every tree walk needs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Frame<'f> {
    pub config: &'f TuiConfig,
    /// Output pixels per virtual unit.
    pub scale: (f32, f32),
}

impl<'f> Frame<'f> {
    pub fn new(config: &'f TuiConfig, output: (u32, u32)) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let scale = (
            output.0 as f32 / config.virtual_width,
            output.1 as f32 / config.virtual_height,
        );
        Self { config, scale }
    }

    fn context<'a>(
        &self,
        id: WidgetId,
        state: &'a WidgetState,
        placement: Placement,
    ) -> WidgetContext<'a>
    where
        'f: 'a,
    {
        let (sx, sy) = self.scale;
        WidgetContext {
            id,
            style: state.style.as_deref(),
            config: self.config,
            scale: self.scale,
            bounds: placement.hit_bounds(state.bounds).scale(sx, sy),
            draw_bounds: placement.draw_bounds(state.bounds).scale(sx, sy),
            enabled: placement.enabled && state.enabled,
            focused: state.focused,
        }
    }

    /// Scissor rect for a widget, grown by one pixel upwards.
    fn clip_rect(&self, state: &WidgetState, placement: Placement) -> Rect {
        let mut rect = placement
            .hit_bounds(state.bounds)
            .scale(self.scale.0, self.scale.1);
        rect.y -= 1.0;
        rect.height += 1.0;
        rect
    }
}

/// Manages the widget hierarchy.
pub struct WidgetTree {
    /// Widgets indexed by ID.
    widgets: HashMap<WidgetId, Widget>,
    /// Root widget IDs, in insertion order.
    roots: Vec<WidgetId>,
    /// Parent-child relationships.
    children: HashMap<WidgetId, Vec<WidgetId>>,
    /// ID counter for generating unique IDs.
    next_id: u64,
}

impl WidgetTree {
    /// Creates a new empty widget tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            widgets: HashMap::with_capacity(64),
            roots: Vec::with_capacity(8),
            children: HashMap::with_capacity(64),
            next_id: 1,
        }
    }

    fn next_id(&mut self) -> WidgetId {
        let id = WidgetId::new(self.next_id);
        self.next_id += 1;
        id
    }

    fn register(&mut self, mut widget: Widget) -> WidgetId {
        let id = self.next_id();
        widget.id = id;
        widget.kind.set_owner(id);
        self.widgets.insert(id, widget);
        self.children.insert(id, Vec::new());
        id
    }

    /// Adds a top-level widget.
    pub fn insert_root(&mut self, widget: Widget, style: Option<Arc<Style>>) -> WidgetId {
        let id = self.register(widget);
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.state.style = style;
        }
        self.roots.push(id);
        debug!("Attached {} as root", id);
        id
    }

    /// Adds `widget` as the last child of the panel `parent`.
    ///
    /// The child inherits the parent's style.
    pub fn attach(&mut self, parent: WidgetId, widget: Widget, args: LayoutArgs) -> UiResult<WidgetId> {
        let style = self.container(parent)?.state.style.clone();
        let id = self.register(widget);
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.state.parent = Some(parent);
            widget.state.layout_args = args;
            widget.state.style = style;
        }
        self.children.entry(parent).or_default().push(id);
        debug!("Attached {} under {}", id, parent);
        Ok(id)
    }

    /// Moves `id` to the end of `parent`'s children.
    ///
    /// Moving a widget under itself or one of its descendants fails.
    pub fn reparent(&mut self, id: WidgetId, parent: WidgetId, args: LayoutArgs) -> UiResult<()> {
        if !self.widgets.contains_key(&id) {
            return Err(UiError::WidgetNotFound(id));
        }
        let style = self.container(parent)?.state.style.clone();
        let mut cursor = Some(parent);
        while let Some(ancestor) = cursor {
            if ancestor == id {
                return Err(UiError::CyclicParent { child: id, parent });
            }
            cursor = self.parent(ancestor);
        }

        self.detach(id);
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.state.parent = Some(parent);
            widget.state.layout_args = args;
        }
        self.children.entry(parent).or_default().push(id);
        if let Some(style) = style {
            self.refresh_style_from(id, &style);
        }
        debug!("Moved {} under {}", id, parent);
        Ok(())
    }

    /// Removes a widget and all its descendants.
    ///
    /// Returns every removed id, `id` first.
    pub fn remove(&mut self, id: WidgetId) -> UiResult<Vec<WidgetId>> {
        if !self.widgets.contains_key(&id) {
            return Err(UiError::WidgetNotFound(id));
        }
        self.detach(id);

        let mut removed = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(children) = self.children.remove(&next) {
                stack.extend(children.into_iter().rev());
            }
            self.widgets.remove(&next);
            removed.push(next);
        }
        debug!("Removed {} widget(s) rooted at {}", removed.len(), id);
        Ok(removed)
    }

    /// Unlinks `id` from its parent or from the roots.
    fn detach(&mut self, id: WidgetId) {
        match self.parent(id) {
            Some(parent) => {
                if let Some(siblings) = self.children.get_mut(&parent) {
                    siblings.retain(|&c| c != id);
                }
                if let Some(layout) = self
                    .widgets
                    .get_mut(&parent)
                    .and_then(|w| w.kind.as_panel_mut())
                    .and_then(|p| p.layout.as_mut())
                {
                    layout.forget(id);
                }
            }
            None => self.roots.retain(|&r| r != id),
        }
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.state.parent = None;
        }
    }

    fn container(&self, id: WidgetId) -> UiResult<&Widget> {
        let widget = self.widgets.get(&id).ok_or(UiError::WidgetNotFound(id))?;
        if widget.kind.as_panel().is_none() {
            return Err(UiError::NotAContainer(id));
        }
        Ok(widget)
    }

    /// Gets a widget by ID.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.get(&id)
    }

    /// Gets mutable access to a widget.
    #[must_use]
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.widgets.get_mut(&id)
    }

    /// Returns true if `id` is alive.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.widgets.contains_key(&id)
    }

    /// Number of live widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns true if the tree holds no widget.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Returns the children of a widget.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns all root widgets.
    #[must_use]
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// Parent of `id`, `None` for roots and unknown ids.
    #[must_use]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.widgets.get(&id).and_then(|w| w.state.parent)
    }

    /// Own flag and every ancestor's.
    #[must_use]
    pub fn is_enabled(&self, id: WidgetId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.widgets.get(&current) {
                Some(widget) if widget.state.enabled => cursor = widget.state.parent,
                _ => return false,
            }
        }
        true
    }

    /// Placement of `id`'s parent chain.
    #[must_use]
    pub fn placement(&self, id: WidgetId) -> Option<Placement> {
        let mut chain = Vec::new();
        let mut cursor = self.widgets.get(&id)?.state.parent;
        while let Some(ancestor) = cursor {
            let widget = self.widgets.get(&ancestor)?;
            chain.push(&widget.state);
            cursor = widget.state.parent;
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(Placement::ROOT, |placement, state| placement.child(state)),
        )
    }

    /// Hit bounds of `id` in output pixels.
    #[must_use]
    pub fn corrected_bounds(&self, id: WidgetId, scale: (f32, f32)) -> Option<Rect> {
        let placement = self.placement(id)?;
        let state = &self.widgets.get(&id)?.state;
        Some(placement.hit_bounds(state.bounds).scale(scale.0, scale.1))
    }

    /// Draw bounds of `id` in output pixels.
    #[must_use]
    pub fn corrected_draw_bounds(&self, id: WidgetId, scale: (f32, f32)) -> Option<Rect> {
        let placement = self.placement(id)?;
        let state = &self.widgets.get(&id)?.state;
        Some(placement.draw_bounds(state.bounds).scale(scale.0, scale.1))
    }

    /// Returns all widget IDs in depth-first order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = WidgetId> + '_ {
        WidgetDfsIterator {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// First widget named `name`, in depth-first order.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.iter_dfs()
            .find(|id| self.widgets.get(id).is_some_and(|w| w.state.name == name))
    }

    /// Hands `style` to every widget.
    pub fn refresh_style(&mut self, style: &Arc<Style>) {
        for root in self.roots.clone() {
            self.refresh_style_from(root, style);
        }
        debug!("Refreshed style of {} widget(s)", self.widgets.len());
    }

    fn refresh_style_from(&mut self, id: WidgetId, style: &Arc<Style>) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(widget) = self.widgets.get_mut(&next) {
                widget.state.style = Some(Arc::clone(style));
            }
            stack.extend(self.children(next).iter().copied());
        }
    }

    pub(crate) fn set_focused(&mut self, id: WidgetId, focused: bool) {
        if let Some(widget) = self.widgets.get_mut(&id) {
            widget.state.focused = focused;
        }
    }

    /// Updates every widget, then lays out panels bottom-up.
    pub(crate) fn update(&mut self, frame: &Frame<'_>, renderer: &Renderer, dt: f32) {
        for root in self.roots.clone() {
            self.update_node(root, Placement::ROOT, frame, renderer, dt);
        }
    }

    fn update_node(
        &mut self,
        id: WidgetId,
        placement: Placement,
        frame: &Frame<'_>,
        renderer: &Renderer,
        dt: f32,
    ) {
        let Some(Widget { state, kind, .. }) = self.widgets.get_mut(&id) else {
            return;
        };
        let ctx = frame.context(id, state, placement);
        kind.update(&ctx, renderer, dt);
        if state.auto_size {
            if let Some((width, height)) = kind.preferred_size() {
                state.bounds.width = width;
                state.bounds.height = height;
            }
        }
        if kind.as_panel().is_none() {
            return;
        }

        let inner = placement.child(state);
        let children = self.children(id).to_vec();
        for &child in &children {
            self.update_node(child, inner, frame, renderer, dt);
        }
        self.perform_layout(id, &children);
    }

    fn perform_layout(&mut self, id: WidgetId, children: &[WidgetId]) {
        let items: Vec<LayoutItem> = children
            .iter()
            .filter_map(|child| self.widgets.get(child))
            .map(|w| LayoutItem {
                id: w.id,
                bounds: w.state.bounds,
                margin: w.state.margin,
                visible: w.state.visible,
                auto_size: w.state.auto_size,
            })
            .collect();
        let args: Vec<(WidgetId, LayoutArgs)> = children
            .iter()
            .filter_map(|child| self.widgets.get(child).map(|w| (w.id, w.state.layout_args)))
            .collect();

        let Some(parent) = self.widgets.get_mut(&id) else {
            return;
        };
        let bounds = parent.state.bounds;
        let Some(layout) = parent.kind.as_panel_mut().and_then(|p| p.layout.as_mut()) else {
            return;
        };
        for (child, child_args) in args {
            layout.set_args(child, child_args);
        }
        let placed = layout.arrange(bounds, Panel::content_bounds(bounds), &items);

        for (child, rect) in placed {
            if let Some(widget) = self.widgets.get_mut(&child) {
                widget.state.bounds = rect;
            }
        }
    }

    /// Draws every visible root, each inside its own clip region.
    pub(crate) fn render(&mut self, frame: &Frame<'_>, renderer: &mut Renderer) {
        for root in self.roots.clone() {
            self.render_clipped(root, Placement::ROOT, frame, renderer);
        }
    }

    fn render_clipped(
        &mut self,
        id: WidgetId,
        placement: Placement,
        frame: &Frame<'_>,
        renderer: &mut Renderer,
    ) {
        let Some(widget) = self.widgets.get(&id) else {
            return;
        };
        if !widget.state.visible {
            return;
        }
        if renderer.clip_start(frame.clip_rect(&widget.state, placement)) {
            self.render_node(id, placement, frame, renderer);
            renderer.clip_end();
        }
    }

    fn render_node(
        &mut self,
        id: WidgetId,
        placement: Placement,
        frame: &Frame<'_>,
        renderer: &mut Renderer,
    ) {
        let Some(Widget { state, kind, .. }) = self.widgets.get_mut(&id) else {
            return;
        };
        let ctx = frame.context(id, state, placement);
        kind.render(&ctx, renderer);
        if kind.as_panel().is_none() {
            return;
        }

        let inner = placement.child(state);
        for child in self.children(id).to_vec() {
            self.render_clipped(child, inner, frame, renderer);
        }
    }

    /// Offers `event` to `id` and, for panels, its subtree first.
    ///
    /// An unconsumed press inside an enabled widget records a focus
    /// request in `focus` and consumes the event.
    pub(crate) fn dispatch(
        &mut self,
        id: WidgetId,
        event: &Event,
        frame: &Frame<'_>,
        focus: &mut Option<WidgetId>,
    ) -> EventStatus {
        match self.placement(id) {
            Some(placement) => self.dispatch_node(id, placement, event, frame, focus),
            None => EventStatus::Available,
        }
    }

    fn dispatch_node(
        &mut self,
        id: WidgetId,
        placement: Placement,
        event: &Event,
        frame: &Frame<'_>,
        focus: &mut Option<WidgetId>,
    ) -> EventStatus {
        let Some(widget) = self.widgets.get(&id) else {
            return EventStatus::Available;
        };
        if widget.kind.as_panel().is_some() {
            let inner = placement.child(&widget.state);
            for child in self.children(id).to_vec() {
                let live = self
                    .widgets
                    .get(&child)
                    .is_some_and(|w| inner.enabled && w.state.enabled && w.state.visible);
                if live && self.dispatch_node(child, inner, event, frame, focus).is_consumed() {
                    return EventStatus::Consumed;
                }
            }
        }

        let Some(Widget { state, kind, .. }) = self.widgets.get_mut(&id) else {
            return EventStatus::Available;
        };
        let ctx = frame.context(id, state, placement);
        if kind.handle_event(&ctx, event).is_consumed() {
            return EventStatus::Consumed;
        }
        if let Event::MouseButton(e) = event {
            if e.pressed && ctx.enabled && state.visible && ctx.hit(e.x, e.y) {
                *focus = Some(id);
                return EventStatus::Consumed;
            }
        }
        EventStatus::Available
    }

    /// Offers `event` to `id`'s own handler only.
    pub(crate) fn deliver(&mut self, id: WidgetId, event: &Event, frame: &Frame<'_>) -> EventStatus {
        let Some(placement) = self.placement(id) else {
            return EventStatus::Available;
        };
        let Some(Widget { state, kind, .. }) = self.widgets.get_mut(&id) else {
            return EventStatus::Available;
        };
        let ctx = frame.context(id, state, placement);
        kind.handle_event(&ctx, event)
    }

    /// Concrete component of `id`.
    #[must_use]
    pub fn component<C: super::Component>(&self, id: WidgetId) -> Option<&C> {
        self.widgets.get(&id).and_then(Widget::component)
    }

    /// Concrete component of `id`.
    #[must_use]
    pub fn component_mut<C: super::Component>(&mut self, id: WidgetId) -> Option<&mut C> {
        self.widgets.get_mut(&id).and_then(Widget::component_mut)
    }

    /// Kind of `id`.
    #[must_use]
    pub fn kind(&self, id: WidgetId) -> Option<&WidgetKind> {
        self.widgets.get(&id).map(|w| &w.kind)
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("widgets", &self.widgets.len())
            .field("roots", &self.roots)
            .finish()
    }
}

/// Depth-first iterator over widget tree.
struct WidgetDfsIterator<'a> {
    tree: &'a WidgetTree,
    stack: Vec<WidgetId>,
}

impl Iterator for WidgetDfsIterator<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Reverse so children come out left to right.
        if let Some(children) = self.tree.children.get(&id) {
            for &child in children.iter().rev() {
                self.stack.push(child);
            }
        }

        Some(id)
    }
}
