//! Layout strategies for panel children.
//!
//! A layout never touches widget content. It only computes placed bounds
//! (in the parent's local virtual space) from the children's current sizes
//! and margins; the tree writes them back.

use trellis_render::Rect;

use crate::widget::WidgetId;

/// Spacing around a widget, in virtual units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    /// Left edge.
    pub left: f32,
    /// Right edge.
    pub right: f32,
    /// Bottom edge.
    pub bottom: f32,
    /// Top edge.
    pub top: f32,
}

impl Margin {
    /// The same margin on every side.
    #[must_use]
    pub const fn uniform(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            bottom: value,
            top: value,
        }
    }

    /// Creates a margin from left, right, bottom and top.
    #[must_use]
    pub const fn new(left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
        }
    }

    /// Left plus right.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Bottom plus top.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.bottom + self.top
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(2.0)
    }
}

/// Slot of a [`BorderLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSlot {
    /// Left column.
    Left,
    /// Right column.
    Right,
    /// Bottom row.
    Bottom,
    /// Top row.
    Top,
    /// Whatever remains.
    Center,
}

/// Per-child data interpreted by the parent's layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutArgs {
    /// No preference; border layouts treat it as the center slot.
    #[default]
    None,
    /// Border layout slot.
    Border(BorderSlot),
}

/// What a layout needs to know about one child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutItem {
    /// The child.
    pub id: WidgetId,
    /// Current local bounds.
    pub bounds: Rect,
    /// Its margin.
    pub margin: Margin,
    /// Whether it takes part in the layout.
    pub visible: bool,
    /// Whether it may be stretched.
    pub auto_size: bool,
}

/// Five-slot layout.
///
/// ```text
/// ┌──────────────────────┐
/// │         top          │
/// ├──────┬────────┬──────┤
/// │ left │ center │ right│
/// ├──────┴────────┴──────┤
/// │        bottom        │
/// └──────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BorderLayout {
    left: Option<WidgetId>,
    right: Option<WidgetId>,
    bottom: Option<WidgetId>,
    top: Option<WidgetId>,
    center: Option<WidgetId>,
}

impl BorderLayout {
    /// An empty border layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The widget in `slot`.
    #[must_use]
    pub fn slot(&self, slot: BorderSlot) -> Option<WidgetId> {
        match slot {
            BorderSlot::Left => self.left,
            BorderSlot::Right => self.right,
            BorderSlot::Bottom => self.bottom,
            BorderSlot::Top => self.top,
            BorderSlot::Center => self.center,
        }
    }

    fn slot_mut(&mut self, slot: BorderSlot) -> &mut Option<WidgetId> {
        match slot {
            BorderSlot::Left => &mut self.left,
            BorderSlot::Right => &mut self.right,
            BorderSlot::Bottom => &mut self.bottom,
            BorderSlot::Top => &mut self.top,
            BorderSlot::Center => &mut self.center,
        }
    }

    /// Puts `id` in the slot named by `args`, replacing any occupant.
    pub fn assign(&mut self, id: WidgetId, args: LayoutArgs) {
        let slot = match args {
            LayoutArgs::Border(slot) => slot,
            LayoutArgs::None => BorderSlot::Center,
        };
        *self.slot_mut(slot) = Some(id);
    }

    /// Empties every slot holding `id`.
    pub fn forget(&mut self, id: WidgetId) {
        for slot in [
            &mut self.left,
            &mut self.right,
            &mut self.bottom,
            &mut self.top,
            &mut self.center,
        ] {
            if *slot == Some(id) {
                *slot = None;
            }
        }
    }

    fn arrange(&self, content: Rect, items: &[LayoutItem]) -> Vec<(WidgetId, Rect)> {
        let find = |slot: BorderSlot| {
            self.slot(slot)
                .and_then(|id| items.iter().find(|item| item.id == id))
        };

        let mut x0 = content.x;
        let mut y0 = content.y;
        let mut x1 = content.right();
        let mut y1 = content.bottom();
        let mut out = Vec::with_capacity(5);

        if let Some(item) = find(BorderSlot::Top) {
            let m = item.margin;
            let h = item.bounds.height;
            out.push((item.id, Rect::new(x0 + m.left, y0 + m.top, (x1 - x0) - m.horizontal(), h)));
            y0 += h + m.vertical();
        }
        if let Some(item) = find(BorderSlot::Bottom) {
            let m = item.margin;
            let h = item.bounds.height;
            out.push((
                item.id,
                Rect::new(x0 + m.left, y1 - (h + m.bottom), (x1 - x0) - m.horizontal(), h),
            ));
            y1 -= h + m.vertical();
        }
        if let Some(item) = find(BorderSlot::Left) {
            let m = item.margin;
            let w = item.bounds.width;
            out.push((item.id, Rect::new(x0 + m.left, y0 + m.top, w, (y1 - y0) - m.vertical())));
            x0 += w + m.horizontal();
        }
        if let Some(item) = find(BorderSlot::Right) {
            let m = item.margin;
            let w = item.bounds.width;
            out.push((
                item.id,
                Rect::new(x1 - (w + m.right), y0 + m.top, w, (y1 - y0) - m.vertical()),
            ));
            x1 -= w + m.horizontal();
        }
        if let Some(item) = find(BorderSlot::Center) {
            let m = item.margin;
            out.push((
                item.id,
                Rect::new(
                    x0 + m.left,
                    y0 + m.top,
                    (x1 - x0) - m.horizontal(),
                    (y1 - y0) - m.vertical(),
                ),
            ));
        }
        out
    }
}

/// Layout strategy of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Children top to bottom, stretched to the panel width.
    Stack,
    /// Children top to bottom; auto-sized children take the full width.
    Flow,
    /// Five named slots.
    Border(BorderLayout),
}

impl Layout {
    /// A border layout with empty slots.
    #[must_use]
    pub fn border() -> Self {
        Self::Border(BorderLayout::new())
    }

    /// Records a child's layout arguments. Only border layouts keep state.
    pub fn set_args(&mut self, id: WidgetId, args: LayoutArgs) {
        if let Self::Border(border) = self {
            border.assign(id, args);
        }
    }

    /// Drops any state referring to `id`.
    pub fn forget(&mut self, id: WidgetId) {
        if let Self::Border(border) = self {
            border.forget(id);
        }
    }

    /// Computes placed bounds for `items`.
    ///
    /// `parent` is the panel's own bounds and `content` its content area,
    /// both in the panel's local space for `content`. Children that are
    /// skipped are left out of the result.
    #[must_use]
    pub fn arrange(&self, parent: Rect, content: Rect, items: &[LayoutItem]) -> Vec<(WidgetId, Rect)> {
        match self {
            Self::Stack => {
                let mut next_y = 0.0;
                items
                    .iter()
                    .filter(|item| item.visible)
                    .map(|item| {
                        let m = item.margin;
                        next_y += m.top;
                        let placed = Rect::new(
                            m.left,
                            next_y,
                            parent.width - m.horizontal(),
                            item.bounds.height,
                        );
                        next_y += item.bounds.height;
                        (item.id, placed)
                    })
                    .collect()
            }
            Self::Flow => {
                let mut next_y = 0.0;
                items
                    .iter()
                    .filter(|item| item.visible)
                    .map(|item| {
                        let m = item.margin;
                        let width = if item.auto_size {
                            parent.width
                        } else {
                            item.bounds.width
                        };
                        next_y += m.top;
                        let placed = Rect::new(m.left, next_y, width, item.bounds.height);
                        next_y += item.bounds.height;
                        (item.id, placed)
                    })
                    .collect()
            }
            Self::Border(border) => border.arrange(content, items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: u64, w: f32, h: f32, margin: Margin) -> LayoutItem {
        LayoutItem {
            id: WidgetId(id),
            bounds: Rect::new(0.0, 0.0, w, h),
            margin,
            visible: true,
            auto_size: false,
        }
    }

    const PARENT: Rect = Rect::new(0.0, 0.0, 100.0, 100.0);
    const CONTENT: Rect = Rect::new(1.0, 1.0, 98.0, 98.0);

    #[test]
    fn test_stack_accumulates_top_margins() {
        let items = [
            item(1, 10.0, 20.0, Margin::new(2.0, 2.0, 2.0, 2.0)),
            item(2, 10.0, 30.0, Margin::new(2.0, 2.0, 2.0, 3.0)),
        ];
        let placed = Layout::Stack.arrange(PARENT, CONTENT, &items);

        assert_eq!(placed[0], (WidgetId(1), Rect::new(2.0, 2.0, 96.0, 20.0)));
        assert_eq!(placed[1], (WidgetId(2), Rect::new(2.0, 25.0, 96.0, 30.0)));
    }

    #[test]
    fn test_stack_skips_invisible_children() {
        let mut hidden = item(1, 10.0, 50.0, Margin::default());
        hidden.visible = false;
        let items = [hidden, item(2, 10.0, 10.0, Margin::default())];
        let placed = Layout::Stack.arrange(PARENT, CONTENT, &items);

        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].1.y, 2.0);
    }

    #[test]
    fn test_flow_is_single_column() {
        let mut wide = item(1, 10.0, 20.0, Margin::default());
        wide.auto_size = true;
        let items = [wide, item(2, 30.0, 10.0, Margin::default())];
        let placed = Layout::Flow.arrange(PARENT, CONTENT, &items);

        assert_eq!(placed[0].1, Rect::new(2.0, 2.0, 100.0, 20.0));
        assert_eq!(placed[1].1, Rect::new(2.0, 24.0, 30.0, 10.0));
    }

    #[test]
    fn test_border_fills_slots_in_order() {
        let zero = Margin::uniform(0.0);
        let mut layout = Layout::border();
        layout.set_args(WidgetId(1), LayoutArgs::Border(BorderSlot::Top));
        layout.set_args(WidgetId(2), LayoutArgs::Border(BorderSlot::Bottom));
        layout.set_args(WidgetId(3), LayoutArgs::Border(BorderSlot::Left));
        layout.set_args(WidgetId(4), LayoutArgs::Border(BorderSlot::Right));
        layout.set_args(WidgetId(5), LayoutArgs::None);

        let items = [
            item(1, 0.0, 10.0, zero),
            item(2, 0.0, 8.0, zero),
            item(3, 12.0, 0.0, zero),
            item(4, 6.0, 0.0, zero),
            item(5, 0.0, 0.0, zero),
        ];
        let placed = layout.arrange(PARENT, CONTENT, &items);
        let rect = |id| placed.iter().find(|(w, _)| *w == WidgetId(id)).map(|(_, r)| *r);

        assert_eq!(rect(1), Some(Rect::new(1.0, 1.0, 98.0, 10.0)));
        assert_eq!(rect(2), Some(Rect::new(1.0, 91.0, 98.0, 8.0)));
        assert_eq!(rect(3), Some(Rect::new(1.0, 11.0, 12.0, 80.0)));
        assert_eq!(rect(4), Some(Rect::new(93.0, 11.0, 6.0, 80.0)));
        assert_eq!(rect(5), Some(Rect::new(13.0, 11.0, 74.0, 80.0)));
    }

    #[test]
    fn test_border_slot_is_replaced_and_forgotten() {
        let mut layout = Layout::border();
        layout.set_args(WidgetId(1), LayoutArgs::None);
        layout.set_args(WidgetId(2), LayoutArgs::Border(BorderSlot::Center));
        let Layout::Border(border) = layout else {
            panic!("expected a border layout");
        };
        assert_eq!(border.slot(BorderSlot::Center), Some(WidgetId(2)));

        layout.forget(WidgetId(2));
        let Layout::Border(border) = layout else {
            panic!("expected a border layout");
        };
        assert_eq!(border.slot(BorderSlot::Center), None);
    }
}
