//! Axis-aligned rectangles in UI and output space.

/// A rectangle with a top-left origin.
///
/// Width and height may go negative while intersecting; anything narrower or
/// shorter than one unit is treated as empty.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Extent written by [`Rect::intersect`] when the inputs do not overlap.
    pub const EMPTY_EXTENT: f32 = f32::MIN;

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point lies strictly inside the rectangle.
    ///
    /// Points on the boundary are outside.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x > self.x && x < self.right() && y > self.y && y < self.bottom()
    }

    /// Returns true if the open interiors of both rectangles overlap.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        other.x < self.right()
            && other.right() > self.x
            && other.y < self.bottom()
            && other.bottom() > self.y
    }

    /// Returns the overlapping part of both rectangles.
    ///
    /// A negative extent on either axis is replaced by [`Rect::EMPTY_EXTENT`];
    /// use [`Rect::is_empty`] rather than comparing against the sentinel.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let mut width = self.right().min(other.right()) - x;
        let mut height = self.bottom().min(other.bottom()) - y;
        if width < 0.0 {
            width = Self::EMPTY_EXTENT;
        }
        if height < 0.0 {
            height = Self::EMPTY_EXTENT;
        }
        Self::new(x, y, width, height)
    }

    /// Returns a copy with every field multiplied by the given factors.
    ///
    /// Maps virtual UI space onto output pixels.
    #[must_use]
    pub fn scale(&self, sx: f32, sy: f32) -> Self {
        Self::new(self.x * sx, self.y * sy, self.width * sx, self.height * sy)
    }

    /// Returns a copy moved by the given offset.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns true if the rectangle covers less than one unit on either axis.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width < 1.0 || self.height < 1.0
    }
}
