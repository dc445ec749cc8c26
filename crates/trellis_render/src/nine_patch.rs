//! Nine-patch slicing.
//!
//! ```text
//!          left   stretch   right
//!        ┌──────┬─────────┬──────┐
//!  top   │ TL   │   TC    │  TR  │  fixed height
//!        ├──────┼─────────┼──────┤
//!  mid   │ ML   │   C     │  MR  │  stretched
//!        ├──────┼─────────┼──────┤
//!  bottom│ BL   │   BC    │  BR  │  fixed height
//!        └──────┴─────────┴──────┘
//! ```

use crate::geometry::Rect;
use crate::texture::Texture;

/// A texture region with fixed-size borders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NinePatch {
    /// Atlas texture.
    pub texture: Texture,
    /// Left border in pixels.
    pub left: f32,
    /// Right border in pixels.
    pub right: f32,
    /// Bottom border in pixels.
    pub bottom: f32,
    /// Top border in pixels.
    pub top: f32,
    /// Region of the atlas (u, v, width, height), normalized.
    pub uv: [f32; 4],
}

impl NinePatch {
    /// Creates a nine-patch covering `uv` of `texture`.
    #[must_use]
    pub fn new(texture: Texture, uv: [f32; 4], left: f32, right: f32, bottom: f32, top: f32) -> Self {
        Self {
            texture,
            left,
            right,
            bottom,
            top,
            uv,
        }
    }

    /// A borderless patch over the whole texture.
    #[must_use]
    pub fn stretched(texture: Texture) -> Self {
        Self::new(texture, [0.0, 0.0, 1.0, 1.0], 0.0, 0.0, 0.0, 0.0)
    }

    /// Region width in texture pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.texture.width_f() * self.uv[2]
    }

    /// Region height in texture pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.texture.height_f() * self.uv[3]
    }

    /// Splits `bounds` into up to nine textured pieces.
    ///
    /// Bounds are truncated to whole pixels. Border rows and columns with
    /// zero size are skipped, as are pieces that end up with no area.
    #[must_use]
    pub fn slices(&self, bounds: Rect) -> NineSlices {
        let bx = bounds.x.trunc();
        let by = bounds.y.trunc();
        let bw = bounds.width.trunc();
        let bh = bounds.height.trunc();

        let (lp, rp, bp, tp) = (self.left, self.right, self.bottom, self.top);
        let luv = lp / self.texture.width_f().max(1.0);
        let ruv = rp / self.texture.width_f().max(1.0);
        let buv = bp / self.texture.height_f().max(1.0);
        let tuv = tp / self.texture.height_f().max(1.0);
        let uv = self.uv;

        // (position, extent, uv start, uv extent)
        let columns = [
            (lp > 0.0).then_some((bx, lp, uv[0], luv)),
            Some((bx + lp, bw - (lp + rp), uv[0] + luv, uv[2] - (luv + ruv))),
            (rp > 0.0).then_some((bx + (bw - rp), rp, uv[0] + (uv[2] - ruv), ruv)),
        ];
        let rows = [
            (tp > 0.0).then_some((by, tp, uv[1], tuv)),
            Some((by + tp, bh - (tp + bp), uv[1] + tuv, uv[3] - (tuv + buv))),
            (bp > 0.0).then_some((by + (bh - bp), bp, uv[1] + (uv[3] - buv), buv)),
        ];

        let mut out = NineSlices::default();
        for (x, w, u, uw) in columns.into_iter().flatten() {
            for (y, h, v, vh) in rows.into_iter().flatten() {
                if w <= 0.0 || h <= 0.0 {
                    continue;
                }
                out.push(NineSlice {
                    rect: Rect::new(x, y, w, h),
                    uv: [u, v, uw, vh],
                });
            }
        }
        out
    }
}

/// One piece of a sliced nine-patch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NineSlice {
    /// Destination in output pixels.
    pub rect: Rect,
    /// Source region (u, v, width, height).
    pub uv: [f32; 4],
}

/// Fixed-capacity list of slices; slicing never allocates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NineSlices {
    items: [NineSlice; 9],
    len: usize,
}

impl NineSlices {
    fn push(&mut self, slice: NineSlice) {
        self.items[self.len] = slice;
        self.len += 1;
    }

    /// The produced slices in column-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[NineSlice] {
        &self.items[..self.len]
    }

    /// Number of slices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing would be drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
