//! Colors and HSV conversion.

/// RGBA color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
    /// Alpha component (0-1).
    pub a: f32,
}

impl Color {
    /// Transparent black.
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
    /// Solid black.
    pub const BLACK: Self = Self::rgba(0.0, 0.0, 0.0, 1.0);
    /// Solid white.
    pub const WHITE: Self = Self::rgba(1.0, 1.0, 1.0, 1.0);
    /// Mid grey, the default disabled text color.
    pub const GREY: Self = Self::rgba(0.5, 0.5, 0.5, 1.0);

    /// Creates a color from RGBA values (0-1).
    #[must_use]
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a color from RGB values (0-1) with full alpha.
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// Creates an opaque color from hue, saturation and value, all in 0-1.
    #[must_use]
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        if s <= 0.0 {
            return Self::rgb(v, v, v);
        }
        let h6 = h.rem_euclid(1.0) * 6.0;
        let sector = h6.floor();
        let f = h6 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        // `sector` is in 0..6 after rem_euclid
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let sector = sector as u32;
        match sector {
            0 => Self::rgb(v, t, p),
            1 => Self::rgb(q, v, p),
            2 => Self::rgb(p, v, t),
            3 => Self::rgb(p, q, v),
            4 => Self::rgb(t, p, v),
            _ => Self::rgb(v, p, q),
        }
    }

    /// Returns hue, saturation and value, all in 0-1. Alpha is ignored.
    #[must_use]
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let v = max;
        if (max - min).abs() <= f32::EPSILON {
            return (0.0, 0.0, v);
        }
        let delta = max - min;
        let s = delta / max;
        let rc = (max - self.r) / delta;
        let gc = (max - self.g) / delta;
        let bc = (max - self.b) / delta;
        let h = if (self.r - max).abs() <= f32::EPSILON {
            bc - gc
        } else if (self.g - max).abs() <= f32::EPSILON {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        ((h / 6.0).rem_euclid(1.0), s, v)
    }

    /// Returns the luminance-weighted grey of this color.
    #[must_use]
    pub fn greyscale(self) -> Self {
        let l = self.r * 0.299 + self.g * 0.587 + self.b * 0.114;
        Self::rgba(l, l, l, self.a)
    }

    /// Returns a new color with different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::rgba(self.r, self.g, self.b, a)
    }

    /// Converts to array format.
    #[must_use]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<[f32; 3]> for Color {
    fn from(c: [f32; 3]) -> Self {
        Self::rgb(c[0], c[1], c[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_primary_hues() {
        let red = Color::from_hsv(0.0, 1.0, 1.0);
        assert!(close(red.r, 1.0) && close(red.g, 0.0) && close(red.b, 0.0));

        let green = Color::from_hsv(1.0 / 3.0, 1.0, 1.0);
        assert!(close(green.r, 0.0) && close(green.g, 1.0) && close(green.b, 0.0));

        let (h, s, v) = Color::rgb(0.0, 0.0, 1.0).to_hsv();
        assert!(close(h, 2.0 / 3.0) && close(s, 1.0) && close(v, 1.0));
    }

    #[test]
    fn test_hsv_back_and_forth() {
        let original = Color::rgb(0.8, 0.3, 0.55);
        let (h, s, v) = original.to_hsv();
        let back = Color::from_hsv(h, s, v);

        assert!(close(back.r, original.r));
        assert!(close(back.g, original.g));
        assert!(close(back.b, original.b));
    }

    #[test]
    fn test_grey_has_no_saturation() {
        let (_, s, v) = Color::GREY.to_hsv();
        assert!(close(s, 0.0));
        assert!(close(v, 0.5));
    }
}
