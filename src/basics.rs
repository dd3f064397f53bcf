//! Foundation types, constants, and rounding helpers.
//!
//! Everything in the crate that touches the pixel grid goes through the
//! helpers here, so the rounding convention lives in one place.

// ============================================================================
// Constants
// ============================================================================

/// Largest magnitude accepted for any coordinate or length.
///
/// Coordinates are kept within 24 bits so that every derived pixel bound
/// (center ± half size ± stroke) fits comfortably in an `i32`.
pub const MAX_COORD: f64 = ((1 << 24) - 1) as f64;

// ============================================================================
// Rounding and conversion functions
// ============================================================================

/// Round to the nearest integer, ties toward positive infinity.
///
/// `round_half_up(2.5) == 3`, `round_half_up(-2.5) == -2`. This differs
/// from `f64::round`, which rounds ties away from zero.
#[inline]
pub fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}

/// Floor a double to an integer toward negative infinity.
#[inline]
pub fn ifloor(v: f64) -> i32 {
    v.floor() as i32
}

/// Ceiling of a double as a signed integer.
#[inline]
pub fn iceil(v: f64) -> i32 {
    v.ceil() as i32
}

/// `floor(n / 2)` for any sign of `n`.
#[inline]
pub fn floor_div2(n: i32) -> i32 {
    n.div_euclid(2)
}

/// `ceil(n / 2)` for any sign of `n`.
#[inline]
pub fn ceil_div2(n: i32) -> i32 {
    -((-n).div_euclid(2))
}

/// True if `v` is finite and within [`MAX_COORD`].
#[inline]
pub fn is_valid_coord(v: f64) -> bool {
    v.is_finite() && v.abs() <= MAX_COORD
}

// ============================================================================
// PointD
// ============================================================================

/// A point in surface space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// ============================================================================
// RectI
// ============================================================================

/// A half-open integer pixel rectangle `[x1, x2) × [y1, y2)`.
///
/// Inverted ranges (`x1 >= x2` or `y1 >= y2`) are legal and simply empty,
/// which is how an over-wide stroke collapses the fill region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RectI {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RectI {
    pub const fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width in pixels, zero when inverted.
    pub fn width(&self) -> u32 {
        (self.x2 - self.x1).max(0) as u32
    }

    /// Height in pixels, zero when inverted.
    pub fn height(&self) -> u32 {
        (self.y2 - self.y1).max(0) as u32
    }

    pub fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Number of covered pixels.
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Returns `true` if pixel (x, y) is covered.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x1 && x < self.x2 && y >= self.y1 && y < self.y2
    }

    /// Grow every side outward by `d` pixels.
    pub fn inflate(&self, d: i32) -> Self {
        Self::new(self.x1 - d, self.y1 - d, self.x2 + d, self.y2 + d)
    }

    /// Shrink every side inward by `d` pixels. May produce an empty rect.
    pub fn deflate(&self, d: i32) -> Self {
        self.inflate(-d)
    }

    /// Every covered pixel, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x1, x2) = (self.x1, self.x2);
        (self.y1..self.y2).flat_map(move |y| (x1..x2).map(move |x| (x, y)))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(0.0), 0);
        assert_eq!(round_half_up(0.4), 0);
        assert_eq!(round_half_up(0.5), 1);
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-0.5), 0);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
    }

    #[test]
    fn test_floor_ceil() {
        assert_eq!(ifloor(1.7), 1);
        assert_eq!(ifloor(-1.2), -2);
        assert_eq!(iceil(1.2), 2);
        assert_eq!(iceil(-1.7), -1);
    }

    #[test]
    fn test_half_division() {
        assert_eq!(floor_div2(5), 2);
        assert_eq!(ceil_div2(5), 3);
        assert_eq!(floor_div2(4), 2);
        assert_eq!(ceil_div2(4), 2);
        assert_eq!(floor_div2(0), 0);
        assert_eq!(ceil_div2(0), 0);
        assert_eq!(floor_div2(-3), -2);
        assert_eq!(ceil_div2(-3), -1);
    }

    #[test]
    fn test_valid_coord() {
        assert!(is_valid_coord(0.0));
        assert!(is_valid_coord(-1000.5));
        assert!(is_valid_coord(MAX_COORD));
        assert!(!is_valid_coord(MAX_COORD + 1.0));
        assert!(!is_valid_coord(f64::NAN));
        assert!(!is_valid_coord(f64::INFINITY));
    }

    #[test]
    fn test_rect_basic() {
        let r = RectI::new(3, 3, 7, 7);
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 4);
        assert_eq!(r.area(), 16);
        assert!(r.contains(3, 3));
        assert!(r.contains(6, 6));
        assert!(!r.contains(7, 6));
        assert!(!r.is_empty());
    }

    #[test]
    fn test_rect_inverted_is_empty() {
        let r = RectI::new(5, 5, 3, 8);
        assert!(r.is_empty());
        assert_eq!(r.width(), 0);
        assert_eq!(r.area(), 0);
        assert_eq!(r.iter().count(), 0);
    }

    #[test]
    fn test_rect_inflate_deflate() {
        let r = RectI::new(2, 2, 8, 8);
        assert_eq!(r.inflate(1), RectI::new(1, 1, 9, 9));
        assert_eq!(r.deflate(2), RectI::new(4, 4, 6, 6));
        assert!(r.deflate(3).is_empty());
        assert!(r.deflate(4).is_empty());
    }

    #[test]
    fn test_rect_iter_row_major() {
        let r = RectI::new(0, 0, 2, 2);
        let pixels: Vec<_> = r.iter().collect();
        assert_eq!(pixels, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);
    }
}
