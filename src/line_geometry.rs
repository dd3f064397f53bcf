//! Segment lengthening and shortening.
//!
//! Used to build the corner joints of rotated rectangle strokes: one pair of
//! opposing sides is lengthened past the corners, the other pair pulled back
//! from them, so the thick segments meet without overlap or gaps.

use crate::basics::PointD;

/// A directed line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: PointD,
    pub end: PointD,
}

impl Segment {
    pub const fn new(start: PointD, end: PointD) -> Self {
        Self { start, end }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        let dx = self.end.x - self.start.x;
        let dy = self.end.y - self.start.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Unit direction `start → end`, or `None` for a zero-length segment.
    pub fn direction(&self) -> Option<(f64, f64)> {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        Some(((self.end.x - self.start.x) / len, (self.end.y - self.start.y) / len))
    }
}

/// Move both endpoints of `p1 → p2` outward by `d` along its direction.
///
/// `start` moves by `-d`, `end` by `+d`; the length grows by `2d` and the
/// direction is unchanged. A negative `d` pulls the endpoints inward. A
/// zero-length segment has no direction and is returned unchanged.
pub fn extend_line(p1: PointD, p2: PointD, d: f64) -> Segment {
    let seg = Segment::new(p1, p2);
    match seg.direction() {
        Some((ux, uy)) => Segment::new(
            PointD::new(p1.x - ux * d, p1.y - uy * d),
            PointD::new(p2.x + ux * d, p2.y + uy * d),
        ),
        None => seg,
    }
}

/// Move both endpoints of `p1 → p2` inward by `d`; `extend_line` with `-d`.
pub fn shorten_line(p1: PointD, p2: PointD, d: f64) -> Segment {
    extend_line(p1, p2, -d)
}

// ============================================================================
// Tests
// ============================================================================
