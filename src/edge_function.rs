//! Edge functions and convex quad coverage.
//!
//! An edge `(a, b, c)` splits the plane in two; a point is on its inner side
//! when `a*x + b*y + c >= 0`. Four edges built from the corners of a convex
//! quad, taken in one consistent rotational order, bound its interior.

use crate::basics::{iceil, ifloor, PointD, RectI};

/// Implicit half-plane `a*x + b*y + c >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Edge {
    /// Edge through `p1 → p2`.
    ///
    /// With y pointing down, points to the left of travel when viewed on
    /// screen (x < p1.x for a segment heading up) are inside.
    pub fn from_points(p1: PointD, p2: PointD) -> Self {
        Self {
            a: p2.y - p1.y,
            b: p1.x - p2.x,
            c: p2.x * p1.y - p1.x * p2.y,
        }
    }

    #[inline]
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        self.a * x + self.b * y + self.c
    }

    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.eval(x, y) >= 0.0
    }
}

/// A convex quadrilateral given by its corners in rotational order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvexQuad {
    pub corners: [PointD; 4],
}

impl ConvexQuad {
    pub const fn new(corners: [PointD; 4]) -> Self {
        Self { corners }
    }

    /// One edge per side, `corners[i] → corners[(i + 1) % 4]`.
    pub fn edges(&self) -> [Edge; 4] {
        let c = &self.corners;
        [
            Edge::from_points(c[0], c[1]),
            Edge::from_points(c[1], c[2]),
            Edge::from_points(c[2], c[3]),
            Edge::from_points(c[3], c[0]),
        ]
    }

    /// True if (x, y) is on the inner side of all four edges.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.edges().iter().all(|e| e.contains(x, y))
    }

    /// Pixel box from `floor` of the corner minima to `ceil` of the maxima,
    /// both inclusive (returned half-open). `None` if any corner is not
    /// finite.
    pub fn bounding_box(&self) -> Option<RectI> {
        if !self.corners.iter().all(PointD::is_finite) {
            return None;
        }
        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &self.corners {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(RectI::new(
            ifloor(min_x),
            ifloor(min_y),
            iceil(max_x) + 1,
            iceil(max_y) + 1,
        ))
    }

    /// Call `f(x, y)` for every pixel of the bounding box whose sample point
    /// `(x + sample_offset, y + sample_offset)` is inside the quad.
    pub fn for_each_pixel<F>(&self, sample_offset: f64, mut f: F)
    where
        F: FnMut(i32, i32),
    {
        let Some(bbox) = self.bounding_box() else {
            return;
        };
        let edges = self.edges();
        for (x, y) in bbox.iter() {
            let sx = x as f64 + sample_offset;
            let sy = y as f64 + sample_offset;
            if edges.iter().all(|e| e.contains(sx, sy)) {
                f(x, y);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x1: f64, y1: f64, x2: f64, y2: f64) -> ConvexQuad {
        // Same rotational order as a rectangle at zero rotation:
        // (+hw,+hh), (+hw,-hh), (-hw,-hh), (-hw,+hh).
        ConvexQuad::new([
            PointD::new(x2, y2),
            PointD::new(x2, y1),
            PointD::new(x1, y1),
            PointD::new(x1, y2),
        ])
    }

    #[test]
    fn test_edge_sides() {
        let e = Edge::from_points(PointD::new(1.0, 1.0), PointD::new(1.0, -1.0));
        assert_eq!(e, Edge { a: -2.0, b: 0.0, c: 2.0 });
        assert!(e.contains(0.0, 0.0));
        assert!(e.contains(1.0, 5.0));
        assert!(!e.contains(1.5, 0.0));
    }

    #[test]
    fn test_quad_contains_inclusive() {
        let q = square(-1.0, -1.0, 1.0, 1.0);
        assert!(q.contains(0.0, 0.0));
        assert!(q.contains(1.0, 1.0));
        assert!(q.contains(-1.0, 0.5));
        assert!(!q.contains(1.01, 0.0));
        assert!(!q.contains(0.0, -1.01));
    }

    #[test]
    fn test_bounding_box() {
        let q = square(2.2, 3.7, 5.5, 6.0);
        assert_eq!(q.bounding_box(), Some(RectI::new(2, 3, 7, 7)));
    }

    #[test]
    fn test_bounding_box_rejects_nan() {
        let mut q = square(0.0, 0.0, 2.0, 2.0);
        q.corners[2].x = f64::NAN;
        assert_eq!(q.bounding_box(), None);
        let mut hits = 0;
        q.for_each_pixel(0.0, |_, _| hits += 1);
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_for_each_pixel_integer_samples() {
        // Integer sampling includes both boundaries: [2, 5] x [2, 4].
        let q = square(2.0, 2.0, 5.0, 4.0);
        let mut pixels = Vec::new();
        q.for_each_pixel(0.0, |x, y| pixels.push((x, y)));
        assert_eq!(pixels.len(), 4 * 3);
        assert!(pixels.contains(&(2, 2)));
        assert!(pixels.contains(&(5, 4)));
    }

    #[test]
    fn test_for_each_pixel_center_samples() {
        // Centre sampling covers exactly the pixels inside [2, 5) x [2, 4).
        let q = square(2.0, 2.0, 5.0, 4.0);
        let mut pixels = Vec::new();
        q.for_each_pixel(0.5, |x, y| pixels.push((x, y)));
        assert_eq!(pixels.len(), 3 * 2);
        assert!(pixels.contains(&(2, 2)));
        assert!(pixels.contains(&(4, 3)));
        assert!(!pixels.contains(&(5, 3)));
    }

    #[test]
    fn test_rotated_diamond() {
        let q = ConvexQuad::new([
            PointD::new(0.0, 2.0),
            PointD::new(2.0, 0.0),
            PointD::new(0.0, -2.0),
            PointD::new(-2.0, 0.0),
        ]);
        assert!(q.contains(0.0, 0.0));
        assert!(q.contains(1.0, 1.0));
        assert!(!q.contains(1.5, 1.5));
        let mut count = 0;
        q.for_each_pixel(0.0, |_, _| count += 1);
        // |x| + |y| <= 2 over integers.
        assert_eq!(count, 13);
    }
}
