//! Line strokers: single-pixel and width-extruded segments.
//!
//! [`LineStroker`] is the seam the rectangle rasterizer draws its rotated
//! outlines through. [`PixelLineStroker`] is the aliased implementation
//! shipped with the crate: Bresenham hairlines and butt-capped thick lines
//! filled with the same edge-function test as rotated rectangles.

use crate::basics::{ifloor, PointD};
use crate::color::Rgba8;
use crate::edge_function::ConvexQuad;
use crate::line_geometry::Segment;
use crate::surface::PixelSurface;

/// Draws line segments into a [`PixelSurface`].
pub trait LineStroker {
    /// Deterministic one-pixel-wide line between two real-valued endpoints.
    fn draw_hairline<S: PixelSurface + ?Sized>(
        &self,
        surface: &mut S,
        p1: PointD,
        p2: PointD,
        c: Rgba8,
    );

    /// Line extruded to `width` pixels, capped at both ends.
    fn draw_thick_line<S: PixelSurface + ?Sized>(
        &self,
        surface: &mut S,
        p1: PointD,
        p2: PointD,
        width: f64,
        c: Rgba8,
    );
}

/// Aliased line stroker.
///
/// - Hairlines step an integer Bresenham line between the pixels
///   containing the endpoints (`floor` of each coordinate); both end pixels
///   are drawn.
/// - Thick lines fill the quad obtained by offsetting the segment by
///   `width / 2` along its normal on each side (butt caps), sampling at
///   pixel centres.
#[derive(Debug, Clone, Copy, Default)]
pub struct PixelLineStroker;

impl PixelLineStroker {
    pub fn new() -> Self {
        Self
    }

    /// The quad covered by a thick line, or `None` if nothing would be drawn.
    ///
    /// Corners are emitted in the same rotational order as rectangle
    /// corners so the edge test keeps a consistent inner side.
    pub fn thick_line_quad(p1: PointD, p2: PointD, width: f64) -> Option<ConvexQuad> {
        if !(width > 0.0 && width.is_finite()) {
            return None;
        }
        let (ux, uy) = Segment::new(p1, p2).direction()?;
        let hw = width / 2.0;
        let (nx, ny) = (-uy * hw, ux * hw);
        Some(ConvexQuad::new([
            PointD::new(p1.x + nx, p1.y + ny),
            PointD::new(p2.x + nx, p2.y + ny),
            PointD::new(p2.x - nx, p2.y - ny),
            PointD::new(p1.x - nx, p1.y - ny),
        ]))
    }
}

impl LineStroker for PixelLineStroker {
    fn draw_hairline<S: PixelSurface + ?Sized>(
        &self,
        surface: &mut S,
        p1: PointD,
        p2: PointD,
        c: Rgba8,
    ) {
        if !p1.is_finite() || !p2.is_finite() {
            return;
        }
        let (mut x, mut y) = (ifloor(p1.x) as i64, ifloor(p1.y) as i64);
        let (x2, y2) = (ifloor(p2.x) as i64, ifloor(p2.y) as i64);

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            surface.set_pixel(x as i32, y as i32, c);
            if x == x2 && y == y2 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    fn draw_thick_line<S: PixelSurface + ?Sized>(
        &self,
        surface: &mut S,
        p1: PointD,
        p2: PointD,
        width: f64,
        c: Rgba8,
    ) {
        if let Some(quad) = Self::thick_line_quad(p1, p2, width) {
            quad.for_each_pixel(0.5, |x, y| surface.set_pixel(x, y, c));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Surface;

    const BLUE: Rgba8 = Rgba8::new_opaque(0, 0, 255);

    fn drawn(s: &Surface) -> Vec<(i32, i32)> {
        s.pixels_where(|c| c == BLUE)
    }

    #[test]
    fn test_hairline_horizontal() {
        let mut s = Surface::new(10, 10);
        PixelLineStroker.draw_hairline(&mut s, PointD::new(2.0, 3.0), PointD::new(6.0, 3.0), BLUE);
        assert_eq!(drawn(&s), vec![(2, 3), (3, 3), (4, 3), (5, 3), (6, 3)]);
    }

    #[test]
    fn test_hairline_floors_endpoints() {
        let mut s = Surface::new(10, 10);
        PixelLineStroker.draw_hairline(&mut s, PointD::new(1.9, 1.2), PointD::new(1.1, 4.8), BLUE);
        assert_eq!(drawn(&s), vec![(1, 1), (1, 2), (1, 3), (1, 4)]);
    }

    #[test]
    fn test_hairline_diagonal_one_pixel_per_step() {
        let mut s = Surface::new(10, 10);
        PixelLineStroker.draw_hairline(&mut s, PointD::new(7.0, 7.0), PointD::new(2.0, 2.0), BLUE);
        let px = drawn(&s);
        assert_eq!(px.len(), 6);
        for i in 2..=7 {
            assert!(px.contains(&(i, i)));
        }
    }

    #[test]
    fn test_hairline_shallow_slope_is_connected() {
        let mut s = Surface::new(20, 10);
        PixelLineStroker.draw_hairline(&mut s, PointD::new(0.0, 0.0), PointD::new(15.0, 4.0), BLUE);
        let px = drawn(&s);
        // One pixel per column along the major axis.
        assert_eq!(px.len(), 16);
        for x in 0..16 {
            assert_eq!(px.iter().filter(|p| p.0 == x).count(), 1);
        }
    }

    #[test]
    fn test_hairline_degenerate_sets_one_pixel() {
        let mut s = Surface::new(5, 5);
        let p = PointD::new(2.5, 2.5);
        PixelLineStroker.draw_hairline(&mut s, p, p, BLUE);
        assert_eq!(drawn(&s), vec![(2, 2)]);
    }

    #[test]
    fn test_hairline_clips_silently() {
        let mut s = Surface::new(5, 5);
        PixelLineStroker.draw_hairline(&mut s, PointD::new(-3.0, 2.0), PointD::new(8.0, 2.0), BLUE);
        assert_eq!(drawn(&s).len(), 5);
        PixelLineStroker.draw_hairline(&mut s, PointD::new(f64::NAN, 0.0), PointD::new(1.0, 1.0), BLUE);
        assert_eq!(drawn(&s).len(), 5);
    }

    #[test]
    fn test_thick_line_horizontal_butt_caps() {
        let mut s = Surface::new(20, 20);
        PixelLineStroker.draw_thick_line(
            &mut s,
            PointD::new(3.0, 5.0),
            PointD::new(17.0, 5.0),
            4.0,
            BLUE,
        );
        let px = drawn(&s);
        // Covers [3, 17) x [3, 7).
        assert_eq!(px.len(), 14 * 4);
        assert!(px.contains(&(3, 3)));
        assert!(px.contains(&(16, 6)));
        assert!(!px.contains(&(17, 5)));
        assert!(!px.contains(&(2, 5)));
        assert!(!px.contains(&(10, 7)));
    }

    #[test]
    fn test_thick_line_direction_independent() {
        let mut a = Surface::new(20, 20);
        let mut b = Surface::new(20, 20);
        let p1 = PointD::new(4.0, 3.0);
        let p2 = PointD::new(14.0, 12.0);
        PixelLineStroker.draw_thick_line(&mut a, p1, p2, 3.0, BLUE);
        PixelLineStroker.draw_thick_line(&mut b, p2, p1, 3.0, BLUE);
        assert_eq!(a, b);
        assert!(!a.is_clear());
    }

    #[test]
    fn test_thick_line_degenerate_draws_nothing() {
        let mut s = Surface::new(10, 10);
        let p = PointD::new(5.0, 5.0);
        PixelLineStroker.draw_thick_line(&mut s, p, p, 4.0, BLUE);
        PixelLineStroker.draw_thick_line(&mut s, p, PointD::new(8.0, 5.0), 0.0, BLUE);
        PixelLineStroker.draw_thick_line(&mut s, p, PointD::new(8.0, 5.0), f64::NAN, BLUE);
        assert!(s.is_clear());
    }
}
