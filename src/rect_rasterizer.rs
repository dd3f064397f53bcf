//! Rectangle rasterizer.
//!
//! Draws and erases axis-aligned and rotated rectangles with independent
//! stroke and fill, writing aliased pixels straight into a
//! [`PixelSurface`].
//!
//! Dispatch is on `rotation == 0.0` exactly:
//!
//! - **Axis-aligned**: center, size and stroke width are rounded to whole
//!   pixels first, then fill and stroke are plain pixel rectangles.
//! - **Rotated**: no rounding. The fill is an edge-function test over the
//!   rotated corners sampled at integer coordinates; the stroke is four
//!   segments drawn through a [`LineStroker`], with one opposing pair
//!   lengthened and the other shortened by half the stroke so the corners
//!   join without overlap.
//!
//! Fill is always drawn before stroke. `clear` only erases the nominal path
//! area, never the part of a stroke that lies outside it.

use log::{debug, trace};

use crate::basics::{ceil_div2, floor_div2, round_half_up, PointD, RectI};
use crate::color::Rgba8;
use crate::edge_function::ConvexQuad;
use crate::line_geometry::{extend_line, shorten_line};
use crate::line_stroker::{LineStroker, PixelLineStroker};
use crate::rect_shape::RectShape;
use crate::surface::PixelSurface;

// ============================================================================
// Geometry
// ============================================================================

/// Pixel regions of an unrotated rectangle after rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisAlignedRegions {
    /// The rounded stroke width.
    pub stroke_width: i32,
    /// The nominal path rectangle.
    pub path: RectI,
    /// Interior left for the fill once the stroke band is excluded.
    pub fill: RectI,
    /// Outer bound of the stroke band.
    pub stroke_outer: RectI,
    /// Inner bound of the stroke band (pixels here are not stroke).
    pub stroke_inner: RectI,
}

/// Round the shape to whole pixels and derive its regions.
///
/// Odd widths and heights put the extra pixel on the right and bottom. The
/// stroke extends `floor(s / 2)` outside the path and `ceil(s / 2)` inside.
pub fn axis_aligned_regions(shape: &RectShape) -> AxisAlignedRegions {
    let cx = round_half_up(shape.center.x);
    let cy = round_half_up(shape.center.y);
    let w = round_half_up(shape.width);
    let h = round_half_up(shape.height);
    let sw = round_half_up(shape.stroke_width);

    let left = cx - floor_div2(w);
    let top = cy - floor_div2(h);
    let path = RectI::new(left, top, left + w, top + h);

    AxisAlignedRegions {
        stroke_width: sw,
        path,
        fill: path.deflate(ceil_div2(sw)),
        stroke_outer: path.inflate(floor_div2(sw)),
        stroke_inner: path.deflate(ceil_div2(sw)),
    }
}

/// Apply the rotation matrix to a local offset around `center`.
#[inline]
fn rotate(center: PointD, cos: f64, sin: f64, x: f64, y: f64) -> PointD {
    PointD::new(
        center.x + x * cos - y * sin,
        center.y + x * sin + y * cos,
    )
}

/// The rotated path polygon used for fill and clear.
///
/// Corners are generated from the local offsets `(+w/2, +h/2)`,
/// `(+w/2, -h/2)`, `(-w/2, -h/2)`, `(-w/2, +h/2)`. The rotation preserves
/// this winding, so the four edges share one inner side for every angle.
pub fn fill_quad(shape: &RectShape) -> ConvexQuad {
    let (sin, cos) = shape.rotation.sin_cos();
    let hw = shape.width / 2.0;
    let hh = shape.height / 2.0;
    let c = shape.center;
    ConvexQuad::new([
        rotate(c, cos, sin, hw, hh),
        rotate(c, cos, sin, hw, -hh),
        rotate(c, cos, sin, -hw, -hh),
        rotate(c, cos, sin, -hw, hh),
    ])
}

/// The rotated path corners used for the stroke, starting at local
/// `(-w/2, -h/2)` and going through `(+w/2, -h/2)`, `(+w/2, +h/2)`,
/// `(-w/2, +h/2)`.
///
/// Side `i` runs from corner `i` to corner `(i + 1) % 4`; sides 0 and 2 are
/// the local top and bottom, sides 1 and 3 the right and left.
pub fn outline_corners(shape: &RectShape) -> [PointD; 4] {
    let (sin, cos) = shape.rotation.sin_cos();
    let hw = shape.width / 2.0;
    let hh = shape.height / 2.0;
    let c = shape.center;
    [
        rotate(c, cos, sin, -hw, -hh),
        rotate(c, cos, sin, hw, -hh),
        rotate(c, cos, sin, hw, hh),
        rotate(c, cos, sin, -hw, hh),
    ]
}

// ============================================================================
// RectRasterizer
// ============================================================================

/// Rasterizes [`RectShape`]s into a borrowed [`PixelSurface`].
///
/// The rasterizer holds no pixel state of its own; each call borrows the
/// surface for its duration. Later calls overwrite earlier pixels.
#[derive(Debug, Clone, Default)]
pub struct RectRasterizer<L: LineStroker = PixelLineStroker> {
    stroker: L,
}

impl RectRasterizer<PixelLineStroker> {
    /// A rasterizer using the aliased [`PixelLineStroker`].
    pub fn new() -> Self {
        Self::with_stroker(PixelLineStroker)
    }
}

impl<L: LineStroker> RectRasterizer<L> {
    /// Use a custom line stroker for rotated outlines.
    pub fn with_stroker(stroker: L) -> Self {
        Self { stroker }
    }

    /// The stroker used for rotated outlines.
    pub fn stroker(&self) -> &L {
        &self.stroker
    }

    /// Draw the fill, then the stroke, of `shape`.
    ///
    /// Shapes with non-finite or out-of-range geometry are skipped.
    pub fn draw<S: PixelSurface + ?Sized>(&self, surface: &mut S, shape: &RectShape) {
        let Some(shape) = shape.sanitized() else {
            debug!("skipping rect with invalid geometry: {:?}", shape);
            return;
        };
        if shape.rotation == 0.0 {
            trace!("draw axis-aligned rect at {:?}", shape.center);
            self.draw_axis_aligned(surface, &shape);
        } else {
            trace!(
                "draw rotated rect at {:?}, rotation {}",
                shape.center,
                shape.rotation
            );
            self.draw_rotated(surface, &shape);
        }
    }

    /// Erase the nominal path area of `shape`.
    ///
    /// The part of a stroke lying outside the path is left untouched. An
    /// unrotated shape covering exactly the whole surface resets it in one
    /// bulk operation. The stroke fields are ignored.
    pub fn clear<S: PixelSurface + ?Sized>(&self, surface: &mut S, shape: &RectShape) {
        let path_only = RectShape {
            stroke_width: 0.0,
            ..*shape
        };
        let Some(shape) = path_only.sanitized() else {
            debug!("skipping clear with invalid geometry: {:?}", shape);
            return;
        };
        if shape.rotation != 0.0 {
            trace!("clear rotated rect at {:?}", shape.center);
            fill_quad(&shape).for_each_pixel(0.0, |x, y| surface.clear_pixel(x, y));
            return;
        }

        let sw = surface.width() as f64;
        let sh = surface.height() as f64;
        if shape.width == sw
            && shape.height == sh
            && shape.center.x == shape.width / 2.0
            && shape.center.y == shape.height / 2.0
        {
            trace!("clear full surface {}x{}", sw, sh);
            surface.clear_all();
            return;
        }

        for (x, y) in axis_aligned_regions(&shape).path.iter() {
            surface.clear_pixel(x, y);
        }
    }

    fn draw_axis_aligned<S: PixelSurface + ?Sized>(&self, surface: &mut S, shape: &RectShape) {
        let regions = axis_aligned_regions(shape);

        if !shape.fill_color.is_transparent() {
            let c = shape.fill_color;
            for (x, y) in regions.fill.iter() {
                surface.set_pixel(x, y, c);
            }
        }

        if !shape.stroke_color.is_transparent() && regions.stroke_width > 0 {
            let c = shape.stroke_color;
            for (x, y) in regions.stroke_outer.iter() {
                if regions.stroke_inner.contains(x, y) {
                    continue;
                }
                surface.set_pixel(x, y, c);
            }
        }
    }

    fn draw_rotated<S: PixelSurface + ?Sized>(&self, surface: &mut S, shape: &RectShape) {
        if !shape.fill_color.is_transparent() {
            let c = shape.fill_color;
            fill_quad(shape).for_each_pixel(0.0, |x, y| surface.set_pixel(x, y, c));
        }

        if shape.stroke_color.is_transparent() || shape.stroke_width <= 0.0 {
            return;
        }
        let c = shape.stroke_color;
        let corners = outline_corners(shape);

        if shape.stroke_width == 1.0 {
            for i in 0..4 {
                self.stroker
                    .draw_hairline(surface, corners[i], corners[(i + 1) % 4], c);
            }
            return;
        }

        let half = shape.stroke_width / 2.0;
        // Top and bottom run past the corners; right and left stop short.
        for i in (0..4).step_by(2) {
            let seg = extend_line(corners[i], corners[(i + 1) % 4], half);
            self.stroker
                .draw_thick_line(surface, seg.start, seg.end, shape.stroke_width, c);
        }
        for i in (1..4).step_by(2) {
            let seg = shorten_line(corners[i], corners[(i + 1) % 4], half);
            self.stroker
                .draw_thick_line(surface, seg.start, seg.end, shape.stroke_width, c);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
