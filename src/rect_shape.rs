//! Rectangle shape descriptor.

use crate::basics::{is_valid_coord, PointD};
use crate::color::Rgba8;

/// A rectangle to rasterize.
///
/// The *path* is the zero-width contour given by `center`, `width`,
/// `height` and `rotation`. The stroke straddles the path; the fill is the
/// interior inset by half the stroke.
///
/// `rotation` is in radians and rotates the rectangle's local axes about
/// its center through the matrix `[cos -sin; sin cos]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RectShape {
    pub center: PointD,
    pub width: f64,
    pub height: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotation: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stroke_width: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub stroke_color: Rgba8,
    #[cfg_attr(feature = "serde", serde(default))]
    pub fill_color: Rgba8,
}

impl RectShape {
    /// An unrotated rectangle with no stroke and no fill.
    pub fn new(center: PointD, width: f64, height: f64) -> Self {
        Self {
            center,
            width,
            height,
            ..Self::default()
        }
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_stroke(mut self, width: f64, color: Rgba8) -> Self {
        self.stroke_width = width;
        self.stroke_color = color;
        self
    }

    pub fn with_fill(mut self, color: Rgba8) -> Self {
        self.fill_color = color;
        self
    }

    /// Validate and normalize the shape before any geometry is derived.
    ///
    /// Returns `None` if a coordinate or length is NaN, infinite, or beyond
    /// [`MAX_COORD`](crate::basics::MAX_COORD), or if the rotation is not
    /// finite. Negative width, height and stroke width are clamped to zero.
    pub fn sanitized(&self) -> Option<Self> {
        let lengths = [
            self.center.x,
            self.center.y,
            self.width,
            self.height,
            self.stroke_width,
        ];
        if !lengths.iter().all(|&v| is_valid_coord(v)) || !self.rotation.is_finite() {
            return None;
        }
        Some(Self {
            width: self.width.max(0.0),
            height: self.height.max(0.0),
            stroke_width: self.stroke_width.max(0.0),
            ..*self
        })
    }
}
