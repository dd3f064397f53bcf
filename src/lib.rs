//! # sw-renderer
//!
//! Pixel-exact software rasterizer for rectangles. It exists as an
//! alternative rendering backend that is compared, pixel for pixel, against
//! a native vector-graphics API, so its output is deterministic and aliased:
//! no coverage blending, no GPU, no vector rasterization library.
//!
//! - Axis-aligned and arbitrarily rotated rectangles
//! - Independent stroke and fill, fill drawn first
//! - Corner joints for rotated strokes built from lengthened and shortened
//!   thick segments
//! - Draw and clear against any [`surface::PixelSurface`]
//!
//! ## Architecture
//!
//! 1. **Shape**: [`rect_shape::RectShape`], validated at the boundary
//! 2. **Geometry**: rounding helpers, edge functions, segment adjustment
//! 3. **Rasterizer**: [`rect_rasterizer::RectRasterizer`] picks the
//!    axis-aligned or rotated path
//! 4. **Collaborators**: a [`line_stroker::LineStroker`] for rotated
//!    outlines and a [`surface::PixelSurface`] that clips every write
//!
//! ```
//! use sw_renderer::basics::PointD;
//! use sw_renderer::color::Rgba8;
//! use sw_renderer::rect_rasterizer::RectRasterizer;
//! use sw_renderer::rect_shape::RectShape;
//! use sw_renderer::surface::Surface;
//!
//! let mut surface = Surface::new(10, 10);
//! let shape = RectShape::new(PointD::new(5.0, 5.0), 4.0, 4.0)
//!     .with_fill(Rgba8::new_opaque(255, 0, 0));
//! RectRasterizer::new().draw(&mut surface, &shape);
//! assert_eq!(surface.count_pixels(|c| !c.is_transparent()), 16);
//! ```

// Foundation
pub mod basics;
pub mod color;
pub mod surface;

// Geometry
pub mod edge_function;
pub mod line_geometry;

// Rasterization
pub mod line_stroker;
pub mod rect_rasterizer;
pub mod rect_shape;

// Scenes
pub mod scene;
