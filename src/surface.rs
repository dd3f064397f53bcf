//! Pixel surfaces: the grid the rasterizer writes into.
//!
//! The rasterizer only ever talks to the [`PixelSurface`] trait. Two
//! buffer-backed implementations are provided:
//!
//! - [`Surface`]: owns its RGBA8 buffer.
//! - [`SurfaceMut`]: borrows a caller-owned frame buffer, optionally with
//!   row padding (stride larger than `width * 4`).
//!
//! Both store pixels row-major, top-down, 4 bytes per pixel in R, G, B, A
//! order. Writes outside the grid are silently ignored.

use crate::color::Rgba8;
use thiserror::Error;

pub const BYTES_PER_PIXEL: usize = 4;

/// Errors raised when wrapping an existing buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    #[error("buffer holds {actual} bytes, expected at least {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("surface size {width}x{height} overflows addressable memory")]
    Dimensions { width: u32, height: u32 },
    #[error("stride {stride} is smaller than one row of {width} pixels")]
    Stride { stride: usize, width: u32 },
}

// ============================================================================
// PixelSurface trait
// ============================================================================

/// A mutable grid of [`Rgba8`] pixels.
///
/// Out-of-range coordinates are a silent no-op for every method; callers
/// never pre-check bounds.
pub trait PixelSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Overwrite pixel (x, y) with `c`.
    fn set_pixel(&mut self, x: i32, y: i32, c: Rgba8);

    /// Reset pixel (x, y) to transparent black.
    fn clear_pixel(&mut self, x: i32, y: i32) {
        self.set_pixel(x, y, Rgba8::TRANSPARENT);
    }

    /// Reset every pixel to transparent black.
    fn clear_all(&mut self) {
        for y in 0..self.height() as i32 {
            for x in 0..self.width() as i32 {
                self.clear_pixel(x, y);
            }
        }
    }
}

fn checked_len(width: u32, height: u32) -> Result<usize, SurfaceError> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(SurfaceError::Dimensions { width, height })
}

/// Byte offset of (x, y), or `None` when outside a `width × height` grid.
#[inline]
fn offset(x: i32, y: i32, width: u32, height: u32, stride: usize) -> Option<usize> {
    if x < 0 || y < 0 || x as u32 >= width || y as u32 >= height {
        return None;
    }
    Some(y as usize * stride + x as usize * BYTES_PER_PIXEL)
}

// ============================================================================
// Surface
// ============================================================================

/// An owned RGBA8 pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Create a fully transparent surface.
    ///
    /// # Panics
    /// If `width * height * 4` overflows `usize`.
    pub fn new(width: u32, height: u32) -> Self {
        let len = checked_len(width, height).unwrap_or_else(|e| panic!("{e}"));
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    /// Wrap an existing RGBA buffer of exactly `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, SurfaceError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(SurfaceError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Color at (x, y), or `None` outside the grid.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        let i = offset(x, y, self.width, self.height, self.stride())?;
        Some(Rgba8::new(
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ))
    }

    /// Raw RGBA bytes, row-major, top-down.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Overwrite every pixel with `c`.
    pub fn fill(&mut self, c: Rgba8) {
        let px = c.to_array();
        for chunk in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Count pixels matching `pred`.
    pub fn count_pixels(&self, pred: impl Fn(Rgba8) -> bool) -> usize {
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|p| pred(Rgba8::new(p[0], p[1], p[2], p[3])))
            .count()
    }

    /// Coordinates of every pixel matching `pred`, row-major.
    pub fn pixels_where(&self, pred: impl Fn(Rgba8) -> bool) -> Vec<(i32, i32)> {
        let w = self.width as usize;
        self.data
            .chunks_exact(BYTES_PER_PIXEL)
            .enumerate()
            .filter(|(_, p)| pred(Rgba8::new(p[0], p[1], p[2], p[3])))
            .map(|(i, _)| ((i % w) as i32, (i / w) as i32))
            .collect()
    }

    /// True if every pixel is transparent black.
    pub fn is_clear(&self) -> bool {
        self.data.iter().all(|&b| b == 0)
    }

    /// Flip the buffer vertically (bottom-up sources become top-down).
    pub fn flip_vertical(&mut self) {
        let row_bytes = self.stride();
        let h = self.height as usize;
        for y in 0..h / 2 {
            let (top, bottom) = self.data.split_at_mut((h - 1 - y) * row_bytes);
            top[y * row_bytes..(y + 1) * row_bytes].swap_with_slice(&mut bottom[..row_bytes]);
        }
    }
}

impl PixelSurface for Surface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, c: Rgba8) {
        if let Some(i) = offset(x, y, self.width, self.height, self.stride()) {
            self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&c.to_array());
        }
    }

    fn clear_all(&mut self) {
        self.data.fill(0);
    }
}

// ============================================================================
// SurfaceMut
// ============================================================================

/// A borrowed view over a caller-owned RGBA8 frame buffer.
pub struct SurfaceMut<'a> {
    buf: &'a mut [u8],
    width: u32,
    height: u32,
    stride: usize,
}

impl<'a> SurfaceMut<'a> {
    /// Attach to a tightly packed buffer (`stride == width * 4`).
    pub fn new(buf: &'a mut [u8], width: u32, height: u32) -> Result<Self, SurfaceError> {
        let stride = (width as usize)
            .checked_mul(BYTES_PER_PIXEL)
            .ok_or(SurfaceError::Dimensions { width, height })?;
        Self::with_stride(buf, width, height, stride)
    }

    /// Attach to a buffer whose rows are `stride` bytes apart.
    pub fn with_stride(
        buf: &'a mut [u8],
        width: u32,
        height: u32,
        stride: usize,
    ) -> Result<Self, SurfaceError> {
        let row = checked_len(width, 1)?;
        if stride < row {
            return Err(SurfaceError::Stride { stride, width });
        }
        let expected = if height == 0 {
            0
        } else {
            stride
                .checked_mul(height as usize - 1)
                .and_then(|n| n.checked_add(row))
                .ok_or(SurfaceError::Dimensions { width, height })?
        };
        if buf.len() < expected {
            return Err(SurfaceError::BufferSize {
                expected,
                actual: buf.len(),
            });
        }
        Ok(Self {
            buf,
            width,
            height,
            stride,
        })
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        let i = offset(x, y, self.width, self.height, self.stride)?;
        Some(Rgba8::new(
            self.buf[i],
            self.buf[i + 1],
            self.buf[i + 2],
            self.buf[i + 3],
        ))
    }
}

impl PixelSurface for SurfaceMut<'_> {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, c: Rgba8) {
        if let Some(i) = offset(x, y, self.width, self.height, self.stride) {
            self.buf[i..i + BYTES_PER_PIXEL].copy_from_slice(&c.to_array());
        }
    }

    fn clear_all(&mut self) {
        let row = self.width as usize * BYTES_PER_PIXEL;
        for y in 0..self.height as usize {
            let start = y * self.stride;
            self.buf[start..start + row].fill(0);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba8 = Rgba8::new_opaque(255, 0, 0);

    #[test]
    fn test_new_is_clear() {
        let s = Surface::new(4, 3);
        assert_eq!(s.width(), 4);
        assert_eq!(s.height(), 3);
        assert_eq!(s.data().len(), 48);
        assert!(s.is_clear());
    }

    #[test]
    fn test_set_and_read_pixel() {
        let mut s = Surface::new(4, 4);
        s.set_pixel(1, 2, RED);
        assert_eq!(s.pixel(1, 2), Some(RED));
        assert_eq!(s.pixel(2, 1), Some(Rgba8::TRANSPARENT));
        assert_eq!(s.count_pixels(|c| c == RED), 1);
        assert_eq!(s.pixels_where(|c| c == RED), vec![(1, 2)]);
    }

    #[test]
    fn test_out_of_bounds_is_noop() {
        let mut s = Surface::new(4, 4);
        s.set_pixel(-1, 0, RED);
        s.set_pixel(0, -1, RED);
        s.set_pixel(4, 0, RED);
        s.set_pixel(0, 4, RED);
        s.set_pixel(i32::MIN, i32::MAX, RED);
        s.clear_pixel(100, 100);
        assert!(s.is_clear());
        assert_eq!(s.pixel(4, 0), None);
    }

    #[test]
    fn test_clear_pixel_and_clear_all() {
        let mut s = Surface::new(3, 3);
        s.fill(RED);
        s.clear_pixel(1, 1);
        assert_eq!(s.pixel(1, 1), Some(Rgba8::TRANSPARENT));
        assert_eq!(s.count_pixels(|c| c == RED), 8);
        s.clear_all();
        assert!(s.is_clear());
    }

    #[test]
    fn test_from_rgba_validates_length() {
        assert!(Surface::from_rgba(2, 2, vec![0; 16]).is_ok());
        assert_eq!(
            Surface::from_rgba(2, 2, vec![0; 15]),
            Err(SurfaceError::BufferSize {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_flip_vertical() {
        let mut s = Surface::new(2, 3);
        s.set_pixel(0, 0, RED);
        s.set_pixel(1, 1, Rgba8::WHITE);
        s.flip_vertical();
        assert_eq!(s.pixel(0, 2), Some(RED));
        assert_eq!(s.pixel(1, 1), Some(Rgba8::WHITE));
        assert_eq!(s.pixel(0, 0), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn test_surface_mut_writes_through() {
        let mut data = vec![0u8; 2 * 2 * 4];
        {
            let mut view = SurfaceMut::new(&mut data, 2, 2).unwrap();
            view.set_pixel(1, 1, RED);
            view.set_pixel(2, 2, RED);
            assert_eq!(view.pixel(1, 1), Some(RED));
        }
        assert_eq!(&data[12..16], &[255, 0, 0, 255]);
        assert_eq!(data.iter().filter(|&&b| b != 0).count(), 2);
    }

    #[test]
    fn test_surface_mut_padded_stride() {
        // 2 pixels per row, 12 bytes per row (4 bytes padding).
        let mut data = vec![7u8; 12 * 2];
        let mut view = SurfaceMut::with_stride(&mut data, 2, 2, 12).unwrap();
        view.clear_all();
        view.set_pixel(0, 1, RED);
        assert_eq!(&data[0..8], &[0; 8]);
        assert_eq!(&data[8..12], &[7; 4]);
        assert_eq!(&data[12..16], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_surface_mut_rejects_bad_buffers() {
        let mut small = vec![0u8; 10];
        assert!(matches!(
            SurfaceMut::new(&mut small, 2, 2),
            Err(SurfaceError::BufferSize { .. })
        ));
        let mut data = vec![0u8; 64];
        assert!(matches!(
            SurfaceMut::with_stride(&mut data, 4, 2, 8),
            Err(SurfaceError::Stride { .. })
        ));
    }

    #[test]
    fn test_default_clear_all() {
        struct Counting {
            cleared: usize,
        }
        impl PixelSurface for Counting {
            fn width(&self) -> u32 {
                3
            }
            fn height(&self) -> u32 {
                2
            }
            fn set_pixel(&mut self, _x: i32, _y: i32, c: Rgba8) {
                if c.is_transparent() {
                    self.cleared += 1;
                }
            }
        }
        let mut s = Counting { cleared: 0 };
        s.clear_all();
        assert_eq!(s.cleared, 6);
    }
}
