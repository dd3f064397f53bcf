// Copyright 2025. Pixel-perfect comparison library for sw-renderer.
//
// Provides surface comparison, BMP/raw I/O, and diff image generation.

use anyhow::{bail, ensure, Context, Result};
use std::fs;
use std::path::Path;
use sw_renderer::surface::Surface;

pub mod render;

// ============================================================================
// Comparison Result
// ============================================================================

/// Information about a single pixel difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffInfo {
    pub x: u32,
    pub y: u32,
    pub pixel_a: [u8; 4],
    pub pixel_b: [u8; 4],
}

/// Result of comparing two surfaces.
#[derive(Debug, Clone)]
pub struct CompareResult {
    /// True if every pixel in both surfaces is identical.
    pub identical: bool,
    pub total_pixels: u64,
    /// Number of pixels that differ by at least 1 in any channel.
    pub different_pixels: u64,
    /// Maximum absolute difference across any single channel of any pixel.
    pub max_channel_diff: u8,
    /// Mean absolute difference across all differing channels.
    pub mean_channel_diff: f64,
    /// The first differing pixel found (scanning left-to-right, top-to-bottom).
    pub first_diff: Option<DiffInfo>,
    /// Histogram of channel differences (index = abs_diff, value = count).
    pub diff_histogram: [u64; 256],
}

impl std::fmt::Display for CompareResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.identical {
            return write!(f, "IDENTICAL: {} pixels match perfectly", self.total_pixels);
        }
        write!(
            f,
            "DIFFERENT: {}/{} pixels differ ({:.2}%), max_diff={}, mean_diff={:.4}",
            self.different_pixels,
            self.total_pixels,
            self.different_pixels as f64 / self.total_pixels as f64 * 100.0,
            self.max_channel_diff,
            self.mean_channel_diff,
        )?;
        if let Some(ref d) = self.first_diff {
            write!(
                f,
                "\n  First diff at ({}, {}): A={:?} B={:?}",
                d.x, d.y, d.pixel_a, d.pixel_b
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Surface Comparison
// ============================================================================

fn ensure_same_size(a: &Surface, b: &Surface) -> Result<()> {
    ensure!(
        a.width() == b.width() && a.height() == b.height(),
        "size mismatch: {}x{} vs {}x{}",
        a.width(),
        a.height(),
        b.width(),
        b.height()
    );
    Ok(())
}

fn rgba(data: &[u8], i: usize) -> [u8; 4] {
    [data[i], data[i + 1], data[i + 2], data[i + 3]]
}

/// Compare two surfaces channel by channel.
pub fn compare_surfaces(a: &Surface, b: &Surface) -> Result<CompareResult> {
    ensure_same_size(a, b)?;

    let total_pixels = a.width() as u64 * a.height() as u64;
    let mut different_pixels = 0u64;
    let mut max_channel_diff = 0u8;
    let mut total_diff_sum = 0u64;
    let mut total_diff_channels = 0u64;
    let mut first_diff: Option<DiffInfo> = None;
    let mut diff_histogram = [0u64; 256];

    for (i, (pa, pb)) in a
        .data()
        .chunks_exact(4)
        .zip(b.data().chunks_exact(4))
        .enumerate()
    {
        let mut pixel_differs = false;
        for (ca, cb) in pa.iter().zip(pb) {
            let diff = ca.abs_diff(*cb);
            if diff > 0 {
                pixel_differs = true;
                max_channel_diff = max_channel_diff.max(diff);
                total_diff_sum += diff as u64;
                total_diff_channels += 1;
                diff_histogram[diff as usize] += 1;
            }
        }

        if pixel_differs {
            different_pixels += 1;
            if first_diff.is_none() {
                first_diff = Some(DiffInfo {
                    x: i as u32 % a.width(),
                    y: i as u32 / a.width(),
                    pixel_a: rgba(pa, 0),
                    pixel_b: rgba(pb, 0),
                });
            }
        }
    }

    let mean_channel_diff = if total_diff_channels > 0 {
        total_diff_sum as f64 / total_diff_channels as f64
    } else {
        0.0
    };

    Ok(CompareResult {
        identical: different_pixels == 0,
        total_pixels,
        different_pixels,
        max_channel_diff,
        mean_channel_diff,
        first_diff,
        diff_histogram,
    })
}

/// Generate a visual diff image highlighting pixel differences.
///
/// - Identical pixels are dark gray.
/// - Different pixels are red, brightness proportional to the largest
///   channel difference (amplified 10x, alpha included since coverage
///   mismatches often show only there).
pub fn generate_diff_image(a: &Surface, b: &Surface) -> Result<Surface> {
    ensure_same_size(a, b)?;
    let mut data = Vec::with_capacity(a.data().len());
    for (pa, pb) in a.data().chunks_exact(4).zip(b.data().chunks_exact(4)) {
        let max_diff = pa
            .iter()
            .zip(pb)
            .map(|(ca, cb)| ca.abs_diff(*cb))
            .max()
            .unwrap_or(0);
        if max_diff == 0 {
            data.extend_from_slice(&[40, 40, 40, 255]);
        } else {
            let v = (max_diff as u16 * 10).min(255) as u8;
            data.extend_from_slice(&[v, 0, 0, 255]);
        }
    }
    Ok(Surface::from_rgba(a.width(), a.height(), data)?)
}

/// Generate a side-by-side comparison image: [A | Diff | B]
pub fn generate_sidebyside(a: &Surface, b: &Surface) -> Result<Surface> {
    let diff = generate_diff_image(a, b)?;
    let row = a.width() as usize * 4;
    let mut data = Vec::with_capacity(row * 3 * a.height() as usize);
    for y in 0..a.height() as usize {
        let span = y * row..(y + 1) * row;
        data.extend_from_slice(&a.data()[span.clone()]);
        data.extend_from_slice(&diff.data()[span.clone()]);
        data.extend_from_slice(&b.data()[span]);
    }
    Ok(Surface::from_rgba(a.width() * 3, a.height(), data)?)
}

// ============================================================================
// BMP I/O (32-bit BGRA, top-down)
// ============================================================================

/// Encode a surface as a 32-bit BMP (top-down, BGRA).
pub fn encode_bmp(buf: &Surface) -> Result<Vec<u8>> {
    let w = buf.width();
    let h = buf.height();
    let image_size = (w as u64 * 4)
        .checked_mul(h as u64)
        .and_then(|n| u32::try_from(n).ok())
        .context("image too large for BMP")?;
    let file_size = image_size
        .checked_add(14 + 40)
        .context("image too large for BMP")?;
    ensure!(
        i32::try_from(w).is_ok() && i32::try_from(h).is_ok(),
        "image too large for BMP"
    );

    let mut out = Vec::with_capacity(file_size as usize);

    // BMP file header (14 bytes)
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&file_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 4]); // reserved
    out.extend_from_slice(&(14u32 + 40).to_le_bytes()); // pixel data offset

    // BITMAPINFOHEADER (40 bytes)
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&(w as i32).to_le_bytes());
    out.extend_from_slice(&(-(h as i32)).to_le_bytes()); // negative height = top-down
    out.extend_from_slice(&1u16.to_le_bytes()); // planes
    out.extend_from_slice(&32u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&[0u8; 16]); // resolution, palette counts

    for px in buf.data().chunks_exact(4) {
        out.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
    }
    Ok(out)
}

/// Decode a 24- or 32-bit uncompressed BMP.
pub fn decode_bmp(data: &[u8]) -> Result<Surface> {
    ensure!(data.len() >= 54 && &data[0..2] == b"BM", "not a valid BMP file");

    let u32_at = |i: usize| u32::from_le_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
    let pixel_offset = u32_at(10) as usize;
    let w = u32_at(18) as i32;
    let h = u32_at(22) as i32;
    let bpp = u16::from_le_bytes([data[28], data[29]]) as usize;

    let bytes_pp = match bpp {
        24 | 32 => bpp / 8,
        other => bail!("unsupported BMP bit depth {other}"),
    };
    let width = w.unsigned_abs();
    let height = h.unsigned_abs();
    let top_down = h < 0;
    let row_stride = (width as usize)
        .checked_mul(bytes_pp)
        .and_then(|n| n.checked_add(3))
        .map(|n| n / 4 * 4)
        .context("image dimensions overflow")?;
    let needed = row_stride
        .checked_mul(height as usize)
        .and_then(|n| n.checked_add(pixel_offset))
        .context("image dimensions overflow")?;
    ensure!(
        data.len() >= needed,
        "truncated BMP: expected {needed} bytes, got {}",
        data.len()
    );

    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height as usize {
        let src_y = if top_down { y } else { height as usize - 1 - y };
        let row = &data[pixel_offset + src_y * row_stride..][..width as usize * bytes_pp];
        for px in row.chunks_exact(bytes_pp) {
            let a = if bytes_pp == 4 { px[3] } else { 255 };
            out.extend_from_slice(&[px[2], px[1], px[0], a]);
        }
    }
    Ok(Surface::from_rgba(width, height, out)?)
}

// ============================================================================
// Raw RGBA I/O (for precise byte-for-byte comparison)
// ============================================================================

/// Encode as raw RGBA with a simple header: [width:u32][height:u32][rgba_data].
pub fn encode_raw(buf: &Surface) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + buf.data().len());
    out.extend_from_slice(&buf.width().to_le_bytes());
    out.extend_from_slice(&buf.height().to_le_bytes());
    out.extend_from_slice(buf.data());
    out
}

/// Decode raw RGBA produced by [`encode_raw`] or a reference renderer.
pub fn decode_raw(data: &[u8]) -> Result<Surface> {
    ensure!(data.len() >= 8, "raw file too small");
    let width = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let height = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .and_then(|n| n.checked_add(8))
        .context("image dimensions overflow")?;
    ensure!(
        data.len() >= expected,
        "raw file too small: expected {expected} bytes, got {}",
        data.len()
    );
    Ok(Surface::from_rgba(width, height, data[8..expected].to_vec())?)
}

// ============================================================================
// File helpers
// ============================================================================

/// Load an image file, detecting format by extension.
pub fn load_image(path: &Path) -> Result<Surface> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("bmp") => decode_bmp(&data),
        Some("raw") | Some("rgba") => decode_raw(&data),
        _ => bail!("unsupported image format: {}", path.display()),
    }
    .with_context(|| format!("decoding {}", path.display()))
}

/// Save an image file, detecting format by extension.
pub fn save_image(path: &Path, buf: &Surface) -> Result<()> {
    let bytes = match path.extension().and_then(|e| e.to_str()) {
        Some("bmp") => encode_bmp(buf)?,
        Some("raw") | Some("rgba") => encode_raw(buf),
        _ => bail!("unsupported image format: {}", path.display()),
    };
    fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))
}

// ============================================================================
// Tests
// ============================================================================
