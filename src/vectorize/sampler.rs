//! Alpha sampling: downsample the source and threshold its alpha channel.
//!
//! The working mask is capped at `max_dim` on its longest side, which bounds
//! the cost of every later stage.

use ndarray::Array2;

use crate::error::{Result, VectorizeError};
use crate::raster::RasterImage;

/// Binary opacity grid, row-major, 1 = opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct AlphaMask {
    cells: Array2<u8>,
    solid_count: usize,
}

impl AlphaMask {
    /// Build a mask from row-major 0/1 cells (any non-zero counts as opaque).
    pub fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(VectorizeError::EmptyImage);
        }
        if cells.len() != width * height {
            return Err(VectorizeError::BufferSize {
                expected: width * height,
                actual: cells.len(),
            });
        }
        let cells: Vec<u8> = cells.into_iter().map(|c| u8::from(c > 0)).collect();
        let grid = Array2::from_shape_vec((height, width), cells).map_err(|_| {
            VectorizeError::BufferSize {
                expected: width * height,
                actual: 0,
            }
        })?;
        Ok(Self::from_grid(grid))
    }

    fn from_grid(cells: Array2<u8>) -> Self {
        let solid_count = cells.iter().filter(|&&c| c == 1).count();
        Self { cells, solid_count }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cells.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.cells.dim().0
    }

    /// Number of opaque cells.
    #[inline]
    pub fn solid_count(&self) -> usize {
        self.solid_count
    }

    /// False when the mask is entirely transparent or entirely opaque.
    pub fn has_alpha_variation(&self) -> bool {
        self.solid_count != 0 && self.solid_count != self.width() * self.height()
    }

    /// Opacity at `(x, y)`; out-of-bounds cells are transparent.
    #[inline]
    pub fn is_opaque(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && (x as usize) < self.width()
            && (y as usize) < self.height()
            && self.cells[[y as usize, x as usize]] == 1
    }

    /// Opaque and either on the mask border or next to a transparent cell
    /// (4-connected).
    #[inline]
    pub fn is_boundary(&self, x: i32, y: i32) -> bool {
        if !self.is_opaque(x, y) {
            return false;
        }
        !self.is_opaque(x - 1, y)
            || !self.is_opaque(x + 1, y)
            || !self.is_opaque(x, y - 1)
            || !self.is_opaque(x, y + 1)
    }
}

/// Working dimensions for an image of `width × height` capped at `max_dim`.
///
/// Never upsamples; each side is at least 1.
pub fn working_size(width: usize, height: usize, max_dim: usize) -> (usize, usize) {
    let scale = (max_dim as f64 / width as f64)
        .min(max_dim as f64 / height as f64)
        .min(1.0);
    let w = ((width as f64 * scale).round() as usize).max(1);
    let h = ((height as f64 * scale).round() as usize).max(1);
    (w, h)
}

/// Box-filter the alpha channel down to `dst_w × dst_h`.
///
/// Each output cell is the rounded mean alpha of its source footprint, so an
/// unscaled image passes through untouched.
pub fn downsample_alpha(image: &RasterImage, dst_w: usize, dst_h: usize) -> Array2<u8> {
    let (src_w, src_h) = (image.width(), image.height());
    let mut alpha = Array2::<u8>::zeros((dst_h, dst_w));

    for oy in 0..dst_h {
        let (y0, y1) = footprint(oy, src_h, dst_h);
        for ox in 0..dst_w {
            let (x0, x1) = footprint(ox, src_w, dst_w);

            let mut sum = 0u32;
            for sy in y0..y1 {
                for sx in x0..x1 {
                    sum += image.alpha(sx, sy) as u32;
                }
            }
            let count = ((y1 - y0) * (x1 - x0)) as u32;
            alpha[[oy, ox]] = ((sum + count / 2) / count) as u8;
        }
    }

    alpha
}

/// Source index range covered by destination index `i`.
#[inline]
fn footprint(i: usize, src_len: usize, dst_len: usize) -> (usize, usize) {
    let start = (i * src_len / dst_len).min(src_len - 1);
    let end = ((i + 1) * src_len).div_ceil(dst_len).clamp(start + 1, src_len);
    (start, end)
}

/// Binarize alpha: strictly above `threshold` is opaque.
pub fn threshold_mask(alpha: &Array2<u8>, threshold: u8) -> AlphaMask {
    AlphaMask::from_grid(alpha.mapv(|a| u8::from(a > threshold)))
}

/// Downsample `image` to at most `max_dim` per side and threshold its alpha.
pub fn sample_alpha_mask(image: &RasterImage, max_dim: usize, threshold: u8) -> AlphaMask {
    let (w, h) = working_size(image.width(), image.height(), max_dim);
    let alpha = downsample_alpha(image, w, h);
    threshold_mask(&alpha, threshold)
}
