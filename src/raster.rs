//! Decoded raster input.
//!
//! Pixels are held as `(height, width, channels)` like every other image in
//! the crate. Decoding bytes into pixels happens outside the pipeline, behind
//! [`ImageDecoder`].

use ndarray::Array3;

use crate::error::{Result, VectorizeError};

/// An immutable decoded image with 1, 3 or 4 channels.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixels: Array3<u8>,
}

impl RasterImage {
    /// Wrap a flat row-major RGBA buffer.
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::from_raw(width, height, 4, data)
    }

    /// Wrap a flat row-major buffer with the given channel count.
    pub fn from_raw(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        check_shape(height, width, channels)?;
        let expected = width * height * channels;
        if data.len() != expected {
            return Err(VectorizeError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        let pixels = Array3::from_shape_vec((height, width, channels), data).map_err(|_| {
            VectorizeError::BufferSize {
                expected,
                actual: 0,
            }
        })?;
        Ok(Self { pixels })
    }

    /// Take ownership of an `(height, width, channels)` array.
    pub fn from_array(pixels: Array3<u8>) -> Result<Self> {
        let (height, width, channels) = pixels.dim();
        check_shape(height, width, channels)?;
        Ok(Self { pixels })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.dim().1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.dim().0
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.pixels.dim().2
    }

    /// Whether the image carries an alpha channel at all.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels() == 4
    }

    /// Alpha at `(x, y)`; images without alpha are fully opaque.
    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        if self.has_alpha() {
            self.pixels[[y, x, 3]]
        } else {
            255
        }
    }
}

fn check_shape(height: usize, width: usize, channels: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(VectorizeError::EmptyImage);
    }
    if !matches!(channels, 1 | 3 | 4) {
        return Err(VectorizeError::UnsupportedChannels(channels));
    }
    Ok(())
}

/// External collaborator that turns encoded bytes (PNG, data URL payload, ...)
/// into a [`RasterImage`].
pub trait ImageDecoder {
    type Error: std::error::Error + Send + Sync + 'static;

    fn decode(&self, bytes: &[u8]) -> std::result::Result<RasterImage, Self::Error>;
}
