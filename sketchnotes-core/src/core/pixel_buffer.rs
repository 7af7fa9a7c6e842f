//! A finished RGBA raster handed over by the drawing surface at save time.

use crate::{Result, SketchnotesError};

/// Bytes per pixel in an RGBA buffer.
pub const BYTES_PER_PIXEL: usize = 4;

/// Raw RGBA pixels in row-major order, validated to match the stated dimensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps `rgba` after checking it holds exactly `width * height` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`SketchnotesError::InvalidPixelBuffer`] on a length mismatch or
    /// when either dimension is zero.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
            .unwrap_or(usize::MAX);
        if width == 0 || height == 0 || rgba.len() != expected {
            return Err(SketchnotesError::InvalidPixelBuffer {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// A buffer where every pixel is `color`, as a freshly cleared canvas.
    ///
    /// # Errors
    ///
    /// Returns [`SketchnotesError::InvalidPixelBuffer`] if either dimension is zero.
    pub fn filled(width: u32, height: u32, color: [u8; 4]) -> Result<Self> {
        let pixels = (width as usize) * (height as usize);
        Self::new(width, height, color.repeat(pixels))
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.rgba
    }
}
