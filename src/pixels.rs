//! Borrowed ARGB pixel buffers and strided line views.

use crate::error::{Error, Result};

/// Maximum supported image dimension.
pub const MAX_DIMENSION: u32 = 1 << 24;

/// A decoded image: `width * height` ARGB pixels in row-major order.
///
/// The buffer is borrowed from the caller and never mutated.
#[derive(Debug, Clone, Copy)]
pub struct PixelBuffer<'a> {
    pixels: &'a [u32],
    width: u32,
    height: u32,
}

impl<'a> PixelBuffer<'a> {
    /// Wrap a pixel slice, validating its dimensions.
    pub fn new(pixels: &'a [u32], width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Error::ImageTooLarge {
                width,
                height,
                max: MAX_DIMENSION,
            });
        }
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::InvalidDataLength {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw pixel slice.
    #[inline]
    pub fn pixels(&self) -> &'a [u32] {
        self.pixels
    }

    /// Pixel at `(x, y)`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// View of row `y`.
    pub fn row(&self, y: u32) -> Line<'a> {
        Line {
            pixels: self.pixels,
            start: y as usize * self.width as usize,
            stride: 1,
            len: self.width as usize,
        }
    }

    /// View of column `x`.
    pub fn column(&self, x: u32) -> Line<'a> {
        Line {
            pixels: self.pixels,
            start: x as usize,
            stride: self.width as usize,
            len: self.height as usize,
        }
    }
}

/// A strided view over one row or column of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pixels: &'a [u32],
    start: usize,
    stride: usize,
    len: usize,
}

impl Line<'_> {
    /// Number of pixels in the line, frame pixels included.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-length line.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pixel at position `i` along the line.
    #[inline]
    pub fn at(&self, i: usize) -> u32 {
        self.pixels[self.start + i * self.stride]
    }
}
