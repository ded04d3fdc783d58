//! Color mode definitions and ARGB pixel helpers.
//!
//! Pixels travel through the crate as packed `u32` ARGB values (alpha in the
//! high byte). PNG wants channels in R, G, B, A order, so every byte stream
//! is an explicit re-layout, never a memory copy.

/// Opaque white, the "no tick" color of a white frame.
pub const WHITE: u32 = 0xFFFF_FFFF;
/// Opaque black, a stretch tick.
pub const BLACK: u32 = 0xFF00_0000;
/// Opaque red, a layout-bounds tick.
pub const LAYOUT_BOUNDS_RED: u32 = 0xFFFF_0000;

/// PNG color modes the crunch pipeline can choose between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorMode {
    /// Grayscale, 1 byte per pixel.
    Gray,
    /// Grayscale with alpha, 2 bytes per pixel.
    GrayAlpha,
    /// Palette indices, 1 byte per pixel plus PLTE/tRNS.
    Palette,
    /// RGB, 3 bytes per pixel.
    Rgb,
    /// RGBA, 4 bytes per pixel.
    Rgba,
}

impl ColorMode {
    /// Returns the number of bytes per pixel in the IDAT stream.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ColorMode::Gray | ColorMode::Palette => 1,
            ColorMode::GrayAlpha => 2,
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }

    /// Returns the PNG color type value written to IHDR.
    #[inline]
    pub const fn png_color_type(self) -> u8 {
        match self {
            ColorMode::Gray => 0,
            ColorMode::Rgb => 2,
            ColorMode::Palette => 3,
            ColorMode::GrayAlpha => 4,
            ColorMode::Rgba => 6,
        }
    }

    /// Returns the bit depth for PNG encoding.
    #[inline]
    pub const fn png_bit_depth(self) -> u8 {
        8 // Only 8-bit channels are produced
    }
}

impl TryFrom<u8> for ColorMode {
    type Error = u8;

    /// Parse a PNG IHDR color type.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ColorMode::Gray),
            2 => Ok(ColorMode::Rgb),
            3 => Ok(ColorMode::Palette),
            4 => Ok(ColorMode::GrayAlpha),
            6 => Ok(ColorMode::Rgba),
            other => Err(other),
        }
    }
}

/// Alpha channel of an ARGB pixel.
#[inline]
pub const fn alpha(argb: u32) -> u8 {
    (argb >> 24) as u8
}

/// Red channel of an ARGB pixel.
#[inline]
pub const fn red(argb: u32) -> u8 {
    (argb >> 16) as u8
}

/// Green channel of an ARGB pixel.
#[inline]
pub const fn green(argb: u32) -> u8 {
    (argb >> 8) as u8
}

/// Blue channel of an ARGB pixel.
#[inline]
pub const fn blue(argb: u32) -> u8 {
    argb as u8
}

/// Re-layout an ARGB pixel as `[r, g, b, a]`.
#[inline]
pub const fn to_rgba(argb: u32) -> [u8; 4] {
    [red(argb), green(argb), blue(argb), alpha(argb)]
}

/// Pack `[r, g, b, a]` into an ARGB pixel.
#[inline]
pub const fn from_rgba(rgba: [u8; 4]) -> u32 {
    (rgba[3] as u32) << 24 | (rgba[0] as u32) << 16 | (rgba[1] as u32) << 8 | rgba[2] as u32
}

/// Pack an interleaved RGBA8 byte buffer into ARGB pixels.
///
/// Trailing bytes that don't form a whole pixel are ignored.
pub fn pack_rgba8(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|p| from_rgba([p[0], p[1], p[2], p[3]]))
        .collect()
}

/// Rec. 709 luma, truncated to a byte.
///
/// Only reached for pixels that are not exactly gray.
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    (r as f32 * 0.2126 + g as f32 * 0.7152 + b as f32 * 0.0722) as u8
}
