//! Chunk payload encoders.
//!
//! Each function returns the data field of one chunk. Length and CRC
//! framing are added by [`super::chunk::write_chunk`].

use crate::color::{alpha, blue, green, red, ColorMode};
use crate::ninepatch::{LayoutBounds, PatchGeometry};

/// Size of the fixed `npTc` header preceding the div and color arrays.
pub const NINE_PATCH_HEADER_LEN: usize = 32;

/// IHDR payload: dimensions, bit depth, color type, and zeroed
/// compression/filter/interlace methods.
pub fn ihdr(width: u32, height: u32, color_mode: ColorMode) -> Vec<u8> {
    let mut data = Vec::with_capacity(13);

    // Width (4 bytes, big-endian)
    data.extend_from_slice(&width.to_be_bytes());

    // Height (4 bytes, big-endian)
    data.extend_from_slice(&height.to_be_bytes());

    data.push(color_mode.png_bit_depth());
    data.push(color_mode.png_color_type());

    // Compression method (DEFLATE)
    data.push(0);

    // Filter method
    data.push(0);

    // Interlace method (none)
    data.push(0);

    data
}

/// `npTc` payload.
///
/// Mirrors the in-memory layout of the native `Res_png_9patch` struct, all
/// multi-byte fields big-endian:
///
/// ```text
/// 0      wasDeserialized (always 0)
/// 1      numXDivs
/// 2      numYDivs
/// 3      numColors
/// 4..12  xDivs / yDivs offsets (zeroed)
/// 12..28 padding left, right, top, bottom (i32)
/// 28..32 colors offset (zeroed)
/// 32..   xDivs, yDivs, colors (i32 / u32 each)
/// ```
pub fn nine_patch(geometry: &PatchGeometry) -> Vec<u8> {
    let x_divs = &geometry.x_divs;
    let y_divs = &geometry.y_divs;
    let colors = &geometry.colors;
    let padding = &geometry.padding;

    let mut data =
        Vec::with_capacity(NINE_PATCH_HEADER_LEN + 4 * (x_divs.len() + y_divs.len() + colors.len()));

    data.push(0);
    // Counts are bounded by the 127-cell grid limit.
    data.push(x_divs.len() as u8);
    data.push(y_divs.len() as u8);
    data.push(colors.len() as u8);

    data.extend_from_slice(&[0; 8]);

    for inset in [padding.left, padding.right, padding.top, padding.bottom] {
        data.extend_from_slice(&inset.to_be_bytes());
    }

    data.extend_from_slice(&[0; 4]);

    for div in x_divs.iter().chain(y_divs) {
        data.extend_from_slice(&div.to_be_bytes());
    }
    for color in colors {
        data.extend_from_slice(&color.to_wire().to_be_bytes());
    }

    data
}

/// `npLb` payload: left, top, right, bottom as little-endian i32.
pub fn layout_bounds(bounds: &LayoutBounds) -> Vec<u8> {
    let mut data = Vec::with_capacity(16);
    for inset in [bounds.left, bounds.top, bounds.right, bounds.bottom] {
        data.extend_from_slice(&inset.to_le_bytes());
    }
    data
}

/// PLTE payload: R, G, B per entry in index order.
pub fn palette(colors: &[u32]) -> Vec<u8> {
    let mut data = Vec::with_capacity(colors.len() * 3);
    for &argb in colors {
        data.extend_from_slice(&[red(argb), green(argb), blue(argb)]);
    }
    data
}

/// tRNS payload: one alpha byte per palette entry in index order.
pub fn transparency(colors: &[u32]) -> Vec<u8> {
    colors.iter().map(|&argb| alpha(argb)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ninepatch::{CellColor, Padding};

    #[test]
    fn test_ihdr_layout() {
        let data = ihdr(100, 0x0102_0304, ColorMode::Palette);
        assert_eq!(data.len(), 13);
        assert_eq!(&data[0..4], &[0, 0, 0, 100]);
        assert_eq!(&data[4..8], &[1, 2, 3, 4]);
        assert_eq!(&data[8..], &[8, 3, 0, 0, 0]);
    }

    #[test]
    fn test_nine_patch_layout() {
        let geometry = PatchGeometry {
            x_divs: vec![1, 3],
            y_divs: vec![0, 2],
            padding: Padding {
                left: 1,
                right: 2,
                top: 0,
                bottom: -1,
            },
            colors: vec![
                CellColor::Solid(0xFF11_2233),
                CellColor::Mixed,
                CellColor::Transparent,
            ],
            cols: 3,
            rows: 1,
        };
        let data = nine_patch(&geometry);

        assert_eq!(data.len(), 32 + 4 * (2 + 2 + 3));
        assert_eq!(&data[0..4], &[0, 2, 2, 3]);
        assert_eq!(&data[4..12], &[0; 8]);
        assert_eq!(&data[12..16], &[0, 0, 0, 1]);
        assert_eq!(&data[16..20], &[0, 0, 0, 2]);
        assert_eq!(&data[20..24], &[0, 0, 0, 0]);
        assert_eq!(&data[24..28], &[0xFF, 0xFF, 0xFF, 0xFF]);
        assert_eq!(&data[28..32], &[0; 4]);
        assert_eq!(&data[32..36], &[0, 0, 0, 1]);
        assert_eq!(&data[36..40], &[0, 0, 0, 3]);
        assert_eq!(&data[40..44], &[0, 0, 0, 0]);
        assert_eq!(&data[44..48], &[0, 0, 0, 2]);
        assert_eq!(&data[48..52], &[0xFF, 0x11, 0x22, 0x33]);
        assert_eq!(&data[52..56], &[0, 0, 0, 1]);
        assert_eq!(&data[56..60], &[0, 0, 0, 0]);
    }

    #[test]
    fn test_layout_bounds_little_endian() {
        let data = layout_bounds(&LayoutBounds {
            left: 1,
            top: 2,
            right: 0x0304,
            bottom: 4,
        });
        assert_eq!(
            data,
            vec![1, 0, 0, 0, 2, 0, 0, 0, 4, 3, 0, 0, 4, 0, 0, 0]
        );
    }

    #[test]
    fn test_palette_and_transparency() {
        let colors = [0x80FF_0000, 0xFF00_FF00, 0x0000_00FF];
        assert_eq!(
            palette(&colors),
            vec![0xFF, 0, 0, 0, 0xFF, 0, 0, 0, 0xFF]
        );
        assert_eq!(transparency(&colors), vec![0x80, 0xFF, 0]);
    }
}
