//! Color-mode selection.
//!
//! One pass over the image collects everything needed to pick the most
//! compact lossless encoding: whether every pixel is gray, whether every
//! pixel is opaque, and a palette of up to 256 distinct colors. The RGBA
//! rows and palette indices are written optimistically during that pass so
//! the common outcomes need no second scan.

use std::collections::HashMap;

use log::debug;

use crate::color::{luma, to_rgba, ColorMode};
use crate::pixels::PixelBuffer;

/// Filter type byte prefixed to every scanline ("no filtering").
const FILTER_NONE: u8 = 0;

/// Maximum number of palette entries.
const MAX_PALETTE: usize = 256;

/// Channel deviation under which a colored image would still be stored as
/// gray. Negative, so the branch never fires.
const GRAYSCALE_TOLERANCE: i32 = -1;

/// Working buffers for [`plan`], reusable across images.
///
/// A scratch holds no state that outlives a call: every buffer is cleared
/// before use. Keep one per worker to avoid reallocating for each image.
#[derive(Debug, Default)]
pub struct Scratch {
    rgba: Vec<u8>,
    indexed: Vec<u8>,
    converted: Vec<u8>,
    lookup: HashMap<u32, u8>,
}

impl Scratch {
    /// Create an empty scratch.
    pub fn new() -> Self {
        Self::default()
    }
}

/// The chosen encoding and its unfiltered scanline bytes.
#[derive(Debug)]
pub struct EncodingPlan<'a> {
    /// Chosen color mode.
    pub color_mode: ColorMode,
    /// Encoded width (frame excluded for 9-patches).
    pub width: u32,
    /// Encoded height (frame excluded for 9-patches).
    pub height: u32,
    /// Scanlines, each prefixed with a filter byte of 0.
    pub raw: &'a [u8],
    /// ARGB palette in index order; empty unless `color_mode` is `Palette`.
    pub palette: Vec<u32>,
    /// True if any pixel is not fully opaque.
    pub has_transparency: bool,
}

impl EncodingPlan<'_> {
    /// True if a tRNS chunk must accompany the palette.
    pub fn needs_transparency_chunk(&self) -> bool {
        self.color_mode == ColorMode::Palette && self.has_transparency
    }
}

/// Statistics gathered by the single analysis pass.
struct Analysis {
    gray: bool,
    opaque: bool,
    max_gray_deviation: u8,
    palette: Option<Vec<u32>>,
}

/// Pick the encoding for `image` and produce its scanlines.
///
/// For a 9-patch the one-pixel frame is skipped and the result is forced to
/// RGBA unless it is already gray+alpha, so stretchable pixels survive
/// downstream processing unchanged. An image too small to hold an interior
/// yields an empty plan.
pub fn plan<'s>(
    scratch: &'s mut Scratch,
    image: &PixelBuffer<'_>,
    nine_patch: bool,
) -> EncodingPlan<'s> {
    let (x0, y0, x1, y1) = if nine_patch {
        interior(image.width(), image.height())
    } else {
        (0, 0, image.width(), image.height())
    };
    let width = x1 - x0;
    let height = y1 - y0;

    let analysis = analyze(scratch, image, (x0, y0, x1, y1));
    let color_mode = choose(&analysis, width as usize * height as usize, nine_patch);
    debug!(
        "{}x{} gray={} opaque={} palette={:?} -> {:?}",
        width,
        height,
        analysis.gray,
        analysis.opaque,
        analysis.palette.as_ref().map(Vec::len),
        color_mode
    );

    match color_mode {
        ColorMode::Gray | ColorMode::GrayAlpha => convert_gray(
            &mut scratch.converted,
            image,
            (x0, y0, x1, y1),
            analysis.gray,
            color_mode == ColorMode::GrayAlpha,
        ),
        ColorMode::Rgb => convert_rgb(&mut scratch.converted, image, (x0, y0, x1, y1)),
        ColorMode::Palette | ColorMode::Rgba => {}
    }

    let scratch: &'s Scratch = scratch;
    let raw: &'s [u8] = match color_mode {
        ColorMode::Palette => &scratch.indexed,
        ColorMode::Rgba => &scratch.rgba,
        ColorMode::Gray | ColorMode::GrayAlpha | ColorMode::Rgb => &scratch.converted,
    };

    let palette = match (color_mode, analysis.palette) {
        (ColorMode::Palette, Some(palette)) => palette,
        _ => Vec::new(),
    };

    EncodingPlan {
        color_mode,
        width,
        height,
        raw,
        palette,
        has_transparency: !analysis.opaque,
    }
}

/// Region inside the one-pixel frame, empty when there is none.
fn interior(width: u32, height: u32) -> (u32, u32, u32, u32) {
    (1, 1, width.saturating_sub(1).max(1), height.saturating_sub(1).max(1))
}

/// Scan the region once, filling the RGBA and palette-index buffers.
fn analyze(
    scratch: &mut Scratch,
    image: &PixelBuffer<'_>,
    region: (u32, u32, u32, u32),
) -> Analysis {
    let (x0, y0, x1, y1) = region;
    let width = (x1 - x0) as usize;
    let height = (y1 - y0) as usize;

    scratch.rgba.clear();
    scratch.rgba.reserve((1 + width * 4) * height);
    scratch.indexed.clear();
    scratch.indexed.reserve((1 + width) * height);
    scratch.lookup.clear();

    let mut gray = true;
    let mut opaque = true;
    let mut max_gray_deviation = 0u8;
    let mut palette: Option<Vec<u32>> = Some(Vec::with_capacity(MAX_PALETTE));

    for y in y0..y1 {
        scratch.rgba.push(FILTER_NONE);
        scratch.indexed.push(FILTER_NONE);

        for x in x0..x1 {
            let argb = image.get(x, y);
            let [r, g, b, a] = to_rgba(argb);

            max_gray_deviation = max_gray_deviation
                .max(r.abs_diff(g))
                .max(g.abs_diff(b))
                .max(b.abs_diff(r));
            gray &= r == g && r == b;
            opaque &= a == 0xFF;

            if let Some(colors) = palette.as_mut() {
                let index = match scratch.lookup.get(&argb) {
                    Some(&index) => Some(index),
                    None if colors.len() < MAX_PALETTE => {
                        let index = colors.len() as u8;
                        colors.push(argb);
                        scratch.lookup.insert(argb, index);
                        Some(index)
                    }
                    None => None,
                };
                match index {
                    Some(index) => scratch.indexed.push(index),
                    None => palette = None,
                }
            }

            scratch.rgba.extend_from_slice(&[r, g, b, a]);
        }
    }

    Analysis {
        gray,
        opaque,
        max_gray_deviation,
        palette,
    }
}

/// Choose the color mode from the analysis. First match wins.
fn choose(analysis: &Analysis, pixels: usize, nine_patch: bool) -> ColorMode {
    let opaque = analysis.opaque;
    let palette_len = analysis.palette.as_ref().map(Vec::len);
    let bytes_per_entry = if opaque { 3 } else { 4 };
    let bytes_per_pixel = if opaque { 3 } else { 4 };
    let palette_fits = |budget: usize| {
        palette_len.is_some_and(|len| pixels + bytes_per_entry * len < budget)
    };

    let mode = if analysis.gray {
        if opaque {
            ColorMode::Gray
        } else if palette_fits(2 * pixels) {
            ColorMode::Palette
        } else {
            ColorMode::GrayAlpha
        }
    } else if palette_fits(bytes_per_pixel * pixels) {
        ColorMode::Palette
    } else if i32::from(analysis.max_gray_deviation) <= GRAYSCALE_TOLERANCE {
        if opaque {
            ColorMode::Gray
        } else {
            ColorMode::GrayAlpha
        }
    } else if opaque {
        ColorMode::Rgb
    } else {
        ColorMode::Rgba
    };

    match mode {
        ColorMode::Rgb | ColorMode::Gray | ColorMode::Palette if nine_patch => ColorMode::Rgba,
        other => other,
    }
}

fn convert_gray(
    out: &mut Vec<u8>,
    image: &PixelBuffer<'_>,
    region: (u32, u32, u32, u32),
    exact_gray: bool,
    with_alpha: bool,
) {
    let (x0, y0, x1, y1) = region;
    let bpp = if with_alpha { 2 } else { 1 };
    out.clear();
    out.reserve((1 + (x1 - x0) as usize * bpp) * (y1 - y0) as usize);

    for y in y0..y1 {
        out.push(FILTER_NONE);
        for x in x0..x1 {
            let [r, g, b, a] = to_rgba(image.get(x, y));
            out.push(if exact_gray { r } else { luma(r, g, b) });
            if with_alpha {
                out.push(a);
            }
        }
    }
}

fn convert_rgb(out: &mut Vec<u8>, image: &PixelBuffer<'_>, region: (u32, u32, u32, u32)) {
    let (x0, y0, x1, y1) = region;
    out.clear();
    out.reserve((1 + (x1 - x0) as usize * 3) * (y1 - y0) as usize);

    for y in y0..y1 {
        out.push(FILTER_NONE);
        for x in x0..x1 {
            let [r, g, b, _] = to_rgba(image.get(x, y));
            out.extend_from_slice(&[r, g, b]);
        }
    }
}
