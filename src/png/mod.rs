//! PNG crunching.
//!
//! [`crunch`] turns one decoded image into the ordered chunk list of a
//! compact PNG: header, optional 9-patch chunks, optional palette chunks,
//! then a single compressed `IDAT`. [`chunk::write_png`] frames that list
//! into a complete file.

pub mod chunk;
pub mod payload;
pub mod select;

use log::debug;

use crate::color::ColorMode;
use crate::compress::{self, Framing, MAX_LEVEL};
use crate::error::{Error, Result};
use crate::ninepatch::{self, NinePatch};
use crate::pixels::PixelBuffer;

use self::chunk::{Chunk, IDAT, IHDR, NPLB, NPTC, PLTE, TRNS};
use self::select::{EncodingPlan, Scratch};

/// Crunch options.
#[derive(Debug, Clone)]
pub struct CrunchOptions {
    /// Deflate level (0-9, default 9).
    pub compression_level: u8,
    /// Wrapper around the `IDAT` stream.
    pub framing: Framing,
}

impl Default for CrunchOptions {
    fn default() -> Self {
        Self::max_compression()
    }
}

impl CrunchOptions {
    /// Speed-focused preset.
    pub fn fast() -> Self {
        Self {
            compression_level: 1,
            framing: Framing::Zlib,
        }
    }

    /// Balanced preset, the usual zlib default.
    pub fn balanced() -> Self {
        Self {
            compression_level: 6,
            framing: Framing::Zlib,
        }
    }

    /// Highest compression preset; slowest.
    pub fn max_compression() -> Self {
        Self {
            compression_level: MAX_LEVEL,
            framing: Framing::Zlib,
        }
    }

    fn validate(&self) -> Result<()> {
        if self.compression_level > MAX_LEVEL {
            return Err(Error::InvalidCompressionLevel(self.compression_level));
        }
        Ok(())
    }
}

/// The result of crunching one image.
#[derive(Debug, Clone)]
pub struct CrunchedImage {
    width: u32,
    height: u32,
    color_mode: ColorMode,
    nine_patch: Option<NinePatch>,
    chunks: Vec<Chunk>,
}

impl CrunchedImage {
    /// Encoded width; the guide frame is not part of a 9-patch's output.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Encoded height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The color mode written to IHDR.
    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Patch description, for 9-patch inputs.
    pub fn nine_patch(&self) -> Option<&NinePatch> {
        self.nine_patch.as_ref()
    }

    /// All chunks in file order, `IEND` excluded.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The first chunk with the given tag.
    pub fn chunk(&self, chunk_type: chunk::ChunkType) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.chunk_type() == chunk_type)
    }

    /// Consume the result, returning its chunks.
    pub fn into_chunks(self) -> Vec<Chunk> {
        self.chunks
    }

    /// Frame the chunks as a complete PNG file.
    pub fn to_png(&self) -> Vec<u8> {
        chunk::write_png(&self.chunks)
    }

    /// Frame the chunks into a caller-provided buffer, clearing it first.
    pub fn write_png_into(&self, output: &mut Vec<u8>) {
        chunk::write_png_into(output, &self.chunks);
    }
}

/// Crunch one image.
///
/// `name` identifies the image in error messages. With `nine_patch`, the
/// image must carry a one-pixel guide frame; the frame is parsed into
/// `npTc`/`npLb` chunks and stripped from the encoded pixels.
///
/// Either every chunk is produced or an error is returned.
pub fn crunch(
    name: &str,
    image: &PixelBuffer<'_>,
    nine_patch: bool,
    options: &CrunchOptions,
) -> Result<CrunchedImage> {
    crunch_with_scratch(&mut Scratch::new(), name, image, nine_patch, options)
}

/// Crunch one image, reusing the buffers in `scratch`.
///
/// Nothing from a previous call is observable in the result.
pub fn crunch_with_scratch(
    scratch: &mut Scratch,
    name: &str,
    image: &PixelBuffer<'_>,
    nine_patch: bool,
    options: &CrunchOptions,
) -> Result<CrunchedImage> {
    options.validate()?;

    let patch = if nine_patch {
        Some(ninepatch::build(image).map_err(|e| e.into_error(name))?)
    } else {
        None
    };

    let plan = select::plan(scratch, image, nine_patch);
    let idat = compress::compress(plan.raw, options.compression_level, options.framing)?;
    debug!(
        "{}: {:?} {}x{}, {} raw bytes -> {} compressed",
        name,
        plan.color_mode,
        plan.width,
        plan.height,
        plan.raw.len(),
        idat.len()
    );

    let chunks = assemble(&plan, patch.as_ref(), idat);

    Ok(CrunchedImage {
        width: plan.width,
        height: plan.height,
        color_mode: plan.color_mode,
        nine_patch: patch,
        chunks,
    })
}

/// Crunch one image straight to PNG file bytes.
pub fn crunch_to_png(
    name: &str,
    image: &PixelBuffer<'_>,
    nine_patch: bool,
    options: &CrunchOptions,
) -> Result<Vec<u8>> {
    crunch(name, image, nine_patch, options).map(|crunched| crunched.to_png())
}

/// Build the chunk list in file order.
fn assemble(plan: &EncodingPlan<'_>, patch: Option<&NinePatch>, idat: Vec<u8>) -> Vec<Chunk> {
    let mut chunks = Vec::with_capacity(6);
    chunks.push(Chunk::new(
        IHDR,
        payload::ihdr(plan.width, plan.height, plan.color_mode),
    ));

    if let Some(patch) = patch {
        chunks.push(Chunk::new(NPTC, payload::nine_patch(&patch.geometry)));
        if let Some(bounds) = &patch.layout_bounds {
            chunks.push(Chunk::new(NPLB, payload::layout_bounds(bounds)));
        }
    }

    if plan.color_mode == ColorMode::Palette {
        chunks.push(Chunk::new(PLTE, payload::palette(&plan.palette)));
        if plan.needs_transparency_chunk() {
            chunks.push(Chunk::new(TRNS, payload::transparency(&plan.palette)));
        }
    }

    chunks.push(Chunk::new(IDAT, idat));
    chunks
}
