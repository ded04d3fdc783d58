//! DEFLATE compression of the selected pixel stream.
//!
//! A single whole-buffer pass through `flate2`; the same input bytes and
//! level always produce the same output.

use std::io::Write;

use flate2::write::{DeflateEncoder, ZlibEncoder};
use flate2::Compression;

use crate::error::{Error, Result};

/// Highest accepted compression level.
pub const MAX_LEVEL: u8 = 9;

/// Wrapper around the compressed stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Framing {
    /// zlib header and Adler-32 trailer, as PNG `IDAT` requires.
    #[default]
    Zlib,
    /// Bare DEFLATE blocks for writers that add their own wrapper.
    Raw,
}

/// Compress `data` at `level` (0-9).
pub fn compress(data: &[u8], level: u8, framing: Framing) -> Result<Vec<u8>> {
    if level > MAX_LEVEL {
        return Err(Error::InvalidCompressionLevel(level));
    }

    let level = Compression::new(u32::from(level));
    let capacity = data.len() / 2 + 64;

    let compressed = match framing {
        Framing::Zlib => {
            let mut encoder = ZlibEncoder::new(Vec::with_capacity(capacity), level);
            encoder.write_all(data)?;
            encoder.finish()?
        }
        Framing::Raw => {
            let mut encoder = DeflateEncoder::new(Vec::with_capacity(capacity), level);
            encoder.write_all(data)?;
            encoder.finish()?
        }
    };

    Ok(compressed)
}
