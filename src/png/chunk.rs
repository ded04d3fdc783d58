//! PNG chunk handling.

use flate2::Crc;

/// A four-byte chunk type tag.
pub type ChunkType = [u8; 4];

/// Image header.
pub const IHDR: ChunkType = *b"IHDR";
/// Palette entries.
pub const PLTE: ChunkType = *b"PLTE";
/// Palette alpha entries.
pub const TRNS: ChunkType = *b"tRNS";
/// Compressed image data.
pub const IDAT: ChunkType = *b"IDAT";
/// End of stream.
pub const IEND: ChunkType = *b"IEND";
/// 9-patch stretch geometry.
pub const NPTC: ChunkType = *b"npTc";
/// 9-patch layout bounds.
pub const NPLB: ChunkType = *b"npLb";

/// PNG file signature (magic bytes).
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// One encoded chunk: its tag and unframed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    chunk_type: ChunkType,
    data: Vec<u8>,
}

impl Chunk {
    /// Create a chunk from a tag and payload.
    pub fn new(chunk_type: ChunkType, data: Vec<u8>) -> Self {
        Self { chunk_type, data }
    }

    /// The chunk's type tag.
    #[inline]
    pub fn chunk_type(&self) -> ChunkType {
        self.chunk_type
    }

    /// The tag as text, for logging.
    pub fn name(&self) -> &str {
        std::str::from_utf8(&self.chunk_type).unwrap_or("????")
    }

    /// The payload, without length or CRC.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the chunk, returning its payload.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Write a PNG chunk (length, type, data, CRC32) to the output buffer.
pub fn write_chunk(output: &mut Vec<u8>, chunk_type: &ChunkType, data: &[u8]) {
    output.reserve(12 + data.len());

    let mut crc = Crc::new();
    crc.update(chunk_type);
    crc.update(data);
    let crc = crc.sum();

    output.extend_from_slice(&(data.len() as u32).to_be_bytes());
    output.extend_from_slice(chunk_type);
    output.extend_from_slice(data);
    output.extend_from_slice(&crc.to_be_bytes());
}

/// Write a complete PNG file into `output`: signature, every chunk in
/// order, then `IEND`.
///
/// The `output` buffer is cleared first so callers can reuse an allocation.
pub fn write_png_into(output: &mut Vec<u8>, chunks: &[Chunk]) {
    output.clear();
    let payload: usize = chunks.iter().map(|c| c.data.len() + 12).sum();
    output.reserve(PNG_SIGNATURE.len() + payload + 12);

    output.extend_from_slice(&PNG_SIGNATURE);
    for chunk in chunks {
        write_chunk(output, &chunk.chunk_type, &chunk.data);
    }
    write_chunk(output, &IEND, &[]);
}

/// Write a complete PNG file: signature, every chunk in order, then `IEND`.
pub fn write_png(chunks: &[Chunk]) -> Vec<u8> {
    let mut output = Vec::new();
    write_png_into(&mut output, chunks);
    output
}
