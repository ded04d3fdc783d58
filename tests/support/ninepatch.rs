//! 9-patch fixture generation.
//!
//! Builds full-size images (guide frame included) from a frame color, an
//! interior fill, and tick positions given in image coordinates.

#![allow(dead_code)]

use std::ops::Range;

use ninecrunch::PixelBuffer;
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const CLEAR: u32 = 0x0000_0000;
pub const WHITE: u32 = 0xFFFF_FFFF;
pub const BLACK: u32 = 0xFF00_0000;
pub const RED: u32 = 0xFFFF_0000;

/// A full-size ARGB image with a one-pixel guide frame.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u32>,
}

impl Fixture {
    /// Frame pixels set to `frame`, interior set to `fill`.
    pub fn new(width: u32, height: u32, frame: u32, fill: u32) -> Self {
        let mut fixture = Self {
            width,
            height,
            pixels: vec![fill; (width * height) as usize],
        };
        for x in 0..width {
            fixture.set(x, 0, frame);
            fixture.set(x, height - 1, frame);
        }
        for y in 0..height {
            fixture.set(0, y, frame);
            fixture.set(width - 1, y, frame);
        }
        fixture
    }

    /// Interior filled with random ARGB colors from a seeded generator.
    pub fn random(width: u32, height: u32, frame: u32, seed: u64) -> Self {
        let mut fixture = Self::new(width, height, frame, CLEAR);
        let mut rng = StdRng::seed_from_u64(seed);
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                fixture.set(x, y, rng.gen());
            }
        }
        fixture
    }

    pub fn set(&mut self, x: u32, y: u32, argb: u32) -> &mut Self {
        self.pixels[(y * self.width + x) as usize] = argb;
        self
    }

    /// Stretch ticks on the top edge.
    pub fn top(&mut self, xs: Range<u32>) -> &mut Self {
        for x in xs {
            self.set(x, 0, BLACK);
        }
        self
    }

    /// Stretch ticks on the left edge.
    pub fn left(&mut self, ys: Range<u32>) -> &mut Self {
        for y in ys {
            self.set(0, y, BLACK);
        }
        self
    }

    /// Ticks of `color` on the bottom edge.
    pub fn bottom(&mut self, xs: Range<u32>, color: u32) -> &mut Self {
        let y = self.height - 1;
        for x in xs {
            self.set(x, y, color);
        }
        self
    }

    /// Ticks of `color` on the right edge.
    pub fn right(&mut self, ys: Range<u32>, color: u32) -> &mut Self {
        let x = self.width - 1;
        for y in ys {
            self.set(x, y, color);
        }
        self
    }

    pub fn buffer(&self) -> PixelBuffer<'_> {
        PixelBuffer::new(&self.pixels, self.width, self.height).expect("valid fixture")
    }

    /// The interior as interleaved RGBA8, the way a decoder returns it.
    pub fn interior_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                out.extend_from_slice(&to_rgba8(self.pixels[(y * self.width + x) as usize]));
            }
        }
        out
    }
}

pub fn to_rgba8(argb: u32) -> [u8; 4] {
    let [a, r, g, b] = argb.to_be_bytes();
    [r, g, b, a]
}

/// Interleaved RGBA8 for a whole pixel slice.
pub fn rgba8(pixels: &[u32]) -> Vec<u8> {
    pixels.iter().flat_map(|&p| to_rgba8(p)).collect()
}

/// Split a PNG file into `(tag, payload)` pairs, checking every CRC.
pub fn read_chunks(png: &[u8]) -> Vec<([u8; 4], Vec<u8>)> {
    assert_eq!(&png[..8], &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);

    let mut chunks = Vec::new();
    let mut pos = 8;
    while pos < png.len() {
        let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
        let tag: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
        let data = png[pos + 8..pos + 8 + len].to_vec();
        let stored = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());

        let mut crc = flate2::Crc::new();
        crc.update(&png[pos + 4..pos + 8 + len]);
        assert_eq!(crc.sum(), stored, "bad CRC on {:?}", String::from_utf8_lossy(&tag));

        chunks.push((tag, data));
        pos += 12 + len;
    }
    chunks
}

/// Tags of a PNG file's chunks, in order.
pub fn chunk_tags(png: &[u8]) -> Vec<String> {
    read_chunks(png)
        .iter()
        .map(|(tag, _)| String::from_utf8_lossy(tag).into_owned())
        .collect()
}

/// Big-endian i32 at `offset`.
pub fn be_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes(data[offset..offset + 4].try_into().unwrap())
}

/// Little-endian i32 at `offset`.
pub fn le_i32(data: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(data[offset..offset + 4].try_into().unwrap())
}
