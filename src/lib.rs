//! # ninecrunch
//!
//! A PNG cruncher for UI resources.
//!
//! Given a decoded ARGB image, ninecrunch picks the most compact lossless
//! PNG color mode (gray, gray+alpha, palette, RGB or RGBA), deflates the
//! scanlines, and returns the chunk list of the resulting file. Images
//! flagged as 9-patches carry their stretch and padding guides in a
//! one-pixel frame; that frame is parsed into `npTc` (stretch regions,
//! padding, cell colors) and `npLb` (layout bounds) chunks and removed from
//! the encoded pixels.
//!
//! ## Features
//!
//! - Single-pass color-mode selection with a first-seen palette
//! - 9-patch guide parsing with edge/pixel/color error reporting
//! - Reusable [`png::select::Scratch`] buffers for batch work
//! - `cli`: the `ninecrunch` command-line tool
//! - `parallel`: crunch CLI inputs on a rayon pool
//!
//! ## Example
//!
//! ```rust
//! use ninecrunch::{crunch, ColorMode, CrunchOptions, PixelBuffer};
//!
//! // 3x3 image with a white guide frame: one stretch column, one stretch row.
//! let pixels = [
//!     0xFFFF_FFFF, 0xFF00_0000, 0xFFFF_FFFF,
//!     0xFF00_0000, 0xFF33_6699, 0xFFFF_FFFF,
//!     0xFFFF_FFFF, 0xFFFF_FFFF, 0xFFFF_FFFF,
//! ];
//! let image = PixelBuffer::new(&pixels, 3, 3).unwrap();
//! let crunched = crunch("button.9.png", &image, true, &CrunchOptions::default()).unwrap();
//!
//! assert_eq!(crunched.color_mode(), ColorMode::Rgba);
//! assert_eq!((crunched.width(), crunched.height()), (1, 1));
//! let png_bytes = crunched.to_png();
//! assert_eq!(&png_bytes[1..4], b"PNG");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod color;
pub mod compress;
pub mod error;
pub mod ninepatch;
pub mod pixels;
pub mod png;

pub use color::ColorMode;
pub use compress::Framing;
pub use error::{Error, PatchError, PatchErrorKind, Result};
pub use ninepatch::{is_nine_patch_name, NinePatch};
pub use pixels::PixelBuffer;
pub use png::select::Scratch;
pub use png::{crunch, crunch_to_png, crunch_with_scratch, CrunchOptions, CrunchedImage};
