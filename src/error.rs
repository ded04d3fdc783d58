//! Error types for the ninecrunch library.

use std::fmt;

use thiserror::Error;

use crate::ninepatch::Edge;

/// Result type alias for ninecrunch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while crunching an image.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid image dimensions (zero width or height).
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
    },
    /// Pixel buffer length doesn't match `width * height`.
    #[error("Invalid pixel data length: expected {expected} pixels, got {actual}")]
    InvalidDataLength {
        /// Expected number of pixels.
        expected: usize,
        /// Actual number of pixels provided.
        actual: usize,
    },
    /// Compression level outside 0-9.
    #[error("Invalid compression level {0}: must be 0-9")]
    InvalidCompressionLevel(u8),
    /// Image dimensions exceed maximum supported size.
    #[error("Image {width}x{height} exceeds maximum dimension {max}")]
    ImageTooLarge {
        /// Image width.
        width: u32,
        /// Image height.
        height: u32,
        /// Maximum supported dimension.
        max: u32,
    },
    /// The 9-patch guide border is malformed.
    #[error("{image}: {error}")]
    NinePatch {
        /// Caller-supplied identity of the image, usually its path.
        image: String,
        /// What went wrong and where.
        error: PatchError,
    },
    /// The deflate stream could not be produced.
    #[error("Compression error: {0}")]
    Compression(#[from] std::io::Error),
}

/// The kinds of malformed 9-patch input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchErrorKind {
    /// A frame pixel in a transparent frame has a partial alpha.
    IntermediateAlpha,
    /// An opaque pixel in a transparent frame is neither black nor red.
    TransparentFrameTickColor,
    /// A pixel in a white frame is not fully opaque.
    WhiteFrameAlpha,
    /// An opaque pixel in a white frame is neither white, black nor red.
    WhiteFrameTickColor,
    /// A second stretch region on an edge that allows only one.
    MultipleRegions,
    /// A required edge has no stretch region.
    NoRegion,
    /// The top-left corner is neither transparent nor opaque white.
    InvalidFrameCorner,
    /// The image is smaller than 3x3.
    TooSmall,
    /// `rows * cols` exceeds 127.
    TooManyCells,
}

impl PatchErrorKind {
    /// Human-readable description.
    pub const fn message(self) -> &'static str {
        match self {
            PatchErrorKind::IntermediateAlpha => {
                "frame pixels must be either solid or transparent (not intermediate alphas)"
            }
            PatchErrorKind::TransparentFrameTickColor => {
                "ticks in transparent frame must be black or red"
            }
            PatchErrorKind::WhiteFrameAlpha => "white frame must be a solid color (no alpha)",
            PatchErrorKind::WhiteFrameTickColor => "ticks must be black or red",
            PatchErrorKind::MultipleRegions => "can't have more than one marked region along edge",
            PatchErrorKind::NoRegion => "no marked region found along edge",
            PatchErrorKind::InvalidFrameCorner => {
                "must have one-pixel frame that is either transparent or white"
            }
            PatchErrorKind::TooSmall => "image must be at least 3x3 (1x1 without frame) pixels",
            PatchErrorKind::TooManyCells => "too many rows and columns in 9-patch perimeter",
        }
    }
}

/// A malformed guide border, located as precisely as the scan allows.
///
/// Produced by the tick scanner (pixel offset and color), tagged with the
/// edge by the geometry builder, and wrapped with the image identity by
/// [`crate::png::crunch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchError {
    /// What went wrong.
    pub kind: PatchErrorKind,
    /// Border edge being scanned, if the failure belongs to one.
    pub edge: Option<Edge>,
    /// Pixel offset along the edge, if known.
    pub offset: Option<u32>,
    /// Offending ARGB color, if known.
    pub color: Option<u32>,
}

impl PatchError {
    /// An error with no positional information.
    pub const fn new(kind: PatchErrorKind) -> Self {
        Self {
            kind,
            edge: None,
            offset: None,
            color: None,
        }
    }

    /// An error caused by a specific pixel color.
    pub const fn with_color(kind: PatchErrorKind, color: u32) -> Self {
        Self {
            kind,
            edge: None,
            offset: None,
            color: Some(color),
        }
    }

    /// Attach the pixel offset, keeping any offset already recorded.
    pub fn at(mut self, offset: u32) -> Self {
        self.offset.get_or_insert(offset);
        self
    }

    /// Attach the edge being scanned.
    pub fn on(mut self, edge: Edge) -> Self {
        self.edge = Some(edge);
        self
    }

    /// Wrap into a crate [`Error`] naming the offending image.
    pub fn into_error(self, image: impl Into<String>) -> Error {
        Error::NinePatch {
            image: image.into(),
            error: self,
        }
    }
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(edge) = self.edge {
            write!(f, "{} edge, ", edge)?;
        }
        if let Some(offset) = self.offset {
            write!(f, "pixel {}, ", offset)?;
        }
        if let Some(color) = self.color {
            write!(f, "color 0x{:08X}, ", color)?;
        }
        f.write_str(self.kind.message())
    }
}

impl std::error::Error for PatchError {}
