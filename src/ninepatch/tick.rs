//! Guide-border tick scanning.
//!
//! A 9-patch carries its metadata in a one-pixel frame. Each frame pixel is
//! either "no tick", a black stretch tick, or a red layout-bounds tick; the
//! frame itself is either fully transparent or opaque white, which decides
//! how every other pixel is judged.

use crate::color::{alpha, BLACK, LAYOUT_BOUNDS_RED, WHITE};
use crate::error::{PatchError, PatchErrorKind};
use crate::pixels::Line;

/// Classification of a single frame pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickType {
    /// Background frame pixel.
    None,
    /// Marks a stretch region (or padding).
    Stretch,
    /// Marks a layout-bounds inset.
    LayoutBounds,
}

/// Region scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Start,
    InsideRegion,
    OutsideRegion,
}

/// Classify one frame pixel.
///
/// `transparent_frame` is true when the frame's corner is fully transparent
/// and false when it is opaque white.
pub fn classify(argb: u32, transparent_frame: bool) -> Result<TickType, PatchError> {
    let a = alpha(argb);

    if transparent_frame {
        if a == 0 {
            return Ok(TickType::None);
        }
        if argb == LAYOUT_BOUNDS_RED {
            return Ok(TickType::LayoutBounds);
        }
        if argb == BLACK {
            return Ok(TickType::Stretch);
        }
        if a != 0xFF {
            return Err(PatchError::with_color(
                PatchErrorKind::IntermediateAlpha,
                argb,
            ));
        }
        return Err(PatchError::with_color(
            PatchErrorKind::TransparentFrameTickColor,
            argb,
        ));
    }

    if a != 0xFF {
        return Err(PatchError::with_color(PatchErrorKind::WhiteFrameAlpha, argb));
    }
    match argb {
        WHITE => Ok(TickType::None),
        BLACK => Ok(TickType::Stretch),
        LAYOUT_BOUNDS_RED => Ok(TickType::LayoutBounds),
        other if other & 0x00FF_FFFF != 0 => Err(PatchError::with_color(
            PatchErrorKind::WhiteFrameTickColor,
            argb,
        )),
        _ => Ok(TickType::Stretch),
    }
}

/// Find the stretch regions marked along one edge.
///
/// Positions `1..len-1` are scanned (the corners belong to the frame).
/// Returns the region boundaries flattened as `[start, end, start, end, ...]`
/// in content coordinates, `end` exclusive. A region still open at the end
/// of the line closes at the content length.
///
/// With `required`, an edge without any region is an error. Without
/// `multiple_allowed`, a second region is an error.
pub fn scan_stretch_regions(
    line: Line<'_>,
    transparent_frame: bool,
    required: bool,
    multiple_allowed: bool,
) -> Result<Vec<i32>, PatchError> {
    let content_len = line.len().saturating_sub(2) as i32;
    let mut divs = Vec::new();
    let mut state = ScanState::Start;

    for i in 1..line.len().saturating_sub(1) {
        let tick = classify(line.at(i), transparent_frame).map_err(|e| e.at(i as u32))?;
        let pos = i as i32 - 1;

        state = match (state, tick) {
            (ScanState::Start, TickType::Stretch) => {
                divs.extend_from_slice(&[pos, content_len]);
                ScanState::InsideRegion
            }
            (ScanState::OutsideRegion, TickType::Stretch) if multiple_allowed => {
                divs.extend_from_slice(&[pos, content_len]);
                ScanState::InsideRegion
            }
            (ScanState::OutsideRegion, TickType::Stretch) => {
                return Err(PatchError::new(PatchErrorKind::MultipleRegions).at(i as u32));
            }
            (ScanState::InsideRegion, TickType::Stretch) => ScanState::InsideRegion,
            (ScanState::InsideRegion, _) => {
                if let Some(end) = divs.last_mut() {
                    *end = pos;
                }
                ScanState::OutsideRegion
            }
            (other, _) => other,
        };
    }

    if required && divs.is_empty() {
        return Err(PatchError::new(PatchErrorKind::NoRegion));
    }

    Ok(divs)
}

/// Count the layout-bounds ticks at each end of an edge.
///
/// Returns `(leading, trailing)`: the number of consecutive red ticks
/// starting right after the leading corner, and right before the trailing
/// one. Each count stops at the first other pixel or at the midpoint of the
/// line, so the two never overlap. No ticks is `0`, not an error.
pub fn scan_layout_bounds(
    line: Line<'_>,
    transparent_frame: bool,
) -> Result<(i32, i32), PatchError> {
    let interior = line.len().saturating_sub(2);
    let leading_limit = interior - interior / 2;
    let trailing_limit = interior / 2;

    let is_bound = |i: usize| -> Result<bool, PatchError> {
        classify(line.at(i), transparent_frame)
            .map(|tick| tick == TickType::LayoutBounds)
            .map_err(|e| e.at(i as u32))
    };

    let mut leading = 0;
    while leading < leading_limit && is_bound(1 + leading)? {
        leading += 1;
    }

    let mut trailing = 0;
    while trailing < trailing_limit && is_bound(line.len() - 2 - trailing)? {
        trailing += 1;
    }

    Ok((leading as i32, trailing as i32))
}
