//! 9-patch geometry extraction.
//!
//! Scans the four one-pixel guide edges of a full-size image and derives:
//!
//! - the stretch regions along X (top edge) and Y (left edge),
//! - the content padding (bottom and right edges, falling back to the
//!   stretch regions when unmarked),
//! - optional layout bounds (red ticks on the bottom and right edges),
//! - one representative color per cell of the resulting grid.
//!
//! All coordinates are in content space, i.e. with the frame stripped.

pub mod tick;

use std::fmt;

use log::{debug, trace};

use crate::color::{alpha, WHITE};
use crate::error::{PatchError, PatchErrorKind};
use crate::pixels::PixelBuffer;

use self::tick::{scan_layout_bounds, scan_stretch_regions};

/// Largest number of grid cells the patch chunk can describe.
pub const MAX_CELLS: usize = 0x7F;

/// One side of the guide frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top row: horizontal stretch regions.
    Top,
    /// Left column: vertical stretch regions.
    Left,
    /// Bottom row: horizontal padding and layout bounds.
    Bottom,
    /// Right column: vertical padding and layout bounds.
    Right,
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Edge::Top => "top",
            Edge::Left => "left",
            Edge::Bottom => "bottom",
            Edge::Right => "right",
        })
    }
}

/// Representative color of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellColor {
    /// Every pixel in the cell is fully transparent (or the cell is empty).
    Transparent,
    /// The cell has no single color.
    Mixed,
    /// Every pixel in the cell is this ARGB color.
    Solid(u32),
}

impl CellColor {
    /// Wire value of the "transparent" sentinel.
    pub const TRANSPARENT: u32 = 0x0000_0000;
    /// Wire value of the "no single color" sentinel.
    pub const NO_COLOR: u32 = 0x0000_0001;

    /// The 32-bit value stored in the patch chunk.
    pub const fn to_wire(self) -> u32 {
        match self {
            CellColor::Transparent => Self::TRANSPARENT,
            CellColor::Mixed => Self::NO_COLOR,
            CellColor::Solid(argb) => argb,
        }
    }
}

/// Content padding in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Padding {
    /// Left inset.
    pub left: i32,
    /// Right inset.
    pub right: i32,
    /// Top inset.
    pub top: i32,
    /// Bottom inset.
    pub bottom: i32,
}

/// Layout-bounds insets marked with red ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutBounds {
    /// Left inset.
    pub left: i32,
    /// Top inset.
    pub top: i32,
    /// Right inset.
    pub right: i32,
    /// Bottom inset.
    pub bottom: i32,
}

impl LayoutBounds {
    /// True when no edge carries a layout-bounds tick.
    pub fn is_empty(&self) -> bool {
        self.left == 0 && self.top == 0 && self.right == 0 && self.bottom == 0
    }
}

/// Stretch regions, padding and cell colors of a 9-patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchGeometry {
    /// Horizontal region boundaries, `[start, end, ...]`.
    pub x_divs: Vec<i32>,
    /// Vertical region boundaries, `[start, end, ...]`.
    pub y_divs: Vec<i32>,
    /// Content padding.
    pub padding: Padding,
    /// One color per grid cell, row-major.
    pub colors: Vec<CellColor>,
    /// Number of grid columns.
    pub cols: usize,
    /// Number of grid rows.
    pub rows: usize,
}

/// Everything recovered from a 9-patch frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NinePatch {
    /// Stretch geometry.
    pub geometry: PatchGeometry,
    /// Layout bounds, if any red ticks were present.
    pub layout_bounds: Option<LayoutBounds>,
}

/// True if `name` follows the `.9.png` naming convention for 9-patches.
///
/// The suffix is matched case-sensitively: `icon.9.PNG` is a plain image.
pub fn is_nine_patch_name(name: &str) -> bool {
    name.ends_with(".9.png")
}

/// Scan the guide frame of `image` and build its patch description.
///
/// The image must include its one-pixel frame and be at least 3x3.
pub fn build(image: &PixelBuffer<'_>) -> Result<NinePatch, PatchError> {
    let width = image.width();
    let height = image.height();
    if width < 3 || height < 3 {
        return Err(PatchError::new(PatchErrorKind::TooSmall));
    }

    let corner = image.get(0, 0);
    let transparent = alpha(corner) == 0;
    if !transparent && corner != WHITE {
        return Err(PatchError::with_color(
            PatchErrorKind::InvalidFrameCorner,
            corner,
        ));
    }

    let top = image.row(0);
    let left = image.column(0);
    let bottom = image.row(height - 1);
    let right = image.column(width - 1);

    let x_divs =
        scan_stretch_regions(top, transparent, true, true).map_err(|e| e.on(Edge::Top))?;
    let y_divs =
        scan_stretch_regions(left, transparent, true, true).map_err(|e| e.on(Edge::Left))?;
    let h_padding = scan_stretch_regions(bottom, transparent, false, false)
        .map_err(|e| e.on(Edge::Bottom))?;
    let v_padding = scan_stretch_regions(right, transparent, false, false)
        .map_err(|e| e.on(Edge::Right))?;
    trace!(
        "frame scan: x_divs={:?} y_divs={:?} h_padding={:?} v_padding={:?}",
        x_divs,
        y_divs,
        h_padding,
        v_padding
    );

    let (bounds_left, bounds_right) =
        scan_layout_bounds(bottom, transparent).map_err(|e| e.on(Edge::Bottom))?;
    let (bounds_top, bounds_bottom) =
        scan_layout_bounds(right, transparent).map_err(|e| e.on(Edge::Right))?;
    let layout_bounds = LayoutBounds {
        left: bounds_left,
        top: bounds_top,
        right: bounds_right,
        bottom: bounds_bottom,
    };
    let layout_bounds = (!layout_bounds.is_empty()).then_some(layout_bounds);

    // Strip the frame.
    let width = width as i32 - 2;
    let height = height as i32 - 2;

    let (pad_left, pad_right) = resolve_padding(&h_padding, &x_divs, width);
    let (pad_top, pad_bottom) = resolve_padding(&v_padding, &y_divs, height);
    let padding = Padding {
        left: pad_left,
        right: pad_right,
        top: pad_top,
        bottom: pad_bottom,
    };

    let cols = grid_count(&x_divs, width);
    let rows = grid_count(&y_divs, height);
    if rows * cols > MAX_CELLS {
        return Err(PatchError::new(PatchErrorKind::TooManyCells));
    }

    let colors = sample_cells(image, &x_divs, &y_divs, width, height, rows * cols);
    debug!(
        "9-patch {}x{}: {} cols x {} rows, padding {:?}, layout bounds {:?}",
        width, height, cols, rows, padding, layout_bounds
    );

    Ok(NinePatch {
        geometry: PatchGeometry {
            x_divs,
            y_divs,
            padding,
            colors,
            cols,
            rows,
        },
        layout_bounds,
    })
}

/// Turn a padding scan into `(leading, trailing)` insets.
///
/// An unmarked edge inherits the insets of the first stretch region.
fn resolve_padding(marked: &[i32], divs: &[i32], extent: i32) -> (i32, i32) {
    match (marked, divs) {
        ([start, end, ..], _) => (*start, extent - end),
        ([], [start, end, ..]) => (*start, extent - end),
        _ => (0, 0),
    }
}

/// Number of grid rows/columns produced by a set of region boundaries.
///
/// A region starting at 0 or ending at `extent` merges into the adjoining
/// fixed edge instead of adding a row/column.
pub fn grid_count(divs: &[i32], extent: i32) -> usize {
    let mut count = divs.len() + 1;
    if divs.first() == Some(&0) {
        count -= 1;
    }
    if divs.last() == Some(&extent) {
        count -= 1;
    }
    count
}

/// Sample one color per grid cell, rows outer, columns inner.
fn sample_cells(
    image: &PixelBuffer<'_>,
    x_divs: &[i32],
    y_divs: &[i32],
    width: i32,
    height: i32,
    cells: usize,
) -> Vec<CellColor> {
    let mut colors = Vec::with_capacity(cells);

    let mut top = 0;
    let mut j = usize::from(y_divs.first() == Some(&0));
    while j <= y_divs.len() && top < height {
        let bottom = y_divs.get(j).copied().unwrap_or(height);

        let mut left = 0;
        let mut i = usize::from(x_divs.first() == Some(&0));
        while i <= x_divs.len() && left < width {
            let right = x_divs.get(i).copied().unwrap_or(width);
            colors.push(cell_color(image, left, top, right - 1, bottom - 1));
            left = right;
            i += 1;
        }

        top = bottom;
        j += 1;
    }

    colors.resize(cells, CellColor::Transparent);
    colors
}

/// Representative color of the inclusive content rectangle
/// `left..=right` x `top..=bottom`.
fn cell_color(image: &PixelBuffer<'_>, left: i32, top: i32, right: i32, bottom: i32) -> CellColor {
    if left > right || top > bottom {
        return CellColor::Transparent;
    }

    // Content coordinates are offset by the frame.
    let pixel = |x: i32, y: i32| image.get(x as u32 + 1, y as u32 + 1);

    let first = pixel(left, top);
    let transparent = alpha(first) == 0;
    for y in top..=bottom {
        for x in left..=right {
            let c = pixel(x, y);
            let matches = if transparent { alpha(c) == 0 } else { c == first };
            if !matches {
                return CellColor::Mixed;
            }
        }
    }

    if transparent {
        CellColor::Transparent
    } else {
        CellColor::Solid(first)
    }
}
