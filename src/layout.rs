// this_file: src/layout.rs
//! Canvas size estimation from content and font metrics.
//!
//! The estimate assumes a monospace font: one representative character
//! width times the longest line. Proportional fonts will be mis-sized;
//! callers may override either dimension.

use crate::font::GlyphSource;
use log::debug;

/// Smallest canvas ever allocated, whatever the estimate or override
pub const MIN_CANVAS_WIDTH: u32 = 200;
pub const MIN_CANVAS_HEIGHT: u32 = 100;

/// Columns a tab counts for when sizing
pub const TAB_WIDTH: usize = 4;

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Line count and widest line of some content, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextExtent {
    pub lines: usize,
    pub max_columns: usize,
}

/// Single pass over codepoints: tabs count as [`TAB_WIDTH`], `\n` ends a line.
///
/// The last line is counted even without a trailing newline, so the
/// result always has at least one line.
pub fn measure(codepoints: &[u32]) -> TextExtent {
    let mut lines = 1;
    let mut current = 0;
    let mut max_columns = 0;

    for &cp in codepoints {
        match cp {
            0x0A => {
                max_columns = max_columns.max(current);
                current = 0;
                lines += 1;
            }
            0x09 => current += TAB_WIDTH,
            _ => current += 1,
        }
    }

    TextExtent {
        lines,
        max_columns: max_columns.max(current),
    }
}

/// Representative character width in pixels.
///
/// Space advance, then `M` advance, then `0.6 * pixel_height`, taking the
/// first that is positive.
pub fn char_width(space_advance: f32, m_advance: f32, pixel_height: f32) -> f32 {
    if space_advance > 0.0 {
        space_advance
    } else if m_advance > 0.0 {
        m_advance
    } else {
        0.6 * pixel_height
    }
}

/// Pixel distance between consecutive line tops for `font` at `scale`.
pub fn line_height<F: GlyphSource + ?Sized>(font: &F, scale: f32, line_spacing: f32) -> f32 {
    font.vertical_metrics().line_advance() * scale * line_spacing
}

/// Inputs to [`estimate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimateParams {
    pub pixel_height: f32,
    pub line_spacing: f32,
    pub padding: u32,
}

/// Estimate the canvas needed for `codepoints` set in `font`.
///
/// Each dimension is clamped to a minimum of `10 * pixel_height` wide and
/// `3 * pixel_height` tall.
pub fn estimate<F: GlyphSource + ?Sized>(
    codepoints: &[u32],
    font: &F,
    params: EstimateParams,
) -> Dimensions {
    let scale = font.scale_for_pixel_height(params.pixel_height);
    let base_line_height = font.vertical_metrics().line_advance() * scale;
    let cell = char_width(
        font.advance_width(u32::from(b' ')) * scale,
        font.advance_width(u32::from(b'M')) * scale,
        params.pixel_height,
    );

    let extent = measure(codepoints);
    let padding = 2.0 * params.padding as f32;
    let width = (extent.max_columns as f32 * cell).ceil() + padding;
    let height = (extent.lines as f32 * base_line_height * params.line_spacing).ceil() + padding;

    let width = width.max(10.0 * params.pixel_height);
    let height = height.max(3.0 * params.pixel_height);

    debug!(
        "Estimated {}x{} for {} line(s), {} column(s), cell {:.2}px",
        width, height, extent.lines, extent.max_columns, cell
    );

    Dimensions {
        width: width.ceil() as u32,
        height: height.ceil() as u32,
    }
}

/// Pick overrides where given, else the estimate, then apply the canvas floor.
pub fn resolve_dimensions(
    estimated: Dimensions,
    width_override: Option<u32>,
    height_override: Option<u32>,
) -> Dimensions {
    Dimensions {
        width: width_override
            .unwrap_or(estimated.width)
            .max(MIN_CANVAS_WIDTH),
        height: height_override
            .unwrap_or(estimated.height)
            .max(MIN_CANVAS_HEIGHT),
    }
}
