// this_file: src/render.rs
//! The render pipeline: estimate, allocate, fill, draw.
//!
//! Everything here runs once per invocation on one thread. The canvas
//! and the font are owned values released on every return path.

use crate::canvas::Canvas;
use crate::color::Theme;
use crate::document::{Decoding, Document};
use crate::draw::{self, DrawParams, DrawStats};
use crate::error::{Error, Result};
use crate::font::GlyphSource;
use crate::layout::{self, Dimensions, EstimateParams};
use crate::logging::Timer;
use log::info;

/// Default font pixel height
pub const DEFAULT_FONT_SIZE: f32 = 18.0;

/// Default multiplier on the font's natural line height
pub const DEFAULT_LINE_SPACING: f32 = 1.5;

/// Default margin between canvas edge and text
pub const DEFAULT_PADDING: u32 = 20;

/// Parameters for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Font pixel height
    pub font_size: f32,
    pub line_spacing: f32,
    /// Margin between the canvas edge and the text; the panel sits halfway
    pub padding: u32,
    /// Explicit canvas width, replacing the estimate
    pub width: Option<u32>,
    /// Explicit canvas height, replacing the estimate
    pub height: Option<u32>,
    pub decoding: Decoding,
    /// Codepoints kept per line; `None` never truncates
    pub max_line_len: Option<usize>,
    pub theme: Theme,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            line_spacing: DEFAULT_LINE_SPACING,
            padding: DEFAULT_PADDING,
            width: None,
            height: None,
            decoding: Decoding::default(),
            max_line_len: None,
            theme: Theme::default(),
        }
    }
}

impl RenderOptions {
    /// Reject non-positive sizes and spacing
    pub fn validate(&self) -> Result<()> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Font size must be positive, got {}",
                self.font_size
            )));
        }
        if !(self.line_spacing.is_finite() && self.line_spacing > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "Line spacing must be positive, got {}",
                self.line_spacing
            )));
        }
        if self.width == Some(0) || self.height == Some(0) {
            return Err(Error::InvalidParameter(
                "Image width and height must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Rectangle in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x + i64::from(self.width)
            && y < self.y + i64::from(self.height)
    }
}

/// Where the panel and the first line go on a canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub panel: Rect,
    pub text_x: i64,
    pub text_y: i64,
}

impl PanelLayout {
    /// Panel inset by `padding / 2`, text origin at `(padding, padding)`.
    pub fn new(canvas: Dimensions, padding: u32) -> Self {
        let inset = padding / 2;
        Self {
            panel: Rect {
                x: i64::from(inset),
                y: i64::from(inset),
                width: canvas.width.saturating_sub(2 * inset),
                height: canvas.height.saturating_sub(2 * inset),
            },
            text_x: i64::from(padding),
            text_y: i64::from(padding),
        }
    }
}

/// A finished render.
#[derive(Debug)]
pub struct Rendered {
    pub canvas: Canvas,
    pub layout: PanelLayout,
    pub stats: DrawStats,
}

/// Size the canvas for `document` and draw it.
pub fn render<F: GlyphSource + ?Sized>(
    font: &F,
    document: &Document,
    options: &RenderOptions,
) -> Result<Rendered> {
    options.validate()?;
    let _timer = Timer::new("render");

    let scale = font.scale_for_pixel_height(options.font_size);
    let codepoints = options.decoding.codepoints(&document.plain_text());
    let estimated = layout::estimate(
        &codepoints,
        font,
        EstimateParams {
            pixel_height: options.font_size,
            line_spacing: options.line_spacing,
            padding: options.padding,
        },
    );
    let dims = layout::resolve_dimensions(estimated, options.width, options.height);
    info!(
        "Canvas {}x{} (estimated {}x{})",
        dims.width, dims.height, estimated.width, estimated.height
    );

    let mut canvas = Canvas::new(dims.width, dims.height)?;
    let panel_layout = PanelLayout::new(dims, options.padding);
    let theme = &options.theme;

    canvas.clear(theme.background);
    let panel = panel_layout.panel;
    canvas.fill_rect(panel.x, panel.y, panel.width, panel.height, theme.panel);

    let stats = draw::draw_document(
        &mut canvas,
        font,
        document,
        theme,
        &DrawParams {
            origin_x: panel_layout.text_x,
            origin_y: panel_layout.text_y,
            scale,
            line_spacing: options.line_spacing,
            decoding: options.decoding,
            max_line_len: options.max_line_len,
        },
    );

    Ok(Rendered {
        canvas,
        layout: panel_layout,
        stats,
    })
}
