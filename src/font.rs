// this_file: src/font.rs
//! Font loading, metrics and glyph rasterization.
//!
//! [`GlyphSource`] is the narrow interface the layout and drawing code
//! consume. [`FontHandle`] implements it on top of skrifa (metrics,
//! charmap, outlines) and zeno (outline to alpha coverage).

use crate::error::{Error, Result};
use crate::logging::Timer;
use log::{debug, info};
use skrifa::instance::{LocationRef, Size};
use skrifa::outline::{DrawSettings, OutlinePen};
use skrifa::{FontRef, GlyphId, MetadataProvider};
use std::fs;
use std::path::{Path, PathBuf};
use zeno::{Command, Mask};

/// Ascent, descent and line gap in font design units.
///
/// `descent` is negative for glyphs extending below the baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMetrics {
    pub ascent: f32,
    pub descent: f32,
    pub line_gap: f32,
}

impl VerticalMetrics {
    /// Unscaled distance between consecutive baselines
    pub fn line_advance(&self) -> f32 {
        self.ascent - self.descent + self.line_gap
    }
}

/// 8-bit alpha coverage for one glyph plus its placement.
///
/// `x_offset` is the left edge relative to the pen position, `y_offset`
/// the top edge relative to the baseline with y growing downwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub width: u32,
    pub height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
    /// Row-major coverage, `width * height` bytes
    pub coverage: Vec<u8>,
}

impl GlyphBitmap {
    /// True for glyphs with nothing to draw (spaces, control codes)
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.coverage.is_empty()
    }

    /// Coverage at `(x, y)` inside the bitmap
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.coverage
            .get((y * self.width + x) as usize)
            .copied()
            .unwrap_or(0)
    }
}

/// Metric and rasterization queries against one parsed font.
pub trait GlyphSource {
    /// Design-unit to pixel multiplier for the requested pixel height
    fn scale_for_pixel_height(&self, pixel_height: f32) -> f32;

    fn vertical_metrics(&self) -> VerticalMetrics;

    /// Horizontal pen advance in design units
    fn advance_width(&self, codepoint: u32) -> f32;

    /// Coverage bitmap for `codepoint` at `scale`
    fn rasterize(&self, codepoint: u32, scale: f32) -> GlyphBitmap;
}

/// A loaded font file.
///
/// Owns the file bytes; the skrifa view is re-derived from them per query.
pub struct FontHandle {
    path: PathBuf,
    data: Vec<u8>,
    units_per_em: u16,
    metrics: VerticalMetrics,
}

impl FontHandle {
    /// Read and parse a font file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let _timer = Timer::new("font load");
        info!("Loading font: {}", path.display());
        let data = fs::read(path).map_err(|e| Error::FontLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_bytes(path, data)
    }

    /// Parse font bytes already in memory; `path` is used for messages.
    pub fn from_bytes(path: impl Into<PathBuf>, data: Vec<u8>) -> Result<Self> {
        let path = path.into();
        let fail = |reason: String| Error::FontLoad {
            path: path.clone(),
            reason,
        };

        if data.is_empty() {
            return Err(fail("Font file is empty".into()));
        }
        if !is_valid_font_signature(&data) {
            return Err(fail(
                "Invalid font file format (expected TTF/OTF/TTC; WOFF is not supported)".into(),
            ));
        }

        let font = FontRef::from_index(&data, 0)
            .map_err(|e| fail(format!("Failed to parse font: {}", e)))?;
        let raw = font.metrics(Size::unscaled(), LocationRef::default());
        let units_per_em = raw.units_per_em;
        let metrics = VerticalMetrics {
            ascent: raw.ascent,
            descent: raw.descent,
            line_gap: raw.leading,
        };
        debug!(
            "Font metrics for {}: upem={} ascent={} descent={} gap={}",
            path.display(),
            units_per_em,
            metrics.ascent,
            metrics.descent,
            metrics.line_gap
        );

        Ok(Self {
            path,
            data,
            units_per_em,
            metrics,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn font_ref(&self) -> Option<FontRef<'_>> {
        // Parsed successfully in `from_bytes`, so this only re-reads the table directory.
        FontRef::from_index(&self.data, 0).ok()
    }

    fn glyph_id(font: &FontRef<'_>, codepoint: u32) -> GlyphId {
        font.charmap().map(codepoint).unwrap_or(GlyphId::NOTDEF)
    }
}

impl GlyphSource for FontHandle {
    fn scale_for_pixel_height(&self, pixel_height: f32) -> f32 {
        let extent = self.metrics.ascent - self.metrics.descent;
        if extent > 0.0 {
            pixel_height / extent
        } else {
            pixel_height / f32::from(self.units_per_em.max(1))
        }
    }

    fn vertical_metrics(&self) -> VerticalMetrics {
        self.metrics
    }

    fn advance_width(&self, codepoint: u32) -> f32 {
        let Some(font) = self.font_ref() else {
            return 0.0;
        };
        let glyph_id = Self::glyph_id(&font, codepoint);
        font.glyph_metrics(Size::unscaled(), LocationRef::default())
            .advance_width(glyph_id)
            .unwrap_or(0.0)
    }

    fn rasterize(&self, codepoint: u32, scale: f32) -> GlyphBitmap {
        let Some(font) = self.font_ref() else {
            return GlyphBitmap::default();
        };
        let glyph_id = Self::glyph_id(&font, codepoint);
        let outlines = font.outline_glyphs();
        let Some(glyph) = outlines.get(glyph_id) else {
            debug!("No outline for codepoint {:#x}", codepoint);
            return GlyphBitmap::default();
        };

        let ppem = scale * f32::from(self.units_per_em);
        let mut commands = Vec::new();
        let settings = DrawSettings::unhinted(Size::new(ppem), LocationRef::default());
        if let Err(e) = glyph.draw(settings, &mut ZenoPen::new(&mut commands)) {
            debug!("Failed to draw outline for {:#x}: {:?}", codepoint, e);
            return GlyphBitmap::default();
        }
        if commands.is_empty() {
            return GlyphBitmap::default();
        }

        let (coverage, placement) = Mask::new(&commands).render();
        if placement.width == 0 || placement.height == 0 {
            return GlyphBitmap::default();
        }

        GlyphBitmap {
            width: placement.width,
            height: placement.height,
            x_offset: placement.left,
            y_offset: placement.top,
            coverage,
        }
    }
}

/// Check if data has a known font signature
pub fn is_valid_font_signature(data: &[u8]) -> bool {
    if data.len() < 4 {
        return false;
    }

    matches!(
        &data[0..4],
        // TrueType
        b"\x00\x01\x00\x00" |
        // OpenType
        b"OTTO" |
        // TrueType Collection
        b"ttcf" |
        // Apple TrueType
        b"true"
    )
}

/// Adapter from skrifa's OutlinePen to zeno commands, flipping y so the
/// path is in raster (y-down) coordinates.
struct ZenoPen<'a> {
    commands: &'a mut Vec<Command>,
}

impl<'a> ZenoPen<'a> {
    fn new(commands: &'a mut Vec<Command>) -> Self {
        Self { commands }
    }
}

impl OutlinePen for ZenoPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.commands.push(Command::MoveTo([x, -y].into()));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.commands.push(Command::LineTo([x, -y].into()));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.commands
            .push(Command::QuadTo([cx0, -cy0].into(), [x, -y].into()));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.commands.push(Command::CurveTo(
            [cx0, -cy0].into(),
            [cx1, -cy1].into(),
            [x, -y].into(),
        ));
    }

    fn close(&mut self) {
        self.commands.push(Command::Close);
    }
}
