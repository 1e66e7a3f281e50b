// this_file: src/draw.rs
//! Text drawing onto a [`Canvas`].
//!
//! Runs are drawn glyph by glyph from a top-left origin. [`draw_run`]
//! returns the pen position after the last glyph so differently colored
//! runs can be chained along one line.

use crate::canvas::Canvas;
use crate::color::{Rgb, Theme};
use crate::document::{truncate_line, Decoding, Document};
use crate::font::{GlyphBitmap, GlyphSource};
use crate::layout;
use log::{debug, warn};

/// One colored span positioned by its top-left corner (not its baseline).
#[derive(Debug, Clone, Copy)]
pub struct TextRun<'a> {
    pub text: &'a [u32],
    pub x: i64,
    pub y: i64,
    pub color: Rgb,
}

/// Blend a glyph's coverage at `(x, y)` (bitmap top-left).
pub fn draw_glyph(canvas: &mut Canvas, bitmap: &GlyphBitmap, x: i64, y: i64, color: Rgb) {
    for gy in 0..bitmap.height {
        for gx in 0..bitmap.width {
            let alpha = bitmap.alpha(gx, gy);
            if alpha == 0 {
                continue;
            }
            canvas.blend_pixel(
                x + i64::from(gx),
                y + i64::from(gy),
                color,
                f32::from(alpha) / 255.0,
            );
        }
    }
}

/// Draw `run` and return the pen x after its last glyph.
///
/// Advances are truncated to whole pixels per glyph.
pub fn draw_run<F: GlyphSource + ?Sized>(
    canvas: &mut Canvas,
    font: &F,
    run: &TextRun<'_>,
    scale: f32,
) -> i64 {
    let baseline = (font.vertical_metrics().ascent * scale) as i64;
    let mut cursor = run.x;

    for &codepoint in run.text {
        let bitmap = font.rasterize(codepoint, scale);
        if !bitmap.is_empty() {
            let draw_x = cursor + i64::from(bitmap.x_offset);
            let draw_y = run.y + baseline + i64::from(bitmap.y_offset);
            draw_glyph(canvas, &bitmap, draw_x, draw_y, run.color);
        }
        cursor += (font.advance_width(codepoint) * scale) as i64;
    }

    cursor
}

/// Settings shared by every line of a document.
#[derive(Debug, Clone, Copy)]
pub struct DrawParams {
    /// Top-left of the first line
    pub origin_x: i64,
    pub origin_y: i64,
    pub scale: f32,
    pub line_spacing: f32,
    pub decoding: Decoding,
    /// Codepoints kept per line; `None` keeps everything
    pub max_line_len: Option<usize>,
}

/// What [`draw_document`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub lines: usize,
    pub truncated_lines: usize,
}

/// Draw every line of `document`, each at
/// `origin_y + index * line_height`, spans chained left to right.
pub fn draw_document<F: GlyphSource + ?Sized>(
    canvas: &mut Canvas,
    font: &F,
    document: &Document,
    theme: &Theme,
    params: &DrawParams,
) -> DrawStats {
    let line_height = layout::line_height(font, params.scale, params.line_spacing);
    let mut stats = DrawStats::default();

    for (index, line) in document.lines.iter().enumerate() {
        let y = params.origin_y + (index as f32 * line_height) as i64;
        let mut cursor = params.origin_x + i64::from(line.indent);
        let mut remaining = params.max_line_len;
        let mut truncated = false;

        for span in &line.spans {
            let mut text = params.decoding.codepoints(&span.text);
            if truncate_line(&mut text, remaining) {
                truncated = true;
            }
            if let Some(left) = remaining.as_mut() {
                *left -= text.len();
            }

            let run = TextRun {
                text: &text,
                x: cursor,
                y,
                color: theme.color(span.style),
            };
            cursor = draw_run(canvas, font, &run, params.scale);
        }

        if truncated {
            warn!(
                "Line {} longer than {} characters; truncated",
                index + 1,
                params.max_line_len.unwrap_or_default()
            );
            stats.truncated_lines += 1;
        }
        stats.lines += 1;
    }

    debug!("Drew {} line(s) at {:.2}px line height", stats.lines, line_height);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Style;
    use crate::document::{Span, StyledLine};
    use crate::font::VerticalMetrics;

    /// Every glyph is a solid 6x10 block sitting on the baseline with a
    /// 10-unit advance at scale 1; space draws nothing.
    struct BlockFont;

    impl GlyphSource for BlockFont {
        fn scale_for_pixel_height(&self, pixel_height: f32) -> f32 {
            pixel_height / 16.0
        }

        fn vertical_metrics(&self) -> VerticalMetrics {
            VerticalMetrics {
                ascent: 12.0,
                descent: -4.0,
                line_gap: 0.0,
            }
        }

        fn advance_width(&self, _codepoint: u32) -> f32 {
            10.0
        }

        fn rasterize(&self, codepoint: u32, _scale: f32) -> GlyphBitmap {
            if codepoint == u32::from(b' ') {
                return GlyphBitmap::default();
            }
            GlyphBitmap {
                width: 6,
                height: 10,
                x_offset: 1,
                y_offset: -10,
                coverage: vec![255; 60],
            }
        }
    }

    const INK: Rgb = Rgb::new(200, 10, 10);

    fn cps(s: &str) -> Vec<u32> {
        s.bytes().map(u32::from).collect()
    }

    fn inked_columns(canvas: &Canvas) -> Vec<i64> {
        let mut cols = Vec::new();
        for x in 0..i64::from(canvas.width()) {
            if (0..i64::from(canvas.height())).any(|y| canvas.pixel(x, y) != Some(Rgb::BLACK)) {
                cols.push(x);
            }
        }
        cols
    }

    #[test]
    fn test_run_advances_by_whole_glyph_widths() {
        let mut canvas = Canvas::new(100, 30).unwrap();
        let text = cps("abcd");
        let run = TextRun {
            text: &text,
            x: 5,
            y: 0,
            color: INK,
        };
        assert_eq!(draw_run(&mut canvas, &BlockFont, &run, 1.0), 45);

        // Truncation: 10 * 0.75 = 7.5 -> 7 per glyph
        let mut canvas = Canvas::new(100, 30).unwrap();
        assert_eq!(draw_run(&mut canvas, &BlockFont, &run, 0.75), 5 + 4 * 7);
    }

    #[test]
    fn test_glyphs_land_above_baseline() {
        let mut canvas = Canvas::new(40, 30).unwrap();
        let text = cps("a");
        let run = TextRun {
            text: &text,
            x: 0,
            y: 5,
            color: INK,
        };
        draw_run(&mut canvas, &BlockFont, &run, 1.0);
        // baseline at 5 + 12; block spans rows 7..17, columns 1..7
        assert_eq!(canvas.pixel(1, 7), Some(INK));
        assert_eq!(canvas.pixel(6, 16), Some(INK));
        assert_eq!(canvas.pixel(0, 7), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(1, 6), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(1, 17), Some(Rgb::BLACK));
    }

    #[test]
    fn test_chained_runs_do_not_overlap() {
        let mut canvas = Canvas::new(200, 30).unwrap();
        let first = cps("int ");
        let second = cps("main");
        let run_a = TextRun {
            text: &first,
            x: 0,
            y: 0,
            color: INK,
        };
        let end_a = draw_run(&mut canvas, &BlockFont, &run_a, 1.0);
        let a_cols = inked_columns(&canvas);

        let run_b = TextRun {
            text: &second,
            x: end_a,
            y: 0,
            color: Rgb::new(10, 200, 10),
        };
        let end_b = draw_run(&mut canvas, &BlockFont, &run_b, 1.0);
        assert_eq!(end_a, 40);
        assert_eq!(end_b, 80);

        let a_right = *a_cols.last().unwrap();
        for x in inked_columns(&canvas) {
            if canvas.pixel(x, 5) == Some(Rgb::new(10, 200, 10)) {
                assert!(x > a_right);
            }
        }
    }

    #[test]
    fn test_out_of_bounds_glyphs_are_dropped() {
        let mut canvas = Canvas::new(20, 20).unwrap();
        let text = cps("xxxxxxxx");
        let run = TextRun {
            text: &text,
            x: -15,
            y: -8,
            color: INK,
        };
        let end = draw_run(&mut canvas, &BlockFont, &run, 1.0);
        assert_eq!(end, 65);
        // Second glyph is clipped to columns 0..=1, rows 0..=3.
        assert_eq!(canvas.pixel(0, 0), Some(INK));
        assert_eq!(canvas.pixel(2, 0), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(6, 3), Some(INK));
        assert_eq!(canvas.pixel(6, 4), Some(Rgb::BLACK));
    }

    #[test]
    fn test_document_lines_and_truncation() {
        let mut canvas = Canvas::new(300, 100).unwrap();
        let document = Document {
            lines: vec![
                StyledLine {
                    indent: 0,
                    spans: vec![
                        Span::new("abc", Style::Keyword),
                        Span::new("defgh", Style::String),
                    ],
                },
                StyledLine {
                    indent: 20,
                    spans: vec![Span::new("z", Style::Text)],
                },
            ],
        };
        let theme = Theme::default();
        let params = DrawParams {
            origin_x: 0,
            origin_y: 0,
            scale: 1.0,
            line_spacing: 1.5,
            decoding: Decoding::Bytes,
            max_line_len: Some(4),
        };

        let stats = draw_document(&mut canvas, &BlockFont, &document, &theme, &params);
        assert_eq!(
            stats,
            DrawStats {
                lines: 2,
                truncated_lines: 1
            }
        );

        // Fourth glyph of line one is the first of the string span.
        assert_eq!(canvas.pixel(31, 5), Some(theme.string));
        assert_eq!(canvas.pixel(41, 5), Some(Rgb::BLACK));
        // Line two starts at y = 24 (16 * 1.5), x = 20.
        assert_eq!(canvas.pixel(21, 24 + 2), Some(theme.text));
        assert_eq!(canvas.pixel(21, 24 + 1), Some(Rgb::BLACK));
    }
}
