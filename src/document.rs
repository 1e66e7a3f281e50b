// this_file: src/document.rs
//! Input text as styled lines.
//!
//! Plain input becomes one default-styled span per line. The built-in
//! sample is a fixed C "hello world" with hand-assigned styles; there is
//! no tokenizer.

use crate::color::Style;

/// How input bytes map to display codepoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Decoding {
    /// Every byte is its own codepoint (0-255). Multi-byte UTF-8
    /// sequences render as several Latin-1 glyphs.
    #[default]
    Bytes,
    /// Lossy UTF-8; invalid sequences become U+FFFD.
    Utf8,
}

impl Decoding {
    pub fn codepoints(self, text: &[u8]) -> Vec<u32> {
        match self {
            Decoding::Bytes => text.iter().map(|&b| u32::from(b)).collect(),
            Decoding::Utf8 => String::from_utf8_lossy(text).chars().map(u32::from).collect(),
        }
    }
}

/// Split on `\n`. A trailing newline yields a final empty line and empty
/// content yields one empty line.
pub fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    content.split(|&b| b == b'\n').collect()
}

/// Cut `codepoints` to at most `max_len` entries; returns whether anything was dropped.
pub fn truncate_line(codepoints: &mut Vec<u32>, max_len: Option<usize>) -> bool {
    match max_len {
        Some(limit) if codepoints.len() > limit => {
            codepoints.truncate(limit);
            true
        }
        _ => false,
    }
}

/// A contiguous run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: Vec<u8>,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<Vec<u8>>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One line of spans drawn left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledLine {
    /// Extra horizontal offset in pixels before the first span
    pub indent: i32,
    pub spans: Vec<Span>,
}

impl StyledLine {
    /// Concatenated span text
    pub fn text(&self) -> Vec<u8> {
        self.spans.iter().flat_map(|s| s.text.iter().copied()).collect()
    }
}

/// Lines in document order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub lines: Vec<StyledLine>,
}

impl Document {
    /// One default-styled span per line of `content`
    pub fn from_plain(content: &[u8]) -> Self {
        let lines = split_lines(content)
            .into_iter()
            .map(|line| StyledLine {
                indent: 0,
                spans: vec![Span::new(line, Style::Text)],
            })
            .collect();
        Self { lines }
    }

    /// The built-in C sample
    pub fn sample() -> Self {
        let line = |indent: i32, spans: &[(&str, Style)]| StyledLine {
            indent,
            spans: spans.iter().map(|&(t, s)| Span::new(t, s)).collect(),
        };

        Self {
            lines: vec![
                line(0, &[("// C Code Example:", Style::Comment)]),
                line(
                    0,
                    &[
                        ("#include ", Style::Keyword),
                        ("<stdio.h>", Style::String),
                        (" // Include standard I/O", Style::Comment),
                    ],
                ),
                line(
                    0,
                    &[
                        ("int ", Style::Keyword),
                        ("main", Style::Function),
                        ("() {", Style::Text),
                    ],
                ),
                line(
                    20,
                    &[
                        ("  printf(", Style::Function),
                        ("\"Hello, World!\\n\"", Style::String),
                        (");", Style::Text),
                    ],
                ),
                line(20, &[("  return ", Style::Keyword), ("0;", Style::Literal)]),
                line(0, &[("}", Style::Text)]),
            ],
        }
    }

    /// Lines joined with `\n`, as the estimator sees them
    pub fn plain_text(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                out.push(b'\n');
            }
            out.extend(line.text());
        }
        out
    }
}
