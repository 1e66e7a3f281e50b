// this_file: src/color.rs
//! RGB colors and the editor palette.

/// An opaque 8-bit-per-channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string.
    ///
    /// Anything else (wrong length, missing `#`, non-hex digits) yields
    /// black rather than an error.
    pub fn from_hex(hex: &str) -> Self {
        parse_hex(hex).unwrap_or(Self::BLACK)
    }

    /// Channels in buffer order.
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Strict `#RRGGBB` parser; `None` on any malformed input.
pub fn parse_hex(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#')?;
    if hex.len() != 7 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
}

/// Token classes the palette has colors for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Text,
    Comment,
    Keyword,
    Function,
    String,
    Literal,
}

/// Colors for the canvas, the code panel and each token style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgb,
    pub panel: Rgb,
    pub text: Rgb,
    pub comment: Rgb,
    pub keyword: Rgb,
    pub function: Rgb,
    pub string: Rgb,
    pub literal: Rgb,
}

impl Theme {
    /// Color used for runs of the given style
    pub fn color(&self, style: Style) -> Rgb {
        match style {
            Style::Text => self.text,
            Style::Comment => self.comment,
            Style::Keyword => self.keyword,
            Style::Function => self.function,
            Style::String => self.string,
            Style::Literal => self.literal,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Rgb::from_hex("#1a1a1a"),
            panel: Rgb::from_hex("#0d0d0d"),
            text: Rgb::from_hex("#f8f8f2"),
            comment: Rgb::from_hex("#6272a4"),
            keyword: Rgb::from_hex("#ff79c6"),
            function: Rgb::from_hex("#50fa7b"),
            string: Rgb::from_hex("#f1fa8c"),
            literal: Rgb::from_hex("#ffb86c"),
        }
    }
}
