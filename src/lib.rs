// this_file: src/lib.rs
//! Codeshot - render source files into editor-style images
//!
//! This library provides functionality for:
//! - Discovering `.ttf` fonts under a directory tree
//! - Font metrics and glyph rasterization via skrifa and zeno
//! - Estimating a canvas size from content and metrics
//! - Compositing colored text runs onto an RGB canvas
//! - PNG export

pub mod canvas;
pub mod catalog;
pub mod color;
pub mod document;
pub mod draw;
pub mod encode;
pub mod error;
pub mod font;
pub mod layout;
pub mod logging;
pub mod render;

// Re-export commonly used types
pub use canvas::Canvas;
pub use catalog::{FontCatalog, FontEntry};
pub use color::{Rgb, Style, Theme};
pub use document::{Decoding, Document};
pub use error::{Error, Result};
pub use font::{FontHandle, GlyphBitmap, GlyphSource, VerticalMetrics};
pub use render::{render, RenderOptions, Rendered};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
