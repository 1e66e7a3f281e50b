// this_file: src/encode.rs
//! PNG export of a finished canvas.

use crate::canvas::Canvas;
use crate::error::{Error, Result};
use crate::logging::Timer;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use log::debug;
use std::fs;
use std::path::Path;

/// Output path used when none is given
pub const DEFAULT_OUTPUT: &str = "highlighted_code.png";

/// Encode the canvas as an 8-bit RGB PNG in memory.
pub fn encode_png(canvas: &Canvas) -> std::result::Result<Vec<u8>, String> {
    let mut png_data = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        &mut png_data,
        CompressionType::Default,
        FilterType::Sub,
    );
    encoder
        .write_image(
            canvas.pixels(),
            canvas.width(),
            canvas.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| format!("PNG encoding failed: {}", e))?;
    Ok(png_data)
}

/// Encode and write the canvas to `path`, whatever its extension.
pub fn write_png<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<()> {
    let path = path.as_ref();
    let _timer = Timer::new("png write");
    let fail = |reason: String| Error::Encode {
        path: path.to_path_buf(),
        reason,
    };

    let png_data = encode_png(canvas).map_err(fail)?;
    fs::write(path, &png_data).map_err(|e| fail(e.to_string()))?;

    debug!(
        "Encoded {} as {}x{} RGB, {} bytes",
        path.display(),
        canvas.width(),
        canvas.height(),
        png_data.len()
    );
    Ok(())
}
