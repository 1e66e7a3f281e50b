// this_file: src/error.rs
//! Error types for the codeshot library

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for codeshot operations
#[derive(Debug, Error)]
pub enum Error {
    /// Requested font name is not in the catalog
    #[error("Specified font '{name}' not found")]
    FontNotFound { name: String },

    /// Catalog is empty and no font was requested
    #[error("No fonts found in '{}'. Cannot proceed without a font", dir.display())]
    NoFontsAvailable { dir: PathBuf },

    /// Font file could not be read or parsed
    #[error("Failed to load font '{}': {reason}", path.display())]
    FontLoad { path: PathBuf, reason: String },

    /// Input text file could not be read
    #[error("Failed to read input file '{}': {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pixel buffer could not be allocated
    #[error("Failed to allocate pixel buffer for {width}x{height} canvas")]
    Allocation { width: u32, height: u32 },

    /// Image encoding or writing failed
    #[error("Failed to write PNG file '{}': {reason}", path.display())]
    Encode { path: PathBuf, reason: String },

    /// Invalid input parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for codeshot operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_not_found_names_the_font() {
        let err = Error::FontNotFound {
            name: "Missing-Regular".into(),
        };
        assert_eq!(err.to_string(), "Specified font 'Missing-Regular' not found");
    }

    #[test]
    fn test_no_fonts_names_the_directory() {
        let err = Error::NoFontsAvailable {
            dir: PathBuf::from("Fonts"),
        };
        assert!(err.to_string().contains("'Fonts'"));
    }

    #[test]
    fn test_input_error_keeps_io_source() {
        use std::error::Error as _;
        let err = Error::Input {
            path: PathBuf::from("main.c"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.to_string().starts_with("Failed to read input file 'main.c'"));
        assert_eq!(err.source().map(|e| e.to_string()), Some("gone".to_string()));
    }
}
