// this_file: src/catalog.rs
//! Font discovery and selection.
//!
//! A [`FontCatalog`] is built by walking a directory tree for `.ttf` files.
//! It is an ordinary value: callers pass it to selection and usage
//! printing explicitly.

use crate::error::{Error, Result};
use crate::logging::Timer;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension (without dot) of files picked up by the scan
pub const FONT_EXTENSION: &str = "ttf";

/// Directory scanned when none is given on the command line
pub const DEFAULT_FONT_DIR: &str = "Fonts";

/// A discovered font file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontEntry {
    /// File name without extension
    pub name: String,
    /// Path as found during the walk (root joined with the relative path)
    pub path: PathBuf,
}

/// Fonts in directory-traversal order. Names are not deduplicated.
#[derive(Debug, Clone, Default)]
pub struct FontCatalog {
    root: PathBuf,
    entries: Vec<FontEntry>,
}

impl FontCatalog {
    /// Recursively scan `root` for font files.
    ///
    /// Unreadable directories (including a missing root) are logged and
    /// skipped; the scan never fails.
    pub fn scan<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        let _timer = Timer::new("font scan");
        let mut entries = Vec::new();

        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let location = e
                        .path()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| root.display().to_string());
                    warn!("Could not open directory '{}': {}", location, e);
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(font) = font_entry(entry.path()) {
                debug!("Found font '{}' at {}", font.name, font.path.display());
                entries.push(font);
            }
        }

        info!("Discovered {} font(s) under {}", entries.len(), root.display());
        Self {
            root: root.to_path_buf(),
            entries,
        }
    }

    /// Build a catalog from known entries
    pub fn from_entries(root: impl Into<PathBuf>, entries: Vec<FontEntry>) -> Self {
        Self {
            root: root.into(),
            entries,
        }
    }

    /// Directory the catalog was scanned from
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FontEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Font names in catalog order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// First entry with exactly this name
    pub fn find(&self, name: &str) -> Option<&FontEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Resolve an optional requested name to one entry.
    ///
    /// Without a request the first entry is the default and a notice is
    /// logged naming it.
    pub fn select(&self, requested: Option<&str>) -> Result<&FontEntry> {
        match requested {
            Some(name) => self.find(name).ok_or_else(|| Error::FontNotFound {
                name: name.to_string(),
            }),
            None => {
                let first = self.entries.first().ok_or_else(|| Error::NoFontsAvailable {
                    dir: self.root.clone(),
                })?;
                info!("No font specified. Defaulting to '{}'.", first.name);
                Ok(first)
            }
        }
    }

    /// Listing appended to the usage text
    pub fn usage_listing(&self) -> String {
        let mut out = format!(
            "Available Fonts (from {}/ directory):\n",
            self.root.display()
        );
        if self.entries.is_empty() {
            out.push_str(&format!(
                "  No fonts found. Ensure .{} files are in '{}/' or its subdirectories.\n",
                FONT_EXTENSION,
                self.root.display()
            ));
        } else {
            for name in self.names() {
                out.push_str("  - ");
                out.push_str(name);
                out.push('\n');
            }
        }
        out
    }
}

/// Entry for `path` if its extension marks it as a font.
fn font_entry(path: &Path) -> Option<FontEntry> {
    if path.extension()? != FONT_EXTENSION {
        return None;
    }
    let name = path.file_stem()?.to_string_lossy().into_owned();
    Some(FontEntry {
        name,
        path: path.to_path_buf(),
    })
}
