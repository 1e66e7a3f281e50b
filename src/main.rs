// this_file: src/main.rs
//! Codeshot CLI - render a text file into an editor-style PNG

use anyhow::{Context, Result};
use clap::{error::ErrorKind, CommandFactory, Parser};
use codeshot::catalog::DEFAULT_FONT_DIR;
use codeshot::color::{parse_hex, Rgb};
use codeshot::encode::{self, DEFAULT_OUTPUT};
use codeshot::render::{DEFAULT_FONT_SIZE, DEFAULT_LINE_SPACING, DEFAULT_PADDING};
use codeshot::{logging, Decoding, Document, Error, FontCatalog, FontHandle, RenderOptions};
use log::{error, info, warn};
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Codeshot - render source code into an image
#[derive(Parser, Debug)]
#[command(
    name = "codeshot",
    author,
    version,
    about,
    long_about = None,
    disable_help_flag = true,
    override_usage = "codeshot [options] -i FILE [output_image_path]"
)]
struct Cli {
    /// Output image path
    #[arg(value_name = "OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Input text file to render
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        required_unless_present_any = ["sample", "help"],
        conflicts_with = "sample"
    )]
    input: Option<PathBuf>,

    /// Render the built-in C sample instead of an input file
    #[arg(long)]
    sample: bool,

    /// Select font by name (e.g. 'JetBrainsMono-Regular'); see the list below
    #[arg(short = 'f', long = "font", value_name = "FONT")]
    font: Option<String>,

    /// Font size in pixels (also accepted as -fs)
    #[arg(long = "font-size", value_name = "SIZE", default_value_t = DEFAULT_FONT_SIZE, value_parser = parse_positive_f32)]
    font_size: f32,

    /// Image width in pixels (default: estimated from content)
    #[arg(short = 'w', long = "width", value_name = "WIDTH", value_parser = parse_positive_u32)]
    width: Option<u32>,

    /// Image height in pixels (default: estimated from content)
    #[arg(short = 'h', long = "height", value_name = "HEIGHT", value_parser = parse_positive_u32)]
    height: Option<u32>,

    /// Multiplier on the font's line height
    #[arg(long, value_name = "FACTOR", default_value_t = DEFAULT_LINE_SPACING, value_parser = parse_positive_f32)]
    line_spacing: f32,

    /// Margin between image edge and text in pixels
    #[arg(long, value_name = "PIXELS", default_value_t = DEFAULT_PADDING)]
    padding: u32,

    /// Truncate lines longer than this many characters
    #[arg(long, value_name = "N")]
    max_line_len: Option<usize>,

    /// Decode input as UTF-8 instead of one character per byte
    #[arg(long)]
    utf8: bool,

    /// Default text color (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    fg: Option<String>,

    /// Background color (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    bg: Option<String>,

    /// Code panel color (#RRGGBB)
    #[arg(long, value_name = "HEX")]
    panel: Option<String>,

    /// Directory searched recursively for .ttf fonts
    #[arg(long, value_name = "DIR", default_value = DEFAULT_FONT_DIR)]
    font_dir: PathBuf,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,

    /// Enable quiet mode (only errors)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Prefix log lines with a millisecond UTC timestamp
    #[arg(long)]
    timestamps: bool,

    /// Print usage and the available fonts
    #[arg(short = 'u', long = "help")]
    help: bool,
}

fn parse_positive_f32(s: &str) -> std::result::Result<f32, String> {
    let value: f32 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err("must be positive".into())
    }
}

fn parse_positive_u32(s: &str) -> std::result::Result<u32, String> {
    let value: i64 = s.parse().map_err(|_| format!("'{}' is not an integer", s))?;
    if value <= 0 {
        return Err("must be positive".into());
    }
    u32::try_from(value).map_err(|_| format!("'{}' is too large", s))
}

/// Rewrite legacy multi-letter single-dash flags to their long form.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-fs" {
                OsString::from("--font-size")
            } else {
                arg
            }
        })
        .collect()
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    logging::init_logging(&cli.log_level, cli.quiet, cli.timestamps);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = FontCatalog::scan(&cli.font_dir);

    if cli.help {
        print_usage(&catalog);
        return Ok(());
    }

    let entry = match catalog.select(cli.font.as_deref()) {
        Ok(entry) => entry,
        Err(e @ Error::FontNotFound { .. }) => {
            eprint!("{}", catalog.usage_listing());
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let document = match &cli.input {
        Some(path) => {
            let content = fs::read(path).map_err(|source| Error::Input {
                path: path.clone(),
                source,
            })?;
            info!("Read {} bytes from {}", content.len(), path.display());
            Document::from_plain(&content)
        }
        None => Document::sample(),
    };

    let font = FontHandle::load(&entry.path)?;
    let options = render_options(&cli);

    let rendered = codeshot::render(&font, &document, &options)
        .with_context(|| format!("Rendering with font '{}'", entry.name))?;
    encode::write_png(&rendered.canvas, &cli.output)?;

    println!("Successfully wrote '{}'", cli.output.display());
    Ok(())
}

fn render_options(cli: &Cli) -> RenderOptions {
    let mut options = RenderOptions {
        font_size: cli.font_size,
        line_spacing: cli.line_spacing,
        padding: cli.padding,
        width: cli.width,
        height: cli.height,
        decoding: if cli.utf8 {
            Decoding::Utf8
        } else {
            Decoding::Bytes
        },
        max_line_len: cli.max_line_len,
        ..RenderOptions::default()
    };

    if let Some(hex) = &cli.fg {
        options.theme.text = theme_color("--fg", hex);
    }
    if let Some(hex) = &cli.bg {
        options.theme.background = theme_color("--bg", hex);
    }
    if let Some(hex) = &cli.panel {
        options.theme.panel = theme_color("--panel", hex);
    }
    options
}

fn theme_color(flag: &str, hex: &str) -> Rgb {
    parse_hex(hex).unwrap_or_else(|| {
        warn!("{} '{}' is not #RRGGBB; using black", flag, hex);
        Rgb::BLACK
    })
}

fn print_usage(catalog: &FontCatalog) {
    let mut cmd = Cli::command();
    println!("{}", cmd.render_help());
    println!("{}", catalog.usage_listing());
}
