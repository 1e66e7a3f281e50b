// this_file: src/logging.rs
//! Logging setup for the binary and stage timing for the pipeline

use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::Write;
use std::time::{Duration, Instant};

/// Map a level name to a filter, falling back to `Info` for unknown names.
pub fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => {
            eprintln!("Invalid log level '{}', using 'info'", level);
            LevelFilter::Info
        }
    }
}

/// ANSI color for the level column
fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m",
        Level::Warn => "\x1b[33m",
        Level::Info => "\x1b[32m",
        Level::Debug => "\x1b[34m",
        Level::Trace => "\x1b[35m",
    }
}

/// Module name shown in brackets: `codeshot::catalog` becomes `catalog`,
/// foreign targets are kept whole.
pub fn short_target(target: &str) -> &str {
    match target.strip_prefix("codeshot::") {
        Some(module) => module,
        None if target == "codeshot" => "main",
        None => target,
    }
}

/// Install the stderr logger.
///
/// `quiet` wins over `level`, and `RUST_LOG` refines whatever was chosen.
/// Calling this twice keeps the first logger.
pub fn init_logging(level: &str, quiet: bool, timestamps: bool) {
    let level_filter = if quiet {
        LevelFilter::Error
    } else {
        parse_level(level)
    };

    let mut builder = Builder::new();
    builder.filter_level(level_filter);
    builder.format(move |buf, record| {
        if timestamps {
            write!(buf, "{} ", buf.timestamp_millis())?;
        }
        writeln!(
            buf,
            "{}{:5}\x1b[0m [{}] {}",
            level_color(record.level()),
            record.level(),
            short_target(record.target()),
            record.args()
        )
    });

    if let Ok(rust_log) = std::env::var("RUST_LOG") {
        builder.parse_filters(&rust_log);
    }

    let _ = builder.try_init();
}

/// Drop guard that logs how long a pipeline stage took
pub struct Timer {
    stage: &'static str,
    start: Instant,
}

impl Timer {
    pub fn new(stage: &'static str) -> Self {
        log::trace!("{} started", stage);
        Self {
            stage,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log::debug!(
            "{} completed in {:.3}ms",
            self.stage,
            self.elapsed().as_secs_f64() * 1000.0
        );
    }
}
