// this_file: tests/cli.rs
//! CLI integration tests for the codeshot binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to run the `codeshot` binary inside `dir`
fn bin(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("codeshot").expect("binary exists");
    cmd.current_dir(dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Scratch directory with a `Fonts/` tree holding the given file names
fn workspace(fonts: &[&str]) -> TempDir {
    let dir = TempDir::new().unwrap();
    let font_dir = dir.path().join("Fonts").join("Mono");
    fs::create_dir_all(&font_dir).unwrap();
    for name in fonts {
        fs::write(font_dir.join(name), b"not really a font").unwrap();
    }
    fs::write(dir.path().join("main.c"), "int main() {\n\treturn 0;\n}\n").unwrap();
    dir
}

/// Scratch directory whose `Fonts/` tree holds the bundled DejaVu Sans Mono
fn workspace_with_real_font() -> TempDir {
    let dir = workspace(&[]);
    let fixture = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/DejaVuSansMono.ttf");
    fs::copy(fixture, dir.path().join("Fonts/Mono/DejaVuSansMono.ttf")).unwrap();
    dir
}

#[test]
fn test_render_writes_png_and_reports_once() {
    let dir = workspace_with_real_font();
    bin(&dir)
        .args(["-i", "main.c", "out.png"])
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| {
            out.matches("Successfully wrote 'out.png'").count() == 1
        }))
        .stderr(predicate::str::contains("Defaulting to 'DejaVuSansMono'"))
        .stderr(predicate::str::contains("Successfully wrote").not());

    let png = fs::read(dir.path().join("out.png")).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn test_debug_log_times_each_stage_with_timestamps() {
    let dir = workspace_with_real_font();
    bin(&dir)
        .args(["--sample", "--timestamps", "-l", "debug", "sample.png"])
        .assert()
        .success()
        .stderr(predicate::str::is_match(r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{3}Z ").unwrap())
        .stderr(predicate::str::contains("[catalog]"))
        .stderr(predicate::str::contains("font scan completed in"))
        .stderr(predicate::str::contains("font load completed in"))
        .stderr(predicate::str::contains("render completed in"))
        .stderr(predicate::str::contains("png write completed in"));
    assert!(dir.path().join("sample.png").exists());
}

#[test]
fn test_quiet_hides_info_lines() {
    let dir = workspace_with_real_font();
    bin(&dir)
        .args(["--sample", "-q", "--timestamps"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_help_lists_discovered_fonts() {
    let dir = workspace(&["JetBrainsMono-Regular.ttf", "notes.txt"]);
    bin(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("-fs").or(predicate::str::contains("--font-size")))
        .stdout(predicate::str::contains("  - JetBrainsMono-Regular"))
        .stdout(predicate::str::contains("notes").not());
}

#[test]
fn test_help_alias_without_fonts() {
    let dir = TempDir::new().unwrap();
    bin(&dir)
        .arg("-u")
        .assert()
        .success()
        .stdout(predicate::str::contains("No fonts found"));
}

#[test]
fn test_unknown_flag_exits_one() {
    let dir = workspace(&[]);
    bin(&dir)
        .args(["-i", "main.c", "--frobnicate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("--frobnicate"))
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_missing_input_is_usage_error() {
    let dir = workspace(&["A.ttf"]);
    bin(&dir).arg("out.png").assert().code(1);
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn test_non_positive_sizes_rejected() {
    let dir = workspace(&["A.ttf"]);
    for args in [
        ["-i", "main.c", "-fs", "0"],
        ["-i", "main.c", "-w", "0"],
        ["-i", "main.c", "-h", "0"],
    ] {
        bin(&dir).args(args).assert().code(1);
    }
    assert!(!dir.path().join("highlighted_code.png").exists());
}

#[test]
fn test_no_fonts_available() {
    let dir = workspace(&[]);
    bin(&dir)
        .args(["-i", "main.c"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No fonts found"));
}

#[test]
fn test_requested_font_not_found() {
    let dir = workspace(&["A.ttf"]);
    bin(&dir)
        .args(["-i", "main.c", "-f", "Missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'Missing' not found"))
        .stderr(predicate::str::contains("  - A"));
}

#[test]
fn test_unparsable_font_is_reported() {
    let dir = workspace(&["Broken.ttf"]);
    bin(&dir)
        .args(["-i", "main.c", "out.png"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Defaulting to 'Broken'"))
        .stderr(predicate::str::contains("Failed to load font"));
    assert!(!dir.path().join("out.png").exists());
}

#[test]
fn test_missing_input_file_is_reported() {
    let dir = workspace(&["A.ttf"]);
    bin(&dir)
        .args(["-i", "absent.c"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("absent.c"));
}

#[test]
fn test_custom_font_dir() {
    let dir = workspace(&[]);
    let other = dir.path().join("elsewhere");
    fs::create_dir_all(&other).unwrap();
    fs::write(other.join("Custom.ttf"), b"x").unwrap();
    bin(&dir)
        .args(["--font-dir", "elsewhere", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("  - Custom"));
}
