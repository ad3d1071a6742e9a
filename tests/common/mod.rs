//! Utility helpers shared across integration tests.
#![allow(dead_code, reason = "each test crate uses a different subset")]

use std::{fs, path::PathBuf};

use htmlfmt::{Mode, format_str};
use tempfile::TempDir;

/// Format `input` as a fragment.
pub fn fragment(input: &str) -> String {
    format_str(input, Mode::Fragment).expect("formatting in memory cannot fail")
}

/// Format `input` as a whole document.
pub fn document(input: &str) -> String {
    format_str(input, Mode::Document).expect("formatting in memory cannot fail")
}

/// Assert that formatting `formatted` again leaves it unchanged.
pub fn assert_stable(formatted: &str, mode: Mode) {
    let again = format_str(formatted, mode).expect("formatting in memory cannot fail");
    assert_eq!(again, formatted, "formatting is not idempotent");
}

/// Write `contents` to `name` inside `dir` and return the path.
pub fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("failed to write temporary file");
    path
}
