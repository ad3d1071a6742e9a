//! File helpers for formatting HTML on disk.

use std::{
    fs::{self, File},
    io::BufReader,
    path::Path,
};

use crate::{Mode, format_to_string};

/// Read and format the file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be read.
pub fn format_file(path: &Path, mode: Mode) -> std::io::Result<String> {
    format_to_string(BufReader::new(File::open(path)?), mode)
}

/// Rewrite a file in place with its formatted content.
///
/// # Errors
/// Returns an error if reading or writing the file fails.
pub fn rewrite(path: &Path, mode: Mode) -> std::io::Result<()> {
    let formatted = format_file(path, mode)?;
    fs::write(path, formatted)
}
