use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::Parser;
use htmlfmt::{Mode, format_document, format_fragment, io::{format_file, rewrite}};
use rayon::prelude::*;
use tracing::{Level, debug};

#[derive(Parser)]
#[command(version, about = "Pretty-print HTML with consistent indentation")]
struct Cli {
    /// Parse input as a whole document instead of a fragment
    #[arg(long = "document")]
    document: bool,
    /// Rewrite files in place
    #[arg(long = "in-place", requires = "files")]
    in_place: bool,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// HTML files to format
    files: Vec<PathBuf>,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.document {
            Mode::Document
        } else {
            Mode::Fragment
        }
    }
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("failed to install logger")
}

fn format_stdin(mode: Mode) -> anyhow::Result<()> {
    let stdin = io::stdin().lock();
    let mut out = BufWriter::new(io::stdout().lock());
    let formatted = match mode {
        Mode::Document => format_document(stdin, &mut out),
        Mode::Fragment => format_fragment(stdin, &mut out),
    };
    formatted.context("failed to format standard input")?;
    out.flush().context("failed to write standard output")
}

/// Format one file; returns the text to print unless it was rewritten.
fn process_path(path: &Path, mode: Mode, in_place: bool) -> anyhow::Result<Option<String>> {
    if in_place {
        rewrite(path, mode).with_context(|| format!("failed to rewrite {}", path.display()))?;
        debug!(path = %path.display(), "rewrote file");
        return Ok(None);
    }
    format_file(path, mode)
        .map(Some)
        .with_context(|| format!("failed to format {}", path.display()))
}

/// Entry point for the command-line HTML formatter.
///
/// With no files, standard input is formatted to standard output. Files are
/// formatted in parallel and printed in argument order, or rewritten with
/// `--in-place`. A failing file does not stop the others; each failure is
/// reported on standard error and the process exits non-zero.
///
/// # Examples
///
/// ```sh
/// # Format a fragment from standard input
/// echo '<ul><li>a</li></ul>' | htmlfmt
///
/// # Format whole documents in place
/// htmlfmt --document --in-place index.html about.html
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;
    let mode = cli.mode();

    if cli.files.is_empty() {
        return format_stdin(mode);
    }

    let results: Vec<_> = cli
        .files
        .par_iter()
        .map(|path| process_path(path, mode, cli.in_place))
        .collect();

    let mut out = BufWriter::new(io::stdout().lock());
    let mut failures = 0usize;
    for result in results {
        match result {
            Ok(Some(text)) => out.write_all(text.as_bytes())?,
            Ok(None) => {}
            Err(err) => {
                failures += 1;
                eprintln!("htmlfmt: {err:#}");
            }
        }
    }
    out.flush()?;

    if failures > 0 {
        anyhow::bail!("{failures} file(s) could not be formatted");
    }
    Ok(())
}
