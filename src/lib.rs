//! Pretty-printer for HTML documents and fragments.
//!
//! Input is parsed with `html5ever` and written back with two-space
//! indentation. Elements holding a single run of text stay on one line,
//! `<pre>`-like elements are reproduced verbatim, `<style>` and `<script>`
//! content is re-indented line by line, and paragraph text is greedily
//! wrapped at [`PARAGRAPH_WIDTH`] columns.
//!
//! ```
//! use htmlfmt::{Mode, format_str};
//!
//! let out = format_str("<ol> <li class=\"name\"> A </li> <li> B </li> </ol>", Mode::Fragment)?;
//! assert_eq!(out, "<ol>\n  <li class=\"name\">A</li>\n  <li>B</li>\n</ol>\n");
//! # Ok::<(), std::io::Error>(())
//! ```

use std::io::{Read, Write};

use markup5ever_rcdom::Handle;

#[macro_use]
mod macros;

pub mod classify;
pub mod escape;
pub mod io;
pub mod parse;
pub mod printer;
pub mod probe;
pub mod wrap;

pub use printer::{Cursor, INDENT, PARAGRAPH_WIDTH, Printer};
pub use wrap::{WordWrapper, WrapOptions, wrap_string};

/// Which parser entry point to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// A whole document, with `html`, `head` and `body` synthesized as
    /// needed.
    Document,
    /// A fragment parsed in a `<body>` context.
    #[default]
    Fragment,
}

/// Pretty-print a list of sibling nodes.
///
/// # Errors
/// Returns any error raised by `out`. Output already written is not rolled
/// back.
pub fn format_nodes<W: Write>(nodes: &[Handle], out: W) -> std::io::Result<()> {
    let mut printer = Printer::new(out);
    printer.print_nodes(nodes, 0)?;
    printer.flush()
}

/// Parse `input` as a whole document and pretty-print it to `out`.
///
/// # Errors
/// Returns an error if reading `input` or writing `out` fails. Nothing is
/// written when reading fails.
pub fn format_document<R: Read, W: Write>(input: R, out: W) -> std::io::Result<()> {
    let document = parse::parse_document(input)?;
    format_nodes(&[document], out)
}

/// Parse `input` as a fragment and pretty-print it to `out`.
///
/// # Errors
/// Returns an error if reading `input` or writing `out` fails. Nothing is
/// written when reading fails.
pub fn format_fragment<R: Read, W: Write>(input: R, out: W) -> std::io::Result<()> {
    let nodes = parse::parse_fragment(input)?;
    format_nodes(&nodes, out)
}

/// Format `input` in memory.
///
/// # Errors
/// Only fails if the formatter produces invalid UTF-8, which it never
/// should.
pub fn format_str(input: &str, mode: Mode) -> std::io::Result<String> {
    format_to_string(input.as_bytes(), mode)
}

/// Parse `input` in `mode` and return the formatted text.
pub(crate) fn format_to_string<R: Read>(input: R, mode: Mode) -> std::io::Result<String> {
    let mut out = Vec::new();
    match mode {
        Mode::Document => format_document(input, &mut out)?,
        Mode::Fragment => format_fragment(input, &mut out)?,
    }
    String::from_utf8(out).map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}
