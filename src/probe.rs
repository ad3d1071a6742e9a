//! First-line probe for deciding block versus inline placement.
//!
//! Content is rendered into a [`FirstLineProbe`] before anything reaches the
//! real output. Once rendering is complete the caller asks whether the
//! content spilled onto a second line and places it accordingly. Leading
//! whitespace only survives when the content spans several lines, so a
//! single-line result can be spliced directly between its tags.

use std::io::{self, Write};

/// In-memory sink remembering everything written to it.
#[derive(Debug, Default)]
pub struct FirstLineProbe {
    buf: Vec<u8>,
}

impl FirstLineProbe {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    fn content_start(&self) -> usize {
        self.buf
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(self.buf.len())
    }

    /// `true` if a line break follows the first non-whitespace byte.
    #[must_use]
    pub fn is_multiline(&self) -> bool { self.buf[self.content_start()..].contains(&b'\n') }

    #[must_use]
    pub fn ends_with_newline(&self) -> bool { self.buf.last() == Some(&b'\n') }

    /// Write the buffered content to `out`.
    ///
    /// Leading whitespace is discarded unless the content spans several
    /// lines. Returns whether it did.
    ///
    /// # Errors
    /// Returns any error raised by `out`.
    pub fn drain_into<W: Write>(self, out: &mut W) -> io::Result<bool> {
        let multiline = self.is_multiline();
        let start = if multiline { 0 } else { self.content_start() };
        out.write_all(&self.buf[start..])?;
        Ok(multiline)
    }
}

impl Write for FirstLineProbe {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> { Ok(()) }
}
