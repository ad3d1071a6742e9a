//! Greedy word wrapping for prose.
//!
//! [`WordWrapper`] fills lines up to a column limit, breaking only at
//! whitespace. Explicit line breaks in the input are always kept, runs of
//! spaces inside a line are kept verbatim, and a word longer than the limit
//! is never split: it simply gets a line of its own.
//!
//! Widths are counted in Unicode code points. The indentation prefix written
//! in front of continuation lines is not charged against the limit.

use std::io::{self, Write};

mod line_buffer;
mod unit;

use line_buffer::{Line, Pair};
pub use unit::{Unit, Units, is_breakable_space, units};

/// Settings for a single wrapping pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrapOptions {
    /// Maximum number of columns per line, excluding indentation.
    pub limit: usize,
    /// Columns already occupied on the first line. When this is zero the
    /// wrapper indents the first line itself; otherwise the caller is
    /// assumed to have positioned it.
    pub starts_at: usize,
    /// Prefix written at the start of every line the wrapper begins.
    pub indentation: String,
}

/// Stateful line filler writing wrapped text to `W`.
///
/// Units are fed one at a time with [`add_unit`](Self::add_unit) (or a
/// whole string with [`wrap_str`](Self::wrap_str)); the last line is only
/// written by [`final_flush`](Self::final_flush).
pub struct WordWrapper<W> {
    out: W,
    limit: usize,
    indentation: String,
    line: Line,
    pending: Pair,
    // A wrapped line has been written and its line break is still owed.
    owed_break: bool,
    // The current output line already has its indentation.
    line_open: bool,
}

impl<W: Write> WordWrapper<W> {
    #[must_use]
    pub fn new(out: W, options: WrapOptions) -> Self {
        let WrapOptions {
            limit,
            starts_at,
            indentation,
        } = options;
        Self {
            out,
            limit,
            indentation,
            line: Line::new(starts_at, limit),
            pending: Pair::new("", true),
            owed_break: false,
            line_open: starts_at > 0,
        }
    }

    /// Lex `text` and feed every unit to the wrapper.
    ///
    /// # Errors
    /// Returns any error raised by the underlying writer.
    pub fn wrap_str(&mut self, text: &str) -> io::Result<()> {
        for unit in units(text) {
            self.add_unit(unit)?;
        }
        Ok(())
    }

    /// Feed a single unit.
    ///
    /// Consecutive [`Unit::Word`]s are glued together; the only places a
    /// line may break are [`Unit::Spaces`], [`soft_break`](Self::soft_break)
    /// and [`Unit::NewLine`].
    ///
    /// # Errors
    /// Returns any error raised by the underlying writer.
    pub fn add_unit(&mut self, unit: Unit<'_>) -> io::Result<()> {
        match unit {
            Unit::Spaces(space) => self.break_before(space),
            Unit::Word(word) => {
                self.pending.push_word(word);
                if !self.line.fits(&self.pending) {
                    self.flush_line()?;
                }
                Ok(())
            }
            Unit::NewLine => {
                let pending = std::mem::replace(&mut self.pending, Pair::new("", true));
                if !pending.is_empty() {
                    self.line.append(pending);
                }
                self.flush_line()?;
                self.out.write_all(b"\n")?;
                self.owed_break = false;
                self.line_open = false;
                Ok(())
            }
        }
    }

    /// Allow a line break at this point without any whitespace.
    ///
    /// Used between pieces of markup, such as before the `>` that closes an
    /// opening tag with attributes.
    ///
    /// # Errors
    /// Returns any error raised by the underlying writer.
    pub fn soft_break(&mut self) -> io::Result<()> { self.break_before("") }

    /// Write out whatever is buffered, without a trailing line break.
    ///
    /// # Errors
    /// Returns any error raised by the underlying writer.
    pub fn final_flush(&mut self) -> io::Result<()> {
        let pending = std::mem::replace(&mut self.pending, Pair::new("", false));
        if !pending.is_empty() {
            if pending.has_word() && !self.line.fits(&pending) {
                self.flush_line()?;
            }
            self.line.append(pending);
        }
        self.flush_line()
    }

    /// End the current line so the caller can write whole lines of its own.
    ///
    /// Buffered content is flushed and terminated with a line break. The
    /// caller must leave the sink at the start of a line; wrapping then
    /// resumes on a fresh, indented line.
    ///
    /// # Errors
    /// Returns any error raised by the underlying writer.
    pub fn interrupt(&mut self) -> io::Result<&mut W> {
        let pending = std::mem::replace(&mut self.pending, Pair::new("", false));
        if pending.has_word() {
            self.commit(pending)?;
        }
        self.flush_line()?;
        if self.owed_break {
            self.out.write_all(b"\n")?;
            self.owed_break = false;
        }
        self.line_open = false;
        Ok(&mut self.out)
    }

    /// Consume the wrapper and return the sink. Call
    /// [`final_flush`](Self::final_flush) first.
    #[must_use]
    pub fn into_inner(self) -> W { self.out }

    fn break_before(&mut self, space: &str) -> io::Result<()> {
        if !self.pending.has_word() {
            self.pending.push_space(space);
            return Ok(());
        }
        let pending = std::mem::replace(&mut self.pending, Pair::new(space, false));
        self.commit(pending)
    }

    fn commit(&mut self, pair: Pair) -> io::Result<()> {
        self.line.append(pair);
        if self.line.overflows()
            && let Some(pair) = self.line.pop_last()
        {
            self.flush_line()?;
            self.line.append(pair);
        }
        if self.line.is_full() {
            self.flush_line()?;
        }
        Ok(())
    }

    fn flush_line(&mut self) -> io::Result<()> {
        let line = std::mem::replace(&mut self.line, Line::new(0, self.limit));
        if !line.has_content() {
            return Ok(());
        }
        if self.owed_break {
            self.out.write_all(b"\n")?;
        }
        if !self.line_open {
            self.out.write_all(self.indentation.as_bytes())?;
        }
        line.write_to(&mut self.out)?;
        self.owed_break = true;
        self.line_open = false;
        Ok(())
    }
}

/// Wrap `text` into `out` in a single pass.
///
/// # Errors
/// Returns any error raised by `out`.
///
/// # Examples
///
/// ```
/// use htmlfmt::wrap::{WrapOptions, wrap_string};
///
/// let mut out = Vec::new();
/// let options = WrapOptions {
///     limit: 4,
///     ..WrapOptions::default()
/// };
/// wrap_string("foo bar baz", &mut out, options).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "foo\nbar\nbaz");
/// ```
pub fn wrap_string<W: Write>(text: &str, out: W, options: WrapOptions) -> io::Result<()> {
    let mut wrapper = WordWrapper::new(out, options);
    wrapper.wrap_str(text)?;
    wrapper.final_flush()
}

#[cfg(test)]
mod tests;
