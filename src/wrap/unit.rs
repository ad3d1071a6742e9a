//! Lexing of plain text into wrap units.
//!
//! Text is classified character by character into words, runs of breakable
//! whitespace, and explicit line breaks. A non-breaking space (U+00A0) is word
//! content, so words joined by one are never split across lines.

const NBSP: char = '\u{a0}';

/// Atomic span of text handled by the word wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit<'a> {
    /// A run of characters that must never be split.
    Word(&'a str),
    /// A run of breakable whitespace.
    Spaces(&'a str),
    /// An explicit `\n` line break.
    NewLine,
}

impl Unit<'_> {
    /// Display width in Unicode code points. A line break has no width.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Unit::Word(s) | Unit::Spaces(s) => s.chars().count(),
            Unit::NewLine => 0,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Class {
    Word,
    Spaces,
}

/// `true` for whitespace a line may break at; U+00A0 is not.
#[must_use]
pub fn is_breakable_space(ch: char) -> bool { ch.is_whitespace() && ch != NBSP }

fn classify(ch: char) -> Class {
    if is_breakable_space(ch) {
        Class::Spaces
    } else {
        Class::Word
    }
}

/// Lazy iterator over the [`Unit`]s of a string.
///
/// Consecutive characters of the same class merge into one unit. Every `\n`
/// is a unit of its own, so two line breaks in a row yield two
/// [`Unit::NewLine`]s.
pub struct Units<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Units<'a> {
    type Item = Unit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        let first = rest.chars().next()?;
        if first == '\n' {
            self.pos += 1;
            return Some(Unit::NewLine);
        }

        let class = classify(first);
        let len = rest
            .char_indices()
            .find(|&(_, ch)| ch == '\n' || classify(ch) != class)
            .map_or(rest.len(), |(idx, _)| idx);
        let span = &rest[..len];
        self.pos += len;
        Some(match class {
            Class::Word => Unit::Word(span),
            Class::Spaces => Unit::Spaces(span),
        })
    }
}

/// Split `text` into wrap units.
///
/// # Examples
///
/// ```
/// use htmlfmt::wrap::{Unit, units};
///
/// let got: Vec<Unit> = units("foo bar\n").collect();
/// assert_eq!(
///     got,
///     vec![Unit::Word("foo"), Unit::Spaces(" "), Unit::Word("bar"), Unit::NewLine]
/// );
/// ```
#[must_use]
pub fn units(text: &str) -> Units<'_> { Units { text, pos: 0 } }
