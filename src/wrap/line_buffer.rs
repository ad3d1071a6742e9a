//! Line buffer used by [`WordWrapper`](super::WordWrapper).
//!
//! A line is held as a sequence of `(leading space, word)` pairs so that the
//! wrapper can decide, pair by pair, whether the next word still fits. The
//! leading space of the first pair on a wrapped line is neither charged nor
//! written; after an explicit line break it is both.

use std::io::{self, Write};

/// Leading whitespace and the word that follows it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Pair {
    space: String,
    space_width: usize,
    word: String,
    word_width: usize,
    after_break: bool,
}

impl Pair {
    /// Start a pair with `space` as its leading whitespace. `after_break`
    /// marks a pair that directly follows an explicit line break.
    pub(crate) fn new(space: &str, after_break: bool) -> Self {
        Self {
            space: space.to_owned(),
            space_width: space.chars().count(),
            after_break,
            ..Self::default()
        }
    }

    pub(crate) fn push_space(&mut self, space: &str) {
        self.space.push_str(space);
        self.space_width += space.chars().count();
    }

    pub(crate) fn push_word(&mut self, word: &str) {
        self.word.push_str(word);
        self.word_width += word.chars().count();
    }

    pub(crate) fn has_word(&self) -> bool { !self.word.is_empty() }

    pub(crate) fn is_empty(&self) -> bool { self.word.is_empty() && self.space.is_empty() }
}

/// Pairs accumulated for the line currently being filled.
#[derive(Debug)]
pub(crate) struct Line {
    pairs: Vec<(Pair, usize)>,
    width: usize,
    limit: usize,
}

impl Line {
    /// Create an empty line whose first `start` columns are already taken.
    pub(crate) fn new(start: usize, limit: usize) -> Self {
        Self {
            pairs: Vec::new(),
            width: start,
            limit,
        }
    }

    /// Width `pair` would add if appended now.
    fn charge(&self, pair: &Pair) -> usize {
        if self.pairs.is_empty() && !pair.after_break {
            pair.word_width
        } else {
            pair.space_width + pair.word_width
        }
    }

    pub(crate) fn is_full(&self) -> bool { self.width >= self.limit }

    /// An empty line accepts anything; overlong words have to go somewhere.
    pub(crate) fn fits(&self, pair: &Pair) -> bool {
        self.pairs.is_empty() || self.width + self.charge(pair) <= self.limit
    }

    pub(crate) fn append(&mut self, pair: Pair) {
        let charged = self.charge(&pair);
        self.width += charged;
        self.pairs.push((pair, charged));
    }

    /// Remove the last pair so it can be carried over to the next line.
    pub(crate) fn pop_last(&mut self) -> Option<Pair> {
        let (pair, charged) = self.pairs.pop()?;
        self.width = self.width.saturating_sub(charged);
        Some(pair)
    }

    /// `true` when appending the last pair pushed the line past its limit
    /// and there is an earlier pair to break after.
    pub(crate) fn overflows(&self) -> bool { self.pairs.len() > 1 && self.width > self.limit }

    /// `true` if writing the line would produce any characters.
    pub(crate) fn has_content(&self) -> bool { self.pairs.iter().any(|(pair, _)| pair.has_word()) }

    /// Serialize the line. A trailing pair without a word is dropped so that
    /// lines never end in whitespace.
    pub(crate) fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let last = self.pairs.len().saturating_sub(1);
        for (idx, (pair, _)) in self.pairs.iter().enumerate() {
            if idx == last && !pair.has_word() {
                break;
            }
            if idx > 0 || pair.after_break {
                out.write_all(pair.space.as_bytes())?;
            }
            out.write_all(pair.word.as_bytes())?;
        }
        Ok(())
    }
}
