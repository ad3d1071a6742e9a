//! Recursive tree printer.
//!
//! [`Printer`] walks an [`RcDom`](markup5ever_rcdom::RcDom) tree depth first
//! and writes each node according to its [`Layout`]. Output goes through a
//! [`Cursor`], which remembers the column written since the last line break.
//! The indentation level is passed down by value; nothing else is shared
//! between recursive calls.

use std::io::{self, Write};

use html5ever::serialize::{SerializeOpts, TraversalScope, serialize};
use markup5ever_rcdom::{Handle, NodeData, SerializableHandle};
use tracing::trace;

use crate::{
    classify::{
        Layout, children, glues_to_next, has_single_text_child, is_raw_text_element,
        is_root_element, starts_with_punctuation,
    },
    escape::{escape_attribute, escape_text},
    wrap::is_breakable_space,
};

mod paragraph;
mod verbatim;

/// One level of indentation.
pub const INDENT: &str = "  ";

/// Column limit for paragraph content, excluding indentation.
pub const PARAGRAPH_WIDTH: usize = 100;

pub(crate) fn indentation(level: usize) -> String { INDENT.repeat(level) }

pub(crate) fn trim_breakable(text: &str) -> &str { text.trim_matches(is_breakable_space) }

/// Writer that tracks the current output column.
///
/// The column is the number of Unicode code points written since the last
/// `\n`, so it stays correct however the bytes are chunked.
#[derive(Debug)]
pub struct Cursor<W> {
    inner: W,
    col: usize,
}

impl<W: Write> Cursor<W> {
    #[must_use]
    pub fn new(inner: W) -> Self { Self { inner, col: 0 } }

    #[must_use]
    pub fn col(&self) -> usize { self.col }

    #[must_use]
    pub fn into_inner(self) -> W { self.inner }

    fn advance(&mut self, bytes: &[u8]) {
        let tail = match bytes.iter().rposition(|&b| b == b'\n') {
            Some(idx) => {
                self.col = 0;
                &bytes[idx + 1..]
            }
            None => bytes,
        };
        // Count leading bytes only; continuation bytes look like 0b10xx_xxxx.
        self.col += tail.iter().filter(|&&b| (b & 0xC0) != 0x80).count();
    }
}

impl<W: Write> Write for Cursor<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.advance(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> { self.inner.flush() }
}

/// Where a node sits among its siblings.
///
/// Top-level nodes of a fragment have no parent.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Siblings<'a> {
    pub(crate) parent: Option<&'a Handle>,
    pub(crate) prev: Option<&'a Handle>,
    pub(crate) next: Option<&'a Handle>,
}

pub(crate) fn tag_name(handle: &Handle) -> &str {
    match &handle.data {
        NodeData::Element { name, .. } => &name.local,
        _ => "",
    }
}

/// Attributes of `handle` rendered as `key="value"`, in source order.
pub(crate) fn attributes(handle: &Handle) -> Vec<String> {
    let NodeData::Element { attrs, .. } = &handle.data else {
        return Vec::new();
    };
    attrs
        .borrow()
        .iter()
        .map(|attr| {
            let value = escape_attribute(&attr.value);
            match &attr.name.prefix {
                Some(prefix) => format!("{prefix}:{}=\"{value}\"", attr.name.local),
                None => format!("{}=\"{value}\"", attr.name.local),
            }
        })
        .collect()
}

pub(crate) fn write_open_tag<W: Write>(out: &mut W, handle: &Handle) -> io::Result<()> {
    write!(out, "<{}", tag_name(handle))?;
    for attr in attributes(handle) {
        write!(out, " {attr}")?;
    }
    out.write_all(b">")
}

pub(crate) fn write_close_tag<W: Write>(out: &mut W, handle: &Handle) -> io::Result<()> {
    write!(out, "</{}>", tag_name(handle))
}

/// An element whose only child is non-blank text stays on one line.
///
/// A blank text child counts as no content at all, so `<li>\n</li>` and
/// `<li></li>` print the same way.
fn keeps_inline(handle: &Handle) -> bool {
    if !has_single_text_child(handle) {
        return false;
    }
    children(handle).first().is_some_and(|child| match &child.data {
        NodeData::Text { contents } => !trim_breakable(&contents.borrow()).is_empty(),
        _ => false,
    })
}

/// Lines of raw text with the common indentation and blank edges removed.
fn dedent(text: &str) -> Vec<&str> {
    let is_blank = |line: &&str| trim_breakable(line).is_empty();
    let lines: Vec<&str> = text.split('\n').collect();
    let Some(start) = lines.iter().position(|line| !is_blank(line)) else {
        return Vec::new();
    };
    let end = lines.iter().rposition(|line| !is_blank(line)).map_or(start, |idx| idx + 1);
    let body = &lines[start..end];
    let common = body
        .iter()
        .copied()
        .filter(|line| !is_blank(line))
        .map(|line| &line[..line.len() - line.trim_start_matches(is_breakable_space).len()])
        .reduce(|acc, prefix| {
            let shared = acc
                .char_indices()
                .zip(prefix.chars())
                .find(|&((_, a), b)| a != b)
                .map_or(acc.len().min(prefix.len()), |((idx, _), _)| idx);
            &acc[..shared]
        })
        .unwrap_or("");
    body.iter()
        .map(|&line| {
            line.strip_prefix(common)
                .unwrap_or(line)
                .trim_end_matches(is_breakable_space)
        })
        .collect()
}

/// Pretty-printer writing to `W`.
pub struct Printer<W> {
    out: Cursor<W>,
}

impl<W: Write> Printer<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self {
            out: Cursor::new(out),
        }
    }

    #[must_use]
    pub fn into_inner(self) -> W { self.out.into_inner() }

    /// Print a run of sibling nodes at `level`.
    ///
    /// # Errors
    /// Returns any error raised by the underlying writer.
    pub fn print_nodes(&mut self, nodes: &[Handle], level: usize) -> io::Result<()> {
        self.print_siblings(nodes, None, level)
    }

    /// Flush the underlying writer.
    ///
    /// # Errors
    /// Returns any error raised by the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> { self.out.flush() }

    fn print_siblings(
        &mut self,
        nodes: &[Handle],
        parent: Option<&Handle>,
        level: usize,
    ) -> io::Result<()> {
        for (idx, node) in nodes.iter().enumerate() {
            let siblings = Siblings {
                parent,
                prev: idx.checked_sub(1).and_then(|prev| nodes.get(prev)),
                next: nodes.get(idx + 1),
            };
            self.print_node(node, siblings, level)?;
        }
        Ok(())
    }

    fn print_children(&mut self, handle: &Handle, level: usize) -> io::Result<()> {
        let kids = children(handle);
        self.print_siblings(&kids, Some(handle), level)
    }

    pub(crate) fn print_node(
        &mut self,
        handle: &Handle,
        siblings: Siblings<'_>,
        level: usize,
    ) -> io::Result<()> {
        match &handle.data {
            NodeData::Document => self.print_children(handle, level),
            NodeData::Doctype { .. } => self.print_doctype(handle, level),
            NodeData::Text { contents } => self.print_text(&contents.borrow(), siblings, level),
            NodeData::Comment { contents } => self.print_comment(contents, level),
            NodeData::Element { .. } => self.print_element(handle, siblings, level),
            NodeData::ProcessingInstruction { .. } => Ok(()),
        }
    }

    fn indent(&mut self, level: usize) -> io::Result<()> {
        for _ in 0..level {
            self.out.write_all(INDENT.as_bytes())?;
        }
        Ok(())
    }

    fn print_doctype(&mut self, handle: &Handle, level: usize) -> io::Result<()> {
        self.indent(level)?;
        serialize(
            &mut self.out,
            &SerializableHandle::from(handle.clone()),
            SerializeOpts {
                traversal_scope: TraversalScope::IncludeNode,
                ..SerializeOpts::default()
            },
        )?;
        self.out.write_all(b"\n")
    }

    fn print_comment(&mut self, contents: &str, level: usize) -> io::Result<()> {
        self.indent(level)?;
        writeln!(self.out, "<!--{contents}-->")
    }

    fn print_text(&mut self, text: &str, siblings: Siblings<'_>, level: usize) -> io::Result<()> {
        let trimmed = trim_breakable(text);
        if trimmed.is_empty() {
            return Ok(());
        }
        if siblings.parent.is_some_and(is_raw_text_element) {
            return self.print_raw_lines(text, level);
        }
        let inline = siblings.parent.is_some_and(keeps_inline);
        let glued = siblings.prev.is_some() && starts_with_punctuation(trimmed);
        if !inline && !glued {
            self.indent(level)?;
        }
        self.out.write_all(escape_text(trimmed).as_bytes())?;
        if !inline {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Raw text goes on its own lines, re-indented at `level`. Blank lines
    /// carry no indentation.
    fn print_raw_lines(&mut self, text: &str, level: usize) -> io::Result<()> {
        for line in dedent(text) {
            self.out.write_all(b"\n")?;
            if !line.is_empty() {
                self.indent(level)?;
                self.out.write_all(line.as_bytes())?;
            }
        }
        self.out.write_all(b"\n")
    }

    fn print_element(
        &mut self,
        handle: &Handle,
        siblings: Siblings<'_>,
        level: usize,
    ) -> io::Result<()> {
        let layout = Layout::of(handle);
        trace!(tag = tag_name(handle), ?layout, level, "print element");
        match layout {
            Layout::Verbatim => self.print_verbatim(handle, level),
            Layout::BlockLike => self.print_paragraph(handle, level),
            Layout::Void => {
                self.indent(level)?;
                write_open_tag(&mut self.out, handle)?;
                self.out.write_all(b"\n")
            }
            Layout::ExternalSourced => {
                self.indent(level)?;
                write_open_tag(&mut self.out, handle)?;
                write_close_tag(&mut self.out, handle)?;
                self.out.write_all(b"\n")
            }
            Layout::RawText | Layout::Default => self.print_block(handle, layout, siblings, level),
        }
    }

    fn print_block(
        &mut self,
        handle: &Handle,
        layout: Layout,
        siblings: Siblings<'_>,
        level: usize,
    ) -> io::Result<()> {
        let inline = keeps_inline(handle);
        self.indent(level)?;
        write_open_tag(&mut self.out, handle)?;
        if !inline {
            self.out.write_all(b"\n")?;
        }
        let child_level = if is_root_element(handle, siblings.parent) {
            level
        } else {
            level + 1
        };
        self.print_children(handle, child_level)?;
        if (layout == Layout::RawText || !inline) && self.out.col() == 0 {
            self.indent(level)?;
        }
        write_close_tag(&mut self.out, handle)?;
        if !glues_to_next(siblings.next) {
            self.out.write_all(b"\n")?;
        }
        Ok(())
    }
}
