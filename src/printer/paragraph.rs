//! Word-wrapped layout for paragraph-like elements.
//!
//! The descendants of a `<p>` are flattened into a run of [`Inline`] items
//! and fed to a [`WordWrapper`] writing into a [`FirstLineProbe`]. If the
//! result fits on one line the paragraph collapses to
//! `<p>content</p>`; otherwise the content goes on its own lines, one level
//! deeper than the tags.

use std::{
    io::{self, Write},
    sync::LazyLock,
};

use markup5ever_rcdom::{Handle, NodeData};
use regex::Regex;
use tracing::debug;

use super::{
    PARAGRAPH_WIDTH, Printer, Siblings, attributes, dedent, indentation, tag_name,
    write_close_tag, write_open_tag,
};
use crate::{
    classify::{Layout, children},
    escape::escape_text,
    probe::FirstLineProbe,
    wrap::{Unit, WordWrapper, WrapOptions, is_breakable_space},
};

/// Whitespace following a source line break; the wrapper re-indents.
static SOURCE_INDENT: LazyLock<Regex> =
    lazy_regex!(r"\n[^\S\n\x{A0}]+", "source indentation pattern should compile");

enum Inline {
    /// Prose, already escaped.
    Text(String),
    /// Tag fragment glued to whatever surrounds it.
    Markup(String),
    /// `key="value"`, preceded by a breakable space.
    Attribute(String),
    /// Break opportunity without whitespace.
    SoftBreak,
    /// Line break forced by `<br>`.
    HardBreak,
    /// Node printed by the block printer on its own lines.
    Block(Handle),
}

#[derive(Default)]
struct Flattener {
    items: Vec<Inline>,
    // Whitespace after a `<br>` or a block is swallowed by its line break.
    after_break: bool,
}

impl Flattener {
    fn push_children(&mut self, handle: &Handle, raw: bool) {
        for child in children(handle) {
            match &child.data {
                NodeData::Text { contents } => self.push_text(&contents.borrow(), raw),
                NodeData::Element { .. } => self.push_element(&child),
                NodeData::Comment { .. } | NodeData::Doctype { .. } | NodeData::Document => {
                    self.items.push(Inline::Block(child.clone()));
                    self.after_break = true;
                }
                NodeData::ProcessingInstruction { .. } => {}
            }
        }
    }

    fn push_text(&mut self, text: &str, raw: bool) {
        if raw {
            self.push_raw_text(text);
            return;
        }
        let dedented = SOURCE_INDENT.replace_all(text, "\n");
        let text: &str = if self.after_break {
            dedented.trim_start_matches(is_breakable_space)
        } else {
            &dedented
        };
        if text.is_empty() {
            return;
        }
        self.after_break = false;
        self.items.push(Inline::Text(escape_text(text).into_owned()));
    }

    /// Multi-line raw text is dedented so the wrapper can re-indent it.
    fn push_raw_text(&mut self, text: &str) {
        self.after_break = false;
        if !text.contains('\n') {
            self.items.push(Inline::Text(text.to_owned()));
            return;
        }
        let lines = dedent(text);
        if !lines.is_empty() {
            self.items.push(Inline::Text(format!("\n{}\n", lines.join("\n"))));
        }
    }

    fn push_element(&mut self, handle: &Handle) {
        let layout = Layout::of(handle);
        if layout == Layout::Verbatim {
            self.items.push(Inline::Block(handle.clone()));
            self.after_break = true;
            return;
        }
        let tag = tag_name(handle);
        self.after_break = false;
        self.items.push(Inline::Markup(format!("<{tag}")));
        let attrs = attributes(handle);
        let has_attrs = !attrs.is_empty();
        self.items.extend(attrs.into_iter().map(Inline::Attribute));
        if has_attrs {
            self.items.push(Inline::SoftBreak);
        }
        self.items.push(Inline::Markup(">".to_owned()));
        match layout {
            Layout::Void => {
                if tag == "br" {
                    self.items.push(Inline::HardBreak);
                    self.after_break = true;
                }
                return;
            }
            Layout::ExternalSourced => {}
            _ => self.push_children(handle, layout == Layout::RawText),
        }
        self.items.push(Inline::Markup(format!("</{tag}>")));
    }

    /// Drop whitespace at both ends, and any line break the paragraph ends
    /// with.
    fn finish(mut self) -> Vec<Inline> {
        let items = &mut self.items;
        while let Some(Inline::Text(text)) = items.first_mut() {
            let cut = text.len() - text.trim_start_matches(is_breakable_space).len();
            text.drain(..cut);
            if !text.is_empty() {
                break;
            }
            items.remove(0);
        }
        loop {
            match items.last_mut() {
                Some(Inline::Text(text)) => {
                    text.truncate(text.trim_end_matches(is_breakable_space).len());
                    if !text.is_empty() {
                        break;
                    }
                }
                Some(Inline::HardBreak) => {}
                _ => break,
            }
            items.pop();
        }
        self.items
    }
}

fn flatten(handle: &Handle) -> Vec<Inline> {
    let mut flattener = Flattener::default();
    flattener.push_children(handle, false);
    flattener.finish()
}

/// Feed `items` to `wrapper`. Block items are printed at `level`.
fn render<W: Write>(items: Vec<Inline>, wrapper: &mut WordWrapper<W>, level: usize) -> io::Result<()> {
    for item in items {
        match item {
            Inline::Text(text) => wrapper.wrap_str(&text)?,
            Inline::Markup(markup) => wrapper.add_unit(Unit::Word(&markup))?,
            Inline::Attribute(attr) => {
                wrapper.add_unit(Unit::Spaces(" "))?;
                wrapper.add_unit(Unit::Word(&attr))?;
            }
            Inline::SoftBreak => wrapper.soft_break()?,
            Inline::HardBreak => wrapper.add_unit(Unit::NewLine)?,
            Inline::Block(node) => {
                let sink = wrapper.interrupt()?;
                let mut printer = Printer::new(sink);
                printer.print_node(&node, Siblings::default(), level)?;
            }
        }
    }
    wrapper.final_flush()
}

impl<W: Write> Printer<W> {
    pub(super) fn print_paragraph(&mut self, handle: &Handle, level: usize) -> io::Result<()> {
        let mut probe = FirstLineProbe::new();
        let mut wrapper = WordWrapper::new(
            &mut probe,
            WrapOptions {
                limit: PARAGRAPH_WIDTH,
                starts_at: 0,
                indentation: indentation(level + 1),
            },
        );
        render(flatten(handle), &mut wrapper, level + 1)?;

        let multiline = probe.is_multiline();
        debug!(tag = tag_name(handle), multiline, "paragraph layout");
        self.indent(level)?;
        write_open_tag(&mut self.out, handle)?;
        if multiline {
            self.out.write_all(b"\n")?;
            let ends_with_newline = probe.ends_with_newline();
            probe.drain_into(&mut self.out)?;
            if !ends_with_newline {
                self.out.write_all(b"\n")?;
            }
            self.indent(level)?;
        } else {
            probe.drain_into(&mut self.out)?;
        }
        write_close_tag(&mut self.out, handle)?;
        self.out.write_all(b"\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_fragment;

    fn paragraph(html: &str) -> Handle {
        parse_fragment(html.as_bytes())
            .expect("in-memory parse cannot fail")
            .into_iter()
            .find(|node| tag_name(node) == "p")
            .expect("fragment has a paragraph")
    }

    fn texts(items: &[Inline]) -> Vec<String> {
        items
            .iter()
            .map(|item| match item {
                Inline::Text(text) | Inline::Markup(text) | Inline::Attribute(text) => text.clone(),
                Inline::SoftBreak => "<soft>".to_owned(),
                Inline::HardBreak => "<hard>".to_owned(),
                Inline::Block(_) => "<block>".to_owned(),
            })
            .collect()
    }

    #[test]
    fn flattens_markup_and_attributes() {
        let items = flatten(&paragraph(r#"<p>See <b class="red">this</b>.</p>"#));
        assert_eq!(
            texts(&items),
            ["See ", "<b", "class=\"red\"", "<soft>", ">", "this", "</b>", "."]
        );
    }

    #[test]
    fn trims_both_ends_and_source_indentation() {
        let items = flatten(&paragraph("<p>\n    one\n    two\n  </p>"));
        assert_eq!(texts(&items), ["one\ntwo"]);
    }

    #[test]
    fn br_absorbs_following_whitespace_and_trailing_break_is_dropped() {
        let items = flatten(&paragraph("<p>a<br>\n   b<br> </p>"));
        assert_eq!(
            texts(&items),
            ["a", "<br", ">", "<hard>", "b", "<br", ">"]
        );
    }

    #[test]
    fn comments_and_verbatim_children_become_blocks() {
        let items = flatten(&paragraph("<p>a<!-- c --><textarea>x</textarea></p>"));
        assert_eq!(texts(&items), ["a", "<block>", "<block>"]);
    }

    #[test]
    fn text_after_a_block_loses_its_leading_whitespace() {
        let items = flatten(&paragraph("<p>a\n  <!-- c -->\n  b</p>"));
        assert_eq!(texts(&items), ["a\n", "<block>", "b"]);
    }

    #[test]
    fn multiline_raw_text_is_dedented() {
        let items = flatten(&paragraph("<p>x<script>\n    a;\n      b;\n  </script></p>"));
        assert_eq!(
            texts(&items),
            ["x", "<script", ">", "\na;\n  b;\n", "</script>"]
        );
    }

    #[test]
    fn escapes_text_but_not_raw_content() {
        let items = flatten(&paragraph("<p>1 &lt; 2<script>a < b</script></p>"));
        assert_eq!(texts(&items), ["1 &lt; 2", "<script", ">", "a < b", "</script>"]);
    }

    fn render_paragraph(html: &str, level: usize) -> String {
        let mut printer = Printer::new(Vec::new());
        printer
            .print_paragraph(&paragraph(html), level)
            .expect("writing to a Vec cannot fail");
        String::from_utf8(printer.into_inner()).expect("printer output is UTF-8")
    }

    #[test]
    fn short_paragraph_collapses() {
        assert_eq!(render_paragraph("<p>  Short text. </p>", 1), "  <p>Short text.</p>\n");
    }

    #[test]
    fn empty_paragraph_collapses() {
        assert_eq!(render_paragraph("<p> </p>", 0), "<p></p>\n");
    }

    #[test]
    fn comment_forces_block_layout() {
        assert_eq!(
            render_paragraph("<p>before<!-- note -->after</p>", 0),
            "<p>\n  before\n  <!-- note -->\n  after\n</p>\n"
        );
    }
}
