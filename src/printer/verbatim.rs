//! Verbatim output for `<pre>`, `<listing>` and `<textarea>`.
//!
//! Descendants are reconstructed without any added whitespace: tags and
//! attributes are rebuilt, text is escaped and written as is.

use std::io::{self, Write};

use markup5ever_rcdom::{Handle, NodeData};

use super::{Printer, write_close_tag, write_open_tag};
use crate::{
    classify::{children, is_raw_text_element, is_void_element},
    escape::escape_text,
};

fn write_verbatim<W: Write>(out: &mut W, handle: &Handle, raw: bool) -> io::Result<()> {
    match &handle.data {
        NodeData::Text { contents } => {
            let text = contents.borrow();
            if raw {
                out.write_all(text.as_bytes())
            } else {
                out.write_all(escape_text(&text).as_bytes())
            }
        }
        NodeData::Element { .. } => {
            write_open_tag(out, handle)?;
            if is_void_element(handle) {
                return Ok(());
            }
            let raw = is_raw_text_element(handle);
            for child in children(handle) {
                write_verbatim(out, &child, raw)?;
            }
            write_close_tag(out, handle)
        }
        NodeData::Comment { contents } => write!(out, "<!--{}-->", &**contents),
        NodeData::Document | NodeData::Doctype { .. } => {
            for child in children(handle) {
                write_verbatim(out, &child, raw)?;
            }
            Ok(())
        }
        NodeData::ProcessingInstruction { .. } => Ok(()),
    }
}

/// `true` if the parser would swallow the first line break of the content.
fn starts_with_newline(kids: &[Handle]) -> bool {
    kids.first().is_some_and(|first| match &first.data {
        NodeData::Text { contents } => contents.borrow().starts_with('\n'),
        _ => false,
    })
}

impl<W: Write> Printer<W> {
    pub(super) fn print_verbatim(&mut self, handle: &Handle, level: usize) -> io::Result<()> {
        self.indent(level)?;
        write_open_tag(&mut self.out, handle)?;
        let kids = children(handle);
        if starts_with_newline(&kids) {
            self.out.write_all(b"\n")?;
        }
        for child in &kids {
            write_verbatim(&mut self.out, child, false)?;
        }
        write_close_tag(&mut self.out, handle)?;
        self.out.write_all(b"\n")
    }
}
