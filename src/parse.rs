//! Adapters around the `html5ever` parser.
//!
//! Both entry points read UTF-8 from any [`Read`] and build an
//! [`RcDom`]. Parsing is error-recovering: structural problems are repaired
//! by the tree builder and only logged. Byte sequences that are not valid
//! UTF-8 are replaced with U+FFFD. The only failures are I/O errors from the
//! reader.

use std::io::{self, Read};

use html5ever::{
    LocalName, Namespace, QualName, driver::ParseOpts, parse_document as parse_html_document,
    parse_fragment as parse_html_fragment, tendril::TendrilSink,
};
use markup5ever_rcdom::{Handle, RcDom};
use tracing::debug;

use crate::classify::HTML_NAMESPACE;

fn log_recovered_errors(dom: &RcDom) {
    for error in &dom.errors {
        debug!(%error, "recovered parse error");
    }
}

/// Parse a complete document. The returned handle is the Document node.
///
/// # Errors
/// Returns an error if reading `input` fails.
pub fn parse_document<R: Read>(mut input: R) -> io::Result<Handle> {
    let dom = parse_html_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(&mut input)?;
    log_recovered_errors(&dom);
    Ok(dom.document)
}

/// Parse a fragment in a `<body>` context and return its top-level nodes.
///
/// The parser never synthesizes `html`, `head` or `body` around the
/// fragment.
///
/// # Errors
/// Returns an error if reading `input` fails.
pub fn parse_fragment<R: Read>(mut input: R) -> io::Result<Vec<Handle>> {
    let context = QualName::new(
        None,
        Namespace::from(HTML_NAMESPACE),
        LocalName::from("body"),
    );
    let dom = parse_html_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .from_utf8()
        .read_from(&mut input)?;
    log_recovered_errors(&dom);
    // The tree builder places the fragment under a synthetic `html` element.
    // Its children are moved out: dropping the dom empties every node it
    // still owns.
    let root = dom.document.children.borrow().first().cloned();
    Ok(root.map_or_else(Vec::new, |html| std::mem::take(&mut *html.children.borrow_mut())))
}
