//! Node classification for the tree printer.
//!
//! Every element is mapped to exactly one [`Layout`] so the printer can
//! dispatch once instead of re-testing predicates at each call site. Only
//! elements in the HTML namespace receive special layouts; SVG and `MathML`
//! content is printed with the default rules.

use markup5ever_rcdom::{Handle, NodeData};

pub(crate) const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Tags with no closing tag and no children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "command", "embed", "frame", "hr", "img",
    "input", "keygen", "link", "meta", "param", "source", "track", "wbr",
];

/// Tags whose subtree is written exactly as parsed.
const VERBATIM_ELEMENTS: &[&str] = &["pre", "listing", "textarea"];

/// Tags whose text content is neither escaped nor wrapped.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "style", "script", "noscript", "xmp", "iframe", "noembed", "noframes",
];

/// Tags whose content is word-wrapped as a paragraph.
const BLOCK_LIKE_ELEMENTS: &[&str] = &["p", "caption", "figcaption"];

/// Layout category of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// No closing tag, no children.
    Void,
    /// Subtree reproduced byte for byte.
    Verbatim,
    /// Text content re-indented line by line but never escaped.
    RawText,
    /// Content handed to the word wrapper.
    BlockLike,
    /// Script loaded from a `src` attribute; printed on one line.
    ExternalSourced,
    Default,
}

impl Layout {
    /// Classify `handle`. Non-element nodes are [`Layout::Default`].
    #[must_use]
    pub fn of(handle: &Handle) -> Self {
        let NodeData::Element { name, attrs, .. } = &handle.data else {
            return Self::Default;
        };
        if &*name.ns != HTML_NAMESPACE {
            return Self::Default;
        }
        let tag = &*name.local;
        if VERBATIM_ELEMENTS.contains(&tag) {
            Self::Verbatim
        } else if BLOCK_LIKE_ELEMENTS.contains(&tag) {
            Self::BlockLike
        } else if VOID_ELEMENTS.contains(&tag) {
            Self::Void
        } else if tag == "script" && attrs.borrow().iter().any(|attr| &*attr.name.local == "src") {
            Self::ExternalSourced
        } else if RAW_TEXT_ELEMENTS.contains(&tag) {
            Self::RawText
        } else {
            Self::Default
        }
    }
}

/// `true` for HTML elements that never take a closing tag.
#[must_use]
pub fn is_void_element(handle: &Handle) -> bool { Layout::of(handle) == Layout::Void }

/// `true` for elements whose text children are written unescaped.
#[must_use]
pub fn is_raw_text_element(handle: &Handle) -> bool {
    matches!(Layout::of(handle), Layout::RawText | Layout::ExternalSourced)
}

/// `true` for the `<html>` element sitting directly below the document.
///
/// Its children are not indented.
#[must_use]
pub fn is_root_element(handle: &Handle, parent: Option<&Handle>) -> bool {
    let is_html = matches!(
        &handle.data,
        NodeData::Element { name, .. } if &*name.local == "html" && &*name.ns == HTML_NAMESPACE
    );
    is_html && parent.is_some_and(|p| matches!(p.data, NodeData::Document))
}

/// Children of `handle` in document order.
///
/// A `<template>` exposes the children of its content fragment.
#[must_use]
pub fn children(handle: &Handle) -> Vec<Handle> {
    if let NodeData::Element {
        template_contents, ..
    } = &handle.data
        && let Some(contents) = template_contents.borrow().as_ref()
    {
        return contents.children.borrow().clone();
    }
    handle.children.borrow().clone()
}

/// `true` if `handle` has exactly one child and that child is text.
#[must_use]
pub fn has_single_text_child(handle: &Handle) -> bool {
    let kids = children(handle);
    matches!(kids.as_slice(), [only] if matches!(only.data, NodeData::Text { .. }))
}

/// Unicode general category P for the Latin and CJK punctuation blocks.
#[must_use]
pub fn is_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '!' | '"' | '#' | '%' | '&' | '\'' | '(' | ')' | '*' | ',' | '-' | '.' | '/' | ':' | ';'
            | '?' | '@' | '[' | '\\' | ']' | '_' | '{' | '}'
            | '\u{a1}' | '\u{a7}' | '\u{ab}' | '\u{b6}' | '\u{b7}' | '\u{bb}' | '\u{bf}'
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{2043}'
            | '\u{2045}'..='\u{2051}'
            | '\u{2053}'..='\u{205e}'
            | '\u{3001}'..='\u{3003}'
            | '\u{3008}'..='\u{3011}'
    )
}

#[must_use]
pub fn starts_with_punctuation(text: &str) -> bool { text.chars().next().is_some_and(is_punctuation) }

/// Glue rule: `true` if `next` is text beginning with punctuation, so the
/// closing tag before it must not be followed by a line break.
#[must_use]
pub fn glues_to_next(next: Option<&Handle>) -> bool {
    next.is_some_and(|node| match &node.data {
        NodeData::Text { contents } => starts_with_punctuation(&contents.borrow()),
        _ => false,
    })
}
