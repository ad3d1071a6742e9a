//! Escaping of text and attribute values for re-serialization.
//!
//! The parser hands over decoded character data, so everything that could be
//! mistaken for markup must be escaped again on the way out. Raw-text element
//! content (`<style>`, `<script>`, ...) is written without escaping.

use std::borrow::Cow;

fn escape_with(input: &str, needs_escape: fn(char) -> bool, entity: fn(char) -> &'static str) -> Cow<'_, str> {
    if !input.contains(needs_escape) {
        return Cow::Borrowed(input);
    }
    let mut out = String::with_capacity(input.len() + 8);
    for ch in input.chars() {
        if needs_escape(ch) {
            out.push_str(entity(ch));
        } else {
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

/// Escape character data for use between tags.
///
/// ```
/// assert_eq!(htmlfmt::escape::escape_text("a < b & c"), "a &lt; b &amp; c");
/// ```
#[must_use]
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape_with(
        input,
        |ch| matches!(ch, '&' | '<' | '>'),
        |ch| match ch {
            '&' => "&amp;",
            '<' => "&lt;",
            _ => "&gt;",
        },
    )
}

/// Escape an attribute value for use inside double quotes.
///
/// ```
/// assert_eq!(htmlfmt::escape::escape_attribute(r#"say "hi" & go"#), "say &quot;hi&quot; &amp; go");
/// ```
#[must_use]
pub fn escape_attribute(input: &str) -> Cow<'_, str> {
    escape_with(
        input,
        |ch| matches!(ch, '&' | '"'),
        |ch| if ch == '&' { "&amp;" } else { "&quot;" },
    )
}
