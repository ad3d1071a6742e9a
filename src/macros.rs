//! Helper macros used across the crate.

/// Lazily compile a [`Regex`](regex::Regex) with a custom panic message.
///
/// The caller must have `LazyLock` and `Regex` in scope.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
///
/// use regex::Regex;
/// static TAG: LazyLock<Regex> = htmlfmt::lazy_regex!(r"</?\w+", "tag pattern");
/// assert!(TAG.is_match("<p>"));
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($pattern:expr, $msg:expr $(,)?) => {
        LazyLock::new(|| Regex::new($pattern).expect($msg))
    };
}
