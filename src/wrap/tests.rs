//! Unit tests for the unit lexer and the word wrapper.
//!
//! The cases cover greedy filling, explicit line breaks, non-breaking spaces,
//! overlong words, first-line offsets and indentation.

use std::io::Write;

use rstest::rstest;

use super::{Unit, WordWrapper, WrapOptions, units, wrap_string};

fn wrap(input: &str, limit: usize, starts_at: usize, indentation: &str) -> String {
    let mut out = Vec::new();
    wrap_string(
        input,
        &mut out,
        WrapOptions {
            limit,
            starts_at,
            indentation: indentation.to_string(),
        },
    )
    .expect("writing to a Vec cannot fail");
    String::from_utf8(out).expect("wrapped output is UTF-8")
}

#[rstest]
#[case::single_word("foo", &[Unit::Word("foo")])]
#[case::words_and_space("foo bar", &[Unit::Word("foo"), Unit::Spaces(" "), Unit::Word("bar")])]
#[case::newline_then_spaces(
    "\nfoo\n  bar",
    &[Unit::NewLine, Unit::Word("foo"), Unit::NewLine, Unit::Spaces("  "), Unit::Word("bar")]
)]
#[case::nbsp_is_word_content(
    "foo bar\u{a0}baz",
    &[Unit::Word("foo"), Unit::Spaces(" "), Unit::Word("bar\u{a0}baz")]
)]
#[case::newlines_never_merge(
    "foo\n\nbar",
    &[Unit::Word("foo"), Unit::NewLine, Unit::NewLine, Unit::Word("bar")]
)]
#[case::mixed_whitespace_merges("a \t b", &[Unit::Word("a"), Unit::Spaces(" \t "), Unit::Word("b")])]
#[case::empty("", &[])]
fn lexes_units(#[case] input: &str, #[case] expected: &[Unit<'_>]) {
    let got: Vec<Unit<'_>> = units(input).collect();
    assert_eq!(got, expected);
}

#[test]
fn unit_width_counts_code_points() {
    assert_eq!(Unit::Word("人間").width(), 2);
    assert_eq!(Unit::Spaces("\t ").width(), 2);
    assert_eq!(Unit::NewLine.width(), 0);
}

#[rstest]
#[case::single_word_passes_through("foo", "foo", 4)]
#[case::overlong_word_is_not_broken("foobarbaz", "foobarbaz", 4)]
#[case::breaks_at_whitespace("foo bar baz", "foo\nbar\nbaz", 4)]
#[case::words_fill_a_line("foo bar baz", "foo bar\nbaz", 7)]
#[case::trailing_space_not_counted("foo bar baz", "foo bar\nbaz", 8)]
#[case::long_words_still_break_at_whitespace("foo bars bazzes", "foo\nbars\nbazzes", 4)]
#[case::word_running_past_width_moves_down("fo sop", "fo\nsop", 4)]
#[case::nbsp_does_not_break("foo bar\u{a0}baz", "foo\nbar\u{a0}baz", 10)]
#[case::whitespace_after_explicit_break_kept("foo\nb\t r\n baz", "foo\nb\t r\n baz", 4)]
#[case::whitespace_at_breaks_dropped("foo    \nb   ar   ", "foo\nb\nar", 4)]
#[case::trailing_explicit_break_kept("foo bar baz\n", "foo\nbar\nbaz\n", 4)]
#[case::explicit_breaks_always_kept("\nfoo bar\n\n\nbaz\n", "\nfoo\nbar\n\n\nbaz\n", 4)]
#[case::spaces_after_newline_fill_line("\n\n foo\n\n\t bar", "\n\n foo\n\n\t bar", 4)]
#[case::list_like_text(
    " This is a list: \n\n\t* foo\n\t* bar\n\n\n\t* baz  \nBAM    ",
    " This\nis a\nlist:\n\n\t* foo\n\t* bar\n\n\n\t* baz\nBAM",
    6
)]
#[case::multi_byte_characters("\u{2584} \u{2584} \u{2584} \u{2584} ", "\u{2584} \u{2584}\n\u{2584} \u{2584}", 4)]
#[case::wide_characters_count_as_one("aa 人間 cc dd ee ff gg", "aa 人間\ncc dd\nee ff\ngg", 5)]
#[case::long_text(
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Cras in blandit odio, eget gravida \
     eros. In tincidunt, dolor nec blandit elementum, lacus metus semper lacus, id elementum augue \
     ipsum in est. Vivamus tempor orci eget augue faucibus efficitur.",
    "Lorem ipsum dolor sit amet, consectetur adipiscing elit. Cras in blandit odio, eget gravida \
     eros. In\ntincidunt, dolor nec blandit elementum, lacus metus semper lacus, id elementum \
     augue ipsum in est.\nVivamus tempor orci eget augue faucibus efficitur.",
    100
)]
fn wraps_plain_text(#[case] input: &str, #[case] expected: &str, #[case] limit: usize) {
    assert_eq!(wrap(input, limit, 0, ""), expected);
}

#[rstest]
#[case::start_column_shortens_first_line("aa bb cc dd ee ff gg", "aa\nbb cc\ndd ee\nff gg", 2, "")]
#[case::indentation_on_every_line(
    "aa bb cc dd ee ff gg",
    "  aa bb\n  cc dd\n  ee ff\n  gg",
    0,
    "  "
)]
#[case::start_column_skips_first_indent(
    "aa bb cc dd ee ff gg",
    "aa\nxxbb cc\nxxdd ee\nxxff gg",
    2,
    "xx"
)]
fn wraps_with_offsets(
    #[case] input: &str,
    #[case] expected: &str,
    #[case] starts_at: usize,
    #[case] indentation: &str,
) {
    assert_eq!(wrap(input, 5, starts_at, indentation), expected);
}

#[test]
fn blank_lines_are_not_indented() {
    assert_eq!(wrap("foo\n\nbar", 10, 0, "  "), "  foo\n\n  bar");
}

#[test]
fn adjacent_word_units_are_glued() {
    let mut out = Vec::new();
    let mut wrapper = WordWrapper::new(
        &mut out,
        WrapOptions {
            limit: 5,
            starts_at: 2,
            indentation: "xx".to_string(),
        },
    );
    let feed = [
        Unit::Word("aa"),
        Unit::Spaces("  "),
        Unit::Word("bb"),
        Unit::Spaces(" "),
        Unit::Word("cc"),
        Unit::Spaces(" "),
        Unit::Word("dd"),
        Unit::Spaces(" "),
        Unit::Word("ee"),
        Unit::Spaces(" "),
        Unit::Word("ff"),
        Unit::Spaces(" "),
        Unit::Word("gg"),
        Unit::Spaces(" "),
        Unit::Word("hh"),
        Unit::Word("ii"),
        Unit::Spaces(" "),
        Unit::Word("jj"),
        Unit::Word("kk"),
        Unit::Word("ll"),
        Unit::Spaces(" "),
        Unit::Word("mm"),
        Unit::Spaces(" "),
        Unit::Word("nn"),
        Unit::Word("oo"),
    ];
    for unit in feed {
        wrapper.add_unit(unit).expect("writing to a Vec cannot fail");
    }
    wrapper.final_flush().expect("writing to a Vec cannot fail");
    assert_eq!(
        String::from_utf8(out).expect("wrapped output is UTF-8"),
        "aa\nxxbb cc\nxxdd ee\nxxff gg\nxxhhii\nxxjjkkll\nxxmm\nxxnnoo"
    );
}

#[test]
fn soft_break_allows_break_without_space() {
    let mut out = Vec::new();
    let mut wrapper = WordWrapper::new(
        &mut out,
        WrapOptions {
            limit: 8,
            ..WrapOptions::default()
        },
    );
    wrapper.add_unit(Unit::Word("<img")).expect("vec write");
    wrapper.add_unit(Unit::Spaces(" ")).expect("vec write");
    wrapper.add_unit(Unit::Word("src=\"long\"")).expect("vec write");
    wrapper.soft_break().expect("vec write");
    wrapper.add_unit(Unit::Word(">")).expect("vec write");
    wrapper.wrap_str("ok").expect("vec write");
    wrapper.final_flush().expect("vec write");
    assert_eq!(
        String::from_utf8(out).expect("wrapped output is UTF-8"),
        "<img\nsrc=\"long\"\n>ok"
    );
}

#[test]
fn interrupt_ends_the_current_line() {
    let mut out = Vec::new();
    let mut wrapper = WordWrapper::new(
        &mut out,
        WrapOptions {
            limit: 20,
            starts_at: 0,
            indentation: "  ".to_string(),
        },
    );
    wrapper.wrap_str("before ").expect("vec write");
    wrapper
        .interrupt()
        .and_then(|sink| sink.write_all(b"  <!-- note -->\n"))
        .expect("vec write");
    wrapper.wrap_str(" after").expect("vec write");
    wrapper.final_flush().expect("vec write");
    assert_eq!(
        String::from_utf8(out).expect("wrapped output is UTF-8"),
        "  before\n  <!-- note -->\n  after"
    );
}

#[test]
fn lines_never_exceed_limit_except_for_overlong_words() {
    let text = "a bb ccc dddd eeeee ffffff ggggggggggggggg h ii jjj";
    let out = wrap(text, 7, 0, "");
    for line in out.lines() {
        let width = line.chars().count();
        assert!(width <= 7 || !line.contains(' '), "line {line:?} is too wide");
    }
    assert_eq!(out.split_whitespace().collect::<Vec<_>>(), text.split_whitespace().collect::<Vec<_>>());
}
