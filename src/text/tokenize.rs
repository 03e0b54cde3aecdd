use std::sync::OnceLock;

use regex::Regex;

use crate::text::LineEndings;

fn word_pattern() -> &'static Regex {
    static WORDS: OnceLock<Regex> = OnceLock::new();
    WORDS.get_or_init(|| Regex::new(r"[\w\d]+|\s+|.").expect("word pattern compiles"))
}

fn newline_pattern() -> &'static Regex {
    static NEWLINES: OnceLock<Regex> = OnceLock::new();
    NEWLINES.get_or_init(|| Regex::new(r"\r\n|\r|\n").expect("newline pattern compiles"))
}

/// Splits text into words, whitespace runs and single other characters.
///
/// Nothing is dropped: concatenating the tokens yields the input again.
///
/// ```rust
/// use resemble::text::split_words;
///
/// let tokens = split_words("teas, beers").collect::<Vec<_>>();
/// assert_eq!(tokens, vec!["teas", ",", " ", "beers"]);
/// ```
pub fn split_words(s: &str) -> impl Iterator<Item = &str> {
    word_pattern().find_iter(s).map(|m| m.as_str())
}

/// Splits text into lines according to `line_endings`.
///
/// A trailing line terminator produces a trailing empty line and the
/// empty string is a single empty line, mirroring [`str::split`].
pub fn split_lines(s: &str, line_endings: LineEndings) -> Vec<&str> {
    match line_endings {
        LineEndings::Preserve => s.split('\n').collect(),
        LineEndings::Normalize => newline_pattern().split(s).collect(),
    }
}

/// Splits text at unicode word boundaries.
///
/// This requires the `unicode` feature.
#[cfg(feature = "unicode")]
pub fn split_unicode_words(s: &str) -> impl Iterator<Item = &str> {
    unicode_segmentation::UnicodeSegmentation::split_word_bounds(s)
}

/// Splits text into extended grapheme clusters.
///
/// This requires the `unicode` feature.
#[cfg(feature = "unicode")]
pub fn split_graphemes(s: &str) -> impl Iterator<Item = &str> {
    unicode_segmentation::UnicodeSegmentation::graphemes(s, true)
}

#[test]
fn test_split_words() {
    assert_eq!(
        split_words("foo    bar_1 baz\n\n  aha!?").collect::<Vec<_>>(),
        ["foo", "    ", "bar_1", " ", "baz", "\n\n  ", "aha", "!", "?"]
    );
    assert_eq!(split_words("").count(), 0);
}

#[test]
fn test_split_words_is_lossless() {
    for text in [
        "Soft drinks, coffees, teas, beers, and ginger ales",
        "  Hola Pedro\r\nQue tal\n",
        "größe: 10€ — ok?",
        "\t\n",
    ] {
        assert_eq!(split_words(text).collect::<String>(), text);
    }
}

#[test]
fn test_split_lines() {
    assert_eq!(
        split_lines("first\nsecond\rthird\r\nlast\n", LineEndings::Preserve),
        vec!["first", "second\rthird\r", "last", ""]
    );
    assert_eq!(
        split_lines("first\nsecond\rthird\r\nlast\n", LineEndings::Normalize),
        vec!["first", "second", "third", "last", ""]
    );
    assert_eq!(split_lines("", LineEndings::Preserve), vec![""]);
    assert_eq!(split_lines("", LineEndings::Normalize), vec![""]);
}

#[test]
#[cfg(feature = "unicode")]
fn test_split_unicode() {
    assert_eq!(
        split_unicode_words("Hello, wörld!").collect::<Vec<_>>(),
        vec!["Hello", ",", " ", "wörld", "!"]
    );
    assert_eq!(
        split_graphemes("e\u{301}a").collect::<Vec<_>>(),
        vec!["e\u{301}", "a"]
    );
}
