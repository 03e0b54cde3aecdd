//! Text diffing utilities.
//!
//! This builds on the [`Engine`] to diff text at different granularities.
//! The main type you want to work with is [`TextDiffer`] which diffs
//! characters, words and lines and can combine them: [`TextDiffer::diff_text`]
//! diffs the lines of two texts and re-diffs changed lines that resemble
//! each other at the word level.
//!
//! Text diffing is available by default but can be disabled by turning off the
//! default features.  The feature to enable to get it back is `text`.
//!
//! # Examples
//!
//! ```rust
//! use resemble::text::TextDiffer;
//!
//! let mut differ = TextDiffer::new();
//! let words = differ.diff_words("fresh coffee", "fresh tea");
//! let rendered = words.iter().map(|pair| pair.to_string()).collect::<String>();
//! assert_eq!(rendered, "fresh -coffee+tea");
//! ```
//!
//! # Missing text
//!
//! All text entry points accept either a `&str` or an `Option<&str>`.
//! `None` is treated like the empty string, diffing against nothing is a
//! perfectly valid operation.
//!
//! # Line pairing
//!
//! Lines are diffed with the recursive differ first.  Every run of changed
//! lines is then split into its removed and added lines and those are
//! paired up with a weighted edit script: adding or removing a line costs
//! its length in characters, turning one line into another costs the
//! character distance of the two lines times the configured
//! [substitution weight](TextDiffConfig::substitution_weight).  Lines
//! paired up that way are reported as one equal line carrying a word
//! level diff, all others are reported as whole line additions or
//! removals.
#![cfg(feature = "text")]
use std::cmp::Reverse;
use std::collections::BinaryHeap;

mod tokenize;

pub use self::tokenize::{split_lines, split_words};
#[cfg(feature = "unicode")]
pub use self::tokenize::{split_graphemes, split_unicode_words};

use crate::utils::group_when_changed;
use crate::{Choice, CommonRun, DiffAction, DiffPair, Engine, SeqView};

/// How line terminators are treated when splitting text into lines.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineEndings {
    /// Split on `\n` only.  A preceding `\r` stays part of the line, so
    /// `\r\n` and `\n` terminated lines compare as different.
    #[default]
    Preserve,
    /// Split on `\r\n`, `\r` and `\n` alike and drop the terminators.
    Normalize,
}

/// A line of a text diff: the line's action and its word level diff.
///
/// Whole line additions and removals carry a single pair with the full
/// line.  Lines present on both sides carry the word diff between the
/// old and the new line (or a single equal pair if they are identical).
pub type LineDiff<'s> = DiffPair<Vec<DiffPair<&'s str>>>;

/// A builder type config for [`TextDiffer`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextDiffConfig {
    line_endings: LineEndings,
    substitution_weight: usize,
}

impl Default for TextDiffConfig {
    fn default() -> TextDiffConfig {
        TextDiffConfig {
            line_endings: LineEndings::default(),
            substitution_weight: 2,
        }
    }
}

impl TextDiffConfig {
    /// Changes how lines are split.
    ///
    /// The default is [`LineEndings::Preserve`].
    pub fn line_endings(&mut self, line_endings: LineEndings) -> &mut Self {
        self.line_endings = line_endings;
        self
    }

    /// Changes the factor applied to the character distance of two lines
    /// when deciding whether to pair them up.
    ///
    /// The default is `2`.  Lower values pair up less similar lines, higher
    /// values make whole line additions and removals more likely.
    pub fn substitution_weight(&mut self, weight: usize) -> &mut Self {
        self.substitution_weight = weight;
        self
    }

    /// Creates a differ with this configuration.
    pub fn build(&self) -> TextDiffer {
        TextDiffer {
            config: self.clone(),
            engine: Engine::new(),
            scratch: Engine::new(),
        }
    }
}

fn or_empty<'s>(text: impl Into<Option<&'s str>>) -> &'s str {
    text.into().unwrap_or("")
}

fn to_chars(text: &str) -> Vec<char> {
    text.chars().collect()
}

/// Prices the pairing of removed and added lines.
fn line_cost(engine: &mut Engine, choice: Choice<&str>, weight: usize) -> usize {
    match choice {
        Choice::Equal(_) => 0,
        Choice::Add(line) | Choice::Remove(line) => line.chars().count(),
        Choice::Substitute(old, new) => weight * engine.levenshtein(&to_chars(old), &to_chars(new)),
        // moving the earlier line below the later one
        Choice::Transpose(_, moved) => 2 * moved.chars().count(),
    }
}

/// Diffs text at the character, word and line level.
///
/// A differ owns two [`Engine`]s and reuses their tables across calls.
/// Like the engine it needs `&mut self` for every operation, keep one
/// differ per thread.
#[derive(Debug, Clone)]
pub struct TextDiffer {
    config: TextDiffConfig,
    engine: Engine,
    scratch: Engine,
}

impl Default for TextDiffer {
    fn default() -> TextDiffer {
        TextDiffConfig::default().build()
    }
}

impl TextDiffer {
    /// Creates a differ with the default configuration.
    pub fn new() -> TextDiffer {
        TextDiffer::default()
    }

    /// Configures a text differ.
    pub fn configure() -> TextDiffConfig {
        TextDiffConfig::default()
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TextDiffConfig {
        &self.config
    }

    /// Character level Levenshtein distance.
    pub fn levenshtein<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> usize {
        self.engine
            .levenshtein(&to_chars(or_empty(old)), &to_chars(or_empty(new)))
    }

    /// Character level similarity in the range `0..=1`.
    ///
    /// ```rust
    /// # use resemble::text::TextDiffer;
    /// let mut differ = TextDiffer::new();
    /// assert_eq!(differ.similarity("abcd", "abce"), 0.75);
    /// ```
    pub fn similarity<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> f64 {
        self.engine
            .similarity(&to_chars(or_empty(old)), &to_chars(or_empty(new)))
    }

    /// Character level edit script.
    pub fn choices<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> Vec<Choice<char>> {
        let old = to_chars(or_empty(old));
        let new = to_chars(or_empty(new));
        self.engine
            .choices(&old, &new)
            .into_iter()
            .map(Choice::copied)
            .collect()
    }

    /// Longest run of characters shared by both texts.
    ///
    /// Start positions are counted in characters.
    pub fn longest_common_substring<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> CommonRun {
        self.engine
            .longest_common_substring(&to_chars(or_empty(old)), &to_chars(or_empty(new)))
    }

    /// Length of the longest common character subsequence.
    pub fn longest_common_subsequence<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> usize {
        self.engine
            .longest_common_subsequence(&to_chars(or_empty(old)), &to_chars(or_empty(new)))
    }

    /// Diffs the characters of two texts.
    pub fn diff_chars<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> Vec<DiffPair<char>> {
        let old = to_chars(or_empty(old));
        let new = to_chars(or_empty(new));
        self.engine
            .diff(&old, &new)
            .into_iter()
            .map(DiffPair::copied)
            .collect()
    }

    /// Diffs the words of two texts.
    ///
    /// See [`split_words`] for how text is tokenized.
    pub fn diff_words<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> Vec<DiffPair<&'s str>> {
        let old = split_words(or_empty(old)).collect::<Vec<_>>();
        let new = split_words(or_empty(new)).collect::<Vec<_>>();
        self.diff_tokens(&old, &new)
    }

    /// Diffs two texts split at unicode word boundaries.
    ///
    /// This requires the `unicode` feature.
    #[cfg(feature = "unicode")]
    pub fn diff_unicode_words<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> Vec<DiffPair<&'s str>> {
        let old = split_unicode_words(or_empty(old)).collect::<Vec<_>>();
        let new = split_unicode_words(or_empty(new)).collect::<Vec<_>>();
        self.diff_tokens(&old, &new)
    }

    /// Diffs the grapheme clusters of two texts.
    ///
    /// This requires the `unicode` feature.
    #[cfg(feature = "unicode")]
    pub fn diff_graphemes<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> Vec<DiffPair<&'s str>> {
        let old = split_graphemes(or_empty(old)).collect::<Vec<_>>();
        let new = split_graphemes(or_empty(new)).collect::<Vec<_>>();
        self.diff_tokens(&old, &new)
    }

    /// Diffs the lines of two texts without any refinement.
    pub fn diff_lines<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> Vec<DiffPair<&'s str>> {
        let old = split_lines(or_empty(old), self.config.line_endings);
        let new = split_lines(or_empty(new), self.config.line_endings);
        self.diff_tokens(&old, &new)
    }

    /// Diffs two texts line by line, refining changed lines to word diffs.
    ///
    /// Unchanged lines come back as equal lines with a single equal pair.
    /// Within every run of changed lines the removed and added lines are
    /// paired up (see the [module documentation](self#line-pairing));
    /// paired lines come back as equal lines carrying their word diff.
    ///
    /// ```rust
    /// # use resemble::text::TextDiffer;
    /// # use resemble::DiffAction;
    /// let mut differ = TextDiffer::new();
    /// let lines = differ.diff_text("Hola Pedro\nAdios", "Hola Pedri\nAdios");
    /// assert_eq!(lines.len(), 2);
    /// assert_eq!(lines[0].action(), DiffAction::Equal);
    /// let words = lines[0].value().iter().map(|w| w.to_string()).collect::<String>();
    /// assert_eq!(words, "Hola -Pedro+Pedri");
    /// ```
    pub fn diff_text<'s>(
        &mut self,
        old: impl Into<Option<&'s str>>,
        new: impl Into<Option<&'s str>>,
    ) -> Vec<LineDiff<'s>> {
        let lines = self.diff_lines(old, new);
        let mut rv = Vec::with_capacity(lines.len());

        for group in group_when_changed(lines, |pair| pair.action() == DiffAction::Equal) {
            if group.key {
                rv.extend(
                    group
                        .items
                        .into_iter()
                        .map(|pair| DiffPair::new(DiffAction::Equal, vec![pair])),
                );
            } else {
                self.pair_changed_lines(group.items, &mut rv);
            }
        }

        rv
    }

    fn diff_tokens<'s>(&mut self, old: &[&'s str], new: &[&'s str]) -> Vec<DiffPair<&'s str>> {
        self.engine
            .diff(old, new)
            .into_iter()
            .map(DiffPair::copied)
            .collect()
    }

    fn pair_changed_lines<'s>(&mut self, lines: Vec<DiffPair<&'s str>>, rv: &mut Vec<LineDiff<'s>>) {
        let mut removed = Vec::new();
        let mut added = Vec::new();
        for line in lines {
            match line.action() {
                DiffAction::Removed => removed.push(line.into_value()),
                DiffAction::Added => added.push(line.into_value()),
                DiffAction::Equal => {}
            }
        }
        log::debug!(
            "pairing {} removed with {} added lines",
            removed.len(),
            added.len()
        );

        let weight = self.config.substitution_weight;
        let scratch = &mut self.scratch;
        let choices = self
            .engine
            .choices_by(
                SeqView::full(&removed),
                SeqView::full(&added),
                |a, b| a == b,
                |choice| line_cost(scratch, choice.copied(), weight),
                false,
            )
            .into_iter()
            .map(Choice::copied)
            .collect::<Vec<_>>();

        for choice in choices {
            self.push_line_choice(choice, rv);
        }
    }

    fn push_line_choice<'s>(&mut self, choice: Choice<&'s str>, rv: &mut Vec<LineDiff<'s>>) {
        match choice {
            Choice::Add(line) => rv.push(whole_line(DiffAction::Added, line)),
            Choice::Remove(line) => rv.push(whole_line(DiffAction::Removed, line)),
            Choice::Equal(line) => rv.push(whole_line(DiffAction::Equal, line)),
            Choice::Substitute(old, new) => {
                rv.push(DiffPair::new(DiffAction::Equal, self.diff_words(old, new)))
            }
            // both lines exist on either side, the earlier old line moved down
            Choice::Transpose(first, second) => {
                rv.push(whole_line(DiffAction::Removed, second));
                rv.push(whole_line(DiffAction::Equal, first));
                rv.push(whole_line(DiffAction::Added, second));
            }
        }
    }
}

fn whole_line(action: DiffAction, line: &str) -> LineDiff<'_> {
    DiffPair::new(action, vec![DiffPair::new(action, line)])
}

/// Shortcut for [`TextDiffer::diff_chars`] with a fresh differ.
pub fn diff_chars<'s>(
    old: impl Into<Option<&'s str>>,
    new: impl Into<Option<&'s str>>,
) -> Vec<DiffPair<char>> {
    TextDiffer::new().diff_chars(old, new)
}

/// Shortcut for [`TextDiffer::diff_words`] with a fresh differ.
pub fn diff_words<'s>(
    old: impl Into<Option<&'s str>>,
    new: impl Into<Option<&'s str>>,
) -> Vec<DiffPair<&'s str>> {
    TextDiffer::new().diff_words(old, new)
}

/// Shortcut for [`TextDiffer::diff_text`] with a fresh differ.
pub fn diff_text<'s>(
    old: impl Into<Option<&'s str>>,
    new: impl Into<Option<&'s str>>,
) -> Vec<LineDiff<'s>> {
    TextDiffer::new().diff_text(old, new)
}

/// Use the character similarity to find `n` close matches.
///
/// `cutoff` defines the threshold which needs to be reached for a word
/// to be considered similar.  See [`TextDiffer::similarity`] for more
/// information.
///
/// ```
/// # use resemble::text::get_close_matches;
/// let matches = get_close_matches(
///     "appel",
///     &["ape", "apple", "peach", "puppy"][..],
///     3,
///     0.5
/// );
/// assert_eq!(matches, vec!["ape", "apple"]);
/// ```
pub fn get_close_matches<'a>(
    word: &str,
    possibilities: &[&'a str],
    n: usize,
    cutoff: f64,
) -> Vec<&'a str> {
    let mut engine = Engine::new();
    let mut matches = BinaryHeap::new();
    let word = to_chars(word);

    for &possibility in possibilities {
        let ratio = engine.similarity(&word, &to_chars(possibility));
        if ratio >= cutoff {
            // the word itself goes in reversed so that matches with the
            // same ratio are ordered lexicographically.
            matches.push(((ratio * u32::MAX as f64) as u32, Reverse(possibility)));
        }
    }

    let mut rv = vec![];
    for _ in 0..n {
        if let Some((_, elt)) = matches.pop() {
            rv.push(elt.0);
        } else {
            break;
        }
    }

    rv
}

#[cfg(test)]
fn render_words<T: std::fmt::Display>(pairs: &[DiffPair<T>]) -> String {
    pairs.iter().map(|pair| pair.to_string()).collect()
}

#[cfg(test)]
fn render_text(lines: &[LineDiff<'_>]) -> String {
    lines
        .iter()
        .map(|line| {
            let marker = match line.action() {
                DiffAction::Added => "[+]",
                DiffAction::Removed => "[-]",
                DiffAction::Equal => "[=]",
            };
            format!("{}{}", marker, render_words(line.value()))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_diff_chars() {
    let pairs = diff_chars("en un lugar de la mancha", "in un place de la mincha");
    insta::assert_snapshot!(render_words(&pairs), @"-e+in un +pl-u-ga-r+c+e de la m-a+incha");
}

#[test]
fn test_diff_words() {
    let pairs = diff_words(
        "Soft drinks, coffees, teas, beers, and ginger ales",
        "Soft drinks, coffees, teas and beers",
    );
    insta::assert_snapshot!(
        render_words(&pairs),
        @"Soft drinks, coffees, teas-,- -beers-, and -ginger- -ales+beers"
    );
}

#[test]
fn test_diff_text() {
    let old = "  Hola Pedro\nQue tal\nBien\n\nAdios Juan";
    let new = "  Hola Pedri\n\nQue til\nAdios Juani";
    insta::assert_snapshot!(render_text(&diff_text(old, new)), @r###"
    [=]  Hola -Pedro+Pedri
    [-]-Que tal
    [-]-Bien
    [=]
    [+]+Que til
    [=]Adios -Juan+Juani
    "###);
}

#[test]
fn test_diff_text_structure() {
    let lines = diff_text("keep\nold line\n", "keep\nnew line\n");
    assert_eq!(
        lines,
        vec![
            DiffPair::new(
                DiffAction::Equal,
                vec![DiffPair::new(DiffAction::Equal, "keep")]
            ),
            DiffPair::new(
                DiffAction::Equal,
                vec![
                    DiffPair::new(DiffAction::Removed, "old"),
                    DiffPair::new(DiffAction::Added, "new"),
                    DiffPair::new(DiffAction::Equal, " "),
                    DiffPair::new(DiffAction::Equal, "line"),
                ]
            ),
            DiffPair::new(DiffAction::Equal, vec![DiffPair::new(DiffAction::Equal, "")]),
        ]
    );
}

#[test]
fn test_missing_text() {
    let mut differ = TextDiffer::new();
    assert_eq!(
        differ.diff_text(None::<&str>, None::<&str>),
        vec![DiffPair::new(
            DiffAction::Equal,
            vec![DiffPair::new(DiffAction::Equal, "")]
        )]
    );
    assert_eq!(render_words(&differ.diff_words(None::<&str>, "a b")), "+a+ +b");
    assert_eq!(render_words(&differ.diff_words("a b", None::<&str>)), "-a- -b");
    assert_eq!(differ.levenshtein(None::<&str>, "abc"), 3);
    assert_eq!(differ.longest_common_subsequence(Some("abc"), None::<&str>), 0);
}

#[test]
fn test_line_endings() {
    let old = "a\r\nb";
    let new = "a\nb";
    assert_eq!(
        render_text(&TextDiffer::new().diff_text(old, new)),
        "[=]a-\r\n[=]b"
    );

    let mut differ = TextDiffer::configure()
        .line_endings(LineEndings::Normalize)
        .build();
    assert_eq!(differ.config().line_endings, LineEndings::Normalize);
    assert_eq!(render_text(&differ.diff_text(old, new)), "[=]a\n[=]b");
}

#[test]
fn test_substitution_weight() {
    // with a prohibitive weight nothing gets paired up
    let mut differ = TextDiffer::configure().substitution_weight(100).build();
    let lines = differ.diff_text("cat", "bat");
    assert_eq!(render_text(&lines), "[+]+bat\n[-]-cat");

    let mut differ = TextDiffer::new();
    assert_eq!(render_text(&differ.diff_text("cat", "bat")), "[=]-cat+bat");
}

#[cfg(test)]
fn rebuild(lines: &[LineDiff<'_>]) -> (Vec<String>, Vec<String>) {
    let mut old = Vec::new();
    let mut new = Vec::new();
    for line in lines {
        let words = line.value();
        if line.action() != DiffAction::Added {
            old.push(
                words
                    .iter()
                    .filter(|w| w.is_old())
                    .map(|w| *w.value())
                    .collect::<String>(),
            );
        }
        if line.action() != DiffAction::Removed {
            new.push(
                words
                    .iter()
                    .filter(|w| w.is_new())
                    .map(|w| *w.value())
                    .collect::<String>(),
            );
        }
    }
    (old, new)
}

#[test]
fn test_text_round_trip() {
    let old = "one\ntwo three\nfour\n\nfive six";
    let new = "zero\ntwo thee\nfour\nsix\nfive  six";
    let (mut rebuilt_old, mut rebuilt_new) = rebuild(&diff_text(old, new));

    // unpaired removals may be reported after the additions of their run
    let mut expected_old = split_lines(old, LineEndings::Preserve);
    let mut expected_new = split_lines(new, LineEndings::Preserve);
    expected_old.sort_unstable();
    expected_new.sort_unstable();
    rebuilt_old.sort_unstable();
    rebuilt_new.sort_unstable();
    assert_eq!(rebuilt_old, expected_old);
    assert_eq!(rebuilt_new, expected_new);
}

#[test]
fn test_text_keeps_line_order() {
    let old = "keep\ntwo three\nfour\nfive six";
    let new = "keep\ntwo thee\nfour\nfive  six\nextra";
    let lines = diff_text(old, new);
    insta::assert_snapshot!(render_text(&lines), @r###"
    [=]keep
    [=]two -three+thee
    [=]four
    [=]five- +  six
    [+]+extra
    "###);

    let (rebuilt_old, rebuilt_new) = rebuild(&lines);
    assert_eq!(rebuilt_old, split_lines(old, LineEndings::Preserve));
    assert_eq!(rebuilt_new, split_lines(new, LineEndings::Preserve));
}

#[test]
fn test_transposed_lines() {
    let mut differ = TextDiffer::new();
    let mut lines = Vec::new();
    // old reads "b, a", new reads "a, b"
    differ.push_line_choice(Choice::Transpose("a", "b"), &mut lines);
    assert_eq!(render_text(&lines), "[-]-b\n[=]a\n[+]+b");
    let (old, new) = rebuild(&lines);
    assert_eq!(old, vec!["b", "a"]);
    assert_eq!(new, vec!["a", "b"]);

    let mut engine = Engine::new();
    assert_eq!(line_cost(&mut engine, Choice::Transpose("a", "bcd"), 2), 6);
}

#[test]
fn test_string_helpers() {
    let mut differ = TextDiffer::new();
    assert_eq!(differ.levenshtein("hi", "ho"), 1);
    assert_eq!(differ.levenshtein("hi", "hil"), 1);
    assert_eq!(differ.levenshtein("hi", "h"), 1);
    assert_eq!(differ.longest_common_subsequence("hallo", "halo"), 4);
    assert_eq!(differ.longest_common_substring("hallo", "halo").len, 3);
    assert_eq!(differ.longest_common_substring("aoa", "").len, 0);
    let choices = differ.choices("en un lugar de la mancha", "in un legarito de la mincha");
    assert_eq!(
        choices.iter().map(|c| c.to_string()).collect::<String>(),
        "[-e+i]n un l[-u+e]gar+i+t+o de la m[-a+i]ncha"
    );
}

#[test]
fn test_get_close_matches() {
    let matches = get_close_matches("appel", &["ape", "apple", "peach", "puppy"][..], 3, 0.5);
    assert_eq!(matches, vec!["ape", "apple"]);
    let matches = get_close_matches("hulo", &["hulu", "zulo", "aulo", "hola", "xyz"][..], 2, 0.7);
    assert_eq!(matches, vec!["aulo", "hulu"]);
    assert!(get_close_matches("abc", &["xyz"][..], 3, 0.5).is_empty());
}

#[test]
#[cfg(feature = "unicode")]
fn test_diff_unicode() {
    let mut differ = TextDiffer::new();
    let pairs = differ.diff_unicode_words("Hello, wörld!", "Hello, world!");
    assert_eq!(render_words(&pairs), "Hello, -wörld+world!");
    let pairs = differ.diff_graphemes("ae\u{301}", "ae");
    assert_eq!(render_words(&pairs), "a-e\u{301}+e");
}

#[test]
#[cfg(feature = "serde")]
fn test_config_serde() {
    let mut config = TextDiffer::configure();
    config.line_endings(LineEndings::Normalize);
    let json = serde_json::to_string(&config).unwrap();
    assert_eq!(json, r#"{"line_endings":"Normalize","substitution_weight":2}"#);
    let back: TextDiffConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}
