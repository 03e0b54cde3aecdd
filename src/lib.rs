//! This crate implements weighted edit distances and a heuristic diff for
//! sequences and text.
//!
//! The crate is split into three levels:
//!
//! * [`algorithms`]: the dynamic programming algorithms (edit distance,
//!   edit scripts, longest common substring and subsequence) and the
//!   recursive differ.  They work on [`SeqView`]s with caller supplied
//!   equality and costs and scribble into a caller supplied table.
//! * [`Engine`]: owns a reusable table and exposes all algorithms with
//!   sensible defaults.  This is what most users want for generic
//!   sequences.
//! * [`text`]: diffs text by characters, words and lines, including a
//!   combined line diff that refines changed lines to word diffs.
//!
//! ```rust
//! use resemble::Engine;
//!
//! let mut engine = Engine::new();
//! let old = "hallo".chars().collect::<Vec<_>>();
//! let new = "halo".chars().collect::<Vec<_>>();
//! assert_eq!(engine.levenshtein(&old, &new), 1);
//! assert_eq!(engine.longest_common_subsequence(&old, &new), 4);
//! assert_eq!(engine.longest_common_substring(&old, &new).len, 3);
//! ```
//!
//! # Diffs and edit scripts
//!
//! There are two kinds of output.  A diff ([`Engine::diff`]) is a flat list
//! of [`DiffPair`]s, each element tagged as equal, added or removed.  It is
//! produced by repeatedly splitting both sequences at their longest common
//! run, which is fast and reads well but is not guaranteed to be minimal.
//! An edit script ([`Engine::choices`]) is a list of [`Choice`]s that is
//! minimal under the given cost function and can pair up removed and
//! added elements as substitutions.
//!
//! # Optional Features
//!
//! The core always depends on `log` and `thiserror`.  The default `text`
//! feature adds `regex` for tokenizing, everything else is opt-in:
//!
//! * `text`: this feature is enabled by default and enables the text based
//!   diffing types such as [`text::TextDiffer`].
//! * `unicode`: when this feature is enabled the text diffing functionality
//!   gains the ability to diff on a grapheme and unicode word level.
//! * `serde`: this feature enables serialization for the result types.
pub mod algorithms;
mod engine;
mod error;
pub mod text;
mod types;
pub mod utils;
mod view;

pub use self::engine::Engine;
pub use self::error::InvalidView;
pub use self::types::*;
pub use self::view::SeqView;
