use crate::algorithms::levenshtein::{similarity_ratio, unit_cost};
use crate::algorithms::{choices, lcs, levenshtein, recursive, Capture, DiffOp, Table};
use crate::{Choice, CommonRun, DiffPair, SeqView};

/// Owns the reusable table and exposes all sequence operations.
///
/// Every operation runs on the engine's private [`Table`], which is grown
/// on demand and reused by later calls instead of being reallocated.
/// Because all operations take `&mut self` one engine can only ever run
/// one computation at a time.  An engine may be moved to another thread
/// but sharing one between threads requires a lock around each call;
/// usually one engine per thread is the better choice.
///
/// The `_by` variants accept custom equality (and cost) closures over
/// [`SeqView`]s, the plain variants work on slices of `PartialEq`
/// elements with unit costs.
///
/// ```rust
/// use resemble::Engine;
///
/// let mut engine = Engine::new();
/// let old = "kitten".chars().collect::<Vec<_>>();
/// let new = "sitting".chars().collect::<Vec<_>>();
/// assert_eq!(engine.levenshtein(&old, &new), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Engine {
    table: Table,
}

impl Engine {
    /// Creates an engine with an empty table.
    pub fn new() -> Engine {
        Engine::default()
    }

    /// Gives access to the table as left behind by the last operation.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Plain Levenshtein distance.
    pub fn levenshtein<T: PartialEq>(&mut self, old: &[T], new: &[T]) -> usize {
        levenshtein::distance_slices(&mut self.table, old, new)
    }

    /// Levenshtein distance where adjacent swaps count as one edit.
    pub fn damerau_levenshtein<T: PartialEq>(&mut self, old: &[T], new: &[T]) -> usize {
        self.levenshtein_by(
            SeqView::full(old),
            SeqView::full(new),
            |a, b| a == b,
            unit_cost,
            true,
        )
    }

    /// Levenshtein distance with a custom cost per edit.
    pub fn levenshtein_weighted<T, C>(&mut self, old: &[T], new: &[T], cost: C) -> usize
    where
        T: PartialEq,
        C: FnMut(Choice<&T>) -> usize,
    {
        self.levenshtein_by(
            SeqView::full(old),
            SeqView::full(new),
            |a, b| a == b,
            cost,
            false,
        )
    }

    /// Weighted edit distance with custom equality.
    ///
    /// See [`levenshtein::distance`] for details.
    pub fn levenshtein_by<T, E, C>(
        &mut self,
        old: SeqView<'_, T>,
        new: SeqView<'_, T>,
        eq: E,
        cost: C,
        allow_transpose: bool,
    ) -> usize
    where
        E: FnMut(&T, &T) -> bool,
        C: FnMut(Choice<&T>) -> usize,
    {
        levenshtein::distance(&mut self.table, old, new, eq, cost, allow_transpose)
    }

    /// Returns the similarity of two sequences in the range `0..=1`.
    ///
    /// This is `1 - distance / max(old.len(), new.len())` for the plain
    /// Levenshtein distance.
    pub fn similarity<T: PartialEq>(&mut self, old: &[T], new: &[T]) -> f64 {
        let distance = self.levenshtein(old, new);
        similarity_ratio(distance, old.len(), new.len())
    }

    /// The unweighted edit script turning `old` into `new`.
    pub fn choices<'a, T: PartialEq>(&mut self, old: &'a [T], new: &'a [T]) -> Vec<Choice<&'a T>> {
        choices::choices_slices(&mut self.table, old, new)
    }

    /// The weighted edit script turning `old` into `new`.
    ///
    /// See [`choices::choices`] for the tie-break rules.
    pub fn choices_by<'a, T, E, C>(
        &mut self,
        old: SeqView<'a, T>,
        new: SeqView<'a, T>,
        eq: E,
        cost: C,
        allow_transpose: bool,
    ) -> Vec<Choice<&'a T>>
    where
        E: FnMut(&T, &T) -> bool,
        C: FnMut(Choice<&T>) -> usize,
    {
        choices::choices(&mut self.table, old, new, eq, cost, allow_transpose)
    }

    /// Finds the longest contiguous run shared by both slices.
    pub fn longest_common_substring<T: PartialEq>(&mut self, old: &[T], new: &[T]) -> CommonRun {
        self.longest_common_substring_by(SeqView::full(old), SeqView::full(new), |a, b| a == b)
    }

    /// Finds the longest contiguous run shared by both views.
    pub fn longest_common_substring_by<T, E>(
        &mut self,
        old: SeqView<'_, T>,
        new: SeqView<'_, T>,
        eq: E,
    ) -> CommonRun
    where
        E: FnMut(&T, &T) -> bool,
    {
        lcs::longest_common_substring(&mut self.table, old, new, eq)
    }

    /// Length of the longest common subsequence of both slices.
    pub fn longest_common_subsequence<T: PartialEq>(&mut self, old: &[T], new: &[T]) -> usize {
        self.longest_common_subsequence_by(SeqView::full(old), SeqView::full(new), |a, b| a == b)
    }

    /// Length of the longest common subsequence of both views.
    pub fn longest_common_subsequence_by<T, E>(
        &mut self,
        old: SeqView<'_, T>,
        new: SeqView<'_, T>,
        eq: E,
    ) -> usize
    where
        E: FnMut(&T, &T) -> bool,
    {
        lcs::longest_common_subsequence(&mut self.table, old, new, eq)
    }

    /// Diffs two slices with the recursive differ.
    ///
    /// ```rust
    /// use resemble::{DiffAction, Engine};
    ///
    /// let mut engine = Engine::new();
    /// let pairs = engine.diff(&[1, 2, 3, 4], &[2, 3, 5]);
    /// let actions = pairs.iter().map(|p| p.action()).collect::<Vec<_>>();
    /// assert_eq!(actions, vec![
    ///     DiffAction::Removed,
    ///     DiffAction::Equal,
    ///     DiffAction::Equal,
    ///     DiffAction::Removed,
    ///     DiffAction::Added,
    /// ]);
    /// ```
    pub fn diff<'a, T: PartialEq>(&mut self, old: &'a [T], new: &'a [T]) -> Vec<DiffPair<&'a T>> {
        self.diff_by(SeqView::full(old), SeqView::full(new), |a, b| a == b)
    }

    /// Diffs two views with the recursive differ and custom equality.
    ///
    /// Equal pairs carry the element from `old`.
    pub fn diff_by<'a, T, E>(
        &mut self,
        old: SeqView<'a, T>,
        new: SeqView<'a, T>,
        eq: E,
    ) -> Vec<DiffPair<&'a T>>
    where
        E: FnMut(&T, &T) -> bool,
    {
        let old_buf = old.buffer();
        let new_buf = new.buffer();
        self.diff_ops_by(old, new, eq)
            .iter()
            .flat_map(|op| op.iter_pairs(old_buf, new_buf))
            .collect()
    }

    /// Diffs two views and returns the captured runs.
    ///
    /// Indexes in the ops refer to the views' backing buffers.
    pub fn diff_ops_by<T, E>(&mut self, old: SeqView<'_, T>, new: SeqView<'_, T>, eq: E) -> Vec<DiffOp>
    where
        E: FnMut(&T, &T) -> bool,
    {
        let mut d = Capture::new();
        match recursive::diff(&mut self.table, &mut d, old, new, eq) {
            Ok(()) => d.into_ops(),
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[cfg(test)]
fn render<T: std::fmt::Display>(pairs: &[DiffPair<T>]) -> String {
    pairs.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_scenarios() {
    let mut engine = Engine::new();
    assert_eq!(engine.levenshtein(&chars("hi"), &chars("ho")), 1);
    assert_eq!(engine.longest_common_subsequence(&chars("hallo"), &chars("halo")), 4);
    assert_eq!(engine.longest_common_substring(&chars("hallo"), &chars("halo")).len, 3);

    let old = chars("en un lugar de la mancha");
    let new = chars("in un place de la mincha");
    insta::assert_snapshot!(
        render(&engine.diff(&old, &new)),
        @"-e+in un +pl-u-ga-r+c+e de la m-a+incha"
    );
}

#[test]
fn test_diff_round_trip() {
    let mut engine = Engine::new();
    for (old, new) in [
        ("", ""),
        ("abc", ""),
        ("", "abc"),
        ("the quick brown fox", "a quick brown dog"),
        ("aaaa", "aa"),
        ("abcabcabc", "cbacbacba"),
    ] {
        let old = chars(old);
        let new = chars(new);
        let pairs = engine.diff(&old, &new);
        let rebuilt_old = pairs
            .iter()
            .filter(|p| p.is_old())
            .map(|p| **p.value())
            .collect::<Vec<_>>();
        let rebuilt_new = pairs
            .iter()
            .filter(|p| p.is_new())
            .map(|p| **p.value())
            .collect::<Vec<_>>();
        assert_eq!(rebuilt_old, old);
        assert_eq!(rebuilt_new, new);
    }
}

#[test]
fn test_diff_identical() {
    let mut engine = Engine::new();
    let old = chars("nothing changed");
    let ops = engine.diff_ops_by(SeqView::full(&old), SeqView::full(&old), |a, b| a == b);
    assert_eq!(
        ops,
        vec![DiffOp::Equal {
            old_index: 0,
            new_index: 0,
            len: old.len()
        }]
    );
    assert!(engine
        .diff(&old, &old)
        .iter()
        .all(|p| p.action() == crate::DiffAction::Equal));
}

#[test]
fn test_diff_views_keep_absolute_indexes() {
    let mut engine = Engine::new();
    let old = chars("__abc__");
    let new = chars("abd");
    let view = SeqView::new(&old, 2, 3).unwrap();
    let ops = engine.diff_ops_by(view, SeqView::full(&new), |a, b| a == b);
    insta::assert_debug_snapshot!(ops, @r###"
    [
        Equal {
            old_index: 2,
            new_index: 0,
            len: 2,
        },
        Delete {
            old_index: 4,
            old_len: 1,
            new_index: 2,
        },
        Insert {
            old_index: 5,
            new_index: 2,
            new_len: 1,
        },
    ]
    "###);
    let pairs = engine.diff_by(view, SeqView::full(&new), |a, b| a == b);
    assert_eq!(render(&pairs), "ab-c+d");
}

#[test]
fn test_weighted_and_transposed() {
    let mut engine = Engine::new();
    assert_eq!(engine.damerau_levenshtein(&chars("ca"), &chars("ac")), 1);
    assert_eq!(engine.levenshtein(&chars("ca"), &chars("ac")), 2);
    let d = engine.levenshtein_weighted(&chars("abc"), &chars("abd"), |c| match c {
        Choice::Substitute(..) => 3,
        _ => 1,
    });
    assert_eq!(d, 2);
}

#[test]
fn test_similarity() {
    let mut engine = Engine::new();
    assert_eq!(engine.similarity::<char>(&[], &[]), 1.0);
    assert_eq!(engine.similarity(&chars("abcd"), &chars("abcd")), 1.0);
    assert_eq!(engine.similarity(&chars("abcd"), &chars("abce")), 0.75);
    assert_eq!(engine.similarity(&chars("ab"), &chars("cd")), 0.0);
}

#[test]
fn test_engine_reuse() {
    let mut engine = Engine::new();
    let long = chars(&"x".repeat(50));
    assert_eq!(engine.levenshtein(&long, &chars("x")), 49);
    assert!(engine.table().rows() >= 51);
    // the grown table must not leak stale cells into smaller problems
    assert_eq!(engine.levenshtein(&chars("ab"), &chars("b")), 1);
    assert_eq!(engine.longest_common_substring(&chars("ab"), &chars("b")).len, 1);
    assert_eq!(render(&engine.diff(&chars("ab"), &chars("b"))), "-ab");
}

#[test]
fn test_engine_is_send() {
    fn assert_send<T: Send>() {}
    assert_send::<Engine>();
}
