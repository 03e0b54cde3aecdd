//! Recursive longest-common-substring diff.
//!
//! * time: `O(NM)` per level, `O(N³)` worst case overall
//! * space `O(NM)`
//!
//! The algorithm anchors on the longest contiguous run shared by both
//! sequences, reports it as equal and recurses into what lies before and
//! after it.  Regions without any shared element are reported as one
//! deletion followed by one insertion.
//!
//! This does not produce a minimal edit script.  It favors keeping one
//! large matching block together, which tends to read well for lines
//! and words.  Every level rescans its region, so adversarial inputs can
//! take cubic time; callers that need bounded latency have to limit the
//! input size up front.
use crate::algorithms::lcs::longest_common_substring;
use crate::algorithms::{DiffHook, Table};
use crate::SeqView;

/// Recursive longest-common-substring diff.
///
/// Diffs `old` against `new` reporting runs to `d`.  Indexes passed to
/// the hook are absolute positions in the views' backing buffers.
pub fn diff<T, E, D>(
    table: &mut Table,
    d: &mut D,
    old: SeqView<'_, T>,
    new: SeqView<'_, T>,
    mut eq: E,
) -> Result<(), D::Error>
where
    E: FnMut(&T, &T) -> bool,
    D: DiffHook,
{
    diff_views(table, d, old, new, &mut eq)?;
    d.finish()
}

/// Shortcut for diffing slices.
pub fn diff_slices<T, D>(table: &mut Table, d: &mut D, old: &[T], new: &[T]) -> Result<(), D::Error>
where
    T: PartialEq,
    D: DiffHook,
{
    diff(
        table,
        d,
        SeqView::full(old),
        SeqView::full(new),
        |a, b| a == b,
    )
}

fn diff_views<T, E, D>(
    table: &mut Table,
    d: &mut D,
    old: SeqView<'_, T>,
    new: SeqView<'_, T>,
    eq: &mut E,
) -> Result<(), D::Error>
where
    E: FnMut(&T, &T) -> bool,
    D: DiffHook,
{
    let run = longest_common_substring(table, old, new, &mut *eq);

    if run.is_empty() {
        if !old.is_empty() {
            d.delete(old.offset(), old.len(), new.offset())?;
        }
        if !new.is_empty() {
            d.insert(old.offset() + old.len(), new.offset(), new.len())?;
        }
        return Ok(());
    }

    diff_remainders(
        table,
        d,
        old.head(run.old_start),
        new.head(run.new_start),
        eq,
    )?;
    d.equal(
        old.offset() + run.old_start,
        new.offset() + run.new_start,
        run.len,
    )?;
    diff_remainders(
        table,
        d,
        old.tail(run.old_start + run.len),
        new.tail(run.new_start + run.len),
        eq,
    )
}

fn diff_remainders<T, E, D>(
    table: &mut Table,
    d: &mut D,
    old: SeqView<'_, T>,
    new: SeqView<'_, T>,
    eq: &mut E,
) -> Result<(), D::Error>
where
    E: FnMut(&T, &T) -> bool,
    D: DiffHook,
{
    match (old.is_empty(), new.is_empty()) {
        (false, false) => diff_views(table, d, old, new, eq),
        (false, true) => d.delete(old.offset(), old.len(), new.offset()),
        (true, false) => d.insert(old.offset(), new.offset(), new.len()),
        (true, true) => Ok(()),
    }
}

#[cfg(test)]
fn capture(old: &str, new: &str) -> Vec<crate::algorithms::DiffOp> {
    let old = old.chars().collect::<Vec<_>>();
    let new = new.chars().collect::<Vec<_>>();
    let mut d = crate::algorithms::Capture::new();
    diff_slices(&mut Table::new(), &mut d, &old, &new).unwrap();
    d.into_ops()
}

#[test]
fn test_diff() {
    insta::assert_debug_snapshot!(capture("xabcy", "abcz"), @r###"
    [
        Delete {
            old_index: 0,
            old_len: 1,
            new_index: 0,
        },
        Equal {
            old_index: 1,
            new_index: 0,
            len: 3,
        },
        Delete {
            old_index: 4,
            old_len: 1,
            new_index: 3,
        },
        Insert {
            old_index: 5,
            new_index: 3,
            new_len: 1,
        },
    ]
    "###);
}

#[test]
fn test_disjoint_and_empty() {
    assert_eq!(capture("", ""), vec![]);
    assert_eq!(
        capture("ab", "cd"),
        vec![
            crate::algorithms::DiffOp::Delete {
                old_index: 0,
                old_len: 2,
                new_index: 0
            },
            crate::algorithms::DiffOp::Insert {
                old_index: 2,
                new_index: 0,
                new_len: 2
            },
        ]
    );
    assert_eq!(
        capture("", "cd"),
        vec![crate::algorithms::DiffOp::Insert {
            old_index: 0,
            new_index: 0,
            new_len: 2
        }]
    );
}

#[test]
fn test_identical() {
    assert_eq!(
        capture("same", "same"),
        vec![crate::algorithms::DiffOp::Equal {
            old_index: 0,
            new_index: 0,
            len: 4
        }]
    );
}

#[test]
fn test_finish_is_called() {
    struct Finished(bool);

    impl DiffHook for Finished {
        type Error = ();

        fn finish(&mut self) -> Result<(), ()> {
            self.0 = true;
            Ok(())
        }
    }

    let mut d = Finished(false);
    diff_slices(&mut Table::new(), &mut d, &[1, 2], &[2, 3]).unwrap();
    assert!(d.0);
}

#[test]
fn test_hook_errors_abort() {
    struct FailOnInsert;

    impl DiffHook for FailOnInsert {
        type Error = &'static str;

        fn insert(&mut self, _: usize, _: usize, _: usize) -> Result<(), Self::Error> {
            Err("insert")
        }
    }

    let rv = diff_slices(&mut Table::new(), &mut FailOnInsert, &[1], &[2]);
    assert_eq!(rv, Err("insert"));
}
