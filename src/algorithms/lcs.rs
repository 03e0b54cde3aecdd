//! Longest common substring and longest common subsequence.
//!
//! * time: `O(NM)`
//! * space `O(NM)`
use crate::algorithms::Table;
use crate::{CommonRun, SeqView};

/// Finds the longest contiguous run of elements shared by `old` and `new`.
///
/// When several runs share the maximal length the one ending first in
/// `old` (and then in `new`) wins.  The returned start positions are
/// relative to the views.
pub fn longest_common_substring<T, E>(
    table: &mut Table,
    old: SeqView<'_, T>,
    new: SeqView<'_, T>,
    mut eq: E,
) -> CommonRun
where
    E: FnMut(&T, &T) -> bool,
{
    let mut best = CommonRun::default();
    if old.is_empty() || new.is_empty() {
        return best;
    }

    table.reserve(old.len(), new.len());

    for i in 0..old.len() {
        for j in 0..new.len() {
            if !eq(&old[i], &new[j]) {
                table[(i, j)] = 0;
                continue;
            }
            let run = if i == 0 || j == 0 {
                1
            } else {
                table[(i - 1, j - 1)] + 1
            };
            table[(i, j)] = run;
            if run > best.len {
                best = CommonRun {
                    len: run,
                    old_start: i + 1 - run,
                    new_start: j + 1 - run,
                };
            }
        }
    }

    best
}

/// Computes the length of the longest (not necessarily contiguous)
/// subsequence shared by `old` and `new`.
pub fn longest_common_subsequence<T, E>(
    table: &mut Table,
    old: SeqView<'_, T>,
    new: SeqView<'_, T>,
    mut eq: E,
) -> usize
where
    E: FnMut(&T, &T) -> bool,
{
    if old.is_empty() || new.is_empty() {
        return 0;
    }

    let old_len = old.len();
    let new_len = new.len();
    table.reserve(old_len + 1, new_len + 1);

    for i in 0..=old_len {
        table[(i, 0)] = 0;
    }
    for j in 0..=new_len {
        table[(0, j)] = 0;
    }

    for i in 1..=old_len {
        for j in 1..=new_len {
            table[(i, j)] = if eq(&old[i - 1], &new[j - 1]) {
                table[(i - 1, j - 1)] + 1
            } else {
                table[(i, j - 1)].max(table[(i - 1, j)])
            };
        }
    }

    table[(old_len, new_len)]
}

#[cfg(test)]
fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[cfg(test)]
fn substring(table: &mut Table, old: &str, new: &str) -> CommonRun {
    let old = chars(old);
    let new = chars(new);
    longest_common_substring(table, SeqView::full(&old), SeqView::full(&new), |a, b| a == b)
}

#[cfg(test)]
fn subsequence(table: &mut Table, old: &str, new: &str) -> usize {
    let old = chars(old);
    let new = chars(new);
    longest_common_subsequence(table, SeqView::full(&old), SeqView::full(&new), |a, b| a == b)
}

#[test]
fn test_longest_common_substring() {
    let mut table = Table::new();
    assert_eq!(substring(&mut table, "hallo", "halo").len, 3);
    assert_eq!(substring(&mut table, "SupeMan", "SuperMan").len, 4);
    assert_eq!(substring(&mut table, "aoa", ""), CommonRun::default());
    assert_eq!(substring(&mut table, "abc", "xyz"), CommonRun::default());
}

#[test]
fn test_substring_positions() {
    let mut table = Table::new();
    insta::assert_debug_snapshot!(substring(&mut table, "xxabcdyy", "zabcdz"), @r###"
    CommonRun {
        len: 4,
        old_start: 2,
        new_start: 1,
    }
    "###);

    // ties go to the run that ends first
    let run = substring(&mut table, "ab_cd", "cd_ab");
    assert_eq!((run.len, run.old_start, run.new_start), (2, 0, 3));
}

#[test]
fn test_substring_in_views() {
    let mut table = Table::new();
    let old = chars("abcXYZ");
    let new = chars("XYZabc");
    let run = longest_common_substring(
        &mut table,
        SeqView::full(&old).tail(3),
        SeqView::full(&new),
        |a, b| a == b,
    );
    assert_eq!((run.len, run.old_start, run.new_start), (3, 0, 0));
}

#[test]
fn test_longest_common_subsequence() {
    let mut table = Table::new();
    assert_eq!(subsequence(&mut table, "hallo", "halo"), 4);
    assert_eq!(subsequence(&mut table, "SupeMan", "SuperMan"), 7);
    assert_eq!(subsequence(&mut table, "aoa", ""), 0);
    assert_eq!(subsequence(&mut table, "ABCDE", "ACE"), 3);
}

#[test]
fn test_table_reuse_across_algorithms() {
    let mut table = Table::new();
    assert_eq!(subsequence(&mut table, "abcdefgh", "aXcXeXgX"), 4);
    assert_eq!(substring(&mut table, "ab", "ab").len, 2);
    assert_eq!(subsequence(&mut table, "ab", "ba"), 1);
}
