//! Weighted Levenshtein distance.
//!
//! * time: `O(NM)`
//! * space `O(NM)`
//!
//! The first row and column of the table hold the cumulative cost of
//! adding or removing the respective prefixes, so arbitrary per element
//! weights are supported.  Equal elements never cost anything.
use crate::algorithms::Table;
use crate::{Choice, SeqView};

/// The cost function of plain Levenshtein distance: every edit costs `1`.
pub fn unit_cost<T>(choice: Choice<&T>) -> usize {
    let _ = choice;
    1
}

/// Computes the weighted edit distance between `old` and `new`.
///
/// `eq` decides if two elements are equal, `cost` prices each edit.  With
/// `allow_transpose` two adjacent elements that appear swapped can be
/// edited with a single [`Choice::Transpose`].
///
/// The table stays populated afterwards so the edit script can be
/// recovered (see [`choices`](crate::algorithms::choices)).
pub fn distance<T, E, C>(
    table: &mut Table,
    old: SeqView<'_, T>,
    new: SeqView<'_, T>,
    mut eq: E,
    mut cost: C,
    allow_transpose: bool,
) -> usize
where
    E: FnMut(&T, &T) -> bool,
    C: FnMut(Choice<&T>) -> usize,
{
    let old_len = old.len();
    let new_len = new.len();
    table.reserve(old_len + 1, new_len + 1);

    table[(0, 0)] = 0;
    for i in 1..=old_len {
        table[(i, 0)] = table[(i - 1, 0)] + cost(Choice::Remove(&old[i - 1]));
    }
    for j in 1..=new_len {
        table[(0, j)] = table[(0, j - 1)] + cost(Choice::Add(&new[j - 1]));
    }

    for i in 1..=old_len {
        let o = &old[i - 1];
        for j in 1..=new_len {
            let n = &new[j - 1];
            if eq(o, n) {
                table[(i, j)] = table[(i - 1, j - 1)];
                continue;
            }

            let mut best = (table[(i - 1, j)] + cost(Choice::Remove(o)))
                .min(table[(i, j - 1)] + cost(Choice::Add(n)))
                .min(table[(i - 1, j - 1)] + cost(Choice::Substitute(o, n)));

            if allow_transpose
                && i > 1
                && j > 1
                && eq(o, &new[j - 2])
                && eq(&old[i - 2], n)
            {
                best = best.min(table[(i - 2, j - 2)] + cost(Choice::Transpose(o, &old[i - 2])));
            }

            table[(i, j)] = best;
        }
    }

    table[(old_len, new_len)]
}

/// Shortcut for the unweighted distance of two slices.
pub fn distance_slices<T: PartialEq>(table: &mut Table, old: &[T], new: &[T]) -> usize {
    distance(
        table,
        SeqView::full(old),
        SeqView::full(new),
        |a, b| a == b,
        unit_cost,
        false,
    )
}

/// Turns a distance into a similarity ratio in the range `0..=1`.
///
/// The ratio is `1 - distance / max(old_len, new_len)`.  Two empty
/// sequences are a complete match.
pub fn similarity_ratio(distance: usize, old_len: usize, new_len: usize) -> f64 {
    let len = old_len.max(new_len);
    if len == 0 {
        1.0
    } else {
        (1.0 - distance as f64 / len as f64).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[test]
fn test_unit_distance() {
    let mut table = Table::new();
    assert_eq!(distance_slices(&mut table, &chars("hi"), &chars("ho")), 1);
    assert_eq!(distance_slices(&mut table, &chars("hi"), &chars("hil")), 1);
    assert_eq!(distance_slices(&mut table, &chars("hi"), &chars("h")), 1);
    assert_eq!(
        distance_slices(&mut table, &chars("kitten"), &chars("sitting")),
        3
    );
}

#[test]
fn test_empty_inputs() {
    let mut table = Table::new();
    assert_eq!(distance_slices::<char>(&mut table, &[], &[]), 0);
    assert_eq!(distance_slices(&mut table, &chars("abc"), &[]), 3);
    assert_eq!(distance_slices(&mut table, &[], &chars("ab")), 2);

    let weighted = distance(
        &mut table,
        SeqView::full(&["long", "x"][..]),
        SeqView::full(&[][..]),
        |a, b| a == b,
        |c: Choice<&&str>| c.removed().map_or(0, |x| x.len()),
        false,
    );
    assert_eq!(weighted, 5);
}

#[test]
fn test_weighted_digits() {
    fn digit_cost(c: Choice<&char>) -> usize {
        if c.added().map_or(false, |x| x.is_numeric())
            || c.removed().map_or(false, |x| x.is_numeric())
        {
            10
        } else {
            1
        }
    }

    let mut table = Table::new();
    for (old, new) in [
        ("hola", "ho5la"),
        ("ho5la", "hola"),
        ("ho5la", "hojla"),
        ("hojla", "ho5la"),
        ("ho5la", "ho6la"),
    ] {
        let old = chars(old);
        let new = chars(new);
        let d = distance(
            &mut table,
            SeqView::full(&old),
            SeqView::full(&new),
            |a, b| a == b,
            digit_cost,
            false,
        );
        assert_eq!(d, 10);
    }
}

#[test]
fn test_transpose() {
    let mut table = Table::new();
    let old = chars("abcd");
    let new = chars("acbd");
    let plain = distance(
        &mut table,
        SeqView::full(&old),
        SeqView::full(&new),
        |a, b| a == b,
        unit_cost,
        false,
    );
    let swapped = distance(
        &mut table,
        SeqView::full(&old),
        SeqView::full(&new),
        |a, b| a == b,
        unit_cost,
        true,
    );
    assert_eq!(plain, 2);
    assert_eq!(swapped, 1);
}

#[test]
fn test_transpose_carries_new_order() {
    let mut table = Table::new();
    let old = chars("abcd");
    let new = chars("acbd");
    let mut seen = Vec::new();
    let d = distance(
        &mut table,
        SeqView::full(&old),
        SeqView::full(&new),
        |a, b| a == b,
        |c: Choice<&char>| match c {
            Choice::Transpose(&first, &second) => {
                seen.push((first, second));
                if first == 'c' {
                    1
                } else {
                    10
                }
            }
            _ => 10,
        },
        true,
    );
    assert_eq!(seen, vec![('c', 'b')]);
    assert_eq!(d, 1);
}

#[test]
fn test_custom_equality() {
    let mut table = Table::new();
    let old = chars("Hello");
    let new = chars("hELLO");
    let d = distance(
        &mut table,
        SeqView::full(&old),
        SeqView::full(&new),
        |a: &char, b: &char| a.eq_ignore_ascii_case(b),
        unit_cost,
        false,
    );
    assert_eq!(d, 0);
}

#[test]
fn test_metric_properties() {
    let mut table = Table::new();
    let words = ["", "a", "ab", "kitten", "sitting", "mitten", "flaw", "lawn"];
    for a in words {
        let a = chars(a);
        assert_eq!(distance_slices(&mut table, &a, &a), 0);
        for b in words {
            let b = chars(b);
            let ab = distance_slices(&mut table, &a, &b);
            assert_eq!(ab, distance_slices(&mut table, &b, &a));
            for c in words {
                let c = chars(c);
                let bc = distance_slices(&mut table, &b, &c);
                assert!(distance_slices(&mut table, &a, &c) <= ab + bc);
            }
        }
    }
}

#[test]
fn test_similarity_ratio() {
    assert_eq!(similarity_ratio(0, 0, 0), 1.0);
    assert_eq!(similarity_ratio(1, 4, 3), 0.75);
    assert_eq!(similarity_ratio(3, 3, 0), 0.0);
    assert_eq!(similarity_ratio(10, 2, 2), 0.0);
}
