//! Edit script reconstruction.
//!
//! Runs the weighted [`distance`] and walks the table back from the
//! bottom right corner.  When several edits are equally cheap the order
//! of preference is substitute, remove, add and finally transpose.  This
//! is the same order in which the distance recurrence evaluates them,
//! which keeps scripts reproducible.
//!
//! The walk is an explicit loop so that the stack depth does not depend
//! on the input size.
use crate::algorithms::levenshtein::{distance, unit_cost};
use crate::algorithms::Table;
use crate::{Choice, SeqView};

/// Computes the edit script turning `old` into `new`.
///
/// The returned choices are in input order.
pub fn choices<'a, T, E, C>(
    table: &mut Table,
    old: SeqView<'a, T>,
    new: SeqView<'a, T>,
    mut eq: E,
    mut cost: C,
    allow_transpose: bool,
) -> Vec<Choice<&'a T>>
where
    E: FnMut(&T, &T) -> bool,
    C: FnMut(Choice<&T>) -> usize,
{
    distance(table, old, new, &mut eq, &mut cost, allow_transpose);

    let old = old.as_slice();
    let new = new.as_slice();
    let mut i = old.len();
    let mut j = new.len();
    let mut rv = Vec::with_capacity(i.max(j));

    while i > 0 && j > 0 {
        let o = &old[i - 1];
        let n = &new[j - 1];

        if eq(o, n) {
            rv.push(Choice::Equal(o));
            i -= 1;
            j -= 1;
            continue;
        }

        let substitute = table[(i - 1, j - 1)] + cost(Choice::Substitute(o, n));
        let remove = table[(i - 1, j)] + cost(Choice::Remove(o));
        let add = table[(i, j - 1)] + cost(Choice::Add(n));
        let transpose = if allow_transpose
            && i > 1
            && j > 1
            && eq(o, &new[j - 2])
            && eq(&old[i - 2], n)
        {
            Some(table[(i - 2, j - 2)] + cost(Choice::Transpose(o, &old[i - 2])))
        } else {
            None
        };

        let min = substitute
            .min(remove)
            .min(add)
            .min(transpose.unwrap_or(usize::MAX));

        if substitute == min {
            rv.push(Choice::Substitute(o, n));
            i -= 1;
            j -= 1;
        } else if remove == min {
            rv.push(Choice::Remove(o));
            i -= 1;
        } else if add == min {
            rv.push(Choice::Add(n));
            j -= 1;
        } else {
            rv.push(Choice::Transpose(o, &old[i - 2]));
            i -= 2;
            j -= 2;
        }
    }

    rv.extend(old[..i].iter().rev().map(Choice::Remove));
    rv.extend(new[..j].iter().rev().map(Choice::Add));

    rv.reverse();
    rv
}

/// Shortcut for the unweighted edit script of two slices.
pub fn choices_slices<'a, T: PartialEq>(
    table: &mut Table,
    old: &'a [T],
    new: &'a [T],
) -> Vec<Choice<&'a T>> {
    choices(
        table,
        SeqView::full(old),
        SeqView::full(new),
        |a, b| a == b,
        unit_cost,
        false,
    )
}

#[cfg(test)]
fn render<T: std::fmt::Display>(choices: &[Choice<&T>]) -> String {
    choices.iter().map(|c| c.to_string()).collect()
}

/// Replays a script against nothing, returning `(old, new)`.
#[cfg(test)]
fn replay<T: Clone>(choices: &[Choice<&T>]) -> (Vec<T>, Vec<T>) {
    let mut old = Vec::new();
    let mut new = Vec::new();
    for choice in choices {
        match *choice {
            Choice::Equal(x) => {
                old.push(x.clone());
                new.push(x.clone());
            }
            Choice::Substitute(r, a) => {
                old.push(r.clone());
                new.push(a.clone());
            }
            Choice::Remove(r) => old.push(r.clone()),
            Choice::Add(a) => new.push(a.clone()),
            Choice::Transpose(first, second) => {
                old.push(second.clone());
                old.push(first.clone());
                new.push(first.clone());
                new.push(second.clone());
            }
        }
    }
    (old, new)
}

#[test]
fn test_choices() {
    let old = "en un lugar de la mancha".chars().collect::<Vec<_>>();
    let new = "in un legarito de la mincha".chars().collect::<Vec<_>>();
    let mut table = Table::new();
    let script = choices_slices(&mut table, &old, &new);
    insta::assert_snapshot!(render(&script), @"[-e+i]n un l[-u+e]gar+i+t+o de la m[-a+i]ncha");
}

#[test]
fn test_choices_rebuild_inputs() {
    let mut table = Table::new();
    for (old, new) in [
        ("", ""),
        ("abc", ""),
        ("", "abc"),
        ("kitten", "sitting"),
        ("Saturday", "Sunday"),
        ("abcdef", "badcfe"),
        ("same", "same"),
    ] {
        let old = old.chars().collect::<Vec<_>>();
        let new = new.chars().collect::<Vec<_>>();
        let script = choices_slices(&mut table, &old, &new);
        assert_eq!(replay(&script), (old.clone(), new.clone()));

        let swapped = choices(
            &mut table,
            SeqView::full(&old),
            SeqView::full(&new),
            |a, b| a == b,
            unit_cost,
            true,
        );
        assert_eq!(replay(&swapped), (old, new));
    }
}

#[test]
fn test_choices_flush_leftovers() {
    let mut table = Table::new();
    let script = choices_slices(&mut table, &[1, 2, 3], &[3]);
    assert_eq!(
        script,
        vec![Choice::Remove(&1), Choice::Remove(&2), Choice::Equal(&3)]
    );
    let script = choices_slices(&mut table, &[3], &[1, 2, 3]);
    assert_eq!(script, vec![Choice::Add(&1), Choice::Add(&2), Choice::Equal(&3)]);
}

#[test]
fn test_choices_transpose() {
    let old = "abcd".chars().collect::<Vec<_>>();
    let new = "acbd".chars().collect::<Vec<_>>();
    let mut table = Table::new();
    let script = choices(
        &mut table,
        SeqView::full(&old),
        SeqView::full(&new),
        |a, b| a == b,
        unit_cost,
        true,
    );
    insta::assert_snapshot!(render(&script), @"a[~cb]d");
}

#[test]
fn test_choices_weighted() {
    // substituting is expensive, so the script prefers add + remove
    let old = ["x"];
    let new = ["y"];
    let mut table = Table::new();
    let script = choices(
        &mut table,
        SeqView::full(&old[..]),
        SeqView::full(&new[..]),
        |a, b| a == b,
        |c: Choice<&&str>| if c.tag() == crate::ChoiceTag::Substitute { 5 } else { 1 },
        false,
    );
    assert_eq!(script, vec![Choice::Add(&"y"), Choice::Remove(&"x")]);
}

#[test]
fn test_choices_weighted_transpose() {
    // only swaps that move 'c' in front are cheap
    fn cost(c: Choice<&char>) -> usize {
        match c {
            Choice::Transpose(&'c', _) => 1,
            Choice::Transpose(..) => 100,
            _ => 10,
        }
    }

    let mut table = Table::new();
    let old = "abcd".chars().collect::<Vec<_>>();
    let new = "acbd".chars().collect::<Vec<_>>();
    let script = choices(
        &mut table,
        SeqView::full(&old),
        SeqView::full(&new),
        |a, b| a == b,
        cost,
        true,
    );
    assert_eq!(render(&script), "a[~cb]d");
    assert_eq!(replay(&script), (old.clone(), new.clone()));

    // the same swap the other way round is priced by its new order too
    let script = choices(
        &mut table,
        SeqView::full(&new),
        SeqView::full(&old),
        |a, b| a == b,
        cost,
        true,
    );
    assert_eq!(render(&script), "a[-c+b][-b+c]d");
}
