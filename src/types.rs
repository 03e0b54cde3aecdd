use std::fmt;

/// The kind of a [`Choice`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChoiceTag {
    Equal,
    Substitute,
    Remove,
    Add,
    Transpose,
}

/// A single step of an edit script.
///
/// Edit scripts are produced by
/// [`Engine::choices`](crate::Engine::choices) and read left to right
/// in input order.  Unlike [`DiffPair`] a choice is two sided: a
/// substitution carries both the removed and the added element.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Choice<T> {
    /// The element is present in both sequences.
    Equal(T),
    /// The first element (old) is replaced by the second (new).
    Substitute(T, T),
    /// The element only exists in the old sequence.
    Remove(T),
    /// The element only exists in the new sequence.
    Add(T),
    /// Two adjacent old elements that appear swapped in the new sequence.
    ///
    /// They are carried in new order: the first value is the later of the
    /// two old elements, the second value the earlier one.
    Transpose(T, T),
}

impl<T> Choice<T> {
    /// Returns the tag of this choice.
    pub fn tag(&self) -> ChoiceTag {
        match *self {
            Choice::Equal(..) => ChoiceTag::Equal,
            Choice::Substitute(..) => ChoiceTag::Substitute,
            Choice::Remove(..) => ChoiceTag::Remove,
            Choice::Add(..) => ChoiceTag::Add,
            Choice::Transpose(..) => ChoiceTag::Transpose,
        }
    }

    /// Returns the removed value unless this is an [`Choice::Add`].
    ///
    /// For equal elements this is the element itself, for transpositions
    /// the first of the swapped pair (the later old element).
    pub fn removed(&self) -> Option<&T> {
        match self {
            Choice::Equal(x) | Choice::Remove(x) | Choice::Substitute(x, _) => Some(x),
            Choice::Transpose(first, _) => Some(first),
            Choice::Add(_) => None,
        }
    }

    /// Returns the added value unless this is a [`Choice::Remove`].
    pub fn added(&self) -> Option<&T> {
        match self {
            Choice::Equal(x) | Choice::Add(x) | Choice::Substitute(_, x) => Some(x),
            Choice::Transpose(_, second) => Some(second),
            Choice::Remove(_) => None,
        }
    }

    /// Maps the carried values.
    pub fn map<U, F: FnMut(T) -> U>(self, mut f: F) -> Choice<U> {
        match self {
            Choice::Equal(x) => Choice::Equal(f(x)),
            Choice::Substitute(r, a) => {
                let r = f(r);
                Choice::Substitute(r, f(a))
            }
            Choice::Remove(x) => Choice::Remove(f(x)),
            Choice::Add(x) => Choice::Add(f(x)),
            Choice::Transpose(first, second) => {
                let first = f(first);
                Choice::Transpose(first, f(second))
            }
        }
    }
}

impl<'a, T: Copy> Choice<&'a T> {
    /// Copies the referenced values.
    pub fn copied(self) -> Choice<T> {
        self.map(|x| *x)
    }
}

impl<'a, T: Clone> Choice<&'a T> {
    /// Clones the referenced values.
    pub fn cloned(self) -> Choice<T> {
        self.map(T::clone)
    }
}

impl<T: fmt::Display> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Equal(x) => write!(f, "{}", x),
            Choice::Substitute(r, a) => write!(f, "[-{}+{}]", r, a),
            Choice::Remove(r) => write!(f, "-{}", r),
            Choice::Add(a) => write!(f, "+{}", a),
            Choice::Transpose(first, second) => write!(f, "[~{}{}]", first, second),
        }
    }
}

/// Membership of a diffed element.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiffAction {
    /// The element is part of both sequences.
    Equal,
    /// The element only exists in the new sequence.
    Added,
    /// The element only exists in the old sequence.
    Removed,
}

impl fmt::Display for DiffAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DiffAction::Equal => "",
                DiffAction::Added => "+",
                DiffAction::Removed => "-",
            }
        )
    }
}

/// A single value tagged with its [`DiffAction`].
///
/// This is the flat, one sided output of the recursive differ.  Walking
/// the `Equal` and `Removed` pairs in order yields the old sequence,
/// walking the `Equal` and `Added` pairs yields the new one.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffPair<T> {
    action: DiffAction,
    value: T,
}

impl<T> DiffPair<T> {
    /// Creates a new pair.
    pub fn new(action: DiffAction, value: T) -> DiffPair<T> {
        DiffPair { action, value }
    }

    /// Returns the action.
    pub fn action(&self) -> DiffAction {
        self.action
    }

    /// Returns the value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Unwraps the value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Returns `true` if the value is part of the old sequence.
    pub fn is_old(&self) -> bool {
        self.action != DiffAction::Added
    }

    /// Returns `true` if the value is part of the new sequence.
    pub fn is_new(&self) -> bool {
        self.action != DiffAction::Removed
    }

    /// Maps the value, keeping the action.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> DiffPair<U> {
        DiffPair {
            action: self.action,
            value: f(self.value),
        }
    }
}

impl<'a, T: Copy> DiffPair<&'a T> {
    /// Copies the referenced value.
    pub fn copied(self) -> DiffPair<T> {
        self.map(|x| *x)
    }
}

impl<'a, T: Clone> DiffPair<&'a T> {
    /// Clones the referenced value.
    pub fn cloned(self) -> DiffPair<T> {
        self.map(T::clone)
    }
}

impl<T: fmt::Display> fmt::Display for DiffPair<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.action, self.value)
    }
}

/// The longest run of elements shared by two sequences.
///
/// Start positions are relative to the sequences (or views) that were
/// compared.  An empty run has both starts at `0`.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommonRun {
    /// Number of shared elements.
    pub len: usize,
    /// Where the run starts in the old sequence.
    pub old_start: usize,
    /// Where the run starts in the new sequence.
    pub new_start: usize,
}

impl CommonRun {
    /// Returns `true` if the sequences share nothing.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[test]
fn test_choice_accessors() {
    let c = Choice::Substitute('a', 'b');
    assert_eq!(c.tag(), ChoiceTag::Substitute);
    assert_eq!(c.removed(), Some(&'a'));
    assert_eq!(c.added(), Some(&'b'));
    assert_eq!(Choice::Add('x').removed(), None);
    assert_eq!(Choice::Remove('x').added(), None);
    assert_eq!(Choice::Equal('x').removed(), Choice::Equal('x').added());
}

#[test]
fn test_display() {
    let rendered = [
        Choice::Equal("a"),
        Choice::Substitute("b", "c"),
        Choice::Remove("d"),
        Choice::Add("e"),
        Choice::Transpose("f", "g"),
    ]
    .iter()
    .map(|c| c.to_string())
    .collect::<Vec<_>>()
    .join(" ");
    insta::assert_snapshot!(rendered, @"a [-b+c] -d +e [~fg]");

    let rendered = [
        DiffPair::new(DiffAction::Equal, 1),
        DiffPair::new(DiffAction::Removed, 2),
        DiffPair::new(DiffAction::Added, 3),
    ]
    .iter()
    .map(|p| p.to_string())
    .collect::<String>();
    assert_eq!(rendered, "1-2+3");
}

#[test]
fn test_copied() {
    let x = 'x';
    let y = 'y';
    assert_eq!(Choice::Substitute(&x, &y).copied(), Choice::Substitute('x', 'y'));
    assert_eq!(
        DiffPair::new(DiffAction::Added, &x).copied(),
        DiffPair::new(DiffAction::Added, 'x')
    );
    let s = String::from("s");
    assert_eq!(Choice::Add(&s).cloned(), Choice::Add(String::from("s")));
}

#[test]
#[cfg(feature = "serde")]
fn test_serde() {
    let pairs = vec![
        DiffPair::new(DiffAction::Equal, "a"),
        DiffPair::new(DiffAction::Added, "b"),
    ];
    insta::assert_snapshot!(
        serde_json::to_string(&pairs).unwrap(),
        @r###"[{"action":"Equal","value":"a"},{"action":"Added","value":"b"}]"###
    );
    let choice: Choice<char> = serde_json::from_str(r#"{"Substitute":["a","b"]}"#).unwrap();
    assert_eq!(choice, Choice::Substitute('a', 'b'));
}
