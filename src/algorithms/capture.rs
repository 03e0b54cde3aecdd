use std::convert::Infallible;

use crate::algorithms::hook::DiffHook;
use crate::{DiffAction, DiffPair};

/// A run reported by the recursive differ.
///
/// This is used by [`Capture`].
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DiffOp {
    /// A run is equal (see [`DiffHook::equal`])
    Equal {
        old_index: usize,
        new_index: usize,
        len: usize,
    },
    /// A run was deleted (see [`DiffHook::delete`])
    Delete {
        old_index: usize,
        old_len: usize,
        new_index: usize,
    },
    /// A run was inserted (see [`DiffHook::insert`])
    Insert {
        old_index: usize,
        new_index: usize,
        new_len: usize,
    },
}

impl DiffOp {
    /// Returns the action every element of this run carries.
    pub fn action(&self) -> DiffAction {
        match *self {
            DiffOp::Equal { .. } => DiffAction::Equal,
            DiffOp::Delete { .. } => DiffAction::Removed,
            DiffOp::Insert { .. } => DiffAction::Added,
        }
    }

    /// Expands the run into one [`DiffPair`] per element.
    ///
    /// Equal runs take their values from `old`.
    ///
    /// # Panics
    ///
    /// Panics if the run does not fit the given sequences.
    pub fn iter_pairs<'x, T>(
        &self,
        old: &'x [T],
        new: &'x [T],
    ) -> impl Iterator<Item = DiffPair<&'x T>> {
        let action = self.action();
        let values = match *self {
            DiffOp::Equal { old_index, len, .. } => &old[old_index..old_index + len],
            DiffOp::Delete {
                old_index, old_len, ..
            } => &old[old_index..old_index + old_len],
            DiffOp::Insert {
                new_index, new_len, ..
            } => &new[new_index..new_index + new_len],
        };
        values.iter().map(move |value| DiffPair::new(action, value))
    }
}

/// A [`DiffHook`] that captures all reported runs.
#[derive(Default, Clone, Debug)]
pub struct Capture(Vec<DiffOp>);

impl Capture {
    /// Creates a new capture hook.
    pub fn new() -> Capture {
        Capture::default()
    }

    /// Converts the capture hook into a vector of ops.
    pub fn into_ops(self) -> Vec<DiffOp> {
        self.0
    }

    /// Accesses the captured operations.
    pub fn ops(&self) -> &[DiffOp] {
        &self.0
    }
}

impl DiffHook for Capture {
    type Error = Infallible;

    fn equal(&mut self, old_index: usize, new_index: usize, len: usize) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Equal {
            old_index,
            new_index,
            len,
        });
        Ok(())
    }

    fn delete(
        &mut self,
        old_index: usize,
        old_len: usize,
        new_index: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Delete {
            old_index,
            old_len,
            new_index,
        });
        Ok(())
    }

    fn insert(
        &mut self,
        old_index: usize,
        new_index: usize,
        new_len: usize,
    ) -> Result<(), Self::Error> {
        self.0.push(DiffOp::Insert {
            old_index,
            new_index,
            new_len,
        });
        Ok(())
    }
}

#[test]
fn test_iter_pairs() {
    let old = ['a', 'b', 'c'];
    let new = ['b', 'x'];
    let ops = [
        DiffOp::Delete {
            old_index: 0,
            old_len: 1,
            new_index: 0,
        },
        DiffOp::Equal {
            old_index: 1,
            new_index: 0,
            len: 1,
        },
        DiffOp::Delete {
            old_index: 2,
            old_len: 1,
            new_index: 1,
        },
        DiffOp::Insert {
            old_index: 3,
            new_index: 1,
            new_len: 1,
        },
    ];
    let rendered = ops
        .iter()
        .flat_map(|op| op.iter_pairs(&old, &new))
        .map(|pair| pair.to_string())
        .collect::<String>();
    assert_eq!(rendered, "-ab-c+x");
}
