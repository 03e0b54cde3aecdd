//! Dynamic programming algorithms over sequences.
//!
//! The implementations in this module are relatively low level.  Every
//! algorithm takes the [`Table`] it may scribble into, the two
//! [`SeqView`](crate::SeqView)s to compare and the element equality as a
//! closure.  Weighted algorithms additionally take a cost closure that
//! prices a [`Choice`](crate::Choice).  Most users want the
//! [`Engine`](crate::Engine) instead, which owns a table and offers the
//! same operations with default equality and unit costs.
//!
//! The recursive differ reports its output through a [`DiffHook`].  The
//! hook does not get access to the values but only the indexes, use
//! [`Capture`] together with [`DiffOp::iter_pairs`] to get at them.

mod capture;
mod hook;
mod table;

pub use capture::*;
pub use hook::*;
pub use table::*;

pub mod choices;
pub mod lcs;
pub mod levenshtein;
pub mod recursive;
