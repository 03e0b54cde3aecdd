use std::fmt;
use std::ops::Index;

use crate::InvalidView;

/// A non-owning window over a buffer of elements.
///
/// A view remembers where it starts in the backing buffer so that
/// positions found in a view (for instance by
/// [`longest_common_substring`](crate::algorithms::lcs::longest_common_substring))
/// can be mapped back into the original sequence with [`SeqView::offset`].
/// Views never change once created; narrowing a view derives a new one.
pub struct SeqView<'a, T> {
    buf: &'a [T],
    offset: usize,
    len: usize,
}

impl<'a, T> Clone for SeqView<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for SeqView<'a, T> {}

impl<'a, T> SeqView<'a, T> {
    /// Creates a view of `len` elements of `buf` starting at `offset`.
    ///
    /// Fails if the window does not fit into the buffer.
    pub fn new(buf: &'a [T], offset: usize, len: usize) -> Result<SeqView<'a, T>, InvalidView> {
        match offset.checked_add(len) {
            Some(end) if end <= buf.len() => Ok(SeqView { buf, offset, len }),
            _ => Err(InvalidView {
                offset,
                len,
                buf_len: buf.len(),
            }),
        }
    }

    /// Creates a view covering the entire buffer.
    pub fn full(buf: &'a [T]) -> SeqView<'a, T> {
        SeqView {
            buf,
            offset: 0,
            len: buf.len(),
        }
    }

    /// Returns the backing buffer.
    pub fn buffer(&self) -> &'a [T] {
        self.buf
    }

    /// Returns the start of the view within the backing buffer.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the number of elements in the view.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the view has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the viewed elements as a slice.
    pub fn as_slice(&self) -> &'a [T] {
        &self.buf[self.offset..self.offset + self.len]
    }

    /// Returns the element at `index` (relative to the view).
    pub fn get(&self, index: usize) -> Option<&'a T> {
        self.as_slice().get(index)
    }

    /// Iterates over the viewed elements.
    pub fn iter(&self) -> std::slice::Iter<'a, T> {
        self.as_slice().iter()
    }

    /// Derives a view of `len` elements starting at `start` (relative to this view).
    ///
    /// # Panics
    ///
    /// Panics if the derived view would extend past the end of this view.
    pub fn sub(&self, start: usize, len: usize) -> SeqView<'a, T> {
        assert!(
            start <= self.len && len <= self.len - start,
            "sub view {}+{} out of range for view of length {}",
            start,
            len,
            self.len
        );
        SeqView {
            buf: self.buf,
            offset: self.offset + start,
            len,
        }
    }

    /// Derives a view of the first `len` elements.
    ///
    /// # Panics
    ///
    /// Panics if `len` is larger than the view.
    pub fn head(&self, len: usize) -> SeqView<'a, T> {
        self.sub(0, len)
    }

    /// Derives a view of everything from `start` to the end.
    ///
    /// # Panics
    ///
    /// Panics if `start` is past the end of the view.
    pub fn tail(&self, start: usize) -> SeqView<'a, T> {
        assert!(
            start <= self.len,
            "tail start {} out of range for view of length {}",
            start,
            self.len
        );
        self.sub(start, self.len - start)
    }
}

impl<'a, T> Index<usize> for SeqView<'a, T> {
    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<'a, T> From<&'a [T]> for SeqView<'a, T> {
    fn from(buf: &'a [T]) -> SeqView<'a, T> {
        SeqView::full(buf)
    }
}

impl<'a, T> IntoIterator for SeqView<'a, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: fmt::Debug> fmt::Debug for SeqView<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeqView")
            .field("offset", &self.offset)
            .field("items", &self.as_slice())
            .finish()
    }
}

#[test]
fn test_new_rejects_overrun() {
    let buf = [1, 2, 3];
    assert!(SeqView::new(&buf[..], 0, 3).is_ok());
    assert!(SeqView::new(&buf[..], 3, 0).is_ok());
    assert_eq!(
        SeqView::new(&buf[..], 2, 2).unwrap_err(),
        InvalidView {
            offset: 2,
            len: 2,
            buf_len: 3
        }
    );
    assert!(SeqView::new(&buf[..], usize::MAX, 2).is_err());
}

#[test]
fn test_derived_views() {
    let buf = ['a', 'b', 'c', 'd', 'e'];
    let view = SeqView::new(&buf[..], 1, 3).unwrap();
    assert_eq!(view.as_slice(), &['b', 'c', 'd']);
    assert_eq!(view[0], 'b');
    assert_eq!(view.get(3), None);

    let head = view.head(2);
    assert_eq!(head.offset(), 1);
    assert_eq!(head.as_slice(), &['b', 'c']);

    let tail = view.tail(1);
    assert_eq!(tail.offset(), 2);
    assert_eq!(tail.as_slice(), &['c', 'd']);

    let empty = view.tail(3);
    assert!(empty.is_empty());
    assert_eq!(empty.offset(), 4);

    let sub = view.sub(1, 1);
    assert_eq!(sub.iter().collect::<String>(), "c");
}

#[test]
#[should_panic]
fn test_sub_out_of_range() {
    let buf = [1, 2, 3];
    SeqView::full(&buf[..]).sub(2, 2);
}

#[test]
fn test_debug() {
    let buf = [1, 2, 3];
    let view = SeqView::new(&buf[..], 1, 2).unwrap();
    insta::assert_snapshot!(format!("{:?}", view), @"SeqView { offset: 1, items: [2, 3] }");
}
