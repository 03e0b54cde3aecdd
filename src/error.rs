use thiserror::Error;

/// Returned when a [`SeqView`](crate::SeqView) would reach past its buffer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[error("invalid view: offset {offset} + length {len} exceeds buffer of length {buf_len}")]
pub struct InvalidView {
    /// The requested start offset.
    pub offset: usize,
    /// The requested length.
    pub len: usize,
    /// The length of the backing buffer.
    pub buf_len: usize,
}

#[test]
fn test_display() {
    let err = InvalidView {
        offset: 3,
        len: 4,
        buf_len: 5,
    };
    insta::assert_snapshot!(err.to_string(), @"invalid view: offset 3 + length 4 exceeds buffer of length 5");
}
