//! The reusable dynamic programming buffer.
use std::ops::{Index, IndexMut};

/// A dense two dimensional table of costs.
///
/// The table only ever grows: asking for a smaller area than already
/// allocated reuses the existing allocation.  Algorithms initialize every
/// cell they read, so stale values from earlier runs are never observed.
/// After an algorithm ran the cells it wrote stay in place until the next
/// algorithm uses the table, which is what backtracing relies on.
#[derive(Debug, Default, Clone)]
pub struct Table {
    cells: Vec<usize>,
    rows: usize,
    cols: usize,
}

impl Table {
    /// Creates an empty table.
    pub fn new() -> Table {
        Table::default()
    }

    /// Number of rows currently allocated.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns currently allocated.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Makes sure at least `rows` x `cols` cells are addressable.
    ///
    /// Growing a dimension discards the previous contents.
    pub fn reserve(&mut self, rows: usize, cols: usize) {
        if rows <= self.rows && cols <= self.cols {
            return;
        }
        let rows = rows.max(self.rows);
        let cols = cols.max(self.cols);
        log::debug!(
            "growing table from {}x{} to {}x{}",
            self.rows,
            self.cols,
            rows,
            cols
        );
        self.cells.clear();
        self.cells.resize(rows * cols, 0);
        self.rows = rows;
        self.cols = cols;
    }
}

impl Index<(usize, usize)> for Table {
    type Output = usize;

    #[inline(always)]
    fn index(&self, (row, col): (usize, usize)) -> &usize {
        debug_assert!(row < self.rows && col < self.cols);
        &self.cells[row * self.cols + col]
    }
}

impl IndexMut<(usize, usize)> for Table {
    #[inline(always)]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut usize {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.cells[row * self.cols + col]
    }
}

#[test]
fn test_grows_never_shrinks() {
    let mut table = Table::new();
    table.reserve(3, 2);
    assert_eq!((table.rows(), table.cols()), (3, 2));
    table[(2, 1)] = 7;
    table.reserve(2, 2);
    assert_eq!((table.rows(), table.cols()), (3, 2));
    assert_eq!(table[(2, 1)], 7);
    table.reserve(1, 5);
    assert_eq!((table.rows(), table.cols()), (3, 5));
}
