//! Dense row-major score buffer used by the DP engine

use crate::scoring::Score;
use std::ops::{Index, IndexMut};

/// A `rows x cols` grid of scores stored row-major: cell `(row, col)` lives at
/// `row * cols + col`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Score>,
}

impl DpMatrix {
    /// Allocate a matrix with every cell set to `fill`.
    pub fn new(rows: usize, cols: usize, fill: Score) -> Self {
        Self {
            rows,
            cols,
            data: vec![fill; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols);
        row * self.cols + col
    }

    /// Bounds-checked lookup.
    pub fn get(&self, row: usize, col: usize) -> Option<Score> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// One full row as a slice.
    pub fn row(&self, row: usize) -> &[Score] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }
}

impl Index<(usize, usize)> for DpMatrix {
    type Output = Score;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &Score {
        &self.data[self.offset(row, col)]
    }
}

impl IndexMut<(usize, usize)> for DpMatrix {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Score {
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }
}
