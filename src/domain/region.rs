//! Axis-aligned rectangles over grid cells.

use std::fmt;

/// Rectangle of grid cells with half-open bounds: rows `row_start..row_end`,
/// columns `col_start..col_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub row_start: usize,
    pub row_end: usize,
    pub col_start: usize,
    pub col_end: usize,
}

impl Region {
    pub fn new(row_start: usize, row_end: usize, col_start: usize, col_end: usize) -> Self {
        debug_assert!(row_start <= row_end && col_start <= col_end);
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// Single-cell region at `(row, col)`.
    pub fn cell(row: usize, col: usize) -> Self {
        Self::new(row, row + 1, col, col + 1)
    }

    pub fn rows(&self) -> usize {
        self.row_end - self.row_start
    }

    pub fn cols(&self) -> usize {
        self.col_end - self.col_start
    }

    pub fn area(&self) -> usize {
        self.rows() * self.cols()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        (self.row_start..self.row_end).contains(&row) && (self.col_start..self.col_end).contains(&col)
    }

    /// True if `other` lies completely inside `self`.
    pub fn encloses(&self, other: &Region) -> bool {
        other.row_start >= self.row_start
            && other.row_end <= self.row_end
            && other.col_start >= self.col_start
            && other.col_end <= self.col_end
    }

    /// Smallest region covering both `self` and the cell `(row, col)`.
    pub fn extend_to(&self, row: usize, col: usize) -> Self {
        Self::new(
            self.row_start.min(row),
            self.row_end.max(row + 1),
            self.col_start.min(col),
            self.col_end.max(col + 1),
        )
    }

    /// Divide at absolute column `col` into left and right halves.
    pub fn split_at_col(&self, col: usize) -> (Region, Region) {
        debug_assert!(col > self.col_start && col < self.col_end);
        (
            Region::new(self.row_start, self.row_end, self.col_start, col),
            Region::new(self.row_start, self.row_end, col, self.col_end),
        )
    }

    /// Divide at absolute row `row` into top and bottom halves.
    pub fn split_at_row(&self, row: usize) -> (Region, Region) {
        debug_assert!(row > self.row_start && row < self.row_end);
        (
            Region::new(self.row_start, row, self.col_start, self.col_end),
            Region::new(row, self.row_end, self.col_start, self.col_end),
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}..{}, cols {}..{}",
            self.row_start, self.row_end, self.col_start, self.col_end
        )
    }
}
