//! Grid text parsing into a label matrix.

use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::error::{DomainResult, GridDefect};
use crate::domain::region::Region;

/// Immutable R×C matrix of pane labels, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl Matrix {
    /// Parse grid text into a matrix.
    ///
    /// Leading and trailing blank lines are dropped and every line is trimmed,
    /// since whitespace is never a label. Each remaining character is one cell.
    ///
    /// # Errors
    /// `MalformedGrid` if nothing remains, if rows differ in length, or if a
    /// cell is not a letter or digit. Line and column numbers are 1-based and
    /// count from the first non-blank line.
    #[instrument(level = "debug", skip(text))]
    pub fn parse(text: &str) -> DomainResult<Self> {
        let mut cells = Vec::new();
        let mut cols: Option<usize> = None;
        let mut rows = 0;

        for (idx, line) in text.trim().lines().map(str::trim).enumerate() {
            let row: Vec<char> = line.chars().collect();
            let expected = *cols.get_or_insert(row.len());
            if row.len() != expected {
                return Err(GridDefect::RaggedRow {
                    line: idx + 1,
                    expected,
                    found: row.len(),
                }
                .into());
            }
            if let Some((col, &label)) = row.iter().find_position(|c| !c.is_alphanumeric()) {
                return Err(GridDefect::InvalidLabel {
                    line: idx + 1,
                    column: col + 1,
                    label,
                }
                .into());
            }
            cells.extend(row);
            rows += 1;
        }

        let cols = match cols {
            Some(cols) if cols > 0 => cols,
            _ => return Err(GridDefect::Empty.into()),
        };
        debug!("parse: {}x{} grid", rows, cols);
        Ok(Self { rows, cols, cells })
    }

    /// Build from row-major cells. Caller guarantees `cells.len() == rows * cols`.
    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<char>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Label at `(row, col)`, `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if row < self.rows && col < self.cols {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Region covering the whole matrix.
    pub fn bounds(&self) -> Region {
        Region::new(0, self.rows, 0, self.cols)
    }

    /// All cells as `(row, col, label)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &label)| (i / self.cols, i % self.cols, label))
    }

    /// Distinct labels in order of first appearance.
    pub fn labels(&self) -> Vec<char> {
        self.cells.iter().copied().unique().collect()
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .cells
            .chunks(self.cols)
            .map(|row| row.iter().collect::<String>())
            .join("\n");
        f.write_str(&text)
    }
}
