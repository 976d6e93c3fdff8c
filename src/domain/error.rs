//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::region::Region;

/// Reason a grid text could not be turned into a matrix.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridDefect {
    #[error("grid is empty")]
    Empty,

    #[error("line {line} has {found} columns, expected {expected}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}, column {column}: '{label}' is not a valid pane label (letters and digits only)")]
    InvalidLabel {
        line: usize,
        column: usize,
        label: char,
    },
}

/// Domain errors represent layout violations.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed grid: {0}")]
    MalformedGrid(GridDefect),

    #[error("pane '{label}' does not form a single rectangle")]
    NonRectangularPane { label: char },

    #[error("layout cannot be built from straight splits: no full cut through {region}")]
    UnsliceablePartition { region: Region },

    #[error("pane regions cover {covered} cells, grid has {expected}")]
    CoverageMismatch { covered: usize, expected: usize },
}

impl From<GridDefect> for DomainError {
    fn from(defect: GridDefect) -> Self {
        DomainError::MalformedGrid(defect)
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
