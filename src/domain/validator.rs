//! Rectangle validation: every label must occupy exactly one rectangle.

use std::collections::BTreeMap;

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::grid::Matrix;
use crate::domain::region::Region;

/// Validated tiling: label → the one region it occupies.
pub type Tiling = BTreeMap<char, Region>;

/// Check that each label's cells form a single filled rectangle.
///
/// Single pass tracking every label's bounding box and cell count; a label is
/// rectangular iff its count equals its bounding-box area. Labels are checked
/// in sorted order, so the first reported offender is deterministic.
#[instrument(level = "debug", skip(matrix))]
pub fn validate_rectangles(matrix: &Matrix) -> DomainResult<Tiling> {
    let mut boxes: BTreeMap<char, (Region, usize)> = BTreeMap::new();
    for (row, col, label) in matrix.iter() {
        boxes
            .entry(label)
            .and_modify(|(region, count)| {
                *region = region.extend_to(row, col);
                *count += 1;
            })
            .or_insert((Region::cell(row, col), 1));
    }

    let mut tiling = Tiling::new();
    for (label, (region, count)) in boxes {
        if count != region.area() {
            debug!("label {:?}: {} cells in {}", label, count, region);
            return Err(DomainError::NonRectangularPane { label });
        }
        tiling.insert(label, region);
    }

    let covered: usize = tiling.values().map(Region::area).sum();
    let expected = matrix.rows() * matrix.cols();
    if covered != expected {
        return Err(DomainError::CoverageMismatch { covered, expected });
    }

    debug!("validate_rectangles: {} panes", tiling.len());
    Ok(tiling)
}
