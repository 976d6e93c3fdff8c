//! Split planner: guillotine-cut recursion from a rectangular tiling to a
//! binary split tree.
//!
//! Cut search order is fixed: vertical dividers at increasing column offsets
//! first, then horizontal dividers at increasing row offsets. The first cut
//! that no pane straddles wins.

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::graph::{GraphBuilder, NodeId, PaneGraph, SplitDirection};
use crate::domain::grid::Matrix;
use crate::domain::region::Region;
use crate::domain::validator::{validate_rectangles, Tiling};

/// A full cut through a region at an absolute column or row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cut {
    Column(usize),
    Row(usize),
}

impl Cut {
    fn direction(self) -> SplitDirection {
        match self {
            Cut::Column(_) => SplitDirection::Vertical,
            Cut::Row(_) => SplitDirection::Horizontal,
        }
    }

    fn divide(self, region: Region) -> (Region, Region) {
        match self {
            Cut::Column(col) => region.split_at_col(col),
            Cut::Row(row) => region.split_at_row(row),
        }
    }

    /// Sizes of both halves along the cut axis.
    fn sizes(self, region: Region) -> (usize, usize) {
        match self {
            Cut::Column(col) => (col - region.col_start, region.col_end - col),
            Cut::Row(row) => (row - region.row_start, region.row_end - row),
        }
    }
}

/// Parse, validate and plan a grid text in one step.
pub fn plan_grid(text: &str) -> DomainResult<PaneGraph> {
    let matrix = Matrix::parse(text)?;
    plan(&matrix)
}

/// Validate the matrix and build its split tree.
#[instrument(level = "debug", skip(matrix), fields(rows = matrix.rows(), cols = matrix.cols()))]
pub fn plan(matrix: &Matrix) -> DomainResult<PaneGraph> {
    let tiling = validate_rectangles(matrix)?;
    plan_tiling(matrix.bounds(), &tiling)
}

/// Build the split tree for a validated tiling of `bounds`.
pub fn plan_tiling(bounds: Region, tiling: &Tiling) -> DomainResult<PaneGraph> {
    let mut panes: Vec<(char, Region)> =
        tiling.iter().map(|(label, region)| (*label, *region)).collect();
    let mut builder = GraphBuilder::default();
    let root = split_region(&mut builder, bounds, &mut panes)?;
    let graph = builder.finish(root);
    debug!(
        "plan: {} panes, {} nodes, depth {}",
        graph.leaf_count(),
        graph.len(),
        graph.depth()
    );
    Ok(graph)
}

/// Panes are reordered in place so each half recurses on a subslice; no
/// allocation happens below `plan_tiling`.
fn split_region(
    builder: &mut GraphBuilder,
    region: Region,
    panes: &mut [(char, Region)],
) -> DomainResult<NodeId> {
    match &*panes {
        [] => {
            return Err(DomainError::CoverageMismatch {
                covered: 0,
                expected: region.area(),
            })
        }
        [(label, pane)] => {
            if *pane != region {
                return Err(DomainError::CoverageMismatch {
                    covered: pane.area(),
                    expected: region.area(),
                });
            }
            return Ok(builder.leaf(*label, region));
        }
        _ => {}
    }

    let cut = find_cut(region, panes).ok_or(DomainError::UnsliceablePartition { region })?;
    trace!("{:?} through {}", cut, region);

    let (first_region, second_region) = cut.divide(region);
    let mid = itertools::partition(panes.iter_mut(), |(_, pane)| first_region.encloses(pane));
    let (first_panes, second_panes) = panes.split_at_mut(mid);

    let first = split_region(builder, first_region, first_panes)?;
    let second = split_region(builder, second_region, second_panes)?;
    Ok(builder.split(cut.direction(), region, cut.sizes(region), (first, second)))
}

fn find_cut(region: Region, panes: &[(char, Region)]) -> Option<Cut> {
    let vertical = (region.col_start + 1..region.col_end)
        .find(|&col| {
            panes
                .iter()
                .all(|(_, pane)| pane.col_end <= col || pane.col_start >= col)
        })
        .map(Cut::Column);

    vertical.or_else(|| {
        (region.row_start + 1..region.row_end)
            .find(|&row| {
                panes
                    .iter()
                    .all(|(_, pane)| pane.row_end <= row || pane.row_start >= row)
            })
            .map(Cut::Row)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panes(list: &[(char, Region)]) -> Vec<(char, Region)> {
        list.to_vec()
    }

    #[test]
    fn vertical_cut_preferred_over_horizontal() {
        // AB
        // CD: both a column and a row cut exist
        let region = Region::new(0, 2, 0, 2);
        let list = panes(&[
            ('A', Region::cell(0, 0)),
            ('B', Region::cell(0, 1)),
            ('C', Region::cell(1, 0)),
            ('D', Region::cell(1, 1)),
        ]);
        assert_eq!(find_cut(region, &list), Some(Cut::Column(1)));
    }

    #[test]
    fn straddling_pane_blocks_cut() {
        let region = Region::new(0, 2, 0, 3);
        let list = panes(&[('A', Region::new(0, 2, 0, 2)), ('B', Region::new(0, 2, 2, 3))]);
        assert_eq!(find_cut(region, &list), Some(Cut::Column(2)));
    }

    #[test]
    fn sizes_are_measured_along_cut_axis() {
        let region = Region::new(1, 4, 0, 5);
        assert_eq!(Cut::Row(3).sizes(region), (2, 1));
        assert_eq!(Cut::Column(1).sizes(region), (1, 4));
    }
}
