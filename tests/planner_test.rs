//! Tests for split planning: grid text to pane tree

use std::collections::HashSet;

use rstest::rstest;

use gridmux::domain::{
    plan, plan_grid, plan_tiling, validate_rectangles, DomainError, GridDefect, Matrix, Region,
    SplitDirection, SplitNode,
};
use gridmux::util::testing;

fn split_of(node: &SplitNode) -> (SplitDirection, usize, usize) {
    match node {
        SplitNode::Split {
            direction,
            first_size,
            second_size,
            ..
        } => (*direction, *first_size, *second_size),
        SplitNode::Leaf { label, .. } => panic!("expected split, got leaf {}", label),
    }
}

#[test]
fn given_two_columns_when_planning_then_vertical_split_with_half_ratio() {
    testing::init_test_setup();

    let graph = plan_grid("AB").unwrap();

    let root = graph.root();
    assert_eq!(split_of(root), (SplitDirection::Vertical, 1, 1));
    assert_eq!(root.ratio(), Some(0.5));
    assert_eq!(graph.labels(), vec!['A', 'B']);
}

#[test]
fn given_two_rows_when_planning_then_horizontal_split() {
    let graph = plan_grid("A\nB").unwrap();

    assert_eq!(split_of(graph.root()), (SplitDirection::Horizontal, 1, 1));
    assert_eq!(graph.labels(), vec!['A', 'B']);
}

#[test]
fn given_wide_top_and_full_bottom_when_planning_then_nested_splits() {
    testing::init_test_setup();
    let graph = plan_grid("AAB\nAAB\nCCC").unwrap();

    let root = graph.root();
    assert_eq!(split_of(root), (SplitDirection::Horizontal, 2, 1));
    assert!((root.ratio().unwrap() - 2.0 / 3.0).abs() < 1e-9);

    let (top, bottom) = root.children().unwrap();
    let top = graph.node(top).unwrap();
    assert_eq!(split_of(top), (SplitDirection::Vertical, 2, 1));
    assert_eq!(top.region(), Region::new(0, 2, 0, 3));

    let bottom = graph.node(bottom).unwrap();
    assert_eq!(bottom.label(), Some('C'));
    assert_eq!(bottom.region(), Region::new(2, 3, 0, 3));

    assert_eq!(graph.labels(), vec!['A', 'B', 'C']);
}

#[test]
fn given_single_pane_when_planning_then_root_is_leaf() {
    let graph = plan_grid("AA\nAA").unwrap();

    assert!(graph.root().is_leaf());
    assert_eq!(graph.len(), 1);
    assert_eq!(graph.depth(), 1);
}

#[test]
fn given_both_cuts_possible_when_planning_then_vertical_cut_first() {
    let graph = plan_grid("AB\nCD").unwrap();

    assert_eq!(split_of(graph.root()), (SplitDirection::Vertical, 1, 1));
    assert_eq!(graph.labels(), vec!['A', 'C', 'B', 'D']);
}

#[test]
fn given_pinwheel_when_planning_then_unsliceable() {
    let result = plan_grid("AAB\nDEB\nDCC");

    assert_eq!(
        result,
        Err(DomainError::UnsliceablePartition {
            region: Region::new(0, 3, 0, 3)
        })
    );
}

#[test]
fn given_pinwheel_inside_sliceable_grid_when_planning_then_reports_inner_region() {
    let result = plan_grid("AABX\nDEBX\nDCCX");

    assert_eq!(
        result,
        Err(DomainError::UnsliceablePartition {
            region: Region::new(0, 3, 0, 3)
        })
    );
}

#[rstest]
#[case::ragged("AB\nA", DomainError::MalformedGrid(GridDefect::RaggedRow { line: 2, expected: 2, found: 1 }))]
#[case::disconnected("CAC", DomainError::NonRectangularPane { label: 'C' })]
#[case::empty("", DomainError::MalformedGrid(GridDefect::Empty))]
fn given_invalid_grid_when_planning_then_rejected(#[case] text: &str, #[case] expected: DomainError) {
    assert_eq!(plan_grid(text), Err(expected));
}

#[rstest]
#[case("AB")]
#[case("AAB\nAAB\nCCC")]
#[case("AB\nCD")]
#[case("AAAA\nBCDD\nBCEE")]
#[case("1122\n1134\n5534")]
fn given_sliceable_grid_when_replaying_tree_then_reproduces_matrix(#[case] text: &str) {
    let matrix = Matrix::parse(text).unwrap();

    let graph = plan(&matrix).unwrap();

    assert_eq!(graph.replay(), matrix);
}

#[test]
fn given_same_grid_when_planning_twice_then_identical_trees() {
    let text = "AAAA\nBCDD\nBCEE";

    let first = plan_grid(text).unwrap();
    let second = plan_grid(text).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_string(), second.to_string());
}

#[test]
fn given_planned_grid_when_collecting_leaves_then_each_label_once() {
    let matrix = Matrix::parse("AAAA\nBCDD\nBCEE").unwrap();

    let graph = plan(&matrix).unwrap();

    let labels = graph.labels();
    let unique: HashSet<char> = labels.iter().copied().collect();
    assert_eq!(labels.len(), unique.len());
    assert_eq!(unique, matrix.labels().into_iter().collect::<HashSet<char>>());
}

#[test]
fn given_tiling_with_gap_when_planning_tiling_then_coverage_mismatch() {
    let matrix = Matrix::parse("AB").unwrap();
    let mut tiling = validate_rectangles(&matrix).unwrap();
    tiling.remove(&'B');

    let result = plan_tiling(matrix.bounds(), &tiling);

    assert!(matches!(result, Err(DomainError::CoverageMismatch { .. })));
}

/// One row of `n` distinct single-cell panes, labelled with CJK ideographs.
fn strip(n: u32) -> String {
    (0..n)
        .map(|i| char::from_u32(0x4E00 + i).expect("valid code point"))
        .collect()
}

#[test]
fn given_long_strip_of_panes_when_planning_then_chains_vertical_splits() {
    let matrix = Matrix::parse(&strip(500)).unwrap();

    let graph = plan(&matrix).unwrap();

    assert_eq!(graph.leaf_count(), 500);
    assert_eq!(graph.depth(), 500);
    assert_eq!(graph.replay(), matrix);
}

#[test]
fn given_long_strip_when_planning_on_worker_thread_then_succeeds() {
    let workspace = gridmux::domain::Workspace {
        sessions: vec![gridmux::domain::SessionSpec {
            name: "dev".into(),
            windows: vec![gridmux::domain::WindowSpec {
                name: "strip".into(),
                grid: strip(500),
                commands: Vec::new(),
            }],
        }],
    };

    let plan = gridmux::application::services::LayoutService::new()
        .plan_workspace(&workspace, true)
        .unwrap();

    assert_eq!(plan.window_count(), 1);
}
