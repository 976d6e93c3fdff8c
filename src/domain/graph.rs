//! Pane graph: the binary split tree produced by the planner.
//!
//! Nodes live in a generational arena; edges are parent → child split
//! relations. The graph is read-only once built.

use std::collections::HashMap;
use std::fmt;

use generational_arena::{Arena, Index};
use termtree::Tree;
use tracing::instrument;

use crate::domain::grid::Matrix;
use crate::domain::region::Region;

/// Handle of a node inside a [`PaneGraph`].
pub type NodeId = Index;

/// Orientation of the divider line of a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SplitDirection {
    /// Vertical divider: first child left, second child right.
    Vertical,
    /// Horizontal divider: first child top, second child bottom.
    Horizontal,
}

impl fmt::Display for SplitDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitDirection::Vertical => f.write_str("vertical"),
            SplitDirection::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// A pane in the split tree: either a labeled leaf or a binary split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitNode {
    Leaf {
        label: char,
        region: Region,
    },
    Split {
        direction: SplitDirection,
        region: Region,
        /// Cells of the first child along the cut axis
        first_size: usize,
        /// Cells of the second child along the cut axis
        second_size: usize,
        first: NodeId,
        second: NodeId,
    },
}

impl SplitNode {
    pub fn region(&self) -> Region {
        match self {
            SplitNode::Leaf { region, .. } | SplitNode::Split { region, .. } => *region,
        }
    }

    pub fn label(&self) -> Option<char> {
        match self {
            SplitNode::Leaf { label, .. } => Some(*label),
            SplitNode::Split { .. } => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, SplitNode::Leaf { .. })
    }

    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self {
            SplitNode::Split { first, second, .. } => Some((*first, *second)),
            SplitNode::Leaf { .. } => None,
        }
    }

    /// Share of the first child: `first / (first + second)`.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            SplitNode::Split {
                first_size,
                second_size,
                ..
            } => Some(*first_size as f64 / (*first_size + *second_size) as f64),
            SplitNode::Leaf { .. } => None,
        }
    }

    /// Share of the second (newly created) pane in whole percent, kept
    /// within `1..=99` since tmux cannot create a 0% or 100% pane.
    pub fn new_pane_percent(&self) -> Option<u8> {
        match self {
            SplitNode::Split {
                first_size,
                second_size,
                ..
            } => {
                let total = first_size + second_size;
                let percent = (second_size * 100 + total / 2) / total;
                Some(percent.clamp(1, 99) as u8)
            }
            SplitNode::Leaf { .. } => None,
        }
    }

    fn describe(&self) -> String {
        match self {
            SplitNode::Leaf { label, region } => format!("{} ({})", label, region),
            SplitNode::Split {
                direction,
                region,
                first_size,
                second_size,
                ..
            } => format!("{} {}:{} ({})", direction, first_size, second_size, region),
        }
    }
}

#[derive(Debug, Clone)]
struct Slot {
    node: SplitNode,
    parent: Option<NodeId>,
}

/// One step of a pre-order walk.
#[derive(Debug, Clone, Copy)]
pub struct Visit<'a> {
    pub id: NodeId,
    pub node: &'a SplitNode,
    pub parent: Option<&'a SplitNode>,
    pub depth: usize,
}

/// The realized split tree plus a label → leaf index.
#[derive(Debug, Clone)]
pub struct PaneGraph {
    arena: Arena<Slot>,
    root: NodeId,
    leaves: HashMap<char, NodeId>,
}

impl PaneGraph {
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &SplitNode {
        &self.arena[self.root].node
    }

    pub fn node(&self, id: NodeId) -> Option<&SplitNode> {
        self.arena.get(id).map(|slot| &slot.node)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|slot| slot.parent)
    }

    /// Region of the whole window.
    pub fn bounds(&self) -> Region {
        self.root().region()
    }

    /// Number of nodes (leaves and splits).
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Leaf node for `label`.
    pub fn leaf(&self, label: char) -> Option<&SplitNode> {
        self.leaf_id(label).and_then(|id| self.node(id))
    }

    pub fn leaf_id(&self, label: char) -> Option<NodeId> {
        self.leaves.get(&label).copied()
    }

    /// Leaf labels in pre-order (left/top first).
    pub fn labels(&self) -> Vec<char> {
        self.iter().filter_map(|visit| visit.node.label()).collect()
    }

    /// Pre-order walk: every parent is yielded before its children,
    /// first child before second.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            graph: self,
            stack: vec![(self.root, 0)],
        }
    }

    /// Longest root-to-leaf path, counted in nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter().map(|visit| visit.depth + 1).max().unwrap_or(0)
    }

    /// Rebuild the label matrix by replaying split directions and sizes from
    /// the root region. Stored child regions are not consulted.
    pub fn replay(&self) -> Matrix {
        let bounds = self.bounds();
        let mut cells = vec![' '; bounds.area()];
        self.paint(self.root, bounds, bounds.cols(), &mut cells);
        Matrix::from_cells(bounds.rows(), bounds.cols(), cells)
    }

    fn paint(&self, id: NodeId, region: Region, width: usize, cells: &mut [char]) {
        match &self.arena[id].node {
            SplitNode::Leaf { label, .. } => {
                for row in region.row_start..region.row_end {
                    for col in region.col_start..region.col_end {
                        cells[row * width + col] = *label;
                    }
                }
            }
            SplitNode::Split {
                direction,
                first_size,
                first,
                second,
                ..
            } => {
                let (a, b) = match direction {
                    SplitDirection::Vertical => region.split_at_col(region.col_start + first_size),
                    SplitDirection::Horizontal => region.split_at_row(region.row_start + first_size),
                };
                self.paint(*first, a, width, cells);
                self.paint(*second, b, width, cells);
            }
        }
    }

    /// Render as a `termtree` for display.
    pub fn to_tree(&self) -> Tree<String> {
        self.subtree(self.root)
    }

    fn subtree(&self, id: NodeId) -> Tree<String> {
        let node = &self.arena[id].node;
        let tree = Tree::new(node.describe());
        match node.children() {
            Some((first, second)) => tree.with_leaves([self.subtree(first), self.subtree(second)]),
            None => tree,
        }
    }
}

/// Two graphs are equal when their trees have the same shape, cuts and labels.
impl PartialEq for PaneGraph {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().zip(other.iter()).all(|(a, b)| {
                a.depth == b.depth
                    && match (a.node, b.node) {
                        (SplitNode::Leaf { .. }, SplitNode::Leaf { .. }) => a.node == b.node,
                        (
                            SplitNode::Split {
                                direction: d1,
                                region: r1,
                                first_size: s1,
                                ..
                            },
                            SplitNode::Split {
                                direction: d2,
                                region: r2,
                                first_size: s2,
                                ..
                            },
                        ) => d1 == d2 && r1 == r2 && s1 == s2,
                        _ => false,
                    }
            })
    }
}

impl fmt::Display for PaneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree())
    }
}

pub struct PreOrder<'a> {
    graph: &'a PaneGraph,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = Visit<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let graph = self.graph;
        let (id, depth) = self.stack.pop()?;
        let slot = graph.arena.get(id)?;
        if let Some((first, second)) = slot.node.children() {
            // second pushed first so the first child is visited next
            self.stack.push((second, depth + 1));
            self.stack.push((first, depth + 1));
        }
        Some(Visit {
            id,
            node: &slot.node,
            parent: slot.parent.and_then(|p| graph.node(p)),
            depth,
        })
    }
}

/// Bottom-up builder used by the planner: children are inserted before the
/// split that owns them.
#[derive(Debug, Default)]
pub(crate) struct GraphBuilder {
    arena: Arena<Slot>,
}

impl GraphBuilder {
    pub(crate) fn leaf(&mut self, label: char, region: Region) -> NodeId {
        self.arena.insert(Slot {
            node: SplitNode::Leaf { label, region },
            parent: None,
        })
    }

    pub(crate) fn split(
        &mut self,
        direction: SplitDirection,
        region: Region,
        (first_size, second_size): (usize, usize),
        (first, second): (NodeId, NodeId),
    ) -> NodeId {
        let id = self.arena.insert(Slot {
            node: SplitNode::Split {
                direction,
                region,
                first_size,
                second_size,
                first,
                second,
            },
            parent: None,
        });
        for child in [first, second] {
            if let Some(slot) = self.arena.get_mut(child) {
                slot.parent = Some(id);
            }
        }
        id
    }

    pub(crate) fn finish(self, root: NodeId) -> PaneGraph {
        let leaves = self
            .arena
            .iter()
            .filter_map(|(id, slot)| slot.node.label().map(|label| (label, id)))
            .collect();
        PaneGraph {
            arena: self.arena,
            root,
            leaves,
        }
    }
}
