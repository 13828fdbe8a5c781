use generational_arena::{Arena, Index};
use std::fmt;
use tracing::instrument;

use crate::comparator::{Comparator, NaturalOrder};
use crate::errors::{TreeError, TreeResult};

/// Stable handle of a node inside its tree's arena.
pub type NodeId = Index;

/// Tree node in the arena-based 2-3 tree.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    /// One or two values, ascending under the tree's comparator
    pub(crate) data: Vec<T>,
    /// Indices of child nodes in the arena, left to right
    pub(crate) children: Vec<NodeId>,
    /// Index of parent node in the arena, None for the root
    pub(crate) parent: Option<NodeId>,
    /// Longest path to a descendant leaf, 0 for leaves
    pub(crate) height: usize,
}

impl<T> TreeNode<T> {
    pub(crate) fn leaf(data: Vec<T>, parent: Option<NodeId>) -> Self {
        Self {
            data,
            children: Vec::new(),
            parent,
            height: 0,
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn first_data(&self) -> Option<&T> {
        self.data.first()
    }

    pub fn second_data(&self) -> Option<&T> {
        self.data.get(1)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.children.first().copied()
    }

    pub fn second_child(&self) -> Option<NodeId> {
        self.children.get(1).copied()
    }

    pub fn third_child(&self) -> Option<NodeId> {
        self.children.get(2).copied()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn datum_count(&self) -> usize {
        self.data.len()
    }
}

impl<T: fmt::Display> fmt::Display for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

/// Shape of a node as required by the tree invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// No children, one or two values
    Leaf,
    /// One value, two children
    TwoNode,
    /// Two values, three children
    ThreeNode,
}

/// Arena-based 2-3 tree.
///
/// All nodes live in one generational arena; children and parents are
/// arena indices, so a split can relink nodes without fighting ownership.
/// The root changes whenever a split reaches it, and `insert` hands back
/// the new root.
pub struct TwoThreeTree<T, C = NaturalOrder> {
    /// Arena storage for all tree nodes
    pub(crate) arena: Arena<TreeNode<T>>,
    /// Index of the current root node
    pub(crate) root: NodeId,
    pub(crate) comparator: C,
    pub(crate) len: usize,
}

impl<T: Ord> TwoThreeTree<T, NaturalOrder> {
    /// Single-leaf tree ordered by `T`'s own `Ord`.
    pub fn new(value: T) -> Self {
        Self::with_comparator(value, NaturalOrder)
    }
}

impl<T, C: Comparator<T>> TwoThreeTree<T, C> {
    /// Single-leaf tree holding `value`, ordered by `comparator`.
    pub fn with_comparator(value: T, comparator: C) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(TreeNode::leaf(vec![value], None));
        Self {
            arena,
            root,
            comparator,
            len: 1,
        }
    }
}

impl<T, C> TwoThreeTree<T, C> {
    /// Assembles a tree from prepared nodes. Shape is not checked.
    pub(crate) fn from_parts(
        arena: Arena<TreeNode<T>>,
        root: NodeId,
        comparator: C,
        len: usize,
    ) -> Self {
        Self {
            arena,
            root,
            comparator,
            len,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn root_node(&self) -> &TreeNode<T> {
        &self.arena[self.root]
    }

    #[instrument(level = "trace", skip(self))]
    pub fn node(&self, idx: NodeId) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    pub(crate) fn get(&self, idx: NodeId) -> TreeResult<&TreeNode<T>> {
        self.arena.get(idx).ok_or(TreeError::NodeNotFound(idx))
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Number of values stored, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// A tree always holds at least its seed value.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the root: 0 for a single leaf.
    pub fn height(&self) -> usize {
        self.root_node().height
    }

    /// Number of levels, `height() + 1`.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, node_idx: NodeId) -> usize {
        if let Some(node) = self.node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Leaf nodes from left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self) -> Vec<NodeId> {
        let mut leaves = Vec::new();
        self.collect_leaves(self.root, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, node_idx: NodeId, leaves: &mut Vec<NodeId>) {
        if let Some(node) = self.node(node_idx) {
            if node.children.is_empty() {
                leaves.push(node_idx);
            } else {
                for &child in &node.children {
                    self.collect_leaves(child, leaves);
                }
            }
        }
    }

    /// Classifies a node's shape.
    ///
    /// Every child of an inner node must resolve and hold at least one
    /// value, so that a split never meets a keyless child halfway through.
    #[instrument(level = "trace", skip(self))]
    pub fn classify(&self, idx: NodeId) -> TreeResult<NodeKind> {
        let node = self.get(idx)?;
        let invalid = || TreeError::InvalidNodeState {
            node: idx,
            data: node.data.len(),
            children: node.children.len(),
        };

        let kind = match (node.data.len(), node.children.len()) {
            (1 | 2, 0) => NodeKind::Leaf,
            (1, 2) => NodeKind::TwoNode,
            (2, 3) => NodeKind::ThreeNode,
            _ => return Err(invalid()),
        };
        for &child in &node.children {
            match self.arena.get(child) {
                Some(c) if !c.data.is_empty() => {}
                _ => return Err(invalid()),
            }
        }
        Ok(kind)
    }

    /// Walks parent links up to the topmost node.
    pub(crate) fn top(&self, mut idx: NodeId) -> NodeId {
        while let Some(parent) = self.arena[idx].parent {
            idx = parent;
        }
        idx
    }

    /// Recomputes `height` from `idx` up to the root.
    pub(crate) fn refresh_heights(&mut self, from: NodeId) {
        let mut current = Some(from);
        while let Some(idx) = current {
            let height = self.child_height(idx);
            let node = &mut self.arena[idx];
            node.height = height;
            current = node.parent;
        }
    }

    pub(crate) fn child_height(&self, idx: NodeId) -> usize {
        let children = &self.arena[idx].children;
        if children.is_empty() {
            0
        } else {
            1 + max_height(children.iter().map(|&c| &self.arena[c]))
        }
    }
}

/// Largest height among `nodes`, 0 when there are none.
pub fn max_height<'a, T: 'a>(nodes: impl IntoIterator<Item = &'a TreeNode<T>>) -> usize {
    nodes.into_iter().map(|n| n.height).max().unwrap_or(0)
}

impl<T, C> fmt::Debug for TwoThreeTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwoThreeTree")
            .field("root", &self.root)
            .field("len", &self.len)
            .field("nodes", &self.arena.len())
            .finish()
    }
}
