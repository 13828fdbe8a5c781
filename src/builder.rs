use generational_arena::Arena;
use tracing::instrument;

use crate::arena::{NodeId, TreeNode, TwoThreeTree};
use crate::comparator::{Comparator, NaturalOrder};

/// Declarative shape of a (sub)tree: a node's values and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout<T> {
    pub data: Vec<T>,
    pub children: Vec<Layout<T>>,
}

impl<T> Layout<T> {
    pub fn leaf(data: Vec<T>) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }

    pub fn node(data: Vec<T>, children: Vec<Layout<T>>) -> Self {
        Self { data, children }
    }
}

impl<T: Ord> Layout<T> {
    /// Builds the layout under the natural order of `T`.
    pub fn build(self) -> TwoThreeTree<T> {
        TreeBuilder::new(NaturalOrder).build(self)
    }
}

/// Assembles trees from a `Layout`, node for node.
///
/// Parent links and heights are derived from the layout; the shape itself
/// is taken as given, so a malformed layout is only reported by the next
/// operation that classifies the offending node.
pub struct TreeBuilder<C> {
    comparator: C,
}

impl Default for TreeBuilder<NaturalOrder> {
    fn default() -> Self {
        Self::new(NaturalOrder)
    }
}

impl<C> TreeBuilder<C> {
    pub fn new(comparator: C) -> Self {
        Self { comparator }
    }

    #[instrument(level = "debug", skip_all)]
    pub fn build<T>(self, layout: Layout<T>) -> TwoThreeTree<T, C>
    where
        C: Comparator<T>,
    {
        let mut arena: Arena<TreeNode<T>> = Arena::new();
        let mut len = layout.data.len();
        let root = arena.insert(TreeNode::leaf(layout.data, None));

        // Reverse push keeps siblings in left-to-right order
        let mut stack: Vec<(Layout<T>, NodeId)> =
            layout.children.into_iter().rev().map(|c| (c, root)).collect();

        while let Some((current, parent_idx)) = stack.pop() {
            len += current.data.len();
            let current_idx = arena.insert(TreeNode::leaf(current.data, Some(parent_idx)));
            arena[parent_idx].children.push(current_idx);

            for child in current.children.into_iter().rev() {
                stack.push((child, current_idx));
            }
        }

        let mut tree = TwoThreeTree::from_parts(arena, root, self.comparator, len);

        let order: Vec<NodeId> = tree.iter_postorder().map(|(idx, _)| idx).collect();
        for idx in order {
            let height = tree.child_height(idx);
            tree.arena[idx].height = height;
        }
        tree
    }
}
