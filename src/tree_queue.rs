use std::collections::VecDeque;
use tracing::instrument;

use crate::arena::{NodeId, TreeNode, TwoThreeTree};

impl<T, C> TwoThreeTree<T, C> {
    /// Nodes level by level, left to right, starting at `from`.
    #[instrument(level = "trace", skip(self))]
    pub fn breadth_first(&self, from: NodeId) -> BreadthFirst<'_, T, C> {
        BreadthFirst::new(self, from)
    }

    /// Every value of the tree in breadth-first node order.
    pub fn values_breadth_first(&self) -> Vec<&T> {
        self.breadth_first(self.root)
            .flat_map(|(_, node)| node.data.iter())
            .collect()
    }

    /// Values grouped per level, each level holding its nodes' data.
    pub fn levels(&self) -> Vec<Vec<&[T]>> {
        let mut levels: Vec<Vec<&[T]>> = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back((self.root, 0usize));

        while let Some((idx, depth)) = queue.pop_front() {
            let Some(node) = self.node(idx) else {
                continue;
            };
            if levels.len() <= depth {
                levels.push(Vec::new());
            }
            levels[depth].push(&node.data);
            for &child in &node.children {
                queue.push_back((child, depth + 1));
            }
        }
        levels
    }
}

/// Finite, read-only breadth-first walk.
pub struct BreadthFirst<'a, T, C> {
    tree: &'a TwoThreeTree<T, C>,
    queue: VecDeque<NodeId>,
}

impl<'a, T, C> BreadthFirst<'a, T, C> {
    fn new(tree: &'a TwoThreeTree<T, C>, from: NodeId) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(from);
        Self { tree, queue }
    }
}

impl<'a, T, C> Iterator for BreadthFirst<'a, T, C> {
    type Item = (NodeId, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(idx) = self.queue.pop_front() {
            if let Some(node) = tree.node(idx) {
                self.queue.extend(node.children.iter().copied());
                return Some((idx, node));
            }
        }
        None
    }
}

/// Trees are equal when their breadth-first value sequences are.
impl<T: PartialEq, C, D> PartialEq<TwoThreeTree<T, D>> for TwoThreeTree<T, C> {
    fn eq(&self, other: &TwoThreeTree<T, D>) -> bool {
        self.values_breadth_first() == other.values_breadth_first()
    }
}
