/*
Stack based traversals over the arena.

Both iterators keep an explicit stack of arena indices instead of recursing,
so they borrow the tree immutably for their whole lifetime and never touch
node links.
 */
use tracing::instrument;

use crate::arena::{NodeId, TreeNode, TwoThreeTree};

impl<T, C> TwoThreeTree<T, C> {
    /// Values in comparator order.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self) -> InOrder<'_, T, C> {
        InOrder::new(self)
    }

    /// Nodes with every child before its parent.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T, C> {
        PostOrderIterator::new(self)
    }
}

enum Frame<'a, T> {
    Node(NodeId),
    Value(&'a T),
}

pub struct InOrder<'a, T, C> {
    tree: &'a TwoThreeTree<T, C>,
    stack: Vec<Frame<'a, T>>,
}

impl<'a, T, C> InOrder<'a, T, C> {
    fn new(tree: &'a TwoThreeTree<T, C>) -> Self {
        Self {
            tree,
            stack: vec![Frame::Node(tree.root())],
        }
    }
}

impl<'a, T, C> Iterator for InOrder<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(frame) = self.stack.pop() {
            match frame {
                Frame::Value(value) => return Some(value),
                Frame::Node(idx) => {
                    let Some(node) = tree.node(idx) else {
                        continue;
                    };
                    // child[i + 1] follows data[i]; push right to left
                    for (i, value) in node.data.iter().enumerate().rev() {
                        if let Some(&child) = node.children.get(i + 1) {
                            self.stack.push(Frame::Node(child));
                        }
                        self.stack.push(Frame::Value(value));
                    }
                    if let Some(&child) = node.children.first() {
                        self.stack.push(Frame::Node(child));
                    }
                }
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a, T, C> {
    tree: &'a TwoThreeTree<T, C>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T, C> PostOrderIterator<'a, T, C> {
    fn new(tree: &'a TwoThreeTree<T, C>) -> Self {
        Self {
            tree,
            stack: vec![(tree.root(), false)],
        }
    }
}

impl<'a, T, C> Iterator for PostOrderIterator<'a, T, C> {
    type Item = (NodeId, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = tree.node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}
