use std::fmt;

use termtree::Tree;
use tracing::instrument;

use crate::arena::{NodeId, TwoThreeTree};

pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: fmt::Display, C> TwoThreeTree<T, C> {
    /// Renders the tree, optionally suffixing every node with its height.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, show_height: bool) -> Tree<String> {
        fn build_tree<T: fmt::Display, C>(
            tree: &TwoThreeTree<T, C>,
            node_idx: NodeId,
            show_height: bool,
        ) -> Tree<String> {
            match tree.node(node_idx) {
                Some(node) => {
                    let label = if show_height {
                        format!("{} h={}", node, node.height)
                    } else {
                        node.to_string()
                    };
                    let leaves: Vec<_> = node
                        .children
                        .iter()
                        .map(|&child| build_tree(tree, child, show_height))
                        .collect();
                    Tree::new(label).with_leaves(leaves)
                }
                None => Tree::new("<missing>".to_string()),
            }
        }

        build_tree(self, self.root, show_height)
    }
}

impl<T: fmt::Display, C> TreeDisplay for TwoThreeTree<T, C> {
    fn to_tree_string(&self) -> Tree<String> {
        self.render(false)
    }
}

impl<T: fmt::Display, C> fmt::Display for TwoThreeTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}
