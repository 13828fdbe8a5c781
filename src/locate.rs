use std::cmp::Ordering;
use tracing::instrument;

use crate::arena::{NodeId, NodeKind, TwoThreeTree};
use crate::comparator::Comparator;
use crate::errors::TreeResult;

impl<T, C: Comparator<T>> TwoThreeTree<T, C> {
    /// Descends from `from` to the leaf where `value` belongs.
    ///
    /// Values equal to a separator go to its right. Fails with
    /// `InvalidNodeState` on the first malformed node on the way down.
    #[instrument(level = "trace", skip(self, value))]
    pub fn find_leaf(&self, from: NodeId, value: &T) -> TreeResult<NodeId> {
        let mut current = from;
        loop {
            let kind = self.classify(current)?;
            let node = &self.arena[current];
            current = match kind {
                NodeKind::Leaf => return Ok(current),
                NodeKind::TwoNode => {
                    if self.comparator.less(value, &node.data[0]) {
                        node.children[0]
                    } else {
                        node.children[1]
                    }
                }
                NodeKind::ThreeNode => {
                    if self.comparator.less(value, &node.data[0]) {
                        node.children[0]
                    } else if self.comparator.less(value, &node.data[1]) {
                        node.children[1]
                    } else {
                        node.children[2]
                    }
                }
            };
        }
    }

    /// Whether a value comparing equal to `value` is stored.
    #[instrument(level = "trace", skip(self, value))]
    pub fn contains(&self, value: &T) -> bool {
        let mut current = Some(self.root);
        while let Some(idx) = current {
            let Some(node) = self.node(idx) else {
                return false;
            };
            let mut next = node.children.last().copied();
            for (i, datum) in node.data.iter().enumerate() {
                match self.comparator.compare(value, datum) {
                    Ordering::Equal => return true,
                    Ordering::Less => {
                        next = node.children.get(i).copied();
                        break;
                    }
                    Ordering::Greater => {}
                }
            }
            current = next;
        }
        false
    }
}
