use tracing::{debug, instrument};

use crate::arena::{NodeId, TreeNode, TwoThreeTree};
use crate::comparator::Comparator;
use crate::errors::{TreeError, TreeResult};

/// Right half of a lower split, waiting for its parent's split to settle.
#[derive(Debug, Clone, Copy)]
struct Carried {
    /// Node the sibling was split off from
    origin: NodeId,
    sibling: NodeId,
}

impl<T, C: Comparator<T>> TwoThreeTree<T, C> {
    /// Inserts `value` and returns the (possibly new) root.
    ///
    /// The descent classifies every node on the path before anything is
    /// touched, so an `InvalidNodeState` leaves the tree unchanged.
    #[instrument(level = "debug", skip(self, value))]
    pub fn insert(&mut self, value: T) -> TreeResult<NodeId> {
        let leaf = self.find_leaf(self.root, &value)?;

        let root = if self.arena[leaf].data.len() == 1 {
            self.insert_into_single_datum_node(leaf, value);
            self.refresh_heights(leaf);
            self.top(leaf)
        } else {
            self.split(leaf, value)?
        };

        if root != self.root {
            debug!(old = ?self.root, new = ?root, height = self.arena[root].height, "root changed");
        }
        self.root = root;
        self.len += 1;
        Ok(root)
    }

    /// Puts `value` into a node holding one datum, keeping data ascending.
    pub(crate) fn insert_into_single_datum_node(&mut self, idx: NodeId, value: T) {
        let node = &mut self.arena[idx];
        let pos = if self.comparator.less(&value, &node.data[0]) {
            0
        } else {
            1
        };
        node.data.insert(pos, value);
    }

    /// Orders two node values and a new one; the new value goes after equal ones.
    pub(crate) fn sort_data(&self, first: T, second: T, value: T) -> (T, T, T) {
        if self.comparator.less(&value, &first) {
            (value, first, second)
        } else if self.comparator.less(&value, &second) {
            (first, value, second)
        } else {
            (first, second, value)
        }
    }

    /// Splits full nodes from `leaf` upwards until a parent absorbs the
    /// promoted value or a new root is created.
    fn split(&mut self, leaf: NodeId, value: T) -> TreeResult<NodeId> {
        let mut current = leaf;
        let mut value = value;
        let mut carried: Option<Carried> = None;

        loop {
            let node = &self.arena[current];
            let invalid = TreeError::InvalidNodeState {
                node: current,
                data: node.data.len(),
                children: node.children.len(),
            };
            if node.data.len() != 2 {
                return Err(invalid);
            }
            let data = std::mem::take(&mut self.arena[current].data);
            let [first, second]: [T; 2] = data.try_into().map_err(|_| invalid)?;
            let (min, mid, max) = self.sort_data(first, second, value);

            let parent = self.arena[current].parent;
            self.arena[current].data.push(min);
            let sibling = self.arena.insert(TreeNode::leaf(vec![max], parent));

            let mut children = std::mem::take(&mut self.arena[current].children);
            if let Some(Carried { origin, sibling: orphan }) = carried {
                let pos = children
                    .iter()
                    .position(|&c| c == origin)
                    .map_or(children.len(), |i| i + 1);
                children.insert(pos, orphan);
            }
            if !children.is_empty() {
                let (left, right) = self.partition_children(&mid, children);
                for &child in &left {
                    self.arena[child].parent = Some(current);
                }
                for &child in &right {
                    self.arena[child].parent = Some(sibling);
                }
                self.arena[current].children = left;
                self.arena[sibling].children = right;
            }
            self.arena[current].height = self.child_height(current);
            self.arena[sibling].height = self.child_height(sibling);
            debug!(node = ?current, ?sibling, "split node");

            match parent {
                None => {
                    let root = self.arena.insert(TreeNode {
                        data: vec![mid],
                        children: vec![current, sibling],
                        parent: None,
                        height: 0,
                    });
                    self.arena[current].parent = Some(root);
                    self.arena[sibling].parent = Some(root);
                    self.refresh_heights(root);
                    debug!(?root, "split reached the root");
                    return Ok(root);
                }
                Some(p) if self.arena[p].data.len() == 1 => {
                    self.insert_into_single_datum_node(p, mid);
                    let node = &mut self.arena[p];
                    let pos = node
                        .children
                        .iter()
                        .position(|&c| c == current)
                        .map_or(node.children.len(), |i| i + 1);
                    node.children.insert(pos, sibling);
                    self.refresh_heights(p);
                    debug!(parent = ?p, "parent absorbed promoted value");
                    return Ok(self.top(p));
                }
                Some(p) => {
                    carried = Some(Carried {
                        origin: current,
                        sibling,
                    });
                    current = p;
                    value = mid;
                }
            }
        }
    }

    /// Divides `children` between the two halves of a split around `mid`.
    ///
    /// Children are keyed by their first value: keys below `mid` go left,
    /// the rest right, each slotted in key order with equal keys kept in
    /// arrival order. Keys equal to `mid` can leave one side short; the
    /// boundary child then moves across so both halves get the same count.
    pub(crate) fn partition_children(
        &self,
        mid: &T,
        children: Vec<NodeId>,
    ) -> (Vec<NodeId>, Vec<NodeId>) {
        let key = |idx: NodeId| &self.arena[idx].data[0];
        let mut left: Vec<NodeId> = Vec::with_capacity(children.len());
        let mut right: Vec<NodeId> = Vec::with_capacity(children.len());

        for child in children {
            let side = if self.comparator.less(key(child), mid) {
                &mut left
            } else {
                &mut right
            };
            let pos = side
                .iter()
                .position(|&other| self.comparator.less(key(child), key(other)))
                .unwrap_or(side.len());
            side.insert(pos, child);
        }

        let half = (left.len() + right.len() + 1) / 2;
        while left.len() > half {
            match left.pop() {
                Some(child) => right.insert(0, child),
                None => break,
            }
        }
        while left.len() < half && !right.is_empty() {
            left.push(right.remove(0));
        }
        (left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Layout;

    fn data(tree: &TwoThreeTree<i32>, idx: NodeId) -> Vec<i32> {
        tree.node(idx).unwrap().data().to_vec()
    }

    #[test]
    fn insert_into_single_datum_node_appends_larger_value() {
        let mut tree = TwoThreeTree::new(1);
        let root = tree.root();
        tree.insert_into_single_datum_node(root, 2);
        assert_eq!(data(&tree, root), vec![1, 2]);
    }

    #[test]
    fn insert_into_single_datum_node_reorders_smaller_value() {
        let mut tree = TwoThreeTree::new(2);
        let root = tree.root();
        tree.insert_into_single_datum_node(root, 1);
        assert_eq!(data(&tree, root), vec![1, 2]);
    }

    #[test]
    fn sort_data_orders_three_values() {
        let tree = TwoThreeTree::new(0);
        assert_eq!(tree.sort_data(1, 2, 3), (1, 2, 3));
        assert_eq!(tree.sort_data(1, 3, 2), (1, 2, 3));
        assert_eq!(tree.sort_data(1, 2, 0), (0, 1, 2));
        assert_eq!(tree.sort_data(1, 2, 1), (1, 1, 2));
        assert_eq!(tree.sort_data(1, 2, 2), (1, 2, 2));
    }

    #[test]
    fn sort_data_places_new_value_after_equal_ones() {
        let by_key = |a: &(i32, char), b: &(i32, char)| a.0.cmp(&b.0);
        let tree = TwoThreeTree::with_comparator((0, 'x'), by_key);
        assert_eq!(
            tree.sort_data((1, 'a'), (2, 'b'), (1, 'n')),
            ((1, 'a'), (1, 'n'), (2, 'b'))
        );
        assert_eq!(
            tree.sort_data((1, 'a'), (2, 'b'), (2, 'n')),
            ((1, 'a'), (2, 'b'), (2, 'n'))
        );
    }

    #[test]
    fn partition_children_sorts_by_key_around_mid() {
        let mut tree = TwoThreeTree::new(0);
        let children: Vec<NodeId> = [11, 2, 7, 3]
            .into_iter()
            .map(|v| tree.arena.insert(TreeNode::leaf(vec![v], None)))
            .collect();

        let (left, right) = tree.partition_children(&5, children);

        let keys = |ids: &[NodeId]| ids.iter().map(|&i| data(&tree, i)[0]).collect::<Vec<_>>();
        assert_eq!(keys(&left), vec![2, 3]);
        assert_eq!(keys(&right), vec![7, 11]);
    }

    #[test]
    fn partition_children_balances_keys_equal_to_mid() {
        let mut tree = TwoThreeTree::new(0);
        let children: Vec<NodeId> = [4, 5, 5, 5]
            .into_iter()
            .map(|v| tree.arena.insert(TreeNode::leaf(vec![v], None)))
            .collect();
        let expected_left = vec![children[0], children[1]];
        let expected_right = vec![children[2], children[3]];

        let (left, right) = tree.partition_children(&5, children);

        assert_eq!(left, expected_left);
        assert_eq!(right, expected_right);
    }

    #[test]
    fn insert_into_leaf_with_room() {
        let mut tree = TwoThreeTree::new(1);
        let old_root = tree.root();
        let root = tree.insert(2).unwrap();
        assert_eq!(root, old_root);
        assert_eq!(data(&tree, root), vec![1, 2]);
        assert!(tree.root_node().is_leaf());
        assert_eq!(tree.height(), 0);
    }

    #[test]
    fn insert_splits_full_root_leaf() {
        let mut tree = TwoThreeTree::new(1);
        tree.insert(2).unwrap();
        let root = tree.insert(3).unwrap();

        let node = tree.node(root).unwrap();
        assert_eq!(node.data(), &[2]);
        assert_eq!(node.parent(), None);
        assert_eq!(node.height(), 1);
        let first = node.first_child().unwrap();
        let second = node.second_child().unwrap();
        assert_eq!(data(&tree, first), vec![1]);
        assert_eq!(data(&tree, second), vec![3]);
        assert_eq!(tree.node(first).unwrap().parent(), Some(root));
        assert_eq!(tree.node(second).unwrap().parent(), Some(root));
    }

    #[test]
    fn split_of_node_without_two_values_keeps_its_data() {
        let mut tree = TwoThreeTree::new(1);
        let root = tree.root();

        let result = tree.split(root, 2);

        assert_eq!(
            result,
            Err(TreeError::InvalidNodeState {
                node: root,
                data: 1,
                children: 0,
            })
        );
        assert_eq!(data(&tree, root), vec![1]);
        assert_eq!(tree.arena.len(), 1);
    }

    #[test]
    fn failed_insert_leaves_tree_untouched() {
        let mut tree = Layout::node(vec![10], vec![Layout::leaf(vec![5, 7])]).build();
        let before: Vec<i32> = tree.values_breadth_first().into_iter().copied().collect();

        let result = tree.insert(8);

        assert!(matches!(result, Err(TreeError::InvalidNodeState { .. })));
        let after: Vec<i32> = tree.values_breadth_first().into_iter().copied().collect();
        assert_eq!(before, after);
        assert_eq!(tree.len(), 3);
    }
}
