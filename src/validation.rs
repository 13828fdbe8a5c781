//! Invariant checking for `TwoThreeTree`.
//!
//! Used by tests and by the `check` command; inserts never call it.

use tracing::{debug, instrument};

use crate::arena::{NodeId, NodeKind, TwoThreeTree};
use crate::comparator::Comparator;
use crate::errors::{TreeError, TreeResult};

impl<T, C: Comparator<T>> TwoThreeTree<T, C> {
    /// Verifies node shapes, value order, parent links, heights, leaf depth
    /// and the value count, returning the first violation found.
    ///
    /// Equal values may sit on both sides of a separator, so ordering is
    /// checked non-strictly.
    #[instrument(level = "debug", skip(self))]
    pub fn check_invariants(&self) -> TreeResult<()> {
        let violation = |node: NodeId, reason: String| TreeError::InvariantViolation { node, reason };

        if let Some(parent) = self.get(self.root)?.parent {
            return Err(violation(self.root, format!("root has parent {:?}", parent)));
        }

        let mut leaf_depth: Option<usize> = None;
        let mut values = 0;
        let mut reachable = 0;
        let mut stack: Vec<(NodeId, usize, Option<&T>, Option<&T>)> =
            vec![(self.root, 0, None, None)];

        while let Some((idx, depth, lower, upper)) = stack.pop() {
            let kind = self.classify(idx)?;
            let node = &self.arena[idx];
            reachable += 1;
            values += node.data.len();

            if let [first, second] = node.data.as_slice() {
                if self.comparator.less(second, first) {
                    return Err(violation(idx, "data out of order".to_string()));
                }
            }
            for value in &node.data {
                if lower.is_some_and(|lo| self.comparator.less(value, lo))
                    || upper.is_some_and(|hi| self.comparator.less(hi, value))
                {
                    return Err(violation(idx, "value outside its parent's separators".to_string()));
                }
            }

            let expected_height = self.child_height(idx);
            if node.height != expected_height {
                return Err(violation(
                    idx,
                    format!("height {} but expected {}", node.height, expected_height),
                ));
            }

            if kind == NodeKind::Leaf {
                match leaf_depth {
                    None => leaf_depth = Some(depth),
                    Some(d) if d != depth => {
                        return Err(violation(
                            idx,
                            format!("leaf at depth {} but others at {}", depth, d),
                        ));
                    }
                    Some(_) => {}
                }
                continue;
            }

            for (i, &child) in node.children.iter().enumerate() {
                if self.arena[child].parent != Some(idx) {
                    return Err(violation(child, format!("parent link does not point to {:?}", idx)));
                }
                let lo = if i == 0 { lower } else { node.data.get(i - 1) };
                let hi = node.data.get(i).or(upper);
                stack.push((child, depth + 1, lo, hi));
            }
        }

        if values != self.len {
            return Err(violation(
                self.root,
                format!("{} values reachable but length is {}", values, self.len),
            ));
        }
        if reachable != self.arena.len() {
            return Err(violation(
                self.root,
                format!("{} nodes reachable of {} allocated", reachable, self.arena.len()),
            ));
        }
        debug!(nodes = reachable, values, "invariants hold");
        Ok(())
    }
}
