//! Arena-backed 2-3 tree with split-driven rebalancing.
//!
//! A tree starts as a single leaf. `insert` descends to the leaf where the
//! value belongs, adds it there and, when the leaf overflows, splits it and
//! pushes the middle value upwards until some parent has room or a new root
//! is created. All leaves stay at the same depth.
//!
//! ```
//! use twothree::TwoThreeTree;
//!
//! let mut tree = TwoThreeTree::new(1);
//! tree.insert(2).unwrap();
//! let root = tree.insert(3).unwrap();
//!
//! assert_eq!(tree.node(root).unwrap().data(), &[2]);
//! assert_eq!(tree.values_breadth_first(), vec![&2, &1, &3]);
//! ```

pub mod arena;
pub mod builder;
pub mod cli;
pub mod comparator;
pub mod config;
pub mod errors;
pub mod exitcode;
mod locate;
mod split;
pub mod tree_queue;
pub mod tree_stack;
pub mod tree_traits;
pub mod util;
mod validation;

pub use arena::{max_height, NodeId, NodeKind, TreeNode, TwoThreeTree};
pub use builder::{Layout, TreeBuilder};
pub use comparator::{Comparator, NaturalOrder, Reversed};
pub use errors::{TreeError, TreeResult};
pub use tree_traits::TreeDisplay;
