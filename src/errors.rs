use generational_arena::Index;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A node is neither a leaf, a 2-node nor a 3-node.
    #[error("Invalid node state at {node:?}: {data} data value(s), {children} child(ren)")]
    InvalidNodeState {
        node: Index,
        data: usize,
        children: usize,
    },

    #[error("Node not found in tree: {0:?}")]
    NodeNotFound(Index),

    #[error("Invariant violated at {node:?}: {reason}")]
    InvariantViolation { node: Index, reason: String },
}

pub type TreeResult<T> = Result<T, TreeError>;
