use std::time::Duration;

use thiserror::Error;

/// Errors raised by graph construction lookups and the analysis kernels.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A traversal or neighbor lookup named a node that was never registered.
    #[error("node '{0}' not found")]
    NodeNotFound(String),

    /// The operation needs at least one node.
    #[error("graph has no nodes")]
    EmptyGraph,

    /// Diameter or average path requested on a table with no recorded distances.
    #[error("no measured node pairs in distance table")]
    NoMeasuredPairs,

    /// All-pairs computation refused: output would be O(V²) on a graph over the ceiling.
    #[error("graph has {nodes} nodes, exceeds max_nodes={limit}")]
    TooManyNodes { nodes: usize, limit: usize },

    /// All-pairs computation ran past its deadline.
    #[error("pairwise distance computation exceeded deadline of {0:?}")]
    DeadlineExceeded(Duration),
}

pub type Result<T> = std::result::Result<T, GraphError>;
