//! Error types for network queries and planning.

use thiserror::Error;

use crate::models::NodeId;

/// Result type for fallible network operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The structural defect that made a network unusable as a spanning tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeDefect {
    /// The network has no nodes.
    Empty,
    /// A traversal reached `node` a second time.
    Cycle {
        /// Node closing the cycle.
        node: NodeId,
    },
    /// A forest over `nodes` nodes has at most `nodes - 1` edges.
    EdgeCount {
        /// Number of nodes.
        nodes: usize,
        /// Number of edges found.
        edges: usize,
    },
}

impl std::fmt::Display for TreeDefect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TreeDefect::Empty => write!(f, "network has no nodes"),
            TreeDefect::Cycle { node } => write!(f, "cycle closes at node {node}"),
            TreeDefect::EdgeCount { nodes, edges } => {
                write!(f, "{edges} edges over {nodes} nodes")
            }
        }
    }
}

/// Errors from reachability, tree, and planning operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Source and destination lie in different connected components.
    #[error("nodes {src} and {dest} are not in the same connected component")]
    Disconnected {
        /// Source node.
        src: NodeId,
        /// Destination node.
        dest: NodeId,
    },

    /// The node is not part of the network.
    #[error("node {0} is not in the network")]
    UnknownNode(NodeId),

    /// The network given to a tree query is not a spanning forest.
    #[error("not a spanning tree: {0}")]
    InvalidTree(TreeDefect),
}
