//! Depth-first search restricted to links a vehicle can traverse.
//!
//! # Algorithm
//!
//! Starting from the source, follow only links whose power requirement does
//! not exceed the ceiling. Each stack entry records the bottleneck seen so
//! far (the maximum link power, not a sum). A node is expanded at most once.
//! The first entry popped at the destination yields the path.
//!
//! Stack entries live in an arena and point at their parent entry, so a path
//! is rebuilt by walking parent indices instead of being copied per push.
//!
//! # Complexity
//!
//! O(V + E) per call.

use crate::models::{Network, NodeId};

/// A path together with its bottleneck power.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PowerPath {
    pub nodes: Vec<NodeId>,
    pub bottleneck: f64,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    idx: usize,
    parent: Option<usize>,
    bottleneck: f64,
}

/// Finds a path from `src` to `dest` using only links with power ≤ `power`.
///
/// Returns `None` if either node is absent or no such path exists. A node
/// reaches itself with the one-node path.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Network;
/// use u_delivery::reachability::path_under_power;
///
/// let mut network = Network::new();
/// network.add_edge(1, 2, 10.0);
/// network.add_edge(2, 3, 5.0);
///
/// assert_eq!(path_under_power(&network, 1, 3, 10.0), Some(vec![1, 2, 3]));
/// assert_eq!(path_under_power(&network, 1, 3, 9.0), None);
/// ```
pub fn path_under_power(
    network: &Network,
    src: NodeId,
    dest: NodeId,
    power: f64,
) -> Option<Vec<NodeId>> {
    search(network, src, dest, power).map(|p| p.nodes)
}

pub(crate) fn search(network: &Network, src: NodeId, dest: NodeId, power: f64) -> Option<PowerPath> {
    let start = network.index_of(src)?;
    let goal = network.index_of(dest)?;

    let mut visited = vec![false; network.node_count()];
    let mut arena = vec![Frame {
        idx: start,
        parent: None,
        bottleneck: 0.0,
    }];
    let mut stack = vec![0usize];

    while let Some(entry) = stack.pop() {
        let frame = arena[entry];
        if frame.idx == goal && frame.bottleneck <= power {
            return Some(PowerPath {
                nodes: trace(network, &arena, entry),
                bottleneck: frame.bottleneck,
            });
        }
        if visited[frame.idx] {
            continue;
        }
        visited[frame.idx] = true;

        for adj in network.adjacency_at(frame.idx) {
            if adj.power <= power && !visited[adj.target] {
                arena.push(Frame {
                    idx: adj.target,
                    parent: Some(entry),
                    bottleneck: frame.bottleneck.max(adj.power),
                });
                stack.push(arena.len() - 1);
            }
        }
    }
    None
}

fn trace(network: &Network, arena: &[Frame], mut entry: usize) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    loop {
        let frame = arena[entry];
        nodes.push(network.node_at(frame.idx));
        match frame.parent {
            Some(parent) => entry = parent,
            None => break,
        }
    }
    nodes.reverse();
    nodes
}
