//! Undirected multigraph of sites joined by power-rated links.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a site in the network.
pub type NodeId = usize;

/// An undirected link between two sites.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint.
    pub a: NodeId,
    /// Second endpoint.
    pub b: NodeId,
    /// Minimum power needed to traverse the link.
    pub power: f64,
    /// Length of the link.
    pub distance: f64,
}

/// One entry of a node's adjacency list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Adjacent {
    /// Neighboring node.
    pub node: NodeId,
    /// Minimum power needed to traverse the link.
    pub power: f64,
    /// Length of the link.
    pub distance: f64,
    pub(crate) target: usize,
    pub(crate) edge: usize,
}

/// A network stored as adjacency lists.
///
/// Node identifiers are arbitrary; internally each one is mapped to a dense
/// index on first sight so traversals can use plain vectors for bookkeeping.
/// Every edge is recorded once in [`edges`](Network::edges) and twice in the
/// adjacency lists, once per direction.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Network;
///
/// let mut network = Network::new();
/// network.add_edge(1, 2, 10.0);
/// network.add_edge_with_distance(2, 3, 5.0, 7.0);
/// assert_eq!(network.node_count(), 3);
/// assert_eq!(network.edge_count(), 2);
/// assert_eq!(network.neighbors(2).map(|n| n.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    adjacency: Vec<Vec<Adjacent>>,
    edges: Vec<Edge>,
    ends: Vec<(usize, usize)>,
}

impl Network {
    /// Creates an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a network with the given isolated nodes and no edges.
    pub fn with_nodes<I: IntoIterator<Item = NodeId>>(nodes: I) -> Self {
        let mut network = Self::new();
        for id in nodes {
            network.add_node(id);
        }
        network
    }

    /// Registers a node if it is not present yet and returns its dense index.
    pub fn add_node(&mut self, id: NodeId) -> usize {
        if let Some(&idx) = self.index.get(&id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(id);
        self.index.insert(id, idx);
        self.adjacency.push(Vec::new());
        idx
    }

    /// Adds an edge of unit distance.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, power: f64) {
        self.add_edge_with_distance(a, b, power, 1.0);
    }

    /// Adds an undirected edge, creating missing endpoints.
    ///
    /// Parallel edges between the same pair are kept.
    pub fn add_edge_with_distance(&mut self, a: NodeId, b: NodeId, power: f64, distance: f64) {
        debug_assert!(power >= 0.0, "edge power must be non-negative");
        debug_assert!(distance >= 0.0, "edge distance must be non-negative");

        let ia = self.add_node(a);
        let ib = self.add_node(b);
        let edge = self.edges.len();
        self.edges.push(Edge {
            a,
            b,
            power,
            distance,
        });
        self.ends.push((ia, ib));
        self.adjacency[ia].push(Adjacent {
            node: b,
            power,
            distance,
            target: ib,
            edge,
        });
        self.adjacency[ib].push(Adjacent {
            node: a,
            power,
            distance,
            target: ia,
            edge,
        });
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` if the network has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node identifiers in insertion order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Edges in insertion order, each listed once.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns `true` if `id` is a node of this network.
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Adjacency list of `id`, or `None` if the node is absent.
    pub fn neighbors(&self, id: NodeId) -> Option<&[Adjacent]> {
        self.index_of(id).map(|idx| self.adjacency[idx].as_slice())
    }

    /// Smallest and largest edge power, or `None` if there are no edges.
    pub fn power_range(&self) -> Option<(f64, f64)> {
        self.edges.iter().fold(None, |acc, e| match acc {
            None => Some((e.power, e.power)),
            Some((lo, hi)) => Some((lo.min(e.power), hi.max(e.power))),
        })
    }

    /// Total length of a node path, using for each hop the shortest link
    /// whose power requirement does not exceed `max_power`.
    ///
    /// Returns `None` if some consecutive pair has no such link.
    pub fn path_distance(&self, path: &[NodeId], max_power: f64) -> Option<f64> {
        let mut total = 0.0;
        for hop in path.windows(2) {
            let best = self
                .neighbors(hop[0])?
                .iter()
                .filter(|adj| adj.node == hop[1] && adj.power <= max_power)
                .map(|adj| adj.distance)
                .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.min(d))))?;
            total += best;
        }
        Some(total)
    }

    /// Partitions the nodes into connected components, ignoring power.
    ///
    /// Component order and node order inside a component follow the
    /// traversal and carry no meaning.
    pub fn connected_components(&self) -> Vec<Vec<NodeId>> {
        let (labels, count) = self.component_labels();
        let mut components = vec![Vec::new(); count];
        for (idx, &label) in labels.iter().enumerate() {
            components[label].push(self.nodes[idx]);
        }
        components
    }

    /// Connected components as a set of node sets.
    pub fn connected_component_sets(&self) -> BTreeSet<BTreeSet<NodeId>> {
        self.connected_components()
            .into_iter()
            .map(|c| c.into_iter().collect())
            .collect()
    }

    /// Labels every dense index with its component number.
    ///
    /// Returns the labels and the number of components. Uses an explicit
    /// stack so deep networks cannot overflow the call stack.
    pub(crate) fn component_labels(&self) -> (Vec<usize>, usize) {
        let n = self.nodes.len();
        let mut labels = vec![usize::MAX; n];
        let mut count = 0;
        let mut stack = Vec::new();

        for start in 0..n {
            if labels[start] != usize::MAX {
                continue;
            }
            labels[start] = count;
            stack.push(start);
            while let Some(idx) = stack.pop() {
                for adj in &self.adjacency[idx] {
                    if labels[adj.target] == usize::MAX {
                        labels[adj.target] = count;
                        stack.push(adj.target);
                    }
                }
            }
            count += 1;
        }
        (labels, count)
    }

    pub(crate) fn index_of(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Dense indices of the endpoints of edge number `edge`.
    pub(crate) fn edge_ends(&self, edge: usize) -> (usize, usize) {
        self.ends[edge]
    }

    pub(crate) fn node_at(&self, idx: usize) -> NodeId {
        self.nodes[idx]
    }

    pub(crate) fn adjacency_at(&self, idx: usize) -> &[Adjacent] {
        &self.adjacency[idx]
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "The network is empty");
        }
        writeln!(
            f,
            "The network has {} nodes and {} edges.",
            self.node_count(),
            self.edge_count()
        )?;
        for (idx, id) in self.nodes.iter().enumerate() {
            let entries: Vec<String> = self.adjacency[idx]
                .iter()
                .map(|adj| format!("({}, {}, {})", adj.node, adj.power, adj.distance))
                .collect();
            writeln!(f, "{id}-->[{}]", entries.join(", "))?;
        }
        Ok(())
    }
}
