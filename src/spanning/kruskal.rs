//! Kruskal's minimum spanning forest.
//!
//! # Algorithm
//!
//! Edges are sorted by power (stable, so ties keep insertion order) and
//! scanned once. An edge joins the forest iff its endpoints are still in
//! different union-find sets. Each undirected edge is a single candidate even
//! though it appears twice in the adjacency lists.
//!
//! # Complexity
//!
//! O(E log E) for the sort, O(E α(V)) for the scan.
//!
//! # Reference
//!
//! Kruskal, J.B. (1956). "On the shortest spanning subtree of a graph and
//! the traveling salesman problem", *Proc. AMS* 7(1), 48-50.

use tracing::debug;

use crate::models::Network;

use super::UnionFind;

/// Builds a minimum spanning forest of `network` with respect to edge power.
///
/// The result keeps every node of `network` (isolated ones included) and one
/// tree per connected component, so it has `nodes - components` edges.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Network;
/// use u_delivery::spanning::build_mst;
///
/// let mut network = Network::new();
/// network.add_edge(1, 2, 4.0);
/// network.add_edge(2, 3, 1.0);
/// network.add_edge(1, 3, 2.0);
///
/// let tree = build_mst(&network);
/// assert_eq!(tree.node_count(), 3);
/// assert_eq!(tree.edge_count(), 2);
/// assert!(tree.edges().iter().all(|e| e.power <= 2.0));
/// ```
pub fn build_mst(network: &Network) -> Network {
    let edges = network.edges();
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by(|&x, &y| edges[x].power.total_cmp(&edges[y].power));

    let mut tree = Network::with_nodes(network.nodes().iter().copied());
    let mut sets = UnionFind::new(network.node_count());

    for e in order {
        if sets.set_count() <= 1 {
            break;
        }
        let (a, b) = network.edge_ends(e);
        if sets.union(a, b) {
            let edge = &edges[e];
            tree.add_edge_with_distance(edge.a, edge.b, edge.power, edge.distance);
        }
    }

    debug!(
        nodes = tree.node_count(),
        edges = tree.edge_count(),
        components = sets.set_count(),
        "minimum spanning forest built"
    );
    tree
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeId;
    use proptest::prelude::*;

    fn total_power(network: &Network) -> f64 {
        network.edges().iter().map(|e| e.power).sum()
    }

    #[test]
    fn test_triangle_drops_heaviest() {
        let mut g = Network::new();
        g.add_edge(1, 2, 10.0);
        g.add_edge(2, 3, 5.0);
        g.add_edge(1, 3, 7.0);
        let t = build_mst(&g);
        assert_eq!(t.edge_count(), 2);
        assert_eq!(total_power(&t), 12.0);
    }

    #[test]
    fn test_forest_for_disconnected_input() {
        let mut g = Network::with_nodes([9]);
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g.add_edge(1, 3, 1.0);
        g.add_edge(4, 5, 2.0);
        let t = build_mst(&g);
        assert_eq!(t.node_count(), 6);
        assert_eq!(t.edge_count(), 3);
        assert_eq!(t.connected_components().len(), 3);
    }

    #[test]
    fn test_ties_keep_first_edge() {
        let mut g = Network::new();
        g.add_edge_with_distance(1, 2, 3.0, 100.0);
        g.add_edge_with_distance(1, 2, 3.0, 1.0);
        let t = build_mst(&g);
        assert_eq!(t.edge_count(), 1);
        assert_eq!(t.edges()[0].distance, 100.0);
    }

    #[test]
    fn test_parallel_edges_keep_lightest() {
        let mut g = Network::new();
        g.add_edge(1, 2, 8.0);
        g.add_edge(1, 2, 2.0);
        let t = build_mst(&g);
        assert_eq!(t.edges()[0].power, 2.0);
    }

    #[test]
    fn test_empty_network() {
        let t = build_mst(&Network::new());
        assert!(t.is_empty());
        assert_eq!(t.edge_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_result_is_spanning_forest(
            edges in prop::collection::vec((1usize..16, 1usize..16, 0u32..50), 0..60)
        ) {
            let mut g = Network::with_nodes(1..16);
            for &(a, b, p) in &edges {
                g.add_edge(a, b, p as f64);
            }
            let t = build_mst(&g);
            let components = g.connected_component_sets();

            prop_assert_eq!(t.node_count(), g.node_count());
            prop_assert_eq!(t.edge_count(), g.node_count() - components.len());
            prop_assert_eq!(t.connected_component_sets(), components.clone());

            // no cycles: edges == nodes - components per component
            for component in &components {
                let inside = t
                    .edges()
                    .iter()
                    .filter(|e| component.contains(&e.a))
                    .count();
                prop_assert_eq!(inside, component.len() - 1);
            }
        }

        #[test]
        fn prop_no_lighter_spanning_forest_by_exchange(
            edges in prop::collection::vec((1usize..10, 1usize..10, 0u32..50), 1..30)
        ) {
            let mut g = Network::new();
            for &(a, b, p) in &edges {
                g.add_edge(a, b, p as f64);
            }
            let t = build_mst(&g);
            // Cycle property: every non-tree edge is at least as heavy as the
            // bottleneck of the tree path between its endpoints.
            for e in g.edges() {
                let bottleneck = tree_path_bottleneck(&t, e.a, e.b);
                prop_assert!(bottleneck <= e.power);
            }
        }
    }

    fn tree_path_bottleneck(tree: &Network, a: NodeId, b: NodeId) -> f64 {
        // brute force over the tree: DFS carrying the max power
        let mut stack = vec![(a, a, 0.0f64)];
        while let Some((node, from, worst)) = stack.pop() {
            if node == b {
                return worst;
            }
            for adj in tree.neighbors(node).unwrap_or(&[]) {
                if adj.node != from {
                    stack.push((adj.node, node, worst.max(adj.power)));
                }
            }
        }
        f64::INFINITY
    }
}
