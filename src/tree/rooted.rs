//! Bottleneck queries on a rooted spanning forest.
//!
//! # Algorithm
//!
//! Once a minimum spanning tree is fixed, the least power connecting two
//! sites equals the heaviest link on the unique tree path between them. The
//! forest is rooted by breadth-first search (so a node's depth is final
//! before its children are visited), recording each node's parent, the power
//! of the link to that parent, and its depth. A query lifts the deeper
//! endpoint until both depths match, then lifts both in lockstep until they
//! meet at their lowest common ancestor.
//!
//! # Complexity
//!
//! O(V) to root the forest, O(path length) per query.

use std::collections::VecDeque;

use rayon::prelude::*;

use crate::error::{Error, Result, TreeDefect};
use crate::models::{Network, NodeId, Route, RouteRequirement};
use crate::reachability::MinPowerPath;

const NO_ROOT: usize = usize::MAX;
const NO_EDGE: usize = usize::MAX;

/// A spanning forest annotated with parents and depths.
///
/// Immutable once built and safe to share across threads for concurrent
/// queries.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Network;
/// use u_delivery::spanning::build_mst;
/// use u_delivery::tree::RootedTree;
///
/// let mut network = Network::new();
/// network.add_edge(1, 2, 10.0);
/// network.add_edge(2, 3, 5.0);
/// network.add_edge(1, 3, 12.0);
///
/// let tree = build_mst(&network);
/// let rooted = RootedTree::new(&tree).unwrap();
/// assert_eq!(rooted.minimum_power(1, 3).unwrap(), 10.0);
/// assert_eq!(rooted.path(3, 1).unwrap().path, vec![3, 2, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct RootedTree<'a> {
    tree: &'a Network,
    parent: Vec<Option<(usize, f64)>>,
    depth: Vec<usize>,
    root: Vec<usize>,
}

impl<'a> RootedTree<'a> {
    /// Roots every tree of the forest.
    ///
    /// The tree holding node `1` (or the smallest node id when `1` is
    /// absent) is rooted there; every other tree at its smallest node id.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTree`] if `tree` is empty, has too many edges, or
    /// contains a cycle (parallel links and self-loops included).
    pub fn new(tree: &'a Network) -> Result<Self> {
        let n = tree.node_count();
        if n == 0 {
            return Err(Error::InvalidTree(TreeDefect::Empty));
        }
        if tree.edge_count() >= n {
            return Err(Error::InvalidTree(TreeDefect::EdgeCount {
                nodes: n,
                edges: tree.edge_count(),
            }));
        }

        let mut starts: Vec<usize> = (0..n).collect();
        starts.sort_by_key(|&idx| tree.node_at(idx));
        if let Some(anchor) = tree.index_of(1) {
            starts.retain(|&idx| idx != anchor);
            starts.insert(0, anchor);
        }

        let mut parent = vec![None; n];
        let mut parent_edge = vec![NO_EDGE; n];
        let mut depth = vec![0usize; n];
        let mut root = vec![NO_ROOT; n];
        let mut queue = VecDeque::new();

        for start in starts {
            if root[start] != NO_ROOT {
                continue;
            }
            root[start] = start;
            queue.push_back(start);

            while let Some(idx) = queue.pop_front() {
                for adj in tree.adjacency_at(idx) {
                    if adj.edge == parent_edge[idx] {
                        continue;
                    }
                    if root[adj.target] != NO_ROOT {
                        return Err(Error::InvalidTree(TreeDefect::Cycle {
                            node: adj.node,
                        }));
                    }
                    root[adj.target] = start;
                    parent[adj.target] = Some((idx, adj.power));
                    parent_edge[adj.target] = adj.edge;
                    depth[adj.target] = depth[idx] + 1;
                    queue.push_back(adj.target);
                }
            }
        }

        Ok(Self {
            tree,
            parent,
            depth,
            root,
        })
    }

    /// Depth of `id` below the root of its tree.
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.tree.index_of(id).map(|idx| self.depth[idx])
    }

    /// Root of the tree containing `id`.
    pub fn root(&self, id: NodeId) -> Option<NodeId> {
        self.tree
            .index_of(id)
            .map(|idx| self.tree.node_at(self.root[idx]))
    }

    /// Tree path from `src` to `dest` and its bottleneck power.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if an endpoint is absent, [`Error::Disconnected`]
    /// if the endpoints lie in different trees.
    pub fn path(&self, src: NodeId, dest: NodeId) -> Result<MinPowerPath> {
        let (mut a, mut b) = self.endpoints(src, dest)?;
        let mut up = vec![a];
        let mut down = vec![b];
        let mut power = 0.0f64;

        while self.depth[a] > self.depth[b] {
            let (next, w) = self.lift(a);
            power = power.max(w);
            a = next;
            up.push(a);
        }
        while self.depth[b] > self.depth[a] {
            let (next, w) = self.lift(b);
            power = power.max(w);
            b = next;
            down.push(b);
        }
        while a != b {
            let (next_a, wa) = self.lift(a);
            let (next_b, wb) = self.lift(b);
            power = power.max(wa).max(wb);
            a = next_a;
            b = next_b;
            up.push(a);
            down.push(b);
        }

        // both halves end at the common ancestor
        down.pop();
        up.extend(down.into_iter().rev());
        Ok(MinPowerPath {
            path: up.into_iter().map(|idx| self.tree.node_at(idx)).collect(),
            power,
        })
    }

    /// Least power connecting `src` and `dest` along the tree.
    pub fn minimum_power(&self, src: NodeId, dest: NodeId) -> Result<f64> {
        let (mut a, mut b) = self.endpoints(src, dest)?;
        let mut power = 0.0f64;
        while self.depth[a] > self.depth[b] {
            let (next, w) = self.lift(a);
            power = power.max(w);
            a = next;
        }
        while self.depth[b] > self.depth[a] {
            let (next, w) = self.lift(b);
            power = power.max(w);
            b = next;
        }
        while a != b {
            let (next_a, wa) = self.lift(a);
            let (next_b, wb) = self.lift(b);
            power = power.max(wa).max(wb);
            a = next_a;
            b = next_b;
        }
        Ok(power)
    }

    /// Power requirement of every route, evaluated in parallel.
    ///
    /// Results are returned in the order of `routes`.
    pub fn requirements(&self, routes: &[Route]) -> Vec<Result<RouteRequirement>> {
        routes
            .par_iter()
            .map(|route| {
                self.minimum_power(route.source, route.destination)
                    .map(|power| RouteRequirement::new(*route, power))
            })
            .collect()
    }

    fn endpoints(&self, src: NodeId, dest: NodeId) -> Result<(usize, usize)> {
        let a = self.tree.index_of(src).ok_or(Error::UnknownNode(src))?;
        let b = self.tree.index_of(dest).ok_or(Error::UnknownNode(dest))?;
        if self.root[a] != self.root[b] {
            return Err(Error::Disconnected { src, dest });
        }
        Ok((a, b))
    }

    fn lift(&self, idx: usize) -> (usize, f64) {
        self.parent[idx].expect("only roots lack a parent and roots have depth 0")
    }
}

/// Least power connecting `src` and `dest` in a spanning forest.
///
/// Roots the forest for a single query; use [`RootedTree`] directly to
/// answer many.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Network;
/// use u_delivery::spanning::build_mst;
/// use u_delivery::tree::minimum_power_for_path;
///
/// let mut network = Network::new();
/// network.add_edge(1, 2, 10.0);
/// network.add_edge(2, 3, 5.0);
///
/// let tree = build_mst(&network);
/// assert_eq!(minimum_power_for_path(&tree, 1, 3).unwrap(), 10.0);
/// ```
pub fn minimum_power_for_path(tree: &Network, src: NodeId, dest: NodeId) -> Result<f64> {
    RootedTree::new(tree)?.minimum_power(src, dest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reachability::minimum_power;
    use crate::spanning::build_mst;
    use proptest::prelude::*;

    fn sample_tree() -> Network {
        //        1
        //      /   \
        //   (4)2   3(9)
        //    / \     \
        // (7)4 5(1)   6(2)
        //    |
        // (3)7
        let mut t = Network::new();
        t.add_edge(1, 2, 4.0);
        t.add_edge(1, 3, 9.0);
        t.add_edge(2, 4, 7.0);
        t.add_edge(2, 5, 1.0);
        t.add_edge(3, 6, 2.0);
        t.add_edge(4, 7, 3.0);
        t
    }

    #[test]
    fn test_depths_from_anchor() {
        let t = sample_tree();
        let r = RootedTree::new(&t).expect("tree");
        assert_eq!(r.depth(1), Some(0));
        assert_eq!(r.depth(5), Some(2));
        assert_eq!(r.depth(7), Some(3));
        assert_eq!(r.root(7), Some(1));
    }

    #[test]
    fn test_equal_depth_query() {
        let t = sample_tree();
        let r = RootedTree::new(&t).expect("tree");
        let p = r.path(5, 6).expect("connected");
        assert_eq!(p.path, vec![5, 2, 1, 3, 6]);
        assert_eq!(p.power, 9.0);
        assert_eq!(r.minimum_power(4, 5).expect("connected"), 7.0);
    }

    #[test]
    fn test_unequal_depth_query() {
        let t = sample_tree();
        let r = RootedTree::new(&t).expect("tree");
        let p = r.path(7, 5).expect("connected");
        assert_eq!(p.path, vec![7, 4, 2, 5]);
        assert_eq!(p.power, 7.0);
        let p = r.path(6, 7).expect("connected");
        assert_eq!(p.path, vec![6, 3, 1, 2, 4, 7]);
        assert_eq!(p.power, 9.0);
    }

    #[test]
    fn test_ancestor_query() {
        let t = sample_tree();
        let r = RootedTree::new(&t).expect("tree");
        assert_eq!(r.path(7, 2).expect("connected").path, vec![7, 4, 2]);
        assert_eq!(r.path(1, 5).expect("connected").path, vec![1, 2, 5]);
        assert_eq!(r.minimum_power(2, 2).expect("same"), 0.0);
    }

    #[test]
    fn test_anchor_falls_back_to_smallest_id() {
        let mut t = Network::new();
        t.add_edge(9, 4, 1.0);
        t.add_edge(4, 6, 2.0);
        let r = RootedTree::new(&t).expect("tree");
        assert_eq!(r.root(9), Some(4));
        assert_eq!(r.depth(4), Some(0));
        assert_eq!(r.minimum_power(9, 6).expect("connected"), 2.0);
    }

    #[test]
    fn test_forest_disconnected_pair() {
        let mut t = Network::new();
        t.add_edge(1, 2, 3.0);
        t.add_edge(3, 4, 5.0);
        let r = RootedTree::new(&t).expect("forest");
        assert_eq!(r.root(4), Some(3));
        assert_eq!(r.minimum_power(3, 4), Ok(5.0));
        assert_eq!(
            r.minimum_power(1, 4),
            Err(Error::Disconnected { src: 1, dest: 4 })
        );
    }

    #[test]
    fn test_rejects_cycle() {
        let mut g = Network::new();
        g.add_edge(1, 2, 1.0);
        g.add_edge(2, 3, 1.0);
        g.add_edge(3, 1, 1.0);
        g.add_node(4);
        assert!(matches!(
            RootedTree::new(&g),
            Err(Error::InvalidTree(TreeDefect::Cycle { .. }))
        ));
    }

    #[test]
    fn test_rejects_too_many_edges() {
        let mut g = Network::new();
        g.add_edge(1, 2, 1.0);
        g.add_edge(1, 2, 2.0);
        assert_eq!(
            minimum_power_for_path(&g, 1, 2),
            Err(Error::InvalidTree(TreeDefect::EdgeCount { nodes: 2, edges: 2 }))
        );
    }

    #[test]
    fn test_rejects_parallel_link_in_forest() {
        let mut g = Network::with_nodes([5, 6]);
        g.add_edge(1, 2, 1.0);
        g.add_edge(1, 2, 2.0);
        assert!(matches!(
            RootedTree::new(&g),
            Err(Error::InvalidTree(TreeDefect::Cycle { .. }))
        ));
    }

    #[test]
    fn test_rejects_self_loop() {
        let mut g = Network::with_nodes([1, 2, 3]);
        g.add_edge(2, 2, 1.0);
        assert!(matches!(
            RootedTree::new(&g),
            Err(Error::InvalidTree(TreeDefect::Cycle { node: 2 }))
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            RootedTree::new(&Network::new()).err(),
            Some(Error::InvalidTree(TreeDefect::Empty))
        );
    }

    #[test]
    fn test_unknown_node() {
        let t = sample_tree();
        assert_eq!(minimum_power_for_path(&t, 1, 99), Err(Error::UnknownNode(99)));
    }

    #[test]
    fn test_requirements_in_route_order() {
        let t = sample_tree();
        let r = RootedTree::new(&t).expect("tree");
        let routes = [
            Route::new(5, 6, 10.0),
            Route::new(7, 5, 20.0),
            Route::new(1, 42, 30.0),
        ];
        let reqs = r.requirements(&routes);
        assert_eq!(reqs[0].as_ref().map(|q| q.min_power), Ok(9.0));
        assert_eq!(reqs[1].as_ref().map(|q| q.route.profit), Ok(20.0));
        assert_eq!(reqs[2], Err(Error::UnknownNode(42)));
    }

    #[test]
    fn test_mst_agrees_with_search_on_scenario() {
        let mut g = Network::new();
        g.add_edge(1, 2, 10.0);
        g.add_edge(2, 3, 5.0);
        let t = build_mst(&g);
        assert_eq!(minimum_power_for_path(&t, 1, 3), Ok(10.0));
        assert_eq!(minimum_power(&g, 1, 3).map(|r| r.power), Ok(10.0));
    }

    proptest! {
        #[test]
        fn prop_tree_bottleneck_matches_binary_search(
            edges in prop::collection::vec((1usize..10, 1usize..10, 0u32..40), 1..30)
        ) {
            let mut g = Network::new();
            for &(a, b, p) in &edges {
                g.add_edge(a, b, p as f64);
            }
            let t = build_mst(&g);
            let rooted = RootedTree::new(&t).expect("mst is a forest");
            let nodes: Vec<NodeId> = g.nodes().to_vec();
            for &s in &nodes {
                for &d in &nodes {
                    match minimum_power(&g, s, d) {
                        Ok(direct) => {
                            let via_tree = rooted.path(s, d).expect("same component");
                            prop_assert_eq!(via_tree.power, direct.power);
                            prop_assert_eq!(via_tree.path.first(), Some(&s));
                            prop_assert_eq!(via_tree.path.last(), Some(&d));
                        }
                        Err(e) => {
                            prop_assert_eq!(e, Error::Disconnected { src: s, dest: d });
                            let is_disconnected = matches!(
                                rooted.minimum_power(s, d),
                                Err(Error::Disconnected { .. })
                            );
                            prop_assert!(is_disconnected);
                        }
                    }
                }
            }
        }
    }
}
