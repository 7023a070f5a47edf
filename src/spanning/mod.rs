//! Minimum spanning forests.
//!
//! - [`UnionFind`] — Disjoint sets with path compression
//! - [`build_mst`] — Kruskal (1956), O(E log E)

mod kruskal;
mod union_find;

pub use kruskal::build_mst;
pub use union_find::UnionFind;
