//! Fast minimum-power queries on a spanning forest.
//!
//! - [`RootedTree`] — Parent/depth annotation built once, queried many times
//! - [`minimum_power_for_path`] — One-shot query
//!
//! Answers agree with [`minimum_power`](crate::reachability::minimum_power)
//! on the network the forest was built from, without a search per query.

mod rooted;

pub use rooted::{minimum_power_for_path, RootedTree};
