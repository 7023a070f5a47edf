//! # u-delivery
//!
//! Power-constrained delivery network library: bottleneck path queries,
//! minimum spanning forests, and budgeted vehicle-to-route assignment.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Network, Route, Vehicle, Assignment)
//! - [`reachability`] — Reachability under a power limit and minimum-power search
//! - [`spanning`] — Minimum spanning forest (Kruskal with union-find)
//! - [`tree`] — Rooted-forest bottleneck queries
//! - [`assignment`] — Greedy and branch-and-bound vehicle assignment
//! - [`planner`] — End-to-end planning pipeline
//! - [`instance`] — Seeded random instances
//! - [`error`] — Error types

pub mod assignment;
pub mod error;
pub mod instance;
pub mod models;
pub mod planner;
pub mod reachability;
pub mod spanning;
pub mod tree;

pub use error::{Error, Result};
