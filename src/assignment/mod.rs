//! Budgeted vehicle-to-route assignment.
//!
//! - [`assign_greedy`] — Ratio-ordered greedy heuristic, O(R·V)
//! - [`items_for_routes`] — Reduction to knapsack items (cheapest capable vehicle per route)
//! - [`knapsack`] / [`knapsack_with`] — Exact branch and bound over those items
//! - [`fractional_bound`] — Fractional relaxation used for pruning
//!
//! For the same inputs the greedy profit never exceeds the exact one.

mod branch_bound;
mod greedy;
mod items;

pub use branch_bound::{
    fractional_bound, knapsack, knapsack_with, CancelToken, KnapsackConfig, KnapsackOutcome,
    SearchOrder,
};
pub use greedy::{assign_greedy, GreedyOutcome};
pub use items::{items_for_routes, Item, RouteItems};
