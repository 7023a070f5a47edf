//! Planning pipeline tying the network queries to the optimizers.
//!
//! - [`Planner`] — Network → spanning forest → route requirements → assignment
//! - [`PlannerConfig`] — Budget, strategy, and search settings

mod config;
mod plan;

pub use config::{PlannerConfig, Strategy, DEFAULT_BUDGET};
pub use plan::{Plan, Planner};
