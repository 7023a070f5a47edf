//! Planner configuration.

use serde::{Deserialize, Serialize};

use crate::assignment::KnapsackConfig;

/// Fleet budget used when none is configured.
pub const DEFAULT_BUDGET: f64 = 25e9;

/// Which optimizer assigns vehicles to routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Ratio-ordered greedy heuristic; each vehicle serves at most one route.
    #[default]
    Greedy,
    /// Branch and bound over the cheapest capable vehicle per route.
    Exact,
}

/// Settings for a [`Planner`](super::Planner) run.
///
/// Partial documents are accepted; missing fields take their defaults.
///
/// # Examples
///
/// ```
/// use u_delivery::planner::{PlannerConfig, Strategy, DEFAULT_BUDGET};
///
/// let config = PlannerConfig::default();
/// assert_eq!(config.budget, DEFAULT_BUDGET);
/// assert_eq!(config.strategy, Strategy::Greedy);
///
/// let config = PlannerConfig::default()
///     .with_budget(5_000.0)
///     .with_strategy(Strategy::Exact);
/// assert_eq!(config.budget, 5_000.0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Total amount that may be spent on vehicles.
    pub budget: f64,
    /// Optimizer to run.
    pub strategy: Strategy,
    /// Search settings for [`Strategy::Exact`].
    pub knapsack: KnapsackConfig,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
            strategy: Strategy::default(),
            knapsack: KnapsackConfig::default(),
        }
    }
}

impl PlannerConfig {
    /// Sets the fleet budget.
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the optimizer.
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the branch-and-bound settings.
    pub fn with_knapsack(mut self, knapsack: KnapsackConfig) -> Self {
        self.knapsack = knapsack;
        self
    }
}
