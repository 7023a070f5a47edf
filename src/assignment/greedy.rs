//! Greedy vehicle-to-route assignment.
//!
//! # Algorithm
//!
//! Routes are ranked by profit per unit of required power, best first.
//! Vehicles are ranked by cost, most expensive first. Each route in turn
//! takes the first vehicle in the pool that is powerful enough and still
//! affordable; that vehicle leaves the pool and its cost leaves the budget.
//!
//! A heuristic: it gives no optimality guarantee. Both sorts are stable, so
//! the result is deterministic for a given input order.
//!
//! # Complexity
//!
//! O(R log R + V log V + R·V) for R routes and V vehicles.

use tracing::debug;

use crate::models::{Assignment, RouteRequirement, Vehicle};

/// Result of [`assign_greedy`].
#[derive(Debug, Clone, PartialEq)]
pub struct GreedyOutcome {
    /// Routes served and the vehicles serving them.
    pub assignment: Assignment,
    /// Vehicles left in the pool, most expensive first.
    pub unused: Vec<Vehicle>,
    /// Budget left after paying for the assigned vehicles.
    pub remaining_budget: f64,
}

impl GreedyOutcome {
    /// Total profit of the assignment.
    pub fn total_profit(&self) -> f64 {
        self.assignment.total_profit()
    }
}

/// Assigns vehicles from `vehicles` to `routes` greedily within `budget`.
///
/// Takes ownership of the vehicle pool and hands back whatever is left.
///
/// # Examples
///
/// ```
/// use u_delivery::assignment::assign_greedy;
/// use u_delivery::models::{Route, RouteRequirement, Vehicle};
///
/// let fleet = vec![Vehicle::new(0, 5.0, 1000.0), Vehicle::new(1, 10.0, 2000.0)];
/// let routes = [RouteRequirement::new(Route::new(1, 3, 100.0), 10.0)];
///
/// let outcome = assign_greedy(fleet, &routes, 2000.0);
/// assert_eq!(outcome.total_profit(), 100.0);
/// assert_eq!(outcome.assignment.pairs()[0].vehicle.id(), 1);
/// assert_eq!(outcome.unused.len(), 1);
/// ```
pub fn assign_greedy(
    mut vehicles: Vec<Vehicle>,
    routes: &[RouteRequirement],
    budget: f64,
) -> GreedyOutcome {
    let mut ranked: Vec<&RouteRequirement> = routes.iter().collect();
    ranked.sort_by(|a, b| b.profit_per_power().total_cmp(&a.profit_per_power()));
    vehicles.sort_by(|a, b| b.cost().total_cmp(&a.cost()));

    let mut remaining = budget;
    let mut assignment = Assignment::new();

    for req in ranked {
        let pick = vehicles
            .iter()
            .position(|v| v.can_serve(req.min_power) && v.cost() <= remaining);
        if let Some(pos) = pick {
            let vehicle = vehicles.remove(pos);
            remaining -= vehicle.cost();
            assignment.push(vehicle, *req);
        }
    }

    debug!(
        assigned = assignment.len(),
        profit = assignment.total_profit(),
        remaining_budget = remaining,
        "greedy assignment finished"
    );

    GreedyOutcome {
        assignment,
        unused: vehicles,
        remaining_budget: remaining,
    }
}
