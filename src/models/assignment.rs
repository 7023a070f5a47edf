//! Vehicle-to-route assignments.

use serde::{Deserialize, Serialize};

use super::{RouteRequirement, Vehicle};

/// A vehicle committed to a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssignedRoute {
    /// The vehicle serving the route.
    pub vehicle: Vehicle,
    /// The route and its power requirement.
    pub requirement: RouteRequirement,
}

/// The result of an optimization run: which vehicle serves which route.
///
/// Built fresh per run. An empty assignment with zero profit is a valid
/// outcome when nothing fits the budget.
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Assignment, Route, RouteRequirement, Vehicle};
///
/// let mut a = Assignment::new();
/// a.push(
///     Vehicle::new(0, 10.0, 2000.0),
///     RouteRequirement::new(Route::new(1, 3, 100.0), 10.0),
/// );
/// assert_eq!(a.len(), 1);
/// assert_eq!(a.total_profit(), 100.0);
/// assert_eq!(a.total_cost(), 2000.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pairs: Vec<AssignedRoute>,
    total_profit: f64,
    total_cost: f64,
}

impl Assignment {
    /// Creates an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `vehicle` serving `requirement`.
    pub fn push(&mut self, vehicle: Vehicle, requirement: RouteRequirement) {
        debug_assert!(vehicle.can_serve(requirement.min_power));
        self.total_profit += requirement.route.profit;
        self.total_cost += vehicle.cost();
        self.pairs.push(AssignedRoute {
            vehicle,
            requirement,
        });
    }

    /// Assigned pairs in the order they were made.
    pub fn pairs(&self) -> &[AssignedRoute] {
        &self.pairs
    }

    /// Number of served routes.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no route is served.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sum of the profits of served routes.
    pub fn total_profit(&self) -> f64 {
        self.total_profit
    }

    /// Sum of the costs of assigned vehicles.
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Route;

    #[test]
    fn test_empty_assignment() {
        let a = Assignment::new();
        assert!(a.is_empty());
        assert_eq!(a.total_profit(), 0.0);
        assert_eq!(a.total_cost(), 0.0);
    }

    #[test]
    fn test_totals_accumulate() {
        let mut a = Assignment::new();
        a.push(
            Vehicle::new(0, 10.0, 200.0),
            RouteRequirement::new(Route::new(1, 2, 50.0), 8.0),
        );
        a.push(
            Vehicle::new(1, 4.0, 100.0),
            RouteRequirement::new(Route::new(2, 3, 30.0), 4.0),
        );
        assert_eq!(a.len(), 2);
        assert_eq!(a.total_profit(), 80.0);
        assert_eq!(a.total_cost(), 300.0);
        assert_eq!(a.pairs()[1].vehicle.id(), 1);
    }
}
