//! Profitable routes and their power requirements.

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A delivery route between two sites that earns `profit` when served.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Route;
///
/// let r = Route::new(1, 3, 100.0);
/// assert_eq!(r.source, 1);
/// assert_eq!(r.destination, 3);
/// assert_eq!(r.profit, 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Start site.
    pub source: NodeId,
    /// End site.
    pub destination: NodeId,
    /// Profit earned by serving the route.
    pub profit: f64,
}

impl Route {
    /// Creates a route.
    pub fn new(source: NodeId, destination: NodeId, profit: f64) -> Self {
        debug_assert!(profit >= 0.0, "route profit must be non-negative");
        Self {
            source,
            destination,
            profit,
        }
    }
}

/// A route paired with the minimum vehicle power needed to travel it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RouteRequirement {
    /// The route.
    pub route: Route,
    /// Bottleneck power along the best path between its endpoints.
    pub min_power: f64,
}

impl RouteRequirement {
    /// Creates a requirement.
    pub fn new(route: Route, min_power: f64) -> Self {
        Self { route, min_power }
    }

    /// Profit per unit of required power.
    ///
    /// A route that needs no power ranks above every other route.
    pub fn profit_per_power(&self) -> f64 {
        if self.min_power > 0.0 {
            self.route.profit / self.min_power
        } else {
            f64::INFINITY
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profit_per_power() {
        let req = RouteRequirement::new(Route::new(1, 2, 100.0), 4.0);
        assert_eq!(req.profit_per_power(), 25.0);
    }

    #[test]
    fn test_zero_power_ranks_first() {
        let free = RouteRequirement::new(Route::new(1, 1, 1.0), 0.0);
        let paid = RouteRequirement::new(Route::new(1, 2, 1e9), 1.0);
        assert!(free.profit_per_power() > paid.profit_per_power());
    }
}
