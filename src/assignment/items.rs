//! Reduction of route assignment to 0/1 knapsack items.

use serde::{Deserialize, Serialize};

use crate::models::{cheapest_capable, RouteRequirement, Vehicle};

/// A knapsack item: pay `weight` out of the budget to earn `value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Cost charged against the budget.
    pub weight: f64,
    /// Profit earned.
    pub value: f64,
}

impl Item {
    /// Creates an item.
    pub fn new(weight: f64, value: f64) -> Self {
        Self { weight, value }
    }

    /// Value per unit of weight. Free items with a positive value rank first.
    pub fn ratio(&self) -> f64 {
        if self.weight > 0.0 {
            self.value / self.weight
        } else if self.value > 0.0 {
            f64::INFINITY
        } else {
            0.0
        }
    }
}

/// Knapsack items derived from routes, with the route and vehicle behind each.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteItems {
    /// One item per serviceable route.
    pub items: Vec<Item>,
    /// `(requirement, vehicle)` behind `items[i]`.
    pub sources: Vec<(RouteRequirement, Vehicle)>,
    /// Routes no vehicle is powerful enough to serve.
    pub unserviceable: Vec<RouteRequirement>,
}

/// Pairs every route with the cheapest vehicle able to serve it.
///
/// The item's weight is that vehicle's cost and its value is the route's
/// profit. Vehicles are treated as models that can be bought again, so one
/// vehicle may back several items.
///
/// # Examples
///
/// ```
/// use u_delivery::assignment::items_for_routes;
/// use u_delivery::models::{Route, RouteRequirement, Vehicle};
///
/// let fleet = [Vehicle::new(0, 5.0, 1000.0), Vehicle::new(1, 10.0, 2000.0)];
/// let routes = [
///     RouteRequirement::new(Route::new(1, 3, 100.0), 10.0),
///     RouteRequirement::new(Route::new(1, 2, 40.0), 4.0),
///     RouteRequirement::new(Route::new(2, 4, 90.0), 50.0),
/// ];
/// let reduced = items_for_routes(&fleet, &routes);
/// assert_eq!(reduced.items.len(), 2);
/// assert_eq!(reduced.items[0].weight, 2000.0);
/// assert_eq!(reduced.items[1].weight, 1000.0);
/// assert_eq!(reduced.unserviceable.len(), 1);
/// ```
pub fn items_for_routes(vehicles: &[Vehicle], routes: &[RouteRequirement]) -> RouteItems {
    let mut out = RouteItems::default();
    for req in routes {
        match cheapest_capable(vehicles, req.min_power) {
            Some(vehicle) => {
                out.items.push(Item::new(vehicle.cost(), req.route.profit));
                out.sources.push((*req, *vehicle));
            }
            None => out.unserviceable.push(*req),
        }
    }
    out
}
