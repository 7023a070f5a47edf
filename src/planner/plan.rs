//! End-to-end planning: network, routes, and fleet in; assignment out.

use tracing::{debug, info_span, warn};

use crate::assignment::{assign_greedy, items_for_routes, knapsack_with};
use crate::error::{Error, Result};
use crate::models::{Assignment, Network, Route, RouteRequirement, Vehicle};
use crate::spanning::build_mst;
use crate::tree::RootedTree;

use super::{PlannerConfig, Strategy};

/// Outcome of a planning run.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Optimizer that produced the assignment.
    pub strategy: Strategy,
    /// Vehicles serving routes.
    pub assignment: Assignment,
    /// Power requirement of every reachable route, in input order.
    pub requirements: Vec<RouteRequirement>,
    /// Routes whose endpoints lie in different components.
    pub unreachable: Vec<Route>,
    /// Reachable routes that no vehicle in the fleet is powerful enough for.
    pub unserviceable: Vec<RouteRequirement>,
    /// `false` if an exact search was stopped early.
    pub completed: bool,
}

impl Plan {
    fn empty(strategy: Strategy) -> Self {
        Self {
            strategy,
            assignment: Assignment::new(),
            requirements: Vec::new(),
            unreachable: Vec::new(),
            unserviceable: Vec::new(),
            completed: true,
        }
    }

    /// Total profit of the served routes.
    pub fn total_profit(&self) -> f64 {
        self.assignment.total_profit()
    }
}

/// Runs the full pipeline: minimum spanning forest, per-route power
/// requirement from the rooted forest, then the configured optimizer.
///
/// # Examples
///
/// ```
/// use u_delivery::models::{Network, Route, Vehicle};
/// use u_delivery::planner::{Planner, PlannerConfig, Strategy};
///
/// let mut network = Network::new();
/// network.add_edge(1, 2, 10.0);
/// network.add_edge(2, 3, 5.0);
/// let routes = [Route::new(1, 3, 100.0)];
/// let fleet = [Vehicle::new(0, 5.0, 1000.0), Vehicle::new(1, 10.0, 2000.0)];
///
/// let planner = Planner::new(
///     PlannerConfig::default()
///         .with_budget(2000.0)
///         .with_strategy(Strategy::Exact),
/// );
/// let plan = planner.plan(&network, &routes, &fleet).unwrap();
/// assert_eq!(plan.total_profit(), 100.0);
/// assert_eq!(plan.requirements[0].min_power, 10.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    config: PlannerConfig,
}

impl Planner {
    /// Creates a planner with the given settings.
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// The planner's settings.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Plans which vehicles serve which routes.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if a route names a site absent from `network`.
    /// Routes between disconnected sites are reported in
    /// [`Plan::unreachable`] rather than failing the run.
    pub fn plan(&self, network: &Network, routes: &[Route], vehicles: &[Vehicle]) -> Result<Plan> {
        let span = info_span!(
            "plan",
            routes = routes.len(),
            vehicles = vehicles.len(),
            strategy = ?self.config.strategy
        );
        let _enter = span.enter();

        for route in routes {
            for id in [route.source, route.destination] {
                if !network.contains(id) {
                    return Err(Error::UnknownNode(id));
                }
            }
        }
        let mut plan = Plan::empty(self.config.strategy);
        if routes.is_empty() {
            return Ok(plan);
        }

        let tree = build_mst(network);
        let rooted = RootedTree::new(&tree)?;
        for (route, result) in routes.iter().zip(rooted.requirements(routes)) {
            match result {
                Ok(req) => plan.requirements.push(req),
                Err(Error::Disconnected { src, dest }) => {
                    warn!(src, dest, "route endpoints are not connected; skipping");
                    plan.unreachable.push(*route);
                }
                Err(e) => return Err(e),
            }
        }

        match self.config.strategy {
            Strategy::Greedy => {
                plan.unserviceable = plan
                    .requirements
                    .iter()
                    .filter(|req| !vehicles.iter().any(|v| v.can_serve(req.min_power)))
                    .copied()
                    .collect();
                let outcome = assign_greedy(vehicles.to_vec(), &plan.requirements, self.config.budget);
                plan.assignment = outcome.assignment;
            }
            Strategy::Exact => {
                let reduced = items_for_routes(vehicles, &plan.requirements);
                let outcome = knapsack_with(self.config.budget, &reduced.items, &self.config.knapsack);
                for &i in &outcome.selected {
                    let (req, vehicle) = reduced.sources[i];
                    plan.assignment.push(vehicle, req);
                }
                plan.unserviceable = reduced.unserviceable;
                plan.completed = outcome.completed;
            }
        }

        for req in &plan.unserviceable {
            warn!(
                src = req.route.source,
                dest = req.route.destination,
                min_power = req.min_power,
                "no vehicle is powerful enough for route"
            );
        }
        debug!(
            served = plan.assignment.len(),
            profit = plan.total_profit(),
            unreachable = plan.unreachable.len(),
            "plan finished"
        );
        Ok(plan)
    }
}
