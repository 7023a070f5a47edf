//! Random problem instances for benchmarks and tests.
//!
//! A generated network is always connected: nodes `1..=n` are first joined
//! by a random spanning tree (each node links to an earlier one), then extra
//! links are drawn between random pairs. Powers, distances, profits and costs
//! are integral so results are easy to compare exactly.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Network, Route, Vehicle};

/// Size and value ranges of a generated instance.
///
/// # Examples
///
/// ```
/// use u_delivery::instance::InstanceConfig;
///
/// let config = InstanceConfig::default().with_nodes(50).with_routes(30);
/// assert_eq!(config.nodes, 50);
/// assert_eq!(config.routes, 30);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// Sites, numbered `1..=nodes`.
    pub nodes: usize,
    /// Links drawn on top of the spanning tree. Self-loops are discarded.
    pub extra_edges: usize,
    /// Link powers and vehicle capacities fall in `0..=max_power`.
    pub max_power: u32,
    /// Link distances fall in `1..=max_distance`.
    pub max_distance: u32,
    /// Number of routes.
    pub routes: usize,
    /// Route profits fall in `0..=max_profit`.
    pub max_profit: u32,
    /// Number of vehicles.
    pub vehicles: usize,
    /// Vehicle costs fall in `1..=max_cost`.
    pub max_cost: u32,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            nodes: 20,
            extra_edges: 20,
            max_power: 100,
            max_distance: 50,
            routes: 10,
            max_profit: 1000,
            vehicles: 5,
            max_cost: 10_000,
        }
    }
}

impl InstanceConfig {
    pub fn with_nodes(mut self, nodes: usize) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_extra_edges(mut self, extra_edges: usize) -> Self {
        self.extra_edges = extra_edges;
        self
    }

    pub fn with_max_power(mut self, max_power: u32) -> Self {
        self.max_power = max_power;
        self
    }

    pub fn with_routes(mut self, routes: usize) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_vehicles(mut self, vehicles: usize) -> Self {
        self.vehicles = vehicles;
        self
    }

    pub fn with_max_cost(mut self, max_cost: u32) -> Self {
        self.max_cost = max_cost;
        self
    }
}

/// A network, its routes, and a fleet.
#[derive(Debug, Clone)]
pub struct Instance {
    pub network: Network,
    pub routes: Vec<Route>,
    pub vehicles: Vec<Vehicle>,
}

/// Draws an instance from `rng`.
///
/// The first vehicle is always rated at `max_power`, so every route of a
/// generated instance can be served by some vehicle.
///
/// # Examples
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use u_delivery::instance::{random_instance, InstanceConfig};
///
/// let mut rng = StdRng::seed_from_u64(42);
/// let inst = random_instance(&InstanceConfig::default(), &mut rng);
/// assert_eq!(inst.network.node_count(), 20);
/// assert_eq!(inst.network.connected_components().len(), 1);
/// ```
pub fn random_instance<R: Rng>(config: &InstanceConfig, rng: &mut R) -> Instance {
    let n = config.nodes;
    let max_cost = config.max_cost.max(1);
    let mut network = Network::with_nodes(1..=n);

    for i in 2..=n {
        let j = rng.random_range(1..i);
        link(&mut network, config, rng, j, i);
    }
    if n >= 2 {
        for _ in 0..config.extra_edges {
            let a = rng.random_range(1..=n);
            let b = rng.random_range(1..=n);
            if a != b {
                link(&mut network, config, rng, a, b);
            }
        }
    }

    let routes = if n == 0 {
        Vec::new()
    } else {
        (0..config.routes)
            .map(|_| {
                Route::new(
                    rng.random_range(1..=n),
                    rng.random_range(1..=n),
                    rng.random_range(0..=config.max_profit) as f64,
                )
            })
            .collect()
    };

    let vehicles = (0..config.vehicles)
        .map(|id| {
            let capacity = if id == 0 {
                config.max_power
            } else {
                rng.random_range(0..=config.max_power)
            };
            Vehicle::new(id, capacity as f64, rng.random_range(1..=max_cost) as f64)
        })
        .collect();

    Instance {
        network,
        routes,
        vehicles,
    }
}

fn link<R: Rng>(network: &mut Network, config: &InstanceConfig, rng: &mut R, a: usize, b: usize) {
    let power = rng.random_range(0..=config.max_power) as f64;
    let distance = rng.random_range(1..=config.max_distance.max(1)) as f64;
    network.add_edge_with_distance(a, b, power, distance);
}
