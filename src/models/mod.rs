//! Domain model types for power-constrained delivery networks.
//!
//! Provides the core abstractions: a network of sites joined by links that
//! each demand a minimum power, routes that earn a profit, vehicles with a
//! power capacity and a cost, and the assignments that pair them.

mod assignment;
mod network;
mod route;
mod vehicle;

pub use assignment::{AssignedRoute, Assignment};
pub use network::{Adjacent, Edge, Network, NodeId};
pub use route::{Route, RouteRequirement};
pub use vehicle::{cheapest_capable, Vehicle};
