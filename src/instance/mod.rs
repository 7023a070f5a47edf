//! Seeded random instances.
//!
//! - [`random_instance`] — Connected network, routes, and fleet drawn from an RNG

mod generator;

pub use generator::{random_instance, Instance, InstanceConfig};
