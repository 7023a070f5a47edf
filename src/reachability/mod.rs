//! Power-bounded reachability queries on a [`Network`](crate::models::Network).
//!
//! - [`path_under_power`] — Can a vehicle of a given power connect two sites? O(V+E)
//! - [`minimum_power`] — Least power connecting two sites, by binary search
//! - [`minimum_power_batch`] — Independent queries fanned out across threads

mod min_power;
mod power_path;

pub use min_power::{
    minimum_power, minimum_power_batch, minimum_power_with, MinPowerPath, PowerSearchConfig,
};
pub use power_path::path_under_power;
