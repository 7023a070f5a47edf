//! Minimum power between two sites by binary search over the power domain.
//!
//! # Algorithm
//!
//! Feasibility is monotonic in the power ceiling: if a vehicle with power
//! `P` can reach the destination, so can any vehicle with more power. The
//! search keeps an interval `[lo, hi]` between the smallest and largest link
//! power, with `hi` always feasible, and halves it until it is narrower than
//! the configured tolerance.
//!
//! With the default unit tolerance powers are treated as integers: the
//! answer is `floor(hi)`, which is exact whenever every link power is
//! integral. If `floor(hi)` turns out infeasible (fractional powers), `hi`
//! itself is used.
//!
//! # Complexity
//!
//! O((V + E) · log((max - min) / tolerance)).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Network, NodeId};

use super::power_path::search;

/// Convergence settings for [`minimum_power_with`].
///
/// # Examples
///
/// ```
/// use u_delivery::reachability::PowerSearchConfig;
///
/// let config = PowerSearchConfig::default().with_tolerance(0.01);
/// assert_eq!(config.tolerance, 0.01);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerSearchConfig {
    /// Width below which the search interval stops shrinking.
    ///
    /// Values of 1 or more round the result down to an integer.
    pub tolerance: f64,
}

impl Default for PowerSearchConfig {
    fn default() -> Self {
        Self { tolerance: 1.0 }
    }
}

impl PowerSearchConfig {
    /// Sets the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}

/// A path between two sites and the least power that travels it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinPowerPath {
    /// Nodes from source to destination.
    pub path: Vec<NodeId>,
    /// Minimum power required.
    pub power: f64,
}

/// Minimum power between `src` and `dest` with unit tolerance.
///
/// # Errors
///
/// [`Error::UnknownNode`] if an endpoint is absent, [`Error::Disconnected`]
/// if the endpoints lie in different components.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Network;
/// use u_delivery::reachability::minimum_power;
///
/// let mut network = Network::new();
/// network.add_edge(1, 2, 10.0);
/// network.add_edge(2, 3, 5.0);
///
/// let result = minimum_power(&network, 1, 3).unwrap();
/// assert_eq!(result.path, vec![1, 2, 3]);
/// assert_eq!(result.power, 10.0);
/// ```
pub fn minimum_power(network: &Network, src: NodeId, dest: NodeId) -> Result<MinPowerPath> {
    minimum_power_with(network, src, dest, &PowerSearchConfig::default())
}

/// Minimum power between `src` and `dest` with explicit convergence settings.
///
/// The reported power is the bottleneck of the returned path, which never
/// exceeds the ceiling the search converged to.
pub fn minimum_power_with(
    network: &Network,
    src: NodeId,
    dest: NodeId,
    config: &PowerSearchConfig,
) -> Result<MinPowerPath> {
    for id in [src, dest] {
        if !network.contains(id) {
            return Err(Error::UnknownNode(id));
        }
    }
    if src == dest {
        return Ok(MinPowerPath {
            path: vec![src],
            power: 0.0,
        });
    }

    let disconnected = Error::Disconnected { src, dest };
    let (mut lo, mut hi) = network.power_range().ok_or(disconnected.clone())?;
    let mut best = search(network, src, dest, hi).ok_or(disconnected)?;

    let tolerance = if config.tolerance > 0.0 {
        config.tolerance
    } else {
        PowerSearchConfig::default().tolerance
    };

    let mut iterations = 0usize;
    while hi - lo >= tolerance {
        let mid = lo + (hi - lo) / 2.0;
        if mid <= lo || mid >= hi {
            break;
        }
        match search(network, src, dest, mid) {
            Some(found) => {
                hi = mid;
                best = found;
            }
            None => lo = mid,
        }
        iterations += 1;
    }

    if tolerance >= 1.0 {
        let rounded = hi.floor();
        if rounded < hi {
            if let Some(found) = search(network, src, dest, rounded) {
                best = found;
            }
        }
    }

    debug!(
        src,
        dest,
        iterations,
        power = best.bottleneck,
        "minimum power search converged"
    );

    Ok(MinPowerPath {
        path: best.nodes,
        power: best.bottleneck,
    })
}

/// Runs [`minimum_power_with`] for many pairs in parallel.
///
/// Results are returned in the order of `pairs`.
pub fn minimum_power_batch(
    network: &Network,
    pairs: &[(NodeId, NodeId)],
    config: &PowerSearchConfig,
) -> Vec<Result<MinPowerPath>> {
    pairs
        .par_iter()
        .map(|&(src, dest)| minimum_power_with(network, src, dest, config))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> Network {
        let mut g = Network::new();
        g.add_edge(1, 2, 10.0);
        g.add_edge(2, 3, 5.0);
        g
    }

    #[test]
    fn test_line_scenario() {
        let r = minimum_power(&line(), 1, 3).expect("connected");
        assert_eq!(r.path, vec![1, 2, 3]);
        assert_eq!(r.power, 10.0);
    }

    #[test]
    fn test_disconnected_scenario() {
        let mut g = Network::new();
        g.add_edge(1, 2, 4.0);
        g.add_edge(3, 4, 7.0);
        assert_eq!(
            minimum_power(&g, 1, 3),
            Err(Error::Disconnected { src: 1, dest: 3 })
        );
    }

    #[test]
    fn test_isolated_nodes_without_edges() {
        let g = Network::with_nodes([1, 2]);
        assert_eq!(
            minimum_power(&g, 1, 2),
            Err(Error::Disconnected { src: 1, dest: 2 })
        );
    }

    #[test]
    fn test_unknown_node() {
        assert_eq!(minimum_power(&line(), 1, 9), Err(Error::UnknownNode(9)));
    }

    #[test]
    fn test_same_node() {
        let r = minimum_power(&line(), 2, 2).expect("trivial");
        assert_eq!(r.path, vec![2]);
        assert_eq!(r.power, 0.0);
    }

    #[test]
    fn test_prefers_lower_bottleneck_route() {
        let mut g = Network::new();
        g.add_edge(1, 2, 20.0);
        g.add_edge(2, 5, 20.0);
        g.add_edge(1, 3, 7.0);
        g.add_edge(3, 4, 12.0);
        g.add_edge(4, 5, 3.0);
        let r = minimum_power(&g, 1, 5).expect("connected");
        assert_eq!(r.power, 12.0);
        assert_eq!(r.path, vec![1, 3, 4, 5]);
    }

    #[test]
    fn test_minimum_at_smallest_edge() {
        let mut g = Network::new();
        g.add_edge(1, 2, 3.0);
        g.add_edge(2, 3, 9.0);
        let r = minimum_power(&g, 1, 2).expect("connected");
        assert_eq!(r.power, 3.0);
    }

    #[test]
    fn test_uniform_powers() {
        let mut g = Network::new();
        g.add_edge(1, 2, 4.0);
        g.add_edge(2, 3, 4.0);
        assert_eq!(minimum_power(&g, 1, 3).expect("connected").power, 4.0);
    }

    #[test]
    fn test_fractional_powers_with_fine_tolerance() {
        let mut g = Network::new();
        g.add_edge(1, 2, 2.5);
        g.add_edge(2, 3, 0.25);
        g.add_edge(1, 3, 7.75);
        let config = PowerSearchConfig::default().with_tolerance(1e-6);
        let r = minimum_power_with(&g, 1, 3, &config).expect("connected");
        assert_eq!(r.power, 2.5);
        assert_eq!(r.path, vec![1, 2, 3]);
    }

    #[test]
    fn test_fractional_powers_unit_tolerance_stays_feasible() {
        let mut g = Network::new();
        g.add_edge(1, 2, 2.5);
        g.add_edge(2, 3, 2.5);
        let r = minimum_power(&g, 1, 3).expect("connected");
        assert_eq!(r.power, 2.5);
    }

    #[test]
    fn test_non_positive_tolerance_falls_back() {
        let config = PowerSearchConfig::default().with_tolerance(0.0);
        let r = minimum_power_with(&line(), 1, 3, &config).expect("connected");
        assert_eq!(r.power, 10.0);
    }

    #[test]
    fn test_idempotent() {
        let g = line();
        assert_eq!(minimum_power(&g, 3, 1), minimum_power(&g, 3, 1));
    }

    #[test]
    fn test_batch_keeps_order() {
        let mut g = line();
        g.add_edge(8, 9, 1.0);
        let results = minimum_power_batch(
            &g,
            &[(1, 3), (1, 8), (8, 9), (2, 2)],
            &PowerSearchConfig::default(),
        );
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().map(|r| r.power), Ok(10.0));
        assert!(matches!(results[1], Err(Error::Disconnected { .. })));
        assert_eq!(results[2].as_ref().map(|r| r.power), Ok(1.0));
        assert_eq!(results[3].as_ref().map(|r| r.power), Ok(0.0));
    }

    #[test]
    fn test_config_from_partial_json() {
        let config: PowerSearchConfig = serde_json::from_str("{}").expect("valid json");
        assert_eq!(config, PowerSearchConfig::default());
        let config: PowerSearchConfig =
            serde_json::from_str(r#"{"tolerance": 0.5}"#).expect("valid json");
        assert_eq!(config.tolerance, 0.5);
    }
}
