//! Vehicle type with power capacity and acquisition cost.

use serde::{Deserialize, Serialize};

/// A vehicle that can serve one route whose power requirement it meets.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Vehicle;
///
/// let v = Vehicle::new(0, 10.0, 2000.0);
/// assert_eq!(v.id(), 0);
/// assert_eq!(v.capacity(), 10.0);
/// assert!(v.can_serve(10.0));
/// assert!(!v.can_serve(10.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    id: usize,
    capacity: f64,
    cost: f64,
}

impl Vehicle {
    /// Creates a vehicle with the given ID, power capacity, and cost.
    pub fn new(id: usize, capacity: f64, cost: f64) -> Self {
        Self { id, capacity, cost }
    }

    /// Vehicle ID.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Maximum power the vehicle delivers.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Acquisition cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns `true` if the vehicle has enough power for `required`.
    pub fn can_serve(&self, required: f64) -> bool {
        self.capacity >= required
    }
}

/// Returns the cheapest vehicle able to deliver `required` power.
///
/// Ties keep the earliest vehicle in `vehicles`.
pub fn cheapest_capable(vehicles: &[Vehicle], required: f64) -> Option<&Vehicle> {
    vehicles
        .iter()
        .filter(|v| v.can_serve(required))
        .fold(None, |best: Option<&Vehicle>, v| match best {
            Some(b) if b.cost <= v.cost => Some(b),
            _ => Some(v),
        })
}
