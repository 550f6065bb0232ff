//! Trip type.

use serde::{Deserialize, Serialize};

/// An ordered sequence of node IDs serviced by one vehicle run.
///
/// A trip starts and ends at the depot (not stored in `path`).
///
/// # Examples
///
/// ```
/// use u_delivery::models::Trip;
///
/// let trip = Trip::new(vec!["A", "B"], 10.0);
/// assert_eq!(trip.len(), 2);
/// assert_eq!(trip.path(), &["A", "B"]);
/// assert_eq!(trip.load(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip<I> {
    path: Vec<I>,
    load: f64,
}

impl<I> Trip<I> {
    /// Creates a trip from an ordered path and its summed demand.
    pub fn new(path: Vec<I>, load: f64) -> Self {
        Self { path, load }
    }

    /// Node IDs in visit order.
    pub fn path(&self) -> &[I] {
        &self.path
    }

    /// Summed demand of all nodes on this trip.
    pub fn load(&self) -> f64 {
        self.load
    }

    /// Number of stops (excluding the depot).
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Returns `true` if the trip has no stops.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Consumes the trip, returning its path.
    pub fn into_path(self) -> Vec<I> {
        self.path
    }
}
