//! Dense distance matrix over a depot and its delivery nodes.

use super::haversine_km;
use crate::models::Location;

/// A dense n×n distance matrix stored in row-major order.
///
/// Index 0 is the depot; index `k + 1` is the `k`-th delivery location.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::DistanceMatrix;
/// use u_delivery::models::Location;
///
/// let depot = Location::new(0.0, 0.0);
/// let stops = [Location::new(0.0, 1.0), Location::new(1.0, 0.0)];
/// let dm = DistanceMatrix::from_locations(depot, &stops);
/// assert_eq!(dm.size(), 3);
/// assert_eq!(dm.get(0, 0), 0.0);
/// assert!((dm.get(0, 1) - dm.get(1, 0)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a distance matrix of the given size, initialized to zero.
    fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes haversine distances (km) between the depot and every location.
    pub fn from_locations(depot: Location, locations: &[Location]) -> Self {
        let points: Vec<Location> = std::iter::once(depot)
            .chain(locations.iter().copied())
            .collect();
        let n = points.len();
        let mut dm = Self::new(n);
        for i in 0..n {
            for j in (i + 1)..n {
                let d = haversine_km(points[i], points[j]);
                dm.set(i, j, d);
                dm.set(j, i, d);
            }
        }
        dm
    }

    /// Creates a distance matrix from an explicit n×n grid.
    ///
    /// Returns `None` if the data length doesn't match `size * size`.
    #[cfg(test)]
    pub(crate) fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        if data.len() != size * size {
            return None;
        }
        Some(Self { data, size })
    }

    /// Returns the distance from location `from` to location `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Sets the distance from location `from` to location `to`.
    fn set(&mut self, from: usize, to: usize, distance: f64) {
        self.data[from * self.size + to] = distance;
    }

    /// Number of locations in this matrix, depot included.
    pub fn size(&self) -> usize {
        self.size
    }
}
