//! Geographic location type.

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// A WGS-84 point in decimal degrees.
///
/// # Examples
///
/// ```
/// use u_delivery::models::Location;
///
/// let depot = Location::new(-6.2, 106.8);
/// assert_eq!(depot.lat, -6.2);
/// assert!(depot.is_finite());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Location {
    /// Creates a location from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` if both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Rejects non-finite coordinates, naming `what` in the error.
    pub(crate) fn validate(&self, what: &str) -> Result<()> {
        if self.is_finite() {
            Ok(())
        } else {
            Err(PlanError::invalid(format!(
                "{what} has non-finite coordinates ({}, {})",
                self.lat, self.lng
            )))
        }
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}
