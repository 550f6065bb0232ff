//! Haversine great-circle distance.

use crate::models::Location;

/// Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers.
///
/// No road network is involved. Non-finite coordinates yield `NaN`.
///
/// # Examples
///
/// ```
/// use u_delivery::distance::haversine_km;
/// use u_delivery::models::Location;
///
/// let a = Location::new(36.17, -115.14);
/// assert_eq!(haversine_km(a, a), 0.0);
/// ```
pub fn haversine_km(from: Location, to: Location) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
