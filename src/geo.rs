//! Geodesic distance between coordinates.
//!
//! Haversine on a spherical Earth. Well within the displayed 0.1 mi
//! precision at catalog search ranges (<= 120 mi).

use crate::domain::models::Coordinate;

const EARTH_RADIUS_METERS: f64 = 6_371_000.0;
const MILES_PER_METER: f64 = 0.000621371;

/// Great-circle distance in miles between two WGS84 points.
pub fn haversine_miles(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = ((d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c * MILES_PER_METER
}
