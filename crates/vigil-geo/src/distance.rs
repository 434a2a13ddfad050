//! Great-circle distance via the haversine formula.

use crate::point::GeoPoint;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Great-circle distance between two points, in meters.
///
/// Haversine is numerically stable for the short distances the proximity
/// engine compares against its radii, unlike the spherical law of cosines
/// which loses precision below ~1 km.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push h a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}
