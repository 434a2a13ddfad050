//! Vigil Geodesy
//!
//! WGS84 coordinate handling and great-circle distance for the proximity
//! notifier.
//!
//! # Distance Model
//!
//! Distances are computed with the haversine formula on a sphere of mean
//! Earth radius 6 371 000 m. At the scales the notifier cares about
//! (hundreds to thousands of meters) the spherical error versus a full
//! ellipsoid model is well under a meter, far inside the notify radii.
//!
//! # Validation
//!
//! Coordinates arrive from external feeds and backend documents, so they
//! are validated at the point of use, not at construction. A [`GeoPoint`]
//! can hold any pair of floats; [`GeoPoint::validate`] decides whether it
//! names a real place.

mod distance;
mod point;

pub use distance::{haversine_m, EARTH_RADIUS_M};
pub use point::{GeoError, GeoPoint};
