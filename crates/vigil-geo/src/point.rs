//! WGS84 coordinate pairs.

use thiserror::Error;

/// Errors produced by coordinate validation.
#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    /// Latitude or longitude is NaN or infinite.
    #[error("coordinate is not a finite number")]
    NonFinite,

    /// Latitude outside [-90, 90].
    #[error("latitude {0} out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180].
    #[error("longitude {0} out of range [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A point on the WGS84 ellipsoid, in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in decimal degrees, north positive.
    pub latitude: f64,
    /// Longitude in decimal degrees, east positive.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point. No validation happens here; see [`GeoPoint::validate`].
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check that this point names a real location.
    ///
    /// Backend documents can carry garbage coordinates (missing fields
    /// deserialized as NaN, swapped lat/lon out of range). Callers iterate
    /// many points and must skip bad ones rather than abort, so this
    /// returns the reason instead of panicking.
    pub fn validate(&self) -> Result<(), GeoError> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(GeoError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(GeoError::LatitudeOutOfRange(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(GeoError::LongitudeOutOfRange(self.longitude));
        }
        Ok(())
    }

    /// Convenience wrapper around [`GeoPoint::validate`].
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}
