//! Geographic coordinates and great-circle distance.

use std::fmt;

use serde::Serialize;

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Error returned when a coordinate is outside the valid range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("coordinates out of range: {reason}")]
pub struct InvalidCoordinate {
    reason: &'static str,
}

/// A validated latitude/longitude pair in decimal degrees.
///
/// Latitude is always within [-90, 90] and longitude within [-180, 180].
/// Non-finite values are rejected, so any `GeoCoordinate` can be fed
/// straight into distance calculations.
///
/// # Examples
///
/// ```
/// use wasla_server::domain::GeoCoordinate;
///
/// let tunis = GeoCoordinate::new(36.8065, 10.1815).unwrap();
/// assert_eq!(tunis.latitude(), 36.8065);
///
/// assert!(GeoCoordinate::new(91.0, 0.0).is_err());
/// assert!(GeoCoordinate::new(0.0, -180.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Build a coordinate, checking both components are in range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidCoordinate> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidCoordinate {
                reason: "latitude must be between -90 and 90",
            });
        }

        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidCoordinate {
                reason: "longitude must be between -180 and 180",
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in kilometres.
    pub fn distance_km(&self, other: &GeoCoordinate) -> f64 {
        haversine_km(self, other)
    }
}

impl fmt::Display for GeoCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// Haversine distance between two coordinates, in kilometres.
pub fn haversine_km(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Round a distance to two decimal places for display.
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}
