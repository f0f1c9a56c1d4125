//! Domain types for the nearest-station service.
//!
//! Coordinates are validated at construction time, so code that receives
//! a `GeoCoordinate` can compute distances without further checks.

mod coordinate;
mod station;

pub use coordinate::{EARTH_RADIUS_KM, GeoCoordinate, InvalidCoordinate, haversine_km, round_km};
pub use station::{RankedStation, StationRecord};
