//! Typed nearest-station requests.
//!
//! Both the query-string and the JSON-body entry points end up here, so
//! they share one set of validation rules.

use crate::domain::GeoCoordinate;

use super::config::NearestConfig;
use super::error::ValidationError;

/// A validated nearest-station request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestRequest {
    pub caller: GeoCoordinate,
    pub limit: usize,
}

impl NearestRequest {
    pub fn new(caller: GeoCoordinate, limit: usize) -> Self {
        Self { caller, limit }
    }

    /// Build a request from already-decoded numbers.
    ///
    /// Missing coordinates are reported before range checks, matching the
    /// order in which a client would fix them.
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
        limit: Option<usize>,
        config: &NearestConfig,
    ) -> Result<Self, ValidationError> {
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Err(ValidationError::MissingCoordinates);
        };

        let caller = GeoCoordinate::new(latitude, longitude)?;
        Ok(Self::new(caller, config.limit(limit)))
    }

    /// Build a request from raw query-string values.
    ///
    /// Blank values count as missing. A `limit` that is not a non-negative
    /// integer is ignored in favour of the configured default.
    pub fn from_query(
        lat: Option<&str>,
        lng: Option<&str>,
        limit: Option<&str>,
        config: &NearestConfig,
    ) -> Result<Self, ValidationError> {
        let lat = non_blank(lat);
        let lng = non_blank(lng);
        if lat.is_none() || lng.is_none() {
            return Err(ValidationError::MissingCoordinates);
        }

        let latitude = lat.map(|v| parse_number("lat", v)).transpose()?;
        let longitude = lng.map(|v| parse_number("lng", v)).transpose()?;

        let limit = non_blank(limit).and_then(|raw| match raw.parse::<usize>() {
            Ok(n) => Some(n),
            Err(_) => {
                tracing::debug!(limit = raw, "ignoring unparseable limit");
                None
            }
        });

        Self::from_parts(latitude, longitude, limit, config)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    raw.parse::<f64>().map_err(|_| ValidationError::Unparseable {
        field,
        value: raw.to_string(),
    })
}
